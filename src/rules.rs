//! Pure, stateless rule tables: legality, contestability, costs, gains,
//! required-card mapping, and the win condition. The engine is the only
//! caller; nothing here mutates anything.

use crate::action::{ActionKind, GameAction};
use crate::card::Character;
use crate::player::Player;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;
pub const STARTING_COINS: u8 = 2;
pub const STARTING_INFLUENCES: usize = 2;
pub const COUP_COST: u8 = 7;
pub const ASSASSINATE_COST: u8 = 3;
pub const FORCED_COUP_THRESHOLD: u8 = 10;
pub const DECK_SIZE: usize = 15;

/// The character an action claims. Income, Foreign Aid and Coup claim nothing.
pub fn required_card(kind: ActionKind) -> Option<Character> {
    match kind {
        ActionKind::Tax => Some(Character::Duke),
        ActionKind::Assassinate => Some(Character::Assassin),
        ActionKind::Steal => Some(Character::Captain),
        ActionKind::Exchange => Some(Character::Ambassador),
        ActionKind::Income | ActionKind::ForeignAid | ActionKind::Coup => None,
    }
}

pub fn can_be_challenged(kind: ActionKind) -> bool {
    required_card(kind).is_some()
}

pub fn can_be_blocked(kind: ActionKind) -> bool {
    matches!(
        kind,
        ActionKind::ForeignAid | ActionKind::Steal | ActionKind::Assassinate
    )
}

pub fn requires_target(kind: ActionKind) -> bool {
    matches!(
        kind,
        ActionKind::Coup | ActionKind::Assassinate | ActionKind::Steal
    )
}

pub fn action_cost(kind: ActionKind) -> u8 {
    match kind {
        ActionKind::Coup => COUP_COST,
        ActionKind::Assassinate => ASSASSINATE_COST,
        _ => 0,
    }
}

/// Coin gain on full resolution. Steal's is the cap; the actual amount is
/// limited by the target's purse.
pub fn action_gain(kind: ActionKind) -> u8 {
    match kind {
        ActionKind::Income => 1,
        ActionKind::ForeignAid => 2,
        ActionKind::Tax => 3,
        ActionKind::Steal => 2,
        _ => 0,
    }
}

pub fn is_valid_target(actor: usize, target: Option<usize>, roster: &[Player]) -> bool {
    match target {
        Some(idx) => idx < roster.len() && idx != actor && roster[idx].is_alive(),
        None => false,
    }
}

/// Whether the action may even be attempted. Claimed-card actions are always
/// attemptable (bluffing is the point); only coin costs and targets gate here.
pub fn can_perform(actor: &Player, action: &GameAction, roster: &[Player]) -> bool {
    if !actor.is_alive() {
        return false;
    }

    match action.kind {
        ActionKind::Income | ActionKind::ForeignAid | ActionKind::Tax | ActionKind::Exchange => {
            true
        }
        ActionKind::Coup => {
            actor.can_afford(COUP_COST) && is_valid_target(action.player, action.target, roster)
        }
        ActionKind::Assassinate => {
            actor.can_afford(ASSASSINATE_COST)
                && is_valid_target(action.player, action.target, roster)
        }
        ActionKind::Steal => is_valid_target(action.player, action.target, roster),
    }
}

/// Players entitled to claim a block: everyone else for Foreign Aid, only the
/// target for Steal and Assassinate.
pub fn potential_blockers(action: &GameAction, roster: &[Player]) -> Vec<usize> {
    match action.kind {
        ActionKind::ForeignAid => roster
            .iter()
            .filter(|p| p.is_alive() && p.id() != action.player)
            .map(|p| p.id())
            .collect(),
        ActionKind::Steal | ActionKind::Assassinate => match action.target {
            Some(idx) if idx < roster.len() && roster[idx].is_alive() => vec![idx],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Every living player but the actor, when the action claims a card.
pub fn potential_challengers(action: &GameAction, roster: &[Player]) -> Vec<usize> {
    if !can_be_challenged(action.kind) {
        return Vec::new();
    }

    roster
        .iter()
        .filter(|p| p.is_alive() && p.id() != action.player)
        .map(|p| p.id())
        .collect()
}

/// At ten coins the only legal move is Coup.
pub fn is_forced_coup(player: &Player) -> bool {
    player.coins() >= FORCED_COUP_THRESHOLD
}

pub fn is_valid_player_count(count: usize) -> bool {
    (MIN_PLAYERS..=MAX_PLAYERS).contains(&count)
}

pub fn is_game_over(roster: &[Player]) -> bool {
    roster.iter().filter(|p| p.is_alive()).count() <= 1
}

pub fn winner(roster: &[Player]) -> Option<usize> {
    if !is_game_over(roster) {
        return None;
    }
    roster.iter().find(|p| p.is_alive()).map(|p| p.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(i, format!("p{i}"))).collect()
    }

    #[test]
    fn contestability_tables() {
        assert!(can_be_challenged(ActionKind::Tax));
        assert!(can_be_challenged(ActionKind::Assassinate));
        assert!(can_be_challenged(ActionKind::Steal));
        assert!(can_be_challenged(ActionKind::Exchange));
        assert!(!can_be_challenged(ActionKind::Income));
        assert!(!can_be_challenged(ActionKind::ForeignAid));
        assert!(!can_be_challenged(ActionKind::Coup));

        assert!(can_be_blocked(ActionKind::ForeignAid));
        assert!(can_be_blocked(ActionKind::Steal));
        assert!(can_be_blocked(ActionKind::Assassinate));
        assert!(!can_be_blocked(ActionKind::Tax));
        assert!(!can_be_blocked(ActionKind::Coup));
    }

    #[test]
    fn target_must_be_someone_else_alive() {
        let mut players = roster(3);
        assert!(is_valid_target(0, Some(1), &players));
        assert!(!is_valid_target(0, Some(0), &players));
        assert!(!is_valid_target(0, Some(3), &players));
        assert!(!is_valid_target(0, None, &players));

        players[1].alive = false;
        assert!(!is_valid_target(0, Some(1), &players));
    }

    #[test]
    fn coup_and_assassinate_are_gated_on_coins() {
        let mut players = roster(2);

        let coup = GameAction::new(0, ActionKind::Coup, Some(1));
        assert!(!can_perform(&players[0], &coup, &players));

        let assassinate = GameAction::new(0, ActionKind::Assassinate, Some(1));
        assert!(!can_perform(&players[0], &assassinate, &players));

        players[0].coins = 7;
        assert!(can_perform(&players[0], &coup, &players));
        assert!(can_perform(&players[0], &assassinate, &players));
    }

    #[test]
    fn claimed_actions_are_always_attemptable() {
        let players = roster(2);
        // no Duke in hand required; bluffing is legal
        let tax = GameAction::new(0, ActionKind::Tax, None);
        assert!(can_perform(&players[0], &tax, &players));

        let exchange = GameAction::new(0, ActionKind::Exchange, None);
        assert!(can_perform(&players[0], &exchange, &players));
    }

    #[test]
    fn steal_from_a_pauper_is_legal() {
        let mut players = roster(2);
        players[1].coins = 0;

        let steal = GameAction::new(0, ActionKind::Steal, Some(1));
        assert!(can_perform(&players[0], &steal, &players));
    }

    #[test]
    fn foreign_aid_blockers_are_everyone_else() {
        let mut players = roster(4);
        players[2].alive = false;

        let aid = GameAction::new(0, ActionKind::ForeignAid, None);
        assert_eq!(potential_blockers(&aid, &players), vec![1, 3]);
    }

    #[test]
    fn steal_blocker_is_the_target_only() {
        let players = roster(4);
        let steal = GameAction::new(0, ActionKind::Steal, Some(2));
        assert_eq!(potential_blockers(&steal, &players), vec![2]);
    }

    #[test]
    fn challengers_exclude_the_actor_and_the_dead() {
        let mut players = roster(4);
        players[3].alive = false;

        let tax = GameAction::new(1, ActionKind::Tax, None);
        assert_eq!(potential_challengers(&tax, &players), vec![0, 2]);

        let income = GameAction::new(1, ActionKind::Income, None);
        assert!(potential_challengers(&income, &players).is_empty());
    }

    #[test]
    fn forced_coup_at_ten_coins() {
        let mut players = roster(2);
        assert!(!is_forced_coup(&players[0]));
        players[0].coins = 10;
        assert!(is_forced_coup(&players[0]));
    }

    #[test]
    fn winner_is_the_sole_survivor() {
        let mut players = roster(3);
        assert!(!is_game_over(&players));
        assert_eq!(winner(&players), None);

        players[0].alive = false;
        players[2].alive = false;
        assert!(is_game_over(&players));
        assert_eq!(winner(&players), Some(1));
    }

    #[test]
    fn costs_and_gains() {
        assert_eq!(action_cost(ActionKind::Coup), COUP_COST);
        assert_eq!(action_cost(ActionKind::Assassinate), ASSASSINATE_COST);
        assert_eq!(action_cost(ActionKind::Income), 0);

        assert_eq!(action_gain(ActionKind::Income), 1);
        assert_eq!(action_gain(ActionKind::ForeignAid), 2);
        assert_eq!(action_gain(ActionKind::Tax), 3);
        assert_eq!(action_gain(ActionKind::Coup), 0);
    }
}
