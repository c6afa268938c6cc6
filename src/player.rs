use serde::{Deserialize, Serialize};

use crate::card::Character;
use crate::rules::{STARTING_COINS, STARTING_INFLUENCES};

/// One seat at the table. Slots are never removed mid-game; an eliminated or
/// disconnected player stays in the roster with `alive == false` so turn
/// order keeps indexing into a fixed list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub(crate) id: usize,
    pub(crate) name: String,
    pub(crate) coins: u8,
    pub(crate) hand: Vec<Character>,
    // influence lost face-up; kept so every card stays accounted for
    pub(crate) revealed: Vec<Character>,
    pub(crate) alive: bool,
}

impl Player {
    pub(crate) fn new(id: usize, name: String) -> Self {
        Self {
            id,
            name,
            coins: STARTING_COINS,
            hand: Vec::with_capacity(STARTING_INFLUENCES),
            revealed: Vec::new(),
            alive: true,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coins(&self) -> u8 {
        self.coins
    }

    pub fn hand(&self) -> &[Character] {
        &self.hand
    }

    pub fn revealed(&self) -> &[Character] {
        &self.revealed
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn influence_count(&self) -> usize {
        self.hand.len()
    }

    pub fn has_character(&self, character: Character) -> bool {
        self.hand.contains(&character)
    }

    pub fn can_afford(&self, cost: u8) -> bool {
        self.coins >= cost
    }

    pub(crate) fn gain_coins(&mut self, amount: u8) {
        self.coins += amount;
    }

    pub(crate) fn spend_coins(&mut self, amount: u8) {
        self.coins = self.coins.saturating_sub(amount);
    }

    pub(crate) fn add_card(&mut self, card: Character) {
        debug_assert!(
            self.hand.len() < STARTING_INFLUENCES,
            "player {} dealt past hand capacity",
            self.id
        );
        self.hand.push(card);
    }

    /// Flip the card at `idx` face-up. Emptying the hand kills the player.
    pub(crate) fn lose_card(&mut self, idx: usize) -> Character {
        let card = self.hand.remove(idx);
        self.revealed.push(card);

        if self.hand.is_empty() {
            self.alive = false;
        }

        card
    }

    /// Remove a held card without revealing it (challenge-win return).
    pub(crate) fn take_card(&mut self, character: Character) -> Option<Character> {
        let idx = self.hand.iter().position(|&c| c == character)?;
        Some(self.hand.remove(idx))
    }

    pub(crate) fn card_count(&self) -> usize {
        self.hand.len() + self.revealed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_two_coins_and_no_cards() {
        let player = Player::new(0, "p0".to_string());
        assert_eq!(player.coins(), STARTING_COINS);
        assert_eq!(player.influence_count(), 0);
        assert!(player.is_alive());
    }

    #[test]
    fn spend_saturates_at_zero() {
        let mut player = Player::new(0, "p0".to_string());
        player.spend_coins(5);
        assert_eq!(player.coins(), 0);
    }

    #[test]
    fn losing_last_card_kills() {
        let mut player = Player::new(0, "p0".to_string());
        player.add_card(Character::Duke);
        player.add_card(Character::Contessa);

        assert_eq!(player.lose_card(0), Character::Duke);
        assert!(player.is_alive());
        assert_eq!(player.revealed(), &[Character::Duke]);

        player.lose_card(0);
        assert!(!player.is_alive());
        assert_eq!(player.influence_count(), 0);
        assert_eq!(player.card_count(), 2);
    }

    #[test]
    fn take_card_skips_revealed() {
        let mut player = Player::new(0, "p0".to_string());
        player.add_card(Character::Duke);
        player.add_card(Character::Duke);
        player.lose_card(0);

        assert_eq!(player.take_card(Character::Duke), Some(Character::Duke));
        assert_eq!(player.take_card(Character::Duke), None);
        assert_eq!(player.revealed(), &[Character::Duke]);
    }
}
