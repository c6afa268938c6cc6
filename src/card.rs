use serde::{Deserialize, Serialize};

use crate::action::ActionKind;

/// A role card. The deck holds three copies of each kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
}

pub static CHARACTER_VARIANTS: [Character; 5] = [
    Character::Duke,
    Character::Assassin,
    Character::Captain,
    Character::Ambassador,
    Character::Contessa,
];

impl Character {
    /// The action this card lets its holder claim, if any. Contessa only blocks.
    pub fn primary_action(self) -> Option<ActionKind> {
        match self {
            Character::Duke => Some(ActionKind::Tax),
            Character::Assassin => Some(ActionKind::Assassinate),
            Character::Captain => Some(ActionKind::Steal),
            Character::Ambassador => Some(ActionKind::Exchange),
            Character::Contessa => None,
        }
    }

    /// Whether a holder of this card may claim to block the given action.
    pub fn blocks(self, kind: ActionKind) -> bool {
        match self {
            Character::Duke => kind == ActionKind::ForeignAid,
            Character::Captain | Character::Ambassador => kind == ActionKind::Steal,
            Character::Contessa => kind == ActionKind::Assassinate,
            Character::Assassin => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_actions_match_required_cards() {
        for character in CHARACTER_VARIANTS {
            if let Some(kind) = character.primary_action() {
                assert_eq!(crate::rules::required_card(kind), Some(character));
            }
        }
    }

    #[test]
    fn block_table() {
        assert!(Character::Duke.blocks(ActionKind::ForeignAid));
        assert!(Character::Captain.blocks(ActionKind::Steal));
        assert!(Character::Ambassador.blocks(ActionKind::Steal));
        assert!(Character::Contessa.blocks(ActionKind::Assassinate));

        assert!(!Character::Assassin.blocks(ActionKind::Assassinate));
        assert!(!Character::Duke.blocks(ActionKind::Steal));
        assert!(!Character::Contessa.blocks(ActionKind::Coup));
    }
}
