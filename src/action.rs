use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};

use crate::card::Character;
use crate::rules;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Income,
    ForeignAid,
    Coup,
    Tax,
    Assassinate,
    Steal,
    Exchange,
}

/// One attempted action, immutable once built. The claimed character is
/// derived from the kind; callers never pick it.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAction {
    pub player: usize,
    pub kind: ActionKind,
    pub target: Option<usize>,
    pub claim: Option<Character>,
}

impl GameAction {
    pub fn new(player: usize, kind: ActionKind, target: Option<usize>) -> Self {
        // target is only meaningful for targeted kinds
        let target = if rules::requires_target(kind) {
            target
        } else {
            None
        };

        Self {
            player,
            kind,
            target,
            claim: rules::required_card(kind),
        }
    }
}

impl Debug for GameAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ActionKind::Income => {
                f.write_fmt(format_args!("Player {} takes Income", self.player))
            }
            ActionKind::ForeignAid => {
                f.write_fmt(format_args!("Player {} takes Foreign Aid", self.player))
            }
            ActionKind::Tax => {
                f.write_fmt(format_args!("Player {} taxes as the Duke", self.player))
            }
            ActionKind::Coup => f.write_fmt(format_args!(
                "Player {} coups player {}",
                self.player,
                self.target.unwrap_or(usize::MAX)
            )),
            ActionKind::Assassinate => f.write_fmt(format_args!(
                "Player {} assassinates player {}",
                self.player,
                self.target.unwrap_or(usize::MAX)
            )),
            ActionKind::Steal => f.write_fmt(format_args!(
                "Player {} steals from player {}",
                self.player,
                self.target.unwrap_or(usize::MAX)
            )),
            ActionKind::Exchange => f.write_fmt(format_args!(
                "Player {} exchanges with the court deck",
                self.player
            )),
        }
    }
}

/// A reply from a player inside the response window.
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Allow,
    Challenge,
    Block { claim: Character },
}

impl Debug for Response {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Response::Allow => f.write_str("allows"),
            Response::Challenge => f.write_str("challenges"),
            Response::Block { claim } => {
                f.write_fmt(format_args!("blocks with {:?}", claim))
            }
        }
    }
}
