//! Outbound notifications. The engine mutates state first, then pushes the
//! matching event, so a host draining the queue always observes effects in
//! emission order. Presentation and network layers consume these; the engine
//! never calls out.

use serde::{Deserialize, Serialize};

use crate::action::GameAction;
use crate::engine::GameState;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    StateChanged(GameState),
    PlayerJoined { player: usize, name: String },
    PlayerLeft { player: usize },
    ActionPerformed(GameAction),
    GameEnded { winner: usize },
}
