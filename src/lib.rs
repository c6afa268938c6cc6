//! Authoritative rules engine for the card game Coup: turns, bluffs,
//! challenges, blocks, and the response window they play out in. Presentation
//! and network layers drive a [`Coup`] instance through its inbound calls and
//! render whatever [`GameEvent`]s it queues up; the engine never calls out.

pub mod action;
pub mod card;
pub mod deck;
pub mod engine;
pub mod error;
pub mod events;
pub mod player;
pub mod rules;

pub use action::{ActionKind, GameAction, Response};
pub use card::Character;
pub use deck::Deck;
pub use engine::{Coup, GameConfig, GameState};
pub use error::CoupError;
pub use events::GameEvent;
pub use player::Player;
