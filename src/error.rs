use thiserror::Error;

/// Rejections reported to callers. None of these mutate state; internal
/// invariant breaches panic instead of appearing here.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum CoupError {
    #[error("players can only join while waiting for players")]
    LobbyClosed,

    #[error("the table is full")]
    LobbyFull,

    #[error("a game needs between 2 and 6 players")]
    InvalidPlayerCount,

    #[error("no such player")]
    UnknownPlayer,

    #[error("the engine is not in a state that accepts this call")]
    OutOfState,

    #[error("it is not this player's turn")]
    OutOfTurn,

    #[error("a player with 10 or more coins must coup")]
    ForcedCoup,

    #[error("the action is not legal for this player")]
    IllegalAction,

    #[error("the action's target is missing, dead, or out of range")]
    InvalidTarget,
}
