// Game state: players, recorded events, and the event store.

pub mod event;
pub mod roster;
pub mod store;

use thiserror::Error;

pub use event::{
    ActionEvent, ActionKind, EventId, EventKind, PlayByPlayEntry, Player, PlayerId, ShotEvent,
    SimpleAction, Team,
};
pub use roster::{Roster, TeamNames};
pub use store::{Clock, EventStore, SystemClock, UndoneEvent};

/// Failures surfaced to the UI layer when an action cannot be recorded.
///
/// None of these are fatal: state is left untouched and the caller can
/// re-prompt the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error("no player selected; select a player before recording an action")]
    NoPlayerSelected,

    #[error("invalid court coordinate ({x}, {y})")]
    InvalidCoordinate { x: f64, y: f64 },

    #[error("name must not be blank")]
    InvalidName,

    #[error("unknown player id {0}")]
    UnknownPlayer(PlayerId),
}
