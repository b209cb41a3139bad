// Recorded game events and the players they are attributed to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::court::{CourtPoint, Zone};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// Roster identifier for a player. Never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event identifier, drawn from one strictly increasing sequence shared by
/// every event collection. Higher ids were created later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Teams and players
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Home => write!(f, "home"),
            Team::Away => write!(f, "away"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Team,
}

// ---------------------------------------------------------------------------
// Shots
// ---------------------------------------------------------------------------

/// A field goal attempt, classified into a zone when it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShotEvent {
    pub id: EventId,
    /// Click position as a fraction of the rendered surface.
    pub court_fraction_x: f64,
    pub court_fraction_y: f64,
    /// Click position in court feet, in the orientation it was drawn.
    pub court_feet: CourtPoint,
    pub is_make: bool,
    pub timestamp: DateTime<Utc>,
    pub player_id: PlayerId,
    /// Snapshot of the player's name, kept in sync on rename.
    pub player_name: String,
    pub team: Team,
    /// Zone assigned under the court configuration active at record time.
    pub zone: Zone,
}

impl ShotEvent {
    /// Play-by-play label, e.g. "3PT Make" or "Paint Miss".
    pub fn label(&self) -> String {
        let kind = match self.zone {
            Zone::ThreePoint => "3PT",
            Zone::MidRange => "2PT",
            Zone::Paint => "Paint",
        };
        format!("{} {}", kind, if self.is_make { "Make" } else { "Miss" })
    }

    pub fn points(&self) -> u32 {
        if self.is_make {
            self.zone.point_value()
        } else {
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Simple actions
// ---------------------------------------------------------------------------

/// The six non-shot event collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    FreeThrow,
    Assist,
    Rebound,
    Steal,
    Block,
    Turnover,
}

impl ActionKind {
    pub const ALL: [ActionKind; 6] = [
        ActionKind::FreeThrow,
        ActionKind::Assist,
        ActionKind::Rebound,
        ActionKind::Steal,
        ActionKind::Block,
        ActionKind::Turnover,
    ];

    /// Stable slot of this kind's collection inside the store.
    pub(crate) fn index(&self) -> usize {
        match self {
            ActionKind::FreeThrow => 0,
            ActionKind::Assist => 1,
            ActionKind::Rebound => 2,
            ActionKind::Steal => 3,
            ActionKind::Block => 4,
            ActionKind::Turnover => 5,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            ActionKind::FreeThrow => "Free Throw",
            ActionKind::Assist => "Assist",
            ActionKind::Rebound => "Rebound",
            ActionKind::Steal => "Steal",
            ActionKind::Block => "Block",
            ActionKind::Turnover => "Turnover",
        }
    }
}

/// A simple action as requested by the UI. Free throws carry their outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleAction {
    FreeThrow { made: bool },
    Assist,
    Rebound,
    Steal,
    Block,
    Turnover,
}

impl SimpleAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            SimpleAction::FreeThrow { .. } => ActionKind::FreeThrow,
            SimpleAction::Assist => ActionKind::Assist,
            SimpleAction::Rebound => ActionKind::Rebound,
            SimpleAction::Steal => ActionKind::Steal,
            SimpleAction::Block => ActionKind::Block,
            SimpleAction::Turnover => ActionKind::Turnover,
        }
    }

    pub fn is_make(&self) -> Option<bool> {
        match self {
            SimpleAction::FreeThrow { made } => Some(*made),
            _ => None,
        }
    }
}

/// A recorded non-shot event. `is_make` is only set for free throws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    pub id: EventId,
    pub kind: ActionKind,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: Team,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_make: Option<bool>,
}

impl ActionEvent {
    pub fn label(&self) -> String {
        match (self.kind, self.is_make) {
            (ActionKind::FreeThrow, Some(true)) => "Free Throw Make".to_string(),
            (ActionKind::FreeThrow, _) => "Free Throw Miss".to_string(),
            (kind, _) => kind.display_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Play-by-play
// ---------------------------------------------------------------------------

/// Which of the seven collections an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    Shot,
    FreeThrow,
    Assist,
    Rebound,
    Steal,
    Block,
    Turnover,
}

impl From<ActionKind> for EventKind {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::FreeThrow => EventKind::FreeThrow,
            ActionKind::Assist => EventKind::Assist,
            ActionKind::Rebound => EventKind::Rebound,
            ActionKind::Steal => EventKind::Steal,
            ActionKind::Block => EventKind::Block,
            ActionKind::Turnover => EventKind::Turnover,
        }
    }
}

/// Display-only log line mirroring one recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlayEntry {
    pub event_id: EventId,
    pub kind: EventKind,
    pub player_id: PlayerId,
    pub player_name: String,
    pub team: Team,
    pub action: String,
    /// Zone of the shot, if this entry mirrors a shot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    pub timestamp: DateTime<Utc>,
}

impl From<&ShotEvent> for PlayByPlayEntry {
    fn from(shot: &ShotEvent) -> Self {
        PlayByPlayEntry {
            event_id: shot.id,
            kind: EventKind::Shot,
            player_id: shot.player_id,
            player_name: shot.player_name.clone(),
            team: shot.team,
            action: shot.label(),
            zone: Some(shot.zone),
            timestamp: shot.timestamp,
        }
    }
}

impl From<&ActionEvent> for PlayByPlayEntry {
    fn from(action: &ActionEvent) -> Self {
        PlayByPlayEntry {
            event_id: action.id,
            kind: action.kind.into(),
            player_id: action.player_id,
            player_name: action.player_name.clone(),
            team: action.team,
            action: action.label(),
            zone: None,
            timestamp: action.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot(zone: Zone, is_make: bool) -> ShotEvent {
        ShotEvent {
            id: EventId(7),
            court_fraction_x: 0.1,
            court_fraction_y: 0.5,
            court_feet: CourtPoint { x: 9.4, y: 25.0 },
            is_make,
            timestamp: DateTime::<Utc>::default(),
            player_id: PlayerId(1),
            player_name: "Player 1".into(),
            team: Team::Home,
            zone,
        }
    }

    #[test]
    fn shot_labels() {
        assert_eq!(shot(Zone::ThreePoint, true).label(), "3PT Make");
        assert_eq!(shot(Zone::MidRange, false).label(), "2PT Miss");
        assert_eq!(shot(Zone::Paint, true).label(), "Paint Make");
    }

    #[test]
    fn shot_points() {
        assert_eq!(shot(Zone::ThreePoint, true).points(), 3);
        assert_eq!(shot(Zone::Paint, true).points(), 2);
        assert_eq!(shot(Zone::ThreePoint, false).points(), 0);
    }

    #[test]
    fn action_labels() {
        let mut action = ActionEvent {
            id: EventId(1),
            kind: ActionKind::FreeThrow,
            player_id: PlayerId(3),
            player_name: "Player 3".into(),
            team: Team::Away,
            timestamp: DateTime::<Utc>::default(),
            is_make: Some(true),
        };
        assert_eq!(action.label(), "Free Throw Make");
        action.is_make = Some(false);
        assert_eq!(action.label(), "Free Throw Miss");
        action.kind = ActionKind::Steal;
        action.is_make = None;
        assert_eq!(action.label(), "Steal");
    }

    #[test]
    fn simple_action_kinds() {
        assert_eq!(SimpleAction::FreeThrow { made: true }.kind(), ActionKind::FreeThrow);
        assert_eq!(SimpleAction::FreeThrow { made: false }.is_make(), Some(false));
        assert_eq!(SimpleAction::Block.is_make(), None);
        for (i, kind) in ActionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn play_by_play_from_shot() {
        let entry = PlayByPlayEntry::from(&shot(Zone::MidRange, true));
        assert_eq!(entry.event_id, EventId(7));
        assert_eq!(entry.kind, EventKind::Shot);
        assert_eq!(entry.action, "2PT Make");
        assert_eq!(entry.zone, Some(Zone::MidRange));
    }

    #[test]
    fn shot_serializes_camel_case() {
        let json = serde_json::to_value(shot(Zone::ThreePoint, true)).unwrap();
        assert_eq!(json["zone"], "threePoint");
        assert_eq!(json["team"], "home");
        assert_eq!(json["playerId"], 1);
        assert_eq!(json["isMake"], true);
    }
}
