// Event store: the seven event collections, play-by-play, and roster.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::event::{
    ActionEvent, ActionKind, EventId, EventKind, PlayByPlayEntry, Player, PlayerId, ShotEvent,
    SimpleAction, Team,
};
use super::roster::Roster;
use super::TrackerError;
use crate::court::{CourtConfig, ShotPlacement};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of event timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ---------------------------------------------------------------------------
// Undo result
// ---------------------------------------------------------------------------

/// The event removed by [`EventStore::undo_most_recent`].
#[derive(Debug, Clone, PartialEq)]
pub enum UndoneEvent {
    Shot(ShotEvent),
    Action(ActionEvent),
}

impl UndoneEvent {
    pub fn id(&self) -> EventId {
        match self {
            UndoneEvent::Shot(s) => s.id,
            UndoneEvent::Action(a) => a.id,
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            UndoneEvent::Shot(_) => EventKind::Shot,
            UndoneEvent::Action(a) => a.kind.into(),
        }
    }
}

/// Location of an event inside the store.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Shot(usize),
    Action(ActionKind, usize),
}

// ---------------------------------------------------------------------------
// EventStore
// ---------------------------------------------------------------------------

/// Owns every recorded event for one game session.
///
/// Invariant: `play_by_play.len()` equals the total length of the seven
/// event collections, and each entry mirrors exactly one stored event.
pub struct EventStore {
    court: CourtConfig,
    roster: Roster,
    shots: Vec<ShotEvent>,
    /// Simple-action collections, indexed by `ActionKind::index()`.
    actions: [Vec<ActionEvent>; 6],
    play_by_play: Vec<PlayByPlayEntry>,
    next_event_id: u64,
    clock: Box<dyn Clock>,
}

impl EventStore {
    pub fn new(court: CourtConfig, roster: Roster) -> Self {
        EventStore {
            court,
            roster,
            shots: Vec::new(),
            actions: Default::default(),
            play_by_play: Vec::new(),
            next_event_id: 1,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // --- Configuration and roster access ---

    pub fn court(&self) -> &CourtConfig {
        &self.court
    }

    /// Swap the court configuration. Already-recorded shots keep their zones.
    pub fn set_court_config(&mut self, court: CourtConfig) {
        info!(
            "Court configuration changed to {} / {:?}",
            court.ruleset, court.orientation
        );
        self.court = court;
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn add_player(&mut self, name: &str, team: Team) -> Result<PlayerId, TrackerError> {
        self.roster.add_player(name, team)
    }

    pub fn select_player(&mut self, id: PlayerId) -> bool {
        self.roster.select_player(id)
    }

    pub fn select_team(&mut self, team: Team) {
        self.roster.select_team(team)
    }

    pub fn rename_team(&mut self, team: Team, new_name: &str) -> bool {
        self.roster.rename_team(team, new_name)
    }

    // --- Event collections ---

    pub fn shots(&self) -> &[ShotEvent] {
        &self.shots
    }

    pub fn actions(&self, kind: ActionKind) -> &[ActionEvent] {
        &self.actions[kind.index()]
    }

    pub fn play_by_play(&self) -> &[PlayByPlayEntry] {
        &self.play_by_play
    }

    /// Total number of events across all seven collections.
    pub fn event_count(&self) -> usize {
        self.shots.len() + self.actions.iter().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.event_count() == 0
    }

    // --- Recording ---

    fn next_stamp(&mut self) -> (EventId, DateTime<Utc>) {
        let id = EventId(self.next_event_id);
        self.next_event_id += 1;
        (id, self.clock.now())
    }

    fn selected(&self) -> Result<Player, TrackerError> {
        match self.roster.selected_player() {
            Some(player) => Ok(player.clone()),
            None => {
                warn!("Rejected event: no player selected");
                Err(TrackerError::NoPlayerSelected)
            }
        }
    }

    /// Record a classified shot for the selected player.
    pub fn add_shot(
        &mut self,
        placement: ShotPlacement,
        is_make: bool,
    ) -> Result<EventId, TrackerError> {
        let player = self.selected()?;
        if !placement.is_finite() {
            warn!("Rejected shot at non-finite placement {:?}", placement);
            return Err(TrackerError::InvalidCoordinate {
                x: placement.fraction_x(),
                y: placement.fraction_y(),
            });
        }
        let (id, timestamp) = self.next_stamp();
        let shot = ShotEvent {
            id,
            court_fraction_x: placement.fraction_x(),
            court_fraction_y: placement.fraction_y(),
            court_feet: placement.feet(),
            is_make,
            timestamp,
            player_id: player.id,
            player_name: player.name,
            team: player.team,
            zone: placement.zone(),
        };
        debug!("Recorded shot {}: {} by {}", id, shot.label(), shot.player_name);
        self.play_by_play.push(PlayByPlayEntry::from(&shot));
        self.shots.push(shot);
        Ok(id)
    }

    /// Convert, classify under the current court configuration, and record.
    pub fn record_shot(
        &mut self,
        fraction_x: f64,
        fraction_y: f64,
        is_make: bool,
    ) -> Result<EventId, TrackerError> {
        // Check the player first so a bad click without a selection reports
        // the missing player.
        self.selected()?;
        let placement = ShotPlacement::locate(fraction_x, fraction_y, &self.court)
            .inspect_err(|e| warn!("Rejected shot: {}", e))?;
        self.add_shot(placement, is_make)
    }

    /// Record a free throw, assist, rebound, steal, block, or turnover for the
    /// selected player.
    pub fn add_simple_action(&mut self, action: SimpleAction) -> Result<EventId, TrackerError> {
        let player = self.selected()?;
        let (id, timestamp) = self.next_stamp();
        let event = ActionEvent {
            id,
            kind: action.kind(),
            player_id: player.id,
            player_name: player.name,
            team: player.team,
            timestamp,
            is_make: action.is_make(),
        };
        debug!("Recorded {} {} by {}", event.label(), id, event.player_name);
        self.play_by_play.push(PlayByPlayEntry::from(&event));
        self.actions[event.kind.index()].push(event);
        Ok(id)
    }

    // --- Removal ---

    fn remove_play_by_play(&mut self, id: EventId) {
        if let Some(pos) = self.play_by_play.iter().rposition(|e| e.event_id == id) {
            self.play_by_play.remove(pos);
        }
    }

    /// Remove one shot. Missing ids are treated as already removed.
    pub fn remove_shot(&mut self, id: EventId) -> Option<ShotEvent> {
        let pos = self.shots.iter().position(|s| s.id == id)?;
        let shot = self.shots.remove(pos);
        self.remove_play_by_play(id);
        debug!("Removed shot {}", id);
        Some(shot)
    }

    /// Locate the most recent event across all seven collections.
    ///
    /// Ordered by timestamp, then by event id, so equal timestamps resolve to
    /// the event created last.
    fn most_recent_slot(&self) -> Option<Slot> {
        let shots = self
            .shots
            .iter()
            .enumerate()
            .map(|(i, s)| ((s.timestamp, s.id), Slot::Shot(i)));
        let actions = self.actions.iter().flat_map(|events| {
            events
                .iter()
                .enumerate()
                .map(|(i, a)| ((a.timestamp, a.id), Slot::Action(a.kind, i)))
        });
        shots
            .chain(actions)
            .max_by_key(|(key, _)| *key)
            .map(|(_, slot)| slot)
    }

    /// Remove the most recently recorded event, whichever collection it is in.
    /// Returns `None` when there is nothing to undo.
    pub fn undo_most_recent(&mut self) -> Option<UndoneEvent> {
        let undone = match self.most_recent_slot()? {
            Slot::Shot(i) => UndoneEvent::Shot(self.shots.remove(i)),
            Slot::Action(kind, i) => UndoneEvent::Action(self.actions[kind.index()].remove(i)),
        };
        self.remove_play_by_play(undone.id());
        info!("Undid {:?} event {}", undone.kind(), undone.id());
        Some(undone)
    }

    /// Drop every event and the play-by-play. The roster is kept.
    pub fn clear_all(&mut self) {
        self.shots.clear();
        for events in &mut self.actions {
            events.clear();
        }
        self.play_by_play.clear();
        info!("Cleared all recorded events");
    }

    // --- Roster edits with cascades ---

    /// Rename a player and rewrite the name on every event they own.
    /// Blank names and unknown ids are ignored; returns `true` on change.
    pub fn rename_player(&mut self, id: PlayerId, new_name: &str) -> bool {
        if !self.roster.rename(id, new_name) {
            warn!("Ignored rename of player {} to '{}'", id, new_name);
            return false;
        }
        let name = new_name.trim();

        for shot in self.shots.iter_mut().filter(|s| s.player_id == id) {
            shot.player_name = name.to_string();
        }
        for event in self.actions.iter_mut().flatten().filter(|a| a.player_id == id) {
            event.player_name = name.to_string();
        }
        for entry in self.play_by_play.iter_mut().filter(|e| e.player_id == id) {
            entry.player_name = name.to_string();
        }
        info!("Renamed player {} to '{}'", id, name);
        true
    }

    /// Remove a player and their shots.
    ///
    /// The player's simple actions are kept and still count toward team and
    /// game totals.
    pub fn delete_player(&mut self, id: PlayerId) -> Option<Player> {
        let player = self.roster.remove(id)?;
        let before = self.shots.len();
        self.shots.retain(|s| s.player_id != id);
        self.play_by_play
            .retain(|e| e.player_id != id || e.kind != EventKind::Shot);
        info!(
            "Deleted player '{}' ({}) and {} shots",
            player.name,
            id,
            before - self.shots.len()
        );
        Some(player)
    }
}

impl Default for EventStore {
    fn default() -> Self {
        EventStore::new(CourtConfig::default(), Roster::default())
    }
}
