// Player roster, team display names, and the current selection.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::event::{Player, PlayerId, Team};
use super::TrackerError;

pub const DEFAULT_HOME_NAME: &str = "Home Team";
pub const DEFAULT_AWAY_NAME: &str = "Away Team";

/// Display names shown in reports. Events keep the `Team` enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamNames {
    pub home: String,
    pub away: String,
}

impl TeamNames {
    pub fn get(&self, team: Team) -> &str {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    fn get_mut(&mut self, team: Team) -> &mut String {
        match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        }
    }
}

impl Default for TeamNames {
    fn default() -> Self {
        TeamNames {
            home: DEFAULT_HOME_NAME.to_string(),
            away: DEFAULT_AWAY_NAME.to_string(),
        }
    }
}

/// All players in the game, in the order they were added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    team_names: TeamNames,
    /// Player that new events are attributed to.
    selected_player: Option<PlayerId>,
    /// Team that newly added players join.
    selected_team: Team,
    next_id: u64,
}

impl Roster {
    /// An empty roster with the given team names.
    pub fn new(team_names: TeamNames) -> Self {
        Roster {
            players: Vec::new(),
            team_names,
            selected_player: None,
            selected_team: Team::Home,
            next_id: 1,
        }
    }

    /// Two placeholder players per side, nobody selected.
    pub fn with_default_players() -> Self {
        let mut roster = Roster::new(TeamNames::default());
        for (name, team) in [
            ("Player 1", Team::Home),
            ("Player 2", Team::Home),
            ("Player 3", Team::Away),
            ("Player 4", Team::Away),
        ] {
            roster.push(name.to_string(), team);
        }
        roster
    }

    fn push(&mut self, name: String, team: Team) -> PlayerId {
        let id = PlayerId(self.next_id);
        self.next_id += 1;
        self.players.push(Player { id, name, team });
        id
    }

    /// Add a player and make them the current selection.
    ///
    /// The name is trimmed; blank names are rejected.
    pub fn add_player(&mut self, name: &str, team: Team) -> Result<PlayerId, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("Rejected player with blank name");
            return Err(TrackerError::InvalidName);
        }
        let id = self.push(name.to_string(), team);
        self.selected_player = Some(id);
        self.selected_team = team;
        info!("Added player '{}' ({}) to {} team", name, id, team);
        Ok(id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Players on one side, in roster order.
    pub fn players_on(&self, team: Team) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(move |p| p.team == team)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.player(id).is_some()
    }

    /// Select a player; the selected team follows the player's team.
    /// Returns `false` if the id is not on the roster.
    pub fn select_player(&mut self, id: PlayerId) -> bool {
        let Some(team) = self.player(id).map(|p| p.team) else {
            return false;
        };
        self.selected_player = Some(id);
        self.selected_team = team;
        true
    }

    /// Switch the selected team. Clears the player selection.
    pub fn select_team(&mut self, team: Team) {
        self.selected_team = team;
        self.selected_player = None;
    }

    pub fn clear_selection(&mut self) {
        self.selected_player = None;
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.selected_player.and_then(|id| self.player(id))
    }

    pub fn selected_team(&self) -> Team {
        self.selected_team
    }

    /// Rename a player. The trimmed name must not be blank.
    /// Returns `true` if the roster changed.
    pub(crate) fn rename(&mut self, id: PlayerId, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return false;
        }
        match self.players.iter_mut().find(|p| p.id == id) {
            Some(player) => {
                player.name = new_name.to_string();
                true
            }
            None => false,
        }
    }

    /// Remove a player, clearing the selection if it pointed at them.
    pub(crate) fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        if self.selected_player == Some(id) {
            self.selected_player = None;
        }
        Some(self.players.remove(idx))
    }

    pub fn team_names(&self) -> &TeamNames {
        &self.team_names
    }

    pub fn team_name(&self, team: Team) -> &str {
        self.team_names.get(team)
    }

    /// Rename a team for display. Blank names are ignored.
    /// Returns `true` if the name changed.
    pub fn rename_team(&mut self, team: Team, new_name: &str) -> bool {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            warn!("Ignored blank name for {} team", team);
            return false;
        }
        *self.team_names.get_mut(team) = new_name.to_string();
        info!("Renamed {} team to '{}'", team, new_name);
        true
    }
}

impl Default for Roster {
    fn default() -> Self {
        Roster::with_default_players()
    }
}
