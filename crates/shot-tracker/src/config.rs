// Session configuration: court rules, team names, and the starting roster,
// read from a `tracker.toml` file chosen by the embedding application.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::court::{CourtConfig, Orientation, Ruleset};
use crate::game::{EventStore, Roster, Team, TeamNames};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("cannot encode configuration: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("`{field}` {message}")]
    Invalid { field: String, message: String },
}

// ---------------------------------------------------------------------------
// tracker.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub court: CourtSection,
    #[serde(default)]
    pub teams: TeamsSection,
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourtSection {
    #[serde(default)]
    pub ruleset: Ruleset,
    #[serde(default)]
    pub orientation: Orientation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamsSection {
    pub home: String,
    pub away: String,
}

impl Default for TeamsSection {
    fn default() -> Self {
        let TeamNames { home, away } = TeamNames::default();
        TeamsSection { home, away }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub team: Team,
}

impl Config {
    pub fn court_config(&self) -> CourtConfig {
        CourtConfig::new(self.court.ruleset, self.court.orientation)
    }

    /// Reject blank team or player names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let teams = [("teams.home", &self.teams.home), ("teams.away", &self.teams.away)];
        for (field, name) in teams {
            if name.trim().is_empty() {
                return Err(blank(field.to_string()));
            }
        }
        for (i, entry) in self.roster.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(blank(format!("roster[{i}].name")));
            }
        }
        Ok(())
    }

    /// Build an empty game session seeded with this court, team names, and
    /// roster. Nobody is selected.
    pub fn into_store(self) -> Result<EventStore, ConfigError> {
        self.validate()?;
        let court = self.court_config();
        let mut roster = Roster::new(TeamNames {
            home: self.teams.home.trim().to_string(),
            away: self.teams.away.trim().to_string(),
        });
        for (i, entry) in self.roster.iter().enumerate() {
            roster
                .add_player(&entry.name, entry.team)
                .map_err(|e| ConfigError::Invalid {
                    field: format!("roster[{i}].name"),
                    message: e.to_string(),
                })?;
        }
        roster.clear_selection();
        Ok(EventStore::new(court, roster))
    }

    /// Render as `tracker.toml` text.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            court: CourtSection::default(),
            teams: TeamsSection::default(),
            roster: Roster::with_default_players()
                .players()
                .iter()
                .map(|p| RosterEntry {
                    name: p.name.clone(),
                    team: p.team,
                })
                .collect(),
        }
    }
}

fn blank(field: String) -> ConfigError {
    ConfigError::Invalid {
        field,
        message: "must not be blank".into(),
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Read and validate a `tracker.toml`. Missing sections take their defaults.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;

    info!(
        "Loaded {}: {} court, {} players",
        path.display(),
        config.court.ruleset,
        config.roster.len()
    );
    Ok(config)
}

/// Write the built-in defaults to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn write_default_config(path: &Path) -> Result<bool, ConfigError> {
    let text = Config::default().to_toml()?;
    let write_err = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(write_err(e)),
    };
    file.write_all(text.as_bytes()).map_err(write_err)?;
    info!("Wrote default configuration to {}", path.display());
    Ok(true)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
