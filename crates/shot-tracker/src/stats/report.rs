// Report payloads handed to the document generator: a single-player report
// and a two-team box score.
//
// Everything here is captured by value when the report is built, so later
// store mutations (e.g. a shot added while a court image is being captured)
// cannot leak into a report that is already in flight.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io;

use super::aggregate::{compute_stats, player_stats_for_team, StatFilter, StatisticsSnapshot};
use crate::court::Zone;
use crate::game::{EventStore, PlayerId, Team, TrackerError};

/// Column headers for a per-player box score line.
pub const PLAYER_LINE_HEADERS: [&str; 9] = [
    "Player", "Total", "FG M/A", "FG%", "FT M/A", "FT%", "Paint", "Mid", "3PT",
];

/// A pre-rendered court image captured by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtImage {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl CourtImage {
    pub fn png(data: Vec<u8>) -> Self {
        CourtImage {
            mime_type: "image/png".to_string(),
            data,
        }
    }
}

fn made_of(makes: u32, attempts: u32) -> String {
    format!("{makes}/{attempts}")
}

fn pct(value: u32) -> String {
    format!("{value}%")
}

/// Collapse whitespace runs into underscores for file names.
fn file_slug(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Date as it appears in report file names, e.g. `3-7-2026`.
fn file_date(date: NaiveDate) -> String {
    date.format("%-m-%-d-%Y").to_string()
}

// ---------------------------------------------------------------------------
// Player report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub player_id: PlayerId,
    pub player_name: String,
    pub team_name: String,
    pub generated_on: NaiveDate,
    pub stats: StatisticsSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court_image: Option<CourtImage>,
}

impl PlayerReport {
    /// Snapshot one rostered player's statistics.
    pub fn build(
        store: &EventStore,
        player_id: PlayerId,
        generated_on: NaiveDate,
        court_image: Option<CourtImage>,
    ) -> Result<Self, TrackerError> {
        let player = store
            .roster()
            .player(player_id)
            .ok_or(TrackerError::UnknownPlayer(player_id))?;
        Ok(PlayerReport {
            player_id,
            player_name: player.name.clone(),
            team_name: store.roster().team_name(player.team).to_string(),
            generated_on,
            stats: compute_stats(store, StatFilter::Player(player_id)),
            court_image,
        })
    }

    pub fn title(&self) -> String {
        format!("Player Stats Report: {}", self.player_name)
    }

    /// Overall statistics table rows.
    pub fn summary_rows(&self) -> Vec<(&'static str, String)> {
        let s = &self.stats;
        vec![
            ("Total Shots", s.total.to_string()),
            ("Makes", s.makes.to_string()),
            ("Misses", s.misses.to_string()),
            ("Overall %", pct(s.percentage)),
            ("Points", s.points.to_string()),
            ("Field Goals M/A", made_of(s.field_goals.makes, s.field_goals.total)),
            ("Field Goal %", pct(s.field_goals.percentage)),
            ("Free Throws M/A", made_of(s.free_throws.makes, s.free_throws.total)),
            ("Free Throw %", pct(s.free_throws.percentage)),
            ("Assists", s.assists.to_string()),
            ("Rebounds", s.rebounds.to_string()),
            ("Steals", s.steals.to_string()),
            ("Blocks", s.blocks.to_string()),
            ("Turnovers", s.turnovers.to_string()),
        ]
    }

    /// One small table per court zone: `(zone, rows)`.
    pub fn zone_rows(&self) -> Vec<(Zone, Vec<(&'static str, String)>)> {
        Zone::ALL
            .iter()
            .map(|&zone| {
                let split = self.stats.zones.get(zone);
                (
                    zone,
                    vec![
                        ("Makes", split.makes.to_string()),
                        ("Attempts", split.attempts.to_string()),
                        ("Percentage", pct(split.percentage)),
                    ],
                )
            })
            .collect()
    }

    /// Suggested file name, e.g. `Player_1_stats_3-7-2026.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_stats_{}.pdf",
            file_slug(&self.player_name),
            file_date(self.generated_on)
        )
    }
}

// ---------------------------------------------------------------------------
// Box score
// ---------------------------------------------------------------------------

/// One player's row in the box score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerLine {
    pub player_id: PlayerId,
    pub name: String,
    pub stats: StatisticsSnapshot,
}

impl PlayerLine {
    /// Cells in `PLAYER_LINE_HEADERS` order.
    pub fn row(&self) -> [String; 9] {
        let s = &self.stats;
        [
            self.name.clone(),
            s.total.to_string(),
            made_of(s.field_goals.makes, s.field_goals.total),
            pct(s.field_goals.percentage),
            made_of(s.free_throws.makes, s.free_throws.total),
            pct(s.free_throws.percentage),
            made_of(s.zones.paint.makes, s.zones.paint.attempts),
            made_of(s.zones.mid_range.makes, s.zones.mid_range.attempts),
            made_of(s.zones.three_point.makes, s.zones.three_point.attempts),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSection {
    pub team: Team,
    pub name: String,
    pub stats: StatisticsSnapshot,
    pub players: Vec<PlayerLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shot_chart: Option<CourtImage>,
}

impl TeamSection {
    fn build(store: &EventStore, team: Team, shot_chart: Option<CourtImage>) -> Self {
        TeamSection {
            team,
            name: store.roster().team_name(team).to_string(),
            stats: compute_stats(store, StatFilter::Team(team)),
            players: player_stats_for_team(store, team)
                .into_iter()
                .map(|(player, stats)| PlayerLine {
                    player_id: player.id,
                    name: player.name,
                    stats,
                })
                .collect(),
            shot_chart,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScore {
    pub generated_on: NaiveDate,
    pub home: TeamSection,
    pub away: TeamSection,
}

impl BoxScore {
    /// Snapshot both teams. Shot charts are optional pre-captured images.
    pub fn build(
        store: &EventStore,
        generated_on: NaiveDate,
        home_chart: Option<CourtImage>,
        away_chart: Option<CourtImage>,
    ) -> Self {
        BoxScore {
            generated_on,
            home: TeamSection::build(store, Team::Home, home_chart),
            away: TeamSection::build(store, Team::Away, away_chart),
        }
    }

    pub fn section(&self, team: Team) -> &TeamSection {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    /// Head-to-head team comparison rows: `[label, home, away]`.
    pub fn team_rows(&self) -> Vec<[String; 3]> {
        type Cell = fn(&StatisticsSnapshot) -> String;
        let rows: [(&str, Cell); 15] = [
            ("Points", |s| s.points.to_string()),
            ("Total Shots", |s| s.total.to_string()),
            ("Makes", |s| s.makes.to_string()),
            ("Misses", |s| s.misses.to_string()),
            ("Overall %", |s| pct(s.percentage)),
            ("Field Goals M/A", |s| made_of(s.field_goals.makes, s.field_goals.total)),
            ("Field Goal %", |s| pct(s.field_goals.percentage)),
            ("Free Throws M/A", |s| made_of(s.free_throws.makes, s.free_throws.total)),
            ("Free Throw %", |s| pct(s.free_throws.percentage)),
            ("Paint M/A", |s| made_of(s.zones.paint.makes, s.zones.paint.attempts)),
            ("Paint %", |s| pct(s.zones.paint.percentage)),
            ("Mid-Range M/A", |s| made_of(s.zones.mid_range.makes, s.zones.mid_range.attempts)),
            ("Mid-Range %", |s| pct(s.zones.mid_range.percentage)),
            ("3PT M/A", |s| made_of(s.zones.three_point.makes, s.zones.three_point.attempts)),
            ("3PT %", |s| pct(s.zones.three_point.percentage)),
        ];
        rows.iter()
            .map(|(label, cell)| {
                [label.to_string(), cell(&self.home.stats), cell(&self.away.stats)]
            })
            .collect()
    }

    /// Suggested file name, e.g. `box_score_Home_Team_vs_Away_Team_3-7-2026.pdf`.
    pub fn file_name(&self) -> String {
        format!(
            "box_score_{}_vs_{}_{}.pdf",
            file_slug(&self.home.name),
            file_slug(&self.away.name),
            file_date(self.generated_on)
        )
    }

    /// Write every player line as CSV, prefixed with the team's display name.
    pub fn write_player_csv<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        let mut header = vec!["Team"];
        header.extend(PLAYER_LINE_HEADERS);
        wtr.write_record(&header)?;

        for section in [&self.home, &self.away] {
            for line in &section.players {
                let mut record = vec![section.name.clone()];
                record.extend(line.row());
                wtr.write_record(&record)?;
            }
        }
        wtr.flush()?;
        Ok(())
    }

    /// JSON payload for a report collaborator in another process.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
