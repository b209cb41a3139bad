// Statistics: per-player, per-team, and whole-game aggregation plus the
// report payloads built from them.

pub mod aggregate;
pub mod report;

pub use aggregate::{
    compute_stats, percentage, player_stats_for_team, shots_matching, ShootingSplit, StatFilter,
    StatisticsSnapshot, ZoneSplit, ZoneTable,
};
