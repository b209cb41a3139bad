// Shooting splits, zone splits, counting stats, and points.

use serde::{Deserialize, Serialize};

use crate::court::Zone;
use crate::game::{ActionEvent, ActionKind, EventStore, Player, PlayerId, ShotEvent, Team};

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Which events a snapshot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatFilter {
    /// Whole-game totals.
    #[default]
    All,
    Player(PlayerId),
    Team(Team),
}

impl StatFilter {
    pub fn matches(&self, player_id: PlayerId, team: Team) -> bool {
        match self {
            StatFilter::All => true,
            StatFilter::Player(id) => *id == player_id,
            StatFilter::Team(t) => *t == team,
        }
    }
}

/// Shots a court overlay should draw for the given filter.
pub fn shots_matching<'a>(
    store: &'a EventStore,
    filter: StatFilter,
) -> impl Iterator<Item = &'a ShotEvent> + 'a {
    store
        .shots()
        .iter()
        .filter(move |s| filter.matches(s.player_id, s.team))
}

fn actions_matching(
    store: &EventStore,
    kind: ActionKind,
    filter: StatFilter,
) -> impl Iterator<Item = &ActionEvent> {
    store
        .actions(kind)
        .iter()
        .filter(move |a| filter.matches(a.player_id, a.team))
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// Whole-number percentage of `makes / attempts`, rounded half up.
///
/// Integer arithmetic keeps the result exact: `50.5` always becomes `51`.
/// Returns 0 when there are no attempts.
pub fn percentage(makes: u32, attempts: u32) -> u32 {
    if attempts == 0 {
        return 0;
    }
    let makes = u64::from(makes);
    let attempts = u64::from(attempts);
    ((200 * makes + attempts) / (2 * attempts)) as u32
}

/// Makes, misses, and percentage for one kind of attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShootingSplit {
    pub total: u32,
    pub makes: u32,
    pub misses: u32,
    pub percentage: u32,
}

impl ShootingSplit {
    pub fn from_counts(makes: u32, total: u32) -> Self {
        ShootingSplit {
            total,
            makes,
            misses: total.saturating_sub(makes),
            percentage: percentage(makes, total),
        }
    }

    /// Fold two splits into one, recomputing the percentage from the counts.
    pub fn combine(&self, other: &ShootingSplit) -> Self {
        ShootingSplit::from_counts(self.makes + other.makes, self.total + other.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ZoneSplit {
    pub makes: u32,
    pub attempts: u32,
    pub percentage: u32,
}

impl ZoneSplit {
    pub fn from_counts(makes: u32, attempts: u32) -> Self {
        ZoneSplit {
            makes,
            attempts,
            percentage: percentage(makes, attempts),
        }
    }
}

/// Per-zone splits. The free-throw bucket mirrors the free-throw split so
/// reports can display all four side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTable {
    pub paint: ZoneSplit,
    pub mid_range: ZoneSplit,
    pub three_point: ZoneSplit,
    pub free_throw: ZoneSplit,
}

impl ZoneTable {
    pub fn get(&self, zone: Zone) -> &ZoneSplit {
        match zone {
            Zone::Paint => &self.paint,
            Zone::MidRange => &self.mid_range,
            Zone::ThreePoint => &self.three_point,
        }
    }
}

/// Derived statistics for a player, a team, or the whole game.
///
/// Invariants: the top-level counts are field goals plus free throws, and
/// the three court zones' attempts sum to `field_goals.total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSnapshot {
    pub total: u32,
    pub makes: u32,
    pub misses: u32,
    pub percentage: u32,
    pub points: u32,
    pub two_point_makes: u32,
    pub three_point_makes: u32,
    pub free_throw_points: u32,
    pub field_goals: ShootingSplit,
    pub free_throws: ShootingSplit,
    pub assists: u32,
    pub rebounds: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub zones: ZoneTable,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold the store's events selected by `filter` into a snapshot.
///
/// Never fails: an empty selection yields all zeros. Events whose player has
/// since been deleted are counted by their recorded id and team.
pub fn compute_stats(store: &EventStore, filter: StatFilter) -> StatisticsSnapshot {
    let mut zone_attempts = [0u32; 3];
    let mut zone_makes = [0u32; 3];
    let mut two_point_makes = 0;
    let mut three_point_makes = 0;
    let mut field_goal_points = 0;

    for shot in shots_matching(store, filter) {
        field_goal_points += shot.points();
        let slot = match shot.zone {
            Zone::Paint => 0,
            Zone::MidRange => 1,
            Zone::ThreePoint => 2,
        };
        zone_attempts[slot] += 1;
        if shot.is_make {
            zone_makes[slot] += 1;
            match shot.zone {
                Zone::ThreePoint => three_point_makes += 1,
                Zone::Paint | Zone::MidRange => two_point_makes += 1,
            }
        }
    }

    let fg_total: u32 = zone_attempts.iter().sum();
    let fg_makes: u32 = zone_makes.iter().sum();
    let field_goals = ShootingSplit::from_counts(fg_makes, fg_total);

    let (ft_makes, ft_total) = actions_matching(store, ActionKind::FreeThrow, filter)
        .fold((0u32, 0u32), |(makes, total), ft| {
            (makes + u32::from(ft.is_make == Some(true)), total + 1)
        });
    let free_throws = ShootingSplit::from_counts(ft_makes, ft_total);

    let count = |kind| actions_matching(store, kind, filter).count() as u32;
    let combined = field_goals.combine(&free_throws);

    StatisticsSnapshot {
        total: combined.total,
        makes: combined.makes,
        misses: combined.misses,
        percentage: combined.percentage,
        points: field_goal_points + ft_makes,
        two_point_makes,
        three_point_makes,
        free_throw_points: ft_makes,
        field_goals,
        free_throws,
        assists: count(ActionKind::Assist),
        rebounds: count(ActionKind::Rebound),
        steals: count(ActionKind::Steal),
        blocks: count(ActionKind::Block),
        turnovers: count(ActionKind::Turnover),
        zones: ZoneTable {
            paint: ZoneSplit::from_counts(zone_makes[0], zone_attempts[0]),
            mid_range: ZoneSplit::from_counts(zone_makes[1], zone_attempts[1]),
            three_point: ZoneSplit::from_counts(zone_makes[2], zone_attempts[2]),
            free_throw: ZoneSplit::from_counts(ft_makes, ft_total),
        },
    }
}

/// One snapshot per rostered player on `team`, in roster order.
pub fn player_stats_for_team(store: &EventStore, team: Team) -> Vec<(Player, StatisticsSnapshot)> {
    store
        .roster()
        .players_on(team)
        .map(|p| (p.clone(), compute_stats(store, StatFilter::Player(p.id))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::court::ShotPlacement;
    use crate::game::SimpleAction;

    fn placement(zone: Zone) -> ShotPlacement {
        ShotPlacement::in_zone(zone)
    }

    fn store_for(player: u64) -> EventStore {
        let mut store = EventStore::default();
        store.select_player(PlayerId(player));
        store
    }

    fn assert_consistent(s: &StatisticsSnapshot) {
        assert_eq!(s.total, s.field_goals.total + s.free_throws.total);
        assert_eq!(s.makes, s.field_goals.makes + s.free_throws.makes);
        assert_eq!(s.misses, s.field_goals.misses + s.free_throws.misses);
        assert_eq!(
            s.zones.paint.attempts + s.zones.mid_range.attempts + s.zones.three_point.attempts,
            s.field_goals.total
        );
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 2), 50);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        // 100 * 1/8 = 12.5 -> 13, 100 * 5/8 = 62.5 -> 63
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 8), 63);
        // 100 * 101/200 = 50.5 -> 51
        assert_eq!(percentage(101, 200), 51);
        assert_eq!(percentage(7, 7), 100);
    }

    #[test]
    fn empty_store_is_all_zero() {
        let store = EventStore::default();
        let filters = [
            StatFilter::All,
            StatFilter::Team(Team::Home),
            StatFilter::Player(PlayerId(1)),
        ];
        for filter in filters {
            let stats = compute_stats(&store, filter);
            assert_eq!(stats, StatisticsSnapshot::default());
        }
    }

    #[test]
    fn split_misses_never_underflow() {
        let split = ShootingSplit::from_counts(3, 1);
        assert_eq!(split.total, 1);
        assert_eq!(split.makes, 3);
        assert_eq!(split.misses, 0);
    }

    #[test]
    fn points_formula() {
        let mut store = store_for(1);
        for _ in 0..3 {
            store.add_shot(placement(Zone::ThreePoint), true).unwrap();
        }
        for _ in 0..2 {
            store.add_shot(placement(Zone::MidRange), true).unwrap();
        }
        for _ in 0..4 {
            store
                .add_simple_action(SimpleAction::FreeThrow { made: true })
                .unwrap();
        }
        let stats = compute_stats(&store, StatFilter::All);
        assert_eq!(stats.points, 17);
        assert_eq!(stats.three_point_makes, 3);
        assert_eq!(stats.two_point_makes, 2);
        assert_eq!(stats.free_throw_points, 4);
        assert_consistent(&stats);
    }

    #[test]
    fn misses_score_nothing() {
        let mut store = store_for(1);
        store.add_shot(placement(Zone::ThreePoint), false).unwrap();
        store
            .add_simple_action(SimpleAction::FreeThrow { made: false })
            .unwrap();
        let stats = compute_stats(&store, StatFilter::All);
        assert_eq!(stats.points, 0);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.percentage, 0);
    }

    #[test]
    fn zone_table_and_splits() {
        let mut store = store_for(2);
        store.add_shot(placement(Zone::Paint), true).unwrap();
        store.add_shot(placement(Zone::Paint), false).unwrap();
        store.add_shot(placement(Zone::Paint), true).unwrap();
        store.add_shot(placement(Zone::MidRange), false).unwrap();
        store.add_shot(placement(Zone::ThreePoint), true).unwrap();
        store
            .add_simple_action(SimpleAction::FreeThrow { made: true })
            .unwrap();
        store
            .add_simple_action(SimpleAction::FreeThrow { made: false })
            .unwrap();

        let stats = compute_stats(&store, StatFilter::Player(PlayerId(2)));
        assert_eq!(stats.zones.paint, ZoneSplit { makes: 2, attempts: 3, percentage: 67 });
        assert_eq!(stats.zones.mid_range, ZoneSplit { makes: 0, attempts: 1, percentage: 0 });
        assert_eq!(stats.zones.three_point, ZoneSplit { makes: 1, attempts: 1, percentage: 100 });
        assert_eq!(stats.zones.free_throw, ZoneSplit { makes: 1, attempts: 2, percentage: 50 });
        assert_eq!(*stats.zones.get(Zone::Paint), stats.zones.paint);

        assert_eq!(stats.field_goals, ShootingSplit::from_counts(3, 5));
        assert_eq!(stats.field_goals.misses, 2);
        assert_eq!(stats.field_goals.percentage, 60);
        assert_eq!(stats.free_throws, ShootingSplit::from_counts(1, 2));
        assert_eq!(stats.free_throws.percentage, 50);
        assert_eq!(stats.total, 7);
        assert_eq!(stats.makes, 4);
        assert_eq!(stats.percentage, 57);
        assert_eq!(stats.points, 2 * 2 + 3 + 1);
        assert_consistent(&stats);
    }

    #[test]
    fn counting_stats() {
        let mut store = store_for(3);
        for action in [
            SimpleAction::Assist,
            SimpleAction::Assist,
            SimpleAction::Rebound,
            SimpleAction::Steal,
            SimpleAction::Block,
            SimpleAction::Block,
            SimpleAction::Block,
            SimpleAction::Turnover,
        ] {
            store.add_simple_action(action).unwrap();
        }
        let stats = compute_stats(&store, StatFilter::Team(Team::Away));
        assert_eq!(
            (stats.assists, stats.rebounds, stats.steals, stats.blocks, stats.turnovers),
            (2, 1, 1, 3, 1)
        );
        assert_eq!(stats.total, 0);
        assert_eq!(compute_stats(&store, StatFilter::Team(Team::Home)).assists, 0);
    }

    #[test]
    fn filters_select_player_team_and_game() {
        let mut store = store_for(1);
        store.add_shot(placement(Zone::Paint), true).unwrap();
        store.select_player(PlayerId(2));
        store.add_shot(placement(Zone::MidRange), true).unwrap();
        store.select_player(PlayerId(3));
        store.add_shot(placement(Zone::ThreePoint), true).unwrap();

        assert_eq!(compute_stats(&store, StatFilter::Player(PlayerId(1))).points, 2);
        assert_eq!(compute_stats(&store, StatFilter::Team(Team::Home)).points, 4);
        assert_eq!(compute_stats(&store, StatFilter::Team(Team::Away)).points, 3);
        assert_eq!(compute_stats(&store, StatFilter::All).points, 7);
        assert_eq!(shots_matching(&store, StatFilter::Team(Team::Home)).count(), 2);
        assert_eq!(shots_matching(&store, StatFilter::Player(PlayerId(3))).count(), 1);
    }

    #[test]
    fn repeated_computation_is_identical() {
        let mut store = store_for(1);
        store.add_shot(placement(Zone::MidRange), true).unwrap();
        store.add_simple_action(SimpleAction::Steal).unwrap();
        let first = compute_stats(&store, StatFilter::All);
        let second = compute_stats(&store, StatFilter::All);
        assert_eq!(first, second);
    }

    #[test]
    fn per_player_breakdown_follows_roster_order() {
        let mut store = store_for(2);
        store.add_shot(placement(Zone::Paint), true).unwrap();
        let lines = player_stats_for_team(&store, Team::Home);
        let names: Vec<_> = lines.iter().map(|(p, _)| p.name.as_str()).collect();
        assert_eq!(names, vec!["Player 1", "Player 2"]);
        assert_eq!(lines[0].1.points, 0);
        assert_eq!(lines[1].1.points, 2);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let json = serde_json::to_value(StatisticsSnapshot::default()).unwrap();
        assert!(json.get("fieldGoals").is_some());
        assert!(json["zones"].get("threePoint").is_some());
        assert!(json["zones"].get("freeThrow").is_some());
    }
}
