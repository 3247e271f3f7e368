//! Static metrics store: the team registry and every seed series.
//!
//! The store is built once at startup and read-only afterwards. Six
//! teams carry hand-curated datasets; the rest get a synthesized profile
//! derived from their summary averages. Unknown keys resolve to `None`
//! ("no data"), never an error.

use crate::models::team::{
    BugBurndown, CycleTimePoint, Platform, SprintVelocityPoint, Team, TeamMetrics,
};
use std::collections::HashMap;

/// All series data, keyed by team. The aggregate ("All Teams, median")
/// dataset lives alongside the per-team entries.
pub struct MetricsStore {
    teams: Vec<Team>,
    metrics: HashMap<String, TeamMetrics>,
    aggregate: TeamMetrics,
}

impl MetricsStore {
    /// Build the full seed store.
    pub fn seed() -> Self {
        let teams = seed_teams();
        let mut metrics = HashMap::new();
        for (key, m) in seed_metrics() {
            metrics.insert(key.to_string(), m);
        }
        // Remaining teams get a profile synthesized from summary averages.
        for (key, velocity, cycle) in SYNTH_BASELINES {
            metrics.insert(key.to_string(), synth_metrics(key, velocity, cycle));
        }
        MetricsStore {
            teams,
            metrics,
            aggregate: aggregate_metrics(),
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_by_key(&self, key: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.key == key)
    }

    pub fn team_by_id(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Per-team series, or `None` for an unrecognized key.
    pub fn team_metrics(&self, key: &str) -> Option<&TeamMetrics> {
        self.metrics.get(key)
    }

    /// The all-teams (median) dataset backing the aggregate view.
    pub fn aggregate(&self) -> &TeamMetrics {
        &self.aggregate
    }
}

fn seed_teams() -> Vec<Team> {
    vec![
        Team::new(1, "Surf", Platform::Ios, "SURF"),
        Team::new(2, "Web Production", Platform::Web, "WPROD"),
        Team::new(3, "Disrupt", Platform::Web, "DISRUPT"),
        Team::new(4, "Radiocat", Platform::Android, "RADIOCAT"),
        Team::new(5, "Zvuk Client", Platform::Backend, "ZCL"),
        Team::new(6, "Acquisition", Platform::Web, "ACQ"),
        Team::new(7, "Discovery", Platform::Backend, "DISC"),
        Team::new(8, "Wave", Platform::Ios, "WAVE"),
        Team::new(9, "Social Intelligence", Platform::Ds, "SOCINT"),
        Team::new(10, "Web Platform", Platform::Web, "WPLT"),
        Team::new(11, "Zvuk iOS", Platform::Ios, "ZIOS"),
        Team::new(12, "Zvuk Android", Platform::Android, "ZAND"),
        Team::new(13, "New Zealand", Platform::Backend, "NZ"),
        Team::new(14, "Internal Tools", Platform::Web, "INTR"),
        Team::new(15, "Integrations", Platform::Backend, "INTG"),
        Team::new(16, "Content & Growth", Platform::De, "CNG"),
    ]
}

/// Summary averages for teams without a hand-curated dataset:
/// (key, average velocity %, average cycle time in days).
const SYNTH_BASELINES: [(&str, u32, f64); 10] = [
    ("ZCL", 74, 20.5),
    ("ACQ", 78, 18.4),
    ("DISC", 62, 22.8),
    ("SOCINT", 58, 24.5),
    ("WPLT", 79, 17.5),
    ("ZIOS", 70, 21.2),
    ("ZAND", 73, 19.8),
    ("NZ", 55, 26.5),
    ("INTR", 75, 18.9),
    ("INTG", 61, 23.2),
];

fn vp(sprint: &str, planned: u32, completed: u32, pct: u32) -> SprintVelocityPoint {
    SprintVelocityPoint {
        sprint: sprint.to_string(),
        planned,
        completed,
        pct,
    }
}

fn ct(week: &str, avg: f64, median: f64, p90: f64) -> CycleTimePoint {
    CycleTimePoint {
        week: week.to_string(),
        avg,
        median,
        p90,
    }
}

fn burndown(baseline: u32, target: u32, current: u32) -> BugBurndown {
    BugBurndown {
        baseline,
        target,
        current,
        quarter: "Q1 2026".to_string(),
    }
}

/// All-teams dataset (median across teams per sprint/week).
fn aggregate_metrics() -> TeamMetrics {
    TeamMetrics {
        velocity: vec![
            vp("MEDIAN 26-01", 42, 27, 64),
            vp("MEDIAN 26-02", 38, 26, 68),
            vp("MEDIAN 26-03", 40, 30, 75),
            vp("MEDIAN 26-04", 45, 32, 71),
            vp("MEDIAN 26-05", 41, 30, 73),
            vp("MEDIAN 26-06", 43, 32, 74),
        ],
        cycle_time: vec![
            ct("W1", 22.5, 19.2, 38.5),
            ct("W2", 21.8, 18.5, 36.2),
            ct("W3", 20.2, 17.8, 34.8),
            ct("W4", 23.1, 20.4, 40.2),
            ct("W5", 19.8, 17.2, 33.5),
            ct("W6", 18.9, 16.8, 31.2),
            ct("W7", 19.5, 17.5, 32.8),
            ct("W8", 18.2, 16.4, 30.5),
        ],
        burndown: burndown(150, 135, 142),
        avg_velocity: 71.0,
        avg_cycle_time: 20.5,
    }
}

/// Hand-curated datasets for the six teams with bespoke histories.
fn seed_metrics() -> Vec<(&'static str, TeamMetrics)> {
    vec![
        (
            "SURF",
            TeamMetrics {
                velocity: vec![
                    vp("SURF 26-01", 35, 28, 80),
                    vp("SURF 26-02", 32, 27, 84),
                    vp("SURF 26-03", 38, 35, 92),
                    vp("SURF 26-04", 40, 36, 90),
                    vp("SURF 26-05", 36, 32, 89),
                    vp("SURF 26-06", 34, 30, 88),
                ],
                cycle_time: vec![
                    ct("W1", 18.2, 15.5, 28.5),
                    ct("W2", 17.5, 14.8, 27.2),
                    ct("W3", 16.8, 14.2, 26.5),
                    ct("W4", 17.2, 15.0, 27.8),
                    ct("W5", 16.2, 13.8, 25.5),
                    ct("W6", 15.8, 13.5, 24.8),
                    ct("W7", 16.5, 14.2, 26.2),
                    ct("W8", 16.2, 13.9, 25.8),
                ],
                burndown: burndown(45, 38, 40),
                avg_velocity: 88.0,
                avg_cycle_time: 16.2,
            },
        ),
        (
            "DISRUPT",
            TeamMetrics {
                velocity: vec![
                    vp("DISRUPT 26-01", 42, 34, 81),
                    vp("DISRUPT 26-02", 38, 32, 84),
                    vp("DISRUPT 26-03", 45, 40, 89),
                    vp("DISRUPT 26-04", 40, 34, 85),
                    vp("DISRUPT 26-05", 43, 36, 84),
                    vp("DISRUPT 26-06", 41, 35, 85),
                ],
                cycle_time: vec![
                    ct("W1", 17.5, 14.8, 27.2),
                    ct("W2", 16.8, 14.2, 26.5),
                    ct("W3", 15.5, 13.2, 24.8),
                    ct("W4", 16.2, 13.8, 25.5),
                    ct("W5", 15.2, 12.9, 24.2),
                    ct("W6", 14.8, 12.5, 23.5),
                    ct("W7", 15.5, 13.2, 24.8),
                    ct("W8", 15.5, 13.0, 24.5),
                ],
                burndown: burndown(52, 42, 45),
                avg_velocity: 85.0,
                avg_cycle_time: 15.5,
            },
        ),
        (
            "WPROD",
            TeamMetrics {
                velocity: vec![
                    vp("WPROD 26-01", 38, 30, 79),
                    vp("WPROD 26-02", 35, 28, 80),
                    vp("WPROD 26-03", 40, 34, 85),
                    vp("WPROD 26-04", 42, 34, 81),
                    vp("WPROD 26-05", 38, 31, 82),
                    vp("WPROD 26-06", 36, 29, 81),
                ],
                cycle_time: vec![
                    ct("W1", 19.5, 16.8, 30.2),
                    ct("W2", 18.8, 16.2, 29.5),
                    ct("W3", 17.5, 15.2, 28.2),
                    ct("W4", 18.2, 15.8, 29.0),
                    ct("W5", 17.2, 14.8, 27.5),
                    ct("W6", 16.8, 14.5, 27.0),
                    ct("W7", 17.5, 15.2, 28.2),
                    ct("W8", 17.8, 15.4, 28.5),
                ],
                burndown: burndown(48, 40, 43),
                avg_velocity: 81.0,
                avg_cycle_time: 17.8,
            },
        ),
        (
            "RADIOCAT",
            TeamMetrics {
                velocity: vec![
                    vp("RADIOCAT 26-01", 30, 22, 73),
                    vp("RADIOCAT 26-02", 28, 21, 75),
                    vp("RADIOCAT 26-03", 32, 26, 81),
                    vp("RADIOCAT 26-04", 35, 27, 77),
                    vp("RADIOCAT 26-05", 30, 23, 77),
                    vp("RADIOCAT 26-06", 28, 21, 75),
                ],
                cycle_time: vec![
                    ct("W1", 21.2, 18.5, 33.5),
                    ct("W2", 20.5, 17.8, 32.2),
                    ct("W3", 19.2, 16.8, 30.5),
                    ct("W4", 20.0, 17.5, 31.5),
                    ct("W5", 18.8, 16.2, 29.8),
                    ct("W6", 18.5, 16.0, 29.2),
                    ct("W7", 19.2, 16.8, 30.5),
                    ct("W8", 19.2, 16.5, 30.2),
                ],
                burndown: burndown(38, 32, 35),
                avg_velocity: 76.0,
                avg_cycle_time: 19.2,
            },
        ),
        (
            "WAVE",
            TeamMetrics {
                velocity: vec![
                    vp("WAVE 26-01", 32, 26, 81),
                    vp("WAVE 26-02", 30, 25, 83),
                    vp("WAVE 26-03", 35, 31, 89),
                    vp("WAVE 26-04", 38, 32, 84),
                    vp("WAVE 26-05", 34, 28, 82),
                    vp("WAVE 26-06", 32, 27, 84),
                ],
                cycle_time: vec![
                    ct("W1", 18.5, 15.8, 29.2),
                    ct("W2", 17.8, 15.2, 28.5),
                    ct("W3", 16.5, 14.2, 26.8),
                    ct("W4", 17.2, 14.8, 27.5),
                    ct("W5", 16.2, 13.8, 26.2),
                    ct("W6", 15.8, 13.5, 25.5),
                    ct("W7", 16.5, 14.2, 26.8),
                    ct("W8", 16.8, 14.5, 27.2),
                ],
                burndown: burndown(42, 35, 38),
                avg_velocity: 83.0,
                avg_cycle_time: 16.8,
            },
        ),
        (
            "CNG",
            TeamMetrics {
                velocity: vec![
                    vp("CNG 26-01", 25, 11, 44),
                    vp("CNG 26-02", 22, 10, 45),
                    vp("CNG 26-03", 28, 14, 50),
                    vp("CNG 26-04", 30, 15, 50),
                    vp("CNG 26-05", 26, 12, 46),
                    vp("CNG 26-06", 24, 12, 50),
                ],
                cycle_time: vec![
                    ct("W1", 32.5, 28.5, 48.5),
                    ct("W2", 31.2, 27.2, 46.2),
                    ct("W3", 29.5, 25.8, 44.5),
                    ct("W4", 30.2, 26.5, 45.8),
                    ct("W5", 28.8, 25.2, 43.8),
                    ct("W6", 27.5, 24.2, 42.5),
                    ct("W7", 28.2, 24.8, 43.2),
                    ct("W8", 28.5, 25.0, 43.5),
                ],
                burndown: burndown(65, 55, 62),
                avg_velocity: 48.0,
                avg_cycle_time: 28.5,
            },
        ),
    ]
}

fn synth_completed(planned: u32, pct_base: u32) -> u32 {
    (f64::from(planned) * f64::from(pct_base) / 100.0).round() as u32
}

/// Synthesized profile for a team without a bespoke dataset: six sprints
/// oscillating around the base velocity and eight weeks of cycle time
/// drifting down from the base.
fn synth_metrics(key: &str, base_velocity: u32, base_cycle: f64) -> TeamMetrics {
    let v = base_velocity;
    let b = base_cycle;
    TeamMetrics {
        velocity: vec![
            vp(&format!("{} 26-01", key), 35, synth_completed(35, v), v - 5),
            vp(&format!("{} 26-02", key), 32, synth_completed(32, v), v - 3),
            vp(&format!("{} 26-03", key), 38, synth_completed(38, v + 5), v + 5),
            vp(&format!("{} 26-04", key), 36, synth_completed(36, v), v),
            vp(&format!("{} 26-05", key), 34, synth_completed(34, v - 2), v - 2),
            vp(&format!("{} 26-06", key), 35, synth_completed(35, v), v),
        ],
        cycle_time: vec![
            ct("W1", b + 2.0, b - 1.0, b + 12.0),
            ct("W2", b + 1.5, b - 1.5, b + 11.0),
            ct("W3", b, b - 2.0, b + 10.0),
            ct("W4", b + 1.0, b - 1.2, b + 10.5),
            ct("W5", b - 0.5, b - 2.5, b + 9.0),
            ct("W6", b - 1.0, b - 3.0, b + 8.0),
            ct("W7", b - 0.5, b - 2.5, b + 9.0),
            ct("W8", b, b - 2.0, b + 10.0),
        ],
        burndown: burndown(50, 42, 46),
        avg_velocity: f64::from(base_velocity),
        avg_cycle_time: base_cycle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_unique_ids_and_keys() {
        let store = MetricsStore::seed();
        let ids: HashSet<u32> = store.teams().iter().map(|t| t.id).collect();
        let keys: HashSet<&str> = store.teams().iter().map(|t| t.key.as_str()).collect();
        assert_eq!(ids.len(), store.teams().len());
        assert_eq!(keys.len(), store.teams().len());
        assert_eq!(store.teams().len(), 16);
    }

    #[test]
    fn test_every_team_has_metrics() {
        let store = MetricsStore::seed();
        for team in store.teams() {
            let m = store.team_metrics(&team.key);
            assert!(m.is_some(), "missing metrics for {}", team.key);
            let m = m.unwrap();
            assert_eq!(m.velocity.len(), 6);
            assert_eq!(m.cycle_time.len(), 8);
        }
    }

    #[test]
    fn test_unknown_key_yields_no_data() {
        let store = MetricsStore::seed();
        assert!(store.team_metrics("NOPE").is_none());
        assert!(store.team_by_key("NOPE").is_none());
        assert!(store.team_by_id(999).is_none());
    }

    #[test]
    fn test_velocity_invariants() {
        let store = MetricsStore::seed();
        let all = store
            .teams()
            .iter()
            .filter_map(|t| store.team_metrics(&t.key))
            .chain(std::iter::once(store.aggregate()));
        for m in all {
            for s in &m.velocity {
                assert!(s.completed <= s.planned, "{}", s.sprint);
                assert!(s.pct <= 100, "{}", s.sprint);
            }
        }
    }

    #[test]
    fn test_cycle_time_invariants() {
        let store = MetricsStore::seed();
        let all = store
            .teams()
            .iter()
            .filter_map(|t| store.team_metrics(&t.key))
            .chain(std::iter::once(store.aggregate()));
        for m in all {
            for w in &m.cycle_time {
                assert!(w.median <= w.avg, "{}", w.week);
                assert!(w.avg <= w.p90, "{}", w.week);
            }
        }
    }

    #[test]
    fn test_burndown_invariants() {
        let store = MetricsStore::seed();
        for team in store.teams() {
            let b = &store.team_metrics(&team.key).unwrap().burndown;
            assert!(b.target <= b.baseline, "{}", team.key);
        }
        let agg = &store.aggregate().burndown;
        assert!(agg.target <= agg.baseline);
        assert!((agg.progress_pct() - 53.3).abs() < 0.1);
    }

    #[test]
    fn test_synth_profile_tracks_base_velocity() {
        let m = synth_metrics("DISC", 62, 22.8);
        let pcts: Vec<u32> = m.velocity.iter().map(|s| s.pct).collect();
        assert_eq!(pcts, vec![57, 59, 67, 62, 60, 62]);
        assert_eq!(m.avg_velocity, 62.0);
        assert_eq!(m.avg_cycle_time, 22.8);
    }
}
