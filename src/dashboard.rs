//! Dashboard view builder: the aggregate (all-teams median) page and
//! the single-team page share one view model.

use crate::models::summary::{Status, StatusThresholds, TeamSummary};
use crate::models::team::{
    BugBurndown, CycleTimePoint, Platform, SprintVelocityPoint, Team, TeamMetrics,
};
use crate::stats;
use crate::store::MetricsStore;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
/// Everything a dashboard render needs, precomputed.
pub struct DashboardView {
    pub title: String,
    pub team_key: Option<String>,
    pub avg_velocity: f64,
    pub current_velocity: f64,
    /// Percentage-point delta vs the previous sprint.
    pub velocity_trend: f64,
    pub velocity_status: Status,
    pub avg_cycle_time: f64,
    pub median_cycle_time: f64,
    /// Percent improvement vs the previous week; positive means faster.
    pub cycle_time_trend: f64,
    pub burndown: BugBurndown,
    pub burndown_progress_pct: f64,
    pub velocity: Vec<SprintVelocityPoint>,
    pub cycle_time: Vec<CycleTimePoint>,
    pub summary: Vec<TeamSummary>,
}

/// Build the dashboard for a selected team, or the aggregate view when
/// no team is selected. A team without store data falls back to the
/// aggregate dataset.
pub fn build_dashboard(
    store: &MetricsStore,
    selected: Option<&Team>,
    platform: Option<Platform>,
    thresholds: &StatusThresholds,
) -> DashboardView {
    let data: &TeamMetrics = selected
        .and_then(|t| store.team_metrics(&t.key))
        .unwrap_or_else(|| store.aggregate());
    let title = match selected {
        Some(t) => t.name.clone(),
        None => "All Teams (Median)".to_string(),
    };

    let current_velocity = data.velocity.last().map_or(0.0, |s| f64::from(s.pct));
    let prev_velocity = if data.velocity.len() >= 2 {
        f64::from(data.velocity[data.velocity.len() - 2].pct)
    } else {
        0.0
    };

    let medians: Vec<f64> = data.cycle_time.iter().map(|w| w.median).collect();
    let current_ct = data.cycle_time.last().map_or(0.0, |w| w.avg);
    let prev_ct = if data.cycle_time.len() >= 2 {
        data.cycle_time[data.cycle_time.len() - 2].avg
    } else {
        0.0
    };

    DashboardView {
        title,
        team_key: selected.map(|t| t.key.clone()),
        avg_velocity: data.avg_velocity,
        current_velocity,
        velocity_trend: current_velocity - prev_velocity,
        velocity_status: thresholds.classify(data.avg_velocity),
        avg_cycle_time: data.avg_cycle_time,
        median_cycle_time: round1(stats::mean(&medians).unwrap_or(0.0)),
        cycle_time_trend: -stats::percent_change(prev_ct, current_ct).round(),
        burndown: data.burndown.clone(),
        burndown_progress_pct: round1(data.burndown.progress_pct()),
        velocity: data.velocity.clone(),
        cycle_time: data.cycle_time.clone(),
        summary: build_summaries(store, platform, thresholds),
    }
}

/// One summary row per team, optionally restricted to a platform.
/// Teams with missing or empty series are skipped.
pub fn build_summaries(
    store: &MetricsStore,
    platform: Option<Platform>,
    thresholds: &StatusThresholds,
) -> Vec<TeamSummary> {
    store
        .teams()
        .iter()
        .filter(|t| platform.map_or(true, |p| t.platform == p))
        .filter_map(|t| {
            let m = store.team_metrics(&t.key)?;
            let latest = m.velocity.last()?;
            let prev = if m.velocity.len() >= 2 {
                &m.velocity[m.velocity.len() - 2]
            } else {
                latest
            };
            Some(TeamSummary {
                team: t.name.clone(),
                team_key: t.key.clone(),
                platform: t.platform,
                velocity: m.avg_velocity,
                cycle_time: m.avg_cycle_time,
                bug_burn_delta: i64::from(m.burndown.current) - i64::from(m.burndown.baseline),
                trend: thresholds.trend(f64::from(latest.pct), f64::from(prev.pct)),
                status: thresholds.classify(m.avg_velocity),
            })
        })
        .collect()
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::summary::Trend;

    #[test]
    fn test_aggregate_view() {
        let store = MetricsStore::seed();
        let view = build_dashboard(&store, None, None, &StatusThresholds::default());
        assert_eq!(view.title, "All Teams (Median)");
        assert!(view.team_key.is_none());
        assert_eq!(view.avg_velocity, 71.0);
        assert_eq!(view.velocity_status, Status::Good);
        assert_eq!(view.summary.len(), 16);
        assert!((view.burndown_progress_pct - 53.3).abs() < 1e-9);
        // Last sprint 74 vs 73 before it.
        assert_eq!(view.current_velocity, 74.0);
        assert_eq!(view.velocity_trend, 1.0);
    }

    #[test]
    fn test_single_team_view() {
        let store = MetricsStore::seed();
        let surf = store.team_by_key("SURF").unwrap();
        let view = build_dashboard(&store, Some(surf), None, &StatusThresholds::default());
        assert_eq!(view.title, "Surf");
        assert_eq!(view.team_key.as_deref(), Some("SURF"));
        assert_eq!(view.avg_velocity, 88.0);
        assert_eq!(view.velocity_trend, -1.0);
        assert_eq!(view.median_cycle_time, 14.4);
        // W8 16.2 vs W7 16.5: about 2% faster.
        assert_eq!(view.cycle_time_trend, 2.0);
    }

    #[test]
    fn test_platform_filter_restricts_summary() {
        let store = MetricsStore::seed();
        let rows = build_summaries(&store, Some(Platform::Web), &StatusThresholds::default());
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.platform == Platform::Web));
    }

    #[test]
    fn test_summary_row_for_struggling_team() {
        let store = MetricsStore::seed();
        let rows = build_summaries(&store, None, &StatusThresholds::default());
        let cng = rows.iter().find(|r| r.team_key == "CNG").unwrap();
        assert_eq!(cng.status, Status::Critical);
        assert_eq!(cng.bug_burn_delta, -3);
        // Last sprint 50 vs 46 before it.
        assert_eq!(cng.trend, Trend::Up);
    }
}
