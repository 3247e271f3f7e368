//! Monthly report builder: velocity analysis plus a cycle-time
//! breakdown by issue type and by pipeline stage.
//!
//! Everything here is a fixed formula over the seed series, so two
//! builds of the same report are identical.

use crate::models::summary::StatusThresholds;
use crate::models::team::{SprintVelocityPoint, Team, TeamMetrics};
use crate::stats;
use crate::store::MetricsStore;
use serde::Serialize;

/// Known report months, newest first: (id, label).
pub const MONTHS: [(&str, &str); 4] = [
    ("2026-01", "January 2026"),
    ("2026-02", "February 2026"),
    ("2025-12", "December 2025"),
    ("2025-11", "November 2025"),
];

/// Pipeline stages with their share of total cycle time, in percent.
const STAGE_SHARES: [(&str, u32); 4] = [
    ("Development", 45),
    ("Code Review", 19),
    ("QA", 22),
    ("Release", 14),
];

/// Issue-type profile at the reference average of 7.5 days:
/// (type, avg days, median days, issue count).
const TYPE_PROFILE: [(&str, f64, f64, u32); 4] = [
    ("Bug", 3.2, 2.5, 45),
    ("Task", 5.8, 4.2, 120),
    ("Story", 8.5, 6.8, 35),
    ("Request", 12.4, 9.2, 18),
];

/// Reference overall average the type profile was calibrated against.
const TYPE_PROFILE_BASE_AVG: f64 = 7.5;

pub fn month_label(id: &str) -> Option<&'static str> {
    MONTHS.iter().find(|(m, _)| *m == id).map(|(_, l)| *l)
}

#[derive(Debug, Clone, Serialize)]
pub struct VelocityAnalysis {
    pub sprints: Vec<SprintVelocityPoint>,
    pub total_planned: u32,
    pub total_completed: u32,
    pub avg_velocity: f64,
    /// Percent change from the month's first sprint to its last.
    pub trend_pct: f64,
    pub insight: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TypeBreakdownRow {
    pub issue_type: String,
    pub avg: f64,
    pub median: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageBreakdownRow {
    pub stage: String,
    pub avg: f64,
    pub pct: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CycleTimeBreakdown {
    pub by_type: Vec<TypeBreakdownRow>,
    pub by_stage: Vec<StageBreakdownRow>,
    pub bottleneck: String,
    pub overall_median: f64,
    pub overall_avg: f64,
    pub insight: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: String,
    pub month_label: String,
    pub team: String,
    pub velocity: VelocityAnalysis,
    pub cycle_time: CycleTimeBreakdown,
}

/// Build the report for a month and an optional team. Returns `None`
/// for an unknown month id. Seed data is month-invariant; the id picks
/// the label.
pub fn build_report(
    store: &MetricsStore,
    selected: Option<&Team>,
    month: &str,
    thresholds: &StatusThresholds,
) -> Option<MonthlyReport> {
    let label = month_label(month)?;
    let data: &TeamMetrics = selected
        .and_then(|t| store.team_metrics(&t.key))
        .unwrap_or_else(|| store.aggregate());
    let team = match selected {
        Some(t) => t.name.clone(),
        None => "All Teams (Median)".to_string(),
    };

    Some(MonthlyReport {
        month: month.to_string(),
        month_label: label.to_string(),
        team,
        velocity: velocity_analysis(store, data, selected.is_none(), thresholds),
        cycle_time: cycle_breakdown(data),
    })
}

fn velocity_analysis(
    store: &MetricsStore,
    data: &TeamMetrics,
    all_teams: bool,
    thresholds: &StatusThresholds,
) -> VelocityAnalysis {
    // The month covers the three most recent sprints.
    let start = data.velocity.len().saturating_sub(3);
    let sprints: Vec<SprintVelocityPoint> = data.velocity[start..].to_vec();
    let total_planned: u32 = sprints.iter().map(|s| s.planned).sum();
    let total_completed: u32 = sprints.iter().map(|s| s.completed).sum();
    let pcts: Vec<f64> = sprints.iter().map(|s| f64::from(s.pct)).collect();
    let avg_velocity = stats::mean(&pcts).unwrap_or(0.0).round();
    let first = pcts.first().copied().unwrap_or(0.0);
    let last = pcts.last().copied().unwrap_or(0.0);
    let trend_pct = stats::percent_change(first, last).round();

    let insight = if all_teams {
        let on_target = store
            .teams()
            .iter()
            .filter_map(|t| store.team_metrics(&t.key))
            .filter(|m| m.avg_velocity >= thresholds.good_min)
            .count();
        format!(
            "{} of {} teams exceeded the {:.0}% target this month.",
            on_target,
            store.teams().len(),
            thresholds.good_min
        )
    } else if last >= first {
        format!(
            "Team showed consistent improvement across all {} sprints. Strong finish at {:.0}%.",
            sprints.len(),
            last
        )
    } else {
        format!(
            "Velocity slipped from {:.0}% to {:.0}% over the month. Review sprint scope and carryover.",
            first, last
        )
    };

    VelocityAnalysis {
        sprints,
        total_planned,
        total_completed,
        avg_velocity,
        trend_pct,
        insight,
    }
}

fn cycle_breakdown(data: &TeamMetrics) -> CycleTimeBreakdown {
    let overall_avg = data.avg_cycle_time;
    let medians: Vec<f64> = data.cycle_time.iter().map(|w| w.median).collect();
    let overall_median = round1(stats::mean(&medians).unwrap_or(0.0));

    // Issue-type rows scale with the team's overall average.
    let factor = overall_avg / TYPE_PROFILE_BASE_AVG;
    let by_type = TYPE_PROFILE
        .iter()
        .map(|(issue_type, avg, median, count)| TypeBreakdownRow {
            issue_type: issue_type.to_string(),
            avg: round1(avg * factor),
            median: round1(median * factor),
            count: *count,
        })
        .collect();

    let by_stage: Vec<StageBreakdownRow> = STAGE_SHARES
        .iter()
        .map(|(stage, pct)| StageBreakdownRow {
            stage: stage.to_string(),
            avg: round1(overall_avg * f64::from(*pct) / 100.0),
            pct: *pct,
        })
        .collect();
    let bottleneck = by_stage
        .iter()
        .max_by_key(|r| r.pct)
        .map(|r| r.stage.clone())
        .unwrap_or_default();
    let bottleneck_pct = by_stage.iter().map(|r| r.pct).max().unwrap_or(0);

    CycleTimeBreakdown {
        insight: format!(
            "{} stage takes {}% of cycle time. Consider breaking down large stories.",
            bottleneck, bottleneck_pct
        ),
        by_type,
        by_stage,
        bottleneck,
        overall_median,
        overall_avg,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_labels() {
        assert_eq!(month_label("2026-01"), Some("January 2026"));
        assert_eq!(month_label("2025-11"), Some("November 2025"));
        assert_eq!(month_label("2024-07"), None);
    }

    #[test]
    fn test_unknown_month_yields_no_report() {
        let store = MetricsStore::seed();
        let report = build_report(&store, None, "1999-01", &StatusThresholds::default());
        assert!(report.is_none());
    }

    #[test]
    fn test_aggregate_report_velocity_totals() {
        let store = MetricsStore::seed();
        let report = build_report(&store, None, "2026-01", &StatusThresholds::default()).unwrap();
        assert_eq!(report.team, "All Teams (Median)");
        assert_eq!(report.velocity.sprints.len(), 3);
        // MEDIAN 26-04..26-06: planned 45+41+43, completed 32+30+32.
        assert_eq!(report.velocity.total_planned, 129);
        assert_eq!(report.velocity.total_completed, 94);
        assert_eq!(report.velocity.avg_velocity, 73.0);
        // 71 -> 74 across the month.
        assert_eq!(report.velocity.trend_pct, 4.0);
    }

    #[test]
    fn test_stage_breakdown_shares_and_bottleneck() {
        let store = MetricsStore::seed();
        let report = build_report(&store, None, "2026-01", &StatusThresholds::default()).unwrap();
        let ct = &report.cycle_time;
        assert_eq!(ct.bottleneck, "Development");
        assert_eq!(ct.by_stage.len(), 4);
        let total_pct: u32 = ct.by_stage.iter().map(|r| r.pct).sum();
        assert_eq!(total_pct, 100);
        // 45% of the 20.5d aggregate average.
        assert_eq!(ct.by_stage[0].avg, 9.2);
        assert!(ct.insight.contains("Development"));
    }

    #[test]
    fn test_type_rows_scale_with_team_average() {
        let store = MetricsStore::seed();
        let cng = store.team_by_key("CNG").unwrap();
        let report =
            build_report(&store, Some(cng), "2026-01", &StatusThresholds::default()).unwrap();
        let bug = &report.cycle_time.by_type[0];
        assert_eq!(bug.issue_type, "Bug");
        // 3.2d scaled by 28.5/7.5.
        assert_eq!(bug.avg, 12.2);
        assert_eq!(bug.count, 45);
    }

    #[test]
    fn test_report_is_deterministic() {
        let store = MetricsStore::seed();
        let thresholds = StatusThresholds::default();
        let a = build_report(&store, None, "2026-02", &thresholds).unwrap();
        let b = build_report(&store, None, "2026-02", &thresholds).unwrap();
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
    }
}
