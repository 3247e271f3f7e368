//! Alert rule engine: fixed per-team rules over the seed series.
//!
//! Produces an `Evaluation` with severity-ordered alerts and aggregate
//! counts. Rules are independent; a team can trigger any subset. The
//! drop, instability, and chronic-under-target rules suppress
//! themselves when the sustained-low-velocity rule already fired for
//! the same team.
//!
//! Evaluation fans out per team via rayon and is re-collected in
//! registry order before the severity sort, so output is deterministic.

use crate::models::team::{Team, TeamMetrics};
use crate::models::{Alert, AlertCounts, Category, Evaluation, Severity};
use crate::stats;
use crate::store::MetricsStore;
use chrono::{DateTime, Utc};
use rayon::prelude::*;

/// Completion percentage under which a sprint counts as below target.
const LOW_VELOCITY_PCT: f64 = 60.0;
/// Sprint-over-sprint decline (percent) that flags a sharp drop.
const VELOCITY_DROP_PCT: f64 = 20.0;
/// Coefficient of variation above which velocity counts as unstable.
const VELOCITY_CV_LIMIT: f64 = 25.0;
/// Average median cycle time limit, in days.
const MEDIAN_CYCLE_LIMIT_DAYS: f64 = 14.0;
/// Average P90 cycle time limit, in days.
const P90_CYCLE_LIMIT_DAYS: f64 = 30.0;
/// Growth of the recent cycle-time window vs the older one, percent.
const CYCLE_GROWTH_PCT: f64 = 30.0;
/// Sprints below target that count as chronic.
const CHRONIC_BELOW_TARGET: usize = 3;
/// Estimated carryover percentage above which a team is flagged.
const CARRYOVER_LIMIT_PCT: f64 = 30.0;
/// Share of uncompleted work assumed to roll into the next sprint.
const CARRYOVER_FACTOR: f64 = 0.8;
/// Average velocity and stability cutoffs for the top-performer alert.
const TOP_AVG_VELOCITY: f64 = 85.0;
const TOP_CV_LIMIT: f64 = 15.0;

/// Run the rule engine over every registered team.
///
/// Teams without store data are skipped silently; one bad team never
/// blocks the pass. Two passes over unchanged input (and the same
/// `generated_at`) produce identical alert lists.
pub fn evaluate_all(store: &MetricsStore, generated_at: DateTime<Utc>) -> Evaluation {
    let per_team: Vec<Vec<Alert>> = store
        .teams()
        .par_iter()
        .map(|team| match store.team_metrics(&team.key) {
            Some(data) => evaluate_team(team, data, generated_at),
            None => Vec::new(),
        })
        .collect();
    let mut alerts: Vec<Alert> = per_team.into_iter().flatten().collect();
    // Stable: registry/rule order is kept within each severity group.
    alerts.sort_by_key(|a| a.severity);
    let counts = AlertCounts::tally(&alerts);
    Evaluation { alerts, counts }
}

/// Evaluate the fixed rule list for one team. An empty or malformed
/// series yields no alerts rather than an error.
pub fn evaluate_team(team: &Team, data: &TeamMetrics, generated_at: DateTime<Utc>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    let pct: Vec<f64> = data.velocity.iter().map(|s| f64::from(s.pct)).collect();
    let medians: Vec<f64> = data.cycle_time.iter().map(|w| w.median).collect();
    let p90s: Vec<f64> = data.cycle_time.iter().map(|w| w.p90).collect();
    let avgs: Vec<f64> = data.cycle_time.iter().map(|w| w.avg).collect();
    if pct.is_empty() || avgs.is_empty() {
        return alerts;
    }

    // Sustained low velocity: last 2 sprints both under target.
    let streak = pct.len() >= 2 && stats::consecutive_below_threshold(&pct, LOW_VELOCITY_PCT, 2) == 2;
    if streak {
        let last_two = &data.velocity[data.velocity.len() - 2..];
        alerts.push(alert(
            team,
            "vel-low",
            Category::Velocity,
            Severity::Critical,
            "Velocity below 60% for 2+ sprints",
            format!("Last 2 sprints: {}%, {}%", last_two[0].pct, last_two[1].pct),
            f64::from(last_two[1].pct),
            generated_at,
        ));
    }

    // Sharp sprint-over-sprint drop, unless the streak already fired.
    if pct.len() >= 2 && !streak {
        let prev = pct[pct.len() - 2];
        let current = pct[pct.len() - 1];
        let change = stats::percent_change(prev, current);
        if change < -VELOCITY_DROP_PCT {
            alerts.push(alert(
                team,
                "vel-drop",
                Category::Velocity,
                Severity::Warning,
                "Velocity dropped sharply",
                format!("Down {:.0}%: {}% -> {}%", -change, prev, current),
                -change,
                generated_at,
            ));
        }
    }

    // Velocity instability across the full history.
    let cv = stats::coefficient_of_variation(&pct).unwrap_or(0.0);
    if cv > VELOCITY_CV_LIMIT && !streak {
        alerts.push(alert(
            team,
            "vel-unstable",
            Category::Velocity,
            Severity::Warning,
            "Velocity unstable",
            format!("{:.0}% spread over the last {} sprints", cv, pct.len()),
            cv,
            generated_at,
        ));
    }

    // Median cycle time over the limit.
    if let Ok(avg_median) = stats::mean(&medians) {
        if avg_median > MEDIAN_CYCLE_LIMIT_DAYS {
            alerts.push(alert(
                team,
                "ct-high",
                Category::CycleTime,
                Severity::Critical,
                "Median cycle time above 14 days",
                format!("Median: {:.1} days", avg_median),
                avg_median,
                generated_at,
            ));
        }
    }

    // Long tail: P90 over the limit.
    if let Ok(avg_p90) = stats::mean(&p90s) {
        if avg_p90 > P90_CYCLE_LIMIT_DAYS {
            alerts.push(alert(
                team,
                "ct-p90",
                Category::CycleTime,
                Severity::Warning,
                "Long-tail cycle time",
                format!("Long tail: P90 = {:.1} days", avg_p90),
                avg_p90,
                generated_at,
            ));
        }
    }

    // Recent 4-week window vs the first 4 weeks.
    if let (Ok(older), Ok(recent)) = (
        stats::window_average(&avgs, 4, false),
        stats::window_average(&avgs, 4, true),
    ) {
        let growth = stats::percent_change(older, recent);
        if growth > CYCLE_GROWTH_PCT {
            alerts.push(alert(
                team,
                "ct-increase",
                Category::CycleTime,
                Severity::Warning,
                "Cycle time growing",
                format!("Up {:.0}% vs the previous period", growth),
                growth,
                generated_at,
            ));
        }
    }

    // Chronic under-target, unless the streak already fired.
    let below = stats::count_below_threshold(&pct, LOW_VELOCITY_PCT);
    if below >= CHRONIC_BELOW_TARGET && !streak {
        alerts.push(alert(
            team,
            "health-below",
            Category::TeamHealth,
            Severity::Critical,
            "Below target for 3+ sprints",
            format!("{} of {} sprints below 60%", below, pct.len()),
            below as f64,
            generated_at,
        ));
    }

    // Estimated carryover from uncompleted work. Independent of the
    // streak rule.
    let carryover = (100.0 - data.avg_velocity).max(0.0) * CARRYOVER_FACTOR;
    if carryover > CARRYOVER_LIMIT_PCT {
        alerts.push(alert(
            team,
            "health-carryover",
            Category::TeamHealth,
            Severity::Warning,
            "High carryover",
            format!("~{:.0}% of committed work rolls over", carryover),
            carryover,
            generated_at,
        ));
    }

    // Positive alert for fast, stable teams.
    if data.avg_velocity >= TOP_AVG_VELOCITY && cv < TOP_CV_LIMIT {
        alerts.push(alert(
            team,
            "health-top",
            Category::TeamHealth,
            Severity::Info,
            "Top performer",
            format!("Velocity {:.0}%, stable delivery", data.avg_velocity),
            data.avg_velocity,
            generated_at,
        ));
    }

    alerts
}

fn alert(
    team: &Team,
    slug: &str,
    category: Category,
    severity: Severity,
    title: &str,
    description: String,
    value: f64,
    generated_at: DateTime<Utc>,
) -> Alert {
    Alert {
        id: format!("{}-{}", team.key, slug),
        team: team.name.clone(),
        team_key: team.key.clone(),
        platform: team.platform,
        category,
        severity,
        title: title.to_string(),
        description,
        value,
        generated_at,
    }
}

#[derive(Debug, Default, Clone, Copy)]
/// View filter with AND semantics. Filtering borrows the alert list and
/// never mutates it.
pub struct AlertFilter {
    pub category: Option<Category>,
    pub severity: Option<Severity>,
    pub platform: Option<crate::models::team::Platform>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        self.category.map_or(true, |c| alert.category == c)
            && self.severity.map_or(true, |s| alert.severity == s)
            && self.platform.map_or(true, |p| alert.platform == p)
    }

    pub fn apply<'a>(&self, alerts: &'a [Alert]) -> Vec<&'a Alert> {
        alerts.iter().filter(|a| self.matches(a)).collect()
    }
}
