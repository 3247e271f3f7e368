//! Output rendering for the alerts, dashboard, and report commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form keeps
//! the full record fields plus a top-level summary; the pure `compose_*`
//! functions exist so shapes can be tested without capturing stdout.

use crate::dashboard::DashboardView;
use crate::models::summary::Status;
use crate::models::{Alert, Evaluation, Severity};
use crate::report::MonthlyReport;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn severity_icon(sev: Severity, color: bool) -> String {
    match (sev, color) {
        (Severity::Critical, true) => "✖".red().to_string(),
        (Severity::Critical, false) => "✖".to_string(),
        (Severity::Warning, true) => "▲".yellow().to_string(),
        (Severity::Warning, false) => "▲".to_string(),
        (Severity::Info, true) => "◆".green().to_string(),
        (Severity::Info, false) => "◆".to_string(),
    }
}

fn severity_badge(sev: Severity, color: bool) -> String {
    let raw = match sev {
        Severity::Critical => "⟦critical⟧",
        Severity::Warning => "⟦warning⟧",
        Severity::Info => "⟦info⟧",
    };
    if !color {
        return raw.to_string();
    }
    match sev {
        Severity::Critical => raw.red().bold().to_string(),
        Severity::Warning => raw.yellow().bold().to_string(),
        Severity::Info => raw.green().bold().to_string(),
    }
}

fn paint_status(status: Status, color: bool) -> String {
    if !color {
        return status.label().to_string();
    }
    match status {
        Status::Good => status.label().green().to_string(),
        Status::Warning => status.label().yellow().to_string(),
        Status::Critical => status.label().red().to_string(),
    }
}

/// Print alerts in the requested format. `shown` is the filtered view;
/// the summary always reflects the full evaluation.
pub fn print_alerts(eval: &Evaluation, shown: &[&Alert], output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_alerts_json(eval, shown)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            if shown.is_empty() {
                println!("✅ No alerts. All metrics on track.");
            }
            for severity in [Severity::Critical, Severity::Warning, Severity::Info] {
                let group: Vec<&&Alert> =
                    shown.iter().filter(|a| a.severity == severity).collect();
                if group.is_empty() {
                    continue;
                }
                println!(
                    "{} {} ({})",
                    severity_icon(severity, color),
                    if color {
                        severity.heading().bold().to_string()
                    } else {
                        severity.heading().to_string()
                    },
                    group.len()
                );
                for a in group {
                    let team = if color {
                        a.team.clone().bold().to_string()
                    } else {
                        a.team.clone()
                    };
                    println!(
                        "  {} {} ({}) ❲{}❳ — {}: {}",
                        severity_badge(a.severity, color),
                        team,
                        a.platform,
                        a.id,
                        a.title,
                        a.description
                    );
                }
            }
            let mut summary = format!(
                "— Summary — total={} critical={} warning={} info={}",
                eval.counts.total, eval.counts.critical, eval.counts.warning, eval.counts.info
            );
            if shown.len() != eval.counts.total {
                summary.push_str(&format!(" shown={}", shown.len()));
            }
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

/// Compose alerts JSON object (pure) for testing/snapshot purposes.
pub fn compose_alerts_json(eval: &Evaluation, shown: &[&Alert]) -> JsonVal {
    json!({
        "alerts": shown,
        "summary": {
            "total": eval.counts.total,
            "critical": eval.counts.critical,
            "warning": eval.counts.warning,
            "info": eval.counts.info,
            "shown": shown.len(),
        }
    })
}

/// Print the dashboard view.
pub fn print_dashboard(view: &DashboardView, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_dashboard_json(view)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            let title = if color {
                view.title.clone().bold().to_string()
            } else {
                view.title.clone()
            };
            println!("— {} —", title);
            println!(
                "Average Velocity: {:.0}% ({})  last sprint {:.0}%  trend {:+.0}",
                view.avg_velocity,
                paint_status(view.velocity_status, color),
                view.current_velocity,
                view.velocity_trend
            );
            if view.velocity_status != Status::Good {
                println!("  ▲ Velocity below target. Review sprint planning.");
            }
            println!(
                "Avg Cycle Time: {:.1}d  median {:.1}d  trend {:+.0}%",
                view.avg_cycle_time, view.median_cycle_time, view.cycle_time_trend
            );
            println!(
                "Bug Burn-down {}: {} open, target {} (baseline {})  progress {:.1}%",
                view.burndown.quarter,
                view.burndown.current,
                view.burndown.target,
                view.burndown.baseline,
                view.burndown_progress_pct
            );
            println!();
            for s in &view.velocity {
                println!(
                    "  {:<16} planned {:>3}  completed {:>3}  {:>3}%",
                    s.sprint, s.planned, s.completed, s.pct
                );
            }
            println!();
            for w in &view.cycle_time {
                println!(
                    "  {:<4} avg {:>5.1}d  median {:>5.1}d  p90 {:>5.1}d",
                    w.week, w.avg, w.median, w.p90
                );
            }
            println!();
            println!(
                "  {:<20} {:<8} {:>5} {:>7} {:>5} {:>6}  {}",
                "Team", "Platform", "Vel", "CT", "Bugs", "Trend", "Status"
            );
            for r in &view.summary {
                println!(
                    "  {:<20} {:<8} {:>4.0}% {:>6.1}d {:>+5} {:>6}  {}",
                    r.team,
                    r.platform.to_string(),
                    r.velocity,
                    r.cycle_time,
                    r.bug_burn_delta,
                    r.trend.glyph(),
                    paint_status(r.status, color)
                );
            }
        }
    }
}

/// Compose dashboard JSON object (pure) for testing/snapshot purposes.
pub fn compose_dashboard_json(view: &DashboardView) -> JsonVal {
    serde_json::to_value(view).unwrap()
}

/// Print the monthly report.
pub fn print_report(report: &MonthlyReport, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap()
        ),
        _ => {
            let color = use_colors(output);
            let header = format!("Monthly Report — {} — {}", report.month_label, report.team);
            if color {
                println!("{}", header.bold());
            } else {
                println!("{}", header);
            }
            let v = &report.velocity;
            println!(
                "Velocity: avg {:.0}%  completed {} of {} SP  trend {:+.0}% vs month start",
                v.avg_velocity, v.total_completed, v.total_planned, v.trend_pct
            );
            for s in &v.sprints {
                println!(
                    "  {:<16} planned {:>3}  completed {:>3}  {:>3}%",
                    s.sprint, s.planned, s.completed, s.pct
                );
            }
            println!("  💡 {}", v.insight);
            println!();
            let ct = &report.cycle_time;
            println!(
                "Cycle Time: median {:.1}d  average {:.1}d",
                ct.overall_median, ct.overall_avg
            );
            println!("  By issue type:");
            for row in &ct.by_type {
                println!(
                    "    {:<8} avg {:>5.1}d  median {:>5.1}d  ({} issues)",
                    row.issue_type, row.avg, row.median, row.count
                );
            }
            println!("  By stage:");
            for row in &ct.by_stage {
                println!("    {:<12} {:>5.1}d  {:>3}%", row.stage, row.avg, row.pct);
            }
            let bottleneck = format!("  ⚠️ Bottleneck: {}", ct.bottleneck);
            if color {
                println!("{}", bottleneck.red());
            } else {
                println!("{}", bottleneck);
            }
            println!("  💡 {}", ct.insight);
        }
    }
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &MonthlyReport) -> JsonVal {
    serde_json::to_value(report).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_dashboard;
    use crate::engine::{evaluate_all, AlertFilter};
    use crate::models::summary::StatusThresholds;
    use crate::report::build_report;
    use crate::store::MetricsStore;
    use chrono::TimeZone;

    fn eval() -> Evaluation {
        let store = MetricsStore::seed();
        let ts = chrono::Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap();
        evaluate_all(&store, ts)
    }

    #[test]
    fn test_compose_alerts_json_shape() {
        let eval = eval();
        let shown = AlertFilter::default().apply(&eval.alerts);
        let out = compose_alerts_json(&eval, &shown);
        assert_eq!(out["summary"]["total"], eval.counts.total);
        assert_eq!(out["summary"]["shown"], eval.counts.total);
        assert_eq!(out["alerts"].as_array().unwrap().len(), eval.counts.total);
        // Records keep their full field set.
        assert!(out["alerts"][0]["id"].is_string());
        assert!(out["alerts"][0]["severity"].is_string());
        assert!(out["alerts"][0]["generated_at"].is_string());
    }

    #[test]
    fn test_compose_alerts_json_filtered_subset() {
        let eval = eval();
        let filter = AlertFilter {
            severity: Some(Severity::Critical),
            ..AlertFilter::default()
        };
        let shown = filter.apply(&eval.alerts);
        let out = compose_alerts_json(&eval, &shown);
        assert_eq!(out["summary"]["shown"], eval.counts.critical);
        assert_eq!(out["summary"]["total"], eval.counts.total);
        for a in out["alerts"].as_array().unwrap() {
            assert_eq!(a["severity"], "critical");
        }
    }

    #[test]
    fn test_compose_dashboard_json_shape() {
        let store = MetricsStore::seed();
        let view = build_dashboard(&store, None, None, &StatusThresholds::default());
        let out = compose_dashboard_json(&view);
        assert_eq!(out["title"], "All Teams (Median)");
        assert_eq!(out["summary"].as_array().unwrap().len(), 16);
        assert_eq!(out["velocity_status"], "good");
    }

    #[test]
    fn test_compose_report_json_shape() {
        let store = MetricsStore::seed();
        let report =
            build_report(&store, None, "2026-01", &StatusThresholds::default()).unwrap();
        let out = compose_report_json(&report);
        assert_eq!(out["month_label"], "January 2026");
        assert_eq!(out["cycle_time"]["bottleneck"], "Development");
        assert_eq!(out["velocity"]["sprints"].as_array().unwrap().len(), 3);
    }
}
