//! Shared data models: alert records, team/series types, summary rows.

pub mod summary;
pub mod team;

use crate::models::team::Platform;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Alert priority, ordered critical < warning < info. `Info` is the
/// positive level ("top performer" style alerts).
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Section heading used by the human printer.
    pub fn heading(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Warning => "Warning",
            Severity::Info => "Info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "critical" | "crit" => Ok(Severity::Critical),
            "warning" | "warn" => Ok(Severity::Warning),
            "info" | "success" => Ok(Severity::Info),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
/// What a rule measures: sprint velocity, cycle time, or team health.
pub enum Category {
    #[serde(rename = "velocity")]
    Velocity,
    #[serde(rename = "cycletime")]
    CycleTime,
    #[serde(rename = "health")]
    TeamHealth,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Velocity => "Velocity",
            Category::CycleTime => "Cycle Time",
            Category::TeamHealth => "Team Health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "velocity" => Ok(Category::Velocity),
            "cycletime" => Ok(Category::CycleTime),
            "health" | "teamhealth" => Ok(Category::TeamHealth),
            other => Err(format!("unknown category '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// A single alert produced by one rule for one team. Created fresh on
/// every evaluation pass, never mutated in place.
pub struct Alert {
    pub id: String,
    pub team: String,
    pub team_key: String,
    pub platform: Platform,
    pub category: Category,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub value: f64,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
/// Aggregate counts over the full (unfiltered) alert set.
pub struct AlertCounts {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub info: usize,
}

impl AlertCounts {
    pub fn tally(alerts: &[Alert]) -> Self {
        let mut counts = AlertCounts {
            total: alerts.len(),
            critical: 0,
            warning: 0,
            info: 0,
        };
        for a in alerts {
            match a.severity {
                Severity::Critical => counts.critical += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize)]
/// Result of one evaluation pass: severity-ordered alerts plus counts.
pub struct Evaluation {
    pub alerts: Vec<Alert>,
    pub counts: AlertCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_is_ordered_critical_first() {
        assert!(Severity::Critical < Severity::Warning);
        assert!(Severity::Warning < Severity::Info);
    }

    #[test]
    fn test_severity_parse_aliases() {
        assert_eq!("crit".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("success".parse::<Severity>().unwrap(), Severity::Info);
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn test_category_parse_aliases() {
        assert_eq!("velocity".parse::<Category>().unwrap(), Category::Velocity);
        assert_eq!("cycle-time".parse::<Category>().unwrap(), Category::CycleTime);
        assert_eq!("health".parse::<Category>().unwrap(), Category::TeamHealth);
        assert!("morale".parse::<Category>().is_err());
    }
}
