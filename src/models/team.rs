//! Team registry and per-team metric series types.
//!
//! Reference data is immutable after load: the store owns every series
//! and hands out shared references only.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Delivery platform a team ships on.
pub enum Platform {
    #[serde(rename = "iOS")]
    Ios,
    Android,
    Backend,
    Web,
    #[serde(rename = "DE")]
    De,
    #[serde(rename = "DS")]
    Ds,
}

impl Platform {
    /// All known platforms, in sidebar order.
    pub const ALL: [Platform; 6] = [
        Platform::Ios,
        Platform::Android,
        Platform::Backend,
        Platform::Web,
        Platform::De,
        Platform::Ds,
    ];
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
            Platform::Backend => "Backend",
            Platform::Web => "Web",
            Platform::De => "DE",
            Platform::Ds => "DS",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            "backend" => Ok(Platform::Backend),
            "web" => Ok(Platform::Web),
            "de" => Ok(Platform::De),
            "ds" => Ok(Platform::Ds),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// A team record: unique id, display name, platform, and short key.
pub struct Team {
    pub id: u32,
    pub name: String,
    pub platform: Platform,
    pub key: String,
}

impl Team {
    pub fn new(id: u32, name: &str, platform: Platform, key: &str) -> Self {
        Team {
            id,
            name: name.to_string(),
            platform,
            key: key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
/// One sprint of velocity data. `pct` is the completion percentage,
/// `round(100 * completed / planned)` within seed tolerance.
pub struct SprintVelocityPoint {
    pub sprint: String,
    pub planned: u32,
    pub completed: u32,
    pub pct: u32,
}

#[derive(Debug, Clone, Serialize)]
/// One week of cycle-time data in days; `median <= avg <= p90`.
pub struct CycleTimePoint {
    pub week: String,
    pub avg: f64,
    pub median: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize)]
/// Bug burn-down snapshot for a quarter; `target <= baseline`.
pub struct BugBurndown {
    pub baseline: u32,
    pub target: u32,
    pub current: u32,
    pub quarter: String,
}

impl BugBurndown {
    /// Progress toward the target as a percentage, unclamped: above 100
    /// on overachievement, negative when `current` exceeds `baseline`.
    /// A degenerate snapshot with `baseline == target` yields 0.
    pub fn progress_pct(&self) -> f64 {
        let span = f64::from(self.baseline) - f64::from(self.target);
        if span == 0.0 {
            return 0.0;
        }
        (f64::from(self.baseline) - f64::from(self.current)) / span * 100.0
    }
}

#[derive(Debug, Clone, Serialize)]
/// Everything the store holds for one team: the two series, the
/// burn-down snapshot, and precomputed summary averages.
pub struct TeamMetrics {
    pub velocity: Vec<SprintVelocityPoint>,
    pub cycle_time: Vec<CycleTimePoint>,
    pub burndown: BugBurndown,
    pub avg_velocity: f64,
    pub avg_cycle_time: f64,
}
