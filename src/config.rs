//! Configuration discovery and effective settings resolution.
//!
//! Omniboard reads `omniboard.toml|yaml|yml` from the start directory
//! (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `output`: `human`
//! - `platform`: none (all platforms)
//! - `thresholds.goodMin|warningMin`: 60/45
//! - `thresholds.trendEpsilon`: 0
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::models::summary::StatusThresholds;
use crate::models::team::Platform;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Status-policy overrides under `[thresholds]`.
pub struct ThresholdsCfg {
    #[serde(rename = "goodMin")]
    pub good_min: Option<f64>,
    #[serde(rename = "warningMin")]
    pub warning_min: Option<f64>,
    #[serde(rename = "trendEpsilon")]
    pub trend_epsilon: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `omniboard.toml|yaml`.
pub struct BoardConfig {
    pub output: Option<String>,
    pub platform: Option<String>,
    #[serde(default)]
    pub thresholds: Option<ThresholdsCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying
/// precedence.
pub struct Effective {
    pub root: PathBuf,
    pub output: String,
    pub platform: Option<Platform>,
    pub thresholds: StatusThresholds,
}

/// Walk upward from `start` to detect the working root.
///
/// Stops when an `omniboard.toml|yaml|yml` or a `.git` directory is
/// found; otherwise returns `start` itself.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("omniboard.toml").exists()
            || cur.join("omniboard.yaml").exists()
            || cur.join("omniboard.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `BoardConfig` from `omniboard.toml` or `omniboard.yaml|yml` if
/// present.
pub fn load_config(root: &Path) -> Option<BoardConfig> {
    let toml_path = root.join("omniboard.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: BoardConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["omniboard.yaml", "omniboard.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: BoardConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and
/// defaults. A config `platform` that does not name a known platform
/// (e.g. "all") clears the filter.
pub fn resolve_effective(
    cli_root: Option<&str>,
    cli_output: Option<&str>,
    cli_platform: Option<Platform>,
) -> Effective {
    let start = PathBuf::from(cli_root.unwrap_or("."));
    let root = detect_root(&start);
    let cfg = load_config(&root).unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let platform = cli_platform.or_else(|| cfg.platform.as_deref().and_then(|p| p.parse().ok()));

    let overrides = cfg.thresholds.unwrap_or_default();
    let defaults = StatusThresholds::default();
    let thresholds = StatusThresholds {
        good_min: overrides.good_min.unwrap_or(defaults.good_min),
        warning_min: overrides.warning_min.unwrap_or(defaults.warning_min),
        trend_epsilon: overrides.trend_epsilon.unwrap_or(defaults.trend_epsilon),
    };

    Effective {
        root,
        output,
        platform,
        thresholds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("omniboard.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
platform = "iOS"
[thresholds]
goodMin = 75.0
warningMin = 60.0
    "#
        )
        .unwrap();

        // Resolve using explicit root to avoid global CWD races
        let eff = resolve_effective(root.to_str(), None, None);
        assert_eq!(eff.output, "json");
        assert_eq!(eff.platform, Some(Platform::Ios));
        assert_eq!(eff.thresholds.good_min, 75.0);
        assert_eq!(eff.thresholds.warning_min, 60.0);
        // trendEpsilon falls back to the default when unspecified
        assert_eq!(eff.thresholds.trend_epsilon, 0.0);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("omniboard.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output: human
thresholds:
  trendEpsilon: 1.5
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, None);
        assert_eq!(eff.output, "human");
        assert!(eff.platform.is_none());
        assert_eq!(eff.thresholds.good_min, 60.0);
        assert_eq!(eff.thresholds.warning_min, 45.0);
        assert_eq!(eff.thresholds.trend_epsilon, 1.5);
    }

    #[test]
    fn test_cli_takes_precedence_over_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("omniboard.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
platform = "Web"
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), Some("human"), Some(Platform::Android));
        assert_eq!(eff.output, "human");
        assert_eq!(eff.platform, Some(Platform::Android));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let eff = resolve_effective(dir.path().to_str(), None, None);
        assert_eq!(eff.output, "human");
        assert!(eff.platform.is_none());
        assert_eq!(eff.thresholds, StatusThresholds::default());
    }

    #[test]
    fn test_config_platform_all_clears_filter() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("omniboard.toml")).unwrap();
        writeln!(f, "{}", r#"platform = "all""#).unwrap();
        let eff = resolve_effective(root.to_str(), None, None);
        assert!(eff.platform.is_none());
    }
}
