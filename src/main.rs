//! Omniboard CLI binary entry point.
//! Delegates to modules for alerts/dashboard/report and prints results.

mod cli;
mod config;
mod dashboard;
mod engine;
mod models;
mod output;
mod prefs;
mod report;
mod stats;
mod store;
mod utils;

use crate::engine::AlertFilter;
use crate::models::team::Platform;
use crate::models::Severity;
use crate::prefs::{FilePrefs, PrefsAdapter, UiPreferences};
use crate::store::MetricsStore;
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands, PrefsCmd};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Alerts {
            root,
            category,
            severity,
            platform,
            output,
            check,
        } => {
            let cli_platform = platform.as_deref().map(parse_platform_arg);
            let eff = config::resolve_effective(
                root.as_deref(),
                output.as_deref(),
                cli_platform.flatten(),
            );
            note_missing_config(&eff.root);
            let prefs = FilePrefs::new(&eff.root).load();

            let filter = AlertFilter {
                category: category.as_deref().map(|s| parse_or_exit(s, "category")),
                severity: severity.as_deref().map(|s| parse_or_exit(s, "severity")),
                platform: effective_platform(cli_platform, &prefs, &eff),
            };

            let store = MetricsStore::seed();
            let eval = engine::evaluate_all(&store, Utc::now());
            let shown = filter.apply(&eval.alerts);
            output::print_alerts(&eval, &shown, &eff.output);
            if check && shown.iter().any(|a| a.severity == Severity::Critical) {
                std::process::exit(1);
            }
        }
        Commands::Dashboard {
            root,
            team,
            platform,
            output,
        } => {
            let cli_platform = platform.as_deref().map(parse_platform_arg);
            let eff = config::resolve_effective(
                root.as_deref(),
                output.as_deref(),
                cli_platform.flatten(),
            );
            note_missing_config(&eff.root);
            let prefs_store = FilePrefs::new(&eff.root);
            let prefs = prefs_store.load();

            let store = MetricsStore::seed();
            let selected = match team.as_deref() {
                Some(key) => match store.team_by_key(key) {
                    Some(t) => Some(t),
                    None => {
                        eprintln!(
                            "{} {}",
                            utils::note_prefix(),
                            format!("Unknown team key '{}'; showing all teams.", key)
                        );
                        None
                    }
                },
                None => {
                    let remembered = prefs.selected_team_id.and_then(|id| store.team_by_id(id));
                    if let Some(t) = remembered {
                        if eff.output != "json" {
                            eprintln!(
                                "{} {}",
                                utils::info_prefix(),
                                format!("Using remembered team '{}'.", t.key)
                            );
                        }
                    }
                    remembered
                }
            };
            let platform = effective_platform(cli_platform, &prefs, &eff);

            // Remember explicit selections for the next run.
            let mut updated = prefs.clone();
            let mut dirty = false;
            if let Some(choice) = cli_platform {
                updated.selected_platform = Some(match choice {
                    Some(p) => p.to_string(),
                    None => "all".to_string(),
                });
                dirty = true;
            }
            if team.is_some() {
                updated.selected_team_id = selected.map(|t| t.id);
                dirty = true;
            }
            if dirty {
                if let Err(e) = prefs_store.save(&updated) {
                    eprintln!(
                        "{} {}",
                        utils::note_prefix(),
                        format!("Could not save preferences: {}", e)
                    );
                }
            }

            let view = dashboard::build_dashboard(&store, selected, platform, &eff.thresholds);
            output::print_dashboard(&view, &eff.output);
        }
        Commands::Report {
            root,
            month,
            team,
            output,
        } => {
            let eff = config::resolve_effective(root.as_deref(), output.as_deref(), None);
            note_missing_config(&eff.root);
            let store = MetricsStore::seed();
            let selected = match team.as_deref() {
                Some(key) => match store.team_by_key(key) {
                    Some(t) => Some(t),
                    None => {
                        eprintln!(
                            "{} {}",
                            utils::note_prefix(),
                            format!("Unknown team key '{}'; reporting on all teams.", key)
                        );
                        None
                    }
                },
                None => None,
            };
            let month = month.as_deref().unwrap_or(report::MONTHS[0].0);
            match report::build_report(&store, selected, month, &eff.thresholds) {
                Some(r) => output::print_report(&r, &eff.output),
                None => {
                    let known: Vec<&str> = report::MONTHS.iter().map(|(m, _)| *m).collect();
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("Unknown month '{}'. Known months: {}", month, known.join(", "))
                    );
                    std::process::exit(2);
                }
            }
        }
        Commands::Prefs { cmd } => match cmd {
            PrefsCmd::Get { root, key } => {
                let eff = config::resolve_effective(root.as_deref(), None, None);
                if !prefs::KEYS.contains(&key.as_str()) {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("unknown preference key '{}'", key)
                    );
                    std::process::exit(2);
                }
                let prefs = FilePrefs::new(&eff.root).load();
                match prefs.get(&key) {
                    Some(v) => println!("{}", v),
                    None => println!("(unset)"),
                }
            }
            PrefsCmd::Set { root, key, value } => {
                let eff = config::resolve_effective(root.as_deref(), None, None);
                let store = FilePrefs::new(&eff.root);
                let mut prefs = store.load();
                if let Err(e) = prefs.set(&key, &value) {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    std::process::exit(2);
                }
                if let Err(e) = store.save(&prefs) {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("could not save preferences: {}", e)
                    );
                    std::process::exit(2);
                }
                println!("saved: {} = {}", key, value);
            }
            PrefsCmd::Ls { root } => {
                let eff = config::resolve_effective(root.as_deref(), None, None);
                let prefs = FilePrefs::new(&eff.root).load();
                for (key, value) in prefs.entries() {
                    println!("{} = {}", key, value.unwrap_or_else(|| "(unset)".to_string()));
                }
            }
            PrefsCmd::Clear { root } => {
                let eff = config::resolve_effective(root.as_deref(), None, None);
                let store = FilePrefs::new(&eff.root);
                if let Err(e) = store.save(&UiPreferences::default()) {
                    eprintln!(
                        "{} {}",
                        utils::error_prefix(),
                        format!("could not save preferences: {}", e)
                    );
                    std::process::exit(2);
                }
                println!("cleared");
            }
        },
    }
}

/// Parse a `--platform` argument. `all` clears the filter; an unknown
/// name is a usage error.
fn parse_platform_arg(s: &str) -> Option<Platform> {
    if s.eq_ignore_ascii_case("all") {
        return None;
    }
    match s.parse() {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(2);
        }
    }
}

fn parse_or_exit<T: std::str::FromStr<Err = String>>(s: &str, what: &str) -> T {
    match s.parse() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), format!("bad {}: {}", what, e));
            std::process::exit(2);
        }
    }
}

/// Platform filter precedence: CLI flag > stored preference > config.
fn effective_platform(
    cli_platform: Option<Option<Platform>>,
    prefs: &UiPreferences,
    eff: &config::Effective,
) -> Option<Platform> {
    match cli_platform {
        Some(choice) => choice,
        None => prefs
            .selected_platform
            .as_deref()
            .and_then(|s| s.parse().ok())
            .or(eff.platform),
    }
}

fn note_missing_config(root: &std::path::Path) {
    if config::load_config(root).is_none() {
        eprintln!(
            "{} {}",
            utils::note_prefix(),
            "No omniboard.toml found; using defaults."
        );
    }
}
