//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "omniboard",
    version,
    about = "Omniboard v2 (Rust + seed datasets)",
    long_about = "Omniboard — delivery metrics for software teams: dashboards, alert rules, and monthly reports over static seed datasets.\n\nConfiguration precedence: CLI > omniboard.toml > defaults.",
    after_help = "Examples:\n  omniboard alerts --severity critical\n  omniboard dashboard --team SURF\n  omniboard report --month 2026-01 --output json\n  omniboard prefs set selectedPlatform iOS",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for alerts, dashboards, reports, and prefs.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current omniboard version."
    )]
    Version,
    /// Evaluate alert rules for all teams
    #[command(
        about = "Run the alert rule engine",
        long_about = "Evaluate the fixed rule set against every team's velocity and cycle-time series. Filters combine with AND semantics and never change the counts.",
        after_help = "Examples:\n  omniboard alerts\n  omniboard alerts --category velocity --platform Web\n  omniboard alerts --severity critical --check"
    )]
    Alerts {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Filter by category: velocity|cycletime|health")]
        category: Option<String>,
        #[arg(long, help = "Filter by severity: critical|warning|info")]
        severity: Option<String>,
        #[arg(long, help = "Filter by platform (e.g. iOS, Web, all)")]
        platform: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero when critical alerts remain after filtering")]
        check: bool,
    },
    /// Render the aggregate or single-team dashboard
    #[command(
        about = "Render the dashboard",
        long_about = "Show the all-teams (median) dashboard, or a single team's with --team. The selection is remembered across runs.",
        after_help = "Examples:\n  omniboard dashboard\n  omniboard dashboard --team SURF\n  omniboard dashboard --platform Web --output json"
    )]
    Dashboard {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Team key (e.g. SURF); omit for all teams")]
        team: Option<String>,
        #[arg(long, help = "Summary table platform filter (e.g. iOS, all)")]
        platform: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Build a monthly report
    #[command(
        about = "Build a monthly report",
        long_about = "Velocity analysis and cycle-time breakdown for a month, for all teams or one team.",
        after_help = "Examples:\n  omniboard report\n  omniboard report --month 2025-12 --team CNG"
    )]
    Report {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
        #[arg(long, help = "Month id (e.g. 2026-01; default: newest)")]
        month: Option<String>,
        #[arg(long, help = "Team key (e.g. SURF); omit for all teams")]
        team: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Preference management (get/set/ls/clear)
    Prefs {
        #[command(subcommand)]
        cmd: PrefsCmd,
    },
}

#[derive(Subcommand)]
/// Subcommands for `omniboard prefs`
pub enum PrefsCmd {
    /// Print one preference value
    #[command(
        about = "Print a preference",
        long_about = "Print the stored value for one preference key."
    )]
    Get {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
        #[arg(help = "Preference key (e.g. selectedPlatform)")]
        key: String,
    },
    /// Set a preference value
    #[command(
        about = "Set a preference",
        long_about = "Store a value for one preference key under .omniboard/prefs.json."
    )]
    Set {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
        #[arg(help = "Preference key (e.g. theme)")]
        key: String,
        #[arg(help = "Value to store")]
        value: String,
    },
    /// List all preferences
    #[command(about = "List preferences", long_about = "List every stored preference key.")]
    Ls {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
    },
    /// Reset all preferences
    #[command(
        about = "Reset preferences",
        long_about = "Reset every preference to its default."
    )]
    Clear {
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
    },
}
