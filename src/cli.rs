//! Command-line options.
//!
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "user-dashboard", version, about = "Manage an in-memory list of users from the terminal")]
pub struct Cli {
    /// Theme file (key = #RRGGBB). Created with defaults when missing.
    #[arg(long, env = "USER_DASHBOARD_THEME", default_value = "theme.conf")]
    pub theme: PathBuf,

    /// Keybindings file (Action = KeySpec). Created with defaults when missing.
    #[arg(long, env = "USER_DASHBOARD_KEYBINDS", default_value = "keybinds.conf")]
    pub keybinds: PathBuf,

    /// Write logs to this file. Logging is off without it, since stdout belongs to the UI.
    #[arg(long, env = "USER_DASHBOARD_LOG")]
    pub log_file: Option<PathBuf>,
}
