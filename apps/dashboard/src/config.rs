use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sitecam_shared::telemetry::LogFormat;

#[derive(Debug, Parser)]
#[clap(name = "sitecam", about = "Project photo dashboard", version)]
pub struct Config {
    #[clap(long, env = "SITECAM_ENV", default_value_t = String::from("development"))]
    pub env: String,

    #[clap(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,

    #[clap(long, env = "SITECAM_REPORT_DIR", default_value = ".")]
    pub report_dir: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List projects, optionally searched and filtered by category
    Projects {
        #[clap(long, short, default_value = "")]
        search: String,
        /// All, Commercial, Residential, Industrial, or any other category
        #[clap(long, short, default_value = "All")]
        filter: String,
        /// Create a project with this title before listing
        #[clap(long, value_name = "TITLE")]
        add: Option<String>,
        #[clap(long, requires = "add")]
        address: Option<String>,
        /// Category of the new project (Commercial when omitted)
        #[clap(long, requires = "add")]
        category: Option<String>,
        #[clap(long)]
        json: bool,
    },
    /// Show notifications and the unread count
    Notifications {
        /// Mark one notification as read
        #[clap(long, value_name = "ID")]
        mark_read: Vec<i64>,
        #[clap(long)]
        mark_all_read: bool,
        #[clap(long)]
        json: bool,
    },
    /// Show the signed-in user
    Whoami {
        #[clap(long)]
        role: Option<String>,
        #[clap(long)]
        company: Option<String>,
        #[clap(long, conflicts_with_all = ["role", "company"])]
        logout: bool,
        #[clap(long)]
        json: bool,
    },
    /// Upload photos to a project and export its PDF report
    Report {
        #[clap(long, short)]
        project: u32,
        /// Image files to attach before exporting
        photos: Vec<PathBuf>,
    },
}
