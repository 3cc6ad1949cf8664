use crate::export::ExportFormat;
use crate::models::metric::MetricKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for kpidesk
/// Daily KPI collection desk backed by SQLite
#[derive(Parser)]
#[command(
    name = "kpidesk",
    version = env!("CARGO_PKG_VERSION"),
    about = "Daily KPI collection desk: role-based uploads, dashboard and overdue alerts on SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Run configuration file migrations if needed")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "op", help = "Only rows for this operation (upload, check, violation, ...)")]
        operation: Option<String>,
    },

    /// Manage the user directory
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Show the form keys a role submits
    Fields {
        #[arg(long = "role", help = "Role code (balance, interest, payables, ..., plant)")]
        role: String,
    },

    /// Submit KPI figures as KEY=VALUE pairs
    Upload {
        #[arg(long = "user", help = "Submitting username")]
        user: String,

        /// Day the submission is made on (YYYY-MM-DD, default: today)
        #[arg(long = "date")]
        date: Option<String>,

        /// Form values, e.g. `supplied=12.5 total=40`
        #[arg(value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Show the latest figures
    Dashboard {
        #[arg(long = "date", help = "Day for bank balances (YYYY-MM-DD, default: today)")]
        date: Option<String>,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// Detect missed submissions and queue overdue alerts
    Check {
        #[arg(long = "date", help = "Day to check (YYYY-MM-DD, default: today)")]
        date: Option<String>,

        #[arg(long = "dry-run", help = "List violations without notifying anyone")]
        dry_run: bool,
    },

    /// Queue the morning upload reminder for every uploader
    Remind,

    /// Inspect the notification outbox
    Outbox {
        #[arg(long = "print", help = "Print queued notifications")]
        print: bool,

        #[arg(long = "all", help = "Include notifications already handed to the relay")]
        all: bool,

        #[arg(long = "mark-sent", help = "Mark every queued notification as sent")]
        mark_sent: bool,
    },

    /// Run the daily reminder and overdue check at the configured times
    Schedule,

    /// Export stored records of one metric
    Export {
        #[arg(long, value_enum, help = "Metric to export")]
        metric: MetricKind,

        #[arg(long, value_enum, default_value_t = ExportFormat::Csv, help = "Output format")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE", help = "Absolute path of the output file")]
        file: String,

        #[arg(
            long,
            help = "all, YYYY, YYYY-MM, YYYY-MM-DD or start:end of the same shape"
        )]
        range: Option<String>,

        #[arg(long, help = "Overwrite the output file without asking")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a user
    Add {
        #[arg(long)]
        username: String,

        #[arg(long, help = "Role code (balance, interest, ..., plant, viewer)")]
        role: String,

        #[arg(long)]
        email: Option<String>,
    },

    /// List registered users
    List,

    /// Delete a user
    Del { username: String },

    /// Create the default roster (existing usernames are left untouched)
    Seed,
}
