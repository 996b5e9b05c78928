use clap::{Parser, Subcommand};

/// Command-line interface definition for the training planner
#[derive(Parser)]
#[command(
    name = "tplanner",
    version = env!("CARGO_PKG_VERSION"),
    about = "Plan a weekly training program: generate monthly sessions, assign trainers, collect availability and export ICS calendars",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Act as this trainer id (overrides `current_user` from the config)
    #[arg(global = true, long = "user", short = 'u')]
    pub user: Option<i64>,

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

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
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

        #[arg(long = "check", help = "Check database integrity and orphaned rows")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,

        #[arg(
            long = "prune-orphans",
            help = "Delete availability entries whose session no longer exists"
        )]
        prune_orphans: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage trainers
    Trainer {
        #[command(subcommand)]
        action: TrainerAction,
    },

    /// Generate the sessions of a month from the weekly template
    Generate {
        /// Month to generate (YYYY-MM)
        month: String,
    },

    /// List or delete sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Assign trainers to sessions
    Assign {
        /// Assignments as SESSION=TRAINER; an empty trainer or `none` clears
        #[arg(required = true, value_name = "SESSION=TRAINER")]
        assignments: Vec<String>,

        /// Publish the plan of this month (YYYY-MM) after saving
        #[arg(long = "publish", value_name = "YYYY-MM")]
        publish: Option<String>,
    },

    /// Publish a month's plan
    Publish {
        /// Month to publish (YYYY-MM)
        month: String,
    },

    /// Record your availability for sessions
    Avail {
        /// Votes as SESSION=STATUS with STATUS one of Yes, Maybe, No
        #[arg(required = true, value_name = "SESSION=STATUS")]
        entries: Vec<String>,

        #[arg(long = "comment", help = "Comment stored with every entry")]
        comment: Option<String>,
    },

    /// Confirm sessions you are assigned to
    Confirm {
        /// Session ids to confirm
        #[arg(required = true)]
        sessions: Vec<i64>,
    },

    /// Show your sessions, votes and assignments for a month
    Dashboard {
        #[arg(long, short, value_name = "YYYY-MM", help = "Month to show (default: current)")]
        month: Option<String>,
    },

    /// Planning view: sessions, assignees and everybody's availability
    Plan {
        #[arg(long, short, value_name = "YYYY-MM", help = "Month to show (default: current)")]
        month: Option<String>,
    },

    /// Export the assigned sessions of a month as an ICS calendar
    Export {
        /// Month to export (YYYY-MM)
        month: String,

        #[arg(long, value_name = "FILE", help = "Output file (default: training_plan_YYYY_M.ics)")]
        file: Option<String>,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,

        #[arg(long = "stdout", help = "Write the calendar to stdout instead of a file")]
        stdout: bool,
    },
}

#[derive(Subcommand)]
pub enum TrainerAction {
    /// Add a trainer
    Add {
        /// Display name
        name: String,

        #[arg(long = "admin", help = "Grant planning rights")]
        admin: bool,
    },

    /// List trainers
    List,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// List the sessions of a month
    List {
        #[arg(long, short, value_name = "YYYY-MM", help = "Month to list (default: current)")]
        month: Option<String>,

        #[arg(long = "json", help = "Print as JSON")]
        json: bool,
    },

    /// List upcoming sessions from today on
    Upcoming {
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },

    /// Delete a session by id
    Del {
        id: i64,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
