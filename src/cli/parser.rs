use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rattendlog
#[derive(Parser)]
#[command(
    name = "rattendlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Faculty attendance from time-in/time-out logs: pairing, lateness, daily stats and reports",
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

    /// Manage the roster (faculty and administrators)
    User {
        #[arg(long = "add", value_name = "USER_ID", help = "Add or update a user")]
        add: Option<String>,

        #[arg(long, requires = "add", help = "Role: FACULTY (default) or ADMIN")]
        role: Option<String>,

        #[arg(long = "first", requires = "add")]
        first_name: Option<String>,

        #[arg(long = "last", requires = "add")]
        last_name: Option<String>,

        #[arg(long, requires = "add")]
        email: Option<String>,

        #[arg(long = "picture", requires = "add", help = "Profile picture URL")]
        picture: Option<String>,

        #[arg(
            long = "import",
            value_name = "FILE",
            help = "Import users from a JSON array as returned by the roster endpoint"
        )]
        import: Option<String>,

        #[arg(long = "del", value_name = "USER_ID", help = "Remove a user from the roster")]
        del: Option<String>,

        #[arg(long = "list", help = "List all users")]
        list: bool,
    },

    /// Record a time-in or time-out entry
    Add {
        /// User id
        user: String,

        /// Entry type: in | out
        kind: String,

        #[arg(long, help = "Date of the entry (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long, help = "Time of the entry (HH:MM, default now)")]
        time: Option<String>,

        #[arg(long = "image", help = "Verification photo URL")]
        image: Option<String>,
    },

    /// List reconciled time-in/time-out pairs with their status
    List {
        #[arg(
            long,
            short,
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, start:end)"
        )]
        period: Option<String>,

        #[arg(long, help = "Single day (YYYY-MM-DD)", conflicts_with = "period")]
        date: Option<String>,

        #[arg(long, help = "Only this user")]
        user: Option<String>,

        #[arg(long = "today", help = "Show only today's records", conflicts_with_all = ["period", "date"])]
        now: bool,
    },

    /// Present / late / absent counts for a day or a period
    Stats {
        #[arg(long, help = "Day to summarize (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long, short, conflicts_with = "date", help = "Per-day counts over a period")]
        period: Option<String>,

        #[arg(long = "from", conflicts_with_all = ["date", "period"], help = "Range start (YYYY-MM-DD)")]
        from: Option<String>,

        #[arg(long = "to", conflicts_with_all = ["date", "period"], help = "Range end (YYYY-MM-DD)")]
        to: Option<String>,
    },

    /// Daily overview: counts, late faculty, missing time-ins, events
    Dashboard {
        #[arg(long, help = "Day to show (YYYY-MM-DD, default today)")]
        date: Option<String>,
    },

    /// Show or change the late threshold and the time-in window
    ///
    /// Changes are authorized against the roster: the `--as` user must be
    /// an ADMIN there. The id is taken on trust from the command line; this
    /// is an authorization check, not authentication.
    Threshold {
        #[arg(long = "print", help = "Print the current thresholds")]
        print: bool,

        #[arg(long = "late", value_name = "HH:MM")]
        late: Option<String>,

        #[arg(long = "window-start", value_name = "HH:MM")]
        window_start: Option<String>,

        #[arg(long = "window-end", value_name = "HH:MM")]
        window_end: Option<String>,

        #[arg(
            long = "as",
            value_name = "USER_ID",
            help = "Acting administrator (checked against the roster role, not authenticated)"
        )]
        principal: Option<String>,
    },

    /// Scheduled events and their status
    Events {
        #[arg(long = "add", value_name = "TITLE")]
        add: Option<String>,

        #[arg(long, requires = "add", value_name = "YYYY-MM-DD HH:MM")]
        start: Option<String>,

        #[arg(long, requires = "add", help = "Duration (2h, 90m, 1h 30m, 01:30)")]
        duration: Option<String>,

        #[arg(long = "list", help = "List events with stored and current status")]
        list: bool,

        #[arg(long = "sync", help = "Correct stored statuses that disagree with the clock")]
        sync: bool,
    },

    /// Export the attendance report
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Follow the log store and print the daily counts on every change
    Watch {
        #[arg(long, help = "Day to follow (YYYY-MM-DD, default today)")]
        date: Option<String>,

        #[arg(long, help = "Stop after this many updates")]
        count: Option<usize>,

        #[arg(long = "interval", value_name = "MS", help = "Poll interval in milliseconds")]
        interval_ms: Option<u64>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
