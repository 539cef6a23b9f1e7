use crate::core::analytics::options::ShiftStrategy;
use crate::core::import::ImportFormat;
use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for weighlog
/// CLI application to analyse weighbridge transactions with SQLite
#[derive(Parser)]
#[command(
    name = "weighlog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Import weighbridge exports and report on counts, fines and impounds per person, group, shift and day",
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
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

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

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "last", value_name = "N", help = "Only show the last N rows")]
        last: Option<usize>,
    },

    /// Import a CSV, spreadsheet or JSON file as a new upload
    Import {
        /// File to import
        file: String,

        #[arg(long, value_enum, default_value = "auto")]
        format: ImportFormat,

        #[arg(long, value_name = "NAME", help = "Worksheet to read (default: first)")]
        sheet: Option<String>,
    },

    /// List stored uploads or delete one
    Uploads {
        #[arg(long = "delete", value_name = "ID", help = "Delete an upload and its records")]
        delete: Option<i64>,
    },

    /// Assign people to groups and shifts
    Assign {
        /// Person name, exactly as it appears in the data
        #[arg(required_unless_present_any = ["list", "import", "export"])]
        person: Option<String>,

        #[arg(long, conflicts_with = "clear_group")]
        group: Option<String>,

        #[arg(long, conflicts_with = "clear_shift")]
        shift: Option<String>,

        #[arg(long = "clear-group")]
        clear_group: bool,

        #[arg(long = "clear-shift")]
        clear_shift: bool,

        #[arg(long, help = "Remove the person from both mappings")]
        remove: bool,

        #[arg(long, help = "List all assignments")]
        list: bool,

        #[arg(long, value_name = "FILE", help = "Merge a personToGroup/personToShift JSON file")]
        import: Option<String>,

        #[arg(long, value_name = "FILE", help = "Write assignments as JSON")]
        export: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Compute and print the analytics report
    Report {
        #[arg(long, short, help = "Filter by year/month/day or a custom range")]
        period: Option<String>,

        #[arg(long, value_name = "ID", help = "Only records from this upload")]
        upload: Option<i64>,

        #[arg(long, help = "Print the report as JSON (per-entity aggregates are ordered arrays keyed by `key`)")]
        json: bool,

        #[arg(long = "shift-strategy", value_enum)]
        shift_strategy: Option<ShiftStrategy>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export records or the report
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
        period: Option<String>,

        #[arg(long, value_name = "ID", help = "Only records from this upload")]
        upload: Option<i64>,

        #[arg(long, help = "Export the aggregated report instead of records")]
        report: bool,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
