use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "shiftdeck")]
#[command(about = "Admin console for workforce time-clock data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CLI profile name for API endpoint/token configuration
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List time-clock entries for a date range
    Entries {
        /// Range start, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        from: String,
        /// Range end, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        to: String,
        /// Keep only entries for this user id
        #[arg(long)]
        user: Option<i64>,
        /// Keep only entries for this shift id
        #[arg(long)]
        shift: Option<i64>,
        /// Substring match on user and shift names
        #[arg(long)]
        search: Option<String>,
        /// Sort column
        #[arg(long, value_enum, default_value_t = SortColumn::Date)]
        sort: SortColumn,
        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page
        #[arg(long, default_value = "25")]
        per_page: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List overlap conflicts for a date range with their classification
    Conflicts {
        /// Range start, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        from: String,
        /// Range end, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        to: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a conflict by cutting or deleting a worklog
    Resolve {
        #[command(subcommand)]
        command: ResolveCommands,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ResolveCommands {
    /// Trim one worklog of a conflict around the other, previewing first
    Cut {
        /// Range start, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        from: String,
        /// Range end, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        to: String,
        /// Conflict number as shown by `shiftdeck conflicts` (1-based)
        #[arg(long, value_name = "N")]
        conflict: usize,
        /// Item to cut (1-based); defaults to the longer item
        #[arg(long, value_name = "N")]
        item: Option<usize>,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete one worklog of a conflict outright, previewing first
    Delete {
        /// Range start, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        from: String,
        /// Range end, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        to: String,
        /// Conflict number as shown by `shiftdeck conflicts` (1-based)
        #[arg(long, value_name = "N")]
        conflict: usize,
        /// Item to delete (1-based)
        #[arg(long, value_name = "N")]
        item: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update a profile
    Init {
        /// API base URL, e.g. https://api.example.com
        #[arg(long, value_name = "URL")]
        api_base_url: String,
        /// Bearer token for API calls
        #[arg(long, value_name = "TOKEN")]
        access_token: Option<String>,
        /// Acting admin user id
        #[arg(long)]
        user_id: Option<i64>,
    },
    /// Show the resolved profile (token redacted)
    Show,
    /// Print the config file path
    Path,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SortColumn {
    Date,
    User,
    Shift,
    Total,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
