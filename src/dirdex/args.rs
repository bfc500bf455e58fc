use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dirdex")]
#[command(about = "Browse, filter and export the awesome-directories catalog", long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Bypass the local cache and refetch from the remote
    #[arg(long, global = true)]
    pub refresh: bool,

    /// Enable debug logging
    #[arg(long, global = true, env = "DIRDEX_DEBUG")]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = clap::builder::FalseyValueParser::new())]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search directories by name or description
    Search {
        query: String,

        /// Limit number of results
        #[arg(short, long, default_value_t = 50)]
        limit: usize,

        /// Sort by: helpful, dr, newest, alpha
        #[arg(short, long, default_value = "helpful")]
        sort: String,
    },

    /// List all directories
    #[command(alias = "ls")]
    List {
        /// Filter by category (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Limit number of results
        #[arg(short, long, default_value_t = 50)]
        limit: usize,

        /// Offset for pagination
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Sort by: helpful, dr, newest, alpha
        #[arg(short, long, default_value = "helpful")]
        sort: String,
    },

    /// Filter directories with advanced criteria
    Filter {
        /// Filter by category (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Filter by pricing: free, paid, freemium (repeatable)
        #[arg(short, long)]
        pricing: Vec<String>,

        /// Filter by link type: dofollow, nofollow (repeatable)
        #[arg(long)]
        link_type: Vec<String>,

        /// Minimum domain rating
        #[arg(long)]
        dr_min: Option<u32>,

        /// Maximum domain rating
        #[arg(long)]
        dr_max: Option<u32>,

        /// Search query
        #[arg(short, long)]
        query: Option<String>,

        /// Limit number of results
        #[arg(short, long, default_value_t = 50)]
        limit: usize,

        /// Sort by: helpful, dr, newest, alpha
        #[arg(short, long, default_value = "helpful")]
        sort: String,
    },

    /// Show detailed information about a directory
    Show { slug: String },

    /// Export directories to a file
    Export {
        /// Export format: csv, json, markdown
        #[arg(short, long)]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: std::path::PathBuf,

        /// Filter by category (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Filter by pricing (repeatable)
        #[arg(short, long)]
        pricing: Vec<String>,

        /// Minimum domain rating
        #[arg(long)]
        dr_min: Option<u32>,
    },

    /// Sync the local cache with the remote catalog
    Sync,

    /// Manage configuration and the local cache
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration and cache status
    Show,
    /// Clear the local cache
    ClearCache,
}
