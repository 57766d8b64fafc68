use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(name = "thrive-migrate")]
#[command(about = "Apply SQL migrations to a hosted Postgres project over its RPC endpoint")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be used multiple times)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project base URL (overrides VITE_SUPABASE_URL)
    #[arg(long, global = true)]
    pub project_url: Option<String>,

    /// Service role key (overrides VITE_SUPABASE_SERVICE_ROLE_KEY)
    #[arg(long, global = true)]
    pub service_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate a sample configuration file
    Init,

    /// Show how a migration file splits into statements (no network)
    Split {
        /// Migration file to split
        file: PathBuf,

        /// Print statements as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a single migration file
    Apply {
        /// Migration file to apply
        file: PathBuf,

        /// Send the whole file as one request instead of splitting it
        #[arg(long)]
        no_split: bool,
    },

    /// Apply every migration in the migrations directory, in order
    ApplyAll {
        /// Directory containing migration files
        #[arg(long)]
        migrations_dir: Option<PathBuf>,

        /// Skip the post-migration table and function checks
        #[arg(long)]
        skip_verify: bool,
    },

    /// Check that the expected tables and functions are reachable
    Verify,

    /// Execute seed data files in file-name order
    Seed {
        /// Directory containing seed SQL files
        #[arg(long)]
        seed_dir: Option<PathBuf>,
    },

    /// Create a new timestamped migration file
    New {
        /// Migration name (alphanumeric, underscores, hyphens)
        name: String,

        /// Directory containing migration files
        #[arg(long)]
        migrations_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
