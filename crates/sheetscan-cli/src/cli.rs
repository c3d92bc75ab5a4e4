//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sheetscan::{Emptiness, SheetscanConfig, VotingMode};

/// Sheetscan: find the header row and column types of a spreadsheet export
#[derive(Parser)]
#[command(name = "sheetscan")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Guess the header row and the type of every column
    Guess {
        #[command(flatten)]
        args: InferenceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Guess only the header row
    Headers {
        #[command(flatten)]
        args: InferenceArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the weighted votes behind each column type
    Explain {
        #[command(flatten)]
        args: InferenceArgs,
    },
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct InferenceArgs {
    /// Path to the sample file (CSV/TSV or JSON cells)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// JSON configuration file; flags override its values
    #[arg(long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// How many cells narrower than the table a header row may be
    #[arg(short, long)]
    pub tolerance: Option<usize>,

    /// Count each type once per column instead of once per cell
    #[arg(long)]
    pub strict: bool,

    /// Which values count as empty
    #[arg(long)]
    pub emptiness: Option<EmptinessChoice>,

    /// Maximum rows to sample
    #[arg(short = 'n', long)]
    pub max_rows: Option<usize>,

    /// Field delimiter (default: auto-detect)
    #[arg(short, long)]
    pub delimiter: Option<char>,
}

impl InferenceArgs {
    /// Build the engine configuration from the config file and flags.
    pub fn to_config(&self) -> sheetscan::Result<SheetscanConfig> {
        let mut config = match &self.config {
            Some(path) => SheetscanConfig::from_json_file(path)?,
            None => SheetscanConfig::default(),
        };

        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if self.strict {
            config.mode = VotingMode::Strict;
        }
        if let Some(choice) = &self.emptiness {
            config.emptiness = choice.into();
        }
        if self.max_rows.is_some() {
            config.max_rows = self.max_rows;
        }
        if self.delimiter.is_some() {
            config.reader.delimiter = self.delimiter;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Emptiness policy choice
#[derive(Clone, Debug, Default)]
pub enum EmptinessChoice {
    /// Zero, false and blank cells are empty
    #[default]
    Falsy,
    /// Only blank cells are empty
    Absent,
}

impl std::str::FromStr for EmptinessChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "falsy" | "compat" => Ok(EmptinessChoice::Falsy),
            "absent" | "blank" => Ok(EmptinessChoice::Absent),
            _ => Err(format!("Unknown emptiness policy: {}. Use falsy or absent.", s)),
        }
    }
}

impl std::fmt::Display for EmptinessChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptinessChoice::Falsy => write!(f, "falsy"),
            EmptinessChoice::Absent => write!(f, "absent"),
        }
    }
}

impl From<&EmptinessChoice> for Emptiness {
    fn from(choice: &EmptinessChoice) -> Self {
        match choice {
            EmptinessChoice::Falsy => Emptiness::Falsy,
            EmptinessChoice::Absent => Emptiness::Absent,
        }
    }
}
