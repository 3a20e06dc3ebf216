use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{describe_command, modules_command};

#[derive(Parser, Debug)]
#[command(name = "modhost")]
#[command(version, about = "Inspect modular host startup", long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug              Enable debug logging\n    MODHOST_ENVIRONMENT=NAME    Select the settings environment")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the modules in the built-in catalog
    #[command(visible_alias = "m")]
    Modules,
    /// Run the full module lifecycle and print the resulting host
    #[command(visible_alias = "d")]
    Describe {
        /// Content root holding modhost.json (defaults to current directory)
        #[arg(long)]
        cwd: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Modules => modules_command(),
            Commands::Describe { cwd, json } => describe_command(cwd.as_deref(), json),
        }
    }
}
