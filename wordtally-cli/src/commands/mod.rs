//! CLI command implementations

use crate::config::OutputFormat;
use clap::Subcommand;
use std::io::{self, Write};
use wordtally_engine::ExecutionMode;

pub mod generate_config;
pub mod process;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count words in text files
    Process(process::ProcessArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Print or write the default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List execution modes
    Modes,

    /// List available output formats
    Formats,
}

impl ListCommands {
    /// Print the requested list to stdout
    pub fn execute(self) -> anyhow::Result<()> {
        self.write_to(&mut io::stdout().lock())
    }

    /// Write the requested list to `writer`
    pub fn write_to(self, writer: &mut dyn Write) -> anyhow::Result<()> {
        match self {
            ListCommands::Modes => {
                writeln!(writer, "Available execution modes:")?;
                for mode in ExecutionMode::ALL {
                    writeln!(writer, "  {:<12} - {}", mode.as_str(), mode.description())?;
                }
            }
            ListCommands::Formats => {
                writeln!(writer, "Available output formats:")?;
                for format in OutputFormat::ALL {
                    writeln!(writer, "  {:<12} - {}", format.as_str(), format.description())?;
                }
            }
        }
        Ok(())
    }
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Process(args) => args.execute(),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}
