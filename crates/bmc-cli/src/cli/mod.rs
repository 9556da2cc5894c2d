//! CLI for the BMC bookmark converter.

mod commands;
mod preflight;
mod progress_bar;

use anyhow::Result;
use clap::{Parser, Subcommand};
use bmc_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_convert, run_man};

/// Top-level CLI for the BMC bookmark converter.
#[derive(Debug, Parser)]
#[command(name = "bmc")]
#[command(about = "BMC: convert Chrome/Edge bookmark exports to YAML with website icons", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Convert a bookmark HTML export into a categories/sections/websites file.
    Convert {
        /// Chrome/Edge bookmark HTML export.
        input: PathBuf,

        /// Output file (default websites.yaml; `.yaml` is appended when there is no extension, `.json` writes JSON).
        output: Option<PathBuf>,

        /// Number of threads resolving icons (overrides `workers` in config.toml).
        #[arg(long, short = 'w', value_name = "N")]
        workers: Option<usize>,

        /// Do not fetch icons; use built-in icons for known domains and "link" otherwise.
        #[arg(long)]
        no_icons: bool,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Convert {
                input,
                output,
                workers,
                no_icons,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_convert(&cfg, &input, output.as_deref(), workers, no_icons)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
