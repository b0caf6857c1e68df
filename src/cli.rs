use crate::config::DEFAULT_OUTPUT;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "histgen")]
#[command(about = "Synthetic git history generator for churn and log analysis fixtures")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a synthetic commit history
    Generate {
        #[arg(long, short, help = "Output file", default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        #[arg(long, help = "Seed for a reproducible history")]
        seed: Option<u64>,

        #[arg(long, help = "Print the summary as JSON")]
        json: bool,
    },
    /// Read a history back and verify its invariants
    Check {
        #[arg(help = "History file to check", default_value = DEFAULT_OUTPUT)]
        path: PathBuf,

        #[arg(long, help = "Fail unless the file holds exactly this many commits")]
        expect_commits: Option<usize>,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Generate { output, seed, json } => {
                crate::generate::exec(&output, seed, json)
            }
            Commands::Check { path, expect_commits, json } => {
                crate::check::exec(&path, expect_commits, json)
            }
        }
    }
}
