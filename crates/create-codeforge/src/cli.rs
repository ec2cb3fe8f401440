//! CLI argument parsing with clap

use anyhow::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use codeforge_core::template::validate_branch;
use codeforge_core::{ConfigLoader, ManifestPolicy, ScaffoldConfig, SelectionPolicy};

/// create-codeforge - Initialize a new project from the CodeForge template
#[derive(Parser, Debug)]
#[command(name = "create-codeforge")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  create-codeforge --branch dev")]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<Utf8PathBuf>,

    /// Specify the Git branch to use (skips the branch prompt)
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// How to pick among several installed package managers [possible values: prompt, first]
    #[arg(long, value_name = "POLICY")]
    pub selection: Option<SelectionPolicy>,

    /// What to do with package.json's packageManager field [possible values: declare, strip]
    #[arg(long, value_name = "POLICY")]
    pub manifest_policy: Option<ManifestPolicy>,
}

/// Immutable options for one scaffolding run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Branch given on the command line
    pub branch: Option<String>,
    /// Resolved configuration
    pub config: ScaffoldConfig,
}

impl Cli {
    /// Resolve configuration layers and flags into run options
    pub fn run_options(&self) -> Result<RunOptions> {
        if let Some(branch) = &self.branch {
            validate_branch(branch)?;
        }

        let loader = match &self.config {
            Some(path) => ConfigLoader::with_file(path.clone()),
            None => ConfigLoader::new(),
        };
        let config = loader
            .load()?
            .with_overrides(self.selection, self.manifest_policy);

        Ok(RunOptions {
            branch: self.branch.clone(),
            config,
        })
    }
}
