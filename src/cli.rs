use crate::config::{RepoId, ScanConfig, DEFAULT_API_URL, DEFAULT_REPO};
use crate::github::{ApiFetcher, CredentialPool};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ghmine")]
#[command(about = "Mine per-file touch counts and author attribution from a GitHub repository")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "GitHub repository as <owner>/<name>", default_value = DEFAULT_REPO)]
    pub repo: String,

    #[arg(
        long,
        env = "GITHUB_TOKENS",
        hide_env_values = true,
        help = "Comma separated API tokens, rotated per request"
    )]
    pub tokens: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "Single API token")]
    pub token: Option<String>,

    #[arg(long, help = "Base URL of the GitHub REST API", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(
        long,
        help = "Per-request timeout, e.g. 30s or 2m (0s disables)",
        default_value = "60s",
        value_parser = humantime::parse_duration
    )]
    pub timeout: Duration,

    #[arg(long, help = "Directory for the CSV datasets", default_value = "data")]
    pub out_dir: PathBuf,

    #[arg(long, help = "Hide the progress spinner", default_value_t = false)]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn scan_config(&self) -> Result<ScanConfig> {
        let repo: RepoId = self.repo.parse()?;
        Ok(ScanConfig::new(repo)
            .with_api_url(&self.api_url)
            .with_timeout(self.timeout))
    }

    /// `--tokens`/`GITHUB_TOKENS` wins over `--token`/`GITHUB_TOKEN`.
    pub fn credential_pool(&self) -> Result<CredentialPool> {
        let tokens = self
            .tokens
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.token.as_deref())
            .unwrap_or("");
        Ok(CredentialPool::from_csv(tokens)?)
    }

    pub fn fetcher(&self, config: &ScanConfig) -> Result<ApiFetcher> {
        let pool = self.credential_pool().context("Failed to load API credentials")?;
        Ok(ApiFetcher::new(pool, config.timeout))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count touches per file over the whole history
    Collect {
        #[arg(
            long = "root",
            help = "Source root prefix (repeatable)",
            default_values_t = crate::classify::DEFAULT_ROOTS.iter().map(|r| r.to_string()).collect::<Vec<_>>()
        )]
        roots: Vec<String>,

        #[arg(long, help = "Also print the datasets as JSON")]
        json: bool,
    },
    /// Record author and date of every touch on known source files
    Authors {
        #[arg(long, help = "Source-files dataset to filter by (defaults to the collect output)")]
        src: Option<PathBuf>,

        #[arg(long, help = "Also print the dataset as JSON")]
        json: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Collect { roots, json } => crate::collect::exec(self.common, roots, json),
            Commands::Authors { src, json } => crate::authors::exec(self.common, src, json),
        }
    }
}
