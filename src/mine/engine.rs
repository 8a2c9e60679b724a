use super::aggregate::Aggregator;
use crate::config::ScanConfig;
use crate::error::Result;
use crate::github::{resolve_files, CommitPageWalker, Fetch};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

/// Totals reported once a scan completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub pages: u32,
    pub commits: u64,
    pub files: u64,
}

/// Sequential page → commit → detail → fold pipeline shared by every mode.
pub struct Miner<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    config: &'a ScanConfig,
    progress: bool,
}

impl<'a, F: Fetch + ?Sized> Miner<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a ScanConfig) -> Self {
        Self {
            fetcher,
            config,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Run the whole history through `aggregator`.
    ///
    /// The aggregator comes back only if every page and commit was resolved;
    /// on the first failure it is dropped with whatever it had folded.
    pub fn run(&self, mut aggregator: Aggregator) -> Result<(Aggregator, ScanStats)> {
        let pb = self.spinner();
        let mut stats = ScanStats::default();

        for page in CommitPageWalker::new(self.fetcher, self.config) {
            let commits = page?;
            stats.pages += 1;
            for commit in &commits {
                pb.set_message(format!(
                    "page {} · {} commits · {}",
                    stats.pages,
                    stats.commits,
                    short_sha(&commit.sha)
                ));
                let files = resolve_files(self.fetcher, self.config, commit)?;
                stats.commits += 1;
                stats.files += files.len() as u64;
                aggregator.fold(commit, &files);
                pb.tick();
            }
        }

        pb.finish_and_clear();
        info!(
            repository = %self.config.repo,
            pages = stats.pages,
            commits = stats.commits,
            files = stats.files,
            "Scan complete"
        );
        Ok((aggregator, stats))
    }

    fn spinner(&self) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Scanning {}...", self.config.repo));
        pb
    }
}

fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}
