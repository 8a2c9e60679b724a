use super::api::{CommitDetail, CommitSummary};
use super::fetch::Fetch;
use crate::config::ScanConfig;
use crate::error::{MineError, Result};
use crate::model::{ChangedFile, CommitRef};
use tracing::{debug, info};

/// Result of requesting one listing page.
#[derive(Debug, PartialEq, Eq)]
pub enum Page {
    Commits(Vec<CommitRef>),
    /// The listing returned an empty page.
    EndOfHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    Scanning { page: u32 },
    Done,
}

/// Lazily walks the commit listing one page at a time until an empty page.
///
/// Each item is one page worth of commits. After an error or the end of
/// history the walker yields nothing more.
pub struct CommitPageWalker<'a, F: Fetch + ?Sized> {
    fetcher: &'a F,
    config: &'a ScanConfig,
    state: WalkState,
}

impl<'a, F: Fetch + ?Sized> CommitPageWalker<'a, F> {
    pub fn new(fetcher: &'a F, config: &'a ScanConfig) -> Self {
        Self {
            fetcher,
            config,
            state: WalkState::Scanning { page: 1 },
        }
    }

    fn fetch_page(&self, page: u32) -> Result<Page> {
        let url = self.config.commits_url(page);
        let value = self.fetcher.fetch(&url)?;
        let summaries: Vec<CommitSummary> =
            serde_json::from_value(value).map_err(|e| MineError::parse(&url, e))?;
        if summaries.is_empty() {
            return Ok(Page::EndOfHistory);
        }
        Ok(Page::Commits(summaries.into_iter().map(CommitRef::from).collect()))
    }
}

impl<F: Fetch + ?Sized> Iterator for CommitPageWalker<'_, F> {
    type Item = Result<Vec<CommitRef>>;

    fn next(&mut self) -> Option<Self::Item> {
        let WalkState::Scanning { page } = self.state else {
            return None;
        };
        match self.fetch_page(page) {
            Ok(Page::Commits(commits)) => {
                info!(page, commits = commits.len(), "Fetched commit page");
                self.state = WalkState::Scanning { page: page + 1 };
                Some(Ok(commits))
            }
            Ok(Page::EndOfHistory) => {
                debug!(page, "Empty page, end of history");
                self.state = WalkState::Done;
                None
            }
            Err(e) => {
                self.state = WalkState::Done;
                Some(Err(e))
            }
        }
    }
}

impl<F: Fetch + ?Sized> std::iter::FusedIterator for CommitPageWalker<'_, F> {}

/// Fetch the full commit and return the files its diff touches.
pub fn resolve_files<F: Fetch + ?Sized>(
    fetcher: &F,
    config: &ScanConfig,
    commit: &CommitRef,
) -> Result<Vec<ChangedFile>> {
    let url = config.commit_url(&commit.sha);
    let value = fetcher.fetch(&url)?;
    let detail: CommitDetail = serde_json::from_value(value).map_err(|e| MineError::parse(&url, e))?;
    Ok(detail.into())
}
