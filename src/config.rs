use crate::error::{MineError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPO: &str = "scottyab/rootbeer";
pub const PAGE_SIZE: u32 = 100;

/// `<owner>/<name>` of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for RepoId {
    type Err = MineError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.trim().split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(MineError::Configuration(format!(
                "Invalid repository '{s}', expected <owner>/<name>"
            ))),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything a scan needs to know about its target.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub repo: RepoId,
    pub api_url: String,
    pub per_page: u32,
    pub timeout: Option<Duration>,
}

impl ScanConfig {
    pub fn new(repo: RepoId) -> Self {
        Self {
            repo,
            api_url: DEFAULT_API_URL.to_string(),
            per_page: PAGE_SIZE,
            timeout: Some(Duration::from_secs(60)),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// A zero duration disables the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    pub fn commits_url(&self, page: u32) -> String {
        format!(
            "{}/repos/{}/commits?page={}&per_page={}",
            self.api_url, self.repo, page, self.per_page
        )
    }

    pub fn commit_url(&self, sha: &str) -> String {
        format!("{}/repos/{}/commits/{}", self.api_url, self.repo, sha)
    }
}

/// Dataset file locations for one repository under an output directory.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    dir: PathBuf,
    stem: String,
}

impl DatasetPaths {
    pub fn new(dir: impl AsRef<Path>, repo: &RepoId) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            stem: format!("file_{}", repo.name()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn all_files(&self) -> PathBuf {
        self.dir.join(format!("{}.csv", self.stem))
    }

    pub fn source_files(&self) -> PathBuf {
        self.dir.join(format!("{}_src.csv", self.stem))
    }

    pub fn authors(&self) -> PathBuf {
        self.dir.join(format!("{}_authors.csv", self.stem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_name() {
        let repo: RepoId = "scottyab/rootbeer".parse().unwrap();
        assert_eq!(repo.owner(), "scottyab");
        assert_eq!(repo.name(), "rootbeer");
        assert_eq!(repo.to_string(), "scottyab/rootbeer");
    }

    #[test]
    fn rejects_malformed_repo() {
        for bad in ["", "rootbeer", "a/b/c", "/b", "a/"] {
            assert!(
                matches!(bad.parse::<RepoId>(), Err(MineError::Configuration(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn builds_endpoint_urls() {
        let cfg = ScanConfig::new("o/r".parse().unwrap()).with_api_url("http://127.0.0.1:9/");
        assert_eq!(
            cfg.commits_url(3),
            "http://127.0.0.1:9/repos/o/r/commits?page=3&per_page=100"
        );
        assert_eq!(cfg.commit_url("abc"), "http://127.0.0.1:9/repos/o/r/commits/abc");
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = ScanConfig::new("o/r".parse().unwrap()).with_timeout(Duration::ZERO);
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn dataset_paths_follow_repo_name() {
        let paths = DatasetPaths::new("data", &"scottyab/rootbeer".parse().unwrap());
        assert_eq!(paths.all_files(), Path::new("data/file_rootbeer.csv"));
        assert_eq!(paths.source_files(), Path::new("data/file_rootbeer_src.csv"));
        assert_eq!(paths.authors(), Path::new("data/file_rootbeer_authors.csv"));
    }
}
