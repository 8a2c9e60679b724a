//! Wire shapes of the GitHub commits endpoints. Only the fields the miner
//! reads are modelled; everything else in the payload is ignored.

use crate::model::{ChangedFile, CommitRef};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    pub commit: CommitBody,
}

#[derive(Debug, Deserialize)]
pub struct CommitBody {
    pub author: GitAuthor,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct GitAuthor {
    pub name: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub files: Vec<DiffEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DiffEntry {
    pub filename: String,
}

impl From<CommitSummary> for CommitRef {
    fn from(summary: CommitSummary) -> Self {
        let message_first_line = summary
            .commit
            .message
            .lines()
            .next()
            .unwrap_or("")
            .to_string();
        CommitRef {
            sha: summary.sha,
            author_name: summary.commit.author.name,
            author_date: summary.commit.author.date,
            message_first_line,
        }
    }
}

impl From<CommitDetail> for Vec<ChangedFile> {
    fn from(detail: CommitDetail) -> Self {
        detail
            .files
            .into_iter()
            .map(|f| ChangedFile::new(f.filename))
            .collect()
    }
}
