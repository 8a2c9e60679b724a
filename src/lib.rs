pub mod authors;
pub mod classify;
pub mod cli;
pub mod collect;
pub mod config;
pub mod dataset;
pub mod error;
pub mod github;
pub mod mine;
pub mod model;

pub use classify::FileClassifier;
pub use config::{RepoId, ScanConfig};
pub use error::{MineError, Result};
pub use mine::{Aggregator, Miner};
