use super::credentials::CredentialPool;
use crate::error::{MineError, Result};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("ghmine/", env!("CARGO_PKG_VERSION"));
const BODY_EXCERPT: usize = 200;

/// Authenticated JSON GET. Implementations fail hard; nothing is retried.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Value>;
}

/// Sync HTTP via ureq, one pool credential per request.
pub struct ApiFetcher {
    pool: CredentialPool,
    agent: ureq::Agent,
}

fn make_agent(timeout: Option<Duration>) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build()
        .new_agent()
}

impl ApiFetcher {
    pub fn new(pool: CredentialPool, timeout: Option<Duration>) -> Self {
        debug!(credentials = pool.len(), ?timeout, "API client ready");
        Self {
            pool,
            agent: make_agent(timeout),
        }
    }
}

impl Fetch for ApiFetcher {
    fn fetch(&self, url: &str) -> Result<Value> {
        let credential = self.pool.next();
        debug!(url, "GET");

        let response = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", credential.token()))
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| MineError::transport(url, e))?;

        let status = response.status().as_u16();
        // Commit details inline every patch, so large commits exceed ureq's default cap.
        let mut raw = response.into_body();
        let body = raw
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|e| MineError::transport(url, e))?;

        match status {
            200..=299 => serde_json::from_str(&body).map_err(|e| MineError::parse(url, e)),
            401 | 403 | 429 => Err(MineError::Auth {
                url: url.to_string(),
                status,
            }),
            _ => Err(MineError::Api {
                url: url.to_string(),
                status,
                body: body.chars().take(BODY_EXCERPT).collect(),
            }),
        }
    }
}
