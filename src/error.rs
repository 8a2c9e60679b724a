use thiserror::Error;

pub type Result<T> = std::result::Result<T, MineError>;

#[derive(Error, Debug)]
pub enum MineError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("Credential rejected for {url} (HTTP {status}); token invalid or rate limit exhausted")]
    Auth { url: String, status: u16 },
    #[error("API error for {url} (HTTP {status}): {body}")]
    Api { url: String, status: u16, body: String },
    #[error("Parse error for {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MineError {
    pub fn transport(url: &str, err: ureq::Error) -> Self {
        MineError::Transport {
            url: url.to_string(),
            source: Box::new(err),
        }
    }

    pub fn parse(url: &str, err: serde_json::Error) -> Self {
        MineError::Parse {
            url: url.to_string(),
            source: err,
        }
    }
}
