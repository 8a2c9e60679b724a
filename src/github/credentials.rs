use crate::error::{MineError, Result};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Bearer token. `Debug` never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Hands out credentials round-robin, one per request.
#[derive(Debug)]
pub struct CredentialPool {
    credentials: Vec<Credential>,
    cursor: AtomicUsize,
}

impl CredentialPool {
    pub fn new(credentials: Vec<Credential>) -> Result<Self> {
        let credentials: Vec<_> = credentials
            .into_iter()
            .filter(|c| !c.token().trim().is_empty())
            .collect();
        if credentials.is_empty() {
            return Err(MineError::Configuration(
                "No GitHub token found; set GITHUB_TOKENS or GITHUB_TOKEN".to_string(),
            ));
        }
        Ok(Self {
            credentials,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Split a comma separated token list, ignoring blanks.
    pub fn from_csv(tokens: &str) -> Result<Self> {
        Self::new(tokens.split(',').map(|t| Credential::new(t.trim())).collect())
    }

    pub fn next(&self) -> &Credential {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        &self.credentials[i % self.credentials.len()]
    }

    pub(crate) fn len(&self) -> usize {
        self.credentials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(tokens: &[&str]) -> CredentialPool {
        CredentialPool::new(tokens.iter().map(|t| Credential::new(*t)).collect()).unwrap()
    }

    #[test]
    fn rotates_in_order_and_wraps() {
        let pool = pool(&["a", "b", "c"]);
        let seen: Vec<_> = (0..2 * pool.len()).map(|_| pool.next().token().to_string()).collect();
        assert_eq!(seen, vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn single_credential_is_always_returned() {
        let pool = pool(&["only"]);
        for _ in 0..5 {
            assert_eq!(pool.next().token(), "only");
        }
    }

    #[test]
    fn empty_pool_is_a_configuration_error() {
        assert!(matches!(
            CredentialPool::new(Vec::new()),
            Err(MineError::Configuration(_))
        ));
        assert!(matches!(
            CredentialPool::from_csv(" , ,"),
            Err(MineError::Configuration(_))
        ));
    }

    #[test]
    fn csv_tokens_are_trimmed() {
        let pool = CredentialPool::from_csv(" t1 ,, t2").unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.next().token(), "t1");
        assert_eq!(pool.next().token(), "t2");
    }

    #[test]
    fn debug_hides_token() {
        let dbg = format!("{:?}", pool(&["secret-token"]));
        assert!(!dbg.contains("secret-token"));
    }
}
