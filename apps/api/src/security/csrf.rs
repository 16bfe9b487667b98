//! Anti-forgery tokens keyed on one process-wide secret.
//!
//! Token format: `{salt}-{hex(sha256(salt + "-" + secret))}`. Any token minted with
//! the same secret verifies; there is no per-session binding, so this only keeps
//! out clients that never fetched a token from this server.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 18;

#[derive(Clone)]
pub struct CsrfGuard {
    secret: String,
}

impl std::fmt::Debug for CsrfGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsrfGuard").finish_non_exhaustive()
    }
}

impl CsrfGuard {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Guard with a random secret. Tokens stop verifying after a restart.
    pub fn with_random_secret() -> Self {
        Self::new(random_alphanumeric(32))
    }

    pub fn issue_token(&self) -> String {
        let salt = random_alphanumeric(SALT_LEN);
        let digest = self.digest(&salt);
        format!("{salt}-{digest}")
    }

    pub fn verify_token(&self, candidate: Option<&str>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };
        let Some((salt, digest)) = candidate.split_once('-') else {
            return false;
        };
        if salt.is_empty() {
            return false;
        }
        constant_time_eq(self.digest(salt).as_bytes(), digest.as_bytes())
    }

    fn digest(&self, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(b"-");
        hasher.update(self.secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

fn random_alphanumeric(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
