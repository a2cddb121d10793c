//! Admin privilege elevation.
//!
//! The dashboard never compares passwords itself. It asks an
//! [`AdminAuthority`], which holds only a SHA-256 digest from config, and
//! receives an [`AdminGrant`] on success.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;

/// Proof of a successful elevation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminGrant {
    pub session_id: Uuid,
    pub granted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Incorrect password.")]
    InvalidPassword,
    #[error("Admin mode is disabled.")]
    Disabled,
}

/// Hex SHA-256 digest of `password`.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Constant-time comparison of two equal-length byte strings.
fn digests_match(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Mock trusted authority checking admin passwords.
#[derive(Debug, Clone)]
pub struct AdminAuthority {
    digest: String,
}

impl AdminAuthority {
    /// An empty digest disables admin mode entirely.
    pub fn new(password_sha256: impl Into<String>) -> Self {
        Self {
            digest: password_sha256.into().trim().to_ascii_lowercase(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.admin.password_sha256.clone())
    }

    pub fn is_enabled(&self) -> bool {
        !self.digest.is_empty()
    }

    /// Checks `password` and issues a fresh grant.
    ///
    /// # Errors
    /// [`AuthError::Disabled`] without a configured digest,
    /// [`AuthError::InvalidPassword`] on mismatch.
    pub async fn verify(&self, password: &str) -> Result<AdminGrant, AuthError> {
        if !self.is_enabled() {
            tracing::warn!("admin login attempted while admin mode is disabled");
            return Err(AuthError::Disabled);
        }
        let candidate = hash_password(password);
        if !digests_match(candidate.as_bytes(), self.digest.as_bytes()) {
            tracing::info!("admin login rejected");
            return Err(AuthError::InvalidPassword);
        }
        let grant = AdminGrant {
            session_id: Uuid::new_v4(),
            granted_at: Utc::now(),
        };
        tracing::info!(session_id = %grant.session_id, "admin session granted");
        Ok(grant)
    }
}
