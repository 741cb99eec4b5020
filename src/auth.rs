//! # Admin Authentication Gate
//!
//! Validates the caller-supplied admin API key against the single configured
//! secret before any evaluation runs. Both sides are reduced to SHA-256
//! digests and compared in constant time, so neither the content nor the
//! length of a near miss is observable through timing.
//!
//! A successful check yields an [`AdminContext`], the only way to obtain one;
//! the aggregation service requires it, so evaluation cannot be reached
//! without passing this gate.

use axum::http::HeaderName;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fmt;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::config::{AuthConfig, ConfigurationError};
use crate::error::{HealthError, Result};

/// Proof that a request presented the correct admin credential
#[derive(Debug, Clone)]
pub struct AdminContext {
    authenticated_at: DateTime<Utc>,
}

impl AdminContext {
    pub fn authenticated_at(&self) -> DateTime<Utc> {
        self.authenticated_at
    }
}

/// Constant-time checker for the admin API key
#[derive(Clone)]
pub struct AdminAuthenticator {
    key_digest: [u8; 32],
    header_name: HeaderName,
}

impl fmt::Debug for AdminAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAuthenticator")
            .field("header_name", &self.header_name)
            .finish_non_exhaustive()
    }
}

impl AdminAuthenticator {
    /// Build from validated auth configuration
    pub fn from_config(config: &AuthConfig) -> std::result::Result<Self, ConfigurationError> {
        if config.admin_api_key.is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "admin_api_key",
                "auth",
            ));
        }

        let header_name = HeaderName::from_bytes(config.api_key_header.as_bytes()).map_err(|_| {
            ConfigurationError::invalid_value(
                "api_key_header",
                config.api_key_header.clone(),
                "must be a valid HTTP header name",
            )
        })?;

        Ok(Self {
            key_digest: digest(config.admin_api_key.as_bytes()),
            header_name,
        })
    }

    /// Header the credential is read from
    pub fn header_name(&self) -> &HeaderName {
        &self.header_name
    }

    /// Check a presented credential as raw header bytes
    ///
    /// Missing and mismatched credentials fail identically with
    /// [`HealthError::Unauthorized`]. The configured key is matched by its
    /// UTF-8 bytes, so non-ASCII keys work when sent as raw header octets.
    pub fn authenticate(&self, presented: Option<&[u8]>) -> Result<AdminContext> {
        let Some(presented) = presented else {
            warn!(header = %self.header_name, reason = "missing", "Admin authentication rejected");
            return Err(HealthError::Unauthorized);
        };

        if !self.matches(presented) {
            warn!(header = %self.header_name, reason = "mismatch", "Admin authentication rejected");
            return Err(HealthError::Unauthorized);
        }

        debug!("Admin request authenticated");
        Ok(AdminContext {
            authenticated_at: Utc::now(),
        })
    }

    fn matches(&self, presented: &[u8]) -> bool {
        digest(presented)[..].ct_eq(&self.key_digest[..]).into()
    }
}

fn digest(value: &[u8]) -> [u8; 32] {
    Sha256::digest(value).into()
}
