//! Inspector abstractions used by [`DomainChecker`](crate::DomainChecker).
//!
//! Implementations:
//! - `TlsCertificateInspector`: live rustls handshake on port 443
//! - `WhoisRegistrationInspector`: whois-rust query + registry text parsing

use async_trait::async_trait;

use crate::error::CheckerResult;
use crate::types::{CertificateInfo, RegistrationInfo};

/// Certificate check for a normalised domain.
#[async_trait]
pub trait CertificateInspector: Send + Sync {
    /// Inspect the leaf certificate served by `domain`.
    ///
    /// # Arguments
    /// * `domain` - Normalised domain
    async fn inspect(&self, domain: &str) -> CheckerResult<CertificateInfo>;
}

/// Registration check for a normalised domain.
#[async_trait]
pub trait RegistrationInspector: Send + Sync {
    /// Look up registration data for `domain`.
    ///
    /// # Arguments
    /// * `domain` - Normalised domain
    async fn inspect(&self, domain: &str) -> CheckerResult<RegistrationInfo>;
}
