//! Public types returned by check operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CheckerResult;

/// Leaf certificate summary from a live TLS handshake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// Issuer common name; empty when the certificate carries none.
    pub issuer: String,
    /// The certificate's "not valid after" instant.
    pub expiry: DateTime<Utc>,
    /// Issuer CN equals subject CN.
    pub is_self_signed: bool,
}

impl CertificateInfo {
    /// Build from issuer/subject common names. A missing CN compares as `""`.
    pub fn from_names(
        issuer_cn: Option<&str>,
        subject_cn: Option<&str>,
        expiry: DateTime<Utc>,
    ) -> Self {
        let issuer = issuer_cn.unwrap_or_default();
        Self {
            issuer: issuer.to_string(),
            expiry,
            is_self_signed: issuer == subject_cn.unwrap_or_default(),
        }
    }
}

/// Registration fields parsed from a WHOIS response.
///
/// Dates are passed through exactly as the registry formats them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
}

impl RegistrationInfo {
    /// A record counts as found when it names a registrar or a creation date.
    pub fn is_found(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.registrar) || present(&self.created_date)
    }
}

/// Outcome of a single inspection: either its payload or an error message.
///
/// Serialises as `{"data": ...}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckOutcome<T> {
    Data(T),
    Error(String),
}

impl<T> CheckOutcome<T> {
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data(d) => Some(d),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Data(_) => None,
            Self::Error(e) => Some(e),
        }
    }
}

impl<T> From<CheckerResult<T>> for CheckOutcome<T> {
    fn from(result: CheckerResult<T>) -> Self {
        match result {
            Ok(data) => Self::Data(data),
            Err(e) => Self::Error(e.to_string()),
        }
    }
}

/// Combined registration and certificate result for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedResult {
    /// Normalised domain both checks ran against.
    pub domain: String,
    #[serde(rename = "whois")]
    pub registration: CheckOutcome<RegistrationInfo>,
    #[serde(rename = "ssl")]
    pub certificate: CheckOutcome<CertificateInfo>,
}
