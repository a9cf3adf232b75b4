//! 统一错误类型定义

use serde::Serialize;
use thiserror::Error;

/// Domain checker error type.
///
/// Request-level variants abort the whole check; the remaining variants are
/// captured per inspection and surfaced as that check's `error` message.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CheckerError {
    /// Empty input
    #[error("url parameter is required")]
    InvalidInput,

    /// URL could not be parsed
    #[error("Invalid URL format: {0}")]
    MalformedUrl(String),

    /// TCP connect or TLS handshake exceeded its deadline
    #[error("Connection to {host}:{port} timed out after {seconds}s")]
    ConnectionTimeout {
        host: String,
        port: u16,
        seconds: u64,
    },

    /// TCP connection could not be established
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS handshake or certificate verification failed
    #[error("TLS handshake failed: {0}")]
    HandshakeFailed(String),

    /// Handshake completed without a peer certificate
    #[error("no certificates found")]
    NoCertificatePresented,

    /// WHOIS transport failure
    #[error("WHOIS query failed: {0}")]
    WhoisQueryFailed(String),

    /// WHOIS response text could not be interpreted
    #[error("WHOIS parsing failed: {0}")]
    WhoisParseFailed(String),

    /// Neither registrar nor creation date present
    #[error("domain not found or not registered")]
    DomainNotRegistered,
}

impl CheckerError {
    /// Whether the error is expected behaviour (bad input, unregistered domain),
    /// used for log classification.
    ///
    /// `warn` for `true`, `error` for `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput
                | Self::MalformedUrl(_)
                | Self::DomainNotRegistered
                | Self::NoCertificatePresented
                | Self::HandshakeFailed(_)
        )
    }
}

/// Domain checker Result type alias
pub type CheckerResult<T> = std::result::Result<T, CheckerError>;
