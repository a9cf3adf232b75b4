//! Inspector implementations and the check orchestrator.

mod check;
mod domain;
#[cfg(feature = "rustls")]
mod ssl;
mod whois;

use async_trait::async_trait;
use whois_rust::WhoIs;

use crate::error::CheckerResult;
use crate::traits::RegistrationInspector;
use crate::types::RegistrationInfo;

pub use check::DomainChecker;
pub use domain::normalize_domain;
pub use whois::{WhoisOptions, WHOIS_SERVERS};

/// Registration inspector backed by a live WHOIS query.
pub struct WhoisRegistrationInspector {
    whois: WhoIs,
    options: WhoisOptions,
}

impl WhoisRegistrationInspector {
    /// Create an inspector using the embedded WHOIS server map.
    pub fn new(options: WhoisOptions) -> CheckerResult<Self> {
        Self::with_servers(WHOIS_SERVERS, options)
    }

    /// Create an inspector from a custom JSON server map (TLD → server).
    pub fn with_servers(whois_servers: &str, options: WhoisOptions) -> CheckerResult<Self> {
        Ok(Self {
            whois: whois::whois_client(whois_servers)?,
            options,
        })
    }
}

#[async_trait]
impl RegistrationInspector for WhoisRegistrationInspector {
    async fn inspect(&self, domain: &str) -> CheckerResult<RegistrationInfo> {
        let raw = whois::whois_query(&self.whois, domain, self.options).await?;
        whois::registration_from_response(domain, &raw)
    }
}

#[cfg(feature = "rustls")]
pub use tls::TlsCertificateInspector;

#[cfg(feature = "rustls")]
mod tls {
    use async_trait::async_trait;

    use super::ssl;
    use crate::error::CheckerResult;
    use crate::traits::CertificateInspector;
    use crate::types::CertificateInfo;

    /// Certificate inspector performing a verified handshake on port 443.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct TlsCertificateInspector;

    #[async_trait]
    impl CertificateInspector for TlsCertificateInspector {
        async fn inspect(&self, domain: &str) -> CheckerResult<CertificateInfo> {
            ssl::ssl_check(domain).await
        }
    }
}
