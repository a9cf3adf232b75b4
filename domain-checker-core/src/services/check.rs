//! Dual-check orchestration: normalise once, run both inspectors, keep both outcomes.

use std::sync::Arc;

use log::{error, info, warn};

use super::domain::normalize_domain;
use crate::error::{CheckerError, CheckerResult};
use crate::traits::{CertificateInspector, RegistrationInspector};
use crate::types::CombinedResult;

/// Runs the registration and certificate checks for one input.
///
/// ```rust,no_run
/// use domain_checker_core::{DomainChecker, WhoisOptions};
/// # async fn demo() -> domain_checker_core::CheckerResult<()> {
/// let checker = DomainChecker::with_defaults(WhoisOptions::default())?;
/// let result = checker.check("https://www.example.com/").await?;
/// assert_eq!(result.domain, "example.com");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DomainChecker {
    certificates: Arc<dyn CertificateInspector>,
    registrations: Arc<dyn RegistrationInspector>,
}

impl DomainChecker {
    pub fn new(
        certificates: Arc<dyn CertificateInspector>,
        registrations: Arc<dyn RegistrationInspector>,
    ) -> Self {
        Self {
            certificates,
            registrations,
        }
    }

    /// Live TLS and WHOIS inspectors.
    #[cfg(feature = "rustls")]
    pub fn with_defaults(whois: super::WhoisOptions) -> CheckerResult<Self> {
        Ok(Self::new(
            Arc::new(super::TlsCertificateInspector),
            Arc::new(super::WhoisRegistrationInspector::new(whois)?),
        ))
    }

    /// Normalise `input` and run both checks concurrently.
    ///
    /// Only request-level errors (`InvalidInput`, `MalformedUrl`) are returned
    /// as `Err`; inspector failures land in the matching [`CheckOutcome`].
    ///
    /// [`CheckOutcome`]: crate::CheckOutcome
    pub async fn check(&self, input: &str) -> CheckerResult<CombinedResult> {
        info!("[CHECK] Processing check request for: {input:?}");

        let domain = normalize_domain(input).inspect_err(|e| {
            warn!("[CHECK] Rejected input {input:?}: {e}");
        })?;
        info!("[CHECK] Extracted domain: {domain}");

        let (registration, certificate) = tokio::join!(
            self.registrations.inspect(&domain),
            self.certificates.inspect(&domain),
        );

        log_outcome("WHOIS lookup", &domain, registration.as_ref().err());
        log_outcome("SSL check", &domain, certificate.as_ref().err());
        info!("[CHECK] Completed check for domain: {domain}");

        Ok(CombinedResult {
            domain,
            registration: registration.into(),
            certificate: certificate.into(),
        })
    }
}

fn log_outcome(stage: &str, domain: &str, err: Option<&CheckerError>) {
    match err {
        None => info!("[CHECK] {stage} successful for {domain}"),
        Some(e) if e.is_expected() => warn!("[CHECK] {stage} failed for {domain}: {e}"),
        Some(e) => error!("[CHECK] {stage} failed for {domain}: {e}"),
    }
}
