//! SSL/TLS certificate inspection module.
//!
//! Uses rustls for a fully async, verified handshake and x509-parser for the
//! leaf certificate.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use log::{debug, trace, warn};
use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, RootCertStore};
use rustls_pki_types::{CertificateDer, ServerName};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout_at;
use tokio_rustls::TlsConnector;
use x509_parser::prelude::*;

use crate::error::{CheckerError, CheckerResult};
use crate::types::CertificateInfo;

/// Only the standard HTTPS port is inspected.
pub const HTTPS_PORT: u16 = 443;

/// Deadline shared by the TCP connect and the TLS handshake.
pub const TLS_TIMEOUT: Duration = Duration::from_secs(5);

/// Initialize the rustls `CryptoProvider` (once).
///
/// `install_default` returns `Err` only when a provider is already set.
fn ensure_crypto_provider() {
    let _ = CryptoProvider::install_default(rustls::crypto::ring::default_provider());
}

/// Client config verifying against the bundled Mozilla root store.
fn client_config() -> ClientConfig {
    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

/// Perform a verified TLS handshake with `domain:443` and summarise the leaf
/// certificate.
pub async fn ssl_check(domain: &str) -> CheckerResult<CertificateInfo> {
    ssl_check_at(domain, HTTPS_PORT, TLS_TIMEOUT).await
}

/// [`ssl_check`] against an arbitrary port, with `limit` covering connect and
/// handshake together.
pub(crate) async fn ssl_check_at(
    domain: &str,
    port: u16,
    limit: Duration,
) -> CheckerResult<CertificateInfo> {
    ensure_crypto_provider();

    debug!("[SSL] Starting check for {domain}:{port}");
    let start_time = Instant::now();
    let deadline = tokio::time::Instant::now() + limit;

    let server_name = ServerName::try_from(domain.to_string()).map_err(|e| {
        warn!("[SSL] Invalid server name {domain}: {e}");
        CheckerError::HandshakeFailed(format!("invalid server name {domain:?}: {e}"))
    })?;

    // 1. Establish TCP connection (before the deadline)
    trace!("[SSL] Establishing TCP connection...");
    let stream = match timeout_at(deadline, TcpStream::connect((domain, port))).await {
        Ok(Ok(s)) => {
            trace!(
                "[SSL] TCP connection succeeded, took {:?}",
                start_time.elapsed()
            );
            s
        }
        Ok(Err(e)) => {
            warn!("[SSL] TCP connection to {domain}:{port} failed: {e}");
            return Err(CheckerError::ConnectionFailed(e.to_string()));
        }
        Err(_) => {
            warn!("[SSL] TCP connection timeout ({limit:?})");
            return Err(timed_out(domain, port, limit));
        }
    };

    // 2. TLS handshake (remaining time only)
    let connector = TlsConnector::from(Arc::new(client_config()));
    trace!("[SSL] Performing TLS handshake...");
    let tls_start = Instant::now();
    let mut tls_stream = match timeout_at(deadline, connector.connect(server_name, stream)).await {
        Ok(Ok(stream)) => {
            trace!(
                "[SSL] TLS handshake succeeded, took {:?}",
                tls_start.elapsed()
            );
            stream
        }
        Ok(Err(e)) => {
            warn!("[SSL] TLS handshake with {domain}:{port} failed: {e}");
            return Err(CheckerError::HandshakeFailed(e.to_string()));
        }
        Err(_) => {
            warn!("[SSL] TLS handshake timeout ({limit:?})");
            return Err(timed_out(domain, port, limit));
        }
    };

    // 3. Copy the leaf out, then close the connection before parsing
    let (_, tls_conn) = tls_stream.get_ref();
    let leaf: Option<CertificateDer<'static>> = tls_conn
        .peer_certificates()
        .and_then(|certs| {
            trace!("[SSL] Retrieved {} certificate(s)", certs.len());
            certs.first()
        })
        .map(|c| c.clone().into_owned());

    if let Err(e) = tls_stream.shutdown().await {
        debug!("[SSL] Closing connection to {domain}:{port} failed: {e}");
    }
    drop(tls_stream);

    let Some(leaf) = leaf else {
        warn!("[SSL] No certificates found for {domain}");
        return Err(CheckerError::NoCertificatePresented);
    };

    // 4. Parse leaf certificate
    trace!("[SSL] Parsing certificate...");
    let info = parse_leaf(leaf.as_ref())?;

    debug!(
        "[SSL] Check completed: {} - issuer={:?}, expiry={}, self_signed={}, total_time={:?}",
        domain,
        info.issuer,
        info.expiry.to_rfc3339(),
        info.is_self_signed,
        start_time.elapsed()
    );
    Ok(info)
}

fn timed_out(domain: &str, port: u16, after: Duration) -> CheckerError {
    CheckerError::ConnectionTimeout {
        host: domain.to_string(),
        port,
        seconds: after.as_secs(),
    }
}

/// Parse a DER leaf certificate into [`CertificateInfo`].
fn parse_leaf(der: &[u8]) -> CheckerResult<CertificateInfo> {
    let (_, cert) = X509Certificate::from_der(der).map_err(|e| {
        warn!("[SSL] Certificate parsing failed: {e}");
        CheckerError::HandshakeFailed(format!("certificate parsing failed: {e}"))
    })?;

    let not_after = cert.validity().not_after.timestamp();
    let expiry = DateTime::<Utc>::from_timestamp(not_after, 0).ok_or_else(|| {
        CheckerError::HandshakeFailed(format!("certificate expiry out of range: {not_after}"))
    })?;

    Ok(CertificateInfo::from_names(
        common_name(cert.issuer()),
        common_name(cert.subject()),
        expiry,
    ))
}

/// First common name of an X.509 name, if it is a string.
fn common_name<'a>(name: &'a X509Name<'_>) -> Option<&'a str> {
    name.iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
}
