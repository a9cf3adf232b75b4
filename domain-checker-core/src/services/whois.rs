//! WHOIS lookup module.

use std::sync::LazyLock;
use std::time::Duration;

use log::{debug, warn};
use regex::Regex;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::error::{CheckerError, CheckerResult};
use crate::types::RegistrationInfo;

/// Embedded WHOIS server mapping (TLD → server).
pub const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

/// WHOIS query settings.
#[derive(Debug, Clone, Copy)]
pub struct WhoisOptions {
    /// Per-query timeout handed to the WHOIS client.
    pub timeout: Duration,
    /// How many registrar referrals to follow.
    pub follow: u16,
}

impl Default for WhoisOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            follow: 2,
        }
    }
}

/// Build a WHOIS client from a JSON server map.
pub fn whois_client(whois_servers: &str) -> CheckerResult<WhoIs> {
    WhoIs::from_string(whois_servers).map_err(|e| {
        CheckerError::WhoisQueryFailed(format!("Failed to initialize WHOIS client: {e}"))
    })
}

/// Query WHOIS for `domain` and return the raw response text.
pub async fn whois_query(
    whois: &WhoIs,
    domain: &str,
    options: WhoisOptions,
) -> CheckerResult<String> {
    debug!("[WHOIS] Fetching WHOIS data for domain: {domain}");

    let mut lookup = WhoIsLookupOptions::from_string(domain).map_err(|e| {
        warn!("[WHOIS] Invalid WHOIS target {domain}: {e}");
        CheckerError::WhoisQueryFailed(format!("invalid WHOIS target {domain:?}: {e}"))
    })?;
    lookup.timeout = Some(options.timeout);
    lookup.follow = options.follow;

    whois.lookup_async(lookup).await.map_err(|e| {
        warn!("[WHOIS] WHOIS query failed for {domain}: {e}");
        CheckerError::WhoisQueryFailed(e.to_string())
    })
}

/// Turn a raw WHOIS response into [`RegistrationInfo`].
///
/// Fails with `WhoisParseFailed` for text with no `key: value` content and
/// with `DomainNotRegistered` when neither registrar nor creation date is
/// present.
pub fn registration_from_response(domain: &str, raw: &str) -> CheckerResult<RegistrationInfo> {
    let info = parse_whois_response(raw)?;

    if !info.is_found() {
        warn!("[WHOIS] Domain {domain} appears to be unregistered or WHOIS data incomplete");
        return Err(CheckerError::DomainNotRegistered);
    }

    debug!(
        "[WHOIS] Parsed WHOIS data for {domain} (registrar: {})",
        info.registrar.as_deref().unwrap_or_default()
    );
    Ok(info)
}

/// Registry label variants for each field. Earlier entries win.
static REGISTRAR: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    let mut patterns = compile_labels(&[
        "Registrar",
        "Registrar Name",
        "Sponsoring Registrar",
        "Registrar Organization",
        "Registration Service Provider",
    ]);
    // Block formats: the value sits on the following indented line.
    patterns.extend(compile(&[
        r"(?im)^[ \t]*Registrar:[ \t]*\r?\n[ \t]+Name:[ \t]*([^\r\n]*\S)",
        r"(?im)^[ \t]*Registrar:[ \t]*\r?\n[ \t]+([^\r\n]*\S)",
    ]));
    patterns
});

static CREATED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_labels(&[
        "Creation Date",
        "Created Date",
        "Created On",
        "Created",
        "Registered on",
        "Registration Time",
        "Registration Date",
        "Domain Registration Date",
        "Registered",
    ])
});

static UPDATED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_labels(&[
        "Updated Date",
        "Last Updated",
        "Last Modified",
        "Updated On",
        "last-update",
        "Changed",
        "Modified",
    ])
});

static EXPIRATION: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_labels(&[
        "Registry Expiry Date",
        "Registrar Registration Expiration Date",
        "Expiration Date",
        "Expiry Date",
        "Expires On",
        "Expires",
        "Expiration Time",
        "paid-till",
        "Renewal Date",
    ])
});

/// `Label: value` on a single line, case-insensitive, leading indent allowed.
fn compile_labels(labels: &[&str]) -> Vec<Regex> {
    labels
        .iter()
        .filter_map(|label| {
            Regex::new(&format!(
                r"(?im)^[ \t]*{}:[ \t]*([^\r\n]*\S)",
                regex::escape(label)
            ))
            .ok()
        })
        .collect()
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().filter_map(|p| Regex::new(p).ok()).collect()
}

/// Parse structured fields from a raw WHOIS response.
fn parse_whois_response(raw: &str) -> CheckerResult<RegistrationInfo> {
    if raw.trim().is_empty() {
        return Err(CheckerError::WhoisParseFailed(
            "empty WHOIS response".to_string(),
        ));
    }
    if !raw.lines().any(|line| line.contains(':')) {
        return Err(CheckerError::WhoisParseFailed(
            "no key/value fields in WHOIS response".to_string(),
        ));
    }

    Ok(RegistrationInfo {
        created_date: extract_field(raw, &CREATED),
        updated_date: extract_field(raw, &UPDATED),
        expiration_date: extract_field(raw, &EXPIRATION),
        registrar: extract_field(raw, &REGISTRAR),
    })
}

/// Try multiple patterns and return the first non-empty capture.
fn extract_field(text: &str, patterns: &[Regex]) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}
