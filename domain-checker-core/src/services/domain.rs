//! Domain extraction from user-supplied URL or host strings.

use log::{debug, warn};
use url::Url;

use crate::error::{CheckerError, CheckerResult};

/// Extract the bare domain from a full URL, a bare host, or a `www.` host.
///
/// The authority of an absolute URL is used when present, exactly as typed
/// (case, port and Unicode labels are kept, `user:pass@` is dropped);
/// otherwise the whole input is taken as the host. A literal leading `www.`
/// is stripped. Labels are not validated and ports are not removed.
pub fn normalize_domain(input: &str) -> CheckerResult<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CheckerError::InvalidInput);
    }

    if has_invalid_percent_encoding(input) {
        warn!("[NORMALIZE] Invalid percent-encoding in input: {input}");
        return Err(CheckerError::MalformedUrl(format!(
            "invalid escape sequence in {input:?}"
        )));
    }

    let host = match Url::parse(input) {
        Ok(url) if url.host_str().is_some_and(|h| !h.is_empty()) => input
            .get(url.scheme().len() + 1..)
            .and_then(raw_authority)
            .unwrap_or(input),
        Ok(_) => input,
        // No scheme: a bare host (possibly with a path) or `//host/...`.
        Err(url::ParseError::RelativeUrlWithoutBase) => raw_authority(input).unwrap_or(input),
        Err(e) => {
            warn!("[NORMALIZE] Invalid URL format: {input} - {e}");
            return Err(CheckerError::MalformedUrl(e.to_string()));
        }
    };

    let domain = host.strip_prefix("www.").unwrap_or(host).to_string();
    debug!("[NORMALIZE] Extracted domain: {domain} (input: {input})");
    Ok(domain)
}

/// Host and port text of `//[user@]host[:port][/?#...]`, untouched.
fn raw_authority(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix("//")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    (!host.is_empty()).then_some(host)
}

/// `%` must be followed by two hex digits.
fn has_invalid_percent_encoding(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !matches!(
                (bytes.get(i + 1), bytes.get(i + 2)),
                (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit()
            )
    })
}
