//! Logging helpers.
//!
//! The crate logs through `tracing` and never installs a subscriber. Every URL
//! that reaches a log line goes through [`redact_url`] first, since the access
//! token travels in the query string.

use url::Url;

const SENSITIVE_PARAMS: &[&str] = &["access_token", "token", "secret", "password", "api_key"];

/// Redact a URL, hiding tokens in query parameters.
pub fn redact_url(url: &Url) -> String {
    if url.query().is_none() {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            if SENSITIVE_PARAMS.iter().any(|s| key.eq_ignore_ascii_case(s)) {
                (key.into_owned(), "[REDACTED]".to_string())
            } else {
                (key.into_owned(), value.into_owned())
            }
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
