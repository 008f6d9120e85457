//! Destination URL normalization
//!
//! Bare destinations like `example.com` are accepted and defaulted to
//! `https://`; anything that does not parse as an http(s) URL afterwards
//! is rejected.

use url::Url;

use crate::errors::{LinkgateError, Result};

/// Normalize a destination URL, defaulting the scheme to `https://`.
pub fn normalize_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LinkgateError::validation("A valid URL is required."));
    }

    let lower = raw.to_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };

    let parsed =
        Url::parse(&candidate).map_err(|_| LinkgateError::validation("A valid URL is required."))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(LinkgateError::validation("A valid URL is required."));
    }
    if parsed.host_str().is_none() {
        return Err(LinkgateError::validation("A valid URL is required."));
    }

    Ok(candidate)
}
