// Argument validation shared by the check subcommands.
//
// Failures here are configuration errors: the check layer reports them as
// UNKNOWN before any network interaction happens.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{CheckError, Result};

/// Maximum URL length accepted on the command line.
const MAX_URL_LENGTH: usize = 2048;

/// Maximum hostname length per RFC 1035.
const MAX_HOSTNAME_LENGTH: usize = 253;

static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])\.)*([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])$")
        .expect("hostname pattern")
});

/// Validates a hostname or DNS domain name.
pub fn validate_hostname(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CheckError::invalid_argument("hostname cannot be empty"));
    }
    if trimmed.len() > MAX_HOSTNAME_LENGTH {
        return Err(CheckError::invalid_argument(format!(
            "hostname '{}' is too long ({} characters, max {})",
            trimmed,
            trimmed.len(),
            MAX_HOSTNAME_LENGTH
        )));
    }
    if !HOSTNAME_RE.is_match(trimmed) {
        return Err(CheckError::invalid_argument(format!(
            "'{}' is not a valid hostname",
            trimmed
        )));
    }
    Ok(())
}

/// Validates a timeout in whole seconds against the range a flag allows.
pub fn validate_timeout(seconds: u64, min: u64, max: u64, flag: &str) -> Result<()> {
    if seconds < min || seconds > max {
        return Err(CheckError::invalid_argument(format!(
            "{} must be between {} and {} seconds, got {}",
            flag, min, max, seconds
        )));
    }
    Ok(())
}

/// Validates a probe target URL: http/https scheme, a host, sane length.
pub fn validate_url(url_str: &str) -> Result<()> {
    let trimmed = url_str.trim();
    if trimmed.is_empty() {
        return Err(CheckError::invalid_argument("URL cannot be empty"));
    }
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(CheckError::invalid_argument(format!(
            "URL is too long ({} characters, max {})",
            trimmed.len(),
            MAX_URL_LENGTH
        )));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| CheckError::invalid_argument(format!("'{}' is not a URL: {}", trimmed, err)))?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(CheckError::invalid_argument(format!(
            "URL must use http or https, got '{}'",
            scheme
        )));
    }
    if url.host_str().is_none() {
        return Err(CheckError::invalid_argument(format!(
            "URL '{}' has no hostname",
            trimmed
        )));
    }

    Ok(())
}
