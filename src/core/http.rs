// Bounded-deadline HTTP plumbing shared by the network probes.

use std::time::{Duration, Instant};

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, CACHE_CONTROL};

use crate::error::{CheckError, Result};

/// What one bounded GET produced.
#[derive(Debug)]
pub struct FetchOutcome {
    pub status: u16,
    pub elapsed: Duration,
    pub body: String,
    /// `Cache-Control: max-age` in seconds, when the response advertised one.
    pub max_age: Option<u64>,
}

/// Builds a blocking client whose connect and overall deadlines are both
/// capped at `timeout`. A probe never hangs past its budget.
pub fn client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(concat!("argus/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// One GET under the client's deadline, with transport failures classified
/// into the probe error taxonomy.
pub fn fetch(client: &Client, url: &str, timeout_secs: u64) -> Result<FetchOutcome> {
    let started = Instant::now();

    let response = client
        .get(url)
        .send()
        .map_err(|err| classify(err, url, timeout_secs))?;

    let status = response.status().as_u16();
    let max_age = cache_max_age(response.headers());
    let body = response
        .text()
        .map_err(|err| classify(err, url, timeout_secs))?;
    let elapsed = started.elapsed();

    log::debug!("GET {} -> {} in {}ms", url, status, elapsed.as_millis());

    Ok(FetchOutcome {
        status,
        elapsed,
        body,
        max_age,
    })
}

fn classify(err: reqwest::Error, url: &str, timeout_secs: u64) -> CheckError {
    if err.is_timeout() {
        CheckError::timeout(url, timeout_secs)
    } else if err.is_connect() {
        CheckError::connection_refused(url)
    } else {
        CheckError::Http(err)
    }
}

fn cache_max_age(headers: &HeaderMap) -> Option<u64> {
    let value = headers.get(CACHE_CONTROL)?.to_str().ok()?;
    for directive in value.split(',') {
        if let Some(age) = directive.trim().strip_prefix("max-age=") {
            return age.parse().ok();
        }
    }
    None
}
