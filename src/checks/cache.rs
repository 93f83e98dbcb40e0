//! `argus cache` audits the `Cache-Control: max-age` advertised by groups
//! of cached URLs against the TTL each group is supposed to carry.
//!
//! Group files are JSON:
//!
//! ```json
//! [
//!   { "name": "static assets", "ttl": "30m", "urls": ["/css/site.css"] },
//!   { "name": "landing pages", "ttl": "2h", "urls": ["/", "/pricing"] }
//! ]
//! ```
//!
//! A wrong or missing max-age counts as a cache error, a failed request as
//! a page error; both counts run through the usual thresholds.

use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::ArgMatches;
use serde::Deserialize;

use crate::core::http;
use crate::core::report::{self, PerfData, RunStatus};
use crate::core::status::Status;
use crate::core::threshold::{self, ThresholdRule};
use crate::core::validation;
use crate::error::{CheckError, Result};

/// One named group of URLs sharing an expected TTL.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct UrlGroup {
    pub name: String,
    pub ttl: String,
    pub urls: Vec<String>,
}

/// Loads and parses a JSON group file.
pub fn load_groups(path: &Path) -> anyhow::Result<Vec<UrlGroup>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading url group file {}", path.display()))?;
    let groups: Vec<UrlGroup> =
        serde_json::from_str(&raw).with_context(|| format!("parsing url group file {}", path.display()))?;
    Ok(groups)
}

/// Parses a TTL spec (`N` or `N[smhdw]`) into seconds.
pub fn parse_ttl(spec: &str) -> Result<u64> {
    let trimmed = spec.trim();
    let (digits, multiplier) = match trimmed.chars().last() {
        Some('s') => (&trimmed[..trimmed.len() - 1], 1),
        Some('m') => (&trimmed[..trimmed.len() - 1], 60),
        Some('h') => (&trimmed[..trimmed.len() - 1], 3_600),
        Some('d') => (&trimmed[..trimmed.len() - 1], 86_400),
        Some('w') => (&trimmed[..trimmed.len() - 1], 604_800),
        Some(c) if c.is_ascii_digit() => (trimmed, 1),
        _ => {
            return Err(CheckError::invalid_argument(format!(
                "bad ttl '{}': expected N or N[smhdw]",
                spec
            )))
        }
    };
    let count: u64 = digits.parse().map_err(|_| {
        CheckError::invalid_argument(format!("bad ttl '{}': expected N or N[smhdw]", spec))
    })?;
    Ok(count * multiplier)
}

// The status line stays single-line; only a small sample of offenders fits.
fn record(offenders: &mut Vec<String>, detail: String) {
    if offenders.len() < 3 {
        offenders.push(detail);
    }
}

fn target_url(hostname: &str, entry: &str) -> String {
    if entry.starts_with("http://") || entry.starts_with("https://") {
        return entry.to_string();
    }
    if entry.starts_with('/') {
        format!("http://{}{}", hostname, entry)
    } else {
        format!("http://{}/{}", hostname, entry)
    }
}

pub fn execute(matches: &ArgMatches) -> ! {
    let hostname = matches.get_one::<String>("hostname").unwrap();
    let file = matches.get_one::<String>("urls").unwrap();
    let warning = matches.get_one::<String>("warning").unwrap();
    let critical = matches.get_one::<String>("critical").unwrap();
    let page_warning = matches.get_one::<String>("page-warning").unwrap();
    let page_critical = matches.get_one::<String>("page-critical").unwrap();
    let timeout = *matches.get_one::<u64>("timeout").unwrap();
    let request_timeout = *matches.get_one::<u64>("request-timeout").unwrap();

    if let Err(err) = validation::validate_hostname(hostname) {
        report::quit(Status::Unknown, &format!("bad --hostname: {}", err));
    }
    if let Err(err) = validation::validate_timeout(timeout, 30, 300, "--timeout") {
        report::quit(Status::Unknown, &err.to_string());
    }
    if let Err(err) = validation::validate_timeout(request_timeout, 1, 30, "--request-timeout") {
        report::quit(Status::Unknown, &err.to_string());
    }
    for (flag, spec) in [
        ("--warning", warning),
        ("--critical", critical),
        ("--page-warning", page_warning),
        ("--page-critical", page_critical),
    ] {
        if let Err(err) = ThresholdRule::parse(spec) {
            report::quit(Status::Unknown, &format!("bad {} spec: {}", flag, err));
        }
    }

    let groups = match load_groups(Path::new(file)) {
        Ok(groups) => groups,
        Err(err) => report::quit(Status::Unknown, &format!("{:#}", err)),
    };
    if groups.is_empty() {
        report::quit(Status::Unknown, &format!("no url groups in {}", file));
    }

    let mut expected_ttls = Vec::with_capacity(groups.len());
    for group in &groups {
        match parse_ttl(&group.ttl) {
            Ok(seconds) => expected_ttls.push(seconds),
            Err(err) => report::quit(
                Status::Unknown,
                &format!("group '{}': {}", group.name, err),
            ),
        }
    }

    let client = match http::client(Duration::from_secs(request_timeout)) {
        Ok(client) => client,
        Err(err) => report::quit(Status::Unknown, &err.to_string()),
    };

    let total: usize = groups.iter().map(|group| group.urls.len()).sum();
    let budget = Duration::from_secs(timeout);
    let started = Instant::now();

    let mut requests = 0u64;
    let mut cache_errors = 0u64;
    let mut page_errors = 0u64;
    let mut offenders: Vec<String> = Vec::new();

    for (group, &expected) in groups.iter().zip(&expected_ttls) {
        for entry in &group.urls {
            if started.elapsed() >= budget {
                report::quit(
                    Status::Critical,
                    &format!(
                        "timed out after {} seconds ({} of {} urls checked)",
                        timeout, requests, total
                    ),
                );
            }

            let url = target_url(hostname, entry);
            requests += 1;
            match http::fetch(&client, &url, request_timeout) {
                Ok(outcome) if outcome.status >= 400 => {
                    page_errors += 1;
                    record(&mut offenders, format!("{} (status {})", url, outcome.status));
                }
                Ok(outcome) => match outcome.max_age {
                    Some(age) if age == expected => {}
                    Some(age) => {
                        cache_errors += 1;
                        record(
                            &mut offenders,
                            format!("{} (max-age {} != {})", url, age, expected),
                        );
                    }
                    None => {
                        cache_errors += 1;
                        record(&mut offenders, format!("{} (no cache-control)", url));
                    }
                },
                Err(err) => {
                    log::warn!("{}", err);
                    page_errors += 1;
                    record(&mut offenders, format!("{} (unreachable)", url));
                }
            }
        }
    }

    let mut run = RunStatus::new();
    let checks = [
        ("cache errors", cache_errors, warning.as_str(), critical.as_str()),
        (
            "page errors",
            page_errors,
            page_warning.as_str(),
            page_critical.as_str(),
        ),
    ];
    for (label, count, warn, crit) in checks {
        match threshold::check(label, count as f64, Some(warn), Some(crit)) {
            Ok(verdict) => run.merge(&verdict),
            Err(err) => report::quit(Status::Unknown, &err.to_string()),
        }
    }

    let mut perfdata = PerfData::new();
    perfdata.push(
        "cache_errors",
        cache_errors,
        Some(warning.as_str()),
        Some(critical.as_str()),
    );
    perfdata.push(
        "page_errors",
        page_errors,
        Some(page_warning.as_str()),
        Some(page_critical.as_str()),
    );
    perfdata.push("requests", requests, None, None);

    let (status, mut message) =
        run.resolve(&format!("checked {} urls, cache ttls as expected", requests));
    if status != Status::Ok && !offenders.is_empty() {
        message = format!("{} [{}]", message, offenders.join(", "));
    }
    report::quit_with(status, &message, &perfdata);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ttl_units() {
        let specs = vec![
            ("30", 30),
            ("45s", 45),
            ("30m", 1_800),
            ("2h", 7_200),
            ("1d", 86_400),
            ("1w", 604_800),
            ("0", 0),
        ];

        for (spec, seconds) in specs {
            assert_eq!(parse_ttl(spec).unwrap(), seconds, "spec: {}", spec);
        }
    }

    #[test]
    fn test_parse_ttl_rejects_garbage() {
        for spec in ["", "m", "30x", "h30", "-5m", "3.5h"] {
            assert!(parse_ttl(spec).is_err(), "should reject: {:?}", spec);
        }
    }

    #[test]
    fn test_target_url_joins_paths() {
        assert_eq!(
            target_url("cache.example.com", "/css/site.css"),
            "http://cache.example.com/css/site.css"
        );
        assert_eq!(
            target_url("cache.example.com", "pricing"),
            "http://cache.example.com/pricing"
        );
        assert_eq!(
            target_url("cache.example.com", "https://cdn.example.com/app.js"),
            "https://cdn.example.com/app.js"
        );
    }
}
