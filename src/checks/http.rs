//! `argus http` probes a URL and thresholds the response time.
//!
//! Connection refusal and deadline expiry default to CRITICAL; `--on-error`
//! redirects that outcome when a flapping endpoint should only page as
//! UNKNOWN or WARNING.

use std::time::Duration;

use clap::ArgMatches;
use regex::Regex;

use crate::core::http;
use crate::core::report::{self, PerfData, RunStatus};
use crate::core::status::Status;
use crate::core::threshold::{self, ThresholdRule, Verdict};
use crate::core::validation;

pub fn execute(matches: &ArgMatches) -> ! {
    let url = matches.get_one::<String>("url").unwrap();
    let timeout = *matches.get_one::<u64>("timeout").unwrap();
    let warning = matches.get_one::<String>("warning");
    let critical = matches.get_one::<String>("critical");
    let expect_status = matches.get_one::<u16>("expect-status");
    let expect = matches.get_one::<String>("expect");
    let on_error_name = matches.get_one::<String>("on-error").unwrap();

    if let Err(err) = validation::validate_url(url) {
        report::quit(Status::Unknown, &format!("bad --url: {}", err));
    }
    if let Err(err) = validation::validate_timeout(timeout, 1, 300, "--timeout") {
        report::quit(Status::Unknown, &err.to_string());
    }
    for (flag, spec) in [("--warning", warning), ("--critical", critical)] {
        if let Some(spec) = spec {
            if let Err(err) = ThresholdRule::parse(spec) {
                report::quit(Status::Unknown, &format!("bad {} spec: {}", flag, err));
            }
        }
    }
    let on_error = match on_error_name.parse::<Status>() {
        Ok(status) => status,
        Err(err) => report::quit(Status::Unknown, &err.to_string()),
    };
    let body_pattern = expect.map(|pattern| match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => report::quit(Status::Unknown, &format!("bad --expect pattern: {}", err)),
    });

    let client = match http::client(Duration::from_secs(timeout)) {
        Ok(client) => client,
        Err(err) => report::quit(Status::Unknown, &err.to_string()),
    };
    let outcome = match http::fetch(&client, url, timeout) {
        Ok(outcome) => outcome,
        Err(err) => report::quit(on_error, &err.to_string()),
    };

    let millis = outcome.elapsed.as_millis();
    let mut run = RunStatus::new();

    match expect_status {
        Some(code) if outcome.status != *code => run.merge(&Verdict::breach(
            Status::Critical,
            "status",
            format!("status {} (expected {})", outcome.status, code),
        )),
        None if outcome.status >= 400 => run.merge(&Verdict::breach(
            Status::Critical,
            "status",
            format!("status {}", outcome.status),
        )),
        _ => {}
    }

    if let Some(re) = &body_pattern {
        if !re.is_match(&outcome.body) {
            run.merge(&Verdict::breach(
                Status::Critical,
                "content",
                format!("body does not match /{}/", re.as_str()),
            ));
        }
    }

    let warn = warning.map(|s| s.as_str());
    let crit = critical.map(|s| s.as_str());
    match threshold::check("time", millis as f64, warn, crit) {
        Ok(verdict) => run.merge(&verdict),
        Err(err) => report::quit(Status::Unknown, &err.to_string()),
    }

    let mut perfdata = PerfData::new();
    perfdata.push("time", format!("{}ms", millis), warn, crit);
    perfdata.push("size", format!("{}B", outcome.body.len()), None, None);

    let (status, message) = run.resolve(&format!(
        "{} returned {} in {}ms",
        url, outcome.status, millis
    ));
    report::quit_with(status, &message, &perfdata);
}
