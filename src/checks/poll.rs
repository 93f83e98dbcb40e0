//! `argus poll` hammers a URL on an interval and prints latency lines.
//!
//! This is an operator utility, not a monitoring check: output is
//! multi-line and human-facing, and the exit code is a plain CLI one.
//! Ctrl-C stops the loop and still prints the summary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::ArgMatches;
use colored::*;

use crate::core::http;
use crate::core::validation;

#[derive(Debug, Default)]
struct PollStats {
    success: u64,
    fails: u64,
    total_ms: f64,
    min_ms: f64,
    max_ms: f64,
}

impl PollStats {
    fn record(&mut self, ms: f64) {
        self.success += 1;
        self.total_ms += ms;
        if self.success == 1 || ms < self.min_ms {
            self.min_ms = ms;
        }
        if ms > self.max_ms {
            self.max_ms = ms;
        }
    }

    fn summary(&self, requests: u64) -> String {
        if self.success == 0 {
            return format!("requests: {}, success: 0, fails: {}", requests, self.fails);
        }
        format!(
            "requests: {}, success: {}, fails: {} - avg: {:.2}ms, min: {:.2}ms, max: {:.2}ms",
            requests,
            self.success,
            self.fails,
            self.total_ms / self.success as f64,
            self.min_ms,
            self.max_ms
        )
    }
}

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let url = matches
        .get_one::<String>("url")
        .context("--url is required")?;
    let interval = *matches
        .get_one::<f64>("interval")
        .context("--interval is required")?;
    let count = *matches
        .get_one::<u64>("count")
        .context("--count is required")?;
    let timeout = *matches
        .get_one::<u64>("timeout")
        .context("--timeout is required")?;
    let show_body = matches.get_flag("output");

    validation::validate_url(url)?;
    validation::validate_timeout(timeout, 1, 300, "--timeout")?;
    if !interval.is_finite() || interval <= 0.0 {
        anyhow::bail!("--interval must be positive, got {}", interval);
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let flag = interrupted.clone();
        ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
            .context("installing interrupt handler")?;
    }

    let client = http::client(Duration::from_secs(timeout))?;

    let mut stats = PollStats::default();
    let mut sequence: u64 = 0;
    while !interrupted.load(Ordering::SeqCst) && (count == 0 || sequence < count) {
        sequence += 1;
        let stamp = Local::now().format("%H:%M:%S%.3f");

        match http::fetch(&client, url, timeout) {
            Ok(outcome) => {
                let ms = outcome.elapsed.as_secs_f64() * 1000.0;
                stats.record(ms);

                let code = outcome.status.to_string();
                let code = if outcome.status >= 500 {
                    code.red()
                } else if outcome.status >= 400 {
                    code.yellow()
                } else {
                    code.normal()
                };
                println!("{:<5} {} {} {:>9.2}ms {}", sequence, stamp, url, ms, code);
                if show_body {
                    println!("{}", outcome.body);
                }
            }
            Err(err) => {
                stats.fails += 1;
                println!(
                    "{:<5} {} {} {}",
                    sequence,
                    stamp,
                    url,
                    err.to_string().red()
                );
            }
        }

        if !interrupted.load(Ordering::SeqCst) && (count == 0 || sequence < count) {
            thread::sleep(Duration::from_secs_f64(interval));
        }
    }

    println!();
    println!("{}", stats.summary(sequence));
    Ok(())
}
