//! `argus dns` verifies that a host resolves inside one or more domains.
//!
//! Resolution goes through the system resolver. Each lookup runs on a worker
//! thread so the probe can enforce its own deadline; a lookup that outlives
//! the deadline is abandoned, not joined.

use std::net::ToSocketAddrs;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use clap::ArgMatches;

use crate::core::report;
use crate::core::status::Status;
use crate::core::validation;

fn resolves(fqdn: &str, deadline: Duration) -> bool {
    let (tx, rx) = mpsc::channel();
    let target = format!("{}:0", fqdn);

    thread::spawn(move || {
        let found = target
            .to_socket_addrs()
            .map(|mut addrs| addrs.next().is_some())
            .unwrap_or(false);
        let _ = tx.send(found);
    });

    match rx.recv_timeout(deadline) {
        Ok(found) => found,
        Err(_) => {
            log::debug!("resolver deadline elapsed for {}", fqdn);
            false
        }
    }
}

pub fn execute(matches: &ArgMatches) -> ! {
    let host = matches.get_one::<String>("host").unwrap();
    let domains_arg = matches.get_one::<String>("domains").unwrap();
    let require = matches.get_one::<String>("require").unwrap();
    let timeout = *matches.get_one::<u64>("timeout").unwrap();

    if let Err(err) = validation::validate_hostname(host) {
        report::quit(Status::Unknown, &format!("bad --host: {}", err));
    }
    if let Err(err) = validation::validate_timeout(timeout, 1, 300, "--timeout") {
        report::quit(Status::Unknown, &err.to_string());
    }

    let domains: Vec<String> = domains_arg
        .split(',')
        .map(|domain| domain.trim().to_string())
        .filter(|domain| !domain.is_empty())
        .collect();
    if domains.is_empty() {
        report::quit(Status::Unknown, "no domains supplied, use --domains a.com,b.com");
    }
    for domain in &domains {
        if let Err(err) = validation::validate_hostname(domain) {
            report::quit(Status::Unknown, &format!("bad --domains entry: {}", err));
        }
    }

    let deadline = Duration::from_secs(timeout);
    let mut resolved = Vec::new();
    let mut failed = Vec::new();
    for domain in &domains {
        let fqdn = format!("{}.{}", host, domain);
        if resolves(&fqdn, deadline) {
            resolved.push(domain.clone());
        } else {
            failed.push(domain.clone());
        }
    }

    if require == "all" {
        if failed.is_empty() {
            report::quit(
                Status::Ok,
                &format!("{} resolves in {}", host, resolved.join(", ")),
            );
        }
        report::quit(
            Status::Critical,
            &format!("failed to resolve {} in {}", host, failed.join(", ")),
        );
    }

    // any
    if resolved.is_empty() {
        report::quit(
            Status::Critical,
            &format!("failed to resolve {} in any of {}", host, domains.join(", ")),
        );
    }
    if failed.is_empty() {
        report::quit(
            Status::Ok,
            &format!("{} resolves in {}", host, resolved.join(", ")),
        );
    }
    report::quit(
        Status::Ok,
        &format!(
            "{} resolves in {}, but not in {}",
            host,
            resolved.join(", "),
            failed.join(", ")
        ),
    );
}
