//! `argus run` executes a command under an exclusive advisory lock so
//! overlapping cron or scheduler invocations cannot stampede.
//!
//! The lock is a `flock(2)` on a lock file, acquired by polling until the
//! deadline. The child's exit code is propagated; a missed lock exits 1.

use std::fs::{self, File, OpenOptions};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::process::{self, Command};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::ArgMatches;

fn try_lock(file: &File) -> bool {
    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    rc == 0
}

fn default_lock_path(command: &str) -> String {
    let name = Path::new(command)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "argus-run".to_string());
    format!("/tmp/{}.lock", name)
}

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let command: Vec<&String> = matches
        .get_many::<String>("command")
        .map(|values| values.collect())
        .unwrap_or_default();
    if command.is_empty() {
        anyhow::bail!("no command given");
    }
    let timeout = *matches
        .get_one::<u64>("timeout")
        .context("--timeout is required")?;
    let lock_path = matches
        .get_one::<String>("lock")
        .cloned()
        .unwrap_or_else(|| default_lock_path(command[0]));

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .open(&lock_path)
        .with_context(|| format!("opening lock file {}", lock_path))?;

    let deadline = Instant::now() + Duration::from_secs(timeout);
    while !try_lock(&file) {
        if Instant::now() >= deadline {
            eprintln!(
                "unable to acquire lock {} within {} seconds",
                lock_path, timeout
            );
            process::exit(1);
        }
        thread::sleep(Duration::from_millis(250));
    }
    log::debug!("acquired lock {}", lock_path);

    let status = Command::new(command[0])
        .args(&command[1..])
        .status()
        .with_context(|| format!("running {}", command[0]))?;

    if let Err(err) = fs::remove_file(&lock_path) {
        log::warn!("could not remove lock file {}: {}", lock_path, err);
    }

    process::exit(status.code().unwrap_or(1));
}
