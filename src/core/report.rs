//! Run-level status accumulation and the process exit contract.
//!
//! A probe merges every verdict it produces into one [`RunStatus`], resolves
//! it to a final line, and leaves through [`quit`] or [`quit_with`]. The line
//! format and the exit codes are fixed by the monitoring host.

use std::fmt;
use std::process;

use crate::core::status::Status;
use crate::core::threshold::Verdict;

/// Rolling severity for one check run.
///
/// Verdicts merge monotonically: critical is sticky and never downgraded by
/// a later warning, while messages keep accumulating in evaluation order.
/// Unknown outcomes never pass through here; they terminate the run directly.
#[derive(Debug)]
pub struct RunStatus {
    status: Status,
    messages: Vec<String>,
}

impl RunStatus {
    pub fn new() -> Self {
        RunStatus {
            status: Status::Ok,
            messages: Vec::new(),
        }
    }

    /// Folds one verdict into the run.
    pub fn merge(&mut self, verdict: &Verdict) {
        if verdict.status == Status::Ok {
            return;
        }
        if self.status != Status::Critical {
            self.status = verdict.status;
        }
        if let Some(message) = &verdict.message {
            self.messages.push(message.clone());
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Resolves the run into its final severity and message.
    ///
    /// `all_clear` is used when nothing fired; otherwise the collected
    /// breach messages are joined in evaluation order.
    pub fn resolve(&self, all_clear: &str) -> (Status, String) {
        if self.messages.is_empty() {
            (self.status, all_clear.to_string())
        } else {
            (self.status, self.messages.join(", "))
        }
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for the trailing performance-data segment.
///
/// Samples render as `'name'=value;warn;crit;` separated by single spaces.
/// The reporter passes the rendered text through without interpreting it.
#[derive(Debug, Default)]
pub struct PerfData {
    samples: Vec<String>,
}

impl PerfData {
    pub fn new() -> Self {
        PerfData {
            samples: Vec::new(),
        }
    }

    pub fn push(
        &mut self,
        name: &str,
        value: impl fmt::Display,
        warning: Option<&str>,
        critical: Option<&str>,
    ) {
        self.samples.push(format!(
            "'{}'={};{};{};",
            name,
            value,
            warning.unwrap_or(""),
            critical.unwrap_or("")
        ));
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn render(&self) -> String {
        self.samples.join(" ")
    }
}

/// Renders the single protocol line: `"<SEVERITY>: <message>[ | perfdata]"`.
pub fn render_status_line(status: Status, message: &str, perfdata: Option<&str>) -> String {
    match perfdata {
        Some(data) if !data.is_empty() => format!("{}: {} | {}", status, message, data),
        _ => format!("{}: {}", status, message),
    }
}

/// Prints the protocol line and terminates with the mapped exit code.
///
/// The only sanctioned exit path for a completed check.
pub fn quit(status: Status, message: &str) -> ! {
    println!("{}", render_status_line(status, message, None));
    process::exit(status.exit_code())
}

/// Like [`quit`], with a performance-data suffix when one was collected.
pub fn quit_with(status: Status, message: &str, perfdata: &PerfData) -> ! {
    let rendered = perfdata.render();
    let suffix = if perfdata.is_empty() {
        None
    } else {
        Some(rendered.as_str())
    };
    println!("{}", render_status_line(status, message, suffix));
    process::exit(status.exit_code())
}
