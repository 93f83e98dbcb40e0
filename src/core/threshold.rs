//! Threshold rule grammar and evaluation.
//!
//! Every probe expresses its warning and critical boundaries with the same
//! compact string grammar:
//!
//! | spec  | rule                        |
//! |-------|-----------------------------|
//! | `N`   | alert when value > N        |
//! | `:N`  | alert when value < N        |
//! | `N:M` | alert when N < value < M    |
//! | `:N:` | alert when value != N       |
//!
//! Anything else is a hard parse failure, never a silent pass.

use crate::core::status::Status;
use crate::error::{CheckError, Result};

/// One parsed side (warning or critical) of a check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdRule {
    GreaterThan(f64),
    LessThan(f64),
    Equal(f64),
    Range { min: f64, max: f64 },
}

/// The outcome of evaluating one named metric.
///
/// `message` is present iff the metric breached, and states the failed
/// comparison, e.g. `"queue_size (120>100)"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub status: Status,
    pub label: String,
    pub message: Option<String>,
}

impl Verdict {
    /// A clean verdict for `label`.
    pub fn ok(label: &str) -> Self {
        Verdict {
            status: Status::Ok,
            label: label.to_string(),
            message: None,
        }
    }

    /// A breaching verdict carrying an explanation.
    pub fn breach(status: Status, label: &str, message: String) -> Self {
        Verdict {
            status,
            label: label.to_string(),
            message: Some(message),
        }
    }
}

impl ThresholdRule {
    /// Parses a specification string into a rule.
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').collect();
        let rule = match parts.as_slice() {
            [n] => ThresholdRule::GreaterThan(parse_bound(n, spec)?),
            ["", n] => ThresholdRule::LessThan(parse_bound(n, spec)?),
            [min, max] => ThresholdRule::Range {
                min: parse_bound(min, spec)?,
                max: parse_bound(max, spec)?,
            },
            ["", n, ""] => ThresholdRule::Equal(parse_bound(n, spec)?),
            _ => return Err(CheckError::invalid_threshold(spec)),
        };
        Ok(rule)
    }

    /// Evaluates `value` against the rule.
    ///
    /// A breach is tagged with `level`, the caller's warning or critical
    /// severity; anything else comes back as an OK verdict with no message.
    /// Zero is an ordinary value and is evaluated like any other.
    pub fn evaluate(&self, label: &str, value: f64, level: Status) -> Verdict {
        let breach = match *self {
            ThresholdRule::GreaterThan(bound) if value > bound => {
                Some(format!("{} ({}>{})", label, value, bound))
            }
            ThresholdRule::LessThan(bound) if value < bound => {
                Some(format!("{} ({}<{})", label, value, bound))
            }
            ThresholdRule::Equal(bound) if value != bound => {
                Some(format!("{} ({}!={})", label, value, bound))
            }
            // Strictly between, not inclusive.
            ThresholdRule::Range { min, max } if min < value && value < max => {
                Some(format!("{} ({}<{}<{})", label, min, value, max))
            }
            _ => None,
        };

        match breach {
            Some(message) => Verdict::breach(level, label, message),
            None => Verdict::ok(label),
        }
    }
}

/// Normalizes a textual metric value into `f64`.
///
/// This is the single coercion point for upstream data: anything that is not
/// a finite decimal number is rejected with `InvalidNumericValue`.
pub fn coerce(value: &str) -> Result<f64> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| CheckError::invalid_numeric(value))?;
    if !parsed.is_finite() {
        return Err(CheckError::invalid_numeric(value));
    }
    Ok(parsed)
}

/// Evaluates one metric against optional warning and critical specs.
///
/// Warning is evaluated first and critical after, so when both sides fire
/// the critical verdict overwrites the warning one. With neither spec the
/// metric passes.
pub fn check(
    label: &str,
    value: f64,
    warning: Option<&str>,
    critical: Option<&str>,
) -> Result<Verdict> {
    let mut verdict = Verdict::ok(label);

    if let Some(spec) = warning {
        let fired = ThresholdRule::parse(spec)?.evaluate(label, value, Status::Warning);
        if fired.status != Status::Ok {
            verdict = fired;
        }
    }
    if let Some(spec) = critical {
        let fired = ThresholdRule::parse(spec)?.evaluate(label, value, Status::Critical);
        if fired.status != Status::Ok {
            verdict = fired;
        }
    }

    Ok(verdict)
}

fn parse_bound(text: &str, spec: &str) -> Result<f64> {
    let bound: f64 = text
        .trim()
        .parse()
        .map_err(|_| CheckError::invalid_threshold(spec))?;
    if !bound.is_finite() {
        return Err(CheckError::invalid_threshold(spec));
    }
    Ok(bound)
}
