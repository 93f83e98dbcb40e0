//! `argus check` evaluates caller-supplied metrics against thresholds.
//!
//! The metric source is the command line itself, which makes this the probe
//! for wrapper scripts that already have a number in hand:
//!
//! ```text
//! argus check -s redis -m connected_clients=120 -w 100 -c 200
//! ```

use clap::ArgMatches;

use crate::core::report::{self, PerfData, RunStatus};
use crate::core::status::Status;
use crate::core::threshold::{self, ThresholdRule};
use crate::error::{CheckError, Result};

/// One `name=value[,w=WARN][,c=CRIT]` argument.
#[derive(Debug, PartialEq)]
struct MetricSpec {
    name: String,
    value: String,
    warning: Option<String>,
    critical: Option<String>,
}

fn parse_metric(raw: &str) -> Result<MetricSpec> {
    let mut fields = raw.split(',');
    let head = fields.next().unwrap_or_default();
    let (name, value) = head.split_once('=').ok_or_else(|| {
        CheckError::invalid_argument(format!("metric '{}' must look like name=value", raw))
    })?;
    if name.is_empty() {
        return Err(CheckError::invalid_argument(format!(
            "metric '{}' has an empty name",
            raw
        )));
    }

    let mut warning = None;
    let mut critical = None;
    for field in fields {
        match field.split_once('=') {
            Some(("w", spec)) => warning = Some(spec.to_string()),
            Some(("c", spec)) => critical = Some(spec.to_string()),
            _ => {
                return Err(CheckError::invalid_argument(format!(
                    "unrecognized field '{}' in metric '{}'",
                    field, raw
                )))
            }
        }
    }

    Ok(MetricSpec {
        name: name.to_string(),
        value: value.to_string(),
        warning,
        critical,
    })
}

pub fn execute(matches: &ArgMatches) -> ! {
    let service = matches.get_one::<String>("service").unwrap();
    let warning = matches.get_one::<String>("warning");
    let critical = matches.get_one::<String>("critical");

    let raw_metrics: Vec<&String> = matches
        .get_many::<String>("metric")
        .map(|values| values.collect())
        .unwrap_or_default();
    if raw_metrics.is_empty() {
        report::quit(
            Status::Unknown,
            "no metrics supplied, use --metric name=value",
        );
    }

    // Global thresholds are configuration; reject them before touching values.
    for (flag, spec) in [("--warning", warning), ("--critical", critical)] {
        if let Some(spec) = spec {
            if let Err(err) = ThresholdRule::parse(spec) {
                report::quit(Status::Unknown, &format!("bad {} spec: {}", flag, err));
            }
        }
    }

    let mut run = RunStatus::new();
    let mut perfdata = PerfData::new();

    for raw in raw_metrics {
        let metric = match parse_metric(raw) {
            Ok(metric) => metric,
            Err(err) => report::quit(Status::Unknown, &err.to_string()),
        };
        let value = match threshold::coerce(&metric.value) {
            Ok(value) => value,
            Err(err) => report::quit(
                Status::Unknown,
                &format!("metric '{}': {}", metric.name, err),
            ),
        };

        let warn = metric
            .warning
            .as_deref()
            .or(warning.map(|s| s.as_str()));
        let crit = metric
            .critical
            .as_deref()
            .or(critical.map(|s| s.as_str()));

        let verdict = match threshold::check(&metric.name, value, warn, crit) {
            Ok(verdict) => verdict,
            Err(err) => report::quit(
                Status::Unknown,
                &format!("metric '{}': {}", metric.name, err),
            ),
        };
        run.merge(&verdict);
        perfdata.push(&metric.name, value, warn, crit);
    }

    let (status, message) = run.resolve(&format!("{} within thresholds", service));
    report::quit_with(status, &message, &perfdata);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric_plain() {
        let metric = parse_metric("queue_size=120").unwrap();
        assert_eq!(metric.name, "queue_size");
        assert_eq!(metric.value, "120");
        assert!(metric.warning.is_none());
        assert!(metric.critical.is_none());
    }

    #[test]
    fn test_parse_metric_with_thresholds() {
        let metric = parse_metric("queue_size=120,w=100,c=200").unwrap();
        assert_eq!(metric.warning.as_deref(), Some("100"));
        assert_eq!(metric.critical.as_deref(), Some("200"));
    }

    #[test]
    fn test_parse_metric_threshold_forms_pass_through() {
        let metric = parse_metric("free=5,w=:10,c=:2").unwrap();
        assert_eq!(metric.warning.as_deref(), Some(":10"));
        assert_eq!(metric.critical.as_deref(), Some(":2"));
    }

    #[test]
    fn test_parse_metric_rejects_malformed_input() {
        let bad_specs = vec!["queue_size", "=5", "q=1,x=2", "q=1,w", "q=1,warn=2"];

        for raw in bad_specs {
            assert!(parse_metric(raw).is_err(), "should reject: {}", raw);
        }
    }
}
