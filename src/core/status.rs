use std::fmt;
use std::str::FromStr;

use crate::error::CheckError;

/// Severity of a check outcome.
///
/// The derived ordering (`Ok < Warning < Critical < Unknown`) follows the
/// monitoring convention; the exit codes are a protocol contract with the
/// monitoring host and must not change.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    /// Process exit code understood by the monitoring host.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    /// Severity names accepted by `from_str`, in ascending order.
    pub fn names() -> [&'static str; 4] {
        ["OK", "WARNING", "CRITICAL", "UNKNOWN"]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        };
        f.write_str(name)
    }
}

impl FromStr for Status {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OK" => Ok(Status::Ok),
            "WARNING" => Ok(Status::Warning),
            "CRITICAL" => Ok(Status::Critical),
            "UNKNOWN" => Ok(Status::Unknown),
            _ => Err(CheckError::invalid_severity(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Status::Ok.exit_code(), 0);
        assert_eq!(Status::Warning.exit_code(), 1);
        assert_eq!(Status::Critical.exit_code(), 2);
        assert_eq!(Status::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_ordering() {
        assert!(Status::Ok < Status::Warning);
        assert!(Status::Warning < Status::Critical);
        assert!(Status::Critical < Status::Unknown);
    }

    #[test]
    fn test_display_names() {
        let expected = ["OK", "WARNING", "CRITICAL", "UNKNOWN"];
        let statuses = [
            Status::Ok,
            Status::Warning,
            Status::Critical,
            Status::Unknown,
        ];

        for (status, name) in statuses.iter().zip(expected) {
            assert_eq!(status.to_string(), name);
        }
    }

    #[test]
    fn test_from_str_accepts_any_case() {
        assert_eq!("ok".parse::<Status>().unwrap(), Status::Ok);
        assert_eq!("Warning".parse::<Status>().unwrap(), Status::Warning);
        assert_eq!("CRITICAL".parse::<Status>().unwrap(), Status::Critical);
        assert_eq!("unknown".parse::<Status>().unwrap(), Status::Unknown);
    }

    #[test]
    fn test_from_str_rejects_out_of_set_names() {
        for name in ["fatal", "warn", "", "2"] {
            let err = name.parse::<Status>().unwrap_err();
            assert!(
                matches!(err, CheckError::InvalidSeverity(_)),
                "should reject: {}",
                name
            );
        }
    }
}
