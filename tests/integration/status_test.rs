use argus::core::status::Status;
use argus::error::CheckError;

#[test]
fn test_exit_code_contract() {
    let mapping = [
        (Status::Ok, 0),
        (Status::Warning, 1),
        (Status::Critical, 2),
        (Status::Unknown, 3),
    ];

    for (status, code) in mapping {
        assert_eq!(status.exit_code(), code);
    }
}

#[test]
fn test_merge_ordering() {
    assert!(Status::Ok < Status::Warning);
    assert!(Status::Warning < Status::Critical);
}

#[test]
fn test_severity_names_round_trip() {
    for name in Status::names() {
        let status: Status = name.parse().unwrap();
        assert_eq!(status.to_string(), name);
    }
}

#[test]
fn test_out_of_set_severity_is_rejected() {
    let err = "fatal".parse::<Status>().unwrap_err();
    assert!(matches!(err, CheckError::InvalidSeverity(_)));
    // The reporter maps this failure to UNKNOWN's exit code.
    assert_eq!(Status::Unknown.exit_code(), 3);
}
