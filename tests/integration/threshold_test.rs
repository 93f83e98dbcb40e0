use argus::core::status::Status;
use argus::core::threshold::{self, ThresholdRule};
use argus::error::CheckError;

#[test]
fn test_grammar_maps_to_rules() {
    let cases = vec![
        ("80", ThresholdRule::GreaterThan(80.0)),
        (":10", ThresholdRule::LessThan(10.0)),
        (
            "10:20",
            ThresholdRule::Range {
                min: 10.0,
                max: 20.0,
            },
        ),
        (":5:", ThresholdRule::Equal(5.0)),
    ];

    for (spec, expected) in cases {
        assert_eq!(ThresholdRule::parse(spec).unwrap(), expected, "spec: {}", spec);
    }
}

#[test]
fn test_grammar_rejects_everything_else() {
    for spec in ["", "abc", "1:2:3", "5:", "::", "10:x"] {
        let err = ThresholdRule::parse(spec).unwrap_err();
        assert!(
            matches!(err, CheckError::InvalidThresholdFormat(_)),
            "should reject: {:?}",
            spec
        );
    }
}

#[test]
fn test_value_between_warning_and_critical_warns() {
    // load 90 against -w 80 -c 95
    let verdict = threshold::check("load", 90.0, Some("80"), Some("95")).unwrap();
    assert_eq!(verdict.status, Status::Warning);
    assert!(verdict.message.unwrap().contains("(90>80)"));
}

#[test]
fn test_lower_bound_breach_warns() {
    let verdict = threshold::check("free", 5.0, Some(":10"), None).unwrap();
    assert_eq!(verdict.status, Status::Warning);
    assert!(verdict.message.unwrap().contains("(5<10)"));
}

#[test]
fn test_value_strictly_inside_range_warns() {
    let verdict = threshold::check("temp", 15.0, Some("10:20"), None).unwrap();
    assert_eq!(verdict.status, Status::Warning);

    for boundary in [10.0, 20.0] {
        let verdict = threshold::check("temp", boundary, Some("10:20"), None).unwrap();
        assert_eq!(verdict.status, Status::Ok, "boundary {} is outside", boundary);
    }
}

#[test]
fn test_zero_is_an_ordinary_value() {
    let verdict = threshold::check("replicas", 0.0, Some(":1"), None).unwrap();
    assert_eq!(verdict.status, Status::Warning);
}

#[test]
fn test_critical_overwrites_warning_for_one_metric() {
    let verdict = threshold::check("load", 96.0, Some("80"), Some("95")).unwrap();
    assert_eq!(verdict.status, Status::Critical);
    assert_eq!(verdict.message.as_deref(), Some("load (96>95)"));
}

#[test]
fn test_coercion_happens_once_at_the_boundary() {
    assert_eq!(threshold::coerce("90").unwrap(), 90.0);
    assert_eq!(threshold::coerce("0").unwrap(), 0.0);

    for raw in ["ninety", "", "nan"] {
        let err = threshold::coerce(raw).unwrap_err();
        assert!(
            matches!(err, CheckError::InvalidNumericValue(_)),
            "should reject: {:?}",
            raw
        );
    }
}
