use std::fs;

use tempfile::TempDir;

use argus::checks::cache::{load_groups, parse_ttl};

#[test]
fn test_load_groups_from_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("groups.json");
    fs::write(
        &path,
        r#"[
            { "name": "static assets", "ttl": "30m", "urls": ["/css/site.css", "/js/app.js"] },
            { "name": "homepage", "ttl": "60", "urls": ["/"] }
        ]"#,
    )
    .unwrap();

    let groups = load_groups(&path).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].name, "static assets");
    assert_eq!(groups[0].urls.len(), 2);
    assert_eq!(groups[1].ttl, "60");
}

#[test]
fn test_load_groups_reports_bad_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("groups.json");

    assert!(load_groups(&path).is_err(), "missing file");

    fs::write(&path, "{ not json").unwrap();
    assert!(load_groups(&path).is_err(), "malformed json");
}

#[test]
fn test_ttl_units() {
    let cases = [
        ("45", 45),
        ("45s", 45),
        ("30m", 1_800),
        ("2h", 7_200),
        ("1d", 86_400),
        ("1w", 604_800),
    ];

    for (spec, seconds) in cases {
        assert_eq!(parse_ttl(spec).unwrap(), seconds, "spec: {}", spec);
    }
}

#[test]
fn test_ttl_rejects_garbage() {
    for spec in ["", "m", "12q", "s30", "-5m", "1.5h"] {
        assert!(parse_ttl(spec).is_err(), "should reject: {:?}", spec);
    }
}
