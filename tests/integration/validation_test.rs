use argus::core::validation::{validate_hostname, validate_timeout, validate_url};

#[test]
fn test_hostnames() {
    for name in ["web01", "cache.example.com", "a-1.b-2.example.org"] {
        assert!(validate_hostname(name).is_ok(), "should accept: {}", name);
    }
    for name in ["", "-bad.example.com", "bad-.example.com", "no spaces"] {
        assert!(validate_hostname(name).is_err(), "should reject: {:?}", name);
    }
}

#[test]
fn test_timeout_ranges_per_flag() {
    assert!(validate_timeout(300, 30, 300, "--timeout").is_ok());
    assert!(validate_timeout(29, 30, 300, "--timeout").is_err());

    assert!(validate_timeout(5, 1, 30, "--request-timeout").is_ok());
    assert!(validate_timeout(31, 1, 30, "--request-timeout").is_err());
}

#[test]
fn test_urls() {
    assert!(validate_url("https://example.com/health").is_ok());
    assert!(validate_url("http://example.com:8080/").is_ok());

    for url in ["", "ftp://example.com", "example.com/health"] {
        assert!(validate_url(url).is_err(), "should reject: {:?}", url);
    }
}
