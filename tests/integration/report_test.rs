use argus::core::report::{render_status_line, PerfData, RunStatus};
use argus::core::status::Status;
use argus::core::threshold::Verdict;

#[test]
fn test_critical_then_warning_stays_critical() {
    let mut run = RunStatus::new();
    run.merge(&Verdict::breach(
        Status::Critical,
        "queue",
        "queue (120>100)".to_string(),
    ));
    run.merge(&Verdict::breach(
        Status::Warning,
        "load",
        "load (90>80)".to_string(),
    ));

    let (status, message) = run.resolve("all clear");
    assert_eq!(status, Status::Critical);
    // Messages keep evaluation order, not severity order.
    assert_eq!(message, "queue (120>100), load (90>80)");
}

#[test]
fn test_ok_verdicts_never_move_the_run() {
    let mut run = RunStatus::new();
    for label in ["a", "b", "c"] {
        run.merge(&Verdict::ok(label));
    }
    let (status, message) = run.resolve("everything fine");
    assert_eq!(status, Status::Ok);
    assert_eq!(message, "everything fine");
}

#[test]
fn test_status_line_matches_protocol() {
    assert_eq!(
        render_status_line(Status::Critical, "disk full", None),
        "CRITICAL: disk full"
    );
    assert_eq!(Status::Critical.exit_code(), 2);
}

#[test]
fn test_status_line_with_perfdata_suffix() {
    let mut perfdata = PerfData::new();
    perfdata.push("time", "142ms", Some("200"), Some("500"));

    let line = render_status_line(Status::Ok, "site up", Some(&perfdata.render()));
    assert_eq!(line, "OK: site up | 'time'=142ms;200;500;");
}

#[test]
fn test_perfdata_is_not_interpreted() {
    let mut perfdata = PerfData::new();
    perfdata.push("weird", "1;2|3", None, None);
    assert_eq!(perfdata.render(), "'weird'=1;2|3;;;");
}
