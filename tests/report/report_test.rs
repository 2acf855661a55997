/*!
 * Report Tests
 * Aggregation, ordering and the text table
 */

use gpu_mem_tracer::{AllocationTracker, Report, ReportFormat};
use pretty_assertions::assert_eq;

fn two_location_tracker() -> AllocationTracker {
    let mut tracker = AllocationTracker::new();
    tracker.track_alloc(0x1000, 300, "L1");
    tracker.track_alloc(0x2000, 50, "L2");
    tracker.track_alloc(0x3000, 500, "L1");
    tracker.track_alloc(0x4000, 100, "L1");
    tracker
}

#[test]
fn test_rows_sorted_with_cumulative_totals() {
    let report = two_location_tracker().report();

    assert_eq!(report.rows.len(), 2);

    let l1 = &report.rows[0];
    assert_eq!(l1.location, "L1");
    assert_eq!(l1.bytes, 900);
    assert_eq!(l1.cumulative_bytes, 900);
    assert_eq!(l1.median_bytes, 300);
    assert_eq!(l1.count, 3);

    let l2 = &report.rows[1];
    assert_eq!(l2.location, "L2");
    assert_eq!(l2.bytes, 50);
    assert_eq!(l2.cumulative_bytes, 950);
    assert_eq!(l2.median_bytes, 50);
    assert_eq!(l2.count, 1);
}

#[test]
fn test_text_table() {
    let report = two_location_tracker().report();

    let expected = concat!(
        "Max mem: 950.0 \n",
        "Total mem allocated: 950.0 \n",
        "Mem, Cumulative Mem, Median, Count, Location\n",
        "900.0   900.0   300.0   3  L1\n",
        "50.00   950.0   50.00   1  L2\n",
    );
    assert_eq!(report.to_string(), expected);
}

#[test]
fn test_summary_uses_peak_total() {
    let mut tracker = AllocationTracker::new();
    tracker.track_alloc(0x1000, 2048, "big");
    tracker.track_free(0x1000, 2048);
    tracker.track_alloc(0x2000, 1024, "small");

    // total_bytes comes from the peak snapshot, not the live counters
    let report = tracker.report();
    assert_eq!(report.peak_bytes, 2048);
    assert_eq!(report.total_bytes, 2048);
    assert!(report.to_string().starts_with("Max mem: 2.000 KB\nTotal mem allocated: 2.000 KB\n"));
}

#[test]
fn test_json_output() {
    let report = two_location_tracker().report();

    let mut out = Vec::new();
    report.write_to(&mut out, ReportFormat::Json).unwrap();
    let parsed: Report = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed, report);

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["peak_bytes"], 950);
    assert_eq!(value["rows"][0]["location"], "L1");
}

#[test]
fn test_write_text_matches_display() {
    let report = two_location_tracker().report();

    let mut out = Vec::new();
    report.write_to(&mut out, ReportFormat::Text).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), report.to_string());
}
