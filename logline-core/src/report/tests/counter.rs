use crate::report::{Counter, PrefixCounter};

use pretty_assertions::assert_eq;

#[test]
fn seeded_keys_report_zero() {
    let counter = Counter::seeded(["GET", "POST"]);

    assert_eq!(counter.get("GET"), 0);
    assert_eq!(counter.get("POST"), 0);
    assert!(counter.contains("GET"));
    assert!(!counter.contains("PUT"));
}

#[test]
fn record_creates_buckets_on_first_sight() {
    let mut counter = Counter::new();
    counter.record("GET");
    counter.record("GET");
    counter.record("HEAD");

    assert_eq!(counter.get("GET"), 2);
    assert_eq!(counter.get("HEAD"), 1);
    assert_eq!(counter.total(), 3);
}

#[test]
fn most_common_sorts_by_count_then_insertion() {
    let mut counter = Counter::seeded(["DELETE", "GET", "POST"]);
    counter.record("POST");
    counter.record("GET");
    counter.record("POST");

    // DELETE keeps its seeded spot ahead of nothing: zero-count entries
    // stay visible, ties resolve in insertion order
    assert_eq!(
        counter.most_common(),
        [("POST", 2), ("GET", 1), ("DELETE", 0)]
    );
}

#[test]
fn prefix_counter_buckets_status_families() {
    let mut counter = PrefixCounter::seeded(["2", "4", "5"]);
    counter.record(200);
    counter.record(404);
    counter.record(500);
    // no bucket matches "301"; the value is dropped, not an error
    counter.record(301);

    assert_eq!(counter.get("2"), 1);
    assert_eq!(counter.get("4"), 1);
    assert_eq!(counter.get("5"), 1);
    assert_eq!(counter.most_common(), [("2", 1), ("4", 1), ("5", 1)]);
}

#[test]
fn prefix_counter_first_match_wins() {
    // overlapping seeds: the earlier seed takes the hit, exactly once
    let mut counter = PrefixCounter::seeded(["4", "404"]);
    counter.record(404);
    counter.record(410);

    assert_eq!(counter.get("4"), 2);
    assert_eq!(counter.get("404"), 0);
}

#[test]
fn prefix_counter_accepts_string_values() {
    let mut counter = PrefixCounter::seeded(["20", "404"]);
    counter.record("205");
    counter.record("404");

    assert_eq!(counter.get("20"), 1);
    assert_eq!(counter.get("404"), 1);
}
