//! Drives the end-to-end scenarios and laws of SPEC_FULL.md §8 through the
//! public `SessionWindow` contract only — no access to internal modules.

use session_window::{Count, Session, SessionConfig, SessionWindow};

fn counting_operator(max_gap: i64) -> SessionWindow<(&'static str, i64), String, Count> {
    let config = SessionConfig::new(
        max_gap,
        |event: &(&str, i64)| event.1,
        |event: &(&str, i64)| event.0.to_string(),
        Count,
    )
    .unwrap();
    SessionWindow::new(config)
}

fn session(key: &str, start: i64, end: i64, count: u64) -> Session<String, u64> {
    Session::new(key.to_string(), start, end, count)
}

fn flush_all(op: &mut SessionWindow<(&'static str, i64), String, Count>, wm: i64) -> Vec<Session<String, u64>> {
    let mut out: Vec<_> = op.on_watermark(wm).collect();
    out.sort_by_key(|s| (s.key.clone(), s.start));
    out
}

// Scenario 1: three events close enough to stay in one session.
#[test]
fn scenario_1_single_growing_session() {
    let mut op = counting_operator(10);
    op.on_event(("a", 1));
    op.on_event(("a", 5));
    op.on_event(("a", 8));
    assert_eq!(flush_all(&mut op, 1000), vec![session("a", 1, 18, 3)]);
}

// Scenario 2: two events far enough apart to form two independent sessions.
#[test]
fn scenario_2_two_independent_sessions() {
    let mut op = counting_operator(10);
    op.on_event(("a", 1));
    op.on_event(("a", 100));
    assert_eq!(
        flush_all(&mut op, 1000),
        vec![session("a", 1, 11, 1), session("a", 100, 110, 1)]
    );
}

// Scenario 3: a third, out-of-order event bridges two windows that were each
// created disjoint but are within max_gap of each other once the bridging
// event's own interval is accounted for.
#[test]
fn scenario_3_bridging_event_merges_windows() {
    let mut op = counting_operator(10);
    op.on_event(("a", 1)); // [1, 11]
    op.on_event(("a", 20)); // [20, 30], disjoint from [1,11] (gap 9 <= max_gap)
    op.on_event(("a", 10)); // [10, 20], touches both -> merge into [1, 30]
    assert_eq!(flush_all(&mut op, 1000), vec![session("a", 1, 30, 3)]);
}

// Scenario 4: two keys are tracked independently.
#[test]
fn scenario_4_independent_keys() {
    let mut op = counting_operator(10);
    op.on_event(("a", 1));
    op.on_event(("b", 1));
    op.on_event(("a", 5));
    assert_eq!(
        flush_all(&mut op, 1000),
        vec![session("a", 1, 15, 2), session("b", 1, 11, 1)]
    );
}

// Scenario 5: an event older than the current watermark is dropped, not emitted.
#[test]
fn scenario_5_late_event_is_dropped() {
    let mut op = counting_operator(10);
    assert!(op.on_watermark(50).next().is_none());
    op.on_event(("a", 40));
    assert_eq!(op.open_key_count(), 0);
    assert!(flush_all(&mut op, 1000).is_empty());
}

// Scenario 6: a session flushes, then a later event for the same key starts a
// fresh, independent session.
#[test]
fn scenario_6_flush_then_new_session_for_same_key() {
    let mut op = counting_operator(10);
    op.on_event(("a", 1)); // [1, 11]
    let first = flush_all(&mut op, 12);
    assert_eq!(first, vec![session("a", 1, 11, 1)]);

    // The watermark is now 12; an event for the same key at or after that time
    // starts a brand-new, independent session.
    op.on_event(("a", 20)); // [20, 30]
    let second = flush_all(&mut op, 1000);
    assert_eq!(second, vec![session("a", 20, 30, 1)]);
}

// Boundary: max_gap == 0 produces single-point "sessions".
#[test]
fn boundary_zero_max_gap_point_sessions() {
    let mut op = counting_operator(0);
    op.on_event(("a", 5));
    op.on_event(("a", 5)); // same instant: still overlaps, accumulates into one window
    op.on_event(("a", 6)); // one apart: disjoint at max_gap == 0
    let out = flush_all(&mut op, 1000);
    assert_eq!(out, vec![session("a", 5, 5, 2), session("a", 6, 6, 1)]);
}

// Boundary: an event interval exactly touching a neighbor's end is an overlap,
// not a gap, and merges rather than creating a third window.
#[test]
fn boundary_touching_endpoint_is_overlap() {
    let mut op = counting_operator(10);
    op.on_event(("a", 0)); // [0, 10]
    op.on_event(("a", 10)); // [10, 20], touches prior window's end at 10
    let out = flush_all(&mut op, 1000);
    assert_eq!(out, vec![session("a", 0, 20, 2)]);
}

// Boundary: a single event whose own interval spans two existing windows merges
// both in one call.
#[test]
fn boundary_single_event_spans_two_windows() {
    let mut op = counting_operator(10);
    op.on_event(("a", 0)); // [0, 10]
    op.on_event(("a", 20)); // [20, 30], disjoint from [0,10] (gap 10 == max_gap)
    op.on_event(("a", 10)); // [10, 20] touches both endpoints -> merge into [0, 30]
    let out = flush_all(&mut op, 1000);
    assert_eq!(out, vec![session("a", 0, 30, 3)]);
}

// Law: idempotent flush — calling on_watermark twice with the same value only
// emits once.
#[test]
fn law_idempotent_flush() {
    let mut op = counting_operator(10);
    op.on_event(("a", 1));
    assert_eq!(flush_all(&mut op, 1000).len(), 1);
    assert!(flush_all(&mut op, 1000).is_empty());
}

// Law: order-independence up to max_gap — permuting events that all land in one
// session yields the same final count regardless of arrival order.
#[test]
fn law_order_independence_within_a_session() {
    let permutations: [[i64; 3]; 3] = [[1, 5, 8], [8, 1, 5], [5, 8, 1]];
    for times in permutations {
        let mut op = counting_operator(10);
        for t in times {
            op.on_event(("a", t));
        }
        let out = flush_all(&mut op, 1000);
        assert_eq!(out, vec![session("a", 1, 18, 3)]);
    }
}

// Law: a late event produces no state change at all.
#[test]
fn law_late_event_drop_is_a_true_no_op() {
    let mut op = counting_operator(10);
    op.on_event(("a", 1));
    op.on_watermark(20).for_each(drop); // drains the flush: [1,11] is emitted, watermark now 20
    let before = op.open_key_count();
    op.on_event(("a", 5)); // 5 < 20: late
    assert_eq!(op.open_key_count(), before);
}

// Invariant spot-check: a multi-key, multi-merge run still satisfies the
// operator's own invariant checker at every point.
#[test]
fn invariants_hold_through_a_mixed_workload() {
    let mut op = counting_operator(5);
    let events: [(&str, i64); 8] = [
        ("a", 0),
        ("b", 100),
        ("a", 3),
        ("a", 20),
        ("b", 102),
        ("a", 10),
        ("c", 0),
        ("a", 6),
    ];
    for (k, t) in events {
        op.on_event((k, t));
        op.check_invariants().expect("invariants hold after every event");
    }
    op.on_watermark(5).for_each(drop);
    op.check_invariants().expect("invariants hold after a flush");
    op.on_watermark(1000).for_each(drop);
    op.check_invariants().expect("invariants hold after draining everything");
    assert_eq!(op.open_key_count(), 0);
}
