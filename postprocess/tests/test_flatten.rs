//! Tests for schedule flattening and padding
//!
//! The output table must be rectangular with row length equal to the longest
//! native sequence, and padding must repeat each agent's final position.

use mapf_postprocess_core_rs::{flatten_and_pad, repair, Point, RawSchedule, TimedPosition};
use proptest::prelude::*;

fn step(t: u64, x: i64, y: i64) -> TimedPosition {
    TimedPosition { t, x, y }
}

#[test]
fn test_rectangularity() {
    let mut raw = RawSchedule::new();
    raw.push_agent("agent0", vec![step(0, 0, 0), step(1, 1, 0), step(2, 2, 0)]);
    raw.push_agent("agent1", vec![step(0, 3, 3)]);
    raw.push_agent("agent2", vec![step(0, 4, 4), step(1, 4, 5)]);

    let table = flatten_and_pad(&repair(&raw, None).unwrap());
    assert_eq!(table.agent_count(), 3);
    assert_eq!(table.path_len(), 3);
    for row in table.rows() {
        assert_eq!(row.len(), 3);
    }
}

#[test]
fn test_padding_repeats_last_native_entry() {
    let mut raw = RawSchedule::new();
    raw.push_agent("agent0", vec![step(0, 0, 0), step(1, 1, 0), step(2, 2, 0), step(3, 3, 0)]);
    raw.push_agent("agent1", vec![step(0, 6, 6), step(1, 6, 7)]);

    let table = flatten_and_pad(&repair(&raw, None).unwrap());
    assert_eq!(
        table.rows()[1],
        vec![
            Point::new(6, 6),
            Point::new(6, 7),
            Point::new(6, 7),
            Point::new(6, 7),
        ]
    );
}

#[test]
fn test_single_agent_single_step_table() {
    let mut raw = RawSchedule::new();
    raw.push_agent("agent0", vec![step(0, 2, 9)]);

    let table = flatten_and_pad(&repair(&raw, None).unwrap());
    assert_eq!(table.agent_count(), 1);
    assert_eq!(table.path_len(), 1);
    assert_eq!(table.rows()[0], vec![Point::new(2, 9)]);
}

#[test]
fn test_failed_agent_padded_at_sentinel() {
    let mut raw = RawSchedule::new();
    raw.push_agent("agent0", vec![step(0, 0, 0), step(1, 1, 0)]);
    raw.push_agent("agent1", vec![]);

    let table = flatten_and_pad(&repair(&raw, None).unwrap());
    assert_eq!(table.path_len(), 2);
    assert_eq!(table.rows()[1], vec![Point::new(-1, -2), Point::new(-1, -2)]);
}

proptest! {
    /// Rectangularity and padding hold for arbitrary schedules: row length is
    /// the maximum native length (at least 1 after repair), trailing entries
    /// of short rows equal their last native entry, and native prefixes are
    /// copied verbatim.
    #[test]
    fn prop_rectangular_and_padded(
        plans in proptest::collection::vec(
            proptest::collection::vec((0u64..100, -50i64..50, -50i64..50), 0..7),
            1..10,
        )
    ) {
        let mut raw = RawSchedule::new();
        for (i, plan) in plans.iter().enumerate() {
            let steps = plan.iter().map(|&(t, x, y)| TimedPosition { t, x, y }).collect();
            raw.push_agent(format!("agent{}", i), steps);
        }

        let repaired = repair(&raw, None).unwrap();
        let native_lens: Vec<usize> = repaired.agents().map(|(_, s)| s.len()).collect();
        let native: Vec<Vec<Point<i64>>> = repaired
            .agents()
            .map(|(_, s)| s.iter().map(|p| Point::new(p.x, p.y)).collect())
            .collect();
        let expected_len = *native_lens.iter().max().unwrap();

        let table = flatten_and_pad(&repaired);
        prop_assert_eq!(table.path_len(), expected_len);
        for ((row, len), native_row) in table.rows().iter().zip(&native_lens).zip(&native) {
            prop_assert_eq!(row.len(), expected_len);
            prop_assert_eq!(&row[..*len], native_row.as_slice());
            for p in &row[*len..] {
                prop_assert_eq!(p, native_row.last().unwrap());
            }
        }
    }
}
