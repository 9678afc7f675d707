//! Tests for the text table codec
//!
//! The written artifact must round-trip: grid integers survive exactly and
//! world floats survive to full precision.

use mapf_postprocess_core_rs::{
    read_grid_table, read_table, write_table, CoordinateTable, FormatError, Point,
};
use proptest::prelude::*;

fn grid_table(rows: Vec<Vec<(i64, i64)>>) -> CoordinateTable<i64> {
    CoordinateTable::from_rows(
        rows.into_iter()
            .map(|row| row.into_iter().map(|(x, y)| Point::new(x, y)).collect())
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_written_layout_matches_format() {
    let table = grid_table(vec![vec![(0, 0), (1, 0), (2, 0)], vec![(3, 3), (3, 2), (3, 1)]]);
    let mut out = Vec::new();
    write_table(&table, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "0 0,1 0,2 0\n3 3,3 2,3 1\n");
}

#[test]
fn test_grid_round_trip_through_f64_read() {
    let table = grid_table(vec![vec![(-1, -2), (7, 8)], vec![(0, 0), (100, -100)]]);
    let mut out = Vec::new();
    write_table(&table, &mut out).unwrap();

    // The default read deliberately widens to f64.
    let reread = read_table(out.as_slice()).unwrap();
    assert_eq!(reread.agent_count(), 2);
    assert_eq!(reread.rows()[0][0], Point::new(-1.0, -2.0));
    assert_eq!(reread.rows()[1][1], Point::new(100.0, -100.0));
}

#[test]
fn test_grid_round_trip_through_typed_read() {
    let table = grid_table(vec![vec![(-1, -2), (7, 8)]]);
    let mut out = Vec::new();
    write_table(&table, &mut out).unwrap();
    let reread = read_grid_table(out.as_slice()).unwrap();
    assert_eq!(reread, table);
}

#[test]
fn test_world_round_trip_exact() {
    let table = CoordinateTable::from_rows(vec![
        vec![Point::new(-2.5, -3.5), Point::new(-2.0, -3.5)],
        vec![Point::new(0.582, -0.582), Point::new(1.746, 0.0)],
    ])
    .unwrap();
    let mut out = Vec::new();
    write_table(&table, &mut out).unwrap();
    let reread = read_table(out.as_slice()).unwrap();
    assert_eq!(reread, table);
}

#[test]
fn test_empty_input_is_empty_table() {
    let table = read_table("".as_bytes()).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.path_len(), 0);
}

#[test]
fn test_ragged_table_is_an_error() {
    let err = read_table("0 0,1 0,2 0\n3 3,3 2\n".as_bytes()).unwrap_err();
    match err {
        FormatError::Ragged {
            line,
            expected,
            found,
        } => {
            assert_eq!((line, expected, found), (2, 3, 2));
        }
        other => panic!("expected Ragged, got {:?}", other),
    }
}

#[test]
fn test_non_numeric_token_is_an_error() {
    let err = read_table("0 0,one 0\n".as_bytes()).unwrap_err();
    assert!(matches!(err, FormatError::InvalidNumber { line: 1, .. }));
}

#[test]
fn test_pair_with_wrong_arity_is_an_error() {
    let err = read_table("0,1 1\n".as_bytes()).unwrap_err();
    assert!(matches!(err, FormatError::MalformedPair { line: 1, .. }));
}

proptest! {
    /// write then read reproduces any rectangular grid table (values widened
    /// to f64, which is exact for these magnitudes).
    #[test]
    fn prop_grid_round_trip(
        (len, nrows) in (1usize..8, 1usize..8),
        seed in proptest::collection::vec((-10_000i64..10_000, -10_000i64..10_000), 64),
    ) {
        let rows: Vec<Vec<(i64, i64)>> = (0..nrows)
            .map(|r| (0..len).map(|c| seed[(r * len + c) % seed.len()]).collect())
            .collect();
        let table = grid_table(rows.clone());

        let mut out = Vec::new();
        write_table(&table, &mut out).unwrap();
        let reread = read_table(out.as_slice()).unwrap();

        prop_assert_eq!(reread.agent_count(), nrows);
        prop_assert_eq!(reread.path_len(), len);
        for (row, expected) in reread.rows().iter().zip(&rows) {
            for (p, &(x, y)) in row.iter().zip(expected) {
                prop_assert_eq!(*p, Point::new(x as f64, y as f64));
            }
        }

        let typed = read_grid_table(out.as_slice()).unwrap();
        prop_assert_eq!(typed, table);
    }

    /// Finite f64 tables round-trip exactly thanks to shortest-round-trip
    /// formatting.
    #[test]
    fn prop_world_round_trip(
        values in proptest::collection::vec(
            (-1.0e6f64..1.0e6, -1.0e6f64..1.0e6),
            1..16,
        ),
    ) {
        let row: Vec<Point<f64>> = values.iter().map(|&(x, y)| Point::new(x, y)).collect();
        let table = CoordinateTable::from_rows(vec![row]).unwrap();

        let mut out = Vec::new();
        write_table(&table, &mut out).unwrap();
        let reread = read_table(out.as_slice()).unwrap();
        prop_assert_eq!(reread, table);
    }
}
