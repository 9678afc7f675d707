//! Schedule flattening and padding
//!
//! Turns a repaired schedule into a rectangular grid-coordinate table: the
//! time field is dropped (per-agent ordering is already correct as emitted by
//! the solver) and shorter rows are padded with their final position, i.e.
//! the agent stays put after reaching its last scheduled cell.

use crate::models::schedule::RepairedSchedule;
use crate::models::table::{CoordinateTable, Point};

/// Flatten a repaired schedule into a rectangular grid table
///
/// Every row ends up with length `L`, the longest native sequence; rows
/// shorter than `L` repeat their last point. Repair guarantees every agent
/// has at least one step, so `L >= 1` whenever any agent exists.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::{flatten_and_pad, repair, RawSchedule, TimedPosition};
///
/// let mut raw = RawSchedule::new();
/// raw.push_agent("agent0", vec![
///     TimedPosition { t: 0, x: 0, y: 0 },
///     TimedPosition { t: 1, x: 1, y: 0 },
/// ]);
/// raw.push_agent("agent1", vec![TimedPosition { t: 0, x: 3, y: 3 }]);
///
/// let table = flatten_and_pad(&repair(&raw, None).unwrap());
/// assert_eq!(table.path_len(), 2);
/// assert_eq!(table.rows()[1][1], table.rows()[1][0]); // padded in place
/// ```
pub fn flatten_and_pad(repaired: &RepairedSchedule) -> CoordinateTable<i64> {
    let mut rows: Vec<Vec<Point<i64>>> = repaired
        .agents()
        .map(|(_, steps)| steps.iter().map(|s| Point::new(s.x, s.y)).collect())
        .collect();

    let max_len = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        if let Some(&last) = row.last() {
            row.resize(max_len, last);
        }
    }

    CoordinateTable::from_rows_unchecked(rows)
}
