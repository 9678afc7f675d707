//! Grid-to-world coordinate transform
//!
//! A pure affine map applied elementwise. The frame itself is validated at
//! construction ([`crate::models::table::ReferenceFrame::new`]), so the
//! transform has no failure mode and no state; applying it to different
//! tables never interferes.

use crate::models::table::{CoordinateTable, Point, ReferenceFrame};

/// Transform a grid-space table into world coordinates
///
/// `world = (grid - origin) * grid_len`, componentwise. The output has
/// exactly the shape of the input.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::{to_world, CoordinateTable, Point, ReferenceFrame};
///
/// let grid = CoordinateTable::from_rows(vec![vec![Point::new(0, 0), Point::new(1, 0)]]).unwrap();
/// let frame = ReferenceFrame::new(5, 7, 0.5).unwrap();
/// let world = to_world(&grid, &frame);
/// assert_eq!(world.rows()[0], vec![Point::new(-2.5, -3.5), Point::new(-2.0, -3.5)]);
/// ```
pub fn to_world(table: &CoordinateTable<i64>, frame: &ReferenceFrame) -> CoordinateTable<f64> {
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|p| {
                    Point::new(
                        (p.x - frame.x0()) as f64 * frame.grid_len(),
                        (p.y - frame.y0()) as f64 * frame.grid_len(),
                    )
                })
                .collect()
        })
        .collect();
    CoordinateTable::from_rows_unchecked(rows)
}
