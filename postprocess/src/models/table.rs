//! Coordinate tables and the grid-to-world reference frame
//!
//! A [`CoordinateTable`] is one row per agent, every row the same length
//! (rectangular). Rows come out of flattening in grid space (`i64`) and out
//! of the world transform in world space (`f64`); the numeric type is generic
//! so both share one shape.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2-D coordinate, integer in grid space or real in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point<N> {
    pub x: N,
    pub y: N,
}

impl<N> Point<N> {
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }
}

/// Error raised when rows of differing lengths are assembled into a table
#[derive(Debug, Error, PartialEq, Eq)]
#[error("row {row} has {found} points, expected {expected}")]
pub struct RaggedTableError {
    pub row: usize,
    pub expected: usize,
    pub found: usize,
}

/// A rectangular per-agent coordinate table
///
/// Invariant: every row has the same length. Tables are built once (by
/// flattening, by the world transform, or by the text codec) and never
/// mutated; transforms produce fresh tables.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::{CoordinateTable, Point};
///
/// let table = CoordinateTable::from_rows(vec![
///     vec![Point::new(0, 0), Point::new(1, 0)],
///     vec![Point::new(3, 3), Point::new(3, 2)],
/// ]).unwrap();
/// assert_eq!(table.agent_count(), 2);
/// assert_eq!(table.path_len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateTable<N> {
    rows: Vec<Vec<Point<N>>>,
}

impl<N> Default for CoordinateTable<N> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<N> CoordinateTable<N> {
    /// Build a table from per-agent rows, validating rectangularity
    pub fn from_rows(rows: Vec<Vec<Point<N>>>) -> Result<Self, RaggedTableError> {
        if let Some(expected) = rows.first().map(Vec::len) {
            for (row, points) in rows.iter().enumerate().skip(1) {
                if points.len() != expected {
                    return Err(RaggedTableError {
                        row,
                        expected,
                        found: points.len(),
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Invariant: caller guarantees all rows share one length.
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<Point<N>>>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { rows }
    }

    /// Number of agents (rows)
    pub fn agent_count(&self) -> usize {
        self.rows.len()
    }

    /// Common row length (0 for an empty table)
    pub fn path_len(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Per-agent rows in agent order
    pub fn rows(&self) -> &[Vec<Point<N>>] {
        &self.rows
    }
}

/// Error raised for an unusable grid cell edge length
#[derive(Debug, Error, PartialEq)]
pub enum FrameError {
    #[error("grid cell length must be a finite positive number, got {0}")]
    InvalidGridLen(f64),
}

/// Maps grid cell indices to continuous world coordinates
///
/// `(x0, y0)` is the grid cell that sits at the world origin and `grid_len`
/// is the edge length of one cell in world units, so
/// `world = (grid - origin) * grid_len` componentwise.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::ReferenceFrame;
///
/// let frame = ReferenceFrame::new(5, 7, 0.5).unwrap();
/// assert_eq!(frame.grid_len(), 0.5);
/// assert!(ReferenceFrame::new(0, 0, -1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFrame {
    x0: i64,
    y0: i64,
    grid_len: f64,
}

impl ReferenceFrame {
    /// Create a frame, rejecting non-finite or non-positive `grid_len`
    pub fn new(x0: i64, y0: i64, grid_len: f64) -> Result<Self, FrameError> {
        if !grid_len.is_finite() || grid_len <= 0.0 {
            return Err(FrameError::InvalidGridLen(grid_len));
        }
        Ok(Self { x0, y0, grid_len })
    }

    /// Grid column of the world origin
    pub fn x0(&self) -> i64 {
        self.x0
    }

    /// Grid row of the world origin
    pub fn y0(&self) -> i64 {
        self.y0
    }

    /// Cell edge length in world units
    pub fn grid_len(&self) -> f64 {
        self.grid_len
    }
}
