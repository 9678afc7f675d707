//! Line-oriented text codec for coordinate tables
//!
//! One line per agent; coordinate pairs joined by `,`; the two components of
//! a pair separated by a single space; newline after every line. A 2-agent,
//! 3-step grid table renders as:
//!
//! ```text
//! 0 0,1 0,2 0
//! 3 3,3 2,3 1
//! ```
//!
//! This is the artifact handed to downstream consumers (visualizer, robot
//! controller), so it must round-trip: integers survive exactly and floats
//! survive to full precision (`f64`'s `Display` is shortest-round-trip).

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::models::table::{CoordinateTable, Point};

/// Errors raised while reading a text table
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("line {line}: expected {expected} coordinate pairs, found {found}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: `{pair}` is not an `x y` coordinate pair")]
    MalformedPair { line: usize, pair: String },

    #[error("line {line}: `{token}` is not a number")]
    InvalidNumber { line: usize, token: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Write a table in the line-oriented text format
///
/// Values render in their natural decimal form: integer tables carry no
/// fractional part, world tables use `f64`'s shortest round-trip form.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::{write_table, CoordinateTable, Point};
///
/// let table = CoordinateTable::from_rows(vec![
///     vec![Point::new(0, 0), Point::new(1, 0)],
///     vec![Point::new(3, 3), Point::new(3, 2)],
/// ]).unwrap();
/// let mut out = Vec::new();
/// write_table(&table, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "0 0,1 0\n3 3,3 2\n");
/// ```
pub fn write_table<N: Display>(
    table: &CoordinateTable<N>,
    sink: &mut impl Write,
) -> io::Result<()> {
    for row in table.rows() {
        for (i, p) in row.iter().enumerate() {
            if i > 0 {
                write!(sink, ",")?;
            }
            write!(sink, "{} {}", p.x, p.y)?;
        }
        writeln!(sink)?;
    }
    Ok(())
}

/// Read a text table, parsing every value as `f64`
///
/// All tokens widen to `f64` regardless of how the table was written, so
/// re-reading an integer table yields a real-valued table with integral
/// values. This mirrors what consumers of the world-coordinate artifact do;
/// use [`read_grid_table`] when the integer type must be preserved.
///
/// Empty input yields an empty table. A line whose pair count differs from
/// the first line's, or any non-numeric token, is a [`FormatError`].
pub fn read_table(source: impl BufRead) -> Result<CoordinateTable<f64>, FormatError> {
    read_with(source, |token| token.parse::<f64>().ok())
}

/// Read a text table, parsing every value as `i64`
///
/// Typed variant of [`read_table`] for grid-space tables: integer values are
/// preserved exactly and fractional tokens are rejected as non-numeric.
pub fn read_grid_table(source: impl BufRead) -> Result<CoordinateTable<i64>, FormatError> {
    read_with(source, |token| token.parse::<i64>().ok())
}

fn read_with<N, F>(source: impl BufRead, parse: F) -> Result<CoordinateTable<N>, FormatError>
where
    F: Fn(&str) -> Option<N>,
{
    let mut rows: Vec<Vec<Point<N>>> = Vec::new();
    let mut expected = None;
    for (index, line) in source.lines().enumerate() {
        let line = line?;
        let lineno = index + 1;
        let pairs: Vec<&str> = line.split(',').collect();
        match expected {
            None => expected = Some(pairs.len()),
            Some(expected) if pairs.len() != expected => {
                return Err(FormatError::Ragged {
                    line: lineno,
                    expected,
                    found: pairs.len(),
                });
            }
            Some(_) => {}
        }
        let mut row = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let mut tokens = pair.split_whitespace();
            let (x, y) = match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(x), Some(y), None) => (x, y),
                _ => {
                    return Err(FormatError::MalformedPair {
                        line: lineno,
                        pair: pair.to_string(),
                    });
                }
            };
            row.push(Point::new(
                parse_token(&parse, x, lineno)?,
                parse_token(&parse, y, lineno)?,
            ));
        }
        rows.push(row);
    }
    Ok(CoordinateTable::from_rows_unchecked(rows))
}

fn parse_token<N, F>(parse: &F, token: &str, line: usize) -> Result<N, FormatError>
where
    F: Fn(&str) -> Option<N>,
{
    parse(token).ok_or_else(|| FormatError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}
