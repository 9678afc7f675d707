//! Post-processing pipeline
//!
//! Chains the stages in their fixed order: repair, flatten and pad, world
//! transform. Each stage is a pure function; the pipeline just owns the
//! caller-supplied configuration (reference frame, optional fallback
//! positions) so a scenario can be processed in one call. Runs are
//! independent, so processing many scenarios in parallel needs no
//! coordination.

use std::io::{self, Write};

use thiserror::Error;

use crate::codec::write_table;
use crate::flatten::flatten_and_pad;
use crate::models::schedule::{GridPoint, RawSchedule, RepairedSchedule, ScheduleError};
use crate::models::table::{CoordinateTable, ReferenceFrame};
use crate::repair::repair;
use crate::transform::to_world;

/// Errors raised by a pipeline run
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Everything one pipeline run produces
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Schedule with every failed agent given a stay-in-place step
    pub repaired: RepairedSchedule,
    /// Rectangular per-agent table in grid coordinates
    pub grid: CoordinateTable<i64>,
    /// The same table in world coordinates
    pub world: CoordinateTable<f64>,
}

/// Configured post-processing pipeline
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::{Pipeline, RawSchedule, ReferenceFrame, TimedPosition};
///
/// let mut raw = RawSchedule::new();
/// raw.push_agent("agent0", vec![
///     TimedPosition { t: 0, x: 0, y: 0 },
///     TimedPosition { t: 1, x: 1, y: 0 },
/// ]);
/// raw.push_agent("agent1", vec![]);
///
/// let frame = ReferenceFrame::new(5, 7, 0.5).unwrap();
/// let out = Pipeline::new(frame).process(&raw).unwrap();
/// assert_eq!(out.grid.path_len(), 2);
/// assert_eq!(out.world.rows()[0][0].x, -2.5);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    frame: ReferenceFrame,
    fallback: Option<Vec<GridPoint>>,
}

impl Pipeline {
    /// Create a pipeline for the given reference frame
    pub fn new(frame: ReferenceFrame) -> Self {
        Self {
            frame,
            fallback: None,
        }
    }

    /// Supply per-agent fallback positions for failed agents (builder)
    ///
    /// Indexed in schedule agent order; must cover every agent of any raw
    /// schedule later processed, or [`ScheduleError::FallbackTooShort`] is
    /// returned from [`Pipeline::process`].
    pub fn with_fallback(mut self, positions: Vec<GridPoint>) -> Self {
        self.fallback = Some(positions);
        self
    }

    /// Run repair, flattening and the world transform on one raw schedule
    pub fn process(&self, raw: &RawSchedule) -> Result<PipelineOutput, PipelineError> {
        let repaired = repair(raw, self.fallback.as_deref())?;
        let grid = flatten_and_pad(&repaired);
        let world = to_world(&grid, &self.frame);
        Ok(PipelineOutput {
            repaired,
            grid,
            world,
        })
    }

    /// [`Pipeline::process`], additionally writing both tables as text
    pub fn process_to_sinks(
        &self,
        raw: &RawSchedule,
        grid_sink: &mut impl Write,
        world_sink: &mut impl Write,
    ) -> Result<PipelineOutput, PipelineError> {
        let out = self.process(raw)?;
        write_table(&out.grid, grid_sink)?;
        write_table(&out.world, world_sink)?;
        Ok(out)
    }
}
