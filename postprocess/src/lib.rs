//! MAPF Schedule Post-Processing Core
//!
//! Normalizes the raw output of an external multi-agent path-finding solver
//! into forms downstream consumers (visualizers, robot controllers) can use:
//! a repaired schedule, a fixed-length per-agent grid-coordinate table, and
//! the same table in world coordinates, with a round-trippable text format
//! for both tables. Path planning itself is somebody else's job.
//!
//! # Architecture
//!
//! - **models**: Domain types (schedules, coordinate tables, reference frame)
//! - **repair**: Stay-in-place substitution for agents the solver gave up on
//! - **flatten**: Schedule -> rectangular grid table, padded with last position
//! - **transform**: Affine grid-to-world coordinate map
//! - **codec**: Line-oriented text read/write for coordinate tables
//! - **scenario**: Agents/environment text files -> solver scenario YAML
//! - **pipeline**: The stages chained in order, with caller-supplied config
//!
//! # Critical Invariants
//!
//! 1. Every agent in a repaired schedule has at least one step
//! 2. Coordinate tables are rectangular (every row the same length)
//! 3. Stages are pure: inputs immutable, outputs freshly constructed
//! 4. All errors are deterministic input-validation failures; none retried

// Module declarations
pub mod codec;
pub mod flatten;
pub mod models;
pub mod pipeline;
pub mod repair;
pub mod scenario;
pub mod transform;

// Re-exports for convenience
pub use codec::{read_grid_table, read_table, write_table, FormatError};
pub use flatten::flatten_and_pad;
pub use models::{
    schedule::{GridPoint, RawSchedule, RepairedSchedule, ScheduleError, TimedPosition},
    table::{CoordinateTable, FrameError, Point, RaggedTableError, ReferenceFrame},
};
pub use pipeline::{Pipeline, PipelineError, PipelineOutput};
pub use repair::repair;
pub use scenario::{
    read_agents, read_environment, AgentList, Environment, ScenarioDocument, ScenarioError,
};
pub use transform::to_world;
