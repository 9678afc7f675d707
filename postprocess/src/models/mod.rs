//! Domain models for schedule post-processing

pub mod schedule;
pub mod table;

// Re-exports
pub use schedule::{GridPoint, RawSchedule, RepairedSchedule, ScheduleError, TimedPosition};
pub use table::{CoordinateTable, FrameError, Point, RaggedTableError, ReferenceFrame};
