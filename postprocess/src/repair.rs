//! Schedule repair
//!
//! The solver signals planning failure for an agent by emitting an empty step
//! sequence. Downstream consumers (the visualizer in particular) cannot cope
//! with empty entries, so repair substitutes a single stay-in-place step for
//! every failed agent before anything else touches the schedule.

use log::{info, warn};

use crate::models::schedule::{
    GridPoint, RawSchedule, RepairedSchedule, ScheduleError, TimedPosition,
};

/// Sentinel x coordinate used when no fallback positions are supplied.
const SENTINEL_X: i64 = -1;

/// Repair a raw solver schedule so every agent has at least one step
///
/// Agents with a non-empty plan are copied unchanged, every field in order.
/// A failed agent at index `i` gets the single step `{x, y, t: 0}` where
/// `(x, y)` is `fallback[i]` when fallback positions are supplied, and the
/// sentinel `(-1, -1 - i)` otherwise. The sentinel y depends on the agent
/// index so two failed agents never share a placeholder cell.
///
/// The failed-agent count and indices are logged for observability; they are
/// not part of the return value.
///
/// # Errors
/// [`ScheduleError::FallbackTooShort`] when fallback positions are supplied
/// but do not cover every agent.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::{repair, RawSchedule, TimedPosition};
///
/// let mut raw = RawSchedule::new();
/// raw.push_agent("agent0", vec![TimedPosition { t: 0, x: 0, y: 0 }]);
/// raw.push_agent("agent1", vec![]); // planning failed
///
/// let repaired = repair(&raw, None).unwrap();
/// assert!(repaired.agents().all(|(_, steps)| !steps.is_empty()));
/// ```
pub fn repair(
    raw: &RawSchedule,
    fallback: Option<&[GridPoint]>,
) -> Result<RepairedSchedule, ScheduleError> {
    if let Some(positions) = fallback {
        if positions.len() < raw.agent_count() {
            return Err(ScheduleError::FallbackTooShort {
                agents: raw.agent_count(),
                provided: positions.len(),
            });
        }
    }

    let mut entries = Vec::with_capacity(raw.agent_count());
    let mut failed = Vec::new();
    for (index, (name, steps)) in raw.agents().enumerate() {
        if steps.is_empty() {
            failed.push(index);
            let pos = match fallback {
                Some(positions) => positions[index],
                None => GridPoint::new(SENTINEL_X, -1 - index as i64),
            };
            entries.push((
                name.to_string(),
                vec![TimedPosition {
                    t: 0,
                    x: pos.x,
                    y: pos.y,
                }],
            ));
        } else {
            entries.push((name.to_string(), steps.to_vec()));
        }
    }

    info!(
        "{} agents failed out of {}",
        failed.len(),
        raw.agent_count()
    );
    if !failed.is_empty() {
        warn!("failed agent indices: {:?}", failed);
    }

    Ok(RepairedSchedule::from_entries(entries))
}
