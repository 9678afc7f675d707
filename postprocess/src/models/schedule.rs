//! Solver schedule models
//!
//! The external MAPF solver emits a YAML document with a top-level `schedule`
//! mapping: agent name -> ordered sequence of timestamped grid positions.
//! An empty sequence means the solver found no feasible plan for that agent.
//!
//! These types keep the document's agent declaration order, which downstream
//! stages rely on (fallback positions are indexed by that order).

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// A single timestamped position in an agent's schedule
///
/// `t` is the solver's discrete tick; `x`/`y` are grid cell indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedPosition {
    /// Solver tick (non-negative)
    pub t: u64,
    /// Grid column
    pub x: i64,
    /// Grid row
    pub y: i64,
}

/// A grid cell position without a time component
///
/// Used for agent start positions and repair fallback positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Errors raised while reading or repairing a solver schedule document
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("document has no top-level `schedule` mapping")]
    MissingScheduleKey,

    #[error("`schedule` is not a mapping of agent names to step sequences")]
    NotAMapping,

    #[error("agent key at position {0} is not a string")]
    InvalidAgentKey(usize),

    #[error("steps for agent `{agent}` are not a sequence")]
    StepsNotASequence { agent: String },

    #[error("invalid step {index} for agent `{agent}`: {reason}")]
    InvalidStep {
        agent: String,
        index: usize,
        reason: String,
    },

    #[error("{provided} fallback positions provided for {agents} agents")]
    FallbackTooShort { agents: usize, provided: usize },

    #[error("YAML parse error: {0}")]
    Parse(String),
}

/// The solver's raw per-agent schedule, in declaration order
///
/// An agent mapped to an empty step sequence is a *failed* agent (the solver
/// produced no plan for it). `RawSchedule` is read once and never mutated;
/// [`crate::repair::repair`] derives a [`RepairedSchedule`] from it.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::RawSchedule;
///
/// let yaml = "\
/// schedule:
///   agent0:
///     - {x: 0, y: 0, t: 0}
///     - {x: 1, y: 0, t: 1}
///   agent1: []
/// ";
/// let raw = RawSchedule::from_yaml(yaml).unwrap();
/// assert_eq!(raw.agent_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSchedule {
    entries: Vec<(String, Vec<TimedPosition>)>,
}

impl RawSchedule {
    /// Create an empty schedule
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an agent's step sequence (empty = planning failed)
    pub fn push_agent(&mut self, name: impl Into<String>, steps: Vec<TimedPosition>) {
        self.entries.push((name.into(), steps));
    }

    /// Parse and validate a solver output document
    ///
    /// The document must carry a top-level `schedule` mapping whose values are
    /// sequences of `{x, y, t}` integer mappings with non-negative `t`. Any
    /// shape mismatch is a [`ScheduleError`]; nothing is guessed or coerced.
    pub fn from_yaml(text: &str) -> Result<Self, ScheduleError> {
        let doc: Value =
            serde_yaml::from_str(text).map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let root = doc.as_mapping().ok_or(ScheduleError::MissingScheduleKey)?;
        let schedule = lookup(root, "schedule").ok_or(ScheduleError::MissingScheduleKey)?;
        let schedule = schedule.as_mapping().ok_or(ScheduleError::NotAMapping)?;

        let mut entries = Vec::with_capacity(schedule.len());
        for (position, (key, value)) in schedule.iter().enumerate() {
            let name = key
                .as_str()
                .ok_or(ScheduleError::InvalidAgentKey(position))?;
            let seq = value
                .as_sequence()
                .ok_or_else(|| ScheduleError::StepsNotASequence {
                    agent: name.to_string(),
                })?;
            let mut steps = Vec::with_capacity(seq.len());
            for (index, step) in seq.iter().enumerate() {
                steps.push(parse_step(name, index, step)?);
            }
            entries.push((name.to_string(), steps));
        }
        Ok(Self { entries })
    }

    /// Number of agents in the schedule
    pub fn agent_count(&self) -> usize {
        self.entries.len()
    }

    /// True if the schedule declares no agents
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate agents in declaration order
    pub fn agents(&self) -> impl Iterator<Item = (&str, &[TimedPosition])> {
        self.entries
            .iter()
            .map(|(name, steps)| (name.as_str(), steps.as_slice()))
    }
}

/// A schedule in which every agent has at least one step
///
/// Derived from a [`RawSchedule`] by [`crate::repair::repair`], which
/// substitutes a single stay-in-place step for each failed agent. Never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RepairedSchedule {
    entries: Vec<(String, Vec<TimedPosition>)>,
}

impl RepairedSchedule {
    /// Invariant: every step sequence in `entries` is non-empty.
    pub(crate) fn from_entries(entries: Vec<(String, Vec<TimedPosition>)>) -> Self {
        debug_assert!(entries.iter().all(|(_, steps)| !steps.is_empty()));
        Self { entries }
    }

    /// Number of agents in the schedule
    pub fn agent_count(&self) -> usize {
        self.entries.len()
    }

    /// True if the schedule declares no agents
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate agents in declaration order
    pub fn agents(&self) -> impl Iterator<Item = (&str, &[TimedPosition])> {
        self.entries
            .iter()
            .map(|(name, steps)| (name.as_str(), steps.as_slice()))
    }

    /// Render the cleaned schedule document back to YAML
    ///
    /// Produces the same `schedule:` document shape the solver emits, with
    /// every failed agent replaced by its single fallback step, so external
    /// consumers (e.g. the visualizer) can read it as-is.
    pub fn to_yaml(&self) -> Result<String, ScheduleError> {
        let mut schedule = Mapping::new();
        for (name, steps) in &self.entries {
            let seq: Vec<Value> = steps
                .iter()
                .map(|step| {
                    let mut m = Mapping::new();
                    m.insert(Value::from("t"), Value::from(step.t));
                    m.insert(Value::from("x"), Value::from(step.x));
                    m.insert(Value::from("y"), Value::from(step.y));
                    Value::Mapping(m)
                })
                .collect();
            schedule.insert(Value::from(name.as_str()), Value::Sequence(seq));
        }
        let mut root = Mapping::new();
        root.insert(Value::from("schedule"), Value::Mapping(schedule));
        serde_yaml::to_string(&Value::Mapping(root)).map_err(|e| ScheduleError::Parse(e.to_string()))
    }
}

fn lookup<'a>(map: &'a Mapping, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.as_str() == Some(key))
        .map(|(_, v)| v)
}

fn parse_step(agent: &str, index: usize, step: &Value) -> Result<TimedPosition, ScheduleError> {
    let map = step.as_mapping().ok_or_else(|| ScheduleError::InvalidStep {
        agent: agent.to_string(),
        index,
        reason: "step is not a mapping".to_string(),
    })?;
    let x = int_field(map, agent, index, "x")?;
    let y = int_field(map, agent, index, "y")?;
    let t = lookup(map, "t")
        .and_then(Value::as_u64)
        .ok_or_else(|| ScheduleError::InvalidStep {
            agent: agent.to_string(),
            index,
            reason: "missing or non-integer non-negative `t`".to_string(),
        })?;
    Ok(TimedPosition { t, x, y })
}

fn int_field(map: &Mapping, agent: &str, index: usize, key: &str) -> Result<i64, ScheduleError> {
    lookup(map, key)
        .and_then(Value::as_i64)
        .ok_or_else(|| ScheduleError::InvalidStep {
            agent: agent.to_string(),
            index,
            reason: format!("missing or non-integer `{}`", key),
        })
}
