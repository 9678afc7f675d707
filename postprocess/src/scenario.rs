//! Scenario input files and the solver scenario document
//!
//! Upstream of the solver: plain-text descriptions of the agents (start and
//! goal cells) and the environment (grid size and obstacle cells) are
//! combined into the YAML scenario document the solver consumes. Running the
//! solver itself is the caller's business; this module only translates
//! formats.
//!
//! Agents file, one agent per line: `x_from,y_from,x_to,y_to`.
//! Environment file: first line `width,height`, then one obstacle `x,y` per
//! line. Blank lines are ignored in both.

use std::io::BufRead;

use serde::Serialize;
use thiserror::Error;

use crate::models::schedule::GridPoint;

/// Errors raised while reading scenario input files
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("YAML error: {0}")]
    Yaml(String),
}

/// Ordered agent start and goal positions
///
/// The starts double as repair fallback positions: a failed agent is placed
/// at its start cell when the caller passes these to
/// [`crate::repair::repair`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentList {
    pub starts: Vec<GridPoint>,
    pub goals: Vec<GridPoint>,
}

impl AgentList {
    /// Number of agents
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// Grid dimensions and obstacle cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub width: i64,
    pub height: i64,
    pub obstacles: Vec<GridPoint>,
}

/// Read an agents file: one `x_from,y_from,x_to,y_to` line per agent
pub fn read_agents(source: impl BufRead) -> Result<AgentList, ScenarioError> {
    let mut starts = Vec::new();
    let mut goals = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_int_fields(&line, index + 1)?;
        match fields.as_slice() {
            [x_from, y_from, x_to, y_to] => {
                starts.push(GridPoint::new(*x_from, *y_from));
                goals.push(GridPoint::new(*x_to, *y_to));
            }
            _ => {
                return Err(ScenarioError::Parse {
                    line: index + 1,
                    reason: format!("expected 4 comma-separated integers, found {}", fields.len()),
                });
            }
        }
    }
    Ok(AgentList { starts, goals })
}

/// Read an environment file: `width,height`, then one obstacle `x,y` per line
pub fn read_environment(source: impl BufRead) -> Result<Environment, ScenarioError> {
    let mut dimensions = None;
    let mut obstacles = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_int_fields(&line, index + 1)?;
        let pair = match fields.as_slice() {
            [a, b] => (*a, *b),
            _ => {
                return Err(ScenarioError::Parse {
                    line: index + 1,
                    reason: format!("expected 2 comma-separated integers, found {}", fields.len()),
                });
            }
        };
        if dimensions.is_none() {
            dimensions = Some(pair);
        } else {
            obstacles.push(GridPoint::new(pair.0, pair.1));
        }
    }
    let (width, height) = dimensions.ok_or(ScenarioError::Parse {
        line: 1,
        reason: "missing `width,height` line".to_string(),
    })?;
    Ok(Environment {
        width,
        height,
        obstacles,
    })
}

fn parse_int_fields(line: &str, lineno: usize) -> Result<Vec<i64>, ScenarioError> {
    line.trim()
        .split(',')
        .map(|field| {
            field
                .trim()
                .parse::<i64>()
                .map_err(|_| ScenarioError::Parse {
                    line: lineno,
                    reason: format!("`{}` is not an integer", field.trim()),
                })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
struct MapSection {
    dimensions: [i64; 2],
    obstacles: Vec<[i64; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct AgentEntry {
    name: String,
    start: [i64; 2],
    goal: [i64; 2],
}

/// The YAML scenario document consumed by the solver
///
/// Shape: `{map: {dimensions: [w, h], obstacles: [[x, y], ...]},
/// agents: [{name, start, goal}, ...]}` with agents named `agent0..agentN-1`
/// in file order.
///
/// # Example
/// ```
/// use mapf_postprocess_core_rs::{read_agents, read_environment, ScenarioDocument};
///
/// let agents = read_agents("0,0,3,3\n".as_bytes()).unwrap();
/// let env = read_environment("4,4\n1,1\n".as_bytes()).unwrap();
/// let yaml = ScenarioDocument::new(&env, &agents).to_yaml().unwrap();
/// assert!(yaml.contains("agent0"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioDocument {
    map: MapSection,
    agents: Vec<AgentEntry>,
}

impl ScenarioDocument {
    /// Assemble the document from parsed environment and agent inputs
    pub fn new(env: &Environment, agents: &AgentList) -> Self {
        let entries = agents
            .starts
            .iter()
            .zip(agents.goals.iter())
            .enumerate()
            .map(|(i, (start, goal))| AgentEntry {
                name: format!("agent{}", i),
                start: [start.x, start.y],
                goal: [goal.x, goal.y],
            })
            .collect();
        Self {
            map: MapSection {
                dimensions: [env.width, env.height],
                obstacles: env.obstacles.iter().map(|o| [o.x, o.y]).collect(),
            },
            agents: entries,
        }
    }

    /// Serialize to YAML text
    pub fn to_yaml(&self) -> Result<String, ScenarioError> {
        serde_yaml::to_string(self).map_err(|e| ScenarioError::Yaml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_agents_splits_starts_and_goals() {
        let agents = read_agents("0,0,3,3\n1,2,4,5\n".as_bytes()).unwrap();
        assert_eq!(agents.len(), 2);
        assert_eq!(agents.starts, vec![GridPoint::new(0, 0), GridPoint::new(1, 2)]);
        assert_eq!(agents.goals, vec![GridPoint::new(3, 3), GridPoint::new(4, 5)]);
    }

    #[test]
    fn test_read_agents_rejects_short_line() {
        let err = read_agents("0,0,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ScenarioError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_read_environment_first_line_is_dimensions() {
        let env = read_environment("8,6\n2,2\n3,4\n".as_bytes()).unwrap();
        assert_eq!((env.width, env.height), (8, 6));
        assert_eq!(env.obstacles, vec![GridPoint::new(2, 2), GridPoint::new(3, 4)]);
    }

    #[test]
    fn test_read_environment_requires_dimensions() {
        let err = read_environment("".as_bytes()).unwrap_err();
        assert!(matches!(err, ScenarioError::Parse { .. }));
    }

    #[test]
    fn test_scenario_document_shape() {
        let agents = read_agents("0,0,3,3\n".as_bytes()).unwrap();
        let env = read_environment("4,4\n1,1\n".as_bytes()).unwrap();
        let yaml = ScenarioDocument::new(&env, &agents).to_yaml().unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        let map = doc.get("map").unwrap();
        assert_eq!(
            map.get("dimensions").unwrap(),
            &serde_yaml::from_str::<serde_yaml::Value>("[4, 4]").unwrap()
        );
        let agents = doc.get("agents").unwrap().as_sequence().unwrap();
        assert_eq!(agents.len(), 1);
        assert_eq!(
            agents[0].get("name").unwrap().as_str().unwrap(),
            "agent0"
        );
    }
}
