use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::core::{Coordinate, Orientation, Point, Pose};
use crate::foundation::error::{VisError, VisResult};
use crate::scene::map::GridMap;

/// All agents' poses at one timestep, indexed by agent id.
pub type Configuration = Vec<Pose>;

static ENTRY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*([XY]_(?:MINUS|PLUS))\s*)?\)")
        .unwrap_or_else(|e| panic!("solution entry regex must compile: {e}"))
});

/// Immutable MAPF solution: one [`Configuration`] per timestep `0..=T`.
///
/// Every configuration holds the same number of agents. Orientation awareness is decided by the
/// first pose of timestep 0.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    configs: Vec<Configuration>,
    orientation_aware: bool,
}

impl Solution {
    /// Build a solution from already-structured configurations.
    pub fn new(configs: Vec<Configuration>) -> VisResult<Self> {
        let Some(first) = configs.first() else {
            return Err(VisError::malformed_solution(
                "solution has no configurations",
            ));
        };
        if first.is_empty() {
            return Err(VisError::malformed_solution("timestep 0 has no agents"));
        }
        let agents = first.len();
        if let Some((t, c)) = configs.iter().enumerate().find(|(_, c)| c.len() != agents) {
            return Err(VisError::malformed_solution(format!(
                "timestep {t} has {} agents, timestep 0 has {agents}",
                c.len()
            )));
        }
        let orientation_aware = first[0].orientation != Orientation::None;
        Ok(Self {
            configs,
            orientation_aware,
        })
    }

    /// Parse solution text: one configuration per line, entries `(x,y)` or `(x,y,ORIENTATION)`.
    ///
    /// Anything between entries (timestep prefixes such as `0:`, commas) is ignored.
    pub fn parse(text: &str) -> VisResult<Self> {
        let mut configs: Vec<Configuration> = Vec::new();
        for (i, line) in text.trim().lines().enumerate() {
            let config = parse_line(line).map_err(|e| match e {
                VisError::MalformedSolution(msg) => {
                    VisError::malformed_solution(format!("line {}: {msg}", i + 1))
                }
                other => other,
            })?;
            if !configs.is_empty() && config.len() != configs[0].len() {
                return Err(VisError::malformed_solution(format!(
                    "line {}: {} agents, line 1 has {}",
                    i + 1,
                    config.len(),
                    configs[0].len()
                )));
            }
            configs.push(config);
        }
        Self::new(configs)
    }

    /// Read and parse a solution file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> VisResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let solution = Self::parse(&text)?;
        tracing::debug!(
            agents = solution.agent_count(),
            last_timestep = solution.last_timestep(),
            orientation_aware = solution.orientation_aware,
            "parsed solution"
        );
        Ok(solution)
    }

    /// Fail with [`VisError::OutOfBoundsSolution`] if any pose lies outside `map`.
    pub fn validate_bounds(&self, map: &GridMap) -> VisResult<()> {
        for (t, config) in self.configs.iter().enumerate() {
            for (agent, pose) in config.iter().enumerate() {
                if !map.contains(pose.position) {
                    return Err(VisError::out_of_bounds(format!(
                        "agent {agent} at timestep {t} is at {}, map is {}x{}",
                        pose.position,
                        map.width(),
                        map.height()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Index of the final timestep (`T`).
    pub fn last_timestep(&self) -> usize {
        self.configs.len() - 1
    }

    /// Number of agents.
    pub fn agent_count(&self) -> usize {
        self.configs[0].len()
    }

    /// Whether agents carry a facing direction.
    pub fn is_orientation_aware(&self) -> bool {
        self.orientation_aware
    }

    /// All configurations in timestep order.
    pub fn configurations(&self) -> &[Configuration] {
        &self.configs
    }

    /// Poses at timestep `t`, clamped to `T`.
    pub fn configuration(&self, t: usize) -> &[Pose] {
        &self.configs[t.min(self.last_timestep())]
    }

    /// Pose of `agent` at timestep `t` (clamped to `T`).
    pub fn pose(&self, t: usize, agent: usize) -> Pose {
        self.configuration(t)[agent]
    }

    /// Cell position of `agent` at timestep `t` in grid units.
    pub fn position(&self, t: usize, agent: usize) -> Point {
        self.pose(t, agent).position.to_point()
    }

    /// Final cell of every agent.
    pub fn goals(&self) -> Vec<Coordinate> {
        self.configuration(self.last_timestep())
            .iter()
            .map(|p| p.position)
            .collect()
    }
}

fn parse_line(line: &str) -> VisResult<Configuration> {
    let mut config = Configuration::new();
    for caps in ENTRY_RE.captures_iter(line) {
        let x = parse_index(&caps[1])?;
        let y = parse_index(&caps[2])?;
        let orientation = caps
            .get(3)
            .map(|m| Orientation::from_token(m.as_str()))
            .unwrap_or_default();
        config.push(Pose::new(Coordinate::new(x, y), orientation));
    }
    if config.is_empty() {
        return Err(VisError::malformed_solution("no (x,y) entries"));
    }
    Ok(config)
}

fn parse_index(s: &str) -> VisResult<u32> {
    s.parse::<u32>()
        .map_err(|e| VisError::malformed_solution(format!("invalid coordinate '{s}': {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/solution.rs"]
mod tests;
