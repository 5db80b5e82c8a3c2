use crate::foundation::core::{Line, Point};
use crate::foundation::math::TimeSplit;
use crate::playback::interpolate::agent_position;
use crate::scene::solution::Solution;

/// Path already travelled by one agent.
///
/// `committed` holds one unit segment per fully elapsed timestep; `partial` covers the
/// in-progress step from the last timestep to the interpolated position.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct AgentTrail {
    committed: Vec<Line>,
    partial: Option<Line>,
}

impl AgentTrail {
    /// Unit segments `[t, t + 1]` for every elapsed timestep.
    pub fn committed(&self) -> &[Line] {
        &self.committed
    }

    /// In-progress segment, if the agent is between timesteps.
    pub fn partial(&self) -> Option<Line> {
        self.partial
    }

    /// Committed segments followed by the partial one.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.committed.iter().copied().chain(self.partial)
    }

    /// Where the drawn trail currently ends.
    pub fn head(&self) -> Option<Point> {
        self.segments().last().map(|l| l.p1)
    }
}

/// Keeps every agent's [`AgentTrail`] in step with the clock without rebuilding history.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailAccumulator {
    trails: Vec<AgentTrail>,
}

impl TrailAccumulator {
    /// Empty trails for `agent_count` agents.
    pub fn new(agent_count: usize) -> Self {
        Self {
            trails: vec![AgentTrail::default(); agent_count],
        }
    }

    /// Drop all segments and resize for `agent_count` agents.
    pub fn reset(&mut self, agent_count: usize) {
        self.trails.clear();
        self.trails.resize_with(agent_count, AgentTrail::default);
    }

    /// Reconcile all trails with `time`.
    ///
    /// After a backward seek the committed buffer is truncated from the end; after a forward
    /// move the missing unit segments are appended one by one. The partial segment is rebuilt
    /// every call. Calling twice with the same time is a no-op the second time.
    pub fn update(&mut self, solution: &Solution, time: f64) {
        self.update_split(solution, TimeSplit::new(time, solution.last_timestep()));
    }

    pub(crate) fn update_split(&mut self, solution: &Solution, split: TimeSplit) {
        if self.trails.len() != solution.agent_count() {
            self.reset(solution.agent_count());
        }
        let target = split.t0;

        for (agent, trail) in self.trails.iter_mut().enumerate() {
            if trail.committed.len() > target {
                trail.committed.truncate(target);
            }
            while trail.committed.len() < target {
                let t = trail.committed.len();
                trail.committed.push(Line::new(
                    solution.position(t, agent),
                    solution.position(t + 1, agent),
                ));
            }

            trail.partial = if split.is_on_timestep() {
                None
            } else {
                Some(Line::new(
                    solution.position(split.t0, agent),
                    agent_position(solution, split, agent),
                ))
            };
        }
    }

    /// Per-agent trails, indexed by agent id.
    pub fn trails(&self) -> &[AgentTrail] {
        &self.trails
    }

    /// Committed segment count (identical for every agent after an update).
    pub fn committed_count(&self) -> usize {
        self.trails.first().map_or(0, |t| t.committed.len())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/trail.rs"]
mod tests;
