use crate::foundation::core::{Line, Point};
use crate::playback::interpolate::AgentPose;
use crate::scene::solution::Solution;

/// Per-agent goal markers (fixed per solution) and live vectors towards them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalOverlay {
    markers: Vec<Point>,
    vectors: Vec<Line>,
}

impl GoalOverlay {
    /// Markers at each agent's final position; vectors start from timestep 0.
    pub fn new(solution: &Solution) -> Self {
        let markers: Vec<Point> = solution.goals().into_iter().map(|c| c.to_point()).collect();
        let vectors = solution
            .configuration(0)
            .iter()
            .zip(&markers)
            .map(|(p, &goal)| Line::new(p.position.to_point(), goal))
            .collect();
        Self { markers, vectors }
    }

    /// Recompute every goal vector from the agents' current interpolated positions.
    pub fn update(&mut self, poses: &[AgentPose]) {
        self.vectors.clear();
        self.vectors.extend(
            poses
                .iter()
                .zip(&self.markers)
                .map(|(pose, &goal)| Line::new(pose.position, goal)),
        );
    }

    /// Goal marker positions, indexed by agent id.
    pub fn markers(&self) -> &[Point] {
        &self.markers
    }

    /// Current goal vectors, indexed by agent id.
    pub fn vectors(&self) -> &[Line] {
        &self.vectors
    }
}
