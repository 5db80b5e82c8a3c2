use crate::foundation::core::Point;
use crate::foundation::math::{Lerp, TimeSplit};
use crate::scene::solution::Solution;

/// An agent's pose at a continuous time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AgentPose {
    /// Fractional grid position (cell indices; renderers scale to pixels).
    pub position: Point,
    /// Rotation in radians, `None` for orientation-unaware solutions.
    pub rotation: Option<f64>,
}

/// Interpolated pose of every agent at `time`.
///
/// At integer times this returns the exact configuration. Rotation blends the two fixed angles
/// linearly, so e.g. `X_MINUS` (π) to `Y_MINUS` (−π/2) turns the long way round.
pub fn interpolate(solution: &Solution, time: f64) -> Vec<AgentPose> {
    let mut out = Vec::with_capacity(solution.agent_count());
    interpolate_into(
        solution,
        TimeSplit::new(time, solution.last_timestep()),
        &mut out,
    );
    out
}

pub(crate) fn interpolate_into(solution: &Solution, split: TimeSplit, out: &mut Vec<AgentPose>) {
    out.clear();
    let from = solution.configuration(split.t0);
    let to = solution.configuration(split.t1);
    let aware = solution.is_orientation_aware();
    out.extend(from.iter().zip(to).map(|(a, b)| AgentPose {
        position: <Point as Lerp>::lerp(
            &a.position.to_point(),
            &b.position.to_point(),
            split.alpha,
        ),
        rotation: aware.then(|| {
            <f64 as Lerp>::lerp(&a.orientation.angle(), &b.orientation.angle(), split.alpha)
        }),
    }));
}

/// Interpolated position of a single agent.
pub(crate) fn agent_position(solution: &Solution, split: TimeSplit, agent: usize) -> Point {
    <Point as Lerp>::lerp(
        &solution.position(split.t0, agent),
        &solution.position(split.t1, agent),
        split.alpha,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/playback/interpolate.rs"]
mod tests;
