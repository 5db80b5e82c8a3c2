use std::borrow::Cow;

use crate::config::DisplayOptions;
use crate::foundation::core::{Coordinate, Line, Point};
use crate::playback::interpolate::AgentPose;
use crate::playback::trail::AgentTrail;
use crate::scene::map::GridMap;

/// Everything a renderer needs for one frame.
///
/// Borrowed from the engine while playing; [`FrameState::into_owned`] detaches it for offline
/// work such as parallel export.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameState<'a> {
    /// Continuous time of this frame.
    pub time: f64,
    /// Final timestep `T`.
    pub last_timestep: usize,
    /// `"{time:.1} / {T}"`.
    pub progress: String,
    /// Whether poses carry rotations.
    pub orientation_aware: bool,
    /// Interpolated pose per agent.
    pub poses: Cow<'a, [AgentPose]>,
    /// Travelled path per agent.
    pub trails: Cow<'a, [AgentTrail]>,
    /// Goal marker per agent.
    pub goals: Cow<'a, [Point]>,
    /// Line from each agent to its goal.
    pub goal_vectors: Cow<'a, [Line]>,
    /// Overlay toggles in effect.
    pub display: DisplayOptions,
}

/// One agent's slice of a [`FrameState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentFrame<'f> {
    /// Agent id (index in every configuration).
    pub id: usize,
    /// Interpolated pose.
    pub pose: AgentPose,
    /// Travelled path.
    pub trail: &'f AgentTrail,
    /// Goal marker.
    pub goal: Point,
    /// Line from the agent to its goal.
    pub goal_vector: Line,
}

/// Identification text anchored in grid units.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Label {
    /// Text to draw.
    pub text: String,
    /// Center of the labelled agent or cell.
    pub anchor: Point,
}

impl FrameState<'_> {
    /// Number of agents in the frame.
    pub fn agent_count(&self) -> usize {
        self.poses.len()
    }

    /// Iterate agents in id order.
    pub fn agents(&self) -> impl Iterator<Item = AgentFrame<'_>> + '_ {
        self.poses
            .iter()
            .zip(self.trails.iter())
            .zip(self.goals.iter().zip(self.goal_vectors.iter()))
            .enumerate()
            .map(|(id, ((pose, trail), (goal, vector)))| AgentFrame {
                id,
                pose: *pose,
                trail,
                goal: *goal,
                goal_vector: *vector,
            })
    }

    /// Agent ids at their interpolated positions. Empty unless `show_agent_ids` is on.
    pub fn agent_labels(&self) -> Vec<Label> {
        if !self.display.show_agent_ids {
            return Vec::new();
        }
        self.poses
            .iter()
            .enumerate()
            .map(|(id, pose)| Label {
                text: id.to_string(),
                anchor: pose.position,
            })
            .collect()
    }

    /// `x,y` for every free cell of `map`, row-major. Empty unless `show_cell_ids` is on.
    pub fn cell_labels(&self, map: &GridMap) -> Vec<Label> {
        if !self.display.show_cell_ids {
            return Vec::new();
        }
        (0..map.height())
            .flat_map(|y| (0..map.width()).map(move |x| Coordinate::new(x, y)))
            .filter(|c| !map.is_obstacle(*c))
            .map(|c| Label {
                text: format!("{},{}", c.x, c.y),
                anchor: c.to_point(),
            })
            .collect()
    }

    /// Detach from the engine's buffers.
    pub fn into_owned(self) -> FrameState<'static> {
        FrameState {
            time: self.time,
            last_timestep: self.last_timestep,
            progress: self.progress,
            orientation_aware: self.orientation_aware,
            poses: Cow::Owned(self.poses.into_owned()),
            trails: Cow::Owned(self.trails.into_owned()),
            goals: Cow::Owned(self.goals.into_owned()),
            goal_vectors: Cow::Owned(self.goal_vectors.into_owned()),
            display: self.display,
        }
    }
}

/// Progress label shown next to the transport controls.
pub fn progress_label(time: f64, last_timestep: usize) -> String {
    format!("{time:.1} / {last_timestep}")
}
