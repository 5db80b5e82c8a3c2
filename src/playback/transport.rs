use crate::foundation::math::{clamp_time, snap_time};

/// Discrete seek issued between frames.
///
/// Steps jog by the current playback speed, not by one timestep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransportCommand {
    /// `max(0, time - speed)`.
    StepBackward,
    /// `min(time + speed, T)`.
    StepForward,
    /// Jump to `0`.
    Restart,
    /// Jump to an absolute time, clamped to `[0, T]`.
    SeekTo(f64),
}

impl TransportCommand {
    /// Time after applying the command at `time` with the given `speed` on a `[0, last]` timeline.
    pub fn target(self, time: f64, speed: f64, last: usize) -> f64 {
        let t = match self {
            Self::StepBackward => time - speed,
            Self::StepForward => time + speed,
            Self::Restart => 0.0,
            Self::SeekTo(t) => t,
        };
        snap_time(clamp_time(t, last))
    }
}
