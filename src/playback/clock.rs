use crate::foundation::math::snap_time;
use crate::playback::transport::TransportCommand;

/// Smallest selectable playback speed (timesteps per second).
pub const SPEED_MIN: f64 = 0.2;
/// Largest selectable playback speed.
pub const SPEED_MAX: f64 = 10.0;
/// Speed grid increment.
pub const SPEED_INCREMENT: f64 = 0.2;
/// Nominal display refresh rate driving [`Clock::advance`].
pub const DEFAULT_FRAME_RATE_HZ: f64 = 60.0;

/// What the user wants playback to do. Written by setters, snapshotted once per frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackIntent {
    /// Timeline units advanced per wall-clock second; also the jog distance of a step.
    pub speed: f64,
    /// Whether the clock advances.
    pub playing: bool,
    /// Whether reaching the end restarts from `0`.
    pub looping: bool,
}

impl Default for PlaybackIntent {
    fn default() -> Self {
        Self {
            speed: 1.0,
            playing: true,
            looping: true,
        }
    }
}

impl PlaybackIntent {
    /// Snap `speed` onto the `SPEED_INCREMENT` grid inside `[SPEED_MIN, SPEED_MAX]`.
    pub fn snap_speed(speed: f64) -> f64 {
        if !speed.is_finite() {
            return SPEED_MIN;
        }
        let steps = (speed / SPEED_INCREMENT).round();
        let snapped = (steps * SPEED_INCREMENT).clamp(SPEED_MIN, SPEED_MAX);
        (snapped * 10.0).round() / 10.0
    }

    /// Copy of `self` with the speed snapped onto the grid.
    pub fn normalized(self) -> Self {
        Self {
            speed: Self::snap_speed(self.speed),
            ..self
        }
    }
}

/// Outcome of one [`Clock::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockEvent {
    /// Time did not move (paused, or parked at the end without looping).
    Held,
    /// Time moved forward inside the timeline.
    Advanced,
    /// Time overran the end while looping and restarted at `0`.
    Wrapped,
    /// Time overran the end without looping and was clamped to `T`.
    ReachedEnd,
}

/// Continuous position on the `[0, T]` timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    time: f64,
    last: usize,
}

impl Clock {
    /// Clock at `0` for a solution whose final timestep is `last_timestep`.
    pub fn new(last_timestep: usize) -> Self {
        Self {
            time: 0.0,
            last: last_timestep,
        }
    }

    /// Current continuous time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Final timestep `T`.
    pub fn last_timestep(&self) -> usize {
        self.last
    }

    /// `true` once the time sits on `T`.
    pub fn is_at_end(&self) -> bool {
        self.time >= self.last as f64
    }

    /// Advance by `speed * dt_wall_seconds` when playing.
    ///
    /// Never moves backwards on its own. Overrunning `T` wraps to `0` when looping, otherwise
    /// clamps to `T`, after which further calls are no-ops until a seek.
    pub fn advance(&mut self, intent: PlaybackIntent, dt_wall_seconds: f64) -> ClockEvent {
        if !intent.playing || !dt_wall_seconds.is_finite() || dt_wall_seconds <= 0.0 {
            return ClockEvent::Held;
        }
        let end = self.last as f64;
        if !intent.looping && self.time >= end {
            return ClockEvent::Held;
        }

        let next = snap_time(self.time + intent.speed.max(0.0) * dt_wall_seconds);
        if next > end {
            if intent.looping {
                self.time = 0.0;
                return ClockEvent::Wrapped;
            }
            self.time = end;
            return ClockEvent::ReachedEnd;
        }
        if next == self.time {
            return ClockEvent::Held;
        }
        self.time = next;
        ClockEvent::Advanced
    }

    /// Apply a transport command, bypassing per-frame accumulation.
    pub fn apply(&mut self, cmd: TransportCommand, speed: f64) {
        self.time = cmd.target(self.time, speed, self.last);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
