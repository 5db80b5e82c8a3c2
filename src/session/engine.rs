use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{DisplayOptions, VisConfig};
use crate::foundation::math::TimeSplit;
use crate::playback::clock::{
    Clock, ClockEvent, PlaybackIntent, SPEED_INCREMENT, SPEED_MAX, SPEED_MIN,
};
use crate::playback::goal::GoalOverlay;
use crate::playback::interpolate::{AgentPose, interpolate_into};
use crate::playback::trail::TrailAccumulator;
use crate::playback::transport::TransportCommand;
use crate::scene::solution::Solution;
use crate::session::frame::{FrameState, progress_label};

/// State that only exists while a solution is loaded.
#[derive(Clone, Debug)]
struct Loaded {
    solution: Arc<Solution>,
    clock: Clock,
    poses: Vec<AgentPose>,
    trails: TrailAccumulator,
    goals: GoalOverlay,
}

impl Loaded {
    fn new(solution: Arc<Solution>) -> Self {
        let agents = solution.agent_count();
        let mut out = Self {
            clock: Clock::new(solution.last_timestep()),
            poses: Vec::with_capacity(agents),
            trails: TrailAccumulator::new(agents),
            goals: GoalOverlay::new(&solution),
            solution,
        };
        out.derive();
        out
    }

    /// Interpolator, then trails, then goal vectors, all from the clock's current time.
    fn derive(&mut self) {
        let split = TimeSplit::new(self.clock.time(), self.clock.last_timestep());
        interpolate_into(&self.solution, split, &mut self.poses);
        self.trails.update_split(&self.solution, split);
        self.goals.update(&self.poses);
    }
}

/// Owns playback of one solution: intent, clock, interpolated poses, trails and goals.
///
/// Callers only write intent through setters and issue transport commands; per-frame work
/// happens in [`PlaybackEngine::tick`], which reads a single intent snapshot.
#[derive(Clone, Debug, Default)]
pub struct PlaybackEngine {
    loaded: Option<Loaded>,
    intent: PlaybackIntent,
    display: DisplayOptions,
}

impl PlaybackEngine {
    /// Engine with no solution, using the initial intent and overlays from `config`.
    pub fn new(config: &VisConfig) -> Self {
        Self {
            loaded: None,
            intent: config.playback.normalized(),
            display: config.display,
        }
    }

    /// Replace the current solution; time returns to `0`, trails are cleared, goals recomputed.
    pub fn load_solution(&mut self, solution: impl Into<Arc<Solution>>) {
        let solution = solution.into();
        tracing::debug!(
            agents = solution.agent_count(),
            last_timestep = solution.last_timestep(),
            "engine: solution loaded"
        );
        self.loaded = Some(Loaded::new(solution));
    }

    /// Drop the current solution.
    pub fn unload(&mut self) {
        self.loaded = None;
    }

    /// Currently loaded solution.
    pub fn solution(&self) -> Option<&Arc<Solution>> {
        self.loaded.as_ref().map(|l| &l.solution)
    }

    /// `true` once a solution is loaded; gates screenshot/export.
    pub fn can_export(&self) -> bool {
        self.loaded.is_some()
    }

    /// Current continuous time (`0` when nothing is loaded).
    pub fn current_time(&self) -> f64 {
        self.loaded.as_ref().map_or(0.0, |l| l.clock.time())
    }

    /// Final timestep of the loaded solution.
    pub fn last_timestep(&self) -> Option<usize> {
        self.loaded.as_ref().map(|l| l.clock.last_timestep())
    }

    /// Progress label, `None` when nothing is loaded.
    pub fn progress_label(&self) -> Option<String> {
        self.loaded
            .as_ref()
            .map(|l| progress_label(l.clock.time(), l.clock.last_timestep()))
    }

    /// Snapshot of the current intent.
    pub fn intent(&self) -> PlaybackIntent {
        self.intent
    }

    /// Set playback speed, snapped to the speed grid.
    pub fn set_speed(&mut self, speed: f64) {
        self.intent.speed = PlaybackIntent::snap_speed(speed);
    }

    /// One grid step faster; no-op at the maximum.
    pub fn increase_speed(&mut self) {
        let next = self.intent.speed + SPEED_INCREMENT;
        if next <= SPEED_MAX + 1e-9 {
            self.set_speed(next);
        }
    }

    /// One grid step slower; no-op at the minimum.
    pub fn decrease_speed(&mut self) {
        let next = self.intent.speed - SPEED_INCREMENT;
        if next >= SPEED_MIN - 1e-9 {
            self.set_speed(next);
        }
    }

    /// Play or pause.
    pub fn set_playing(&mut self, playing: bool) {
        self.intent.playing = playing;
    }

    /// Flip play/pause.
    pub fn toggle_playing(&mut self) {
        self.intent.playing = !self.intent.playing;
    }

    /// Enable or disable looping.
    pub fn set_looping(&mut self, looping: bool) {
        self.intent.looping = looping;
    }

    /// Flip looping.
    pub fn toggle_looping(&mut self) {
        self.intent.looping = !self.intent.looping;
    }

    /// Overlay toggles.
    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    /// Mutable overlay toggles.
    pub fn display_mut(&mut self) -> &mut DisplayOptions {
        &mut self.display
    }

    /// Jog backwards by the current speed.
    pub fn step_backward(&mut self) {
        self.transport(TransportCommand::StepBackward);
    }

    /// Jog forwards by the current speed.
    pub fn step_forward(&mut self) {
        self.transport(TransportCommand::StepForward);
    }

    /// Jump back to `0`.
    pub fn restart(&mut self) {
        self.transport(TransportCommand::Restart);
    }

    /// Jump to `time`, clamped to `[0, T]`.
    pub fn seek_to(&mut self, time: f64) {
        self.transport(TransportCommand::SeekTo(time));
    }

    /// Apply a transport command. Derived state catches up on the next frame.
    pub fn transport(&mut self, cmd: TransportCommand) {
        let speed = self.intent.speed;
        if let Some(l) = self.loaded.as_mut() {
            l.clock.apply(cmd, speed);
            tracing::debug!(?cmd, time = l.clock.time(), "engine: transport");
        }
    }

    /// Run one display frame: advance the clock by `dt_wall_seconds`, then derive poses,
    /// trails and goal vectors. Returns `None` when nothing is loaded.
    pub fn tick(&mut self, dt_wall_seconds: f64) -> Option<FrameState<'_>> {
        let intent = self.intent;
        let l = self.loaded.as_mut()?;
        let event = l.clock.advance(intent, dt_wall_seconds);
        if event != ClockEvent::Advanced && event != ClockEvent::Held {
            tracing::trace!(?event, time = l.clock.time(), "engine: timeline boundary");
        }
        l.derive();
        self.frame_view()
    }

    /// Derive and return the frame at the current time without advancing.
    pub fn frame(&mut self) -> Option<FrameState<'_>> {
        self.loaded.as_mut()?.derive();
        self.frame_view()
    }

    fn frame_view(&self) -> Option<FrameState<'_>> {
        let l = self.loaded.as_ref()?;
        Some(FrameState {
            time: l.clock.time(),
            last_timestep: l.clock.last_timestep(),
            progress: progress_label(l.clock.time(), l.clock.last_timestep()),
            orientation_aware: l.solution.is_orientation_aware(),
            poses: Cow::Borrowed(&l.poses),
            trails: Cow::Borrowed(l.trails.trails()),
            goals: Cow::Borrowed(l.goals.markers()),
            goal_vectors: Cow::Borrowed(l.goals.vectors()),
            display: self.display,
        })
    }
}
