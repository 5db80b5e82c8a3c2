//! `mapf-vis` turns Multi-Agent Path Finding solutions into smooth, seekable playback.
//!
//! The heart of the crate is the playback engine: a discrete sequence of per-timestep agent
//! configurations becomes a continuous timeline that can be played, paused, looped, sped up and
//! jogged, while per-agent trails and goal vectors are kept consistent under seeks in either
//! direction.
//!
//! - Load a [`GridMap`] and a [`Solution`] through a [`Workspace`]
//! - Drive the [`PlaybackEngine`] with [`PlaybackEngine::tick`] once per display frame
//! - Hand each [`FrameState`] to a renderer, or export PNGs with the built-in [`CpuRenderer`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Encoding sinks for rendered frames.
pub mod encode;
/// Playback building blocks: clock, interpolation, trails, goals and transport.
pub mod playback;
/// CPU rasterization of frame snapshots.
pub mod render;
/// Grid maps and MAPF solutions.
pub mod scene;
/// Engine, workspace and timeline export.
pub mod session;

/// User-facing settings shared by the library and the CLI.
pub mod config;

pub use crate::foundation::core::{Coordinate, Line, Orientation, Point, Pose, Vec2};
pub use crate::foundation::error::{VisError, VisResult};

pub use crate::config::{DisplayOptions, VisConfig};
pub use crate::encode::png::write_png;
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::playback::clock::{
    DEFAULT_FRAME_RATE_HZ, PlaybackIntent, SPEED_INCREMENT, SPEED_MAX, SPEED_MIN,
};
pub use crate::playback::interpolate::AgentPose;
pub use crate::playback::trail::AgentTrail;
pub use crate::render::backend::FrameRGBA;
pub use crate::render::cpu::{CpuRenderOpts, CpuRenderer};
pub use crate::scene::map::GridMap;
pub use crate::scene::solution::{Configuration, Solution};
pub use crate::session::engine::PlaybackEngine;
pub use crate::session::export::{ExportOpts, ExportStats, render_timeline};
pub use crate::session::frame::{AgentFrame, FrameState, Label};
pub use crate::session::workspace::Workspace;
