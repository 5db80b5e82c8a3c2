//! Frame-driven playback primitives.
//!
//! Per frame the order is always: [`clock`] advance, [`interpolate`], [`trail`] update,
//! [`goal`] vectors. [`transport`] commands rewrite the clock directly between frames.

/// Continuous timeline clock and playback intent.
pub mod clock;
/// Goal markers and goal vectors.
pub mod goal;
/// Pose interpolation between timesteps.
pub mod interpolate;
/// Incremental per-agent trails.
pub mod trail;
/// Discrete seek commands.
pub mod transport;
