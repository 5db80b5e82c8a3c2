/// The playback engine: owner of clock, trails and goal overlay.
pub mod engine;
/// Whole-timeline export to frame sinks.
pub mod export;
/// Per-frame snapshot handed to renderers.
pub mod frame;
/// Map/solution loading boundary around the engine.
pub mod workspace;
