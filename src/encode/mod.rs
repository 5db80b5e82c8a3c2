/// PNG output for single frames.
pub mod png;
/// Ordered frame consumers used by timeline export.
pub mod sink;
