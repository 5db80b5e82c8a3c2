/// Rendered frame buffers.
pub mod backend;
/// `vello_cpu` rasterizer for frame snapshots.
pub mod cpu;
mod text;
