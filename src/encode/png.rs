use std::path::Path;

use crate::foundation::error::{VisError, VisResult};
use crate::render::backend::FrameRGBA;

/// Write `frame` as an RGBA PNG, creating parent directories as needed.
///
/// Premultiplied frames are converted to straight alpha first.
pub fn write_png(path: &Path, frame: &FrameRGBA) -> VisResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let straight = frame.to_unpremultiplied();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| VisError::export(format!("write png '{}': {e}", path.display())))
}
