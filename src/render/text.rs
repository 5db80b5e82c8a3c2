use std::path::Path;

use crate::foundation::core::Point;
use crate::foundation::error::{VisError, VisResult};

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono.ttf");

/// Straight-alpha RGBA8 brush carried through parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct LabelBrush(pub(crate) [u8; 4]);

/// Where a label sits relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LabelAlign {
    Center,
    TopLeft,
}

/// Shapes short labels with parley and fills them with `vello_cpu` glyph runs.
///
/// One font is registered once and reused for every label.
pub(crate) struct LabelPainter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<LabelBrush>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl LabelPainter {
    /// Painter over the bundled monospace font.
    pub(crate) fn bundled() -> VisResult<Self> {
        Self::from_bytes(BUNDLED_FONT.to_vec())
    }

    pub(crate) fn from_path(path: &Path) -> VisResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            VisError::render(format!("read label font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }

    pub(crate) fn from_bytes(bytes: Vec<u8>) -> VisResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| VisError::render("label font has no font families"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| VisError::render("label font family has no name"))?
            .to_string();
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        })
    }

    fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        brush: LabelBrush,
    ) -> parley::Layout<LabelBrush> {
        let family = self.family.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<LabelBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Fill `text` at pixel position `anchor`. Leaves the context transform at identity.
    pub(crate) fn draw(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        size_px: f32,
        rgba: [u8; 4],
        anchor: Point,
        align: LabelAlign,
    ) {
        if text.is_empty() || !size_px.is_finite() || size_px <= 0.0 {
            return;
        }
        let layout = self.layout(text, size_px, LabelBrush(rgba));
        let origin = match align {
            LabelAlign::TopLeft => anchor,
            LabelAlign::Center => Point::new(
                anchor.x - f64::from(layout.width()) * 0.5,
                anchor.y - f64::from(layout.height()) * 0.5,
            ),
        };

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let LabelBrush([r, g, b, a]) = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&self.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}
