use std::path::PathBuf;

use kurbo::Shape;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Line, Point, Vec2};
use crate::foundation::error::{VisError, VisResult};
use crate::render::backend::FrameRGBA;
use crate::render::text::{LabelAlign, LabelPainter};
use crate::scene::map::GridMap;
use crate::session::frame::FrameState;

const CIRCLE_TOLERANCE: f64 = 0.1;

/// Rasterizer settings.
///
/// Colors are straight-alpha RGBA8. Agents cycle through `agent_palette` by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuRenderOpts {
    /// Edge length of one grid cell in pixels.
    pub cell_px: u32,
    /// Canvas fill.
    pub background_rgba: [u8; 4],
    /// Grid line color.
    pub grid_rgba: [u8; 4],
    /// Obstacle cell color.
    pub obstacle_rgba: [u8; 4],
    /// Orientation marker color.
    pub marker_rgba: [u8; 4],
    /// Per-agent colors, indexed by `id % len`.
    pub agent_palette: Vec<[u8; 4]>,
    /// Cell coordinate label color. Agent ids use `marker_rgba`.
    pub label_rgba: [u8; 4],
    /// TrueType/OpenType font for labels. The bundled monospace font when unset.
    pub label_font: Option<PathBuf>,
}

impl Default for CpuRenderOpts {
    fn default() -> Self {
        Self {
            cell_px: 32,
            background_rgba: [255, 255, 255, 255],
            grid_rgba: [200, 200, 200, 255],
            obstacle_rgba: [0, 0, 0, 255],
            marker_rgba: [255, 255, 255, 255],
            agent_palette: vec![
                [31, 119, 180, 255],
                [255, 127, 14, 255],
                [44, 160, 44, 255],
                [214, 39, 40, 255],
                [148, 103, 189, 255],
                [140, 86, 75, 255],
                [227, 119, 194, 255],
                [127, 127, 127, 255],
                [188, 189, 34, 255],
                [23, 190, 207, 255],
            ],
            label_rgba: [120, 120, 120, 255],
            label_font: None,
        }
    }
}

impl CpuRenderOpts {
    /// Reject settings that cannot produce a frame.
    pub fn validate(&self) -> VisResult<()> {
        if self.cell_px == 0 {
            return Err(VisError::validation("render.cell_px must be > 0"));
        }
        if self.agent_palette.is_empty() {
            return Err(VisError::validation(
                "render.agent_palette must not be empty",
            ));
        }
        if let Some(path) = &self.label_font
            && !path.is_file()
        {
            return Err(VisError::validation(format!(
                "render.label_font '{}' is not a file",
                path.display()
            )));
        }
        Ok(())
    }

    /// Color for agent `id`.
    pub fn agent_color(&self, id: usize) -> [u8; 4] {
        self.agent_palette[id % self.agent_palette.len()]
    }

    fn cell(&self) -> f64 {
        f64::from(self.cell_px)
    }

    /// Pixel position of a grid-space point (cell centers sit at half-cell offsets).
    fn to_px(&self, p: Point) -> Point {
        let c = self.cell();
        Point::new((p.x + 0.5) * c, (p.y + 0.5) * c)
    }
}

/// Draws a [`FrameState`] over its [`GridMap`] with `vello_cpu`.
///
/// The render context is kept between calls and reused while the canvas size stays the same.
/// The label font is loaded the first time a frame asks for agent or cell ids.
pub struct CpuRenderer {
    opts: CpuRenderOpts,
    ctx: Option<vello_cpu::RenderContext>,
    labels: Option<LabelPainter>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("opts", &self.opts)
            .field("has_ctx", &self.ctx.is_some())
            .field("has_labels", &self.labels.is_some())
            .finish()
    }
}

impl CpuRenderer {
    /// Create a renderer after validating `opts`.
    pub fn new(opts: CpuRenderOpts) -> VisResult<Self> {
        opts.validate()?;
        Ok(Self::from_validated(opts))
    }

    pub(crate) fn from_validated(opts: CpuRenderOpts) -> Self {
        Self {
            opts,
            ctx: None,
            labels: None,
        }
    }

    /// Settings in use.
    pub fn opts(&self) -> &CpuRenderOpts {
        &self.opts
    }

    /// Canvas size in pixels for `map`.
    pub fn canvas_size(&self, map: &GridMap) -> VisResult<(u16, u16)> {
        let dim = |cells: u32, axis: &str| -> VisResult<u16> {
            cells
                .checked_mul(self.opts.cell_px)
                .and_then(|px| u16::try_from(px).ok())
                .ok_or_else(|| {
                    VisError::render(format!(
                        "canvas {axis} of {cells} cells at {} px per cell exceeds {}",
                        self.opts.cell_px,
                        u16::MAX
                    ))
                })
        };
        Ok((dim(map.width(), "width")?, dim(map.height(), "height")?))
    }

    /// Rasterize one frame. The result is premultiplied RGBA8.
    pub fn render(&mut self, map: &GridMap, frame: &FrameState<'_>) -> VisResult<FrameRGBA> {
        let (width, height) = self.canvas_size(map)?;
        let display = frame.display;
        if (display.show_agent_ids || display.show_cell_ids) && self.labels.is_none() {
            self.labels = Some(match &self.opts.label_font {
                Some(path) => LabelPainter::from_path(path)?,
                None => LabelPainter::bundled()?,
            });
        }

        self.with_ctx_mut(width, height, |this, ctx| {
            this.draw_board(ctx, map);
            this.draw_cell_labels(ctx, map, frame);
            this.draw_frame(ctx, frame);
            this.draw_agent_labels(ctx, frame);
            ctx.flush();

            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(FrameRGBA {
                width: u32::from(width),
                height: u32::from(height),
                data: pixmap.data_as_u8_slice().to_vec(),
                premultiplied: true,
            })
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> VisResult<R>,
    ) -> VisResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn draw_board(&self, ctx: &mut vello_cpu::RenderContext, map: &GridMap) {
        let c = self.opts.cell();
        let w = f64::from(map.width()) * c;
        let h = f64::from(map.height()) * c;

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        set_color(ctx, self.opts.background_rgba);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));

        set_color(ctx, self.opts.obstacle_rgba);
        for cell in map.obstacles() {
            let x0 = f64::from(cell.x) * c;
            let y0 = f64::from(cell.y) * c;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(x0, y0, x0 + c, y0 + c));
        }

        let half = (c / 32.0).max(0.5);
        set_color(ctx, self.opts.grid_rgba);
        for x in 0..=map.width() {
            let px = f64::from(x) * c;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(px - half, 0.0, px + half, h));
        }
        for y in 0..=map.height() {
            let py = f64::from(y) * c;
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, py - half, w, py + half));
        }
    }

    fn draw_frame(&self, ctx: &mut vello_cpu::RenderContext, frame: &FrameState<'_>) {
        let c = self.opts.cell();
        let display = frame.display;

        if display.show_goals {
            let half = c * 0.3;
            let edge = (c / 16.0).max(1.0);
            for agent in frame.agents() {
                set_color(ctx, self.opts.agent_color(agent.id));
                let g = self.opts.to_px(agent.goal);
                outline_rect(ctx, g, half, edge);
            }
        }

        if display.trace_paths {
            let width = c * 0.12;
            for agent in frame.agents() {
                set_color(ctx, self.opts.agent_color(agent.id));
                for seg in agent.trail.segments() {
                    self.fill_segment(ctx, seg, width);
                }
            }
        }

        if display.show_goal_vectors {
            let width = (c * 0.05).max(1.0);
            for agent in frame.agents() {
                set_color(ctx, self.opts.agent_color(agent.id));
                self.fill_segment(ctx, agent.goal_vector, width);
            }
        }

        let radius = c / 3.0;
        for agent in frame.agents() {
            let center = self.opts.to_px(agent.pose.position);
            set_color(ctx, self.opts.agent_color(agent.id));
            fill_circle(ctx, center, radius);

            if let Some(angle) = agent.pose.rotation {
                let (sin, cos) = angle.sin_cos();
                let turn = |v: Vec2| {
                    center + Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
                };
                let mut tri = kurbo::BezPath::new();
                tri.move_to(turn(Vec2::new(0.0, radius)));
                tri.line_to(turn(Vec2::new(0.0, -radius)));
                tri.line_to(turn(Vec2::new(radius, 0.0)));
                tri.close_path();
                set_color(ctx, self.opts.marker_rgba);
                ctx.fill_path(&bezpath_to_cpu(&tri));
            }
        }
    }

    fn draw_cell_labels(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        map: &GridMap,
        frame: &FrameState<'_>,
    ) {
        let Some(painter) = self.labels.as_mut() else {
            return;
        };
        let c = self.opts.cell();
        let pad = (c * 0.06).max(1.0);
        let size = (c * 0.22) as f32;
        for label in frame.cell_labels(map) {
            let center = self.opts.to_px(label.anchor);
            let corner = Point::new(center.x - c * 0.5 + pad, center.y - c * 0.5 + pad);
            painter.draw(
                ctx,
                &label.text,
                size,
                self.opts.label_rgba,
                corner,
                LabelAlign::TopLeft,
            );
        }
    }

    fn draw_agent_labels(&mut self, ctx: &mut vello_cpu::RenderContext, frame: &FrameState<'_>) {
        let Some(painter) = self.labels.as_mut() else {
            return;
        };
        let size = (self.opts.cell() * 0.45) as f32;
        for label in frame.agent_labels() {
            let center = self.opts.to_px(label.anchor);
            painter.draw(
                ctx,
                &label.text,
                size,
                self.opts.marker_rgba,
                center,
                LabelAlign::Center,
            );
        }
    }

    /// Thick line as a quad with round caps.
    fn fill_segment(&self, ctx: &mut vello_cpu::RenderContext, seg: Line, width: f64) {
        let a = self.opts.to_px(seg.p0);
        let b = self.opts.to_px(seg.p1);
        let half = width * 0.5;
        fill_circle(ctx, a, half);
        fill_circle(ctx, b, half);

        let d = b - a;
        let len = d.hypot();
        if len < 1e-6 {
            return;
        }
        let n = Vec2::new(-d.y, d.x) * (half / len);
        let mut quad = kurbo::BezPath::new();
        quad.move_to(a + n);
        quad.line_to(b + n);
        quad.line_to(b - n);
        quad.line_to(a - n);
        quad.close_path();
        ctx.fill_path(&bezpath_to_cpu(&quad));
    }
}

fn set_color(ctx: &mut vello_cpu::RenderContext, [r, g, b, a]: [u8; 4]) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
}

fn fill_circle(ctx: &mut vello_cpu::RenderContext, center: Point, radius: f64) {
    let path = kurbo::Circle::new(center, radius).to_path(CIRCLE_TOLERANCE);
    ctx.fill_path(&bezpath_to_cpu(&path));
}

fn outline_rect(ctx: &mut vello_cpu::RenderContext, center: Point, half: f64, edge: f64) {
    let (x0, y0) = (center.x - half, center.y - half);
    let (x1, y1) = (center.x + half, center.y + half);
    for r in [
        vello_cpu::kurbo::Rect::new(x0, y0, x1, y0 + edge),
        vello_cpu::kurbo::Rect::new(x0, y1 - edge, x1, y1),
        vello_cpu::kurbo::Rect::new(x0, y0, x0 + edge, y1),
        vello_cpu::kurbo::Rect::new(x1 - edge, y0, x1, y1),
    ] {
        ctx.fill_rect(&r);
    }
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
