use rayon::prelude::*;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::error::{VisError, VisResult};
use crate::foundation::math::TIME_EPSILON;
use crate::playback::clock::DEFAULT_FRAME_RATE_HZ;
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuRenderOpts, CpuRenderer};
use crate::scene::map::GridMap;
use crate::session::engine::PlaybackEngine;
use crate::session::frame::FrameState;
use crate::session::workspace::Workspace;

/// Timeline export controls.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportOpts {
    /// Output frames per second; each frame advances the clock by `1 / fps` wall seconds.
    pub fps: f64,
    /// Playback speed override. `None` keeps the workspace's speed.
    pub speed: Option<f64>,
    /// Rasterize chunks on a rayon pool when `true`.
    pub parallel: bool,
    /// Frames derived and rasterized per batch.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FRAME_RATE_HZ,
            speed: None,
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

impl ExportOpts {
    /// Reject unusable settings.
    pub fn validate(&self) -> VisResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(VisError::validation("export fps must be > 0"));
        }
        if let Some(s) = self.speed
            && (!s.is_finite() || s <= 0.0)
        {
            return Err(VisError::validation("export speed must be > 0"));
        }
        if self.threads == Some(0) {
            return Err(VisError::validation(
                "export 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Counters reported by [`render_timeline`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExportStats {
    /// Frames pushed to the sink.
    pub frames: u64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Timeline time of the last frame.
    pub end_time: f64,
}

/// Play the loaded solution once from `0` to `T` and push every rendered frame to `sink`.
///
/// The workspace is left untouched: a clone of its engine is rewound, set to play without looping,
/// and ticked at `1 / fps`. The final frame always sits exactly on `T`.
#[tracing::instrument(skip_all, fields(fps = opts.fps, parallel = opts.parallel))]
pub fn render_timeline(
    workspace: &Workspace,
    opts: &ExportOpts,
    sink: &mut dyn FrameSink,
) -> VisResult<ExportStats> {
    opts.validate()?;
    let map = workspace
        .map()
        .ok_or_else(|| VisError::export("no map loaded"))?;
    if !workspace.can_export() {
        return Err(VisError::export("no solution loaded"));
    }
    let render_opts = workspace.render_opts().clone();
    render_opts.validate()?;

    let (width, height) = CpuRenderer::from_validated(render_opts.clone()).canvas_size(map)?;
    let mut engine = workspace.engine().clone();
    engine.restart();
    engine.set_looping(false);
    engine.set_playing(true);
    if let Some(speed) = opts.speed {
        engine.set_speed(speed);
    }

    tracing::debug!(
        planned = ?planned_frames(&engine, opts.fps),
        speed = engine.intent().speed,
        "export: starting"
    );

    let pool = if opts.parallel {
        Some(build_thread_pool(opts.threads)?)
    } else {
        None
    };
    let chunk_size = opts.chunk_size.max(1);
    let dt = 1.0 / opts.fps;

    sink.begin(SinkConfig {
        width: u32::from(width),
        height: u32::from(height),
        fps: opts.fps,
    })?;

    let mut stats = ExportStats {
        width: u32::from(width),
        height: u32::from(height),
        ..ExportStats::default()
    };
    let mut serial = CpuRenderer::from_validated(render_opts.clone());
    let mut pending = Some(
        engine
            .frame()
            .ok_or_else(|| VisError::export("no solution loaded"))?
            .into_owned(),
    );

    while pending.is_some() {
        let mut chunk = Vec::with_capacity(chunk_size);
        while chunk.len() < chunk_size {
            let Some(frame) = pending.take() else { break };
            let at_end = is_last(&frame);
            chunk.push(frame);
            if !at_end {
                pending = engine.tick(dt).map(FrameState::into_owned);
            }
        }

        let rendered = match &pool {
            Some(pool) => render_chunk_parallel(pool, map, &render_opts, &chunk),
            None => chunk
                .iter()
                .map(|f| serial.render(map, f))
                .collect::<Vec<_>>(),
        };
        for (frame, state) in rendered.into_iter().zip(&chunk) {
            sink.push_frame(stats.frames, &frame?)?;
            stats.frames += 1;
            stats.end_time = state.time;
        }
        tracing::trace!(
            frames = stats.frames,
            time = stats.end_time,
            "export: chunk done"
        );
    }

    sink.end()?;
    tracing::debug!(frames = stats.frames, width, height, "export finished");
    Ok(stats)
}

fn is_last(frame: &FrameState<'_>) -> bool {
    frame.time >= frame.last_timestep as f64
}

fn render_chunk_parallel(
    pool: &rayon::ThreadPool,
    map: &GridMap,
    render_opts: &CpuRenderOpts,
    chunk: &[FrameState<'static>],
) -> Vec<VisResult<FrameRGBA>> {
    pool.install(|| {
        chunk
            .par_iter()
            .map_init(
                || CpuRenderer::from_validated(render_opts.clone()),
                |renderer, frame| renderer.render(map, frame),
            )
            .collect::<Vec<_>>()
    })
}

fn build_thread_pool(threads: Option<usize>) -> VisResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| VisError::export(format!("failed to build rayon thread pool: {e}")))
}

/// Frame count [`render_timeline`] produces for `engine`'s timeline at `fps`.
///
/// Useful for progress reporting before an export starts.
pub fn planned_frames(engine: &PlaybackEngine, fps: f64) -> Option<u64> {
    let last = engine.last_timestep()? as f64;
    let per_frame = engine.intent().speed / fps;
    if !per_frame.is_finite() || per_frame <= 0.0 {
        return None;
    }
    let steps = (last / per_frame - TIME_EPSILON).ceil().max(0.0);
    Some(steps as u64 + 1)
}
