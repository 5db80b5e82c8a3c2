use std::path::Path;
use std::sync::Arc;

use crate::config::VisConfig;
use crate::foundation::error::{VisError, VisResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::{CpuRenderOpts, CpuRenderer};
use crate::scene::map::GridMap;
use crate::scene::solution::Solution;
use crate::session::engine::PlaybackEngine;
use crate::session::frame::FrameState;

/// Load boundary around a [`PlaybackEngine`].
///
/// Files are fully parsed and validated before anything is swapped in, so a failed load leaves
/// the previous map, solution and playback position untouched.
#[derive(Clone, Debug)]
pub struct Workspace {
    map: Option<Arc<GridMap>>,
    engine: PlaybackEngine,
    render_opts: CpuRenderOpts,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(&VisConfig::default())
    }
}

impl Workspace {
    /// Empty workspace configured from `config`.
    pub fn new(config: &VisConfig) -> Self {
        Self {
            map: None,
            engine: PlaybackEngine::new(config),
            render_opts: config.render.clone(),
        }
    }

    /// Install a map. Any loaded solution is dropped, it was validated against the old bounds.
    pub fn load_map(&mut self, map: GridMap) {
        tracing::debug!(
            width = map.width(),
            height = map.height(),
            "workspace: map loaded"
        );
        self.map = Some(Arc::new(map));
        self.engine.unload();
    }

    /// Parse and install map text.
    pub fn load_map_str(&mut self, text: &str) -> VisResult<()> {
        let map = GridMap::parse(text)?;
        self.load_map(map);
        Ok(())
    }

    /// Read, parse and install a map file.
    pub fn load_map_path(&mut self, path: &Path) -> VisResult<()> {
        let map = GridMap::from_path(path)?;
        self.load_map(map);
        Ok(())
    }

    /// Validate `solution` against the current map and hand it to the engine.
    pub fn load_solution(&mut self, solution: Solution) -> VisResult<()> {
        let map = self
            .map
            .as_ref()
            .ok_or_else(|| VisError::validation("load a map before loading a solution"))?;
        solution.validate_bounds(map)?;
        self.engine.load_solution(solution);
        Ok(())
    }

    /// Parse, validate and install solution text.
    pub fn load_solution_str(&mut self, text: &str) -> VisResult<()> {
        let solution = Solution::parse(text)?;
        self.load_solution(solution)
    }

    /// Read, parse, validate and install a solution file.
    #[tracing::instrument(skip(self))]
    pub fn load_solution_path(&mut self, path: &Path) -> VisResult<()> {
        let solution = Solution::from_path(path)?;
        self.load_solution(solution)
    }

    /// Current map.
    pub fn map(&self) -> Option<&Arc<GridMap>> {
        self.map.as_ref()
    }

    /// The playback engine.
    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    /// The playback engine, for setters and transport commands.
    pub fn engine_mut(&mut self) -> &mut PlaybackEngine {
        &mut self.engine
    }

    /// Rasterizer settings used by [`Workspace::screenshot`].
    pub fn render_opts(&self) -> &CpuRenderOpts {
        &self.render_opts
    }

    /// `true` once a solution is loaded.
    pub fn can_export(&self) -> bool {
        self.engine.can_export()
    }

    /// Seek to `time` and derive that frame.
    pub fn frame_at(&mut self, time: f64) -> Option<FrameState<'_>> {
        self.engine.seek_to(time);
        self.engine.frame()
    }

    /// Render the current frame.
    pub fn screenshot(&mut self) -> VisResult<FrameRGBA> {
        let map = self
            .map
            .clone()
            .ok_or_else(|| VisError::export("no map loaded"))?;
        let mut renderer = CpuRenderer::new(self.render_opts.clone())?;
        let frame = self
            .engine
            .frame()
            .ok_or_else(|| VisError::export("no solution loaded"))?;
        renderer.render(&map, &frame)
    }
}
