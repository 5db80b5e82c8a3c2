use std::collections::HashSet;
use std::path::Path;

use crate::foundation::core::Coordinate;
use crate::foundation::error::{VisError, VisResult};

/// Four-connected grid with blocked cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    width: u32,
    height: u32,
    obstacles: HashSet<Coordinate>,
}

impl GridMap {
    /// Build a map directly from its size and blocked cells.
    pub fn new(
        width: u32,
        height: u32,
        obstacles: impl IntoIterator<Item = Coordinate>,
    ) -> VisResult<Self> {
        let obstacles: HashSet<Coordinate> = obstacles.into_iter().collect();
        if let Some(c) = obstacles.iter().find(|c| c.x >= width || c.y >= height) {
            return Err(VisError::malformed_map(format!(
                "obstacle {c} lies outside a {width}x{height} map"
            )));
        }
        Ok(Self {
            width,
            height,
            obstacles,
        })
    }

    /// Parse MovingAI `.map` text.
    ///
    /// ```text
    /// type octile
    /// height 2
    /// width 3
    /// map
    /// ..@
    /// ...
    /// ```
    ///
    /// Every character other than `.` is an obstacle.
    pub fn parse(text: &str) -> VisResult<Self> {
        let lines: Vec<&str> = text
            .trim()
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        if lines.len() < 4 {
            return Err(VisError::malformed_map(
                "expected a 4-line header (type/height/width/map)",
            ));
        }

        let height = header_value(lines[1], "height")?;
        let rows = &lines[4..];
        if rows.len() != height as usize {
            return Err(VisError::malformed_map(format!(
                "declared height {height} but found {} rows, check height",
                rows.len()
            )));
        }
        let width = header_value(lines[2], "width")?;

        let mut obstacles = HashSet::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width as usize {
                return Err(VisError::malformed_map(format!(
                    "row {y} has {} cells, declared width {width}, check width",
                    row.chars().count()
                )));
            }
            for (x, cell) in row.chars().enumerate() {
                if cell != '.' {
                    obstacles.insert(Coordinate::new(x as u32, y as u32));
                }
            }
        }

        Ok(Self {
            width,
            height,
            obstacles,
        })
    }

    /// Read and parse a `.map` file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> VisResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let map = Self::parse(&text)?;
        tracing::debug!(
            width = map.width,
            height = map.height,
            obstacles = map.obstacles.len(),
            "loaded map"
        );
        Ok(map)
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Return `true` when `c` is inside the grid.
    pub fn contains(&self, c: Coordinate) -> bool {
        c.x < self.width && c.y < self.height
    }

    /// Return `true` when `c` is blocked.
    pub fn is_obstacle(&self, c: Coordinate) -> bool {
        self.obstacles.contains(&c)
    }

    /// Blocked cells in row-major order.
    pub fn obstacles(&self) -> Vec<Coordinate> {
        let mut out: Vec<Coordinate> = self.obstacles.iter().copied().collect();
        out.sort_by_key(|c| (c.y, c.x));
        out
    }
}

fn header_value(line: &str, key: &str) -> VisResult<u32> {
    let mut parts = line.split_whitespace();
    let found = parts.next().unwrap_or_default();
    if found != key {
        return Err(VisError::malformed_map(format!(
            "expected '{key} <n>' header, found '{line}'"
        )));
    }
    parts
        .next()
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or_else(|| VisError::malformed_map(format!("invalid {key} value in '{line}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/map.rs"]
mod tests;
