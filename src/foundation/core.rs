use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

pub use kurbo::{Line, Point, Vec2};

/// Integer grid cell. `x` grows to the right, `y` grows downwards (row index).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Coordinate {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl Coordinate {
    /// Create a coordinate from column/row indices.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Cell position in grid units, as consumed by interpolation and renderers.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Facing direction of an agent at one timestep.
///
/// `None` on the first pose of a solution marks the whole solution as orientation-unaware.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Orientation {
    /// No facing direction.
    #[default]
    None,
    /// Facing towards decreasing `x`.
    XMinus,
    /// Facing towards increasing `x`.
    XPlus,
    /// Facing towards decreasing `y`.
    YMinus,
    /// Facing towards increasing `y`.
    YPlus,
}

impl Orientation {
    /// Fixed rotation angle in radians.
    pub fn angle(self) -> f64 {
        match self {
            Self::None | Self::XPlus => 0.0,
            Self::XMinus => PI,
            Self::YMinus => -FRAC_PI_2,
            Self::YPlus => FRAC_PI_2,
        }
    }

    /// Parse the solution-file token (`X_MINUS`, `X_PLUS`, `Y_MINUS`, `Y_PLUS`).
    ///
    /// Unknown tokens map to [`Orientation::None`].
    pub fn from_token(s: &str) -> Self {
        match s {
            "X_MINUS" => Self::XMinus,
            "X_PLUS" => Self::XPlus,
            "Y_MINUS" => Self::YMinus,
            "Y_PLUS" => Self::YPlus,
            _ => Self::None,
        }
    }
}

/// One agent's state at one discrete timestep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    /// Occupied cell.
    pub position: Coordinate,
    /// Facing direction.
    pub orientation: Orientation,
}

impl Pose {
    /// Create a pose.
    pub const fn new(position: Coordinate, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Create an orientation-unaware pose at `(x, y)`.
    pub const fn at(x: u32, y: u32) -> Self {
        Self::new(Coordinate::new(x, y), Orientation::None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
