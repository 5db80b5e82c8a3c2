/// Convenience result type used across `mapf-vis`.
pub type VisResult<T> = Result<T, VisError>;

/// Error type for loading, rendering and exporting.
///
/// The playback engine itself never fails: every error here is raised at a load, render or export
/// boundary, before any engine state is touched.
#[derive(thiserror::Error, Debug)]
pub enum VisError {
    /// Map text does not match its declared header.
    #[error("malformed map: {0}")]
    MalformedMap(String),

    /// Solution text could not be parsed into consistent configurations.
    #[error("malformed solution: {0}")]
    MalformedSolution(String),

    /// A solution pose lies outside the loaded map.
    #[error("solution out of bounds: {0}")]
    OutOfBoundsSolution(String),

    /// Invalid options or call sequence.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Export failure or export requested without a loaded solution.
    #[error("export error: {0}")]
    Export(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VisError {
    /// Build a [`VisError::MalformedMap`].
    pub fn malformed_map(msg: impl Into<String>) -> Self {
        Self::MalformedMap(msg.into())
    }

    /// Build a [`VisError::MalformedSolution`].
    pub fn malformed_solution(msg: impl Into<String>) -> Self {
        Self::MalformedSolution(msg.into())
    }

    /// Build a [`VisError::OutOfBoundsSolution`].
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBoundsSolution(msg.into())
    }

    /// Build a [`VisError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VisError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`VisError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Return `true` for the three load-time failures surfaced next to a file control.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedMap(_) | Self::MalformedSolution(_) | Self::OutOfBoundsSolution(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
