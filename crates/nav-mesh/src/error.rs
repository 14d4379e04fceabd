use thiserror::Error;

/// Bounds of a rectangle involved in a geometry failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectBounds {
    pub sx: i32,
    pub sy: i32,
    pub width: i32,
    pub height: i32,
}

/// Fatal geometry failures. These indicate a decomposition invariant was
/// violated upstream and edge construction must abort; recoverable outcomes
/// like "no path" are plain `None` returns instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// Two rectangles overlap in area with no flush side between them. A
    /// valid decomposition never produces this.
    #[error("rectangles overlap without a flush side: {0:?} vs {1:?}")]
    RealOverlap(RectBounds, RectBounds),
}
