use thiserror::Error;

pub type CanvasResult<T> = Result<T, CanvasError>;

/// Reasons a drawing command is rejected.
///
/// A rejected command leaves the canvas unchanged.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum CanvasError {
    #[error("edge commands need a path started with move_to")]
    NoActivePath,
    #[error("curve quality must be between 2 and 65536, got {0}")]
    InvalidCurveQuality(u32),
    #[error("ellipse quality must be between 1 and 65536, got {0}")]
    InvalidEllipseQuality(u32),
    #[error("stroke width must be finite and non-negative, got {0}")]
    InvalidStrokeWidth(f32),
    #[error("penumbra must be finite and non-negative, got {0}")]
    InvalidPenumbra(f32),
    #[error("the canvas allocator is out of memory")]
    OutOfMemory,
}

/// The allocator could not provide the requested memory.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("allocation failed")]
pub struct AllocError;

impl From<AllocError> for CanvasError {
    fn from(_: AllocError) -> Self {
        CanvasError::OutOfMemory
    }
}
