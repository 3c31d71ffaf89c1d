use crate::geometry_builder::Count;
use thiserror::Error;

/// The tessellators' result type.
pub type TessellationResult<T> = Result<T, TessellationError>;

/// An error that can happen while generating geometry.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    #[error("the vertex buffers are full")]
    VertexCapacity,
    #[error("the index buffer is full")]
    IndexCapacity,
    #[error("vertex index does not fit in the index format")]
    TooManyVertices,
}

/// An invalid mesh description.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MeshError {
    #[error("strides must not be zero")]
    ZeroStride,
    #[error("stride {stride} is smaller than the {size} bytes of the attribute")]
    StrideTooSmall { stride: usize, size: usize },
    #[error("the layout refers to vertex buffer {0} which was not provided")]
    MissingBuffer(usize),
}

/// Describes an error happening during tessellation.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TessellationError {
    #[error("geometry builder error: {0}")]
    GeometryBuilder(#[from] GeometryBuilderError),
    #[error("mesh needs {required:?} but the buffers only hold {available:?}")]
    InsufficientCapacity { required: Count, available: Count },
}
