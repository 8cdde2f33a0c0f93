//! Procedural geometry for the canyon corridor and the ship.
//! Pure builders; each mesh is generated once at startup.

pub mod canyon;
pub mod mesh;
pub mod ship;

pub use mesh::{MeshData, VertexLayout};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("segment count must be at least 1")]
    NoSegments,
    #[error("canyon length must be positive, got {0}")]
    BadLength(f32),
    #[error("canyon width must be positive, got {0}")]
    BadWidth(f32),
}
