//! CPU-side mesh form: a flat float stream in triangle-list order,
//! matching what the GPU upload consumes directly.

/// Per-vertex attribute layout of the float stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexLayout {
    /// 3 floats per vertex: position.
    Pos,
    /// 6 floats per vertex: position + normal, interleaved.
    PosNormal,
}

impl VertexLayout {
    #[inline]
    pub const fn floats_per_vertex(self) -> usize {
        match self {
            VertexLayout::Pos => 3,
            VertexLayout::PosNormal => 6,
        }
    }
}

/// Immutable triangle-list mesh. Insertion order defines triangle
/// membership and winding; every 3 consecutive vertices form one triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshData {
    floats: Vec<f32>,
    layout: VertexLayout,
}

impl MeshData {
    pub fn new(floats: Vec<f32>, layout: VertexLayout) -> Self {
        debug_assert!(floats.len() % (layout.floats_per_vertex() * 3) == 0);
        Self { floats, layout }
    }

    #[inline]
    pub fn floats(&self) -> &[f32] {
        &self.floats
    }

    #[inline]
    pub fn layout(&self) -> VertexLayout {
        self.layout
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.floats.len() / self.layout.floats_per_vertex()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    /// `true` when the stream is non-empty, a whole number of vertices,
    /// and a whole number of triangles.
    pub fn is_valid(&self) -> bool {
        let stride = self.layout.floats_per_vertex();
        !self.floats.is_empty()
            && self.floats.len() % stride == 0
            && self.vertex_count() % 3 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_requires_whole_triangles() {
        let tri = MeshData::new(vec![0.0; 9], VertexLayout::Pos);
        assert!(tri.is_valid());
        assert_eq!(tri.vertex_count(), 3);
        assert_eq!(tri.triangle_count(), 1);

        let ragged = MeshData {
            floats: vec![0.0; 10],
            layout: VertexLayout::Pos,
        };
        assert!(!ragged.is_valid());

        let lone_vertex = MeshData {
            floats: vec![0.0; 6],
            layout: VertexLayout::PosNormal,
        };
        assert!(!lone_vertex.is_valid());
    }

    #[test]
    fn stride_follows_layout() {
        assert_eq!(VertexLayout::Pos.floats_per_vertex(), 3);
        assert_eq!(VertexLayout::PosNormal.floats_per_vertex(), 6);
    }
}
