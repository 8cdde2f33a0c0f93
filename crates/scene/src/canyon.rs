//! Canyon corridor: two walls and a floor strip, emitted as a fully
//! expanded triangle list (no index buffer). Wall height comes from a
//! fixed two-term sine sum, irregular-looking but reproducible.

use crate::mesh::{MeshData, VertexLayout};
use crate::GeometryError;

/// Default corridor parameters; the wrap window in the canyon shader must
/// match `LENGTH`.
pub const SEGMENTS: u32 = 40;
pub const LENGTH: f32 = 60.0;
pub const WIDTH: f32 = 3.0;

/// Wall height at a given z. Bounded in [0.7, 2.3].
#[inline]
pub fn wall_height(z: f32) -> f32 {
    1.5 + (z * 0.3).sin() * 0.5 + (z * 0.7).sin() * 0.3
}

/// Build the corridor mesh: `segments` slices over `length` centered at
/// the origin, walls at x = ±`width`. 6 triangles per segment, so the
/// vertex count is always `18 * segments`.
pub fn build(segments: u32, length: f32, width: f32) -> Result<MeshData, GeometryError> {
    if segments == 0 {
        return Err(GeometryError::NoSegments);
    }
    if !(length > 0.0) {
        return Err(GeometryError::BadLength(length));
    }
    if !(width > 0.0) {
        return Err(GeometryError::BadWidth(width));
    }

    let mut floats = Vec::with_capacity(segments as usize * 18 * 3);
    let mut tri = |a: [f32; 3], b: [f32; 3], c: [f32; 3]| {
        floats.extend_from_slice(&a);
        floats.extend_from_slice(&b);
        floats.extend_from_slice(&c);
    };

    for i in 0..segments {
        let z0 = (i as f32 / segments as f32) * length - length / 2.0;
        let z1 = ((i + 1) as f32 / segments as f32) * length - length / 2.0;
        let h0 = wall_height(z0);
        let h1 = wall_height(z1);
        let w = width;

        // Left wall, faces inward (+x).
        tri([-w, 0.0, z0], [-w, h0, z0], [-w, h1, z1]);
        tri([-w, 0.0, z0], [-w, h1, z1], [-w, 0.0, z1]);

        // Right wall, faces inward (-x); winding mirrored.
        tri([w, 0.0, z0], [w, h1, z1], [w, h0, z0]);
        tri([w, 0.0, z0], [w, 0.0, z1], [w, h1, z1]);

        // Floor strip between the walls.
        tri([-w, 0.0, z0], [-w, 0.0, z1], [w, 0.0, z0]);
        tri([w, 0.0, z0], [-w, 0.0, z1], [w, 0.0, z1]);
    }

    Ok(MeshData::new(floats, VertexLayout::Pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_is_eighteen_per_segment() {
        for n in [1u32, 2, 7, 40, 127] {
            let mesh = build(n, LENGTH, WIDTH).expect("valid parameters");
            assert_eq!(mesh.vertex_count(), 18 * n as usize);
            assert_eq!(mesh.triangle_count(), 6 * n as usize);
            assert!(mesh.is_valid());
        }
    }

    #[test]
    fn wall_height_is_bounded() {
        for i in 0..10_000 {
            let z = -300.0 + i as f32 * 0.06;
            let h = wall_height(z);
            assert!((0.7..=2.3).contains(&h), "h({z}) = {h} out of bounds");
        }
    }

    #[test]
    fn wall_height_is_deterministic() {
        assert_eq!(wall_height(12.5), wall_height(12.5));
    }

    #[test]
    fn geometry_spans_the_corridor_window() {
        let mesh = build(SEGMENTS, LENGTH, WIDTH).unwrap();
        let zs: Vec<f32> = mesh.floats().chunks_exact(3).map(|v| v[2]).collect();
        let min = zs.iter().copied().fold(f32::INFINITY, f32::min);
        let max = zs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!((min + LENGTH / 2.0).abs() < 1e-4);
        assert!((max - LENGTH / 2.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(matches!(
            build(0, LENGTH, WIDTH),
            Err(GeometryError::NoSegments)
        ));
        assert!(matches!(
            build(10, 0.0, WIDTH),
            Err(GeometryError::BadLength(_))
        ));
        assert!(matches!(
            build(10, LENGTH, -1.0),
            Err(GeometryError::BadWidth(_))
        ));
    }
}
