//! Ship meshes. Two styles: a flat wedge silhouette for the fixed-ship
//! variants and a volumetric box-assembled hull for the flight variant.
//! Nose points toward -z in both.

use glam::Vec3;

use crate::mesh::{MeshData, VertexLayout};

/// Flat 6-triangle wedge, position-only. Top and bottom skins, two side
/// panels and two swept wings.
pub fn build_wedge() -> MeshData {
    let s = 0.08;
    #[rustfmt::skip]
    let floats = vec![
        // Top surface
        0.0,  s * 0.3, -s * 2.5,   -s, 0.0, s,    s, 0.0, s,
        // Bottom surface
        0.0, -s * 0.2, -s * 2.5,    s, 0.0, s,   -s, 0.0, s,
        // Left side
        0.0,  s * 0.3, -s * 2.5,   0.0, -s * 0.2, -s * 2.5,   -s, 0.0, s,
        // Right side
        0.0,  s * 0.3, -s * 2.5,    s, 0.0, s,   0.0, -s * 0.2, -s * 2.5,
        // Left wing
        -s, 0.0, s,   -s * 2.5, 0.0, s * 0.5,   -s * 0.5, 0.0, s,
        // Right wing
        s, 0.0, s,    s * 0.5, 0.0, s,    s * 2.5, 0.0, s * 0.5,
    ];
    MeshData::new(floats, VertexLayout::Pos)
}

/// Volumetric hull assembled from axis-aligned boxes: fuselage, cockpit,
/// wings, engine pods, tail fin. Interleaved position+normal; every face
/// carries a constant outward normal with exactly one ±1 axis component,
/// which the flight shader's lighting depends on.
pub fn build_hull() -> MeshData {
    let mut floats = Vec::new();

    // Fuselage
    push_box(&mut floats, Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.06, 0.035, 0.20));
    // Cockpit canopy
    push_box(&mut floats, Vec3::new(0.0, 0.05, -0.05), Vec3::new(0.035, 0.025, 0.07));
    // Wings
    push_box(&mut floats, Vec3::new(-0.12, 0.0, 0.05), Vec3::new(0.08, 0.008, 0.07));
    push_box(&mut floats, Vec3::new(0.12, 0.0, 0.05), Vec3::new(0.08, 0.008, 0.07));
    // Engine pods, set back under the wings
    push_box(&mut floats, Vec3::new(-0.09, -0.01, 0.16), Vec3::new(0.025, 0.025, 0.06));
    push_box(&mut floats, Vec3::new(0.09, -0.01, 0.16), Vec3::new(0.025, 0.025, 0.06));
    // Tail fin
    push_box(&mut floats, Vec3::new(0.0, 0.06, 0.14), Vec3::new(0.008, 0.05, 0.05));

    MeshData::new(floats, VertexLayout::PosNormal)
}

/// Emit one axis-aligned box as 6 faces x 2 triangles x 3 vertices.
/// For each face the tangent pair (u, v) is chosen so u x v equals the
/// outward normal, giving CCW winding seen from outside.
fn push_box(floats: &mut Vec<f32>, center: Vec3, half: Vec3) {
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];

    for (n, u, v) in FACES {
        let origin = center + n * half.dot(n.abs());
        let du = u * half.dot(u.abs());
        let dv = v * half.dot(v.abs());

        let p00 = origin - du - dv;
        let p10 = origin + du - dv;
        let p11 = origin + du + dv;
        let p01 = origin - du + dv;

        for p in [p00, p10, p11, p00, p11, p01] {
            floats.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedge_is_six_triangles_of_positions() {
        let mesh = build_wedge();
        assert_eq!(mesh.layout(), VertexLayout::Pos);
        assert_eq!(mesh.vertex_count(), 18);
        assert_eq!(mesh.triangle_count(), 6);
        assert!(mesh.is_valid());
    }

    #[test]
    fn hull_is_whole_boxes_with_normals() {
        let mesh = build_hull();
        assert_eq!(mesh.layout(), VertexLayout::PosNormal);
        // 7 boxes x 36 vertices each.
        assert_eq!(mesh.vertex_count(), 7 * 36);
        assert!(mesh.is_valid());
    }

    #[test]
    fn hull_normals_are_axis_aligned_units() {
        let mesh = build_hull();
        for vert in mesh.floats().chunks_exact(6) {
            let n = [vert[3], vert[4], vert[5]];
            let ones = n.iter().filter(|c| c.abs() == 1.0).count();
            let zeros = n.iter().filter(|c| **c == 0.0).count();
            assert_eq!(ones, 1, "normal {n:?} must have exactly one ±1 axis");
            assert_eq!(zeros, 2, "normal {n:?} must be zero off-axis");
        }
    }

    #[test]
    fn hull_winding_faces_outward() {
        let mesh = build_hull();
        // For each triangle the geometric normal must agree with the
        // stored face normal.
        for tri in mesh.floats().chunks_exact(18) {
            let a = Vec3::new(tri[0], tri[1], tri[2]);
            let b = Vec3::new(tri[6], tri[7], tri[8]);
            let c = Vec3::new(tri[12], tri[13], tri[14]);
            let n = Vec3::new(tri[3], tri[4], tri[5]);
            let geometric = (b - a).cross(c - a);
            assert!(geometric.dot(n) > 0.0, "triangle wound against normal {n:?}");
        }
    }
}
