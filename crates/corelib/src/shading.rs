//! CPU mirrors of the per-vertex shading math so its contracts are
//! testable off-GPU. The WGSL shaders in the renderer crate implement the
//! same formulas with the same constants.

/// World units the canyon scrolls toward the viewer per simulation second.
pub const SCROLL_SPEED: f32 = 3.0;
/// Total corridor length; the wrap window for the looping scroll.
pub const CANYON_LENGTH: f32 = 60.0;
/// Perspective strength: screen scale = K / depth.
pub const PROJECTION_K: f32 = 1.5;
/// Minimum depth used for the perspective divide.
pub const DEPTH_EPS: f32 = 0.1;
/// Depth at which fog fully swallows the walls.
pub const FOG_DISTANCE: f32 = 25.0;

/// Scroll a world z by the clock, wrapped into a window of
/// `[-length/2, length/2)` centered at the origin. A finite mesh loops
/// forever through this window.
pub fn wrap_scroll(z: f32, time: f32, scroll_speed: f32, length: f32) -> f32 {
    let half = length * 0.5;
    (z - time * scroll_speed + half).rem_euclid(length) - half
}

/// Perspective divide with an epsilon floor; never divides by anything
/// smaller than `eps`, so there is no singularity as depth approaches 0.
#[inline]
pub fn perspective_scale(depth: f32, k: f32, eps: f32) -> f32 {
    k / depth.max(eps)
}

/// Linear fog factor, clamped to [0, 1].
#[inline]
pub fn fog_factor(depth: f32, fog_distance: f32) -> f32 {
    (depth / fog_distance).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_stays_inside_the_window() {
        let half = CANYON_LENGTH * 0.5;
        for i in 0..2000 {
            let z = -90.0 + i as f32 * 0.09;
            for t in [0.0, 1.0, 17.3, 421.7] {
                let w = wrap_scroll(z, t, SCROLL_SPEED, CANYON_LENGTH);
                assert!(w >= -half && w < half, "wrapped {w} out of window");
            }
        }
    }

    #[test]
    fn wrap_is_periodic_in_the_corridor_length() {
        let a = wrap_scroll(3.0, 5.0, SCROLL_SPEED, CANYON_LENGTH);
        let b = wrap_scroll(3.0 + CANYON_LENGTH, 5.0, SCROLL_SPEED, CANYON_LENGTH);
        assert!((a - b).abs() < 1e-4);
    }

    #[test]
    fn projection_is_depth_monotonic_above_epsilon() {
        let mut prev = perspective_scale(DEPTH_EPS + 1e-3, PROJECTION_K, DEPTH_EPS);
        let mut depth = DEPTH_EPS + 1e-3;
        while depth < 100.0 {
            depth += 0.25;
            let s = perspective_scale(depth, PROJECTION_K, DEPTH_EPS);
            assert!(s < prev, "scale must strictly decrease with depth");
            prev = s;
        }
    }

    #[test]
    fn projection_clamps_instead_of_dividing_near_zero() {
        let at_eps = perspective_scale(DEPTH_EPS, PROJECTION_K, DEPTH_EPS);
        for depth in [0.0, -5.0, DEPTH_EPS * 0.5] {
            let s = perspective_scale(depth, PROJECTION_K, DEPTH_EPS);
            assert_eq!(s, at_eps);
            assert!(s.is_finite());
        }
    }

    #[test]
    fn fog_is_monotone_and_clamped() {
        let mut prev = fog_factor(0.0, FOG_DISTANCE);
        assert_eq!(prev, 0.0);
        for i in 1..400 {
            let depth = i as f32 * 0.25;
            let f = fog_factor(depth, FOG_DISTANCE);
            assert!(f >= prev);
            assert!((0.0..=1.0).contains(&f));
            prev = f;
        }
        assert_eq!(fog_factor(1e6, FOG_DISTANCE), 1.0);
    }
}
