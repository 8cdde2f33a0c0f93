//! Mutable per-frame simulation state, bundled into one owned context.

use glam::{Vec2, Vec3};

use crate::flight::FlightConfig;
use crate::variant::SceneVariant;

/// Normalized pointer position, raw and smoothed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    /// Latest published position, each axis in [-1, 1].
    pub raw: Vec2,
    /// Exponentially smoothed position, lags behind `raw`.
    pub eased: Vec2,
}

impl PointerState {
    /// Publish a new raw pointer position. Clamped so later math can rely
    /// on the [-1, 1] contract even if the host reports an edge overshoot.
    pub fn set_raw(&mut self, p: Vec2) {
        self.raw = p.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    }

    /// One smoothing step toward the raw value.
    pub fn ease(&mut self, factor: f32) {
        self.eased += (self.raw - self.eased) * factor;
    }
}

/// Simulation clock: fixed increment per tick, never wall-clock delta.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockState {
    pub time: f32,
}

impl ClockState {
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.time += dt;
    }
}

/// Ship flight state. Velocity is 2D; z stays where the spawn put it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShipState {
    pub position: Vec3,
    pub velocity: Vec2,
    /// Pitch, yaw, roll in radians.
    pub rotation: Vec3,
    /// Undamped instantaneous rotation target.
    pub target_rotation: Vec3,
}

/// The single owned simulation context. All per-frame mutation flows
/// through this record; there is no global state.
#[derive(Clone, Debug)]
pub struct SimContext {
    pub variant: SceneVariant,
    pub flight: FlightConfig,
    pub ship: ShipState,
    pub pointer: PointerState,
    pub clock: ClockState,
}

impl SimContext {
    pub fn new(variant: SceneVariant) -> Self {
        Self {
            variant,
            flight: FlightConfig::default(),
            ship: ShipState::default(),
            pointer: PointerState::default(),
            clock: ClockState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn raw_pointer_is_clamped_to_unit_range() {
        let mut p = PointerState::default();
        p.set_raw(vec2(2.0, -7.5));
        assert_eq!(p.raw, vec2(1.0, -1.0));
    }

    #[test]
    fn eased_pointer_lags_behind_raw() {
        let mut p = PointerState::default();
        p.set_raw(vec2(1.0, 0.0));
        p.ease(0.05);
        assert!((p.eased.x - 0.05).abs() < 1e-6);
        p.ease(0.05);
        assert!(p.eased.x > 0.05 && p.eased.x < 1.0);
    }
}
