//! Ship flight model: a 2-axis spring-damper with inertia, plus
//! velocity-derived banking and sinusoidal idle turbulence.

use glam::{Vec2, Vec3};

use crate::state::ShipState;

/// Tuning constants for the flight model. The drag coefficient is tuned,
/// not derived; any value in (0, 1) keeps velocity a per-tick contraction.
#[derive(Clone, Copy, Debug)]
pub struct FlightConfig {
    /// Pointer-to-world mapping per axis.
    pub sensitivity: Vec2,
    /// Bias on the target position (lifts the resting point off the floor).
    pub offset: Vec2,
    /// Spring gain applied to the displacement each tick.
    pub accel: f32,
    /// Velocity retained per tick, < 1.
    pub drag: f32,
    /// First-order easing factor from rotation toward its target.
    pub rot_ease: f32,
    /// Pitch per unit of vertical velocity.
    pub pitch_gain: f32,
    /// Roll (bank) per unit of horizontal velocity.
    pub roll_gain: f32,
    /// Yaw per unit of horizontal velocity; a fraction of the roll gain.
    pub yaw_gain: f32,
    /// Idle turbulence amplitude scale; 0 disables it.
    pub turbulence: f32,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            sensitivity: Vec2::new(1.2, 0.8),
            offset: Vec2::new(0.0, 0.3),
            accel: 0.015,
            drag: 0.92,
            rot_ease: 0.1,
            pitch_gain: 2.5,
            roll_gain: 3.0,
            yaw_gain: 0.9,
            turbulence: 1.0,
        }
    }
}

/// Advance the ship by one fixed tick toward the pointer target.
///
/// Deterministic given identical pointer history and clock. Orientation is
/// a direct linear function of current velocity (not integrated), eased by
/// a first-order low-pass so the ship banks into motion without overshoot.
pub fn step(ship: &mut ShipState, pointer: Vec2, time: f32, cfg: &FlightConfig) {
    let target = pointer * cfg.sensitivity + cfg.offset;
    let delta = target - Vec2::new(ship.position.x, ship.position.y);

    ship.velocity += delta * cfg.accel;
    ship.velocity *= cfg.drag;
    ship.position.x += ship.velocity.x;
    ship.position.y += ship.velocity.y;

    let banked = Vec3::new(
        -ship.velocity.y * cfg.pitch_gain,
        -ship.velocity.x * cfg.yaw_gain,
        -ship.velocity.x * cfg.roll_gain,
    );
    ship.target_rotation = banked + idle_turbulence(time) * cfg.turbulence;
    ship.rotation += (ship.target_rotation - ship.rotation) * cfg.rot_ease;
}

/// Low-amplitude multi-frequency wobble so the ship never perfectly
/// settles. A pure function of the clock; pointer state plays no part.
fn idle_turbulence(time: f32) -> Vec3 {
    Vec3::new(
        (time * 1.7).sin() * 0.020 + (time * 3.1).sin() * 0.008,
        (time * 1.3).sin() * 0.010,
        (time * 2.3).sin() * 0.025 + (time * 4.1).sin() * 0.006,
    )
}
