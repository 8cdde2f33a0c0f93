//! Core simulation types: flight model, pointer/clock state, shading math.
//! Renderer-agnostic; everything here is testable without a GPU.

pub use glam::{Vec2, Vec3, vec2};

pub mod flight;
pub mod scheduler;
pub mod shading;
pub mod state;
pub mod variant;
