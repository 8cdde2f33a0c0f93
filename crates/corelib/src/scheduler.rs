//! Frame scheduler: a two-state machine (Running/Paused) that advances
//! the simulation context by one fixed tick at a time. The platform layer
//! maps host frame callbacks onto [`Scheduler::tick`]; the state machine
//! itself lives here so its contracts are unit-testable.

use crate::flight;
use crate::state::SimContext;

/// Fixed per-tick time increment. Decoupled from the wall clock on
/// purpose: motion is deterministic and reproducible at the cost of speed
/// drift on non-60Hz displays.
pub const DT: f32 = 0.016;

/// Exponential smoothing factor for the eased pointer, per tick.
pub const POINTER_EASE: f32 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Starts Running. `pause` and `resume` are idempotent; calling either
/// while already in the requested state is a no-op.
#[derive(Debug)]
pub struct Scheduler {
    state: RunState,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: RunState::Running,
        }
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Stop ticking. Returns `true` only on the Running -> Paused edge,
    /// letting the caller stop re-arming its frame callback exactly once.
    pub fn pause(&mut self) -> bool {
        if self.state == RunState::Paused {
            return false;
        }
        self.state = RunState::Paused;
        true
    }

    /// Resume ticking. Returns `true` only on the Paused -> Running edge;
    /// the caller re-arms its frame callback on that edge and never twice.
    pub fn resume(&mut self) -> bool {
        if self.state == RunState::Running {
            return false;
        }
        self.state = RunState::Running;
        true
    }

    /// One frame tick: clock, pointer easing, flight step, in that order.
    /// Leaves the context untouched and returns `false` while Paused.
    pub fn tick(&mut self, ctx: &mut SimContext) -> bool {
        if self.state != RunState::Running {
            return false;
        }

        ctx.clock.advance(DT);
        if ctx.variant.has_parallax() {
            ctx.pointer.ease(POINTER_EASE);
        }
        if ctx.variant.has_flight_dynamics() {
            flight::step(
                &mut ctx.ship,
                ctx.pointer.raw,
                ctx.clock.time,
                &ctx.flight,
            );
        }
        true
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
