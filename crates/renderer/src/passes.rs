//! Explicit ordered draw passes. Pass order and the depth-test toggle are
//! data, not implicit statement order: the canyon draws first with depth
//! testing, the ship draws second on top of everything.

use wgpu::{
    CompareFunction, DepthBiasState, DepthStencilState, StencilState, TextureFormat,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DepthMode {
    /// Normal depth test + write.
    Test,
    /// Always passes, never writes: draws over whatever came before.
    AlwaysOnTop,
}

impl DepthMode {
    /// Depth state for a pipeline participating in the shared depth pass.
    pub fn depth_stencil(self, format: TextureFormat) -> DepthStencilState {
        let (compare, write) = match self {
            DepthMode::Test => (CompareFunction::LessEqual, true),
            DepthMode::AlwaysOnTop => (CompareFunction::Always, false),
        };
        DepthStencilState {
            format,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: StencilState::default(),
            bias: DepthBiasState::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassDesc {
    pub label: &'static str,
    pub depth: DepthMode,
}

/// The fixed scene pass list, in draw order.
pub const fn scene_passes() -> [PassDesc; 2] {
    [
        PassDesc {
            label: "canyon",
            depth: DepthMode::Test,
        },
        PassDesc {
            label: "ship",
            depth: DepthMode::AlwaysOnTop,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canyon_draws_first_then_ship_on_top() {
        let passes = scene_passes();
        assert_eq!(passes[0].label, "canyon");
        assert_eq!(passes[0].depth, DepthMode::Test);
        assert_eq!(passes[1].label, "ship");
        assert_eq!(passes[1].depth, DepthMode::AlwaysOnTop);
    }

    #[test]
    fn on_top_mode_never_writes_depth() {
        let ds = DepthMode::AlwaysOnTop.depth_stencil(TextureFormat::Depth32Float);
        assert!(!ds.depth_write_enabled);
        assert_eq!(ds.depth_compare, CompareFunction::Always);

        let ds = DepthMode::Test.depth_stencil(TextureFormat::Depth32Float);
        assert!(ds.depth_write_enabled);
        assert_eq!(ds.depth_compare, CompareFunction::LessEqual);
    }
}
