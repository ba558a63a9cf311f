mod frame;
mod null_renderer;
mod primitives;
mod scene;

pub use frame::{FrameLayer, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PathPrimitive, RectCorners, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use scene::{ElementId, HandleSide, Scene, ScenePrimitive, SceneStats, SlotUpdate};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized frame so drawing code stays isolated
/// from chart math and gesture handling.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
