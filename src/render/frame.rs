use smallvec::SmallVec;

use crate::core::{ScreenPoint, Viewport};
use crate::error::{ChartError, ChartResult};

use super::{Color, Scene};

/// One scene placed at `origin` inside the frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameLayer<'a> {
    pub origin: ScreenPoint,
    pub scene: &'a Scene,
}

/// Backend-agnostic description of one draw pass.
///
/// Layers are drawn in order on top of `background`; each layer's scene uses
/// coordinates local to its origin.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub viewport: Viewport,
    pub background: Color,
    pub layers: SmallVec<[FrameLayer<'a>; 4]>,
}

impl<'a> RenderFrame<'a> {
    #[must_use]
    pub fn new(viewport: Viewport, background: Color) -> Self {
        Self {
            viewport,
            background,
            layers: SmallVec::new(),
        }
    }

    /// Frame made of a single scene covering the whole viewport.
    #[must_use]
    pub fn single(scene: &'a Scene) -> Self {
        Self::new(scene.viewport(), scene.background()).with_layer(ScreenPoint::default(), scene)
    }

    #[must_use]
    pub fn with_layer(mut self, origin: ScreenPoint, scene: &'a Scene) -> Self {
        self.layers.push(FrameLayer { origin, scene });
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;
        for layer in &self.layers {
            if !layer.origin.x.is_finite() || !layer.origin.y.is_finite() {
                return Err(ChartError::InvalidData(
                    "layer origin must be finite".to_owned(),
                ));
            }
            if !layer.scene.is_empty() {
                layer.scene.validate()?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.scene.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }
}
