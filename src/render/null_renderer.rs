use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, ScenePrimitive};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests catch invalid geometry without a
/// real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_path_count: usize,
    pub last_rect_count: usize,
    pub last_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()> {
        frame.validate()?;
        self.last_path_count = 0;
        self.last_rect_count = 0;
        self.last_line_count = 0;
        self.last_text_count = 0;
        for layer in &frame.layers {
            for (_, primitive) in layer.scene.iter() {
                match primitive {
                    ScenePrimitive::Path(_) => self.last_path_count += 1,
                    ScenePrimitive::Rect(_) => self.last_rect_count += 1,
                    ScenePrimitive::Line(_) => self.last_line_count += 1,
                    ScenePrimitive::Text(_) => self.last_text_count += 1,
                }
            }
        }
        self.frames_rendered += 1;
        Ok(())
    }
}
