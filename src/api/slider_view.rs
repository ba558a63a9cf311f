use crate::core::{IndexRange, Viewport};
use crate::error::ChartResult;
use crate::interaction::{RangeSlider, SliderConfig, SliderGesture, SliderObserver};
use crate::render::{
    Color, ElementId, HandleSide, LinePrimitive, RectCorners, RectPrimitive, RenderFrame, Scene,
};

use super::{ColorPalette, ColorScheme, DayScheme};

const THUMB_CORNER_RADIUS: f64 = 1.0;
const BORDER_LINE_WIDTH: f64 = 1.0;
const ARROW_LENGTH: f64 = 6.0;
const ARROW_LINE_WIDTH: f64 = 1.5;
const ARROW_ANGLE_DEGREES: f64 = 60.0;
const ARROW_TIP_INSET: f64 = 1.25;

/// Draws the range slider over the overview chart.
///
/// Owns the `RangeSlider` state machine and mirrors its selection into scene
/// slots after every layout or gesture.
#[derive(Debug)]
pub struct SliderView {
    slider: RangeSlider,
    viewport: Viewport,
    palette: ColorPalette,
    scene: Scene,
}

impl SliderView {
    pub fn new(config: SliderConfig) -> ChartResult<Self> {
        let palette = DayScheme.palette();
        Ok(Self {
            slider: RangeSlider::new(config)?,
            viewport: Viewport::default(),
            palette,
            scene: Scene::new(Viewport::default(), Color::TRANSPARENT),
        })
    }

    #[must_use]
    pub fn slider(&self) -> &RangeSlider {
        &self.slider
    }

    pub fn add_observer(&mut self, observer: impl SliderObserver + 'static) {
        self.slider.add_observer(observer);
    }

    pub fn set_config(&mut self, config: SliderConfig) -> ChartResult<()> {
        self.slider.set_config(config)?;
        self.rebuild_scene();
        Ok(())
    }

    pub fn set_color_scheme(&mut self, scheme: &dyn ColorScheme) -> ChartResult<()> {
        let palette = scheme.palette();
        palette.validate()?;
        self.palette = palette;
        self.rebuild_scene();
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Lays the slider out over `viewport` for a data set of `point_count` samples.
    pub fn layout(&mut self, viewport: Viewport, point_count: usize) {
        self.viewport = viewport;
        self.slider.layout(viewport.width, point_count);
        self.rebuild_scene();
    }

    /// Forwards a gesture to the state machine and redraws on a committed change.
    pub fn handle_gesture(&mut self, gesture: SliderGesture) -> Option<IndexRange> {
        let committed = self.slider.handle_gesture(gesture);
        if committed.is_some() {
            self.rebuild_scene();
        }
        committed
    }

    /// Returns the slider to its initial state and drops every slot.
    pub fn reset(&mut self) {
        self.slider.reset();
        self.viewport = Viewport::default();
        self.scene.clear();
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::single(&self.scene)
    }

    fn rebuild_scene(&mut self) {
        self.scene.begin_pass();
        self.scene.set_viewport(self.viewport);
        if !self.viewport.is_valid() || self.slider.width() <= 0.0 {
            self.scene.clear();
            return;
        }

        let config = self.slider.config();
        let height = self.viewport.height;
        let track_end = self.viewport.width - config.trailing_space;
        let left = config.leading_space + self.slider.offset();
        let right = left + self.slider.width();
        let handle = config.handle_width;
        let palette = self.palette;

        // Dimming outside the selection.
        self.scene.upsert(
            ElementId::DimmingBackground(HandleSide::Left),
            RectPrimitive::new(
                config.leading_space,
                1.0,
                self.slider.offset().max(0.0),
                height - 2.0,
                palette.slider_background,
            ),
        );
        self.scene.upsert(
            ElementId::DimmingBackground(HandleSide::Right),
            RectPrimitive::new(
                right.min(track_end),
                1.0,
                (track_end - right).max(0.0),
                height - 2.0,
                palette.slider_background,
            ),
        );

        // Thumbs, rounded on their outer corners.
        self.scene.upsert(
            ElementId::Handle(HandleSide::Left),
            RectPrimitive::new(left, -1.0, handle, height + 2.0, palette.slider_thumb)
                .with_rounded_corners(THUMB_CORNER_RADIUS, RectCorners::LEFT),
        );
        self.scene.upsert(
            ElementId::Handle(HandleSide::Right),
            RectPrimitive::new(right - handle, -1.0, handle, height + 2.0, palette.slider_thumb)
                .with_rounded_corners(THUMB_CORNER_RADIUS, RectCorners::RIGHT),
        );

        let border_start = left + handle;
        let border_end = right - handle;
        self.scene.upsert(
            ElementId::TopBorder,
            LinePrimitive::new(
                border_start,
                0.0,
                border_end,
                0.0,
                BORDER_LINE_WIDTH,
                palette.slider_thumb,
            ),
        );
        self.scene.upsert(
            ElementId::BottomBorder,
            LinePrimitive::new(
                border_start,
                height,
                border_end,
                height,
                BORDER_LINE_WIDTH,
                palette.slider_thumb,
            ),
        );

        let middle = height / 2.0;
        self.upsert_arrow(HandleSide::Left, left + handle / 2.0, middle);
        self.upsert_arrow(HandleSide::Right, right - handle / 2.0, middle);

        if self.scene.stats().created > 0 {
            self.scene.sort_by_layer();
        }
    }

    /// Chevron pointing outward from the thumb center: `<` on the left, `>` on the right.
    fn upsert_arrow(&mut self, side: HandleSide, center_x: f64, center_y: f64) {
        let (tip_x, direction) = match side {
            HandleSide::Left => (center_x - ARROW_TIP_INSET, 1.0),
            HandleSide::Right => (center_x + ARROW_TIP_INSET, -1.0),
        };
        let angle = ARROW_ANGLE_DEGREES.to_radians();
        let dx = direction * ARROW_LENGTH * angle.cos();
        let dy = ARROW_LENGTH * angle.sin();
        let color = self.palette.slider_arrow;

        for (upper, end_y) in [(true, center_y - dy), (false, center_y + dy)] {
            self.scene.upsert(
                ElementId::HandleArrow { side, upper },
                LinePrimitive::new(
                    tip_x,
                    center_y,
                    tip_x + dx,
                    end_y,
                    ARROW_LINE_WIDTH,
                    color,
                ),
            );
        }
    }
}
