use tracing::{debug, trace, warn};

use crate::core::{
    ChartModel, GRID_LINE_POSITIONS, GridLinePhase, HorizontalLayout, IndexRange, ScreenPoint,
    VerticalScaleAnimator, Viewport, map_points, max_point_count, overall_max_value,
    visible_max_value,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ElementId, LinePrimitive, PathPrimitive, RenderFrame, Scene, TextHAlign, TextPrimitive,
};

use super::{ChartSurfaceConfig, ColorPalette, ColorScheme, DayScheme, SurfaceMode};

const GRID_LABEL_LIFT_PX: f64 = 18.0;

/// One chart canvas: series outlines, grid and the animated vertical scale.
///
/// Every input change triggers a layout pass that recomputes the target
/// maximum, feeds the animator and rewrites the scene slots in place. `tick`
/// advances the vertical-scale and opacity animations by one frame.
#[derive(Debug, Clone)]
pub struct ChartSurface {
    config: ChartSurfaceConfig,
    palette: ColorPalette,
    viewport: Viewport,
    models: Vec<ChartModel>,
    range: IndexRange,
    animator: VerticalScaleAnimator,
    layout: Option<HorizontalLayout>,
    scene: Scene,
}

impl ChartSurface {
    pub fn new(config: ChartSurfaceConfig, viewport: Viewport) -> ChartResult<Self> {
        config.validate()?;
        let palette = DayScheme.palette();
        Ok(Self {
            config,
            palette,
            viewport,
            models: Vec::new(),
            range: IndexRange::default(),
            animator: VerticalScaleAnimator::new(config.animation_steps),
            layout: None,
            scene: Scene::new(viewport, palette.background),
        })
    }

    #[must_use]
    pub fn config(&self) -> ChartSurfaceConfig {
        self.config
    }

    /// Replaces the surface tuning and re-lays out.
    pub fn set_config(&mut self, config: ChartSurfaceConfig) -> ChartResult<()> {
        config.validate()?;
        debug!(?config, "chart surface config changed");
        if config.animation_steps != self.config.animation_steps {
            self.animator.set_total_steps(config.animation_steps);
        }
        self.config = config;
        self.layout_pass();
        Ok(())
    }

    #[must_use]
    pub fn palette(&self) -> ColorPalette {
        self.palette
    }

    /// Swaps the color scheme; every slot is re-styled on the following pass.
    pub fn set_color_scheme(&mut self, scheme: &dyn ColorScheme) -> ChartResult<()> {
        let palette = scheme.palette();
        palette.validate()?;
        self.palette = palette;
        self.layout_pass();
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        trace!(width = viewport.width, height = viewport.height, "chart surface resize");
        self.viewport = viewport;
        self.layout_pass();
    }

    #[must_use]
    pub fn chart_models(&self) -> &[ChartModel] {
        &self.models
    }

    /// Replaces every series.
    pub fn set_chart_models(&mut self, models: Vec<ChartModel>) -> ChartResult<()> {
        for model in &models {
            model.validate()?;
        }
        debug!(
            series = models.len(),
            points = max_point_count(&models),
            mode = ?self.config.mode,
            "set chart models"
        );
        self.models = models;
        self.layout_pass();
        Ok(())
    }

    /// Flags one series hidden or visible; its opacity animates on `tick`.
    pub fn set_series_hidden(&mut self, index: usize, hidden: bool) -> ChartResult<()> {
        let count = self.models.len();
        let model = self.models.get_mut(index).ok_or_else(|| {
            ChartError::InvalidData(format!("series index {index} out of range ({count} series)"))
        })?;
        if model.is_hidden == hidden {
            return Ok(());
        }
        debug!(index, name = %model.name, hidden, "series visibility changed");
        model.is_hidden = hidden;
        self.layout_pass();
        Ok(())
    }

    #[must_use]
    pub fn range(&self) -> IndexRange {
        self.range
    }

    /// Sets the visible index window. Ranges with `start >= end` are ignored.
    pub fn set_range(&mut self, range: IndexRange) {
        if !range.is_valid() {
            warn!(start = range.start, end = range.end, "ignoring empty visible range");
            return;
        }
        if range == self.range {
            return;
        }
        self.range = range;
        self.layout_pass();
    }

    #[must_use]
    pub fn animator(&self) -> &VerticalScaleAnimator {
        &self.animator
    }

    #[must_use]
    pub fn current_max(&self) -> f64 {
        self.animator.current_max()
    }

    #[must_use]
    pub fn target_max(&self) -> f64 {
        self.animator.target_max()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating() || self.models.iter().any(|m| m.opacity != m.target_opacity())
    }

    /// Horizontal placement used by the last layout pass.
    #[must_use]
    pub fn horizontal_layout(&self) -> Option<HorizontalLayout> {
        self.layout
    }

    /// Height of the plot area between the top and bottom margins.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        (self.viewport.height - self.config.top_space - self.config.bottom_space).max(0.0)
    }

    /// Screen points of one series under the current scale, in scene coordinates.
    #[must_use]
    pub fn mapped_points(&self, index: usize) -> Vec<ScreenPoint> {
        let (Some(model), Some(layout)) = (self.models.get(index), self.layout) else {
            return Vec::new();
        };
        let scale = self.animator.current_scale(self.config.headroom);
        let top = self.config.top_space;
        map_points(&model.data, layout, scale, self.plot_height())
            .into_iter()
            .map(|point| ScreenPoint::new(point.x, point.y + top))
            .collect()
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Frame drawing this surface alone.
    #[must_use]
    pub fn frame(&self) -> RenderFrame<'_> {
        RenderFrame::single(&self.scene)
    }

    /// Advances running animations by one frame. Returns `true` when a redraw is due.
    pub fn tick(&mut self) -> bool {
        let scale_was_animating = self.animator.is_animating();
        self.animator.tick();

        let opacity_step = 1.0 / self.config.animation_steps as f64;
        let mut opacity_changed = false;
        for model in &mut self.models {
            let target = model.target_opacity();
            if model.opacity == target {
                continue;
            }
            let next = if model.opacity < target {
                (model.opacity + opacity_step).min(target)
            } else {
                (model.opacity - opacity_step).max(target)
            };
            // Accumulated steps may stop a rounding error short of the target.
            model.opacity = if (next - target).abs() < 1e-9 { target } else { next };
            opacity_changed = true;
        }

        if scale_was_animating || opacity_changed {
            self.rebuild_scene();
            return true;
        }
        false
    }

    fn layout_pass(&mut self) {
        self.layout = self.resolve_layout();
        if let Some(layout) = self.layout {
            let target = match self.config.mode {
                SurfaceMode::Main => visible_max_value(&self.models, layout, self.viewport.width),
                SurfaceMode::Overview => overall_max_value(&self.models),
            };
            self.animator.set_target(target as f64);
        }
        self.rebuild_scene();
    }

    fn resolve_layout(&self) -> Option<HorizontalLayout> {
        if !self.viewport.is_valid() || self.plot_height() <= 0.0 {
            return None;
        }
        match self.config.mode {
            SurfaceMode::Main => {
                HorizontalLayout::for_visible_range(self.range, self.viewport.width)
            }
            SurfaceMode::Overview => {
                HorizontalLayout::for_overview(max_point_count(&self.models), self.viewport.width)
            }
        }
    }

    fn rebuild_scene(&mut self) {
        self.scene.begin_pass();
        self.scene.set_viewport(self.viewport);
        self.scene.set_background(self.palette.background);

        let Some(layout) = self.layout else {
            self.scene.clear();
            return;
        };

        self.rebuild_grid();
        self.rebuild_series(layout);

        if self.scene.stats().created > 0 {
            self.scene.sort_by_layer();
        }
        trace!(
            elements = self.scene.len(),
            created = self.scene.stats().created,
            updated = self.scene.stats().updated,
            removed = self.scene.stats().removed,
            current_max = self.animator.current_max(),
            "chart surface scene rebuilt"
        );
    }

    fn rebuild_grid(&mut self) {
        if self.config.mode != SurfaceMode::Main {
            self.scene.retain(|id| {
                !matches!(id, ElementId::GridLine { .. } | ElementId::GridLabel { .. })
            });
            return;
        }

        let top = self.config.top_space;
        let width = self.viewport.width;
        let lines = self
            .animator
            .grid_lines(self.config.headroom, self.plot_height());

        let mut live = Vec::with_capacity(lines.len());
        for line in &lines {
            let slot = GRID_LINE_POSITIONS
                .iter()
                .position(|position| *position == line.position)
                .unwrap_or_default();
            let outgoing = line.phase == GridLinePhase::Outgoing;
            let y = top + line.y;

            self.scene.upsert(
                ElementId::GridLine { slot, outgoing },
                LinePrimitive::new(
                    0.0,
                    y,
                    width,
                    y,
                    self.config.grid_line_width,
                    self.palette.grid.faded(line.alpha),
                ),
            );
            self.scene.upsert(
                ElementId::GridLabel { slot, outgoing },
                TextPrimitive::new(
                    line.value.to_string(),
                    0.0,
                    y - GRID_LABEL_LIFT_PX,
                    self.config.grid_label_font_size,
                    self.palette.text.faded(line.alpha),
                    TextHAlign::Left,
                ),
            );
            live.push((slot, outgoing));
        }

        self.scene.retain(|id| match id {
            ElementId::GridLine { slot, outgoing } | ElementId::GridLabel { slot, outgoing } => {
                live.contains(&(slot, outgoing))
            }
            _ => true,
        });
    }

    fn rebuild_series(&mut self, layout: HorizontalLayout) {
        let style = self.config.drawing_style.strategy();
        let scale = self.animator.current_scale(self.config.headroom);
        let plot_height = self.plot_height();
        let top = self.config.top_space;
        let outline_viewport = Viewport::new(self.viewport.width, top + plot_height);

        for (index, model) in self.models.iter().enumerate() {
            let points: Vec<ScreenPoint> = map_points(&model.data, layout, scale, plot_height)
                .into_iter()
                .map(|point| ScreenPoint::new(point.x, point.y + top))
                .collect();
            let id = ElementId::Series(index);
            let Some(outline) = style.create_path(&points, layout.pitch, outline_viewport) else {
                self.scene.remove(id);
                continue;
            };

            let color = model.color.faded(model.opacity);
            let primitive = if style.is_custom_fill_color() {
                PathPrimitive::filled(outline, color)
            } else {
                PathPrimitive::stroked(outline, color, self.config.line_width)
                    .with_line_style(style.line_cap(), style.line_join())
            };
            self.scene.upsert(id, primitive);
        }

        let series_count = self.models.len();
        self.scene
            .retain(|id| !matches!(id, ElementId::Series(index) if index >= series_count));
    }
}
