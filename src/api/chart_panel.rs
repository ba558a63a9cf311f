use tracing::debug;

use crate::core::{ChartModel, IndexRange, ScreenPoint, Viewport, max_point_count};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{SliderGesture, SliderObserver};
use crate::render::{RenderFrame, Renderer};

use super::{ChartPanelConfig, ChartSurface, ColorScheme, SliderView};

/// Pixel regions of the panel parts, in panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRegions {
    pub main_origin: ScreenPoint,
    pub main: Viewport,
    pub overview_origin: ScreenPoint,
    pub overview: Viewport,
    pub slider_origin: ScreenPoint,
    pub slider: Viewport,
}

impl PanelRegions {
    /// Main chart on top; overview and slider share the strip below it.
    #[must_use]
    pub fn resolve(config: &ChartPanelConfig, viewport: Viewport) -> Self {
        let strip_height = config.overview_height;
        let main_height = (viewport.height - strip_height - config.spacing).max(0.0);
        let strip_top = main_height + config.spacing;
        let track_width =
            (viewport.width - config.slider.leading_space - config.slider.trailing_space).max(0.0);

        Self {
            main_origin: ScreenPoint::default(),
            main: Viewport::new(viewport.width, main_height),
            overview_origin: ScreenPoint::new(config.slider.leading_space, strip_top),
            overview: Viewport::new(track_width, strip_height),
            slider_origin: ScreenPoint::new(0.0, strip_top),
            slider: Viewport::new(viewport.width, strip_height),
        }
    }
}

/// Main chart, overview chart and range slider wired together.
///
/// Slider commits drive the main chart's visible range; visibility toggles and
/// scheme switches reach every part; `tick` drives both chart animations.
#[derive(Debug)]
pub struct ChartPanel<R: Renderer> {
    renderer: R,
    config: ChartPanelConfig,
    viewport: Viewport,
    main: ChartSurface,
    overview: ChartSurface,
    slider: SliderView,
}

impl<R: Renderer> ChartPanel<R> {
    pub fn new(renderer: R, config: ChartPanelConfig, viewport: Viewport) -> ChartResult<Self> {
        config.validate()?;
        let regions = PanelRegions::resolve(&config, viewport);
        let mut panel = Self {
            renderer,
            config,
            viewport,
            main: ChartSurface::new(config.main, regions.main)?,
            overview: ChartSurface::new(config.overview, regions.overview)?,
            slider: SliderView::new(config.slider)?,
        };
        panel.slider.layout(regions.slider, 0);
        Ok(panel)
    }

    #[must_use]
    pub fn config(&self) -> ChartPanelConfig {
        self.config
    }

    /// Applies a new configuration to every part and re-lays out.
    pub fn set_config(&mut self, config: ChartPanelConfig) -> ChartResult<()> {
        config.validate()?;
        debug!("chart panel config changed");
        self.main.set_config(config.main)?;
        self.overview.set_config(config.overview)?;
        self.slider.set_config(config.slider)?;
        self.config = config;
        self.apply_regions();
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn regions(&self) -> PanelRegions {
        PanelRegions::resolve(&self.config, self.viewport)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.apply_regions();
    }

    #[must_use]
    pub fn main(&self) -> &ChartSurface {
        &self.main
    }

    #[must_use]
    pub fn overview(&self) -> &ChartSurface {
        &self.overview
    }

    #[must_use]
    pub fn slider_view(&self) -> &SliderView {
        &self.slider
    }

    #[must_use]
    pub fn visible_range(&self) -> IndexRange {
        self.main.range()
    }

    pub fn add_slider_observer(&mut self, observer: impl SliderObserver + 'static) {
        self.slider.add_observer(observer);
    }

    /// Replaces the series shown by both charts.
    pub fn set_chart_models(&mut self, models: Vec<ChartModel>) -> ChartResult<()> {
        let point_count = max_point_count(&models);
        self.overview.set_chart_models(models.clone())?;
        self.main.set_chart_models(models)?;
        self.slider.layout(self.regions().slider, point_count);
        self.sync_range();
        Ok(())
    }

    pub fn set_series_hidden(&mut self, index: usize, hidden: bool) -> ChartResult<()> {
        self.main.set_series_hidden(index, hidden)?;
        self.overview.set_series_hidden(index, hidden)
    }

    /// Flips one series' visibility. Returns the new hidden flag.
    pub fn toggle_series(&mut self, index: usize) -> ChartResult<bool> {
        let count = self.main.chart_models().len();
        let hidden = self
            .main
            .chart_models()
            .get(index)
            .map(|model| !model.is_hidden)
            .ok_or_else(|| {
                ChartError::InvalidData(format!(
                    "series index {index} out of range ({count} series)"
                ))
            })?;
        self.set_series_hidden(index, hidden)?;
        Ok(hidden)
    }

    /// Re-styles every part with `scheme`.
    pub fn set_color_scheme(&mut self, scheme: &dyn ColorScheme) -> ChartResult<()> {
        self.main.set_color_scheme(scheme)?;
        self.overview.set_color_scheme(scheme)?;
        self.slider.set_color_scheme(scheme)
    }

    /// Feeds one slider gesture; a committed range is pushed to the main chart.
    pub fn handle_gesture(&mut self, gesture: SliderGesture) -> Option<IndexRange> {
        let committed = self.slider.handle_gesture(gesture)?;
        self.main.set_range(committed);
        Some(committed)
    }

    /// Per-frame animation step. Returns `true` when a redraw is due.
    pub fn tick(&mut self) -> bool {
        let main_changed = self.main.tick();
        let overview_changed = self.overview.tick();
        main_changed || overview_changed
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.main.is_animating() || self.overview.is_animating()
    }

    #[must_use]
    pub fn frame(&self) -> RenderFrame<'_> {
        compose_frame(
            self.regions(),
            self.viewport,
            &self.main,
            &self.overview,
            &self.slider,
        )
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = compose_frame(
            self.regions(),
            self.viewport,
            &self.main,
            &self.overview,
            &self.slider,
        );
        self.renderer.render(&frame)
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn apply_regions(&mut self) {
        let regions = self.regions();
        self.main.resize(regions.main);
        self.overview.resize(regions.overview);
        let point_count = max_point_count(self.main.chart_models());
        self.slider.layout(regions.slider, point_count);
        self.sync_range();
    }

    fn sync_range(&mut self) {
        let range = self.slider.slider().range();
        if range.is_valid() {
            self.main.set_range(range);
        }
    }
}

/// Main chart first, then the overview with the slider drawn over it.
fn compose_frame<'a>(
    regions: PanelRegions,
    viewport: Viewport,
    main: &'a ChartSurface,
    overview: &'a ChartSurface,
    slider: &'a SliderView,
) -> RenderFrame<'a> {
    RenderFrame::new(viewport, main.palette().background)
        .with_layer(regions.main_origin, main.scene())
        .with_layer(regions.overview_origin, overview.scene())
        .with_layer(regions.slider_origin, slider.scene())
}
