//! Host-facing surface: chart surfaces, the slider view and the composed panel.

mod chart_panel;
mod chart_surface;
mod color_scheme;
mod slider_view;
mod surface_config;

pub use chart_panel::{ChartPanel, PanelRegions};
pub use chart_surface::ChartSurface;
pub use color_scheme::{ColorPalette, ColorScheme, DayScheme, NightScheme};
pub use slider_view::SliderView;
pub use surface_config::{
    CHART_PANEL_CONFIG_JSON_SCHEMA_V1, ChartPanelConfig, ChartPanelConfigJsonContractV1,
    ChartSurfaceConfig, SurfaceMode,
};
