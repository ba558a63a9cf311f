//! statchart: coordinate-mapping and animation engine for statistics charts.
//!
//! The crate maps integer time series onto a zoomable main chart, animates
//! the vertical scale between windows, and turns drag gestures on an overview
//! slider into the visible index range. Drawing is delegated to a `Renderer`
//! that receives backend-agnostic scenes.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartPanel, ChartPanelConfig, ChartSurface, ChartSurfaceConfig};
pub use error::{ChartError, ChartResult};
