use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_ANIMATION_STEPS, DrawingStyle};
use crate::error::{ChartError, ChartResult};
use crate::interaction::SliderConfig;

/// What a chart surface shows and how it derives its vertical scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceMode {
    /// Zoomed view of the selected range, with grid lines.
    #[default]
    Main,
    /// Whole data set squeezed under the slider.
    Overview,
}

/// Tuning of one chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartSurfaceConfig {
    #[serde(default)]
    pub mode: SurfaceMode,
    pub top_space: f64,
    pub bottom_space: f64,
    /// Multiplier applied to the value span before mapping to pixels.
    pub headroom: f64,
    #[serde(default = "default_animation_steps")]
    pub animation_steps: usize,
    pub line_width: f64,
    #[serde(default)]
    pub drawing_style: DrawingStyle,
    #[serde(default = "default_grid_line_width")]
    pub grid_line_width: f64,
    #[serde(default = "default_grid_label_font_size")]
    pub grid_label_font_size: f64,
}

fn default_animation_steps() -> usize {
    DEFAULT_ANIMATION_STEPS
}

fn default_grid_line_width() -> f64 {
    0.5
}

fn default_grid_label_font_size() -> f64 {
    12.0
}

impl Default for ChartSurfaceConfig {
    fn default() -> Self {
        Self::main()
    }
}

impl ChartSurfaceConfig {
    /// Main chart: 40 px margins, 0.95 headroom, 2 px lines.
    #[must_use]
    pub fn main() -> Self {
        Self {
            mode: SurfaceMode::Main,
            top_space: 40.0,
            bottom_space: 40.0,
            headroom: 0.95,
            animation_steps: DEFAULT_ANIMATION_STEPS,
            line_width: 2.0,
            drawing_style: DrawingStyle::Standard,
            grid_line_width: default_grid_line_width(),
            grid_label_font_size: default_grid_label_font_size(),
        }
    }

    /// Overview chart: no margins, 1.10 headroom, 1 px lines.
    #[must_use]
    pub fn overview() -> Self {
        Self {
            mode: SurfaceMode::Overview,
            top_space: 0.0,
            bottom_space: 0.0,
            headroom: 1.10,
            line_width: 1.0,
            ..Self::main()
        }
    }

    #[must_use]
    pub fn with_margins(mut self, top_space: f64, bottom_space: f64) -> Self {
        self.top_space = top_space;
        self.bottom_space = bottom_space;
        self
    }

    #[must_use]
    pub fn with_headroom(mut self, headroom: f64) -> Self {
        self.headroom = headroom;
        self
    }

    #[must_use]
    pub fn with_animation_steps(mut self, animation_steps: usize) -> Self {
        self.animation_steps = animation_steps;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_drawing_style(mut self, drawing_style: DrawingStyle) -> Self {
        self.drawing_style = drawing_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("top_space", self.top_space),
            ("bottom_space", self.bottom_space),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("headroom", self.headroom),
            ("line_width", self.line_width),
            ("grid_line_width", self.grid_line_width),
            ("grid_label_font_size", self.grid_label_font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self.animation_steps == 0 {
            return Err(ChartError::InvalidConfig(
                "`animation_steps` must be >= 1".to_owned(),
            ));
        }
        Ok(())
    }
}

pub const CHART_PANEL_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Full configuration of a main chart, its overview and the range slider.
///
/// Serializable so hosts can persist and load chart setup without inventing
/// an ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartPanelConfig {
    #[serde(default = "ChartSurfaceConfig::main")]
    pub main: ChartSurfaceConfig,
    #[serde(default = "ChartSurfaceConfig::overview")]
    pub overview: ChartSurfaceConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default = "default_overview_height")]
    pub overview_height: f64,
    /// Vertical gap between the main chart and the overview.
    #[serde(default = "default_spacing")]
    pub spacing: f64,
}

fn default_overview_height() -> f64 {
    44.0
}

fn default_spacing() -> f64 {
    16.0
}

impl Default for ChartPanelConfig {
    fn default() -> Self {
        Self {
            main: ChartSurfaceConfig::main(),
            overview: ChartSurfaceConfig::overview(),
            slider: SliderConfig::default(),
            overview_height: default_overview_height(),
            spacing: default_spacing(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanelConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartPanelConfig,
}

impl ChartPanelConfig {
    #[must_use]
    pub fn with_slider(mut self, slider: SliderConfig) -> Self {
        self.slider = slider;
        self
    }

    #[must_use]
    pub fn with_overview_height(mut self, overview_height: f64) -> Self {
        self.overview_height = overview_height;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        self.main.validate()?;
        self.overview.validate()?;
        self.slider.validate()?;
        if self.main.mode != SurfaceMode::Main || self.overview.mode != SurfaceMode::Overview {
            return Err(ChartError::InvalidConfig(
                "panel surfaces must be configured as `main` and `overview`".to_owned(),
            ));
        }
        if !self.overview_height.is_finite() || self.overview_height <= 0.0 {
            return Err(ChartError::InvalidConfig(
                "`overview_height` must be finite and > 0".to_owned(),
            ));
        }
        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ChartError::InvalidConfig(
                "`spacing` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartPanelConfigJsonContractV1 {
            schema_version: CHART_PANEL_CONFIG_JSON_SCHEMA_V1,
            config: *self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize panel config contract v1: {e}"))
        })
    }

    /// Parses either the versioned contract or a bare config object.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let config = if let Ok(config) = serde_json::from_str::<ChartPanelConfig>(input) {
            config
        } else {
            let payload: ChartPanelConfigJsonContractV1 =
                serde_json::from_str(input).map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse panel config json: {e}"))
                })?;
            if payload.schema_version != CHART_PANEL_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported panel config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        };
        config.validate()?;
        Ok(config)
    }
}
