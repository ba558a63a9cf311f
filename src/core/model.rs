use chrono::DateTime;

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One sample of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointModel {
    pub value: i64,
    pub label: String,
}

impl PointModel {
    #[must_use]
    pub fn new(value: i64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }

    /// Builds a point labelled with its UTC day, e.g. `Mar 7`.
    pub fn from_unix_millis(timestamp_ms: i64, value: i64) -> ChartResult<Self> {
        let time = DateTime::from_timestamp_millis(timestamp_ms).ok_or_else(|| {
            ChartError::InvalidData(format!("timestamp {timestamp_ms}ms is out of range"))
        })?;
        Ok(Self::new(value, time.format("%b %-d").to_string()))
    }
}

/// One data series as handed over by the data decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub name: String,
    pub color: Color,
    pub data: Vec<PointModel>,
    pub is_hidden: bool,
    pub opacity: f64,
}

impl ChartModel {
    #[must_use]
    pub fn new(name: impl Into<String>, color: Color, data: Vec<PointModel>) -> Self {
        Self {
            name: name.into(),
            color,
            data,
            is_hidden: false,
            opacity: 1.0,
        }
    }

    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.is_hidden = hidden;
        self.opacity = if hidden { 0.0 } else { 1.0 };
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Largest sample value, `None` for an empty series.
    #[must_use]
    pub fn max_value(&self) -> Option<i64> {
        self.data.iter().map(|point| point.value).max()
    }

    /// Opacity the series animates toward given its visibility flag.
    #[must_use]
    pub fn target_opacity(&self) -> f64 {
        if self.is_hidden { 0.0 } else { 1.0 }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` opacity must be finite and in [0, 1]",
                self.name
            )));
        }
        if self.data.iter().any(|point| point.value < 0) {
            return Err(ChartError::InvalidData(format!(
                "series `{}` contains negative values",
                self.name
            )));
        }
        self.color.validate()
    }
}

/// Length of the longest series, which drives index mapping for all of them.
#[must_use]
pub fn max_point_count(models: &[ChartModel]) -> usize {
    models.iter().map(ChartModel::len).max().unwrap_or(0)
}
