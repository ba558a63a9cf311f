//! Pure mapping from series samples to pixel coordinates.
//!
//! Every function here is deterministic and side-effect free so layout passes
//! and tests consume exactly the same geometry.

use serde::{Deserialize, Serialize};

use crate::core::model::{ChartModel, PointModel};
use crate::core::types::IndexRange;

/// Mapped sample position in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Vertical value domain `[min_value, max_value]` stretched by a headroom factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerticalScale {
    pub min_value: f64,
    pub max_value: f64,
    pub headroom: f64,
}

impl VerticalScale {
    #[must_use]
    pub const fn new(min_value: f64, max_value: f64, headroom: f64) -> Self {
        Self {
            min_value,
            max_value,
            headroom,
        }
    }

    /// `scaledMax - minValue`: the value span that covers the full plot height.
    #[must_use]
    pub fn scaled_gap(self) -> f64 {
        (self.max_value - self.min_value) * self.headroom
    }

    /// Maps one sample value to a y coordinate inside a plot of `height` pixels.
    ///
    /// Zero always sits on the baseline. A non-zero value against a zero gap
    /// yields `-height`, which callers treat as "no vertical scale yet".
    #[must_use]
    pub fn value_to_y(self, value: i64, height: f64) -> f64 {
        if value == 0 {
            return height;
        }
        let gap = self.scaled_gap();
        if gap == 0.0 || !gap.is_finite() {
            return -height;
        }
        height * (1.0 - ((value as f64 - self.min_value) / gap))
    }

    /// Value labelled by a grid line at relative `position` (0 = top, 1 = baseline).
    #[must_use]
    pub fn line_value(self, position: f64) -> i64 {
        ((1.0 - position) * self.scaled_gap()) as i64 + self.min_value as i64
    }
}

/// Horizontal placement: `x = index * pitch - offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalLayout {
    pub pitch: f64,
    pub offset: f64,
}

impl HorizontalLayout {
    /// Layout that stretches `range` across `width` pixels.
    ///
    /// Returns `None` while the range spans a single index or less, which would
    /// otherwise divide by zero.
    #[must_use]
    pub fn for_visible_range(range: IndexRange, width: f64) -> Option<Self> {
        let steps = range.span() - 1.0;
        if !range.is_valid() || !width.is_finite() || width <= 0.0 || steps <= 0.0 {
            return None;
        }
        let pitch = width / steps;
        Some(Self {
            pitch,
            offset: range.start * pitch,
        })
    }

    /// Layout that fits all `point_count` samples into `width` pixels.
    ///
    /// A single sample is centered instead of spread across the width.
    #[must_use]
    pub fn for_overview(point_count: usize, width: f64) -> Option<Self> {
        if point_count == 0 || !width.is_finite() || width <= 0.0 {
            return None;
        }
        if point_count == 1 {
            return Some(Self {
                pitch: 0.0,
                offset: -width / 2.0,
            });
        }
        Some(Self {
            pitch: width / (point_count - 1) as f64,
            offset: 0.0,
        })
    }

    #[must_use]
    pub fn x_for_index(self, index: usize) -> f64 {
        index as f64 * self.pitch - self.offset
    }
}

/// Maps every sample of a series to a screen point.
#[must_use]
pub fn map_points(
    data: &[PointModel],
    layout: HorizontalLayout,
    scale: VerticalScale,
    height: f64,
) -> Vec<ScreenPoint> {
    if !height.is_finite() || height <= 0.0 {
        return Vec::new();
    }
    data.iter()
        .enumerate()
        .map(|(index, point)| {
            ScreenPoint::new(
                layout.x_for_index(index),
                scale.value_to_y(point.value, height),
            )
        })
        .collect()
}

/// Largest value among non-hidden samples whose x lands inside `[0, width]`.
#[must_use]
pub fn visible_max_value(models: &[ChartModel], layout: HorizontalLayout, width: f64) -> i64 {
    models
        .iter()
        .filter(|model| !model.is_hidden)
        .flat_map(|model| {
            model.data.iter().enumerate().filter_map(move |(index, point)| {
                let x = layout.x_for_index(index);
                (x >= 0.0 && x <= width).then_some(point.value)
            })
        })
        .max()
        .unwrap_or(0)
}

/// Largest value across all samples of non-hidden series.
#[must_use]
pub fn overall_max_value(models: &[ChartModel]) -> i64 {
    models
        .iter()
        .filter(|model| !model.is_hidden)
        .filter_map(ChartModel::max_value)
        .max()
        .unwrap_or(0)
}
