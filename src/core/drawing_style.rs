//! Policies turning mapped sample points into renderable outlines.

use serde::{Deserialize, Serialize};

use crate::core::geometry::ScreenPoint;
use crate::core::types::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
}

/// Polyline in pixel space. The first vertex is the pen-down position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outline {
    pub vertices: Vec<ScreenPoint>,
    pub closed: bool,
}

impl Outline {
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<ScreenPoint> {
        self.vertices.first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<ScreenPoint> {
        self.vertices.last().copied()
    }
}

/// Capability shared by all drawing styles.
pub trait DrawingStyleStrategy {
    /// Builds the outline for one series. `None` when there is nothing to draw.
    fn create_path(
        &self,
        points: &[ScreenPoint],
        line_gap: f64,
        viewport: Viewport,
    ) -> Option<Outline>;

    /// `true` when the outline is filled with the series color instead of stroked.
    fn is_custom_fill_color(&self) -> bool {
        false
    }

    fn line_cap(&self) -> LineCap {
        LineCap::Round
    }

    fn line_join(&self) -> LineJoin {
        LineJoin::Round
    }
}

/// Straight segments between consecutive points.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDrawingStyle;

impl DrawingStyleStrategy for StandardDrawingStyle {
    fn create_path(
        &self,
        points: &[ScreenPoint],
        _line_gap: f64,
        _viewport: Viewport,
    ) -> Option<Outline> {
        if points.is_empty() {
            return None;
        }
        Some(Outline {
            vertices: points.to_vec(),
            closed: false,
        })
    }
}

/// Staircase: holds the previous value, then rises at the incoming point's x.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteppedDrawingStyle;

impl DrawingStyleStrategy for SteppedDrawingStyle {
    fn create_path(
        &self,
        points: &[ScreenPoint],
        _line_gap: f64,
        _viewport: Viewport,
    ) -> Option<Outline> {
        let (first, rest) = points.split_first()?;
        let mut vertices = Vec::with_capacity(points.len() * 2 - 1);
        vertices.push(*first);
        let mut previous = *first;
        for point in rest {
            vertices.push(ScreenPoint::new(point.x, previous.y));
            vertices.push(*point);
            previous = *point;
        }
        Some(Outline {
            vertices,
            closed: false,
        })
    }

    fn line_join(&self) -> LineJoin {
        LineJoin::Miter
    }
}

/// Closed band anchored on the bottom edge, one `line_gap` wide per sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackedDrawingStyle;

impl DrawingStyleStrategy for StackedDrawingStyle {
    fn create_path(
        &self,
        points: &[ScreenPoint],
        line_gap: f64,
        viewport: Viewport,
    ) -> Option<Outline> {
        let first = *points.first()?;
        let last = *points.last()?;
        let baseline = viewport.height;

        let mut vertices = Vec::with_capacity(points.len() * 2 + 3);
        vertices.push(ScreenPoint::new(first.x, baseline));
        for point in points {
            vertices.push(*point);
            vertices.push(ScreenPoint::new(point.x + line_gap, point.y));
        }
        vertices.push(ScreenPoint::new(last.x, baseline));
        vertices.push(ScreenPoint::new(first.x, baseline));

        Some(Outline {
            vertices,
            closed: true,
        })
    }

    fn is_custom_fill_color(&self) -> bool {
        true
    }

    fn line_cap(&self) -> LineCap {
        LineCap::Butt
    }

    fn line_join(&self) -> LineJoin {
        LineJoin::Miter
    }
}

static STANDARD: StandardDrawingStyle = StandardDrawingStyle;
static STEPPED: SteppedDrawingStyle = SteppedDrawingStyle;
static STACKED: StackedDrawingStyle = StackedDrawingStyle;

/// Drawing style selected through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingStyle {
    #[default]
    Standard,
    Stepped,
    Stacked,
}

impl DrawingStyle {
    #[must_use]
    pub fn strategy(self) -> &'static dyn DrawingStyleStrategy {
        match self {
            Self::Standard => &STANDARD,
            Self::Stepped => &STEPPED,
            Self::Stacked => &STACKED,
        }
    }

    #[must_use]
    pub fn create_path(
        self,
        points: &[ScreenPoint],
        line_gap: f64,
        viewport: Viewport,
    ) -> Option<Outline> {
        self.strategy().create_path(points, line_gap, viewport)
    }

    #[must_use]
    pub fn is_custom_fill_color(self) -> bool {
        self.strategy().is_custom_fill_color()
    }
}
