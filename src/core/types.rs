use serde::{Deserialize, Serialize};

/// Drawing surface size in pixels, supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Fractional sample-index window currently displayed on the main chart.
///
/// `end` is exclusive of the last fully visible sample: the slider adds one
/// index so the partially visible trailing sample is still drawn.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: f64,
    pub end: f64,
}

impl IndexRange {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// `true` once the range selects a non-empty window.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.start.is_finite() && self.end.is_finite() && self.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexRange, Viewport};

    #[test]
    fn zero_sized_viewport_is_invalid() {
        assert!(!Viewport::new(0.0, 100.0).is_valid());
        assert!(!Viewport::new(100.0, f64::NAN).is_valid());
        assert!(Viewport::new(320.0, 240.0).is_valid());
    }

    #[test]
    fn empty_range_is_invalid() {
        assert!(!IndexRange::default().is_valid());
        assert!(!IndexRange::new(3.0, 3.0).is_valid());
        assert!(IndexRange::new(0.5, 7.25).is_valid());
        assert_eq!(IndexRange::new(2.0, 7.5).span(), 5.5);
    }
}
