use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::IndexRange;
use crate::error::{ChartError, ChartResult};

/// Zone resolved for a touch, reported through `SliderEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SliderZone {
    Left,
    Right,
    Center,
    /// Touch outside every actionable zone.
    None,
    /// Reported when a gesture ends, whatever zone it started in.
    Finished,
}

/// Drag state of the slider between gesture boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SliderDragState {
    #[default]
    Idle,
    DraggingLeftHandle,
    DraggingRightHandle,
    DraggingBody,
    NoHandle,
}

impl From<SliderZone> for SliderDragState {
    fn from(zone: SliderZone) -> Self {
        match zone {
            SliderZone::Left => Self::DraggingLeftHandle,
            SliderZone::Right => Self::DraggingRightHandle,
            SliderZone::Center => Self::DraggingBody,
            SliderZone::None => Self::NoHandle,
            SliderZone::Finished => Self::Idle,
        }
    }
}

/// Single-pointer pan gesture in the slider's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliderGesture {
    Began { x: f64 },
    /// Horizontal translation accumulated since `Began`.
    Moved { translation_x: f64 },
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SliderEvent {
    RangeChanged { range: IndexRange, pixel_width: f64 },
    TouchBegan { zone: SliderZone },
    TouchEnded { zone: SliderZone },
}

/// Receives slider events in emission order.
pub trait SliderObserver {
    fn on_event(&mut self, event: SliderEvent);
}

impl<F: FnMut(SliderEvent)> SliderObserver for F {
    fn on_event(&mut self, event: SliderEvent) {
        self(event);
    }
}

/// Slider geometry tuning, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub handle_width: f64,
    /// Hit tolerance around each handle.
    pub tap_size: f64,
    pub leading_space: f64,
    pub trailing_space: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            handle_width: 11.0,
            tap_size: 34.0,
            leading_space: 16.0,
            trailing_space: 16.0,
        }
    }
}

impl SliderConfig {
    #[must_use]
    pub fn with_handle_width(mut self, handle_width: f64) -> Self {
        self.handle_width = handle_width;
        self
    }

    #[must_use]
    pub fn with_tap_size(mut self, tap_size: f64) -> Self {
        self.tap_size = tap_size;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, leading_space: f64, trailing_space: f64) -> Self {
        self.leading_space = leading_space;
        self.trailing_space = trailing_space;
        self
    }

    /// Narrowest selection: both handles plus their hit zones.
    #[must_use]
    pub fn minimum_width(self) -> f64 {
        2.0 * self.handle_width + 2.0 * self.tap_size
    }

    pub fn validate(self) -> ChartResult<()> {
        for (name, value) in [
            ("handle_width", self.handle_width),
            ("tap_size", self.tap_size),
            ("leading_space", self.leading_space),
            ("trailing_space", self.trailing_space),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "slider `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.handle_width == 0.0 {
            return Err(ChartError::InvalidConfig(
                "slider `handle_width` must be > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Range-selection state machine behind the overview slider.
///
/// The selection is kept as a pixel `offset` from the track start plus a pixel
/// `width`; every committed change is converted into a fractional
/// `IndexRange` and broadcast to observers.
pub struct RangeSlider {
    config: SliderConfig,
    view_width: f64,
    point_count: usize,
    offset: f64,
    width: f64,
    drag_start_offset: f64,
    drag_start_width: f64,
    state: SliderDragState,
    zone: SliderZone,
    range: IndexRange,
    observers: Vec<Box<dyn SliderObserver>>,
}

impl std::fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSlider")
            .field("config", &self.config)
            .field("view_width", &self.view_width)
            .field("point_count", &self.point_count)
            .field("offset", &self.offset)
            .field("width", &self.width)
            .field("state", &self.state)
            .field("range", &self.range)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl RangeSlider {
    pub fn new(config: SliderConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            view_width: 0.0,
            point_count: 0,
            offset: 0.0,
            width: 0.0,
            drag_start_offset: 0.0,
            drag_start_width: 0.0,
            state: SliderDragState::Idle,
            zone: SliderZone::Finished,
            range: IndexRange::default(),
            observers: Vec::new(),
        })
    }

    pub fn add_observer(&mut self, observer: impl SliderObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn config(&self) -> SliderConfig {
        self.config
    }

    /// Replaces the geometry tuning and re-applies the layout.
    pub fn set_config(&mut self, config: SliderConfig) -> ChartResult<()> {
        config.validate()?;
        debug!(?config, "slider config changed");
        self.config = config;
        self.relayout();
        Ok(())
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn range(&self) -> IndexRange {
        self.range
    }

    #[must_use]
    pub fn state(&self) -> SliderDragState {
        self.state
    }

    #[must_use]
    pub fn zone(&self) -> SliderZone {
        self.zone
    }

    #[must_use]
    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    #[must_use]
    pub fn minimum_width(&self) -> f64 {
        self.config.minimum_width()
    }

    /// Usable track width between the leading and trailing margins.
    #[must_use]
    pub fn track_width(&self) -> f64 {
        (self.view_width - self.config.leading_space - self.config.trailing_space).max(0.0)
    }

    /// Pixels per sample index along the track; `0` while undefined.
    #[must_use]
    pub fn index_gap(&self) -> f64 {
        if self.point_count < 2 {
            return 0.0;
        }
        self.track_width() / (self.point_count - 1) as f64
    }

    /// Updates view width and sample count.
    ///
    /// The first layout that can hold the minimum selection selects it at the
    /// track start. Later layouts only pull the selection back inside a
    /// narrower track.
    pub fn layout(&mut self, view_width: f64, point_count: usize) {
        let view_width = if view_width.is_finite() {
            view_width.max(0.0)
        } else {
            0.0
        };
        if view_width == self.view_width && point_count == self.point_count {
            return;
        }
        trace!(view_width, point_count, "slider layout");
        self.view_width = view_width;
        self.point_count = point_count;
        self.relayout();
    }

    /// Returns the slider to its pristine state, keeping config and observers.
    pub fn reset(&mut self) {
        self.view_width = 0.0;
        self.point_count = 0;
        self.offset = 0.0;
        self.width = 0.0;
        self.drag_start_offset = 0.0;
        self.drag_start_width = 0.0;
        self.state = SliderDragState::Idle;
        self.zone = SliderZone::Finished;
        self.range = IndexRange::default();
    }

    /// Programmatically selects `[offset, offset + width]`, clamped to the track.
    ///
    /// Returns the committed range, `None` while the track cannot hold the
    /// minimum selection.
    pub fn select(&mut self, offset: f64, width: f64) -> Option<IndexRange> {
        let track_width = self.track_width();
        let minimum_width = self.minimum_width();
        if track_width < minimum_width || !offset.is_finite() || !width.is_finite() {
            return None;
        }
        let width = width.clamp(minimum_width, track_width);
        let offset = offset.clamp(0.0, track_width - width);
        self.commit(offset, width)
    }

    /// Feeds one gesture phase. Returns the committed range when it changed.
    pub fn handle_gesture(&mut self, gesture: SliderGesture) -> Option<IndexRange> {
        match gesture {
            SliderGesture::Began { x } => {
                self.drag_start_offset = self.offset;
                self.drag_start_width = self.width;
                self.zone = self.classify(x);
                self.state = SliderDragState::from(self.zone);
                debug!(x, zone = ?self.zone, "slider touch began");
                self.emit(SliderEvent::TouchBegan { zone: self.zone });
                None
            }
            SliderGesture::Moved { translation_x } => {
                if !translation_x.is_finite() || !self.can_hold_selection() {
                    return None;
                }
                let (offset, width) = match self.state {
                    SliderDragState::DraggingBody => self.drag_body(translation_x),
                    SliderDragState::DraggingLeftHandle => self.drag_left_handle(translation_x),
                    SliderDragState::DraggingRightHandle => self.drag_right_handle(translation_x),
                    SliderDragState::Idle | SliderDragState::NoHandle => return None,
                };
                self.commit(offset, width)
            }
            SliderGesture::Ended => {
                self.state = SliderDragState::Idle;
                self.zone = SliderZone::Finished;
                debug!(
                    offset = self.offset,
                    width = self.width,
                    "slider touch ended"
                );
                self.emit(SliderEvent::TouchEnded {
                    zone: SliderZone::Finished,
                });
                None
            }
        }
    }

    /// Resolves which part of the slider a touch at view-local `x` grabs.
    #[must_use]
    pub fn classify(&self, x: f64) -> SliderZone {
        if !x.is_finite() {
            return SliderZone::None;
        }
        let half_tap = self.config.tap_size / 2.0;
        let handle = self.config.handle_width;
        let left = self.offset + self.config.leading_space;
        let right = left + self.width;

        if x >= left - half_tap && x <= left + handle + half_tap {
            SliderZone::Left
        } else if x >= right - handle - half_tap && x <= right + half_tap {
            SliderZone::Right
        } else if x > left + handle + half_tap && x < right - handle - half_tap {
            SliderZone::Center
        } else {
            SliderZone::None
        }
    }

    fn drag_body(&self, translation_x: f64) -> (f64, f64) {
        let max_offset = (self.track_width() - self.width).max(0.0);
        let offset = (self.drag_start_offset + translation_x).clamp(0.0, max_offset);
        (offset, self.width)
    }

    fn drag_left_handle(&self, translation_x: f64) -> (f64, f64) {
        let minimum_width = self.minimum_width();
        let mut offset = self.drag_start_offset + translation_x;
        let mut width = self.drag_start_width - translation_x;
        if offset < 0.0 {
            offset = 0.0;
            width = self.drag_start_width + self.drag_start_offset;
        }
        if width < minimum_width {
            width = minimum_width;
            offset = self.drag_start_offset + (self.drag_start_width - width);
        }
        (offset, width)
    }

    fn drag_right_handle(&self, translation_x: f64) -> (f64, f64) {
        let minimum_width = self.minimum_width();
        let maximum_width = self.track_width() - self.drag_start_offset;
        let width = (self.drag_start_width + translation_x)
            .max(minimum_width)
            .min(maximum_width);
        (self.offset, width)
    }

    fn relayout(&mut self) {
        if !self.can_hold_selection() {
            return;
        }
        let track_width = self.track_width();
        let minimum_width = self.minimum_width();
        if self.width == 0.0 {
            self.commit(0.0, minimum_width);
            return;
        }
        let width = self.width.clamp(minimum_width, track_width);
        let offset = self.offset.clamp(0.0, track_width - width);
        self.commit(offset, width);
    }

    /// `false` while the track is narrower than the minimum selection.
    fn can_hold_selection(&self) -> bool {
        self.track_width() >= self.minimum_width()
    }

    /// Stores the selection clamped into the track and broadcasts its range.
    fn commit(&mut self, offset: f64, width: f64) -> Option<IndexRange> {
        if !self.can_hold_selection() {
            return None;
        }
        let track_width = self.track_width();
        let width = width.clamp(self.minimum_width(), track_width);
        let offset = offset.clamp(0.0, track_width - width);
        self.offset = offset;
        self.width = width;

        let index_gap = self.index_gap();
        if index_gap == 0.0 {
            return None;
        }
        self.range = IndexRange::new(offset / index_gap, (offset + width) / index_gap + 1.0);
        trace!(
            offset,
            width,
            start = self.range.start,
            end = self.range.end,
            "slider range committed"
        );
        self.emit(SliderEvent::RangeChanged {
            range: self.range,
            pixel_width: width,
        });
        Some(self.range)
    }

    fn emit(&mut self, event: SliderEvent) {
        for observer in &mut self.observers {
            observer.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RangeSlider, SliderConfig, SliderDragState, SliderGesture, SliderZone};

    fn slider() -> RangeSlider {
        let mut slider = RangeSlider::new(SliderConfig::default().with_margins(0.0, 0.0))
            .expect("valid config");
        slider.layout(300.0, 31);
        slider
    }

    #[test]
    fn first_layout_selects_minimum_width() {
        let slider = slider();
        assert_eq!(slider.offset(), 0.0);
        assert_eq!(slider.width(), 90.0);
        assert_eq!(slider.index_gap(), 10.0);
        assert_eq!(slider.range().start, 0.0);
        assert_eq!(slider.range().end, 10.0);
    }

    #[test]
    fn classification_respects_tap_tolerance() {
        let mut slider = slider();
        slider.select(100.0, 120.0);
        assert_eq!(slider.classify(82.0), SliderZone::None);
        assert_eq!(slider.classify(83.0), SliderZone::Left);
        assert_eq!(slider.classify(128.0), SliderZone::Left);
        assert_eq!(slider.classify(150.0), SliderZone::Center);
        assert_eq!(slider.classify(192.0), SliderZone::Right);
        assert_eq!(slider.classify(237.0), SliderZone::Right);
        assert_eq!(slider.classify(238.0), SliderZone::None);
    }

    #[test]
    fn move_without_begin_is_ignored() {
        let mut slider = slider();
        assert!(
            slider
                .handle_gesture(SliderGesture::Moved {
                    translation_x: 40.0
                })
                .is_none()
        );
        assert_eq!(slider.state(), SliderDragState::Idle);
    }

    #[test]
    fn narrow_track_never_commits() {
        let mut slider = RangeSlider::new(SliderConfig::default()).expect("valid config");
        slider.layout(100.0, 10);
        assert_eq!(slider.width(), 0.0);
        assert!(slider.select(0.0, 90.0).is_none());
    }

    #[test]
    fn narrow_track_ignores_drags() {
        let mut slider = RangeSlider::new(SliderConfig::default()).expect("valid config");
        slider.layout(100.0, 10);
        slider.handle_gesture(SliderGesture::Began { x: 20.0 });
        assert_eq!(slider.zone(), SliderZone::Left);
        assert!(
            slider
                .handle_gesture(SliderGesture::Moved {
                    translation_x: -5.0
                })
                .is_none()
        );
        assert_eq!(slider.offset(), 0.0);
        assert_eq!(slider.width(), 0.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        assert!(RangeSlider::new(SliderConfig::default().with_handle_width(0.0)).is_err());
        assert!(RangeSlider::new(SliderConfig::default().with_tap_size(f64::NAN)).is_err());
    }
}
