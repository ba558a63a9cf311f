//! Gesture handling for the overview range slider.

mod slider;

pub use slider::{
    RangeSlider, SliderConfig, SliderDragState, SliderEvent, SliderGesture, SliderObserver,
    SliderZone,
};
