pub mod drawing_style;
pub mod geometry;
pub mod model;
pub mod scale_animator;
pub mod types;

pub use drawing_style::{
    DrawingStyle, DrawingStyleStrategy, LineCap, LineJoin, Outline, StackedDrawingStyle,
    StandardDrawingStyle, SteppedDrawingStyle,
};
pub use geometry::{
    HorizontalLayout, ScreenPoint, VerticalScale, map_points, overall_max_value,
    visible_max_value,
};
pub use model::{ChartModel, PointModel, max_point_count};
pub use scale_animator::{
    DEFAULT_ANIMATION_STEPS, GRID_LINE_POSITIONS, GridLine, GridLinePhase, GridLines,
    VerticalScaleAnimator, ease_in_out,
};
pub use types::{IndexRange, Viewport};
