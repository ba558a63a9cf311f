use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::geometry::VerticalScale;

pub const DEFAULT_ANIMATION_STEPS: usize = 30;

/// Relative grid-line positions, top (0) to baseline (1).
pub const GRID_LINE_POSITIONS: [f64; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];

/// Monotonic S-curve `x² / (x² + (1 - x)²)` on `[0, 1]`.
#[must_use]
pub fn ease_in_out(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    let rising = x * x;
    rising / (rising + (1.0 - x) * (1.0 - x))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLinePhase {
    /// Labels the scale being animated to; fades in.
    Incoming,
    /// Labels the scale that was shown before the current animation; fades out.
    Outgoing,
}

/// Horizontal grid line derived for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub position: f64,
    pub value: i64,
    pub y: f64,
    pub alpha: f64,
    pub phase: GridLinePhase,
}

pub type GridLines = SmallVec<[GridLine; 12]>;

/// Smooths changes of the vertical maximum across a fixed number of ticks.
///
/// `current_max` is only ever changed by `set_target` (first call) and `tick`.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalScaleAnimator {
    min_value: f64,
    current_max: f64,
    target_max: f64,
    delta_to_target: f64,
    outgoing_max: f64,
    step: usize,
    total_steps: usize,
    has_target: bool,
}

impl Default for VerticalScaleAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_ANIMATION_STEPS)
    }
}

impl VerticalScaleAnimator {
    /// `total_steps` below one is treated as one.
    #[must_use]
    pub fn new(total_steps: usize) -> Self {
        let total_steps = total_steps.max(1);
        Self {
            min_value: 0.0,
            current_max: 0.0,
            target_max: 0.0,
            delta_to_target: 0.0,
            outgoing_max: 0.0,
            step: total_steps,
            total_steps,
            has_target: false,
        }
    }

    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn current_max(&self) -> f64 {
        self.current_max
    }

    #[must_use]
    pub fn target_max(&self) -> f64 {
        self.target_max
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.step < self.total_steps
    }

    /// Changes the step count used by animations started afterwards.
    ///
    /// An in-flight animation is finished immediately so the new count never
    /// applies to a half-run curve.
    pub fn set_total_steps(&mut self, total_steps: usize) {
        if self.is_animating() {
            self.current_max = self.target_max;
        }
        self.total_steps = total_steps.max(1);
        self.step = self.total_steps;
    }

    /// Starts animating toward `target_max`.
    ///
    /// The first target is applied immediately. Afterwards an unchanged target
    /// is ignored and a new one restarts the curve from the current value.
    /// Returns `true` when the vertical scale changed or started to change.
    pub fn set_target(&mut self, target_max: f64) -> bool {
        if !target_max.is_finite() {
            return false;
        }
        if !self.has_target {
            self.has_target = true;
            self.current_max = target_max;
            self.target_max = target_max;
            self.outgoing_max = target_max;
            self.step = self.total_steps;
            debug!(target_max, "vertical scale initialized");
            return true;
        }
        if target_max == self.target_max {
            return false;
        }

        self.outgoing_max = self.current_max;
        self.target_max = target_max;
        self.delta_to_target = target_max - self.current_max;
        self.step = 0;
        debug!(
            from = self.current_max,
            target_max,
            steps = self.total_steps,
            "vertical scale animation started"
        );
        true
    }

    /// Forgets the current target so the next `set_target` applies immediately.
    pub fn reset(&mut self) {
        *self = Self::new(self.total_steps);
    }

    /// Advances the animation by one step. Returns `true` when `current_max` moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }

        let step = self.step;
        self.step += 1;
        if self.step == self.total_steps {
            let moved = self.current_max != self.target_max;
            self.current_max = self.target_max;
            trace!(current_max = self.current_max, "vertical scale animation finished");
            return moved;
        }

        let previous = if step == 0 {
            0.0
        } else {
            self.curve_at(step - 1)
        };
        let increment = self.delta_to_target * (self.curve_at(step) - previous);
        self.current_max += increment;
        trace!(step, current_max = self.current_max, "vertical scale tick");
        increment != 0.0
    }

    /// Eased completion of the running animation in `[0, 1]`; `1` when idle.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if !self.is_animating() {
            return 1.0;
        }
        if self.step == 0 {
            return 0.0;
        }
        self.curve_at(self.step - 1)
    }

    /// Scale that currently maps samples to pixels.
    #[must_use]
    pub fn current_scale(&self, headroom: f64) -> VerticalScale {
        VerticalScale::new(self.min_value, self.current_max, headroom)
    }

    #[must_use]
    pub fn target_scale(&self, headroom: f64) -> VerticalScale {
        VerticalScale::new(self.min_value, self.target_max, headroom)
    }

    /// Grid lines for the current step.
    ///
    /// Incoming lines carry the target's values and fade in, outgoing lines
    /// carry the previous scale's values and fade out. Both are positioned with
    /// the current scale so they slide together with the data. The baseline is
    /// shared and never cross-faded; outgoing lines vanish once the animation
    /// completes.
    #[must_use]
    pub fn grid_lines(&self, headroom: f64, height: f64) -> GridLines {
        let mut lines = GridLines::new();
        if !height.is_finite() || height <= 0.0 {
            return lines;
        }

        let current = self.current_scale(headroom);
        let target = self.target_scale(headroom);
        let outgoing = VerticalScale::new(self.min_value, self.outgoing_max, headroom);
        let animating = self.is_animating();
        let progress = self.progress();

        for position in GRID_LINE_POSITIONS {
            let is_baseline = position >= 1.0;
            let value = target.line_value(position);
            lines.push(GridLine {
                position,
                value,
                y: current.value_to_y(value, height),
                alpha: if animating && !is_baseline { progress } else { 1.0 },
                phase: GridLinePhase::Incoming,
            });

            if animating && !is_baseline {
                let value = outgoing.line_value(position);
                lines.push(GridLine {
                    position,
                    value,
                    y: current.value_to_y(value, height),
                    alpha: 1.0 - progress,
                    phase: GridLinePhase::Outgoing,
                });
            }
        }
        lines
    }

    fn curve_at(&self, step: usize) -> f64 {
        if self.total_steps <= 1 {
            return 1.0;
        }
        ease_in_out(step as f64 / (self.total_steps - 1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::{GridLinePhase, VerticalScaleAnimator, ease_in_out};

    #[test]
    fn ease_curve_is_anchored_and_symmetric() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() <= 1e-12);
        assert!((ease_in_out(0.25) + ease_in_out(0.75) - 1.0).abs() <= 1e-12);
    }

    #[test]
    fn first_target_is_applied_without_animation() {
        let mut animator = VerticalScaleAnimator::new(30);
        assert!(animator.set_target(120.0));
        assert_eq!(animator.current_max(), 120.0);
        assert!(!animator.is_animating());
        assert!(!animator.tick());
    }

    #[test]
    fn unchanged_target_does_not_restart() {
        let mut animator = VerticalScaleAnimator::new(4);
        animator.set_target(10.0);
        assert!(animator.set_target(20.0));
        animator.tick();
        animator.tick();
        assert!(!animator.set_target(20.0));
        assert_eq!(animator.step(), 2);
    }

    #[test]
    fn single_step_animation_lands_on_first_tick() {
        let mut animator = VerticalScaleAnimator::new(1);
        animator.set_target(10.0);
        animator.set_target(50.0);
        assert!(animator.tick());
        assert_eq!(animator.current_max(), 50.0);
        assert!(!animator.is_animating());
    }

    #[test]
    fn idle_grid_has_six_opaque_lines() {
        let mut animator = VerticalScaleAnimator::default();
        animator.set_target(100.0);
        let lines = animator.grid_lines(1.0, 200.0);
        assert_eq!(lines.len(), 6);
        assert!(lines.iter().all(|line| line.alpha == 1.0));
        assert!(lines.iter().all(|line| line.phase == GridLinePhase::Incoming));
        assert_eq!(lines[0].value, 100);
        assert_eq!(lines[0].y, 0.0);
        assert_eq!(lines[5].y, 200.0);
    }

    #[test]
    fn animating_grid_cross_fades_all_but_baseline() {
        let mut animator = VerticalScaleAnimator::new(10);
        animator.set_target(100.0);
        animator.set_target(200.0);
        animator.tick();
        animator.tick();
        let lines = animator.grid_lines(1.0, 200.0);
        assert_eq!(lines.len(), 11);

        let outgoing: Vec<_> = lines
            .iter()
            .filter(|line| line.phase == GridLinePhase::Outgoing)
            .collect();
        assert_eq!(outgoing.len(), 5);
        assert_eq!(outgoing[0].value, 100);
        let progress = animator.progress();
        assert!(progress > 0.0 && progress < 1.0);
        assert!(outgoing.iter().all(|line| (line.alpha - (1.0 - progress)).abs() <= 1e-12));

        for _ in 0..8 {
            animator.tick();
        }
        assert_eq!(animator.grid_lines(1.0, 200.0).len(), 6);
    }
}
