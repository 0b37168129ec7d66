//! Gesture Translator
//!
//! Turns pointer/touch drag frames into either a live, lag-free track offset
//! (while the pointer is held) or a committed index target (on release).
//! Displacement is converted to slide units by dividing by the slot width;
//! a velocity term lets a short fast flick travel several slides, capped by
//! `max_speed` so a noisy velocity reading cannot eject the index past the
//! rendered clone pool.

use tracing::{debug, trace};

/// One frame of a drag gesture as reported by the pointer layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DragFrame {
    /// True while the pointer is down.
    pub held: bool,
    /// Cumulative horizontal displacement since drag start (px, signed).
    pub movement_x: f32,
    /// Release speed magnitude (px/ms).
    pub velocity: f32,
    /// Sign of the most recent movement: +1 right, -1 left.
    pub direction_x: f32,
}

impl DragFrame {
    /// A frame while the pointer is held.
    pub fn held(movement_x: f32) -> Self {
        Self {
            held: true,
            movement_x,
            velocity: 0.0,
            direction_x: movement_x.signum(),
        }
    }

    /// The release frame ending a drag.
    pub fn release(movement_x: f32, velocity: f32, direction_x: f32) -> Self {
        Self {
            held: false,
            movement_x,
            velocity,
            direction_x,
        }
    }

    fn movement(&self) -> f32 {
        if self.movement_x.is_finite() {
            self.movement_x
        } else {
            0.0
        }
    }

    fn speed(&self) -> f32 {
        if self.velocity.is_finite() {
            self.velocity.abs()
        } else {
            0.0
        }
    }

    fn direction(&self) -> i64 {
        if self.direction_x > 0.0 {
            1
        } else if self.direction_x < 0.0 {
            -1
        } else {
            0
        }
    }
}

/// How a released drag maps onto the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragResolution {
    /// Extra slides contributed by release velocity, never above `max_speed`.
    pub slide_jump: i64,
    /// Signed slide count the track moved; positive means dragged right.
    pub raw_delta: i64,
    /// Unclamped index target, `current - raw_delta`.
    pub target: i64,
}

/// Turns drag frames into preview offsets and release targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTranslator {
    max_speed: usize,
}

impl GestureTranslator {
    /// Translator capping flick jumps at `max_speed` slides.
    pub fn new(max_speed: usize) -> Self {
        Self { max_speed }
    }

    pub fn max_speed(&self) -> usize {
        self.max_speed
    }

    /// Track offset while the pointer is held: the committed offset shifted
    /// by the raw displacement. Unmeasured layouts preview as zero.
    pub fn preview(
        &self,
        current_index: i64,
        slot_width: f32,
        frame: &DragFrame,
    ) -> f32 {
        if slot_width <= 0.0 || !slot_width.is_finite() {
            return 0.0;
        }
        let offset = -(current_index as f32 * slot_width) + frame.movement();
        trace!(current_index, movement_x = frame.movement_x, offset, "drag");
        offset
    }

    /// Resolve a release frame into a target index.
    pub fn resolve(
        &self,
        current_index: i64,
        slot_width: f32,
        release: &DragFrame,
    ) -> DragResolution {
        let slides = if slot_width > 0.0 && slot_width.is_finite() {
            release.movement() / slot_width
        } else {
            0.0
        };

        // Float-to-int casts saturate; the integer steps must too.
        let amplified = (slides.abs() * release.speed()).round() as i64;
        let cap = i64::try_from(self.max_speed).unwrap_or(i64::MAX);
        let slide_jump = amplified.min(cap);
        let raw_delta = (slides.round() as i64)
            .saturating_add(slide_jump.saturating_mul(release.direction()));
        let target = current_index.saturating_sub(raw_delta);

        debug!(
            current_index,
            slides,
            slide_jump,
            raw_delta,
            target,
            "drag released"
        );

        DragResolution {
            slide_jump,
            raw_delta,
            target,
        }
    }
}
