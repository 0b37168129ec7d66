//! Render/Offset Projector
//!
//! Pure projection of committed carousel state into what the renderer
//! applies to the track: a horizontal offset and a transition style. Also
//! sizes the clone pool and lays out the slot plan (see [`pool`]).

pub mod pool;

use std::time::Duration;

use crate::{motion::Easing, types::MeasuredLayout};

pub use pool::{TrackSlot, copies_per_side, slot_plan};

/// How the renderer should move the track to a new offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum TransitionStyle {
    /// Jump immediately (drags and re-homing).
    None,
    /// Animate over `duration_ms` with the given curve.
    Animated { duration_ms: u64, easing: Easing },
}

impl TransitionStyle {
    /// True for [`TransitionStyle::Animated`].
    pub fn is_animated(&self) -> bool {
        matches!(self, TransitionStyle::Animated { .. })
    }

    /// CSS `transition` shorthand for the track's transform.
    pub fn css(&self) -> String {
        match self {
            TransitionStyle::None => "none".to_string(),
            TransitionStyle::Animated {
                duration_ms,
                easing,
            } => format!(
                "transform {duration_ms}ms {}",
                easing.css_timing_function()
            ),
        }
    }
}

/// Committed render instruction for the whole track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TrackFrame {
    /// Committed index in the extended space.
    pub index: i64,
    /// Logical slide at the leading edge.
    pub logical_index: usize,
    /// Horizontal translate in pixels (non-positive for in-bounds indices).
    pub offset: f32,
    /// How to reach `offset`.
    pub transition: TransitionStyle,
}

/// Projects committed state into track frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    duration: Duration,
    easing: Easing,
}

impl Projector {
    /// Projector animating moves over `duration`.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Animated move length, also used for the fallback timer.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// `-(index * viewport_width / visible_items)`; zero until measured.
    #[inline]
    pub fn offset(
        index: i64,
        layout: &MeasuredLayout,
        visible_items: usize,
    ) -> f32 {
        let slot = layout.slot_width(visible_items);
        if slot == 0.0 {
            return 0.0;
        }
        -(index as f32 * slot)
    }

    /// A live drag always wins over a pending animation.
    pub fn transition_style(
        &self,
        is_transitioning: bool,
        is_dragging: bool,
    ) -> TransitionStyle {
        if is_dragging || !is_transitioning {
            return TransitionStyle::None;
        }
        TransitionStyle::Animated {
            duration_ms: self.duration.as_millis() as u64,
            easing: self.easing,
        }
    }

    /// Full committed render instruction.
    pub fn frame(
        &self,
        index: i64,
        logical_index: usize,
        layout: &MeasuredLayout,
        visible_items: usize,
        is_transitioning: bool,
        is_dragging: bool,
    ) -> TrackFrame {
        TrackFrame {
            index,
            logical_index,
            offset: Self::offset(index, layout, visible_items),
            transition: self.transition_style(is_transitioning, is_dragging),
        }
    }
}
