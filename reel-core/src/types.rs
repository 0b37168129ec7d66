//! Shared configuration and layout types.

use std::time::Duration;

use crate::{
    error::SettingsError, index::ExtendedSpace, motion::Easing,
    projector::copies_per_side,
};

/// Defaults shared by every carousel. Tuning happens here so hosts and the
/// config loader stay consistent.
pub mod defaults {
    /// Length of one animated move (ms).
    pub const TRANSITION_DURATION_MS: u64 = 300;
    /// Items shown side by side in the viewport.
    pub const VISIBLE_ITEMS: usize = 1;
    /// Minimum clone copies rendered on each side of the canonical block.
    pub const CLONE_ASSIST_FACTOR: usize = 1;
    /// Whether `next` is ignored while a move is still animating.
    pub const GUARD_DURING_TRANSITION: bool = true;
    /// Largest clone pool an infinite carousel may render.
    pub const MAX_RENDERED_SLOTS: usize = 10_000;
}

/// Carousel boundary behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum WrapMode {
    /// Clamped carousel; the last page stops at `len - visible_items`.
    #[default]
    Finite,
    /// Wraparound carousel backed by clone copies of the sequence.
    Infinite,
}

impl WrapMode {
    /// True for the wraparound mode.
    pub fn is_infinite(self) -> bool {
        matches!(self, WrapMode::Infinite)
    }
}

/// Static configuration for one carousel instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselSettings {
    /// Boundary behavior; fixed for the carousel's lifetime.
    pub wrap_mode: WrapMode,
    /// Number of items shown simultaneously. Must be at least 1.
    pub visible_items: usize,
    /// Duration of one animated move. Also the fallback timeout that ends a
    /// transition when the renderer never acknowledges it.
    pub transition_duration: Duration,
    /// Curve the renderer animates committed moves with.
    pub easing: Easing,
    /// Cap on the extra slides a fast flick may add. `None` derives
    /// `len / 2` from the sequence length.
    pub max_speed: Option<usize>,
    /// When false, `next` may stack moves on top of an animating one.
    pub guard_during_transition: bool,
    /// Minimum clone copies per side of the canonical block. The pool grows
    /// beyond this when the flick reach demands it.
    pub clone_assist_factor: usize,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            wrap_mode: WrapMode::Finite,
            visible_items: defaults::VISIBLE_ITEMS,
            transition_duration: Duration::from_millis(
                defaults::TRANSITION_DURATION_MS,
            ),
            easing: Easing::default(),
            max_speed: None,
            guard_during_transition: defaults::GUARD_DURING_TRANSITION,
            clone_assist_factor: defaults::CLONE_ASSIST_FACTOR,
        }
    }
}

impl CarouselSettings {
    /// Settings for an infinite carousel with every other knob defaulted.
    pub fn infinite() -> Self {
        Self {
            wrap_mode: WrapMode::Infinite,
            ..Self::default()
        }
    }

    /// Set how many items are shown side by side.
    pub fn with_visible_items(mut self, visible_items: usize) -> Self {
        self.visible_items = visible_items;
        self
    }

    /// Cap the extra slides a fast flick may add.
    pub fn with_max_speed(mut self, max_speed: usize) -> Self {
        self.max_speed = Some(max_speed);
        self
    }

    /// Toggle whether `next` is refused while a move animates.
    pub fn with_guard_during_transition(mut self, guard: bool) -> Self {
        self.guard_during_transition = guard;
        self
    }

    /// Set the minimum clone copies per side.
    pub fn with_clone_assist_factor(mut self, factor: usize) -> Self {
        self.clone_assist_factor = factor;
        self
    }

    /// Set the animated move length (and the fallback timeout).
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Check the settings on their own, independent of sequence length.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.visible_items == 0 {
            return Err(SettingsError::ZeroVisibleItems);
        }
        if self.transition_duration.is_zero() {
            return Err(SettingsError::ZeroTransitionDuration);
        }
        if self.clone_assist_factor == 0 {
            return Err(SettingsError::ZeroCloneAssistFactor);
        }
        Ok(())
    }

    /// [`validate`](Self::validate), then refuse infinite clone pools
    /// larger than [`defaults::MAX_RENDERED_SLOTS`] for `len` items.
    pub fn validate_for(&self, len: usize) -> Result<(), SettingsError> {
        self.validate()?;
        let slots = self.space_for(len).slot_count();
        if self.wrap_mode.is_infinite() && slots > defaults::MAX_RENDERED_SLOTS
        {
            return Err(SettingsError::OversizedPool {
                slots,
                limit: defaults::MAX_RENDERED_SLOTS,
            });
        }
        Ok(())
    }

    /// Effective flick cap for a sequence of `len` items.
    pub fn max_speed_for(&self, len: usize) -> usize {
        self.max_speed.unwrap_or(len / 2)
    }

    /// Track geometry these settings produce over `len` items.
    pub fn space_for(&self, len: usize) -> ExtendedSpace {
        let copies = copies_per_side(
            len,
            self.visible_items,
            self.max_speed_for(len),
            self.clone_assist_factor,
        );
        ExtendedSpace::new(len, self.wrap_mode, self.visible_items, copies)
    }
}

/// Measured geometry of the track container.
///
/// Refreshed by the host on mount and resize; every projection reads it.
/// A width of zero means "not measured yet" and projects to zero offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct MeasuredLayout {
    viewport_width: f32,
}

impl MeasuredLayout {
    /// Negative and non-finite widths are stored as unmeasured.
    pub fn new(viewport_width: f32) -> Self {
        let viewport_width =
            if viewport_width.is_finite() && viewport_width > 0.0 {
                viewport_width
            } else {
                0.0
            };
        Self { viewport_width }
    }

    /// Layout before the first measurement.
    pub fn unmeasured() -> Self {
        Self::default()
    }

    /// Container width in pixels; 0 when unmeasured.
    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// True once a positive width has been recorded.
    pub fn is_measured(&self) -> bool {
        self.viewport_width > 0.0
    }

    /// Pixel width of one visible item.
    #[inline]
    pub fn slot_width(&self, visible_items: usize) -> f32 {
        if visible_items == 0 {
            return 0.0;
        }
        self.viewport_width / visible_items as f32
    }
}
