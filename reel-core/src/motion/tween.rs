//! Time-based tween between two committed track offsets.

use std::time::{Duration, Instant};

use super::easing::Easing;

/// Eased interpolation of the track offset.
#[derive(Debug, Clone)]
pub struct TrackTween {
    active: bool,
    from: f32,
    to: f32,
    started_at: Instant,
    duration: Duration,
    easing: Easing,
}

impl Default for TrackTween {
    fn default() -> Self {
        Self {
            active: false,
            from: 0.0,
            to: 0.0,
            started_at: Instant::now(),
            duration: Duration::from_millis(
                crate::types::defaults::TRANSITION_DURATION_MS,
            ),
            easing: Easing::default(),
        }
    }
}

impl TrackTween {
    /// An idle tween at offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the current animation completes.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Offset the tween is heading to.
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Animate from `from` to `to`.
    pub fn start(
        &mut self,
        from: f32,
        to: f32,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) {
        self.active = true;
        self.from = from;
        self.to = to;
        self.started_at = now;
        self.duration = duration;
        self.easing = easing;
    }

    /// Restart toward `to` from wherever the current animation is at `now`.
    pub fn retarget(
        &mut self,
        to: f32,
        duration: Duration,
        easing: Easing,
        now: Instant,
    ) {
        let from = if self.active {
            self.offset_at(now)
        } else {
            self.to
        };
        self.start(from, to, duration, easing, now);
    }

    /// Jump to `offset` without animating.
    pub fn snap(&mut self, offset: f32) {
        self.active = false;
        self.from = offset;
        self.to = offset;
    }

    /// Returns Some(offset) while animating, including the final frame that
    /// lands exactly on the target. Returns None once finished or inactive.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        if !self.active {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            self.active = false;
            return Some(self.to);
        }
        Some(self.offset_at(now))
    }

    /// Stop animating where the tween is now.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    fn offset_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32())
            .clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }
}
