/// Easing curve applied to an animated track move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Quick start, gentle stop.
    EaseOutQuad,
    /// Stronger deceleration than quadratic.
    EaseOutCubic,
    /// Slow start and end; the default.
    #[default]
    EaseInOutCubic,
    /// Sharpest deceleration.
    EaseOutQuart,
}

impl Easing {
    /// Apply the curve to a progress value in `0.0..=1.0`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
        }
    }

    /// CSS `transition-timing-function` equivalent, for hosts that hand the
    /// animation to a browser-style renderer.
    pub fn css_timing_function(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOutQuad => "cubic-bezier(0.5, 1, 0.89, 1)",
            Easing::EaseOutCubic => "cubic-bezier(0.33, 1, 0.68, 1)",
            Easing::EaseInOutCubic => "cubic-bezier(0.65, 0, 0.35, 1)",
            Easing::EaseOutQuart => "cubic-bezier(0.25, 1, 0.5, 1)",
        }
    }
}
