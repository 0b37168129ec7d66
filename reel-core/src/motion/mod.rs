//! Easing curves and a time-based tween for hosts that animate the committed
//! track offset themselves instead of delegating to a native transition.

/// Curves and their CSS forms.
pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::TrackTween;
