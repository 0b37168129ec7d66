//! Inbound events for a carousel.

use crate::{gesture::DragFrame, index::TransitionEnd};

/// Everything a carousel reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselMessage {
    // Navigation
    /// Step back one item.
    Prev,
    /// Step forward one item.
    Next,
    /// Jump to a logical slide.
    GoTo(usize),

    // Pointer / touch
    /// A held or released pointer frame.
    Drag(DragFrame),

    // Layout
    /// Container width in pixels, on mount and resize.
    Measured(f32),
    /// Change the page width at runtime.
    SetVisibleItems(usize),

    // Renderer acknowledgement or fallback timer
    /// End of the animating move.
    TransitionEnd(TransitionEnd),
}
