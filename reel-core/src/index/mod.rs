//! Index State Machine
//!
//! Owns the committed index in the extended (clone-padded) space, the
//! Idle/Transitioning phase, and the re-homing rule that snaps the index
//! back into the canonical block once nothing is animating.

pub mod machine;
pub mod space;

pub use machine::{
    Ignored, IndexMachine, Phase, Settle, Transition, TransitionEnd,
    TransitionTicket,
};
pub use space::ExtendedSpace;
