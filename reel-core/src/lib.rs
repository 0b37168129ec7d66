//! Index and motion core for sliding carousels.
//!
//! The crate keeps the parts of a carousel that are easy to get subtly wrong
//! and separates them from rendering:
//!
//! - [`index`]: the committed position, the transition phase, and the
//!   clone-space re-homing that makes infinite wraparound seamless.
//! - [`gesture`]: drag preview offsets and release resolution, including the
//!   velocity-amplified slide jump.
//! - [`projector`]: pure projection of committed state into a track offset,
//!   a transition style, and the clone-pool slot plan.
//!
//! [`Carousel`] ties the three together behind a message/update interface,
//! and [`runtime`] drives one carousel on tokio with the fallback timer and
//! the two output channels (committed frames and live drag offsets).

pub mod carousel;
/// Error types.
pub mod error;
pub mod gesture;
pub mod index;
pub mod messages;
pub mod motion;
pub mod projector;
pub mod runtime;
pub mod types;

pub use carousel::{Carousel, Effect, Update};
pub use error::{RuntimeError, SettingsError};
pub use gesture::{DragFrame, DragResolution, GestureTranslator};
pub use index::{
    ExtendedSpace, IndexMachine, Settle, Transition, TransitionEnd,
    TransitionTicket,
};
pub use messages::CarouselMessage;
pub use motion::{Easing, TrackTween};
pub use projector::{Projector, TrackFrame, TrackSlot, TransitionStyle};
pub use runtime::{CarouselHandle, CarouselRuntime, CarouselStatus};
pub use types::{CarouselSettings, MeasuredLayout, WrapMode};
