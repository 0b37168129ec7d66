/// Top-level config and its loaders.
pub mod reel;

pub use reel::{CarouselConfig, ConfigSource, ReelConfig, TrackConfig};
