use thiserror::Error;

/// Rejected carousel settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// `visible_items` was 0.
    #[error("visible_items must be at least 1")]
    ZeroVisibleItems,

    /// `transition_duration` was zero.
    #[error("transition duration must be greater than zero")]
    ZeroTransitionDuration,

    /// `clone_assist_factor` was 0.
    #[error("clone_assist_factor must be at least 1")]
    ZeroCloneAssistFactor,

    /// An infinite clone pool would exceed `limit` rendered slots.
    #[error(
        "clone pool would render {slots} slots (limit {limit}); \
         lower max_speed or clone_assist_factor"
    )]
    OversizedPool {
        /// Slots the pool would need.
        slots: usize,
        /// Largest pool allowed.
        limit: usize,
    },
}

/// Failures talking to a spawned carousel runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The runtime task stopped or every receiver is gone.
    #[error("carousel runtime has shut down")]
    Closed,

    /// The runtime task panicked or was aborted.
    #[error("carousel runtime task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Result of talking to a carousel runtime.
pub type Result<T> = std::result::Result<T, RuntimeError>;
