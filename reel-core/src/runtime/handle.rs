use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

use super::{CarouselStatus, Command};
use crate::{
    error::{Result, RuntimeError},
    gesture::DragFrame,
    index::TransitionEnd,
    messages::CarouselMessage,
    projector::TrackFrame,
};

/// Cloneable sender side of a running carousel.
#[derive(Debug, Clone)]
pub struct CarouselHandle {
    commands: mpsc::Sender<Command>,
    frames: watch::Receiver<TrackFrame>,
    live: watch::Receiver<Option<f32>>,
    shutdown: CancellationToken,
}

impl CarouselHandle {
    pub(super) fn new(
        commands: mpsc::Sender<Command>,
        frames: watch::Receiver<TrackFrame>,
        live: watch::Receiver<Option<f32>>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            commands,
            frames,
            live,
            shutdown,
        }
    }

    /// Queue any message.
    pub async fn send(&self, message: CarouselMessage) -> Result<()> {
        self.commands
            .send(Command::Apply(message))
            .await
            .map_err(|_| RuntimeError::Closed)
    }

    /// Queue a step back.
    pub async fn prev(&self) -> Result<()> {
        self.send(CarouselMessage::Prev).await
    }

    /// Queue a step forward.
    pub async fn next(&self) -> Result<()> {
        self.send(CarouselMessage::Next).await
    }

    /// Queue a jump to a logical slide.
    pub async fn go_to(&self, logical: usize) -> Result<()> {
        self.send(CarouselMessage::GoTo(logical)).await
    }

    /// Queue a drag frame, held or released.
    pub async fn drag(&self, frame: DragFrame) -> Result<()> {
        self.send(CarouselMessage::Drag(frame)).await
    }

    /// Report the container width.
    pub async fn measured(&self, viewport_width: f32) -> Result<()> {
        self.send(CarouselMessage::Measured(viewport_width)).await
    }

    /// Change the page width.
    pub async fn set_visible_items(&self, visible_items: usize) -> Result<()> {
        self.send(CarouselMessage::SetVisibleItems(visible_items))
            .await
    }

    /// Renderer acknowledgement that the track finished animating.
    pub async fn transition_end(&self) -> Result<()> {
        self.send(CarouselMessage::TransitionEnd(TransitionEnd::Rendered))
            .await
    }

    /// State after every command queued before this call has been applied.
    pub async fn status(&self) -> Result<CarouselStatus> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(Command::Inspect(reply))
            .await
            .map_err(|_| RuntimeError::Closed)?;
        rx.await.map_err(|_| RuntimeError::Closed)
    }

    /// Latest committed frame.
    pub fn frame(&self) -> TrackFrame {
        *self.frames.borrow()
    }

    /// Committed frames; only changes on commands, settles, and layout.
    pub fn frames(&self) -> watch::Receiver<TrackFrame> {
        self.frames.clone()
    }

    /// Per-frame drag offsets; `None` while no drag is held.
    pub fn live_offsets(&self) -> watch::Receiver<Option<f32>> {
        self.live.clone()
    }

    /// True once the runtime can no longer receive commands.
    pub fn is_closed(&self) -> bool {
        self.commands.is_closed() || self.shutdown.is_cancelled()
    }

    /// Stop the runtime and disarm any pending fallback timer.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
