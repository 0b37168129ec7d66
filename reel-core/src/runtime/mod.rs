//! Tokio driver for one carousel.
//!
//! A single task owns the [`Carousel`] and drains one command at a time, so
//! state mutations from different events never interleave. The only
//! background work is the fallback timer: a cancellable sleep armed for the
//! active transition ticket that feeds `TransitionEnd::Fallback` back into
//! the same queue. Committed frames and live drag offsets are published on
//! two separate `watch` channels.

/// Async entry point for hosts.
pub mod handle;

use std::time::Duration;

use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::{
    carousel::{Carousel, Effect},
    index::{TransitionEnd, TransitionTicket},
    messages::CarouselMessage,
    projector::TrackFrame,
};

pub use handle::CarouselHandle;

/// Queue depth between handles and the runtime task.
pub const COMMAND_BUFFER: usize = 64;

/// Point-in-time view of the carousel, answered in queue order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselStatus {
    /// Committed index in the extended space.
    pub index: i64,
    /// Slide at the leading edge.
    pub logical_index: usize,
    /// A move is animating.
    pub transitioning: bool,
    /// The pointer is held.
    pub dragging: bool,
    /// Last committed frame.
    pub frame: TrackFrame,
    /// Ticket the armed fallback timer will end, if any.
    pub pending_fallback: Option<TransitionTicket>,
}

#[derive(Debug)]
pub(crate) enum Command {
    Apply(CarouselMessage),
    Inspect(oneshot::Sender<CarouselStatus>),
}

#[derive(Debug)]
struct PendingFallback {
    ticket: TransitionTicket,
    cancel: CancellationToken,
}

/// Owner of one carousel inside a tokio task.
#[derive(Debug)]
pub struct CarouselRuntime {
    carousel: Carousel,
    commands: mpsc::Receiver<Command>,
    requeue: mpsc::WeakSender<Command>,
    frames: watch::Sender<TrackFrame>,
    live: watch::Sender<Option<f32>>,
    shutdown: CancellationToken,
    fallback: Option<PendingFallback>,
}

impl CarouselRuntime {
    /// Spawn the runtime task. The join handle yields the carousel back once
    /// every handle is dropped or [`CarouselHandle::shutdown`] is called.
    pub fn spawn(carousel: Carousel) -> (CarouselHandle, JoinHandle<Carousel>) {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (frames, frames_rx) = watch::channel(carousel.frame());
        let (live, live_rx) = watch::channel(None);
        let shutdown = CancellationToken::new();

        let runtime = Self {
            carousel,
            commands,
            requeue: tx.downgrade(),
            frames,
            live,
            shutdown: shutdown.clone(),
            fallback: None,
        };
        let task = tokio::spawn(runtime.run());
        let handle = CarouselHandle::new(tx, frames_rx, live_rx, shutdown);
        (handle, task)
    }

    /// Wait for a spawned runtime to stop and take its carousel back.
    pub async fn join(
        task: JoinHandle<Carousel>,
    ) -> crate::error::Result<Carousel> {
        Ok(task.await?)
    }

    async fn run(mut self) -> Carousel {
        debug!(len = self.carousel.len(), "carousel runtime started");
        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                command = self.commands.recv() => match command {
                    Some(Command::Apply(message)) => self.apply(message),
                    Some(Command::Inspect(reply)) => {
                        // Receiver may have given up waiting.
                        let _ = reply.send(self.status());
                    }
                    None => break,
                },
            }
        }
        self.disarm();
        debug!(
            index = self.carousel.current_index(),
            "carousel runtime stopped"
        );
        self.carousel
    }

    fn apply(&mut self, message: CarouselMessage) {
        if let CarouselMessage::TransitionEnd(TransitionEnd::Fallback(ticket)) =
            message
            && self.fallback.as_ref().is_some_and(|p| p.ticket == ticket)
        {
            self.fallback = None;
        }

        let update = self.carousel.update(message);

        if let Some(frame) = update.frame {
            self.frames.send_replace(frame);
        }
        match update.live_offset {
            Some(offset) => {
                self.live.send_replace(Some(offset));
            }
            None if !self.carousel.is_dragging() => {
                self.live.send_if_modified(|live| live.take().is_some());
            }
            None => {}
        }

        match update.effect {
            Effect::ScheduleFallback { ticket, after } => {
                self.arm(ticket, after)
            }
            Effect::CancelFallback => self.disarm(),
            Effect::None => {}
        }
    }

    fn arm(&mut self, ticket: TransitionTicket, after: Duration) {
        self.disarm();
        let cancel = self.shutdown.child_token();
        let token = cancel.clone();
        let requeue = self.requeue.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(after) => {
                    let Some(tx) = requeue.upgrade() else {
                        return;
                    };
                    let end = TransitionEnd::Fallback(ticket);
                    let message = CarouselMessage::TransitionEnd(end);
                    if tx.send(Command::Apply(message)).await.is_err() {
                        trace!(%ticket, "runtime gone before fallback fired");
                    }
                }
            }
        });
        trace!(%ticket, ?after, "fallback armed");
        self.fallback = Some(PendingFallback { ticket, cancel });
    }

    fn disarm(&mut self) {
        if let Some(pending) = self.fallback.take() {
            pending.cancel.cancel();
            trace!(ticket = %pending.ticket, "fallback disarmed");
        }
    }

    fn status(&self) -> CarouselStatus {
        CarouselStatus {
            index: self.carousel.current_index(),
            logical_index: self.carousel.logical_index(),
            transitioning: self.carousel.is_transitioning(),
            dragging: self.carousel.is_dragging(),
            frame: self.carousel.frame(),
            pending_fallback: self.fallback.as_ref().map(|p| p.ticket),
        }
    }
}
