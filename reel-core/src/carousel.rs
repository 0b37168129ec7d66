//! Carousel: the index machine, gesture translator, and projector behind a
//! single message/update interface.
//!
//! Every message is applied atomically and returns an [`Update`]: the new
//! committed frame (when committed state changed), the live drag offset
//! (while a drag is held), and at most one [`Effect`] for the host's timer.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::{
    error::SettingsError,
    gesture::{DragFrame, GestureTranslator},
    index::{
        ExtendedSpace, IndexMachine, Settle, Transition, TransitionEnd,
        TransitionTicket,
    },
    messages::CarouselMessage,
    projector::{Projector, TrackFrame, TrackSlot, slot_plan},
    types::{CarouselSettings, MeasuredLayout},
};

/// Follow-up work the host must schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to schedule.
    None,
    /// Arm the fallback timer for `ticket`, replacing any pending one.
    ScheduleFallback {
        /// Move the timer ends.
        ticket: TransitionTicket,
        /// Delay before it fires.
        after: Duration,
    },
    /// Disarm the pending fallback timer.
    CancelFallback,
}

/// Outcome of applying one message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Update {
    /// Committed render instruction, present when committed state changed.
    pub frame: Option<TrackFrame>,
    /// Ephemeral per-frame drag offset, present while a drag is held.
    pub live_offset: Option<f32>,
    /// Timer work for the host.
    pub effect: Effect,
}

impl Update {
    fn none() -> Self {
        Self {
            frame: None,
            live_offset: None,
            effect: Effect::None,
        }
    }

    fn committed(frame: TrackFrame, effect: Effect) -> Self {
        Self {
            frame: Some(frame),
            live_offset: None,
            effect,
        }
    }

    /// True when the message changed nothing.
    pub fn is_noop(&self) -> bool {
        self.frame.is_none()
            && self.live_offset.is_none()
            && self.effect == Effect::None
    }
}

/// One carousel: committed state, drag state, and measured layout.
#[derive(Debug, Clone)]
pub struct Carousel {
    len: usize,
    settings: CarouselSettings,
    layout: MeasuredLayout,
    machine: IndexMachine,
    translator: GestureTranslator,
    projector: Projector,
    dragging: bool,
}

impl Carousel {
    /// Mount a carousel over `len` items. An empty sequence is accepted and
    /// behaves as an inert carousel.
    pub fn new(
        len: usize,
        settings: CarouselSettings,
    ) -> Result<Self, SettingsError> {
        settings.validate_for(len)?;
        let space = settings.space_for(len);
        let machine =
            IndexMachine::new(space, settings.guard_during_transition);
        debug!(
            len,
            wrap_mode = ?settings.wrap_mode,
            visible_items = settings.visible_items,
            copies_per_side = space.copies_before(),
            initial_index = machine.current_index(),
            "carousel mounted"
        );
        Ok(Self {
            len,
            settings,
            layout: MeasuredLayout::unmeasured(),
            machine,
            translator: GestureTranslator::new(settings.max_speed_for(len)),
            projector: Projector::new(
                settings.transition_duration,
                settings.easing,
            ),
            dragging: false,
        })
    }

    /// Number of items in the sequence.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for an inert carousel over no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Active settings, including any runtime `visible_items` change.
    pub fn settings(&self) -> &CarouselSettings {
        &self.settings
    }

    /// Last measured layout.
    pub fn layout(&self) -> &MeasuredLayout {
        &self.layout
    }

    /// Current track geometry.
    pub fn space(&self) -> &ExtendedSpace {
        self.machine.space()
    }

    /// Committed index in the extended space.
    pub fn current_index(&self) -> i64 {
        self.machine.current_index()
    }

    /// Slide at the leading edge.
    pub fn logical_index(&self) -> usize {
        self.machine.logical_index()
    }

    /// True while a committed move is animating.
    pub fn is_transitioning(&self) -> bool {
        self.machine.is_transitioning()
    }

    /// True while the pointer is held.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Pixel width of one item slot; 0 until measured.
    pub fn slot_width(&self) -> f32 {
        self.layout.slot_width(self.settings.visible_items)
    }

    /// Current committed render instruction.
    pub fn frame(&self) -> TrackFrame {
        self.projector.frame(
            self.machine.current_index(),
            self.machine.logical_index(),
            &self.layout,
            self.settings.visible_items,
            self.machine.is_transitioning(),
            self.dragging,
        )
    }

    /// Slots the renderer must materialize.
    pub fn slots(&self) -> Vec<TrackSlot> {
        slot_plan(self.machine.space())
    }

    /// Apply one message.
    pub fn update(&mut self, message: CarouselMessage) -> Update {
        match message {
            CarouselMessage::Prev => {
                let transition = self.machine.prev();
                self.after_command(transition)
            }
            CarouselMessage::Next => {
                let transition = self.machine.next();
                self.after_command(transition)
            }
            CarouselMessage::GoTo(logical) => {
                let transition = self.machine.go_to(logical);
                self.after_command(transition)
            }
            CarouselMessage::Drag(frame) => self.drag(frame),
            CarouselMessage::Measured(width) => self.measured(width),
            CarouselMessage::SetVisibleItems(visible_items) => {
                self.set_visible_items(visible_items)
            }
            CarouselMessage::TransitionEnd(end) => self.transition_end(end),
        }
    }

    fn after_command(&mut self, transition: Transition) -> Update {
        match transition {
            Transition::Started { ticket, .. } => Update::committed(
                self.frame(),
                Effect::ScheduleFallback {
                    ticket,
                    after: self.projector.duration(),
                },
            ),
            Transition::Ignored(reason) => {
                trace!(?reason, "command ignored");
                Update::none()
            }
        }
    }

    fn drag(&mut self, frame: DragFrame) -> Update {
        let slot_width = self.slot_width();
        let current = self.machine.current_index();

        if frame.held {
            let starting = !self.dragging;
            self.dragging = true;
            let live = self.translator.preview(current, slot_width, &frame);
            return Update {
                frame: starting.then(|| self.frame()),
                live_offset: Some(live),
                effect: Effect::None,
            };
        }

        self.dragging = false;
        let resolution = self.translator.resolve(current, slot_width, &frame);
        match self.machine.commit(resolution.target) {
            Transition::Ignored(reason) => {
                trace!(?reason, "drag release ignored");
                Update::committed(self.frame(), Effect::None)
            }
            started => self.after_command(started),
        }
    }

    fn measured(&mut self, width: f32) -> Update {
        let layout = MeasuredLayout::new(width);
        if layout == self.layout {
            return Update::none();
        }
        debug!(viewport_width = layout.viewport_width(), "layout measured");
        self.layout = layout;
        Update::committed(self.frame(), Effect::None)
    }

    fn set_visible_items(&mut self, visible_items: usize) -> Update {
        if visible_items == 0 {
            warn!("ignoring visible_items = 0");
            return Update::none();
        }
        if visible_items == self.settings.visible_items {
            return Update::none();
        }
        let settings = self.settings.with_visible_items(visible_items);
        if let Err(err) = settings.validate_for(self.len) {
            warn!(visible_items, %err, "ignoring visible_items change");
            return Update::none();
        }
        self.settings = settings;
        self.machine.reshape(settings.space_for(self.len));
        Update::committed(self.frame(), Effect::None)
    }

    fn transition_end(&mut self, end: TransitionEnd) -> Update {
        match self.machine.end_transition(end) {
            Settle::Settled { .. } => {
                let effect = match end {
                    TransitionEnd::Rendered => Effect::CancelFallback,
                    TransitionEnd::Fallback(_) => Effect::None,
                };
                Update::committed(self.frame(), effect)
            }
            Settle::AlreadyIdle | Settle::Stale { .. } => Update::none(),
        }
    }
}
