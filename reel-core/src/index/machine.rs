//! Committed index and the Idle/Transitioning phase machine.

use std::fmt;

use tracing::{debug, trace};

use super::space::{ExtendedSpace, to_index};

/// Identifies one animated move. A fallback timer carries the ticket of the
/// move it was armed for, so a timer that outlives its move is recognized
/// as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TransitionTicket(u64);

impl TransitionTicket {
    /// Raw ticket number; increases with every move.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TransitionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether a committed move is animating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing animating; the index is canonical.
    Idle,
    /// Animating the move identified by the ticket.
    Transitioning(TransitionTicket),
}

/// The two events that may end a transition. Whichever arrives first wins;
/// the other becomes a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum TransitionEnd {
    /// The renderer finished animating the track.
    Rendered,
    /// The fallback timer armed for this ticket elapsed.
    Fallback(TransitionTicket),
}

/// Why a command left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// The sequence has no items.
    Empty,
    /// A move is still animating and the command is guarded.
    Transitioning,
    /// Already at the first reachable index.
    AtStart,
    /// Already at the last reachable index.
    AtEnd,
}

/// Result of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A move began.
    Started {
        /// Index before the move.
        from: i64,
        /// Committed target.
        to: i64,
        /// Ticket a fallback timer must carry to end this move.
        ticket: TransitionTicket,
        /// Ticket of the move this one interrupted, if any.
        superseded: Option<TransitionTicket>,
    },
    /// State left untouched.
    Ignored(Ignored),
}

impl Transition {
    /// True when a move began.
    pub fn is_started(&self) -> bool {
        matches!(self, Transition::Started { .. })
    }

    /// Ticket of the move that began, if any.
    pub fn ticket(&self) -> Option<TransitionTicket> {
        match self {
            Transition::Started { ticket, .. } => Some(*ticket),
            Transition::Ignored(_) => None,
        }
    }
}

/// Result of a transition-end event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The active move ended and the index was re-homed.
    Settled {
        ticket: TransitionTicket,
        /// Index after re-homing.
        index: i64,
        /// Index before re-homing, when re-homing moved it.
        rehomed_from: Option<i64>,
    },
    /// Nothing was animating; duplicate end events land here.
    AlreadyIdle,
    /// A fallback armed for an older move fired after a newer one began.
    Stale {
        /// Ticket of the move still animating.
        current: TransitionTicket,
    },
}

/// Committed index plus the transition phase.
#[derive(Debug, Clone)]
pub struct IndexMachine {
    space: ExtendedSpace,
    current: i64,
    phase: Phase,
    issued: u64,
    guard_during_transition: bool,
}

impl IndexMachine {
    /// Idle machine at the space's initial index.
    pub fn new(space: ExtendedSpace, guard_during_transition: bool) -> Self {
        Self {
            space,
            current: space.initial_index(),
            phase: Phase::Idle,
            issued: 0,
            guard_during_transition,
        }
    }

    pub fn space(&self) -> &ExtendedSpace {
        &self.space
    }

    /// Committed index in the extended space.
    pub fn current_index(&self) -> i64 {
        self.current
    }

    /// Committed index reduced mod the sequence length.
    pub fn logical_index(&self) -> usize {
        self.space.logical(self.current)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a move is animating.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Transitioning(_))
    }

    /// Ticket of the animating move.
    pub fn active_ticket(&self) -> Option<TransitionTicket> {
        match self.phase {
            Phase::Transitioning(ticket) => Some(ticket),
            Phase::Idle => None,
        }
    }

    /// Step one item back. Always refused while a move is animating.
    pub fn prev(&mut self) -> Transition {
        if self.space.is_empty() {
            return Transition::Ignored(Ignored::Empty);
        }
        if self.is_transitioning() {
            return Transition::Ignored(Ignored::Transitioning);
        }
        if self.current <= *self.space.bounds().start() {
            return Transition::Ignored(Ignored::AtStart);
        }
        self.begin(self.current - 1)
    }

    /// Step one item forward. Refused while animating only when the
    /// transition guard is enabled.
    pub fn next(&mut self) -> Transition {
        if self.space.is_empty() {
            return Transition::Ignored(Ignored::Empty);
        }
        if self.guard_during_transition && self.is_transitioning() {
            return Transition::Ignored(Ignored::Transitioning);
        }
        if self.current >= *self.space.bounds().end() {
            return Transition::Ignored(Ignored::AtEnd);
        }
        self.begin(self.current + 1)
    }

    /// Commit an arbitrary target (a resolved drag). Never guarded: a release
    /// always starts a fresh move, even one that lands where it started.
    pub fn commit(&mut self, target: i64) -> Transition {
        if self.space.is_empty() {
            return Transition::Ignored(Ignored::Empty);
        }
        let to = self.space.clamp(target);
        if to != target {
            debug!(
                requested = target,
                clamped = to,
                "target clamped to track bounds"
            );
        }
        self.begin(to)
    }

    /// Move to a logical slide. Infinite carousels take the shorter way
    /// around; finite carousels clamp to the last full page.
    pub fn go_to(&mut self, logical: usize) -> Transition {
        if self.space.is_empty() {
            return Transition::Ignored(Ignored::Empty);
        }
        if self.guard_during_transition && self.is_transitioning() {
            return Transition::Ignored(Ignored::Transitioning);
        }
        let len = self.space.len();
        let target = if self.space.wrap_mode().is_infinite() {
            let from = self.space.logical(self.current);
            let mut delta = to_index((logical % len + len - from) % len);
            if delta > to_index(len / 2) {
                delta -= to_index(len);
            }
            self.current.saturating_add(delta)
        } else {
            to_index(logical)
        };
        self.begin(self.space.clamp(target))
    }

    /// End the active move and silently re-home into the canonical block.
    pub fn end_transition(&mut self, end: TransitionEnd) -> Settle {
        let Phase::Transitioning(active) = self.phase else {
            trace!(?end, "transition end while idle ignored");
            return Settle::AlreadyIdle;
        };
        if let TransitionEnd::Fallback(ticket) = end
            && ticket != active
        {
            trace!(%ticket, %active, "stale fallback ignored");
            return Settle::Stale { current: active };
        }

        self.phase = Phase::Idle;
        let rehomed_from = self.rehome();
        debug!(
            ticket = %active,
            ?end,
            index = self.current,
            ?rehomed_from,
            "transition settled"
        );
        Settle::Settled {
            ticket: active,
            index: self.current,
            rehomed_from,
        }
    }

    /// Apply the re-homing rule. Only acts while idle; returns the previous
    /// index when the position actually moved.
    pub fn rehome(&mut self) -> Option<i64> {
        if self.is_transitioning() {
            return None;
        }
        let rehomed = self.space.rehome(self.current);
        if rehomed == self.current {
            return None;
        }
        let previous = self.current;
        self.current = rehomed;
        Some(previous)
    }

    /// Swap in a new track geometry (page width or pool size changed).
    ///
    /// The position relative to the canonical block is kept and re-clamped
    /// immediately; when idle it is also re-homed.
    pub fn reshape(&mut self, space: ExtendedSpace) {
        let relative = self.current - self.space.canonical_base();
        self.space = space;
        self.current = space.clamp(space.canonical_base() + relative);
        if !self.is_transitioning() {
            self.current = space.clamp(space.rehome(self.current));
        }
        debug!(
            index = self.current,
            visible_items = space.visible_items(),
            copies_before = space.copies_before(),
            "track reshaped"
        );
    }

    fn begin(&mut self, to: i64) -> Transition {
        let superseded = self.active_ticket();
        self.issued += 1;
        let ticket = TransitionTicket(self.issued);
        let from = self.current;
        self.current = to;
        self.phase = Phase::Transitioning(ticket);
        debug!(from, to, %ticket, ?superseded, "transition started");
        Transition::Started {
            from,
            to,
            ticket,
            superseded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WrapMode;

    fn finite(len: usize, visible: usize) -> IndexMachine {
        IndexMachine::new(
            ExtendedSpace::new(len, WrapMode::Finite, visible, 0),
            true,
        )
    }

    fn infinite(len: usize) -> IndexMachine {
        IndexMachine::new(
            ExtendedSpace::new(len, WrapMode::Infinite, 1, 1),
            true,
        )
    }

    fn settle(machine: &mut IndexMachine) -> Settle {
        machine.end_transition(TransitionEnd::Rendered)
    }

    #[test]
    fn finite_next_walks_to_last_page_then_stops() {
        let mut m = finite(5, 1);
        for expected in 1..=4 {
            assert!(m.next().is_started());
            settle(&mut m);
            assert_eq!(m.current_index(), expected);
        }
        assert_eq!(m.next(), Transition::Ignored(Ignored::AtEnd));
        assert_eq!(m.current_index(), 4);
        assert!(!m.is_transitioning());
    }

    #[test]
    fn finite_prev_at_zero_is_noop() {
        let mut m = finite(5, 1);
        assert_eq!(m.prev(), Transition::Ignored(Ignored::AtStart));
        assert_eq!(m.current_index(), 0);
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn finite_last_page_respects_visible_items() {
        let mut m = finite(5, 3);
        m.next();
        settle(&mut m);
        m.next();
        settle(&mut m);
        assert_eq!(m.current_index(), 2);
        assert_eq!(m.next(), Transition::Ignored(Ignored::AtEnd));
    }

    #[test]
    fn prev_is_always_guarded() {
        let mut m = IndexMachine::new(
            ExtendedSpace::new(5, WrapMode::Infinite, 1, 1),
            false,
        );
        assert!(m.next().is_started());
        assert_eq!(m.prev(), Transition::Ignored(Ignored::Transitioning));
    }

    #[test]
    fn guarded_next_refuses_while_animating() {
        let mut m = infinite(5);
        assert!(m.next().is_started());
        assert_eq!(m.next(), Transition::Ignored(Ignored::Transitioning));
        assert_eq!(m.current_index(), 6);
    }

    #[test]
    fn unguarded_next_stacks_moves_and_supersedes_tickets() {
        let mut m = IndexMachine::new(
            ExtendedSpace::new(5, WrapMode::Infinite, 1, 1),
            false,
        );
        let first = m.next().ticket().expect("first move");
        match m.next() {
            Transition::Started {
                to, superseded, ..
            } => {
                assert_eq!(to, 7);
                assert_eq!(superseded, Some(first));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unguarded_burst_stops_at_pool_end() {
        let mut m = IndexMachine::new(
            ExtendedSpace::new(3, WrapMode::Infinite, 1, 1),
            false,
        );
        for _ in 0..20 {
            m.next();
        }
        assert_eq!(m.current_index(), 8);
        assert_eq!(m.next(), Transition::Ignored(Ignored::AtEnd));
    }

    #[test]
    fn infinite_wrap_rehomes_on_settle() {
        let mut m = infinite(5);
        assert_eq!(m.current_index(), 5);
        m.prev();
        assert_eq!(m.current_index(), 4);
        match settle(&mut m) {
            Settle::Settled {
                index,
                rehomed_from,
                ..
            } => {
                assert_eq!(index, 9);
                assert_eq!(rehomed_from, Some(4));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(m.logical_index(), 4);
    }

    #[test]
    fn second_end_event_is_noop() {
        let mut m = infinite(5);
        let ticket = m.next().ticket().expect("started");
        assert!(matches!(settle(&mut m), Settle::Settled { .. }));
        assert_eq!(
            m.end_transition(TransitionEnd::Fallback(ticket)),
            Settle::AlreadyIdle
        );
    }

    #[test]
    fn stale_fallback_does_not_end_newer_move() {
        let mut m = IndexMachine::new(
            ExtendedSpace::new(5, WrapMode::Infinite, 1, 1),
            false,
        );
        let old = m.next().ticket().expect("first");
        let new = m.next().ticket().expect("second");
        assert_eq!(
            m.end_transition(TransitionEnd::Fallback(old)),
            Settle::Stale { current: new }
        );
        assert!(m.is_transitioning());
        assert!(matches!(
            m.end_transition(TransitionEnd::Fallback(new)),
            Settle::Settled { .. }
        ));
    }

    #[test]
    fn commit_clamps_finite_targets() {
        let mut m = finite(5, 1);
        m.commit(12);
        assert_eq!(m.current_index(), 4);
        settle(&mut m);
        m.commit(-3);
        assert_eq!(m.current_index(), 0);
    }

    #[test]
    fn commit_to_same_index_still_transitions() {
        let mut m = finite(5, 1);
        assert!(m.commit(0).is_started());
        assert!(m.is_transitioning());
    }

    #[test]
    fn go_to_takes_short_way_around() {
        let mut m = infinite(5);
        // logical 0 -> logical 4 is one step back.
        m.go_to(4);
        assert_eq!(m.current_index(), 4);
        settle(&mut m);
        assert_eq!(m.current_index(), 9);
        m.go_to(1);
        assert_eq!(m.current_index(), 11);
    }

    #[test]
    fn go_to_past_the_end_lands_on_last_page() {
        let mut m = finite(5, 2);
        m.go_to(usize::MAX);
        assert_eq!(m.current_index(), 3);
    }

    #[test]
    fn go_to_reduces_huge_logical_indices() {
        let mut m = infinite(5);
        // usize::MAX % 5 == 0: already on logical 0, so no distance to cover.
        m.go_to(usize::MAX);
        assert_eq!(m.current_index(), 5);
        settle(&mut m);
        m.go_to(usize::MAX - 1);
        assert_eq!(m.current_index(), 4);
    }

    #[test]
    fn empty_machine_ignores_everything() {
        let mut m = infinite(0);
        assert_eq!(m.next(), Transition::Ignored(Ignored::Empty));
        assert_eq!(m.prev(), Transition::Ignored(Ignored::Empty));
        assert_eq!(m.commit(3), Transition::Ignored(Ignored::Empty));
        assert_eq!(m.go_to(0), Transition::Ignored(Ignored::Empty));
        assert_eq!(m.current_index(), 0);
    }

    #[test]
    fn reshape_reclamps_finite_index() {
        let mut m = finite(5, 1);
        m.commit(4);
        settle(&mut m);
        m.reshape(ExtendedSpace::new(5, WrapMode::Finite, 3, 0));
        assert_eq!(m.current_index(), 2);
    }

    #[test]
    fn reshape_keeps_logical_slide_when_pool_grows() {
        let mut m = infinite(5);
        m.next();
        settle(&mut m);
        assert_eq!(m.logical_index(), 1);
        m.reshape(ExtendedSpace::new(5, WrapMode::Infinite, 1, 2));
        assert_eq!(m.current_index(), 11);
        assert_eq!(m.logical_index(), 1);
    }
}
