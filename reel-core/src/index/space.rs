//! Extended index space: the clone-padded track the committed index addresses.

use std::ops::RangeInclusive;

use crate::types::WrapMode;

/// Geometry of the concatenated track.
///
/// Finite carousels render a single copy of the sequence. Infinite carousels
/// render `copies_before` clones, the canonical copy, and `copies_before`
/// clones again, so the canonical block starts at `len * copies_before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedSpace {
    len: usize,
    wrap_mode: WrapMode,
    visible_items: usize,
    copies_before: usize,
}

impl ExtendedSpace {
    /// Geometry for `len` items. Finite spaces ignore `copies_before`.
    pub fn new(
        len: usize,
        wrap_mode: WrapMode,
        visible_items: usize,
        copies_before: usize,
    ) -> Self {
        let copies_before = if wrap_mode.is_infinite() {
            copies_before.max(1)
        } else {
            0
        };
        Self {
            len,
            wrap_mode,
            visible_items: visible_items.max(1),
            copies_before,
        }
    }

    /// Sequence length.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn wrap_mode(&self) -> WrapMode {
        self.wrap_mode
    }

    /// Items shown per page.
    pub fn visible_items(&self) -> usize {
        self.visible_items
    }

    /// Clone copies placed before (and after) the canonical block.
    pub fn copies_before(&self) -> usize {
        self.copies_before
    }

    /// Copies of the sequence materialized on the track.
    pub fn total_copies(&self) -> usize {
        self.copies_before.saturating_mul(2).saturating_add(1)
    }

    /// Number of item slots on the track.
    pub fn slot_count(&self) -> usize {
        self.len.saturating_mul(self.total_copies())
    }

    /// First index of the canonical block.
    pub fn canonical_base(&self) -> i64 {
        to_index(self.len.saturating_mul(self.copies_before))
    }

    /// Index a freshly mounted carousel starts at.
    pub fn initial_index(&self) -> i64 {
        self.canonical_base()
    }

    /// Map any index back into the canonical block.
    ///
    /// Idempotent: re-homing a re-homed index returns it unchanged.
    pub fn rehome(&self, index: i64) -> i64 {
        if self.len == 0 {
            return 0;
        }
        index
            .rem_euclid(to_index(self.len))
            .saturating_add(self.canonical_base())
    }

    /// Logical slide shown at the leading edge for `index`.
    pub fn logical(&self, index: i64) -> usize {
        if self.len == 0 {
            return 0;
        }
        index.rem_euclid(to_index(self.len)) as usize
    }

    /// True when `index` lies in the canonical block.
    pub fn is_canonical(&self, index: i64) -> bool {
        let base = self.canonical_base();
        index >= base && index < base.saturating_add(to_index(self.len))
    }

    /// Committed indices that keep a full page of rendered slots in view.
    ///
    /// Finite: `0..=len - visible_items`, saturating at 0 when more items
    /// are visible than exist. Infinite: the whole rendered pool.
    pub fn bounds(&self) -> RangeInclusive<i64> {
        let addressable = match self.wrap_mode {
            WrapMode::Finite => self.len,
            WrapMode::Infinite => self.slot_count(),
        };
        0..=to_index(addressable.saturating_sub(self.visible_items))
    }

    /// Pull `index` into [`bounds`](Self::bounds).
    pub fn clamp(&self, index: i64) -> i64 {
        let bounds = self.bounds();
        index.clamp(*bounds.start(), *bounds.end())
    }

    /// Same space with a different page width, keeping the pool size.
    pub fn with_visible_items(&self, visible_items: usize) -> Self {
        Self::new(self.len, self.wrap_mode, visible_items, self.copies_before)
    }
}

/// Track positions are `i64`; counts beyond that range pin to the maximum.
pub(crate) fn to_index(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
