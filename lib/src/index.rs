use crate::prelude::*;

use std::cmp::Ordering;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering::Relaxed;
use derive_more::From;

// ==============
// === XIndex ===
// ==============

#[derive(Clone, Copy, Debug, Deref, Default, From, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct XIndex(pub usize);

// ==============
// === YIndex ===
// ==============

#[derive(Clone, Copy, Debug, Deref, Default, From, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct YIndex(pub usize);

// ==============
// === GridId ===
// ==============

static NEXT_GRID_ID: AtomicUsize = AtomicUsize::new(0);

/// Every constructed or cloned grid receives a fresh id, even when its contents equal another's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridId(usize);

impl GridId {
    pub(crate) fn next() -> Self {
        Self(NEXT_GRID_ID.fetch_add(1, Relaxed))
    }
}

// ================
// === Position ===
// ================

/// A cell coordinate vetted by the grid that produced it.
///
/// Stored as the `(x, y)` pair. Row-major offsets are derived from it against the current width
/// on every use, since a stored offset would go stale once the X axis grows. Positions of
/// different grids are never equal and are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    grid: GridId,
    x: XIndex,
    y: YIndex,
}

impl Position {
    pub(crate) fn new(grid: GridId, x: XIndex, y: YIndex) -> Self {
        Self { grid, x, y }
    }

    pub fn grid(&self) -> GridId {
        self.grid
    }

    pub fn x(&self) -> XIndex {
        self.x
    }

    pub fn y(&self) -> YIndex {
        self.y
    }

    pub(crate) fn linear(self, width: usize) -> Option<usize> {
        self.y.0.checked_mul(width)?.checked_add(self.x.0)
    }

    pub(crate) fn with_linear(self, width: usize, linear: usize) -> Option<Self> {
        let x = linear.checked_rem(width)?;
        Some(Self { x: XIndex(x), y: YIndex(linear / width), ..self })
    }

    /// Moves `n` cells in row-major order within a grid of the given width. The result may lie
    /// past the last row, callers check it against the grid height.
    pub(crate) fn advanced(self, width: usize, n: isize) -> Option<Self> {
        let target = self.linear(width)?.checked_add_signed(n)?;
        self.with_linear(width, target)
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.grid == other.grid).then(|| (self.y, self.x).cmp(&(other.y, other.x)))
    }
}

// =============
// === Tests ===
// =============
