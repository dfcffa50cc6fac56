use crate::grid::LabeledGrid;
use crate::index::Position;
use std::iter::FusedIterator;

// ===============
// === Element ===
// ===============

/// One cell of the grid together with its two labels.
#[derive(Debug, PartialEq)]
pub struct Element<'a, T, X, Y> {
    pub item: Option<&'a T>,
    pub x_label: &'a X,
    pub y_label: &'a Y,
    pub position: Position,
}

impl<T, X, Y> Clone for Element<'_, T, X, Y> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, X, Y> Copy for Element<'_, T, X, Y> {}

// ============
// === Iter ===
// ============

/// Row-major walk over every cell of a grid: `y` outer, `x` inner, empty cells included.
pub struct Iter<'a, T, X, Y> {
    grid: &'a LabeledGrid<T, X, Y>,
    front: Option<Position>,
    back: Option<Position>,
    remaining: usize,
}

impl<'a, T, X, Y> Iter<'a, T, X, Y> {
    pub(crate) fn new(grid: &'a LabeledGrid<T, X, Y>) -> Self {
        let front = grid.first_position();
        let back = grid.last_position();
        let remaining = grid.len();
        Self { grid, front, back, remaining }
    }
}

impl<T, X, Y> Clone for Iter<'_, T, X, Y> {
    fn clone(&self) -> Self {
        Self { grid: self.grid, front: self.front, back: self.back, remaining: self.remaining }
    }
}

impl<'a, T, X, Y> Iterator for Iter<'a, T, X, Y> {
    type Item = Element<'a, T, X, Y>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let front = self.front?;
        let element = self.grid.element_at(front)?;
        self.remaining -= 1;
        self.front = front.advanced(self.grid.width(), 1);
        Some(element)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        self.front = self.front?.advanced(self.grid.width(), isize::try_from(n).ok()?);
        self.remaining -= n;
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, X, Y> DoubleEndedIterator for Iter<'_, T, X, Y> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let back = self.back?;
        let element = self.grid.element_at(back)?;
        self.remaining -= 1;
        self.back = back.advanced(self.grid.width(), -1);
        Some(element)
    }

    fn nth_back(&mut self, n: usize) -> Option<Self::Item> {
        if n >= self.remaining {
            self.remaining = 0;
            return None;
        }
        let n = isize::try_from(n).ok()?;
        self.back = self.back?.advanced(self.grid.width(), -n);
        self.remaining -= n.unsigned_abs();
        self.next_back()
    }
}

impl<T, X, Y> ExactSizeIterator for Iter<'_, T, X, Y> {}
impl<T, X, Y> FusedIterator for Iter<'_, T, X, Y> {}

// =============
// === Cells ===
// =============

/// Row-major walk over the occupied cells of a grid only.
pub struct Cells<'a, T, X, Y> {
    grid: &'a LabeledGrid<T, X, Y>,
    positions: std::vec::IntoIter<Position>,
}

impl<'a, T, X, Y> Cells<'a, T, X, Y> {
    pub(crate) fn new(grid: &'a LabeledGrid<T, X, Y>) -> Self {
        Self { grid, positions: grid.occupied_positions().into_iter() }
    }
}

impl<'a, T, X, Y> Iterator for Cells<'a, T, X, Y> {
    type Item = Element<'a, T, X, Y>;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().and_then(|p| self.grid.element_at(p))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<T, X, Y> DoubleEndedIterator for Cells<'_, T, X, Y> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.positions.next_back().and_then(|p| self.grid.element_at(p))
    }
}

impl<T, X, Y> ExactSizeIterator for Cells<'_, T, X, Y> {}
impl<T, X, Y> FusedIterator for Cells<'_, T, X, Y> {}

// =============
// === Tests ===
// =============

#[cfg(test)]
mod tests {
    use super::*;

    type Grid = LabeledGrid<u8, char, u8>;

    fn grid() -> Grid {
        LabeledGrid::from_entries(['a', 'b', 'c'], [0, 1], [(7, 'b', 0), (9, 'a', 1)])
    }

    fn labels<'a>(elements: impl Iterator<Item = Element<'a, u8, char, u8>>) -> Vec<(char, u8)> {
        elements.map(|e| (*e.x_label, *e.y_label)).collect()
    }

    #[test]
    fn walks_rows_then_columns() {
        let grid = grid();
        assert_eq!(labels(grid.iter()), [
            ('a', 0), ('b', 0), ('c', 0),
            ('a', 1), ('b', 1), ('c', 1),
        ]);
        let items: Vec<_> = grid.iter().map(|e| e.item.copied()).collect();
        assert_eq!(items, [None, Some(7), None, Some(9), None, None]);
    }

    #[test]
    fn reverse_walk_mirrors_forward_walk() {
        let grid = grid();
        let mut forward = labels(grid.iter());
        forward.reverse();
        assert_eq!(labels(grid.iter().rev()), forward);
    }

    #[test]
    fn both_ends_meet_without_overlap() {
        let grid = grid();
        let mut iter = grid.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next().map(|e| *e.x_label), Some('a'));
        assert_eq!(iter.next_back().map(|e| *e.x_label), Some('c'));
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.by_ref().count(), 4);
        assert!(iter.next().is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn nth_jumps_from_either_end() {
        let grid = grid();
        let mut iter = grid.iter();
        assert_eq!(iter.nth(3).map(|e| (*e.x_label, *e.y_label)), Some(('a', 1)));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.nth_back(1).map(|e| (*e.x_label, *e.y_label)), Some(('b', 1)));
        assert_eq!(iter.len(), 0);
        assert!(iter.next().is_none());

        let mut iter = grid.iter();
        assert!(iter.nth(6).is_none());
        assert!(iter.next_back().is_none());
    }

    #[test]
    fn empty_axis_yields_nothing() {
        let mut grid = Grid::new();
        grid.add_x_label('a');
        assert_eq!(grid.iter().count(), 0);
        assert_eq!(grid.iter().next_back(), None);
    }

    #[test]
    fn cells_skip_empty_cells() {
        let grid = grid();
        assert_eq!(labels(grid.cells()), [('b', 0), ('a', 1)]);
        assert!(grid.cells().all(|e| e.item.is_some()));
        assert_eq!(grid.cells().len(), grid.cell_count());
    }

    #[test]
    fn elements_carry_usable_positions() {
        let grid = grid();
        for element in &grid {
            assert_eq!(grid.element(element.position), Ok(element));
        }
    }
}
