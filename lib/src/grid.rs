use crate::prelude::*;

use crate::axis::Axis;
use crate::index::GridId;
use crate::index::Position;
use crate::index::XIndex;
use crate::index::YIndex;
use crate::iter::Cells;
use crate::iter::Element;
use crate::iter::Iter;
use log::debug;
use log::trace;
use std::collections::HashMap;
use std::convert::Infallible;

// ====================
// === IngestPolicy ===
// ====================

/// What [`LabeledGrid::from_entries_with`] does with an entry whose labels are not on the axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IngestPolicy {
    #[default]
    Permissive,
    /// Fail the whole construction with [`Error::UnmatchedEntry`].
    Strict,
}

// ===============
// === Storage ===
// ===============

#[derive(Clone)]
struct Storage<T, X, Y> {
    x_axis: Axis<X>,
    y_axis: Axis<Y>,
    cells: HashMap<(XIndex, YIndex), T>,
}

impl<T, X, Y> Default for Storage<T, X, Y> {
    fn default() -> Self {
        Self { x_axis: default(), y_axis: default(), cells: default() }
    }
}

// ===================
// === LabeledGrid ===
// ===================

/// Sparse grid addressed by an X label and a Y label. Clones share storage until the first write,
/// and a clone is a distinct grid, so positions of the original are foreign to it.
pub struct LabeledGrid<T, X, Y> {
    id: GridId,
    storage: Arc<Storage<T, X, Y>>,
}

impl<T, X, Y> Default for LabeledGrid<T, X, Y> {
    fn default() -> Self {
        Self::from_storage(default())
    }
}

impl<T, X, Y> Clone for LabeledGrid<T, X, Y> {
    fn clone(&self) -> Self {
        Self { id: GridId::next(), storage: self.storage.clone() }
    }
}

impl<T, X, Y> LabeledGrid<T, X, Y> {
    pub fn new() -> Self {
        default()
    }

    fn from_storage(storage: Storage<T, X, Y>) -> Self {
        Self { id: GridId::next(), storage: Arc::new(storage) }
    }

    pub fn id(&self) -> GridId {
        self.id
    }

    pub fn width(&self) -> usize {
        self.storage.x_axis.len()
    }

    pub fn height(&self) -> usize {
        self.storage.y_axis.len()
    }

    pub fn len(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell_count(&self) -> usize {
        self.storage.cells.len()
    }

    pub fn x_axis(&self) -> &Axis<X> {
        &self.storage.x_axis
    }

    pub fn y_axis(&self) -> &Axis<Y> {
        &self.storage.y_axis
    }

    pub fn x_labels(&self) -> indexmap::set::Iter<'_, X> {
        self.storage.x_axis.iter()
    }

    pub fn y_labels(&self) -> indexmap::set::Iter<'_, Y> {
        self.storage.y_axis.iter()
    }

    pub fn x_label(&self, x: XIndex) -> Option<&X> {
        self.storage.x_axis.get(*x)
    }

    pub fn y_label(&self, y: YIndex) -> Option<&Y> {
        self.storage.y_axis.get(*y)
    }

    fn check_bounds(&self, x: XIndex, y: YIndex) -> Result {
        if *x < self.width() && *y < self.height() { Ok(()) } else { Err(self.out_of_bounds(x, y)) }
    }

    fn out_of_bounds(&self, x: XIndex, y: YIndex) -> Error {
        Error::IndexOutOfBounds { x: *x, y: *y, width: self.width(), height: self.height() }
    }

    pub fn get_at(&self, x: XIndex, y: YIndex) -> Result<Option<&T>> {
        self.check_bounds(x, y)?;
        Ok(self.storage.cells.get(&(x, y)))
    }

    // === Positions ===

    pub fn position(&self, x: XIndex, y: YIndex) -> Result<Position> {
        self.check_bounds(x, y)?;
        Ok(Position::new(self.id, x, y))
    }

    pub fn first_position(&self) -> Option<Position> {
        (!self.is_empty()).then(|| Position::new(self.id, default(), default()))
    }

    pub fn last_position(&self) -> Option<Position> {
        let x = self.width().checked_sub(1)?;
        let y = self.height().checked_sub(1)?;
        Some(Position::new(self.id, XIndex(x), YIndex(y)))
    }

    fn owns(&self, position: Position) -> bool {
        position.grid() == self.id && self.check_bounds(position.x(), position.y()).is_ok()
    }

    /// Position `n` cells away in row-major order. `None` when the result falls outside the grid
    /// or the position belongs to another grid.
    pub fn offset(&self, position: Position, n: isize) -> Option<Position> {
        if !self.owns(position) {
            return None;
        }
        let target = position.advanced(self.width(), n)?;
        self.owns(target).then_some(target)
    }

    /// Row-major distance from `from` to `to`, measured against the current width. `None` when
    /// either position belongs to another grid.
    pub fn distance(&self, from: Position, to: Position) -> Option<isize> {
        if !self.owns(from) || !self.owns(to) {
            return None;
        }
        let width = self.width();
        let from = isize::try_from(from.linear(width)?).ok()?;
        let to = isize::try_from(to.linear(width)?).ok()?;
        to.checked_sub(from)
    }

    pub fn position_after(&self, position: Position) -> Option<Position> {
        self.offset(position, 1)
    }

    pub fn position_before(&self, position: Position) -> Option<Position> {
        self.offset(position, -1)
    }

    /// Fails with [`Error::ForeignPosition`] for a position of another grid.
    pub fn element(&self, position: Position) -> Result<Element<'_, T, X, Y>> {
        if position.grid() != self.id {
            return Err(Error::ForeignPosition);
        }
        self.element_at(position).ok_or_else(|| self.out_of_bounds(position.x(), position.y()))
    }

    pub(crate) fn element_at(&self, position: Position) -> Option<Element<'_, T, X, Y>> {
        let storage = &*self.storage;
        let x_label = storage.x_axis.get(*position.x())?;
        let y_label = storage.y_axis.get(*position.y())?;
        let item = storage.cells.get(&(position.x(), position.y()));
        Some(Element { item, x_label, y_label, position })
    }

    pub(crate) fn occupied_positions(&self) -> Vec<Position> {
        let mut positions: Vec<_> =
            self.storage.cells.keys().map(|&(x, y)| Position::new(self.id, x, y)).collect();
        positions.sort_unstable_by_key(|p| (p.y(), p.x()));
        positions
    }

    // === Iteration ===

    /// Row-major walk over every cell, empty cells included.
    pub fn iter(&self) -> Iter<'_, T, X, Y> {
        Iter::new(self)
    }

    pub fn cells(&self) -> Cells<'_, T, X, Y> {
        Cells::new(self)
    }
}

impl<T, X: Eq + Hash, Y: Eq + Hash> LabeledGrid<T, X, Y> {
    /// Builds a grid from the given axes, dropping every entry whose labels are not on them.
    pub fn from_entries(
        x_labels: impl IntoIterator<Item = X>,
        y_labels: impl IntoIterator<Item = Y>,
        entries: impl IntoIterator<Item = (T, X, Y)>,
    ) -> Self {
        let Ok(grid) = Self::ingest(x_labels, y_labels, entries, |entry| {
            debug!("Dropping entry #{entry}, its labels are not on the axes.");
            Ok::<_, Infallible>(())
        });
        grid
    }

    pub fn from_entries_with(
        policy: IngestPolicy,
        x_labels: impl IntoIterator<Item = X>,
        y_labels: impl IntoIterator<Item = Y>,
        entries: impl IntoIterator<Item = (T, X, Y)>,
    ) -> Result<Self> {
        match policy {
            IngestPolicy::Permissive => Ok(Self::from_entries(x_labels, y_labels, entries)),
            IngestPolicy::Strict => Self::ingest(x_labels, y_labels, entries, |entry| {
                Err(Error::UnmatchedEntry { entry })
            }),
        }
    }

    fn ingest<E>(
        x_labels: impl IntoIterator<Item = X>,
        y_labels: impl IntoIterator<Item = Y>,
        entries: impl IntoIterator<Item = (T, X, Y)>,
        mut on_unmatched: impl FnMut(usize) -> Result<(), E>,
    ) -> Result<Self, E> {
        let x_axis: Axis<X> = x_labels.into_iter().collect();
        let y_axis: Axis<Y> = y_labels.into_iter().collect();
        let mut cells = HashMap::new();
        for (entry, (item, x_label, y_label)) in entries.into_iter().enumerate() {
            match (x_axis.index_of(&x_label), y_axis.index_of(&y_label)) {
                (Some(x), Some(y)) => {
                    cells.insert((XIndex(x), YIndex(y)), item);
                }
                _ => on_unmatched(entry)?,
            }
        }
        Ok(Self::from_storage(Storage { x_axis, y_axis, cells }))
    }

    pub fn x_index_of<Q>(&self, label: &Q) -> Option<XIndex>
    where Q: ?Sized + Hash + Equivalent<X> {
        self.storage.x_axis.index_of(label).map(XIndex)
    }

    pub fn y_index_of<Q>(&self, label: &Q) -> Option<YIndex>
    where Q: ?Sized + Hash + Equivalent<Y> {
        self.storage.y_axis.index_of(label).map(YIndex)
    }

    fn indices_of<QX, QY>(&self, x_label: &QX, y_label: &QY) -> Option<(XIndex, YIndex)>
    where
        QX: ?Sized + Hash + Equivalent<X>,
        QY: ?Sized + Hash + Equivalent<Y>,
    {
        Some((self.x_index_of(x_label)?, self.y_index_of(y_label)?))
    }

    /// A label missing from its axis reads as an empty cell.
    pub fn get<QX, QY>(&self, x_label: &QX, y_label: &QY) -> Option<&T>
    where
        QX: ?Sized + Hash + Equivalent<X>,
        QY: ?Sized + Hash + Equivalent<Y>,
    {
        let key = self.indices_of(x_label, y_label)?;
        self.storage.cells.get(&key)
    }

    pub fn contains<QX, QY>(&self, x_label: &QX, y_label: &QY) -> bool
    where
        QX: ?Sized + Hash + Equivalent<X>,
        QY: ?Sized + Hash + Equivalent<Y>,
    {
        self.get(x_label, y_label).is_some()
    }
}

impl<T: Clone, X: Clone + Eq + Hash, Y: Clone + Eq + Hash> LabeledGrid<T, X, Y> {
    fn storage_mut(&mut self) -> &mut Storage<T, X, Y> {
        if Arc::strong_count(&self.storage) > 1 {
            debug!("Grid storage is shared, copying it before the write.");
        }
        Arc::make_mut(&mut self.storage)
    }

    pub fn add_x_label(&mut self, label: X) -> XIndex {
        if let Some(x) = self.x_index_of(&label) {
            return x;
        }
        let (x, _) = self.storage_mut().x_axis.insert(label);
        trace!("X axis grew to {} labels.", x + 1);
        XIndex(x)
    }

    pub fn add_y_label(&mut self, label: Y) -> YIndex {
        if let Some(y) = self.y_index_of(&label) {
            return y;
        }
        let (y, _) = self.storage_mut().y_axis.insert(label);
        trace!("Y axis grew to {} labels.", y + 1);
        YIndex(y)
    }

    /// Adds missing labels to their axes, then stores the item, or empties the cell for `None`.
    /// Returns the previous item.
    pub fn set(&mut self, x_label: X, y_label: Y, item: Option<T>) -> Option<T> {
        let x = self.add_x_label(x_label);
        let y = self.add_y_label(y_label);
        self.replace(x, y, item)
    }

    pub fn insert(&mut self, x_label: X, y_label: Y, item: T) -> Option<T> {
        self.set(x_label, y_label, Some(item))
    }

    /// Empties the cell. Never touches the axes.
    pub fn remove<QX, QY>(&mut self, x_label: &QX, y_label: &QY) -> Option<T>
    where
        QX: ?Sized + Hash + Equivalent<X>,
        QY: ?Sized + Hash + Equivalent<Y>,
    {
        let (x, y) = self.indices_of(x_label, y_label)?;
        self.replace(x, y, None)
    }

    pub fn get_mut<QX, QY>(&mut self, x_label: &QX, y_label: &QY) -> Option<&mut T>
    where
        QX: ?Sized + Hash + Equivalent<X>,
        QY: ?Sized + Hash + Equivalent<Y>,
    {
        let key = self.indices_of(x_label, y_label)?;
        if !self.storage.cells.contains_key(&key) {
            return None;
        }
        self.storage_mut().cells.get_mut(&key)
    }

    /// Position-addressed [`Self::set`]. Fails instead of growing the axes.
    pub fn set_at(&mut self, x: XIndex, y: YIndex, item: Option<T>) -> Result<Option<T>> {
        self.check_bounds(x, y)?;
        Ok(self.replace(x, y, item))
    }

    fn replace(&mut self, x: XIndex, y: YIndex, item: Option<T>) -> Option<T> {
        match item {
            Some(item) => self.storage_mut().cells.insert((x, y), item),
            None if self.storage.cells.contains_key(&(x, y)) =>
                self.storage_mut().cells.remove(&(x, y)),
            None => None,
        }
    }
}

impl<T: PartialEq, X: Eq + Hash, Y: Eq + Hash> PartialEq for LabeledGrid<T, X, Y> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
            || (self.storage.x_axis == other.storage.x_axis
                && self.storage.y_axis == other.storage.y_axis
                && self.storage.cells == other.storage.cells)
    }
}

impl<T: Eq, X: Eq + Hash, Y: Eq + Hash> Eq for LabeledGrid<T, X, Y> {}

impl<T: Debug, X: Debug, Y: Debug> Debug for LabeledGrid<T, X, Y> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self.cells().filter_map(|e| Some(((e.x_label, e.y_label), e.item?)));
        f.debug_struct("LabeledGrid")
            .field("x_axis", &self.storage.x_axis)
            .field("y_axis", &self.storage.y_axis)
            .field("cells", &DebugCells(cells.collect()))
            .finish()
    }
}

struct DebugCells<'a, T, X, Y>(Vec<((&'a X, &'a Y), &'a T)>);

impl<T: Debug, X: Debug, Y: Debug> Debug for DebugCells<'_, T, X, Y> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.0.iter().copied()).finish()
    }
}

impl<'a, T, X, Y> IntoIterator for &'a LabeledGrid<T, X, Y> {
    type Item = Element<'a, T, X, Y>;
    type IntoIter = Iter<'a, T, X, Y>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============
// === Tests ===
// =============

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LabeledGrid<i32, &'static str, &'static str> {
        LabeledGrid::from_entries(["A", "B"], ["X", "Y"], [(1, "A", "X"), (4, "B", "Y")])
    }

    #[test]
    fn clone_shares_storage_until_written() {
        let original = sample();
        let mut copy = original.clone();
        assert!(Arc::ptr_eq(&original.storage, &copy.storage));
        copy.insert("A", "Y", 3);
        assert!(!Arc::ptr_eq(&original.storage, &copy.storage));
        assert_eq!(original.get("A", "Y"), None);
        assert_eq!(copy.get("A", "Y"), Some(&3));
    }

    #[test]
    fn reads_and_misses_do_not_detach() {
        let original = sample();
        let mut copy = original.clone();
        assert_eq!(copy.add_x_label("A"), XIndex(0));
        assert_eq!(copy.get_mut("B", "X"), None);
        assert_eq!(copy.remove("C", "X"), None);
        assert_eq!(copy.set("A", "Y", None), None);
        assert!(Arc::ptr_eq(&original.storage, &copy.storage));
    }

    #[test]
    fn clone_is_a_distinct_grid() {
        let grid = sample();
        let copy = grid.clone();
        assert_ne!(grid.id(), copy.id());
        assert_eq!(grid, copy);
    }

    #[test]
    fn set_none_empties_cell_but_keeps_labels() {
        let mut grid = sample();
        assert_eq!(grid.set("A", "X", None), Some(1));
        assert_eq!(grid.get("A", "X"), None);
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.set("C", "Z", None), None);
        assert_eq!(grid.x_index_of("C"), Some(XIndex(2)));
        assert_eq!(grid.y_index_of("Z"), Some(YIndex(2)));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut grid = sample();
        if let Some(item) = grid.get_mut("B", "Y") {
            *item += 10;
        }
        assert_eq!(grid.get("B", "Y"), Some(&14));
    }

    #[test]
    fn set_at_rejects_out_of_range() {
        let mut grid = sample();
        assert_eq!(grid.set_at(XIndex(1), YIndex(0), Some(2)), Ok(None));
        assert_eq!(grid.get("B", "X"), Some(&2));
        assert_eq!(
            grid.set_at(XIndex(0), YIndex(2), Some(9)),
            Err(Error::IndexOutOfBounds { x: 0, y: 2, width: 2, height: 2 })
        );
        assert_eq!(grid.height(), 2);
    }

    #[test]
    fn strict_ingestion_reports_first_unmatched_entry() {
        let entries = [(1, "A", "X"), (2, "A", "W"), (3, "Z", "X")];
        let strict = LabeledGrid::from_entries_with(IngestPolicy::Strict, ["A"], ["X"], entries);
        assert_eq!(strict, Err(Error::UnmatchedEntry { entry: 1 }));
        let permissive =
            LabeledGrid::from_entries_with(IngestPolicy::default(), ["A"], ["X"], entries);
        assert_eq!(permissive.map(|g| g.cell_count()), Ok(1));
    }

    #[test]
    fn later_entries_overwrite_earlier_ones() {
        let grid = LabeledGrid::from_entries(["A"], ["X"], [(1, "A", "X"), (2, "A", "X")]);
        assert_eq!(grid.get("A", "X"), Some(&2));
    }

    #[test]
    fn equality_ignores_insertion_history_of_cells() {
        let mut a = LabeledGrid::<i32, &str, &str>::new();
        let mut b = LabeledGrid::new();
        a.add_x_label("A");
        a.add_y_label("X");
        a.insert("A", "X", 1);
        b.insert("A", "X", 7);
        b.insert("A", "X", 1);
        assert_eq!(a, b);
        b.add_x_label("B");
        assert_ne!(a, b);
    }

    #[test]
    fn debug_lists_occupied_cells() {
        let grid = sample();
        let text = format!("{grid:?}");
        assert!(text.contains("(\"A\", \"X\"): 1"));
        assert!(text.contains("(\"B\", \"Y\"): 4"));
    }

    #[test]
    fn unvetted_coordinates_have_no_neighbours() {
        let grid = sample();
        let wide = Position::new(grid.id(), XIndex(100), YIndex(0));
        assert_eq!(grid.position_after(wide), None);
        assert_eq!(grid.position_before(wide), None);
        assert_eq!(grid.offset(wide, 0), None);
        let tall = Position::new(grid.id(), XIndex(0), YIndex(usize::MAX));
        assert_eq!(grid.position_after(tall), None);
        assert_eq!(grid.distance(tall, tall), None);
        assert!(grid.element(tall).is_err());
    }

    #[test]
    fn offsets_jump_across_rows() -> Result {
        let mut grid = sample();
        grid.add_x_label("C");
        let first = grid.position(XIndex(0), YIndex(0))?;
        let target = grid.offset(first, 4);
        assert_eq!(target.map(|p| (p.x(), p.y())), Some((XIndex(1), YIndex(1))));
        assert_eq!(target.and_then(|p| grid.distance(first, p)), Some(4));
        assert_eq!(target.and_then(|p| grid.distance(p, first)), Some(-4));
        assert_eq!(grid.offset(first, 6), None);
        assert_eq!(grid.offset(first, -1), None);
        assert_eq!(grid.offset(first, 5), grid.last_position());
        Ok(())
    }

    #[test]
    fn distances_follow_the_current_width() -> Result {
        let mut grid = sample();
        let first = grid.position(XIndex(0), YIndex(0))?;
        let below = grid.position(XIndex(0), YIndex(1))?;
        assert_eq!(grid.distance(first, below), Some(2));
        grid.add_x_label("C");
        assert_eq!(grid.distance(first, below), Some(3));
        assert_eq!(grid.distance(first, grid.clone().position(XIndex(0), YIndex(1))?), None);
        Ok(())
    }
}
