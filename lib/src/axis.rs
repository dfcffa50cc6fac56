use crate::prelude::*;

use indexmap::IndexSet;

// ============
// === Axis ===
// ============

/// Ordered sequence of unique labels. Labels are compared by value, keep their insertion order,
/// and are never removed, so an index handed out once stays valid for the life of the axis.
#[derive(Clone, Debug)]
pub struct Axis<L> {
    labels: IndexSet<L>,
}

impl<L> Default for Axis<L> {
    fn default() -> Self {
        Self { labels: default() }
    }
}

impl<L> Axis<L> {
    pub fn new() -> Self {
        default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&L> {
        self.labels.get_index(index)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, L> {
        self.labels.iter()
    }
}

impl<L: Eq + Hash> Axis<L> {
    /// Appends the label unless it is already present. Returns its index and whether the axis
    /// grew.
    pub fn insert(&mut self, label: L) -> (usize, bool) {
        self.labels.insert_full(label)
    }

    pub fn index_of<Q>(&self, label: &Q) -> Option<usize>
    where Q: ?Sized + Hash + Equivalent<L> {
        self.labels.get_index_of(label)
    }

    pub fn contains<Q>(&self, label: &Q) -> bool
    where Q: ?Sized + Hash + Equivalent<L> {
        self.labels.contains(label)
    }
}

/// Order-sensitive, unlike the underlying set.
impl<L: Eq + Hash> PartialEq for Axis<L> {
    fn eq(&self, other: &Self) -> bool {
        self.labels.iter().eq(other.labels.iter())
    }
}

impl<L: Eq + Hash> Eq for Axis<L> {}

impl<L: Eq + Hash> FromIterator<L> for Axis<L> {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        Self { labels: iter.into_iter().collect() }
    }
}

impl<L: Eq + Hash> Extend<L> for Axis<L> {
    fn extend<I: IntoIterator<Item = L>>(&mut self, iter: I) {
        self.labels.extend(iter);
    }
}

impl<'a, L> IntoIterator for &'a Axis<L> {
    type Item = &'a L;
    type IntoIter = indexmap::set::Iter<'a, L>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============
// === Tests ===
// =============
