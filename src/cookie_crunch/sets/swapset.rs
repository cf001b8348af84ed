use crate::cookie_crunch::prelude::*;

/// A set of unordered swaps, iterated in the order of their identity pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwapSet(BTreeSet<Swap>);

impl SwapSet {
    pub fn new() -> SwapSet {
        SwapSet::default()
    }

    /// Finds the swap, if any, that exchanges the cookies at two cells.
    pub fn between(&self, a: &Coord, b: &Coord) -> Option<Swap> {
        self.0.iter().copied().find(|swap| {
            let (x, y) = swap.coords();
            (x == *a && y == *b) || (x == *b && y == *a)
        })
    }
}

impl SetOps<Swap> for SwapSet {
    fn contains(&self, value: &Swap) -> bool {
        self.0.contains(value)
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> impl Iterator<Item = Swap> {
        self.0.iter().copied()
    }

    fn insert(&mut self, value: &Swap) -> &mut Self {
        self.0.insert(*value);
        self
    }

    fn remove(&mut self, value: &Swap) -> &mut Self {
        self.0.remove(value);
        self
    }

    fn union(&self, other: &Self) -> Self {
        SwapSet(self.0.union(&other.0).copied().collect())
    }

    fn difference(&self, other: &Self) -> Self {
        SwapSet(self.0.difference(&other.0).copied().collect())
    }
}

impl FromIterator<Swap> for SwapSet {
    fn from_iter<T: IntoIterator<Item = Swap>>(iter: T) -> Self {
        SwapSet(iter.into_iter().collect())
    }
}

impl IntoIterator for SwapSet {
    type Item = Swap;
    type IntoIter = std::collections::btree_set::IntoIter<Swap>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
