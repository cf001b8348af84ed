use crate::cookie_crunch::prelude::*;

/// A set of cookies keyed by identity, iterated in creation order.
///
/// Inserting a cookie that is already present replaces the stored snapshot, so the set can
/// track a cookie across moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CookieSet(BTreeMap<CookieId, Cookie>);

impl CookieSet {
    pub fn new() -> CookieSet {
        CookieSet::default()
    }

    /// Gets the stored snapshot of a cookie by its handle.
    pub fn get(&self, id: CookieId) -> Option<&Cookie> {
        self.0.get(&id)
    }

    /// The number of cookies of each type.
    pub fn census(&self) -> BTreeMap<CookieType, usize> {
        let mut counts = BTreeMap::new();
        self.0.values().for_each(|c| *counts.entry(c.kind()).or_insert(0) += 1);
        counts
    }
}

impl SetOps<Cookie> for CookieSet {
    fn contains(&self, value: &Cookie) -> bool {
        self.0.contains_key(&value.id())
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn iter(&self) -> impl Iterator<Item = Cookie> {
        self.0.values().copied()
    }

    fn insert(&mut self, value: &Cookie) -> &mut Self {
        self.0.insert(value.id(), *value);
        self
    }

    fn remove(&mut self, value: &Cookie) -> &mut Self {
        self.0.remove(&value.id());
        self
    }

    fn union(&self, other: &Self) -> Self {
        let mut s = self.clone();
        other.iter().for_each(|c| {
            s.insert(&c);
        });
        s
    }

    fn difference(&self, other: &Self) -> Self {
        self.iter().filter(|c| !other.contains(c)).collect()
    }
}

impl FromIterator<Cookie> for CookieSet {
    fn from_iter<T: IntoIterator<Item = Cookie>>(iter: T) -> Self {
        CookieSet(iter.into_iter().map(|c| (c.id(), c)).collect())
    }
}

impl<'a> FromIterator<&'a Cookie> for CookieSet {
    fn from_iter<T: IntoIterator<Item = &'a Cookie>>(iter: T) -> Self {
        iter.into_iter().copied().collect()
    }
}

impl IntoIterator for CookieSet {
    type Item = Cookie;
    type IntoIter = std::collections::btree_map::IntoValues<CookieId, Cookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_values()
    }
}
