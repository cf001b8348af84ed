use crate::cookie_crunch::prelude::*;

/// The cookie types in play on a board, and the uniform draws over them.
///
/// A catalog always holds at least two distinct types; with a single type every
/// fill would be a match and the shuffle could never settle, so that is rejected
/// at construction as a configuration error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieCatalog {
    kinds: Vec<CookieType>,
}

impl CookieCatalog {
    /// Builds a catalog of the first `count` cookie types.
    pub fn new(count: usize) -> Result<CookieCatalog> {
        let available = CookieType::all().len();
        if !(2..=available).contains(&count) {
            return Err(anyhow!("a catalog needs between 2 and {available} cookie types, received {count}"));
        }
        CookieCatalog::from_kinds(CookieType::all().into_iter().take(count))
    }

    /// Builds a catalog from an explicit selection of types; duplicates are ignored.
    pub fn from_kinds(kinds: impl IntoIterator<Item = CookieType>) -> Result<CookieCatalog> {
        let kinds: Vec<CookieType> = kinds.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        if kinds.len() < 2 {
            return Err(anyhow!("a catalog needs at least 2 distinct cookie types, received {kinds:?}"));
        }
        Ok(CookieCatalog { kinds })
    }

    /// Whether the type can be drawn from this catalog.
    pub fn contains(&self, kind: CookieType) -> bool {
        self.kinds.contains(&kind)
    }

    /// The types in play, in identifier order.
    pub fn kinds(&self) -> &[CookieType] {
        &self.kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Draws a type uniformly at random.
    pub fn random<G: Rng + ?Sized>(&self, rng: &mut G) -> CookieType {
        self.kinds[rng.random_range(0..self.kinds.len())]
    }

    /// Draws a type uniformly from every type but `excluded`.
    ///
    /// Always succeeds: the catalog has at least two types, so at least one remains.
    pub fn random_except<G: Rng + ?Sized>(&self, excluded: Option<CookieType>, rng: &mut G) -> CookieType {
        let Some(skip) = excluded.and_then(|kind| self.kinds.iter().position(|&k| k == kind)) else {
            return self.random(rng);
        };
        let i = rng.random_range(0..self.kinds.len() - 1);
        self.kinds[if i >= skip { i + 1 } else { i }]
    }

    /// Draws a type uniformly from the types satisfying `allowed`, if there are any.
    pub fn random_where<G: Rng + ?Sized>(&self, rng: &mut G, allowed: impl Fn(CookieType) -> bool) -> Option<CookieType> {
        let candidates: Vec<CookieType> = self.kinds.iter().copied().filter(|&k| allowed(k)).collect();
        match candidates.len() {
            0 => None,
            n => Some(candidates[rng.random_range(0..n)])
        }
    }
}

impl Default for CookieCatalog {
    fn default() -> Self {
        CookieCatalog { kinds: CookieType::all().to_vec() }
    }
}
