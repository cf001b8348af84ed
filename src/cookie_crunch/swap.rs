use crate::cookie_crunch::prelude::*;

/// A proposed exchange of two adjacent cookies.
///
/// The pair is unordered: `Swap { a, b }` and `Swap { b, a }` are equal, hash the same and sort
/// the same, since all three are defined on the identity pair with the smaller id first.
#[derive(Clone, Copy, Debug)]
pub struct Swap {
    pub cookie_a: Cookie,
    pub cookie_b: Cookie,
}

impl Swap {
    pub fn new(cookie_a: Cookie, cookie_b: Cookie) -> Swap {
        Swap { cookie_a, cookie_b }
    }

    /// The normalized identity pair.
    pub fn key(&self) -> (CookieId, CookieId) {
        let (a, b) = (self.cookie_a.id(), self.cookie_b.id());
        if a <= b { (a, b) } else { (b, a) }
    }

    /// The cells of both participants, as recorded when the swap was built.
    pub fn coords(&self) -> (Coord, Coord) {
        (self.cookie_a.coord(), self.cookie_b.coord())
    }

    /// Whether the cookie takes part in this swap.
    pub fn involves(&self, cookie: &Cookie) -> bool {
        self.cookie_a == *cookie || self.cookie_b == *cookie
    }
}

impl PartialEq for Swap {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Swap {}

impl std::hash::Hash for Swap {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Swap {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Swap {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key().cmp(&other.key())
    }
}

impl std::fmt::Display for Swap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "swap {} with {}", self.cookie_a, self.cookie_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(id: u64, kind: CookieType, column: usize, row: usize) -> Cookie {
        Cookie::new(CookieId(id), kind, Coord::new(column, row))
    }

    #[test]
    fn swaps_are_symmetric() {
        let a = cookie(4, CookieType::Croissant, 1, 1);
        let b = cookie(9, CookieType::Danish, 2, 1);

        let forward = Swap::new(a, b);
        let backward = Swap::new(b, a);
        assert_eq!(forward, backward);
        assert_eq!(forward.cmp(&backward), std::cmp::Ordering::Equal);
        assert_eq!(forward.key(), (CookieId(4), CookieId(9)));

        let set: HashSet<Swap> = [forward, backward].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn involvement_is_by_identity() {
        let a = cookie(1, CookieType::Croissant, 0, 0);
        let b = cookie(2, CookieType::Croissant, 0, 1);
        let c = cookie(3, CookieType::Croissant, 0, 2);
        let swap = Swap::new(a, b);
        assert!(swap.involves(&a) && swap.involves(&b));
        assert!(!swap.involves(&c));
        assert_eq!(swap.coords(), (Coord::new(0, 0), Coord::new(0, 1)));
    }
}
