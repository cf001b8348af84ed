use crate::cookie_crunch::prelude::*;

/// An opaque handle that distinguishes two cookies of the same type.
///
/// Handles are handed out by the board in creation order and never reused within a board's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CookieId(pub u64);

impl std::fmt::Display for CookieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single playable cookie: its identity, its type and where it currently sits.
///
/// Two cookies are equal exactly when their identities are, regardless of type or position,
/// so a cookie snapshot taken before a fall still compares equal to the same cookie afterwards.
#[derive(Clone, Copy, Debug)]
pub struct Cookie {
    id: CookieId,
    kind: CookieType,
    column: usize,
    row: usize,
}

impl Cookie {
    pub(crate) fn new(id: CookieId, kind: CookieType, coord: Coord) -> Cookie {
        Cookie { id, kind, column: coord.column, row: coord.row }
    }

    pub fn id(&self) -> CookieId {
        self.id
    }

    pub fn kind(&self) -> CookieType {
        self.kind
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// The cell this cookie occupies.
    pub fn coord(&self) -> Coord {
        Coord::new(self.column, self.row)
    }

    /// Records a new location for the cookie.
    pub(crate) fn move_to(&mut self, coord: Coord) {
        self.column = coord.column;
        self.row = coord.row;
    }
}

impl PartialEq for Cookie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Cookie {}

impl std::hash::Hash for Cookie {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Cookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} at {}", self.kind, self.id, self.coord())
    }
}
