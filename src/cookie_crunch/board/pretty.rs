
use crate::cookie_crunch::prelude::*;

impl<R: Rng> Board<R> {
    /// Pretty-prints the board as a layout, top row first.
    pub fn pretty(&self) -> String {
        (0..self.height()).rev().map(|row| {
            (0..self.width()).map(|column| {
                let coord = Coord::new(column, row);
                let cell = match (self.tiles.at(&coord), self.cookies.at(&coord)) {
                    (None, _)            => LayoutCell::Void,
                    (Some(_), None)      => LayoutCell::Empty,
                    (Some(_), Some(c))   => LayoutCell::Cookie(c.kind())
                };
                cell.notate()
            }).collect::<String>()
        }).collect::<Vec<String>>().join("\n")
    }
}

impl<R: Rng> std::fmt::Display for Board<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pretty())
    }
}
