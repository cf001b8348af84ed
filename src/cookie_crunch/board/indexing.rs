use crate::cookie_crunch::prelude::*;

impl<R: Rng> Board<R> {
    /// Gets the cookie at a coordinate, or an error if the coordinate is off the board.
    pub fn cookie_at(&self, coord: &Coord) -> Result<Option<Cookie>> {
        Ok(self.cookies.get(coord)?.copied())
    }

    /// Gets the tile at a coordinate, or an error if the coordinate is off the board.
    pub fn tile_at(&self, coord: &Coord) -> Result<Option<Tile>> {
        Ok(self.tiles.get(coord)?.copied())
    }

    /// Whether the coordinate is a playable cell of this board.
    pub fn is_playable(&self, coord: &Coord) -> bool {
        self.tiles.in_bounds(coord) && self.tiles.at(coord).is_some()
    }

    pub(crate) fn kind_at(&self, coord: &Coord) -> Option<CookieType> {
        self.cookies.at(coord).map(Cookie::kind)
    }

    /// The type at `from + step`, if that cell is on the board and occupied.
    pub(crate) fn kind_towards(&self, from: &Coord, step: OffsetCoord) -> Option<CookieType> {
        (from + step).coerce(self.width(), self.height()).and_then(|c| self.kind_at(&c))
    }
}
