use crate::cookie_crunch::prelude::*;

impl<R: Rng> Board<R> {
    /// Drops cookies straight down into the empty tiles beneath them.
    ///
    /// Returns, for each column in which something fell, the cookies that moved in the order they
    /// landed (lowest destination first). Cookies fall past cells without tiles and never overtake
    /// one another.
    pub fn fill_holes(&mut self) -> Vec<Vec<Cookie>> {
        let (width, height) = (self.width(), self.height());
        let mut columns = vec![];

        for column in 0..width {
            let mut fallen = vec![];
            for row in 0..height {
                let hole = Coord::new(column, row);
                if self.tiles.at(&hole).is_none() || self.cookies.at(&hole).is_some() {
                    continue;
                }
                let Some(source) = (row + 1..height)
                    .map(|r| Coord::new(column, r))
                    .find(|c| self.cookies.at(c).is_some())
                else {
                    break;
                };
                if let Some(mut cookie) = self.cookies.put(&source, None) {
                    cookie.move_to(hole);
                    self.cookies.put(&hole, Some(cookie));
                    fallen.push(cookie);
                }
            }
            if !fallen.is_empty() {
                columns.push(fallen);
            }
        }

        if !columns.is_empty() {
            self.possible_swaps = None;
            log::debug!("{} cookies fell", columns.iter().map(Vec::len).sum::<usize>());
        }
        columns
    }

    /// Fills the empty tiles at the top of each column with new cookies.
    ///
    /// Each column is filled from the top down until its first occupied cell, so this is meant to
    /// follow `fill_holes`. A new cookie never has the same type as the one created just above it;
    /// nothing else constrains the draw. Returns the new cookies per column in creation order.
    pub fn top_up_cookies(&mut self) -> Vec<Vec<Cookie>> {
        let (width, height) = (self.width(), self.height());
        let mut columns = vec![];

        for column in 0..width {
            let mut created = vec![];
            let mut previous = None;
            for row in (0..height).rev() {
                let coord = Coord::new(column, row);
                if self.cookies.at(&coord).is_some() {
                    break;
                }
                if self.tiles.at(&coord).is_none() {
                    continue;
                }
                let kind = self.catalog.random_except(previous, &mut self.rng);
                previous = Some(kind);
                created.push(self.create_cookie(coord, kind));
            }
            if !created.is_empty() {
                columns.push(created);
            }
        }

        if !columns.is_empty() {
            log::debug!("created {} cookies", columns.iter().map(Vec::len).sum::<usize>());
        }
        columns
    }
}
