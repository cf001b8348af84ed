use crate::cookie_crunch::prelude::*;

impl<R: Rng> Board<R> {
    /// Fills every tile with a fresh cookie so that the board has no chains but at least one possible swap.
    ///
    /// Fills are retried until one admits a swap, up to `MAX_SHUFFLE_ATTEMPTS`. A level whose mask
    /// cannot hold any swap (no three playable cells in a line, say) exhausts the attempts and errors
    /// with the board left empty.
    pub fn shuffle(&mut self) -> Result<CookieSet> {
        for attempt in 1..=MAX_SHUFFLE_ATTEMPTS {
            let Some(cookies) = self.create_initial_cookies() else {
                log::trace!("shuffle attempt {attempt} ran out of cookie types");
                continue;
            };
            let swaps = self.detect_possible_swaps().len();
            if swaps > 0 {
                log::info!("shuffled {} cookies with {swaps} possible swaps after {attempt} attempt(s)", cookies.len());
                return Ok(cookies);
            }
            log::trace!("shuffle attempt {attempt} left no possible swaps");
        }

        self.cookies.clear();
        self.possible_swaps = None;
        Err(anyhow!("could not shuffle a playable board in {MAX_SHUFFLE_ATTEMPTS} attempts"))
    }

    /// Clears the board and gives every tile a random cookie that does not complete a run with the
    /// two cookies to its left or the two below it.
    ///
    /// Cells are visited left to right from the bottom row up, so those neighbours are the only ones
    /// already placed. Returns `None` if some cell had no permissible type.
    fn create_initial_cookies(&mut self) -> Option<CookieSet> {
        self.cookies.clear();
        self.possible_swaps = None;

        let mut created = CookieSet::new();
        for coord in self.tiles.coords() {
            if self.tiles.at(&coord).is_none() {
                continue;
            }
            let forbidden = [LEFT, DOWN].map(|step| self.repeated_kind(&coord, step));
            let kind = self.catalog.random_where(&mut self.rng, |k| !forbidden.contains(&Some(k)))?;
            created.insert(&self.create_cookie(coord, kind));
        }
        Some(created)
    }

    /// The type of the next two cookies from `coord` in the direction of `step`, if they share one.
    fn repeated_kind(&self, coord: &Coord, step: OffsetCoord) -> Option<CookieType> {
        let near = self.kind_towards(coord, step)?;
        (self.kind_towards(coord, step.scaled(2)) == Some(near)).then_some(near)
    }
}
