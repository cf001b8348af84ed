use crate::cookie_crunch::prelude::*;

impl<R: Rng> Board<R> {
    /// Finds every swap that would create a chain and caches the result.
    ///
    /// Each occupied cell is tried against its right and upper neighbours only, which visits every
    /// adjacent pair exactly once. Each trial swaps the two cells, probes both for a chain and swaps
    /// them back before anything else happens.
    pub fn detect_possible_swaps(&mut self) -> &SwapSet {
        let (width, height) = (self.width(), self.height());
        let mut swaps = SwapSet::new();

        for coord in self.cookies.coords() {
            let Some(cookie) = self.cookies.at(&coord).copied() else {
                continue;
            };
            for offset in FORWARD_OFFSETS {
                let Some(neighbour) = (coord + offset).coerce(width, height) else {
                    continue;
                };
                let Some(other) = self.cookies.at(&neighbour).copied() else {
                    continue;
                };
                if self.probe_swap(&coord, &neighbour) {
                    swaps.insert(&Swap::new(cookie, other));
                }
            }
        }

        log::debug!("detected {} possible swaps", swaps.len());
        self.possible_swaps.insert(swaps)
    }

    /// Whether the swap is among the cached possible swaps. Always false while the cache is stale.
    pub fn is_possible_swap(&self, swap: &Swap) -> bool {
        self.possible_swaps.as_ref().is_some_and(|swaps| swaps.contains(swap))
    }

    /// Builds the swap between the cookies on two adjacent cells.
    pub fn swap_between(&self, a: &Coord, b: &Coord) -> Result<Swap> {
        if !a.is_adjacent(b) {
            bail!("cells {a} and {b} are not adjacent");
        }
        let cookie_a = self.cookie_at(a)?.ok_or_else(|| anyhow!("no cookie at {a}"))?;
        let cookie_b = self.cookie_at(b)?.ok_or_else(|| anyhow!("no cookie at {b}"))?;
        Ok(Swap::new(cookie_a, cookie_b))
    }

    /// Exchanges the two cookies of a swap, returning the swap with their updated positions.
    ///
    /// Legality is not checked here; callers consult `is_possible_swap` first. The swap must still
    /// describe the board, though: if either cookie has moved or gone since the swap was built, the
    /// board is left untouched and an error is returned. Performing a swap invalidates the cache.
    pub fn perform_swap(&mut self, swap: &Swap) -> Result<Swap> {
        let (a, b) = swap.coords();
        for cookie in [swap.cookie_a, swap.cookie_b] {
            match self.cookies.get(&cookie.coord())? {
                Some(current) if current.id() == cookie.id() => {}
                _ => bail!("stale swap: {cookie} is no longer on the board where it was"),
            }
        }
        if !a.is_adjacent(&b) {
            bail!("cannot swap non-adjacent cells {a} and {b}");
        }

        self.cookies.swap_unchecked(&a, &b);
        let mut moved = [swap.cookie_a, swap.cookie_b];
        for (cookie, target) in moved.iter_mut().zip([b, a]) {
            cookie.move_to(target);
            if let Some(stored) = self.cookies.at_mut(&target) {
                stored.move_to(target);
            }
        }
        self.possible_swaps = None;

        log::trace!("performed {swap}");
        Ok(Swap::new(moved[0], moved[1]))
    }

    /// Swaps two cells, checks both for a chain, and swaps them back unconditionally.
    fn probe_swap(&mut self, a: &Coord, b: &Coord) -> bool {
        self.cookies.swap_unchecked(a, b);
        let found = self.has_chain_at(a) || self.has_chain_at(b);
        self.cookies.swap_unchecked(a, b);
        found
    }

    /// Whether the cookie at the cell anchors a run of at least three along either axis.
    pub(super) fn has_chain_at(&self, coord: &Coord) -> bool {
        let Some(kind) = self.kind_at(coord) else {
            return false;
        };
        let [left, right, down, up] = ORTHOGONAL_OFFSETS;
        let horizontal = 1 + self.run_length(coord, kind, left) + self.run_length(coord, kind, right);
        let vertical = 1 + self.run_length(coord, kind, down) + self.run_length(coord, kind, up);
        horizontal >= MIN_CHAIN_LENGTH || vertical >= MIN_CHAIN_LENGTH
    }

    /// Counts consecutive cookies of `kind` stepping away from `from`, not counting `from` itself.
    fn run_length(&self, from: &Coord, kind: CookieType, step: OffsetCoord) -> usize {
        (1..)
            .take_while(|&n| self.kind_towards(from, step.scaled(n)) == Some(kind))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(layout: &str) -> Board {
        let layout = layout.parse::<LayoutString>().unwrap();
        Board::from_layout(&layout, CookieCatalog::default(), StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn detects_exactly_the_chain_making_swaps() {
        // Moving the bottom-right croissant left completes a column of croissants.
        let mut board = board("
            CUD
            CNM
            UCS
        ");
        let swaps = board.detect_possible_swaps().clone();
        assert_eq!(swaps.len(), 1);
        let expected = board.swap_between(&Coord::new(0, 0), &Coord::new(1, 0)).unwrap();
        assert!(swaps.contains(&expected));
        assert!(board.is_possible_swap(&Swap::new(expected.cookie_b, expected.cookie_a)));
    }

    #[test]
    fn detection_is_idempotent_and_restores_the_board() {
        let mut board = Board::new(&LevelDescriptor::filled(9, 9, 10, 3), StdRng::seed_from_u64(21)).unwrap();
        board.shuffle().unwrap();
        let before = board.pretty();
        let first = board.detect_possible_swaps().clone();
        let second = board.detect_possible_swaps().clone();
        assert_eq!(first, second);
        assert_eq!(board.pretty(), before);
        for cookie in board.cookies().iter() {
            assert_eq!(board.cookie_at(&cookie.coord()).unwrap(), Some(cookie));
        }
    }

    #[test]
    fn perform_swap_exchanges_only_the_two_cookies() {
        let mut board = board("
            CUD
            CNM
            UCS
        ");
        let before = board.cookies();
        let swap = board.swap_between(&Coord::new(0, 0), &Coord::new(1, 0)).unwrap();
        let performed = board.perform_swap(&swap).unwrap();

        assert_eq!(performed.cookie_a.coord(), swap.cookie_b.coord());
        assert_eq!(performed.cookie_b.coord(), swap.cookie_a.coord());
        assert_eq!(board.cookie_at(&Coord::new(1, 0)).unwrap(), Some(swap.cookie_a));
        assert_eq!(board.cookie_at(&Coord::new(0, 0)).unwrap(), Some(swap.cookie_b));

        for cookie in board.cookies().iter() {
            let old = before.get(cookie.id()).unwrap();
            if swap.involves(&cookie) {
                assert_ne!(old.coord(), cookie.coord());
            } else {
                assert_eq!(old.coord(), cookie.coord());
            }
            assert_eq!(board.cookie_at(&cookie.coord()).unwrap().map(|c| c.coord()), Some(cookie.coord()));
        }
        assert!(board.possible_swaps().is_none());
        assert!(!board.is_possible_swap(&swap));
    }

    #[test]
    fn stale_swaps_are_refused() {
        let mut board = board("CU/DN");
        let swap = board.swap_between(&Coord::new(0, 0), &Coord::new(1, 0)).unwrap();
        board.perform_swap(&swap).unwrap();
        let layout = board.pretty();
        assert!(board.perform_swap(&swap).is_err());
        assert_eq!(board.pretty(), layout);
    }

    #[test]
    fn swap_between_needs_two_adjacent_cookies() {
        let board = board("C.U/DNM");
        assert!(board.swap_between(&Coord::new(0, 0), &Coord::new(2, 0)).is_err());
        assert!(board.swap_between(&Coord::new(0, 1), &Coord::new(1, 1)).is_err());
        assert!(board.swap_between(&Coord::new(2, 0), &Coord::new(3, 0)).is_err());
        assert!(board.swap_between(&Coord::new(0, 0), &Coord::new(0, 1)).is_ok());
    }

    #[test]
    fn chains_are_probed_on_both_axes() {
        let board = board("
            N..
            NCC
            NDC
        ");
        assert!(board.has_chain_at(&Coord::new(0, 0)));
        assert!(board.has_chain_at(&Coord::new(0, 2)));
        assert!(!board.has_chain_at(&Coord::new(1, 1)));
        assert!(!board.has_chain_at(&Coord::new(2, 0)));
        assert!(!board.has_chain_at(&Coord::new(1, 2)));
    }
}
