use crate::cookie_crunch::prelude::*;

impl<R: Rng> Board<R> {
    /// Finds every maximal run of three or more same-type cookies, unscored.
    ///
    /// Horizontal chains come first, row by row from the bottom; vertical chains follow, column by
    /// column from the left. A cookie at the corner of an L or T belongs to one chain of each axis.
    pub fn detect_matches(&self) -> Vec<Chain> {
        let mut chains = self.detect_chains(ChainType::Horizontal);
        chains.extend(self.detect_chains(ChainType::Vertical));
        chains
    }

    /// Removes every chain on the board and scores it.
    ///
    /// Each cookie in any chain is removed once, even if it belongs to two. Chains are scored in
    /// detection order at `60 * (len - 2)` times the combo multiplier, which grows by one after each.
    pub fn remove_matches(&mut self) -> Vec<Chain> {
        let mut chains = self.detect_matches();
        if chains.is_empty() {
            return chains;
        }

        for cookie in chains.iter().flat_map(|chain| chain.cookies()) {
            self.cookies.put(&cookie.coord(), None);
        }
        for chain in chains.iter_mut() {
            chain.score_with(self.combo_multiplier);
            self.combo_multiplier += 1;
        }
        self.possible_swaps = None;

        for chain in chains.iter() {
            log::debug!("removed {chain}");
        }
        chains
    }

    fn detect_chains(&self, chain_type: ChainType) -> Vec<Chain> {
        let (lines, length) = match chain_type {
            ChainType::Horizontal => (self.height(), self.width()),
            ChainType::Vertical => (self.width(), self.height()),
        };
        let cell = |line: usize, i: usize| match chain_type {
            ChainType::Horizontal => Coord::new(i, line),
            ChainType::Vertical => Coord::new(line, i),
        };

        let mut chains = vec![];
        for line in 0..lines {
            let mut start = 0;
            while start < length {
                let Some(kind) = self.kind_at(&cell(line, start)) else {
                    start += 1;
                    continue;
                };
                let mut end = start + 1;
                while end < length && self.kind_at(&cell(line, end)) == Some(kind) {
                    end += 1;
                }
                if end - start >= MIN_CHAIN_LENGTH {
                    let cookies = (start..end).filter_map(|i| self.cookies.at(&cell(line, i)).copied()).collect();
                    chains.push(Chain::new(chain_type, cookies));
                }
                start = end;
            }
        }
        chains
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
    fn a_run_of_four_scores_120() {
        let mut board = board("
            CUDNMSCUD
            UDNMSCUDN
            DNMSCUDNM
            NMSCUDNMS
            MSCUDNMSC
            SCUDNMSCU
            CUDNMSCUD
            UDNMSCUDN
            DNMSCUDNM
        ");
        // Manufacture a run of four macaroons along the bottom row, clear of any other macaroon.
        for column in 2..6 {
            board.cookies.put(&Coord::new(column, 0), None);
            board.create_cookie(Coord::new(column, 0), CookieType::Macaroon);
        }
        assert!(board.detect_matches().len() == 1, "\n{}", board.pretty());

        board.reset_combo_multiplier();
        let chains = board.remove_matches();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].chain_type(), ChainType::Horizontal);
        assert_eq!(chains[0].len(), 4);
        assert_eq!(chains[0].score(), 120);
        for column in 2..6 {
            assert_eq!(board.cookie_at(&Coord::new(column, 0)).unwrap(), None);
        }
        assert_eq!(board.cookies().len(), 77);
        assert_eq!(board.combo_multiplier(), 2);
    }

    #[test]
    fn simultaneous_chains_score_with_a_growing_multiplier() {
        let mut board = board("
            UDNMS
            NNNCC
            MSUDM
            CCCCU
        ");
        board.reset_combo_multiplier();
        let chains = board.remove_matches();

        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].kind(), Some(CookieType::Croissant));
        assert_eq!(chains[0].score(), 60 * 2);
        assert_eq!(chains[1].kind(), Some(CookieType::Donut));
        assert_eq!(chains[1].score(), 60 * 2);
        assert_eq!(board.combo_multiplier(), 3);
    }

    #[test]
    fn multiplier_persists_until_reset() {
        let mut board = board("
            UDNMS
            NNNCC
            MSUDM
            CCCUU
        ");
        board.reset_combo_multiplier();
        let chains = board.remove_matches();
        assert_eq!(chains.iter().map(Chain::score).collect::<Vec<_>>(), vec![60, 120]);
        assert!(board.remove_matches().is_empty());
        assert_eq!(board.combo_multiplier(), 3);
        board.reset_combo_multiplier();
        assert_eq!(board.combo_multiplier(), 1);
    }

    #[test]
    fn l_shapes_score_both_chains_and_remove_the_corner_once() {
        let mut board = board("
            DUM
            DNS
            DDD
        ");
        let chains = board.remove_matches();
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].chain_type(), ChainType::Horizontal);
        assert_eq!(chains[1].chain_type(), ChainType::Vertical);
        assert_eq!(chains[0].first(), chains[1].first());
        assert_eq!(chains[0].score() + chains[1].score(), 60 + 120);
        assert_eq!(board.cookies().len(), 4);
    }

    #[test]
    fn runs_are_maximal_and_broken_by_gaps_and_voids() {
        let board = board("
            CCCCC
            UU.UU
            DD#DD
        ");
        let chains = board.detect_matches();
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 5);
        assert!(chains.iter().all(|c| c.score() == 0));
    }
}
