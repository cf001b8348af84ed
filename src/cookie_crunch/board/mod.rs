pub(crate) mod gravity;
pub(crate) mod indexing;
pub(crate) mod matches;
pub(crate) mod pretty;
pub(crate) mod shuffle;
pub(crate) mod swaps;

use super::prelude::*;

/// Marks a playable cell. Cells without a tile never hold a cookie and are skipped by every scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile;

/// A match-3 board: the tile layer, the cookie layer, and the bookkeeping for swaps and combos.
///
/// Tiles are fixed when the board is populated from a level. Cookies come and go through `shuffle`,
/// `remove_matches`, `fill_holes` and `top_up_cookies`; each cookie carries its own coordinates,
/// which are kept in step with the cell that holds it.
#[derive(Clone, Debug)]
pub struct Board<R = StdRng> {
    /// The playable cells.
    tiles: Grid<Tile>,

    /// The cookie occupying each cell, if any.
    cookies: Grid<Cookie>,

    /// The swaps that would create a chain on the current board.
    ///
    /// `None` whenever the board has changed since the last call to `detect_possible_swaps`; a stale
    /// cache is never consulted.
    possible_swaps: Option<SwapSet>,

    /// The multiplier applied to the next chain scored; grows by one per chain until reset.
    combo_multiplier: u32,

    /// The cookie types new cookies are drawn from.
    catalog: CookieCatalog,

    /// The source of every random draw on this board.
    rng: R,

    /// The handle given to the next cookie created.
    next_id: u64,
}

impl<R: Rng> Board<R> {
    /// Creates a board for the level, with the level's own catalog. The board starts without cookies.
    pub fn new(level: &LevelDescriptor, rng: R) -> Result<Board<R>> {
        Board::with_catalog(level, level.catalog()?, rng)
    }

    /// Creates a board for the level, drawing from an explicit catalog.
    pub fn with_catalog(level: &LevelDescriptor, catalog: CookieCatalog, rng: R) -> Result<Board<R>> {
        let mut board = Board {
            tiles: Grid::new(0, 0),
            cookies: Grid::new(0, 0),
            possible_swaps: None,
            combo_multiplier: 1,
            catalog,
            rng,
            next_id: 0,
        };
        board.populate(level)?;
        Ok(board)
    }

    /// Creates a board holding exactly the cookies of a layout, then detects its possible swaps.
    pub fn from_layout(layout: &LayoutString, catalog: CookieCatalog, rng: R) -> Result<Board<R>> {
        let level = layout.level(0, 1)?;
        let mut board = Board::with_catalog(&level, catalog, rng)?;
        for coord in board.tiles.coords() {
            if let Some(LayoutCell::Cookie(kind)) = layout.cell_at(&coord) {
                if !board.catalog.contains(kind) {
                    bail!("layout places a {kind} at {coord}, which is not in the catalog");
                }
                board.create_cookie(coord, kind);
            }
        }
        board.detect_possible_swaps();
        Ok(board)
    }

    /// Places a tile on every playable cell of the level.
    ///
    /// Populating a live board reinitializes it: all cookies are dropped, the swap cache is cleared
    /// and the combo multiplier returns to 1. The catalog is kept.
    pub fn populate(&mut self, level: &LevelDescriptor) -> Result<()> {
        level.validate()?;
        self.tiles = Grid::new(level.width(), level.height());
        self.cookies = Grid::new(level.width(), level.height());
        for coord in level.playable_coords() {
            self.tiles.put(&coord, Some(Tile));
        }
        self.possible_swaps = None;
        self.combo_multiplier = 1;
        log::debug!("populated a {}x{} board with {} tiles", self.width(), self.height(), self.tiles.occupied());
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.tiles.width()
    }

    pub fn height(&self) -> usize {
        self.tiles.height()
    }

    /// A snapshot of every cookie on the board.
    pub fn cookies(&self) -> CookieSet {
        self.cookies.iter().map(|(_, cookie)| cookie).collect()
    }

    /// The number of playable cells.
    pub fn tile_count(&self) -> usize {
        self.tiles.occupied()
    }

    /// The cached possible swaps, or `None` if the board changed since they were last detected.
    pub fn possible_swaps(&self) -> Option<&SwapSet> {
        self.possible_swaps.as_ref()
    }

    pub fn combo_multiplier(&self) -> u32 {
        self.combo_multiplier
    }

    pub fn catalog(&self) -> &CookieCatalog {
        &self.catalog
    }

    /// Describes this board's tile layout as a level.
    pub fn descriptor(&self, target_score: u32, moves: u32) -> LevelDescriptor {
        LevelDescriptor {
            tiles: (0..self.height())
                .rev()
                .map(|row| {
                    (0..self.width())
                        .map(|column| u8::from(self.tiles.at(&Coord::new(column, row)).is_some()))
                        .collect()
                })
                .collect(),
            target_score,
            moves,
            cookie_types: self.catalog.len(),
        }
    }

    /// Starts a new combo; call once at the start of each turn.
    pub fn reset_combo_multiplier(&mut self) {
        self.combo_multiplier = 1;
    }

    /// Creates a cookie with a fresh handle and places it on the board.
    pub(super) fn create_cookie(&mut self, coord: Coord, kind: CookieType) -> Cookie {
        let cookie = Cookie::new(CookieId(self.next_id), kind, coord);
        self.next_id += 1;
        self.cookies.put(&coord, Some(cookie));
        self.possible_swaps = None;
        cookie
    }
}
