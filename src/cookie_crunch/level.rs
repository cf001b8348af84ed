use serde::{Deserialize, Serialize};

use crate::cookie_crunch::prelude::*;

fn default_cookie_types() -> usize {
    DEFAULT_COOKIE_TYPES
}

/// Everything a board needs to know about a level: which cells are playable, the score to reach,
/// and the number of swaps the player may spend getting there.
///
/// The mask is stored as it appears in a level file, first row at the top. Boards address rows
/// from the bottom, so `playable_coords` inverts the row order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    #[serde(alias = "cells")]
    pub tiles: Vec<Vec<u8>>,
    pub target_score: u32,
    pub moves: u32,
    #[serde(default = "default_cookie_types")]
    pub cookie_types: usize,
}

impl LevelDescriptor {
    /// Parses and validates a JSON level.
    pub fn parse(json: &str) -> Result<LevelDescriptor> {
        let level: LevelDescriptor = serde_json::from_str(json).context("malformed level descriptor")?;
        level.validate()?;
        Ok(level)
    }

    /// Builds a level from text rows, top row first; `#` marks a cell without a tile and any other
    /// character a playable one.
    pub fn from_mask(rows: &[&str], target_score: u32, moves: u32) -> Result<LevelDescriptor> {
        let tiles = rows
            .iter()
            .map(|row| row.chars().map(|ch| u8::from(ch != '#')).collect())
            .collect();
        let level = LevelDescriptor { tiles, target_score, moves, cookie_types: DEFAULT_COOKIE_TYPES };
        level.validate()?;
        Ok(level)
    }

    /// A fully playable rectangular level.
    pub fn filled(width: usize, height: usize, target_score: u32, moves: u32) -> LevelDescriptor {
        LevelDescriptor {
            tiles: vec![vec![1; width]; height],
            target_score,
            moves,
            cookie_types: DEFAULT_COOKIE_TYPES,
        }
    }

    /// Checks the level for the configuration errors that would make a board unusable.
    pub fn validate(&self) -> Result<()> {
        let Some(first) = self.tiles.first() else {
            bail!("level mask has no rows");
        };
        if first.is_empty() {
            bail!("level mask has no columns");
        }
        if let Some((i, row)) = self.tiles.iter().enumerate().find(|(_, row)| row.len() != first.len()) {
            bail!("level mask is not rectangular: row {i} has {} cells, expected {}", row.len(), first.len());
        }
        if let Some(v) = self.tiles.iter().flatten().find(|&&v| v > 1) {
            bail!("level mask may only contain 0 or 1, found {v}");
        }
        if self.moves == 0 {
            bail!("level must allow at least one move");
        }
        self.catalog()?;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.tiles.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the board cell (bottom-up addressing) has a tile.
    pub fn is_playable(&self, coord: &Coord) -> bool {
        coord.in_bounds(self.width(), self.height())
            && self.tiles[self.height() - 1 - coord.row][coord.column] == 1
    }

    /// Every playable board cell, in row-major order from the bottom row.
    pub fn playable_coords(&self) -> Vec<Coord> {
        let (width, height) = (self.width(), self.height());
        (0..height)
            .flat_map(|row| (0..width).map(move |column| Coord::new(column, row)))
            .filter(|c| self.is_playable(c))
            .collect()
    }

    /// The cookie types in play on this level.
    pub fn catalog(&self) -> Result<CookieCatalog> {
        CookieCatalog::new(self.cookie_types).context("invalid cookieTypes in level descriptor")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl std::str::FromStr for LevelDescriptor {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        LevelDescriptor::parse(s)
    }
}
