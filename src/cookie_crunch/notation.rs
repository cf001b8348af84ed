
use regex::Regex;

use crate::cookie_crunch::prelude::*;

/// One cell of a textual layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutCell {
    /// `#`: no tile; never holds a cookie.
    Void,
    /// `.`: a tile without a cookie.
    Empty,
    /// A type letter: a tile holding a cookie of that type.
    Cookie(CookieType),
}

impl LayoutCell {
    pub fn parse(ch: char) -> Result<LayoutCell> {
        match ch {
            '#' => Ok(LayoutCell::Void),
            '.' => Ok(LayoutCell::Empty),
            _   => Ok(LayoutCell::Cookie(CookieType::parse(ch)?))
        }
    }

    pub fn notate(&self) -> char {
        match self {
            LayoutCell::Void         => '#',
            LayoutCell::Empty        => '.',
            LayoutCell::Cookie(kind) => kind.notate()
        }
    }
}

/// A board written out as text, one row per line (or per `/`), top row first.
///
/// ```text
/// #UCD#
/// CCUNM
/// .DDUC
/// ```
///
/// Whitespace inside a row is ignored, so layouts may be indented or spaced out for readability.
#[derive(Clone, Debug)]
pub struct LayoutString {
    pub repr: String,
    rows: Vec<Vec<LayoutCell>>,
}

impl LayoutString {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The cell at a board coordinate (row 0 is the bottom line of the text).
    pub fn cell_at(&self, coord: &Coord) -> Option<LayoutCell> {
        coord
            .in_bounds(self.width(), self.height())
            .then(|| self.rows[self.height() - 1 - coord.row][coord.column])
    }

    /// The level this layout is played on: every non-void cell is a tile.
    pub fn level(&self, target_score: u32, moves: u32) -> Result<LevelDescriptor> {
        let level = LevelDescriptor {
            tiles: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&cell| u8::from(cell != LayoutCell::Void)).collect())
                .collect(),
            target_score,
            moves,
            cookie_types: DEFAULT_COOKIE_TYPES,
        };
        level.validate()?;
        Ok(level)
    }
}

impl std::str::FromStr for LayoutString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut rows = vec![];
        for line in s.split(['\n', '/']) {
            let row = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(LayoutCell::parse)
                .collect::<Result<Vec<LayoutCell>>>()?;
            if !row.is_empty() {
                rows.push(row);
            }
        }

        let Some(first) = rows.first() else {
            return Err(anyhow!("layout cannot be empty!"));
        };
        if let Some(row) = rows.iter().find(|row| row.len() != first.len()) {
            return Err(anyhow!("layout rows must have equal width, expected {} but received {}", first.len(), row.len()));
        }

        Ok(LayoutString { repr: s.to_owned(), rows })
    }
}

/// A pair of cells naming a swap, written `c,r c,r` or `c,r>c,r`.
#[derive(Clone, Debug)]
pub struct SwapString {
    pub repr: String,
    pub from: Coord,
    pub to: Coord,
}

impl std::str::FromStr for SwapString {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let pattern = Regex::new(r"^(?<from>\(?[0-9]+,[0-9]+\)?)\s*(>|\s)\s*(?<to>\(?[0-9]+,[0-9]+\)?)$")?;
        let Some(matches) = pattern.captures(s.trim()) else {
            return Err(anyhow!("could not parse swapstring {s}"));
        };

        let from = matches["from"].parse::<Coord>()?;
        let to = matches["to"].parse::<Coord>()?;
        if !from.is_adjacent(&to) {
            return Err(anyhow!("cells {from} and {to} are not adjacent"));
        }

        Ok(SwapString { repr: s.to_owned(), from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_read_top_down() {
        let layout = "#UC\n.DN".parse::<LayoutString>().unwrap();
        assert_eq!((layout.width(), layout.height()), (3, 2));
        assert_eq!(layout.cell_at(&Coord::new(0, 1)), Some(LayoutCell::Void));
        assert_eq!(layout.cell_at(&Coord::new(0, 0)), Some(LayoutCell::Empty));
        assert_eq!(layout.cell_at(&Coord::new(2, 1)), Some(LayoutCell::Cookie(CookieType::Croissant)));
        assert_eq!(layout.cell_at(&Coord::new(3, 0)), None);

        let level = layout.level(10, 2).unwrap();
        assert_eq!(level.tiles, vec![vec![0, 1, 1], vec![1, 1, 1]]);
    }

    #[test]
    fn layouts_ignore_whitespace_and_accept_slashes() {
        let spaced = "
            C U D
            N M S
        ".parse::<LayoutString>().unwrap();
        let slashed = "CUD/NMS".parse::<LayoutString>().unwrap();
        for coord in [Coord::new(0, 0), Coord::new(2, 1)] {
            assert_eq!(spaced.cell_at(&coord), slashed.cell_at(&coord));
        }
    }

    #[test]
    fn bad_layouts_are_rejected() {
        assert!("".parse::<LayoutString>().is_err());
        assert!("CU/C".parse::<LayoutString>().is_err());
        assert!("CX".parse::<LayoutString>().is_err());
    }

    #[test]
    fn swapstrings() {
        let swap = "3,4 4,4".parse::<SwapString>().unwrap();
        assert_eq!((swap.from, swap.to), (Coord::new(3, 4), Coord::new(4, 4)));
        let swap = "(0,1)>(0,0)".parse::<SwapString>().unwrap();
        assert_eq!((swap.from, swap.to), (Coord::new(0, 1), Coord::new(0, 0)));
        assert!("3,4 5,4".parse::<SwapString>().is_err());
        assert!("3,4".parse::<SwapString>().is_err());
    }
}
