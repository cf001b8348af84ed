use regex::Regex;

use crate::cookie_crunch::prelude::*;

/// Simple board coordinate. Column 0 is the left edge, row 0 is the bottom row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub column: usize,
    pub row: usize,
}

impl std::str::FromStr for Coord {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let pattern = Regex::new(r"^\(?\s*(?<column>[0-9]+)\s*,\s*(?<row>[0-9]+)\s*\)?$")?;
        let Some(captures) = pattern.captures(s.trim()) else {
            return Err(anyhow!("expected a coordinate of the form column,row; received {s}"));
        };
        let column = captures["column"].parse::<usize>()?;
        let row = captures["row"].parse::<usize>()?;
        Ok(Coord { column, row })
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.column, self.row)
    }
}

impl Coord {
    /// Determines whether or not the coord lies on a board of the given size.
    pub fn in_bounds(&self, width: usize, height: usize) -> bool {
        self.column < width && self.row < height
    }

    /// Whether two coordinates share an edge.
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        OffsetCoord::from(self).manhattan(OffsetCoord::from(other)) == 1
    }

    /// Constructs a new coord.
    pub fn new(column: usize, row: usize) -> Coord {
        Coord { column, row }
    }

    /// The canonical notation of the coord, as accepted by `FromStr`.
    pub fn notate(&self) -> String {
        format!("{},{}", self.column, self.row)
    }
}

// Simple offset pair that can be used to calculate neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetCoord {
    pub columns: isize,
    pub rows: isize,
}

/// Offsets that turn a coordinate into one of its orthogonal neighbours.
pub static ORTHOGONAL_OFFSETS: [OffsetCoord; 4] = [
    OffsetCoord { columns: -1, rows: 0 },
    OffsetCoord { columns: 1, rows: 0 },
    OffsetCoord { columns: 0, rows: -1 },
    OffsetCoord { columns: 0, rows: 1 },
];

/// The right and upper neighbours; visiting only these from every cell covers each adjacent pair once.
pub static FORWARD_OFFSETS: [OffsetCoord; 2] = [
    OffsetCoord { columns: 1, rows: 0 },
    OffsetCoord { columns: 0, rows: 1 },
];

/// Unit steps towards the left and towards the bottom of the board.
pub static LEFT: OffsetCoord = OffsetCoord { columns: -1, rows: 0 };
pub static DOWN: OffsetCoord = OffsetCoord { columns: 0, rows: -1 };

impl OffsetCoord {
    /// Coerces the offset into a coordinate, if it is non-negative and on a board of the given size.
    pub fn coerce(&self, width: usize, height: usize) -> Option<Coord> {
        self.in_bounds_signed(width, height).then(|| Coord {
            column: self.columns as usize,
            row: self.rows as usize,
        })
    }

    /// Determines whether or not the offset names a cell on a board of the given size.
    pub fn in_bounds_signed(&self, width: usize, height: usize) -> bool {
        0 <= self.columns && (self.columns as usize) < width && 0 <= self.rows && (self.rows as usize) < height
    }

    /// The taxicab distance between two points.
    pub fn manhattan(&self, other: OffsetCoord) -> usize {
        self.columns.abs_diff(other.columns) + self.rows.abs_diff(other.rows)
    }

    /// Constructs a new offset coord.
    pub fn new(columns: isize, rows: isize) -> OffsetCoord {
        OffsetCoord { columns, rows }
    }

    /// The same offset repeated `n` times.
    pub fn scaled(&self, n: isize) -> OffsetCoord {
        OffsetCoord { columns: self.columns * n, rows: self.rows * n }
    }
}

// C -> OC

impl From<Coord> for OffsetCoord {
    fn from(value: Coord) -> Self {
        OffsetCoord {
            columns: value.column as isize,
            rows: value.row as isize,
        }
    }
}

impl From<&Coord> for OffsetCoord {
    fn from(value: &Coord) -> Self {
        OffsetCoord::from(*value)
    }
}

// OC + OC

impl Add<OffsetCoord> for OffsetCoord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        OffsetCoord {
            columns: self.columns + rhs.columns,
            rows: self.rows + rhs.rows,
        }
    }
}

// C + OC

impl Add<OffsetCoord> for &Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        OffsetCoord::from(self) + rhs
    }
}

impl Add<OffsetCoord> for Coord {
    type Output = OffsetCoord;
    fn add(self, rhs: OffsetCoord) -> Self::Output {
        &self + rhs
    }
}

// C - C

impl Sub<&Coord> for &Coord {
    type Output = OffsetCoord;
    fn sub(self, rhs: &Coord) -> Self::Output {
        OffsetCoord {
            columns: self.column as isize - rhs.column as isize,
            rows: self.row as isize - rhs.row as isize,
        }
    }
}

impl Sub<Coord> for Coord {
    type Output = OffsetCoord;
    fn sub(self, rhs: Coord) -> Self::Output {
        &self - &rhs
    }
}
