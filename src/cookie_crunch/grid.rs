use crate::cookie_crunch::prelude::*;

/// A fixed-size W x H store of optional values, addressed by `(column, row)`.
///
/// Storage is a flat row-major vector (`row * width + column`), and iteration is row-major
/// from the bottom row upwards. The checked accessors return an error for coordinates outside
/// the grid; the crate-internal ones index directly and panic instead, for engine paths that
/// only ever visit coordinates they produced themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    /// Creates an empty grid.
    pub fn new(width: usize, height: usize) -> Grid<T> {
        Grid {
            width,
            height,
            cells: std::iter::repeat_with(|| None).take(width * height).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the coordinate lies within the grid.
    pub fn in_bounds(&self, coord: &Coord) -> bool {
        coord.in_bounds(self.width, self.height)
    }

    /// Gets the value at a coordinate, if any.
    pub fn get(&self, coord: &Coord) -> Result<Option<&T>> {
        let i = self.index(coord)?;
        Ok(self.cells[i].as_ref())
    }

    /// Gets a mutable reference to the value at a coordinate, if any.
    pub fn get_mut(&mut self, coord: &Coord) -> Result<Option<&mut T>> {
        let i = self.index(coord)?;
        Ok(self.cells[i].as_mut())
    }

    /// Stores a value (or clears the cell with `None`), returning what was there.
    pub fn set(&mut self, coord: &Coord, value: Option<T>) -> Result<Option<T>> {
        let i = self.index(coord)?;
        Ok(std::mem::replace(&mut self.cells[i], value))
    }

    /// Empties a cell, returning what was there.
    pub fn take(&mut self, coord: &Coord) -> Result<Option<T>> {
        self.set(coord, None)
    }

    /// Exchanges the contents of two cells.
    pub fn swap(&mut self, a: &Coord, b: &Coord) -> Result<()> {
        let [ia, ib] = [self.index(a)?, self.index(b)?];
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Every coordinate of the grid, row-major from the bottom row.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<T> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| Coord::new(i % width, i / width))
    }

    /// Every occupied cell with its value, row-major from the bottom row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|value| (Coord::new(i % width, i / width), value))
        })
    }

    /// The number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn index(&self, coord: &Coord) -> Result<usize> {
        if self.in_bounds(coord) {
            Ok(coord.row * self.width + coord.column)
        } else {
            Err(anyhow!(
                "invalid coordinate {coord} on a {}x{} grid",
                self.width,
                self.height
            ))
        }
    }
}

impl<T> Grid<T> {
    /// Unchecked read; engine use only.
    pub(crate) fn at(&self, coord: &Coord) -> Option<&T> {
        debug_assert!(self.in_bounds(coord), "{coord} out of bounds");
        self.cells[coord.row * self.width + coord.column].as_ref()
    }

    /// Unchecked mutable read; engine use only.
    pub(crate) fn at_mut(&mut self, coord: &Coord) -> Option<&mut T> {
        debug_assert!(self.in_bounds(coord), "{coord} out of bounds");
        self.cells[coord.row * self.width + coord.column].as_mut()
    }

    /// Unchecked write; engine use only.
    pub(crate) fn put(&mut self, coord: &Coord, value: Option<T>) -> Option<T> {
        debug_assert!(self.in_bounds(coord), "{coord} out of bounds");
        std::mem::replace(&mut self.cells[coord.row * self.width + coord.column], value)
    }

    /// Unchecked exchange; engine use only.
    pub(crate) fn swap_unchecked(&mut self, a: &Coord, b: &Coord) {
        self.cells.swap(a.row * self.width + a.column, b.row * self.width + b.column);
    }
}
