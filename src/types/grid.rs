//! Fixed-size grids of optional indices.

use crate::parser::NONE;

/// A row-major `width` x `height` grid whose cells either reference an
/// entry of some collection or are empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<usize>>,
}

/// A cell that references past the end of its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    pub x: usize,
    pub y: usize,
    pub value: usize,
    pub bound: usize,
}

impl Grid {
    /// Create a grid with every cell empty.
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    /// Build a grid from raw parsed cells, where [`NONE`] marks an empty cell.
    ///
    /// Returns `None` if the cell count does not match the dimensions or a
    /// cell is negative without being the sentinel.
    pub fn from_raw(width: usize, height: usize, raw: &[i64]) -> Option<Self> {
        if raw.len() != width * height {
            return None;
        }

        let cells = raw
            .iter()
            .map(|&v| match v {
                NONE => Some(None),
                v if v >= 0 => usize::try_from(v).ok().map(Some),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at the given position; `None` both for empty cells and
    /// positions outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// Iterate over all cells with their positions, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Option<usize>)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (i % width, i / width, cell))
    }

    /// Iterate over the non-empty cells only.
    pub fn iter_filled(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.iter_cells()
            .filter_map(|(x, y, cell)| cell.map(|index| (x, y, index)))
    }

    /// Rows as slices, for display. A zero-width grid has `height` empty
    /// rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Option<usize>]> + '_ {
        let width = self.width;
        (0..self.height).map(move |y| &self.cells[y * width..(y + 1) * width])
    }

    /// Find the first cell whose index is not below `bound`.
    pub fn check_bound(&self, bound: usize) -> std::result::Result<(), OutOfRange> {
        match self.iter_filled().find(|&(_, _, value)| value >= bound) {
            Some((x, y, value)) => Err(OutOfRange { x, y, value, bound }),
            None => Ok(()),
        }
    }
}
