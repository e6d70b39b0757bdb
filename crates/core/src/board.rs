//! Board module - manages the game grid
//!
//! The board is a 12x20 grid where each cell is empty or holds a locked block.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..19 (top to bottom).
//!
//! Every occupied cell records the color it was locked with. Bonus mode only
//! toggles a display flag on top of that color, so zone and section checks
//! always see the recorded color.

use crate::types::{zone_color_for, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// A locked block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    /// Recorded placement color (gray when locked outside its zone).
    pub color: Color,
    /// Locked during the current bonus activation.
    pub placed_during_bonus: bool,
    /// Shown in the bonus color instead of `color`.
    pub bonus_display: bool,
}

impl Block {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            placed_during_bonus: false,
            bonus_display: false,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Block)`: Occupied cell
pub type Cell = Option<Block>;

/// The game board - 12 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Check if position is inside the board
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn cell(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.cell(x, y), Some(Some(_)))
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.cell(x, y), Some(None))
    }

    /// Write a block at (x, y)
    ///
    /// Blocks placed during bonus mode start out in the bonus display.
    /// Returns false (and writes nothing) if out of bounds.
    pub fn place(&mut self, x: i8, y: i8, color: Color, during_bonus: bool) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                debug_assert!(self.cells[idx].is_none(), "place() over occupied cell");
                self.cells[idx] = Some(Block {
                    color,
                    placed_during_bonus: during_bonus,
                    bonus_display: during_bonus,
                });
                true
            }
            None => false,
        }
    }

    /// Empty the cell at (x, y)
    pub fn clear(&mut self, x: i8, y: i8) {
        if let Some(idx) = Self::index(x, y) {
            self.cells[idx] = None;
        }
    }

    /// Zone color of a column
    pub fn zone_color_for(&self, x: i8) -> Color {
        zone_color_for(x)
    }

    /// Check if every cell in `start_col..=end_col` of `row` is occupied with
    /// recorded color `expected`
    pub fn is_section_complete(&self, row: usize, start_col: u8, end_col: u8, expected: Color) -> bool {
        if row >= BOARD_HEIGHT as usize || end_col >= BOARD_WIDTH || start_col > end_col {
            return false;
        }
        let start = row * BOARD_WIDTH as usize;
        self.cells[start + start_col as usize..=start + end_col as usize]
            .iter()
            .all(|cell| matches!(cell, Some(block) if block.color == expected))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Check if a row holds a block locked during the current bonus activation
    pub fn row_has_bonus_cells(&self, row: usize) -> bool {
        if row >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(row)
            .iter()
            .any(|cell| matches!(cell, Some(block) if block.placed_during_bonus))
    }

    /// Clear `start_col..=end_col` of `row` and shift that column range down
    ///
    /// Rows above `row` move down by one inside the range only; the top row of
    /// the range becomes empty. Columns outside the range are untouched.
    pub fn collapse_row_range(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row >= BOARD_HEIGHT as usize || end_col >= BOARD_WIDTH || start_col > end_col {
            return;
        }

        let width = BOARD_WIDTH as usize;
        let cols = start_col as usize..=end_col as usize;

        // copy_within handles the per-row slice move without allocation
        for y in (1..=row).rev() {
            let src = (y - 1) * width;
            let dst = y * width;
            self.cells
                .copy_within(src + cols.start()..=src + cols.end(), dst + cols.start());
        }

        for cell in &mut self.cells[*cols.start()..=*cols.end()] {
            *cell = None;
        }
    }

    /// Clear a whole row and shift every row above down by one
    pub fn collapse_row(&mut self, row: usize) {
        self.collapse_row_range(row, 0, BOARD_WIDTH - 1);
    }

    /// Set or clear the bonus display flag on every occupied cell
    pub fn set_bonus_display_all(&mut self, on: bool) {
        for block in self.cells.iter_mut().flatten() {
            block.bonus_display = on;
        }
    }

    /// Forget which blocks were locked during a bonus activation
    pub fn clear_bonus_placement(&mut self) {
        for block in self.cells.iter_mut().flatten() {
            block.placed_during_bonus = false;
        }
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get one row as a slice
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_HEIGHT as usize).map(|y| self.row(y).to_vec()).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
