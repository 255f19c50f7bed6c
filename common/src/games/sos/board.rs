use super::types::{Cell, Position, Symbol};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Vec<Cell>>,
    size: usize,
    filled: usize,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Empty; size]; size],
            size,
            filled: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    pub fn filled_count(&self) -> usize {
        self.filled
    }

    pub fn is_full(&self) -> bool {
        self.filled >= self.capacity()
    }

    /// Signed so that line offsets stepping off the edge can be tested directly.
    pub fn is_in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn symbol_at(&self, row: isize, col: isize) -> Option<Symbol> {
        if !self.is_in_bounds(row, col) {
            return None;
        }
        self.cells[row as usize][col as usize].symbol()
    }

    pub fn is_empty_at(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(Cell::Empty)
    }

    pub fn place(&mut self, row: usize, col: usize, symbol: Symbol) -> bool {
        if !self.is_empty_at(row, col) {
            return false;
        }
        self.cells[row][col] = Cell::Filled(symbol);
        self.filled += 1;
        true
    }

    /// Only the preview path may empty a cell again; it restores what it placed.
    pub(super) fn clear(&mut self, row: usize, col: usize) {
        if let Some(Cell::Filled(_)) = self.get(row, col) {
            self.cells[row][col] = Cell::Empty;
            self.filled -= 1;
        }
    }

    /// Row-major list of free cells.
    pub fn empty_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for (row, line) in self.cells.iter().enumerate() {
            for (col, &cell) in line.iter().enumerate() {
                if cell == Cell::Empty {
                    cells.push(Position::new(row, col));
                }
            }
        }
        cells
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }
}
