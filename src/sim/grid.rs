//! The playfield grid and its cell vocabulary

use super::consts::{HEIGHT, WIDTH};
use super::RenderSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockColor {
    Red,
    Blue,
    Green,
}

impl BlockColor {
    pub const ALL: [BlockColor; 3] = [BlockColor::Red, BlockColor::Blue, BlockColor::Green];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Ball,
    Paddle,
    Block(BlockColor),
}

impl Cell {
    pub fn is_block(self) -> bool {
        matches!(self, Cell::Block(_))
    }
}

/// Fixed-size cell array, indexed `[y][x]`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    pub fn in_bounds(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < WIDTH && (y as usize) < HEIGHT
    }

    /// Cell at signed coordinates, `None` outside the playfield
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if Self::in_bounds(x, y) {
            Some(self.cells[y as usize][x as usize])
        } else {
            None
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y][x] = cell;
    }

    /// Set a cell and tell the surface about it
    pub fn put(&mut self, x: usize, y: usize, cell: Cell, surface: &mut impl RenderSurface) {
        self.cells[y][x] = cell;
        surface.set_cell(x, y, cell);
    }

    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; WIDTH]; HEIGHT];
    }

    /// All cells as `(x, y, cell)`, row by row
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, &c)| (x, y, c)))
    }

    pub fn block_cells(&self) -> usize {
        self.iter().filter(|(_, _, c)| c.is_block()).count()
    }

    /// Push every cell to the surface
    pub fn repaint(&self, surface: &mut impl RenderSurface) {
        for (x, y, cell) in self.iter() {
            surface.set_cell(x, y, cell);
        }
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|c| match c {
                    Cell::Empty => '.',
                    Cell::Ball => 'O',
                    Cell::Paddle => '=',
                    Cell::Block(BlockColor::Red) => 'r',
                    Cell::Block(BlockColor::Blue) => 'b',
                    Cell::Block(BlockColor::Green) => 'g',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
