//! Board generation and block destruction
//!
//! Blocks always come in horizontal pairs of the same color, and the left
//! member of a pair always sits on an odd column. [`destroy_block`] relies on
//! that parity to find a block's partner, so [`generate`] must keep it.

use super::consts::{BLOCK_MARGIN, BLOCK_POINTS, HEIGHT, WIDTH};
use super::{Ball, BlockColor, Cell, Grid, Paddle, RandomSource, RenderSurface, Status};

/// One past the lowest row that gets blocks on `level`.
///
/// Starts at a third of the playfield and grows every other level, capped at
/// five sixths of it.
pub fn max_block_row(level: u32) -> i32 {
    let growth = (level / 2).min((HEIGHT / 2) as u32);
    (HEIGHT / 3) as i32 + growth as i32
}

/// Build a fresh grid holding the paddle, the ball and a random block field.
///
/// Returns the grid and the number of block pairs placed.
pub fn generate(
    level: u32,
    max_block_y: i32,
    paddle: &Paddle,
    ball: &Ball,
    rng: &mut impl RandomSource,
) -> (Grid, u32) {
    let mut grid = Grid::new();
    for x in paddle.columns() {
        grid.set(x as usize, paddle.y as usize, Cell::Paddle);
    }
    grid.set(ball.x as usize, ball.y as usize, Cell::Ball);

    let mut pairs = 0;
    let last_row = max_block_y.clamp(0, HEIGHT as i32) as usize;
    for x in (BLOCK_MARGIN..WIDTH - BLOCK_MARGIN).step_by(2) {
        for y in BLOCK_MARGIN..last_row {
            let color = BlockColor::ALL[rng.next_int(BlockColor::ALL.len() as u32) as usize];
            grid.set(x, y, Cell::Block(color));
            grid.set(x + 1, y, Cell::Block(color));
            pairs += 1;
        }
    }

    log::debug!("level {level}: generated {pairs} block pairs down to row {max_block_y}");
    (grid, pairs)
}

/// Column offset from a block cell to its partner
fn partner_offset(x: usize) -> isize {
    if x % 2 == 1 {
        1
    } else {
        -1
    }
}

/// Remove the block pair containing `(x, y)` and score it.
///
/// # Panics
///
/// If `(x, y)` is not a block, or its partner is missing or a different color.
/// Either means the grid has been corrupted.
pub fn destroy_block(
    grid: &mut Grid,
    x: usize,
    y: usize,
    blocks_left: &mut u32,
    score: &mut u32,
    surface: &mut impl RenderSurface,
) {
    let hit = grid.cell(x, y);
    assert!(hit.is_block(), "destroy_block on {hit:?} at ({x}, {y})");
    let partner_x = x as isize + partner_offset(x);
    assert!(
        grid.get(partner_x as i32, y as i32) == Some(hit),
        "block at ({x}, {y}) has no matching partner at ({partner_x}, {y})"
    );
    assert!(*blocks_left > 0, "destroy_block with no blocks left");

    grid.put(x, y, Cell::Empty, surface);
    grid.put(partner_x as usize, y, Cell::Empty, surface);

    *blocks_left -= 1;
    *score += BLOCK_POINTS;
    surface.set_status(Status::Score(*score));
}
