//! Ball movement and collision resolution
//!
//! The ball lives on the grid and moves at most one cell per axis per frame.
//! Each axis has its own step interval, so the two components of its motion
//! are generally out of step with each other. When the cell it is heading for
//! is not free, the ball bounces instead of moving, and the kind of obstacle
//! decides how.

use super::board::destroy_block;
use super::consts::{
    BOUNCE_INTERVAL_MAX, BOUNCE_INTERVAL_MIN, HEIGHT, SERVE_INTERVAL_MAX, SERVE_INTERVAL_MIN,
    WIDTH,
};
use super::{Cell, Grid, Paddle, RandomSource, RenderSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ball {
    pub x: i32,
    pub y: i32,
    /// Frames between moves on each axis (smaller is faster)
    pub x_step_interval: u32,
    pub y_step_interval: u32,
    /// -1 or +1. Negative is left / up.
    pub x_direction: i32,
    pub y_direction: i32,
}

impl Ball {
    /// Ball parked at the serve position, halfway between the block field and
    /// the paddle, at the slowest serve speed
    pub fn resting(max_block_y: i32, paddle: &Paddle) -> Self {
        Self {
            x: (WIDTH / 2) as i32,
            y: (max_block_y + paddle.y) / 2,
            x_step_interval: SERVE_INTERVAL_MAX,
            y_step_interval: SERVE_INTERVAL_MAX,
            x_direction: 1,
            y_direction: 1,
        }
    }

    /// A fresh ball at the serve position, heading down at a random horizontal
    /// direction and speed.
    pub fn serve(max_block_y: i32, paddle: &Paddle, rng: &mut impl RandomSource) -> Self {
        let x_step_interval = rng.next_in_range(SERVE_INTERVAL_MIN, SERVE_INTERVAL_MAX);
        let y_step_interval = rng.next_in_range(SERVE_INTERVAL_MIN, SERVE_INTERVAL_MAX);
        let x_direction = if rng.next_bool() { 1 } else { -1 };
        Self {
            x_step_interval,
            y_step_interval,
            x_direction,
            ..Self::resting(max_block_y, paddle)
        }
    }

    /// Where the ball wants to be on `frame`
    fn target(&self, frame: u64) -> (i32, i32) {
        let due = |interval: u32| frame % interval as u64 == 0;
        let dx = if due(self.x_step_interval) { self.x_direction } else { 0 };
        let dy = if due(self.y_step_interval) { self.y_direction } else { 0 };
        (self.x + dx, self.y + dy)
    }
}

/// Advance the ball for `frame`. Returns `false` once the ball drops out of
/// the bottom of the playfield.
pub fn step_ball(
    ball: &mut Ball,
    grid: &mut Grid,
    blocks_left: &mut u32,
    score: &mut u32,
    frame: u64,
    rng: &mut impl RandomSource,
    surface: &mut impl RenderSurface,
) -> bool {
    let (next_x, next_y) = ball.target(frame);
    if (next_x, next_y) == (ball.x, ball.y) {
        return true;
    }
    if next_y >= HEIGHT as i32 {
        return false;
    }

    let width = WIDTH as i32;
    // Branch order matters: a free cell always wins, walls are checked
    // before anything on the grid.
    if grid.get(next_x, next_y) == Some(Cell::Empty) {
        grid.put(ball.x as usize, ball.y as usize, Cell::Empty, surface);
        grid.put(next_x as usize, next_y as usize, Cell::Ball, surface);
        ball.x = next_x;
        ball.y = next_y;
    } else if ball.y == 0 && (ball.x == 0 || ball.x == width - 1) {
        ball.x_direction = -ball.x_direction;
        ball.y_direction = -ball.y_direction;
    } else if next_x <= 0 || next_x >= width {
        ball.x_direction = -ball.x_direction;
    } else if next_y <= 0 {
        ball.y_direction = -ball.y_direction;
    } else if grid.cell(next_x as usize, next_y as usize) == Cell::Paddle {
        // Always back up. Without the y flip the ball rolls along the paddle.
        ball.y_direction = -ball.y_direction;
        if rng.next_bool() {
            ball.x_direction = -ball.x_direction;
        }
        ball.x_step_interval = rng.next_in_range(BOUNCE_INTERVAL_MIN, BOUNCE_INTERVAL_MAX);
        ball.y_step_interval = rng.next_in_range(BOUNCE_INTERVAL_MIN, BOUNCE_INTERVAL_MAX);
    } else {
        destroy_block(grid, next_x as usize, next_y as usize, blocks_left, score, surface);
        if rng.next_bool() {
            ball.x_direction = -ball.x_direction;
        }
        if rng.next_bool() {
            ball.y_direction = -ball.y_direction;
        }
    }
    true
}
