//! The player's paddle and how it moves

use std::ops::Range;

use super::consts::{HEIGHT, PADDLE_MAX_LEN, PADDLE_MIN_LEN, PADDLE_STEP_INTERVAL, WIDTH};
use super::{Cell, Grid, RenderSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paddle {
    /// Leftmost column
    pub x: i32,
    pub y: i32,
    pub length: i32,
    /// Cells per move: negative is left, positive is right, 0 is still
    pub direction: i32,
    /// Frames between moves
    pub step_interval: u32,
}

impl Paddle {
    /// A centered, still paddle sized for `level`
    pub fn for_level(level: u32) -> Self {
        let length = Self::length_for_level(level);
        Self {
            x: Self::centered_x(length),
            y: (11 * HEIGHT / 12) as i32,
            length,
            direction: 0,
            step_interval: PADDLE_STEP_INTERVAL,
        }
    }

    /// The paddle loses two cells every three levels, down to the minimum
    pub fn length_for_level(level: u32) -> i32 {
        let shrink = (level / 3).min(((PADDLE_MAX_LEN - PADDLE_MIN_LEN) / 2) as u32) as i32;
        (PADDLE_MAX_LEN - 2 * shrink).max(PADDLE_MIN_LEN)
    }

    fn centered_x(length: i32) -> i32 {
        (WIDTH as i32 - length) / 2
    }

    pub fn recenter(&mut self) {
        self.x = Self::centered_x(self.length);
        self.direction = 0;
    }

    pub fn columns(&self) -> Range<i32> {
        self.x..self.x + self.length
    }

    pub fn is_due(&self, frame: u64) -> bool {
        self.direction != 0 && frame % self.step_interval as u64 == 0
    }

    /// Wipe the paddle row and draw the paddle at its current position
    pub fn place(&self, grid: &mut Grid) {
        let row = self.y as usize;
        for x in 0..WIDTH {
            let cell = if self.columns().contains(&(x as i32)) {
                Cell::Paddle
            } else {
                Cell::Empty
            };
            grid.set(x, row, cell);
        }
    }
}

/// Shift the paddle by its direction, one cell at a time.
///
/// The whole move is refused if it would leave the playfield or run into the
/// ball. Returns whether the paddle moved.
pub fn move_paddle(paddle: &mut Paddle, grid: &mut Grid, surface: &mut impl RenderSurface) -> bool {
    let d = paddle.direction;
    let fits = if d < 0 {
        paddle.x + d >= 0
    } else if d > 0 {
        paddle.x + paddle.length + d <= WIDTH as i32
    } else {
        false
    };
    if !fits {
        return false;
    }

    let row = paddle.y;
    let entering = if d < 0 {
        paddle.x + d..paddle.x
    } else {
        paddle.x + paddle.length..paddle.x + paddle.length + d
    };
    if entering.clone().any(|x| grid.get(x, row) == Some(Cell::Ball)) {
        return false;
    }

    for _ in 0..d.abs() {
        let (entered, vacated) = if d < 0 {
            (paddle.x - 1, paddle.x + paddle.length - 1)
        } else {
            (paddle.x + paddle.length, paddle.x)
        };
        grid.put(entered as usize, row as usize, Cell::Paddle, surface);
        grid.put(vacated as usize, row as usize, Cell::Empty, surface);
        paddle.x += d.signum();
    }
    true
}
