//! Gameplay simulation
//!
//! Everything that decides what happens on the playfield lives here: the grid,
//! board generation, paddle and ball movement, and the level/life state machine.
//! Nothing in this module touches the terminal. It talks to the outside world
//! only through [`RenderSurface`], [`RandomSource`] and the [`Key`] values the
//! caller feeds into [`Game::tick`].

pub mod ball;
pub mod board;
pub mod game;
pub mod grid;
pub mod paddle;

#[cfg(test)]
pub mod testing;

pub use ball::Ball;
pub use game::{Game, Phase};
pub use grid::{BlockColor, Cell, Grid};
pub use paddle::Paddle;

use rand::rngs::StdRng;
use rand::Rng;

/// Playfield and tuning constants
pub mod consts {
    /// Playfield dimensions in cells
    pub const WIDTH: usize = 60;
    pub const HEIGHT: usize = 36;

    pub const STARTING_LIVES: u32 = 5;
    /// Points for each destroyed block pair
    pub const BLOCK_POINTS: u32 = 10;

    /// First column and row of the block field
    pub const BLOCK_MARGIN: usize = 3;

    pub const PADDLE_MAX_LEN: i32 = 20;
    pub const PADDLE_MIN_LEN: i32 = 10;
    /// Frames between paddle moves
    pub const PADDLE_STEP_INTERVAL: u32 = 4;

    /// Step interval range for a freshly served ball (inclusive)
    pub const SERVE_INTERVAL_MIN: u32 = 6;
    pub const SERVE_INTERVAL_MAX: u32 = 15;
    /// Step interval range after a paddle bounce (inclusive)
    pub const BOUNCE_INTERVAL_MIN: u32 = 5;
    pub const BOUNCE_INTERVAL_MAX: u32 = 12;
}

/// A key press, already decoded from whatever the terminal delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Quit,
    Redraw,
    Pause,
    /// Any other key. Dismisses prompts, ignored during play.
    Other,
}

/// Footer fields shown next to the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Lives(u32),
    Level(u32),
    Score(u32),
    Paused(bool),
}

/// Where the simulation reports visible changes.
///
/// Called after every grid mutation. The simulation never reads back from it.
pub trait RenderSurface {
    fn set_cell(&mut self, x: usize, y: usize, cell: Cell);
    fn clear_screen(&mut self);
    fn set_status(&mut self, status: Status);
    /// Show pre-formatted lines centered on the playfield. An empty slice hides
    /// the current message.
    fn show_message(&mut self, lines: &[String]);
}

/// Randomness injected into the simulation
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`
    fn next_int(&mut self, bound: u32) -> u32;
    fn next_bool(&mut self) -> bool;

    /// Uniform integer in `[lo, hi]`
    fn next_in_range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + self.next_int(hi - lo + 1)
    }
}

impl RandomSource for StdRng {
    fn next_int(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }

    fn next_bool(&mut self) -> bool {
        self.gen_bool(0.5)
    }
}
