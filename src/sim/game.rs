//! Level and life progression
//!
//! A [`Game`] walks through its [`Phase`]s under the caller's control. The
//! caller owns the clock and the prompts: it calls the method matching the
//! current phase and decides what to show the player in between.

use super::ball::step_ball;
use super::board::{generate, max_block_row};
use super::consts::STARTING_LIVES;
use super::paddle::move_paddle;
use super::{Ball, Cell, Grid, Key, Paddle, RandomSource, RenderSurface, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Board for the current level not built yet
    LevelStart,
    /// Ball and paddle need resetting for a new life
    LifeStart,
    Playing,
    /// The ball fell out; `lives` is already decremented
    LifeLost,
    /// Every block is gone
    LevelCleared,
    /// Out of lives
    GameOver,
    /// The player asked to leave
    Quit,
}

/// Extra lives handed out at the start of `level`
pub fn lives_bonus(level: u32) -> u32 {
    match level {
        0..=1 => 0,
        2..=9 => 2,
        10..=19 => 1,
        20..=39 if level % 2 == 0 => 1,
        40..=59 if level % 4 == 0 => 1,
        _ => 0,
    }
}

pub struct Game {
    pub level: u32,
    pub score: u32,
    pub lives: u32,
    phase: Phase,
    grid: Grid,
    ball: Ball,
    paddle: Paddle,
    max_block_y: i32,
    /// Block pairs still on the board
    blocks_left: u32,
    frame: u64,
    paused: bool,
}

impl Game {
    pub fn new(start_level: u32) -> Self {
        let level = start_level.max(1);
        let max_block_y = max_block_row(level);
        let paddle = Paddle::for_level(level);
        Self {
            level,
            score: 0,
            lives: STARTING_LIVES,
            phase: Phase::LevelStart,
            grid: Grid::new(),
            ball: Ball::resting(max_block_y, &paddle),
            paddle,
            max_block_y,
            blocks_left: 0,
            frame: 0,
            paused: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn blocks_left(&self) -> u32 {
        self.blocks_left
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Build the board for the current level and hand out bonus lives.
    pub fn start_level(&mut self, rng: &mut impl RandomSource) {
        debug_assert_eq!(self.phase, Phase::LevelStart);
        self.max_block_y = max_block_row(self.level);
        self.paddle = Paddle::for_level(self.level);
        self.ball = Ball::resting(self.max_block_y, &self.paddle);
        self.lives += lives_bonus(self.level);

        let (grid, pairs) = generate(self.level, self.max_block_y, &self.paddle, &self.ball, rng);
        self.grid = grid;
        self.blocks_left = pairs;

        log::info!(
            "Level {} starting: {} lives, {} block pairs, paddle length {}",
            self.level,
            self.lives,
            pairs,
            self.paddle.length
        );
        self.phase = Phase::LifeStart;
    }

    /// Serve a new ball, recenter the paddle and repaint everything.
    pub fn start_life(&mut self, rng: &mut impl RandomSource, surface: &mut impl RenderSurface) {
        debug_assert_eq!(self.phase, Phase::LifeStart);
        if self.grid.get(self.ball.x, self.ball.y) == Some(Cell::Ball) {
            self.grid.set(self.ball.x as usize, self.ball.y as usize, Cell::Empty);
        }
        self.ball = Ball::serve(self.max_block_y, &self.paddle, rng);
        self.grid.set(self.ball.x as usize, self.ball.y as usize, Cell::Ball);

        self.paddle.recenter();
        self.paddle.place(&mut self.grid);

        self.frame = 0;
        self.paused = false;
        log::debug!(
            "Life start: ball at ({}, {}) every ({}, {}) frames",
            self.ball.x,
            self.ball.y,
            self.ball.x_step_interval,
            self.ball.y_step_interval
        );

        self.redraw(surface);
        self.phase = Phase::Playing;
    }

    /// Push the whole grid and every status field to the surface
    pub fn redraw(&self, surface: &mut impl RenderSurface) {
        surface.clear_screen();
        self.grid.repaint(surface);
        surface.set_status(Status::Lives(self.lives));
        surface.set_status(Status::Level(self.level));
        surface.set_status(Status::Score(self.score));
        surface.set_status(Status::Paused(self.paused));
    }

    /// Play one frame with at most one key press.
    pub fn tick(
        &mut self,
        key: Option<Key>,
        rng: &mut impl RandomSource,
        surface: &mut impl RenderSurface,
    ) -> Phase {
        if self.phase != Phase::Playing {
            return self.phase;
        }
        self.frame += 1;

        match key {
            Some(Key::Quit) => {
                self.quit();
                return self.phase;
            }
            Some(Key::Pause) => {
                self.paused = !self.paused;
                log::debug!("Paused: {}", self.paused);
                surface.set_status(Status::Paused(self.paused));
            }
            Some(Key::Left) if !self.paused => self.paddle.direction = -1,
            Some(Key::Right) if !self.paused => self.paddle.direction = 1,
            Some(Key::Redraw) => self.redraw(surface),
            _ => {}
        }
        if self.paused {
            return self.phase;
        }

        if self.paddle.is_due(self.frame) && !move_paddle(&mut self.paddle, &mut self.grid, surface) {
            log::trace!("Paddle held at column {}", self.paddle.x);
        }

        let in_play = step_ball(
            &mut self.ball,
            &mut self.grid,
            &mut self.blocks_left,
            &mut self.score,
            self.frame,
            rng,
            surface,
        );
        if !in_play {
            self.lives = self.lives.saturating_sub(1);
            surface.set_status(Status::Lives(self.lives));
            log::info!("Ball lost on level {}, {} lives left", self.level, self.lives);
            self.phase = Phase::LifeLost;
        } else if self.blocks_left == 0 {
            log::info!("Level {} cleared, score {}", self.level, self.score);
            self.phase = Phase::LevelCleared;
        }
        self.phase
    }

    /// Move past a lost life or a cleared level.
    pub fn advance(&mut self) -> Phase {
        match self.phase {
            Phase::LifeLost if self.lives > 0 => self.phase = Phase::LifeStart,
            Phase::LifeLost => {
                log::info!("Game over on level {} with score {}", self.level, self.score);
                self.phase = Phase::GameOver;
            }
            Phase::LevelCleared => {
                self.level = self.level.saturating_add(1);
                self.phase = Phase::LevelStart;
            }
            _ => {}
        }
        self.phase
    }

    pub fn quit(&mut self) {
        log::info!("Quit on level {} with score {}", self.level, self.score);
        self.phase = Phase::Quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::consts::{HEIGHT, WIDTH};
    use crate::sim::testing::{RecordingSurface, ScriptedRandom};
    use crate::sim::BlockColor;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn playing(level: u32, seed: u64) -> (Game, StdRng, RecordingSurface) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut surface = RecordingSurface::default();
        let mut game = Game::new(level);
        game.start_level(&mut rng);
        game.start_life(&mut rng, &mut surface);
        (game, rng, surface)
    }

    fn ball_cells(game: &Game) -> usize {
        game.grid().iter().filter(|(_, _, c)| *c == Cell::Ball).count()
    }

    /// Put the ball somewhere specific, keeping the grid in sync
    fn move_ball_to(game: &mut Game, ball: Ball) {
        game.grid.set(game.ball.x as usize, game.ball.y as usize, Cell::Empty);
        game.grid.set(ball.x as usize, ball.y as usize, Cell::Ball);
        game.ball = ball;
    }

    #[test]
    fn test_lives_bonus_schedule() {
        assert_eq!(lives_bonus(1), 0);
        assert_eq!(lives_bonus(2), 2);
        assert_eq!(lives_bonus(9), 2);
        assert_eq!(lives_bonus(10), 1);
        assert_eq!(lives_bonus(19), 1);
        assert_eq!(lives_bonus(20), 1);
        assert_eq!(lives_bonus(21), 0);
        assert_eq!(lives_bonus(38), 1);
        assert_eq!(lives_bonus(39), 0);
        assert_eq!(lives_bonus(40), 1);
        assert_eq!(lives_bonus(42), 0);
        assert_eq!(lives_bonus(44), 1);
        assert_eq!(lives_bonus(56), 1);
        assert_eq!(lives_bonus(60), 0);
        assert_eq!(lives_bonus(64), 0);
    }

    #[test]
    fn test_new_game_waits_for_level_start() {
        let game = Game::new(0);
        assert_eq!(game.level, 1);
        assert_eq!(game.lives, STARTING_LIVES);
        assert_eq!(game.score, 0);
        assert_eq!(game.phase(), Phase::LevelStart);
    }

    #[test]
    fn test_start_level_builds_board() {
        let mut game = Game::new(1);
        game.start_level(&mut StdRng::seed_from_u64(1));

        assert_eq!(game.phase(), Phase::LifeStart);
        assert_eq!(game.blocks_left(), 27 * 9);
        assert_eq!(game.grid().block_cells(), 2 * 27 * 9);
        assert_eq!(game.lives, 5);
        assert_eq!(game.paddle().length, 20);

        let mut game = Game::new(6);
        game.start_level(&mut StdRng::seed_from_u64(1));
        assert_eq!(game.lives, 7);
        assert_eq!(game.paddle().length, 16);
        assert_eq!(game.blocks_left(), 27 * 12);
    }

    #[test]
    fn test_start_life_serves_and_repaints() {
        let (game, _, surface) = playing(1, 5);

        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!((game.ball().x, game.ball().y), (30, 22));
        assert_eq!(game.ball().y_direction, 1);
        assert!((6..=15).contains(&game.ball().x_step_interval));
        assert!((6..=15).contains(&game.ball().y_step_interval));
        assert_eq!(ball_cells(&game), 1);
        assert_eq!(game.paddle().x, 20);

        assert_eq!(surface.clears, 1);
        assert_eq!(surface.cells.len(), WIDTH * HEIGHT);
        assert!(surface.statuses.contains(&Status::Lives(5)));
        assert!(surface.statuses.contains(&Status::Level(1)));
        assert!(surface.statuses.contains(&Status::Score(0)));
    }

    #[test]
    fn test_quit_key_ends_immediately() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        assert_eq!(game.tick(Some(Key::Quit), &mut rng, &mut surface), Phase::Quit);
        assert_eq!(game.tick(None, &mut rng, &mut surface), Phase::Quit);
        assert_eq!(game.advance(), Phase::Quit);
    }

    #[test]
    fn test_pause_freezes_ball_and_paddle() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        game.tick(Some(Key::Pause), &mut rng, &mut surface);
        assert!(game.is_paused());
        assert_eq!(surface.statuses.last(), Some(&Status::Paused(true)));

        let ball = game.ball().clone();
        let paddle = game.paddle().clone();
        game.tick(Some(Key::Left), &mut rng, &mut surface);
        for _ in 0..200 {
            game.tick(None, &mut rng, &mut surface);
        }
        assert_eq!(game.ball(), &ball);
        assert_eq!(game.paddle(), &paddle);

        game.tick(Some(Key::Pause), &mut rng, &mut surface);
        assert!(!game.is_paused());
    }

    #[test]
    fn test_direction_keys_steer_paddle() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        let start = game.paddle().x;

        game.tick(Some(Key::Left), &mut rng, &mut surface);
        assert_eq!(game.paddle().direction, -1);
        // the paddle keeps going without further input
        for _ in 0..7 {
            game.tick(Some(Key::Other), &mut rng, &mut surface);
        }
        assert_eq!(game.paddle().x, start - 2);

        game.tick(Some(Key::Right), &mut rng, &mut surface);
        assert_eq!(game.paddle().direction, 1);
    }

    #[test]
    fn test_paddle_stops_short_of_the_ball() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        let paddle = game.paddle().clone();
        let parked = Ball {
            x: paddle.x + paddle.length,
            y: paddle.y,
            x_step_interval: 1000,
            y_step_interval: 1000,
            ..game.ball().clone()
        };
        move_ball_to(&mut game, parked.clone());

        game.tick(Some(Key::Right), &mut rng, &mut surface);
        for _ in 0..7 {
            game.tick(None, &mut rng, &mut surface);
        }
        assert_eq!(game.paddle().x, paddle.x);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.grid().get(parked.x, parked.y), Some(Cell::Ball));

        game.tick(Some(Key::Left), &mut rng, &mut surface);
        for _ in 0..3 {
            game.tick(None, &mut rng, &mut surface);
        }
        assert_eq!(game.paddle().x, paddle.x - 1);
    }

    #[test]
    fn test_redraw_key_repaints() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        game.tick(Some(Key::Redraw), &mut rng, &mut surface);
        assert_eq!(surface.clears, 2);
    }

    #[test]
    fn test_losing_a_life_then_serving_again() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        let bottom = Ball {
            x: 5,
            y: HEIGHT as i32 - 1,
            x_step_interval: 1,
            y_step_interval: 1,
            x_direction: 1,
            y_direction: 1,
        };
        move_ball_to(&mut game, bottom);

        assert_eq!(game.tick(None, &mut rng, &mut surface), Phase::LifeLost);
        assert_eq!(game.lives, 4);
        assert_eq!(surface.statuses.last(), Some(&Status::Lives(4)));

        assert_eq!(game.advance(), Phase::LifeStart);
        game.start_life(&mut rng, &mut surface);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(ball_cells(&game), 1);
        assert_eq!(game.grid().cell(5, HEIGHT - 1), Cell::Empty);
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        game.lives = 1;
        let bottom = Ball {
            x: 5,
            y: HEIGHT as i32 - 1,
            x_step_interval: 1,
            y_step_interval: 1,
            x_direction: 1,
            y_direction: 1,
        };
        move_ball_to(&mut game, bottom);

        assert_eq!(game.tick(None, &mut rng, &mut surface), Phase::LifeLost);
        assert_eq!(game.lives, 0);
        assert_eq!(game.advance(), Phase::GameOver);
        assert_eq!(game.advance(), Phase::GameOver);
    }

    #[test]
    fn test_clearing_the_last_pair_finishes_the_level() {
        let (mut game, mut rng, mut surface) = playing(1, 5);
        game.grid.clear();
        game.paddle.place(&mut game.grid);
        game.grid.set(11, 20, Cell::Block(BlockColor::Green));
        game.grid.set(12, 20, Cell::Block(BlockColor::Green));
        game.blocks_left = 1;
        game.ball = Ball {
            x: 11,
            y: 21,
            x_step_interval: 2,
            y_step_interval: 1,
            x_direction: 1,
            y_direction: -1,
        };
        game.grid.set(11, 21, Cell::Ball);

        // frame 1 only moves y, straight into the block
        let mut rng_script = ScriptedRandom::default();
        assert_eq!(game.tick(None, &mut rng_script, &mut surface), Phase::LevelCleared);
        assert_eq!(game.score, 10);
        assert_eq!(game.grid().block_cells(), 0);

        assert_eq!(game.advance(), Phase::LevelStart);
        assert_eq!(game.level, 2);
        game.start_level(&mut rng);
        assert_eq!(game.lives, 7);
        assert_eq!(game.score, 10);
    }

    #[test]
    fn test_autopilot_run_keeps_invariants() {
        let (mut game, mut rng, mut surface) = playing(3, 77);
        let mut last_score = 0;

        for _ in 0..50_000 {
            let key = match game.ball().x.cmp(&(game.paddle().x + game.paddle().length / 2)) {
                std::cmp::Ordering::Less => Some(Key::Left),
                std::cmp::Ordering::Greater => Some(Key::Right),
                std::cmp::Ordering::Equal => None,
            };
            match game.tick(key, &mut rng, &mut surface) {
                Phase::Playing => {
                    assert!(Grid::in_bounds(game.ball().x, game.ball().y));
                    assert!(game.score >= last_score);
                    assert_eq!(game.score % 10, 0);
                    last_score = game.score;
                }
                Phase::LifeLost | Phase::LevelCleared => {
                    assert_eq!(game.grid().block_cells(), 2 * game.blocks_left() as usize);
                    match game.advance() {
                        Phase::LifeStart => game.start_life(&mut rng, &mut surface),
                        Phase::LevelStart => {
                            game.start_level(&mut rng);
                            game.start_life(&mut rng, &mut surface);
                        }
                        _ => break,
                    }
                    assert_eq!(ball_cells(&game), 1);
                }
                other => panic!("unexpected phase {other:?}"),
            }
        }
    }
}
