use std::io;
use std::thread;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::Terminal;

use crate::event::InputSource;
use crate::sim::{Game, Key, Phase, RandomSource, RenderSurface};
use crate::ui::{self, Screen};

/// How a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub level: u32,
    pub score: u32,
    pub quit: bool,
}

pub struct App<R> {
    game: Game,
    screen: Screen,
    rng: R,
    frame_interval: Duration,
}

impl<R: RandomSource> App<R> {
    pub fn new(start_level: u32, rng: R, frame_interval: Duration) -> Self {
        Self {
            game: Game::new(start_level),
            screen: Screen::new(),
            rng,
            frame_interval,
        }
    }

    /// Play until the player runs out of lives or quits.
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut impl InputSource,
    ) -> io::Result<Outcome> {
        loop {
            match self.game.phase() {
                Phase::LevelStart => self.game.start_level(&mut self.rng),
                Phase::LifeStart => {
                    self.game.start_life(&mut self.rng, &mut self.screen);
                    let lines = life_message(self.game.level, self.game.lives);
                    if !self.prompt(terminal, input, &lines)? {
                        self.game.quit();
                    }
                }
                Phase::Playing => {
                    thread::sleep(self.frame_interval);
                    let key = input.poll_key()?;
                    self.game.tick(key, &mut self.rng, &mut self.screen);
                    self.draw(terminal)?;
                }
                Phase::LifeLost => {
                    self.game.advance();
                }
                Phase::LevelCleared => {
                    let lines = level_cleared_message(self.game.level);
                    if self.prompt(terminal, input, &lines)? {
                        self.game.advance();
                    } else {
                        self.game.quit();
                    }
                }
                Phase::GameOver => {
                    let lines = game_over_message(self.game.score, self.game.level);
                    self.prompt(terminal, input, &lines)?;
                    return Ok(self.outcome(false));
                }
                Phase::Quit => return Ok(self.outcome(true)),
            }
        }
    }

    fn outcome(&self, quit: bool) -> Outcome {
        Outcome {
            level: self.game.level,
            score: self.game.score,
            quit,
        }
    }

    /// Show `lines` until a key is pressed. Returns false if that key was quit.
    fn prompt<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        input: &mut impl InputSource,
        lines: &[String],
    ) -> io::Result<bool> {
        self.screen.show_message(lines);
        self.draw(terminal)?;
        let proceed = loop {
            match input.wait_key()? {
                Key::Quit => break false,
                Key::Redraw => {
                    self.game.redraw(&mut self.screen);
                    self.screen.show_message(lines);
                    self.draw(terminal)?;
                }
                _ => break true,
            }
        };
        self.screen.show_message(&[]);
        self.draw(terminal)?;
        Ok(proceed)
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        if self.screen.take_clear() {
            terminal.clear()?;
        }
        if self.screen.take_dirty() {
            terminal.draw(|frame| ui::render(frame, &self.screen))?;
        }
        Ok(())
    }
}

fn life_message(level: u32, lives: u32) -> Vec<String> {
    let mut lines = Vec::new();
    if level == 1 {
        lines.push("ASCII Breakout".to_string());
        lines.push("Press j and k (or the arrow keys) to move the paddle".to_string());
        lines.push("p pauses, r redraws, q quits".to_string());
    }
    lines.push(format!("Level: {level}"));
    lines.push(format!("Lives remaining: {lives}"));
    lines.push("Press any key to continue".to_string());
    lines
}

fn level_cleared_message(level: u32) -> Vec<String> {
    vec![
        format!("Level {level} complete!"),
        "Press any key to continue...".to_string(),
    ]
}

fn game_over_message(score: u32, level: u32) -> Vec<String> {
    vec![
        "Game over!".to_string(),
        format!("Score: {score}"),
        format!("Level: {level}"),
        "Press any key to quit.".to_string(),
    ]
}
