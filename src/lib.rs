//! ASCII Breakout - Breakout in the terminal
//!
//! Modules:
//! - `sim`: the game itself (grid, board generation, paddle, ball, level/life flow)
//! - `ui`: ratatui rendering of the playfield
//! - `event`: keyboard input from crossterm
//! - `app`: the frame loop tying them together

pub mod app;
pub mod event;
pub mod sim;
pub mod ui;
