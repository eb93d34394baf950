//! Test doubles for the simulation's collaborators

use std::collections::VecDeque;

use super::{Cell, RandomSource, RenderSurface, Status};

/// Surface that records everything it is told
#[derive(Default)]
pub struct RecordingSurface {
    pub cells: Vec<(usize, usize, Cell)>,
    pub statuses: Vec<Status>,
    pub messages: Vec<Vec<String>>,
    pub clears: usize,
}

impl RenderSurface for RecordingSurface {
    fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells.push((x, y, cell));
    }

    fn clear_screen(&mut self) {
        self.clears += 1;
    }

    fn set_status(&mut self, status: Status) {
        self.statuses.push(status);
    }

    fn show_message(&mut self, lines: &[String]) {
        self.messages.push(lines.to_vec());
    }
}

/// Random source replaying fixed answers
///
/// `next_int` returns queued values (reduced modulo the bound) and `next_bool`
/// queued flags. Either falls back to 0 / false once its queue runs dry.
#[derive(Default)]
pub struct ScriptedRandom {
    pub ints: VecDeque<u32>,
    pub bools: VecDeque<bool>,
}

impl ScriptedRandom {
    pub fn new(ints: &[u32], bools: &[bool]) -> Self {
        Self {
            ints: ints.iter().copied().collect(),
            bools: bools.iter().copied().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, bound: u32) -> u32 {
        self.ints.pop_front().unwrap_or(0) % bound
    }

    fn next_bool(&mut self) -> bool {
        self.bools.pop_front().unwrap_or(false)
    }
}
