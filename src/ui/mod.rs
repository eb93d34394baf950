use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::sim::consts::{HEIGHT, WIDTH};
use crate::sim::{BlockColor, Cell, RenderSurface, Status};

const TITLE: &str = "ASCII BREAKOUT";
const FIELD_BG: Color = Color::Rgb(10, 10, 20);
const BORDER: Color = Color::Green;

/// What the player sees, kept up to date by the simulation.
///
/// Drawing is left to [`render`]; the app only redraws when something changed.
pub struct Screen {
    /// Row-major copy of the playfield
    cells: Vec<Cell>,
    lives: u32,
    level: u32,
    score: u32,
    paused: bool,
    message: Vec<String>,
    dirty: bool,
    needs_clear: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; WIDTH * HEIGHT],
            lives: 0,
            level: 0,
            score: 0,
            paused: false,
            message: Vec::new(),
            dirty: true,
            needs_clear: true,
        }
    }

    /// Whether anything changed since the last call
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Whether the terminal should be wiped before the next draw
    pub fn take_clear(&mut self) -> bool {
        std::mem::take(&mut self.needs_clear)
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }
}

impl RenderSurface for Screen {
    fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * WIDTH + x] = cell;
        self.dirty = true;
    }

    fn clear_screen(&mut self) {
        self.cells.fill(Cell::Empty);
        self.message.clear();
        self.needs_clear = true;
        self.dirty = true;
    }

    fn set_status(&mut self, status: Status) {
        match status {
            Status::Lives(n) => self.lives = n,
            Status::Level(n) => self.level = n,
            Status::Score(n) => self.score = n,
            Status::Paused(p) => self.paused = p,
        }
        self.dirty = true;
    }

    fn show_message(&mut self, lines: &[String]) {
        self.message = lines.to_vec();
        self.dirty = true;
    }
}

fn block_color(color: BlockColor) -> Color {
    match color {
        BlockColor::Red => Color::Red,
        BlockColor::Blue => Color::Blue,
        BlockColor::Green => Color::Green,
    }
}

fn glyph(cell: Cell, x: usize) -> (char, Style) {
    match cell {
        Cell::Empty => (' ', Style::default().bg(FIELD_BG)),
        Cell::Ball => (
            'O',
            Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(FIELD_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Paddle => (' ', Style::default().bg(Color::Magenta)),
        // brackets show that a block is two cells wide
        Cell::Block(color) => (
            if x % 2 == 1 { '(' } else { ')' },
            Style::default().fg(Color::Black).bg(block_color(color)),
        ),
    }
}

/// One line per playfield row, runs of equal style merged into one span
fn field_lines(screen: &Screen) -> Vec<Line<'static>> {
    (0..HEIGHT)
        .map(|y| {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_style = Style::default();
            for (x, &cell) in screen.row(y).iter().enumerate() {
                let (ch, style) = glyph(cell, x);
                if style != run_style && !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), run_style));
                }
                run_style = style;
                run.push(ch);
            }
            spans.push(Span::styled(run, run_style));
            Line::from(spans)
        })
        .collect()
}

fn status_line(screen: &Screen) -> Line<'static> {
    let label = |text: &'static str, color: Color| Span::styled(text, Style::default().fg(color));
    let gap = || Span::raw("     ");
    let mut spans = vec![
        Span::styled(
            TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        gap(),
        label("<3:", Color::LightMagenta),
        Span::raw(format!("{:02}", screen.lives)),
        gap(),
        label("Level:", Color::Yellow),
        Span::raw(format!("{:02}", screen.level)),
        gap(),
        label("Score:", Color::LightCyan),
        Span::raw(format!("{:08}", screen.score)),
    ];
    if screen.paused {
        spans.push(gap());
        spans.push(Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
    }
    Line::from(spans)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn render(frame: &mut Frame, screen: &Screen) {
    let outer = centered(frame.area(), WIDTH as u16 + 2, HEIGHT as u16 + 3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEIGHT as u16 + 2), // Playfield
            Constraint::Length(1),                 // Footer
        ])
        .split(outer);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);
    frame.render_widget(Paragraph::new(field_lines(screen)), inner);

    // the footer is wider than the field once PAUSED is shown
    let footer = Rect::new(frame.area().x, chunks[1].y, frame.area().width, 1);
    frame.render_widget(
        Paragraph::new(status_line(screen)).alignment(Alignment::Center),
        footer,
    );

    if !screen.message.is_empty() {
        render_message(frame, inner, &screen.message);
    }
}

fn render_message(frame: &mut Frame, area: Rect, lines: &[String]) {
    let text_w = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let overlay = centered(area, text_w + 4, lines.len() as u16 + 2);

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    let p = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(p, overlay);
}
