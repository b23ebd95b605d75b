//! Presentation layer: double-buffered, diff-based terminal renderer.
//!
//! How it works:
//!   1. Build the next frame into `front` buffer (array of Glyph)
//!   2. Compare each glyph with `back` buffer (previous frame)
//!   3. Only emit terminal commands for glyphs that changed
//!   4. All commands are batched with `queue!`, flushed once at the end
//!   5. Swap front/back
//!
//! The board packs two grid rows into one terminal row: an upper half block
//! coloured with the top cell as foreground and the bottom cell as
//! background. One terminal column per grid column keeps cells square.

use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::cell::Cell;
use crate::domain::constants::{GRID_H, GRID_W};
use crate::sim::game::GameState;
use crate::ui::menu::{Menu, MenuItem};

// ── Glyph: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Glyph {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Glyph {
    const BASE_BG: Color = Color::Rgb { r: 22, g: 22, b: 35 };

    const BLANK: Glyph = Glyph { ch: ' ', fg: Color::White, bg: Glyph::BASE_BG };

    /// Sentinel used to invalidate the back buffer so every position is diffed.
    const INVALID: Glyph = Glyph { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    fn new(ch: char, fg: Color, bg: Color) -> Self {
        Glyph { ch, fg, bg }
    }
}

// ── FrameBuffer: a 2D grid of Glyphs ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Glyph>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Glyph::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Glyph::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Glyph::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, g: Glyph) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = g;
        }
    }

    fn get(&self, x: usize, y: usize) -> Glyph {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Glyph::BLANK
        }
    }

    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        for (i, ch) in s.chars().enumerate() {
            if x + i >= self.width { break; }
            self.set(x + i, y, Glyph::new(ch, fg, bg));
        }
    }

    /// `put_str` centred on column `center`.
    fn put_centered(&mut self, center: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let len = s.chars().count();
        self.put_str(center.saturating_sub(len / 2), y, s, fg, bg);
    }

    #[cfg(test)]
    fn row_text(&self, y: usize) -> String {
        (0..self.width).map(|x| self.get(x, y).ch).collect()
    }
}

// ── Layout ──

const HUD_ROW: usize = 0;
/// Terminal row of the board's top border.
const FRAME_TOP: usize = 1;
const BOARD_ROW: usize = FRAME_TOP + 1;
const BOARD_COL: usize = 1;
const BOARD_ROWS: usize = (GRID_H + 1) / 2;
const FRAME_BOTTOM: usize = BOARD_ROW + BOARD_ROWS;
const MSG_ROW: usize = FRAME_BOTTOM + 1;
const HELP_ROW: usize = MSG_ROW + 1;

const MIN_COLS: usize = GRID_W + 2;
const MIN_ROWS: usize = HELP_ROW + 1;

const HELP: &str = " ←↑↓→/WASD:Steer  R:Restart  M:Menu";

// ── Palette ──

const BOARD_BG: Color = Color::Rgb { r: 12, g: 12, b: 20 };
const FRAME_FG: Color = Color::Rgb { r: 90, g: 90, b: 120 };
const FOOD: Color = Color::Rgb { r: 230, g: 40, b: 40 };
const BODY: Color = Color::Rgb { r: 40, g: 180, b: 60 };
const HEAD: Color = Color::Rgb { r: 120, g: 255, b: 120 };
const HUD_BG: Color = Color::Rgb { r: 20, g: 20, b: 60 };
const MSG_BG: Color = Color::Rgb { r: 200, g: 180, b: 50 };
const MENU_BG: Color = Color::Rgb { r: 40, g: 40, b: 40 };
const MENU_HI: Color = Color::Rgb { r: 255, g: 220, b: 50 };

/// Darkened colour for the frozen board after a crash.
fn dimmed(c: Color) -> Color {
    match c {
        Color::Rgb { r, g, b } => Color::Rgb { r: r / 3, g: g / 3, b: b / 3 },
        other => other,
    }
}

// ── Renderer ──

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Glyph::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.resize(tw as usize, th as usize);
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(self.writer, ResetColor, cursor::Show, terminal::LeaveAlternateScreen)?;
        terminal::disable_raw_mode()
    }

    fn resize(&mut self, w: usize, h: usize) {
        self.term_w = w;
        self.term_h = h;
        self.front.resize(w, h);
        self.back.resize(w, h);
        // Force full repaint: back ≠ front for every glyph.
        self.back.cells.fill(Glyph::INVALID);
    }

    pub fn render(&mut self, game: &GameState, menu: &Menu, message: &str) -> io::Result<()> {
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.resize(tw as usize, th as usize);
            queue!(self.writer, SetBackgroundColor(Glyph::BASE_BG), Clear(ClearType::All))?;
        }

        self.compose(game, menu, message);
        self.flush_diff()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn compose(&mut self, game: &GameState, menu: &Menu, message: &str) {
        self.front.clear();
        if self.front.width < MIN_COLS || self.front.height < MIN_ROWS {
            self.compose_too_small();
            return;
        }
        self.compose_hud(game);
        self.compose_board(game);
        if !game.is_alive() {
            self.compose_game_over(game);
        }
        if !message.is_empty() {
            let msg = format!(" {} ", message);
            for x in 0..MIN_COLS {
                self.front.set(x, MSG_ROW, Glyph::new(' ', Color::Black, MSG_BG));
            }
            self.front.put_str(0, MSG_ROW, &msg, Color::Black, MSG_BG);
        }
        self.front.put_str(0, HELP_ROW, HELP, Color::DarkGrey, Glyph::BASE_BG);
        if menu.is_open() {
            self.compose_menu(menu);
        }
    }

    // ── Diff flush: only write changed glyphs ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Glyph::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        queue!(self.writer, SetForegroundColor(last_fg), SetBackgroundColor(last_bg))?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let g = self.front.get(x, y);
                if g == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }
                if g.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(g.fg))?;
                    last_fg = g.fg;
                }
                if g.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(g.bg))?;
                    last_bg = g.bg;
                }
                queue!(self.writer, Print(g.ch))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Compose: build front buffer content ──

    fn compose_too_small(&mut self) {
        let need = format!("Need {}x{} terminal", MIN_COLS, MIN_ROWS);
        self.front.put_str(0, 0, "Terminal too small", Color::White, Glyph::BASE_BG);
        self.front.put_str(0, 1, &need, Color::DarkGrey, Glyph::BASE_BG);
    }

    fn compose_hud(&mut self, game: &GameState) {
        let hud = format!(" Score: {:<5} High Score: {}", game.score(), game.high_score());
        for x in 0..MIN_COLS {
            self.front.set(x, HUD_ROW, Glyph::new(' ', Color::White, HUD_BG));
        }
        self.front.put_str(0, HUD_ROW, &hud, Color::White, HUD_BG);
    }

    /// Colour of every grid cell, row-major.
    fn paint_cells(game: &GameState) -> Vec<Color> {
        let mut cells = vec![BOARD_BG; GRID_W * GRID_H];
        let mut paint = |c: Cell, color: Color| {
            let (col, row) = c.grid_pos();
            if col < GRID_W && row < GRID_H {
                cells[row * GRID_W + col] = color;
            }
        };
        if let Some(food) = game.food() {
            paint(food, FOOD);
        }
        // Tail first so the head wins where a crash overlaps it.
        for &seg in game.snake().iter().skip(1).rev() {
            paint(seg, BODY);
        }
        paint(game.head(), HEAD);
        cells
    }

    fn compose_board(&mut self, game: &GameState) {
        let frozen = !game.is_alive();
        let cells = Self::paint_cells(game);
        let color_at = |col: usize, row: usize| -> Color {
            let c = if row < GRID_H { cells[row * GRID_W + col] } else { BOARD_BG };
            if frozen { dimmed(c) } else { c }
        };

        for trow in 0..BOARD_ROWS {
            for col in 0..GRID_W {
                let top = color_at(col, trow * 2);
                let bottom = color_at(col, trow * 2 + 1);
                self.front.set(BOARD_COL + col, BOARD_ROW + trow, Glyph::new('▀', top, bottom));
            }
        }

        // Frame
        let right = BOARD_COL + GRID_W;
        for x in BOARD_COL..right {
            self.front.set(x, FRAME_TOP, Glyph::new('─', FRAME_FG, Glyph::BASE_BG));
            self.front.set(x, FRAME_BOTTOM, Glyph::new('─', FRAME_FG, Glyph::BASE_BG));
        }
        for y in BOARD_ROW..FRAME_BOTTOM {
            self.front.set(0, y, Glyph::new('│', FRAME_FG, Glyph::BASE_BG));
            self.front.set(right, y, Glyph::new('│', FRAME_FG, Glyph::BASE_BG));
        }
        self.front.set(0, FRAME_TOP, Glyph::new('┌', FRAME_FG, Glyph::BASE_BG));
        self.front.set(right, FRAME_TOP, Glyph::new('┐', FRAME_FG, Glyph::BASE_BG));
        self.front.set(0, FRAME_BOTTOM, Glyph::new('└', FRAME_FG, Glyph::BASE_BG));
        self.front.set(right, FRAME_BOTTOM, Glyph::new('┘', FRAME_FG, Glyph::BASE_BG));
    }

    fn compose_game_over(&mut self, game: &GameState) {
        let center = BOARD_COL + GRID_W / 2;
        let mid = BOARD_ROW + BOARD_ROWS / 2;
        let score = format!(" Score: {} ", game.score());
        self.front.put_centered(center, mid - 1, " Game Over ", Color::White, BOARD_BG);
        self.front.put_centered(center, mid, &score, Color::White, BOARD_BG);
        self.front.put_centered(center, mid + 1, " Press 'R' to Restart ", Color::White, BOARD_BG);
    }

    fn compose_menu(&mut self, menu: &Menu) {
        let box_w = 14;
        let box_h = MenuItem::ALL.len() + 3;
        let box_x = BOARD_COL + 2;
        let box_y = BOARD_ROW + 1;

        for y in box_y..box_y + box_h {
            for x in box_x..box_x + box_w {
                self.front.set(x, y, Glyph::new(' ', Color::White, MENU_BG));
            }
        }
        self.front.put_str(box_x + 1, box_y, "Game", MENU_HI, MENU_BG);
        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let row = box_y + 2 + i;
            if i == menu.cursor() {
                let line = format!("▸ {}", item.label());
                self.front.put_str(box_x + 1, row, &line, MENU_HI, MENU_BG);
            } else {
                self.front.put_str(box_x + 3, row, item.label(), Color::White, MENU_BG);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composed(game: &GameState, menu: &Menu, message: &str) -> Renderer {
        let mut r = Renderer::new();
        r.front.resize(80, 24);
        r.compose(game, menu, message);
        r
    }

    #[test]
    fn hud_shows_score_and_high_score() {
        let game = GameState::with_seed(5);
        let r = composed(&game, &Menu::new(), "");
        let hud = r.front.row_text(HUD_ROW);
        assert!(hud.contains("Score: 0"));
        assert!(hud.contains("High Score: 0"));
    }

    #[test]
    fn head_and_food_use_their_colours() {
        let game = GameState::with_seed(5);
        let r = composed(&game, &Menu::new(), "");

        // Head (50,50) is grid (5,5): terminal row 2, bottom half.
        let g = r.front.get(BOARD_COL + 5, BOARD_ROW + 2);
        assert_eq!(g.ch, '▀');
        assert_eq!(g.bg, HEAD);

        let food = game.food().unwrap();
        let (col, row) = food.grid_pos();
        let g = r.front.get(BOARD_COL + col, BOARD_ROW + row / 2);
        let painted = if row % 2 == 0 { g.fg } else { g.bg };
        assert_eq!(painted, FOOD);
    }

    #[test]
    fn message_and_menu_are_drawn() {
        let game = GameState::with_seed(5);
        let mut menu = Menu::new();
        menu.open();
        let r = composed(&game, &menu, "New high score!");
        assert!(r.front.row_text(MSG_ROW).contains("New high score!"));
        assert!(r.front.row_text(BOARD_ROW + 3).contains("▸ Restart"));
        assert!(r.front.row_text(BOARD_ROW + 4).contains("Quit"));
    }

    #[test]
    fn tiny_terminal_gets_a_notice() {
        let game = GameState::with_seed(5);
        let mut r = Renderer::new();
        r.front.resize(20, 10);
        r.compose(&game, &Menu::new(), "");
        assert!(r.front.row_text(0).starts_with("Terminal too small"));
    }
}
