//! BoardView: maps a `SessionSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Card, GameStats, Phase, SessionSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GRID_COLUMNS, GRID_ROWS, PAIR_COUNT};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Front-end state drawn around the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    /// Deck position under the keyboard cursor
    pub cursor: Option<usize>,
    /// Stats of the last finished game, as loaded from the store
    pub last_game: Option<GameStats>,
    /// One-line message, e.g. "stats cleared"
    pub notice: Option<String>,
}

const TITLE: CellStyle = CellStyle::new(Rgb::new(250, 200, 90), Rgb::new(0, 0, 0)).bold();
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0));
const HINT: CellStyle = CellStyle::new(Rgb::new(150, 150, 160), Rgb::new(0, 0, 0)).dim();
const WARN: CellStyle = CellStyle::new(Rgb::new(240, 70, 70), Rgb::new(0, 0, 0)).bold();
const WIN: CellStyle = CellStyle::new(Rgb::new(90, 220, 120), Rgb::new(0, 0, 0)).bold();

const CARD_BACK: CellStyle = CellStyle::new(Rgb::new(200, 210, 255), Rgb::new(40, 60, 140));
const CARD_FACE: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(235, 235, 225)).bold();
const CARD_MATCHED: CellStyle = CellStyle::new(Rgb::new(20, 60, 20), Rgb::new(120, 200, 130));
const CURSOR_BG: Rgb = Rgb::new(240, 200, 60);

const HELP: &str = "arrows/hjkl move  enter flip  n new  p pause  x reset stats  q quit";

/// Draws the header, the card grid, and the footer.
pub struct BoardView {
    card_w: u16,
    card_h: u16,
    gap: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            card_w: 9,
            card_h: 3,
            gap: 1,
        }
    }
}

impl BoardView {
    fn grid_size(&self) -> (u16, u16) {
        let cols = GRID_COLUMNS as u16;
        let rows = GRID_ROWS as u16;
        (
            cols * self.card_w + (cols - 1) * self.gap,
            rows * self.card_h + (rows - 1) * self.gap,
        )
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &SessionSnapshot, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.into_cell(' '));

        let (grid_w, grid_h) = self.grid_size();
        let left = viewport.width.saturating_sub(grid_w) / 2;
        let top = viewport.height.saturating_sub(grid_h + 9) / 2;

        fb.put_str_centered(left, grid_w, top, "CONCENTRATION", TITLE);
        self.draw_header(fb, snap, left, grid_w, top + 2);

        let grid_top = top + 4;
        for card in &snap.cards {
            let highlighted = hud.cursor == Some(card.position) && !snap.is_game_over;
            self.draw_card(fb, card, left, grid_top, highlighted);
        }

        let mut y = grid_top + grid_h + 1;
        if let Some(line) = status_line(snap) {
            let style = match snap.phase {
                Phase::Over if snap.game_won => WIN,
                Phase::Over => WARN,
                _ => TEXT,
            };
            fb.put_str_centered(left, grid_w, y, &line, style);
        }
        y += 1;
        if let Some(notice) = &hud.notice {
            fb.put_str_centered(left, grid_w, y, notice, HINT);
        }
        y += 1;
        if let Some(last) = &hud.last_game {
            fb.put_str_centered(left, grid_w, y, &last_game_line(last), HINT);
        }
        y += 1;
        fb.put_str_centered(0, viewport.width, y, HELP, HINT);
    }

    pub fn render(&self, snap: &SessionSnapshot, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_header(&self, fb: &mut FrameBuffer, snap: &SessionSnapshot, left: u16, width: u16, y: u16) {
        let stats = format!(
            "Score {:<5} Flips {:<4} Pairs {}/{}",
            snap.score,
            snap.flips,
            snap.matched_pairs(),
            PAIR_COUNT
        );
        fb.put_str(left, y, &stats, TEXT);

        let clock = format!("Time {}", format_clock(snap.time_remaining));
        let style = if snap.time_running_low() { WARN } else { TEXT };
        let clock_x = left + width.saturating_sub(clock.chars().count() as u16);
        fb.put_str(clock_x, y, &clock, style);
    }

    fn draw_card(&self, fb: &mut FrameBuffer, card: &Card, left: u16, top: u16, highlighted: bool) {
        let col = (card.position % GRID_COLUMNS) as u16;
        let row = (card.position / GRID_COLUMNS) as u16;
        let x = left + col * (self.card_w + self.gap);
        let y = top + row * (self.card_h + self.gap);

        let mut style = if card.matched {
            CARD_MATCHED
        } else if card.face_up {
            CARD_FACE
        } else {
            CARD_BACK
        };
        if highlighted {
            style.bg = CURSOR_BG;
        }

        fb.fill_rect(x, y, self.card_w, self.card_h, ' ', style);
        let mid = y + self.card_h / 2;
        if !card.face_up && !card.matched {
            fb.put_str_centered(x, self.card_w, mid, "?", style);
            return;
        }

        // Emoji face, name on the bottom row.
        if let Some(face) = card.symbol.emoji().chars().next() {
            fb.put_wide(x + self.card_w.saturating_sub(2) / 2, mid, face, style);
        }
        fb.put_str_centered(x, self.card_w, y + self.card_h.saturating_sub(1), card.symbol.as_str(), style.dim());
    }
}

/// `m:ss`
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn status_line(snap: &SessionSnapshot) -> Option<String> {
    match snap.phase {
        Phase::Studying => Some("Memorise the cards...".to_string()),
        Phase::Over if snap.game_won => Some(format!(
            "You win! Final score {} in {}s. Press n to play again.",
            snap.score,
            snap.time_elapsed()
        )),
        Phase::Over => Some(format!(
            "Time's up! Score {}. Press n to play again.",
            snap.score
        )),
        Phase::Playing if snap.paused() => Some("Paused. Press p to resume.".to_string()),
        Phase::Playing => None,
    }
}

fn last_game_line(stats: &GameStats) -> String {
    format!(
        "Last game: score {}  flips {}  time {}",
        stats.score,
        stats.flips,
        format_clock(stats.time_elapsed)
    )
}
