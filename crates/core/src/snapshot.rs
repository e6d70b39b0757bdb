use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

/// What a presentation layer needs to draw one locked block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellView {
    /// Recorded color
    pub color: Color,
    /// Drawn in the bonus color instead of `color`
    pub bonus: bool,
}

/// One cell of the falling piece, in board coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveCell {
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

/// Bonus mode readout
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BonusSnapshot {
    pub active: bool,
    /// Remaining time as a fraction of the full duration (0 when inactive)
    pub remaining_fraction: f32,
    /// Progress toward the next activation in `[0, 1]`
    pub progress: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: [[Option<CellView>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// Falling piece cells; only the first `active_len` entries are meaningful
    pub active: [ActiveCell; 4],
    pub active_len: u8,
    /// Catalog index of the upcoming piece
    pub next: Option<usize>,
    pub started: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub good_pieces: u32,
    pub bad_pieces: u32,
    pub bonus: BonusSnapshot,
}

const EMPTY_ACTIVE: ActiveCell = ActiveCell {
    x: 0,
    y: 0,
    color: Color::Gray,
};

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = [EMPTY_ACTIVE; 4];
        self.active_len = 0;
        self.next = None;
        self.started = false;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.good_pieces = 0;
        self.bad_pieces = 0;
        self.bonus = BonusSnapshot::default();
    }

    /// Falling piece cells
    pub fn active_cells(&self) -> &[ActiveCell] {
        &self.active[..self.active_len as usize]
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: [EMPTY_ACTIVE; 4],
            active_len: 0,
            next: None,
            started: false,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            good_pieces: 0,
            bad_pieces: 0,
            bonus: BonusSnapshot::default(),
        };
        s.clear();
        s
    }
}
