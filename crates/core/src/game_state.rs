//! Game state module - the frame-driven simulation
//!
//! This module ties together the board, piece catalog, RNG and scoring. It
//! handles gravity, player input, locking with zone matching, the two line
//! clearing rules, bonus mode and game over.

use std::fmt;

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::events::EventSink;
use crate::pieces::{catalog_index, random_piece_instance, ActivePiece};
use crate::rng::SimpleRng;
use crate::scoring::{calculate_cell_score, calculate_row_score, ScoreUpdate, Scoring};
use crate::snapshot::{ActiveCell, BonusSnapshot, CellView, GameSnapshot};
use crate::types::{Color, GameEvent, Input, BOARD_HEIGHT};

/// Complete game state
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: ActivePiece,
    rng: SimpleRng,
    scoring: Scoring,
    /// Frames since the last gravity step
    ticks: u32,
    /// Seconds of accumulated `update` time
    game_time: f32,
    good_pieces: u32,
    bad_pieces: u32,
    started: bool,
    game_over: bool,
    /// Events not yet drained by the host
    pending: Vec<GameEvent>,
    sink: Option<Box<dyn EventSink>>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("active", &self.active)
            .field("next", &catalog_index(self.next.definition))
            .field("score", &self.scoring.score())
            .field("level", &self.scoring.level())
            .field("lines", &self.scoring.lines())
            .field("bonus", self.scoring.bonus())
            .field("ticks", &self.ticks)
            .field("game_time", &self.game_time)
            .field("started", &self.started)
            .field("game_over", &self.game_over)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = random_piece_instance(&mut rng);

        Self {
            board: Board::new(),
            active: None,
            next,
            rng,
            scoring: Scoring::new(),
            ticks: 0,
            game_time: 0.0,
            good_pieces: 0,
            bad_pieces: 0,
            started: false,
            game_over: false,
            pending: Vec::new(),
            sink: None,
        }
    }

    /// Register a sink that receives every event as it happens
    ///
    /// With a sink registered, events are no longer buffered for
    /// [`drain_events`](Self::drain_events).
    pub fn set_event_sink(&mut self, sink: impl EventSink + 'static) {
        self.sink = Some(Box::new(sink));
    }

    /// Start a fresh game and spawn the first piece
    ///
    /// Starting while a game is running or over resets it first.
    pub fn start(&mut self) {
        if self.started {
            self.reset();
        }
        self.started = true;
        log::info!("game started");
        self.spawn_piece();
    }

    /// Clear the board and all counters; the RNG keeps its sequence
    pub fn reset(&mut self) {
        self.board.reset();
        self.active = None;
        self.next = random_piece_instance(&mut self.rng);
        self.scoring = Scoring::new();
        self.ticks = 0;
        self.game_time = 0.0;
        self.good_pieces = 0;
        self.bad_pieces = 0;
        self.started = false;
        self.game_over = false;
        self.pending.clear();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn level(&self) -> u32 {
        self.scoring.level()
    }

    pub fn lines(&self) -> u32 {
        self.scoring.lines()
    }

    pub fn good_pieces(&self) -> u32 {
        self.good_pieces
    }

    pub fn bad_pieces(&self) -> u32 {
        self.bad_pieces
    }

    pub fn game_time(&self) -> f32 {
        self.game_time
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn bonus_active(&self) -> bool {
        self.scoring.bonus().is_active()
    }

    /// Progress toward the next bonus activation in `[0, 1]`
    pub fn bonus_progress(&self) -> f32 {
        self.scoring.bonus().progress(self.scoring.score())
    }

    /// Remaining bonus time as a fraction of the full duration
    pub fn bonus_remaining_fraction(&self) -> f32 {
        self.scoring.bonus().remaining_fraction(self.game_time)
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next(&self) -> ActivePiece {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up scenarios
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the falling piece, for setting up scenarios
    ///
    /// The piece is accepted only if it fits the board.
    pub fn set_active(&mut self, piece: ActivePiece) -> bool {
        if !self.started || self.game_over || !self.fits(&piece) {
            return false;
        }
        self.active = Some(piece);
        true
    }

    /// Take every event emitted since the last call
    ///
    /// Only hosts without an event sink need to poll this.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        for (y, row) in out.board.iter_mut().enumerate() {
            for (slot, cell) in row.iter_mut().zip(self.board.row(y)) {
                *slot = cell.map(|block| CellView {
                    color: block.color,
                    bonus: block.bonus_display,
                });
            }
        }

        out.active_len = 0;
        if let Some(piece) = self.active {
            for (x, y, color) in piece.cells() {
                if let Some(slot) = out.active.get_mut(out.active_len as usize) {
                    *slot = ActiveCell { x, y, color };
                    out.active_len += 1;
                }
            }
        }

        out.next = self.started.then(|| catalog_index(self.next.definition));
        out.started = self.started;
        out.game_over = self.game_over;
        out.score = self.scoring.score();
        out.level = self.scoring.level();
        out.lines = self.scoring.lines();
        out.good_pieces = self.good_pieces;
        out.bad_pieces = self.bad_pieces;
        out.bonus = BonusSnapshot {
            active: self.bonus_active(),
            remaining_fraction: self.bonus_remaining_fraction(),
            progress: self.bonus_progress(),
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the simulation by one host frame of `delta_seconds`
    ///
    /// Bonus timing uses the accumulated seconds; gravity counts frames.
    pub fn update(&mut self, delta_seconds: f32) {
        if !self.started || self.game_over {
            return;
        }

        self.game_time += delta_seconds.max(0.0);
        if self.scoring.bonus().is_expired(self.game_time) {
            self.exit_bonus();
        }

        self.ticks += 1;
        if self.ticks as f32 >= self.scoring.tick_cycle() {
            self.ticks = 0;
            self.gravity_step();
        }
    }

    /// Apply a player input; returns whether the piece changed
    pub fn handle_input(&mut self, input: Input) -> bool {
        if !self.started || self.game_over {
            return false;
        }
        let Some(piece) = self.active else {
            return false;
        };

        let candidate = match input.offset() {
            Some((dx, dy)) => piece.shifted(dx, dy),
            None => piece.rotated(),
        };
        if !self.fits(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// Enter bonus mode on demand; no-op when already active
    pub fn force_bonus(&mut self) -> bool {
        if !self.started || self.game_over || self.bonus_active() {
            return false;
        }
        log::info!("bonus mode forced at score {}", self.scoring.score());
        self.enter_bonus();
        true
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        piece.cells().all(|(x, y, _)| self.board.is_free(x, y))
    }

    /// Move the piece down one row, locking it when blocked
    fn gravity_step(&mut self) {
        let Some(piece) = self.active else {
            return;
        };
        let below = piece.shifted(0, 1);
        if self.fits(&below) {
            self.active = Some(below);
        } else {
            self.lock_piece();
        }
    }

    fn lock_piece(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };
        let bonus = self.bonus_active();

        // Resolve every cell before writing so the board sees one consistent piece
        let mut cells: ArrayVec<(i8, i8, Color), 4> = ArrayVec::new();
        for (x, y, color) in piece.cells() {
            if !self.board.in_bounds(x, y) {
                continue;
            }
            // During bonus the whole piece takes its base color
            let color = if bonus { piece.definition.color } else { color };
            if cells.try_push((x, y, color)).is_err() {
                break;
            }
        }

        let mut correct_cells: u8 = 0;
        let mut all_correct = true;
        for &(x, y, color) in &cells {
            let in_zone = bonus || self.board.zone_color_for(x) == color;
            let stored = if in_zone {
                correct_cells += 1;
                color
            } else {
                all_correct = false;
                Color::Gray
            };
            self.board.place(x, y, stored, bonus);
            log::debug!(
                "locked {} cell at ({}, {}){}",
                color.as_str(),
                x,
                y,
                if in_zone { "" } else { " outside its zone" }
            );
        }

        if correct_cells > 0 {
            let update = self.scoring.add_score(calculate_cell_score(correct_cells as u32));
            self.apply_score_update(update);
        }

        if all_correct {
            self.good_pieces += 1;
        } else {
            self.bad_pieces += 1;
        }
        self.emit(GameEvent::PieceLocked {
            good: all_correct,
            correct_cells,
        });

        self.clear_lines();
        self.spawn_piece();
    }

    /// Run one line-clear pass from the bottom row up
    ///
    /// A row that cleared is examined again, since the rows above moved into it.
    fn clear_lines(&mut self) -> u32 {
        let bonus = self.bonus_active();
        let mut cleared = 0u32;
        let mut row = BOARD_HEIGHT as usize;

        while row > 0 {
            let y = row - 1;
            let hit = if bonus {
                self.clear_bonus_row(y)
            } else {
                self.clear_sections(y)
            };
            if hit {
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        if cleared > 0 {
            log::debug!("cleared {} row(s)", cleared);
            self.scoring.add_lines(cleared);
            self.emit(GameEvent::LinesCleared { count: cleared });
            let update = self.scoring.add_score(calculate_row_score(cleared));
            self.apply_score_update(update);
        }
        cleared
    }

    /// Collapse every zone band of row `y` completed in its own color
    fn clear_sections(&mut self, y: usize) -> bool {
        let mut any = false;
        for color in Color::ZONES {
            let Some((start, end)) = color.zone_columns() else {
                continue;
            };
            if self.board.is_section_complete(y, start, end, color) {
                self.board.collapse_row_range(y, start, end);
                any = true;
            }
        }
        any
    }

    /// Collapse row `y` when full and holding a block from this activation
    fn clear_bonus_row(&mut self, y: usize) -> bool {
        if self.board.is_row_full(y) && self.board.row_has_bonus_cells(y) {
            self.board.collapse_row(y);
            true
        } else {
            false
        }
    }

    fn apply_score_update(&mut self, update: ScoreUpdate) {
        if let Some(level) = update.level_up {
            log::info!("level up: {}", level);
            self.emit(GameEvent::LevelUp { level });
        }
        if update.bonus_triggered {
            self.enter_bonus();
        }
    }

    fn enter_bonus(&mut self) {
        let score = self.scoring.score();
        self.scoring.bonus_mut().enter(self.game_time, score);
        self.board.set_bonus_display_all(true);
        log::info!("bonus mode entered at score {}", score);
        self.emit(GameEvent::BonusEntered);
    }

    fn exit_bonus(&mut self) {
        let score = self.scoring.score();
        self.scoring.bonus_mut().exit(score);
        self.board.set_bonus_display_all(false);
        self.board.clear_bonus_placement();
        log::info!("bonus mode ended at score {}", score);
        self.emit(GameEvent::BonusExited);
    }

    /// Promote the upcoming piece; a blocked spawn ends the game
    fn spawn_piece(&mut self) {
        let piece = self.next;
        self.next = random_piece_instance(&mut self.rng);

        if !self.fits(&piece) {
            self.game_over = true;
            log::info!(
                "game over: score {}, lines {}, level {}",
                self.scoring.score(),
                self.scoring.lines(),
                self.scoring.level()
            );
            self.emit(GameEvent::GameOver);
            return;
        }
        self.active = Some(piece);
        self.ticks = 0;
    }

    fn emit(&mut self, event: GameEvent) {
        match self.sink.as_mut() {
            Some(sink) => sink.on_event(event),
            None => self.pending.push(event),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
