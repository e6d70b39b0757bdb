use zonefall_core::GameState;

use crate::flow::{Flow, FlowConfig, FlowState};
use crate::history::{ScoreEntry, ScoreHistory, ANONYMOUS_NAME};
use crate::store::ScoreStore;
use crate::types::{GameEvent, Input};

/// One engine, its presentation flow, and the persisted score history
#[derive(Debug)]
pub struct Session<S: ScoreStore> {
    game: GameState,
    flow: Flow,
    history: ScoreHistory,
    store: S,
    /// Final score and lines of the last finished game
    last_result: Option<(u32, u32)>,
    /// The newest history entry still carries the placeholder name
    awaiting_name: bool,
}

impl<S: ScoreStore> Session<S> {
    /// Create a session and load the history from `store`
    pub fn new(seed: u32, store: S, config: FlowConfig) -> Self {
        let history = ScoreHistory::load(&store);
        Self {
            game: GameState::new(seed),
            flow: Flow::new(config),
            history,
            store,
            last_result: None,
            awaiting_name: false,
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameState {
        &mut self.game
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn state(&self) -> FlowState {
        self.flow.state()
    }

    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Final score and lines of the most recent game
    pub fn last_result(&self) -> Option<(u32, u32)> {
        self.last_result
    }

    /// Advance flow timers and, while playing, the engine
    ///
    /// A finished game is saved right away under [`ANONYMOUS_NAME`]; name
    /// entry only renames it.
    pub fn update(&mut self, dt: f32) {
        match self.flow.update(dt) {
            Some(FlowState::Playing) => self.game.start(),
            // Name entry timed out; keep whatever was typed
            Some(FlowState::Scoreboard) => {
                let name = self.flow.take_name();
                self.name_newest(&name);
            }
            _ => {}
        }

        if self.flow.state() == FlowState::Playing {
            self.game.update(dt);
            if self.game.game_over() {
                self.record_result();
                self.flow.on_game_over();
            }
        }
    }

    pub fn press_start(&mut self) -> bool {
        self.flow.press_start()
    }

    /// Forward a game input; ignored outside play
    pub fn handle_input(&mut self, input: Input) -> bool {
        self.flow.state() == FlowState::Playing && self.game.handle_input(input)
    }

    pub fn force_bonus(&mut self) -> bool {
        self.flow.state() == FlowState::Playing && self.game.force_bonus()
    }

    pub fn type_char(&mut self, c: char) -> bool {
        self.flow.push_char(c)
    }

    pub fn backspace(&mut self) -> bool {
        self.flow.pop_char()
    }

    /// Confirm the typed name for the finished game and persist the history
    ///
    /// A failed save is logged; the entry stays in memory.
    pub fn confirm_name(&mut self) -> bool {
        let Some(name) = self.flow.confirm_name() else {
            return false;
        };
        self.name_newest(&name);
        true
    }

    fn record_result(&mut self) {
        let (score, lines) = (self.game.score(), self.game.lines());
        self.last_result = Some((score, lines));
        log::info!("recording score {} ({} lines)", score, lines);
        self.history.push(ScoreEntry::new(score, lines, ANONYMOUS_NAME));
        self.awaiting_name = true;
        let _ = self.history.save(&mut self.store);
    }

    fn name_newest(&mut self, name: &str) {
        if !std::mem::take(&mut self.awaiting_name) {
            return;
        }
        if self.history.rename_newest(name) {
            log::info!("score entry named {}", self.history.entries()[0].name);
        }
        let _ = self.history.save(&mut self.store);
    }

    /// Engine events since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }
}
