//! Presentation flow - the screens around a game
//!
//! ```text
//! Idle --start--> Intro --3s--> Playing --game over--> GameOver
//!   ^                                                      | 5s
//!   +------ 5s ------ Scoreboard <--confirm-- NameEntry <--+
//!                                  or 15s
//! ```
//!
//! While idle, the scoreboard is shown for 5 seconds every 10 seconds.
//! The flow only tracks timers and state; [`Session`](crate::Session) drives
//! the engine and history from its transitions.

use crate::types::NAME_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowState {
    Idle,
    Intro,
    Playing,
    GameOver,
    NameEntry,
    Scoreboard,
}

impl FlowState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowState::Idle => "idle",
            FlowState::Intro => "intro",
            FlowState::Playing => "playing",
            FlowState::GameOver => "gameover",
            FlowState::NameEntry => "name-entry",
            FlowState::Scoreboard => "scoreboard",
        }
    }
}

/// Screen durations in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    pub intro_secs: f32,
    /// Idle time before the scoreboard pops up
    pub scoreboard_interval_secs: f32,
    /// How long the idle scoreboard stays up
    pub scoreboard_display_secs: f32,
    pub game_over_secs: f32,
    /// Name entry confirms itself after this long
    pub name_entry_secs: f32,
    /// How long the scoreboard stays up after a new entry
    pub scoreboard_secs: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            intro_secs: 3.0,
            scoreboard_interval_secs: 10.0,
            scoreboard_display_secs: 5.0,
            game_over_secs: 5.0,
            name_entry_secs: 15.0,
            scoreboard_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Flow {
    config: FlowConfig,
    state: FlowState,
    /// Seconds since entering `state`
    state_timer: f32,
    /// Idle scoreboard rotation timer
    scoreboard_timer: f32,
    showing_scoreboard: bool,
    name: String,
}

impl Flow {
    pub fn new(config: FlowConfig) -> Self {
        Self {
            config,
            state: FlowState::Idle,
            state_timer: 0.0,
            scoreboard_timer: 0.0,
            showing_scoreboard: false,
            name: String::new(),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn state_timer(&self) -> f32 {
        self.state_timer
    }

    /// Scoreboard visible (idle rotation or after a new entry)
    pub fn showing_scoreboard(&self) -> bool {
        self.showing_scoreboard || self.state == FlowState::Scoreboard
    }

    /// Name typed so far
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whole seconds left in the intro countdown
    pub fn countdown(&self) -> Option<u32> {
        (self.state == FlowState::Intro)
            .then(|| (self.config.intro_secs - self.state_timer).max(0.0).ceil() as u32)
    }

    /// Advance timers; returns the new state after a timed transition
    pub fn update(&mut self, dt: f32) -> Option<FlowState> {
        self.state_timer += dt;

        match self.state {
            FlowState::Idle => {
                self.scoreboard_timer += dt;
                if !self.showing_scoreboard
                    && self.scoreboard_timer >= self.config.scoreboard_interval_secs
                {
                    self.showing_scoreboard = true;
                    self.scoreboard_timer = 0.0;
                } else if self.showing_scoreboard
                    && self.scoreboard_timer >= self.config.scoreboard_display_secs
                {
                    self.showing_scoreboard = false;
                    self.scoreboard_timer = 0.0;
                }
                None
            }
            FlowState::Intro if self.state_timer >= self.config.intro_secs => {
                Some(self.change(FlowState::Playing))
            }
            FlowState::GameOver if self.state_timer >= self.config.game_over_secs => {
                self.name.clear();
                Some(self.change(FlowState::NameEntry))
            }
            // The typed name stays in place for `take_name`
            FlowState::NameEntry if self.state_timer >= self.config.name_entry_secs => {
                Some(self.change(FlowState::Scoreboard))
            }
            FlowState::Scoreboard if self.state_timer >= self.config.scoreboard_secs => {
                Some(self.change(FlowState::Idle))
            }
            _ => None,
        }
    }

    /// Leave idle for the intro; ignored in any other state
    pub fn press_start(&mut self) -> bool {
        if self.state != FlowState::Idle {
            return false;
        }
        self.showing_scoreboard = false;
        self.change(FlowState::Intro);
        true
    }

    /// The running game ended
    pub fn on_game_over(&mut self) -> bool {
        if self.state != FlowState::Playing {
            return false;
        }
        self.change(FlowState::GameOver);
        true
    }

    /// Append a name character (ASCII letters and digits, uppercased)
    pub fn push_char(&mut self, c: char) -> bool {
        if self.state != FlowState::NameEntry
            || !c.is_ascii_alphanumeric()
            || self.name.len() >= NAME_LEN
        {
            return false;
        }
        self.name.push(c.to_ascii_uppercase());
        true
    }

    pub fn pop_char(&mut self) -> bool {
        self.state == FlowState::NameEntry && self.name.pop().is_some()
    }

    /// Finish name entry and show the scoreboard; returns the typed name
    pub fn confirm_name(&mut self) -> Option<String> {
        if self.state != FlowState::NameEntry {
            return None;
        }
        let name = std::mem::take(&mut self.name);
        self.change(FlowState::Scoreboard);
        Some(name)
    }

    /// Take whatever name was typed, leaving it empty
    pub fn take_name(&mut self) -> String {
        std::mem::take(&mut self.name)
    }

    fn change(&mut self, next: FlowState) -> FlowState {
        log::debug!("flow: {} -> {}", self.state.as_str(), next.as_str());
        self.state = next;
        self.state_timer = 0.0;
        if next == FlowState::Idle {
            self.scoreboard_timer = 0.0;
            self.showing_scoreboard = false;
        }
        next
    }
}

impl Default for Flow {
    fn default() -> Self {
        Self::new(FlowConfig::default())
    }
}

/// Zero-pad `value` to `width` digits, split into (padding, significant digits)
///
/// Zero is all padding.
///
/// ```
/// use zonefall_session::format_padded;
///
/// assert_eq!(format_padded(4200, 7), ("000".to_string(), "4200".to_string()));
/// assert_eq!(format_padded(0, 4), ("0000".to_string(), String::new()));
/// ```
pub fn format_padded(value: u32, width: usize) -> (String, String) {
    let padded = format!("{value:0width$}");
    if value == 0 {
        return (padded, String::new());
    }
    let split = padded.find(|c: char| c != '0').unwrap_or(padded.len());
    let (pad, digits) = padded.split_at(split);
    (pad.to_owned(), digits.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(flow: &mut Flow, secs: f32) -> Vec<FlowState> {
        let mut seen = Vec::new();
        let steps = (secs * 10.0).round() as u32;
        for _ in 0..steps {
            if let Some(state) = flow.update(0.1) {
                seen.push(state);
            }
        }
        seen
    }

    #[test]
    fn test_idle_scoreboard_rotation() {
        let mut flow = Flow::default();
        run(&mut flow, 9.5);
        assert!(!flow.showing_scoreboard());
        run(&mut flow, 1.0);
        assert!(flow.showing_scoreboard());
        run(&mut flow, 5.0);
        assert!(!flow.showing_scoreboard());
        assert_eq!(flow.state(), FlowState::Idle);
    }

    #[test]
    fn test_start_hides_scoreboard_and_counts_down() {
        let mut flow = Flow::default();
        run(&mut flow, 10.5);
        assert!(flow.showing_scoreboard());

        assert!(flow.press_start());
        assert!(!flow.press_start());
        assert!(!flow.showing_scoreboard());
        assert_eq!(flow.countdown(), Some(3));

        run(&mut flow, 1.5);
        assert_eq!(flow.countdown(), Some(2));
        assert_eq!(run(&mut flow, 2.0), vec![FlowState::Playing]);
        assert_eq!(flow.countdown(), None);
    }

    #[test]
    fn test_game_over_to_name_entry_to_scoreboard() {
        let mut flow = Flow::default();
        flow.press_start();
        run(&mut flow, 3.5);
        assert!(flow.on_game_over());
        assert!(!flow.on_game_over());

        // No typing before name entry.
        assert!(!flow.push_char('A'));
        assert_eq!(run(&mut flow, 5.5), vec![FlowState::NameEntry]);

        for c in ['k', '-', '9', 'x', 'z'] {
            flow.push_char(c);
        }
        assert_eq!(flow.name(), "K9X");
        assert!(flow.pop_char());
        assert_eq!(flow.confirm_name().as_deref(), Some("K9"));
        assert_eq!(flow.state(), FlowState::Scoreboard);
        assert!(flow.showing_scoreboard());

        assert_eq!(run(&mut flow, 5.5), vec![FlowState::Idle]);
        assert!(!flow.showing_scoreboard());
    }

    #[test]
    fn test_name_entry_times_out_to_scoreboard() {
        let mut flow = Flow::default();
        flow.press_start();
        run(&mut flow, 3.5);
        flow.on_game_over();
        run(&mut flow, 5.5);
        assert_eq!(flow.state(), FlowState::NameEntry);

        flow.push_char('j');
        assert!(run(&mut flow, 14.0).is_empty());
        assert_eq!(run(&mut flow, 1.5), vec![FlowState::Scoreboard]);
        assert_eq!(flow.take_name(), "J");
        assert_eq!(flow.name(), "");
    }

    #[test]
    fn test_format_padded() {
        assert_eq!(
            format_padded(120, 6),
            ("000".to_string(), "120".to_string())
        );
        assert_eq!(
            format_padded(1234567, 4),
            (String::new(), "1234567".to_string())
        );
        assert_eq!(format_padded(0, 3), ("000".to_string(), String::new()));
    }
}
