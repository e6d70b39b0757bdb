//! Scoring module - score, level, fall speed and the bonus-mode timer
//!
//! Rules:
//! - 100 points per locked cell that lands in its own zone
//! - 500 points per row pass that clears at least one section
//! - Level is `score / 10_000 + 1`; each level speeds gravity up by 15%, capped at 4x
//! - Every 5000 points since the last activation triggers a 10 second bonus mode
//!
//! Side effects of entering/leaving bonus mode (board recoloring, events) are
//! handled by the game state; this module only tracks the numbers.

use crate::types::{
    BASE_TICK_CYCLE, BONUS_DURATION_SECS, BONUS_THRESHOLD, LEVEL_THRESHOLD, MAX_SPEED,
    MIN_TICK_CYCLE, POINTS_PER_CELL, POINTS_PER_ROW, SPEED_INCREASE_PER_LEVEL,
};

/// Points for `cells` locked cells in their own zone
pub fn calculate_cell_score(cells: u32) -> u32 {
    cells.saturating_mul(POINTS_PER_CELL)
}

/// Points for `rows` clearing row passes
pub fn calculate_row_score(rows: u32) -> u32 {
    rows.saturating_mul(POINTS_PER_ROW)
}

/// Level for a score (1-based)
pub fn calculate_level(score: u32) -> u32 {
    score / LEVEL_THRESHOLD + 1
}

/// Fall speed multiplier for a level
pub fn speed_for_level(level: u32) -> f32 {
    let extra = level.saturating_sub(1) as f32 * SPEED_INCREASE_PER_LEVEL;
    (1.0 + extra).min(MAX_SPEED)
}

/// Frames between gravity steps for a level
pub fn tick_cycle_for_level(level: u32) -> f32 {
    (BASE_TICK_CYCLE / speed_for_level(level)).max(MIN_TICK_CYCLE)
}

/// Suggested music tempo multiplier for a level
pub fn music_tempo_for_level(level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * 0.1
}

/// What changed after adding points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreUpdate {
    /// New level when the score crossed a level threshold.
    pub level_up: Option<u32>,
    /// Bonus mode should start now.
    pub bonus_triggered: bool,
}

/// Bonus ("yellow") mode timer and activation baseline
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BonusMode {
    active: bool,
    /// Game time (seconds) of the last activation
    start_time: f32,
    /// Score at the last activation or deactivation
    last_activation_score: u32,
}

impl BonusMode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn last_activation_score(&self) -> u32 {
        self.last_activation_score
    }

    /// Whether `score` has progressed far enough to start bonus mode
    pub fn should_trigger(&self, score: u32) -> bool {
        !self.active && score.saturating_sub(self.last_activation_score) >= BONUS_THRESHOLD
    }

    pub fn enter(&mut self, now: f32, score: u32) {
        self.active = true;
        self.start_time = now;
        self.last_activation_score = score;
    }

    /// Leave bonus mode; progress toward the next activation restarts at `score`
    pub fn exit(&mut self, score: u32) {
        self.active = false;
        self.last_activation_score = score;
    }

    /// Seconds of bonus mode left at game time `now` (0 when inactive)
    pub fn remaining(&self, now: f32) -> f32 {
        if !self.active {
            return 0.0;
        }
        (BONUS_DURATION_SECS - (now - self.start_time)).max(0.0)
    }

    pub fn is_expired(&self, now: f32) -> bool {
        self.active && self.remaining(now) <= 0.0
    }

    /// Remaining time as a fraction of the full duration
    pub fn remaining_fraction(&self, now: f32) -> f32 {
        self.remaining(now) / BONUS_DURATION_SECS
    }

    /// Progress toward the next activation, in `[0, 1]`
    pub fn progress(&self, score: u32) -> f32 {
        let gained = score.saturating_sub(self.last_activation_score);
        (gained as f32 / BONUS_THRESHOLD as f32).min(1.0)
    }
}

/// Score, cleared lines and level of one game
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scoring {
    score: u32,
    lines: u32,
    level: u32,
    bonus: BonusMode,
}

impl Scoring {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            bonus: BonusMode::new(),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn bonus(&self) -> &BonusMode {
        &self.bonus
    }

    pub fn bonus_mut(&mut self) -> &mut BonusMode {
        &mut self.bonus
    }

    pub fn add_lines(&mut self, rows: u32) {
        self.lines = self.lines.saturating_add(rows);
    }

    /// Add points, raising the level and reporting a bonus trigger
    ///
    /// The level never decreases. The caller is responsible for entering
    /// bonus mode when `bonus_triggered` is set.
    pub fn add_score(&mut self, points: u32) -> ScoreUpdate {
        self.score = self.score.saturating_add(points);

        let mut update = ScoreUpdate::default();
        let new_level = calculate_level(self.score);
        if new_level > self.level {
            self.level = new_level;
            update.level_up = Some(new_level);
        }
        update.bonus_triggered = self.bonus.should_trigger(self.score);
        update
    }

    /// Frames between gravity steps at the current level
    pub fn tick_cycle(&self) -> f32 {
        tick_cycle_for_level(self.level)
    }
}

impl Default for Scoring {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_and_row_scores() {
        assert_eq!(calculate_cell_score(0), 0);
        assert_eq!(calculate_cell_score(4), 400);
        assert_eq!(calculate_row_score(1), 500);
        assert_eq!(calculate_row_score(3), 1500);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9_999), 1);
        assert_eq!(calculate_level(10_000), 2);
        assert_eq!(calculate_level(45_000), 5);
    }

    #[test]
    fn test_speed_and_tick_cycle() {
        assert_eq!(speed_for_level(1), 1.0);
        assert!((speed_for_level(2) - 1.15).abs() < 1e-6);
        // 1 + 20 * 0.15 = 4.0 cap, and beyond.
        assert_eq!(speed_for_level(21), 4.0);
        assert_eq!(speed_for_level(50), 4.0);

        assert_eq!(tick_cycle_for_level(1), 25.0);
        assert!((tick_cycle_for_level(2) - 25.0 / 1.15).abs() < 1e-4);
        // 25 / 4 = 6.25 stays above the floor of 5.
        assert_eq!(tick_cycle_for_level(99), 6.25);
    }

    #[test]
    fn test_music_tempo() {
        assert_eq!(music_tempo_for_level(1), 1.0);
        assert!((music_tempo_for_level(3) - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_level_up_reported_once() {
        let mut s = Scoring::new();
        assert_eq!(s.add_score(9_900).level_up, None);
        assert_eq!(s.add_score(100).level_up, Some(2));
        assert_eq!(s.add_score(100).level_up, None);
        assert_eq!(s.level(), 2);
    }

    #[test]
    fn test_bonus_trigger_threshold() {
        let mut s = Scoring::new();
        assert!(!s.add_score(4_900).bonus_triggered);
        assert!(s.add_score(100).bonus_triggered);

        let score = s.score();
        s.bonus_mut().enter(0.0, score);
        // Already active: never re-triggers.
        assert!(!s.add_score(10_000).bonus_triggered);
    }

    #[test]
    fn test_bonus_timer() {
        let mut bonus = BonusMode::new();
        assert_eq!(bonus.remaining(5.0), 0.0);
        assert!(!bonus.is_expired(5.0));

        bonus.enter(2.0, 5_000);
        assert_eq!(bonus.remaining(7.0), 5.0);
        assert_eq!(bonus.remaining_fraction(7.0), 0.5);
        assert!(!bonus.is_expired(11.9));
        assert!(bonus.is_expired(12.0));

        bonus.exit(7_300);
        assert!(!bonus.is_active());
        assert_eq!(bonus.last_activation_score(), 7_300);
        assert_eq!(bonus.progress(7_300), 0.0);
        assert_eq!(bonus.progress(9_800), 0.5);
        assert_eq!(bonus.progress(20_000), 1.0);
    }
}
