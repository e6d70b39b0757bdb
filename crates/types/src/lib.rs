//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, session flow, terminal rendering).
//!
//! # Board Dimensions
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (6, 0), rotation 0
//!
//! # Color Zones
//!
//! The columns are split into three fixed bands of four columns each:
//!
//! | Columns | Zone color |
//! |---------|------------|
//! | 0-3 | Red |
//! | 4-7 | Blue |
//! | 8-11 | Green |
//!
//! # Timing
//!
//! Gravity is frame-counted. Each host frame increments a tick counter and the
//! piece falls one row when the counter reaches the level-derived cycle:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_CYCLE` | 25 | Frames per row at level 1 |
//! | `MIN_TICK_CYCLE` | 5 | Fastest possible cycle |
//! | `SPEED_INCREASE_PER_LEVEL` | 0.15 | Speed multiplier added per level |
//! | `MAX_SPEED` | 4.0 | Speed multiplier cap |
//!
//! Bonus mode is timed in seconds of accumulated `update` time
//! (`BONUS_DURATION_SECS`).
//!
//! # Examples
//!
//! ```
//! use zonefall_types::{zone_color_for, Color, Input, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(zone_color_for(0), Color::Red);
//! assert_eq!(zone_color_for(5), Color::Blue);
//! assert_eq!(zone_color_for(11), Color::Green);
//!
//! assert_eq!(Input::from_str("rotate"), Some(Input::Rotate));
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Width of a single color zone (3 zones of 4 columns)
pub const ZONE_WIDTH: u8 = 4;

/// Column where new pieces are anchored
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8;

/// Row where new pieces are anchored
pub const SPAWN_Y: i8 = 0;

/// Points for every locked cell that lands in its own zone
pub const POINTS_PER_CELL: u32 = 100;

/// Points for every row pass that clears at least one section
pub const POINTS_PER_ROW: u32 = 500;

/// Score needed per level (level = score / threshold + 1)
pub const LEVEL_THRESHOLD: u32 = 10_000;

/// Frames per gravity step at level 1
pub const BASE_TICK_CYCLE: f32 = 25.0;

/// Lower bound on frames per gravity step
pub const MIN_TICK_CYCLE: f32 = 5.0;

/// Speed multiplier added per level above 1
pub const SPEED_INCREASE_PER_LEVEL: f32 = 0.15;

/// Speed multiplier cap
pub const MAX_SPEED: f32 = 4.0;

/// Score progress (since the last activation) that triggers bonus mode
pub const BONUS_THRESHOLD: u32 = 5_000;

/// Bonus mode duration in seconds
pub const BONUS_DURATION_SECS: f32 = 10.0;

/// Number of score entries kept in the persisted history
pub const MAX_SCORE_HISTORY: usize = 10;

/// Maximum length of a player name on the scoreboard
pub const NAME_LEN: usize = 3;


/// Block color identity
///
/// - **Red / Blue / Green**: the three canonical zone colors
/// - **Gray**: error color for cells locked outside their zone
///
/// The mapping to display colors belongs to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Blue,
    Green,
    Gray,
}

impl Color {
    /// Zone colors in column order (left to right)
    pub const ZONES: [Color; 3] = [Color::Red, Color::Blue, Color::Green];

    /// Parse color from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use zonefall_types::Color;
    ///
    /// assert_eq!(Color::from_str("red"), Some(Color::Red));
    /// assert_eq!(Color::from_str("GRAY"), Some(Color::Gray));
    /// assert_eq!(Color::from_str("yellow"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(Color::Red),
            "blue" => Some(Color::Blue),
            "green" => Some(Color::Green),
            "gray" | "grey" => Some(Color::Gray),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Gray => "gray",
        }
    }

    /// Inclusive column range of the zone bound to this color
    ///
    /// Returns `None` for [`Color::Gray`], which owns no zone.
    pub fn zone_columns(&self) -> Option<(u8, u8)> {
        let index = match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Green => 2,
            Color::Gray => return None,
        };
        let start = index * ZONE_WIDTH;
        Some((start, start + ZONE_WIDTH - 1))
    }
}

/// Canonical zone color for a column
///
/// Columns outside the board map to [`Color::Gray`].
pub fn zone_color_for(x: i8) -> Color {
    if x < 0 || x >= BOARD_WIDTH as i8 {
        return Color::Gray;
    }
    Color::ZONES[(x as u8 / ZONE_WIDTH) as usize]
}

/// Player inputs accepted by the simulation while a piece is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Move piece one row down
    Down,
    /// Advance the rotation state (no wall kicks)
    Rotate,
}

impl Input {
    /// Parse input from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use zonefall_types::Input;
    ///
    /// assert_eq!(Input::from_str("Left"), Some(Input::Left));
    /// assert_eq!(Input::from_str("down"), Some(Input::Down));
    /// assert_eq!(Input::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Input::Left),
            "right" => Some(Input::Right),
            "down" => Some(Input::Down),
            "rotate" => Some(Input::Rotate),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Input::Left => "left",
            Input::Right => "right",
            Input::Down => "down",
            Input::Rotate => "rotate",
        }
    }

    /// Column/row offset applied by a movement input
    ///
    /// Returns `None` for [`Input::Rotate`].
    pub fn offset(&self) -> Option<(i8, i8)> {
        match self {
            Input::Left => Some((-1, 0)),
            Input::Right => Some((1, 0)),
            Input::Down => Some((0, 1)),
            Input::Rotate => None,
        }
    }
}

/// Simulation events, emitted synchronously as they happen
///
/// Presentation layers use these to trigger sounds, flashes and overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece became part of the board.
    ///
    /// `good` is true when every cell landed in its own zone (or bonus mode
    /// was active); `correct_cells` counts the cells that scored.
    PieceLocked { good: bool, correct_cells: u8 },
    /// One lock produced `count` clearing row passes.
    LinesCleared { count: u32 },
    /// Score crossed into a new level.
    LevelUp { level: u32 },
    /// Bonus mode started.
    BonusEntered,
    /// Bonus mode expired.
    BonusExited,
    /// The next piece could not spawn.
    GameOver,
}
