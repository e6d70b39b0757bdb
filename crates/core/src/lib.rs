//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependencies on UI, terminal or storage, making it:
//!
//! - **Deterministic**: Same seed and frame sequence produce identical games
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any host (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 12x20 grid with section checks and band-restricted collapse
//! - [`pieces`]: the static 13-piece catalog and the falling piece
//! - [`rng`]: seeded LCG for uniform piece selection
//! - [`scoring`]: score/level math, fall speed, bonus-mode timer
//! - [`game_state`]: the frame-driven simulation
//! - [`snapshot`]: plain-data view for renderers
//! - [`events`]: event sink trait
//!
//! # Game Rules
//!
//! - **Zones**: columns 0-3 are red, 4-7 blue, 8-11 green
//! - **Locking**: a cell whose color matches its column's zone scores 100 points;
//!   mismatched cells turn gray
//! - **Clearing**: each band clears on its own when all four cells in a row hold
//!   its color; a row pass that clears anything scores 500
//! - **Bonus mode**: every 5000 points, for 10 seconds every cell matches and a
//!   row clears only when completely full
//! - **Game over**: the next piece cannot spawn
//!
//! # Example
//!
//! ```
//! use zonefall_core::GameState;
//! use zonefall_types::Input;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.handle_input(Input::Left);
//! game.handle_input(Input::Rotate);
//!
//! // One second at 60 frames per second
//! for _ in 0..60 {
//!     game.update(1.0 / 60.0);
//! }
//! assert!(game.started());
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::update`](game_state::GameState::update) once per host
//! frame. Gravity counts frames (25 per row at level 1, faster with level);
//! the bonus timer counts the seconds passed in.

pub mod board;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use zonefall_types as types;

// Re-export commonly used types for convenience
pub use board::{Block, Board, Cell};
pub use events::EventSink;
pub use game_state::GameState;
pub use pieces::{catalog_index, random_piece_instance, ActivePiece, PieceDefinition, CATALOG};
pub use rng::SimpleRng;
pub use scoring::{calculate_level, music_tempo_for_level, tick_cycle_for_level, BonusMode, Scoring};
pub use snapshot::{ActiveCell, BonusSnapshot, CellView, GameSnapshot};
