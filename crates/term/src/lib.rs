//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! and layout libraries and instead renders into a simple framebuffer that is
//! diffed and flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw zones, bonus tint and the session screens from plain snapshots
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use zonefall_core as core;
pub use zonefall_session as session;
pub use zonefall_types as types;

pub use fb::{color_rgb, Cell, CellStyle, FrameBuffer, Rgb, BONUS_RGB};
pub use game_view::{AnchorY, GameView, ScreenView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
