//! Terminal input module.
//!
//! Maps `crossterm` key events into session commands: engine
//! [`Input`](crate::types::Input)s while playing, name editing on the name
//! entry screen, and "press any key" on the other screens.

pub mod map;

pub use zonefall_types as types;

pub use map::{handle_key_event, should_quit, Command, KeyContext};
