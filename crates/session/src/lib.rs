//! Session layer - everything around a single game
//!
//! - [`flow`]: idle / intro / playing / game over / name entry / scoreboard timers
//! - [`history`]: the capped, newest-first score list
//! - [`store`]: key-value persistence contract with memory and JSON file backends
//! - [`session`]: [`Session`] ties an engine, a flow and a history together
//!
//! Persistence failures never stop play: loading falls back to an empty
//! history and saving only logs.

pub mod flow;
pub mod history;
pub mod session;
pub mod store;

pub use zonefall_types as types;

pub use flow::{format_padded, Flow, FlowConfig, FlowState};
pub use history::{ScoreEntry, ScoreHistory, ANONYMOUS_NAME};
pub use session::Session;
pub use store::{JsonFileStore, MemoryStore, ScoreStore, SCORES_KEY};
