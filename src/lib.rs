//! Zonefall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can use `zonefall::{core,input,session,term,types}`.

pub use zonefall_core as core;
pub use zonefall_input as input;
pub use zonefall_session as session;
pub use zonefall_term as term;
pub use zonefall_types as types;
