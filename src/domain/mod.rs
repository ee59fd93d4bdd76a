//! Engine-agnostic domain types.

mod options;
mod state;

pub use options::EngineOptions;
pub use state::SessionState;
