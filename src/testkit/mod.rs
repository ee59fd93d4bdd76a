//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`engine`] — Scripted [`EngineFactory`](crate::port::outbound::engine::EngineFactory)
//!   with a shared recorder of options, prompts and releases.
//! - [`config`] — Canonical test configurations.

pub mod config;
pub mod engine;
