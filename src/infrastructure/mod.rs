//! Infrastructure layer.
//!
//! Configuration loading, logging setup, and engine wiring.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading and validation
//! - [`factory`] - Engine backend selection and scoped session opening

pub mod config;
pub mod factory;
