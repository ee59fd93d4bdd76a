//! Outbound adapters (driven side).

#[cfg(feature = "llamacpp")]
pub mod llamacpp;
