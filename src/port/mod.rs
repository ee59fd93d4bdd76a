//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`outbound::engine`] - [`EngineFactory`](outbound::engine::EngineFactory)
//!   and [`Engine`](outbound::engine::Engine), the inference engine capability
//! - [`outbound::llm`] - [`Llm`](outbound::llm::Llm), async completion for
//!   concurrent callers

pub mod outbound;
