//! Oracle - on-device text generation behind a swappable engine.
//!
//! An [`InferenceSession`](application::session::InferenceSession) binds one
//! model artifact to one generation interface. Model loading, tokenization
//! and decoding belong to the engine; the session forwards prompts and
//! responses unchanged and owns the engine handle for its lifetime.
//!
//! # Architecture
//!
//! - **`port::outbound::engine`** - `EngineFactory` / `Engine` capability
//!   traits implemented by engine bindings and test fakes
//! - **`application`** - the session and the single-flight worker
//! - **`adapter::outbound::llamacpp`** - llama.cpp binding (requires the
//!   `llamacpp` feature)
//! - **`adapter::inbound::cli`** - the `oracle` binary
//! - **`infrastructure`** - configuration, logging, engine wiring
//!
//! # Features
//!
//! - `llamacpp` - Enable the llama.cpp engine (builds native code)
//! - `cuda`, `vulkan`, `metal` - GPU acceleration for llama.cpp
//! - `testkit` - Export the scripted engine for integration tests
//!
//! # Example
//!
//! ```
//! use oracle::application::session::InferenceSession;
//! use oracle::testkit::engine::{FakeHost, ScriptedFactory};
//!
//! let factory = ScriptedFactory::new().respond("hello", "hi");
//! let mut session = InferenceSession::create(&factory, &FakeHost::new("doc"), "model.bin")?;
//! assert_eq!(session.generate("hello")?, "hi");
//! session.release();
//! # Ok::<(), oracle::error::Error>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
