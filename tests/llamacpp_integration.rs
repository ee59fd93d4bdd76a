//! Integration tests for the llama.cpp engine.
//!
//! These tests need a real GGUF model on disk.
//!
//! # Running
//!
//! ```bash
//! export ORACLE_TEST_MODEL=/path/to/small-model.gguf
//! cargo test --features llamacpp --test llamacpp_integration -- --ignored
//! ```

#![cfg(feature = "llamacpp")]

use oracle::adapter::outbound::llamacpp::{LlamaCppFactory, LlamaHost};
use oracle::application::session::InferenceSession;
use oracle::infrastructure::config::engine::LlamaCppConfig;

fn test_model() -> Option<String> {
    match std::env::var("ORACLE_TEST_MODEL") {
        Ok(path) => Some(path),
        Err(_) => {
            eprintln!("Skipping llama.cpp test: ORACLE_TEST_MODEL not set");
            None
        }
    }
}

fn factory() -> LlamaCppFactory {
    LlamaCppFactory::new(&LlamaCppConfig {
        context_size: 512,
        max_tokens: 16,
        ..LlamaCppConfig::default()
    })
}

#[test]
#[ignore = "requires ORACLE_TEST_MODEL"]
fn generates_text_from_real_model() {
    let Some(model) = test_model() else {
        return;
    };
    let host = LlamaHost::init().expect("backend");

    let mut session = InferenceSession::create(&factory(), &host, model).expect("load model");
    let first = session.generate("The capital of France is").expect("generate");
    let second = session.generate("The capital of France is").expect("generate");

    assert!(!first.is_empty());
    // Greedy sampling in a fresh context per call.
    assert_eq!(first, second);
}

#[test]
#[ignore = "requires ORACLE_TEST_MODEL"]
fn missing_model_fails_to_initialize() {
    if test_model().is_none() {
        return;
    }
    let host = LlamaHost::init().expect("backend");

    let result = InferenceSession::create(&factory(), &host, "/definitely/missing/model.gguf");
    assert!(result.is_err());
}
