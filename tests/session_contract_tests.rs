//! Contract tests for the inference session against the scripted engine.
//!
//! Covers what the session promises regardless of backend: options carry
//! only the model path, prompts and responses pass through untouched,
//! engine failures surface as typed errors, and nothing is cached.

use std::error::Error as _;
use std::path::Path;

use oracle::application::session::InferenceSession;
use oracle::domain::{EngineOptions, SessionState};
use oracle::error::InferenceError;
use oracle::testkit::engine::{FakeHost, ScriptedFactory};

fn host() -> FakeHost {
    FakeHost::new("integration")
}

#[test]
fn engine_receives_exactly_the_model_path() {
    let factory = ScriptedFactory::new();
    let _session = InferenceSession::create(&factory, &host(), "/data/local/tmp/llm/model.bin")
        .expect("session");

    let created = factory.recorder().created_options();
    assert_eq!(created.len(), 1);
    assert_eq!(
        created[0],
        EngineOptions::new("/data/local/tmp/llm/model.bin")
    );
    assert_eq!(
        serde_json::to_value(&created[0]).unwrap(),
        serde_json::json!({ "modelPath": "/data/local/tmp/llm/model.bin" })
    );
}

#[test]
fn response_is_returned_untransformed() {
    let factory = ScriptedFactory::new().respond("hello", "Hello! How can I help?\n\n");
    let mut session = InferenceSession::create(&factory, &host(), "m.bin").expect("session");

    let response = session.generate("hello").expect("generate");

    assert_eq!(response, "Hello! How can I help?\n\n");
    assert_eq!(factory.recorder().prompts(), vec!["hello"]);
}

#[test]
fn prompt_is_forwarded_untransformed() {
    let prompt = "  multi\nline\tprompt with émoji 🌟  ";
    let factory = ScriptedFactory::new().echo();
    let mut session = InferenceSession::create(&factory, &host(), "m.bin").expect("session");

    assert_eq!(session.generate(prompt).expect("generate"), prompt);
    assert_eq!(factory.recorder().prompts(), vec![prompt]);
}

#[test]
fn empty_prompt_is_left_to_the_engine() {
    let factory = ScriptedFactory::new().respond("", "<empty>");
    let mut session = InferenceSession::create(&factory, &host(), "m.bin").expect("session");

    assert_eq!(session.generate("").expect("generate"), "<empty>");
}

#[test]
fn construction_failure_yields_initialization_error() {
    let factory = ScriptedFactory::new().fail_create("unsupported hardware");

    let err = InferenceSession::create(&factory, &host(), "/missing/model.bin").unwrap_err();

    assert_eq!(err.path, Path::new("/missing/model.bin"));
    assert_eq!(err.source().unwrap().to_string(), "unsupported hardware");
    assert_eq!(factory.recorder().live_engines(), 0);
}

#[test]
fn generation_failure_does_not_poison_the_session() {
    let factory = ScriptedFactory::new().respond("retry me", "fine now");
    let recorder = factory.recorder();
    let mut session = InferenceSession::create(&factory, &host(), "m.bin").expect("session");

    recorder.fail_next_generate("internal engine fault");
    match session.generate("retry me") {
        Err(InferenceError::Engine { engine, source }) => {
            assert_eq!(engine, "scripted");
            assert_eq!(source.to_string(), "internal engine fault");
        }
        other => panic!("expected engine error, got {other:?}"),
    }

    assert_eq!(session.state(), SessionState::Ready);
    assert_eq!(session.generate("retry me").expect("second call"), "fine now");
    assert_eq!(recorder.prompts().len(), 2);
}

#[test]
fn sessions_with_different_models_are_independent() {
    let first_factory = ScriptedFactory::new().respond("q", "from first");
    let second_factory = ScriptedFactory::new().respond("q", "from second");

    let mut first =
        InferenceSession::create(&first_factory, &FakeHost::new("a"), "first.bin").unwrap();
    let mut second =
        InferenceSession::create(&second_factory, &FakeHost::new("b"), "second.bin").unwrap();

    assert_eq!(first.generate("q").unwrap(), "from first");
    assert_eq!(second.generate("q").unwrap(), "from second");
    assert_eq!(first.model_path(), Path::new("first.bin"));
    assert_eq!(second.model_path(), Path::new("second.bin"));

    second.release();
    assert_eq!(first.generate("q").unwrap(), "from first");
    assert_eq!(first_factory.recorder().prompts().len(), 2);
    assert_eq!(second_factory.recorder().prompts().len(), 1);
    assert_eq!(first_factory.recorder().contexts(), vec!["a"]);
    assert_eq!(second_factory.recorder().contexts(), vec!["b"]);
}

#[test]
fn sessions_from_one_factory_get_separate_handles() {
    let factory = ScriptedFactory::new().echo();
    let recorder = factory.recorder();

    let first = InferenceSession::create(&factory, &host(), "first.bin").unwrap();
    let second = InferenceSession::create(&factory, &host(), "second.bin").unwrap();
    assert_eq!(recorder.live_engines(), 2);

    drop(first);
    assert_eq!(recorder.live_engines(), 1);
    assert!(second.is_ready());
    assert_eq!(
        recorder.created_options(),
        vec![
            EngineOptions::new("first.bin"),
            EngineOptions::new("second.bin")
        ]
    );
}

#[test]
fn identical_prompts_are_never_memoized() {
    let factory = ScriptedFactory::new().respond("same prompt", "same answer");
    let mut session = InferenceSession::create(&factory, &host(), "m.bin").unwrap();

    for _ in 0..5 {
        session.generate("same prompt").unwrap();
    }

    assert_eq!(factory.recorder().prompts().len(), 5);
}

#[test]
fn explicit_release_is_final() {
    let factory = ScriptedFactory::new().echo();
    let recorder = factory.recorder();
    let mut session = InferenceSession::create(&factory, &host(), "m.bin").unwrap();

    session.release();

    assert_eq!(session.state(), SessionState::Released);
    assert!(matches!(
        session.generate("anything"),
        Err(InferenceError::Released { .. })
    ));
    drop(session);
    assert_eq!(recorder.releases(), 1);
    assert_eq!(recorder.live_engines(), 0);
}

#[test]
fn scoped_session_is_released_on_every_path() {
    let factory = ScriptedFactory::new().respond("q", "a");
    let recorder = factory.recorder();

    let ok = InferenceSession::scoped(&factory, &host(), "m.bin", |s| s.generate("q"))
        .expect("create")
        .expect("generate");
    assert_eq!(ok, "a");

    let failed = InferenceSession::scoped(&factory, &host(), "m.bin", |s| s.generate("unknown"))
        .expect("create");
    assert!(failed.is_err());

    assert_eq!(recorder.releases(), 2);
    assert_eq!(recorder.live_engines(), 0);
}
