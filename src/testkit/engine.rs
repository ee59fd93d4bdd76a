//! Scripted stand-in engine.
//!
//! [`ScriptedFactory`] hands out [`ScriptedEngine`]s that answer from a
//! fixed prompt table and log every interaction into a shared
//! [`Recorder`], so tests can assert exactly what reached the engine.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::domain::EngineOptions;
use crate::port::outbound::engine::{Engine, EngineError, EngineFactory};

/// Host context for the scripted engine.
///
/// Carries a label so tests can check that the context reached the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeHost {
    label: String,
}

impl FakeHost {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Default)]
struct RecorderState {
    created: Vec<EngineOptions>,
    contexts: Vec<String>,
    prompts: Vec<String>,
    releases: usize,
    live: usize,
    in_flight: usize,
    max_in_flight: usize,
    fail_next: Option<String>,
}

/// Shared log of everything the scripted engines observed.
///
/// Cheap to clone; all clones see the same state.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    state: Arc<Mutex<RecorderState>>,
}

impl Recorder {
    /// Options passed to each successful or failed `create` call, in order.
    pub fn created_options(&self) -> Vec<EngineOptions> {
        self.state.lock().created.clone()
    }

    /// Host context labels seen by `create`, in order.
    pub fn contexts(&self) -> Vec<String> {
        self.state.lock().contexts.clone()
    }

    /// Prompts that reached an engine, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().prompts.clone()
    }

    /// Number of `release` calls across all engines.
    pub fn releases(&self) -> usize {
        self.state.lock().releases
    }

    /// Engines created and not yet dropped.
    pub fn live_engines(&self) -> usize {
        self.state.lock().live
    }

    /// Highest number of generations observed running at once.
    pub fn max_in_flight(&self) -> usize {
        self.state.lock().max_in_flight
    }

    /// Make the next `generate` call on any engine fail with `message`.
    pub fn fail_next_generate(&self, message: impl Into<String>) {
        self.state.lock().fail_next = Some(message.into());
    }
}

/// Factory for [`ScriptedEngine`]s.
#[derive(Debug, Clone, Default)]
pub struct ScriptedFactory {
    responses: Arc<HashMap<String, String>>,
    create_error: Option<String>,
    echo: bool,
    latency: Duration,
    recorder: Recorder,
}

impl ScriptedFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `prompt` with `response`.
    #[must_use]
    pub fn respond(mut self, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.responses).insert(prompt.into(), response.into());
        self
    }

    /// Answer prompts without a scripted response by echoing them back.
    #[must_use]
    pub fn echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Reject every `create` call with `message`.
    #[must_use]
    pub fn fail_create(mut self, message: impl Into<String>) -> Self {
        self.create_error = Some(message.into());
        self
    }

    /// Sleep for `latency` inside each generation.
    #[must_use]
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn recorder(&self) -> Recorder {
        self.recorder.clone()
    }
}

impl EngineFactory for ScriptedFactory {
    type Context = FakeHost;
    type Engine = ScriptedEngine;

    fn name(&self) -> &'static str {
        "scripted"
    }

    fn create(
        &self,
        context: &FakeHost,
        options: &EngineOptions,
    ) -> Result<ScriptedEngine, EngineError> {
        {
            let mut state = self.recorder.state.lock();
            state.created.push(options.clone());
            state.contexts.push(context.label().to_string());
        }

        if let Some(message) = &self.create_error {
            return Err(message.clone().into());
        }

        self.recorder.state.lock().live += 1;
        Ok(ScriptedEngine {
            responses: Arc::clone(&self.responses),
            echo: self.echo,
            latency: self.latency,
            recorder: self.recorder.clone(),
        })
    }
}

/// Engine answering from a fixed prompt table.
#[derive(Debug)]
pub struct ScriptedEngine {
    responses: Arc<HashMap<String, String>>,
    echo: bool,
    latency: Duration,
    recorder: Recorder,
}

impl Engine for ScriptedEngine {
    fn generate(&mut self, prompt: &str) -> Result<String, EngineError> {
        let failure = {
            let mut state = self.recorder.state.lock();
            state.prompts.push(prompt.to_string());
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.fail_next.take()
        };

        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        self.recorder.state.lock().in_flight -= 1;

        if let Some(message) = failure {
            return Err(message.into());
        }

        match self.responses.get(prompt) {
            Some(response) => Ok(response.clone()),
            None if self.echo => Ok(prompt.to_string()),
            None => Err(format!("no scripted response for {prompt:?}").into()),
        }
    }

    fn release(&mut self) {
        self.recorder.state.lock().releases += 1;
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        self.recorder.state.lock().live -= 1;
    }
}
