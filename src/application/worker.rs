//! Single-flight worker serving many async callers from one session.
//!
//! The session moves onto a dedicated thread. Callers submit prompts over a
//! bounded queue and await the reply, so at most one generation runs at a
//! time and jobs complete in arrival order.

use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::application::session::InferenceSession;
use crate::error::{Error, InferenceError, Result};
use crate::port::outbound::engine::Engine;
use crate::port::outbound::llm::Llm;

/// One queued prompt and where to send its answer.
struct Job {
    prompt: String,
    reply: oneshot::Sender<std::result::Result<String, InferenceError>>,
}

/// Handle to a session running on its own thread.
///
/// Dropping the handle closes the queue; the thread finishes queued jobs,
/// releases the session and exits without being joined. Use
/// [`shutdown`](Self::shutdown) to wait for that.
pub struct SessionWorker {
    tx: Option<mpsc::Sender<Job>>,
    thread: Option<JoinHandle<()>>,
    engine_name: &'static str,
    model_path: PathBuf,
}

impl SessionWorker {
    /// Move `session` onto a worker thread.
    ///
    /// `queue_capacity` bounds the number of prompts waiting for the engine;
    /// further callers wait for a free slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned. The session is
    /// dropped, and therefore released, in that case.
    pub fn spawn<E>(session: InferenceSession<E>, queue_capacity: usize) -> Result<Self>
    where
        E: Engine + Send + 'static,
    {
        let engine_name = session.engine_name();
        let model_path = session.model_path().to_path_buf();
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));

        let thread = thread::Builder::new()
            .name(format!("oracle-{engine_name}"))
            .spawn(move || run(session, rx))
            .map_err(Error::Io)?;

        info!(
            engine = engine_name,
            model = %model_path.display(),
            queue_capacity,
            "Session worker started"
        );

        Ok(Self {
            tx: Some(tx),
            thread: Some(thread),
            engine_name,
            model_path,
        })
    }

    /// Model artifact served by this worker.
    #[must_use]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Queue `prompt` and wait for the engine's response.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::Engine`] if the engine fails, or
    /// [`InferenceError::Released`] if the worker has stopped.
    pub async fn generate(&self, prompt: &str) -> std::result::Result<String, InferenceError> {
        let released = || InferenceError::Released {
            path: self.model_path.clone(),
        };
        let tx = self.tx.as_ref().ok_or_else(released)?;

        let (reply, answer) = oneshot::channel();
        let job = Job {
            prompt: prompt.to_string(),
            reply,
        };

        tx.send(job).await.map_err(|_| released())?;
        answer.await.map_err(|_| released())?
    }

    /// Close the queue, let queued jobs finish, and wait for the session to
    /// be released.
    pub fn shutdown(mut self) {
        self.close();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!(engine = self.engine_name, "Session worker panicked");
            }
        }
    }

    fn close(&mut self) {
        if self.tx.take().is_some() {
            debug!(engine = self.engine_name, "Session worker queue closed");
        }
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl Llm for SessionWorker {
    fn name(&self) -> &'static str {
        self.engine_name
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        Ok(self.generate(prompt).await?)
    }
}

fn run<E: Engine>(mut session: InferenceSession<E>, mut rx: mpsc::Receiver<Job>) {
    while let Some(job) = rx.blocking_recv() {
        let result = session.generate(&job.prompt);
        if job.reply.send(result).is_err() {
            debug!(engine = session.engine_name(), "Caller went away before reply");
        }
    }
    session.release();
    info!(engine = session.engine_name(), "Session worker stopped");
}
