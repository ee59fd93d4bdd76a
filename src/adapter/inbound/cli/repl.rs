//! Handler for the `repl` command.
//!
//! Each input line is an independent prompt; nothing carries over between
//! lines. Prompts are queued on a session worker while earlier answers are
//! still being generated, and answers are printed in input order.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::command::{Cli, SessionArgs};
use super::{load_config, output};
use crate::error::{Error, InferenceError, Result};
use crate::infrastructure::factory::spawn_worker;
use crate::port::outbound::llm::Llm;

/// Counts for one repl run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplSummary {
    pub answered: usize,
    pub failed: usize,
}

/// Execute the repl command.
pub async fn execute(cli: &Cli, args: &SessionArgs) -> Result<()> {
    let config = load_config(cli, args)?;
    config.init_logging();

    let worker = Arc::new(spawn_worker(&config)?);
    let summary = answer_lines(
        Arc::clone(&worker),
        BufReader::new(tokio::io::stdin()),
        config.worker.queue_capacity,
        output::response,
    )
    .await;

    if let Ok(worker) = Arc::try_unwrap(worker) {
        worker.shutdown();
    }

    let summary = summary?;
    info!(
        answered = summary.answered,
        failed = summary.failed,
        "Repl finished"
    );
    Ok(())
}

/// Send every non-blank line of `input` to `llm`, passing each response to
/// `emit` in input order.
///
/// Up to `depth` prompts are in flight at once. Engine failures are
/// reported and the loop continues with the next line.
///
/// # Errors
///
/// Returns an error if reading input fails or the session has been
/// released.
pub async fn answer_lines<L, R>(
    llm: Arc<L>,
    input: R,
    depth: usize,
    mut emit: impl FnMut(&str),
) -> Result<ReplSummary>
where
    L: Llm + ?Sized + 'static,
    R: AsyncBufRead + Unpin,
{
    let depth = depth.max(1);
    let mut summary = ReplSummary::default();
    let mut pending: VecDeque<JoinHandle<Result<String>>> = VecDeque::with_capacity(depth);
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let prompt = line.trim_end_matches('\r');
        if prompt.trim().is_empty() {
            continue;
        }

        if pending.len() >= depth {
            if let Some(oldest) = pending.pop_front() {
                settle(oldest, &mut summary, &mut emit).await?;
            }
        }

        let llm = Arc::clone(&llm);
        let prompt = prompt.to_string();
        pending.push_back(tokio::spawn(async move { llm.complete(&prompt).await }));
    }

    while let Some(oldest) = pending.pop_front() {
        settle(oldest, &mut summary, &mut emit).await?;
    }

    Ok(summary)
}

async fn settle(
    job: JoinHandle<Result<String>>,
    summary: &mut ReplSummary,
    emit: &mut impl FnMut(&str),
) -> Result<()> {
    match job.await.map_err(io::Error::other)? {
        Ok(response) => {
            emit(&response);
            summary.answered += 1;
        }
        Err(err @ Error::Inference(InferenceError::Released { .. })) => return Err(err),
        Err(err) => {
            warn!(error = %err, "Prompt failed");
            output::error(&err.to_string());
            summary.failed += 1;
        }
    }
    Ok(())
}
