//! On-device engine backed by llama.cpp.
//!
//! Loads GGUF model files through the `llama-cpp-2` bindings. The backend is
//! a process-wide singleton, exposed to sessions as the [`LlamaHost`]
//! context.

use std::fmt;
use std::num::NonZeroU32;
use std::sync::OnceLock;

use llama_cpp_2::context::params::LlamaContextParams;
use llama_cpp_2::llama_backend::LlamaBackend;
use llama_cpp_2::llama_batch::LlamaBatch;
use llama_cpp_2::model::params::LlamaModelParams;
use llama_cpp_2::model::{AddBos, LlamaModel};
use llama_cpp_2::sampling::LlamaSampler;
use llama_cpp_2::token::LlamaToken;
use llama_cpp_2::TokenToStringError;
use tracing::{debug, info};

use crate::domain::EngineOptions;
use crate::infrastructure::config::engine::LlamaCppConfig;
use crate::port::outbound::engine::{Engine, EngineError, EngineFactory};

/// Global llama.cpp backend (can only be initialized once).
static LLAMA_BACKEND: OnceLock<Result<LlamaBackend, String>> = OnceLock::new();

/// Minimum batch size handed to llama.cpp.
const MIN_BATCH: usize = 512;

/// Bytes first reserved for one detokenized piece. Longer pieces are
/// decoded again with the size llama.cpp asks for.
const PIECE_BUFFER: usize = 32;

/// Host context for llama.cpp sessions.
#[derive(Clone, Copy)]
pub struct LlamaHost {
    backend: &'static LlamaBackend,
}

impl fmt::Debug for LlamaHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlamaHost").finish_non_exhaustive()
    }
}

impl LlamaHost {
    /// Initialize the llama.cpp backend, or reuse it if already running.
    ///
    /// # Errors
    ///
    /// Returns an error if llama.cpp fails to initialize.
    pub fn init() -> Result<Self, EngineError> {
        let result = LLAMA_BACKEND.get_or_init(|| {
            let mut backend = LlamaBackend::init().map_err(|e| e.to_string())?;
            backend.void_logs();
            Ok(backend)
        });

        match result {
            Ok(backend) => Ok(Self { backend }),
            Err(e) => Err(format!("failed to initialize llama.cpp backend: {e}").into()),
        }
    }
}

/// Builds llama.cpp engines with fixed tuning.
#[derive(Debug, Clone)]
pub struct LlamaCppFactory {
    context_size: u32,
    max_tokens: usize,
    gpu_layers: u32,
    threads: u32,
}

impl LlamaCppFactory {
    #[must_use]
    pub fn new(config: &LlamaCppConfig) -> Self {
        Self {
            context_size: config.context_size,
            max_tokens: config.max_tokens,
            gpu_layers: config.gpu_layers,
            threads: config.threads,
        }
    }
}

impl EngineFactory for LlamaCppFactory {
    type Context = LlamaHost;
    type Engine = LlamaCppEngine;

    fn name(&self) -> &'static str {
        "llamacpp"
    }

    fn create(
        &self,
        context: &LlamaHost,
        options: &EngineOptions,
    ) -> Result<LlamaCppEngine, EngineError> {
        let params = LlamaModelParams::default().with_n_gpu_layers(self.gpu_layers);
        let model = LlamaModel::load_from_file(context.backend, options.model_path(), &params)?;

        info!(
            model = %options.model_path().display(),
            gpu_layers = self.gpu_layers,
            context_size = self.context_size,
            "llama.cpp model loaded"
        );

        Ok(LlamaCppEngine {
            backend: context.backend,
            model,
            context_size: self.context_size,
            max_tokens: self.max_tokens,
            threads: self.threads,
        })
    }
}

/// A GGUF model loaded into llama.cpp.
///
/// Each generation runs in a fresh llama.cpp context, so calls share no KV
/// cache and no conversation state.
pub struct LlamaCppEngine {
    backend: &'static LlamaBackend,
    model: LlamaModel,
    context_size: u32,
    max_tokens: usize,
    threads: u32,
}

impl LlamaCppEngine {
    fn piece(&self, token: LlamaToken) -> Result<Vec<u8>, TokenToStringError> {
        decode_piece(|size| self.model.token_to_piece_bytes(token, size, false, None))
    }

    fn context_params(&self) -> LlamaContextParams {
        let params = LlamaContextParams::default().with_n_ctx(NonZeroU32::new(self.context_size));
        if self.threads > 0 {
            params
                .with_n_threads(self.threads as i32)
                .with_n_threads_batch(self.threads as i32)
        } else {
            params
        }
    }
}

impl Engine for LlamaCppEngine {
    fn generate(&mut self, prompt: &str) -> Result<String, EngineError> {
        let tokens = self.model.str_to_token(prompt, AddBos::Always)?;
        if tokens.len() >= self.context_size as usize {
            return Err(format!(
                "prompt is {} tokens, context window is {}",
                tokens.len(),
                self.context_size
            )
            .into());
        }

        let mut ctx = self.model.new_context(self.backend, self.context_params())?;
        let mut batch = LlamaBatch::new(tokens.len().max(MIN_BATCH), 1);

        let last = tokens.len().saturating_sub(1);
        for (i, token) in tokens.iter().enumerate() {
            batch.add(*token, i as i32, &[0], i == last)?;
        }
        ctx.decode(&mut batch)?;

        let budget = self
            .max_tokens
            .min(self.context_size as usize - tokens.len());
        let mut sampler = LlamaSampler::greedy();
        let mut n_cur = tokens.len();
        let mut bytes = Vec::new();

        for _ in 0..budget {
            let token = sampler.sample(&ctx, batch.n_tokens() - 1);
            if self.model.is_eog_token(token) {
                break;
            }
            bytes.extend(self.piece(token)?);

            batch.clear();
            batch.add(token, n_cur as i32, &[0], true)?;
            ctx.decode(&mut batch)?;
            n_cur += 1;
        }

        debug!(
            prompt_tokens = tokens.len(),
            generated_tokens = n_cur - tokens.len(),
            "llama.cpp generation finished"
        );

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Run `decode` with [`PIECE_BUFFER`] bytes, retrying once with the exact
/// size when the piece does not fit.
fn decode_piece(
    mut decode: impl FnMut(usize) -> Result<Vec<u8>, TokenToStringError>,
) -> Result<Vec<u8>, TokenToStringError> {
    match decode(PIECE_BUFFER) {
        Err(TokenToStringError::InsufficientBufferSpace(needed)) => {
            decode(needed.unsigned_abs() as usize)
        }
        other => other,
    }
}
