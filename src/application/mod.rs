//! Application services built on the engine port.
//!
//! - [`session`] - [`InferenceSession`](session::InferenceSession), the
//!   blocking one-model session
//! - [`worker`] - [`SessionWorker`](worker::SessionWorker), a single-flight
//!   queue serving async callers from one session

pub mod session;
pub mod worker;
