//! Adapters: engine bindings (outbound) and the command line (inbound).

pub mod inbound;
pub mod outbound;
