//! Error types surfaced by `subscribe` when a producer fails.
mod observable_errors;

pub use observable_errors::*;
