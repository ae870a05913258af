//! Core error handling and configuration for the evaluation harness.

pub mod config;
pub mod errors;

pub use errors::{EvalError, EvalResult};
