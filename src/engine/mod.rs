//! Lint engine.
//!
//! Resource discovery, runtime resolution, per-resource validation and
//! result aggregation.

pub mod result;
pub mod runtime;
pub mod scanner;
pub mod validator;
