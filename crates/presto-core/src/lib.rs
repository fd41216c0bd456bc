//! # presto-core
//!
//! Shared vocabulary for the Presto native worker crates. For now this is the
//! error type every startup path reports through.

pub mod error;

pub use error::{PrestoError, Result};
