//! # presto-config
//!
//! Typed, read-only access to the worker's property files. `config.properties`
//! backs [`SystemConfig`] and `node.properties` backs [`NodeConfig`]. Each file
//! is loaded once at startup into a [`PropertyStore`] and never changes after.
//!
//! Prefer building a [`WorkerConfig`] and passing it around. The
//! `instance()` accessors exist for code that cannot be handed one.

mod properties;
pub mod node;
pub mod store;
pub mod system;
pub mod value;
pub mod worker;

pub use node::{Fallback, NodeConfig};
pub use store::PropertyStore;
pub use system::SystemConfig;
pub use value::PropertyValue;
pub use worker::WorkerConfig;
