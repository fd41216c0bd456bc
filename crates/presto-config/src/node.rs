//! Node identity read from `node.properties`.

use std::fmt::Debug;
use std::path::Path;
use std::sync::LazyLock;

use presto_core::Result;
use tracing::info;

use crate::store::PropertyStore;
use crate::value::PropertyValue;

static INSTANCE: LazyLock<NodeConfig> = LazyLock::new(NodeConfig::new);

/// Computes a value for a key the file leaves out, e.g. the host's address or
/// its detected physical memory.
pub type Fallback<'a, T> = &'a dyn Fn() -> T;

/// Typed view over the worker's identity and placement.
///
/// Every key is required, except that `node.ip` and `node.memory_gb` may be
/// computed by a caller-supplied fallback. Without a fallback, a missing
/// `node.ip` or `node.memory_gb` fails like any other required key.
#[derive(Debug, Default)]
pub struct NodeConfig {
    store: PropertyStore,
}

impl NodeConfig {
    pub const NODE_ENVIRONMENT: &'static str = "node.environment";
    pub const NODE_ID: &'static str = "node.id";
    pub const NODE_IP: &'static str = "node.ip";
    pub const NODE_LOCATION: &'static str = "node.location";
    pub const NODE_MEMORY_GB: &'static str = "node.memory_gb";

    pub const fn new() -> Self {
        Self {
            store: PropertyStore::new(),
        }
    }

    pub fn from_store(store: PropertyStore) -> Self {
        Self { store }
    }

    /// The process-wide catalog, created empty on first use.
    pub fn instance() -> &'static NodeConfig {
        &INSTANCE
    }

    /// Load `node.properties`. See [`PropertyStore::initialize`].
    pub fn initialize(&self, path: impl AsRef<Path>) -> Result<()> {
        self.store.initialize(path)
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    pub fn node_environment(&self) -> Result<String> {
        self.store.required_string(Self::NODE_ENVIRONMENT)
    }

    pub fn node_id(&self) -> Result<String> {
        self.store.required_string(Self::NODE_ID)
    }

    pub fn node_location(&self) -> Result<String> {
        self.store.required_string(Self::NODE_LOCATION)
    }

    /// Address this node advertises. Taken from the file when present,
    /// otherwise computed by `fallback`.
    pub fn node_ip(&self, fallback: Option<Fallback<'_, String>>) -> Result<String> {
        self.with_fallback(Self::NODE_IP, fallback)
    }

    /// Memory budget in GB. Taken from the file when present, otherwise
    /// computed by `fallback`.
    pub fn node_memory_gb(&self, fallback: Option<Fallback<'_, u64>>) -> Result<u64> {
        self.with_fallback(Self::NODE_MEMORY_GB, fallback)
    }

    fn with_fallback<T>(&self, name: &str, fallback: Option<Fallback<'_, T>>) -> Result<T>
    where
        T: PropertyValue + Debug,
    {
        if let Some(value) = self.store.optional_property(name)? {
            return Ok(value);
        }
        match fallback {
            Some(compute) => {
                let value = compute();
                info!(property = name, ?value, "property not set, using computed value");
                Ok(value)
            }
            None => Err(self.store.missing(name)),
        }
    }
}
