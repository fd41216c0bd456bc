use std::path::Path;

use presto_core::Result;
use tracing::info;

use crate::node::NodeConfig;
use crate::system::SystemConfig;

/// Both configuration catalogs of one worker, loaded together at startup and
/// handed by reference to whatever needs settings.
#[derive(Debug, Default)]
pub struct WorkerConfig {
    system: SystemConfig,
    node: NodeConfig,
}

impl WorkerConfig {
    /// Load `config.properties` and `node.properties`. Fails on the first file
    /// that cannot be read or parsed.
    pub fn load(system_path: impl AsRef<Path>, node_path: impl AsRef<Path>) -> Result<Self> {
        let system_path = system_path.as_ref();
        let node_path = node_path.as_ref();

        let system = SystemConfig::new();
        system.initialize(system_path)?;
        let node = NodeConfig::new();
        node.initialize(node_path)?;

        info!(
            system = %system_path.display(),
            node = %node_path.display(),
            "worker configuration loaded"
        );
        Ok(Self { system, node })
    }

    pub fn from_parts(system: SystemConfig, node: NodeConfig) -> Self {
        Self { system, node }
    }

    pub fn system(&self) -> &SystemConfig {
        &self.system
    }

    pub fn node(&self) -> &NodeConfig {
        &self.node
    }
}
