//! System settings read from `config.properties`.

use std::path::Path;
use std::sync::LazyLock;

use presto_core::Result;

use crate::store::PropertyStore;
use crate::value::PropertyValue;

static INSTANCE: LazyLock<SystemConfig> = LazyLock::new(SystemConfig::new);

/// Typed view over the worker's system settings.
///
/// Getters marked *required* fail when their key is missing. All others fall
/// back to the matching `*_DEFAULT` constant. No getter checks one setting
/// against another; a consumer that needs a cert path when HTTPS is enabled
/// checks that itself.
#[derive(Debug, Default)]
pub struct SystemConfig {
    store: PropertyStore,
}

impl SystemConfig {
    // ── Keys ───────────────────────────────────────────────────

    pub const PRESTO_VERSION: &'static str = "presto.version";
    pub const HTTP_SERVER_HTTP_PORT: &'static str = "http-server.http.port";
    /// Lets a port left in TIME_WAIT be reused immediately on startup. Batch
    /// workers use a fixed port; interactive ones pick a dynamic one.
    pub const HTTP_SERVER_REUSE_PORT: &'static str = "http-server.reuse-port";
    pub const DISCOVERY_URI: &'static str = "discovery.uri";
    pub const MAX_DRIVERS_PER_TASK: &'static str = "task.max-drivers-per-task";
    pub const CONCURRENT_LIFESPANS_PER_TASK: &'static str = "task.concurrent-lifespans-per-task";
    pub const HTTP_EXEC_THREADS: &'static str = "http_exec_threads";
    pub const HTTP_SERVER_HTTPS_PORT: &'static str = "http-server.https.port";
    pub const HTTP_SERVER_HTTPS_ENABLED: &'static str = "http-server.https.enabled";
    pub const HTTPS_SUPPORTED_CIPHERS: &'static str = "https-supported-ciphers";
    pub const HTTPS_CERT_PATH: &'static str = "https-cert-path";
    pub const HTTPS_KEY_PATH: &'static str = "https-key-path";
    pub const HTTPS_CLIENT_CERT_AND_KEY_PATH: &'static str = "https-client-cert-key-path";
    pub const NUM_IO_THREADS: &'static str = "num-io-threads";
    pub const NUM_QUERY_THREADS: &'static str = "num-query-threads";
    pub const NUM_SPILL_THREADS: &'static str = "num-spill-threads";
    pub const SPILLER_SPILL_PATH: &'static str = "experimental.spiller-spill-path";
    pub const SHUTDOWN_ONSET_SEC: &'static str = "shutdown-onset-sec";
    pub const SYSTEM_MEMORY_GB: &'static str = "system-memory-gb";
    pub const ASYNC_CACHE_SSD_GB: &'static str = "async-cache-ssd-gb";
    pub const ASYNC_CACHE_SSD_CHECKPOINT_GB: &'static str = "async-cache-ssd-checkpoint-gb";
    pub const ASYNC_CACHE_SSD_PATH: &'static str = "async-cache-ssd-path";
    /// On copy-on-write file systems such as btrfs the SSD cache can consume
    /// all free space and stop working. Disabling COW on the cache files
    /// prevents that.
    pub const ASYNC_CACHE_SSD_DISABLE_FILE_COW: &'static str = "async-cache-ssd-disable-file-cow";
    pub const ENABLE_SERIALIZED_PAGE_CHECKSUM: &'static str = "enable-serialized-page-checksum";
    pub const USE_MMAP_ARENA: &'static str = "use-mmap-arena";
    pub const MMAP_ARENA_CAPACITY_RATIO: &'static str = "mmap-arena-capacity-ratio";
    pub const USE_MMAP_ALLOCATOR: &'static str = "use-mmap-allocator";
    pub const ENABLE_VELOX_TASK_LOGGING: &'static str = "enable_velox_task_logging";
    pub const ENABLE_VELOX_EXPR_SET_LOGGING: &'static str = "enable_velox_expression_logging";
    pub const LOCAL_SHUFFLE_MAX_PARTITION_BYTES: &'static str = "shuffle.local.max-partition-bytes";
    pub const SHUFFLE_NAME: &'static str = "shuffle.name";
    pub const HTTP_ENABLE_ACCESS_LOG: &'static str = "http-server.enable-access-log";
    pub const HTTP_ENABLE_STATS_FILTER: &'static str = "http-server.enable-stats-filter";
    pub const REGISTER_TEST_FUNCTIONS: &'static str = "register-test-functions";
    /// Largest quantized allocation used to hold a received HTTP response.
    pub const HTTP_MAX_ALLOCATE_BYTES: &'static str = "http-server.max-response-allocate-bytes";

    // ── Defaults ───────────────────────────────────────────────

    /// Most server nodes have at least 16 cores.
    pub const MAX_DRIVERS_PER_TASK_DEFAULT: u32 = 16;
    pub const HTTP_SERVER_REUSE_PORT_DEFAULT: bool = false;
    pub const CONCURRENT_LIFESPANS_PER_TASK_DEFAULT: u32 = 1;
    pub const HTTP_EXEC_THREADS_DEFAULT: u32 = 8;
    pub const HTTP_SERVER_HTTPS_ENABLED_DEFAULT: bool = false;
    pub const HTTPS_SUPPORTED_CIPHERS_DEFAULT: &'static str =
        "ECDHE-ECDSA-AES256-GCM-SHA384,AES256-GCM-SHA384";
    pub const NUM_IO_THREADS_DEFAULT: u32 = 30;
    pub const SHUTDOWN_ONSET_SEC_DEFAULT: u32 = 10;
    pub const SYSTEM_MEMORY_GB_DEFAULT: u32 = 40;
    pub const MMAP_ARENA_CAPACITY_RATIO_DEFAULT: u32 = 10;
    pub const LOCAL_SHUFFLE_MAX_PARTITION_BYTES_DEFAULT: u64 = 1 << 15;
    pub const ASYNC_CACHE_SSD_GB_DEFAULT: u64 = 0;
    pub const ASYNC_CACHE_SSD_CHECKPOINT_GB_DEFAULT: u64 = 0;
    pub const ASYNC_CACHE_SSD_PATH_DEFAULT: &'static str = "/mnt/flash/async_cache.";
    pub const ASYNC_CACHE_SSD_DISABLE_FILE_COW_DEFAULT: bool = false;
    pub const SHUFFLE_NAME_DEFAULT: &'static str = "";
    pub const ENABLE_SERIALIZED_PAGE_CHECKSUM_DEFAULT: bool = true;
    pub const ENABLE_VELOX_TASK_LOGGING_DEFAULT: bool = false;
    pub const ENABLE_VELOX_EXPR_SET_LOGGING_DEFAULT: bool = false;
    pub const USE_MMAP_ARENA_DEFAULT: bool = false;
    pub const USE_MMAP_ALLOCATOR_DEFAULT: bool = true;
    pub const HTTP_ENABLE_ACCESS_LOG_DEFAULT: bool = false;
    pub const HTTP_ENABLE_STATS_FILTER_DEFAULT: bool = false;
    pub const REGISTER_TEST_FUNCTIONS_DEFAULT: bool = false;
    pub const HTTP_MAX_ALLOCATE_BYTES_DEFAULT: u64 = 64 << 10;

    // ── Construction ───────────────────────────────────────────

    pub const fn new() -> Self {
        Self {
            store: PropertyStore::new(),
        }
    }

    pub fn from_store(store: PropertyStore) -> Self {
        Self { store }
    }

    /// The process-wide catalog. Created empty on first use; the host still
    /// has to call [`SystemConfig::initialize`] on it during startup.
    pub fn instance() -> &'static SystemConfig {
        &INSTANCE
    }

    /// Load `config.properties`. See [`PropertyStore::initialize`].
    pub fn initialize(&self, path: impl AsRef<Path>) -> Result<()> {
        self.store.initialize(path)
    }

    pub fn store(&self) -> &PropertyStore {
        &self.store
    }

    fn get_or<T: PropertyValue>(&self, name: &str, default: T) -> Result<T> {
        Ok(self.store.optional_property(name)?.unwrap_or(default))
    }

    // ── Versioning / discovery ─────────────────────────────────

    /// Required.
    pub fn presto_version(&self) -> Result<String> {
        self.store.required_string(Self::PRESTO_VERSION)
    }

    pub fn discovery_uri(&self) -> Option<String> {
        self.store.optional_string(Self::DISCOVERY_URI)
    }

    // ── HTTP / TLS ─────────────────────────────────────────────

    /// Required.
    pub fn http_server_http_port(&self) -> Result<u16> {
        self.store.required_property(Self::HTTP_SERVER_HTTP_PORT)
    }

    pub fn http_server_reuse_port(&self) -> Result<bool> {
        self.get_or(Self::HTTP_SERVER_REUSE_PORT, Self::HTTP_SERVER_REUSE_PORT_DEFAULT)
    }

    pub fn enable_https(&self) -> Result<bool> {
        self.get_or(
            Self::HTTP_SERVER_HTTPS_ENABLED,
            Self::HTTP_SERVER_HTTPS_ENABLED_DEFAULT,
        )
    }

    /// Required.
    pub fn http_server_https_port(&self) -> Result<u16> {
        self.store.required_property(Self::HTTP_SERVER_HTTPS_PORT)
    }

    /// Comma separated ciphers shared by worker and coordinator. Names follow
    /// OpenSSL conventions (`AES256-GCM-SHA384`), not the Java ones
    /// (`TLS_RSA_WITH_AES_256_GCM_SHA384`). At least one cipher has to be
    /// common to every party for worker/coordinator traffic to work.
    pub fn https_supported_ciphers(&self) -> Result<String> {
        self.get_or(
            Self::HTTPS_SUPPORTED_CIPHERS,
            Self::HTTPS_SUPPORTED_CIPHERS_DEFAULT.to_string(),
        )
    }

    /// Server certificate. Unlike the Java coordinator, which bundles cert and
    /// key in one JKS file, the worker takes them separately.
    pub fn https_cert_path(&self) -> Option<String> {
        self.store.optional_string(Self::HTTPS_CERT_PATH)
    }

    pub fn https_key_path(&self) -> Option<String> {
        self.store.optional_string(Self::HTTPS_KEY_PATH)
    }

    /// Cert and key packed into a single unencrypted file (usually PEM) for
    /// the HTTP client.
    pub fn https_client_cert_and_key_path(&self) -> Option<String> {
        self.store.optional_string(Self::HTTPS_CLIENT_CERT_AND_KEY_PATH)
    }

    pub fn enable_http_access_log(&self) -> Result<bool> {
        self.get_or(
            Self::HTTP_ENABLE_ACCESS_LOG,
            Self::HTTP_ENABLE_ACCESS_LOG_DEFAULT,
        )
    }

    pub fn enable_http_stats_filter(&self) -> Result<bool> {
        self.get_or(
            Self::HTTP_ENABLE_STATS_FILTER,
            Self::HTTP_ENABLE_STATS_FILTER_DEFAULT,
        )
    }

    pub fn http_max_allocate_bytes(&self) -> Result<u64> {
        self.get_or(
            Self::HTTP_MAX_ALLOCATE_BYTES,
            Self::HTTP_MAX_ALLOCATE_BYTES_DEFAULT,
        )
    }

    // ── Concurrency ────────────────────────────────────────────

    pub fn max_drivers_per_task(&self) -> Result<u32> {
        self.get_or(Self::MAX_DRIVERS_PER_TASK, Self::MAX_DRIVERS_PER_TASK_DEFAULT)
    }

    pub fn concurrent_lifespans_per_task(&self) -> Result<u32> {
        self.get_or(
            Self::CONCURRENT_LIFESPANS_PER_TASK,
            Self::CONCURRENT_LIFESPANS_PER_TASK_DEFAULT,
        )
    }

    pub fn http_exec_threads(&self) -> Result<u32> {
        self.get_or(Self::HTTP_EXEC_THREADS, Self::HTTP_EXEC_THREADS_DEFAULT)
    }

    pub fn num_io_threads(&self) -> Result<u32> {
        self.get_or(Self::NUM_IO_THREADS, Self::NUM_IO_THREADS_DEFAULT)
    }

    /// Process-wide query execution threads. Defaults to four per core.
    pub fn num_query_threads(&self) -> Result<u32> {
        self.get_or(
            Self::NUM_QUERY_THREADS,
            hardware_concurrency().saturating_mul(4),
        )
    }

    /// Defaults to one per core.
    pub fn num_spill_threads(&self) -> Result<u32> {
        self.get_or(Self::NUM_SPILL_THREADS, hardware_concurrency())
    }

    pub fn shutdown_onset_sec(&self) -> Result<u32> {
        self.get_or(Self::SHUTDOWN_ONSET_SEC, Self::SHUTDOWN_ONSET_SEC_DEFAULT)
    }

    // ── Memory & caching ───────────────────────────────────────

    pub fn system_memory_gb(&self) -> Result<u32> {
        self.get_or(Self::SYSTEM_MEMORY_GB, Self::SYSTEM_MEMORY_GB_DEFAULT)
    }

    pub fn use_mmap_allocator(&self) -> Result<bool> {
        self.get_or(Self::USE_MMAP_ALLOCATOR, Self::USE_MMAP_ALLOCATOR_DEFAULT)
    }

    pub fn use_mmap_arena(&self) -> Result<bool> {
        self.get_or(Self::USE_MMAP_ARENA, Self::USE_MMAP_ARENA_DEFAULT)
    }

    pub fn mmap_arena_capacity_ratio(&self) -> Result<u32> {
        self.get_or(
            Self::MMAP_ARENA_CAPACITY_RATIO,
            Self::MMAP_ARENA_CAPACITY_RATIO_DEFAULT,
        )
    }

    /// SSD cache size; 0 disables the cache.
    pub fn async_cache_ssd_gb(&self) -> Result<u64> {
        self.get_or(Self::ASYNC_CACHE_SSD_GB, Self::ASYNC_CACHE_SSD_GB_DEFAULT)
    }

    pub fn async_cache_enabled(&self) -> Result<bool> {
        Ok(self.async_cache_ssd_gb()? > 0)
    }

    pub fn async_cache_ssd_checkpoint_gb(&self) -> Result<u64> {
        self.get_or(
            Self::ASYNC_CACHE_SSD_CHECKPOINT_GB,
            Self::ASYNC_CACHE_SSD_CHECKPOINT_GB_DEFAULT,
        )
    }

    pub fn async_cache_ssd_path(&self) -> Result<String> {
        self.get_or(
            Self::ASYNC_CACHE_SSD_PATH,
            Self::ASYNC_CACHE_SSD_PATH_DEFAULT.to_string(),
        )
    }

    pub fn async_cache_ssd_disable_file_cow(&self) -> Result<bool> {
        self.get_or(
            Self::ASYNC_CACHE_SSD_DISABLE_FILE_COW,
            Self::ASYNC_CACHE_SSD_DISABLE_FILE_COW_DEFAULT,
        )
    }

    // ── Spill ──────────────────────────────────────────────────

    /// Spill directory. `None` means spilling has nowhere to go; the spiller
    /// decides whether that is fatal.
    pub fn spiller_spill_path(&self) -> Option<String> {
        self.store.optional_string(Self::SPILLER_SPILL_PATH)
    }

    // ── Shuffle ────────────────────────────────────────────────

    pub fn local_shuffle_max_partition_bytes(&self) -> Result<u64> {
        self.get_or(
            Self::LOCAL_SHUFFLE_MAX_PARTITION_BYTES,
            Self::LOCAL_SHUFFLE_MAX_PARTITION_BYTES_DEFAULT,
        )
    }

    /// Shuffle implementation name; empty disables shuffle.
    pub fn shuffle_name(&self) -> Result<String> {
        self.get_or(Self::SHUFFLE_NAME, Self::SHUFFLE_NAME_DEFAULT.to_string())
    }

    pub fn shuffle_enabled(&self) -> Result<bool> {
        Ok(!self.shuffle_name()?.is_empty())
    }

    // ── Logging / diagnostics ──────────────────────────────────

    pub fn enable_serialized_page_checksum(&self) -> Result<bool> {
        self.get_or(
            Self::ENABLE_SERIALIZED_PAGE_CHECKSUM,
            Self::ENABLE_SERIALIZED_PAGE_CHECKSUM_DEFAULT,
        )
    }

    pub fn enable_velox_task_logging(&self) -> Result<bool> {
        self.get_or(
            Self::ENABLE_VELOX_TASK_LOGGING,
            Self::ENABLE_VELOX_TASK_LOGGING_DEFAULT,
        )
    }

    pub fn enable_velox_expr_set_logging(&self) -> Result<bool> {
        self.get_or(
            Self::ENABLE_VELOX_EXPR_SET_LOGGING,
            Self::ENABLE_VELOX_EXPR_SET_LOGGING_DEFAULT,
        )
    }

    // ── Misc ───────────────────────────────────────────────────

    pub fn register_test_functions(&self) -> Result<bool> {
        self.get_or(
            Self::REGISTER_TEST_FUNCTIONS,
            Self::REGISTER_TEST_FUNCTIONS_DEFAULT,
        )
    }
}

fn hardware_concurrency() -> u32 {
    std::thread::available_parallelism()
        .map(|n| u32::try_from(n.get()).unwrap_or(u32::MAX))
        .unwrap_or(1)
}
