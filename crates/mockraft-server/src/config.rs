use std::env;
use std::time::Duration;

/// Entries under `mock_stats:*` and `interviews:*` live this long unless a
/// write invalidates them first.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BUCKET: &str = "mockraft";
const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    S3 { bucket: String },
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Redis { url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub store: StoreBackend,
    pub cache: CacheBackend,
    pub cache_ttl: Duration,
    /// Serve through the Lambda runtime instead of binding a port.
    pub lambda: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("MOCKRAFT_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| eyre::eyre!("invalid MOCKRAFT_PORT {raw:?}: {e}"))?,
            None => DEFAULT_PORT,
        };

        let store = match var("MOCKRAFT_STORE").as_deref().map(str::trim) {
            None | Some("s3") => StoreBackend::S3 {
                bucket: var("MOCKRAFT_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            },
            Some("memory") => StoreBackend::Memory,
            Some(other) => eyre::bail!("unknown MOCKRAFT_STORE {other:?} (expected s3 or memory)"),
        };

        let cache = match var("MOCKRAFT_CACHE").as_deref().map(str::trim) {
            None | Some("redis") => CacheBackend::Redis {
                url: var("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            },
            Some("memory") => CacheBackend::Memory,
            Some(other) => {
                eyre::bail!("unknown MOCKRAFT_CACHE {other:?} (expected redis or memory)")
            }
        };

        let cache_ttl = match var("MOCKRAFT_CACHE_TTL_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|e| eyre::eyre!("invalid MOCKRAFT_CACHE_TTL_SECS {raw:?}: {e}"))?;
                if secs == 0 {
                    eyre::bail!("MOCKRAFT_CACHE_TTL_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_CACHE_TTL,
        };

        Ok(Self {
            port,
            store,
            cache,
            cache_ttl,
            lambda: var("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }

    /// All-in-memory configuration for local runs and tests.
    pub fn in_memory() -> Self {
        Self {
            port: DEFAULT_PORT,
            store: StoreBackend::Memory,
            cache: CacheBackend::Memory,
            cache_ttl: DEFAULT_CACHE_TTL,
            lambda: false,
        }
    }
}
