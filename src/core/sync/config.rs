/*!
 * Dispatch Configuration
 *
 * Runtime configuration for the shared worker pool
 */

use crate::core::errors::{ThreadingError, ThreadingResult};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the worker count
pub const WORKERS_ENV: &str = "THREADING_WORKERS";

/// Environment variable overriding the worker stack size (bytes)
pub const STACK_SIZE_ENV: &str = "THREADING_STACK_SIZE";

/// Worker pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Number of worker threads executing queued tasks
    pub worker_threads: usize,
    /// Worker threads are named `<prefix>-<index>`
    pub thread_name_prefix: String,
    /// Stack size for worker threads; platform default when `None`
    pub stack_size: Option<usize>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::for_cpu_count()
    }
}

impl DispatchConfig {
    /// One worker per CPU, with a floor of two so a blocked task never
    /// starves the whole pool on small machines
    pub fn for_cpu_count() -> Self {
        Self {
            worker_threads: cpu_count().max(2),
            thread_name_prefix: "threading-worker".to_string(),
            stack_size: None,
        }
    }

    /// A single worker; every task in the process runs on one thread
    pub fn single_threaded() -> Self {
        Self {
            worker_threads: 1,
            ..Self::for_cpu_count()
        }
    }

    /// Defaults overridden by `THREADING_WORKERS` and `THREADING_STACK_SIZE`
    pub fn from_env() -> ThreadingResult<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(WORKERS_ENV) {
            config.worker_threads = raw.trim().parse().map_err(|_| {
                ThreadingError::InvalidConfig(format!("{}={:?} is not a number", WORKERS_ENV, raw))
            })?;
        }

        if let Ok(raw) = std::env::var(STACK_SIZE_ENV) {
            let size = raw.trim().parse().map_err(|_| {
                ThreadingError::InvalidConfig(format!("{}={:?} is not a number", STACK_SIZE_ENV, raw))
            })?;
            config.stack_size = Some(size);
        }

        config.validate()?;
        Ok(config)
    }

    /// Builder-style worker count override
    pub fn with_workers(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads;
        self
    }

    /// Builder-style thread name prefix override
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Reject configurations the pool cannot run with
    pub fn validate(&self) -> ThreadingResult<()> {
        if self.worker_threads == 0 {
            return Err(ThreadingError::InvalidConfig(
                "worker_threads must be at least 1".into(),
            ));
        }
        if self.stack_size == Some(0) {
            return Err(ThreadingError::InvalidConfig(
                "stack_size must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or_else(|_| {
            tracing::warn!("Failed to detect CPU count, defaulting to 4");
            4
        })
}
