/*!
 * Worker Pool
 *
 * Process-wide set of worker threads shared by every execution queue.
 * Queues decide *when* a task may start; the pool only decides *where*.
 */

use super::config::DispatchConfig;
use crate::core::errors::{panic_message, ThreadingError, ThreadingResult};
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::thread;
use tracing::{debug, error, warn};

/// Unit of work handed to a worker
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

static POOL: OnceLock<WorkerPool> = OnceLock::new();

/// Fixed-size pool of worker threads fed by an unbounded channel
pub struct WorkerPool {
    sender: flume::Sender<Job>,
    workers: usize,
    prefix: String,
}

impl WorkerPool {
    /// Spawn `config.worker_threads` workers
    ///
    /// Workers exit once the pool (and with it the last sender) is dropped.
    pub fn spawn(config: &DispatchConfig) -> ThreadingResult<Self> {
        config.validate()?;
        let (sender, receiver) = flume::unbounded::<Job>();

        for index in 0..config.worker_threads {
            let receiver = receiver.clone();
            let mut builder =
                thread::Builder::new().name(format!("{}-{}", config.thread_name_prefix, index));
            if let Some(size) = config.stack_size {
                builder = builder.stack_size(size);
            }
            builder
                .spawn(move || worker_loop(receiver))
                .map_err(|e| ThreadingError::SpawnFailed(e.to_string()))?;
        }

        debug!(
            workers = config.worker_threads,
            prefix = %config.thread_name_prefix,
            "Worker pool started"
        );

        Ok(Self {
            sender,
            workers: config.worker_threads,
            prefix: config.thread_name_prefix.clone(),
        })
    }

    /// Queue a job for the next idle worker
    pub(crate) fn execute(&self, job: Job) {
        if self.sender.send(job).is_err() {
            // Only reachable if every worker died, which worker_loop prevents
            error!(prefix = %self.prefix, "Worker pool has no live workers, job dropped");
        }
    }

    /// Number of worker threads
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Thread name prefix of the workers
    #[inline]
    pub fn thread_name_prefix(&self) -> &str {
        &self.prefix
    }

    /// Jobs waiting for a free worker
    #[inline]
    pub fn backlog(&self) -> usize {
        self.sender.len()
    }
}

fn worker_loop(receiver: flume::Receiver<Job>) {
    while let Ok(job) = receiver.recv() {
        // Queued tasks catch their own panics; this keeps the worker alive
        // regardless
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
            error!(panic = %panic_message(payload.as_ref()), "Job panicked on worker");
        }
    }
}

/// Install the process-wide pool with an explicit configuration
///
/// Must run before the first guarded value is used; afterwards the pool is
/// fixed for the lifetime of the process.
pub fn init_pool(config: DispatchConfig) -> ThreadingResult<()> {
    if POOL.get().is_some() {
        return Err(ThreadingError::PoolAlreadyInitialized);
    }
    let pool = WorkerPool::spawn(&config)?;
    POOL.set(pool)
        .map_err(|_| ThreadingError::PoolAlreadyInitialized)
}

/// The process-wide pool, started from [`DispatchConfig::from_env`] on first use
///
/// # Panics
///
/// Panics if not a single worker thread can be spawned.
pub fn pool() -> &'static WorkerPool {
    POOL.get_or_init(|| {
        let config = DispatchConfig::from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring dispatch environment, using defaults");
            DispatchConfig::default()
        });
        match WorkerPool::spawn(&config) {
            Ok(pool) => pool,
            Err(e) => panic!("cannot start worker pool: {}", e),
        }
    })
}
