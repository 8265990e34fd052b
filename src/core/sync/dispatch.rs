/*!
 * Execution Queues
 *
 * Per-instance task schedulers layered over the shared worker pool.
 *
 * # Scheduling
 *
 * Submitted tasks wait in a FIFO. A drain step starts tasks from the front
 * for as long as the front task is admissible:
 *
 * - a read is admissible while no barrier is running
 * - a barrier is admissible only when nothing is running
 *
 * Draining stops at the first task that is not admissible, so a pending
 * barrier holds back every read submitted after it. Each completion runs
 * the drain again. In serial mode every task is a barrier, which yields a
 * single total order.
 */

use super::pool::{pool, Job, WorkerPool};
use crate::core::errors::panic_message;
use crate::core::id::QueueLabel;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Access discipline of an execution queue, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Reads run in parallel; writes are exclusive barriers
    #[default]
    Concurrent,
    /// Every operation runs alone, in submission order
    Serial,
}

/// How a task interacts with the others on its queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// May overlap other reads (concurrent mode only)
    Read,
    /// Runs with nothing else in flight
    Barrier,
}

struct Pending {
    job: Job,
    barrier: bool,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<Pending>,
    running_reads: usize,
    barrier_running: bool,
}

struct Shared {
    label: QueueLabel,
    mode: AccessMode,
    state: Mutex<QueueState>,
    pool: &'static WorkerPool,
}

/// Handle to a labelled task queue
///
/// Cloning yields another handle to the same queue.
#[derive(Clone)]
pub struct ExecutionQueue {
    shared: Arc<Shared>,
}

impl ExecutionQueue {
    /// Create a queue on the process-wide worker pool
    pub fn new(mode: AccessMode) -> Self {
        Self::on_pool(mode, pool())
    }

    /// Create a queue on a specific pool
    pub fn on_pool(mode: AccessMode, pool: &'static WorkerPool) -> Self {
        let label = QueueLabel::next();
        debug!(label = %label, mode = ?mode, "Execution queue created");
        Self {
            shared: Arc::new(Shared {
                label,
                mode,
                state: Mutex::new(QueueState::default()),
                pool,
            }),
        }
    }

    #[inline]
    pub fn label(&self) -> QueueLabel {
        self.shared.label
    }

    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.shared.mode
    }

    /// Tasks submitted but not yet started
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending.len()
    }

    /// Schedule `task` without waiting for it
    pub fn dispatch_async<F>(&self, kind: TaskKind, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let barrier = kind == TaskKind::Barrier || self.shared.mode == AccessMode::Serial;
        trace!(label = %self.shared.label, barrier, "Task submitted");
        self.shared.state.lock().pending.push_back(Pending {
            job: Box::new(task),
            barrier,
        });
        Shared::drain(&self.shared);
    }

    /// Schedule `task` and park the calling thread until it has run
    ///
    /// A panic inside `task` is resumed on the calling thread.
    ///
    /// Calling this from a task already running on the same queue deadlocks.
    pub fn dispatch_sync<R, F>(&self, kind: TaskKind, task: F) -> R
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (tx, rx) = flume::bounded(1);
        self.dispatch_async(kind, move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(task));
            // The caller is parked on rx; it only disappears if it unwound
            let _ = tx.send(outcome);
        });

        match rx.recv() {
            Ok(Ok(value)) => value,
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(_) => panic!("{}: task dropped before completion", self.shared.label),
        }
    }
}

impl Shared {
    /// Start every admissible task at the front of the queue
    fn drain(shared: &Arc<Shared>) {
        let mut ready = Vec::new();
        {
            let mut state = shared.state.lock();
            loop {
                let barrier = match state.pending.front() {
                    Some(next) => next.barrier,
                    None => break,
                };
                if barrier {
                    if state.running_reads == 0 && !state.barrier_running {
                        state.barrier_running = true;
                        ready.extend(state.pending.pop_front());
                    }
                    break;
                }
                if state.barrier_running {
                    break;
                }
                state.running_reads += 1;
                ready.extend(state.pending.pop_front());
            }
        }

        for Pending { job, barrier } in ready {
            let shared = Arc::clone(shared);
            shared.pool.execute(Box::new(move || {
                if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
                    error!(
                        label = %shared.label,
                        panic = %panic_message(payload.as_ref()),
                        "Task panicked"
                    );
                }
                Shared::complete(&shared, barrier);
            }));
        }
    }

    fn complete(shared: &Arc<Shared>, barrier: bool) {
        {
            let mut state = shared.state.lock();
            if barrier {
                state.barrier_running = false;
            } else {
                state.running_reads -= 1;
            }
        }
        Shared::drain(shared);
    }
}

impl fmt::Debug for ExecutionQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionQueue")
            .field("label", &self.shared.label)
            .field("mode", &self.shared.mode)
            .finish()
    }
}
