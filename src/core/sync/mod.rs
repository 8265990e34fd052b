/*!
 * Synchronization Primitives
 *
 * The guarded-value core and the scheduling machinery beneath it:
 * - Worker pool shared by every queue in the process
 * - Execution queues implementing concurrent (reader/writer) and serial
 *   disciplines on top of the pool
 * - Guarded values exposing read / mutate / read-mutate over any type
 * - A notification thread for completion callbacks
 *
 * # Architecture
 *
 * ```text
 * facade call -> GuardedValue primitive -> ExecutionQueue -> WorkerPool
 * ```
 *
 * Ordering guarantees hold per guarded value only; operations on
 * different values are not ordered relative to each other.
 */

mod config;
mod dispatch;
mod guarded;
pub mod notify;
mod pool;

pub use config::{DispatchConfig, STACK_SIZE_ENV, WORKERS_ENV};
pub use dispatch::{AccessMode, ExecutionQueue, TaskKind};
pub use guarded::{FailureHook, GuardedValue};
pub use pool::{init_pool, pool, WorkerPool};
