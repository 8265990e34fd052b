/*!
 * Guarded Values
 *
 * A value plus the execution queue that controls every access to it.
 *
 * # Primitives
 *
 * - [`read`](GuardedValue::read): synchronous shared view
 * - [`mutate`](GuardedValue::mutate): asynchronous exclusive change
 * - [`read_mutate`](GuardedValue::read_mutate): synchronous exclusive change
 *   that returns a result
 *
 * All closures run on pool workers. In [`AccessMode::Concurrent`] reads may
 * overlap each other while mutations are barriers; in
 * [`AccessMode::Serial`] everything runs one at a time in issue order.
 */

use super::dispatch::{AccessMode, ExecutionQueue, TaskKind};
use super::notify;
use crate::core::errors::ThreadingError;
use crate::core::id::QueueLabel;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

/// Observer for failures of fire-and-forget mutations
pub type FailureHook = Arc<dyn Fn(&ThreadingError) + Send + Sync>;

struct Inner<T> {
    // The queue already serializes writers; the lock makes that visible to
    // the type system and is never contended
    value: RwLock<T>,
    queue: ExecutionQueue,
    last_failure: Mutex<Option<ThreadingError>>,
    hook: RwLock<Option<FailureHook>>,
}

impl<T> Inner<T> {
    fn report(&self, failure: ThreadingError) {
        error!(label = %self.queue.label(), error = %failure, "Asynchronous mutation failed");
        let hook = self.hook.read().clone();
        *self.last_failure.lock() = Some(failure.clone());
        if let Some(hook) = hook {
            notify::post(move || hook(&failure));
        }
    }
}

/// Thread-safe wrapper around a single value
///
/// Cloning produces another handle to the same value; the value is dropped
/// once the last handle and the last queued task referencing it are gone.
///
/// # Example
///
/// ```
/// use threaded_collections::{AccessMode, GuardedValue};
///
/// let counter = GuardedValue::new(0u64, AccessMode::Concurrent);
/// counter.mutate(|n| *n += 1);
/// let previous = counter.read_mutate(|n| std::mem::replace(n, 10));
/// assert_eq!(previous, 1);
/// assert_eq!(counter.read(|n| *n), 10);
/// ```
pub struct GuardedValue<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for GuardedValue<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Send + Sync + 'static> GuardedValue<T> {
    /// Guard `value` with the given access mode
    pub fn new(value: T, mode: AccessMode) -> Self {
        Self::with_queue(value, ExecutionQueue::new(mode))
    }

    /// Guard `value` in concurrent mode
    pub fn concurrent(value: T) -> Self {
        Self::new(value, AccessMode::Concurrent)
    }

    /// Guard `value` in serial mode
    pub fn serial(value: T) -> Self {
        Self::new(value, AccessMode::Serial)
    }

    /// Guard `value` with an existing queue
    ///
    /// The queue must not be shared with another guarded value: its tasks
    /// would then serialize against each other.
    pub fn with_queue(value: T, queue: ExecutionQueue) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(value),
                queue,
                last_failure: Mutex::new(None),
                hook: RwLock::new(None),
            }),
        }
    }

    #[inline]
    pub fn mode(&self) -> AccessMode {
        self.inner.queue.mode()
    }

    #[inline]
    pub fn label(&self) -> QueueLabel {
        self.inner.queue.label()
    }

    /// Run `view` against the current value and wait for its result
    ///
    /// A panic inside `view` resumes on the calling thread.
    pub fn read<R, F>(&self, view: F) -> R
    where
        F: FnOnce(&T) -> R + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        self.inner
            .queue
            .dispatch_sync(TaskKind::Read, move || view(&inner.value.read()))
    }

    /// Schedule `transform` with exclusive access and return immediately
    ///
    /// A panic inside `transform` is logged, stored for
    /// [`take_failure`](Self::take_failure) and passed to the failure hook.
    pub fn mutate<F>(&self, transform: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        self.try_mutate(move |value| {
            transform(value);
            Ok::<(), std::convert::Infallible>(())
        });
    }

    /// Like [`mutate`](Self::mutate), for transforms that can fail
    ///
    /// An `Err` is reported through the same side channel as a panic.
    pub fn try_mutate<E, F>(&self, transform: F)
    where
        E: fmt::Display,
        F: FnOnce(&mut T) -> Result<(), E> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        self.inner.queue.dispatch_async(TaskKind::Barrier, move || {
            let label = inner.queue.label();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                transform(&mut inner.value.write())
            }));
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(e)) => inner.report(ThreadingError::failed(label, e.to_string())),
                Err(payload) => inner.report(ThreadingError::from_panic(label, payload.as_ref())),
            }
        });
    }

    /// Schedule `transform`, then hand its result to `completion` on the
    /// notification thread
    ///
    /// `completion` is skipped if `transform` panics.
    pub fn mutate_then<R, F, C>(&self, transform: F, completion: C)
    where
        F: FnOnce(&mut T) -> R + Send + 'static,
        C: FnOnce(R) + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        self.inner.queue.dispatch_async(TaskKind::Barrier, move || {
            let label = inner.queue.label();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                transform(&mut inner.value.write())
            }));
            match outcome {
                Ok(result) => notify::post(move || completion(result)),
                Err(payload) => inner.report(ThreadingError::from_panic(label, payload.as_ref())),
            }
        });
    }

    /// Run `transform` with exclusive access and wait for its result
    pub fn read_mutate<R, F>(&self, transform: F) -> R
    where
        F: FnOnce(&mut T) -> R + Send + 'static,
        R: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        self.inner
            .queue
            .dispatch_sync(TaskKind::Barrier, move || transform(&mut inner.value.write()))
    }

    /// Copy of the current value
    pub fn snapshot(&self) -> T
    where
        T: Clone,
    {
        self.read(T::clone)
    }

    /// Wait until every operation submitted before this call has finished
    pub fn flush(&self) {
        self.inner.queue.dispatch_sync(TaskKind::Barrier, || ());
    }

    /// Remove and return the most recent asynchronous failure
    pub fn take_failure(&self) -> Option<ThreadingError> {
        self.inner.last_failure.lock().take()
    }

    /// Install a hook called for every asynchronous failure, replacing any
    /// previous hook
    ///
    /// The hook runs on the notification thread after the failure has been
    /// stored, so it may call [`take_failure`](Self::take_failure) or make
    /// synchronous calls on this value. It must not block on other
    /// completion callbacks, which share that thread.
    pub fn on_failure<H>(&self, hook: H)
    where
        H: Fn(&ThreadingError) + Send + Sync + 'static,
    {
        *self.inner.hook.write() = Some(Arc::new(hook));
    }
}

impl<T: Default + Send + Sync + 'static> Default for GuardedValue<T> {
    fn default() -> Self {
        Self::concurrent(T::default())
    }
}

impl<T> fmt::Debug for GuardedValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuardedValue")
            .field("label", &self.inner.queue.label())
            .field("mode", &self.inner.queue.mode())
            .finish_non_exhaustive()
    }
}
