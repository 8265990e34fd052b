/*!
 * Completion Notifications
 *
 * Dedicated thread for completion callbacks of asynchronous operations.
 * Callbacks never run on the caller's thread and never occupy a slot on
 * the execution queue that produced them.
 */

use super::pool::{pool, Job};
use crate::core::errors::panic_message;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use std::thread;
use tracing::{error, warn};

/// Name of the notification thread
pub const NOTIFY_THREAD_NAME: &str = "threading-notify";

static NOTIFIER: OnceLock<Option<flume::Sender<Job>>> = OnceLock::new();

fn notifier() -> Option<&'static flume::Sender<Job>> {
    NOTIFIER
        .get_or_init(|| {
            let (sender, receiver) = flume::unbounded::<Job>();
            let spawned = thread::Builder::new()
                .name(NOTIFY_THREAD_NAME.to_string())
                .spawn(move || {
                    while let Ok(callback) = receiver.recv() {
                        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
                            error!(
                                panic = %panic_message(payload.as_ref()),
                                "Completion callback panicked"
                            );
                        }
                    }
                });
            match spawned {
                Ok(_) => Some(sender),
                Err(e) => {
                    warn!(error = %e, "Notification thread unavailable, callbacks go to the worker pool");
                    None
                }
            }
        })
        .as_ref()
}

/// Run `callback` on the notification thread
pub fn post<F>(callback: F)
where
    F: FnOnce() + Send + 'static,
{
    let job: Job = Box::new(callback);
    match notifier() {
        Some(sender) => {
            if let Err(flume::SendError(job)) = sender.send(job) {
                pool().execute(job);
            }
        }
        None => pool().execute(job),
    }
}
