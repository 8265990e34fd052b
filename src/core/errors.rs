/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::id::QueueLabel;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::any::Any;
use thiserror::Error;

/// Errors surfaced by guarded values, execution queues and the worker pool
///
/// Closure failures in synchronous calls are returned to the caller directly,
/// so these variants mostly travel through the side channel of fire-and-forget
/// mutations (see [`GuardedValue::take_failure`](crate::core::sync::GuardedValue::take_failure)).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ThreadingError {
    #[error("Closure panicked on {label}: {message}")]
    #[diagnostic(
        code(threading::closure_panicked),
        help("A mutation closure panicked on a worker thread. The value keeps whatever state the closure left behind.")
    )]
    ClosurePanicked { label: QueueLabel, message: String },

    #[error("Closure failed on {label}: {message}")]
    #[diagnostic(
        code(threading::closure_failed),
        help("A fallible mutation returned an error. Inspect the message and resubmit if appropriate.")
    )]
    ClosureFailed { label: QueueLabel, message: String },

    #[error("Invalid dispatch configuration: {0}")]
    #[diagnostic(
        code(threading::invalid_config),
        help("Worker count and stack size must both be non-zero.")
    )]
    InvalidConfig(String),

    #[error("Worker pool already initialized")]
    #[diagnostic(
        code(threading::pool_initialized),
        help("Call init_pool before the first guarded value is created.")
    )]
    PoolAlreadyInitialized,

    #[error("Failed to spawn worker thread: {0}")]
    #[diagnostic(
        code(threading::spawn_failed),
        help("The OS refused to create a thread. Check thread limits and stack size.")
    )]
    SpawnFailed(String),
}

impl ThreadingError {
    /// Build a failure from a custom message
    pub fn failed(label: QueueLabel, message: impl Into<String>) -> Self {
        ThreadingError::ClosureFailed {
            label,
            message: message.into(),
        }
    }

    /// Build a failure from a caught panic payload
    pub fn from_panic(label: QueueLabel, payload: &(dyn Any + Send)) -> Self {
        ThreadingError::ClosurePanicked {
            label,
            message: panic_message(payload),
        }
    }

    /// Label of the queue the failure happened on, if any
    pub fn label(&self) -> Option<QueueLabel> {
        match self {
            ThreadingError::ClosurePanicked { label, .. }
            | ThreadingError::ClosureFailed { label, .. } => Some(*label),
            _ => None,
        }
    }
}

/// Extract a readable message from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Result alias for fallible threading operations
pub type ThreadingResult<T> = Result<T, ThreadingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_extraction() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload: Box<dyn Any + Send> = Box::new(String::from("owned boom"));
        assert_eq!(panic_message(payload.as_ref()), "owned boom");

        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }

    #[test]
    fn test_error_display_includes_label() {
        let err = ThreadingError::failed(QueueLabel::from_raw(7), "bad state");
        assert_eq!(err.to_string(), "Closure failed on threading.queue_7: bad state");
        assert_eq!(err.label(), Some(QueueLabel::from_raw(7)));
        assert_eq!(ThreadingError::PoolAlreadyInitialized.label(), None);
    }

    #[test]
    fn test_error_serializes_tagged() {
        let err = ThreadingError::InvalidConfig("zero workers".into());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"error_type\":\"invalid_config\""));
    }
}
