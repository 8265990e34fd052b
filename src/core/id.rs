/*!
 * Queue Label Generation
 * Process-wide identifiers for execution queues (diagnostics only)
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix used when rendering labels
pub const LABEL_PREFIX: &str = "threading.queue_";

/// Process-wide counter, never reset
static NEXT_LABEL: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Type-Safe Label Wrapper
// ============================================================================

/// Identifier attached to an execution queue
///
/// Labels carry no correctness obligation: they exist so log lines and
/// worker thread names can be correlated with a particular guarded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueLabel(u64);

impl QueueLabel {
    /// Issue the next label from the process-wide counter
    #[inline]
    pub fn next() -> Self {
        Self(NEXT_LABEL.fetch_add(1, Ordering::Relaxed))
    }

    /// Wrap a raw id without touching the counter
    #[inline]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Raw numeric id
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for QueueLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", LABEL_PREFIX, self.0)
    }
}

/// Peek at the id the next call to [`QueueLabel::next`] will hand out
#[inline]
pub fn current() -> u64 {
    NEXT_LABEL.load(Ordering::Relaxed)
}
