//! Join barrier: wait for N concurrent operations, then finalize once.

/// Counts in-flight operations and collects their results.
///
/// Each operation calls [`enter`](Self::enter) when it starts and
/// [`complete`](Self::complete) when it finishes. The completion that brings
/// the count back to zero receives every collected result; all earlier
/// completions receive `None`.
#[derive(Debug, Clone)]
pub struct JoinBarrier<T> {
    outstanding: usize,
    completed: Vec<T>,
}

impl<T> JoinBarrier<T> {
    /// Create an idle barrier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outstanding: 0,
            completed: Vec::new(),
        }
    }

    /// Register a newly started operation.
    pub fn enter(&mut self) {
        self.outstanding += 1;
    }

    /// Record a finished operation.
    ///
    /// Returns the full batch when this was the last outstanding operation.
    pub fn complete(&mut self, result: T) -> Option<Vec<T>> {
        if self.outstanding == 0 {
            tracing::warn!("Barrier completion without a matching enter");
        }
        self.outstanding = self.outstanding.saturating_sub(1);
        self.completed.push(result);

        if self.outstanding == 0 {
            Some(std::mem::take(&mut self.completed))
        } else {
            None
        }
    }

    /// Number of operations still running.
    #[must_use]
    pub const fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Number of results waiting for the batch to close.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.completed.len()
    }

    /// Whether nothing is running and nothing is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.outstanding == 0 && self.completed.is_empty()
    }
}

impl<T> Default for JoinBarrier<T> {
    fn default() -> Self {
        Self::new()
    }
}
