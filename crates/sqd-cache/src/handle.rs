//! One-shot computation handle.
//!
//! # Invariants
//!
//! - The worker publishes at most once. A [`Completer`] is consumed by
//!   [`Completer::complete`]; dropping it unfilled marks the handle `Lost`.
//! - Readers never block. [`ComputationHandle::status`] and
//!   [`ComputationHandle::result`] are plain loads; `OnceLock` provides the
//!   publish/observe ordering, so a reader that sees `Completed` also sees
//!   the full result.
//! - Clones share one cell. Identity is [`ComputationHandle::same_handle`].

use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

/// Shared cell: unset = pending, `Some(None)` = lost, `Some(Some(v))` = completed.
struct Cell<T> {
    state: OnceLock<Option<T>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleStatus {
    Pending,
    Completed,
    /// The worker ended without publishing (panicked or dropped its completer).
    Lost,
}

pub struct ComputationHandle<T> {
    cell: Arc<Cell<T>>,
}

impl<T> Clone for ComputationHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T> fmt::Debug for ComputationHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputationHandle")
            .field("status", &self.status())
            .finish()
    }
}

impl<T> ComputationHandle<T> {
    /// Create a pending handle and the completer that fills it.
    pub fn channel() -> (Completer<T>, ComputationHandle<T>) {
        let cell = Arc::new(Cell {
            state: OnceLock::new(),
        });
        (
            Completer {
                cell: Some(Arc::clone(&cell)),
            },
            ComputationHandle { cell },
        )
    }

    /// A handle that is already completed with `value`.
    pub fn completed(value: T) -> Self {
        let (completer, handle) = Self::channel();
        completer.complete(value);
        handle
    }

    pub fn status(&self) -> HandleStatus {
        match self.cell.state.get() {
            None => HandleStatus::Pending,
            Some(None) => HandleStatus::Lost,
            Some(Some(_)) => HandleStatus::Completed,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status() == HandleStatus::Pending
    }

    pub fn is_completed(&self) -> bool {
        self.status() == HandleStatus::Completed
    }

    /// Completed or lost: the worker will never publish again.
    pub fn is_done(&self) -> bool {
        !self.is_pending()
    }

    /// The published result, once completed.
    pub fn result(&self) -> Option<&T> {
        self.cell.state.get().and_then(Option::as_ref)
    }

    /// `true` when both handles share the same underlying cell.
    pub fn same_handle(&self, other: &ComputationHandle<T>) -> bool {
        Arc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Send + Sync + 'static> ComputationHandle<T> {
    /// Run `fut` as an independent task on `runtime` and return its handle.
    ///
    /// The caller is never blocked. If the task panics, the completer is
    /// dropped during unwinding and the handle reports [`HandleStatus::Lost`].
    pub fn spawn<F>(runtime: &tokio::runtime::Handle, fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let (completer, handle) = Self::channel();
        runtime.spawn(async move {
            let value = fut.await;
            completer.complete(value);
        });
        handle
    }
}

/// Write side of a [`ComputationHandle`].
pub struct Completer<T> {
    cell: Option<Arc<Cell<T>>>,
}

impl<T> Completer<T> {
    /// Publish the result. Returns `false` if the cell was already filled.
    pub fn complete(mut self, value: T) -> bool {
        match self.cell.take() {
            Some(cell) => cell.state.set(Some(value)).is_ok(),
            None => false,
        }
    }
}

impl<T> Drop for Completer<T> {
    fn drop(&mut self) {
        if let Some(cell) = self.cell.take() {
            let _ = cell.state.set(None);
        }
    }
}
