use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use crate::db::models::ArticleSummary;

/// Observable state of one feed.
///
/// Only whole values are published: readers never see `items` half-built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub items: Arc<Vec<ArticleSummary>>,
    pub loading: bool,
    /// Bumped every time `items` is replaced.
    pub revision: u64,
}

/// Single-writer container around [`FeedState`].
///
/// The loading flag is derived from the number of refresh cycles in flight,
/// so overlapping cycles keep it raised until the last one settles.
pub struct StateCell {
    tx: watch::Sender<FeedState>,
    in_flight: AtomicUsize,
}

impl StateCell {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(FeedState::default());
        Self {
            tx,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> FeedState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.tx.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    /// Register a refresh cycle and raise the loading flag.
    ///
    /// The flag is lowered again when the returned guard is dropped.
    pub fn begin_refresh(&self) -> LoadingGuard<'_> {
        // Counter updates happen inside the channel's write lock so begin/end
        // pairs from different tasks cannot publish out of order.
        self.tx.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
        });
        LoadingGuard { cell: self }
    }

    /// Replace `items` in a single assignment.
    pub fn replace_items(&self, items: Vec<ArticleSummary>) {
        self.tx.send_modify(|state| {
            state.items = Arc::new(items);
            state.revision += 1;
        });
    }

    fn end_refresh(&self) {
        self.tx.send_modify(|state| {
            let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            state.loading = remaining > 0;
        });
    }
}

impl Default for StateCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the loading flag raised for one refresh cycle.
#[must_use = "dropping the guard lowers the loading flag immediately"]
pub struct LoadingGuard<'a> {
    cell: &'a StateCell,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.cell.end_refresh();
    }
}
