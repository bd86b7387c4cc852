use tokio::sync::watch;

/// In-flight/error pair of one client, meant for UI binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiStatus {
    pub loading: bool,
    pub error: Option<String>,
}

/// Publishes status transitions to any number of subscribers.
#[derive(Debug)]
pub struct StatusCell {
    tx: watch::Sender<ApiStatus>,
}

impl StatusCell {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ApiStatus::default());
        Self { tx }
    }

    pub fn snapshot(&self) -> ApiStatus {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ApiStatus> {
        self.tx.subscribe()
    }

    /// Marks a call as started. `loading` goes back to `false` when the
    /// returned guard is dropped, whatever the outcome.
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.tx.send_modify(|status| {
            status.loading = true;
            status.error = None;
        });
        LoadingGuard { cell: self }
    }

    pub fn fail(&self, message: String) {
        self.tx.send_modify(|status| status.error = Some(message));
    }
}

impl Default for StatusCell {
    fn default() -> Self {
        Self::new()
    }
}

pub struct LoadingGuard<'a> {
    cell: &'a StatusCell,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.cell.tx.send_modify(|status| status.loading = false);
    }
}
