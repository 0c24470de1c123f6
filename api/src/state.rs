//! API State Management
use parking_lot::Mutex;
use std::sync::Arc;
use vibes_ballot::Ballot;
use vibes_storage::BallotStore;

#[derive(Clone)]
pub struct ApiState {
    pub ballot: Arc<Ballot>,
    pub store: Option<Arc<Mutex<BallotStore>>>,
    pub start_time: std::time::Instant,
}

impl ApiState {
    pub fn new(ballot: Arc<Ballot>) -> Self {
        Self {
            ballot,
            store: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Persist the ballot after every successful cast
    pub fn with_store(mut self, store: BallotStore) -> Self {
        self.store = Some(Arc::new(Mutex::new(store)));
        self
    }

    /// Write the current ballot to the configured store, if any.
    ///
    /// The snapshot is taken while holding the store lock, so a slower
    /// writer can never overwrite a newer snapshot with an older one.
    pub async fn persist(&self) -> Result<(), vibes_storage::StorageError> {
        let Some(store) = self.store.clone() else {
            return Ok(());
        };
        let ballot = Arc::clone(&self.ballot);

        tokio::task::spawn_blocking(move || store.lock().save(&ballot))
            .await
            .map_err(std::io::Error::other)?
    }
}
