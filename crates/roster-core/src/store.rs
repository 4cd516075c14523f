use std::sync::Arc;

use roster_api::{RemoteError, RemoteRoster, Student, StudentId};
use tracing::debug;

/// Cached copy of the remote collection as of the last successful fetch.
///
/// `refresh` is the only mutator; every other component reads the snapshot
/// between refreshes. The snapshot is replaced wholesale after a completed
/// fetch, so readers never observe a partially updated state.
pub struct CollectionStore {
    remote: Arc<dyn RemoteRoster>,
    snapshot: Vec<Student>,
}

impl CollectionStore {
    /// Starts with an empty snapshot; call `refresh` to populate it.
    pub fn new(remote: Arc<dyn RemoteRoster>) -> Self {
        Self {
            remote,
            snapshot: Vec::new(),
        }
    }

    /// Fetch the collection and replace the held snapshot.
    ///
    /// On failure the previous snapshot is kept untouched.
    pub async fn refresh(&mut self) -> Result<&[Student], RemoteError> {
        let fetched = self.remote.list().await?;
        debug!(
            "[CollectionStore] Snapshot replaced: records={}",
            fetched.len()
        );
        self.snapshot = fetched;
        Ok(&self.snapshot)
    }

    pub fn snapshot(&self) -> &[Student] {
        &self.snapshot
    }

    pub fn find_by_id(&self, id: StudentId) -> Option<&Student> {
        self.snapshot.iter().find(|s| s.id == id)
    }
}
