use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{Student, StudentDraft, StudentId};

/// The remote collection resource holding the student records.
///
/// Every call is attempted exactly once; failures are surfaced to the
/// caller, never swallowed and never retried. `create` and `update` return
/// `RemoteError::Validation` when the server rejects the payload with a
/// field-error map, `RemoteError::Transport` for everything else.
#[async_trait]
pub trait RemoteRoster: Send + Sync {
    /// Fetch the full collection in server order.
    async fn list(&self) -> Result<Vec<Student>, RemoteError>;

    /// Fetch a single record. An unknown id surfaces as `Transport`.
    async fn get(&self, id: StudentId) -> Result<Student, RemoteError>;

    /// Create a record; the server assigns the id.
    async fn create(&self, draft: &StudentDraft) -> Result<Student, RemoteError>;

    /// Replace the fields of one existing record.
    async fn update(&self, id: StudentId, draft: &StudentDraft) -> Result<Student, RemoteError>;

    /// Delete one record.
    async fn delete(&self, id: StudentId) -> Result<(), RemoteError>;
}
