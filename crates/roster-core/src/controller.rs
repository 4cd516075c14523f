use std::sync::Arc;
use std::time::Instant;

use roster_api::{Field, RemoteError, RemoteRoster, Student, StudentId};
use tracing::{debug, error, info};

use crate::filter;
use crate::notify::{Notification, NotificationHub};
use crate::session::{EditMode, EditSession};
use crate::store::CollectionStore;
use crate::view::{self, RosterView};

/// A user intention dispatched into the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Fetch the collection for the first time.
    InitialLoad,
    /// Submit the form (create or update, depending on session mode).
    Submit,
    /// Populate the form from an existing record.
    RequestEdit(StudentId),
    /// Delete a record. `confirmed` is the caller-supplied confirmation;
    /// the delete never proceeds without it.
    RequestDelete { id: StudentId, confirmed: bool },
    /// Abandon the current edit and return to create mode.
    Cancel,
    /// The search box changed; re-filter the snapshot locally.
    SearchChanged(String),
}

/// What the embedder should redraw after an intent was handled.
///
/// `Table` covers the whole view, `Form` only the form (validation
/// failures leave the table alone), `None` means nothing structural
/// changed (a notice may still have been posted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderHint {
    Table,
    Form,
    None,
}

/// Orchestrates the store, session, and remote resource in response to
/// user intents, and reconciles local state with each remote outcome.
///
/// Single mutator: intents are handled to completion (including their
/// async tail) before the next one is dispatched, so no locking is needed
/// around the snapshot.
pub struct SyncController {
    remote: Arc<dyn RemoteRoster>,
    store: CollectionStore,
    session: EditSession,
    query: String,
    visible: Vec<Student>,
    notices: NotificationHub,
}

impl SyncController {
    pub fn new(remote: Arc<dyn RemoteRoster>) -> Self {
        Self {
            store: CollectionStore::new(Arc::clone(&remote)),
            remote,
            session: EditSession::new(),
            query: String::new(),
            visible: Vec::new(),
            notices: NotificationHub::new(),
        }
    }

    pub async fn handle(&mut self, intent: Intent) -> RenderHint {
        debug!("[SyncController] Handling intent: {:?}", intent);
        match intent {
            Intent::InitialLoad => self.on_initial_load().await,
            Intent::Submit => self.on_submit().await,
            Intent::RequestEdit(id) => self.on_request_edit(id),
            Intent::RequestDelete { id, confirmed } => self.on_request_delete(id, confirmed).await,
            Intent::Cancel => self.on_cancel(),
            Intent::SearchChanged(query) => self.on_search_changed(query),
        }
    }

    /// Forward a keystroke into the form. Leaves other fields' errors alone.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.session.set_field(field, value);
    }

    /// Render description for the current state. Pure read.
    pub fn view(&self) -> RosterView {
        view::render(&self.visible, &self.session)
    }

    /// The notice visible at `now`, if any.
    pub fn notice(&self, now: Instant) -> Option<&Notification> {
        self.notices.current(now)
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn visible(&self) -> &[Student] {
        &self.visible
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    async fn on_initial_load(&mut self) -> RenderHint {
        match self.store.refresh().await {
            Ok(snapshot) => {
                self.visible = filter::apply(snapshot, &self.query);
            }
            Err(err) => {
                error!("[SyncController] Initial load failed: {}", err);
                self.notices.error(failure_text(err));
                self.visible.clear();
            }
        }
        RenderHint::Table
    }

    async fn on_submit(&mut self) -> RenderHint {
        self.session.clear_errors();
        let payload = self.session.payload();
        let was_update = self.session.is_update();

        let result = match self.session.mode() {
            EditMode::Create => self.remote.create(&payload).await,
            EditMode::Editing(id) => self.remote.update(id, &payload).await,
        };

        match result {
            Ok(saved) => {
                info!(
                    "[SyncController] Submit succeeded: id={}, update={}",
                    saved.id, was_update
                );
                self.notices.success(if was_update {
                    "Student updated successfully!"
                } else {
                    "Student added successfully!"
                });
                self.session.start_create();
                self.refresh_and_filter().await;
                RenderHint::Table
            }
            Err(RemoteError::Validation { errors }) => {
                debug!("[SyncController] Submit rejected by validation");
                self.session.apply_validation_failure(errors);
                RenderHint::Form
            }
            Err(err) => {
                error!("[SyncController] Submit failed: {}", err);
                self.notices.error(failure_text(err));
                RenderHint::None
            }
        }
    }

    fn on_request_edit(&mut self, id: StudentId) -> RenderHint {
        match self.store.find_by_id(id).cloned() {
            Some(record) => {
                self.session.start_edit(&record);
                RenderHint::Form
            }
            None => {
                // Stale row in the UI, not an error worth surfacing.
                debug!("[SyncController] Edit requested for absent id: {}", id);
                RenderHint::None
            }
        }
    }

    async fn on_request_delete(&mut self, id: StudentId, confirmed: bool) -> RenderHint {
        if !confirmed {
            debug!("[SyncController] Delete not confirmed, ignoring: id={}", id);
            return RenderHint::None;
        }

        match self.remote.delete(id).await {
            Ok(()) => {
                info!("[SyncController] Delete succeeded: id={}", id);
                if self.session.mode() == EditMode::Editing(id) {
                    self.session.start_create();
                }
                self.notices.success("Student deleted successfully");
                self.refresh_and_filter().await;
                RenderHint::Table
            }
            Err(err) => {
                error!("[SyncController] Delete failed: id={}, error={}", id, err);
                self.notices.error(failure_text(err));
                RenderHint::None
            }
        }
    }

    fn on_cancel(&mut self) -> RenderHint {
        self.session.start_create();
        RenderHint::Form
    }

    fn on_search_changed(&mut self, query: String) -> RenderHint {
        self.query = query;
        self.visible = filter::apply(self.store.snapshot(), &self.query);
        RenderHint::Table
    }

    /// Refresh the snapshot and re-apply the current filter query. A failed
    /// refresh keeps the previous rows and surfaces the error as a notice.
    async fn refresh_and_filter(&mut self) {
        match self.store.refresh().await {
            Ok(snapshot) => {
                self.visible = filter::apply(snapshot, &self.query);
            }
            Err(err) => {
                error!("[SyncController] Refresh failed: {}", err);
                self.notices.error(failure_text(err));
            }
        }
    }
}

/// Transport messages are forwarded verbatim to the notification channel.
fn failure_text(err: RemoteError) -> String {
    match err {
        RemoteError::Transport { message } => message,
        other => other.to_string(),
    }
}
