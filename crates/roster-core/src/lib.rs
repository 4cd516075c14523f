//! Client-side state machine for the student roster
//!
//! This crate keeps an in-memory copy of a remote student collection in
//! sync across create/read/update/delete operations and reflects it into a
//! view description:
//! - `store` - CollectionStore (cached snapshot of the collection)
//! - `filter` - free-text filtering over the snapshot
//! - `session` - EditSession (create vs. edit mode, field values, errors)
//! - `notify` - transient success/error notices
//! - `view` - pure render description for a frontend
//! - `controller` - SyncController (intent dispatch and reconciliation)
//! - `fake` - in-memory RemoteRoster for tests and offline use

pub mod controller;
pub mod fake;
pub mod filter;
pub mod notify;
pub mod session;
pub mod store;
pub mod view;

pub use controller::{Intent, RenderHint, SyncController};
pub use fake::FakeRoster;
pub use notify::{Notification, NotificationHub, Severity};
pub use session::{EditMode, EditSession};
pub use store::CollectionStore;
pub use view::{FormView, RosterView};
