//! Shared vocabulary for the roster client
//!
//! This crate defines the types spoken between the state-machine core and
//! the transport layer:
//! - `models` - Student record, submission draft, field-error map
//! - `error` - RemoteError taxonomy (transport vs. validation)
//! - `remote` - RemoteRoster trait describing the collection resource

pub mod error;
pub mod models;
pub mod remote;

pub use error::RemoteError;
pub use models::{Field, FieldErrors, Student, StudentDraft, StudentId};
pub use remote::RemoteRoster;
