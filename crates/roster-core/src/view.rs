//! Pure view description for a frontend.
//!
//! Rendering is a function of (filtered records, edit session) producing
//! plain data; event wiring lives with the embedder, which dispatches
//! `Intent`s back into the controller instead of mutating anything here.

use roster_api::{FieldErrors, Student, StudentDraft};

use crate::session::EditSession;

/// Everything a frontend needs to draw the list and the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterView {
    pub rows: Vec<Student>,
    pub empty: bool,
    pub form: FormView,
}

/// Form chrome and contents for the current edit session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub save_label: &'static str,
    pub cancel_visible: bool,
    pub fields: StudentDraft,
    pub errors: FieldErrors,
}

pub fn render(visible: &[Student], session: &EditSession) -> RosterView {
    let editing = session.is_update();
    RosterView {
        rows: visible.to_vec(),
        empty: visible.is_empty(),
        form: FormView {
            title: if editing { "Edit Student" } else { "Add New Student" },
            save_label: if editing { "Update Student" } else { "Save Student" },
            cancel_visible: editing,
            fields: session.fields().clone(),
            errors: session.errors().clone(),
        },
    }
}
