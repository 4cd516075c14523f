use roster_api::{Field, FieldErrors, Student, StudentDraft, StudentId};

/// Whether the form targets a new record or an existing one.
///
/// The tagged variant is the single source of truth for edit mode; there is
/// no hidden id field to keep consistent with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Editing(StudentId),
}

/// The editable form's current target, field values, and per-field errors.
///
/// Starts in `Create`; enters `Editing(id)` when the user asks to edit an
/// existing record and drops back to `Create` on cancel, on successful
/// submit, or when the edited record is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    mode: EditMode,
    fields: StudentDraft,
    errors: FieldErrors,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            mode: EditMode::Create,
            fields: StudentDraft::default(),
            errors: FieldErrors::default(),
        }
    }

    /// Reset to create mode with empty fields and no errors.
    pub fn start_create(&mut self) {
        self.mode = EditMode::Create;
        self.fields = StudentDraft::default();
        self.errors = FieldErrors::default();
    }

    /// Switch to editing `record`, copying its fields verbatim into the form.
    pub fn start_edit(&mut self, record: &Student) {
        self.mode = EditMode::Editing(record.id);
        self.fields = StudentDraft::from(record);
        self.errors = FieldErrors::default();
    }

    /// Mutate one field. Errors on other fields are left alone.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.fields.name = value,
            Field::Email => self.fields.email = value,
            Field::Course => self.fields.course = value,
        }
    }

    pub fn clear_errors(&mut self) {
        self.errors = FieldErrors::default();
    }

    /// Replace the error map wholesale with the server's answer.
    pub fn apply_validation_failure(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    /// The payload to submit: field values with surrounding whitespace
    /// stripped. No client-side validation; the server is authoritative.
    pub fn payload(&self) -> StudentDraft {
        self.fields.trimmed()
    }

    pub fn is_update(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn fields(&self) -> &StudentDraft {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Student {
        Student {
            id: 7,
            name: " Ann ".to_string(),
            email: "a@x.com".to_string(),
            course: "CS".to_string(),
        }
    }

    #[test]
    fn test_start_edit_copies_fields_verbatim() {
        let mut session = EditSession::new();
        session.start_edit(&record());
        assert_eq!(session.mode(), EditMode::Editing(7));
        assert!(session.is_update());
        assert_eq!(session.fields().name, " Ann ");
    }

    #[test]
    fn test_payload_trims_surrounding_whitespace() {
        let mut session = EditSession::new();
        session.start_edit(&record());
        let payload = session.payload();
        assert_eq!(payload.name, "Ann");
        assert_eq!(payload.email, "a@x.com");
        assert_eq!(payload.course, "CS");
    }

    #[test]
    fn test_set_field_keeps_other_field_errors() {
        let mut session = EditSession::new();
        let mut errors = FieldErrors::default();
        errors.set(Field::Email, "must be valid");
        errors.set(Field::Name, "must not be blank");
        session.apply_validation_failure(errors);

        session.set_field(Field::Name, "Ann");
        assert_eq!(session.fields().name, "Ann");
        assert_eq!(session.errors().get(Field::Email), Some("must be valid"));
        assert_eq!(session.errors().get(Field::Name), Some("must not be blank"));
    }

    #[test]
    fn test_validation_failure_replaces_errors_wholesale() {
        let mut session = EditSession::new();
        let mut first = FieldErrors::default();
        first.set(Field::Name, "must not be blank");
        session.apply_validation_failure(first);

        let mut second = FieldErrors::default();
        second.set(Field::Email, "must be valid");
        session.apply_validation_failure(second);

        assert_eq!(session.errors().get(Field::Email), Some("must be valid"));
        assert_eq!(session.errors().get(Field::Name), None);
    }

    #[test]
    fn test_start_create_resets_everything() {
        let mut session = EditSession::new();
        session.start_edit(&record());
        let mut errors = FieldErrors::default();
        errors.set(Field::Course, "must not be blank");
        session.apply_validation_failure(errors);

        session.start_create();
        assert_eq!(session.mode(), EditMode::Create);
        assert_eq!(session.fields(), &StudentDraft::default());
        assert!(session.errors().is_empty());
    }
}
