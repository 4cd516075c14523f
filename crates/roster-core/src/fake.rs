//! In-memory roster backend for tests and offline use.
//!
//! FakeRoster implements `RemoteRoster` against a mutex-guarded vector and
//! reproduces the server's behavior where the client can observe it:
//! validation rejections with the server's field-error messages, monotonic
//! id assignment, and not-found answers for stale ids. A one-shot transport
//! failure can be injected to exercise error paths.

use std::sync::Mutex;

use async_trait::async_trait;
use roster_api::{
    Field, FieldErrors, RemoteError, RemoteRoster, Student, StudentDraft, StudentId,
};

#[derive(Debug, Default)]
struct FakeState {
    students: Vec<Student>,
    next_id: StudentId,
    fail_next: Option<String>,
}

pub struct FakeRoster {
    state: Mutex<FakeState>,
}

impl FakeRoster {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                students: Vec::new(),
                next_id: 1,
                fail_next: None,
            }),
        }
    }

    /// Start with existing records; ids must be unique.
    pub fn seeded(students: Vec<Student>) -> Self {
        let next_id = students.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(FakeState {
                students,
                next_id,
                fail_next: None,
            }),
        }
    }

    /// Make the next call fail with a transport error carrying `message`.
    pub fn fail_next(&self, message: &str) {
        self.lock().fail_next = Some(message.to_string());
    }

    /// Current records, in insertion order.
    pub fn records(&self) -> Vec<Student> {
        self.lock().students.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn take_failure(state: &mut FakeState) -> Result<(), RemoteError> {
        match state.fail_next.take() {
            Some(message) => Err(RemoteError::Transport { message }),
            None => Ok(()),
        }
    }

    /// Server-side rules as the original backend enforces them: name and
    /// course must not be blank, email must be well-formed.
    fn validate(draft: &StudentDraft) -> FieldErrors {
        let mut errors = FieldErrors::default();
        if draft.name.trim().is_empty() {
            errors.set(Field::Name, "must not be blank");
        }
        if draft.email.trim().is_empty() {
            errors.set(Field::Email, "must not be blank");
        } else if !email_is_well_formed(&draft.email) {
            errors.set(Field::Email, "must be a well-formed email address");
        }
        if draft.course.trim().is_empty() {
            errors.set(Field::Course, "must not be blank");
        }
        errors
    }

    fn not_found(id: StudentId) -> RemoteError {
        RemoteError::transport(format!("Student not found with id: {id}"))
    }
}

fn email_is_well_formed(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

impl Default for FakeRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteRoster for FakeRoster {
    async fn list(&self) -> Result<Vec<Student>, RemoteError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        Ok(state.students.clone())
    }

    async fn get(&self, id: StudentId) -> Result<Student, RemoteError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        state
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, draft: &StudentDraft) -> Result<Student, RemoteError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let errors = Self::validate(draft);
        if !errors.is_empty() {
            return Err(RemoteError::Validation { errors });
        }
        let student = Student {
            id: state.next_id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            course: draft.course.clone(),
        };
        state.next_id += 1;
        state.students.push(student.clone());
        Ok(student)
    }

    async fn update(&self, id: StudentId, draft: &StudentDraft) -> Result<Student, RemoteError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let errors = Self::validate(draft);
        if !errors.is_empty() {
            return Err(RemoteError::Validation { errors });
        }
        let student = state
            .students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        student.name = draft.name.clone();
        student.email = draft.email.clone();
        student.course = draft.course.clone();
        Ok(student.clone())
    }

    async fn delete(&self, id: StudentId) -> Result<(), RemoteError> {
        let mut state = self.lock();
        Self::take_failure(&mut state)?;
        let before = state.students.len();
        state.students.retain(|s| s.id != id);
        if state.students.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}
