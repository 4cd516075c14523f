use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use roster_api::{FieldErrors, RemoteError, RemoteRoster, Student, StudentDraft, StudentId};
use tracing::{debug, error};

/// HTTP implementation of the remote collection resource.
///
/// Each call is attempted exactly once; there are no retries and no
/// cancellation once a request is issued.
pub struct HttpRemoteRoster {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemoteRoster {
    /// `base_url` is the collection path, e.g. `http://host/api/students`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    fn record_url(&self, id: StudentId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// Better error messages from reqwest errors, by failure class.
    fn transport_from_reqwest(e: reqwest::Error, url: &str, operation: &str) -> RemoteError {
        let message = if e.is_timeout() {
            format!("Failed to {operation} for {url}: timeout - request took too long")
        } else if e.is_connect() {
            format!("Failed to {operation} for {url}: connection error - {e}")
        } else if e.is_decode() {
            format!("Failed to {operation} for {url}: decode error - unexpected response format")
        } else {
            format!("Failed to {operation} for {url}: {e}")
        };
        error!("[HttpRemoteRoster] {}", message);
        RemoteError::transport(message)
    }

    async fn read_body(response: reqwest::Response, url: &str) -> Result<String, RemoteError> {
        response.text().await.map_err(|e| {
            RemoteError::transport(format!("Failed to read response body from {url}: {e}"))
        })
    }
}

/// Transport error for an unexpected status, with the body truncated so a
/// server error page does not flood the notification channel.
fn http_failure(status: StatusCode, url: &str, body: &str) -> RemoteError {
    let body = if body.chars().count() > 500 {
        format!("{}... (truncated)", body.chars().take(500).collect::<String>())
    } else {
        body.to_string()
    };
    RemoteError::transport(format!(
        "HTTP {} error from {}: {}",
        status.as_u16(),
        url,
        body
    ))
}

/// Outcome mapping for create/update responses: 2xx carries the saved
/// record, 400 with a parseable field-error map is a validation failure,
/// everything else is a transport error.
fn submit_outcome(status: StatusCode, body: &str, url: &str) -> Result<Student, RemoteError> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| {
            RemoteError::transport(format!("Failed to parse record from {url}: {e}"))
        });
    }
    if status == StatusCode::BAD_REQUEST {
        // Only a body naming at least one form field counts as a field-error
        // map; a framework error page that happens to be JSON does not.
        match serde_json::from_str::<FieldErrors>(body) {
            Ok(errors) if !errors.is_empty() => {
                return Err(RemoteError::Validation { errors });
            }
            _ => {}
        }
    }
    Err(http_failure(status, url, body))
}

#[async_trait]
impl RemoteRoster for HttpRemoteRoster {
    async fn list(&self) -> Result<Vec<Student>, RemoteError> {
        let url = self.base_url.clone();
        debug!("[HttpRemoteRoster] Fetching collection: url={}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_from_reqwest(e, &url, "fetch students"))?;

        let status = response.status();
        let body = Self::read_body(response, &url).await?;
        if !status.is_success() {
            return Err(http_failure(status, &url, &body));
        }

        let students: Vec<Student> = serde_json::from_str(&body).map_err(|e| {
            RemoteError::transport(format!("Failed to parse student list from {url}: {e}"))
        })?;
        debug!("[HttpRemoteRoster] Fetched {} records", students.len());
        Ok(students)
    }

    async fn get(&self, id: StudentId) -> Result<Student, RemoteError> {
        let url = self.record_url(id);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Self::transport_from_reqwest(e, &url, "fetch student"))?;

        let status = response.status();
        let body = Self::read_body(response, &url).await?;
        if !status.is_success() {
            return Err(http_failure(status, &url, &body));
        }
        serde_json::from_str(&body)
            .map_err(|e| RemoteError::transport(format!("Failed to parse record from {url}: {e}")))
    }

    async fn create(&self, draft: &StudentDraft) -> Result<Student, RemoteError> {
        let url = self.base_url.clone();
        debug!("[HttpRemoteRoster] Creating record");

        let response = self
            .client
            .post(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| Self::transport_from_reqwest(e, &url, "create student"))?;

        let status = response.status();
        let body = Self::read_body(response, &url).await?;
        submit_outcome(status, &body, &url)
    }

    async fn update(&self, id: StudentId, draft: &StudentDraft) -> Result<Student, RemoteError> {
        let url = self.record_url(id);
        debug!("[HttpRemoteRoster] Updating record: id={}", id);

        let response = self
            .client
            .put(&url)
            .json(draft)
            .send()
            .await
            .map_err(|e| Self::transport_from_reqwest(e, &url, "update student"))?;

        let status = response.status();
        let body = Self::read_body(response, &url).await?;
        submit_outcome(status, &body, &url)
    }

    async fn delete(&self, id: StudentId) -> Result<(), RemoteError> {
        let url = self.record_url(id);
        debug!("[HttpRemoteRoster] Deleting record: id={}", id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Self::transport_from_reqwest(e, &url, "delete student"))?;

        let status = response.status();
        if !status.is_success() {
            let body = Self::read_body(response, &url).await?;
            return Err(http_failure(status, &url, &body));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_url_and_trailing_slash() {
        let client = HttpRemoteRoster::new("http://host/api/students/");
        assert_eq!(client.base_url, "http://host/api/students");
        assert_eq!(client.record_url(7), "http://host/api/students/7");
    }

    #[test]
    fn test_submit_outcome_success_parses_record() {
        let body = r#"{"id":5,"name":"Ann","email":"a@x.com","course":"CS"}"#;
        let student = submit_outcome(StatusCode::CREATED, body, "http://x").unwrap();
        assert_eq!(student.id, 5);

        let student = submit_outcome(StatusCode::OK, body, "http://x").unwrap();
        assert_eq!(student.name, "Ann");
    }

    #[test]
    fn test_submit_outcome_400_with_field_map_is_validation() {
        let body = r#"{"email":"must be valid"}"#;
        let err = submit_outcome(StatusCode::BAD_REQUEST, body, "http://x").unwrap_err();
        match err {
            RemoteError::Validation { errors } => {
                assert_eq!(errors.email.as_deref(), Some("must be valid"));
                assert!(errors.name.is_none());
            }
            other => panic!("expected validation, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_outcome_400_without_map_is_transport() {
        let err = submit_outcome(StatusCode::BAD_REQUEST, "bad request", "http://x").unwrap_err();
        assert!(matches!(err, RemoteError::Transport { .. }));
    }

    #[test]
    fn test_submit_outcome_400_with_framework_error_page_is_transport() {
        // A JSON body without any known field key is not a field-error map.
        let body = r#"{"timestamp":"2024-01-01T00:00:00Z","status":400,"error":"Bad Request"}"#;
        let err = submit_outcome(StatusCode::BAD_REQUEST, body, "http://x").unwrap_err();
        assert!(matches!(err, RemoteError::Transport { .. }));
    }

    #[test]
    fn test_submit_outcome_other_status_is_transport() {
        let err =
            submit_outcome(StatusCode::INTERNAL_SERVER_ERROR, "boom", "http://x").unwrap_err();
        match err {
            RemoteError::Transport { message } => {
                assert!(message.contains("HTTP 500 error from http://x"));
                assert!(message.contains("boom"));
            }
            other => panic!("expected transport, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_outcome_2xx_with_garbage_body_is_transport() {
        let err = submit_outcome(StatusCode::OK, "not json", "http://x").unwrap_err();
        assert!(matches!(err, RemoteError::Transport { .. }));
    }

    #[test]
    fn test_http_failure_truncates_long_bodies() {
        let body = "x".repeat(2000);
        let err = http_failure(StatusCode::BAD_GATEWAY, "http://x", &body);
        match err {
            RemoteError::Transport { message } => {
                assert!(message.contains("(truncated)"));
                assert!(message.len() < 700);
            }
            other => panic!("expected transport, got {other:?}"),
        }
    }

    #[test]
    fn test_draft_serializes_to_wire_shape() {
        let draft = StudentDraft {
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
            course: "CS".to_string(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name":"Ann","email":"a@x.com","course":"CS"})
        );
    }
}
