//! REST client for the task API.
//!
//! Routes: `GET /` (list), `POST /tasks/`, `PUT /tasks/{id}`, `DELETE /tasks/{id}`.

use crate::backend::TaskBackend;
use crate::error::Result;
use crate::task::{Task, TaskDraft, TaskUpdate};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Page size requested on list; matches the server's default limit.
const LIST_LIMIT: u32 = 100;

pub struct RemoteBackend {
    agent: ureq::Agent,
    base_url: String,
}

impl RemoteBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("taskle/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn task_url(&self, id: u32) -> String {
        format!("{}/tasks/{}", self.base_url, id)
    }
}

impl TaskBackend for RemoteBackend {
    fn list(&mut self) -> Result<Vec<Task>> {
        let url = format!("{}/", self.base_url);
        tracing::debug!(%url, "GET tasks");
        let response = self
            .agent
            .get(&url)
            .query("skip", "0")
            .query("limit", &LIST_LIMIT.to_string())
            .call()?;
        read_json(response)
    }

    fn create(&mut self, draft: &TaskDraft) -> Result<Task> {
        let url = format!("{}/tasks/", self.base_url);
        tracing::debug!(%url, name = %draft.name, "POST task");
        read_json(self.agent.post(&url).send_json(draft)?)
    }

    fn update(&mut self, id: u32, update: &TaskUpdate) -> Result<Task> {
        let url = self.task_url(id);
        tracing::debug!(%url, "PUT task");
        read_json(self.agent.put(&url).send_json(update)?)
    }

    fn delete(&mut self, id: u32) -> Result<()> {
        let url = self.task_url(id);
        tracing::debug!(%url, "DELETE task");
        self.agent.delete(&url).call()?;
        Ok(())
    }
}

/// Decodes a response body; malformed JSON surfaces as `AppError::Json`.
pub(crate) fn read_json<T: DeserializeOwned>(response: ureq::Response) -> Result<T> {
    let body = response.into_string()?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::test_support::serve_once;
    use std::net::TcpListener;

    fn backend(url: &str) -> RemoteBackend {
        RemoteBackend::new(url, Duration::from_secs(5))
    }

    #[test]
    fn test_list_requests_root_with_paging() {
        let (url, rx) = serve_once(
            "200 OK",
            r#"[{"id":1,"name":"a","completed":false,"created_at":"2025-01-01T00:00:00"}]"#,
        );
        let tasks = backend(&url).list().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "a");

        let captured = rx.recv().unwrap();
        assert_eq!(captured.request_line, "GET /?skip=0&limit=100 HTTP/1.1");
    }

    #[test]
    fn test_update_sends_partial_body() {
        let (url, rx) = serve_once("200 OK", r#"{"id":4,"name":"a","completed":true}"#);
        let task = backend(&url).update(4, &TaskUpdate::completed(true)).unwrap();
        assert!(task.completed);

        let captured = rx.recv().unwrap();
        assert_eq!(captured.request_line, "PUT /tasks/4 HTTP/1.1");
        assert_eq!(captured.body, r#"{"completed":true}"#);
    }

    #[test]
    fn test_create_posts_draft() {
        let (url, rx) = serve_once("200 OK", r#"{"id":9,"name":"new","completed":false}"#);
        let task = backend(&format!("{url}/")).create(&TaskDraft::new("new")).unwrap();
        assert_eq!(task.id, 9);

        let captured = rx.recv().unwrap();
        assert_eq!(captured.request_line, "POST /tasks/ HTTP/1.1");
        assert_eq!(captured.body, r#"{"name":"new"}"#);
    }

    #[test]
    fn test_missing_task_maps_to_not_found() {
        let (url, rx) = serve_once("404 Not Found", r#"{"detail":"Task not found"}"#);
        let err = backend(&url).delete(42).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(rx.recv().unwrap().request_line, "DELETE /tasks/42 HTTP/1.1");
    }

    #[test]
    fn test_server_error_keeps_status() {
        let (url, _rx) = serve_once("500 Internal Server Error", r#"{"detail":"db down"}"#);
        let err = backend(&url).list().unwrap_err();
        assert!(matches!(err, AppError::Status { code: 500, .. }));
    }

    #[test]
    fn test_connection_refused_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = backend(&format!("http://{addr}")).list().unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }

    #[test]
    fn test_malformed_body_is_json_error() {
        let (url, _rx) = serve_once("200 OK", r#"{"id":"not a number"}"#);
        let err = backend(&url).update(1, &TaskUpdate::completed(true)).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }
}
