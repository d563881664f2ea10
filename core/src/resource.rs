//! The resource client: five logical operations against the remote store.
//!
//! # Design
//! `TaskResource` is the seam the state manager depends on. The HTTP
//! implementation pairs the stateless `TodoClient` (request/response mapping)
//! with a `Transport` (the round-trip), so each call is build, execute, parse.
//! Nothing is cached here; every call reaches the server.

use async_trait::async_trait;

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreateTask, Task, TaskId, UpdateTask};

#[async_trait]
pub trait TaskResource: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, ApiError>;
    async fn create(&self, text: &str) -> Result<Task, ApiError>;
    async fn update(&self, id: &TaskId, patch: &UpdateTask) -> Result<Task, ApiError>;
    async fn delete(&self, id: &TaskId) -> Result<(), ApiError>;
    async fn clear_completed(&self) -> Result<(), ApiError>;
}

/// `TaskResource` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskResource<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> HttpTaskResource<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }
}

#[async_trait]
impl<T: Transport> TaskResource for HttpTaskResource<T> {
    async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let req = self.client.build_list_todos();
        let resp = self.transport.execute(req).await?;
        self.client.parse_list_todos(resp)
    }

    async fn create(&self, text: &str) -> Result<Task, ApiError> {
        let input = CreateTask {
            text: text.to_string(),
        };
        let req = self.client.build_create_todo(&input)?;
        let resp = self.transport.execute(req).await?;
        self.client.parse_create_todo(resp)
    }

    async fn update(&self, id: &TaskId, patch: &UpdateTask) -> Result<Task, ApiError> {
        let req = self.client.build_update_todo(id, patch)?;
        let resp = self.transport.execute(req).await?;
        self.client.parse_update_todo(resp)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), ApiError> {
        let req = self.client.build_delete_todo(id);
        let resp = self.transport.execute(req).await?;
        self.client.parse_delete_todo(resp)
    }

    async fn clear_completed(&self) -> Result<(), ApiError> {
        let req = self.client.build_clear_completed();
        let resp = self.transport.execute(req).await?;
        self.client.parse_clear_completed(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Replays canned responses and records every request it sees.
    struct Recorded {
        responses: Mutex<Vec<Result<HttpResponse, ApiError>>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Recorded {
        fn new(mut responses: Vec<Result<HttpResponse, ApiError>>) -> Arc<Self> {
            responses.reverse();
            Arc::new(Self {
                responses: Mutex::new(responses),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for Recorded {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().push(request);
            self.responses.lock().pop().expect("no canned response left")
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    #[tokio::test]
    async fn create_round_trips_through_transport() {
        let transport = Recorded::new(vec![ok(
            200,
            r#"{"id":"x","text":"Walk dog","completed":false,"created_at":"now"}"#,
        )]);
        let resource = HttpTaskResource::new(TodoClient::new("http://h/api"), Arc::clone(&transport));

        let task = resource.create("Walk dog").await.unwrap();
        assert_eq!(task.id, TaskId::new("x"));
        assert_eq!(resource.client().base_url(), "http://h/api");

        let seen = transport.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].path, "http://h/api/todos");
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_single_error() {
        let transport = Recorded::new(vec![Err(ApiError::Transport("refused".to_string()))]);
        let resource = HttpTaskResource::new(TodoClient::new("http://h/api"), Arc::clone(&transport));

        let err = resource.list().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn clear_completed_non_2xx_fails() {
        let transport = Recorded::new(vec![ok(503, "busy")]);
        let resource = HttpTaskResource::new(TodoClient::new("http://h/api"), Arc::clone(&transport));

        let err = resource.clear_completed().await.unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
        assert_eq!(
            transport.seen.lock()[0].path,
            "http://h/api/todos/completed/clear"
        );
    }
}
