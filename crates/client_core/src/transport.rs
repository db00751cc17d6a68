//! HTTP side of the client: the [`TodoApi`] seam and its reqwest implementation.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ClientRequest, Method, Todo, LIST_TODOS_PATH};
use url::Url;

use crate::error::{ClientError, Result};

/// The todo server as seen by the controller.
#[async_trait]
pub trait TodoApi: Send + Sync {
    async fn list_todos(&self) -> Result<Vec<Todo>>;
    /// Sends a mutation. The response body is never read.
    async fn send(&self, request: &ClientRequest) -> Result<()>;
}

pub struct HttpTodoApi {
    http: Client,
    base_url: Url,
}

impl HttpTodoApi {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            base_url: parse_base_url(server_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|source| ClientError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })
    }
}

/// Parses a server url and normalises it so relative joins keep any path prefix.
pub fn parse_base_url(server_url: &str) -> Result<Url> {
    let mut url = Url::parse(server_url.trim()).map_err(|source| ClientError::InvalidUrl {
        url: server_url.to_string(),
        source,
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::UnsupportedScheme(server_url.to_string()));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl TodoApi for HttpTodoApi {
    async fn list_todos(&self) -> Result<Vec<Todo>> {
        let method = Method::Get.as_str();
        let transport = |source| ClientError::Transport {
            method,
            path: LIST_TODOS_PATH.to_string(),
            source,
        };

        let response = self
            .http
            .get(self.endpoint(LIST_TODOS_PATH)?)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method,
                path: LIST_TODOS_PATH.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            path: LIST_TODOS_PATH.to_string(),
            source,
        })
    }

    async fn send(&self, request: &ClientRequest) -> Result<()> {
        let path = request.path();
        let url = self.endpoint(&path)?;
        let builder = match request {
            ClientRequest::CreateTodo(body) => self.http.post(url).json(body),
            ClientRequest::MarkCompleted { .. } => self.http.put(url),
            ClientRequest::DeleteTodo { .. } => self.http.delete(url),
        };

        let method = request.method().as_str();
        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                method,
                path: path.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method,
                path,
                status,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
