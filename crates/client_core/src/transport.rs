//! Request/response plumbing against the remote student record store.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Student, StudentId},
    protocol::{StudentPayload, SEARCH_QUERY_PARAM, STUDENTS_PATH},
};
use tracing::{debug, warn};

use crate::error::ClientError;

/// One round trip per call, no retries, no state kept between calls.
#[async_trait]
pub trait StudentTransport: Send + Sync {
    async fn fetch_list(&self, query: &str) -> Result<Vec<Student>, ClientError>;
    async fn create(&self, payload: &StudentPayload) -> Result<Student, ClientError>;
    async fn update(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> Result<Student, ClientError>;
    async fn delete(&self, id: &StudentId) -> Result<(), ClientError>;
}

pub struct HttpTransport {
    http: Client,
    server_url: String,
}

impl HttpTransport {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, server_url))
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }

    /// `/api/students/<id>` with the id percent-encoded as one path segment.
    fn record_url(&self, id: &StudentId) -> Result<Url, ClientError> {
        let invalid = || ClientError::InvalidServerUrl(self.server_url.clone());
        let mut url = Url::parse(&self.url(STUDENTS_PATH)).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .push(id.as_str());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|err| {
            warn!(request = what, "record store unreachable: {err}");
            ClientError::Transport(err)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(request = what, status = status.as_u16(), "record store responded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(
            request = what,
            status = status.as_u16(),
            "record store rejected request"
        );
        Err(ClientError::remote(status.as_u16(), body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ClientError::Decode)
    }
}

#[async_trait]
impl StudentTransport for HttpTransport {
    async fn fetch_list(&self, query: &str) -> Result<Vec<Student>, ClientError> {
        let query = query.trim();
        let mut request = self.http.get(self.url(STUDENTS_PATH));
        if !query.is_empty() {
            request = request.query(&[(SEARCH_QUERY_PARAM, query)]);
        }

        let response = self.send(request, "list_students").await?;
        Self::decode(response).await
    }

    async fn create(&self, payload: &StudentPayload) -> Result<Student, ClientError> {
        let request = self.http.post(self.url(STUDENTS_PATH)).json(payload);
        let response = self.send(request, "create_student").await?;
        Self::decode(response).await
    }

    async fn update(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> Result<Student, ClientError> {
        let request = self.http.put(self.record_url(id)?).json(payload);
        let response = self.send(request, "update_student").await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: &StudentId) -> Result<(), ClientError> {
        let request = self.http.delete(self.record_url(id)?);
        self.send(request, "delete_student").await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
