//! Request transport
//!
//! [`Client`](crate::Client) builds [`Request`]s and hands them to a
//! [`Transport`]. [`HttpTransport`] sends them with `reqwest`;
//! [`MemoryTransport`] records them and replays queued responses, for tests.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use splunk_values::FormValues;
use tokio::sync::Mutex;
use tracing::trace;
use url::Url;

use crate::{ClientConfig, ClientError};

/// The HTTP methods the management API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read an entry or a collection
    Get,
    /// Create or update an entry, or log in
    Post,
    /// Remove an entry
    Delete,
}

/// A request relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// The method
    pub method: Method,
    /// Unencoded path segments
    pub path: Vec<String>,
    /// Query parameters
    pub query: FormValues,
    /// Form-encoded body
    pub form: Option<FormValues>,
    /// Extra headers
    pub headers: Vec<(String, String)>,
}

impl Request {
    fn new(method: Method, path: Vec<String>) -> Self {
        Self {
            method,
            path,
            query: FormValues::new(),
            form: None,
            headers: Vec::new(),
        }
    }

    /// A `GET` of `path`
    pub fn get(path: Vec<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A `POST` of `form` to `path`
    pub fn post(path: Vec<String>, form: FormValues) -> Self {
        Self {
            form: Some(form),
            ..Self::new(Method::Post, path)
        }
    }

    /// A `DELETE` of `path`
    pub fn delete(path: Vec<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(key, value);
        self
    }

    /// Add a header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// The path joined with `/`, for messages
    pub fn display_path(&self) -> String {
        self.path.join("/")
    }
}

/// A raw response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: u16,
    /// The response body
    pub body: String,
}

impl Response {
    /// A response with `status` and `body`
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is below 400
    pub fn is_success(&self) -> bool {
        self.status < 400
    }
}

/// Sends requests to the server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return the raw response, whatever its status
    async fn send(&self, request: Request) -> Result<Response, ClientError>;
}

/// A [`Transport`] over HTTP(S)
#[derive(Clone)]
pub struct HttpTransport {
    base: Url,
    client: HttpClient,
}

impl HttpTransport {
    /// Create a transport for the configured base URL
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut client_builder =
            HttpClient::builder().danger_accept_invalid_certs(config.insecure_skip_verify);

        if let Some(timeout) = config.timeout_seconds {
            client_builder = client_builder.timeout(Duration::from_secs(timeout));
        }

        Ok(Self {
            base: Url::parse(&config.url)?,
            client: client_builder.build()?,
        })
    }

    /// The absolute URL of `request`, path segments and query encoded
    pub fn url_for(&self, request: &Request) -> Result<Url, ClientError> {
        let mut url = self.base.clone();

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::UnexpectedResponse(format!("{} cannot be a base URL", self.base))
            })?
            .pop_if_empty()
            .extend(&request.path);

        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.pairs());
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, ClientError> {
        let url = self.url_for(&request)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Delete => self.client.delete(url),
        };

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(form) = &request.form {
            builder = builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(form.to_query_string());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        trace!(status, bytes = body.len(), "Received response");

        Ok(Response { status, body })
    }
}

/// An in-memory [`Transport`] for testing
///
/// Every request is recorded; responses are replayed in the order they were
/// queued. Clones share the same state.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    requests: Arc<Mutex<Vec<Request>>>,
    responses: Arc<Mutex<VecDeque<Response>>>,
}

impl MemoryTransport {
    /// Create a transport with no queued responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub async fn respond(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .await
            .push_back(Response::new(status, body));
    }

    /// Every request sent so far
    pub async fn requests(&self) -> Vec<Request> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn send(&self, request: Request) -> Result<Response, ClientError> {
        let path = request.display_path();
        self.requests.lock().await.push(request);

        self.responses
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| {
                ClientError::UnexpectedResponse(format!("no response queued for {path}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segments(path: &[&str]) -> Vec<String> {
        path.iter().map(|segment| segment.to_string()).collect()
    }

    #[test]
    fn it_encodes_segments_and_query() -> anyhow::Result<()> {
        let transport = HttpTransport::new(&ClientConfig::new("https://localhost:8089"))?;
        let request = Request::get(segments(&[
            "servicesNS",
            "nobody",
            "search",
            "saved",
            "searches",
            "errors/last hour",
        ]))
        .with_query("output_mode", "json");

        assert_eq!(
            transport.url_for(&request)?.as_str(),
            "https://localhost:8089/servicesNS/nobody/search/saved/searches/errors%2Flast%20hour?output_mode=json"
        );
        Ok(())
    }

    #[test]
    fn it_keeps_a_base_path() -> anyhow::Result<()> {
        let transport =
            HttpTransport::new(&ClientConfig::new("https://gateway.example.com/splunk/"))?;
        let request = Request::delete(segments(&["services", "authentication", "users", "alice"]));

        assert_eq!(
            transport.url_for(&request)?.as_str(),
            "https://gateway.example.com/splunk/services/authentication/users/alice"
        );
        Ok(())
    }

    #[test]
    fn it_rejects_invalid_base_urls() {
        assert!(matches!(
            HttpTransport::new(&ClientConfig::new("not a url")),
            Err(ClientError::Url(_))
        ));
    }

    #[tokio::test]
    async fn it_records_requests_and_replays_responses() -> anyhow::Result<()> {
        let transport = MemoryTransport::new();
        transport.respond(200, "{}").await;

        let response = transport.send(Request::get(segments(&["services"]))).await?;
        assert_eq!(response, Response::new(200, "{}"));
        assert_eq!(transport.requests().await.len(), 1);

        assert!(matches!(
            transport.send(Request::get(segments(&["services"]))).await,
            Err(ClientError::UnexpectedResponse(_))
        ));
        Ok(())
    }
}
