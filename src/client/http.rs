//! HTTP seam: the client issues requests through [`HttpTransport`] so tests (and callers with
//! special networking needs) can substitute their own implementation.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`HttpTransport::execute`].
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error type produced by transports.
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// HTTP Basic authentication pair.
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single outbound request.
///
/// When `json_body` is set, it is sent with `Content-Type: application/json`.
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub basic_auth: Option<BasicAuth>,
    pub json_body: Option<String>,
}

impl HttpRequest {
    /// Unauthenticated `GET` without a body.
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            basic_auth: None,
            json_body: None,
        }
    }

    /// `POST` of a JSON document with Basic authentication.
    pub fn post_json(url: impl Into<String>, auth: BasicAuth, body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            basic_auth: Some(auth),
            json_body: Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Issues one HTTP request and returns the status with the full body text.
///
/// Non-2xx statuses are not errors at this level; only failures to complete the exchange
/// (DNS, TLS, connection, timeouts) are.
pub trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>>;
}

#[derive(Debug, Clone)]
pub(crate) struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub(crate) fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<HttpResponse, BoxError>> {
        Box::pin(async move {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            if let Some(auth) = request.basic_auth {
                builder = builder.basic_auth(auth.username, Some(auth.password));
            }
            if let Some(body) = request.json_body {
                builder = builder
                    .header(reqwest::header::CONTENT_TYPE, "application/json")
                    .body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}
