//! Client layer: orchestrates validation, transport calls and response decoding.

mod http;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

pub use http::{
    BasicAuth, BoxError, BoxFuture, HttpMethod, HttpRequest, HttpResponse, HttpTransport,
};

use crate::domain::{
    BaseUrl, PriorityInput, SendMessage, SendMessageResponse, Token, Username, ValidationError,
};
use crate::transport::ResponseParseError;
use http::ReqwestTransport;

const SEND_MESSAGE_PATH: &str = "/message/free";
const PING_PATH: &str = "/api/ping";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Account credentials, sent as HTTP Basic authentication on every live request.
pub struct Credentials {
    username: Username,
    token: Token,
}

impl Credentials {
    /// Validate that both parts are non-empty.
    pub fn new(
        username: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            token: Token::new(token)?,
        })
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    fn basic_auth(&self) -> BasicAuth {
        BasicAuth {
            username: self.username.as_str().to_owned(),
            password: self.token.as_str().to_owned(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsClient`].
///
/// Input problems ([`SmsError::Validation`]) are reported before anything is sent, so they
/// can always be told apart from a bad answer of the API ([`SmsError::ResponseParse`]).
pub enum SmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// Non-successful HTTP status code returned by the ping endpoint.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The API answered with something that is not a valid `message/free` response.
    #[error("response parse error: {0}")]
    ResponseParse(#[source] ResponseParseError),

    /// A base URL, credential or recipient list was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone)]
/// Builder for [`SmsClient`].
///
/// Use this when you need a custom base URL, debug mode, timeout, user-agent or transport.
pub struct SmsClientBuilder {
    credentials: Credentials,
    base_url: Option<String>,
    debug: bool,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl SmsClientBuilder {
    /// Create a builder with the default base URL, debug mode off and no HTTP overrides.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: None,
            debug: false,
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the API base URL. Only its host is kept; see [`BaseUrl`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Simulate sends instead of calling the API.
    pub fn debug_mode(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Route requests through a custom [`HttpTransport`] instead of `reqwest`.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`SmsClient`].
    pub fn build(self) -> Result<SmsClient, SmsError> {
        let base_url = match self.base_url.as_deref() {
            Some(raw) => BaseUrl::parse(raw)?,
            None => BaseUrl::default(),
        };

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| SmsError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        Ok(SmsClient {
            credentials: self.credentials,
            base_url,
            debug: self.debug,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level smsportalen.no client.
///
/// Sends go to `<base url>/message/free` as JSON with Basic authentication. The base URL
/// defaults to `https://smsportalen.no`.
pub struct SmsClient {
    credentials: Credentials,
    base_url: BaseUrl,
    debug: bool,
    http: Arc<dyn HttpTransport>,
}

impl fmt::Debug for SmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsClient")
            .field("username", self.credentials.username())
            .field("base_url", &self.base_url)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl SmsClient {
    /// Create a client for the default base URL.
    ///
    /// For more customization, use [`SmsClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: BaseUrl::default(),
            debug: false,
            http: Arc::new(ReqwestTransport::new(reqwest::Client::new())),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> SmsClientBuilder {
        SmsClientBuilder::new(credentials)
    }

    pub fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Whether sends are simulated instead of hitting the API.
    pub fn is_debug_mode(&self) -> bool {
        self.debug
    }

    /// Validate and send one message to up to 5000 recipients.
    ///
    /// `priority` may be a number or its text form; anything outside `1..=9` becomes `2`.
    ///
    /// Errors:
    /// - [`ValidationError::RecipientLimitExceeded`] for more than 5000 recipients,
    /// - [`ValidationError::InvalidPhoneNumbers`] listing every rejected recipient,
    /// - [`SmsError::ResponseParse`] when the API answer cannot be decoded,
    /// - [`SmsError::Transport`] when the request could not be completed.
    pub async fn send<I, S>(
        &self,
        recipients: I,
        message: impl Into<String>,
        priority: impl Into<PriorityInput>,
    ) -> Result<SendMessageResponse, SmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = SendMessage::new(recipients, message, priority)?;
        self.send_message(request).await
    }

    /// Send an already validated request.
    ///
    /// The response body is decoded whatever the HTTP status is: the API reports failures
    /// such as bad credentials (`status: 401`) in the JSON payload itself.
    pub async fn send_message(
        &self,
        request: SendMessage,
    ) -> Result<SendMessageResponse, SmsError> {
        let endpoint = self.base_url.endpoint(SEND_MESSAGE_PATH);
        tracing::debug!(
            endpoint = %endpoint,
            recipients = request.recipients().len(),
            priority = request.priority().value(),
            debug_mode = self.debug,
            "sending message"
        );

        if self.debug {
            return Ok(crate::transport::simulated_send_message_response(&request));
        }

        let body = crate::transport::encode_send_message_json(&request);
        let response = self
            .http
            .execute(HttpRequest::post_json(
                endpoint,
                self.credentials.basic_auth(),
                body,
            ))
            .await
            .map_err(SmsError::Transport)?;

        crate::transport::decode_send_message_json_response(&response.body).map_err(|err| {
            tracing::warn!(
                http_status = response.status,
                error = %err,
                "could not parse message response"
            );
            SmsError::ResponseParse(err)
        })
    }

    /// Probe `<base url>/api/ping` and return the response text.
    ///
    /// Best effort only: the endpoint is unauthenticated and known to be unreliable on the
    /// provider side, so a failure here says little about whether sends will work.
    pub async fn ping(&self) -> Result<String, SmsError> {
        let endpoint = self.base_url.endpoint(PING_PATH);
        let response = self
            .http
            .execute(HttpRequest::get(endpoint))
            .await
            .map_err(SmsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            tracing::warn!(http_status = response.status, "ping failed");
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}
