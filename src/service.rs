//! Configurable service wrapper around [`SmsClient`] for applications that wire components
//! from configuration.

use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use crate::client::{Credentials, HttpTransport, SmsClient, SmsError};
use crate::domain::{PriorityInput, SendMessageResponse};

const ENV_BASE_URL: &str = "SMSPORTALEN_BASE_URL";
const ENV_USERNAME: &str = "SMSPORTALEN_USERNAME";
const ENV_TOKEN: &str = "SMSPORTALEN_TOKEN";
const ENV_PRIORITY: &str = "SMSPORTALEN_PRIORITY";
const ENV_DEBUG: &str = "SMSPORTALEN_DEBUG";

fn default_priority() -> PriorityInput {
    PriorityInput::Number(1)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Settings for [`SmsService`].
///
/// `username` and `token` are required; an empty value makes [`SmsService::new`] fail.
pub struct ServiceConfig {
    /// API base URL; `None` means `https://smsportalen.no`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub token: String,
    /// Priority used when a caller does not pass one.
    #[serde(default = "default_priority")]
    pub priority: PriorityInput,
    /// Simulate sends instead of calling the API.
    #[serde(default)]
    pub debug: bool,
}

impl ServiceConfig {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: None,
            username: username.into(),
            token: token.into(),
            priority: default_priority(),
            debug: false,
        }
    }

    /// Read the configuration from `SMSPORTALEN_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            base_url: lookup(ENV_BASE_URL).filter(|value| !value.trim().is_empty()),
            username: lookup(ENV_USERNAME).unwrap_or_default(),
            token: lookup(ENV_TOKEN).unwrap_or_default(),
            priority: lookup(ENV_PRIORITY)
                .map(PriorityInput::Text)
                .unwrap_or_else(default_priority),
            debug: lookup(ENV_DEBUG).is_some_and(|value| {
                matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            }),
        }
    }
}

/// Long-lived SMS component.
///
/// Credentials are checked when the service is created; the underlying [`SmsClient`] is
/// built on the first send and reused afterwards.
pub struct SmsService {
    config: ServiceConfig,
    credentials: Credentials,
    transport: Option<Arc<dyn HttpTransport>>,
    client: OnceLock<SmsClient>,
}

impl SmsService {
    /// Validate the configuration. Fails when `username` or `token` is empty.
    pub fn new(config: ServiceConfig) -> Result<Self, SmsError> {
        let credentials = Credentials::new(config.username.as_str(), config.token.as_str())?;
        Ok(Self {
            config,
            credentials,
            transport: None,
            client: OnceLock::new(),
        })
    }

    /// Use a custom [`HttpTransport`] for the client built by this service.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The shared client, built on first use.
    ///
    /// An invalid `base_url` is reported here, on every call, until it is fixed.
    pub fn client(&self) -> Result<&SmsClient, SmsError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let mut builder =
            SmsClient::builder(self.credentials.clone()).debug_mode(self.config.debug);
        if let Some(base_url) = self.config.base_url.as_deref() {
            builder = builder.base_url(base_url);
        }
        if let Some(transport) = self.transport.as_ref() {
            builder = builder.transport(Arc::clone(transport));
        }
        let client = builder.build()?;
        tracing::debug!(
            base_url = %client.base_url(),
            debug_mode = client.is_debug_mode(),
            "built sms client"
        );

        Ok(self.client.get_or_init(|| client))
    }

    /// Send a message; `None` uses the configured priority.
    pub async fn send<I, S>(
        &self,
        recipients: I,
        message: impl Into<String>,
        priority: Option<PriorityInput>,
    ) -> Result<SendMessageResponse, SmsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let priority = priority.unwrap_or_else(|| self.config.priority.clone());
        self.client()?.send(recipients, message, priority).await
    }
}
