//! Typed Rust client for the smsportalen.no HTTP API.
//!
//! The crate has a domain layer of strong types (phone numbers, priorities, the base URL), a
//! transport layer for the JSON wire format, a client layer issuing the HTTP requests, and a
//! small service wrapper for configuration-driven applications.
//!
//! ```rust,no_run
//! use smsportalen::{Credentials, SmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsportalen::SmsError> {
//!     let client = SmsClient::new(Credentials::new("username", "token")?);
//!     let response = client.send(["90000000"], "hello", 2).await?;
//!     println!("scheduled for {} recipients", response.scheduled_recipients_count);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod service;
mod transport;

pub use client::{
    BasicAuth, BoxError, BoxFuture, Credentials, HttpMethod, HttpRequest, HttpResponse,
    HttpTransport, SmsClient, SmsClientBuilder, SmsError,
};
pub use domain::{
    BaseUrl, PhoneNumber, Priority, PriorityInput, SEND_MESSAGE_MAX_RECIPIENTS, SendMessage,
    SendMessageResponse, Token, Username, ValidationError, is_valid_phone_number,
};
pub use service::{ServiceConfig, SmsService};
pub use transport::ResponseParseError;
