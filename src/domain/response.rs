use std::str::FromStr;

use crate::transport::{ResponseParseError, decode_send_message_json_response};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Parsed answer of `message/free`.
///
/// All three typed fields are required in the API response. The response text is kept as
/// received for diagnostics.
pub struct SendMessageResponse {
    pub status: i64,
    pub message: String,
    pub scheduled_recipients_count: u64,
    raw: String,
}

impl SendMessageResponse {
    pub(crate) fn new(
        status: i64,
        message: String,
        scheduled_recipients_count: u64,
        raw: String,
    ) -> Self {
        Self {
            status,
            message,
            scheduled_recipients_count,
            raw,
        }
    }

    /// Decode a `message/free` response body, e.g. one previously kept from [`Self::raw`].
    ///
    /// Fails when the text is not a JSON object or lacks `status`, `message` or
    /// `scheduled_recipients_count`.
    pub fn parse(raw: &str) -> Result<Self, ResponseParseError> {
        decode_send_message_json_response(raw)
    }

    /// The response body exactly as returned by the API.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

impl FromStr for SendMessageResponse {
    type Err = ResponseParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
