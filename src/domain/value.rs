use std::fmt;

use serde::Deserialize;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// smsportalen.no account username.
///
/// Invariant: not empty or whitespace-only. The value is kept exactly as configured.
pub struct Username(String);

impl Username {
    /// Field name used in configuration and error messages (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the username as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// smsportalen.no access token.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Token(String);

impl Token {
    /// Field name used in configuration and error messages (`token`).
    pub const FIELD: &'static str = "token";

    /// Create a validated [`Token`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Check a recipient against the provider's numbering rules.
///
/// Accepted forms:
/// - 8 digits starting with `4` or `9` (domestic mobile numbers),
/// - 12 digits starting with `58` (data/IoT numbers).
///
/// Anything containing a non-digit (a leading `+`, whitespace, separators) is rejected,
/// and so are country-code-prefixed forms such as `4790000000`.
pub fn is_valid_phone_number(input: &str) -> bool {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match input.len() {
        8 => input.starts_with('4') || input.starts_with('9'),
        12 => input.starts_with("58"),
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number accepted by smsportalen.no.
///
/// Invariant: satisfies [`is_valid_phone_number`]. The value is never trimmed or normalized.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// JSON field name used by smsportalen.no (`recipients`).
    pub const FIELD: &'static str = "recipients";

    /// Create a validated phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if !is_valid_phone_number(&value) {
            return Err(ValidationError::InvalidPhoneNumber { input: value });
        }
        Ok(Self(value))
    }

    /// Borrow the digits as sent to the API.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
/// A priority as supplied by a caller or a configuration file, before normalization.
pub enum PriorityInput {
    Number(i64),
    Text(String),
}

impl From<i64> for PriorityInput {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PriorityInput {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u8> for PriorityInput {
    fn from(value: u8) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for PriorityInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PriorityInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Priority> for PriorityInput {
    fn from(value: Priority) -> Self {
        Self::Number(i64::from(value.value()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Delivery priority hint for the provider (`priority`).
///
/// Invariant: `1..=9`.
pub struct Priority(u8);

impl Priority {
    /// JSON field name used by smsportalen.no (`priority`).
    pub const FIELD: &'static str = "priority";

    /// Lowest allowed priority.
    pub const MIN: u8 = 1;
    /// Highest allowed priority.
    pub const MAX: u8 = 9;
    /// Priority used whenever the requested one is not allowed.
    pub const DEFAULT: Self = Self(2);

    /// Create a priority if `value` is in the allowed range.
    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|value| (Self::MIN..=Self::MAX).contains(value))
            .map(Self)
    }

    /// Map any requested priority to an allowed one.
    ///
    /// Text input is trimmed and parsed as an integer. Values that are out of range or do
    /// not parse fall back to [`Priority::DEFAULT`]; this never fails.
    pub fn normalize(input: impl Into<PriorityInput>) -> Self {
        let requested = match input.into() {
            PriorityInput::Number(value) => Some(value),
            PriorityInput::Text(text) => text.trim().parse::<i64>().ok(),
        };
        requested.and_then(Self::new).unwrap_or(Self::DEFAULT)
    }

    /// Get the underlying priority value.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Canonical API origin, always `https://<host>` with no path.
///
/// Whatever scheme, port, path, query or fragment the input carried is dropped; the API is
/// always reached over TLS on the default port.
pub struct BaseUrl(String);

impl BaseUrl {
    /// Base URL used when none is configured.
    pub const DEFAULT: &'static str = "https://smsportalen.no";

    /// Parse a user-supplied URL and reduce it to its canonical origin.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = url::Url::parse(input).map_err(|err| ValidationError::InvalidBaseUrl {
            input: input.to_owned(),
            reason: err.to_string(),
        })?;

        match parsed.host_str() {
            Some(host) if !host.is_empty() => Ok(Self(format!("https://{host}"))),
            _ => Err(ValidationError::InvalidBaseUrl {
                input: input.to_owned(),
                reason: "no host found".to_owned(),
            }),
        }
    }

    /// Borrow the origin, e.g. `https://smsportalen.no`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build an absolute endpoint URL from a path starting with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_newtypes_keep_input_verbatim() {
        let username = Username::new(" user ").unwrap();
        assert_eq!(username.as_str(), " user ");
        assert!(Username::new("  ").is_err());
        assert!(Username::new("").is_err());

        let token = Token::new(" secret ").unwrap();
        assert_eq!(token.as_str(), " secret ");
        assert!(Token::new("").is_err());
    }

    #[test]
    fn domestic_mobile_numbers_start_with_four_or_nine() {
        for valid in ["90000000", "99999999", "40000000", "49999999"] {
            assert!(is_valid_phone_number(valid), "{valid} should be valid");
        }
        for invalid in ["10000000", "50000000", "80000000", "00000000"] {
            assert!(!is_valid_phone_number(invalid), "{invalid} should be invalid");
        }
    }

    #[test]
    fn data_numbers_have_twelve_digits_and_prefix_58() {
        assert!(is_valid_phone_number("580000000000"));
        assert!(is_valid_phone_number("589999999999"));
        assert!(!is_valid_phone_number("570000000000"));
    }

    #[test]
    fn country_code_prefixed_numbers_are_rejected() {
        for invalid in [
            "4790000000",
            "4799999999",
            "4740000000",
            "4749999999",
            "47580000000000",
            "47589999999999",
        ] {
            assert!(!is_valid_phone_number(invalid), "{invalid} should be invalid");
        }
    }

    #[test]
    fn non_digits_and_whitespace_are_rejected() {
        for invalid in [
            "479000000a",
            " 4790000000",
            "4790000000 ",
            " 90000000",
            "90000000 ",
            "+4790000000",
            "9000 0000",
            "9000-0000",
            "",
            "٩٠٠٠٠٠٠٠",
        ] {
            assert!(!is_valid_phone_number(invalid), "{invalid:?} should be invalid");
        }
    }

    #[test]
    fn phone_number_newtype_keeps_input_verbatim() {
        let phone = PhoneNumber::new("90000000").unwrap();
        assert_eq!(phone.as_str(), "90000000");
        assert_eq!(phone.to_string(), "90000000");

        assert_eq!(
            PhoneNumber::new(" 90000000"),
            Err(ValidationError::InvalidPhoneNumber {
                input: " 90000000".to_owned()
            })
        );
    }

    #[test]
    fn allowed_priorities_are_kept() {
        for value in 1..=9_i64 {
            assert_eq!(i64::from(Priority::normalize(value).value()), value);
            assert_eq!(
                i64::from(Priority::normalize(value.to_string()).value()),
                value
            );
        }
    }

    #[test]
    fn invalid_priorities_fall_back_to_default() {
        for value in [0_i64, -1, 10, 255, 256, i64::MAX, i64::MIN] {
            assert_eq!(Priority::normalize(value), Priority::DEFAULT);
        }
        for text in ["a", "", "0", "10", "3.5", "five"] {
            assert_eq!(Priority::normalize(text), Priority::DEFAULT);
        }
        assert_eq!(Priority::DEFAULT.value(), 2);
        assert_eq!(Priority::default(), Priority::DEFAULT);
    }

    #[test]
    fn priority_text_is_trimmed_before_parsing() {
        assert_eq!(Priority::normalize(" 7 ").value(), 7);
    }

    #[test]
    fn priority_input_deserializes_from_number_or_string() {
        let number: PriorityInput = serde_json::from_str("5").unwrap();
        assert_eq!(number, PriorityInput::Number(5));

        let text: PriorityInput = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(text, PriorityInput::Text("5".to_owned()));
        assert_eq!(Priority::normalize(text).value(), 5);
    }

    #[test]
    fn base_url_is_reduced_to_https_origin() {
        assert_eq!(BaseUrl::default().as_str(), "https://smsportalen.no");
        assert_eq!(
            BaseUrl::parse(BaseUrl::DEFAULT).unwrap(),
            BaseUrl::default()
        );
        assert_eq!(
            BaseUrl::parse("http://smsportalen.no/some/path?x=1#frag")
                .unwrap()
                .as_str(),
            "https://smsportalen.no"
        );
        assert_eq!(
            BaseUrl::parse("https://api.example.invalid:8443/")
                .unwrap()
                .as_str(),
            "https://api.example.invalid"
        );
    }

    #[test]
    fn base_url_requires_a_parsable_url_with_host() {
        for invalid in ["invalid url", "smsportalen.no", "", "mailto:someone@example.invalid"] {
            assert!(
                matches!(
                    BaseUrl::parse(invalid),
                    Err(ValidationError::InvalidBaseUrl { .. })
                ),
                "{invalid:?} should be rejected"
            );
        }
    }

    #[test]
    fn base_url_builds_endpoints() {
        let base = BaseUrl::default();
        assert_eq!(
            base.endpoint("/message/free"),
            "https://smsportalen.no/message/free"
        );
        assert_eq!(base.to_string(), "https://smsportalen.no");
    }
}
