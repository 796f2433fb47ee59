use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    RecipientLimitExceeded { limit: usize, actual: usize },
    InvalidPhoneNumber { input: String },
    InvalidPhoneNumbers { numbers: Vec<String> },
    InvalidBaseUrl { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::RecipientLimitExceeded { limit, actual } => {
                write!(
                    f,
                    "recipient limit of {limit} exceeded: trying to send to {actual} recipients"
                )
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidPhoneNumbers { numbers } => {
                write!(f, "invalid phone numbers: {}", numbers.join(", "))
            }
            Self::InvalidBaseUrl { input, reason } => {
                write!(f, "invalid base url {input:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
