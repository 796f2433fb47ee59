use crate::domain::validation::ValidationError;
use crate::domain::value::{PhoneNumber, Priority, PriorityInput, is_valid_phone_number};

pub const SEND_MESSAGE_MAX_RECIPIENTS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A validated `message/free` request.
pub struct SendMessage {
    recipients: Vec<PhoneNumber>,
    content: String,
    priority: Priority,
}

impl SendMessage {
    /// Validate recipients and normalize the priority.
    ///
    /// Checks run in order: recipient count (`1..=5000`), then every recipient number. All
    /// invalid numbers are reported together, in input order.
    pub fn new<I, S>(
        recipients: I,
        content: impl Into<String>,
        priority: impl Into<PriorityInput>,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let recipients: Vec<String> = recipients.into_iter().map(Into::into).collect();

        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: PhoneNumber::FIELD,
            });
        }
        if recipients.len() > SEND_MESSAGE_MAX_RECIPIENTS {
            return Err(ValidationError::RecipientLimitExceeded {
                limit: SEND_MESSAGE_MAX_RECIPIENTS,
                actual: recipients.len(),
            });
        }

        let invalid: Vec<String> = recipients
            .iter()
            .filter(|number| !is_valid_phone_number(number))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(ValidationError::InvalidPhoneNumbers { numbers: invalid });
        }

        let recipients = recipients
            .into_iter()
            .map(PhoneNumber::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            recipients,
            content: content.into(),
            priority: Priority::normalize(priority),
        })
    }

    pub fn recipients(&self) -> &[PhoneNumber] {
        &self.recipients
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }
}
