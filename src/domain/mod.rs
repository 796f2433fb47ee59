//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{SEND_MESSAGE_MAX_RECIPIENTS, SendMessage};
pub use response::SendMessageResponse;
pub use validation::ValidationError;
pub use value::{
    BaseUrl, PhoneNumber, Priority, PriorityInput, Token, Username, is_valid_phone_number,
};
