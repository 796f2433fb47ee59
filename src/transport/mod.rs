//! Transport layer: wire-format details (serialization/deserialization).

mod send_message;

pub use send_message::{
    ResponseParseError, decode_send_message_json_response, encode_send_message_json,
    simulated_send_message_response,
};
