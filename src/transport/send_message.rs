use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::domain::{PhoneNumber, SendMessage, SendMessageResponse};

#[derive(Debug, thiserror::Error)]
pub enum ResponseParseError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("the expected attribute '{field}' was not returned by the API")]
    MissingField { field: &'static str },

    #[error("the attribute '{field}' has an unexpected type: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

const STATUS: &str = "status";
const MESSAGE: &str = "message";
const SCHEDULED_RECIPIENTS_COUNT: &str = "scheduled_recipients_count";

pub fn encode_send_message_json(request: &SendMessage) -> String {
    let recipients = request
        .recipients()
        .iter()
        .map(PhoneNumber::as_str)
        .collect::<Vec<_>>();

    json!({
        "recipients": recipients,
        "content": request.content(),
        "priority": request.priority().value(),
    })
    .to_string()
}

/// Build the payload the API would answer with, without talking to it.
pub fn simulated_send_message_response(request: &SendMessage) -> SendMessageResponse {
    let status = 200;
    let message = "200 OK";
    let count = request.recipients().len() as u64;

    let raw = json!({
        STATUS: status,
        MESSAGE: message,
        SCHEDULED_RECIPIENTS_COUNT: count,
    })
    .to_string();

    SendMessageResponse::new(status, message.to_owned(), count, raw)
}

pub fn decode_send_message_json_response(
    json: &str,
) -> Result<SendMessageResponse, ResponseParseError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Object(mut object) = value else {
        return Err(ResponseParseError::NotAnObject);
    };

    let status = take_field::<i64>(&mut object, STATUS)?;
    let message = take_field::<String>(&mut object, MESSAGE)?;
    let count = take_field::<u64>(&mut object, SCHEDULED_RECIPIENTS_COUNT)?;

    Ok(SendMessageResponse::new(status, message, count, json.to_owned()))
}

fn take_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    field: &'static str,
) -> Result<T, ResponseParseError> {
    let value = object
        .remove(field)
        .ok_or(ResponseParseError::MissingField { field })?;
    serde_json::from_value(value)
        .map_err(|source| ResponseParseError::InvalidField { field, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_request_body() {
        let request = SendMessage::new(["90000000", "580000000000"], "hello", "5").unwrap();
        let body = encode_send_message_json(&request);

        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "recipients": ["90000000", "580000000000"],
                "content": "hello",
                "priority": 5,
            })
        );
    }

    #[test]
    fn decode_ok_response() {
        let json = r#"{"status":200,"message":"OK","scheduled_recipients_count":1}"#;
        let response = decode_send_message_json_response(json).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.message, "OK");
        assert_eq!(response.scheduled_recipients_count, 1);
        assert_eq!(response.raw(), json);
    }

    #[test]
    fn decode_ignores_extra_fields() {
        let json = r#"
        {
          "status": 401,
          "message": "Unauthorized",
          "scheduled_recipients_count": 0,
          "details": {"reason": "bad token"}
        }
        "#;
        let response = decode_send_message_json_response(json).unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(response.scheduled_recipients_count, 0);
    }

    #[test]
    fn decode_rejects_non_json() {
        let err = decode_send_message_json_response("test").unwrap_err();
        assert!(matches!(err, ResponseParseError::Json(_)));
    }

    #[test]
    fn decode_rejects_non_objects() {
        for json in ["1", "[]", "\"text\"", "null"] {
            let err = decode_send_message_json_response(json).unwrap_err();
            assert!(
                matches!(err, ResponseParseError::NotAnObject),
                "{json} should not parse"
            );
        }
    }

    #[test]
    fn decode_names_each_missing_field() {
        let cases = [
            (r#"{"message":"OK","scheduled_recipients_count":1}"#, "status"),
            (r#"{"status":200,"scheduled_recipients_count":1}"#, "message"),
            (r#"{"status":200,"message":"OK"}"#, "scheduled_recipients_count"),
        ];

        for (json, missing) in cases {
            match decode_send_message_json_response(json).unwrap_err() {
                ResponseParseError::MissingField { field } => assert_eq!(field, missing),
                other => panic!("unexpected error for {json}: {other:?}"),
            }
        }
    }

    #[test]
    fn decode_rejects_wrongly_typed_field() {
        let json = r#"{"status":"200","message":"OK","scheduled_recipients_count":1}"#;
        let err = decode_send_message_json_response(json).unwrap_err();
        assert!(matches!(
            err,
            ResponseParseError::InvalidField {
                field: "status",
                ..
            }
        ));
    }

    #[test]
    fn simulated_response_counts_recipients() {
        let request = SendMessage::new(["90000000", "40000000", "580000000000"], "hi", 1).unwrap();
        let response = simulated_send_message_response(&request);
        assert_eq!(response.status, 200);
        assert_eq!(response.message, "200 OK");
        assert_eq!(response.scheduled_recipients_count, 3);

        let reparsed = decode_send_message_json_response(response.raw()).unwrap();
        assert_eq!(reparsed, response);
    }
}
