//! Decoding of the API's response envelopes.
//!
//! Reads answer either with a bare JSON array or with a wrapper object such
//! as `{"success": true, "books": [...]}`. Mutations answer with
//! `{"success": bool, "message"?: string}` or `{"error"?: string, "message"?: string}`.
//! A failure marker wins over the HTTP status; a non-2xx status without one
//! is a transport failure.

use common::Entity;
use serde_json::{Map, Value};
use transport::{ApiResponse, TransportError};

use crate::{Collection, CollectionSnapshot, DomainError, Result};

/// Fields probed, in order, for wrapped record lists.
const FALLBACK_WRAPPER_KEYS: [&str; 2] = ["items", "data"];

/// The useful part of a successful mutation response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationReply {
    /// Server-provided `message`, if any.
    pub message: Option<String>,
}

/// Returns `Some(message)` if the object carries a failure marker.
fn failure_marker(object: &Map<String, Value>) -> Option<Option<String>> {
    let message = object
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    match object.get("error") {
        Some(Value::String(error)) if !error.is_empty() => return Some(Some(error.clone())),
        Some(Value::Null) | Some(Value::Bool(false)) | None => {}
        Some(Value::String(_)) => {}
        Some(_) => return Some(message),
    }

    if object.get("success") == Some(&Value::Bool(false)) {
        return Some(message);
    }

    None
}

fn check_failure(value: &Value, response: &ApiResponse) -> Result<()> {
    if let Some(object) = value.as_object()
        && let Some(message) = failure_marker(object)
    {
        return Err(DomainError::Application { message });
    }
    if !response.is_success() {
        return Err(TransportError::Status {
            status: response.status,
            body: response.text(),
        }
        .into());
    }
    Ok(())
}

/// Parses a response into a JSON document, applying the failure rules.
pub fn decode_document(response: &ApiResponse) -> Result<Value> {
    let value = response.json_body()?;
    check_failure(&value, response)?;
    Ok(value)
}

/// Extracts the list of record objects from a read response.
///
/// `wrapper_key` is the collection-specific field tried before the generic
/// `items` and `data` fields.
pub fn decode_records(
    response: &ApiResponse,
    wrapper_key: Option<&str>,
) -> Result<Vec<Map<String, Value>>> {
    let value = decode_document(response)?;

    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut object) => wrapper_key
            .into_iter()
            .chain(FALLBACK_WRAPPER_KEYS)
            .find_map(|key| match object.remove(key) {
                Some(Value::Array(records)) => Some(records),
                _ => None,
            })
            .ok_or_else(|| {
                DomainError::UnexpectedShape("object without a record list".to_string())
            })?,
        other => {
            return Err(DomainError::UnexpectedShape(format!(
                "expected array or object, got {other}"
            )));
        }
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Object(fields) => Ok(fields),
            other => Err(DomainError::UnexpectedShape(format!(
                "record {index} is not an object: {other}"
            ))),
        })
        .collect()
}

/// Decodes a read response into a snapshot of `collection`.
pub fn decode_collection(
    response: &ApiResponse,
    collection: &Collection,
) -> Result<CollectionSnapshot> {
    let records = decode_records(response, collection.wrapper_key)?;
    let entities = records
        .into_iter()
        .enumerate()
        .map(|(index, fields)| {
            Entity::from_fields(fields, collection.id_field).ok_or(
                DomainError::MissingIdentifier {
                    field: collection.id_field,
                    index,
                },
            )
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::trace!(collection = collection.name, count = entities.len(), "decoded collection");

    CollectionSnapshot::new(entities)
}

/// Decodes a mutation response.
///
/// An empty body on a 2xx status counts as success (e.g. `204 No Content`).
pub fn decode_mutation(response: &ApiResponse) -> Result<MutationReply> {
    if response.is_empty_body() {
        if response.is_success() {
            return Ok(MutationReply::default());
        }
        return Err(TransportError::Status {
            status: response.status,
            body: String::new(),
        }
        .into());
    }

    let value = decode_document(response)?;
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string);
    Ok(MutationReply { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(body: Value) -> ApiResponse {
        ApiResponse::json(200, &body)
    }

    #[test]
    fn bare_array_is_a_collection() {
        let snapshot = decode_collection(
            &ok(json!([{"book_id": 1, "title": "A"}, {"book_id": 2, "title": "B"}])),
            &Collection::books(),
        )
        .unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.ids()[1].as_str(), "2");
    }

    #[test]
    fn wrapper_object_uses_collection_key() {
        let snapshot = decode_collection(
            &ok(json!({"success": true, "books": [{"book_id": 9}]})),
            &Collection::book_search(),
        )
        .unwrap();
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn wrapper_object_falls_back_to_items() {
        let snapshot = decode_collection(
            &ok(json!({"items": [{"user_id": 1}], "total": 1})),
            &Collection::users(),
        )
        .unwrap();
        assert_eq!(snapshot.ids()[0].as_str(), "1");
    }

    #[test]
    fn failure_marker_on_read() {
        let result = decode_collection(
            &ok(json!({"success": false, "message": "Invalid search"})),
            &Collection::book_search(),
        );
        match result {
            Err(DomainError::Application { message }) => {
                assert_eq!(message.as_deref(), Some("Invalid search"))
            }
            other => panic!("expected application error, got {other:?}"),
        }
    }

    #[test]
    fn missing_identifier_is_rejected() {
        let result = decode_collection(
            &ok(json!([{"book_id": 1}, {"title": "no id"}])),
            &Collection::books(),
        );
        assert!(matches!(
            result,
            Err(DomainError::MissingIdentifier { field: "book_id", index: 1 })
        ));
    }

    #[test]
    fn non_object_record_is_rejected() {
        let result = decode_collection(&ok(json!([1, 2])), &Collection::books());
        assert!(matches!(result, Err(DomainError::UnexpectedShape(_))));
    }

    #[test]
    fn object_without_list_is_rejected() {
        let result = decode_collection(&ok(json!({"success": true})), &Collection::books());
        assert!(matches!(result, Err(DomainError::UnexpectedShape(_))));
    }

    #[test]
    fn non_json_is_transport_failure() {
        let result = decode_collection(
            &ApiResponse::new(200, "<html></html>"),
            &Collection::books(),
        );
        assert!(matches!(
            result,
            Err(DomainError::Transport(TransportError::MalformedBody(_)))
        ));
    }

    #[test]
    fn error_status_without_marker_is_transport_failure() {
        let result = decode_collection(&ApiResponse::json(500, &json!([])), &Collection::books());
        assert!(matches!(
            result,
            Err(DomainError::Transport(TransportError::Status { status: 500, .. }))
        ));
    }

    #[test]
    fn mutation_success_flag() {
        let reply = decode_mutation(&ok(json!({"success": true, "message": "Borrowed"}))).unwrap();
        assert_eq!(reply.message.as_deref(), Some("Borrowed"));
    }

    #[test]
    fn mutation_failure_regardless_of_status() {
        for status in [200, 400, 409] {
            let response = ApiResponse::json(
                status,
                &json!({"success": false, "message": "Cannot delete: active loan"}),
            );
            match decode_mutation(&response) {
                Err(DomainError::Application { message }) => {
                    assert_eq!(message.as_deref(), Some("Cannot delete: active loan"))
                }
                other => panic!("expected application error, got {other:?}"),
            }
        }
    }

    #[test]
    fn mutation_error_field() {
        let result = decode_mutation(&ok(json!({"error": "Book not available"})));
        assert!(matches!(
            result,
            Err(DomainError::Application { message: Some(m) }) if m == "Book not available"
        ));

        let result = decode_mutation(&ok(json!({"error": true, "message": "Nope"})));
        assert!(matches!(
            result,
            Err(DomainError::Application { message: Some(m) }) if m == "Nope"
        ));
    }

    #[test]
    fn null_or_empty_error_is_not_a_failure() {
        assert!(decode_mutation(&ok(json!({"error": null, "message": "ok"}))).is_ok());
        assert!(decode_mutation(&ok(json!({"error": ""}))).is_ok());
    }

    #[test]
    fn failure_without_message() {
        let result = decode_mutation(&ok(json!({"success": false})));
        assert!(matches!(result, Err(DomainError::Application { message: None })));
    }

    #[test]
    fn empty_body_mutation() {
        assert_eq!(
            decode_mutation(&ApiResponse::new(204, "")).unwrap(),
            MutationReply::default()
        );
        assert!(matches!(
            decode_mutation(&ApiResponse::new(502, "")),
            Err(DomainError::Transport(TransportError::Status { status: 502, .. }))
        ));
    }
}
