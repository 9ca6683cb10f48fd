//! Response envelope normalization.
//!
//! The marketplace signals errors two ways: a non-200 status, and an error
//! marker inside a 200 body (`{"code":"ERROR","message":"..."}`). This
//! module folds the body-level convention into a plain `Result`, and
//! normalizes the list-vs-object variance of page payloads into one tagged
//! shape so downstream code never re-derives it.

use serde_json::Value;
use shelfsync_domain::{Result, ShelfsyncError};

/// Marker value the marketplace uses for body-level success.
const SUCCESS_CODE: &str = "SUCCESS";

/// A decoded response body.
///
/// Bodies that are not valid JSON at all are kept as a degenerate string
/// payload — some endpoints (e.g. boolean "validate" checks) return bare
/// primitives or text.
#[derive(Debug, Clone)]
pub struct Envelope {
    root: Value,
    code: Option<String>,
    message: Option<String>,
}

impl Envelope {
    /// Decode a body received with a 200 status.
    pub fn parse(body: &str) -> Self {
        let root: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) => Value::String(body.to_string()),
        };

        let code = root.get("code").and_then(Value::as_str).map(str::to_string);
        let message = root.get("message").and_then(Value::as_str).map(str::to_string);

        Self { root, code, message }
    }

    /// Body-level error code, if the body carried one.
    pub fn error_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.eq_ignore_ascii_case(SUCCESS_CODE))
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Fold into a payload-or-error.
    ///
    /// The full root value is returned on success: continuation tokens can
    /// live beside the data field, so callers pick the payload apart
    /// themselves via [`PagePayload::normalize`].
    pub fn into_result(self) -> Result<Value> {
        if let Some(code) = self.error_code() {
            return Err(ShelfsyncError::Api {
                code: code.to_string(),
                message: self.message.clone().unwrap_or_else(|| "no message provided".to_string()),
            });
        }
        Ok(self.root)
    }
}

/// One page payload with the list-vs-object variance resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum PagePayload {
    /// The endpoint returned a bare array of records.
    List(Vec<Value>),
    /// The endpoint returned an object wrapping the records, possibly with
    /// paging information.
    Page { records: Vec<Value>, next_token: Option<String>, has_next: Option<bool> },
}

impl PagePayload {
    /// Normalize a response root.
    ///
    /// `record_fields` are the field names the endpoint is known to nest
    /// its records under, probed in order on the root and on `data`;
    /// `token_field` is the endpoint's continuation-token parameter name,
    /// looked up top-level first, then nested. This heterogeneity is a
    /// property of the real API, not a choice here.
    pub fn normalize(root: &Value, record_fields: &[&str], token_field: &str) -> Result<Self> {
        if let Value::Array(records) = root {
            return Ok(Self::List(records.clone()));
        }

        let candidates = [Some(root), root.get("data")];
        for candidate in candidates.into_iter().flatten() {
            if let Value::Array(records) = candidate {
                return Ok(Self::Page {
                    records: records.clone(),
                    next_token: find_token(root, candidate, token_field),
                    has_next: find_has_next(root, candidate),
                });
            }

            for field in record_fields {
                if let Some(Value::Array(records)) = candidate.get(field) {
                    return Ok(Self::Page {
                        records: records.clone(),
                        next_token: find_token(root, candidate, token_field),
                        has_next: find_has_next(root, candidate),
                    });
                }
            }
        }

        Err(ShelfsyncError::InvalidInput(format!(
            "response payload carries no record list under any of {record_fields:?}"
        )))
    }

    /// Records with paging info flattened out.
    pub fn into_parts(self) -> (Vec<Value>, Option<String>, Option<bool>) {
        match self {
            Self::List(records) => (records, None, None),
            Self::Page { records, next_token, has_next } => (records, next_token, has_next),
        }
    }
}

fn find_token(root: &Value, nested: &Value, token_field: &str) -> Option<String> {
    [root, nested]
        .iter()
        .find_map(|v| v.get(token_field))
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|t| !t.is_empty())
}

fn find_has_next(root: &Value, nested: &Value) -> Option<bool> {
    [root, nested].iter().find_map(|v| v.get("hasNext")).and_then(Value::as_bool)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_envelope_keeps_the_root() {
        let envelope = Envelope::parse(r#"{"code":"SUCCESS","data":{"items":[1,2]}}"#);
        let root = envelope.into_result().unwrap();
        assert_eq!(root["data"]["items"], json!([1, 2]));
    }

    #[test]
    fn error_marker_in_200_becomes_a_semantic_failure() {
        let envelope = Envelope::parse(r#"{"code":"ERROR","message":"vendor not allowed"}"#);

        let err = envelope.into_result().unwrap_err();
        match err {
            ShelfsyncError::Api { code, message } => {
                assert_eq!(code, "ERROR");
                assert_eq!(message, "vendor not allowed");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn success_code_is_case_insensitive() {
        let envelope = Envelope::parse(r#"{"code":"success","data":[]}"#);
        assert!(envelope.into_result().is_ok());
    }

    #[test]
    fn undecodable_body_becomes_a_degenerate_payload() {
        let envelope = Envelope::parse("not json at all");
        assert_eq!(envelope.into_result().unwrap(), Value::String("not json at all".into()));
    }

    #[test]
    fn primitive_bodies_pass_through() {
        // Validate-style endpoints return bare booleans.
        let envelope = Envelope::parse("true");
        assert_eq!(envelope.into_result().unwrap(), Value::Bool(true));
    }

    #[test]
    fn normalize_accepts_a_bare_list() {
        let root = json!([{"a": 1}, {"a": 2}]);
        let payload = PagePayload::normalize(&root, &["items"], "nextToken").unwrap();
        assert_eq!(payload, PagePayload::List(vec![json!({"a": 1}), json!({"a": 2})]));
    }

    #[test]
    fn normalize_finds_records_under_known_fields() {
        let root = json!({"contents": [{"a": 1}], "nextToken": "t9"});
        let (records, token, has_next) = PagePayload::normalize(&root, &["items", "contents"], "nextToken")
            .unwrap()
            .into_parts();

        assert_eq!(records.len(), 1);
        assert_eq!(token.as_deref(), Some("t9"));
        assert_eq!(has_next, None);
    }

    #[test]
    fn normalize_descends_into_data() {
        let root = json!({
            "code": "SUCCESS",
            "data": {"list": [{"a": 1}, {"a": 2}], "token": "n1", "hasNext": true}
        });
        let (records, token, has_next) =
            PagePayload::normalize(&root, &["list"], "token").unwrap().into_parts();

        assert_eq!(records.len(), 2);
        assert_eq!(token.as_deref(), Some("n1"));
        assert_eq!(has_next, Some(true));
    }

    #[test]
    fn top_level_token_wins_over_nested() {
        let root = json!({
            "nextToken": "outer",
            "data": {"items": [], "nextToken": "inner"}
        });
        let (_, token, _) =
            PagePayload::normalize(&root, &["items"], "nextToken").unwrap().into_parts();
        assert_eq!(token.as_deref(), Some("outer"));
    }

    #[test]
    fn empty_token_reads_as_absent() {
        let root = json!({"items": [], "nextToken": ""});
        let (_, token, _) =
            PagePayload::normalize(&root, &["items"], "nextToken").unwrap().into_parts();
        assert_eq!(token, None);
    }

    #[test]
    fn data_as_bare_array_is_a_page() {
        let root = json!({"code": "SUCCESS", "data": [{"a": 1}]});
        let (records, token, _) =
            PagePayload::normalize(&root, &["items"], "nextToken").unwrap().into_parts();
        assert_eq!(records.len(), 1);
        assert_eq!(token, None);
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let root = json!({"data": {"unexpected": 1}});
        assert!(PagePayload::normalize(&root, &["items"], "nextToken").is_err());
    }
}
