//! Normalization of the backend's polymorphic error bodies.
//!
//! The backend's `detail` field may be a plain string, a list of field
//! errors, or a nested object carrying a message. Clients never inspect the
//! shape ad hoc; they hand the raw body to [`normalize_detail`] and fall back
//! to their own generic message when nothing parses.

use serde::Deserialize;

/// One field-level validation error, FastAPI style.
#[derive(Debug, Deserialize)]
pub(crate) struct FieldError {
    #[serde(default)]
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
}

/// The shapes the backend's `detail` field is known to take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorDetail {
    Str(String),
    FieldErrors(Vec<FieldError>),
    Nested { message: String },
}

impl ErrorDetail {
    /// Flattens the detail into one human-readable string.
    pub fn into_message(self) -> String {
        match self {
            Self::Str(message) => message,
            Self::Nested { message } => message,
            Self::FieldErrors(errors) => errors
                .into_iter()
                .map(|e| {
                    let loc = e
                        .loc
                        .iter()
                        .filter_map(|v| match v {
                            serde_json::Value::String(s) => Some(s.clone()),
                            serde_json::Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect::<Vec<_>>()
                        .join(".");
                    if loc.is_empty() {
                        e.msg
                    } else {
                        format!("{}: {}", loc, e.msg)
                    }
                })
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    detail: Option<ErrorDetail>,
    #[serde(default)]
    message: Option<String>,
}

/// Extracts a single human-readable message from an error response body.
///
/// Returns `None` when the body is not JSON or carries neither a `detail`
/// nor a `message` field; callers substitute their own generic condition
/// rather than surfacing a parse error.
pub(crate) fn normalize_detail(body: &str) -> Option<String> {
    let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
    envelope
        .detail
        .map(ErrorDetail::into_message)
        .or(envelope.message)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_string_detail_passes_through() {
        let body = r#"{"detail": "query too vague"}"#;
        assert_eq!(normalize_detail(body).as_deref(), Some("query too vague"));
    }

    #[test]
    fn field_errors_are_joined() {
        let body = r#"{"detail": [
            {"loc": ["body", "message"], "msg": "field required"},
            {"loc": ["body", "session_id"], "msg": "invalid id"}
        ]}"#;
        assert_eq!(
            normalize_detail(body).as_deref(),
            Some("body.message: field required; body.session_id: invalid id")
        );
    }

    #[test]
    fn nested_message_is_unwrapped() {
        let body = r#"{"detail": {"message": "session expired"}}"#;
        assert_eq!(normalize_detail(body).as_deref(), Some("session expired"));
    }

    #[test]
    fn bare_message_field_is_accepted() {
        let body = r#"{"message": "upstream busy"}"#;
        assert_eq!(normalize_detail(body).as_deref(), Some("upstream busy"));
    }

    #[test]
    fn garbage_body_yields_none() {
        assert_eq!(normalize_detail("<html>502</html>"), None);
        assert_eq!(normalize_detail(""), None);
        assert_eq!(normalize_detail(r#"{"detail": null}"#), None);
    }
}
