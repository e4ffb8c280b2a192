use serde::{Deserialize, Serialize};

/// Error body returned by the backend on a failed request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

/// The backend is not consistent about the key it uses; `message` wins when
/// both are present.
#[derive(Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts a human readable message from a raw response body.
    pub fn from_body(body: &str) -> Self {
        let body = body.trim();
        let parsed = serde_json::from_str::<RawErrorBody>(body)
            .ok()
            .and_then(|raw| {
                [raw.message, raw.error]
                    .into_iter()
                    .flatten()
                    .find(|text| !text.trim().is_empty())
            });
        match parsed {
            Some(message) => Self::new(message),
            None => Self::new(body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn reads_message_or_error_key() {
        assert_eq!(ApiError::from_body(r#"{"message":"nope"}"#).message, "nope");
        assert_eq!(ApiError::from_body(r#"{"error":"gone"}"#).message, "gone");
    }

    #[test]
    fn prefers_message_when_both_keys_are_present() {
        let body = r#"{"error":"Bad Request","message":"name is required"}"#;
        assert_eq!(ApiError::from_body(body).message, "name is required");
        let body = r#"{"error":"Bad Request","message":""}"#;
        assert_eq!(ApiError::from_body(body).message, "Bad Request");
    }

    #[test]
    fn falls_back_to_raw_text() {
        assert_eq!(ApiError::from_body(" Not Found \n").message, "Not Found");
        assert_eq!(ApiError::from_body(r#"{"other":1}"#).message, r#"{"other":1}"#);
    }
}
