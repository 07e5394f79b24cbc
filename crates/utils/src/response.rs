use serde::Serialize;

/// JSON envelope returned by every endpoint.
///
/// `code` mirrors the HTTP status so clients that only inspect the body
/// can still branch on the outcome. `message` and `data` are omitted from
/// the serialized form when absent.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            code: 200,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Acknowledgment without an entity body.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: 200,
            message: Some(message.into()),
            data: None,
        }
    }
}
