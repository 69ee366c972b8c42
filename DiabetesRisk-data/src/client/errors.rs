use thiserror::Error;

/// Error type for scoring service calls
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, timeout or other transport failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// The response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// The client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a status error, keeping at most 512 bytes of the body
    pub fn status(status: u16, body: &str) -> Self {
        let mut end = body.len().min(512);
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        ClientError::Status {
            status,
            body: body[..end].to_string(),
        }
    }

    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::Decode(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_is_truncated() {
        let body = "x".repeat(2000);
        match ClientError::status(500, &body) {
            ClientError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), 512);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_status_truncation_respects_char_boundaries() {
        let body = "é".repeat(400);
        match ClientError::status(502, &body) {
            ClientError::Status { body, .. } => assert!(body.len() <= 512),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_from_serde() {
        let err: ClientError = serde_json::from_str::<u8>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("Decode error"));
        assert!(!err.is_transport());
    }
}
