//! Recognition error taxonomy

use thiserror::Error;

/// Fallback when the endpoint offers no usable diagnostic
pub const GENERIC_FAILURE: &str = "Failed to recognize handwriting.";

/// Why a recognition attempt produced no text
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecognitionError {
    /// The request could not be sent or the response could not be read
    #[error("could not reach recognition service: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status
    #[error("recognition service returned {status}: {detail}")]
    Protocol { status: u16, detail: String },

    /// The response body was not the expected shape
    #[error("malformed response from recognition service: {0}")]
    Payload(String),

    /// The drawing could not be serialized
    #[error("could not encode drawing: {0}")]
    Encode(String),
}

impl RecognitionError {
    /// Text shown to the user after the error prefix
    pub fn user_message(&self) -> String {
        match self {
            RecognitionError::Transport(reason) => {
                format!("Could not reach the recognition service ({})", reason)
            }
            RecognitionError::Protocol { detail, .. } => detail.clone(),
            RecognitionError::Payload(_) => GENERIC_FAILURE.to_string(),
            RecognitionError::Encode(reason) => format!("Could not encode drawing ({})", reason),
        }
    }
}

impl From<image::ImageError> for RecognitionError {
    fn from(e: image::ImageError) -> Self {
        RecognitionError::Encode(e.to_string())
    }
}

impl From<reqwest::Error> for RecognitionError {
    fn from(e: reqwest::Error) -> Self {
        RecognitionError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_message_is_detail_verbatim() {
        let err = RecognitionError::Protocol { status: 400, detail: "bad image".to_string() };
        assert_eq!(err.user_message(), "bad image");
        assert!(err.to_string().contains("400"));
    }

    #[test]
    fn test_payload_message_is_generic() {
        let err = RecognitionError::Payload("expected value at line 1".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }
}
