//! Error types for tab organization
use thiserror::Error;

/// Why a remote classification attempt failed
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// The bridge or the network failed before a response arrived
    #[error("request failed: {0}")]
    Transport(String),

    /// The completion provider answered with an error
    #[error("{0}")]
    Provider(String),

    #[error("response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("response contained no groups")]
    NoGroups,

    #[error("failed to encode tab payload: {0}")]
    Payload(String),
}

/// Failures reported by the browser host (tabs, groups, storage)
#[derive(Debug, Error)]
pub enum HostError {
    #[error("{0}")]
    Bridge(String),

    #[error("failed to decode host data: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ClassifyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_passes_through() {
        let err = ClassifyError::Provider("rate limited".to_string());
        assert_eq!(err.to_string(), "rate limited");
    }

    #[test]
    fn test_invalid_json_from_serde() {
        let err: ClassifyError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, ClassifyError::InvalidJson(_)));
        assert!(err.to_string().starts_with("response is not valid JSON"));
    }
}
