//! Tunables for tab organization
use serde::{Deserialize, Serialize};

use crate::operations::GroupColor;

/// Storage key holding the completion API key
pub const API_KEY_STORAGE_KEY: &str = "anthropic_key";

/// Storage key holding optional `OrganizerConfig` overrides
pub const CONFIG_STORAGE_KEY: &str = "organizer_config";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizerConfig {
    /// Fewer candidate tabs than this is a no-op
    pub min_candidates: usize,
    /// Shortest stored key that is worth sending to the provider
    pub min_credential_len: usize,
    /// Path characters kept per URL in the remote payload
    pub max_path_chars: usize,
    pub model: String,
    pub max_tokens: u32,
    /// The bridge aborts the completion request after this long
    pub request_timeout_ms: u32,
    pub group_colors: Vec<GroupColor>,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        OrganizerConfig {
            min_candidates: 2,
            min_credential_len: 11,
            max_path_chars: 50,
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 1000,
            request_timeout_ms: 30_000,
            group_colors: GroupColor::ALL.to_vec(),
        }
    }
}

impl OrganizerConfig {
    /// Decode stored overrides; missing fields keep their defaults
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut config: OrganizerConfig = serde_json::from_value(value)?;
        if config.group_colors.is_empty() {
            config.group_colors = GroupColor::ALL.to_vec();
        }
        Ok(config)
    }
}
