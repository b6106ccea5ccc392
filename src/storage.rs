//! Credential storage for the completion provider key
use std::fmt;

use crate::error::HostError;

/// An API key that passed the minimum-length check.
///
/// `Debug` never prints the key itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Accept a stored value only if its trimmed length reaches `min_len`
    pub fn from_stored(raw: &str, min_len: usize) -> Option<Credential> {
        let key = raw.trim();
        if key.chars().count() >= min_len {
            Some(Credential(key.to_string()))
        } else {
            None
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} chars>)", self.char_count())
    }
}

/// Where the provider key is kept (extension storage in the browser)
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    async fn get(&self) -> Result<Option<String>, HostError>;
    async fn set(&self, value: &str) -> Result<(), HostError>;
}

/// Result of saving a key from the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { len: usize },
    Cleared,
}

/// Read the stored key; unreadable, missing and too-short keys are all absent
pub async fn load_credential<S: CredentialStore>(store: &S, min_len: usize) -> Option<Credential> {
    let raw = match store.get().await {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Could not read stored API key: {}", e);
            None
        }
    };

    let credential = raw.as_deref().and_then(|raw| Credential::from_stored(raw, min_len));
    log::info!(
        "API key present: {}, usable: {}, length: {}",
        raw.is_some(),
        credential.is_some(),
        raw.as_deref().map_or(0, |r| r.trim().chars().count())
    );
    credential
}

/// Trim and store a key entered by the user; an empty key clears it
pub async fn save_credential<S: CredentialStore>(store: &S, raw: &str) -> Result<SaveOutcome, HostError> {
    let key = raw.trim();
    store.set(key).await?;

    if key.is_empty() {
        log::info!("API key cleared");
        Ok(SaveOutcome::Cleared)
    } else {
        let len = key.chars().count();
        log::info!("API key saved, length: {}", len);
        Ok(SaveOutcome::Saved { len })
    }
}
