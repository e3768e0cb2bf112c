//! OAuth credential storage
//!
//! The uploader only ever asks two questions: "is a valid credential
//! available?" and "give me the credential". Acquiring one (the interactive
//! OAuth flow) is the embedding application's job; this module holds the
//! storage interface and a JSON-file-backed implementation for the token
//! artifact.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default path for the persisted OAuth token artifact
pub const DEFAULT_OAUTH_PATH: &str = "vidmaker-youtube-oauth2.json";

/// An OAuth 2.0 credential for the video service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Bearer token presented to the service
    pub access_token: String,
    /// Token used to refresh an expired access token, if issued
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// When the access token expires. None means no known expiry.
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
}

impl Credential {
    /// Whether the credential can currently authorize requests
    pub fn is_valid(&self) -> bool {
        !self.access_token.is_empty() && self.expiry.is_none_or(|expiry| expiry > Utc::now())
    }
}

/// Storage for the OAuth token artifact
pub trait CredentialStore: Send + Sync {
    /// Load the stored credential. Ok(None) when nothing usable is stored.
    fn load(&self) -> Result<Option<Credential>>;

    /// Persist a credential for later runs
    fn save(&self, credential: &Credential) -> Result<()>;

    /// Whether a valid credential is currently available
    fn is_authenticated(&self) -> bool {
        matches!(self.load(), Ok(Some(credential)) if credential.is_valid())
    }
}

/// [`CredentialStore`] backed by a JSON file at a fixed local path
#[derive(Clone, Debug)]
pub struct JsonFileCredentialStore {
    path: PathBuf,
}

impl JsonFileCredentialStore {
    /// Create a store over the given artifact path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for JsonFileCredentialStore {
    fn default() -> Self {
        Self::new(DEFAULT_OAUTH_PATH)
    }
}

impl CredentialStore for JsonFileCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)?;
        // A corrupt artifact reads as "not authenticated" rather than an error.
        Ok(serde_json::from_str(&raw).ok())
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        let raw = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn credential() -> Credential {
        Credential {
            access_token: "token".into(),
            refresh_token: Some("refresh".into()),
            expiry: Some(Utc::now() + Duration::hours(1)),
        }
    }

    #[test]
    fn credential_with_future_expiry_is_valid() {
        assert!(credential().is_valid());
    }

    #[test]
    fn credential_without_expiry_is_valid() {
        let mut cred = credential();
        cred.expiry = None;
        assert!(cred.is_valid());
    }

    #[test]
    fn expired_credential_is_invalid() {
        let mut cred = credential();
        cred.expiry = Some(Utc::now() - Duration::hours(1));
        assert!(!cred.is_valid());
    }

    #[test]
    fn empty_token_is_invalid() {
        let mut cred = credential();
        cred.access_token.clear();
        assert!(!cred.is_valid());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCredentialStore::new(dir.path().join("oauth.json"));

        let cred = credential();
        store.save(&cred).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, cred);
        assert!(store.is_authenticated());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCredentialStore::new(dir.path().join("absent.json"));

        assert!(store.load().unwrap().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oauth.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileCredentialStore::new(path);
        assert!(store.load().unwrap().is_none());
        assert!(!store.is_authenticated());
    }
}
