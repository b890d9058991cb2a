//! # Credential Storage
//!
//! The session token attached to every request, and the stores that keep it
//! between requests. A store holds at most one token; reading never fails
//! because the token is absent, only because the backing medium failed.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An opaque session token. Zeroed on drop and redacted in `Debug`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token, for placing on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}

/// Errors from credential stores.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential store io error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("stored credential at {path} is corrupt: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
}

/// Persistent key-value storage for the session token.
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// The stored token, or `None` when nobody is signed in.
    fn get(&self) -> Result<Option<Token>, CredentialError>;
    /// Replace the stored token.
    fn set(&self, token: Token) -> Result<(), CredentialError>;
    /// Remove the stored token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), CredentialError>;
}

// ─── Memory ──────────────────────────────────────────────────────────

/// A token held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RwLock<Option<Token>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Token) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Result<Option<Token>, CredentialError> {
        Ok(self.token.read().clone())
    }

    fn set(&self, token: Token) -> Result<(), CredentialError> {
        *self.token.write() = Some(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        self.token.write().take();
        Ok(())
    }
}

// ─── File ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct StoredCredential {
    token: String,
    #[allow(dead_code)]
    stored_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct StoredCredentialRef<'a> {
    token: &'a str,
    stored_at: DateTime<Utc>,
}

/// A token persisted as a small JSON document on disk.
///
/// ```json
/// {"token": "...", "stored_at": "2026-01-15T12:00:00Z"}
/// ```
///
/// A missing file means no token. On Unix the file is created with mode
/// `0600`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn write_private(&self, bytes: &[u8]) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)?;
            file.write_all(bytes)
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&self.path, bytes)
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Result<Option<Token>, CredentialError> {
        let mut bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        let parsed = serde_json::from_slice::<StoredCredential>(&bytes);
        bytes.zeroize();
        let mut stored = parsed.map_err(|source| CredentialError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(Token::new(std::mem::take(&mut stored.token))))
    }

    fn set(&self, token: Token) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut bytes = serde_json::to_vec(&StoredCredentialRef {
            token: token.expose(),
            stored_at: Utc::now(),
        })
        .map_err(|source| CredentialError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;
        let written = self.write_private(&bytes);
        bytes.zeroize();
        written.map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), "credential stored");
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "credential removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_is_redacted() {
        let token = Token::new("super-secret");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
        assert_eq!(token.expose(), "super-secret");
    }

    #[test]
    fn memory_store_set_get_clear() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().unwrap().is_none());
        store.set(Token::new("abc")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().expose(), "abc");
        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("token.json"));
        assert!(store.get().unwrap().is_none());

        store.set(Token::new("abc")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().expose(), "abc");

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(raw["token"], "abc");
        assert!(raw["stored_at"].is_string());

        store.clear().unwrap();
        assert!(!store.path().exists());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_accepts_document_without_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, br#"{"token": "legacy"}"#).unwrap();
        let store = FileCredentialStore::new(path);
        assert_eq!(store.get().unwrap().unwrap().expose(), "legacy");
    }

    #[test]
    fn file_store_reports_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, b"abc").unwrap();
        let store = FileCredentialStore::new(path);
        assert!(matches!(store.get(), Err(CredentialError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("token.json"));
        store.set(Token::new("abc")).unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
