//! Persisted session store (session.json).
//!
//! Durable mirror of the in-memory session as two string-valued
//! entries: `user` holds the serialized profile (a JSON string of its
//! own) and `token` the raw credential. Absence of either entry reads
//! as an unauthenticated session; entries that are present but
//! unparseable surface as `MalformedState` so hydration can discard
//! them without failing startup.

use crate::paths::BylinePaths;
use byline_core::error::{BylineError, Result};
use byline_core::session::{SessionStore, StoredSession, UserProfile};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// On-disk layout of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// File-backed session store with atomic writes.
///
/// Writes go through a temporary file plus atomic rename, with an
/// exclusive lock held for the duration, so a crash mid-write never
/// leaves a half-written session behind.
pub struct JsonFileSessionStore {
    path: PathBuf,
}

impl JsonFileSessionStore {
    /// Creates a store at the default path (~/.config/byline/session.json).
    pub fn new() -> Result<Self> {
        let path = BylinePaths::session_file()
            .map_err(|err| BylineError::config(err.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the path to the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait::async_trait]
impl SessionStore for JsonFileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let file: SessionFile = serde_json::from_str(&content).map_err(|err| {
            BylineError::malformed(format!("session file is not valid JSON: {err}"))
        })?;

        let (Some(user), Some(token)) = (file.user, file.token) else {
            // A partial record is not a session
            return Ok(None);
        };

        let profile: UserProfile = serde_json::from_str(&user).map_err(|err| {
            BylineError::malformed(format!("user entry is not a valid profile: {err}"))
        })?;

        Ok(Some(StoredSession { token, profile }))
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let file = SessionFile {
            user: Some(serde_json::to_string(&session.profile)?),
            token: Some(session.token.clone()),
        };
        let content = serde_json::to_string_pretty(&file)?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &content))
            .await
            .map_err(|err| BylineError::internal(format!("failed to join storage task: {err}")))?
            .map_err(BylineError::from)
    }

    async fn clear(&self) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        })
        .await
        .map_err(|err| BylineError::internal(format!("failed to join storage task: {err}")))?
        .map_err(BylineError::from)
    }
}

/// Writes `content` to `path` via tmp file + atomic rename, holding an
/// exclusive lock and fsyncing before the rename.
fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let _lock = FileLock::acquire(path)?;

    let tmp_path = temp_path(path)?;
    let mut tmp_file = File::create(&tmp_path)?;
    tmp_file.write_all(content.as_bytes())?;
    tmp_file.sync_all()?;
    drop(tmp_file);

    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> std::io::Result<PathBuf> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no parent directory")
    })?;
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Path has no file name")
    })?;
    Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> std::io::Result<Self> {
        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;
        file.lock_exclusive()?;
        Ok(Self { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn profile() -> UserProfile {
        UserProfile {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    fn store_in(dir: &TempDir) -> JsonFileSessionStore {
        JsonFileSessionStore::with_path(dir.path().join("session.json"))
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let session = StoredSession {
            token: "T".to_string(),
            profile: profile(),
        };

        store.save(&session).await.unwrap();
        let loaded = store.load().await.unwrap();

        assert_eq!(loaded, Some(session));
    }

    #[tokio::test]
    async fn missing_file_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn partial_record_reads_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"token":"T"}"#).unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn unparseable_file_is_reported_as_malformed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json at all").unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(err) if err.is_malformed()));
    }

    #[tokio::test]
    async fn unparseable_user_entry_is_reported_as_malformed() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"user":"not a profile","token":"T"}"#).unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(err) if err.is_malformed()));
    }

    #[tokio::test]
    async fn clear_removes_the_record_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let session = StoredSession {
            token: "T".to_string(),
            profile: profile(),
        };

        store.save(&session).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn user_entry_is_a_serialized_json_string() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .save(&StoredSession {
                token: "T".to_string(),
                profile: profile(),
            })
            .await
            .unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        // Two flat string entries, the profile double-encoded
        assert_eq!(value["token"], "T");
        let user = value["user"].as_str().unwrap();
        let parsed: UserProfile = serde_json::from_str(user).unwrap();
        assert_eq!(parsed, profile());
    }
}
