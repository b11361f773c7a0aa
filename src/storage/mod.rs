//! Persisted credential storage
//!
//! The bearer credential survives process restarts under one well-known key.
//! The file store keeps a small JSON map, so other keys written by the CLI
//! next to it are preserved.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ClientResult;

/// Key/value persistence for the session credential
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> ClientResult<Option<String>>;
    fn save(&self, credential: &str) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

/// JSON file backed store, e.g. `~/.config/halls/cli/credentials.json`
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    key: String,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> ClientResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write through a sibling temp file and rename, so a crash never leaves
    /// a half-written credential behind
    fn write_map(&self, map: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> ClientResult<Option<String>> {
        let map = self.read_map()?;
        Ok(map.get(&self.key).filter(|v| !v.is_empty()).cloned())
    }

    fn save(&self, credential: &str) -> ClientResult<()> {
        let mut map = self.read_map().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable credential file {}: {}", self.path.display(), e);
            HashMap::new()
        });
        map.insert(self.key.clone(), credential.to_string());
        self.write_map(&map)
    }

    fn clear(&self) -> ClientResult<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.read_map().unwrap_or_default();
        if map.remove(&self.key).is_none() && !map.is_empty() {
            return Ok(());
        }
        if map.is_empty() {
            fs::remove_file(&self.path)?;
            return Ok(());
        }
        self.write_map(&map)
    }
}

/// Process-local store, for tests and one-shot invocations
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    value: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(credential.into())),
        }
    }

    pub fn peek(&self) -> Option<String> {
        self.value.lock().map(|v| v.clone()).unwrap_or(None)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> ClientResult<Option<String>> {
        Ok(self.peek())
    }

    fn save(&self, credential: &str) -> ClientResult<()> {
        if let Ok(mut value) = self.value.lock() {
            *value = Some(credential.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if let Ok(mut value) = self.value.lock() {
            *value = None;
        }
        Ok(())
    }
}
