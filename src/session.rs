//! Session persistence.
//!
//! A small key-value store holding the bearer token and the participant
//! record under two fixed keys, plus the [`Session`] handle the rest of the
//! client reads from. Only the auth flow writes through the handle.

use crate::constants::storage_keys;
use crate::error::{KpiGameError, Result};
use crate::models::Participant;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// String key-value storage scoped to one client installation
pub trait SessionStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Session store backed by a JSON object file
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| KpiGameError::session_store(&self.path, e.to_string()))?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents)
            .map_err(|e| KpiGameError::session_store(&self.path, format!("corrupt file: {}", e)))
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| KpiGameError::session_store(&self.path, e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(items)?;
        std::fs::write(&self.path, contents)
            .map_err(|e| KpiGameError::session_store(&self.path, e.to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

/// Snapshot of the persisted session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub token: Option<String>,
    pub user: Option<Participant>,
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

/// Shared handle over the session store
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Session over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Stored bearer token; an empty value counts as absent
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get_item(storage_keys::TOKEN)?
            .filter(|token| !token.is_empty()))
    }

    /// Stored participant; a record that fails to decode reads as absent
    pub fn current_user(&self) -> Result<Option<Participant>> {
        let Some(raw) = self.store.get_item(storage_keys::USER)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("Ignoring unreadable stored user record: {}", e);
                Ok(None)
            }
        }
    }

    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    pub fn state(&self) -> Result<SessionState> {
        Ok(SessionState {
            token: self.token()?,
            user: self.current_user()?,
        })
    }

    pub(crate) fn store_login(&self, token: &str, user: &Participant) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        self.store.set_item(storage_keys::TOKEN, token)?;
        if let Err(e) = self.store.set_item(storage_keys::USER, &user_json) {
            if let Err(rollback) = self.store.remove_item(storage_keys::TOKEN) {
                warn!("Could not remove token after failed user write: {}", rollback);
            }
            return Err(e);
        }
        debug!("Stored session for participant {}", user.id);
        Ok(())
    }

    pub(crate) fn clear(&self) -> Result<()> {
        self.store.remove_item(storage_keys::TOKEN)?;
        self.store.remove_item(storage_keys::USER)?;
        debug!("Cleared stored session");
        Ok(())
    }
}
