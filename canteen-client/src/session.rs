//! Session handle and persistence
//!
//! [`Session`] is the single owner of the logged-in identity and token. It is
//! cloned into the transport (bearer header) and the auth context; nothing
//! else reads persisted state. [`SessionStore`] writes it to
//! `<home>/session.json` so the CLI survives between invocations.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use shared::models::Role;

use crate::error::SessionStoreError;

/// Session file name under the admin home
pub const SESSION_FILE: &str = "session.json";

/// Logged-in identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Option<String>,
    pub email: Option<String>,
    /// Company (or canteen) display name
    pub name: Option<String>,
    pub role: Option<Role>,
}

impl AuthUser {
    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.name.as_str())
    }
}

/// Session contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: Option<String>,
    pub user: Option<AuthUser>,
}

impl SessionData {
    pub fn set_login(&mut self, token: String, user: AuthUser) {
        self.token = Some(token);
        self.user = Some(user);
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Shared session handle
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionData>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_data(data: SessionData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    // A panicked writer leaves plain data behind; keep using it.
    fn read(&self) -> RwLockReadGuard<'_, SessionData> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, SessionData> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone().filter(|t| !t.is_empty())
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.read().user.clone()
    }

    pub fn snapshot(&self) -> SessionData {
        self.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_logged_in()
    }

    pub fn set(&self, token: impl Into<String>, user: AuthUser) {
        self.write().set_login(token.into(), user);
    }

    pub fn replace(&self, data: SessionData) {
        *self.write() = data;
    }

    pub fn clear(&self) {
        self.write().clear();
    }
}

/// JSON file persistence for [`SessionData`]
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at `<home>/session.json`
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            path: home.into().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn save(&self, data: &SessionData) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// `Ok(None)` when no session has been saved
    pub fn load(&self) -> Result<Option<SessionData>, SessionStoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    pub fn delete(&self) -> Result<(), SessionStoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
