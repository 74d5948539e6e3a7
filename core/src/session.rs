//! Explicit client session.
//!
//! # Design
//! The session lives in the shared `AppContext` and is the only source of
//! "is logged in". It is restored silently from a `SessionStore` when the app
//! starts and cleared from both memory and the store on logout. A store that
//! fails to load or save never blocks the user: the failure is logged and the
//! in-memory session carries on.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::{SessionInfo, User};

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session store I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("session store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where session info survives between runs.
pub trait SessionStore {
    fn load(&self) -> Result<Option<SessionInfo>, SessionStoreError>;
    fn save(&self, info: &SessionInfo) -> Result<(), SessionStoreError>;
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Keeps the session for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RefCell<Option<SessionInfo>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(info: SessionInfo) -> Self {
        Self {
            slot: RefCell::new(Some(info)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<SessionInfo>, SessionStoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, info: &SessionInfo) -> Result<(), SessionStoreError> {
        *self.slot.borrow_mut() = Some(info.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// JSON file holding the last session info. A missing file means "signed out".
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
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<SessionInfo>, SessionStoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, info: &SessionInfo) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_vec_pretty(info)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

pub struct Session {
    info: Option<SessionInfo>,
    store: Box<dyn SessionStore>,
}

impl Session {
    /// Signed-out session backed by `store`. Nothing is loaded yet.
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        Self { info: None, store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySessionStore::new()))
    }

    /// Load whatever `store` remembers. Load failures start signed out.
    pub fn restore(store: Box<dyn SessionStore>) -> Self {
        let info = match store.load() {
            Ok(info) => info,
            Err(err) => {
                warn!(error = %err, "could not restore session, starting signed out");
                None
            }
        };
        debug!(restored = info.is_some(), "session initialised");
        Self { info, store }
    }

    pub fn is_logged_in(&self) -> bool {
        self.info.is_some()
    }

    pub fn info(&self) -> Option<&SessionInfo> {
        self.info.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.info.as_ref().and_then(|info| info.user.as_ref())
    }

    pub fn sign_in(&mut self, info: SessionInfo) {
        if let Err(err) = self.store.save(&info) {
            warn!(error = %err, "could not persist session");
        }
        info!(user = ?info.user.as_ref().map(|u| u.id), "signed in");
        self.info = Some(info);
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "could not clear stored session");
        }
        if self.info.take().is_some() {
            info!("signed out");
        }
    }
}
