use std::path::Path;

use anyhow::{Context, Result};
use fortiparse::session::{SessionId, SessionStore};

use crate::cli::SessionArgs;

impl SessionArgs {
    /// Store file and session id, when both were given.
    pub fn target(&self) -> Option<(&Path, SessionId)> {
        match (&self.session, &self.session_id) {
            (Some(path), Some(id)) => Some((path.as_path(), SessionId::new(id.as_str()))),
            _ => None,
        }
    }
}

/// Load the store, apply `update` to it and write it back.
pub fn update_session(path: &Path, update: impl FnOnce(&mut SessionStore)) -> Result<()> {
    let mut store = SessionStore::load_file(path)
        .with_context(|| format!("failed to load session store {}", path.display()))?;
    update(&mut store);
    store
        .save_file(path)
        .with_context(|| format!("failed to save session store {}", path.display()))?;
    tracing::debug!(path = %path.display(), sessions = store.len(), "session store updated");
    Ok(())
}
