//! Per-session working set owned by the request layer.
//!
//! The core keeps no state between calls. A caller that wants "export what
//! I parsed last" holds a [`SessionStore`] and passes it by reference. The
//! store is plain data: synchronization, expiry and identity belong to the
//! owner.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::central_snat::CentralSnatRule;
use crate::policy::PolicyRule;
use crate::section::NatParse;
use crate::vip::VipRule;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Most recent parse results of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub policies: Vec<PolicyRule>,
    #[serde(default)]
    pub csnat: Vec<CentralSnatRule>,
    #[serde(default)]
    pub vip: Vec<VipRule>,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown session '{0}'")]
    UnknownSession(SessionId),
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid session data in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStore {
    #[serde(default)]
    sessions: BTreeMap<SessionId, SessionState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &SessionId) -> Option<&SessionState> {
        self.sessions.get(id)
    }

    /// Like [`get`](Self::get) but an absent session is an error.
    pub fn require(&self, id: &SessionId) -> Result<&SessionState, SessionError> {
        self.get(id)
            .ok_or_else(|| SessionError::UnknownSession(id.clone()))
    }

    /// Replace the session's policy collection.
    pub fn store_policies(&mut self, id: &SessionId, policies: Vec<PolicyRule>) {
        self.sessions.entry(id.clone()).or_default().policies = policies;
    }

    /// Replace the session's NAT collections.
    pub fn store_nat(&mut self, id: &SessionId, nat: &NatParse) {
        let state = self.sessions.entry(id.clone()).or_default();
        state.csnat = nat.csnat.clone();
        state.vip = nat.vip.clone();
    }

    pub fn remove(&mut self, id: &SessionId) -> Option<SessionState> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Load a store from a JSON file; a missing file is an empty store.
    pub fn load_file(path: &Path) -> Result<Self, SessionError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let raw = fs::read(path).map_err(|source| SessionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| SessionError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn save_file(&self, path: &Path) -> Result<(), SessionError> {
        let bytes = serde_json::to_vec_pretty(self).map_err(|source| SessionError::Json {
            path: path.display().to_string(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| SessionError::Io {
            path: path.display().to_string(),
            source,
        })
    }
}
