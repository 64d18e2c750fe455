//! Session persistence utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::app::notebook::Tab;
use crate::domain::model::TabKind;

const SESSION_DIR: &str = ".linkpad";
const SESSION_FILE: &str = "session.json";

/// Snapshot of the notebook layout persisted between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Tabs in display order.
    pub tabs: Vec<TabRecord>,
    /// Index of the tab that was selected when the session closed.
    pub selected: Option<usize>,
}

/// Serializable representation of a notebook [`Tab`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabRecord {
    pub kind: TabKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&Tab> for TabRecord {
    fn from(value: &Tab) -> Self {
        Self {
            kind: value.kind(),
            label: value.label().to_owned(),
            path: value
                .as_text()
                .and_then(|tab| tab.path())
                .map(|path| path.display().to_string()),
        }
    }
}

/// Persists notebook state to a session file under `.linkpad/`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
    path: PathBuf,
}

impl SessionStore {
    /// Create a new store rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let path = root.join(SESSION_DIR).join(SESSION_FILE);
        Self { root, path }
    }

    /// Location of the persisted session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the most recently persisted session snapshot.
    pub fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file at {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&data)
            .with_context(|| format!("invalid session data in {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Persist the provided snapshot to disk, creating parent directories as needed.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let dir = self.path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create session directory {}", dir.display()))?;

        let data = serde_json::to_string_pretty(snapshot)
            .context("failed to serialize session snapshot")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write session file to {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), tabs = snapshot.tabs.len(), "saved session");
        Ok(())
    }
}
