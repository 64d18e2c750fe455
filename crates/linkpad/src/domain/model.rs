//! Domain models shared by the text operations and the notebook.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Ordered, 1-based field positions expanded from a range specification.
///
/// Order and duplicates are kept exactly as written, so `"3,1,1"` selects the
/// third field followed by the first one twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldIndexList(Vec<usize>);

impl FieldIndexList {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Highest requested position, if any.
    pub fn max(&self) -> Option<usize> {
        self.0.iter().copied().max()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for FieldIndexList {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for FieldIndexList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&rendered)
    }
}

/// Delimiter used both to split a line into fields and to join the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSeparator(String);

impl FieldSeparator {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldSeparator {
    fn default() -> Self {
        Self(",".to_owned())
    }
}

impl From<&str> for FieldSeparator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for FieldSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kinds of notebook tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TabKind {
    /// Plain-text file editor.
    Text,
    /// Output pane for operations across other tabs.
    Operation,
}

impl TabKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabKind::Text => "text",
            TabKind::Operation => "operation",
        }
    }
}
