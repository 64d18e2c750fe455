//! Headless model of the tabbed notebook: text tabs holding files and operation
//! tabs holding the output of cross-tab operations.
//!
//! Nothing here draws anything. A front end owns a [`Notebook`], forwards user
//! actions to it, and renders whatever state it exposes.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::cut::cut;
use crate::app::difference::difference_text;
use crate::app::session::{SessionSnapshot, TabRecord};
use crate::app::transform::{SortOptions, capitalize_words, sort_lines_with};
use crate::domain::errors::{CutError, DomainError};
use crate::domain::model::TabKind;
use crate::infra::fs::{read_text, write_text};

const UNTITLED: &str = "New File";

/// A plain-text editor tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextTab {
    label: String,
    path: Option<PathBuf>,
    content: String,
    modified: bool,
}

impl TextTab {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Title shown on the tab itself.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// File name of the open file (or "New File"), with `*` while there are unsaved edits.
    pub fn display_label(&self) -> String {
        let name = self
            .path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_owned());
        if self.modified {
            format!("{name}*")
        } else {
            name
        }
    }

    /// Load `path` into the tab, discarding the current buffer.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.content =
            read_text(path).with_context(|| format!("failed to open {}", path.display()))?;
        self.path = Some(path.to_path_buf());
        self.modified = false;
        tracing::info!(path = %path.display(), "opened file in text tab");
        Ok(())
    }

    /// Replace the buffer. The tab is marked modified when the text actually changes.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let content = content.into();
        if content != self.content {
            self.content = content;
            self.modified = true;
        }
    }

    /// Write the buffer back to the tab's file.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(DomainError::MissingPath)?;
        write_text(&path, &self.content)?;
        self.modified = false;
        Ok(())
    }

    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.path = Some(path.into());
        self.save()
    }

    /// Start an empty buffer, saving pending edits first when the tab has a file.
    pub fn new_file(&mut self) -> Result<()> {
        if self.modified {
            if self.path.is_none() {
                return Err(DomainError::UnsavedChanges.into());
            }
            self.save()?;
        }
        self.content.clear();
        self.path = None;
        self.modified = false;
        Ok(())
    }

    pub fn capitalize(&mut self) {
        let updated = capitalize_words(&self.content);
        self.set_content(updated);
    }

    pub fn sort(&mut self, options: SortOptions) {
        let updated = sort_lines_with(&self.content, options);
        self.set_content(updated);
    }

    /// Keep only the selected fields. On error the buffer is left untouched.
    pub fn cut(&mut self, fields: &str, separator: &str) -> Result<(), CutError> {
        let updated = cut(&self.content, fields, separator)?;
        self.set_content(updated);
        Ok(())
    }
}

/// A tab displaying the result of an operation over other tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationTab {
    label: String,
    output: String,
}

impl OperationTab {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            output: String::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Persist the last operation's output.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_text(path, &self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    Text(TextTab),
    Operation(OperationTab),
}

impl Tab {
    pub fn kind(&self) -> TabKind {
        match self {
            Tab::Text(_) => TabKind::Text,
            Tab::Operation(_) => TabKind::Operation,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Tab::Text(tab) => tab.label(),
            Tab::Operation(tab) => tab.label(),
        }
    }

    pub fn as_text(&self) -> Option<&TextTab> {
        match self {
            Tab::Text(tab) => Some(tab),
            Tab::Operation(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextTab> {
        match self {
            Tab::Text(tab) => Some(tab),
            Tab::Operation(_) => None,
        }
    }

    pub fn as_operation(&self) -> Option<&OperationTab> {
        match self {
            Tab::Operation(tab) => Some(tab),
            Tab::Text(_) => None,
        }
    }
}

/// Ordered collection of tabs with an optional selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notebook {
    tabs: Vec<Tab>,
    selected: Option<usize>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Append a tab and return its index. The first tab added becomes selected.
    pub fn add_tab(&mut self, kind: TabKind, label: impl Into<String>) -> usize {
        let tab = match kind {
            TabKind::Text => Tab::Text(TextTab::new(label)),
            TabKind::Operation => Tab::Operation(OperationTab::new(label)),
        };
        self.tabs.push(tab);
        let index = self.tabs.len() - 1;
        if self.selected.is_none() {
            self.selected = Some(index);
        }
        tracing::debug!(index, kind = kind.as_str(), "added tab");
        index
    }

    pub fn select(&mut self, index: usize) -> Result<(), DomainError> {
        self.tab(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.selected.and_then(|index| self.tabs.get(index))
    }

    pub fn current_tab_mut(&mut self) -> Option<&mut Tab> {
        self.selected.and_then(|index| self.tabs.get_mut(index))
    }

    pub fn tab(&self, index: usize) -> Result<&Tab, DomainError> {
        self.tabs.get(index).ok_or(DomainError::InvalidTab(index))
    }

    pub fn tab_mut(&mut self, index: usize) -> Result<&mut Tab, DomainError> {
        self.tabs.get_mut(index).ok_or(DomainError::InvalidTab(index))
    }

    pub fn text_tab(&self, index: usize) -> Result<&TextTab, DomainError> {
        self.tab(index)?
            .as_text()
            .ok_or(DomainError::WrongTabKind {
                index,
                expected: TabKind::Text.as_str(),
            })
    }

    pub fn text_tab_mut(&mut self, index: usize) -> Result<&mut TextTab, DomainError> {
        self.tab_mut(index)?
            .as_text_mut()
            .ok_or(DomainError::WrongTabKind {
                index,
                expected: TabKind::Text.as_str(),
            })
    }

    /// Remove a tab, keeping the selection on a neighbouring tab.
    pub fn close_tab(&mut self, index: usize) -> Result<Tab, DomainError> {
        self.tab(index)?;
        let removed = self.tabs.remove(index);
        self.selected = match self.selected {
            _ if self.tabs.is_empty() => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) if current == index => Some(index.min(self.tabs.len() - 1)),
            other => other,
        };
        Ok(removed)
    }

    /// Fill operation tab `op` with the lines of text tab `left` that appear
    /// nowhere in text tab `right`, and return that output.
    pub fn difference_between(
        &mut self,
        op: usize,
        left: usize,
        right: usize,
    ) -> Result<&str, DomainError> {
        let output = {
            let left = self.text_tab(left)?;
            let right = self.text_tab(right)?;
            difference_text(left.content(), right.content()).join("\n")
        };

        match self.tab_mut(op)? {
            Tab::Operation(tab) => {
                tab.output = output;
                Ok(tab.output.as_str())
            }
            Tab::Text(_) => Err(DomainError::WrongTabKind {
                index: op,
                expected: TabKind::Operation.as_str(),
            }),
        }
    }

    /// Capture the tab layout for persistence.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            tabs: self.tabs.iter().map(TabRecord::from).collect(),
            selected: self.selected,
        }
    }

    /// Rebuild a notebook from a snapshot, reopening text tabs from disk.
    ///
    /// A file that can no longer be read leaves its tab empty.
    pub fn restore(snapshot: SessionSnapshot) -> Self {
        let mut notebook = Self::new();
        for record in snapshot.tabs {
            let index = notebook.add_tab(record.kind, record.label);
            let (Some(path), Tab::Text(tab)) = (record.path, &mut notebook.tabs[index]) else {
                continue;
            };
            let path = PathBuf::from(path);
            if let Err(err) = tab.open(&path) {
                tracing::warn!(path = %path.display(), error = %err, "could not reopen file");
                tab.path = Some(path);
            }
        }
        notebook.selected = snapshot
            .selected
            .filter(|index| *index < notebook.tabs.len())
            .or(notebook.selected);
        notebook
    }
}
