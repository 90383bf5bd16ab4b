//! Open tabs and the active editor buffer.

use serde::Serialize;

use notevault_core::types::path;
use notevault_entity::OpenFile;

/// Tabs in open order plus the selection.
///
/// With no active file the buffer is empty. When a file is active its tab
/// is the only one flagged `active` and the buffer mirrors that tab's
/// cached content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    open_files: Vec<OpenFile>,
    active_file_path: Option<String>,
    file_content: String,
}

impl Session {
    /// An empty session with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open tabs in the order they were opened.
    pub fn open_files(&self) -> &[OpenFile] {
        &self.open_files
    }

    /// Path of the selected tab.
    pub fn active_file_path(&self) -> Option<&str> {
        self.active_file_path.as_deref()
    }

    /// Buffer of the selected tab (`""` when nothing is selected).
    pub fn file_content(&self) -> &str {
        &self.file_content
    }

    /// The tab for `path`, if open.
    pub fn tab(&self, file_path: &str) -> Option<&OpenFile> {
        self.open_files.iter().find(|tab| tab.path == file_path)
    }

    /// Whether a tab is open for `path`.
    pub fn is_open(&self, file_path: &str) -> bool {
        self.tab(file_path).is_some()
    }

    /// Whether `path` is the selected tab.
    pub fn is_active(&self, file_path: &str) -> bool {
        self.active_file_path.as_deref() == Some(file_path)
    }

    /// Select an already-open tab and load its cached content.
    ///
    /// Returns `false` (and changes nothing) when the tab is not open.
    pub fn activate(&mut self, file_path: &str) -> bool {
        let Some(content) = self.tab(file_path).map(|tab| tab.content.clone()) else {
            return false;
        };
        for tab in &mut self.open_files {
            tab.active = tab.path == file_path;
        }
        self.active_file_path = Some(file_path.to_string());
        self.file_content = content;
        true
    }

    /// Open `path` with `content` and select it.
    ///
    /// An already-open clean tab takes the new content; a dirty one keeps
    /// its edits.
    pub fn open(&mut self, file_path: &str, content: String) {
        match self.open_files.iter_mut().find(|tab| tab.path == file_path) {
            Some(tab) => {
                if !tab.dirty {
                    tab.content = content;
                }
            }
            None => self.open_files.push(OpenFile::new(file_path, content)),
        }
        self.activate(file_path);
    }

    /// Add a tab without touching the selection; no-op if already open.
    pub fn add_inactive(&mut self, file_path: &str, content: String) {
        if !self.is_open(file_path) {
            self.open_files.push(OpenFile::new(file_path, content));
        }
    }

    /// Replace the cached content of a clean tab, mirroring it into the
    /// buffer when the tab is selected.
    ///
    /// Returns whether anything changed.
    pub fn refresh_content(&mut self, file_path: &str, content: String) -> bool {
        let Some(tab) = self.open_files.iter_mut().find(|tab| tab.path == file_path) else {
            return false;
        };
        if tab.dirty {
            return false;
        }
        if self.active_file_path.as_deref() == Some(file_path) {
            self.file_content.clone_from(&content);
        }
        tab.content = content;
        true
    }

    /// Close the tab for `path`.
    ///
    /// Closing the selected tab selects the tab just before it, or the
    /// first remaining one; closing the last tab clears the selection.
    pub fn close_tab(&mut self, file_path: &str) -> bool {
        let Some(index) = self.open_files.iter().position(|tab| tab.path == file_path) else {
            return false;
        };
        self.open_files.remove(index);

        if !self.is_active(file_path) {
            return true;
        }
        let next = index
            .checked_sub(1)
            .or(if self.open_files.is_empty() { None } else { Some(0) })
            .map(|i| self.open_files[i].path.clone());
        match next {
            Some(next) => {
                self.activate(&next);
            }
            None => {
                self.active_file_path = None;
                self.file_content.clear();
            }
        }
        true
    }

    /// Close every tab at or beneath `ancestor`; returns the closed paths.
    pub fn close_within(&mut self, ancestor: &str) -> Vec<String> {
        let doomed: Vec<String> = self
            .open_files
            .iter()
            .filter(|tab| path::is_same_or_within(&tab.path, ancestor))
            .map(|tab| tab.path.clone())
            .collect();
        for file_path in &doomed {
            self.close_tab(file_path);
        }
        doomed
    }

    /// Edit the selected buffer; returns `false` when nothing is selected.
    pub fn change_content(&mut self, content: String) -> bool {
        let Some(active) = self.active_file_path.as_deref() else {
            return false;
        };
        let Some(tab) = self.open_files.iter_mut().find(|tab| tab.path == active) else {
            return false;
        };
        tab.content.clone_from(&content);
        tab.dirty = true;
        self.file_content = content;
        true
    }

    /// Mark `path` clean if its buffer still equals the saved text.
    pub fn mark_saved(&mut self, file_path: &str, saved: &str) -> bool {
        match self.open_files.iter_mut().find(|tab| tab.path == file_path) {
            Some(tab) if tab.content == saved => {
                tab.dirty = false;
                true
            }
            _ => false,
        }
    }

    /// Re-point tabs (and the selection) at or beneath `old` to `new`.
    pub fn rebase_paths(&mut self, old: &str, new: &str) {
        for tab in &mut self.open_files {
            if let Some(rebased) = path::rebase(&tab.path, old, new) {
                tab.path = rebased;
            }
        }
        if let Some(active) = self.active_file_path.as_mut() {
            if let Some(rebased) = path::rebase(active, old, new) {
                *active = rebased;
            }
        }
    }

    /// Folder holding the selected file (`""` for a top-level file).
    pub fn active_directory(&self) -> Option<&str> {
        self.active_file_path.as_deref().map(path::parent_of)
    }
}
