//! The viewer session: open folder, tabs, active tab and watches.
//!
//! ## Invariants
//!
//! - The active tab, when set, is one of the open tabs.
//! - Each path enters the tab list at most once. Entering issues exactly one
//!   watch request and leaving (close or folder switch) exactly one unwatch,
//!   so the watched set always equals the set of open tab paths.
//! - Failed operations leave all of the above untouched.

use std::path::{Path, PathBuf};

use crate::reader::FileReader;
use crate::tab::{FileDescriptor, Tab, TabId};
use crate::watch::FileWatcher;
use crate::{CoreError, CoreResult};

/// What closing a tab did to the active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The closed tab was active; this neighbour is active now.
    Activated(TabId),
    /// The closed tab was the last one.
    Empty,
    /// The closed tab was not active.
    Unchanged,
}

/// How an external change was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The active tab changed and must be redrawn.
    Rerender(TabId),
    /// A background tab was updated; it shows the new text when activated.
    UpdatedSilently(TabId),
    /// No open tab has that path.
    Discarded,
}

/// Owns all mutable viewer state.
pub struct Session<W, R> {
    current_folder: Option<PathBuf>,
    tabs: Vec<Tab>,
    active: Option<TabId>,
    watcher: W,
    reader: R,
}

impl<W: FileWatcher, R: FileReader> Session<W, R> {
    /// Creates an empty session.
    pub fn new(watcher: W, reader: R) -> Self {
        Self {
            current_folder: None,
            tabs: Vec::new(),
            active: None,
            watcher,
            reader,
        }
    }

    // ==================== Operations ====================

    /// Opens a file, or focuses its tab if it is already open.
    ///
    /// A read failure aborts the open without touching the session. A watch
    /// failure is logged; the tab stays open without live reload.
    pub fn open_file(&mut self, descriptor: FileDescriptor) -> CoreResult<TabId> {
        if let Some(tab) = self.find_by_path(&descriptor.path) {
            let id = tab.id();
            self.active = Some(id);
            return Ok(id);
        }

        let content = self.reader.read(&descriptor.path).inspect_err(|err| {
            tracing::error!("{}", err);
        })?;

        let tab = Tab::new(descriptor, content);
        let id = tab.id();
        let path = tab.path().to_path_buf();
        self.tabs.push(tab);
        self.active = Some(id);
        tracing::info!("Opened {}", path.display());

        if let Err(err) = self.watcher.watch(&path) {
            tracing::warn!("{}; live reload disabled for this tab", err);
        }

        Ok(id)
    }

    /// Makes `id` the active tab.
    ///
    /// Returns `TabNotFound` without changing anything if `id` is not open.
    pub fn set_active_tab(&mut self, id: TabId) -> CoreResult<()> {
        if self.tab(id).is_none() {
            return Err(CoreError::TabNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    /// Closes a tab and stops watching its file.
    ///
    /// If the closed tab was active, the tab that slides into its slot
    /// becomes active, falling back to the new last tab.
    pub fn close_tab(&mut self, id: TabId) -> CoreResult<CloseOutcome> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.id() == id)
            .ok_or(CoreError::TabNotFound(id))?;

        let tab = self.tabs.remove(index);
        self.watcher.unwatch(tab.path());
        tracing::info!("Closed {}", tab.path().display());

        if self.active != Some(id) {
            return Ok(CloseOutcome::Unchanged);
        }

        match self.tabs.get(index.min(self.tabs.len().saturating_sub(1))) {
            Some(next) => {
                let next_id = next.id();
                self.active = Some(next_id);
                Ok(CloseOutcome::Activated(next_id))
            }
            None => {
                self.active = None;
                Ok(CloseOutcome::Empty)
            }
        }
    }

    /// Switches to a new folder, closing every tab.
    pub fn on_folder_opened(&mut self, path: impl Into<PathBuf>) {
        for tab in self.tabs.drain(..) {
            self.watcher.unwatch(tab.path());
        }
        self.active = None;

        let path = path.into();
        tracing::info!("Opened folder {}", path.display());
        self.current_folder = Some(path);
    }

    /// Applies a change notification for `path`.
    ///
    /// Notifications for paths with no open tab (e.g. one closed while the
    /// notification was in flight) are discarded.
    pub fn on_external_change(&mut self, path: &Path, content: String) -> ChangeOutcome {
        let active = self.active;
        let Some(tab) = self.tabs.iter_mut().find(|t| same_path(t.path(), path)) else {
            tracing::debug!("Discarding change for {}: no open tab", path.display());
            return ChangeOutcome::Discarded;
        };

        tab.replace_content(content);
        let id = tab.id();
        tracing::info!("Reloaded {}", path.display());

        if active == Some(id) {
            ChangeOutcome::Rerender(id)
        } else {
            ChangeOutcome::UpdatedSilently(id)
        }
    }

    // ==================== Queries ====================

    /// Returns the currently opened folder.
    pub fn current_folder(&self) -> Option<&Path> {
        self.current_folder.as_deref()
    }

    /// Returns the open tabs in open order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns a tab by ID.
    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == id)
    }

    /// Returns the tab at a strip position.
    pub fn tab_at(&self, index: usize) -> CoreResult<&Tab> {
        self.tabs.get(index).ok_or(CoreError::TabIndexOutOfRange(index))
    }

    /// Finds the tab for a path.
    pub fn find_by_path(&self, path: &Path) -> Option<&Tab> {
        self.tabs.iter().find(|t| same_path(t.path(), path))
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    /// Returns the active tab.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.tab(id))
    }

    /// Paths that should be watched right now.
    pub fn watched_paths(&self) -> impl Iterator<Item = &Path> {
        self.tabs.iter().map(|t| t.path())
    }

    pub fn watcher(&self) -> &W {
        &self.watcher
    }

    /// Returns the number of open tabs.
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns true if no tabs are open.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

/// Tab identity: the path string exactly as given, with no normalization.
fn same_path(a: &Path, b: &Path) -> bool {
    a.as_os_str() == b.as_os_str()
}
