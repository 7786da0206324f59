//! Maps incoming events to session operations and pushes frames to the
//! display.
//!
//! Events are handled strictly one at a time; a handler runs to completion
//! before the next event is taken, so no handler ever sees a half-applied
//! change.

use glimpse_syntax::Highlighter;
use std::ops::ControlFlow;
use std::path::Path;

use crate::config::TreeConfig;
use crate::event::{EventLoop, ViewerEvent};
use crate::reader::FileReader;
use crate::session::{ChangeOutcome, Session};
use crate::tree::{FileNode, build_tree};
use crate::view::{self, Frame};
use crate::watch::FileWatcher;
use crate::CoreResult;

/// Presentation side of the viewer.
pub trait DisplaySink {
    /// Shows the tree of a newly opened folder.
    fn show_tree(&mut self, folder: &Path, tree: &[FileNode]);

    /// Draws the tab strip, editor area and status bar.
    fn show_frame(&mut self, frame: &Frame);
}

/// Owns the session and drives the display.
pub struct Controller<W, R, S> {
    session: Session<W, R>,
    highlighter: Highlighter,
    sink: S,
    tree_config: TreeConfig,
    tree: Vec<FileNode>,
}

impl<W: FileWatcher, R: FileReader, S: DisplaySink> Controller<W, R, S> {
    pub fn new(
        session: Session<W, R>,
        highlighter: Highlighter,
        sink: S,
        tree_config: TreeConfig,
    ) -> Self {
        Self {
            session,
            highlighter,
            sink,
            tree_config,
            tree: Vec::new(),
        }
    }

    /// Drains `events` until a `Quit` arrives or every sender is gone.
    pub async fn run(&mut self, events: &mut EventLoop) {
        self.render();
        while let Some(event) = events.next().await {
            if self.handle(event).is_break() {
                break;
            }
        }
        tracing::info!("Event loop finished");
    }

    /// Handles one event, logging failures.
    ///
    /// A failed event leaves the session as it was.
    pub fn handle(&mut self, event: ViewerEvent) -> ControlFlow<()> {
        match self.dispatch(event) {
            Ok(flow) => flow,
            Err(err) => {
                tracing::error!("{}", err);
                ControlFlow::Continue(())
            }
        }
    }

    /// Handles one event, returning failures to the caller.
    pub fn dispatch(&mut self, event: ViewerEvent) -> CoreResult<ControlFlow<()>> {
        tracing::debug!(?event, "Dispatching");
        match event {
            ViewerEvent::FolderOpened(path) => {
                let tree = build_tree(&path, &self.tree_config.exclude)?;
                self.session.on_folder_opened(&path);
                self.sink.show_tree(&path, &tree);
                self.tree = tree;
                self.render();
            }
            ViewerEvent::FileClicked(descriptor) => {
                self.session.open_file(descriptor)?;
                self.render();
            }
            ViewerEvent::TabSelected(index) => {
                let id = self.session.tab_at(index)?.id();
                self.session.set_active_tab(id)?;
                self.render();
            }
            ViewerEvent::TabClosed(index) => {
                let id = self.session.tab_at(index)?.id();
                self.session.close_tab(id)?;
                self.render();
            }
            ViewerEvent::FileChanged { path, content } => {
                match self.session.on_external_change(&path, content) {
                    ChangeOutcome::Rerender(_) => self.render(),
                    ChangeOutcome::UpdatedSilently(_) | ChangeOutcome::Discarded => {}
                }
            }
            ViewerEvent::Quit => return Ok(ControlFlow::Break(())),
        }
        Ok(ControlFlow::Continue(()))
    }

    fn render(&mut self) {
        let frame = view::frame(&self.session, &self.highlighter);
        self.sink.show_frame(&frame);
    }

    pub fn session(&self) -> &Session<W, R> {
        &self.session
    }

    /// Returns the tree of the current folder.
    pub fn tree(&self) -> &[FileNode] {
        &self.tree
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
