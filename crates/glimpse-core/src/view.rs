//! Pure view model.
//!
//! Everything here maps session state to display data and has no side
//! effects; the [`crate::DisplaySink`] decides how to present it.

use glimpse_syntax::Highlighter;
use std::path::PathBuf;

use crate::reader::FileReader;
use crate::session::Session;
use crate::tab::{Tab, TabId};
use crate::tree::{FileNode, NodeKind};
use crate::watch::FileWatcher;

/// One entry of the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabLabel {
    pub id: TabId,
    pub name: String,
    pub active: bool,
}

/// Highlighted contents of the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeView {
    pub name: String,
    pub path: PathBuf,
    /// Escaped text with span markers
    pub html: String,
    pub line_count: usize,
}

/// Main editor area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Nothing open: show the welcome screen
    Empty,
    Code(CodeView),
}

/// Status bar text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBar {
    pub file: String,
    pub lines: String,
}

/// Everything needed to draw the window once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tabs: Vec<TabLabel>,
    pub body: Body,
    pub status: StatusBar,
}

impl Frame {
    /// Returns true if the welcome screen is shown.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, Body::Empty)
    }
}

/// A flattened tree entry with its indentation depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub depth: usize,
    pub name: String,
    pub path: PathBuf,
    pub kind: NodeKind,
}

/// Builds the frame for the current session state.
pub fn frame<W: FileWatcher, R: FileReader>(
    session: &Session<W, R>,
    highlighter: &Highlighter,
) -> Frame {
    let active = session.active_tab();
    Frame {
        tabs: tab_strip(session),
        body: match active {
            Some(tab) => Body::Code(code_view(tab, highlighter)),
            None => Body::Empty,
        },
        status: status_bar(active),
    }
}

/// Tab labels in open order.
pub fn tab_strip<W: FileWatcher, R: FileReader>(session: &Session<W, R>) -> Vec<TabLabel> {
    let active = session.active_id();
    session
        .tabs()
        .iter()
        .map(|tab| TabLabel {
            id: tab.id(),
            name: tab.name().to_string(),
            active: Some(tab.id()) == active,
        })
        .collect()
}

/// Highlights a tab's content.
pub fn code_view(tab: &Tab, highlighter: &Highlighter) -> CodeView {
    CodeView {
        name: tab.name().to_string(),
        path: tab.path().to_path_buf(),
        html: highlighter.highlight(tab.content(), tab.name()),
        line_count: tab.line_count(),
    }
}

pub fn status_bar(tab: Option<&Tab>) -> StatusBar {
    match tab {
        Some(tab) => StatusBar {
            file: tab.path().display().to_string(),
            lines: format!("{} lines", tab.line_count()),
        },
        None => StatusBar::default(),
    }
}

/// Flattens a tree depth-first for display.
pub fn tree_rows(nodes: &[FileNode]) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    push_rows(nodes, 0, &mut rows);
    rows
}

fn push_rows(nodes: &[FileNode], depth: usize, rows: &mut Vec<TreeRow>) {
    for node in nodes {
        rows.push(TreeRow {
            depth,
            name: node.name.clone(),
            path: node.path.clone(),
            kind: node.kind,
        });
        push_rows(node.children(), depth + 1, rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::testing::session;
    use crate::tab::FileDescriptor;

    #[test]
    fn test_empty_frame() {
        let session = session(&[]);
        let highlighter = Highlighter::new().unwrap();

        let frame = frame(&session, &highlighter);
        assert!(frame.is_empty());
        assert!(frame.tabs.is_empty());
        assert_eq!(frame.status, StatusBar::default());
    }

    #[test]
    fn test_frame_for_active_tab() {
        let mut session = session(&[("/p/a.js", "const x = 1;\n"), ("/p/b.txt", "b")]);
        let a = session.open_file(FileDescriptor::from_path("/p/a.js")).unwrap();
        session.open_file(FileDescriptor::from_path("/p/b.txt")).unwrap();
        session.set_active_tab(a).unwrap();
        let highlighter = Highlighter::new().unwrap();

        let frame = frame(&session, &highlighter);
        let labels: Vec<_> = frame.tabs.iter().map(|t| (t.name.as_str(), t.active)).collect();
        assert_eq!(labels, vec![("a.js", true), ("b.txt", false)]);

        let Body::Code(code) = &frame.body else {
            panic!("expected code view");
        };
        assert_eq!(
            code.html,
            "<span class=\"keyword\">const</span> x = <span class=\"number\">1</span>;\n"
        );
        assert_eq!(code.line_count, 2);
        assert_eq!(frame.status.file, "/p/a.js");
        assert_eq!(frame.status.lines, "2 lines");
    }

    #[test]
    fn test_tree_rows_depth() {
        let tree = vec![FileNode {
            name: "src".into(),
            path: "/p/src".into(),
            relative_path: "src".into(),
            kind: NodeKind::Directory,
            children: Some(vec![FileNode {
                name: "lib.rs".into(),
                path: "/p/src/lib.rs".into(),
                relative_path: "src/lib.rs".into(),
                kind: NodeKind::File,
                children: None,
            }]),
        }];

        let rows = tree_rows(&tree);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].depth, rows[0].name.as_str()), (0, "src"));
        assert_eq!((rows[1].depth, rows[1].name.as_str()), (1, "lib.rs"));
    }
}
