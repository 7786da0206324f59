//! Display sink that renders each frame into a standalone HTML page.

use glimpse_core::view::{TreeRow, tree_rows};
use glimpse_core::{Body, DisplaySink, FileNode, Frame, NodeKind};
use glimpse_syntax::{escape_html, language_tag};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

const STYLE: &str = r#"
body { margin: 0; display: flex; height: 100vh; background: #1e1e1e; color: #d4d4d4;
       font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; font-size: 13px; }
#sidebar { width: 240px; overflow: auto; background: #252526; padding: 8px 0; }
#project { padding: 4px 12px; font-weight: bold; color: #bbbbbb; }
.tree-item { white-space: nowrap; padding: 2px 0; }
.tree-item.directory { color: #dcb67a; }
.tree-icon { display: inline-block; width: 18px; }
#main { flex: 1; display: flex; flex-direction: column; min-width: 0; }
#tabs { display: flex; background: #2d2d2d; }
.tab { padding: 6px 14px; color: #969696; border-right: 1px solid #1e1e1e; }
.tab.active { background: #1e1e1e; color: #ffffff; }
#code { flex: 1; display: flex; overflow: auto; font-family: Menlo, Consolas, monospace; }
#lines { padding: 8px; text-align: right; color: #858585; user-select: none; }
#content { margin: 0; padding: 8px; white-space: pre; }
#welcome { flex: 1; display: flex; align-items: center; justify-content: center; color: #6d6d6d; }
#status { display: flex; justify-content: space-between; padding: 2px 10px;
          background: #007acc; color: #ffffff; }
.keyword { color: #569cd6; }
.string { color: #ce9178; }
.comment { color: #6a9955; }
.number { color: #b5cea8; }
"#;

/// Rewrites one HTML file on every render.
pub struct HtmlSnapshotSink {
    output: PathBuf,
    title: String,
    project: String,
    tree: Vec<TreeRow>,
}

impl HtmlSnapshotSink {
    pub fn new(output: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            title: title.into(),
            project: String::new(),
            tree: Vec::new(),
        }
    }

    /// Returns the page path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Builds the page for a frame.
    pub fn page(&self, frame: &Frame) -> String {
        let mut html = String::with_capacity(4096);
        let _ = write!(
            html,
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title><style>{}</style></head><body>",
            escape_html(&self.title),
            STYLE
        );

        html.push_str("<div id=\"sidebar\">");
        let _ = write!(html, "<div id=\"project\">{}</div>", escape_html(&self.project));
        for row in &self.tree {
            let (class, glyph) = match row.kind {
                NodeKind::Directory => ("directory", "&#128193;"),
                NodeKind::File => ("file", "&#9632;"),
            };
            let _ = write!(
                html,
                "<div class=\"tree-item {}\" style=\"padding-left: {}px\" title=\"{}\">\
                 <span class=\"tree-icon\" style=\"color: {}\">{}</span>{}</div>",
                class,
                12 + row.depth * 16,
                escape_attr(&row.path.display().to_string()),
                icon_color(row),
                glyph,
                escape_html(&row.name)
            );
        }
        html.push_str("</div><div id=\"main\"><div id=\"tabs\">");

        for tab in &frame.tabs {
            let _ = write!(
                html,
                "<div class=\"tab{}\">{}</div>",
                if tab.active { " active" } else { "" },
                escape_html(&tab.name)
            );
        }
        html.push_str("</div>");

        match &frame.body {
            Body::Empty => {
                html.push_str("<div id=\"welcome\">Open a folder and pick a file to view it</div>");
            }
            Body::Code(code) => {
                html.push_str("<div id=\"code\"><div id=\"lines\">");
                for line in 1..=code.line_count {
                    let _ = write!(html, "<div>{line}</div>");
                }
                let _ = write!(html, "</div><pre id=\"content\">{}</pre></div>", code.html);
            }
        }

        let _ = write!(
            html,
            "<div id=\"status\"><span>{}</span><span>{}</span></div></div></body></html>\n",
            escape_html(&frame.status.file),
            escape_html(&frame.status.lines)
        );
        html
    }

    /// One-line summary for the terminal.
    fn summary(frame: &Frame) -> String {
        if frame.is_empty() {
            return "(no file open)".to_string();
        }
        let tabs: Vec<String> = frame
            .tabs
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if t.active {
                    format!("[{}:{}]", i + 1, t.name)
                } else {
                    format!("{}:{}", i + 1, t.name)
                }
            })
            .collect();
        format!("{} | {} | {}", tabs.join(" "), frame.status.file, frame.status.lines)
    }
}

/// Escapes text for use inside a double-quoted attribute.
fn escape_attr(text: &str) -> String {
    escape_html(text).replace('"', "&quot;")
}

/// Tree icon colour: folders share one colour, files are coloured by extension.
fn icon_color(row: &TreeRow) -> &'static str {
    if row.kind == NodeKind::Directory {
        return "#dcb67a";
    }
    match language_tag(&row.name).as_str() {
        "js" | "json" => "#f7df1e",
        "ts" | "tsx" => "#3178c6",
        "jsx" => "#61dafb",
        "html" | "xml" => "#e34c26",
        "css" => "#264de4",
        "scss" => "#cc6699",
        "md" => "#083fa1",
        "py" => "#3776ab",
        "rb" => "#cc342d",
        "go" => "#00add8",
        "rs" => "#dea584",
        "java" => "#b07219",
        "c" | "h" => "#555555",
        "cpp" => "#f34b7d",
        "vue" => "#4fc08d",
        "svelte" => "#ff3e00",
        "yml" | "yaml" => "#cb171e",
        "sh" | "bash" => "#89e051",
        "sql" => "#e38c00",
        _ => "#6d8086",
    }
}

impl DisplaySink for HtmlSnapshotSink {
    fn show_tree(&mut self, folder: &Path, tree: &[FileNode]) {
        self.project = folder
            .file_name()
            .map(|n| n.to_string_lossy().to_uppercase())
            .unwrap_or_else(|| folder.display().to_string());
        self.tree = tree_rows(tree);
        println!("Opened {} ({} entries)", folder.display(), self.tree.len());
    }

    fn show_frame(&mut self, frame: &Frame) {
        if let Err(err) = std::fs::write(&self.output, self.page(frame)) {
            tracing::error!("Failed to write {}: {}", self.output.display(), err);
            return;
        }
        println!("{}", Self::summary(frame));
    }
}
