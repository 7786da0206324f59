//! # Glimpse Core
//!
//! Session state and live-reload plumbing for the viewer.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       Controller                          │
//! │   ViewerEvent ──▶ dispatch ──▶ Session ──▶ view::frame    │
//! │                                  │                        │
//! │        ┌─────────────────────────┼──────────────┐         │
//! │        ▼                         ▼              ▼         │
//! │   ┌─────────┐              ┌───────────┐  ┌───────────┐   │
//! │   │  Tabs   │              │FileWatcher│  │FileReader │   │
//! │   └─────────┘              └───────────┘  └───────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is the only owner of mutable viewer state. Every change goes
//! through one of its named operations, and the set of watched paths always
//! equals the set of open tab paths.

pub mod config;
pub mod controller;
pub mod event;
pub mod reader;
pub mod session;
pub mod tab;
pub mod tree;
pub mod view;
pub mod watch;

pub use config::Config;
pub use controller::{Controller, DisplaySink};
pub use event::{EventLoop, EventSender, TrySend, ViewerEvent, event_channel};
pub use reader::{FileReader, FsReader};
pub use session::{ChangeOutcome, CloseOutcome, Session};
pub use tab::{FileDescriptor, Tab, TabId};
pub use tree::{FileNode, NodeKind, build_tree};
pub use view::{Body, CodeView, Frame, StatusBar, TabLabel};
pub use watch::{FileWatcher, PollingWatcher};

use std::path::PathBuf;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("No tab at index {0}")]
    TabIndexOutOfRange(usize),

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to watch {}: {message}", .path.display())]
    Watch { path: PathBuf, message: String },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] glimpse_syntax::SyntaxError),
}
