//! Line-based commands read from stdin.
//!
//! ```text
//! folder <dir>    open a folder (replaces every open tab)
//! open <file>     open a file in a tab
//! tab <n>         activate the n-th tab (1-based)
//! close <n>       close the n-th tab (1-based)
//! quit            exit
//! ```

use glimpse_core::{EventSender, FileDescriptor, ViewerEvent};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Errors in a typed command.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a tab number")]
    BadIndex(String),
}

/// Parses one command line. Blank lines yield `None`.
///
/// Relative paths are resolved against `cwd`.
pub fn parse_command(line: &str, cwd: &Path) -> Result<Option<ViewerEvent>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (cmd, arg) = match line.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd, arg.trim()),
        None => (line, ""),
    };

    let event = match cmd {
        "folder" => ViewerEvent::FolderOpened(resolve(Path::new(require(arg, "folder")?), cwd)),
        "open" => ViewerEvent::FileClicked(FileDescriptor::from_path(resolve(
            Path::new(require(arg, "open")?),
            cwd,
        ))),
        "tab" => ViewerEvent::TabSelected(tab_index(require(arg, "tab")?)?),
        "close" => ViewerEvent::TabClosed(tab_index(require(arg, "close")?)?),
        "quit" | "exit" => ViewerEvent::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(event))
}

fn require<'a>(arg: &'a str, cmd: &'static str) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(cmd))
    } else {
        Ok(arg)
    }
}

/// Joins relative paths onto `cwd`.
pub fn resolve(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn tab_index(arg: &str) -> Result<usize, CommandError> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::BadIndex(arg.to_string())),
    }
}

/// Forwards stdin commands to the event loop until end of input.
pub async fn read_commands(events: EventSender, cwd: PathBuf) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match parse_command(&line, &cwd) {
                Ok(Some(event)) => {
                    if !events.send(event).await {
                        return;
                    }
                }
                Ok(None) => {}
                Err(err) => eprintln!("{err}"),
            },
            Ok(None) => {
                tracing::debug!("Command input closed");
                return;
            }
            Err(err) => {
                tracing::warn!("Failed to read command: {}", err);
                return;
            }
        }
    }
}
