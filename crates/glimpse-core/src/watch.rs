//! Watching open files for external modification.
//!
//! The session only talks to the [`FileWatcher`] trait. [`PollingWatcher`]
//! implements it on top of `notify`'s polling backend and turns genuine
//! modification-time changes into [`ViewerEvent::FileChanged`] events.
//!
//! Subscriptions are keyed by the path string exactly as given, matching how
//! the session identifies tabs: `/p/a.rs` and `/p/./a.rs` are two
//! subscriptions even though `notify` polls the file once.

use notify::{EventKind, PollWatcher, RecursiveMode, Watcher};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, SystemTime};

use crate::event::{EventSender, TrySend, ViewerEvent};
use crate::{CoreError, CoreResult};

/// Subscribes to change notifications for individual files.
///
/// Implementations keep at most one subscription per path. Unwatching a
/// path that is not watched is a no-op.
pub trait FileWatcher {
    fn watch(&mut self, path: &Path) -> CoreResult<()>;
    fn unwatch(&mut self, path: &Path);
}

/// `None` watches nothing, for running with live reload turned off.
impl<W: FileWatcher> FileWatcher for Option<W> {
    fn watch(&mut self, path: &Path) -> CoreResult<()> {
        match self {
            Some(watcher) => watcher.watch(path),
            None => Ok(()),
        }
    }

    fn unwatch(&mut self, path: &Path) {
        if let Some(watcher) = self {
            watcher.unwatch(path);
        }
    }
}

/// Last seen modification time per watched path string.
type Subscriptions = Arc<Mutex<HashMap<OsString, Option<SystemTime>>>>;

/// Polls watched files and reports content changes on the event queue.
pub struct PollingWatcher {
    watcher: PollWatcher,
    subscriptions: Subscriptions,
}

impl PollingWatcher {
    /// Starts a watcher that polls every `interval`.
    pub fn new(events: EventSender, interval: Duration) -> CoreResult<Self> {
        let subscriptions: Subscriptions = Arc::new(Mutex::new(HashMap::new()));
        let subs = Arc::clone(&subscriptions);

        let watcher = PollWatcher::new(
            move |res: Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    if !matches!(
                        event.kind,
                        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Any
                    ) {
                        return;
                    }
                    for path in &event.paths {
                        report_change(&subs, &events, path);
                    }
                }
                Err(err) => tracing::warn!("Watch error: {}", err),
            },
            notify::Config::default().with_poll_interval(interval),
        )?;

        Ok(Self {
            watcher,
            subscriptions,
        })
    }

    /// Returns the currently watched paths.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        lock(&self.subscriptions).keys().map(PathBuf::from).collect()
    }
}

impl FileWatcher for PollingWatcher {
    fn watch(&mut self, path: &Path) -> CoreResult<()> {
        if lock(&self.subscriptions).contains_key(path.as_os_str()) {
            tracing::debug!("Already watching {}", path.display());
            return Ok(());
        }

        self.watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|err| CoreError::Watch {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;

        lock(&self.subscriptions).insert(path.as_os_str().to_owned(), modified_time(path));
        tracing::debug!("Watching {}", path.display());
        Ok(())
    }

    fn unwatch(&mut self, path: &Path) {
        if lock(&self.subscriptions).remove(path.as_os_str()).is_none() {
            return;
        }
        tracing::debug!("Stopped watching {}", path.display());

        // Another spelling of the same file still needs the notify watch.
        if lock(&self.subscriptions)
            .keys()
            .any(|key| Path::new(key) == path)
        {
            return;
        }
        if let Err(err) = self.watcher.unwatch(path) {
            tracing::warn!("Failed to unwatch {}: {}", path.display(), err);
        }
    }
}

fn lock(subs: &Subscriptions) -> MutexGuard<'_, HashMap<OsString, Option<SystemTime>>> {
    subs.lock().unwrap_or_else(PoisonError::into_inner)
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// A detected modification of one subscription.
#[derive(Debug, PartialEq, Eq)]
struct Change {
    path: PathBuf,
    previous: Option<SystemTime>,
    content: String,
}

/// Queues a change event for every subscription of `path` that saw a new
/// modification time.
///
/// Runs on notify's poll thread, which holds notify's watch lock while the
/// handler executes. `watch`/`unwatch` need that lock too, so this must never
/// wait for room on the queue. A change that does not fit is rolled back and
/// picked up again by the next poll.
fn report_change(subs: &Subscriptions, events: &EventSender, path: &Path) {
    for change in detect_changes(subs, path) {
        let event = ViewerEvent::FileChanged {
            path: change.path.clone(),
            content: change.content,
        };
        match events.try_send(event) {
            TrySend::Queued => tracing::debug!("{} changed on disk", change.path.display()),
            TrySend::Full => {
                tracing::warn!(
                    "Event queue full, retrying {} on next poll",
                    change.path.display()
                );
                if let Some(seen) = lock(subs).get_mut(change.path.as_os_str()) {
                    *seen = change.previous;
                }
            }
            TrySend::Closed => tracing::debug!("Event loop closed, dropping change"),
        }
    }
}

/// Marks every subscription of `path` with a stale modification time as
/// seen, and returns the new content for each of them.
fn detect_changes(subs: &Subscriptions, path: &Path) -> Vec<Change> {
    let Some(modified) = modified_time(path) else {
        return Vec::new();
    };

    let stale: Vec<(OsString, Option<SystemTime>)> = lock(subs)
        .iter_mut()
        .filter(|(key, seen)| Path::new(key.as_os_str()) == path && **seen != Some(modified))
        .map(|(key, seen)| (key.clone(), std::mem::replace(seen, Some(modified))))
        .collect();
    if stale.is_empty() {
        return Vec::new();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => stale
            .into_iter()
            .map(|(key, previous)| Change {
                path: PathBuf::from(key),
                previous,
                content: content.clone(),
            })
            .collect(),
        Err(err) => {
            tracing::warn!("Failed to reload {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

impl From<notify::Error> for CoreError {
    fn from(err: notify::Error) -> Self {
        CoreError::Io(std::io::Error::other(err.to_string()))
    }
}
