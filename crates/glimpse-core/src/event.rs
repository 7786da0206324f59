//! Inbound events for the viewer.
//!
//! Clicks, folder picks and file-change notifications all arrive from
//! different places (the command reader, the watcher thread), but the
//! session must see them one at a time. Producers hold an [`EventSender`];
//! the single consumer drains the [`EventLoop`] and handles each event to
//! completion before taking the next.

use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::tab::FileDescriptor;

/// Capacity of the event queue.
pub(crate) const EVENT_QUEUE_CAPACITY: usize = 256;

/// Something that happened outside the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// A folder was picked
    FolderOpened(PathBuf),
    /// A file in the tree was clicked
    FileClicked(FileDescriptor),
    /// A tab label was clicked (index in the tab strip)
    TabSelected(usize),
    /// A tab's close button was clicked (index in the tab strip)
    TabClosed(usize),
    /// A watched file changed on disk
    FileChanged { path: PathBuf, content: String },
    /// The viewer is shutting down
    Quit,
}

/// Creates a connected sender/loop pair.
pub fn event_channel() -> (EventSender, EventLoop) {
    let (sender, receiver) = mpsc::channel(EVENT_QUEUE_CAPACITY);
    (EventSender { sender }, EventLoop { receiver })
}

/// Outcome of [`EventSender::try_send`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrySend {
    Queued,
    /// The queue is at capacity; the event was dropped.
    Full,
    /// The loop has shut down.
    Closed,
}

/// Producer side of the event queue.
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<ViewerEvent>,
}

impl EventSender {
    /// Queues an event from async code.
    ///
    /// Returns false once the loop has shut down.
    pub async fn send(&self, event: ViewerEvent) -> bool {
        self.sender.send(event).await.is_ok()
    }

    /// Queues an event without waiting for room.
    ///
    /// Callable from any thread, including callbacks that run under a lock
    /// the consumer may also need.
    pub fn try_send(&self, event: ViewerEvent) -> TrySend {
        match self.sender.try_send(event) {
            Ok(()) => TrySend::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => TrySend::Full,
            Err(mpsc::error::TrySendError::Closed(_)) => TrySend::Closed,
        }
    }
}

/// Consumer side of the event queue.
pub struct EventLoop {
    receiver: mpsc::Receiver<ViewerEvent>,
}

impl EventLoop {
    /// Waits for the next event.
    ///
    /// Returns `None` once every sender is gone.
    pub async fn next(&mut self) -> Option<ViewerEvent> {
        self.receiver.recv().await
    }

    /// Returns the next event if one is already queued.
    pub fn try_next(&mut self) -> Option<ViewerEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                tracing::debug!("Event queue disconnected");
                None
            }
        }
    }
}
