// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logweave_core::{LogEntry, MergeError, Result, TryStreamSource};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// An async source fed by hand from a test.
pub type ChannelSource = TryStreamSource<UnboundedReceiverStream<Result<LogEntry>>>;

/// Sending half of a [`ChannelSource`].
///
/// Pulls on the source suspend until the feed pushes a record, fails, or is
/// dropped (which exhausts the source).
#[derive(Debug, Clone)]
pub struct ChannelFeed {
    sender: mpsc::UnboundedSender<Result<LogEntry>>,
}

impl ChannelFeed {
    /// Queues a record. Returns `false` if the source has been dropped.
    pub fn push(&self, entry: LogEntry) -> bool {
        self.sender.send(Ok(entry)).is_ok()
    }

    /// Makes the next pending pull fail with a source error.
    pub fn fail(&self, reason: &str) -> bool {
        self.sender
            .send(Err(MergeError::source_failed(reason)))
            .is_ok()
    }

    /// Ends the source once queued records have been pulled.
    pub fn close(self) {
        drop(self.sender);
    }
}

/// Creates a hand-fed async source and its feed.
///
/// ```rust
/// use logweave_core::{AsyncSource, LogEntry};
/// use logweave_test_utils::channel_source;
///
/// # async fn example() {
/// let (feed, mut source) = channel_source();
/// feed.push(LogEntry::at(3));
/// feed.close();
///
/// assert_eq!(source.pull().await.unwrap(), Some(LogEntry::at(3)));
/// assert_eq!(source.pull().await.unwrap(), None);
/// # }
/// ```
pub fn channel_source() -> (ChannelFeed, ChannelSource) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let source = TryStreamSource::new(UnboundedReceiverStream::new(receiver));
    (ChannelFeed { sender }, source)
}
