// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::stream;
use logweave_core::{
    AsyncSource, HasTimestamp, IterSource, LogEntry, MergeError, Source, StreamSource,
    TryStreamSource,
};

#[test]
fn test_iter_source_yields_then_exhausts() -> anyhow::Result<()> {
    // Arrange
    let mut source = IterSource::new(vec![LogEntry::new(1, "a"), LogEntry::new(4, "b")]);

    // Act & Assert
    assert_eq!(source.pull()?, Some(LogEntry::new(1, "a")));
    assert_eq!(source.pull()?, Some(LogEntry::new(4, "b")));
    assert_eq!(source.pull()?, None);
    assert_eq!(source.pull()?, None);
    Ok(())
}

#[test]
fn test_boxed_dyn_source() -> anyhow::Result<()> {
    let mut sources: Vec<Box<dyn Source<Item = LogEntry>>> = vec![
        Box::new(IterSource::new(vec![LogEntry::at(7)])),
        Box::new(IterSource::new(Vec::<LogEntry>::new())),
    ];

    assert_eq!(sources[0].pull()?.map(|e| e.timestamp()), Some(7));
    assert_eq!(sources[1].pull()?, None);
    Ok(())
}

#[tokio::test]
async fn test_stream_source_ends_with_stream() -> anyhow::Result<()> {
    // Arrange
    let mut source = StreamSource::new(stream::iter(vec![LogEntry::at(2), LogEntry::at(3)]));

    // Act & Assert
    assert_eq!(source.pull().await?, Some(LogEntry::at(2)));
    assert_eq!(source.pull().await?, Some(LogEntry::at(3)));
    assert_eq!(source.pull().await?, None);
    Ok(())
}

#[tokio::test]
async fn test_try_stream_source_surfaces_errors() {
    // Arrange
    let items = vec![
        Ok(LogEntry::at(1)),
        Err(MergeError::source_failed("socket closed")),
    ];
    let mut source = TryStreamSource::new(stream::iter(items));

    // Act
    let first = source.pull().await;
    let second = source.pull().await;

    // Assert
    assert_eq!(first.unwrap(), Some(LogEntry::at(1)));
    assert!(matches!(second, Err(MergeError::SourceFailed { .. })));
}

#[tokio::test]
async fn test_boxed_dyn_async_source() -> anyhow::Result<()> {
    let mut source: Box<dyn AsyncSource<Item = LogEntry>> =
        Box::new(StreamSource::new(stream::iter(vec![LogEntry::at(9)])));

    assert_eq!(source.pull().await?, Some(LogEntry::at(9)));
    assert_eq!(source.pull().await?, None);
    Ok(())
}
