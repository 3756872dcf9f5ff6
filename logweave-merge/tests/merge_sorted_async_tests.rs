// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logweave_core::{AsyncSource, LogEntry, MergeError};
use logweave_merge::{merge_sorted_async, MergeSortedAsyncExt};
use logweave_test_utils::{channel_source, entry, PullProbe, RecordingSink, ScriptedAsyncSource};
use std::time::Duration;
use tokio::time::sleep;

type DynSource = Box<dyn AsyncSource<Item = LogEntry>>;

const fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn test_single_source_passes_through() -> anyhow::Result<()> {
    // Arrange
    let sources = vec![ScriptedAsyncSource::from_dates(&[1, 4, 9]).with_latency(ms(3))];
    let mut sink = RecordingSink::new();

    // Act
    merge_sorted_async(sources, &mut sink).await?;

    // Assert
    assert_eq!(sink.dates(), vec![1, 4, 9]);
    assert_eq!(sink.completions(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_order_is_independent_of_pull_latency() -> anyhow::Result<()> {
    // Arrange: source 1 answers its bootstrap pull long before source 0
    let probe = PullProbe::new();
    let sources = vec![
        ScriptedAsyncSource::from_dates(&[1, 5])
            .with_latencies(vec![ms(50), ms(1)])
            .probed(&probe, 0),
        ScriptedAsyncSource::from_dates(&[2, 3])
            .with_latency(ms(1))
            .probed(&probe, 1),
    ];
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(sources, &mut sink).await?;

    // Assert
    assert_eq!(sink.dates(), vec![1, 2, 3, 5]);
    assert_eq!(sink.completions(), 1);
    assert_eq!(probe.pull_log(), vec![0, 1, 0, 1, 1, 0]);
    assert_eq!(summary.emitted, 4);
    assert_eq!(summary.pulls, 6);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_source_empty_from_start_is_pulled_once() -> anyhow::Result<()> {
    // Arrange
    let probe = PullProbe::new();
    let sources = vec![
        ScriptedAsyncSource::from_dates(&[5]).probed(&probe, 0),
        ScriptedAsyncSource::from_dates(&[])
            .with_latency(ms(10))
            .probed(&probe, 1),
        ScriptedAsyncSource::from_dates(&[1, 2]).probed(&probe, 2),
    ];
    let mut sink = RecordingSink::new();

    // Act
    let summary = merge_sorted_async(sources, &mut sink).await?;

    // Assert
    assert_eq!(sink.dates(), vec![1, 2, 5]);
    assert_eq!(probe.pulls(1), 1);
    assert_eq!(summary.empty_sources, 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_one_pull_in_flight_after_bootstrap() -> anyhow::Result<()> {
    // Arrange
    let probe = PullProbe::new();
    let sources = (0..4u64)
        .map(|index| {
            let dates: Vec<u64> = (0..5).map(|n| n * 4 + index).collect();
            ScriptedAsyncSource::from_dates(&dates)
                .with_latency(ms(4 - index))
                .probed(&probe, index as usize)
        })
        .collect();
    let mut sink = RecordingSink::new();

    // Act
    merge_sorted_async(sources, &mut sink).await?;

    // Assert
    assert_eq!(sink.dates(), (0..20).collect::<Vec<u64>>());
    assert_eq!(probe.max_in_flight(), 4);
    assert_eq!(probe.max_in_flight_after_bootstrap(), 1);
    assert_eq!(probe.pulls_after_exhaustion(), 0);
    Ok(())
}

#[tokio::test]
async fn test_bootstrap_waits_for_every_source() -> anyhow::Result<()> {
    // Arrange
    let (feed, slow) = channel_source();
    let sources: Vec<DynSource> = vec![
        Box::new(ScriptedAsyncSource::from_dates(&[1, 2])),
        Box::new(slow),
    ];
    let handle = RecordingSink::new();
    let mut sink = handle.clone();

    // Act
    let merge = tokio::spawn(async move { merge_sorted_async(sources, &mut sink).await });
    sleep(ms(20)).await;

    // Assert: nothing is emitted while one bootstrap pull is pending
    assert!(handle.records().is_empty());

    feed.push(entry(3));
    feed.close();
    merge.await??;

    assert_eq!(handle.dates(), vec![1, 2, 3]);
    assert_eq!(handle.completions(), 1);
    Ok(())
}

#[tokio::test]
async fn test_force_failed_bootstrap_pull_aborts_merge() {
    // Arrange
    let (feed, stuck) = channel_source();
    let sources: Vec<DynSource> = vec![
        Box::new(ScriptedAsyncSource::from_dates(&[1, 2])),
        Box::new(stuck),
    ];
    let mut sink = RecordingSink::new();

    tokio::spawn(async move {
        sleep(ms(10)).await;
        feed.fail("gave up waiting");
    });

    // Act
    let result = merge_sorted_async(sources, &mut sink).await;

    // Assert
    assert!(matches!(result, Err(MergeError::SourceFailed { .. })));
    assert!(sink.records().is_empty());
    assert_eq!(sink.completions(), 0);
}

#[tokio::test]
async fn test_bootstrap_failure_does_not_wait_for_pending_pulls() {
    // Arrange: the channel source is never fed, so only a short-circuit
    // can finish this merge
    let (_feed, never) = channel_source();
    let sources: Vec<DynSource> = vec![
        Box::new(never),
        Box::new(ScriptedAsyncSource::from_dates(&[1]).fail_at(0)),
    ];
    let mut sink = RecordingSink::new();

    // Act
    let result = tokio::time::timeout(ms(500), merge_sorted_async(sources, &mut sink)).await;

    // Assert
    assert!(matches!(result, Ok(Err(MergeError::SourceFailed { .. }))));
    assert_eq!(sink.completions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_failure_mid_drain_leaves_ordered_prefix() {
    // Arrange
    let sources = vec![
        ScriptedAsyncSource::from_dates(&[1, 9]).fail_at(1),
        ScriptedAsyncSource::from_dates(&[2, 3]).with_latency(ms(2)),
    ];
    let mut sink = RecordingSink::new();

    // Act
    let result = merge_sorted_async(sources, &mut sink).await;

    // Assert
    assert!(matches!(result, Err(MergeError::SourceFailed { .. })));
    assert_eq!(sink.dates(), vec![1]);
    assert_eq!(sink.completions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sink_failure_aborts_merge() {
    let sources = vec![
        ScriptedAsyncSource::from_dates(&[1, 3]),
        ScriptedAsyncSource::from_dates(&[2, 4]),
    ];
    let mut sink = RecordingSink::new().fail_emit_at(1);

    let result = merge_sorted_async(sources, &mut sink).await;

    assert!(matches!(result, Err(MergeError::SinkFailed { .. })));
    assert_eq!(sink.dates(), vec![1]);
    assert_eq!(sink.completions(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_ties_resolve_to_lowest_source_index() -> anyhow::Result<()> {
    // Arrange: the higher index answers first, yet still loses the tie
    let sources = vec![
        ScriptedAsyncSource::new(vec![LogEntry::new(5, "first")]).with_latency(ms(30)),
        ScriptedAsyncSource::new(vec![LogEntry::new(5, "second")]).with_latency(ms(1)),
    ];
    let mut sink = RecordingSink::new();

    // Act
    sources.merge_sorted_async_into(&mut sink).await?;

    // Assert
    let msgs: Vec<String> = sink.records().into_iter().map(LogEntry::into_msg).collect();
    assert_eq!(msgs, vec!["first", "second"]);
    Ok(())
}

#[tokio::test]
async fn test_no_sources_completes_immediately() -> anyhow::Result<()> {
    let mut sink = RecordingSink::new();

    let summary = merge_sorted_async(Vec::<DynSource>::new(), &mut sink).await?;

    assert_eq!(summary.sources, 0);
    assert!(sink.records().is_empty());
    assert_eq!(sink.completions(), 1);
    Ok(())
}
