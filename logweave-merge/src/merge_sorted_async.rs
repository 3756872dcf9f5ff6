// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::frontier::{Candidate, FrontierQueue};
use crate::summary::{DrainState, MergeSummary};
use async_trait::async_trait;
use futures::future::try_join_all;
use futures::TryFutureExt;
use logweave_core::{AsyncSource, Result, Sink};

/// Merges suspending sources into `sink` in non-decreasing timestamp order.
///
/// # Concurrency
///
/// The first pull of every source is issued at once and the merge waits for
/// all of them before building the frontier. The first bootstrap pull to fail
/// aborts the merge and drops the others.
///
/// After bootstrap exactly one pull is outstanding at any time: the one for
/// the source whose record was just emitted. The frontier is only touched
/// once that pull has resolved, so the output depends on timestamps alone and
/// never on which source happens to answer first.
///
/// No timeout is applied. A pull that never resolves stalls the merge; wrap
/// the source, or the returned future, to bound it.
///
/// # Errors
///
/// Same as [`merge_sorted`](crate::merge_sorted).
///
/// # Examples
///
/// ```
/// use futures::stream;
/// use logweave_core::{LogEntry, StreamSource};
/// use logweave_merge::merge_sorted_async;
///
/// # #[tokio::main]
/// # async fn main() {
/// let sources = vec![
///     StreamSource::new(stream::iter(vec![LogEntry::at(1), LogEntry::at(5)])),
///     StreamSource::new(stream::iter(vec![LogEntry::at(2), LogEntry::at(3)])),
/// ];
///
/// let mut out = Vec::new();
/// merge_sorted_async(sources, &mut out).await.unwrap();
///
/// let dates: Vec<_> = out.iter().map(LogEntry::date).collect();
/// assert_eq!(dates, vec![1, 2, 3, 5]);
/// # }
/// ```
pub async fn merge_sorted_async<S, K>(mut sources: Vec<S>, sink: &mut K) -> Result<MergeSummary>
where
    S: AsyncSource,
    K: Sink<S::Item> + ?Sized,
{
    let count = sources.len();
    let mut state = DrainState::new(count);

    let pulls = sources.iter_mut().enumerate().map(|(index, source)| {
        source
            .pull()
            .map_ok(move |first| (index, first))
            .inspect_err(move |err| {
                warn!("bootstrap pull from source {} failed: {}", index, err);
            })
    });
    let initial = try_join_all(pulls).await?;
    state.bootstrapped(&initial);

    let mut frontier = FrontierQueue::bootstrap(count, initial).inspect_err(|err| {
        error!("{}", err);
    })?;
    debug!(
        "frontier ready: {} of {} sources active",
        frontier.len(),
        count
    );

    while !frontier.is_empty() {
        let Candidate { record, source } = frontier.extract_min()?;
        trace!("emitting record from source {}", source);
        sink.emit(record)?;
        state.emitted();

        state.pulling(source);
        let next = sources[source].pull().await.inspect_err(|err| {
            warn!("pull from source {} failed: {}", source, err);
        })?;

        match next {
            Some(record) => frontier.insert(Candidate::new(record, source)),
            None => {
                state.exhaust(source);
                debug!(
                    "source {} exhausted, {} still active",
                    source,
                    state.active()
                );
            }
        }
    }

    sink.complete()?;
    let summary = state.finish();
    debug!(
        "merge complete: {} records from {} sources",
        summary.emitted, summary.sources
    );
    Ok(summary)
}

/// Extension trait for merging a vector of suspending sources.
#[async_trait]
pub trait MergeSortedAsyncExt: Sized + Send {
    type Item: Send;

    /// Merges the sources into `sink` in timestamp order.
    /// See [`merge_sorted_async`].
    ///
    /// # Errors
    /// Same as [`merge_sorted_async`].
    async fn merge_sorted_async_into<K>(self, sink: &mut K) -> Result<MergeSummary>
    where
        K: Sink<Self::Item> + Send + ?Sized;
}

#[async_trait]
impl<S> MergeSortedAsyncExt for Vec<S>
where
    S: AsyncSource,
{
    type Item = S::Item;

    async fn merge_sorted_async_into<K>(self, sink: &mut K) -> Result<MergeSummary>
    where
        K: Sink<Self::Item> + Send + ?Sized,
    {
        merge_sorted_async(self, sink).await
    }
}
