// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::frontier::{Candidate, FrontierQueue};
use crate::summary::{DrainState, MergeSummary};
use logweave_core::{Result, Sink, Source};

/// Merges blocking sources into `sink` in non-decreasing timestamp order.
///
/// Every source is pulled once up front to build the frontier. After that,
/// each step emits the smallest candidate and pulls again from the source it
/// came from only. A source that answers `None` drops out for good. When the
/// frontier runs dry, `sink.complete()` is called once.
///
/// Equal timestamps from different sources are emitted lowest source index
/// first.
///
/// # Errors
///
/// - [`MergeError::InvalidFrontier`](logweave_core::MergeError::InvalidFrontier)
///   if the bootstrap frontier is inconsistent; nothing is emitted.
/// - Any error returned by a source or the sink, unchanged. The sink keeps
///   whatever was emitted so far and `complete` is not called.
///
/// # Examples
///
/// ```
/// use logweave_core::{IterSource, LogEntry};
/// use logweave_merge::merge_sorted;
///
/// let sources = vec![
///     IterSource::new(vec![LogEntry::at(1), LogEntry::at(5)]),
///     IterSource::new(vec![LogEntry::at(2), LogEntry::at(3)]),
/// ];
///
/// let mut out = Vec::new();
/// let summary = merge_sorted(sources, &mut out).unwrap();
///
/// let dates: Vec<_> = out.iter().map(LogEntry::date).collect();
/// assert_eq!(dates, vec![1, 2, 3, 5]);
/// assert_eq!(summary.emitted, 4);
/// ```
pub fn merge_sorted<S, K>(mut sources: Vec<S>, sink: &mut K) -> Result<MergeSummary>
where
    S: Source,
    K: Sink<S::Item> + ?Sized,
{
    let count = sources.len();
    let mut state = DrainState::new(count);

    let mut initial = Vec::with_capacity(count);
    for (index, source) in sources.iter_mut().enumerate() {
        let first = source.pull().inspect_err(|err| {
            warn!("bootstrap pull from source {} failed: {}", index, err);
        })?;
        initial.push((index, first));
    }
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
        let next = sources[source].pull().inspect_err(|err| {
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

/// Extension trait for merging a vector of blocking sources.
pub trait MergeSortedExt {
    type Item;

    /// Merges the sources into `sink` in timestamp order.
    /// See [`merge_sorted`].
    ///
    /// # Errors
    /// Same as [`merge_sorted`].
    fn merge_sorted_into<K>(self, sink: &mut K) -> Result<MergeSummary>
    where
        K: Sink<Self::Item> + ?Sized;
}

impl<S> MergeSortedExt for Vec<S>
where
    S: Source,
{
    type Item = S::Item;

    fn merge_sorted_into<K>(self, sink: &mut K) -> Result<MergeSummary>
    where
        K: Sink<Self::Item> + ?Sized,
    {
        merge_sorted(self, sink)
    }
}
