// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logweave_core::{HasTimestamp, MergeError, Result};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// The next not-yet-emitted record of one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<R> {
    pub record: R,
    /// Index of the source the record was pulled from
    pub source: usize,
}

impl<R> Candidate<R> {
    pub const fn new(record: R, source: usize) -> Self {
        Self { record, source }
    }
}

/// Heap entry ordered by `(timestamp, source)` only; the payload never
/// takes part in comparisons.
#[derive(Debug)]
struct Keyed<R: HasTimestamp> {
    key: (R::Timestamp, usize),
    candidate: Candidate<R>,
}

impl<R: HasTimestamp> Keyed<R> {
    fn new(candidate: Candidate<R>) -> Self {
        Self {
            key: (candidate.record.timestamp(), candidate.source),
            candidate,
        }
    }
}

impl<R: HasTimestamp> PartialEq for Keyed<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<R: HasTimestamp> Eq for Keyed<R> {}

impl<R: HasTimestamp> PartialOrd for Keyed<R> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<R: HasTimestamp> Ord for Keyed<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-priority queue of candidates, one per still-active source.
///
/// Candidates come out in ascending timestamp order. When two candidates
/// carry the same timestamp, the one from the lower source index comes out
/// first, so ties resolve the same way on every run.
///
/// # Examples
///
/// ```
/// use logweave_core::LogEntry;
/// use logweave_merge::{Candidate, FrontierQueue};
///
/// let mut queue = FrontierQueue::new();
/// queue.insert(Candidate::new(LogEntry::at(9), 0));
/// queue.insert(Candidate::new(LogEntry::at(4), 1));
///
/// assert_eq!(queue.peek_min().unwrap().source, 1);
/// assert_eq!(queue.extract_min().unwrap().record.date(), 4);
/// assert_eq!(queue.len(), 1);
/// ```
#[derive(Debug)]
pub struct FrontierQueue<R: HasTimestamp> {
    heap: BinaryHeap<Reverse<Keyed<R>>>,
}

impl<R: HasTimestamp> FrontierQueue<R> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    #[must_use]
    pub fn with_capacity(sources: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(sources),
        }
    }

    /// Builds the initial frontier from the first pull of every source.
    ///
    /// `initial` yields `(source index, first record)`; sources that were
    /// empty from the start report `None` and never enter the queue. Entries
    /// naming an index outside `0..source_count`, or naming an index a second
    /// time, are a source contract violation and are left out, which the
    /// final size check then reports.
    ///
    /// # Errors
    /// Returns [`MergeError::InvalidFrontier`] when the queue does not hold
    /// exactly one candidate per source that yielded a record.
    pub fn bootstrap<I>(source_count: usize, initial: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Option<R>)>,
    {
        let mut seen = vec![false; source_count];
        let mut yielded = 0;

        let candidates = initial
            .into_iter()
            .filter_map(|(source, first)| {
                let record = first?;
                yielded += 1;
                match seen.get_mut(source) {
                    Some(slot) if !*slot => {
                        *slot = true;
                        Some(Reverse(Keyed::new(Candidate::new(record, source))))
                    }
                    _ => None,
                }
            })
            .collect::<Vec<_>>();

        // heapify in O(m)
        let heap = BinaryHeap::from(candidates);

        if heap.len() != yielded {
            return Err(MergeError::invalid_frontier(yielded, heap.len()));
        }

        Ok(Self { heap })
    }

    pub fn insert(&mut self, candidate: Candidate<R>) {
        self.heap.push(Reverse(Keyed::new(candidate)));
    }

    /// Returns the candidate with the smallest timestamp without removing it.
    ///
    /// # Errors
    /// Returns [`MergeError::EmptyQueue`] if the queue is empty.
    pub fn peek_min(&self) -> Result<&Candidate<R>> {
        self.heap
            .peek()
            .map(|Reverse(keyed)| &keyed.candidate)
            .ok_or(MergeError::EmptyQueue)
    }

    /// Removes and returns the candidate with the smallest timestamp.
    ///
    /// # Errors
    /// Returns [`MergeError::EmptyQueue`] if the queue is empty.
    pub fn extract_min(&mut self) -> Result<Candidate<R>> {
        self.heap
            .pop()
            .map(|Reverse(keyed)| keyed.candidate)
            .ok_or(MergeError::EmptyQueue)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<R: HasTimestamp> Default for FrontierQueue<R> {
    fn default() -> Self {
        Self::new()
    }
}
