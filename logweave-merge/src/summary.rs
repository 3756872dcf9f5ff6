// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// What a successful merge did.
///
/// On success every source has been pulled until it reported exhaustion, so
/// `pulls == emitted + sources` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Number of sources passed in
    pub sources: usize,
    /// Sources that had no record at all
    pub empty_sources: usize,
    /// Records handed to the sink
    pub emitted: usize,
    /// Pull calls issued across all sources
    pub pulls: usize,
}

/// Per-source lifecycle. `Active -> Exhausted` is permanent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceState {
    Active,
    Exhausted,
}

/// Bookkeeping shared by both engines for one merge call.
#[derive(Debug)]
pub(crate) struct DrainState {
    states: Vec<SourceState>,
    summary: MergeSummary,
}

impl DrainState {
    pub(crate) fn new(sources: usize) -> Self {
        Self {
            states: vec![SourceState::Active; sources],
            summary: MergeSummary {
                sources,
                ..MergeSummary::default()
            },
        }
    }

    /// Records the outcome of the bootstrap pulls.
    pub(crate) fn bootstrapped<R>(&mut self, initial: &[(usize, Option<R>)]) {
        self.summary.pulls += initial.len();
        for (source, first) in initial {
            if first.is_none() {
                self.summary.empty_sources += 1;
                self.states[*source] = SourceState::Exhausted;
            }
        }
    }

    /// Must be called right before every post-bootstrap pull.
    pub(crate) fn pulling(&mut self, source: usize) {
        debug_assert_eq!(
            self.states[source],
            SourceState::Active,
            "source {source} pulled after exhaustion"
        );
        self.summary.pulls += 1;
    }

    pub(crate) fn emitted(&mut self) {
        self.summary.emitted += 1;
    }

    pub(crate) fn exhaust(&mut self, source: usize) {
        self.states[source] = SourceState::Exhausted;
    }

    pub(crate) fn active(&self) -> usize {
        self.states
            .iter()
            .filter(|state| **state == SourceState::Active)
            .count()
    }

    pub(crate) fn finish(self) -> MergeSummary {
        self.summary
    }
}
