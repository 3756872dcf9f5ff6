// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared instrumentation for the pulls a merge issues.
//!
//! Sources built with a probe report the start and end of every pull, which
//! lets tests check how the engine schedules pulls, not just what it emits.

use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct ProbeState {
    pulls: Vec<usize>,
    finished: Vec<bool>,
    log: Vec<usize>,
    in_flight: usize,
    max_in_flight: usize,
    max_in_flight_after_bootstrap: usize,
    pulls_after_exhaustion: usize,
}

impl ProbeState {
    fn ensure(&mut self, source: usize) {
        if self.pulls.len() <= source {
            self.pulls.resize(source + 1, 0);
            self.finished.resize(source + 1, false);
        }
    }
}

/// Cloneable handle; all clones observe the same pulls.
#[derive(Debug, Clone, Default)]
pub struct PullProbe {
    state: Arc<Mutex<ProbeState>>,
}

impl PullProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by a source when a pull begins.
    pub fn pull_started(&self, source: usize) {
        let mut state = self.state.lock();
        state.ensure(source);

        if state.finished[source] {
            state.pulls_after_exhaustion += 1;
        }
        state.pulls[source] += 1;
        state.log.push(source);

        state.in_flight += 1;
        state.max_in_flight = state.max_in_flight.max(state.in_flight);
        if state.pulls[source] > 1 {
            state.max_in_flight_after_bootstrap =
                state.max_in_flight_after_bootstrap.max(state.in_flight);
        }
    }

    /// Called by a source when a pull resolves; `exhausted` when it
    /// answered "no more records".
    pub fn pull_finished(&self, source: usize, exhausted: bool) {
        let mut state = self.state.lock();
        state.ensure(source);
        state.in_flight = state.in_flight.saturating_sub(1);
        if exhausted {
            state.finished[source] = true;
        }
    }

    /// Pulls issued to `source` so far.
    pub fn pulls(&self, source: usize) -> usize {
        self.state.lock().pulls.get(source).copied().unwrap_or(0)
    }

    pub fn total_pulls(&self) -> usize {
        self.state.lock().pulls.iter().sum()
    }

    /// Source index of every pull, in the order the pulls started.
    pub fn pull_log(&self) -> Vec<usize> {
        self.state.lock().log.clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.lock().max_in_flight
    }

    /// Highest number of concurrent pulls seen while a source was being
    /// pulled for the second time or later.
    pub fn max_in_flight_after_bootstrap(&self) -> usize {
        self.state.lock().max_in_flight_after_bootstrap
    }

    pub fn pulls_after_exhaustion(&self) -> usize {
        self.state.lock().pulls_after_exhaustion
    }
}
