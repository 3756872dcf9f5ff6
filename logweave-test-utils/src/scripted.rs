// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::fixtures::entries;
use crate::probe::PullProbe;
use async_trait::async_trait;
use logweave_core::{AsyncSource, LogEntry, MergeError, Result, Source};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::sleep;

/// Records to hand out plus the knobs shared by the sync and async sources.
#[derive(Debug, Default)]
struct Script {
    records: VecDeque<LogEntry>,
    probe: Option<(PullProbe, usize)>,
    fail_at: Option<usize>,
    pulls: usize,
}

impl Script {
    fn begin(&self) {
        if let Some((probe, index)) = &self.probe {
            probe.pull_started(*index);
        }
    }

    fn next(&mut self) -> Result<Option<LogEntry>> {
        let pull = self.pulls;
        self.pulls += 1;

        let outcome = if self.fail_at == Some(pull) {
            Err(MergeError::source_failed(format!("scripted failure on pull {pull}")))
        } else {
            Ok(self.records.pop_front())
        };

        if let Some((probe, index)) = &self.probe {
            probe.pull_finished(*index, matches!(outcome, Ok(None)));
        }
        outcome
    }
}

/// A blocking source that hands out a fixed list of records.
///
/// ```
/// use logweave_core::Source;
/// use logweave_test_utils::ScriptedSource;
///
/// let mut source = ScriptedSource::from_dates(&[1, 4]).fail_at(2);
/// assert!(source.pull().unwrap().is_some());
/// assert!(source.pull().unwrap().is_some());
/// assert!(source.pull().is_err());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Script,
}

impl ScriptedSource {
    pub fn new(records: Vec<LogEntry>) -> Self {
        Self {
            script: Script {
                records: records.into(),
                ..Script::default()
            },
        }
    }

    pub fn from_dates(dates: &[u64]) -> Self {
        Self::new(entries(dates))
    }

    /// Reports every pull to `probe` under source index `index`.
    #[must_use]
    pub fn probed(mut self, probe: &PullProbe, index: usize) -> Self {
        self.script.probe = Some((probe.clone(), index));
        self
    }

    /// Fails the pull with the given zero-based position instead of answering.
    #[must_use]
    pub fn fail_at(mut self, pull: usize) -> Self {
        self.script.fail_at = Some(pull);
        self
    }

    pub fn pulls(&self) -> usize {
        self.script.pulls
    }
}

impl Source for ScriptedSource {
    type Item = LogEntry;

    fn pull(&mut self) -> Result<Option<LogEntry>> {
        self.script.begin();
        self.script.next()
    }
}

/// A suspending source that hands out a fixed list of records, sleeping
/// before each answer.
#[derive(Debug, Default)]
pub struct ScriptedAsyncSource {
    script: Script,
    latencies: VecDeque<Duration>,
    latency: Duration,
}

impl ScriptedAsyncSource {
    pub fn new(records: Vec<LogEntry>) -> Self {
        Self {
            script: Script {
                records: records.into(),
                ..Script::default()
            },
            ..Self::default()
        }
    }

    pub fn from_dates(dates: &[u64]) -> Self {
        Self::new(entries(dates))
    }

    /// Every pull sleeps this long before answering.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Per-pull delays, in pull order. Pulls beyond the list fall back to
    /// the uniform latency.
    #[must_use]
    pub fn with_latencies(mut self, latencies: Vec<Duration>) -> Self {
        self.latencies = latencies.into();
        self
    }

    /// Reports every pull to `probe` under source index `index`.
    #[must_use]
    pub fn probed(mut self, probe: &PullProbe, index: usize) -> Self {
        self.script.probe = Some((probe.clone(), index));
        self
    }

    /// Fails the pull with the given zero-based position instead of answering.
    #[must_use]
    pub fn fail_at(mut self, pull: usize) -> Self {
        self.script.fail_at = Some(pull);
        self
    }
}

#[async_trait]
impl AsyncSource for ScriptedAsyncSource {
    type Item = LogEntry;

    async fn pull(&mut self) -> Result<Option<LogEntry>> {
        self.script.begin();
        let delay = self.latencies.pop_front().unwrap_or(self.latency);
        if !delay.is_zero() {
            sleep(delay).await;
        }
        self.script.next()
    }
}
