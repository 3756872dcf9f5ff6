// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::fixtures::dates;
use logweave_core::{LogEntry, MergeError, Result, Sink};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct Recording {
    records: Vec<LogEntry>,
    completions: usize,
    emitted_after_complete: usize,
    fail_emit_at: Option<usize>,
    fail_complete: bool,
}

/// Sink that records everything it is told.
///
/// Clones share the same recording, so a test can keep one handle while the
/// merge owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    recording: Arc<Mutex<Recording>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the emission with the given zero-based position.
    #[must_use]
    pub fn fail_emit_at(self, position: usize) -> Self {
        self.recording.lock().fail_emit_at = Some(position);
        self
    }

    /// Rejects the completion signal.
    #[must_use]
    pub fn fail_complete(self) -> Self {
        self.recording.lock().fail_complete = true;
        self
    }

    pub fn records(&self) -> Vec<LogEntry> {
        self.recording.lock().records.clone()
    }

    pub fn dates(&self) -> Vec<u64> {
        dates(&self.recording.lock().records)
    }

    pub fn completions(&self) -> usize {
        self.recording.lock().completions
    }

    pub fn emitted_after_complete(&self) -> usize {
        self.recording.lock().emitted_after_complete
    }
}

impl Sink<LogEntry> for RecordingSink {
    fn emit(&mut self, record: LogEntry) -> Result<()> {
        let mut recording = self.recording.lock();
        if recording.fail_emit_at == Some(recording.records.len()) {
            return Err(MergeError::sink_failed(format!("rejected {record}")));
        }
        if recording.completions > 0 {
            recording.emitted_after_complete += 1;
        }
        recording.records.push(record);
        Ok(())
    }

    fn complete(&mut self) -> Result<()> {
        let mut recording = self.recording.lock();
        recording.completions += 1;
        if recording.fail_complete {
            return Err(MergeError::sink_failed("completion rejected"));
        }
        Ok(())
    }
}
