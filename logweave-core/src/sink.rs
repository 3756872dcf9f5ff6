// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{MergeError, Result};
use crate::has_timestamp::HasTimestamp;
use std::fmt;
use std::marker::PhantomData;
use std::time::{Duration, Instant};

/// Consumer of the merged output stream.
///
/// The engines call [`emit`](Sink::emit) once per record in final order and
/// [`complete`](Sink::complete) exactly once after the last emission. If a
/// merge fails, `complete` is never called: the sink is left holding a
/// well-ordered but incomplete prefix.
pub trait Sink<R> {
    /// Consumes the next record of the merged stream.
    ///
    /// # Errors
    /// An error aborts the merge immediately.
    fn emit(&mut self, record: R) -> Result<()>;

    /// Signals that the merged stream is complete.
    ///
    /// # Errors
    /// An error is reported as the outcome of the merge.
    fn complete(&mut self) -> Result<()>;
}

impl<R, K: Sink<R> + ?Sized> Sink<R> for &mut K {
    fn emit(&mut self, record: R) -> Result<()> {
        (**self).emit(record)
    }

    fn complete(&mut self) -> Result<()> {
        (**self).complete()
    }
}

impl<R> Sink<R> for Vec<R> {
    fn emit(&mut self, record: R) -> Result<()> {
        self.push(record);
        Ok(())
    }

    fn complete(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Summary of what a sink has observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStats<T> {
    /// Number of records emitted
    pub emitted: usize,
    /// Timestamp of the first emitted record
    pub first: Option<T>,
    /// Timestamp of the last emitted record
    pub last: Option<T>,
    /// Wall time between the first emission and completion (or now)
    pub elapsed: Duration,
    /// Whether `complete` has been called
    pub completed: bool,
}

impl<T> MergeStats<T> {
    /// Records emitted per second of wall time.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.emitted as f64 / secs
        } else {
            0.0
        }
    }
}

/// Sink wrapper that enforces the emission contract and keeps statistics.
///
/// Rejects, with [`MergeError::SinkContract`], any record older than the
/// previous one, any emission after completion, and a second completion.
/// Valid calls are forwarded to the inner sink.
///
/// # Examples
///
/// ```
/// use logweave_core::{LogEntry, OrderCheckingSink, Sink};
///
/// let mut sink = OrderCheckingSink::new(Vec::new());
/// sink.emit(LogEntry::at(1)).unwrap();
/// sink.emit(LogEntry::at(3)).unwrap();
/// assert!(sink.emit(LogEntry::at(2)).is_err());
/// sink.complete().unwrap();
///
/// assert_eq!(sink.stats().emitted, 2);
/// assert_eq!(sink.into_inner().len(), 2);
/// ```
pub struct OrderCheckingSink<K, R: HasTimestamp> {
    inner: K,
    emitted: usize,
    first: Option<R::Timestamp>,
    last: Option<R::Timestamp>,
    started: Option<Instant>,
    finished: Option<Instant>,
    _record: PhantomData<fn(R)>,
}

impl<K, R: HasTimestamp> OrderCheckingSink<K, R> {
    pub const fn new(inner: K) -> Self {
        Self {
            inner,
            emitted: 0,
            first: None,
            last: None,
            started: None,
            finished: None,
            _record: PhantomData,
        }
    }

    pub fn stats(&self) -> MergeStats<R::Timestamp> {
        let elapsed = match (self.started, self.finished) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        };

        MergeStats {
            emitted: self.emitted,
            first: self.first,
            last: self.last,
            elapsed,
            completed: self.finished.is_some(),
        }
    }

    pub const fn inner(&self) -> &K {
        &self.inner
    }

    pub fn into_inner(self) -> K {
        self.inner
    }
}

impl<K: fmt::Debug, R: HasTimestamp> fmt::Debug for OrderCheckingSink<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderCheckingSink")
            .field("inner", &self.inner)
            .field("emitted", &self.emitted)
            .field("last", &self.last)
            .field("completed", &self.finished.is_some())
            .finish()
    }
}

impl<K, R> Sink<R> for OrderCheckingSink<K, R>
where
    K: Sink<R>,
    R: HasTimestamp,
{
    fn emit(&mut self, record: R) -> Result<()> {
        if self.finished.is_some() {
            warn!("record emitted after completion");
            return Err(MergeError::sink_contract("record emitted after completion"));
        }

        let ts = record.timestamp();
        if let Some(last) = self.last {
            if ts < last {
                warn!("out-of-order emission: {:?} after {:?}", ts, last);
                return Err(MergeError::sink_contract(format!(
                    "out-of-order emission: {ts:?} after {last:?}"
                )));
            }
        }

        self.inner.emit(record)?;

        if self.started.is_none() {
            self.started = Some(Instant::now());
            self.first = Some(ts);
        }
        self.last = Some(ts);
        self.emitted += 1;
        Ok(())
    }

    fn complete(&mut self) -> Result<()> {
        if self.finished.is_some() {
            warn!("complete called twice");
            return Err(MergeError::sink_contract("complete called twice"));
        }

        self.inner.complete()?;
        self.finished = Some(Instant::now());
        let stats = self.stats();
        debug!(
            "stream complete: {} records in {:?} ({:.0} records/s)",
            stats.emitted,
            stats.elapsed,
            stats.throughput()
        );
        Ok(())
    }
}
