// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::Result;
use crate::has_timestamp::HasTimestamp;

/// A blocking provider of records in non-decreasing timestamp order.
///
/// Each call to [`pull`](Source::pull) returns the next record, `Ok(None)` once
/// the source is exhausted, or an error that aborts the merge. Returning a
/// record with a smaller timestamp than a previous one breaks the merge's
/// ordering guarantee; the engines do not check for it.
///
/// # Examples
///
/// ```
/// use logweave_core::{LogEntry, Result, Source};
///
/// struct Countdown(u64);
///
/// impl Source for Countdown {
///     type Item = LogEntry;
///
///     fn pull(&mut self) -> Result<Option<LogEntry>> {
///         if self.0 == 0 {
///             return Ok(None);
///         }
///         self.0 -= 1;
///         Ok(Some(LogEntry::at(10 - self.0)))
///     }
/// }
/// ```
pub trait Source {
    type Item: HasTimestamp;

    /// Pulls the next record, or `Ok(None)` when there are no more.
    ///
    /// # Errors
    /// Returns an error when the underlying provider fails.
    fn pull(&mut self) -> Result<Option<Self::Item>>;
}

impl<S: Source + ?Sized> Source for Box<S> {
    type Item = S::Item;

    fn pull(&mut self) -> Result<Option<Self::Item>> {
        (**self).pull()
    }
}

/// Adapts any iterator of records into a [`Source`].
///
/// ```
/// use logweave_core::{IterSource, LogEntry, Source};
///
/// let mut source = IterSource::new(vec![LogEntry::at(1), LogEntry::at(2)]);
/// assert_eq!(source.pull().unwrap().map(|e| e.date()), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    inner: I,
}

impl<I> IterSource<I>
where
    I: Iterator,
{
    pub fn new<T>(records: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            inner: records.into_iter(),
        }
    }
}

impl<I> Source for IterSource<I>
where
    I: Iterator,
    I::Item: HasTimestamp,
{
    type Item = I::Item;

    fn pull(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.inner.next())
    }
}
