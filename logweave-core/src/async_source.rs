// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::Result;
use crate::has_timestamp::HasTimestamp;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::fmt;
use std::pin::Pin;

/// A provider of records in non-decreasing timestamp order whose pulls may
/// suspend (I/O, remote feeds, timers).
///
/// The contract matches [`Source`](crate::Source): `Ok(Some(record))`,
/// `Ok(None)` once exhausted, or an error that aborts the merge. A pull that
/// never resolves stalls the merge; timeouts belong to the implementation.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use logweave_core::{AsyncSource, LogEntry, Result};
///
/// struct Remote {
///     pending: Vec<LogEntry>,
/// }
///
/// #[async_trait]
/// impl AsyncSource for Remote {
///     type Item = LogEntry;
///
///     async fn pull(&mut self) -> Result<Option<LogEntry>> {
///         // a real implementation would await a network read here
///         Ok(self.pending.pop())
///     }
/// }
/// ```
#[async_trait]
pub trait AsyncSource: Send {
    type Item: HasTimestamp + Send;

    /// Pulls the next record, or `Ok(None)` when there are no more.
    ///
    /// # Errors
    /// Returns an error when the underlying provider fails.
    async fn pull(&mut self) -> Result<Option<Self::Item>>;
}

#[async_trait]
impl<S: AsyncSource + ?Sized> AsyncSource for Box<S> {
    type Item = S::Item;

    async fn pull(&mut self) -> Result<Option<Self::Item>> {
        (**self).pull().await
    }
}

/// Adapts an infallible [`Stream`] of records into an [`AsyncSource`].
/// The end of the stream is the end of the source.
pub struct StreamSource<S> {
    inner: Pin<Box<S>>,
}

impl<S> StreamSource<S>
where
    S: Stream + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl<S> fmt::Debug for StreamSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl<S> AsyncSource for StreamSource<S>
where
    S: Stream + Send,
    S::Item: HasTimestamp + Send,
{
    type Item = S::Item;

    async fn pull(&mut self) -> Result<Option<Self::Item>> {
        Ok(self.inner.next().await)
    }
}

/// Adapts a fallible [`Stream`] into an [`AsyncSource`].
///
/// An `Err` item fails the pull that observes it; the end of the stream is
/// the end of the source.
pub struct TryStreamSource<S> {
    inner: Pin<Box<S>>,
}

impl<S, T> TryStreamSource<S>
where
    S: Stream<Item = Result<T>> + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl<S> fmt::Debug for TryStreamSource<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryStreamSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl<S, T> AsyncSource for TryStreamSource<S>
where
    S: Stream<Item = Result<T>> + Send,
    T: HasTimestamp + Send,
{
    type Item = T;

    async fn pull(&mut self) -> Result<Option<T>> {
        self.inner.next().await.transpose()
    }
}
