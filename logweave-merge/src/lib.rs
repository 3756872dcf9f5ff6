// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! K-way merge of independently time-sorted record sources.
//!
//! [`merge_sorted`] drives blocking [`Source`](logweave_core::Source)s,
//! [`merge_sorted_async`] drives suspending
//! [`AsyncSource`](logweave_core::AsyncSource)s. Both keep a
//! [`FrontierQueue`] holding one candidate per still-active source and emit
//! into a [`Sink`](logweave_core::Sink) in non-decreasing timestamp order.

#[macro_use]
mod logging;

mod frontier;
mod merge_sorted;
mod merge_sorted_async;
mod summary;

pub use frontier::{Candidate, FrontierQueue};
pub use merge_sorted::{merge_sorted, MergeSortedExt};
pub use merge_sorted_async::{merge_sorted_async, MergeSortedAsyncExt};
pub use summary::MergeSummary;
