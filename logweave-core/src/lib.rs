// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core traits and types shared by the logweave merge engines.
//!
//! - [`HasTimestamp`] - the ordering key of a record
//! - [`LogEntry`] - a ready-made record type
//! - [`Source`] / [`AsyncSource`] - blocking and suspending record providers
//! - [`Sink`] - consumer of the merged stream
//! - [`MergeError`] - the error taxonomy shared by engines, sources and sinks

#[macro_use]
mod logging;

pub mod async_source;
pub mod error;
pub mod has_timestamp;
pub mod log_entry;
pub mod sink;
pub mod source;

pub use self::async_source::{AsyncSource, StreamSource, TryStreamSource};
pub use self::error::{IntoMergeError, MergeError, Result};
pub use self::has_timestamp::HasTimestamp;
pub use self::log_entry::LogEntry;
pub use self::sink::{MergeStats, OrderCheckingSink, Sink};
pub use self::source::{IterSource, Source};
