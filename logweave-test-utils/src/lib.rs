// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fixtures for the logweave merge engines.
//!
//! This crate provides scripted sources, an instrumented sink and fixture
//! generators. It is designed for use in tests and benches only, not for
//! production code.
//!
//! # Key Types
//!
//! - [`ScriptedSource`] / [`ScriptedAsyncSource`] - hand out a fixed list of
//!   records, optionally failing at a given pull or (async) sleeping before
//!   each answer
//! - [`PullProbe`] - shared record of the pulls a merge issues, used to check
//!   scheduling properties such as "one pull in flight after bootstrap"
//! - [`channel_source`] - an async source fed by hand, for pulls that must
//!   stay pending until the test decides
//! - [`RecordingSink`] - records emissions and completion calls
//!
//! # Examples
//!
//! ```rust
//! use logweave_core::Source;
//! use logweave_test_utils::{PullProbe, ScriptedSource};
//!
//! let probe = PullProbe::new();
//! let mut source = ScriptedSource::from_dates(&[1, 2]).probed(&probe, 0);
//!
//! while source.pull().unwrap().is_some() {}
//!
//! assert_eq!(probe.pulls(0), 3);
//! assert_eq!(probe.pulls_after_exhaustion(), 0);
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod channel;
pub mod fixtures;
pub mod probe;
pub mod recording_sink;
pub mod scripted;

pub use channel::{channel_source, ChannelFeed, ChannelSource};
pub use fixtures::{
    assert_non_decreasing, dates, entries, entry, expected_dates, random_sources,
};
pub use probe::PullProbe;
pub use recording_sink::RecordingSink;
pub use scripted::{ScriptedAsyncSource, ScriptedSource};
