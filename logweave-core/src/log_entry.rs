// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::has_timestamp::HasTimestamp;
use std::fmt;

/// A single timestamped log line.
///
/// `date` is expressed in milliseconds since the Unix epoch. Entries are
/// immutable once built; sources hand them to the engine by value and the
/// engine hands them straight on to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LogEntry {
    date: u64,
    msg: String,
}

impl LogEntry {
    /// Creates an entry with the given date and message.
    pub fn new(date: u64, msg: impl Into<String>) -> Self {
        Self {
            date,
            msg: msg.into(),
        }
    }

    /// Creates an entry with an empty message.
    #[must_use]
    pub const fn at(date: u64) -> Self {
        Self {
            date,
            msg: String::new(),
        }
    }

    #[must_use]
    pub const fn date(&self) -> u64 {
        self.date
    }

    #[must_use]
    pub fn msg(&self) -> &str {
        &self.msg
    }

    /// Consumes the entry and returns its message.
    #[must_use]
    pub fn into_msg(self) -> String {
        self.msg
    }
}

impl HasTimestamp for LogEntry {
    type Timestamp = u64;

    fn timestamp(&self) -> u64 {
        self.date
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.msg)
    }
}

impl From<(u64, &str)> for LogEntry {
    fn from((date, msg): (u64, &str)) -> Self {
        Self::new(date, msg)
    }
}

impl From<u64> for LogEntry {
    fn from(date: u64) -> Self {
        Self::at(date)
    }
}
