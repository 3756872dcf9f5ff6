// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// A trait for records that carry the timestamp they are merged by.
///
/// The merge engines only ever read the timestamp; the rest of the record is
/// an opaque payload handed through to the sink untouched.
///
/// # Type Parameters
/// * `Timestamp` - The type representing the timestamp (must be `Ord + Copy`)
///
/// # Examples
///
/// ```
/// use logweave_core::HasTimestamp;
///
/// #[derive(Clone, Debug)]
/// struct Trade {
///     symbol: String,
///     executed_at: u64,
/// }
///
/// impl HasTimestamp for Trade {
///     type Timestamp = u64;
///
///     fn timestamp(&self) -> u64 {
///         self.executed_at
///     }
/// }
/// ```
///
/// # Different Timestamp Types
///
/// Any totally ordered, copyable time representation works, including
/// wall-clock time:
///
/// ```rust
/// use logweave_core::HasTimestamp;
/// use std::time::SystemTime;
///
/// #[derive(Clone, Debug)]
/// struct Line {
///     text: String,
///     written: SystemTime,
/// }
///
/// impl HasTimestamp for Line {
///     type Timestamp = SystemTime;
///     fn timestamp(&self) -> SystemTime { self.written }
/// }
/// ```
pub trait HasTimestamp {
    /// The type representing the timestamp
    type Timestamp: Ord + Copy + Send + Sync + std::fmt::Debug;

    /// Returns the timestamp value for this record.
    /// The merge engines order records by this value alone.
    fn timestamp(&self) -> Self::Timestamp;
}

impl<T: HasTimestamp> HasTimestamp for Box<T> {
    type Timestamp = T::Timestamp;

    fn timestamp(&self) -> Self::Timestamp {
        (**self).timestamp()
    }
}
