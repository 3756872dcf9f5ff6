// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use logweave_core::LogEntry;
use rand::Rng;

/// An entry at `date` whose message is the date itself, handy in assertions.
pub fn entry(date: u64) -> LogEntry {
    LogEntry::new(date, format!("t={date}"))
}

/// Entries for each date, in the given order.
pub fn entries(dates: &[u64]) -> Vec<LogEntry> {
    dates.iter().copied().map(entry).collect()
}

/// The dates of a merged output, for comparing against expectations.
pub fn dates(records: &[LogEntry]) -> Vec<u64> {
    records.iter().map(LogEntry::date).collect()
}

/// Generates `count` sorted sources of up to `max_len` entries each.
///
/// Dates are drawn from a narrow range so that ties across sources are
/// common. Some sources come out empty.
pub fn random_sources<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    max_len: usize,
) -> Vec<Vec<LogEntry>> {
    (0..count)
        .map(|source| {
            let len = rng.random_range(0..=max_len);
            let mut date = rng.random_range(0..10);
            (0..len)
                .map(|seq| {
                    date += rng.random_range(0..5);
                    LogEntry::new(date, format!("s{source}#{seq}"))
                })
                .collect()
        })
        .collect()
}

/// All dates across the sources, sorted: what a correct merge must emit.
pub fn expected_dates(sources: &[Vec<LogEntry>]) -> Vec<u64> {
    let mut all: Vec<u64> = sources.iter().flat_map(|s| dates(s)).collect();
    all.sort_unstable();
    all
}

/// Panics with the offending position if `records` is not sorted by date.
pub fn assert_non_decreasing(records: &[LogEntry]) {
    if let Some(pos) = records.windows(2).position(|w| w[1].date() < w[0].date()) {
        panic!(
            "emission {} ({}) is older than emission {} ({})",
            pos + 1,
            records[pos + 1],
            pos,
            records[pos]
        );
    }
}
