use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::{ID_COUNTER_MODULUS, ID_LENGTH, ID_TIMESTAMP_DIGITS};

/// Generates time-ordered 16-character document IDs.
///
/// An ID is a zero-padded decimal seconds-since-epoch timestamp (10 digits)
/// followed by a zero-padded per-second counter (6 digits). The counter resets
/// when the wall-clock second changes and increments on every append, so IDs
/// order lexicographically by append time. Uniqueness holds for fewer than one
/// million appends per second; beyond that the counter rolls silently.
#[derive(Debug)]
pub struct IdGenerator {
    counter: u32,
    last_timestamp: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator {
            counter: 0,
            last_timestamp: unix_seconds(),
        }
    }

    /// Produce the next ID using the current wall clock.
    pub fn next_id(&mut self) -> String {
        self.next_id_at(unix_seconds())
    }

    /// Produce the next ID as of `timestamp` (seconds since epoch).
    ///
    /// The counter resets before incrementing whenever the second changes, so
    /// the first ID within any second carries counter value 1.
    pub(crate) fn next_id_at(&mut self, timestamp: u64) -> String {
        if timestamp != self.last_timestamp {
            self.counter = 0;
        }
        self.last_timestamp = timestamp;
        self.counter = self.counter.wrapping_add(1);
        encode(timestamp, self.counter)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Format (timestamp, counter) as a 16-digit ID string.
pub fn encode(timestamp: u64, counter: u32) -> String {
    format!(
        "{:010}{:06}",
        timestamp % 10u64.pow(ID_TIMESTAMP_DIGITS as u32),
        counter % ID_COUNTER_MODULUS
    )
}

/// Split an ID back into its (timestamp, counter) pair.
///
/// Returns `None` unless the input is exactly 16 ASCII digits.
pub fn decode(id: &str) -> Option<(u64, u64)> {
    let bytes = id.as_bytes();
    if bytes.len() != ID_LENGTH {
        return None;
    }
    let timestamp = parse_digits(&bytes[..ID_TIMESTAMP_DIGITS])?;
    let counter = parse_digits(&bytes[ID_TIMESTAMP_DIGITS..])?;
    Some((timestamp, counter))
}

/// The embedded timestamp of an ID, in seconds since epoch.
pub fn timestamp_of(id: &str) -> Option<u64> {
    decode(id).map(|(timestamp, _)| timestamp)
}

// Fixed-width decimal parse, no sign or whitespace handling.
fn parse_digits(bytes: &[u8]) -> Option<u64> {
    bytes.iter().try_fold(0u64, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + u64::from(b - b'0'))
    })
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}