//! Core runtime configuration.
//!
//! Configuration is resolved once by the host program and then passed into the formatter and
//! the session. The core never reads the process environment or the local time zone itself,
//! so rendered output depends only on the record and this value.

use crate::{ScribeError, ScribeResult};
use chrono::{FixedOffset, Offset, Utc};

/// Core configuration resolved at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScribeConfig {
    display_offset: FixedOffset,
}

impl ScribeConfig {
    /// Create a new `ScribeConfig` rendering timestamps at `display_offset`.
    pub fn new(display_offset: FixedOffset) -> Self {
        Self { display_offset }
    }

    /// Configuration that renders all timestamps in UTC.
    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    /// Parse a `±HH:MM` (or `Z`) offset string into a configuration.
    ///
    /// Blank input falls back to UTC.
    pub fn from_offset_str(value: &str) -> ScribeResult<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("z") {
            return Ok(Self::utc());
        }
        parse_offset(value).map(Self::new)
    }

    /// Offset used when converting zoned timestamps to wall-clock time.
    pub fn display_offset(&self) -> FixedOffset {
        self.display_offset
    }
}

impl Default for ScribeConfig {
    fn default() -> Self {
        Self::utc()
    }
}

fn parse_offset(value: &str) -> ScribeResult<FixedOffset> {
    let invalid = || ScribeError::InvalidInput(format!("invalid UTC offset '{value}'"));

    let (sign, rest) = match value.as_bytes().first() {
        Some(b'+') => (1, &value[1..]),
        Some(b'-') => (-1, &value[1..]),
        _ => return Err(invalid()),
    };
    if !rest.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return Err(invalid());
    }

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
