//! Time ranges for Levels queries.
//!
//! Range-bounded queries take a `TimestampRange`, which the Levels API models
//! as a two-element array of epoch milliseconds: `[start, end]`. This module
//! provides:
//!
//! - [`TimeRange`]: a resolved `[start, end]` pair
//! - [`RangeOverride`]: caller-supplied bounds, each one optional
//! - [`resolve`]: fills the missing bounds with the default two-day window
//!
//! # Default Window
//!
//! When no bound is supplied, a query covers the start of yesterday through
//! the start of tomorrow, matching what the Levels app shows by default.
//!
//! # Comparison Window
//!
//! Queries that report period-over-period statistics also take a comparison
//! range. It is derived from the resolved primary range with
//! [`TimeRange::comparison`].
//!
//! # Example
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone, Utc};
//! use levels_api::range::{resolve, RangeOverride};
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
//! let utc = FixedOffset::east_opt(0).unwrap();
//!
//! let range = resolve(None, now, utc);
//! assert_eq!(range.start, 1_704_758_400_000); // 2024-01-09T00:00:00Z
//! assert_eq!(range.end, 1_704_931_200_000); // 2024-01-11T00:00:00Z
//!
//! let custom = resolve(Some(RangeOverride::new(1, 2)), now, utc);
//! assert_eq!((custom.start, custom.end), (1, 2));
//! ```

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

/// Milliseconds in one day.
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A resolved time range in epoch milliseconds.
///
/// Serializes as the two-element array the Levels API expects.
///
/// ```rust
/// use levels_api::TimeRange;
///
/// let range = TimeRange::new(1_000, 2_000);
/// assert_eq!(serde_json::to_string(&range).unwrap(), "[1000,2000]");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeRange {
    /// Inclusive start, epoch milliseconds.
    pub start: i64,
    /// End, epoch milliseconds.
    pub end: i64,
}

impl TimeRange {
    /// Creates a range from raw epoch milliseconds.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns the length of the range in milliseconds.
    #[must_use]
    pub const fn duration_ms(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    /// Derives the comparison range that precedes this one.
    ///
    /// The result is `[start - 2 days, end - 1 day]`, with both bounds moved
    /// back to the start of their day in `offset`. The bounds of `self` do
    /// not need to be day-aligned.
    #[must_use]
    pub fn comparison(&self, offset: FixedOffset) -> Self {
        let offset_ms = offset_millis(offset);
        Self {
            start: start_of_day_ms(self.start.saturating_sub(2 * DAY_MS), offset_ms),
            end: start_of_day_ms(self.end.saturating_sub(DAY_MS), offset_ms),
        }
    }
}

impl Serialize for TimeRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.start)?;
        tuple.serialize_element(&self.end)?;
        tuple.end()
    }
}

/// Caller-supplied range bounds.
///
/// Each bound replaces its default independently, so a caller can pin only
/// the start (or only the end) of a query window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeOverride {
    /// Start bound in epoch milliseconds, if supplied.
    pub start: Option<i64>,
    /// End bound in epoch milliseconds, if supplied.
    pub end: Option<i64>,
}

impl RangeOverride {
    /// Overrides both bounds.
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Overrides only the start bound.
    #[must_use]
    pub const fn starting_at(start: i64) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Overrides only the end bound.
    #[must_use]
    pub const fn ending_at(end: i64) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Overrides both bounds from date-times in any time zone.
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use levels_api::RangeOverride;
    ///
    /// let range = RangeOverride::between(
    ///     Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    /// );
    /// assert_eq!(range.start, Some(1_704_067_200_000));
    /// ```
    #[must_use]
    pub fn between<Tz: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self::new(start.timestamp_millis(), end.timestamp_millis())
    }
}

impl From<TimeRange> for RangeOverride {
    fn from(range: TimeRange) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Returns the default query window around `now`.
///
/// The window starts at the beginning of the day before `now` and ends at the
/// beginning of the day after `now`, both in `offset`.
#[must_use]
pub fn default_range(now: DateTime<Utc>, offset: FixedOffset) -> TimeRange {
    let now_ms = now.timestamp_millis();
    TimeRange {
        start: start_of_day(now_ms.saturating_sub(DAY_MS), offset),
        end: start_of_day(now_ms.saturating_add(DAY_MS), offset),
    }
}

/// Resolves the effective range for a query issued at `now`.
///
/// Supplied bounds are used verbatim; missing ones come from
/// [`default_range`].
#[must_use]
pub fn resolve(
    range_override: Option<RangeOverride>,
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> TimeRange {
    let bounds = range_override.unwrap_or_default();
    match (bounds.start, bounds.end) {
        (Some(start), Some(end)) => TimeRange { start, end },
        (start, end) => {
            let defaults = default_range(now, offset);
            TimeRange {
                start: start.unwrap_or(defaults.start),
                end: end.unwrap_or(defaults.end),
            }
        }
    }
}

/// Moves an epoch-millisecond instant back to the start of its day in `offset`.
#[must_use]
pub fn start_of_day(epoch_ms: i64, offset: FixedOffset) -> i64 {
    start_of_day_ms(epoch_ms, offset_millis(offset))
}

fn offset_millis(offset: FixedOffset) -> i64 {
    i64::from(offset.local_minus_utc()) * 1000
}

const fn start_of_day_ms(epoch_ms: i64, offset_ms: i64) -> i64 {
    epoch_ms.saturating_sub(epoch_ms.saturating_add(offset_ms).rem_euclid(DAY_MS))
}
