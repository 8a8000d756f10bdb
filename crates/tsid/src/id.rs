use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A time-sortable 64-bit identifier.
///
/// A `Tsid` packs three fields into a signed 64-bit integer whose sign bit is
/// always clear, so every valid value is non-negative and sorts the same way
/// as its canonical string form:
///
/// ```text
///  Bit Index:  63 62        22 21        14 13         0
///              +--+-----------+------------+------------+
///  Field:      | 0| millis(42)| counter (8)| random (14)|
///              +--+-----------+------------+------------+
///              |<----- MSB ------ 64 bits ----- LSB --->|
/// ```
///
/// - `millis`: milliseconds since the Unix epoch, truncated to 42 bits. The
///   highest of those bits doubles as the sign guard and is forced to zero,
///   so the field wraps after roughly 139 years.
/// - `counter`: per-millisecond sequence number. Resets when the clock tick
///   advances and wraps after 256 IDs inside one tick.
/// - `random`: the surviving bits of a 16-bit secure random draw (the two
///   lowest bits are discarded during packing).
///
/// Within a single millisecond the counter dominates the random bits, so up
/// to 256 consecutive IDs are strictly increasing. Across ticks the timestamp
/// dominates everything else.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Tsid {
    id: i64,
}

const _: () = {
    // The sign guard overlaps the top timestamp bit, so the three fields
    // cover the backing integer exactly.
    assert!(
        Tsid::TIMESTAMP_BITS + Tsid::COUNTER_BITS + Tsid::RANDOM_BITS == i64::BITS,
        "layout must match underlying type width"
    );
};

impl Tsid {
    pub const TIMESTAMP_BITS: u32 = 42;
    pub const COUNTER_BITS: u32 = 8;
    pub const RANDOM_BITS: u32 = 14;

    pub const RANDOM_SHIFT: u32 = 0;
    pub const COUNTER_SHIFT: u32 = Self::RANDOM_SHIFT + Self::RANDOM_BITS;
    pub const TIMESTAMP_SHIFT: u32 = Self::COUNTER_SHIFT + Self::COUNTER_BITS;

    pub const TIMESTAMP_MASK: i64 = (1 << Self::TIMESTAMP_BITS) - 1;
    pub const COUNTER_MASK: i64 = (1 << Self::COUNTER_BITS) - 1;
    pub const RANDOM_MASK: i64 = (1 << Self::RANDOM_BITS) - 1;

    /// Extracts the millisecond timestamp from the packed ID.
    ///
    /// For valid IDs the top timestamp bit is the (cleared) sign guard, so
    /// the result is at most `TIMESTAMP_MASK >> 1`.
    #[must_use]
    pub const fn timestamp(&self) -> i64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the per-millisecond sequence counter from the packed ID.
    #[must_use]
    pub const fn counter(&self) -> u8 {
        ((self.id >> Self::COUNTER_SHIFT) & Self::COUNTER_MASK) as u8
    }

    /// Extracts the random field from the packed ID.
    #[must_use]
    pub const fn random(&self) -> u16 {
        ((self.id >> Self::RANDOM_SHIFT) & Self::RANDOM_MASK) as u16
    }

    /// Converts this type into its raw type representation.
    #[must_use]
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// Converts a raw type into this type.
    ///
    /// No validation is performed; use [`Self::is_valid`] to check the sign
    /// guard on values that did not come from a generator.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns `true` if the sign guard is clear (the value is non-negative).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Returns a canonical version of the ID with the sign guard cleared.
    #[must_use]
    pub const fn into_valid(self) -> Self {
        Self {
            id: self.id & i64::MAX,
        }
    }

    /// Returns this ID's timestamp as a [`std::time::SystemTime`].
    ///
    /// Precision is limited to whole milliseconds.
    #[must_use]
    pub fn datetime(&self) -> SystemTime {
        UNIX_EPOCH + Duration::from_millis(self.timestamp() as u64)
    }
}

impl fmt::Debug for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tsid")
            .field("raw", &self.id)
            .field("timestamp", &self.timestamp())
            .field("counter", &self.counter())
            .field("random", &self.random())
            .finish()
    }
}
