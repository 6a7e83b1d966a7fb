//! Zoned instants and the raw ical-shaped values `TimeResolver` consumes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::zone::Zone;

/// A wall-clock moment together with its identified timezone. All times
/// exposed by this crate are instants — never naive, never ambiguous.
#[derive(Debug, Clone, Copy)]
pub struct Instant(DateTime<Zone>);

/// Wire shape for `Instant`: `chrono` does not derive `Deserialize` for an
/// arbitrary `DateTime<Tz>` (it cannot generically reconstruct `Tz` from an
/// offset), so `Instant` carries the IANA zone name alongside the timestamp.
#[derive(Serialize, Deserialize)]
struct InstantRepr {
    unix_timestamp: i64,
    zone: String,
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        InstantRepr {
            unix_timestamp: self.unix_timestamp(),
            zone: self.zone().to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = InstantRepr::deserialize(deserializer)?;
        let zone = crate::zone::ensure_zone(&repr.zone);
        Ok(Instant::from_unix(repr.unix_timestamp, zone))
    }
}

impl Instant {
    pub fn epoch(zone: Zone) -> Self {
        // An absolute instant converting between zones is always
        // well-defined (unlike reconstructing one from local wall-clock
        // fields), so the UTC epoch always exists.
        let utc_epoch = Utc.timestamp_opt(0, 0).expect("UTC epoch always exists");
        Instant(utc_epoch.with_timezone(&zone))
    }

    pub fn from_unix(seconds: i64, zone: Zone) -> Self {
        match zone.timestamp_opt(seconds, 0) {
            chrono::LocalResult::Single(dt) => Instant(dt),
            chrono::LocalResult::Ambiguous(earliest, _) => Instant(earliest),
            chrono::LocalResult::None => {
                tracing::warn!(seconds, %zone, "unix timestamp unrepresentable in zone, using epoch");
                Instant::epoch(zone)
            }
        }
    }

    /// Interprets local wall-clock fields in `zone`. A local time that falls
    /// in a DST spring-forward gap degrades to the epoch (logged); a local
    /// time that is ambiguous across a fall-back overlap resolves to its
    /// earliest interpretation.
    pub fn from_local(naive: NaiveDateTime, zone: Zone) -> Self {
        match zone.from_local_datetime(&naive) {
            chrono::LocalResult::Single(dt) => Instant(dt),
            chrono::LocalResult::Ambiguous(earliest, _) => Instant(earliest),
            chrono::LocalResult::None => {
                tracing::warn!(%naive, %zone, "local time does not exist in zone, using epoch");
                Instant::epoch(zone)
            }
        }
    }

    pub fn zone(&self) -> Zone {
        self.0.timezone()
    }

    pub fn with_zone(&self, zone: Zone) -> Self {
        Instant(self.0.with_timezone(&zone))
    }

    pub fn naive_local(&self) -> NaiveDateTime {
        self.0.naive_local()
    }

    pub fn date_naive(&self) -> NaiveDate {
        self.0.date_naive()
    }

    pub fn unix_timestamp(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn is_midnight(&self) -> bool {
        let t = self.naive_local().time();
        t.hour() == 0 && t.minute() == 0 && t.second() == 0
    }

    pub fn add_seconds(&self, seconds: i64) -> Self {
        Instant(self.0 + chrono::Duration::seconds(seconds))
    }

    pub fn add_days(&self, days: i64) -> Self {
        let date = self.date_naive() + chrono::Duration::days(days);
        let naive = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
        Instant::from_local(naive, self.zone())
    }

    /// Start of the next calendar day, in this instant's own zone.
    pub fn start_of_next_day(&self) -> Self {
        self.add_days(1)
    }
}
impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Instant {}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

/// Raw time-shaped input as it arrives from a calendar adapter, before
/// `TimeResolver` normalises it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IcalValue {
    /// A datetime carrying an explicit `TZID` parameter.
    ZonedDateTime { naive: NaiveDateTime, tzid: String },
    /// An offset-zero datetime with no `TZID` and no `Z` suffix.
    FloatingDateTime(NaiveDateTime),
    /// A datetime explicitly marked UTC (`Z` suffix).
    UtcDateTime(NaiveDateTime),
    /// A date-only value (no time component).
    Date(NaiveDate),
    /// An already-resolved instant (e.g. produced by a prior resolution
    /// step, such as an `RDATE` computed elsewhere).
    Zoned(Instant),
    /// Seconds since the UNIX epoch.
    Timestamp(i64),
}

impl IcalValue {
    pub fn explicit_tzid(&self) -> Option<&str> {
        match self {
            IcalValue::ZonedDateTime { tzid, .. } => Some(tzid.as_str()),
            _ => None,
        }
    }
}
