//! Expands an iCalendar dataset into a concrete, time-ordered list of
//! occurrences lying inside a caller-supplied window, normalising timezones
//! and `RRULE`/`RDATE`/`EXDATE`/`RECURRENCE-ID` along the way.
//!
//! The single entry point is [`scan`]; see its module for the window and
//! kind-selection contract.

pub mod calendar;
pub mod component;
pub mod duration;
pub mod error;
pub mod expander;
pub mod instant;
pub mod occurrence;
pub mod schedule;
pub mod scan;
pub mod system_zone;
pub mod timing;
pub mod zone;

pub mod testing;

pub use calendar::Calendar;
pub use component::{Component, ComponentKind, PropertyValue};
pub use duration::Duration;
pub use error::ScanError;
pub use instant::{IcalValue, Instant};
pub use occurrence::Occurrence;
pub use scan::{scan, scan_named, scan_with};
pub use system_zone::{FixedSystemZoneProvider, HostSystemZoneProvider, SystemZoneProvider};
pub use timing::ComponentTiming;
pub use zone::Zone;
