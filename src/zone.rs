//! Timezone resolution: `Zone` identifiers, the system-zone fallback, and the
//! `TimeResolver` that turns raw ical-shaped values into zoned `Instant`s.

use std::str::FromStr;

use crate::calendar::Calendar;
use crate::component::Component;
use crate::instant::{IcalValue, Instant};
use crate::system_zone::SystemZoneProvider;

/// A resolvable timezone identifier. `chrono_tz::Tz` already carries `UTC` as
/// one of its variants, so there is no separate "UTC zone" type here — it is
/// just `Zone::UTC`.
pub type Zone = chrono_tz::Tz;

/// Parses a zone name, falling back to UTC (and logging) rather than failing.
///
/// This is the one place `InvalidZone` (see the error taxonomy) is handled:
/// it is never surfaced to the caller. A multi-valued `TZID` (comma-joined)
/// flattens to its first element before lookup.
pub fn ensure_zone(name: &str) -> Zone {
    let first = name.split(',').next().unwrap_or(name);
    let trimmed = first.trim().trim_matches('"');

    match Zone::from_str(trimmed) {
        Ok(zone) => zone,
        Err(_) => {
            tracing::warn!(zone = trimmed, "unknown timezone, falling back to UTC");
            Zone::UTC
        }
    }
}

/// Determines the effective zone for a component per the layered priority
/// described in `SPEC_FULL.md` §4.1:
///
/// 1. Explicit `TZID` on `dtend`, else `dtstart`, else `due`.
/// 2. An already-zoned value attached to any of the three.
/// 3. The first valid `tzid` advertised by the enclosing calendar.
/// 4. The detected system zone.
/// 5. UTC.
pub fn component_zone(
    component: &Component,
    calendar: Option<&Calendar>,
    system_zone_provider: &dyn SystemZoneProvider,
) -> Zone {
    for value in [&component.dtend, &component.dtstart, &component.due]
        .into_iter()
        .flatten()
    {
        if let Some(tzid) = value.explicit_tzid() {
            return ensure_zone(tzid);
        }
    }

    for value in [&component.dtend, &component.dtstart, &component.due]
        .into_iter()
        .flatten()
    {
        if let IcalValue::Zoned(instant) = value {
            return instant.zone();
        }
    }

    if let Some(calendar) = calendar {
        if let Some(tzid) = calendar.first_valid_tzid() {
            return ensure_zone(tzid);
        }
    }

    system_zone_provider.detect()
}

/// Normalises any ical-shaped time value into a zoned `Instant`, applying the
/// priority rules of §4.1. Never fails: pathological input degrades to the
/// epoch in `target_zone`.
pub struct TimeResolver;

impl TimeResolver {
    pub fn to_instant(value: &IcalValue, target_zone: Zone) -> Instant {
        match value {
            IcalValue::ZonedDateTime { naive, tzid } => {
                let zone = ensure_zone(tzid);
                Instant::from_local(*naive, zone)
            }

            IcalValue::Zoned(instant) => {
                if instant.zone() == target_zone {
                    *instant
                } else {
                    instant.with_zone(target_zone)
                }
            }

            // Offset-zero, not explicitly marked UTC: a deliberate,
            // documented choice to treat this as wall-clock floating time
            // rather than an instant in UTC.
            IcalValue::FloatingDateTime(naive) => Instant::from_local(*naive, target_zone),

            IcalValue::UtcDateTime(naive) => Instant::from_local(*naive, Zone::UTC).with_zone(target_zone),

            IcalValue::Date(date) => {
                let naive = date.and_hms_opt(0, 0, 0).expect("midnight is always valid");
                Instant::from_local(naive, target_zone)
            }

            IcalValue::Timestamp(seconds) => Instant::from_unix(*seconds, target_zone),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::component::{Component, ComponentKind};
    use crate::system_zone::FixedSystemZoneProvider;
    use crate::testing::{utc, zoned};
    use pretty_assertions_sorted::assert_eq;

    fn system_zone() -> FixedSystemZoneProvider {
        FixedSystemZoneProvider(chrono_tz::Atlantic::Azores)
    }

    #[test]
    fn test_ensure_zone_strips_quotes() {
        assert_eq!(ensure_zone("\"Europe/Berlin\""), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn test_ensure_zone_flattens_multi_valued_tzid() {
        assert_eq!(
            ensure_zone("Europe/Berlin,Europe/Paris"),
            chrono_tz::Europe::Berlin
        );
    }

    #[test]
    fn test_ensure_zone_falls_back_to_utc_on_unknown_name() {
        assert_eq!(ensure_zone("Not/AZone"), Zone::UTC);
    }

    #[test]
    fn test_component_zone_prefers_explicit_tzid_on_dtend_over_dtstart() {
        let mut component = Component::new(ComponentKind::Event, "event-1");
        component.dtstart = Some(zoned(2026, 1, 1, 9, 0, 0, "Europe/Berlin"));
        component.dtend = Some(zoned(2026, 1, 1, 10, 0, 0, "America/New_York"));

        let zone = component_zone(&component, None, &system_zone());

        assert_eq!(zone, chrono_tz::America::New_York);
    }

    #[test]
    fn test_component_zone_falls_back_to_calendar_vtimezone() {
        let mut component = Component::new(ComponentKind::Event, "event-1");
        component.dtstart = Some(IcalValue::FloatingDateTime(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        ));

        let mut calendar = Calendar::new("cal-1");
        calendar.tzids.push("Asia/Kathmandu".to_string());

        let zone = component_zone(&component, Some(&calendar), &system_zone());

        assert_eq!(zone, chrono_tz::Asia::Kathmandu);
    }

    #[test]
    fn test_component_zone_falls_back_to_system_zone_with_no_other_source() {
        let mut component = Component::new(ComponentKind::Event, "event-1");
        component.dtstart = Some(IcalValue::FloatingDateTime(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        ));

        let zone = component_zone(&component, None, &system_zone());

        assert_eq!(zone, chrono_tz::Atlantic::Azores);
    }

    #[test]
    fn test_to_instant_treats_floating_value_as_wall_clock_in_target_zone() {
        let naive = chrono::NaiveDate::from_ymd_opt(2026, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let instant = TimeResolver::to_instant(&IcalValue::FloatingDateTime(naive), chrono_tz::Europe::Berlin);

        assert_eq!(instant.zone(), chrono_tz::Europe::Berlin);
        assert_eq!(instant.naive_local(), naive);
    }

    #[test]
    fn test_to_instant_converts_utc_value_into_target_zone() {
        let instant = TimeResolver::to_instant(&utc(2026, 6, 1, 9, 0, 0), chrono_tz::Europe::Berlin);

        assert_eq!(instant.zone(), chrono_tz::Europe::Berlin);
        // CEST is UTC+2 in June.
        assert_eq!(instant.naive_local().format("%H:%M").to_string(), "11:00");
    }
}
