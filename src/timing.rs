//! `ComponentTiming`: canonical `start_time`/`end_time` and classification
//! derivation for one component (`SPEC_FULL.md` §4.2).

use crate::calendar::Calendar;
use crate::component::{Component, ComponentKind};
use crate::duration::Duration;
use crate::instant::Instant;
use crate::system_zone::SystemZoneProvider;
use crate::zone::{component_zone, TimeResolver, Zone};

#[derive(Debug, Clone, Copy)]
pub struct ComponentTiming {
    pub zone: Zone,
    pub start_time: Instant,
    pub end_time: Instant,
    pub duration: Duration,
    pub is_all_day: bool,
    pub is_multi_day: bool,
    pub is_single_timestamp: bool,
    /// Set when `end_time` was derived by date-space arithmetic (all-day
    /// event with no explicit `DTEND`): the whole-day span to apply when
    /// re-deriving an end for each recurrence instance, DST-safe.
    pub all_day_span_days: Option<i64>,
}

impl ComponentTiming {
    pub fn derive(
        component: &Component,
        calendar: Option<&Calendar>,
        system_zone_provider: &dyn SystemZoneProvider,
    ) -> Self {
        let zone = component_zone(component, calendar, system_zone_provider);

        let explicit_duration = component.parsed_duration();
        let all_day_guess = component.kind == ComponentKind::Event
            && matches!(component.dtstart, Some(crate::instant::IcalValue::Date(_)))
            && component.dtend.is_none()
            && explicit_duration.is_none()
            && component.due.is_none();

        let duration = explicit_duration.unwrap_or(if all_day_guess {
            Duration::from_seconds(86_400)
        } else {
            Duration::zero()
        });

        let start_time = Self::derive_start_time(component, zone, duration);

        let all_day_span_days = Self::all_day_span_days(component, duration);
        let end_time = match all_day_span_days {
            Some(days) => start_time.add_days(days),
            None => Self::derive_end_time(component, zone, duration, &start_time),
        };

        let is_all_day = component.kind == ComponentKind::Event
            && (matches!(component.dtstart, Some(crate::instant::IcalValue::Date(_)))
                || (start_time.is_midnight() && end_time.is_midnight()));

        let is_multi_day = end_time > start_time.start_of_next_day();
        let is_single_timestamp = start_time.unix_timestamp() == end_time.unix_timestamp();

        ComponentTiming {
            zone,
            start_time,
            end_time,
            duration,
            is_all_day,
            is_multi_day,
            is_single_timestamp,
            all_day_span_days,
        }
    }

    fn all_day_span_days(component: &Component, duration: Duration) -> Option<i64> {
        let dtstart_is_date_only =
            matches!(component.dtstart, Some(crate::instant::IcalValue::Date(_)));

        if component.kind == ComponentKind::Event
            && dtstart_is_date_only
            && component.dtend.is_none()
            && component.due.is_none()
        {
            Some(duration.seconds() / 86_400)
        } else {
            None
        }
    }

    fn derive_start_time(component: &Component, zone: Zone, duration: Duration) -> Instant {
        if let Some(dtstart) = &component.dtstart {
            return TimeResolver::to_instant(dtstart, zone);
        }

        if let Some(due) = &component.due {
            let due_instant = TimeResolver::to_instant(due, zone);

            return if duration.is_zero() {
                due_instant
            } else {
                due_instant.add_seconds(-duration.seconds())
            };
        }

        Instant::epoch(zone)
    }

    fn derive_end_time(
        component: &Component,
        zone: Zone,
        duration: Duration,
        start_time: &Instant,
    ) -> Instant {
        if let Some(due) = &component.due {
            return TimeResolver::to_instant(due, zone);
        }

        if let Some(dtend) = &component.dtend {
            return TimeResolver::to_instant(dtend, zone);
        }

        start_time.add_seconds(duration.seconds())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::component::ComponentKind;
    use crate::instant::IcalValue;
    use crate::system_zone::FixedSystemZoneProvider;

    fn system_zone() -> FixedSystemZoneProvider {
        FixedSystemZoneProvider(chrono_tz::UTC)
    }

    #[test]
    fn test_due_only_is_a_single_timestamp() {
        let mut task = Component::new(ComponentKind::Task, "task-1");
        task.due = Some(IcalValue::UtcDateTime(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        ));

        let timing = ComponentTiming::derive(&task, None, &system_zone());

        assert_eq!(timing.start_time.unix_timestamp(), timing.end_time.unix_timestamp());
        assert!(timing.is_single_timestamp);
    }

    #[test]
    fn test_due_and_duration_conflict_due_wins() {
        // RFC 5545 disallows DUE and DURATION together on the same task; the
        // reference behaviour this crate preserves lets DUE win and the
        // DURATION is effectively ignored for end_time.
        let mut task = Component::new(ComponentKind::Task, "task-2");
        let due_naive = chrono::NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        task.due = Some(IcalValue::UtcDateTime(due_naive));
        task.duration = Some("PT1H".to_string());

        let timing = ComponentTiming::derive(&task, None, &system_zone());

        assert_eq!(timing.end_time.unix_timestamp(), timing.start_time.unix_timestamp() - 3_600);
    }

    #[test]
    fn test_journal_never_qualifies_as_all_day() {
        // Journals/FreeBusy always resolve through the same single-instant
        // path Events use when only DTSTART is set — never the all-day
        // inference, which is reserved for Events.
        let mut journal = Component::new(ComponentKind::Journal, "journal-1");
        journal.dtstart = Some(IcalValue::Date(
            chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        ));

        let timing = ComponentTiming::derive(&journal, None, &system_zone());

        assert!(!timing.is_all_day);
        assert!(timing.is_single_timestamp);
    }

    #[test]
    fn test_all_day_event_without_dtend_spans_one_day() {
        let mut event = Component::new(ComponentKind::Event, "event-1");
        event.dtstart = Some(IcalValue::Date(
            chrono::NaiveDate::from_ymd_opt(2018, 7, 4).unwrap(),
        ));

        let timing = ComponentTiming::derive(&event, None, &system_zone());

        assert!(timing.is_all_day);
        assert_eq!(
            (timing.end_time.date_naive() - timing.start_time.date_naive()).num_days(),
            1
        );
    }

    #[test]
    fn test_all_day_event_with_sub_day_duration_spans_zero_days() {
        // floor(D / 86400) for an explicit sub-day DURATION is 0, not 1 — the
        // whole-day default only applies when no DURATION is given at all.
        let mut event = Component::new(ComponentKind::Event, "event-2");
        event.dtstart = Some(IcalValue::Date(
            chrono::NaiveDate::from_ymd_opt(2018, 7, 4).unwrap(),
        ));
        event.duration = Some("PT12H".to_string());

        let timing = ComponentTiming::derive(&event, None, &system_zone());

        assert_eq!(timing.end_time.unix_timestamp(), timing.start_time.unix_timestamp());
    }
}
