//! `ScheduleBuilder`: assembles a recurrence schedule from `RRULE`/`RDATE`/
//! `EXDATE` and sibling `RECURRENCE-ID` overrides (`SPEC_FULL.md` §4.3).

use chrono::NaiveDateTime;

use crate::component::Component;
use crate::instant::Instant;
use crate::timing::ComponentTiming;
use crate::zone::{TimeResolver, Zone};

#[derive(Debug, Clone)]
pub struct Schedule {
    pub zone: Zone,
    pub base_local_start: NaiveDateTime,
    /// The component's own, precisely-zoned start/end (which may carry
    /// distinct zones from each other, e.g. a cross-zone flight). The
    /// instance whose generated start coincides with `base_start` reuses
    /// `base_end` verbatim instead of recomputing it from `duration_seconds`.
    pub base_start: Instant,
    pub base_end: Instant,
    pub duration_seconds: i64,
    /// Set for an all-day event with no explicit `DTEND`: the whole-day
    /// span each recurrence's end is derived from, by date arithmetic
    /// rather than second-duration addition.
    pub all_day_span_days: Option<i64>,
    pub rules: Vec<String>,
    pub positive_times: Vec<Instant>,
    pub excluded_times: Vec<Instant>,
}

pub struct ScheduleBuilder;

impl ScheduleBuilder {
    /// `siblings` is every component sharing this component's `uid`,
    /// including `component` itself.
    pub fn build(component: &Component, timing: &ComponentTiming, siblings: &[Component]) -> Schedule {
        let zone = timing.zone;
        let base_local_start = timing.start_time.naive_local();
        let duration_seconds =
            (timing.end_time.unix_timestamp() - timing.start_time.unix_timestamp()).max(0);

        // A component overriding a sibling instance is a one-off: its
        // schedule is exactly its own start, no rules, regardless of what
        // RRULE/RDATE/EXDATE it happens to carry.
        if component.is_override() {
            return Schedule {
                zone,
                base_local_start,
                base_start: timing.start_time,
                base_end: timing.end_time,
                duration_seconds,
                all_day_span_days: timing.all_day_span_days,
                rules: Vec::new(),
                positive_times: vec![timing.start_time],
                excluded_times: Vec::new(),
            };
        }

        let rules = component
            .rrule
            .iter()
            .map(|rule| rule.trim().to_string())
            .filter(|rule| !rule.is_empty())
            .collect::<Vec<_>>();

        let mut positive_times = component
            .rdate
            .iter()
            .map(|value| TimeResolver::to_instant(value, zone))
            .collect::<Vec<_>>();

        let mut excluded_times = component
            .exdate
            .iter()
            .map(|value| TimeResolver::to_instant(value, zone))
            .collect::<Vec<_>>();

        for sibling in siblings {
            if let Some(recurrence_id) = &sibling.recurrence_id {
                excluded_times.push(TimeResolver::to_instant(recurrence_id, zone));
            }
        }

        // No rule, no rdate: the schedule is exactly the component's own
        // start.
        if rules.is_empty() && positive_times.is_empty() {
            positive_times.push(timing.start_time);
        }

        Schedule {
            zone,
            base_local_start,
            base_start: timing.start_time,
            base_end: timing.end_time,
            duration_seconds,
            all_day_span_days: timing.all_day_span_days,
            rules,
            positive_times,
            excluded_times,
        }
    }
}
