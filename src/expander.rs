//! `Expander`: walks a `Schedule` inside a window and materialises zoned
//! `(start, end)` pairs (`SPEC_FULL.md` §4.4).

use std::collections::BTreeSet;

use rrule::RRuleSet;

use crate::instant::Instant;
use crate::schedule::Schedule;

pub struct Expander;

impl Expander {
    /// `begin`/`end` are UTC instants already projected per §4.4's window
    /// conversion rule (date-only window bounds flattened to UTC midnight).
    pub fn expand(schedule: &Schedule, begin: Instant, end: Instant) -> Vec<(Instant, Instant)> {
        if begin >= end {
            return Vec::new();
        }

        let excluded: BTreeSet<i64> = schedule
            .excluded_times
            .iter()
            .map(Instant::unix_timestamp)
            .collect();

        let mut seen = BTreeSet::new();
        let mut starts: Vec<Instant> = Vec::new();

        for instant in &schedule.positive_times {
            if seen.insert(instant.unix_timestamp()) {
                starts.push(*instant);
            }
        }

        if !schedule.rules.is_empty() {
            match Self::parse_rrule_set(schedule) {
                Ok(rrule_set) => {
                    for date_time in rrule_set.into_iter() {
                        let instant = Instant::from_unix(date_time.timestamp(), schedule.zone);

                        // The window upper bound is the sole defence against
                        // a rule with no COUNT/UNTIL (e.g. FREQ=SECONDLY):
                        // stop pulling from the enumerator the moment it
                        // reaches or passes `end`, rather than materialising
                        // an unbounded sequence first.
                        if instant >= end {
                            break;
                        }

                        if seen.insert(instant.unix_timestamp()) {
                            starts.push(instant);
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "malformed recurrence rule, schedule has no rule-derived occurrences");
                }
            }
        }

        let mut occurrences: Vec<(Instant, Instant)> = starts
            .into_iter()
            .filter(|start| !excluded.contains(&start.unix_timestamp()))
            .filter(|start| *start >= begin && *start < end)
            .map(|start| (start, Self::instance_end(schedule, &start)))
            .collect();

        occurrences.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        occurrences
    }

    /// The instance whose start coincides with the component's own,
    /// precisely-zoned start reuses `base_end` verbatim — this is what
    /// preserves a cross-zone DTSTART/DTEND pair (§4.1 priority rule 1 on
    /// each value individually) for the one natural instance that embodies
    /// it. Every other generated instance derives its end from the
    /// duration, in its own zone (all-day events instead use whole-day
    /// date arithmetic, DST-safe).
    fn instance_end(schedule: &Schedule, start: &Instant) -> Instant {
        if start.unix_timestamp() == schedule.base_start.unix_timestamp() {
            return schedule.base_end;
        }

        match schedule.all_day_span_days {
            Some(days) => start.add_days(days),
            None => start.add_seconds(schedule.duration_seconds),
        }
    }

    fn parse_rrule_set(schedule: &Schedule) -> Result<RRuleSet, rrule::RRuleError> {
        let mut ical_parts = Vec::with_capacity(schedule.rules.len() + 1);

        ical_parts.push(format!(
            "DTSTART;TZID={}:{}",
            schedule.zone,
            schedule.base_local_start.format("%Y%m%dT%H%M%S")
        ));

        for rule in &schedule.rules {
            ical_parts.push(format!("RRULE:{rule}"));
        }

        ical_parts.join("\n").parse::<RRuleSet>()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::utc;
    use crate::zone::TimeResolver;
    use pretty_assertions_sorted::assert_eq;

    fn test_schedule(rules: Vec<String>, positive_times: Vec<Instant>) -> Schedule {
        let base_start = TimeResolver::to_instant(&utc(2026, 1, 5, 9, 0, 0), chrono_tz::UTC);
        let base_end = TimeResolver::to_instant(&utc(2026, 1, 5, 10, 0, 0), chrono_tz::UTC);

        Schedule {
            zone: chrono_tz::UTC,
            base_local_start: base_start.naive_local(),
            base_start,
            base_end,
            duration_seconds: 3_600,
            all_day_span_days: None,
            rules,
            positive_times,
            excluded_times: Vec::new(),
        }
    }

    #[test]
    fn test_rrule_and_rdate_overlap_deduplicates() {
        let base_start = TimeResolver::to_instant(&utc(2026, 1, 5, 9, 0, 0), chrono_tz::UTC);
        // The RDATE coincides with the rule's own first occurrence.
        let schedule = test_schedule(
            vec!["FREQ=DAILY;COUNT=3".to_string()],
            vec![base_start],
        );

        let begin = TimeResolver::to_instant(&utc(2026, 1, 1, 0, 0, 0), chrono_tz::UTC);
        let end = TimeResolver::to_instant(&utc(2026, 1, 31, 0, 0, 0), chrono_tz::UTC);

        let occurrences = Expander::expand(&schedule, begin, end);

        assert_eq!(occurrences.len(), 3);
    }

    #[test]
    fn test_unbounded_rule_stops_at_window_end() {
        let schedule = test_schedule(vec!["FREQ=SECONDLY".to_string()], Vec::new());

        let begin = TimeResolver::to_instant(&utc(2026, 1, 5, 9, 0, 0), chrono_tz::UTC);
        let end = TimeResolver::to_instant(&utc(2026, 1, 5, 9, 0, 5), chrono_tz::UTC);

        let occurrences = Expander::expand(&schedule, begin, end);

        assert_eq!(occurrences.len(), 5);
    }

    #[test]
    fn test_inverted_window_is_empty() {
        let schedule = test_schedule(vec!["FREQ=DAILY".to_string()], Vec::new());

        let begin = TimeResolver::to_instant(&utc(2026, 1, 31, 0, 0, 0), chrono_tz::UTC);
        let end = TimeResolver::to_instant(&utc(2026, 1, 1, 0, 0, 0), chrono_tz::UTC);

        assert!(Expander::expand(&schedule, begin, end).is_empty());
    }
}
