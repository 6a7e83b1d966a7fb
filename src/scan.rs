//! `scan`: the top-level orchestrator (`SPEC_FULL.md` §4.6).

use crate::calendar::Calendar;
use crate::component::ComponentKind;
use crate::error::ScanError;
use crate::expander::Expander;
use crate::instant::Instant;
use crate::occurrence::Occurrence;
use crate::schedule::ScheduleBuilder;
use crate::system_zone::{HostSystemZoneProvider, SystemZoneProvider};
use crate::timing::ComponentTiming;

/// Expands `calendar` into every occurrence of the requested kinds lying in
/// `[begin, end)`, ascending by `(start_time, end_time)`. An inverted or
/// empty window (`begin >= end`) returns an empty result rather than
/// raising.
pub fn scan<'a>(
    calendar: &'a Calendar,
    begin: Instant,
    end: Instant,
    kinds: &[ComponentKind],
) -> Vec<Occurrence<'a>> {
    scan_with(calendar, begin, end, kinds, &HostSystemZoneProvider)
}

/// As `scan`, but with an explicit system-zone fallback provider — the hook
/// tests use to avoid depending on the host machine's configured zone.
pub fn scan_with<'a>(
    calendar: &'a Calendar,
    begin: Instant,
    end: Instant,
    kinds: &[ComponentKind],
    system_zone_provider: &dyn SystemZoneProvider,
) -> Vec<Occurrence<'a>> {
    let kinds: &[ComponentKind] = if kinds.is_empty() {
        &[ComponentKind::Event]
    } else {
        kinds
    };

    if begin >= end {
        return Vec::new();
    }

    let mut occurrences = Vec::new();

    for kind in kinds {
        for component in calendar.components_of_kind(*kind) {
            let siblings = calendar.siblings_of(component);
            let timing = ComponentTiming::derive(component, Some(calendar), system_zone_provider);
            let schedule = ScheduleBuilder::build(component, &timing, siblings);

            for (start, instance_end) in Expander::expand(&schedule, begin, end) {
                occurrences.push(Occurrence::new(component, Some(calendar), start, instance_end));
            }
        }
    }

    occurrences.sort();
    occurrences
}

/// String-keyed convenience entry point for callers working with untyped
/// kind names (e.g. a query parameter). This is the one boundary where
/// `ScanError::InvalidKind` is actually reachable.
pub fn scan_named<'a>(
    calendar: &'a Calendar,
    begin: Instant,
    end: Instant,
    kind_names: &[&str],
) -> Result<Vec<Occurrence<'a>>, ScanError> {
    let mut kinds = Vec::with_capacity(kind_names.len());

    for name in kind_names {
        match ComponentKind::parse(name) {
            Some(kind) => kinds.push(kind),
            None => return Err(ScanError::InvalidKind((*name).to_string())),
        }
    }

    Ok(scan(calendar, begin, end, &kinds))
}
