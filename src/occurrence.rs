//! `Occurrence`: an immutable, per-instance view over a base component
//! (`SPEC_FULL.md` §4.5).

use std::cmp::Ordering;

use crate::calendar::Calendar;
use crate::component::{Component, PropertyValue};
use crate::instant::Instant;

/// A single materialised instance. Carries no setters at all — there is no
/// runtime path by which a caller could attempt `UnsupportedWrite`; the
/// compiler rejects it.
#[derive(Debug, Clone, Copy)]
pub struct Occurrence<'a> {
    pub start_time: Instant,
    pub end_time: Instant,
    pub base_component: &'a Component,
    pub base_calendar: Option<&'a Calendar>,
}

impl<'a> Occurrence<'a> {
    pub fn new(
        base_component: &'a Component,
        base_calendar: Option<&'a Calendar>,
        start_time: Instant,
        end_time: Instant,
    ) -> Self {
        Occurrence {
            start_time,
            end_time,
            base_component,
            base_calendar,
        }
    }

    pub fn uid(&self) -> &str {
        &self.base_component.uid
    }

    /// Forwards a read for any name not directly exposed on `Occurrence`
    /// itself to the base component. Unset multi-valued/custom properties
    /// read as an empty list, never null.
    pub fn property(&self, name: &str) -> PropertyValue {
        self.base_component
            .property(name)
            .cloned()
            .unwrap_or_else(|| PropertyValue::List(Vec::new()))
    }
}

impl<'a> PartialEq for Occurrence<'a> {
    fn eq(&self, other: &Self) -> bool {
        self.start_time == other.start_time && self.end_time == other.end_time
    }
}
impl<'a> Eq for Occurrence<'a> {}

impl<'a> PartialOrd for Occurrence<'a> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> Ord for Occurrence<'a> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_time
            .cmp(&other.start_time)
            .then_with(|| self.end_time.cmp(&other.end_time))
    }
}
