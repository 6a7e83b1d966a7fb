//! The calendar/component adapter surface (`SPEC_FULL.md` §6.A): a plain
//! data holder the core reads from. No behavior lives on `Component` itself
//! — `TimeResolver`, `ComponentTiming`, `ScheduleBuilder` and `Expander` are
//! the services that take it as an argument, mirroring how the teacher
//! keeps `Event`/`EventOccurrenceOverride` as data and puts derivation logic
//! in dedicated functions instead of on the struct.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::duration::Duration;
use crate::instant::IcalValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Event,
    Task,
    Journal,
    FreeBusy,
}

impl ComponentKind {
    /// Convenience entry point for callers working with untyped kind names
    /// (e.g. a query string). `ComponentKind` itself is a closed enum, so
    /// this is the one place an unknown-kind caller error is reachable.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "EVENT" | "VEVENT" => Some(ComponentKind::Event),
            "TASK" | "VTODO" => Some(ComponentKind::Task),
            "JOURNAL" | "VJOURNAL" => Some(ComponentKind::Journal),
            "FREEBUSY" | "VFREEBUSY" => Some(ComponentKind::FreeBusy),
            _ => None,
        }
    }
}

/// A forwarded, free-form property value. Single-valued properties read as
/// `Text`; multi-valued and `X-` properties read as `List` (empty when
/// unset, never null).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub kind: ComponentKind,
    pub uid: String,

    pub dtstart: Option<IcalValue>,
    pub dtend: Option<IcalValue>,
    pub due: Option<IcalValue>,
    pub duration: Option<String>,

    pub rrule: Vec<String>,
    pub rdate: Vec<IcalValue>,
    pub exdate: Vec<IcalValue>,

    /// Set only on a component that overrides a sibling occurrence.
    pub recurrence_id: Option<IcalValue>,

    /// Everything else (`SUMMARY`, `LOCATION`, `X-*`, …), forwarded
    /// read-only by `Occurrence`.
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Component {
    pub fn new(kind: ComponentKind, uid: impl Into<String>) -> Self {
        Component {
            kind,
            uid: uid.into(),
            dtstart: None,
            dtend: None,
            due: None,
            duration: None,
            rrule: Vec::new(),
            rdate: Vec::new(),
            exdate: Vec::new(),
            recurrence_id: None,
            properties: BTreeMap::new(),
        }
    }

    pub fn parsed_duration(&self) -> Option<Duration> {
        self.duration.as_deref().and_then(Duration::parse)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn is_override(&self) -> bool {
        self.recurrence_id.is_some()
    }
}
