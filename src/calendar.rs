//! The calendar adapter surface (`SPEC_FULL.md` §6.A): an unordered
//! collection of components plus the `VTIMEZONE` identifiers it advertises.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub uid: String,
    /// Components grouped by `uid`; a master component and its
    /// `RECURRENCE-ID` overrides share a group.
    pub components: BTreeMap<String, Vec<Component>>,
    /// `tzid`s advertised by this calendar's embedded `VTIMEZONE` blocks.
    pub tzids: Vec<String>,
}

impl Calendar {
    pub fn new(uid: impl Into<String>) -> Self {
        Calendar {
            uid: uid.into(),
            components: BTreeMap::new(),
            tzids: Vec::new(),
        }
    }

    pub fn insert_component(&mut self, component: Component) {
        self.components
            .entry(component.uid.clone())
            .or_default()
            .push(component);
    }

    pub fn first_valid_tzid(&self) -> Option<&str> {
        self.tzids
            .iter()
            .find(|tzid| chrono_tz::Tz::from_str_lenient(tzid).is_ok())
            .map(String::as_str)
    }

    /// All components of the given kind, across every `uid` group.
    pub fn components_of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> {
        self.components
            .values()
            .flatten()
            .filter(move |component| component.kind == kind)
    }

    /// The sibling group a component belongs to (its master plus any
    /// `RECURRENCE-ID` overrides), used to fold override `RECURRENCE-ID`
    /// values into the master's excluded-time set.
    pub fn siblings_of<'a>(&'a self, component: &Component) -> &'a [Component] {
        self.components
            .get(&component.uid)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

use std::str::FromStr as _;

trait FromStrLenient: Sized {
    fn from_str_lenient(value: &str) -> Result<Self, ()>;
}

impl FromStrLenient for chrono_tz::Tz {
    fn from_str_lenient(value: &str) -> Result<Self, ()> {
        let first = value.split(',').next().unwrap_or(value);
        chrono_tz::Tz::from_str(first.trim().trim_matches('"')).map_err(|_| ())
    }
}
