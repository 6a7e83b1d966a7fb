//! Test-only calendar/component builder helpers, kept terse so recurrence
//! scenarios read as data rather than boilerplate.

pub mod macros;

use chrono::NaiveDate;

use crate::instant::IcalValue;

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> IcalValue {
    IcalValue::UtcDateTime(
        NaiveDate::from_ymd_opt(y, mo, d)
            .expect("valid test date")
            .and_hms_opt(h, mi, s)
            .expect("valid test time"),
    )
}

pub fn zoned(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, tzid: &str) -> IcalValue {
    IcalValue::ZonedDateTime {
        naive: NaiveDate::from_ymd_opt(y, mo, d)
            .expect("valid test date")
            .and_hms_opt(h, mi, s)
            .expect("valid test time"),
        tzid: tzid.to_string(),
    }
}

pub fn date_only(y: i32, mo: u32, d: u32) -> IcalValue {
    IcalValue::Date(NaiveDate::from_ymd_opt(y, mo, d).expect("valid test date"))
}
