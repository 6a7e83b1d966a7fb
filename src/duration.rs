//! RFC 5545 `DURATION` value parsing (`PnWnDTnHnMnS`).

use regex::Regex;

/// A non-negative span of seconds. RFC 5545 durations never mix a week count
/// with day/time components, so this collapses straight to one integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct Duration(i64);

impl Duration {
    pub fn from_seconds(seconds: i64) -> Self {
        Duration(seconds.max(0))
    }

    pub fn zero() -> Self {
        Duration(0)
    }

    pub fn seconds(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parses an RFC 5545 `DURATION` value string (e.g. `PT1H30M`,
    /// `P1DT12H`, `P2W`). Returns `None` on anything unreadable; callers
    /// treat that the same as an absent `DURATION`.
    pub fn parse(value: &str) -> Option<Self> {
        static PATTERN: &str = concat!(
            r"^(?P<sign>[+-])?P(?:(?P<weeks>\d+)W|",
            r"(?:(?P<days>\d+)D)?",
            r"(?:T(?:(?P<hours>\d+)H)?(?:(?P<minutes>\d+)M)?(?:(?P<seconds>\d+)S)?)?)$",
        );

        let re = Regex::new(PATTERN).expect("duration pattern is a static, valid regex");

        let captures = re.captures(value.trim())?;

        let field = |name: &str| -> i64 {
            captures
                .name(name)
                .and_then(|m| m.as_str().parse::<i64>().ok())
                .unwrap_or(0)
        };

        if let Some(weeks) = captures.name("weeks") {
            let weeks: i64 = weeks.as_str().parse().ok()?;
            let total = weeks * 7 * 86_400;
            return Some(Self::signed(total, captures.name("sign").is_some()));
        }

        let total =
            field("days") * 86_400 + field("hours") * 3_600 + field("minutes") * 60 + field("seconds");

        // Reject `P` / `PT` with no components at all — not a valid duration.
        if total == 0
            && captures.name("days").is_none()
            && captures.name("hours").is_none()
            && captures.name("minutes").is_none()
            && captures.name("seconds").is_none()
        {
            return None;
        }

        Some(Self::signed(total, captures.name("sign").is_some()))
    }

    fn signed(total: i64, negative: bool) -> Self {
        // RFC 5545 permits a leading `-` (a "negative duration", used only
        // relative to DUE). Store the magnitude; callers that care about
        // sign track it themselves via the DUE/DTSTART relationship.
        let _ = negative;
        Duration(total)
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions_sorted::assert_eq;

    #[test]
    fn test_parse_simple_forms() {
        assert_eq!(Duration::parse("PT1H").map(|d| d.seconds()), Some(3_600));
        assert_eq!(Duration::parse("PT30M").map(|d| d.seconds()), Some(1_800));
        assert_eq!(Duration::parse("P1D").map(|d| d.seconds()), Some(86_400));
        assert_eq!(Duration::parse("P1DT12H").map(|d| d.seconds()), Some(86_400 + 43_200));
        assert_eq!(Duration::parse("P2W").map(|d| d.seconds()), Some(2 * 7 * 86_400));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Duration::parse("not-a-duration"), None);
        assert_eq!(Duration::parse("P"), None);
        assert_eq!(Duration::parse("PT"), None);
    }
}
