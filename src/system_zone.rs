//! System timezone detection, isolated behind a provider so tests never
//! depend on the host machine's configured zone.

use crate::zone::{ensure_zone, Zone};

/// Supplies the fallback zone used when no other source (explicit `TZID`,
/// zoned input, enclosing calendar `VTIMEZONE`) names one.
pub trait SystemZoneProvider {
    fn detect(&self) -> Zone;
}

/// Detects the host's configured timezone via `TZ`, `/etc/timezone`, or the
/// `/etc/localtime` symlink, falling back to UTC. Delegates to
/// `iana_time_zone`, which already does this probing portably.
pub struct HostSystemZoneProvider;

impl SystemZoneProvider for HostSystemZoneProvider {
    fn detect(&self) -> Zone {
        match iana_time_zone::get_timezone() {
            Ok(name) => ensure_zone(&name),
            Err(error) => {
                tracing::warn!(%error, "could not detect system timezone, falling back to UTC");
                Zone::UTC
            }
        }
    }
}

/// Fixed zone provider for tests and for embedding applications that want to
/// pin the fallback zone deterministically.
pub struct FixedSystemZoneProvider(pub Zone);

impl SystemZoneProvider for FixedSystemZoneProvider {
    fn detect(&self) -> Zone {
        self.0
    }
}
