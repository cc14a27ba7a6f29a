//! RFC 822 date-time values as required by RSS 2.0.
//!
//! Dates are rendered as `Day, DD Mon YYYY HH:MM:SS TZ` with English day and
//! month names. The zone abbreviation comes from the tz database through
//! `chrono-tz`, so an instant formatted for `Australia/Darwin` ends in `ACST`.
//! Offsets without an alphabetic name are written as `+hhmm`.

use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config::{ConfigError, FeedConfig};

const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";
const RFC822_NUMERIC_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// An immutable, pre-formatted RFC 822 date.
///
/// Once constructed only the formatted string is kept; nothing parses it back
/// into a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rfc822Date(String);

impl Rfc822Date {
    /// Stores an externally formatted date verbatim.
    ///
    /// The grammar is not checked. Callers supplying dates from other
    /// systems are trusted to pass a conformant string.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Formats a calendar timestamp in its own time zone.
    ///
    /// Named zones (`UTC`, `ACST`) keep their abbreviation. Fixed and local
    /// offsets, and tz database zones whose abbreviation is numeric, are
    /// written as `+hhmm`.
    pub fn from_datetime<Z>(datetime: &DateTime<Z>) -> Self
    where
        Z: TimeZone,
        Z::Offset: fmt::Display,
    {
        let zone = datetime.offset().to_string();
        let named = !zone.is_empty() && zone.chars().all(|c| c.is_ascii_alphabetic());
        let format = if named {
            RFC822_FORMAT
        } else {
            RFC822_NUMERIC_FORMAT
        };
        Self(datetime.format(format).to_string())
    }

    /// Formats an instant in the system's configured time zone.
    pub fn from_instant(instant: SystemTime) -> Self {
        Self::from_instant_in(instant, system_time_zone())
    }

    /// Formats an instant in an explicit time zone.
    pub fn from_instant_in(instant: SystemTime, zone: Tz) -> Self {
        let utc: DateTime<Utc> = instant.into();
        Self::from_datetime(&utc.with_timezone(&zone))
    }

    /// Formats an instant in the zone `config` selects.
    pub fn from_instant_with(
        instant: SystemTime,
        config: &FeedConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self::from_instant_in(instant, config.time_zone()?))
    }

    /// The current time in the system's configured time zone.
    pub fn now() -> Self {
        Self::from_instant(SystemTime::now())
    }

    pub fn now_in(zone: Tz) -> Self {
        Self::from_instant_in(SystemTime::now(), zone)
    }

    /// The current time in the zone `config` selects.
    pub fn now_with(config: &FeedConfig) -> Result<Self, ConfigError> {
        Self::from_instant_with(SystemTime::now(), config)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Rfc822Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Rfc822Date {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl From<String> for Rfc822Date {
    fn from(raw: String) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SystemTime> for Rfc822Date {
    fn from(instant: SystemTime) -> Self {
        Self::from_instant(instant)
    }
}

/// Resolves the time zone the host is configured with.
///
/// Checks the `TZ` environment variable first, then asks the platform through
/// `iana-time-zone` (`/etc/localtime`, `/etc/timezone`, macOS and Windows
/// settings), and falls back to UTC.
pub fn system_time_zone() -> Tz {
    resolve_time_zone(std::env::var("TZ").ok().as_deref())
}

fn resolve_time_zone(tz_env: Option<&str>) -> Tz {
    if let Some(value) = tz_env.filter(|v| !v.is_empty()) {
        match zone_from_name(value) {
            Some(zone) => {
                tracing::debug!(zone = %zone, "Using time zone from TZ");
                return zone;
            }
            None => tracing::warn!(tz = %value, "Ignoring unrecognised TZ value"),
        }
    }

    match iana_time_zone::get_timezone() {
        Ok(name) => match zone_from_name(&name) {
            Some(zone) => {
                tracing::debug!(zone = %zone, "Using system time zone");
                return zone;
            }
            None => tracing::warn!(zone = %name, "System time zone not in tz database"),
        },
        Err(e) => tracing::warn!(error = %e, "Could not determine system time zone"),
    }

    tracing::debug!("Falling back to UTC");
    Tz::UTC
}

/// Parses an IANA zone name. Accepts the POSIX `:` prefix and paths such as
/// `/usr/share/zoneinfo/Europe/Berlin`.
fn zone_from_name(value: &str) -> Option<Tz> {
    let name = value.trim().trim_start_matches(':');
    let name = name.split_once("zoneinfo/").map_or(name, |(_, zone)| zone);
    name.parse().ok()
}
