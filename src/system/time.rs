//! Time keeping module for PineTime
//!
//! The device has no battery-backed RTC, so wall-clock time is derived from a
//! reference point (the build time, unless set otherwise) plus the uptime
//! elapsed since that reference was taken.

use core::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike};

/// Wall-clock time and locale preferences
pub trait Clock {
    /// Current local time
    fn now(&self) -> NaiveDateTime;

    /// Preferred hour format, read every time the clock label is formatted
    fn hour_format(&self) -> HourFormat;
}

/// 12 or 24 hour clock display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HourFormat {
    /// `01:05` for 13:05, no AM/PM suffix
    Twelve,
    /// `13:05`
    TwentyFour,
}

impl HourFormat {
    pub fn is_24h(self) -> bool {
        self == HourFormat::TwentyFour
    }

    /// Decode the one-byte wire value, non-zero meaning 24 hour clock
    pub fn from_flag(flag: u8) -> Self {
        if flag == 0 {
            HourFormat::Twelve
        } else {
            HourFormat::TwentyFour
        }
    }

    /// One-byte wire value, `1` for 24 hour clock
    pub fn as_flag(self) -> u8 {
        self.is_24h() as u8
    }
}

/// Hour format preference that can be changed at runtime through a shared
/// reference, e.g. from the BLE settings service.
pub struct HourFormatSetting {
    is_24h: AtomicBool,
}

impl HourFormatSetting {
    pub const fn new(format: HourFormat) -> Self {
        Self {
            is_24h: AtomicBool::new(matches!(format, HourFormat::TwentyFour)),
        }
    }

    pub fn get(&self) -> HourFormat {
        if self.is_24h.load(Ordering::Relaxed) {
            HourFormat::TwentyFour
        } else {
            HourFormat::Twelve
        }
    }

    pub fn set(&self, format: HourFormat) {
        debug!("Hour format set to 24h: {}", format.is_24h());
        self.is_24h.store(format.is_24h(), Ordering::Relaxed);
    }
}

/// Granularity of the tick subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl TickUnit {
    /// Length of one unit in seconds
    pub const fn period_secs(self) -> u32 {
        match self {
            TickUnit::Second => 1,
            TickUnit::Minute => 60,
            TickUnit::Hour => 3_600,
            TickUnit::Day => 86_400,
        }
    }

    /// Seconds from `now` until the next boundary of this unit.
    ///
    /// Always in `1..=period_secs()`, so a ticker sleeping for this long never
    /// fires twice for the same boundary.
    pub fn secs_until_next(self, now: NaiveDateTime) -> u32 {
        let elapsed = match self {
            TickUnit::Second => 0,
            TickUnit::Minute => now.second(),
            TickUnit::Hour => now.minute() * 60 + now.second(),
            TickUnit::Day => now.num_seconds_from_midnight(),
        };
        self.period_secs() - elapsed
    }
}

/// Wall-clock time paired with the uptime it was taken at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeReference {
    /// Clock time (UTC)
    time: NaiveDateTime,
    /// Related system uptime in microseconds
    uptime_micros: u64,
}

impl Default for TimeReference {
    fn default() -> Self {
        Self {
            time: DateTime::UNIX_EPOCH.naive_utc(),
            uptime_micros: 0,
        }
    }
}

impl TimeReference {
    /// Create new time reference from a UTC timestamp in seconds
    pub fn from_epoch(secs: i64, uptime_micros: u64) -> Self {
        Self {
            time: DateTime::from_timestamp(secs, 0)
                .map(|utc| utc.naive_utc())
                .unwrap_or(DateTime::UNIX_EPOCH.naive_utc()),
            uptime_micros,
        }
    }

    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime, uptime_micros: u64) -> Self {
        Self {
            time,
            uptime_micros,
        }
    }
}

pub struct TimeManager {
    reference: TimeReference,
    /// Offset of local time to UTC
    offset_secs: i32,
    hour_format: HourFormatSetting,
}

impl TimeManager {
    /// Initialize time measurement on boot
    pub fn init(reference: TimeReference, offset_secs: i32, hour_format: HourFormat) -> Self {
        Self {
            reference,
            offset_secs,
            hour_format: HourFormatSetting::new(hour_format),
        }
    }

    /// Local time at the given uptime
    pub fn local_time_at(&self, uptime_micros: u64) -> NaiveDateTime {
        let elapsed = uptime_micros.saturating_sub(self.reference.uptime_micros);
        self.reference.time
            + TimeDelta::microseconds(elapsed as i64)
            + TimeDelta::seconds(self.offset_secs as i64)
    }

    pub fn hour_format(&self) -> HourFormat {
        self.hour_format.get()
    }

    /// Preference cell shared with whoever may change it while running
    pub fn hour_format_setting(&self) -> &HourFormatSetting {
        &self.hour_format
    }
}

#[cfg(feature = "embedded")]
impl Clock for TimeManager {
    fn now(&self) -> NaiveDateTime {
        self.local_time_at(embassy_time::Instant::now().as_micros())
    }

    fn hour_format(&self) -> HourFormat {
        self.hour_format.get()
    }
}
