//! Clock and date label formatting

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::layer::Label;
use crate::{system::time::HourFormat, Error};

/// Bytes reserved for the clock label, fits "00:00"
pub const TIME_BUF_LEN: usize = 6;
/// Bytes reserved for the date label, fits "Wed 30 Sep"
pub const DATE_BUF_LEN: usize = 16;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Write `HH:MM` (24h) or `hh:MM` (12h, no AM/PM) into the clock label
pub fn write_clock(
    label: &mut Label<TIME_BUF_LEN>,
    time: &NaiveDateTime,
    format: HourFormat,
) -> Result<(), Error> {
    let hour = match format {
        HourFormat::TwentyFour => time.hour(),
        HourFormat::Twelve => time.hour12().1,
    };
    label.format(format_args!("{:02}:{:02}", hour, time.minute()))
}

/// Write `<weekday> <day> <month>`, e.g. `Tue 23 Sep`, into the date label
pub fn write_date(label: &mut Label<DATE_BUF_LEN>, time: &NaiveDateTime) -> Result<(), Error> {
    label.format(format_args!(
        "{} {:02} {}",
        WEEKDAYS[time.weekday().num_days_from_monday() as usize],
        time.day(),
        MONTHS[time.month0() as usize],
    ))
}
