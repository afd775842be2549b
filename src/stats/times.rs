use chrono::{Datelike, Month, Timelike};

use super::mode;
use crate::data::model::TripTable;
use crate::error::BikeShareError;

pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Peak month, weekday and hour of trip start times.
pub fn times(table: &TripTable) -> Result<String, BikeShareError> {
    let starts = || table.records.iter().map(|t| t.start_time);

    let month = mode(starts().map(|t| t.month())).ok_or(BikeShareError::EmptyResult)?;
    let weekday = mode(starts().map(|t| t.weekday().num_days_from_monday()))
        .ok_or(BikeShareError::EmptyResult)?;
    let hour = mode(starts().map(|t| t.hour())).ok_or(BikeShareError::EmptyResult)?;

    let month_name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("Unknown", |m| m.name());

    Ok(format!(
        "Times Information:\n\n\
         The most common month of travel is {month_name}.\n\
         The most common day of the week of travel is {}.\n\
         The most common hour of the day to travel is {hour:02}:00.\n\n",
        WEEKDAY_NAMES[weekday as usize]
    ))
}
