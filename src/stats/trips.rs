use std::collections::HashSet;

use crate::data::model::TripTable;
use crate::error::BikeShareError;

/// 365.25 days.
pub const SECS_PER_YEAR: u64 = 31_557_600;
pub const SECS_PER_DAY: u64 = 86_400;
pub const SECS_PER_HOUR: u64 = 3_600;
pub const SECS_PER_MINUTE: u64 = 60;

/// Floor-divided breakdown of a total travel time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalTime {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
}

impl TotalTime {
    pub fn from_secs(secs: u64) -> Self {
        let rem = secs % SECS_PER_YEAR;
        TotalTime {
            years: secs / SECS_PER_YEAR,
            days: rem / SECS_PER_DAY,
            hours: (rem % SECS_PER_DAY) / SECS_PER_HOUR,
        }
    }
}

/// Total and average trip duration.
///
/// The average divides by the number of distinct trip identifiers, so rows
/// sharing an identifier count once in the denominator. Blank identifiers
/// are not counted; when every identifier is blank, each row counts once.
pub fn trips(table: &TripTable) -> Result<String, BikeShareError> {
    if table.is_empty() {
        return Err(BikeShareError::EmptyResult);
    }
    let distinct: HashSet<&str> = table
        .records
        .iter()
        .map(|t| t.trip_id.as_str())
        .filter(|id| !id.is_empty())
        .collect();
    let denominator = if distinct.is_empty() {
        table.len()
    } else {
        distinct.len()
    };

    let total: f64 = table.records.iter().map(|t| t.duration_secs).sum();
    let average = total / denominator as f64;

    // Flooring before the integer divisions gives the same units as
    // floor-dividing the fractional sum.
    let total = TotalTime::from_secs(whole_secs(total));
    let average = whole_secs(average);

    Ok(format!(
        "Trips Information:\n\n\
         The total travel time is {} years, {} days, and {:02} hours.\n\
         The average travel time is {:02} minutes and {:02} seconds.\n\n",
        total.years,
        total.days,
        total.hours,
        average / SECS_PER_MINUTE,
        average % SECS_PER_MINUTE
    ))
}

fn whole_secs(secs: f64) -> u64 {
    secs.max(0.0).floor() as u64
}
