use std::collections::BTreeSet;

use chrono::Datelike;

use super::model::{City, TripTable};
use crate::error::{BikeShareError, EmptyField};
use crate::stats::ReportKind;

/// Months covered by the trip logs (1 = January).
pub const MONTH_RANGE: std::ops::RangeInclusive<u32> = 1..=6;

/// Weekdays, 0 = Monday.
pub const WEEKDAY_RANGE: std::ops::RangeInclusive<u32> = 0..=6;

// ---------------------------------------------------------------------------
// FilterSelection – what the user asked for
// ---------------------------------------------------------------------------

/// An immutable query: city, months, weekdays and report packages.
///
/// Construction fails when either the month or the weekday set is empty, so
/// a `FilterSelection` always describes a meaningful query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    city: City,
    months: BTreeSet<u32>,
    weekdays: BTreeSet<u32>,
    reports: BTreeSet<ReportKind>,
}

impl FilterSelection {
    /// Values outside [`MONTH_RANGE`] / [`WEEKDAY_RANGE`] are dropped before
    /// the emptiness check.
    pub fn new(
        city: City,
        months: impl IntoIterator<Item = u32>,
        weekdays: impl IntoIterator<Item = u32>,
        reports: impl IntoIterator<Item = ReportKind>,
    ) -> Result<Self, BikeShareError> {
        let months: BTreeSet<u32> = months.into_iter().filter(|m| MONTH_RANGE.contains(m)).collect();
        let weekdays: BTreeSet<u32> = weekdays
            .into_iter()
            .filter(|d| WEEKDAY_RANGE.contains(d))
            .collect();

        if months.is_empty() {
            return Err(BikeShareError::EmptySelection(EmptyField::Months));
        }
        if weekdays.is_empty() {
            return Err(BikeShareError::EmptySelection(EmptyField::Weekdays));
        }

        Ok(FilterSelection {
            city,
            months,
            weekdays,
            reports: reports.into_iter().collect(),
        })
    }

    /// Every month, every weekday, every report.
    #[cfg(test)]
    pub fn everything(city: City) -> Self {
        FilterSelection {
            city,
            months: MONTH_RANGE.collect(),
            weekdays: WEEKDAY_RANGE.collect(),
            reports: ReportKind::ALL.into_iter().collect(),
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn months(&self) -> &BTreeSet<u32> {
        &self.months
    }

    pub fn weekdays(&self) -> &BTreeSet<u32> {
        &self.weekdays
    }

    pub fn reports(&self) -> &BTreeSet<ReportKind> {
        &self.reports
    }
}

// ---------------------------------------------------------------------------
// Row filtering
// ---------------------------------------------------------------------------

/// Return indices of trips whose start time falls in one of `months` AND on
/// one of `weekdays`.
pub fn filtered_indices(
    table: &TripTable,
    months: &BTreeSet<u32>,
    weekdays: &BTreeSet<u32>,
) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, trip)| {
            months.contains(&trip.start_time.month())
                && weekdays.contains(&trip.start_time.weekday().num_days_from_monday())
        })
        .map(|(i, _)| i)
        .collect()
}

/// Narrow `table` to the selection's months and weekdays, keeping row order.
pub fn apply(table: &TripTable, selection: &FilterSelection) -> TripTable {
    let indices = filtered_indices(table, &selection.months, &selection.weekdays);
    log::info!(
        "Filter kept {} of {} trips (months {:?}, weekdays {:?})",
        indices.len(),
        table.len(),
        selection.months,
        selection.weekdays
    );
    table.select(&indices)
}
