//! Descriptive statistics over a filtered [`TripTable`].
//!
//! Each report package turns the table into a text block; packages are
//! concatenated in the fixed order Times, Stations, Trips, Users.
//!
//! Ties between equally frequent values always go to the smallest value in
//! natural order (lowest month / hour, alphabetically first station).

use std::collections::{BTreeMap, BTreeSet};

use crate::data::filter::FilterSelection;
use crate::data::model::TripTable;
use crate::error::BikeShareError;

pub mod stations;
pub mod times;
pub mod trips;
pub mod users;

// ---------------------------------------------------------------------------
// Report packages
// ---------------------------------------------------------------------------

/// One information package the user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReportKind {
    Times,
    Stations,
    Trips,
    Users,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Times,
        ReportKind::Stations,
        ReportKind::Trips,
        ReportKind::Users,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Times => "Times",
            ReportKind::Stations => "Stations",
            ReportKind::Trips => "Trips",
            ReportKind::Users => "Users",
        }
    }

    /// First line of the package's text block.
    pub fn heading(self) -> &'static str {
        match self {
            ReportKind::Times => "Times Information:",
            ReportKind::Stations => "Stations Information:",
            ReportKind::Trips => "Trips Information:",
            ReportKind::Users => "User Information:",
        }
    }

    pub fn run(self, table: &TripTable, with_demographics: bool) -> Result<String, BikeShareError> {
        match self {
            ReportKind::Times => times::times(table),
            ReportKind::Stations => stations::stations(table),
            ReportKind::Trips => trips::trips(table),
            ReportKind::Users => users::users(table, with_demographics),
        }
    }
}

pub const NO_PACKAGES: &str = "No information packages were selected.\n";
pub const NO_TRIPS: &str = "No trips match the selected filters.\n";

/// Build the full report for `selection` over an already filtered table.
///
/// Packages that cannot be computed are reported as not available instead
/// of aborting the whole report.
pub fn compose_report(table: &TripTable, selection: &FilterSelection) -> String {
    compose(table, selection.reports(), selection.city().has_demographics())
}

fn compose(table: &TripTable, reports: &BTreeSet<ReportKind>, with_demographics: bool) -> String {
    if reports.is_empty() {
        return NO_PACKAGES.to_string();
    }
    if table.is_empty() {
        log::warn!("Filtered table is empty, skipping {} report(s)", reports.len());
        return NO_TRIPS.to_string();
    }

    let mut output = String::new();
    for kind in reports {
        match kind.run(table, with_demographics) {
            Ok(text) => output.push_str(&text),
            Err(e) => {
                log::warn!("{} report not available: {e}", kind.label());
                output.push_str(&format!("{}\n\nNot available: {e}.\n\n", kind.heading()));
            }
        }
    }
    log::info!("Composed {} report(s) over {} trips", reports.len(), table.len());
    output
}

// ---------------------------------------------------------------------------
// Counting helpers
// ---------------------------------------------------------------------------

/// Group-by-count: occurrences of each value, in ascending value order.
pub(crate) fn tally<K: Ord>(values: impl IntoIterator<Item = K>) -> BTreeMap<K, usize> {
    let mut counts = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }
    counts
}

/// Value with the highest count and that count; the smallest value wins ties.
pub(crate) fn most_common<K: Ord>(counts: BTreeMap<K, usize>) -> Option<(K, usize)> {
    let mut best: Option<(K, usize)> = None;
    for (value, n) in counts {
        if best.as_ref().map_or(true, |(_, top)| n > *top) {
            best = Some((value, n));
        }
    }
    best
}

/// Most frequent value; `None` for an empty input.
pub(crate) fn mode<K: Ord>(values: impl IntoIterator<Item = K>) -> Option<K> {
    most_common(tally(values)).map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::test_support::{table, trip};
    use crate::data::model::City;

    #[test]
    fn mode_prefers_the_smallest_tied_value() {
        assert_eq!(mode([3, 1, 3, 1, 2]), Some(1));
        assert_eq!(mode(["b", "a", "b"]), Some("b"));
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn most_common_reports_the_count() {
        let counts = tally(["x", "y", "y", "z", "z"]);
        assert_eq!(most_common(counts), Some(("y", 2)));
    }

    #[test]
    fn no_packages_selected() {
        let t = table(vec![trip(0, "2017-01-02 08:00:00", "A", "B")], false);
        let sel = FilterSelection::new(City::Chicago, vec![1], vec![0], Vec::new()).unwrap();
        assert_eq!(compose_report(&t, &sel), NO_PACKAGES);
    }

    #[test]
    fn empty_table_is_reported_explicitly() {
        let t = table(Vec::new(), true);
        let sel = FilterSelection::everything(City::Chicago);
        assert_eq!(compose_report(&t, &sel), NO_TRIPS);
    }

    #[test]
    fn packages_are_concatenated_in_fixed_order() {
        let t = table(vec![trip(0, "2017-01-02 08:00:00", "A", "B")], false);
        let sel = FilterSelection::new(
            City::Washington,
            vec![1],
            vec![0],
            vec![ReportKind::Users, ReportKind::Times, ReportKind::Trips],
        )
        .unwrap();
        let report = compose_report(&t, &sel);

        let times = report.find("Times Information:").unwrap();
        let trips = report.find("Trips Information:").unwrap();
        let users = report.find("User Information:").unwrap();
        assert!(times < trips && trips < users);
        assert!(!report.contains("Stations Information:"));
    }

    #[test]
    fn schema_mismatch_becomes_a_not_available_block() {
        // Chicago claims demographics but this table has none.
        let t = table(vec![trip(0, "2017-01-02 08:00:00", "A", "B")], false);
        let sel = FilterSelection::new(City::Chicago, vec![1], vec![0], vec![ReportKind::Users])
            .unwrap();
        let report = compose_report(&t, &sel);
        assert!(report.starts_with("User Information:\n\nNot available: dataset has no 'Gender' column."));
    }
}
