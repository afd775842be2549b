use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::BikeShareError;

// ---------------------------------------------------------------------------
// Column names shared by the loader, the statistics and the table view
// ---------------------------------------------------------------------------

pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

/// Columns every city file carries.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    START_TIME,
    END_TIME,
    TRIP_DURATION,
    START_STATION,
    END_STATION,
    USER_TYPE,
];

/// Columns only present for cities with demographics.
pub const DEMOGRAPHIC_COLUMNS: [&str; 2] = [GENDER, BIRTH_YEAR];

/// Timestamp layout used by the trip logs.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// City – the three supported datasets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York",
            City::Washington => "Washington",
        }
    }

    /// File holding this city's trips inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Washington's logs have no gender or birth-year columns.
    pub fn has_demographics(self) -> bool {
        !matches!(self, City::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BikeShareError::UnknownCity(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TripRecord – one row of a city file
// ---------------------------------------------------------------------------

/// A single bike trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    /// Value of the leading identifier column, or the row index when the
    /// file has none. Empty when the file left the identifier blank.
    pub trip_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    /// Seconds; some cities log fractional durations.
    pub duration_secs: f64,
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl TripRecord {
    /// Render one cell for the itemised table.
    pub fn cell(&self, column: &str) -> String {
        match column {
            START_TIME => self.start_time.format(TIMESTAMP_FORMAT).to_string(),
            END_TIME => self.end_time.format(TIMESTAMP_FORMAT).to_string(),
            TRIP_DURATION => format_duration(self.duration_secs),
            START_STATION => self.start_station.clone().unwrap_or_default(),
            END_STATION => self.end_station.clone().unwrap_or_default(),
            USER_TYPE => self.user_type.clone().unwrap_or_default(),
            GENDER => self.gender.clone().unwrap_or_default(),
            BIRTH_YEAR => self.birth_year.map(|y| y.to_string()).unwrap_or_default(),
            _ => String::new(),
        }
    }
}

fn format_duration(secs: f64) -> String {
    if secs.fract() == 0.0 {
        format!("{secs:.0}")
    } else {
        format!("{secs:.3}")
    }
}

// ---------------------------------------------------------------------------
// TripTable – the loaded (and possibly filtered) dataset
// ---------------------------------------------------------------------------

/// Ordered trips for one city plus the named columns the file provided.
///
/// Filtering and sorting return new tables; records are never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    pub records: Vec<TripRecord>,
    /// Named columns in file order (the leading identifier column excluded).
    pub columns: Vec<String>,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, columns: Vec<String>) -> Self {
        TripTable { records, columns }
    }

    /// Number of trips.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no trips.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// New table holding the rows at `indices`, in the order given.
    pub fn select(&self, indices: &[usize]) -> TripTable {
        TripTable {
            records: indices.iter().map(|&i| self.records[i].clone()).collect(),
            columns: self.columns.clone(),
        }
    }

    /// New table sorted ascending by start time; equal times keep file order.
    pub fn sorted_by_start(&self) -> TripTable {
        let mut records = self.records.clone();
        records.sort_by_key(|r| r.start_time);
        TripTable {
            records,
            columns: self.columns.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures for unit tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn city_from_str_accepts_display_names() {
        assert_eq!("Chicago".parse::<City>(), Ok(City::Chicago));
        assert_eq!("new york".parse::<City>(), Ok(City::NewYork));
        assert_eq!(" Washington ".parse::<City>(), Ok(City::Washington));
    }

    #[test]
    fn city_from_str_rejects_unknown_names() {
        assert_eq!(
            "Boston".parse::<City>(),
            Err(BikeShareError::UnknownCity("Boston".to_string()))
        );
    }

    #[test]
    fn only_washington_lacks_demographics() {
        assert!(City::Chicago.has_demographics());
        assert!(City::NewYork.has_demographics());
        assert!(!City::Washington.has_demographics());
        assert_eq!(City::NewYork.file_name(), "new_york_city.csv");
    }

    #[test]
    fn sorted_by_start_is_stable() {
        let t = table(
            vec![
                trip(0, "2017-01-02 09:00:00", "B", "X"),
                trip(1, "2017-01-01 09:00:00", "A", "X"),
                trip(2, "2017-01-02 09:00:00", "C", "X"),
            ],
            false,
        );
        let sorted = t.sorted_by_start();
        let ids: Vec<&str> = sorted.records.iter().map(|r| r.trip_id.as_str()).collect();
        assert_eq!(ids, ["1", "0", "2"]);
        // original untouched
        assert_eq!(t.records[0].trip_id, "0");
    }

    #[test]
    fn cell_formats_each_column() {
        let mut r = trip(7, "2017-06-23 15:09:32", "Wood St", "Ashland Ave");
        r.duration_secs = 489.066;
        r.birth_year = Some(1992);
        assert_eq!(r.cell(START_TIME), "2017-06-23 15:09:32");
        assert_eq!(r.cell(END_TIME), "2017-06-23 15:19:32");
        assert_eq!(r.cell(TRIP_DURATION), "489.066");
        assert_eq!(r.cell(BIRTH_YEAR), "1992");
        assert_eq!(r.cell(GENDER), "");
    }
}
