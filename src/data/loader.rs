use std::io;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use chrono::NaiveDateTime;

use super::model::{
    City, TripRecord, TripTable, BIRTH_YEAR, DEMOGRAPHIC_COLUMNS, END_STATION, END_TIME, GENDER,
    REQUIRED_COLUMNS, START_STATION, START_TIME, TIMESTAMP_FORMAT, TRIP_DURATION, USER_TYPE,
};
use crate::error::BikeShareError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every trip of `city` from its file inside `data_dir`.
pub fn load_city(data_dir: &Path, city: City) -> Result<TripTable> {
    let path = data_dir.join(city.file_name());
    let table = load_csv(&path).with_context(|| format!("loading {city} trips"))?;
    log::info!(
        "Loaded {} trips for {city} from {} with columns {:?}",
        table.len(),
        path.display(),
        table.columns
    );
    Ok(table)
}

/// Load a trip log from a CSV file.
pub fn load_csv(path: &Path) -> Result<TripTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_trips(file)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Column positions resolved from the header row.
struct Layout {
    id: Option<usize>,
    start_time: usize,
    end_time: usize,
    duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Layout {
    fn from_headers(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| -> Result<usize> {
            find(name).ok_or_else(|| BikeShareError::SchemaMismatch(name.to_string()).into())
        };

        // A leading column that is not one of ours is the per-trip identifier.
        let id = match headers.first() {
            Some(h) if !is_named_column(h) => Some(0),
            _ => None,
        };

        Ok(Layout {
            id,
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(GENDER),
            birth_year: find(BIRTH_YEAR),
        })
    }
}

fn is_named_column(header: &str) -> bool {
    REQUIRED_COLUMNS
        .iter()
        .chain(DEMOGRAPHIC_COLUMNS.iter())
        .any(|c| *c == header)
}

/// Parse trips from any CSV source with a header row.
///
/// Missing values (blank, `NA`, `NaN`, `null`, ...) in the station, `User Type`,
/// `Gender` and `Birth Year` columns become `None`; a missing or
/// unparseable time or duration is an error naming the row.
pub fn read_trips<R: io::Read>(source: R) -> Result<TripTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let layout = Layout::from_headers(&headers)?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != layout.id)
        .map(|(_, h)| h.clone())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim();

        let trip_id = match layout.id {
            Some(idx) => optional_text(field(idx)).unwrap_or_default(),
            None => row_no.to_string(),
        };

        records.push(TripRecord {
            trip_id,
            start_time: parse_timestamp(field(layout.start_time), row_no, START_TIME)?,
            end_time: parse_timestamp(field(layout.end_time), row_no, END_TIME)?,
            duration_secs: parse_duration(field(layout.duration), row_no)?,
            start_station: optional_text(field(layout.start_station)),
            end_station: optional_text(field(layout.end_station)),
            user_type: optional_text(field(layout.user_type)),
            gender: layout.gender.and_then(|idx| optional_text(field(idx))),
            birth_year: match layout.birth_year {
                Some(idx) => parse_birth_year(field(idx), row_no)?,
                None => None,
            },
        });
    }

    log::debug!("Parsed {} CSV rows", records.len());
    Ok(TripTable::new(records, columns))
}

// -- Cell parsers --

/// Cell values the trip logs use for "no data".
const MISSING_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a trimmed cell holds no value.
fn is_missing(s: &str) -> bool {
    MISSING_TOKENS.contains(&s)
}

fn parse_timestamp(s: &str, row: usize, col: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a timestamp"))
}

fn parse_duration(s: &str, row: usize) -> Result<f64> {
    if is_missing(s) {
        bail!("Row {row}, {TRIP_DURATION}: value is missing");
    }
    let secs = s
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {TRIP_DURATION}: '{s}' is not a number"))?;
    ensure!(
        secs.is_finite(),
        "Row {row}, {TRIP_DURATION}: '{s}' is not a finite number"
    );
    Ok(secs)
}

/// Birth years are often written as floats (`1989.0`) because of gaps.
fn parse_birth_year(s: &str, row: usize) -> Result<Option<i32>> {
    if is_missing(s) {
        return Ok(None);
    }
    let year = s
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {BIRTH_YEAR}: '{s}' is not a year"))?;
    ensure!(
        year.is_finite() && year.abs() < f64::from(i32::MAX),
        "Row {row}, {BIRTH_YEAR}: '{s}' is not a year"
    );
    Ok(Some(year as i32))
}

fn optional_text(s: &str) -> Option<String> {
    if is_missing(s) {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0
955915,2017-05-25 18:19:03,2017-05-25 18:45:53,1610,Theater on the Lake,Sheffield Ave & Waveland Ave,Subscriber,Female,1992.0
9031,2017-01-04 08:27:49,2017-01-04 08:34:45,416,May St & Taylor St,Wood St & Taylor St,Customer,,
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
";

    #[test]
    fn reads_demographic_columns_when_present() {
        let table = read_trips(CHICAGO.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert!(table.has_column(GENDER));
        assert!(table.has_column(BIRTH_YEAR));
        assert!(!table.columns.iter().any(|c| c.is_empty()));

        let first = &table.records[0];
        assert_eq!(first.trip_id, "1423854");
        assert_eq!(first.duration_secs, 321.0);
        assert_eq!(first.gender.as_deref(), Some("Male"));
        assert_eq!(first.birth_year, Some(1992));

        let last = &table.records[2];
        assert_eq!(last.gender, None);
        assert_eq!(last.birth_year, None);
    }

    #[test]
    fn washington_layout_has_no_demographics() {
        let table = read_trips(WASHINGTON.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.has_column(GENDER));
        assert!((table.records[0].duration_secs - 489.066).abs() < 1e-9);
    }

    #[test]
    fn missing_required_column_is_schema_mismatch() {
        let csv = "Start Time,End Time,Trip Duration,Start Station,End Station\n";
        let err = read_trips(csv.as_bytes()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<BikeShareError>(),
            Some(&BikeShareError::SchemaMismatch(USER_TYPE.to_string()))
        );
    }

    #[test]
    fn row_index_is_the_identifier_without_leading_column() {
        let csv = "\
Start Time,End Time,Trip Duration,Start Station,End Station,User Type
2017-01-01 00:00:00,2017-01-01 00:10:00,600,A,B,Customer
2017-01-01 01:00:00,2017-01-01 01:10:00,600,A,B,Customer
";
        let table = read_trips(csv.as_bytes()).unwrap();
        let ids: Vec<&str> = table.records.iter().map(|r| r.trip_id.as_str()).collect();
        assert_eq!(ids, ["0", "1"]);
        assert_eq!(table.columns.len(), 6);
    }

    #[test]
    fn bad_timestamp_names_the_row() {
        let csv = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,yesterday,2017-01-01 00:10:00,600,A,B,Customer
";
        let err = read_trips(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0, Start Time"));
    }

    #[test]
    fn load_city_reads_the_city_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("washington.csv")).unwrap();
        file.write_all(WASHINGTON.as_bytes()).unwrap();

        let table = load_city(dir.path(), City::Washington).unwrap();
        assert_eq!(
            table.records[0].start_station.as_deref(),
            Some("14th & Belmont St NW")
        );
    }

    #[test]
    fn load_city_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_city(dir.path(), City::Chicago).unwrap_err();
        assert!(format!("{err:#}").contains("chicago.csv"));
    }

    #[test]
    fn missing_value_tokens_become_none() {
        let csv = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
NA,2017-01-02 08:00:00,2017-01-02 08:10:00,600,null,N/A,NaN,NA,NaN
7,2017-01-02 09:00:00,2017-01-02 09:10:00,600,A,B,Subscriber,nan,
";
        let table = read_trips(csv.as_bytes()).unwrap();
        let first = &table.records[0];
        assert_eq!(first.trip_id, "");
        assert_eq!(first.start_station, None);
        assert_eq!(first.end_station, None);
        assert_eq!(first.user_type, None);
        assert_eq!(first.gender, None);
        assert_eq!(first.birth_year, None);

        let second = &table.records[1];
        assert_eq!(second.trip_id, "7");
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
    }

    #[test]
    fn missing_duration_is_an_error() {
        let csv = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-01-02 08:00:00,2017-01-02 08:10:00,NaN,A,B,Subscriber
";
        let err = read_trips(csv.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0, Trip Duration: value is missing"));
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let duration = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
1,2017-01-02 08:00:00,2017-01-02 08:10:00,inf,A,B,Subscriber
";
        let err = read_trips(duration.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("not a finite number"));

        let year = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-01-02 08:00:00,2017-01-02 08:10:00,600,A,B,Subscriber,Male,-inf
";
        let err = read_trips(year.as_bytes()).unwrap_err();
        assert!(format!("{err:#}").contains("Row 0, Birth Year: '-inf' is not a year"));
    }

    #[test]
    fn missing_tokens_are_case_sensitive_words() {
        assert!(is_missing(""));
        assert!(is_missing("NaN"));
        assert!(is_missing("N/A"));
        assert!(!is_missing("Nan Station"));
        assert!(!is_missing("0"));
    }
}
