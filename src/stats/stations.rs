use super::{most_common, tally};
use crate::data::model::TripTable;
use crate::error::BikeShareError;

/// Most used start station, end station and start→end pair.
///
/// Rows with a blank station are left out of that station's count, and out
/// of the pair count.
pub fn stations(table: &TripTable) -> Result<String, BikeShareError> {
    let trips = &table.records;

    let (start, start_n) =
        most_common(tally(trips.iter().filter_map(|t| t.start_station.as_deref())))
            .ok_or(BikeShareError::EmptyResult)?;
    let (end, end_n) = most_common(tally(trips.iter().filter_map(|t| t.end_station.as_deref())))
        .ok_or(BikeShareError::EmptyResult)?;
    let ((from, to), pair_n) = most_common(tally(
        trips
            .iter()
            .filter_map(|t| t.start_station.as_deref().zip(t.end_station.as_deref())),
    ))
    .ok_or(BikeShareError::EmptyResult)?;

    Ok(format!(
        "Stations Information:\n\n\
         The most common start station is {start}, which was used {start_n} times.\n\
         The most common end station is {end}, which was used {end_n} times.\n\
         The most common trip is {from} to {to}, which occurred {pair_n} times.\n\n"
    ))
}
