use super::{mode, tally};
use crate::data::model::{TripTable, BIRTH_YEAR, GENDER};
use crate::error::BikeShareError;

/// User-type counts and, when `with_demographics` is set, gender counts and
/// birth-year extremes.
///
/// Without demographics the gender and birth-year lines are left out
/// entirely, whatever columns the table happens to carry.
pub fn users(table: &TripTable, with_demographics: bool) -> Result<String, BikeShareError> {
    if table.is_empty() {
        return Err(BikeShareError::EmptyResult);
    }
    if with_demographics {
        for column in [GENDER, BIRTH_YEAR] {
            if !table.has_column(column) {
                return Err(BikeShareError::SchemaMismatch(column.to_string()));
            }
        }
    }

    let mut output = String::from("User Information:\n\n");

    let user_types = tally(table.records.iter().filter_map(|t| t.user_type.as_deref()));
    for (user_type, n) in &user_types {
        output.push_str(&format!("The number of {}s is {n}.\n", user_type.to_lowercase()));
    }

    if !with_demographics {
        return Ok(output);
    }

    output.push('\n');
    let genders = tally(table.records.iter().filter_map(|t| t.gender.as_deref()));
    for (gender, n) in &genders {
        output.push_str(&format!("The number of {} users is {n}.\n", gender.to_lowercase()));
    }

    let years: Vec<i32> = table.records.iter().filter_map(|t| t.birth_year).collect();
    match (years.iter().min(), years.iter().max(), mode(years.iter().copied())) {
        (Some(earliest), Some(latest), Some(common)) => {
            output.push_str(&format!(
                "\nThe earliest user birth year is {earliest}.\n\
                 The most recent user birth year is {latest}.\n\
                 The most common user birth year is {common}.\n"
            ));
        }
        _ => output.push_str("\nNo birth years were recorded for these trips.\n"),
    }

    Ok(output)
}
