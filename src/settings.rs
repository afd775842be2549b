use std::ffi::OsString;
use std::path::PathBuf;

use crate::data::model::City;
use crate::error::BikeShareError;

/// Environment variable naming the directory that holds the city files.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

/// Environment variable preselecting the city in the form.
pub const CITY_ENV: &str = "BIKESHARE_CITY";

/// Startup configuration for the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub city: City,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: PathBuf::from("."),
            city: City::Chicago,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, BikeShareError> {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self, BikeShareError> {
        let set = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut settings = Settings::default();

        if let Some(dir) = set(DATA_DIR_ENV) {
            settings.data_dir = PathBuf::from(dir);
        }
        if let Some(city) = set(CITY_ENV) {
            settings.city = city.to_string_lossy().parse()?;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        assert_eq!(Settings::from_lookup(|_| None), Ok(Settings::default()));
    }

    #[test]
    fn empty_variables_are_ignored() {
        let s = Settings::from_lookup(|_| Some(OsString::new())).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn reads_both_variables() {
        let s = Settings::from_lookup(|key| match key {
            DATA_DIR_ENV => Some(OsString::from("/srv/bikeshare")),
            CITY_ENV => Some(OsString::from("new york")),
            _ => None,
        })
        .unwrap();
        assert_eq!(s.data_dir, PathBuf::from("/srv/bikeshare"));
        assert_eq!(s.city, City::NewYork);
    }

    #[test]
    fn unknown_city_is_a_configuration_error() {
        let err = Settings::from_lookup(|key| (key == CITY_ENV).then(|| OsString::from("Paris")))
            .unwrap_err();
        assert_eq!(err, BikeShareError::UnknownCity("Paris".to_string()));
    }
}
