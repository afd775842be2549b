use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::data::filter::{self, FilterSelection, MONTH_RANGE, WEEKDAY_RANGE};
use crate::data::loader;
use crate::data::model::{City, TripTable};
use crate::data::pager::Itemised;
use crate::error::BikeShareError;
use crate::settings::Settings;
use crate::stats::{self, ReportKind};

// ---------------------------------------------------------------------------
// Filter form
// ---------------------------------------------------------------------------

/// Checkbox and combo-box values of the filter form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub city: City,
    /// January..June.
    pub months: [bool; 6],
    /// Monday..Sunday.
    pub weekdays: [bool; 7],
    /// Times, Stations, Trips, Users.
    pub reports: [bool; 4],
}

impl Default for FormState {
    fn default() -> Self {
        FormState {
            city: City::Chicago,
            months: [true; 6],
            weekdays: [true; 7],
            reports: [true; 4],
        }
    }
}

impl FormState {
    /// Freeze the ticked boxes into a query.
    pub fn selection(&self) -> Result<FilterSelection, BikeShareError> {
        let months = MONTH_RANGE.zip(self.months).filter(|(_, on)| *on).map(|(m, _)| m);
        let weekdays = WEEKDAY_RANGE
            .zip(self.weekdays)
            .filter(|(_, on)| *on)
            .map(|(d, _)| d);
        let reports = ReportKind::ALL
            .into_iter()
            .zip(self.reports)
            .filter(|(_, on)| *on)
            .map(|(r, _)| r);
        FilterSelection::new(self.city, months, weekdays, reports)
    }
}

// ---------------------------------------------------------------------------
// Query pipeline
// ---------------------------------------------------------------------------

/// Outcome of one OK press: the filtered trips and the report text.
#[derive(Debug, Clone)]
pub struct QueryResult {
    pub selection: FilterSelection,
    pub filtered: TripTable,
    pub report: String,
}

/// Load the selected city, narrow it and compose the report.
pub fn run_query(data_dir: &Path, selection: FilterSelection) -> Result<QueryResult> {
    let table = loader::load_city(data_dir, selection.city())?;
    let filtered = filter::apply(&table, &selection);
    let report = stats::compose_report(&filtered, &selection);
    Ok(QueryResult {
        selection,
        filtered,
        report,
    })
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which top-level view is on screen.
#[derive(Debug, Clone)]
pub enum Screen {
    Form,
    Results(QueryResult),
    /// Terminal message; acknowledging it ends the session.
    Fatal(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,
    pub form: FormState,
    pub screen: Screen,
    /// Open itemised-table window, if any.
    pub itemised: Option<Itemised>,
    /// Set when the session should end; the app closes the viewport.
    pub exit_requested: bool,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let form = FormState {
            city: settings.city,
            ..FormState::default()
        };
        Self {
            settings,
            form,
            screen: Screen::Form,
            itemised: None,
            exit_requested: false,
        }
    }

    /// State for a session that cannot start, showing `message` only.
    pub fn failed(message: String) -> Self {
        Self {
            screen: Screen::Fatal(message),
            ..Self::new(Settings::default())
        }
    }

    /// Handle the form's OK button.
    ///
    /// An empty month/day selection or a dataset that cannot be loaded is
    /// terminal: the message is shown and the session then ends.
    pub fn submit(&mut self) {
        let selection = match self.form.selection() {
            Ok(sel) => sel,
            Err(e) => {
                log::warn!("Rejected filter selection: {e}");
                self.screen = Screen::Fatal(format!("{e} Exiting..."));
                return;
            }
        };

        match run_query(&self.settings.data_dir, selection) {
            Ok(result) => self.screen = Screen::Results(result),
            Err(e) => {
                log::error!("Query failed: {e:#}");
                self.screen = Screen::Fatal(format!("Error: {e:#}"));
            }
        }
    }

    /// Open the itemised table over the current results.
    pub fn itemise(&mut self) {
        if let Screen::Results(result) = &self.screen {
            self.itemised = Some(Itemised::new(&result.filtered));
        }
    }

    /// "Next 5": advance the table, closing it once nothing is left.
    pub fn next_page(&mut self) {
        if let Some(view) = &mut self.itemised {
            if !view.advance() {
                log::debug!("Itemised table exhausted");
                self.itemised = None;
            }
        }
    }

    pub fn set_data_dir(&mut self, dir: PathBuf) {
        log::info!("Data folder set to {}", dir.display());
        self.settings.data_dir = dir;
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_city(dir: &Path, city: City, body: &str) {
        let mut f = std::fs::File::create(dir.join(city.file_name())).unwrap();
        f.write_all(body.as_bytes()).unwrap();
    }

    fn washington_rows(n: usize) -> String {
        let mut csv =
            String::from(",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n");
        for i in 0..n {
            csv.push_str(&format!(
                "{i},2017-03-{:02} 08:00:00,2017-03-{:02} 08:10:00,600,Dock {i},Dock 0,Subscriber\n",
                i % 28 + 1,
                i % 28 + 1
            ));
        }
        csv
    }

    fn state_in(dir: &Path) -> AppState {
        AppState::new(Settings {
            data_dir: dir.to_path_buf(),
            city: City::Chicago,
        })
    }

    #[test]
    fn configured_city_preselects_the_form() {
        let state = AppState::new(Settings {
            city: City::Washington,
            ..Settings::default()
        });
        assert_eq!(state.form.city, City::Washington);
        assert!(state.form.months.iter().all(|m| *m));
    }

    #[test]
    fn default_form_selects_everything() {
        let sel = FormState::default().selection().unwrap();
        assert_eq!(sel, FilterSelection::everything(City::Chicago));
    }

    #[test]
    fn form_maps_checkboxes_to_values() {
        let mut form = FormState::default();
        form.months = [false, true, false, false, false, true];
        form.weekdays = [true, false, false, false, false, false, true];
        form.reports = [false, true, false, true];
        let sel = form.selection().unwrap();
        assert_eq!(sel.months().iter().copied().collect::<Vec<_>>(), [2, 6]);
        assert_eq!(sel.weekdays().iter().copied().collect::<Vec<_>>(), [0, 6]);
        assert_eq!(
            sel.reports().iter().copied().collect::<Vec<_>>(),
            [ReportKind::Stations, ReportKind::Users]
        );
    }

    #[test]
    fn empty_months_end_the_session_with_a_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.form.months = [false; 6];
        state.submit();
        match &state.screen {
            Screen::Fatal(msg) => assert_eq!(msg, "No months were selected. Exiting..."),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn missing_city_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.submit();
        match &state.screen {
            Screen::Fatal(msg) => assert!(msg.contains("chicago.csv")),
            other => panic!("unexpected screen {other:?}"),
        }
    }

    #[test]
    fn submit_runs_the_whole_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        write_city(dir.path(), City::Washington, &washington_rows(3));
        let mut state = state_in(dir.path());
        state.form.city = City::Washington;
        state.submit();

        let Screen::Results(result) = &state.screen else {
            panic!("expected results");
        };
        assert_eq!(result.filtered.len(), 3);
        assert!(result.report.starts_with("Times Information:"));
        assert!(result.report.contains("The number of subscribers is 3."));
        assert!(!result.report.contains("users is"));
    }

    #[test]
    fn itemise_pages_until_exhausted() {
        let dir = tempfile::tempdir().unwrap();
        write_city(dir.path(), City::Washington, &washington_rows(12));
        let mut state = state_in(dir.path());
        state.form.city = City::Washington;
        state.submit();
        state.itemise();

        assert_eq!(state.itemised.as_ref().map(|v| v.window()), Some(0..6));
        state.next_page();
        assert_eq!(state.itemised.as_ref().map(|v| v.window()), Some(6..11));
        state.next_page();
        assert_eq!(state.itemised.as_ref().map(|v| v.window()), Some(11..12));
        state.next_page();
        assert!(state.itemised.is_none());
    }
}
