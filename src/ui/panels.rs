use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{MONTH_RANGE, WEEKDAY_RANGE};
use crate::data::model::City;
use crate::state::{AppState, QueryResult};
use crate::stats::times::WEEKDAY_NAMES;
use crate::stats::ReportKind;

const MONTH_LABELS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Exit").clicked() {
                state.request_exit();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(
            RichText::new(format!("Data: {}", state.settings.data_dir.display())).weak(),
        );
    });
}

// ---------------------------------------------------------------------------
// Filter form
// ---------------------------------------------------------------------------

/// Render the city / month / day / package selection form.
pub fn filter_form(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.add_space(8.0);
            ui.label("Select the location for which you'd like information:");
            egui::ComboBox::from_id_salt("city")
                .selected_text(state.form.city.name())
                .width(280.0)
                .show_ui(ui, |ui: &mut Ui| {
                    for city in City::ALL {
                        ui.selectable_value(&mut state.form.city, city, city.name());
                    }
                });

            ui.add_space(12.0);
            ui.label("Select the months for which you'd like information:");
            checkbox_grid(ui, "months", &MONTH_LABELS, &mut state.form.months, 3);

            ui.add_space(12.0);
            ui.label("Select the days for which you'd like information:");
            checkbox_grid(ui, "weekdays", &WEEKDAY_NAMES, &mut state.form.weekdays, 3);

            ui.add_space(12.0);
            ui.label("Select any information packages you require:");
            let labels = ReportKind::ALL.map(ReportKind::label);
            checkbox_grid(ui, "packages", &labels, &mut state.form.reports, 2);

            ui.add_space(16.0);
            ui.horizontal(|ui: &mut Ui| {
                let size = egui::vec2(100.0, 32.0);
                if ui
                    .add(egui::Button::new(RichText::new("OK").strong()).min_size(size))
                    .clicked()
                {
                    state.submit();
                }
                if ui.add(egui::Button::new("Exit").min_size(size)).clicked() {
                    state.request_exit();
                }
            });
        });
}

fn checkbox_grid(ui: &mut Ui, id: &str, labels: &[&str], values: &mut [bool], per_row: usize) {
    egui::Grid::new(id)
        .num_columns(per_row)
        .spacing([24.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            for (i, (label, value)) in labels.iter().zip(values.iter_mut()).enumerate() {
                ui.checkbox(value, *label);
                if (i + 1) % per_row == 0 {
                    ui.end_row();
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Buttons pressed on the results panel this frame.
#[derive(Debug, Default)]
pub struct ResultsAction {
    pub itemise: bool,
    pub exit: bool,
}

/// Render the report text with the Itemise / Exit buttons.
pub fn results_panel(ui: &mut Ui, result: &QueryResult) -> ResultsAction {
    let mut action = ResultsAction::default();

    ui.label(
        RichText::new(format!(
            "{}: {} trips match the selected filters ({} of {} months, {} of {} days).",
            result.selection.city(),
            result.filtered.len(),
            result.selection.months().len(),
            MONTH_RANGE.count(),
            result.selection.weekdays().len(),
            WEEKDAY_RANGE.count()
        ))
        .weak(),
    );
    ui.add_space(4.0);

    ScrollArea::vertical()
        .max_height((ui.available_height() - 80.0).max(120.0))
        .show(ui, |ui: &mut Ui| {
            let mut text = result.report.as_str();
            ui.add(
                egui::TextEdit::multiline(&mut text)
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY)
                    .desired_rows(25),
            );
        });

    ui.add_space(8.0);
    ui.label("To see an itemised list of journeys, in order of their start time, select 'Itemise'.");
    ui.horizontal(|ui: &mut Ui| {
        let size = egui::vec2(100.0, 32.0);
        action.itemise = ui
            .add_enabled(
                !result.filtered.is_empty(),
                egui::Button::new("Itemise").min_size(size),
            )
            .clicked();
        action.exit = ui.add(egui::Button::new("Exit").min_size(size)).clicked();
    });

    action
}

// ---------------------------------------------------------------------------
// Terminal message
// ---------------------------------------------------------------------------

/// Show a message that ends the session once acknowledged.
pub fn fatal_message(ui: &mut Ui, message: &str) -> bool {
    let mut acknowledged = false;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.label(RichText::new(message).color(Color32::RED));
        ui.add_space(16.0);
        acknowledged = ui
            .add(egui::Button::new("OK").min_size(egui::vec2(100.0, 32.0)))
            .clicked();
    });
    acknowledged
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Folder containing the city trip files")
        .set_directory(&state.settings.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        state.set_data_dir(dir);
    }
}
