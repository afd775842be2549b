use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::pager::Itemised;

/// Buttons pressed in the table window this frame.
#[derive(Debug, Default)]
pub struct TableAction {
    pub next: bool,
    pub exit: bool,
}

// ---------------------------------------------------------------------------
// Itemised trips window
// ---------------------------------------------------------------------------

/// Show the current 5-row window of trips, sorted by start time.
pub fn itemised_window(ctx: &egui::Context, view: &Itemised) -> TableAction {
    let mut action = TableAction::default();

    egui::Window::new("Table")
        .collapsible(false)
        .resizable(true)
        .default_width(900.0)
        .show(ctx, |ui: &mut Ui| {
            trips_table(ui, view);

            ui.add_space(8.0);
            let window = view.window();
            ui.label(
                egui::RichText::new(format!("Rows {}–{}", window.start + 1, window.end)).weak(),
            );
            ui.label("To see the next 5 items, select 'Next 5' or press Enter.");
            ui.horizontal(|ui: &mut Ui| {
                let size = egui::vec2(100.0, 32.0);
                action.next = ui.add(egui::Button::new("Next 5").min_size(size)).clicked();
                action.exit = ui.add(egui::Button::new("Exit").min_size(size)).clicked();
            });
            if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                action.next = true;
            }
        });

    action
}

fn trips_table(ui: &mut Ui, view: &Itemised) {
    let headings = view.headings();
    let cells = view.cells();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(80.0), headings.len())
        .header(20.0, |mut header| {
            for heading in headings {
                header.col(|ui| {
                    ui.strong(heading);
                });
            }
        })
        .body(|mut body| {
            for row in &cells {
                body.row(18.0, |mut table_row| {
                    for cell in row {
                        table_row.col(|ui| {
                            ui.label(cell);
                        });
                    }
                });
            }
        });
}
