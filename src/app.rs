use eframe::egui;

use crate::settings::Settings;
use crate::state::{AppState, Screen};
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BikeShareApp {
    pub state: AppState,
}

impl BikeShareApp {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: AppState::new(settings),
        }
    }

    /// App that only shows a startup error before closing.
    pub fn failed(message: String) -> Self {
        Self {
            state: AppState::failed(message),
        }
    }
}

impl eframe::App for BikeShareApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: form, results or terminal message ----
        egui::CentralPanel::default().show(ctx, |ui| match &self.state.screen {
            Screen::Form => panels::filter_form(ui, &mut self.state),
            Screen::Results(result) => {
                let action = panels::results_panel(ui, result);
                if action.itemise {
                    self.state.itemise();
                }
                if action.exit {
                    self.state.request_exit();
                }
            }
            Screen::Fatal(message) => {
                if panels::fatal_message(ui, message) {
                    self.state.request_exit();
                }
            }
        });

        // ---- Floating window: itemised trips ----
        if let Some(view) = &self.state.itemised {
            let action = table::itemised_window(ctx, view);
            if action.next {
                self.state.next_page();
            }
            if action.exit {
                self.state.request_exit();
            }
        }

        if self.state.exit_requested {
            log::info!("Session ended");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
