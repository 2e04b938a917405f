use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::{AppState, LoadState};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashboardApp {
    pub state: AppState,
}

impl SalaryDashboardApp {
    /// Build the app and issue the initial load.
    pub fn new(ctx: &egui::Context, config: &DashboardConfig) -> Self {
        let mut state = AppState::new(config.data_source(), config.trend_window());
        let ctx = ctx.clone();
        state.start_load(move || ctx.request_repaint());
        Self { state }
    }
}

impl eframe::App for SalaryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll_load();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: tables and chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading("Job Data - Main Table");
                    ui.separator();

                    let failure = match &self.state.load_state {
                        LoadState::Loading => {
                            panels::loading_message(ui);
                            return;
                        }
                        LoadState::Failed(message) => Some(message.clone()),
                        LoadState::Ready(_) => None,
                    };
                    if let Some(message) = failure {
                        panels::error_message(ui, &mut self.state, &message);
                        return;
                    }

                    panels::summary_table(ui, &mut self.state);
                    ui.add_space(12.0);
                    panels::title_table(ui, &self.state);
                    ui.add_space(12.0);
                    plot::trend_plot(ui, &self.state);
                });
        });
    }
}
