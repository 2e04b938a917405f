use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::DataSource;
use crate::data::sort::SortKey;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            let idle = !state.is_loading();
            if ui.add_enabled(idle, egui::Button::new("Open…")).clicked() {
                open_file_dialog(ui.ctx(), state);
                ui.close_menu();
            }
            if ui.add_enabled(idle, egui::Button::new("Reload")).clicked() {
                let ctx = ui.ctx().clone();
                state.start_load(move || ctx.request_repaint());
                ui.close_menu();
            }
        });

        ui.separator();

        match state.dataset() {
            Some(ds) => {
                ui.label(format!("{} records from {}", ds.len(), state.source));
            }
            None => {
                ui.label(state.source.to_string());
            }
        }

        if state.is_loading() {
            ui.spinner();
        }
    });
}

// ---------------------------------------------------------------------------
// Summary table
// ---------------------------------------------------------------------------

/// Sortable per-year table. Header clicks change the sort, row clicks toggle
/// the selected year.
pub fn summary_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Job Data Table");

    let mut clicked_key: Option<SortKey> = None;
    let mut clicked_year: Option<String> = None;

    ui.push_id("summary_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::auto().at_least(80.0))
            .column(Column::auto().at_least(100.0))
            .column(Column::remainder().at_least(160.0))
            .header(ROW_HEIGHT, |mut header| {
                for key in SortKey::ALL {
                    header.col(|ui: &mut Ui| {
                        let text = format!("{} {}", key.label(), state.sort.indicator(key));
                        let button =
                            egui::Button::new(RichText::new(text.trim_end()).strong()).frame(false);
                        if ui.add(button).clicked() {
                            clicked_key = Some(key);
                        }
                    });
                }
            })
            .body(|mut body| {
                for row_data in state.sorted_summary() {
                    let selected = state.selected_year.as_deref() == Some(row_data.year.as_str());
                    let avg = row_data
                        .avg_salary_usd
                        .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
                    let cells = [
                        row_data.year.clone(),
                        row_data.total_jobs.to_string(),
                        avg,
                    ];

                    body.row(ROW_HEIGHT, |mut row| {
                        row.set_selected(selected);
                        for cell in &cells {
                            row.col(|ui: &mut Ui| {
                                if ui.selectable_label(selected, cell.as_str()).clicked() {
                                    clicked_year = Some(row_data.year.clone());
                                }
                            });
                        }
                    });
                }
            });
    });

    // Apply after rendering so the table can borrow `state` immutably.
    if let Some(key) = clicked_key {
        state.click_sort(key);
    }
    if let Some(year) = clicked_year {
        state.click_year(&year);
    }
}

// ---------------------------------------------------------------------------
// Title breakdown
// ---------------------------------------------------------------------------

/// Job-title counts of the selected year. Renders nothing without a selection.
pub fn title_table(ui: &mut Ui, state: &AppState) {
    let Some(year) = &state.selected_year else {
        return;
    };

    ui.heading(format!("Job Titles in {year}"));

    ui.push_id("title_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .column(Column::remainder().at_least(200.0))
            .column(Column::auto().at_least(60.0))
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("Job Title");
                });
                header.col(|ui: &mut Ui| {
                    ui.strong("Count");
                });
            })
            .body(|mut body| {
                for tc in &state.title_counts {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(tc.job_title.as_str());
                        });
                        row.col(|ui: &mut Ui| {
                            ui.label(tc.count.to_string());
                        });
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Load status
// ---------------------------------------------------------------------------

/// Shown in place of the tables while nothing is ready.
pub fn loading_message(ui: &mut Ui) {
    ui.horizontal(|ui: &mut Ui| {
        ui.spinner();
        ui.label("Loading...");
    });
}

/// Shown in place of the tables after a failed load.
pub fn error_message(ui: &mut Ui, state: &mut AppState, message: &str) {
    ui.label(RichText::new(format!("Error: {message}")).color(Color32::RED));
    if ui
        .add_enabled(!state.is_loading(), egui::Button::new("Retry"))
        .clicked()
    {
        let ctx = ui.ctx().clone();
        state.start_load(move || ctx.request_repaint());
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open job data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        let ctx = ctx.clone();
        state.open_source(DataSource::File(path), move || ctx.request_repaint());
    }
}
