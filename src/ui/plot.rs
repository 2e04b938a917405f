use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const TREND_COLOR: Color32 = Color32::from_rgb(0x62, 0x00, 0xea);
const TREND_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Trend plot
// ---------------------------------------------------------------------------

/// Line chart of total jobs per year inside the trend window.
pub fn trend_plot(ui: &mut Ui, state: &AppState) {
    ui.heading(format!("Job Trends ({})", state.trend_window));

    if state.trend.is_empty() {
        ui.label(format!("No records between {}.", state.trend_window));
        return;
    }

    let coords: Vec<[f64; 2]> = state
        .trend
        .iter()
        .map(|p| [f64::from(p.year), p.total_jobs as f64])
        .collect();

    Plot::new("trend_plot")
        .height(TREND_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Total Jobs")
        // Whole years only on the x axis.
        .x_grid_spacer(egui_plot::uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .name("Total Jobs")
                    .color(TREND_COLOR)
                    .width(3.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .name("Total Jobs")
                    .color(TREND_COLOR)
                    .radius(4.0),
            );
        });
}
