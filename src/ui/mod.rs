/// Rendering: panels hold the menu bar and tables, plot holds the trend chart.
/// Both read from [`crate::state::AppState`] and route clicks back into it.
pub mod panels;
pub mod plot;
