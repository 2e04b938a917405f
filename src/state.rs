use std::sync::mpsc::{Receiver, TryRecvError};

use anyhow::Result;

use crate::data::aggregate::{summarize_by_year, title_counts_for_year, trend_points};
use crate::data::loader::{spawn_load, DataSource};
use crate::data::model::{SalaryDataset, TitleCount, TrendPoint, TrendWindow, YearSummary};
use crate::data::sort::{sorted_indices, SortKey, SortState};

// ---------------------------------------------------------------------------
// Load state
// ---------------------------------------------------------------------------

/// Outcome of the most recent dataset load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Ready(SalaryDataset),
    /// Formatted error chain of the failed load.
    Failed(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Derived views are cached and only rebuilt when their inputs change:
/// `summary` and `trend` on a new dataset, `sorted_rows` on a sort change,
/// `title_counts` on a selection change.
pub struct AppState {
    /// Where the current dataset comes from.
    pub source: DataSource,

    pub load_state: LoadState,

    /// Channel of the in-flight load, if any.
    pending: Option<Receiver<Result<SalaryDataset>>>,

    /// Per-year summary in first-appearance order.
    pub summary: Vec<YearSummary>,

    /// Indices into `summary` in display order (cached).
    pub sorted_rows: Vec<usize>,

    pub sort: SortState,

    /// Year whose title breakdown is shown.
    pub selected_year: Option<String>,

    /// Breakdown for `selected_year` (cached).
    pub title_counts: Vec<TitleCount>,

    /// Chart points inside `trend_window` (cached).
    pub trend: Vec<TrendPoint>,

    pub trend_window: TrendWindow,
}

impl AppState {
    pub fn new(source: DataSource, trend_window: TrendWindow) -> Self {
        Self {
            source,
            load_state: LoadState::Loading,
            pending: None,
            summary: Vec::new(),
            sorted_rows: Vec::new(),
            sort: SortState::default(),
            selected_year: None,
            title_counts: Vec::new(),
            trend: Vec::new(),
            trend_window,
        }
    }

    /// The loaded dataset, once ready.
    pub fn dataset(&self) -> Option<&SalaryDataset> {
        match &self.load_state {
            LoadState::Ready(ds) => Some(ds),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    // -- Loading --

    /// Start loading `self.source` in the background.
    ///
    /// Returns `false` without doing anything if a load is already running.
    pub fn start_load<F>(&mut self, notify: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.pending.is_some() {
            log::debug!("Load already in progress, ignoring request");
            return false;
        }
        self.load_state = LoadState::Loading;
        self.clear_derived();
        self.pending = Some(spawn_load(self.source.clone(), notify));
        true
    }

    /// Switch to a new source and load it.
    pub fn open_source<F>(&mut self, source: DataSource, notify: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        if self.pending.is_some() {
            log::debug!("Load already in progress, not switching to {source}");
            return false;
        }
        self.source = source;
        self.start_load(notify)
    }

    /// Pick up the result of the in-flight load. Returns `true` when the
    /// load state changed.
    pub fn poll_load(&mut self) -> bool {
        let Some(rx) = &self.pending else {
            return false;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => {
                Err(anyhow::anyhow!("loader thread exited without a result"))
            }
        };
        self.pending = None;
        self.apply_load_result(result);
        true
    }

    /// Store a finished load, logging failures.
    pub fn apply_load_result(&mut self, result: Result<SalaryDataset>) {
        match result {
            Ok(dataset) => {
                if dataset.is_empty() {
                    log::warn!("{} contains no records", self.source);
                }
                self.set_dataset(dataset);
                log::info!(
                    "Loaded {} records covering {} years from {}",
                    self.dataset().map_or(0, SalaryDataset::len),
                    self.summary.len(),
                    self.source
                );
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", self.source);
                self.clear_derived();
                self.load_state = LoadState::Failed(format!("{e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and rebuild every derived view.
    pub fn set_dataset(&mut self, dataset: SalaryDataset) {
        self.summary = summarize_by_year(&dataset.records);
        self.trend = trend_points(&self.summary, self.trend_window);
        self.selected_year = None;
        self.title_counts.clear();
        self.load_state = LoadState::Ready(dataset);
        self.resort();
    }

    fn clear_derived(&mut self) {
        self.summary.clear();
        self.sorted_rows.clear();
        self.selected_year = None;
        self.title_counts.clear();
        self.trend.clear();
    }

    // -- Interaction --

    /// Header click on the summary table.
    pub fn click_sort(&mut self, key: SortKey) {
        self.sort.click(key);
        self.resort();
    }

    /// Row click on the summary table: select `year`, or clear the selection
    /// if it is already selected.
    pub fn click_year(&mut self, year: &str) {
        if self.selected_year.as_deref() == Some(year) {
            self.selected_year = None;
        } else {
            self.selected_year = Some(year.to_string());
        }
        self.refresh_title_counts();
    }

    /// Summary rows in display order.
    pub fn sorted_summary(&self) -> impl Iterator<Item = &YearSummary> {
        self.sorted_rows.iter().map(|&i| &self.summary[i])
    }

    fn resort(&mut self) {
        self.sorted_rows = sorted_indices(&self.summary, self.sort);
    }

    fn refresh_title_counts(&mut self) {
        self.title_counts = match (&self.load_state, &self.selected_year) {
            (LoadState::Ready(ds), Some(year)) => title_counts_for_year(&ds.records, year),
            _ => Vec::new(),
        };
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::data::model::JobRecord;
    use crate::data::sort::SortOrder;

    fn state_with(records: Vec<JobRecord>) -> AppState {
        let mut state = AppState::new(
            DataSource::File(PathBuf::from("myData.json")),
            TrendWindow::default(),
        );
        state.apply_load_result(Ok(SalaryDataset::from_records(records)));
        state
    }

    fn reference() -> AppState {
        state_with(vec![
            JobRecord::new("2020", "100", "A"),
            JobRecord::new("2020", "300", "B"),
            JobRecord::new("2021", "200", "A"),
        ])
    }

    fn displayed_years(state: &AppState) -> Vec<String> {
        state.sorted_summary().map(|s| s.year.clone()).collect()
    }

    fn wait_for_load(state: &mut AppState) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !state.poll_load() {
            assert!(Instant::now() < deadline, "load did not finish");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn starts_in_loading_state() {
        let state = AppState::new(
            DataSource::File(PathBuf::from("myData.json")),
            TrendWindow::default(),
        );
        assert_eq!(state.load_state, LoadState::Loading);
        assert!(state.dataset().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn ready_dataset_builds_summary() {
        let state = reference();
        assert_eq!(state.dataset().map(SalaryDataset::len), Some(3));
        assert_eq!(displayed_years(&state), ["2020", "2021"]);
        assert_eq!(state.summary[0].avg_salary_usd, Some(200.0));
        assert!(state.selected_year.is_none());
        assert!(state.title_counts.is_empty());
    }

    #[test]
    fn selecting_same_year_twice_clears_selection() {
        let mut state = reference();
        state.click_year("2020");
        assert_eq!(state.selected_year.as_deref(), Some("2020"));
        assert_eq!(
            state.title_counts,
            vec![
                TitleCount {
                    job_title: "A".into(),
                    count: 1,
                },
                TitleCount {
                    job_title: "B".into(),
                    count: 1,
                },
            ]
        );

        state.click_year("2020");
        assert!(state.selected_year.is_none());
        assert!(state.title_counts.is_empty());
    }

    #[test]
    fn selecting_another_year_replaces_breakdown() {
        let mut state = reference();
        state.click_year("2020");
        state.click_year("2021");
        assert_eq!(state.selected_year.as_deref(), Some("2021"));
        assert_eq!(
            state.title_counts,
            vec![TitleCount {
                job_title: "A".into(),
                count: 1,
            }]
        );
    }

    #[test]
    fn sort_clicks_reorder_rows() {
        let mut state = state_with(vec![
            JobRecord::new("2022", "10", "A"),
            JobRecord::new("2020", "30", "A"),
            JobRecord::new("2020", "30", "B"),
            JobRecord::new("2021", "20", "A"),
            JobRecord::new("2021", "20", "B"),
            JobRecord::new("2021", "20", "C"),
        ]);
        assert_eq!(displayed_years(&state), ["2020", "2021", "2022"]);

        state.click_sort(SortKey::Year);
        assert_eq!(state.sort.order, SortOrder::Descending);
        assert_eq!(displayed_years(&state), ["2022", "2021", "2020"]);

        state.click_sort(SortKey::TotalJobs);
        assert_eq!(state.sort.order, SortOrder::Ascending);
        assert_eq!(displayed_years(&state), ["2022", "2020", "2021"]);

        state.click_sort(SortKey::AvgSalaryUsd);
        state.click_sort(SortKey::AvgSalaryUsd);
        assert_eq!(displayed_years(&state), ["2020", "2021", "2022"]);
    }

    #[test]
    fn sort_survives_selection_changes() {
        let mut state = reference();
        state.click_sort(SortKey::Year);
        state.click_year("2021");
        assert_eq!(displayed_years(&state), ["2021", "2020"]);
    }

    #[test]
    fn trend_uses_configured_window() {
        let state = state_with(vec![
            JobRecord::new("2019", "1", "A"),
            JobRecord::new("2020", "1", "A"),
            JobRecord::new("2024", "1", "A"),
            JobRecord::new("2025", "1", "A"),
        ]);
        let years: Vec<i32> = state.trend.iter().map(|p| p.year).collect();
        assert_eq!(years, [2020, 2024]);
    }

    #[test]
    fn failed_load_is_reported_and_clears_views() {
        let mut state = reference();
        state.click_year("2020");
        state.apply_load_result(Err(anyhow::anyhow!("network down")));

        assert_eq!(state.load_state, LoadState::Failed("network down".into()));
        assert!(state.summary.is_empty());
        assert!(state.sorted_rows.is_empty());
        assert!(state.selected_year.is_none());
        assert!(state.trend.is_empty());
    }

    #[test]
    fn background_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"[{{"work_year":"2021","salary_in_usd":"50","job_title":"A"}}]"#
        )
        .expect("write");

        let mut state = AppState::new(
            DataSource::File(file.path().to_path_buf()),
            TrendWindow::default(),
        );
        assert!(state.start_load(|| {}));
        assert!(state.is_loading());
        assert!(!state.start_load(|| {}));

        wait_for_load(&mut state);
        assert!(!state.is_loading());
        assert_eq!(state.dataset().map(SalaryDataset::len), Some(1));
        assert_eq!(state.trend.len(), 1);
    }

    #[test]
    fn opening_missing_file_fails() {
        let mut state = reference();
        state.click_year("2020");
        assert!(state.open_source(DataSource::File(PathBuf::from("missing.json")), || {}));
        assert_eq!(state.load_state, LoadState::Loading);
        assert!(state.selected_year.is_none());

        wait_for_load(&mut state);
        assert!(matches!(state.load_state, LoadState::Failed(_)));
    }
}
