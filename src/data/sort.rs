use std::cmp::Ordering;

use super::model::YearSummary;

// ---------------------------------------------------------------------------
// Sort state for the summary table
// ---------------------------------------------------------------------------

/// Column of the summary table that can be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Year,
    TotalJobs,
    AvgSalaryUsd,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Year, SortKey::TotalJobs, SortKey::AvgSalaryUsd];

    /// Column header text.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Year => "Year",
            SortKey::TotalJobs => "Total Jobs",
            SortKey::AvgSalaryUsd => "Average Salary (USD)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Active sort column and direction. Starts as year ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Year,
            order: SortOrder::Ascending,
        }
    }
}

impl SortState {
    /// Header click: the active ascending column flips to descending,
    /// anything else becomes ascending on `key`.
    pub fn click(&mut self, key: SortKey) {
        self.order = if self.key == key && self.order == SortOrder::Ascending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        self.key = key;
    }

    /// Arrow shown next to a header, empty for inactive columns.
    pub fn indicator(&self, key: SortKey) -> &'static str {
        match (self.key == key, self.order) {
            (false, _) => "",
            (true, SortOrder::Ascending) => "↑",
            (true, SortOrder::Descending) => "↓",
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

fn compare(a: &YearSummary, b: &YearSummary, key: SortKey) -> Ordering {
    match key {
        SortKey::Year => a.year.cmp(&b.year),
        SortKey::TotalJobs => a.total_jobs.cmp(&b.total_jobs),
        // `None` (no numeric salary) sorts before every number.
        SortKey::AvgSalaryUsd => match (a.avg_salary_usd, b.avg_salary_usd) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (x, y) => x.is_some().cmp(&y.is_some()),
        },
    }
}

/// Indices into `summary` in display order.
///
/// The sort is stable in both directions: rows that compare equal keep their
/// original relative order.
pub fn sorted_indices(summary: &[YearSummary], sort: SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..summary.len()).collect();
    indices.sort_by(|&a, &b| {
        let ord = compare(&summary[a], &summary[b], sort.key);
        match sort.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: &str, total_jobs: usize, avg: Option<f64>) -> YearSummary {
        YearSummary {
            year: year.into(),
            total_jobs,
            avg_salary_usd: avg,
        }
    }

    fn years(summary: &[YearSummary], sort: SortState) -> Vec<&str> {
        sorted_indices(summary, sort)
            .into_iter()
            .map(|i| summary[i].year.as_str())
            .collect()
    }

    #[test]
    fn click_toggles_same_key_and_resets_on_new_key() {
        let mut sort = SortState::default();
        sort.click(SortKey::Year);
        assert_eq!(sort.order, SortOrder::Descending);
        sort.click(SortKey::Year);
        assert_eq!(sort.order, SortOrder::Ascending);

        sort.click(SortKey::Year);
        sort.click(SortKey::TotalJobs);
        assert_eq!(
            sort,
            SortState {
                key: SortKey::TotalJobs,
                order: SortOrder::Ascending,
            }
        );
        assert_eq!(sort.indicator(SortKey::TotalJobs), "↑");
        assert_eq!(sort.indicator(SortKey::Year), "");
    }

    #[test]
    fn second_click_reverses_order_without_ties() {
        let summary = vec![
            row("2021", 5, Some(1.0)),
            row("2020", 2, Some(1.0)),
            row("2022", 9, Some(1.0)),
        ];
        let mut sort = SortState::default();
        sort.click(SortKey::TotalJobs);
        let asc = years(&summary, sort);
        assert_eq!(asc, ["2020", "2021", "2022"]);

        sort.click(SortKey::TotalJobs);
        let mut desc = years(&summary, sort);
        desc.reverse();
        assert_eq!(desc, asc);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let summary = vec![
            row("2023", 3, None),
            row("2021", 1, None),
            row("2022", 3, None),
            row("2020", 1, None),
        ];
        let asc = SortState {
            key: SortKey::TotalJobs,
            order: SortOrder::Ascending,
        };
        assert_eq!(years(&summary, asc), ["2021", "2020", "2023", "2022"]);

        let desc = SortState {
            order: SortOrder::Descending,
            ..asc
        };
        assert_eq!(years(&summary, desc), ["2023", "2022", "2021", "2020"]);
    }

    #[test]
    fn year_sorts_as_text_and_missing_average_sorts_first() {
        let summary = vec![
            row("2020", 1, Some(50.0)),
            row("999", 1, None),
            row("2021", 1, Some(10.0)),
        ];
        assert_eq!(
            years(&summary, SortState::default()),
            ["2020", "2021", "999"]
        );

        let by_avg = SortState {
            key: SortKey::AvgSalaryUsd,
            order: SortOrder::Ascending,
        };
        assert_eq!(years(&summary, by_avg), ["999", "2021", "2020"]);
    }
}
