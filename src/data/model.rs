use std::fmt;

// ---------------------------------------------------------------------------
// JobRecord – one row of the source dataset
// ---------------------------------------------------------------------------

/// A single job observation.
///
/// Fields are kept as text exactly as they appear in the source so that the
/// aggregation layer decides how to interpret them (years compare as text,
/// salaries are parsed on demand).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub work_year: String,
    /// Raw salary text, e.g. `"120000"` or `"85000.50"`.
    pub salary_in_usd: String,
    pub job_title: String,
}

impl JobRecord {
    pub fn new(
        work_year: impl Into<String>,
        salary_in_usd: impl Into<String>,
        job_title: impl Into<String>,
    ) -> Self {
        Self {
            work_year: work_year.into(),
            salary_in_usd: salary_in_usd.into(),
            job_title: job_title.into(),
        }
    }

    /// Salary as a number, or `None` when the text is not a finite float.
    pub fn salary(&self) -> Option<f64> {
        parse_salary(&self.salary_in_usd)
    }
}

/// Parse a salary cell. Surrounding whitespace is ignored; `NaN`, `inf` and
/// anything that is not a complete float literal yield `None`.
pub fn parse_salary(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable record set for one load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryDataset {
    pub records: Vec<JobRecord>,
}

impl SalaryDataset {
    pub fn from_records(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Derived views
// ---------------------------------------------------------------------------

/// Per-year aggregate shown in the summary table.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: String,
    pub total_jobs: usize,
    /// Mean over the numeric salaries of the year; `None` if there are none.
    pub avg_salary_usd: Option<f64>,
}

/// Number of records with one job title inside the selected year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCount {
    pub job_title: String,
    pub count: usize,
}

/// One point of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub year: i32,
    pub total_jobs: usize,
}

/// Inclusive range of years plotted in the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    pub start: i32,
    pub end: i32,
}

impl Default for TrendWindow {
    fn default() -> Self {
        Self {
            start: 2020,
            end: 2024,
        }
    }
}

impl TrendWindow {
    /// Build a window, swapping the bounds if they are given in reverse.
    pub fn new(start: i32, end: i32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl fmt::Display for TrendWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_parsing_trims_and_rejects_garbage() {
        assert_eq!(parse_salary(" 1500.5 "), Some(1500.5));
        assert_eq!(parse_salary("100"), Some(100.0));
        assert_eq!(parse_salary(""), None);
        assert_eq!(parse_salary("100k"), None);
        assert_eq!(parse_salary("NaN"), None);
        assert_eq!(parse_salary("inf"), None);
    }

    #[test]
    fn trend_window_is_inclusive_and_normalised() {
        let window = TrendWindow::default();
        assert!(window.contains(2020));
        assert!(window.contains(2024));
        assert!(!window.contains(2019));
        assert!(!window.contains(2025));

        assert_eq!(TrendWindow::new(2024, 2020), window);
        assert_eq!(window.to_string(), "2020-2024");
    }
}
