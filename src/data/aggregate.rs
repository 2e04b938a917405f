use std::collections::HashMap;

use super::model::{JobRecord, TitleCount, TrendPoint, TrendWindow, YearSummary};

// ---------------------------------------------------------------------------
// Year summary
// ---------------------------------------------------------------------------

#[derive(Default)]
struct YearAccumulator {
    total_jobs: usize,
    salary_sum: f64,
    salary_count: usize,
}

/// Group records by `work_year`, in order of each year's first appearance.
///
/// Every record counts towards `total_jobs`. Only numeric salaries
/// contribute to the average, so a year whose salaries are all unparseable
/// reports `avg_salary_usd == None` instead of a poisoned mean.
pub fn summarize_by_year(records: &[JobRecord]) -> Vec<YearSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, YearAccumulator> = HashMap::new();

    for rec in records {
        let acc = groups.entry(rec.work_year.as_str()).or_insert_with(|| {
            order.push(rec.work_year.as_str());
            YearAccumulator::default()
        });
        acc.total_jobs += 1;
        if let Some(salary) = rec.salary() {
            acc.salary_sum += salary;
            acc.salary_count += 1;
        }
    }

    order
        .into_iter()
        .filter_map(|year| {
            let acc = groups.remove(year)?;
            let avg_salary_usd =
                (acc.salary_count > 0).then(|| acc.salary_sum / acc.salary_count as f64);
            Some(YearSummary {
                year: year.to_string(),
                total_jobs: acc.total_jobs,
                avg_salary_usd,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Title breakdown for one year
// ---------------------------------------------------------------------------

/// Count records per `job_title` within `year`, in order of first appearance.
pub fn title_counts_for_year(records: &[JobRecord], year: &str) -> Vec<TitleCount> {
    let mut counts: Vec<TitleCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for rec in records.iter().filter(|r| r.work_year == year) {
        match index.get(rec.job_title.as_str()) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(rec.job_title.as_str(), counts.len());
                counts.push(TitleCount {
                    job_title: rec.job_title.clone(),
                    count: 1,
                });
            }
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Trend chart data
// ---------------------------------------------------------------------------

/// Interpret a year label as an integer for windowing.
pub fn parse_year(year: &str) -> Option<i32> {
    year.trim().parse().ok()
}

/// Keep only years inside `window`, ordered by year for plotting.
pub fn trend_points(summary: &[YearSummary], window: TrendWindow) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = summary
        .iter()
        .filter_map(|s| {
            let year = parse_year(&s.year)?;
            window.contains(year).then_some(TrendPoint {
                year,
                total_jobs: s.total_jobs,
            })
        })
        .collect();
    points.sort_by_key(|p| p.year);
    points
}
