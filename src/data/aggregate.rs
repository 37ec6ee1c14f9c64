//! Read-only summaries over an [`EmployeeView`]. None of these fail on an
//! empty view: counts are zero, means are NaN and sequences are empty.

use std::collections::{BTreeMap, HashMap};

use super::model::{CellValue, Column, EmployeeView};
use super::score::round1;
use crate::error::{DashboardError, Result};

/// Placeholder shown for an undefined mean.
pub const MISSING_VALUE: &str = "—";

/// One row of the high-risk listing.
#[derive(Debug, Clone, PartialEq)]
pub struct HighRiskRow {
    pub department: String,
    pub job_role: String,
    pub years_at_company: i64,
    pub promotion_risk_score: f64,
}

/// Half-open bin `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

pub fn count(view: &EmployeeView<'_>) -> usize {
    view.len()
}

/// Rows whose `column` equals `value` exactly.
pub fn count_where(view: &EmployeeView<'_>, column: Column, value: &CellValue) -> usize {
    view.iter().filter(|r| r.value(column) == *value).count()
}

/// Mean `PromotionRiskScore`, rounded to one decimal. NaN when empty.
pub fn mean_score(view: &EmployeeView<'_>) -> f64 {
    if view.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = view.iter().map(|r| r.promotion_risk_score).sum();
    round1(sum / view.len() as f64)
}

/// Format a score for display, rendering NaN as [`MISSING_VALUE`].
pub fn format_score(score: f64) -> String {
    if score.is_nan() {
        MISSING_VALUE.to_string()
    } else {
        format!("{score:.1}")
    }
}

/// Frequency of each distinct value, most frequent first. Ties keep the
/// order in which values first appear in the view.
pub fn value_counts(view: &EmployeeView<'_>, column: Column) -> Vec<(CellValue, usize)> {
    let mut index: HashMap<CellValue, usize> = HashMap::new();
    let mut counts: Vec<(CellValue, usize)> = Vec::new();
    for rec in view.iter() {
        let value = rec.value(column);
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    // stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Mean of `value_column` per distinct `group_column` value, ordered by
/// group key. Only groups present in the view appear.
pub fn group_mean(
    view: &EmployeeView<'_>,
    group_column: Column,
    value_column: Column,
) -> Result<Vec<(CellValue, f64)>> {
    let mut groups: BTreeMap<CellValue, (f64, usize)> = BTreeMap::new();
    for rec in view.iter() {
        let value = rec
            .value(value_column)
            .as_f64()
            .ok_or(DashboardError::NonNumericColumn(value_column))?;
        let entry = groups.entry(rec.value(group_column)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    Ok(groups
        .into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect())
}

/// Rows scoring strictly above `threshold`, projected for the listing.
pub fn select_high_risk(view: &EmployeeView<'_>, threshold: f64) -> Vec<HighRiskRow> {
    view.iter()
        .filter(|r| r.promotion_risk_score > threshold)
        .map(|r| HighRiskRow {
            department: r.department.clone(),
            job_role: r.job_role.clone(),
            years_at_company: r.years_at_company,
            promotion_risk_score: r.promotion_risk_score,
        })
        .collect()
}

/// Equal-width histogram of `PromotionRiskScore` spanning the view's range.
pub fn histogram(view: &EmployeeView<'_>, bins: usize) -> Vec<HistogramBin> {
    if view.is_empty() || bins == 0 {
        return Vec::new();
    }
    let scores: Vec<f64> = view.iter().map(|r| r.promotion_risk_score).collect();
    let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: lo + width * i as f64,
            upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();
    for s in scores {
        let idx = (((s - lo) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::employee;
    use crate::data::model::{EmployeeDataset, EmployeeRecord};

    fn with_score(mut rec: EmployeeRecord, score: f64) -> EmployeeRecord {
        rec.promotion_risk_score = score;
        rec
    }

    fn sample() -> EmployeeDataset {
        let mut a = employee("Sales", "High", "Stalled", 0.8, 0.5, 0.2);
        a.years_with_curr_manager = 1;
        a.retention_opportunity_index = 3;
        let mut b = employee("HR", "Low", "Rising", 0.1, 0.1, 0.9);
        b.years_with_curr_manager = 4;
        let mut c = employee("Sales", "Medium", "Stalled", 0.4, 0.4, 0.5);
        c.years_with_curr_manager = 1;
        let mut d = employee("R&D", "Low", "Steady", 0.9, 0.7, 0.1);
        d.years_with_curr_manager = 4;
        d.retention_opportunity_index = 3;
        EmployeeDataset::from_records(vec![a, b, c, d])
    }

    #[test]
    fn test_counts() {
        let ds = sample();
        let view = ds.view();
        assert_eq!(count(&view), 4);
        let high = count_where(&view, Column::PromotionGapRisk, &CellValue::from("High"));
        assert_eq!(high, 1);
        assert!(high <= count(&view));
        assert_eq!(
            count_where(&view, Column::RetentionOpportunityIndex, &CellValue::Integer(3)),
            2
        );
        assert_eq!(
            count_where(&view, Column::PromotionGapRisk, &CellValue::from("Extreme")),
            0
        );
    }

    #[test]
    fn test_mean_score() {
        let ds = EmployeeDataset::from_records(vec![
            with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), 10.0),
            with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), 20.0),
            with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), 20.5),
        ]);
        // 50.5 / 3 = 16.8333…
        assert_eq!(mean_score(&ds.view()), 16.8);
    }

    #[test]
    fn test_mean_score_tie_rounds_to_even() {
        let ds = EmployeeDataset::from_records(vec![
            with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), 10.0),
            with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), 10.5),
        ]);
        // 10.25 is an exact tie.
        assert_eq!(mean_score(&ds.view()), 10.2);
    }

    #[test]
    fn test_empty_view_degrades() {
        let ds = EmployeeDataset::default();
        let view = ds.view();
        assert_eq!(count(&view), 0);
        assert!(mean_score(&view).is_nan());
        assert_eq!(format_score(mean_score(&view)), MISSING_VALUE);
        assert!(value_counts(&view, Column::PromotionGapRisk).is_empty());
        assert!(group_mean(&view, Column::YearsWithCurrManager, Column::PromotionRiskScore)
            .unwrap()
            .is_empty());
        assert!(select_high_risk(&view, 70.0).is_empty());
        assert!(histogram(&view, 30).is_empty());
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(71.0), "71.0");
        assert_eq!(format_score(f64::NAN), "—");
    }

    #[test]
    fn test_value_counts_order() {
        let ds = EmployeeDataset::from_records(vec![
            employee("A", "Medium", "X", 0.1, 0.1, 0.1),
            employee("A", "Low", "X", 0.1, 0.1, 0.1),
            employee("A", "High", "X", 0.1, 0.1, 0.1),
            employee("A", "Low", "X", 0.1, 0.1, 0.1),
            employee("A", "High", "X", 0.1, 0.1, 0.1),
        ]);
        let counts = value_counts(&ds.view(), Column::PromotionGapRisk);
        assert_eq!(
            counts,
            vec![
                (CellValue::from("Low"), 2),
                (CellValue::from("High"), 2),
                (CellValue::from("Medium"), 1),
            ]
        );
    }

    #[test]
    fn test_group_mean() {
        let ds = sample();
        let means = group_mean(&ds.view(), Column::YearsWithCurrManager, Column::PromotionRiskScore)
            .unwrap();
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].0, CellValue::Integer(1));
        assert_eq!(means[1].0, CellValue::Integer(4));
        let r = &ds.records;
        let expected = (r[0].promotion_risk_score + r[2].promotion_risk_score) / 2.0;
        assert!((means[0].1 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_group_mean_rejects_text_values() {
        let ds = sample();
        let err = group_mean(&ds.view(), Column::Department, Column::JobRole).unwrap_err();
        assert!(matches!(err, DashboardError::NonNumericColumn(Column::JobRole)));
    }

    #[test]
    fn test_select_high_risk_is_strict() {
        let ds = EmployeeDataset::from_records(
            [65.0, 70.0, 71.0, 99.0]
                .into_iter()
                .map(|s| with_score(employee("Sales", "High", "X", 0.0, 0.0, 0.0), s))
                .collect(),
        );
        let rows = select_high_risk(&ds.view(), 70.0);
        let scores: Vec<f64> = rows.iter().map(|r| r.promotion_risk_score).collect();
        assert_eq!(scores, vec![71.0, 99.0]);
        assert_eq!(rows[0].department, "Sales");
        assert_eq!(rows[0].job_role, "Sales Analyst");
        assert_eq!(rows[0].years_at_company, 5);
    }

    #[test]
    fn test_histogram_counts_every_row() {
        let ds = EmployeeDataset::from_records(
            [0.0, 10.0, 50.0, 50.0, 100.0]
                .into_iter()
                .map(|s| with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), s))
                .collect(),
        );
        let bins = histogram(&ds.view(), 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 5);
        assert_eq!(bins[0].count, 1);
        assert_eq!(bins[29].count, 1);
        assert_eq!(bins[29].upper, 100.0);
    }

    #[test]
    fn test_histogram_single_value() {
        let ds = EmployeeDataset::from_records(vec![
            with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), 42.0),
            with_score(employee("A", "Low", "X", 0.0, 0.0, 0.0), 42.0),
        ]);
        let bins = histogram(&ds.view(), 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert!(bins.iter().all(|b| b.width() > 0.0));
    }
}
