use crate::config::DashboardConfig;
use crate::data::aggregate::{
    self, HighRiskRow, HistogramBin, count, count_where, mean_score, select_high_risk,
    value_counts,
};
use crate::data::filter::{FilterSelection, filter};
use crate::data::model::{CellValue, Column, EmployeeDataset, EmployeeView};

// ---------------------------------------------------------------------------
// Dashboard report – everything one render needs
// ---------------------------------------------------------------------------

/// Message shown under the metrics row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Warning(String),
    Healthy(String),
}

/// All figures shown for one filter selection. Recomputed from scratch on
/// every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardReport {
    pub employees: usize,
    pub high_risk: usize,
    pub retention_priority: usize,
    /// NaN when no employee passes the filters.
    pub avg_risk_score: f64,
    pub cluster_distribution: Vec<(CellValue, usize)>,
    pub risk_distribution: Vec<(CellValue, usize)>,
    pub score_histogram: Vec<HistogramBin>,
    /// Mean score per `YearsWithCurrManager`, ascending tenure.
    pub manager_tenure: Vec<(f64, f64)>,
    pub high_risk_employees: Vec<HighRiskRow>,
}

impl DashboardReport {
    pub fn compute(
        dataset: &EmployeeDataset,
        selection: &FilterSelection,
        config: &DashboardConfig,
    ) -> Self {
        let view = filter(&dataset.view(), selection);

        let manager_tenure = manager_tenure(&view);

        let report = Self {
            employees: count(&view),
            high_risk: count_where(
                &view,
                Column::PromotionGapRisk,
                &CellValue::Text(config.high_risk_level.clone()),
            ),
            retention_priority: count_where(
                &view,
                Column::RetentionOpportunityIndex,
                &CellValue::Integer(config.retention_priority),
            ),
            avg_risk_score: mean_score(&view),
            cluster_distribution: value_counts(&view, Column::CareerClusterLabel),
            risk_distribution: value_counts(&view, Column::PromotionGapRisk),
            score_histogram: aggregate::histogram(&view, config.histogram_bins),
            manager_tenure,
            high_risk_employees: select_high_risk(&view, config.high_risk_threshold),
        };
        log::debug!(
            "Report for {:?}: {} employees, {} high risk, {} priority",
            selection.active_department(),
            report.employees,
            report.high_risk,
            report.retention_priority
        );
        report
    }

    pub fn banner(&self) -> Banner {
        if self.retention_priority > 0 {
            Banner::Warning(format!(
                "{} employees need career intervention.",
                self.retention_priority
            ))
        } else {
            Banner::Healthy("Career progression appears healthy.".to_string())
        }
    }
}

/// Mean score per manager tenure for the scatter plot.
///
/// Both columns are numeric, so `group_mean` only fails if the schema
/// changes; in that case the scatter is left empty and the error logged.
fn manager_tenure(view: &EmployeeView<'_>) -> Vec<(f64, f64)> {
    match aggregate::group_mean(view, Column::YearsWithCurrManager, Column::PromotionRiskScore) {
        Ok(groups) => groups
            .into_iter()
            .filter_map(|(tenure, mean)| tenure.as_f64().map(|t| (t, mean)))
            .collect(),
        Err(e) => {
            log::error!("Manager tenure grouping failed: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::employee;

    fn sample() -> EmployeeDataset {
        let mut a = employee("Sales", "High", "Stalled", 0.8, 0.5, 0.2);
        a.retention_opportunity_index = 3;
        a.years_with_curr_manager = 0;
        let b = employee("HR", "Low", "Rising", 0.1, 0.1, 0.9);
        let mut c = employee("Sales", "High", "Stalled", 0.9, 0.9, 0.0);
        c.years_with_curr_manager = 0;
        EmployeeDataset::from_records(vec![a, b, c])
    }

    #[test]
    fn test_full_selection() {
        let ds = sample();
        let cfg = DashboardConfig::default();
        let report = DashboardReport::compute(&ds, &FilterSelection::all(&ds), &cfg);

        assert_eq!(report.employees, 3);
        assert_eq!(report.high_risk, 2);
        assert_eq!(report.retention_priority, 1);
        assert_eq!(
            report.cluster_distribution,
            vec![(CellValue::from("Stalled"), 2), (CellValue::from("Rising"), 1)]
        );
        assert_eq!(report.score_histogram.len(), cfg.histogram_bins);
        // Tenure 0 holds a (71.0) and c (92.0); b sits alone at tenure 2.
        assert_eq!(report.manager_tenure.len(), 2);
        assert_eq!(report.manager_tenure[0], (0.0, 81.5));
        assert_eq!(report.manager_tenure[1].0, 2.0);
        // 71.0 and 92.0 are both above 70.
        assert_eq!(report.high_risk_employees.len(), 2);
        assert_eq!(
            report.banner(),
            Banner::Warning("1 employees need career intervention.".to_string())
        );
    }

    #[test]
    fn test_empty_selection() {
        let ds = sample();
        let mut sel = FilterSelection::all(&ds);
        sel.set_department("Finance");
        let report = DashboardReport::compute(&ds, &sel, &DashboardConfig::default());

        assert_eq!(report.employees, 0);
        assert_eq!(report.high_risk, 0);
        assert!(report.avg_risk_score.is_nan());
        assert!(report.score_histogram.is_empty());
        assert!(report.manager_tenure.is_empty());
        assert!(report.high_risk_employees.is_empty());
        assert_eq!(
            report.banner(),
            Banner::Healthy("Career progression appears healthy.".to_string())
        );
    }

    #[test]
    fn test_manager_tenure_matches_group_mean() {
        let ds = sample();
        let view = ds.view();
        let grouped = aggregate::group_mean(
            &view,
            Column::YearsWithCurrManager,
            Column::PromotionRiskScore,
        )
        .unwrap();
        let points = manager_tenure(&view);
        assert_eq!(points.len(), grouped.len());
        for ((t, mean), (key, expected)) in points.iter().zip(&grouped) {
            assert_eq!(Some(*t), key.as_f64());
            assert_eq!(mean, expected);
        }
    }
}
