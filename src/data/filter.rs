use std::collections::BTreeSet;

use super::model::{EmployeeDataset, EmployeeView};

/// Department choice meaning "no department filter".
pub const ALL_DEPARTMENTS: &str = "All";

// ---------------------------------------------------------------------------
// Filter selection: which category values the user has picked
// ---------------------------------------------------------------------------

/// The user's current filter choices.
///
/// Unlike the department choice, an empty risk or cluster set is a real
/// selection: it matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    /// `None` or [`ALL_DEPARTMENTS`] keeps every department.
    pub department: Option<String>,
    pub risk_levels: BTreeSet<String>,
    pub cluster_labels: BTreeSet<String>,
}

/// Which multi-select a toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    RiskLevel,
    ClusterLabel,
}

impl FilterSelection {
    /// Every department, every risk level and every cluster selected.
    pub fn all(dataset: &EmployeeDataset) -> Self {
        Self {
            department: None,
            risk_levels: dataset.risk_levels.iter().cloned().collect(),
            cluster_labels: dataset.cluster_labels.iter().cloned().collect(),
        }
    }

    /// The department actually filtered on, if any.
    pub fn active_department(&self) -> Option<&str> {
        self.department
            .as_deref()
            .filter(|d| *d != ALL_DEPARTMENTS)
    }

    pub fn set_department(&mut self, department: &str) {
        self.department = if department == ALL_DEPARTMENTS {
            None
        } else {
            Some(department.to_string())
        };
    }

    pub fn values(&self, which: CategoryFilter) -> &BTreeSet<String> {
        match which {
            CategoryFilter::RiskLevel => &self.risk_levels,
            CategoryFilter::ClusterLabel => &self.cluster_labels,
        }
    }

    fn values_mut(&mut self, which: CategoryFilter) -> &mut BTreeSet<String> {
        match which {
            CategoryFilter::RiskLevel => &mut self.risk_levels,
            CategoryFilter::ClusterLabel => &mut self.cluster_labels,
        }
    }

    /// Toggle a single value in one of the multi-selects.
    pub fn toggle(&mut self, which: CategoryFilter, value: &str) {
        let selected = self.values_mut(which);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
    }

    /// Select every value the dataset offers for `which`.
    pub fn select_all(&mut self, which: CategoryFilter, dataset: &EmployeeDataset) {
        let domain = match which {
            CategoryFilter::RiskLevel => &dataset.risk_levels,
            CategoryFilter::ClusterLabel => &dataset.cluster_labels,
        };
        *self.values_mut(which) = domain.iter().cloned().collect();
    }

    pub fn select_none(&mut self, which: CategoryFilter) {
        self.values_mut(which).clear();
    }
}

/// Return the rows of `view` that pass `selection`, in their original order.
///
/// A row passes when:
/// * its department matches, or no department is active
/// * its `PromotionGapRisk` is in `risk_levels`
/// * its `CareerClusterLabel` is in `cluster_labels`
pub fn filter<'a>(view: &EmployeeView<'a>, selection: &FilterSelection) -> EmployeeView<'a> {
    let department = selection.active_department();
    let rows = view
        .iter()
        .filter(|rec| department.map_or(true, |d| rec.department == d))
        .filter(|rec| selection.risk_levels.contains(&rec.promotion_gap_risk))
        .filter(|rec| selection.cluster_labels.contains(&rec.career_cluster_label))
        .collect();
    EmployeeView { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::employee;

    fn sample() -> EmployeeDataset {
        EmployeeDataset::from_records(vec![
            employee("Sales", "High", "Stalled", 0.8, 0.5, 0.2),
            employee("HR", "Low", "Rising", 0.1, 0.1, 0.9),
            employee("Sales", "Medium", "Steady", 0.4, 0.4, 0.5),
            employee("R&D", "High", "Stalled", 0.9, 0.7, 0.1),
            employee("Sales", "Low", "Rising", 0.2, 0.3, 0.6),
        ])
    }

    #[test]
    fn test_default_selection_is_noop() {
        let ds = sample();
        let full = ds.view();
        assert_eq!(filter(&full, &FilterSelection::all(&ds)), full);

        let mut sel = FilterSelection::all(&ds);
        sel.set_department(ALL_DEPARTMENTS);
        assert_eq!(sel.department, None);
        assert_eq!(filter(&full, &sel), full);

        sel.department = Some(ALL_DEPARTMENTS.to_string());
        assert_eq!(filter(&full, &sel), full);
    }

    #[test]
    fn test_department_exact_match_keeps_order() {
        let ds = sample();
        let mut sel = FilterSelection::all(&ds);
        sel.set_department("Sales");
        let out = filter(&ds.view(), &sel);
        let risks: Vec<&str> = out.iter().map(|r| r.promotion_gap_risk.as_str()).collect();
        assert_eq!(risks, vec!["High", "Medium", "Low"]);

        sel.set_department("sales");
        assert!(filter(&ds.view(), &sel).is_empty());
    }

    #[test]
    fn test_risk_and_cluster_are_conjunctive() {
        let ds = sample();
        let mut sel = FilterSelection::all(&ds);
        sel.risk_levels = ["High".to_string()].into();
        sel.cluster_labels = ["Stalled".to_string(), "Rising".to_string()].into();
        let out = filter(&ds.view(), &sel);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.promotion_gap_risk == "High"));
    }

    #[test]
    fn test_empty_set_yields_empty_view() {
        let ds = sample();
        let mut sel = FilterSelection::all(&ds);
        sel.select_none(CategoryFilter::ClusterLabel);
        assert!(filter(&ds.view(), &sel).is_empty());

        let mut sel = FilterSelection::all(&ds);
        sel.select_none(CategoryFilter::RiskLevel);
        assert!(filter(&ds.view(), &sel).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ds = sample();
        let mut sel = FilterSelection::all(&ds);
        sel.set_department("Sales");
        sel.toggle(CategoryFilter::RiskLevel, "Medium");
        let once = filter(&ds.view(), &sel);
        let twice = filter(&once, &sel);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let ds = EmployeeDataset::default();
        let sel = FilterSelection {
            department: Some("Sales".to_string()),
            risk_levels: ["High".to_string()].into(),
            cluster_labels: BTreeSet::new(),
        };
        assert!(filter(&ds.view(), &sel).is_empty());
        assert!(filter(&ds.view(), &FilterSelection::all(&ds)).is_empty());
    }

    #[test]
    fn test_toggle_and_select_all() {
        let ds = sample();
        let mut sel = FilterSelection::all(&ds);
        sel.toggle(CategoryFilter::RiskLevel, "Low");
        assert!(!sel.values(CategoryFilter::RiskLevel).contains("Low"));
        sel.toggle(CategoryFilter::RiskLevel, "Low");
        assert!(sel.values(CategoryFilter::RiskLevel).contains("Low"));

        sel.select_none(CategoryFilter::RiskLevel);
        sel.select_all(CategoryFilter::RiskLevel, &ds);
        assert_eq!(sel, FilterSelection::all(&ds));
    }
}
