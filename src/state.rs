use std::sync::Arc;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{CategoryFilter, FilterSelection};
use crate::data::model::EmployeeDataset;
use crate::error::DashboardError;
use crate::report::DashboardReport;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded once at startup, never mutated.
    pub dataset: Arc<EmployeeDataset>,

    /// Current department / risk / cluster choices.
    pub selection: FilterSelection,

    /// Figures for the current selection (cached until the next change).
    pub report: DashboardReport,

    /// Colours for `PromotionGapRisk` and `CareerClusterLabel` categories.
    pub risk_colors: ColorMap,
    pub cluster_colors: ColorMap,
}

impl AppState {
    /// Start with every filter value selected.
    pub fn new(dataset: Arc<EmployeeDataset>, config: DashboardConfig) -> Self {
        let selection = FilterSelection::all(&dataset);
        let report = DashboardReport::compute(&dataset, &selection, &config);
        Self {
            risk_colors: ColorMap::new(&dataset.risk_levels),
            cluster_colors: ColorMap::new(&dataset.cluster_labels),
            config,
            dataset,
            selection,
            report,
        }
    }

    /// Recompute `report` after a selection change.
    pub fn refresh(&mut self) {
        self.report = DashboardReport::compute(&self.dataset, &self.selection, &self.config);
    }

    pub fn set_department(&mut self, department: &str) {
        self.selection.set_department(department);
        self.refresh();
    }

    /// Toggle a single value in one of the multi-selects.
    pub fn toggle_filter_value(&mut self, which: CategoryFilter, value: &str) {
        self.selection.toggle(which, value);
        self.refresh();
    }

    pub fn select_all(&mut self, which: CategoryFilter) {
        self.selection.select_all(which, &self.dataset);
        self.refresh();
    }

    pub fn select_none(&mut self, which: CategoryFilter) {
        self.selection.select_none(which);
        self.refresh();
    }
}

/// What the window shows: the dashboard, or only the load failure.
pub enum Screen {
    Dashboard(AppState),
    LoadFailed(DashboardError),
}
