use std::path::PathBuf;

/// Location of the precomputed dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/final_career_intelligence.csv";

/// Fixed dashboard settings. Nothing here is read from the environment or
/// the command line; the dataset location is not user-configurable.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    /// Scores strictly above this value are listed as high risk.
    pub high_risk_threshold: f64,
    /// `PromotionGapRisk` category counted in the "High Risk" metric.
    pub high_risk_level: String,
    /// `RetentionOpportunityIndex` value that marks top intervention priority.
    pub retention_priority: i64,
    pub histogram_bins: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            high_risk_threshold: 70.0,
            high_risk_level: "High".to_string(),
            retention_priority: 3,
            histogram_bins: 30,
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 600.0],
        }
    }
}
