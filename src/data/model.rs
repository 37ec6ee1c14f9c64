use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::Deserialize;

use super::score::promotion_risk_score;

// ---------------------------------------------------------------------------
// CellValue – a single cell addressed by column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, used by the column-generic aggregations.
/// Grouping keeps these in `BTreeMap`s, so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

// -- Manual Eq/Ord so floats can be grouped and sorted --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Integer(_) => 0,
                Float(_) => 1,
                Text(_) => 2,
            }
        }
        match (self, other) {
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.1}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Text(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the fixed schema of the employee table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Department,
    JobRole,
    YearsAtCompany,
    YearsWithCurrManager,
    PromotionGapRatio,
    RoleStagnationIndex,
    TrainingIntensityScore,
    PromotionGapRisk,
    CareerClusterLabel,
    RetentionOpportunityIndex,
    /// Derived at load time, never read from the source file.
    PromotionRiskScore,
}

/// Columns that must be present in every source file.
pub const REQUIRED_COLUMNS: [Column; 10] = [
    Column::Department,
    Column::JobRole,
    Column::YearsAtCompany,
    Column::YearsWithCurrManager,
    Column::PromotionGapRatio,
    Column::RoleStagnationIndex,
    Column::TrainingIntensityScore,
    Column::PromotionGapRisk,
    Column::CareerClusterLabel,
    Column::RetentionOpportunityIndex,
];

impl Column {
    /// Header name as it appears in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Department => "Department",
            Column::JobRole => "JobRole",
            Column::YearsAtCompany => "YearsAtCompany",
            Column::YearsWithCurrManager => "YearsWithCurrManager",
            Column::PromotionGapRatio => "PromotionGapRatio",
            Column::RoleStagnationIndex => "RoleStagnationIndex",
            Column::TrainingIntensityScore => "TrainingIntensityScore",
            Column::PromotionGapRisk => "PromotionGapRisk",
            Column::CareerClusterLabel => "CareerClusterLabel",
            Column::RetentionOpportunityIndex => "RetentionOpportunityIndex",
            Column::PromotionRiskScore => "PromotionRiskScore",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// EmployeeRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single employee (one row of the source table) plus the derived score.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EmployeeRecord {
    pub department: String,
    pub job_role: String,
    pub years_at_company: i64,
    pub years_with_curr_manager: i64,
    pub promotion_gap_ratio: f64,
    pub role_stagnation_index: f64,
    pub training_intensity_score: f64,
    pub promotion_gap_risk: String,
    pub career_cluster_label: String,
    pub retention_opportunity_index: i64,
    /// Filled in by [`EmployeeRecord::with_score`]; any value in the file is ignored.
    #[serde(skip_deserializing)]
    pub promotion_risk_score: f64,
}

impl EmployeeRecord {
    /// Recompute the derived score from the three input signals.
    pub fn with_score(mut self) -> Self {
        self.promotion_risk_score = promotion_risk_score(
            self.promotion_gap_ratio,
            self.role_stagnation_index,
            self.training_intensity_score,
        );
        self
    }

    pub fn value(&self, column: Column) -> CellValue {
        match column {
            Column::Department => CellValue::Text(self.department.clone()),
            Column::JobRole => CellValue::Text(self.job_role.clone()),
            Column::YearsAtCompany => CellValue::Integer(self.years_at_company),
            Column::YearsWithCurrManager => CellValue::Integer(self.years_with_curr_manager),
            Column::PromotionGapRatio => CellValue::Float(self.promotion_gap_ratio),
            Column::RoleStagnationIndex => CellValue::Float(self.role_stagnation_index),
            Column::TrainingIntensityScore => CellValue::Float(self.training_intensity_score),
            Column::PromotionGapRisk => CellValue::Text(self.promotion_gap_risk.clone()),
            Column::CareerClusterLabel => CellValue::Text(self.career_cluster_label.clone()),
            Column::RetentionOpportunityIndex => {
                CellValue::Integer(self.retention_opportunity_index)
            }
            Column::PromotionRiskScore => CellValue::Float(self.promotion_risk_score),
        }
    }

    /// Names of numeric inputs that are NaN or infinite.
    pub fn non_finite_inputs(&self) -> Vec<Column> {
        [
            (Column::PromotionGapRatio, self.promotion_gap_ratio),
            (Column::RoleStagnationIndex, self.role_stagnation_index),
            (Column::TrainingIntensityScore, self.training_intensity_score),
        ]
        .into_iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|(c, _)| c)
        .collect()
    }
}

// ---------------------------------------------------------------------------
// EmployeeDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full table with pre-computed category domains. Built once, then only
/// read.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDataset {
    pub records: Vec<EmployeeRecord>,
    /// Distinct departments, sorted.
    pub departments: Vec<String>,
    /// Distinct `PromotionGapRisk` values in first-seen order.
    pub risk_levels: Vec<String>,
    /// Distinct `CareerClusterLabel` values in first-seen order.
    pub cluster_labels: Vec<String>,
}

impl EmployeeDataset {
    /// Build category domains from scored records.
    pub fn from_records(records: Vec<EmployeeRecord>) -> Self {
        let departments: BTreeSet<String> =
            records.iter().map(|r| r.department.clone()).collect();
        let risk_levels = first_seen(records.iter().map(|r| r.promotion_gap_risk.as_str()));
        let cluster_labels =
            first_seen(records.iter().map(|r| r.career_cluster_label.as_str()));

        EmployeeDataset {
            records,
            departments: departments.into_iter().collect(),
            risk_levels,
            cluster_labels,
        }
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A view over every record, in source order.
    pub fn view(&self) -> EmployeeView<'_> {
        EmployeeView {
            rows: self.records.iter().collect(),
        }
    }
}

fn first_seen<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// EmployeeView – an ordered, borrowed subset
// ---------------------------------------------------------------------------

/// A filtered subset of a dataset. Rows keep the relative order of the
/// source table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmployeeView<'a> {
    pub rows: Vec<&'a EmployeeRecord>,
}

impl<'a> EmployeeView<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a EmployeeRecord> + '_ {
        self.rows.iter().copied()
    }
}
