//! Writes a synthetic employee dataset to `data/` as CSV and Parquet.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const EMPLOYEES: usize = 1470;
const OUTPUT_DIR: &str = "data";
const STEM: &str = "final_career_intelligence";

const DEPARTMENTS: [(&str, &[&str]); 3] = [
    ("Sales", &["Sales Executive", "Sales Representative", "Manager"]),
    (
        "Research & Development",
        &["Research Scientist", "Laboratory Technician", "Research Director"],
    ),
    ("Human Resources", &["Human Resources", "Manager"]),
];

const CLUSTERS: [&str; 4] = ["Fast Trackers", "Steady Contributors", "Stalled Veterans", "Early Career"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Row {
    department: String,
    job_role: String,
    years_at_company: i64,
    years_with_curr_manager: i64,
    promotion_gap_ratio: f64,
    role_stagnation_index: f64,
    training_intensity_score: f64,
    promotion_gap_risk: String,
    career_cluster_label: String,
    retention_opportunity_index: i64,
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn generate_row(rng: &mut SimpleRng) -> Row {
    let &(department, roles) = rng.pick(&DEPARTMENTS);
    let job_role = rng.pick(roles);
    let years_at_company = rng.below(30) as i64 + 1;
    let years_with_curr_manager = rng.below(years_at_company.min(15) as usize + 1) as i64;

    let promotion_gap_ratio = round3(rng.next_f64());
    let role_stagnation_index = round3(years_with_curr_manager as f64 / 15.0 * 0.7 + rng.next_f64() * 0.3);
    // Occasionally outside [0, 1]; the score clips it.
    let training_intensity_score = round3(rng.next_f64() * 1.2 - 0.1);

    let promotion_gap_risk = match promotion_gap_ratio {
        g if g >= 0.66 => "High",
        g if g >= 0.33 => "Medium",
        _ => "Low",
    };
    let retention_opportunity_index = match (promotion_gap_risk, role_stagnation_index > 0.5) {
        ("High", true) => 3,
        ("High", false) | ("Medium", true) => 2,
        _ => rng.below(2) as i64,
    };

    Row {
        department: department.to_string(),
        job_role: job_role.to_string(),
        years_at_company,
        years_with_curr_manager,
        promotion_gap_ratio,
        role_stagnation_index,
        training_intensity_score,
        promotion_gap_risk: promotion_gap_risk.to_string(),
        career_cluster_label: rng.pick(&CLUSTERS).to_string(),
        retention_opportunity_index,
    }
}

fn write_csv(rows: &[Row], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &Path) -> Result<()> {
    let strings = |f: fn(&Row) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let ints = |f: fn(&Row) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let floats = |f: fn(&Row) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(rows.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("Department", DataType::Utf8, false),
        Field::new("JobRole", DataType::Utf8, false),
        Field::new("YearsAtCompany", DataType::Int64, false),
        Field::new("YearsWithCurrManager", DataType::Int64, false),
        Field::new("PromotionGapRatio", DataType::Float64, false),
        Field::new("RoleStagnationIndex", DataType::Float64, false),
        Field::new("TrainingIntensityScore", DataType::Float64, false),
        Field::new("PromotionGapRisk", DataType::Utf8, false),
        Field::new("CareerClusterLabel", DataType::Utf8, false),
        Field::new("RetentionOpportunityIndex", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            strings(|r| r.department.as_str()),
            strings(|r| r.job_role.as_str()),
            ints(|r| r.years_at_company),
            ints(|r| r.years_with_curr_manager),
            floats(|r| r.promotion_gap_ratio),
            floats(|r| r.role_stagnation_index),
            floats(|r| r.training_intensity_score),
            strings(|r| r.promotion_gap_risk.as_str()),
            strings(|r| r.career_cluster_label.as_str()),
            ints(|r| r.retention_opportunity_index),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<Row> = (0..EMPLOYEES).map(|_| generate_row(&mut rng)).collect();

    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir).context("creating output directory")?;

    let csv_path = dir.join(format!("{STEM}.csv"));
    write_csv(&rows, &csv_path)?;
    let parquet_path = dir.join(format!("{STEM}.parquet"));
    write_parquet(&rows, &parquet_path)?;

    println!(
        "Wrote {} employees to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
