use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Employees scoring above the high-risk threshold.
pub fn high_risk_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.report.high_risk_employees;
    ui.strong(format!(
        "High Risk Employees (score > {:.0}, {} rows)",
        state.config.high_risk_threshold,
        rows.len()
    ));

    if rows.is_empty() {
        ui.label("No employees above the threshold.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::remainder())
        .max_scroll_height(320.0)
        .header(20.0, |mut header| {
            for title in ["Department", "JobRole", "YearsAtCompany", "PromotionRiskScore"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(r.department.as_str());
                });
                row.col(|ui| {
                    ui.label(r.job_role.as_str());
                });
                row.col(|ui| {
                    ui.label(r.years_at_company.to_string());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", r.promotion_risk_score));
                });
            });
        });
}
