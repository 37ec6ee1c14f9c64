use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points, Polygon};

use crate::data::aggregate::format_score;
use crate::report::Banner;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 280.0;
const DONUT_INNER_RADIUS: f64 = 0.5;
/// Donut slices are split into wedges no wider than this (radians) so each
/// piece stays convex.
const MAX_WEDGE_ANGLE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Metrics row and banner
// ---------------------------------------------------------------------------

pub fn metrics_row(ui: &mut Ui, state: &AppState) {
    let r = &state.report;
    let metrics = [
        ("Employees", r.employees.to_string()),
        ("High Risk", r.high_risk.to_string()),
        ("Retention Priority", r.retention_priority.to_string()),
        ("Avg Risk Score", format_score(r.avg_risk_score)),
    ];
    ui.columns(metrics.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(metrics) {
            col.label(label);
            col.label(RichText::new(value).size(28.0).strong());
        }
    });

    match r.banner() {
        Banner::Warning(msg) => {
            ui.colored_label(Color32::from_rgb(230, 160, 40), format!("⚠ {msg}"));
        }
        Banner::Healthy(msg) => {
            ui.colored_label(Color32::from_rgb(80, 190, 110), format!("✔ {msg}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Career clusters – donut chart
// ---------------------------------------------------------------------------

pub fn cluster_pie(ui: &mut Ui, state: &AppState) {
    ui.strong("Career Clusters");
    let dist = &state.report.cluster_distribution;
    let total: usize = dist.iter().map(|(_, n)| n).sum();

    Plot::new("cluster_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            let fractions: Vec<f64> = dist.iter().map(|(_, n)| *n as f64 / total as f64).collect();
            for ((label, n), wedges) in dist.iter().zip(donut_wedges(&fractions)) {
                let name = format!("{label} ({n})");
                let color = state.cluster_colors.color_for(&label.to_string());
                for wedge in wedges {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .name(&name)
                            .fill_color(color),
                    );
                }
            }
        });
}

/// Split a unit donut into convex quadrilaterals, one group per slice.
/// Slices start at 12 o'clock and run clockwise.
pub fn donut_wedges(fractions: &[f64]) -> Vec<Vec<Vec<[f64; 2]>>> {
    let point = |angle: f64, radius: f64| {
        let a = TAU / 4.0 - angle;
        [radius * a.cos(), radius * a.sin()]
    };

    let mut start = 0.0;
    fractions
        .iter()
        .map(|&fraction| {
            let sweep = fraction * TAU;
            let pieces = (sweep / MAX_WEDGE_ANGLE).ceil().max(1.0) as usize;
            let step = sweep / pieces as f64;
            let wedges: Vec<Vec<[f64; 2]>> = (0..pieces)
                .map(|i| {
                    let a0 = start + step * i as f64;
                    let a1 = a0 + step;
                    vec![
                        point(a0, DONUT_INNER_RADIUS),
                        point(a0, 1.0),
                        point(a1, 1.0),
                        point(a1, DONUT_INNER_RADIUS),
                    ]
                })
                .collect();
            start += sweep;
            wedges
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Promotion risk levels – bar chart
// ---------------------------------------------------------------------------

pub fn risk_bars(ui: &mut Ui, state: &AppState) {
    ui.strong("Promotion Risk Levels");
    let dist = &state.report.risk_distribution;

    Plot::new("risk_bars")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Count")
        .show_axes([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            // One chart per level so each gets its own legend entry.
            for (i, (level, n)) in dist.iter().enumerate() {
                let label = level.to_string();
                let color = state.risk_colors.color_for(&label);
                let bar = Bar::new(i as f64, *n as f64).width(0.7).name(&label);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&label).color(color));
            }
        });
}

// ---------------------------------------------------------------------------
// Risk score distribution – histogram
// ---------------------------------------------------------------------------

pub fn score_histogram(ui: &mut Ui, state: &AppState) {
    ui.strong("Risk Score Distribution");
    let bins = &state.report.score_histogram;

    Plot::new("score_histogram")
        .height(CHART_HEIGHT)
        .x_axis_label("PromotionRiskScore")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|b| {
                    Bar::new(b.center(), b.count as f64)
                        .width(b.width())
                        .name(format!("{:.1} – {:.1}", b.lower, b.upper))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Manager effectiveness – mean score by manager tenure
// ---------------------------------------------------------------------------

pub fn manager_scatter(ui: &mut Ui, state: &AppState) {
    ui.strong("Manager Effectiveness");
    let points: PlotPoints = state
        .report
        .manager_tenure
        .iter()
        .map(|&(tenure, mean)| [tenure, mean])
        .collect();

    Plot::new("manager_scatter")
        .height(CHART_HEIGHT)
        .x_axis_label("YearsWithCurrManager")
        .y_axis_label("Mean PromotionRiskScore")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .radius(4.0)
                    .color(Color32::from_rgb(99, 110, 250)),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wedges_cover_full_circle() {
        let slices = donut_wedges(&[0.5, 0.25, 0.25]);
        assert_eq!(slices.len(), 3);
        // Largest slice needs the most pieces.
        assert!(slices[0].len() > slices[1].len());

        let first = slices[0][0][1];
        let last_slice = slices.last().unwrap();
        let last = last_slice.last().unwrap()[2];
        // Both ends of the ring meet at 12 o'clock on the outer edge.
        assert!((first[0] - 0.0).abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] - first[0]).abs() < 1e-9 && (last[1] - first[1]).abs() < 1e-9);
    }

    #[test]
    fn test_empty_slice_still_renders_a_piece() {
        let slices = donut_wedges(&[1.0, 0.0]);
        assert_eq!(slices[1].len(), 1);
    }
}
