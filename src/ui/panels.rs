use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{ALL_DEPARTMENTS, CategoryFilter};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – title and department selector
// ---------------------------------------------------------------------------

/// Render the title row and the single-choice department selector.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Enterprise Career Progression Intelligence");
        ui.separator();
        ui.label(format!(
            "{} employees loaded, {} visible",
            state.dataset.len(),
            state.report.employees
        ));
    });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.strong("Department");
        let current = state
            .selection
            .active_department()
            .unwrap_or(ALL_DEPARTMENTS)
            .to_string();

        let choices: Vec<String> = std::iter::once(ALL_DEPARTMENTS.to_string())
            .chain(state.dataset.departments.iter().cloned())
            .collect();
        for dept in &choices {
            if ui.radio(current == *dept, dept.as_str()).clicked() && current != *dept {
                log::debug!("Department selected: {dept}");
                state.set_department(dept);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – multi-select filters
// ---------------------------------------------------------------------------

/// Render the risk level and career cluster multi-selects.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multi_select(ui, state, CategoryFilter::RiskLevel);
            ui.separator();
            multi_select(ui, state, CategoryFilter::ClusterLabel);
        });
}

fn multi_select(ui: &mut Ui, state: &mut AppState, which: CategoryFilter) {
    let (title, domain) = match which {
        CategoryFilter::RiskLevel => ("Promotion Risk", state.dataset.risk_levels.clone()),
        CategoryFilter::ClusterLabel => ("Career Cluster", state.dataset.cluster_labels.clone()),
    };

    // Show count of selected / total in the header
    let n_selected = state.selection.values(which).len();
    let header_text = format!("{title}  ({n_selected}/{})", domain.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(which);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(which);
                }
            });

            for value in &domain {
                let color = match which {
                    CategoryFilter::RiskLevel => state.risk_colors.color_for(value),
                    CategoryFilter::ClusterLabel => state.cluster_colors.color_for(value),
                };
                let mut checked = state.selection.values(which).contains(value);
                if ui
                    .checkbox(&mut checked, RichText::new(value).color(color))
                    .changed()
                {
                    state.toggle_filter_value(which, value);
                }
            }
        });

    if state.selection.values(which).is_empty() {
        ui.label(RichText::new("Nothing selected: no employees shown.").color(Color32::YELLOW));
    }
}
