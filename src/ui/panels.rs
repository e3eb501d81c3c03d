use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{SCORE_MAX, SCORE_MIN};
use crate::projection::Gender;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – global filters
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtres");
    ui.separator();

    // ---- Exam score range ----
    ui.strong("Plage de Score d'Examen");
    let mut lo = state.filter_state().score_min();
    let mut hi = state.filter_state().score_max();
    let lo_changed = ui
        .add(egui::Slider::new(&mut lo, SCORE_MIN..=SCORE_MAX).integer().text("min"))
        .changed();
    let hi_changed = ui
        .add(egui::Slider::new(&mut hi, SCORE_MIN..=SCORE_MAX).integer().text("max"))
        .changed();
    if lo_changed || hi_changed {
        // Dragging one handle past the other pushes it along.
        if lo_changed && lo > hi {
            hi = lo;
        } else if hi_changed && hi < lo {
            lo = hi;
        }
        state.set_score_range(lo, hi);
    }
    ui.add_space(8.0);

    // ---- School type ----
    ui.strong("Type d'École");
    let current = state.filter_state().school_type.to_string();
    let choices = state.school_choices.clone();
    let mut picked = None;
    egui::ComboBox::from_id_salt("school_type_filter")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for choice in &choices {
                if ui.selectable_label(current == *choice, choice).clicked() {
                    picked = Some(choice.clone());
                }
            }
        });
    if let Some(choice) = picked {
        // A rejected choice is reported through the status message.
        let _ = state.set_school_type(&choice);
    }
}

// ---------------------------------------------------------------------------
// Per-card selectors
// ---------------------------------------------------------------------------

pub fn gender_selector(ui: &mut Ui, state: &mut AppState) {
    let current = state.gender();
    let mut picked = None;
    egui::ComboBox::from_label("choisir le genre")
        .selected_text(current.label())
        .show_ui(ui, |ui: &mut Ui| {
            for gender in Gender::ALL {
                if ui.selectable_label(current == gender, gender.label()).clicked() {
                    picked = Some(gender);
                }
            }
        });
    if let Some(gender) = picked {
        let _ = state.set_gender(gender.label());
    }
}

pub fn correlation_selector(ui: &mut Ui, state: &mut AppState) {
    let choices = state.dataset().numeric_eligible_columns().to_vec();
    if let Some(choice) = column_combo(ui, "variable_correlation", state.correlation_variable(), &choices) {
        let _ = state.set_correlation_variable(&choice);
    }
}

pub fn category_selector(ui: &mut Ui, state: &mut AppState) {
    let choices = state.dataset().categorical_columns().to_vec();
    if let Some(choice) = column_combo(ui, "variable_categorie", state.category_variable(), &choices) {
        let _ = state.set_category_variable(&choice);
    }
}

/// Combo box over column names; returns the newly picked one, if any.
fn column_combo(ui: &mut Ui, id: &str, current: &str, choices: &[String]) -> Option<String> {
    let mut picked = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("choisir une variable");
        egui::ComboBox::from_id_salt(id)
            .selected_text(current)
            .show_ui(ui, |ui: &mut Ui| {
                for col in choices {
                    if ui.selectable_label(current == col, col).clicked() && current != col {
                        picked = Some(col.clone());
                    }
                }
            });
    });
    picked
}

// ---------------------------------------------------------------------------
// Layout helpers
// ---------------------------------------------------------------------------

/// A titled, framed card.
pub fn card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.strong(title);
        ui.separator();
        add_contents(ui);
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the row count and the last rejection, if any.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Tableau de Bord sur les Facteurs de Performances des Étudiants");
        ui.separator();
        ui.label(format!(
            "{} étudiants, {} affichés",
            state.dataset().len(),
            state.visible_rows
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
