use eframe::egui::{self, ScrollArea};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and row count ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: global filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: three rows of two cards ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let state = &mut self.state;

                    ui.columns(2, |cols| {
                        panels::card(&mut cols[0], "Dataset des facteurs de performances des étudiants", |ui| {
                            table::data_table(ui, &state.table);
                        });
                        panels::card(&mut cols[1], "Moyenne de l'Exam_Score par Genre", |ui| {
                            panels::gender_selector(ui, state);
                            ui.add_space(6.0);
                            ui.label(&state.gender_text);
                        });
                    });
                    ui.add_space(8.0);

                    ui.columns(2, |cols| {
                        panels::card(&mut cols[0], "Distribution de l'Exam Score", |ui| {
                            plot::histogram_plot(ui, &state.histogram);
                        });
                        panels::card(
                            &mut cols[1],
                            "Corrélation entre l'Exam Score et les variables numériques",
                            |ui| {
                                panels::correlation_selector(ui, state);
                                plot::scatter_plot(ui, &state.scatter);
                            },
                        );
                    });
                    ui.add_space(8.0);

                    ui.columns(2, |cols| {
                        panels::card(&mut cols[0], "Répartition des étudiants par Catégorie", |ui| {
                            panels::category_selector(ui, state);
                            plot::count_plot(ui, &state.countplot);
                        });
                        panels::card(&mut cols[1], "Matrice de corrélation des variables numériques", |ui| {
                            plot::correlation_heatmap(ui, &state.correlation);
                        });
                    });
                });
        });
    }
}
