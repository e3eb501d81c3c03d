use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::projection::DataTable;

const TABLE_HEIGHT: f32 = 250.0;

/// Render the filtered rows; scrolls both ways inside a fixed height.
pub fn data_table(ui: &mut Ui, table: &DataTable) {
    ui.label(RichText::new(format!("{} lignes", table.row_count())).weak());

    let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;

    ScrollArea::horizontal()
        .id_salt("dataset_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0).clip(true), table.header.len())
                .min_scrolled_height(0.0)
                .max_scroll_height(TABLE_HEIGHT)
                .header(20.0, |mut header| {
                    for name in &table.header {
                        header.col(|ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(text_height, table.row_count(), |mut row| {
                        let cells = &table.rows[row.index()];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                });
        });
}
