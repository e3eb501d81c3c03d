use std::f32::consts::FRAC_PI_4;

use eframe::egui::{epaint::TextShape, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::{correlation_color, generate_palette, text_color_on};
use crate::projection::correlation::CORRELATION_RANGE;
use crate::projection::scatter::SCATTER_ALPHA;
use crate::projection::{CorrelationMatrix, CountFigure, HistogramFigure, ScatterFigure};

const PLOT_HEIGHT: f32 = 300.0;
const HIST_COLOR: Color32 = Color32::from_rgb(76, 114, 176);
const KDE_COLOR: Color32 = Color32::from_rgb(221, 132, 82);

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

/// Exam score histogram with the density curve and a statistics strip.
pub fn histogram_plot(ui: &mut Ui, figure: &HistogramFigure) {
    match &figure.summary {
        Some(s) => {
            ui.horizontal(|ui: &mut Ui| {
                ui.label(format!("n: {}", s.count));
                ui.separator();
                ui.label(format!("moyenne: {:.2}", s.mean));
                ui.separator();
                ui.label(format!("écart-type: {:.2}", s.std_dev));
                ui.separator();
                ui.label(format!("min: {:.0}", s.min));
                ui.separator();
                ui.label(format!("médiane: {:.1}", s.median));
                ui.separator();
                ui.label(format!("max: {:.0}", s.max));
            });
        }
        None => {
            ui.label(RichText::new("Aucune donnée").weak());
        }
    }

    Plot::new("exam_score_dist")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("Exam Score")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let bars: Vec<Bar> = figure
                .bins
                .iter()
                .map(|b| {
                    Bar::new(b.center(), b.count as f64)
                        .width(b.width())
                        .fill(HIST_COLOR.gamma_multiply(0.6))
                })
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(HIST_COLOR).name("Exam_Score"));

            if !figure.density.is_empty() {
                plot_ui.line(
                    Line::new(PlotPoints::new(figure.density.clone()))
                        .color(KDE_COLOR)
                        .width(2.0)
                        .name("Densité"),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

pub fn scatter_plot(ui: &mut Ui, figure: &ScatterFigure) {
    ui.label(format!("Corrélation entre Exam Score et {}", figure.variable));

    Plot::new("correlation_plot")
        .height(PLOT_HEIGHT)
        .x_axis_label(figure.variable.clone())
        .y_axis_label("Exam Score")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::new(figure.points.clone()))
                    .radius(2.5)
                    .color(HIST_COLOR.gamma_multiply(SCATTER_ALPHA)),
            );
        });
}

// ---------------------------------------------------------------------------
// Category counts
// ---------------------------------------------------------------------------

/// One coloured bar per observed category, labelled on the x axis.
pub fn count_plot(ui: &mut Ui, figure: &CountFigure) {
    ui.label(format!("Répartition des étudiants par {}", figure.category));

    let labels: Vec<String> = figure.bars.iter().map(|b| b.label.clone()).collect();
    let palette = generate_palette(figure.bars.len());

    Plot::new("countplots")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(figure.category.clone())
        .y_axis_label("count")
        .allow_scroll(false)
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            for (i, (bar, color)) in figure.bars.iter().zip(palette).enumerate() {
                let chart = BarChart::new(vec![Bar::new(i as f64, bar.count as f64)
                    .width(0.8)
                    .name(&bar.label)])
                .color(color)
                .name(&bar.label);
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Correlation heat map
// ---------------------------------------------------------------------------

/// Annotated heat map on a fixed `[-1, 1]` scale; NaN cells stay grey.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.size();
    if n == 0 {
        ui.label("Aucune variable numérique");
        return;
    }

    let label_font = FontId::proportional(11.0);
    let label_space = matrix
        .columns
        .iter()
        .map(|c| ui.fonts(|f| f.layout_no_wrap(c.clone(), label_font.clone(), Color32::GRAY).size().x))
        .fold(0.0_f32, f32::max)
        + 8.0;
    let legend_space = 60.0;

    let available = ui.available_width();
    let cell = ((available - label_space - legend_space) / n as f32).clamp(18.0, 64.0);
    let grid_side = cell * n as f32;
    // Column labels hang below the grid at 45°.
    let desired = Vec2::new(label_space + grid_side + legend_space, grid_side + label_space * 0.75 + 8.0);
    let (response_rect, _) = ui.allocate_exact_size(desired, Sense::hover());
    let painter = ui.painter_at(response_rect);

    let grid = Rect::from_min_size(
        response_rect.min + Vec2::new(label_space, 0.0),
        Vec2::splat(grid_side),
    );

    for i in 0..n {
        for j in 0..n {
            let value = matrix.get(i, j);
            let cell_rect = Rect::from_min_size(
                grid.min + Vec2::new(j as f32 * cell, i as f32 * cell),
                Vec2::splat(cell),
            );
            painter.rect_filled(cell_rect.shrink(0.5), 0.0, correlation_color(value));

            if cell >= 26.0 {
                let text = if value.is_nan() {
                    "NaN".to_string()
                } else {
                    format!("{value:.2}")
                };
                painter.text(
                    cell_rect.center(),
                    Align2::CENTER_CENTER,
                    text,
                    FontId::proportional((cell * 0.28).min(12.0)),
                    text_color_on(value),
                );
            }
        }
    }

    for (i, name) in matrix.columns.iter().enumerate() {
        // Row labels (left)
        painter.text(
            Pos2::new(grid.min.x - 4.0, grid.min.y + (i as f32 + 0.5) * cell),
            Align2::RIGHT_CENTER,
            name,
            label_font.clone(),
            Color32::GRAY,
        );

        // Column labels (below, rotated)
        let galley = painter.layout_no_wrap(name.clone(), label_font.clone(), Color32::GRAY);
        let anchor = Pos2::new(grid.min.x + (i as f32 + 0.5) * cell, grid.max.y + 4.0);
        painter.add(TextShape::new(anchor, galley, Color32::GRAY).with_angle(FRAC_PI_4));
    }

    // Colour scale legend
    let legend = Rect::from_min_size(
        Pos2::new(grid.max.x + 12.0, grid.min.y),
        Vec2::new(14.0, grid_side),
    );
    let steps = 100;
    let (lo, hi) = CORRELATION_RANGE;
    for s in 0..steps {
        let t = s as f32 / (steps - 1) as f32;
        let value = hi - (hi - lo) * t as f64;
        let y = legend.min.y + t * legend.height();
        painter.line_segment(
            [Pos2::new(legend.min.x, y), Pos2::new(legend.max.x, y)],
            Stroke::new(2.0, correlation_color(value)),
        );
    }
    for (value, align, y) in [
        (hi, Align2::LEFT_TOP, legend.min.y),
        (0.0, Align2::LEFT_CENTER, legend.center().y),
        (lo, Align2::LEFT_BOTTOM, legend.max.y),
    ] {
        painter.text(
            Pos2::new(legend.max.x + 4.0, y),
            align,
            format!("{value:.1}"),
            FontId::proportional(10.0),
            Color32::GRAY,
        );
    }
}
