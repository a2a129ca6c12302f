// src/ui/chart.rs
use eframe::egui;

use crate::analysis::{describe_curve, DataPoint, ResultSet};

pub const CHART_LABEL: &str = "Water Drop Analysis Graph";
const LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 150, 255);

pub fn chart_series(results: &ResultSet) -> Vec<[f64; 2]> {
    results.points.iter().map(DataPoint::as_plot_point).collect()
}

pub fn chart_description(results: &ResultSet) -> String {
    describe_curve(&results.points).accessibility_value()
}

/// Fitted curve against time, with the curve summary attached for screen readers.
pub fn show_chart(ui: &mut egui::Ui, results: &ResultSet, height: f32) {
    let description = chart_description(results);
    let series = chart_series(results);

    let response = egui_plot::Plot::new("water_drop_chart")
        .height(height)
        .x_axis_label("Time (s)")
        .y_axis_label("Fitted Curve")
        .allow_scroll(false)
        .legend(egui_plot::Legend::default())
        .label_formatter(|_, point| format!("t = {:.3} s, {:.3}", point.x, point.y))
        .show(ui, |plot_ui| {
            plot_ui.line(
                egui_plot::Line::new(egui_plot::PlotPoints::new(series))
                    .name("Fitted Curve")
                    .color(LINE_COLOR)
                    .width(2.0),
            );
        })
        .response;

    let label = format!("{}. {}", CHART_LABEL, description);
    response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Other, true, &label));

    ui.label(egui::RichText::new(description).small().weak());
}
