// src/ui/view.rs
use eframe::egui;

use crate::state::{ViewController, ViewState};
use crate::ui::chart;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    None,
    End,
}

pub fn show_water_drop_view(ui: &mut egui::Ui, controller: &mut ViewController) -> ViewAction {
    let mut action = ViewAction::None;

    ui.vertical_centered(|ui| {
        ui.spacing_mut().item_spacing.y = 20.0;

        match controller.state() {
            ViewState::Error(message) => {
                let response = ui.colored_label(egui::Color32::RED, message);
                response.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Label, true, format!("Error: {}", message))
                });
            }
            ViewState::Loaded(results) => {
                if results.is_empty() {
                    ui.label("The analysis produced no data points.");
                } else {
                    let chart_height = (ui.available_height() * 0.7).max(200.0);
                    chart::show_chart(ui, results, chart_height);
                }

                ui.label(format!(
                    "{} points, {} rows skipped. Last run: {}",
                    results.len(),
                    results.skipped_rows,
                    results.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
                ));

                let end = ui
                    .button("End Program")
                    .on_hover_text("Closes the application.");
                if end.clicked() {
                    action = ViewAction::End;
                }
            }
            ViewState::Loading => {
                ui.label("Loading Data...");
            }
        }

        let analyze = ui
            .add_enabled(!controller.is_running(), egui::Button::new("Analyze Water Drop"))
            .on_hover_text(
                "Models a water droplet's motion as it hits a surface and displays the results in a graph.",
            );
        if analyze.clicked() {
            controller.trigger();
        }

        if controller.is_running() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing...");
            });
        }
    });

    action
}
