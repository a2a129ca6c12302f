// src/app.rs
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;
use tracing::info;

use crate::analysis::PythonInvoker;
use crate::config::Settings;
use crate::state::ViewController;
use crate::ui::{show_water_drop_view, ViewAction};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct WaterDropApp {
    controller: ViewController,
}

impl WaterDropApp {
    pub fn new(settings: &Settings) -> Self {
        let invoker = PythonInvoker::new(&settings.python);
        Self {
            controller: ViewController::new(Arc::new(invoker), settings.request()),
        }
    }

    fn show_paths(&self, ui: &mut egui::Ui) {
        let request = self.controller.request();
        ui.horizontal(|ui| {
            ui.label("Video:");
            ui.monospace(request.video_path().display().to_string());
            ui.separator();
            ui.label("Output:");
            ui.monospace(request.output_csv_path().display().to_string());
            ui.separator();
            ui.label(format!("Runs: {}", self.controller.completed_runs()));
        });
    }
}

impl eframe::App for WaterDropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();
        if self.controller.is_running() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }

        egui::TopBottomPanel::bottom("paths_panel").show(ctx, |ui| {
            self.show_paths(ui);
        });

        let action = egui::CentralPanel::default()
            .show(ctx, |ui| show_water_drop_view(ui, &mut self.controller))
            .inner;

        if action == ViewAction::End {
            info!("closing on user request");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
