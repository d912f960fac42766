use super::panels::{LeftPanel, MainPanel};
use super::services::{ConfigBridge, ValuationRunner};
use super::state::AppState;
use crate::config::{manager::DEFAULT_CONFIG_FILE, ConfigManager};
use std::path::PathBuf;
use std::time::Duration;

pub struct DcfApp {
    state: AppState,
    config: ConfigManager,
    config_path: PathBuf,
    runner: Option<ValuationRunner>,
    left_panel: LeftPanel,
    main_panel: MainPanel,
}

impl DcfApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ConfigManager, config_path: Option<PathBuf>) -> Self {
        let state = AppState::from_config(&config.get());
        Self {
            state,
            config,
            config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            runner: None,
            left_panel: LeftPanel::new(),
            main_panel: MainPanel::new(),
        }
    }

    fn start_valuation(&mut self) {
        self.state.run_requested = false;

        let base = self.config.get();
        let valuation_config = ConfigBridge::to_valuation_config(&self.state);
        let data_config = ConfigBridge::to_data_config(&self.state, &base.data);
        let ticker = self.state.ticker_input.trim().to_uppercase();

        match ValuationRunner::start(ticker.clone(), valuation_config, data_config) {
            Ok(runner) => {
                self.state.is_running = true;
                self.state.last_error = None;
                self.state.status_message = format!("Fetching fundamentals for {}...", ticker);
                self.runner = Some(runner);
            }
            Err(e) => {
                self.state.last_error = Some(e.to_string());
            }
        }
    }

    fn poll_runner(&mut self) {
        let Some(runner) = self.runner.as_mut() else {
            return;
        };
        let Some(result) = runner.try_get_result() else {
            return;
        };

        let ticker = runner.ticker().to_string();
        self.runner = None;
        self.state.is_running = false;

        match result {
            Ok(display) => {
                self.state.status_message = format!(
                    "Valued {} from {}",
                    display.snapshot.ticker, display.snapshot.source_name
                );
                self.state.last_error = None;
                self.state.result = Some(display);
            }
            Err(e) => {
                log::warn!("Valuation of {} failed: {}", ticker, e);
                self.state.status_message = format!("Could not value {}", ticker);
                self.state.last_error = Some(e.to_string());
                self.state.result = None;
            }
        }
    }

    fn save_settings(&mut self) {
        let outcome = self
            .config
            .update(|config| ConfigBridge::apply(&self.state, config))
            .and_then(|_| self.config.save_to_file(&self.config_path));

        match outcome {
            Ok(()) => {
                self.state.status_message = format!("Settings saved to {}", self.config_path.display());
            }
            Err(e) => {
                self.state.last_error = Some(e.to_string());
            }
        }
    }
}

impl eframe::App for DcfApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_runner();
        if self.state.run_requested && self.runner.is_none() {
            self.start_valuation();
        }
        if self.runner.is_some() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📊 DCF Intrinsic Value");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save Settings").clicked() {
                        self.save_settings();
                    }
                });
            });
        });

        // Left Panel - Ticker & Assumptions
        egui::SidePanel::left("left_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.left_panel.show(ui, &mut self.state);
                });
            });

        // Central Panel - Assumptions Summary, Table & Heatmap
        egui::CentralPanel::default().show(ctx, |ui| {
            self.main_panel.show(ui, &mut self.state);
        });
    }
}
