use crate::config::SourceKind;
use crate::data::normalize_ticker;
use crate::ui::state::AppState;
use crate::ui::widgets::RateListEditor;

pub struct LeftPanel;

impl LeftPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.heading("Valuation");
        ui.separator();

        // 1. Ticker
        Self::show_ticker_input(ui, state);

        ui.separator();

        // 2. Data Source
        ui.collapsing("Data Source", |ui| {
            Self::show_data_source(ui, state);
        });

        ui.separator();

        // 3. Assumptions
        ui.collapsing("Assumptions", |ui| {
            Self::show_assumptions(ui, state);
        });

        ui.separator();

        // 4. Sensitivity Axes
        ui.collapsing("Growth Rates", |ui| {
            RateListEditor::show(ui, "growth_rates", &mut state.growth_rates);
        });
        ui.collapsing("Discount Rates", |ui| {
            RateListEditor::show(ui, "discount_rates", &mut state.discount_rates);
        });
    }

    fn show_ticker_input(ui: &mut egui::Ui, state: &mut AppState) {
        ui.label("Stock ticker (e.g. AAPL, TSLA, MSFT):");

        let response = ui.add(
            egui::TextEdit::singleline(&mut state.ticker_input)
                .hint_text("AAPL")
                .char_limit(16),
        );
        if response.changed() {
            state.ticker_input = state.ticker_input.to_uppercase();
        }
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.vertical_centered(|ui| {
            let validation_error = Self::validate(state).err();
            let can_run = validation_error.is_none() && !state.is_running;

            let button = ui.add_enabled(can_run, egui::Button::new("▶ Estimate"));
            if can_run && (button.clicked() || submitted) {
                state.run_requested = true;
            }

            if state.is_running {
                ui.spinner();
            }

            if let Some(error) = validation_error.filter(|_| !state.ticker_input.is_empty()) {
                ui.colored_label(egui::Color32::RED, error);
            }
        });
    }

    fn show_data_source(ui: &mut egui::Ui, state: &mut AppState) {
        egui::ComboBox::from_id_salt("data_source")
            .selected_text(state.source.display_name())
            .show_ui(ui, |ui| {
                for kind in [SourceKind::Yahoo, SourceKind::Csv] {
                    ui.selectable_value(&mut state.source, kind, kind.display_name());
                }
            });

        if state.source == SourceKind::Csv {
            ui.horizontal(|ui| {
                if ui.button("Select Folder...").clicked() {
                    if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                        state.csv_dir = dir;
                    }
                }
            });
            ui.label(format!("Folder: {}", state.csv_dir.display()));
            ui.weak("Reads TICKER_cashflow.csv and TICKER_balance_sheet.csv");
        }
    }

    fn show_assumptions(ui: &mut egui::Ui, state: &mut AppState) {
        ui.horizontal(|ui| {
            ui.label("Terminal Growth:");
            let mut pct = state.terminal_growth * 100.0;
            if ui
                .add(egui::DragValue::new(&mut pct)
                    .suffix("%")
                    .speed(0.1)
                    .range(-5.0..=10.0)
                    .max_decimals(2))
                .changed()
            {
                state.terminal_growth = pct / 100.0;
            }
        });

        ui.horizontal(|ui| {
            ui.label("Projection Years:");
            ui.add(egui::DragValue::new(&mut state.horizon_years).range(1..=30));
        });

        ui.horizontal(|ui| {
            ui.label("Trailing FCF Periods:");
            ui.add(egui::DragValue::new(&mut state.trailing_periods).range(1..=10));
        });
    }

    fn validate(state: &AppState) -> Result<(), String> {
        normalize_ticker(&state.ticker_input).map_err(|e| e.to_string())?;

        if state.growth_rates.is_empty() || state.discount_rates.is_empty() {
            return Err("Add at least one growth and one discount rate".to_string());
        }

        if state.source == SourceKind::Csv && !state.csv_dir.is_dir() {
            return Err(format!("Folder not found: {}", state.csv_dir.display()));
        }

        Ok(())
    }
}
