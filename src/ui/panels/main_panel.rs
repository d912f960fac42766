use crate::types::rate_label;
use crate::ui::services::MatrixExporter;
use crate::ui::state::{AppState, ValuationDisplay};
use crate::ui::widgets::{Heatmap, SensitivityTable};
use crate::data::LineItem;

pub struct MainPanel;

impl MainPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        ui.heading("Intrinsic Value Estimator (DCF Model)");

        ui.separator();

        ui.label(&state.status_message);
        if let Some(error) = &state.last_error {
            ui.colored_label(egui::Color32::from_rgb(220, 80, 60), format!("⚠ {}", error));
        }

        ui.separator();

        let Some(display) = &state.result else {
            ui.centered_and_justified(|ui| {
                ui.label("No valuation yet. Enter a ticker and press 'Estimate'.");
            });
            return;
        };

        let mut export_message = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            Self::show_assumptions(ui, display);
            Self::show_base_case(ui, display);

            ui.separator();

            ui.horizontal(|ui| {
                ui.heading("Sensitivity Analysis (Intrinsic Value per Share)");
                if ui.button("Export CSV...").clicked() {
                    export_message = Self::export(display);
                }
            });
            SensitivityTable::show(ui, &display.matrix);

            ui.add_space(12.0);

            Heatmap::show(
                ui,
                &display.matrix,
                &format!(
                    "DCF Sensitivity for {} (Growth vs. Discount Rate)",
                    display.snapshot.ticker
                ),
            );
        });

        if let Some(message) = export_message {
            state.status_message = message;
        }
    }

    fn show_assumptions(ui: &mut egui::Ui, display: &ValuationDisplay) {
        let s = &display.snapshot;

        ui.group(|ui| {
            ui.heading(format!("Assumptions for {}", s.ticker));
            egui::Grid::new("assumptions").num_columns(2).show(ui, |ui| {
                ui.label(format!("Average FCF ({}Y):", s.fcf_periods));
                ui.label(format!("${}", group_thousands(s.avg_fcf)));
                ui.end_row();

                Self::line_item_row(ui, "Total Debt:", &s.total_debt);
                Self::line_item_row(ui, "Cash:", &s.cash);

                ui.label("Net Debt:");
                ui.label(format!("${}", group_thousands(s.net_debt)));
                ui.end_row();

                ui.label("Shares Outstanding:");
                match (s.shares_outstanding, &s.shares_item) {
                    (Some(shares), Some(item)) => {
                        ui.label(group_thousands(shares as f64)).on_hover_text(item);
                    }
                    _ => {
                        ui.colored_label(egui::Color32::YELLOW, "not reported (values shown as 0)");
                    }
                }
                ui.end_row();

                ui.label("Terminal Growth / Horizon:");
                ui.label(format!(
                    "{} / {} years",
                    rate_label(display.terminal_growth),
                    display.horizon_years
                ));
                ui.end_row();

                ui.label("Source:");
                ui.label(&s.source_name);
                ui.end_row();
            });
        });
    }

    fn show_base_case(ui: &mut egui::Ui, display: &ValuationDisplay) {
        let Some(base) = &display.base_case else {
            return;
        };
        let b = &base.breakdown;

        ui.collapsing(
            format!(
                "Base case: growth {}, discount {}",
                rate_label(base.growth_rate),
                rate_label(base.discount_rate)
            ),
            |ui| {
                egui::Grid::new("base_case").num_columns(2).striped(true).show(ui, |ui| {
                    for (t, flow) in b.discounted_flows.iter().enumerate() {
                        ui.label(format!("PV of year {} FCF:", t + 1));
                        ui.label(format!("${}", group_thousands(*flow)));
                        ui.end_row();
                    }
                    let rows = [
                        ("Terminal value:", b.terminal_value),
                        ("PV of terminal value:", b.terminal_value_pv),
                        ("Enterprise value:", b.enterprise_value),
                        ("Equity value:", b.equity_value),
                    ];
                    for (label, value) in rows {
                        ui.label(label);
                        ui.label(format!("${}", group_thousands(value)));
                        ui.end_row();
                    }
                    ui.strong("Per share:");
                    ui.strong(format!("${:.2}", b.per_share));
                    ui.end_row();
                });
            },
        );
    }

    fn line_item_row(ui: &mut egui::Ui, label: &str, item: &LineItem) {
        ui.label(label);
        let text = format!("${}", group_thousands(item.value));
        match &item.matched {
            Some(name) => {
                ui.label(text).on_hover_text(name);
            }
            None => {
                ui.colored_label(egui::Color32::YELLOW, format!("{} (not reported, assumed 0)", text));
            }
        }
        ui.end_row();
    }

    fn export(display: &ValuationDisplay) -> Option<String> {
        let path = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(format!("{}_dcf_sensitivity.csv", display.snapshot.ticker))
            .save_file()?;

        Some(match MatrixExporter::to_csv(&display.matrix, &path) {
            Ok(()) => format!("Exported to {}", path.display()),
            Err(e) => format!("Export failed: {}", e),
        })
    }
}

/// Whole currency units with thousands separators, e.g. `-1,234,567`
fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}
