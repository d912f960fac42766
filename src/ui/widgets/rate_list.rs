use crate::types::rate_label;

pub struct RateListEditor;

impl RateListEditor {
    /// Editable list of rates, shown in percent
    pub fn show(ui: &mut egui::Ui, id: &str, rates: &mut Vec<f64>) {
        let mut remove = None;

        egui::Grid::new(id).num_columns(2).show(ui, |ui| {
            for (idx, rate) in rates.iter_mut().enumerate() {
                let mut pct = *rate * 100.0;
                if ui
                    .add(egui::DragValue::new(&mut pct)
                        .suffix("%")
                        .speed(0.25)
                        .range(-50.0..=100.0)
                        .max_decimals(2))
                    .changed()
                {
                    *rate = pct / 100.0;
                }
                if ui.small_button("✖").on_hover_text("Remove").clicked() {
                    remove = Some(idx);
                }
                ui.end_row();
            }
        });

        // Keep at least one rate so the table never collapses
        if let Some(idx) = remove.filter(|_| rates.len() > 1) {
            rates.remove(idx);
        }

        if ui.button("+ Add").clicked() {
            let next = rates.last().map(|r| r + 0.01).unwrap_or(0.08);
            rates.push(next);
        }

        ui.weak(
            rates
                .iter()
                .map(|&r| rate_label(r))
                .collect::<Vec<_>>()
                .join("  "),
        );
    }
}
