use crate::engines::valuation::SensitivityMatrix;

pub struct SensitivityTable;

impl SensitivityTable {
    pub fn show(ui: &mut egui::Ui, matrix: &SensitivityMatrix) {
        egui::ScrollArea::horizontal().id_salt("sensitivity_scroll").show(ui, |ui| {
            egui::Grid::new("sensitivity_table")
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    // Header
                    ui.strong("Growth \\ Discount");
                    for label in matrix.column_labels() {
                        ui.strong(label);
                    }
                    ui.end_row();

                    for (label, row) in matrix.row_labels().iter().zip(matrix.rows()) {
                        ui.strong(label);
                        for cell in row {
                            match cell {
                                Some(value) => ui.monospace(format!("{:.2}", value)),
                                None => ui.weak("n/a")
                                    .on_hover_text("Discount rate must exceed terminal growth"),
                            };
                        }
                        ui.end_row();
                    }
                });
        });
    }
}
