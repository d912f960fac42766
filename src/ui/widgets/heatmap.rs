use crate::engines::valuation::SensitivityMatrix;
use egui::{Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, pos2, vec2};

/// Yellow -> green -> blue ramp, low values yellow
const RAMP: [(u8, u8, u8); 5] = [
    (255, 255, 217),
    (199, 233, 180),
    (65, 182, 196),
    (34, 94, 168),
    (8, 29, 88),
];

const CELL_SIZE: egui::Vec2 = egui::Vec2 { x: 76.0, y: 34.0 };
const AXIS_MARGIN: f32 = 48.0;
const TOP_MARGIN: f32 = 18.0;

/// Color for a value normalized into `0.0..=1.0`
pub fn cell_color(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (RAMP.len() - 1) as f64;
    let idx = (scaled.floor() as usize).min(RAMP.len() - 2);
    let frac = scaled - idx as f64;

    let (r0, g0, b0) = RAMP[idx];
    let (r1, g1, b1) = RAMP[idx + 1];
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    Color32::from_rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

pub struct Heatmap;

impl Heatmap {
    pub fn show(ui: &mut egui::Ui, matrix: &SensitivityMatrix, title: &str) {
        ui.label(egui::RichText::new(title).strong());

        let rows = matrix.num_rows();
        let cols = matrix.num_columns();
        if rows == 0 || cols == 0 {
            return;
        }

        let (lo, hi) = matrix.value_range().unwrap_or((0.0, 0.0));
        let span = hi - lo;

        let size = vec2(
            AXIS_MARGIN + CELL_SIZE.x * cols as f32,
            TOP_MARGIN + AXIS_MARGIN + CELL_SIZE.y * rows as f32,
        );
        let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();
        let font = FontId::proportional(12.0);

        let grid_origin = rect.min + vec2(AXIS_MARGIN, TOP_MARGIN);

        for (i, row) in matrix.rows().iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let min = grid_origin + vec2(CELL_SIZE.x * j as f32, CELL_SIZE.y * i as f32);
                let cell_rect = Rect::from_min_size(min, CELL_SIZE);

                let (fill, label, label_color) = match cell {
                    Some(value) => {
                        let t = if span > 0.0 { (value - lo) / span } else { 0.5 };
                        let fg = if t > 0.55 { Color32::WHITE } else { Color32::BLACK };
                        (cell_color(t), format!("{:.2}", value), fg)
                    }
                    None => (Color32::from_gray(90), "n/a".to_string(), Color32::LIGHT_GRAY),
                };

                painter.rect_filled(cell_rect, 0.0, fill);
                painter.rect_stroke(cell_rect, 0.0, Stroke::new(0.5, Color32::GRAY), StrokeKind::Inside);
                painter.text(cell_rect.center(), Align2::CENTER_CENTER, label, font.clone(), label_color);
            }
        }

        // Row labels (growth) on the left, column labels (discount) underneath
        for (i, label) in matrix.row_labels().iter().enumerate() {
            let y = grid_origin.y + CELL_SIZE.y * (i as f32 + 0.5);
            painter.text(
                pos2(grid_origin.x - 6.0, y),
                Align2::RIGHT_CENTER,
                label,
                font.clone(),
                text_color,
            );
        }
        let grid_bottom = grid_origin.y + CELL_SIZE.y * rows as f32;
        for (j, label) in matrix.column_labels().iter().enumerate() {
            let x = grid_origin.x + CELL_SIZE.x * (j as f32 + 0.5);
            painter.text(pos2(x, grid_bottom + 4.0), Align2::CENTER_TOP, label, font.clone(), text_color);
        }

        painter.text(
            pos2(grid_origin.x + CELL_SIZE.x * cols as f32 / 2.0, rect.max.y),
            Align2::CENTER_BOTTOM,
            "Discount Rate",
            font.clone(),
            text_color,
        );
        painter.text(
            rect.min,
            Align2::LEFT_TOP,
            "FCF Growth Rate",
            font,
            text_color,
        );
        ui.add_space(8.0);
    }
}
