use eframe::egui::{
    Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2,
};

use crate::data::model::{PLATE_COLS, PLATE_ROWS, WellAddress};
use crate::state::{AppState, SelectionMode};

// ---------------------------------------------------------------------------
// Plate map (8×12 grid)
// ---------------------------------------------------------------------------

const INACTIVE_FILL: Color32 = Color32::from_gray(235);

/// Render the clickable plate map.
///
/// Cells show committed-set colours with the pending highlight on top. In
/// plate-map mode a click toggles the well's pending state; in pick-list mode
/// the grid is display-only.
pub fn plate_map(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a growth-curve CSV to see the plate  (File → Open…)");
        });
        return;
    }

    let cols = f32::from(PLATE_COLS);
    let rows = f32::from(PLATE_ROWS);
    let cell = (ui.available_width() / cols).clamp(24.0, 60.0);
    let (rect, response) = ui.allocate_exact_size(vec2(cell * cols, cell * rows), Sense::click());

    let clicked_well = if response.clicked() {
        response
            .interact_pointer_pos()
            .and_then(|pos| well_at(rect, cell, pos))
    } else {
        None
    };

    let painter = ui.painter_at(rect);
    for addr in WellAddress::all() {
        let cell_rect = Rect::from_min_size(
            pos2(
                rect.left() + addr.col_index() as f32 * cell,
                rect.top() + addr.row_index() as f32 * cell,
            ),
            vec2(cell, cell),
        );

        let active = state
            .table
            .as_ref()
            .is_some_and(|table| table.is_active(addr));
        let fill = if active {
            state
                .palette
                .well_color(&state.selection, addr)
                .unwrap_or(Color32::WHITE)
        } else {
            INACTIVE_FILL
        };

        painter.rect_filled(cell_rect.shrink(1.0), 2.0, fill);
        painter.rect_stroke(
            cell_rect.shrink(1.0),
            2.0,
            Stroke::new(1.0, Color32::BLACK),
            StrokeKind::Inside,
        );
        if active {
            painter.text(
                cell_rect.center(),
                Align2::CENTER_CENTER,
                addr.to_string(),
                FontId::proportional(cell * 0.32),
                Color32::BLACK,
            );
        }
    }

    if state.mode == SelectionMode::PlateMap {
        if let Some(well) = clicked_well {
            state.selection.toggle_pending(well);
        }
    }
}

/// Map a pointer position inside the grid rect to a well address.
fn well_at(rect: Rect, cell: f32, pos: Pos2) -> Option<WellAddress> {
    let col = ((pos.x - rect.left()) / cell).floor();
    let row = ((pos.y - rect.top()) / cell).floor();
    if col < 0.0 || row < 0.0 || col >= f32::from(PLATE_COLS) || row >= f32::from(PLATE_ROWS) {
        return None;
    }
    WellAddress::new((b'A' + row as u8) as char, col as u8 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_position_maps_to_cells() {
        let rect = Rect::from_min_size(pos2(10.0, 20.0), vec2(12.0 * 30.0, 8.0 * 30.0));
        let cell = 30.0;

        let a1 = well_at(rect, cell, pos2(11.0, 21.0)).unwrap();
        assert_eq!(a1.to_string(), "A1");

        let h12 = well_at(rect, cell, pos2(10.0 + 11.5 * 30.0, 20.0 + 7.5 * 30.0)).unwrap();
        assert_eq!(h12.to_string(), "H12");

        assert!(well_at(rect, cell, pos2(5.0, 21.0)).is_none());
        assert!(well_at(rect, cell, pos2(10.0 + 12.1 * 30.0, 21.0)).is_none());
    }
}
