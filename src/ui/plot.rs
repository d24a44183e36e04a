use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Growth-curve preview (below the plate map)
// ---------------------------------------------------------------------------

const UNSELECTED: Color32 = Color32::from_gray(200);

/// Plot every active well's series, coloured like the plate map: pending
/// highlight first, then committed-set colour, faint gray otherwise.
pub fn growth_plot(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    Plot::new("growth_plot")
        .legend(Legend::default())
        .x_axis_label("Time [s]")
        .y_axis_label("Signal")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (&well, series) in &table.wells {
                let color = state
                    .palette
                    .well_color(&state.selection, well)
                    .unwrap_or(UNSELECTED);

                // Legend name: the set's condition label once committed,
                // the well's own address while pending or unselected.
                let name = if state.selection.is_pending(well) {
                    well.to_string()
                } else {
                    state
                        .selection
                        .set_index_for(well)
                        .map(|i| state.selection.committed()[i].label())
                        .unwrap_or_else(|| well.to_string())
                };

                let points: PlotPoints = table
                    .timepoints
                    .iter()
                    .zip(series.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                plot_ui.line(Line::new(points).name(&name).color(color).width(1.5));
            }
        });
}
