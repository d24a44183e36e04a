use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::data::model::WellAddress;
use crate::data::tidy::{self, EXPORT_FILE_NAME};
use crate::state::{AppState, SelectionMode};

// ---------------------------------------------------------------------------
// Left side panel – replicate-set controls
// ---------------------------------------------------------------------------

/// Render the left panel: interaction mode, well selection, the three
/// actions, and the committed-set legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Replicate Sets");
    ui.separator();

    if state.table.is_none() {
        ui.label("No table loaded.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.mode, SelectionMode::PlateMap, "Plate map");
        ui.selectable_value(&mut state.mode, SelectionMode::PickList, "Pick list");
    });
    ui.separator();

    match state.mode {
        SelectionMode::PlateMap => pending_summary(ui, state),
        SelectionMode::PickList => pick_list(ui, state),
    }
    ui.separator();

    if ui.button("Add Replicate Set").clicked() {
        state.add_replicate_set();
    }
    if ui.button("Reset All Selections").clicked() {
        state.reset_selections();
    }
    if ui.button("Export Tidy CSV").clicked() {
        export_tidy_csv(state);
    }
    ui.separator();

    legend(ui, state);

    for warning in &state.export_warnings {
        ui.label(RichText::new(warning).color(Color32::from_rgb(200, 120, 0)));
    }
}

/// Plate-map mode: list the currently highlighted wells.
fn pending_summary(ui: &mut Ui, state: &AppState) {
    ui.label("Click wells on the plate to highlight them, then commit.");
    let pending: Vec<String> = state.selection.pending().map(|w| w.to_string()).collect();
    if pending.is_empty() {
        ui.weak("Nothing highlighted.");
    } else {
        ui.label(format!("Highlighted: {}", pending.join(", ")));
    }
}

/// Pick-list mode: one checkbox per active well, committed as a batch.
fn pick_list(ui: &mut Ui, state: &mut AppState) {
    ui.label("Tick wells, then add them as one replicate set.");

    let wells: Vec<WellAddress> = state
        .table
        .as_ref()
        .map(|t| t.active_wells().collect())
        .unwrap_or_default();

    ScrollArea::vertical()
        .max_height(ui.available_height() * 0.5)
        .auto_shrink([false, true])
        .show(ui, |ui: &mut Ui| {
            for well in wells {
                let mut checked = state.picks.contains(&well);
                if ui.checkbox(&mut checked, well.to_string()).changed() {
                    state.toggle_pick(well);
                }
            }
        });
}

/// Committed sets with their colour swatch, label, and member count.
fn legend(ui: &mut Ui, state: &AppState) {
    if state.selection.committed().is_empty() {
        ui.weak("No replicate sets yet.");
        return;
    }
    ui.strong("Committed sets");
    for (label, members, color) in state.palette.legend_entries(&state.selection) {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("■").color(color));
            ui.label(format!("{label}  ({members} wells)"));
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export Tidy CSV…").clicked() {
                export_tidy_csv(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            let mut status = format!(
                "{} wells, {} timepoints",
                table.wells.len(),
                table.len()
            );
            if !table.ignored_columns.is_empty() {
                status.push_str(&format!(
                    ", {} non-well columns ignored",
                    table.ignored_columns.len()
                ));
            }
            ui.label(status);
            ui.separator();
            ui.label(format!(
                "{} sets committed",
                state.selection.committed().len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open growth-curve CSV")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} wells over {} timepoints from {}",
                    table.wells.len(),
                    table.len(),
                    path.display()
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

pub fn export_tidy_csv(state: &mut AppState) {
    let Some(rows) = state.run_export() else {
        state.status_message = Some("Load a CSV before exporting.".to_string());
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export tidy CSV")
        .set_file_name(EXPORT_FILE_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        let written = tidy::to_csv_bytes(&rows).and_then(|bytes| {
            std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))
        });
        match written {
            Ok(()) => {
                log::info!("Exported {} tidy rows to {}", rows.len(), path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
