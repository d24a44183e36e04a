use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::WellAddress;
use crate::data::selection::SelectionState;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.60, 0.70);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: replicate-set index / pending state → Color32
// ---------------------------------------------------------------------------

/// Colour assignment for the plate map and the curve plot.
///
/// The i-th committed set gets `colors[i % PALETTE_SIZE]`; the pending
/// highlight overrides any committed colour for a well.
#[derive(Debug, Clone)]
pub struct SetPalette {
    colors: Vec<Color32>,
}

/// Number of distinct set colours before they cycle.
pub const PALETTE_SIZE: usize = 8;

/// Highlight for pending (not yet committed) wells.
pub const HIGHLIGHT: Color32 = Color32::from_rgb(255, 210, 80);

impl Default for SetPalette {
    fn default() -> Self {
        SetPalette {
            colors: generate_palette(PALETTE_SIZE),
        }
    }
}

impl SetPalette {
    /// Colour of the i-th committed set.
    pub fn color_for_set(&self, index: usize) -> Color32 {
        self.colors[index % self.colors.len()]
    }

    /// Colour a well should display, if any: highlight when pending,
    /// otherwise its (latest) committed set's colour.
    pub fn well_color(&self, selection: &SelectionState, well: WellAddress) -> Option<Color32> {
        if selection.is_pending(well) {
            return Some(HIGHLIGHT);
        }
        selection
            .set_index_for(well)
            .map(|i| self.color_for_set(i))
    }

    /// Legend entries (set label, member count, colour) for the side panel.
    pub fn legend_entries(&self, selection: &SelectionState) -> Vec<(String, usize, Color32)> {
        selection
            .committed()
            .iter()
            .enumerate()
            .map(|(i, set)| (set.label(), set.len(), self.color_for_set(i)))
            .collect()
    }
}
