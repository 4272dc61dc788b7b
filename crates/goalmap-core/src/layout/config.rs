use serde::{Deserialize, Serialize};

/// Default colour cycle, indexed by depth
pub const PALETTE: [&str; 10] = [
    "#5B21B6", // Violet
    "#1D4ED8", // Blue
    "#047857", // Emerald
    "#BE123C", // Rose
    "#D97706", // Amber
    "#6D28D9", // Deep Violet
    "#2563EB", // Bright Blue
    "#059669", // Bright Emerald
    "#E11D48", // Bright Rose
    "#F59E0B", // Bright Amber
];

/// Colour used if a configuration supplies an empty palette
const FALLBACK_COLOR: &str = "#808080";

/// Tunables for the radial layout; every field is optional when
/// deserialised
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between the outermost ring and the viewport edge
    pub margin_px: f64,
    /// Radius of the centre hub (the back/home control)
    pub center_radius_px: f64,
    /// Ring cap when the root is focused
    pub overview_depth_cap: usize,
    /// Ring cap when zoomed into a subtree
    pub zoomed_depth_cap: usize,
    /// Rings thinner than this are not drawn; depth is reduced instead
    pub min_ring_thickness_px: f64,
    /// Width below which a label is unreadable
    pub min_label_px: f64,
    /// Radial thickness of continuation slivers
    pub sliver_thickness_px: f64,
    /// Gap between adjacent continuation slivers
    pub sliver_gap_px: f64,
    /// Slivers shorter than this are dropped
    pub min_sliver_arc_px: f64,
    pub palette: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_px: 10.0,
            center_radius_px: 30.0,
            overview_depth_cap: 3,
            zoomed_depth_cap: 6,
            min_ring_thickness_px: 36.0,
            min_label_px: 24.0,
            sliver_thickness_px: 6.0,
            sliver_gap_px: 2.0,
            min_sliver_arc_px: 2.0,
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl LayoutConfig {
    /// Depth cap for the given mode
    pub fn depth_cap(&self, zoomed: bool) -> usize {
        if zoomed {
            self.zoomed_depth_cap
        } else {
            self.overview_depth_cap
        }
    }

    /// Palette entry for a ring
    pub fn color_for_depth(&self, depth: usize) -> &str {
        if self.palette.is_empty() {
            return FALLBACK_COLOR;
        }
        &self.palette[depth % self.palette.len()]
    }
}
