//! Color parsing and palette helpers.
//!
//! Chart colors travel through the data model as `#rrggbb` strings (that
//! is what the settings and per-project color fields hold); this module
//! converts them to and from `Color32` and provides the default palette
//! used when creating new lanes and projects.

use egui::Color32;
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

/// Default color for newly created projects.
pub const DEFAULT_PROJECT_COLOR: &str = "#3B82F6";
/// Default color for newly created swimlanes.
pub const DEFAULT_LANE_COLOR: &str = "#60A5FA";

/// Candidate colors offered to new lanes and projects.
const PALETTE_HEX: [&str; 8] = [
    "#3B82F6", "#10B981", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
];

static PALETTE: Lazy<Vec<Color32>> =
    Lazy::new(|| PALETTE_HEX.iter().map(|hex| hex_to_color32(hex)).collect());

/// Converts a hex color string (like "#3B82F6") to Color32.
///
/// Malformed input falls back to black rather than failing; a wrong
/// color must never prevent the chart from rendering.
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim().trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::BLACK
    }
}

/// Formats a color back into the `#rrggbb` form the model stores.
pub fn color32_to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Sets the alpha channel of a color, leaving the channels untouched.
/// The surface blender treats channels as straight (non-premultiplied).
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_premultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Adjusts the brightness of a color by a factor (1.0 = no change,
/// >1.0 = brighter, <1.0 = darker).
pub fn adjust_brightness(color: Color32, factor: f32) -> Color32 {
    let r = (color.r() as f32 * factor).min(255.0) as u8;
    let g = (color.g() as f32 * factor).min(255.0) as u8;
    let b = (color.b() as f32 * factor).min(255.0) as u8;
    Color32::from_rgb(r, g, b)
}

/// Picks a palette color for a newly created lane or project.
pub fn random_palette_color() -> String {
    let mut rng = rand::thread_rng();
    PALETTE_HEX
        .choose(&mut rng)
        .copied()
        .unwrap_or(DEFAULT_PROJECT_COLOR)
        .to_string()
}

/// The parsed palette, for swatch pickers.
pub fn palette() -> &'static [Color32] {
    &PALETTE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        for hex in PALETTE_HEX {
            let color = hex_to_color32(hex);
            assert_eq!(color32_to_hex(color), hex.to_lowercase());
        }
    }

    #[test]
    fn test_hex_parses_channels() {
        let color = hex_to_color32("#3B82F6");
        assert_eq!((color.r(), color.g(), color.b()), (0x3b, 0x82, 0xf6));
    }

    #[test]
    fn test_malformed_hex_is_black() {
        assert_eq!(hex_to_color32(""), Color32::BLACK);
        assert_eq!(hex_to_color32("#fff"), Color32::BLACK);
        assert_eq!(hex_to_color32("nonsense"), Color32::BLACK);
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        let tinted = with_alpha(Color32::from_rgb(10, 20, 30), 0x10);
        assert_eq!(tinted.a(), 0x10);
        assert_eq!((tinted.r(), tinted.g(), tinted.b()), (10, 20, 30));
    }

    #[test]
    fn test_random_palette_color_is_from_palette() {
        for _ in 0..16 {
            let hex = random_palette_color();
            assert!(PALETTE_HEX.contains(&hex.as_str()));
        }
    }
}
