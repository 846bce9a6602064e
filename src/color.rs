use eframe::egui::Color32;
use palette::Srgb;
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Hex colours → egui / plotters colours
// ---------------------------------------------------------------------------

/// Used when a descriptor carries an unparseable colour.
pub const FALLBACK: Srgb<u8> = Srgb::new(128, 128, 128);

/// Parse `#rrggbb` (the leading `#` is optional).
pub fn parse_hex(hex: &str) -> Option<Srgb<u8>> {
    hex.parse::<Srgb<u8>>().ok()
}

pub fn to_color32(rgb: Srgb<u8>) -> Color32 {
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

pub fn to_rgb_color(rgb: Srgb<u8>) -> RGBColor {
    RGBColor(rgb.red, rgb.green, rgb.blue)
}
