use crate::label::Label;

/// Fallback for names missing from a catalog and for unparseable colors.
pub const NEUTRAL_GRAY: &str = "#6B7280";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NEUTRAL_RGB: Rgb = Rgb {
    r: 107,
    g: 114,
    b: 128,
};

/// Parse `#rrggbb` (leading `#` optional). Invalid input yields the neutral gray.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or(NEUTRAL_RGB)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn is_valid_hex(hex: &str) -> bool {
    hex.starts_with('#') && parse_hex(hex).is_some()
}

/// True when white text reads better than black on this background.
pub fn is_color_dark(hex: &str) -> bool {
    let Rgb { r, g, b } = hex_to_rgb(hex);
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    luminance < 0.5
}

/// Color of the catalog entry named `name`, or the neutral gray.
pub fn resolve_color<'a>(name: &str, catalog: &'a [Label]) -> &'a str {
    catalog
        .iter()
        .find(|l| l.name == name)
        .map(|l| l.color.as_str())
        .unwrap_or(NEUTRAL_GRAY)
}
