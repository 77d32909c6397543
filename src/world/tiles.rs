use std::fmt;

/// Tile types that stop the player
pub const BLOCKING_TILES: &[&str] = &["WATER", "HOUSE_BASE"];

/// Colors for the tile types the world service emits most often
const PALETTE: &[(&str, Color)] = &[
    ("GRASS", Color::hex(0x3b8c4c)),
    ("ROAD", Color::hex(0x9aa3ab)),
    ("WATER", Color::hex(0x2a6df2)),
    ("SOIL", Color::hex(0x8c5b3f)),
    ("TREE", Color::hex(0x1f4d25)),
    ("HOUSE_BASE", Color::hex(0xc77232)),
];

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    const fn hex(rgb: u32) -> Self {
        Color {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
        }
    }
}

/// CSS form, usable as a canvas fill style
impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

pub fn blocks(tile: &str) -> bool {
    BLOCKING_TILES.iter().any(|blocking| *blocking == tile)
}

/// Color for a tile type
/// - palette entry when there is one
/// - otherwise a color hashed from the name, stable across calls
pub fn create_color(tile: &str) -> Color {
    PALETTE
        .iter()
        .find(|(name, _)| *name == tile)
        .map(|(_, color)| *color)
        .unwrap_or_else(|| hashed_color(tile))
}

/// `hash = hash * 31 + unit` over the UTF-16 units, wrapping at 32 bits,
/// each channel folded into `0..255`
pub fn hashed_color(tile: &str) -> Color {
    let hash = tile
        .encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as u32));
    let channel = |shift: u32| (((hash >> shift) & 0xff) % 255) as u8;
    Color::new(channel(16), channel(8), channel(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_types_use_fixed_colors() {
        assert_eq!(create_color("GRASS"), Color::new(0x3b, 0x8c, 0x4c));
        assert_eq!(create_color("WATER").to_string(), "rgb(42, 109, 242)");
    }

    #[test]
    fn unknown_types_hash_deterministically() {
        for tile in ["ROCK", "SHRUB", "MAGIC_SIGIL", "FARM", "", "草地"] {
            assert_eq!(create_color(tile), create_color(tile));
            assert_eq!(create_color(tile), hashed_color(tile));
        }
    }

    #[test]
    fn hash_matches_rolling_formula() {
        // "AB" -> 65 * 31 + 66 = 2081 = 0x000821
        assert_eq!(hashed_color("AB"), Color::new(0, 8, 33));
        assert_eq!(hashed_color(""), Color::new(0, 0, 0));
    }

    #[test]
    fn channels_fold_full_byte_to_zero() {
        // single unit 0xff -> blue channel 255 % 255
        assert_eq!(hashed_color("\u{ff}"), Color::new(0, 0, 0));
    }

    #[test]
    fn blocking_set() {
        assert!(blocks("WATER"));
        assert!(blocks("HOUSE_BASE"));
        assert!(!blocks("GRASS"));
        assert!(!blocks("water"));
    }
}
