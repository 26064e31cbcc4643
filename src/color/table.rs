//! Fixed color lookup tables.
//!
//! Both tables are compile-time constants and never change at runtime, so
//! they can be shared freely between threads.

use super::Rgba;

/// The 16 system colors at the start of the 256-color palette (xterm values).
const SYSTEM_COLORS: [Rgba; 16] = [
    Rgba::rgb(0, 0, 0),
    Rgba::rgb(128, 0, 0),
    Rgba::rgb(0, 128, 0),
    Rgba::rgb(128, 128, 0),
    Rgba::rgb(0, 0, 128),
    Rgba::rgb(128, 0, 128),
    Rgba::rgb(0, 128, 128),
    Rgba::rgb(192, 192, 192),
    Rgba::rgb(128, 128, 128),
    Rgba::rgb(255, 0, 0),
    Rgba::rgb(0, 255, 0),
    Rgba::rgb(255, 255, 0),
    Rgba::rgb(0, 0, 255),
    Rgba::rgb(255, 0, 255),
    Rgba::rgb(0, 255, 255),
    Rgba::rgb(255, 255, 255),
];

/// Channel values of the 6x6x6 color cube (indices 16..=231).
const CUBE_STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const PALETTE_256: [Rgba; 256] = build_palette();

const fn build_palette() -> [Rgba; 256] {
    let mut table = [Rgba::rgb(0, 0, 0); 256];

    let mut i = 0;
    while i < 16 {
        table[i] = SYSTEM_COLORS[i];
        i += 1;
    }

    while i < 232 {
        let n = i - 16;
        table[i] = Rgba::rgb(CUBE_STEPS[n / 36], CUBE_STEPS[(n / 6) % 6], CUBE_STEPS[n % 6]);
        i += 1;
    }

    while i < 256 {
        let level = (8 + 10 * (i - 232)) as u8;
        table[i] = Rgba::rgb(level, level, level);
        i += 1;
    }

    table
}

/// Color for a standard or bright SGR code.
///
/// Defined for foreground codes 30-37 and 90-97 and background codes 40-47
/// and 100-107; any other code yields `None`.
pub fn ansi_color(code: u32) -> Option<Rgba> {
    let color = match code {
        30 | 40 => Rgba::BLACK,
        31 | 41 => Rgba::RED,
        32 | 42 => Rgba::GREEN,
        33 | 43 => Rgba::YELLOW,
        34 | 44 => Rgba::BLUE,
        35 | 45 => Rgba::MAGENTA,
        36 | 46 => Rgba::CYAN,
        37 | 47 => Rgba::LIGHT_GRAY,
        90 | 100 => Rgba::DARK_GRAY,
        91 | 101 => Rgba::LIGHT_RED,
        92 | 102 => Rgba::LIGHT_GREEN,
        93 | 103 => Rgba::LIGHT_YELLOW,
        94 | 104 => Rgba::LIGHT_BLUE,
        95 | 105 => Rgba::LIGHT_MAGENTA,
        96 | 106 => Rgba::LIGHT_CYAN,
        97 | 107 => Rgba::WHITE,
        _ => return None,
    };
    Some(color)
}

/// Color for an index of the 256-color extended palette.
pub fn palette256(index: u8) -> Rgba {
    PALETTE_256[index as usize]
}
