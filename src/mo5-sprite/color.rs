//! The fixed 16 color palette and the attribute byte format.
//!
//! One attribute byte covers a group of 8 pixels: the low nibble is the
//! background color, the high nibble the foreground color.

pub const BLACK: u8 = 0;
pub const RED: u8 = 1;
pub const GREEN: u8 = 2;
pub const YELLOW: u8 = 3;
pub const BLUE: u8 = 4;
pub const MAGENTA: u8 = 5;
pub const CYAN: u8 = 6;
pub const WHITE: u8 = 7;
pub const GRAY: u8 = 8;
pub const LIGHT_RED: u8 = 9;
pub const LIGHT_GREEN: u8 = 10;
pub const LIGHT_YELLOW: u8 = 11;
pub const LIGHT_BLUE: u8 = 12;
pub const PURPLE: u8 = 13;
pub const LIGHT_CYAN: u8 = 14;
pub const ORANGE: u8 = 15;

/// Approximate host colors for each palette index, as `0x00RRGGBB`.
pub const PALETTE_RGB: [u32; 16] = [
    0x00_00_00_00, // black
    0x00_FF_00_00, // red
    0x00_00_FF_00, // green
    0x00_FF_FF_00, // yellow
    0x00_00_00_FF, // blue
    0x00_FF_00_FF, // magenta
    0x00_00_FF_FF, // cyan
    0x00_FF_FF_FF, // white
    0x00_80_80_80, // gray
    0x00_FF_80_80, // light red
    0x00_80_FF_80, // light green
    0x00_FF_FF_80, // light yellow
    0x00_80_80_FF, // light blue
    0x00_FF_80_FF, // purple
    0x00_80_FF_FF, // light cyan
    0x00_FF_80_00, // orange
];

/// A color attribute byte.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Attribute(u8);

impl Attribute {
    #[inline]
    pub const fn new(bg: u8, fg: u8) -> Attribute {
        Attribute((bg & 0x0F) | ((fg & 0x0F) << 4))
    }

    #[inline]
    pub const fn background(&self) -> u8 {
        self.0 & 0x0F
    }

    #[inline]
    pub const fn foreground(&self) -> u8 {
        self.0 >> 4
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }
}

impl From<u8> for Attribute {
    fn from(bits: u8) -> Self {
        Attribute(bits)
    }
}
