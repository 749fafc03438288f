mod fade;

use smart_leds::RGB8;

use crate::math8::{LEVEL_MAX, scale_level};

pub use fade::{COLOR_STEP_MAX, COLOR_STEP_MIN, ColorFade, ColorStep};

pub type Rgb = RGB8;

pub const OFF: Rgb = rgb_from_u32(0x00_00_00);
pub const RED: Rgb = rgb_from_u32(0xFF_00_00);
pub const GREEN: Rgb = rgb_from_u32(0x00_FF_00);
pub const BLUE: Rgb = rgb_from_u32(0x00_00_FF);
pub const YELLOW: Rgb = rgb_from_u32(0xFF_FF_00);
pub const PURPLE: Rgb = rgb_from_u32(0x80_00_80);
pub const WHITE: Rgb = rgb_from_u32(0xFF_FF_FF);
/// Color shown while the tracker follows its target
pub const TRACKING: Rgb = rgb_from_u32(0x00_FF_FF);

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Scale every channel of `color` by a stage level (0-255)
pub const fn scale_color(color: Rgb, level: u8) -> Rgb {
    Rgb {
        r: scale_level(color.r, level),
        g: scale_level(color.g, level),
        b: scale_level(color.b, level),
    }
}

/// Gray shade used by stages that carry no color
pub const fn gray(level: u8) -> Rgb {
    let value = scale_level(LEVEL_MAX, level);
    Rgb {
        r: value,
        g: value,
        b: value,
    }
}
