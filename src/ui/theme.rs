// Global theme colours
// All colours are u32 in packed ARGB format: 0xAARRGGBB

// Listing phase
pub const BACKGROUND: u32 = 0xFF_00_00_00; // Black behind both listing and flag
pub const LISTING_TEXT: u32 = 0xFF_00_FF_00; // Terminal green

// Flag bands (top to bottom)
pub const SAFFRON: u32 = 0xFF_FF_99_33;
pub const WHITE: u32 = 0xFF_FF_FF_FF;
pub const INDIA_GREEN: u32 = 0xFF_13_88_08;

// Wheel
pub const NAVY_BLUE: u32 = 0xFF_00_00_80;

/// Band colours in drawing order
pub const STRIPES: [u32; 3] = [SAFFRON, WHITE, INDIA_GREEN];
