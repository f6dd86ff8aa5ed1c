use engine::graphics::Color;

pub const BACKGROUND: Color = [250, 248, 239, 255];
pub const TILE_TEXT: Color = [119, 110, 101, 255];
pub const OVERLAY: Color = [0, 0, 0, 255];
pub const OVERLAY_ALPHA: u8 = 180;
pub const OVERLAY_TEXT: Color = BACKGROUND;

/// Colour for tiles above 2048 or otherwise missing from `TILE_COLORS`.
pub const FALLBACK_TILE: Color = [60, 58, 50, 255];

const TILE_COLORS: [(u32, Color); 12] = [
    (0, [205, 193, 180, 255]),
    (2, [238, 228, 218, 255]),
    (4, [237, 224, 200, 255]),
    (8, [242, 177, 121, 255]),
    (16, [245, 149, 99, 255]),
    (32, [246, 124, 95, 255]),
    (64, [246, 94, 59, 255]),
    (128, [237, 207, 114, 255]),
    (256, [237, 204, 97, 255]),
    (512, [237, 200, 80, 255]),
    (1024, [237, 197, 63, 255]),
    (2048, [237, 194, 46, 255]),
];

pub fn tile_color(value: u32) -> Color {
    // Table rows are 0 then 2^1..=2^11, so a tile's row is its exponent.
    let index = match value {
        0 => 0,
        v if v.is_power_of_two() => v.trailing_zeros() as usize,
        _ => return FALLBACK_TILE,
    };
    match TILE_COLORS.get(index) {
        Some(&(key, color)) if key == value => color,
        _ => FALLBACK_TILE,
    }
}
