use crate::surface::SurfaceSize;
use crate::ui::{Rect, Size};

pub type Color = [u8; 4];

// 3x5 block font, scaled by an integer factor.
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

/// Pixel extent of a single line of `text` at `scale`.
///
/// The trailing inter-glyph gap is not counted, so centering a string with this size lands the
/// glyph ink in the middle.
pub fn text_size(text: &str, scale: u32) -> Size {
    let scale = scale.max(1);
    let glyphs = text.chars().count() as u32;
    if glyphs == 0 {
        return Size::new(0, 0);
    }
    let w = glyphs * glyph_advance_x(scale) - scale;
    Size::new(w, GLYPH_H * scale)
}

/// Largest scale in `1..=max_scale` at which `text` fits inside `bounds`.
///
/// Returns 1 when even the smallest scale overflows.
pub fn fit_text_scale(text: &str, bounds: Size, max_scale: u32) -> u32 {
    (1..=max_scale.max(1))
        .rev()
        .find(|&scale| text_size(text, scale).fits_in(bounds))
        .unwrap_or(1)
}

/// Unified 2D rendering interface.
///
/// Game code only talks to this trait; the backing store is whatever the implementation draws
/// into (a window's pixel buffer or an offscreen RGBA frame).
pub trait Renderer2d {
    fn size(&self) -> SurfaceSize;

    /// Opaque fill.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Alpha-blended rect over existing content (alpha is applied to `color`'s RGB).
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32);

    /// Draws `text` centered inside `rect`.
    fn draw_text_centered(&mut self, rect: Rect, text: &str, color: Color, scale: u32) {
        let placed = rect.centered(text_size(text, scale));
        self.draw_text_scaled(placed.x, placed.y, text, color, scale);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// CPU renderer that draws into an RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Visits every pixel of `rect` clipped to the frame.
    ///
    /// Does nothing if the frame is smaller than `size` claims.
    fn for_each_pixel(&mut self, rect: Rect, mut f: impl FnMut(&mut [u8])) {
        let width = self.size.width;
        let height = self.size.height;

        let max_x = rect.x.saturating_add(rect.w).min(width);
        let max_y = rect.y.saturating_add(rect.h).min(height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }
        if self.size.is_empty() || self.frame.len() < self.size.rgba_len() {
            return;
        }

        let stride = width as usize * 4;
        let row_bytes = (max_x - rect.x) as usize * 4;
        for y in rect.y..max_y {
            let row_start = y as usize * stride + rect.x as usize * 4;
            let row = &mut self.frame[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                f(px);
            }
        }
    }

    fn draw_glyph(&mut self, x: u32, y: u32, ch: char, color: Color, scale: u32) {
        for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
            let py = y.saturating_add(row as u32 * scale);
            for col in 0..GLYPH_W {
                let mask = 1u8 << (GLYPH_W - 1 - col);
                if bits & mask == 0 {
                    continue;
                }
                let px = x.saturating_add(col * scale);
                self.fill_rect(Rect::new(px, py, scale, scale), color);
            }
        }
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.for_each_pixel(rect, |px| px.copy_from_slice(&color));
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => {}
            255 => self.fill_rect(rect, color),
            _ => {
                let a = alpha as u32;
                let inv = 255 - a;
                self.for_each_pixel(rect, |px| {
                    for c in 0..3 {
                        px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                    }
                    px[3] = 255;
                });
            }
        }
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let adv_x = glyph_advance_x(scale);

        let mut cursor_x = x;
        for ch in text.chars() {
            if cursor_x >= self.size.width {
                break;
            }
            if ch != ' ' {
                self.draw_glyph(cursor_x, y, ch, color, scale);
            }
            cursor_x = cursor_x.saturating_add(adv_x);
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],

        'A' => [0b010, 0b101, 0b111, 0b101, 0b101],
        'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'J' => [0b111, 0b001, 0b001, 0b101, 0b010],
        'K' => [0b101, 0b110, 0b100, 0b110, 0b101],
        'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'M' => [0b101, 0b111, 0b111, 0b101, 0b101],
        'N' => [0b101, 0b111, 0b111, 0b111, 0b101],
        'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'R' => [0b111, 0b101, 0b111, 0b110, 0b101],
        'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'V' => [0b101, 0b101, 0b101, 0b101, 0b010],
        'W' => [0b101, 0b101, 0b111, 0b111, 0b101],
        'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'Y' => [0b101, 0b101, 0b010, 0b010, 0b010],
        'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],

        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],

        _ => [0b111, 0b001, 0b010, 0b000, 0b010], // '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [frame[i], frame[i + 1], frame[i + 2], frame[i + 3]]
    }

    #[test]
    fn text_size_excludes_trailing_gap() {
        assert_eq!(text_size("", 3), Size::new(0, 0));
        assert_eq!(text_size("2", 1), Size::new(3, 5));
        assert_eq!(text_size("2048", 2), Size::new(30, 10));
    }

    #[test]
    fn fit_text_scale_picks_largest_fitting_scale() {
        assert_eq!(fit_text_scale("2", Size::new(75, 75), 8), 8);
        assert_eq!(fit_text_scale("2048", Size::new(75, 75), 8), 5);
        assert_eq!(fit_text_scale("2048", Size::new(2, 2), 8), 1);
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let size = SurfaceSize::new(4, 4);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.fill_rect(Rect::new(2, 2, 10, 10), [9, 9, 9, 255]);

        assert_eq!(px(&frame, 4, 3, 3), [9, 9, 9, 255]);
        assert_eq!(px(&frame, 4, 1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn blend_rect_mixes_with_existing_pixels() {
        let size = SurfaceSize::new(2, 2);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.clear([200, 100, 0, 255]);
        gfx.blend_rect(Rect::from_size(2, 2), [0, 0, 0, 255], 180);

        // (c * 75 + 127) / 255
        assert_eq!(px(&frame, 2, 0, 0), [59, 29, 0, 255]);
    }

    #[test]
    fn draw_text_centered_keeps_ink_inside_rect() {
        let size = SurfaceSize::new(20, 20);
        let mut frame = vec![0u8; size.rgba_len()];
        let mut gfx = CpuRenderer::new(&mut frame, size);
        gfx.draw_text_centered(Rect::new(5, 5, 10, 10), "1", [255, 255, 255, 255], 1);

        // '1' is 3x5 at (8, 7); its middle column is solid.
        assert_eq!(px(&frame, 20, 9, 7), [255, 255, 255, 255]);
        assert_eq!(px(&frame, 20, 9, 11), [255, 255, 255, 255]);
        assert_eq!(px(&frame, 20, 4, 4), [0, 0, 0, 0]);
    }
}
