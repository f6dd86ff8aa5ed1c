use engine::graphics::{fit_text_scale, Renderer2d};
use engine::regression::render_hashes;
use engine::surface::{RgbaBuffer, SurfaceSize};
use engine::ui::{Rect, Size};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn draw_checker(cells: &[[u8; 2]; 2], gfx: &mut dyn Renderer2d) {
    let s = gfx.size();
    let area = Rect::from_size(s.width, s.height);
    for (r, row) in cells.iter().enumerate() {
        for (c, &on) in row.iter().enumerate() {
            let color = if on == 1 { WHITE } else { BLACK };
            gfx.fill_rect(area.grid_cell(2, 2, r as u32, c as u32), color);
        }
    }
}

#[test]
fn grid_cells_cover_the_whole_buffer_without_overlap() {
    let mut buf = RgbaBuffer::new(SurfaceSize::square(40));
    draw_checker(&[[1, 0], [0, 1]], &mut buf.renderer());

    assert_eq!(buf.pixel(0, 0), Some(WHITE));
    assert_eq!(buf.pixel(19, 19), Some(WHITE));
    assert_eq!(buf.pixel(20, 19), Some(BLACK));
    assert_eq!(buf.pixel(19, 20), Some(BLACK));
    assert_eq!(buf.pixel(39, 39), Some(WHITE));
}

#[test]
fn centered_text_is_symmetric_in_its_cell() {
    let mut buf = RgbaBuffer::new(SurfaceSize::square(100));
    let cell = Rect::from_size(100, 100);
    let scale = fit_text_scale("8", Size::new(75, 75), 8);
    {
        let mut gfx = buf.renderer();
        gfx.clear(BLACK);
        gfx.draw_text_centered(cell, "8", WHITE, scale);
    }

    // '8' is 3x5 glyph units with a solid top row; at scale 8 it spans x 38..62, y 30..70.
    assert_eq!(scale, 8);
    assert_eq!(buf.pixel(38, 30), Some(WHITE));
    assert_eq!(buf.pixel(61, 30), Some(WHITE));
    assert_eq!(buf.pixel(37, 30), Some(BLACK));
    assert_eq!(buf.pixel(62, 30), Some(BLACK));
    assert_eq!(buf.pixel(50, 69), Some(WHITE));
    assert_eq!(buf.pixel(50, 70), Some(BLACK));
}

#[test]
fn identical_draws_hash_identically() {
    let boards: [[[u8; 2]; 2]; 3] = [[[1, 0], [0, 1]], [[1, 0], [0, 1]], [[0, 1], [1, 0]]];
    let hashes = render_hashes(&boards, SurfaceSize::square(16), |cells, gfx| {
        draw_checker(cells, gfx)
    });

    assert_eq!(hashes[0], hashes[1]);
    assert_ne!(hashes[0], hashes[2]);
}
