//! Pixel-space layout: rects, sizes, centering and uniform grids.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// A rect at the origin, e.g. a whole frame.
    pub const fn from_size(w: u32, h: u32) -> Self {
        Self::new(0, 0, w, h)
    }

    pub fn center(&self) -> (u32, u32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// A `size` rect centered in this one, shrunk to fit if it is larger.
    ///
    /// Odd leftovers go to the right and bottom.
    pub fn centered(&self, size: Size) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);
        Self::new(
            self.x + (self.w - w) / 2,
            self.y + (self.h - h) / 2,
            w,
            h,
        )
    }

    /// Largest centered square inside this rect.
    pub fn square(&self) -> Self {
        let side = self.w.min(self.h);
        self.centered(Size::new(side, side))
    }

    /// Cell `(row, col)` of a `rows`×`cols` grid over this rect.
    ///
    /// Cells are `w / cols` by `h / rows`; any remainder stays unused on the right and bottom.
    pub fn grid_cell(&self, rows: u32, cols: u32, row: u32, col: u32) -> Self {
        let cell_w = self.w / cols.max(1);
        let cell_h = self.h / rows.max(1);
        Self::new(
            self.x.saturating_add(col.saturating_mul(cell_w)),
            self.y.saturating_add(row.saturating_mul(cell_h)),
            cell_w,
            cell_h,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn fits_in(self, bounds: Size) -> bool {
        self.w <= bounds.w && self.h <= bounds.h
    }
}
