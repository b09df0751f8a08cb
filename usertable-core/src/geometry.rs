//! Screen-space geometry in terminal cells.

/// A pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Squared distance between the centers of this rect and the cell under `point`.
    ///
    /// Computed in doubled coordinates so half-cell centers stay integral.
    pub fn center_distance_sq(&self, point: Point) -> u64 {
        let cx = 2 * i64::from(self.x) + i64::from(self.width);
        let cy = 2 * i64::from(self.y) + i64::from(self.height);
        let px = 2 * i64::from(point.x) + 1;
        let py = 2 * i64::from(point.y) + 1;
        let dx = cx.abs_diff(px);
        let dy = cy.abs_diff(py);
        dx * dx + dy * dy
    }

    /// Split off the first `width` columns, returning `(left, rest)`.
    pub fn split_left(self, width: u16) -> (Rect, Rect) {
        let left = width.min(self.width);
        (
            Rect::new(self.x, self.y, left, self.height),
            Rect::new(self.x + left, self.y, self.width - left, self.height),
        )
    }
}
