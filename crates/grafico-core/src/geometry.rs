// File: crates/grafico-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math.

/// A plotted point in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned box, origin at the top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &BBox) -> BBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        BBox::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }

    /// Translation that moves this box inside `0..width` x `0..height`, keeping
    /// a 1px margin from any edge it overflowed. Top/left win when the box is
    /// larger than the bounds.
    pub fn clamp_offset(&self, width: f64, height: f64) -> (f64, f64) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.bottom() > height {
            dy = -(self.bottom() - height) - 1.0;
        }
        if self.y + dy < 0.0 {
            dy = 1.0 - self.y;
        }
        if self.right() > width {
            dx = -(self.right() - width) - 1.0;
        }
        if self.x + dx < 0.0 {
            dx = 1.0 - self.x;
        }
        (dx, dy)
    }
}
