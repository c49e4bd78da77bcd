//! Panel coordinates

/// A pixel position. Values outside the panel are clipped, not rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column
    pub x: i16,
    /// Row
    pub y: i16,
}

impl Point {
    /// Create a point
    pub const fn new(x: i16, y: i16) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// A width or height of zero or less draws nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left column
    pub x: i16,
    /// Top row
    pub y: i16,
    /// Width in pixels
    pub width: i16,
    /// Height in pixels
    pub height: i16,
}

impl Rect {
    /// Create a rectangle
    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing both corners (inclusive).
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
        let (y0, y1) = (a.y.min(b.y), a.y.max(b.y));
        Rect::new(
            x0,
            y0,
            x1.saturating_sub(x0).saturating_add(1),
            y1.saturating_sub(y0).saturating_add(1),
        )
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Intersect with `[0, width) x [0, height)`.
    ///
    /// Returns inclusive `(x0, y0, x1, y1)` bounds, or `None` when nothing
    /// of the rectangle is on the panel.
    pub fn clip(&self, width: u16, height: u16) -> Option<Window> {
        if self.is_empty() {
            return None;
        }
        let x0 = i32::from(self.x).max(0);
        let y0 = i32::from(self.y).max(0);
        let x1 = (i32::from(self.x) + i32::from(self.width)).min(i32::from(width));
        let y1 = (i32::from(self.y) + i32::from(self.height)).min(i32::from(height));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Window {
            x0: x0 as u16,
            y0: y0 as u16,
            x1: (x1 - 1) as u16,
            y1: (y1 - 1) as u16,
        })
    }
}

/// Inclusive on-panel pixel bounds, always non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// First column
    pub x0: u16,
    /// First row
    pub y0: u16,
    /// Last column
    pub x1: u16,
    /// Last row
    pub y1: u16,
}

impl Window {
    /// Columns covered
    pub fn width(&self) -> u32 {
        u32::from(self.x1 - self.x0) + 1
    }

    /// Rows covered
    pub fn height(&self) -> u32 {
        u32::from(self.y1 - self.y0) + 1
    }

    /// Pixels covered
    pub fn area(&self) -> u32 {
        self.width() * self.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_inside_is_unchanged() {
        let w = Rect::new(10, 20, 5, 6).clip(128, 160).unwrap();
        assert_eq!(w, Window { x0: 10, y0: 20, x1: 14, y1: 25 });
        assert_eq!(w.area(), 30);
    }

    #[test]
    fn clip_truncates_negative_origin() {
        let w = Rect::new(-5, -5, 10, 10).clip(128, 160).unwrap();
        assert_eq!(w, Window { x0: 0, y0: 0, x1: 4, y1: 4 });
    }

    #[test]
    fn clip_truncates_far_edge() {
        let w = Rect::new(120, 150, 50, 50).clip(128, 160).unwrap();
        assert_eq!(w, Window { x0: 120, y0: 150, x1: 127, y1: 159 });
    }

    #[test]
    fn clip_outside_or_degenerate_is_none() {
        assert_eq!(Rect::new(128, 0, 4, 4).clip(128, 160), None);
        assert_eq!(Rect::new(-10, 0, 10, 4).clip(128, 160), None);
        assert_eq!(Rect::new(0, 0, 0, 4).clip(128, 160), None);
        assert_eq!(Rect::new(0, 0, 4, -1).clip(128, 160), None);
    }

    #[test]
    fn corners_in_any_order() {
        let r = Rect::from_corners(Point::new(9, 2), Point::new(3, 7));
        assert_eq!(r, Rect::new(3, 2, 7, 6));
    }
}
