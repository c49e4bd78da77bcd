//! Integer rasterization of lines, circles, rectangles and text.
//!
//! Every algorithm here reduces a shape to calls on a [`PixelTarget`]:
//! single pixels, or solid rectangles where a run is known up front. No
//! floating point is used anywhere.
use core::mem::swap;

use crate::color::Color;
use crate::font::Font;
use crate::geometry::{Point, Rect};

/// Something pixels can be written to.
pub trait PixelTarget {
    /// Error returned by writes
    type Error;

    /// Write one pixel. Off-target coordinates are ignored, not errors.
    fn pixel(&mut self, p: Point, color: Color) -> Result<(), Self::Error>;

    /// Fill a rectangle. The default writes it pixel by pixel.
    fn fill(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error> {
        for y in rect.y..rect.y.saturating_add(rect.height.max(0)) {
            for x in rect.x..rect.x.saturating_add(rect.width.max(0)) {
                self.pixel(Point::new(x, y), color)?;
            }
        }
        Ok(())
    }
}

fn to_i16(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

fn plot<T: PixelTarget>(target: &mut T, x: i32, y: i32, color: Color) -> Result<(), T::Error> {
    match (i16::try_from(x), i16::try_from(y)) {
        (Ok(x), Ok(y)) => target.pixel(Point::new(x, y), color),
        // cannot be on any panel
        _ => Ok(()),
    }
}

fn vline<T: PixelTarget>(
    target: &mut T,
    x: i32,
    y0: i32,
    y1: i32,
    color: Color,
) -> Result<(), T::Error> {
    let (top, bottom) = (y0.min(y1), y0.max(y1));
    // split at row 0 so each run's height fits in i16
    if top < 0 {
        column(target, x, top, bottom.min(-1), color)?;
    }
    if bottom >= 0 {
        column(target, x, top.max(0), bottom, color)?;
    }
    Ok(())
}

fn column<T: PixelTarget>(
    target: &mut T,
    x: i32,
    top: i32,
    bottom: i32,
    color: Color,
) -> Result<(), T::Error> {
    target.fill(
        Rect::new(to_i16(x), to_i16(top), 1, to_i16(bottom - top + 1)),
        color,
    )
}

/// Bresenham line from `a` to `b`, both endpoints included.
///
/// Steps along the dominant axis, so the pixel set is the same whichever
/// endpoint comes first.
pub fn line<T: PixelTarget>(target: &mut T, a: Point, b: Point, color: Color) -> Result<(), T::Error> {
    let (mut x0, mut y0) = (i32::from(a.x), i32::from(a.y));
    let (mut x1, mut y1) = (i32::from(b.x), i32::from(b.y));

    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        swap(&mut x0, &mut y0);
        swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        swap(&mut x0, &mut x1);
        swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };
    let mut err = dx / 2;
    let mut y = y0;

    for x in x0..=x1 {
        if steep {
            plot(target, y, x, color)?;
        } else {
            plot(target, x, y, color)?;
        }
        err -= dy;
        if err < 0 {
            y += ystep;
            err += dx;
        }
    }
    Ok(())
}

/// Rectangle border as four lines: top, bottom, left, right.
pub fn rect_outline<T: PixelTarget>(target: &mut T, rect: Rect, color: Color) -> Result<(), T::Error> {
    if rect.is_empty() {
        return Ok(());
    }
    let left = rect.x;
    let top = rect.y;
    let right = to_i16(i32::from(rect.x) + i32::from(rect.width) - 1);
    let bottom = to_i16(i32::from(rect.y) + i32::from(rect.height) - 1);

    line(target, Point::new(left, top), Point::new(right, top), color)?;
    line(target, Point::new(left, bottom), Point::new(right, bottom), color)?;
    line(target, Point::new(left, top), Point::new(left, bottom), color)?;
    line(target, Point::new(right, top), Point::new(right, bottom), color)
}

/// Midpoint circle outline.
///
/// The four axis points are written first, then the eight-way symmetric
/// set for each step until `x >= y`. A radius of zero writes the center
/// four times; a negative radius writes nothing.
pub fn circle<T: PixelTarget>(
    target: &mut T,
    center: Point,
    radius: i16,
    color: Color,
) -> Result<(), T::Error> {
    if radius < 0 {
        return Ok(());
    }
    let (cx, cy) = (i32::from(center.x), i32::from(center.y));
    let r = i32::from(radius);

    plot(target, cx, cy + r, color)?;
    plot(target, cx, cy - r, color)?;
    plot(target, cx + r, cy, color)?;
    plot(target, cx - r, cy, color)?;

    let mut f = 1 - r;
    let mut dd_f_x = 1;
    let mut dd_f_y = -2 * r;
    let mut x = 0;
    let mut y = r;

    while x < y {
        if f >= 0 {
            y -= 1;
            dd_f_y += 2;
            f += dd_f_y;
        }
        x += 1;
        dd_f_x += 2;
        f += dd_f_x;

        plot(target, cx + x, cy + y, color)?;
        plot(target, cx - x, cy + y, color)?;
        plot(target, cx + x, cy - y, color)?;
        plot(target, cx - x, cy - y, color)?;
        plot(target, cx + y, cy + x, color)?;
        plot(target, cx - y, cy + x, color)?;
        plot(target, cx + y, cy - x, color)?;
        plot(target, cx - y, cy - x, color)?;
    }
    Ok(())
}

/// Filled disk built from vertical chords.
///
/// Walks the same steps as [`circle`] and writes one 1-pixel-wide column
/// between the symmetric y extents at each x, so the fill always covers
/// the outline drawn with the same radius.
pub fn fill_circle<T: PixelTarget>(
    target: &mut T,
    center: Point,
    radius: i16,
    color: Color,
) -> Result<(), T::Error> {
    if radius < 0 {
        return Ok(());
    }
    let (cx, cy) = (i32::from(center.x), i32::from(center.y));
    let r = i32::from(radius);

    vline(target, cx, cy - r, cy + r, color)?;

    let mut f = 1 - r;
    let mut dd_f_x = 1;
    let mut dd_f_y = -2 * r;
    let mut x = 0;
    let mut y = r;

    while x < y {
        if f >= 0 {
            y -= 1;
            dd_f_y += 2;
            f += dd_f_y;
        }
        x += 1;
        dd_f_x += 2;
        f += dd_f_x;

        vline(target, cx + x, cy - y, cy + y, color)?;
        vline(target, cx - x, cy - y, cy + y, color)?;
        vline(target, cx + y, cy - x, cy + x, color)?;
        vline(target, cx - y, cy - x, cy + x, color)?;
    }
    Ok(())
}

/// Blit `text` with `font`, left to right from `origin` (glyph top-left).
///
/// The pen advances by `font.width` for every character; characters with
/// no glyph advance the pen but write nothing. Returns the pen position
/// after the last character.
pub fn text<T: PixelTarget>(
    target: &mut T,
    font: &Font,
    origin: Point,
    text: &str,
    color: Color,
) -> Result<Point, T::Error> {
    let mut pen_x = i32::from(origin.x);
    let top = i32::from(origin.y);

    for c in text.chars() {
        if let Some(glyph) = font.glyph(c) {
            for gy in 0..font.height {
                for gx in 0..font.width {
                    if glyph.is_set(gx, gy) {
                        plot(target, pen_x + i32::from(gx), top + i32::from(gy), color)?;
                    }
                }
            }
        }
        pen_x += i32::from(font.width);
    }
    Ok(Point::new(to_i16(pen_x), origin.y))
}
