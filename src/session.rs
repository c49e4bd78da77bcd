//! Interactive drawing session on top of the driver.
//!
//! A [`Session`] borrows the controller exclusively, so every draw goes
//! through one owner. Cursor, brush and undo log live here rather than in
//! the driver; the driver keeps no record of what it has drawn.
use heapless::Vec;
use log::debug;

use crate::color::Color;
use crate::driver::St7735;
use crate::error::DrawError;
use crate::geometry::{Point, Rect};
use crate::interface::Transport;

/// Colors cycled by [`Session::next_color`].
pub const PALETTE: [Color; 8] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::CYAN,
    Color::MAGENTA,
    Color::WHITE,
    Color::BLACK,
];

/// Largest brush size; sizes cycle `1..=MAX_BRUSH`.
pub const MAX_BRUSH: u8 = 3;

/// Row-major RGB565 pixels to place with [`Tool::Image`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Image<'a> {
    /// Width in pixels
    pub width: i16,
    /// Height in pixels
    pub height: i16,
    /// `width * height` pixels
    pub pixels: &'a [Color],
}

/// Drawing tools. One stroke dispatches on the tool exactly once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tool<'a> {
    /// Straight line from press to release
    Line,
    /// Rectangle spanned by press and release
    Rectangle {
        /// Fill instead of outline
        filled: bool,
    },
    /// Circle centered on the press point, through the release point
    Circle {
        /// Fill instead of outline
        filled: bool,
    },
    /// Freehand; each drag segment is drawn immediately
    Pencil,
    /// Freehand in the background color
    Eraser,
    /// Place an image with its top-left at the release point
    Image(Image<'a>),
}

impl Tool<'_> {
    fn is_freehand(&self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser)
    }
}

/// One undoable operation: a brush stamp (`tool` is `None`) or a tool
/// stroke, with the color and brush it was drawn with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mark<'a> {
    /// Tool that drew the mark, `None` for a stamp
    pub tool: Option<Tool<'a>>,
    /// Press point, or the stamp position
    pub start: Point,
    /// Release point
    pub end: Point,
    /// Resolved color; the background for eraser strokes
    pub color: Color,
    /// Brush size at the time
    pub brush: u8,
}

/// Drawing state for one user, holding the display for its lifetime.
///
/// `N` bounds the undo log. When it is full the oldest mark is dropped.
pub struct Session<'d, 'a, T, const N: usize> {
    display: &'d mut St7735<T>,
    tool: Tool<'a>,
    cursor: Point,
    color: Color,
    background: Color,
    palette_index: usize,
    brush: u8,
    show_cursor: bool,
    stroke: Option<(Point, Point)>,
    marks: Vec<Mark<'a>, N>,
}

impl<'d, 'a, T: Transport, const N: usize> Session<'d, 'a, T, N> {
    /// Start a session with the cursor in the middle of the panel.
    pub fn new(display: &'d mut St7735<T>) -> Self {
        let cursor = Point::new((display.width() / 2) as i16, (display.height() / 2) as i16);
        Session {
            display,
            tool: Tool::Pencil,
            cursor,
            color: Color::WHITE,
            background: Color::BLACK,
            palette_index: PALETTE.len() - 2,
            brush: 1,
            show_cursor: true,
            stroke: None,
            marks: Vec::new(),
        }
    }

    /// The display this session draws on
    pub fn display(&mut self) -> &mut St7735<T> {
        self.display
    }

    /// Cursor position
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Brush color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Set the brush color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Background color used by clear, undo and the eraser
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Brush size, `1..=MAX_BRUSH`
    pub fn brush(&self) -> u8 {
        self.brush
    }

    /// Select the stroke tool
    pub fn set_tool(&mut self, tool: Tool<'a>) {
        self.tool = tool;
        self.stroke = None;
    }

    /// Undo log, oldest first
    pub fn marks(&self) -> &[Mark<'a>] {
        &self.marks
    }

    /// Step to the next palette color.
    pub fn next_color(&mut self) -> Color {
        self.palette_index = (self.palette_index + 1) % PALETTE.len();
        self.color = PALETTE[self.palette_index];
        debug!("color {}/{}", self.palette_index + 1, PALETTE.len());
        self.color
    }

    /// Step to the next brush size, wrapping back to 1.
    pub fn next_brush(&mut self) -> u8 {
        self.brush = self.brush % MAX_BRUSH + 1;
        debug!("brush size {}", self.brush);
        self.brush
    }

    /// Move the cursor, clamped to the panel.
    pub fn move_cursor(&mut self, dx: i16, dy: i16) -> Result<(), DrawError> {
        let max_x = self.display.width() as i16 - 1;
        let max_y = self.display.height() as i16 - 1;
        let next = Point::new(
            self.cursor.x.saturating_add(dx).clamp(0, max_x),
            self.cursor.y.saturating_add(dy).clamp(0, max_y),
        );
        if next == self.cursor {
            return Ok(());
        }
        if self.show_cursor {
            self.display.draw_pixel(self.cursor, self.background)?;
        }
        self.cursor = next;
        if self.show_cursor {
            self.display.draw_pixel(self.cursor, Color::WHITE)?;
        }
        Ok(())
    }

    /// Show or hide the cursor marker.
    pub fn toggle_cursor(&mut self) -> Result<(), DrawError> {
        self.show_cursor = !self.show_cursor;
        let marker = if self.show_cursor {
            Color::WHITE
        } else {
            self.background
        };
        self.display.draw_pixel(self.cursor, marker)
    }

    fn log(&mut self, mark: Mark<'a>) {
        if self.marks.is_full() {
            self.marks.remove(0);
        }
        // cannot fail: a slot was just freed
        let _ = self.marks.push(mark);
    }

    fn mark(&self, tool: Option<Tool<'a>>, start: Point, end: Point) -> Mark<'a> {
        let color = match tool {
            Some(Tool::Eraser) => self.background,
            _ => self.color,
        };
        Mark {
            tool,
            start,
            end,
            color,
            brush: self.brush,
        }
    }

    /// Stamp the brush at the cursor and log it for undo.
    pub fn stamp(&mut self) -> Result<(), DrawError> {
        let mark = self.mark(None, self.cursor, self.cursor);
        self.render(mark)?;
        self.log(mark);
        Ok(())
    }

    /// Clear the panel and replay every logged mark except the last.
    pub fn undo(&mut self) -> Result<(), DrawError> {
        if self.marks.pop().is_none() {
            return Ok(());
        }
        debug!("undo, replaying {} marks", self.marks.len());
        self.display.clear_screen(self.background)?;
        for i in 0..self.marks.len() {
            let mark = self.marks[i];
            self.render(mark)?;
        }
        Ok(())
    }

    /// Clear the panel and forget the log.
    pub fn clear(&mut self) -> Result<(), DrawError> {
        self.marks.clear();
        self.display.clear_screen(self.background)
    }

    /// Draw one character at the cursor and advance it, wrapping at the
    /// right and bottom edges.
    pub fn type_char(&mut self, c: char) -> Result<(), DrawError> {
        let font = self.display.font().ok_or(DrawError::NoFont)?;
        let mut buf = [0u8; 4];
        self.display
            .draw_text(self.cursor, c.encode_utf8(&mut buf), self.color)?;

        let width = self.display.width() as i16;
        let height = self.display.height() as i16;
        self.cursor.x = self.cursor.x.saturating_add(i16::from(font.width));
        if self.cursor.x >= width {
            self.cursor.x = 0;
            self.cursor.y = self.cursor.y.saturating_add(i16::from(font.height));
            if self.cursor.y >= height {
                self.cursor.y = 0;
            }
        }
        Ok(())
    }

    /// Button pressed at `p`.
    pub fn press(&mut self, p: Point) -> Result<(), DrawError> {
        self.stroke = Some((p, p));
        if self.tool.is_freehand() {
            self.apply(p, p)?;
        }
        Ok(())
    }

    /// Pointer moved to `p` while pressed. Freehand tools draw and log the
    /// segment right away; shape tools wait for release.
    pub fn drag(&mut self, p: Point) -> Result<(), DrawError> {
        let Some((start, _)) = self.stroke else {
            return Ok(());
        };
        if self.tool.is_freehand() {
            self.apply(start, p)?;
            self.stroke = Some((p, p));
        } else {
            self.stroke = Some((start, p));
        }
        Ok(())
    }

    /// Button released at `p`; completes the stroke.
    pub fn release(&mut self, p: Point) -> Result<(), DrawError> {
        let Some((start, _)) = self.stroke.take() else {
            return Ok(());
        };
        if self.tool.is_freehand() && p == start {
            // already drawn by press or the last drag
            return Ok(());
        }
        self.apply(start, p)
    }

    fn apply(&mut self, start: Point, end: Point) -> Result<(), DrawError> {
        let mark = self.mark(Some(self.tool), start, end);
        self.render(mark)?;
        self.log(mark);
        Ok(())
    }

    fn render(&mut self, mark: Mark<'a>) -> Result<(), DrawError> {
        let Mark {
            tool,
            start,
            end,
            color,
            brush,
        } = mark;
        let Some(tool) = tool else {
            return if brush == 1 {
                self.display.draw_pixel(start, color)
            } else {
                self.display.fill_circle(start, i16::from(brush - 1), color)
            };
        };
        match tool {
            Tool::Line | Tool::Pencil | Tool::Eraser => self.thick_line(start, end, color, brush),
            Tool::Rectangle { filled: true } => {
                self.display.fill_rect(Rect::from_corners(start, end), color)
            }
            Tool::Rectangle { filled: false } => {
                let outer = Rect::from_corners(start, end);
                for i in 0..i16::from(brush) {
                    let inset = Rect::new(
                        outer.x.saturating_add(i),
                        outer.y.saturating_add(i),
                        outer.width.saturating_sub(2 * i),
                        outer.height.saturating_sub(2 * i),
                    );
                    self.display.draw_rect(inset, color)?;
                }
                Ok(())
            }
            Tool::Circle { filled } => {
                let dx = i64::from(end.x) - i64::from(start.x);
                let dy = i64::from(end.y) - i64::from(start.y);
                let r = isqrt((dx * dx + dy * dy) as u64).min(i16::MAX as u64) as i16;
                if filled {
                    self.display.fill_circle(start, r, color)
                } else {
                    for i in 0..i16::from(brush).min(r.saturating_add(1)) {
                        self.display.draw_circle(start, r - i, color)?;
                    }
                    Ok(())
                }
            }
            Tool::Image(img) => self
                .display
                .draw_image(end, img.width, img.height, img.pixels),
        }
    }

    /// Line `brush` pixels thick, drawn as offset copies down and right.
    fn thick_line(&mut self, a: Point, b: Point, color: Color, brush: u8) -> Result<(), DrawError> {
        let n = i16::from(brush);
        for ox in 0..n {
            for oy in 0..n {
                self.display.draw_line(
                    Point::new(a.x.saturating_add(ox), a.y.saturating_add(oy)),
                    Point::new(b.x.saturating_add(ox), b.y.saturating_add(oy)),
                    color,
                )?;
            }
        }
        Ok(())
    }
}

/// Integer square root, rounded down.
fn isqrt(v: u64) -> u64 {
    if v == 0 {
        return 0;
    }
    let mut x = v;
    let mut y = x / 2 + x % 2;
    while y < x {
        x = y;
        y = (x + v / x) / 2;
    }
    x
}
