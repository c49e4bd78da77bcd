//! `embedded-graphics` support.
//!
//! The controller is a [`DrawTarget`] in [`Rgb565`]. Pixels go straight to
//! the panel; solid fills keep the single-window fast path.
use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565},
    prelude::*,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::driver::St7735;
use crate::error::DrawError;
use crate::geometry::{self, Rect};
use crate::interface::Transport;

impl From<Rgb565> for Color {
    fn from(c: Rgb565) -> Self {
        Color::from_raw(c.into_storage())
    }
}

impl From<Color> for Rgb565 {
    fn from(c: Color) -> Self {
        Rgb565::from(RawU16::new(c.raw()))
    }
}

fn to_rect(area: &Rectangle) -> Option<Rect> {
    let w = i16::try_from(area.size.width).ok()?;
    let h = i16::try_from(area.size.height).ok()?;
    let x = i16::try_from(area.top_left.x).ok()?;
    let y = i16::try_from(area.top_left.y).ok()?;
    Some(Rect::new(x, y, w, h))
}

impl<T: Transport> DrawTarget for St7735<T> {
    type Color = Rgb565;
    type Error = DrawError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            let (Ok(x), Ok(y)) = (i16::try_from(p.x), i16::try_from(p.y)) else {
                continue;
            };
            self.draw_pixel(geometry::Point::new(x, y), color.into())?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        match to_rect(&clipped) {
            Some(rect) => self.fill_rect(rect, color.into()),
            None => Ok(()),
        }
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_screen(color.into())
    }
}

impl<T: Transport> OriginDimensions for St7735<T> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.width()), u32::from(self.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Config, Rotation};
    use crate::testing::{Event, RecordingTransport};
    use embedded_graphics::primitives::{Circle, PrimitiveStyle};

    fn ready() -> St7735<RecordingTransport> {
        let mut d = St7735::new(RecordingTransport::new(), Config::default());
        d.init().unwrap();
        d.transport_mut().clear();
        d
    }

    #[test]
    fn colors_convert_both_ways() {
        assert_eq!(Color::from(Rgb565::RED), Color::RED);
        assert_eq!(Color::from(Rgb565::WHITE), Color::WHITE);
        assert_eq!(Rgb565::from(Color::BLUE), Rgb565::BLUE);
    }

    #[test]
    fn size_follows_rotation() {
        let mut d = St7735::new(
            RecordingTransport::new(),
            Config::default().rotation(Rotation::Rotate90),
        );
        d.init().unwrap();
        assert_eq!(d.size(), Size::new(160, 128));
    }

    #[test]
    fn fill_solid_is_one_stream() {
        let mut d = ready();
        d.fill_solid(
            &Rectangle::new(Point::new(-2, 3), Size::new(6, 2)),
            Rgb565::GREEN,
        )
        .unwrap();
        let ev = d.release().events;
        let repeats: std::vec::Vec<_> = ev
            .iter()
            .filter(|e| matches!(e, Event::Repeat(..)))
            .collect();
        assert_eq!(repeats, [&Event::Repeat(Color::GREEN.to_be_bytes(), 4 * 2)]);
    }

    #[test]
    fn fill_solid_off_panel_sends_nothing() {
        let mut d = ready();
        d.fill_solid(
            &Rectangle::new(Point::new(200, 0), Size::new(5, 5)),
            Rgb565::GREEN,
        )
        .unwrap();
        assert_eq!(d.transport_mut().writes(), 0);
    }

    #[test]
    fn styled_primitives_draw() {
        let mut d = ready();
        Circle::new(Point::new(10, 10), 5)
            .into_styled(PrimitiveStyle::with_stroke(Rgb565::YELLOW, 1))
            .draw(&mut d)
            .unwrap();
        let painted = d.release().painted();
        assert!(!painted.is_empty());
        assert!(painted.iter().all(|p| p.2 == Color::YELLOW.raw()));
    }

    #[test]
    fn draw_before_init_fails() {
        let mut d = St7735::new(RecordingTransport::new(), Config::default());
        assert_eq!(d.clear(Rgb565::BLACK), Err(DrawError::NotInitialized));
    }
}
