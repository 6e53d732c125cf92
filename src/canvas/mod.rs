//! Canvas Surface
//!
//! Fixed-resolution raster that holds the ink. No vector form of the strokes
//! is kept; the pixels are the whole record of the drawing.

pub mod input;

pub use input::{device_events, PointerAdapter, PointerEvent, PointerKind};

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;

use crate::config::CanvasSettings;

/// Background fill
pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Ink color
pub const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A position in surface-local logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: Point) -> f32 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }
}

/// Drawing surface
#[derive(Debug, Clone)]
pub struct Surface {
    image: RgbaImage,
    stroke_width: f32,
    /// Last point of the active stroke; `None` when no stroke is active
    last_point: Option<Point>,
    has_ink: bool,
    revision: u64,
}

impl Surface {
    /// Create a blank surface
    pub fn new(width: u32, height: u32, stroke_width: f32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width.max(1), height.max(1), BACKGROUND),
            stroke_width: stroke_width.max(1.0),
            last_point: None,
            has_ink: false,
            revision: 0,
        }
    }

    pub fn from_settings(settings: &CanvasSettings) -> Self {
        Self::new(settings.width, settings.height, settings.stroke_width)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Logical size as `[width, height]`
    pub fn size(&self) -> [usize; 2] {
        [self.image.width() as usize, self.image.height() as usize]
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Bumped on every pixel change
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether anything has been drawn since the last clear
    pub fn has_ink(&self) -> bool {
        self.has_ink
    }

    #[cfg(test)]
    pub fn is_stroke_active(&self) -> bool {
        self.last_point.is_some()
    }

    /// Begin a new path at `point`
    ///
    /// The in-flight guard lives in the session reducer; the surface itself
    /// always accepts.
    pub fn start_stroke(&mut self, point: Point) {
        self.last_point = Some(self.clamp(point));
    }

    /// Draw a segment from the last point to `point`
    pub fn extend_stroke(&mut self, point: Point) {
        let Some(from) = self.last_point else {
            return;
        };
        let to = self.clamp(point);
        self.draw_segment(from, to);
        self.last_point = Some(to);
    }

    /// Close the current path, if any
    pub fn end_stroke(&mut self) {
        self.last_point = None;
    }

    /// Repaint everything with the background
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = BACKGROUND;
        }
        self.last_point = None;
        self.has_ink = false;
        self.revision += 1;
    }

    /// True when every pixel is background
    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| *p == BACKGROUND)
    }

    fn clamp(&self, point: Point) -> Point {
        let max_x = (self.image.width() - 1) as f32;
        let max_y = (self.image.height() - 1) as f32;
        Point::new(point.x.clamp(0.0, max_x), point.y.clamp(0.0, max_y))
    }

    /// Stamp discs along the segment; consecutive discs overlap, giving round
    /// caps and joins.
    fn draw_segment(&mut self, from: Point, to: Point) {
        // A disc of radius r covers 2r + 1 pixels
        let radius = ((self.stroke_width - 1.0) / 2.0).round().max(0.0) as i32;
        let steps = from.distance(to).ceil().max(1.0) as u32;

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = from.x + (to.x - from.x) * t;
            let y = from.y + (to.y - from.y) * t;
            draw_filled_circle_mut(
                &mut self.image,
                (x.round() as i32, y.round() as i32),
                radius,
                INK,
            );
        }

        self.has_ink = true;
        self.revision += 1;
    }
}
