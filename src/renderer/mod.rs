//! Draw surface boundary
//!
//! Objects draw through [`Canvas`]; the crate ships no GPU backend. The
//! headless [`DrawList`] records what a frame would have drawn.

use glam::Vec2;

/// Packed 0xRRGGBBAA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xFF00_00FF);
    pub const BLUE: Color = Color(0x0000_FFFF);
}

/// Anything objects can draw onto
pub trait Canvas {
    fn circle(&mut self, center: Vec2, radius: f32, color: Color);
}

/// One recorded circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Canvas that records draw calls instead of rasterising them
#[derive(Debug, Default)]
pub struct DrawList {
    circles: Vec<Circle>,
}

impl DrawList {
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }

    /// Number of circles drawn in `color`
    pub fn count_color(&self, color: Color) -> usize {
        self.circles.iter().filter(|c| c.color == color).count()
    }

    /// Drop everything recorded (start of a new frame)
    pub fn clear(&mut self) {
        self.circles.clear();
    }
}

impl Canvas for DrawList {
    fn circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circles.push(Circle {
            center,
            radius,
            color,
        });
    }
}
