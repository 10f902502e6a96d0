//! 2D rendering module
//!
//! The simulation draws through the write-only `Surface` trait. The browser
//! implements it over a canvas 2D context; `DrawList` records commands for
//! headless runs and tests.

pub mod draw_list;
pub mod shapes;

pub use draw_list::{DrawCmd, DrawList};
pub use shapes::{draw_balloon, draw_particle};

use glam::Vec2;

use crate::color::{Rgb, Rgba};

/// A color stop at `offset` in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgb,
}

/// Two-circle radial gradient, as in the canvas API
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(inner_center: Vec2, inner_radius: f32, outer_center: Vec2, outer_radius: f32) -> Self {
        Self {
            inner_center,
            inner_radius,
            outer_center,
            outer_radius,
            stops: Vec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Rgb) -> Self {
        self.stops.push(ColorStop { offset, color });
        self
    }
}

/// Fill paint for closed shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    Radial(RadialGradient),
}

impl From<Rgb> for Fill {
    fn from(rgb: Rgb) -> Self {
        Fill::Solid(rgb.into())
    }
}

impl From<Rgba> for Fill {
    fn from(rgba: Rgba) -> Self {
        Fill::Solid(rgba)
    }
}

/// Text style; text is always centered on its anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
}

impl Font {
    /// CSS font shorthand
    pub fn to_css(self) -> String {
        if self.bold {
            format!("bold {}px Arial", self.size)
        } else {
            format!("{}px Arial", self.size)
        }
    }
}

/// Write-only 2D drawing sink
pub trait Surface {
    /// Native pixel size
    fn size(&self) -> Vec2;
    fn clear(&mut self);

    /// Push/pop alpha and transform state
    fn save(&mut self);
    fn restore(&mut self);
    fn set_alpha(&mut self, alpha: f32);
    /// Move the origin to `origin` and rotate by `angle` radians
    fn transform(&mut self, origin: Vec2, angle: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32);
    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba);
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32);
    fn fill_text(&mut self, text: &str, at: Vec2, font: Font, color: Rgba);
}
