//! Recording surface for headless runs and tests

use glam::Vec2;

use super::{Fill, Font, Surface};
use crate::color::Rgba;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear,
    Save,
    Restore,
    Alpha(f32),
    Transform { origin: Vec2, angle: f32 },
    Circle { center: Vec2, radius: f32, fill: Fill },
    CircleOutline { center: Vec2, radius: f32, color: Rgba, line_width: f32 },
    Ellipse { center: Vec2, radii: Vec2, color: Rgba },
    Rect { min: Vec2, size: Vec2, color: Rgba },
    Line { from: Vec2, to: Vec2, color: Rgba, line_width: f32 },
    Text { text: String, at: Vec2, font: Font, color: Rgba },
}

/// Surface that records every call since the last `clear`
#[derive(Debug, Clone)]
pub struct DrawList {
    size: Vec2,
    pub cmds: Vec<DrawCmd>,
    /// Number of `clear` calls so far
    pub clears: u32,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            cmds: Vec::new(),
            clears: 0,
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Save/restore pairs are balanced
    pub fn is_balanced(&self) -> bool {
        let mut depth = 0i32;
        for cmd in &self.cmds {
            match cmd {
                DrawCmd::Save => depth += 1,
                DrawCmd::Restore => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }
}

impl Surface for DrawList {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self) {
        self.cmds.clear();
        self.cmds.push(DrawCmd::Clear);
        self.clears += 1;
    }

    fn save(&mut self) {
        self.cmds.push(DrawCmd::Save);
    }

    fn restore(&mut self) {
        self.cmds.push(DrawCmd::Restore);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.cmds.push(DrawCmd::Alpha(alpha));
    }

    fn transform(&mut self, origin: Vec2, angle: f32) {
        self.cmds.push(DrawCmd::Transform { origin, angle });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        self.cmds.push(DrawCmd::Circle {
            center,
            radius,
            fill: fill.clone(),
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32) {
        self.cmds.push(DrawCmd::CircleOutline {
            center,
            radius,
            color,
            line_width,
        });
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) {
        self.cmds.push(DrawCmd::Ellipse { center, radii, color });
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.cmds.push(DrawCmd::Rect { min, size, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32) {
        self.cmds.push(DrawCmd::Line {
            from,
            to,
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: Font, color: Rgba) {
        self.cmds.push(DrawCmd::Text {
            text: text.to_string(),
            at,
            font,
            color,
        });
    }
}
