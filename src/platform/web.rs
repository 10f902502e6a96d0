//! Browser bindings: canvas 2D surface, requestAnimationFrame, DOM scoreboard

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement};

use super::{FrameScheduler, FrameToken, ScoreDisplay};
use crate::color::Rgba;
use crate::renderer::{Fill, Font, Surface};
use crate::sim::{CanvasView, ScoreBoard};

/// Shared slot for the frame callback, filled once the game exists
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `Surface` over a canvas 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Current on-page placement for click mapping
    pub fn view(&self) -> CanvasView {
        let rect = self.canvas.get_bounding_client_rect();
        CanvasView {
            left: rect.left() as f32,
            top: rect.top() as f32,
            display_width: rect.width() as f32,
            display_height: rect.height() as f32,
            width: self.canvas.width() as f32,
            height: self.canvas.height() as f32,
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx.clear_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn transform(&mut self, origin: Vec2, angle: f32) {
        let _ = self.ctx.translate(origin.x as f64, origin.y as f64);
        let _ = self.ctx.rotate(angle as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        match fill {
            Fill::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Fill::Radial(g) => {
                let gradient = match self.ctx.create_radial_gradient(
                    g.inner_center.x as f64,
                    g.inner_center.y as f64,
                    g.inner_radius as f64,
                    g.outer_center.x as f64,
                    g.outer_center.y as f64,
                    g.outer_radius as f64,
                ) {
                    Ok(gradient) => gradient,
                    Err(e) => {
                        log::warn!("Gradient creation failed: {:?}", e);
                        return;
                    }
                };
                for stop in &g.stops {
                    let _ = gradient.add_color_stop(stop.offset, &stop.color.to_css());
                }
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, line_width: f32) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) {
        self.ctx.begin_path();
        let _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            radii.x as f64,
            radii.y as f64,
            0.0,
            0.0,
            TAU,
        );
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, line_width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, at: Vec2, font: Font, color: Rgba) {
        self.ctx.set_font(&font.to_css());
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.set_fill_style_str(&color.to_css());
        let _ = self.ctx.fill_text(text, at.x as f64, at.y as f64);
    }
}

/// requestAnimationFrame-backed scheduler
pub struct RafScheduler {
    window: web_sys::Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: web_sys::Window, callback: FrameCallback) -> Self {
        Self { window, callback }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameToken> {
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::error!("Frame requested before the callback was installed");
            return None;
        };
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameToken(id as u32)),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let _ = self.window.cancel_animation_frame(token.0 as i32);
    }
}

/// Score, popped and missed readouts plus the start button
pub struct DomScoreboard {
    score: Element,
    popped: Element,
    missed: Element,
    start_btn: HtmlButtonElement,
}

impl DomScoreboard {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing #{}", id)))
        };
        Ok(Self {
            score: by_id("score")?,
            popped: by_id("popped")?,
            missed: by_id("missed")?,
            start_btn: by_id("startBtn")?.dyn_into::<HtmlButtonElement>()?,
        })
    }
}

impl ScoreDisplay for DomScoreboard {
    fn refresh(&mut self, scores: &ScoreBoard) {
        self.score.set_text_content(Some(&scores.score.to_string()));
        self.popped.set_text_content(Some(&scores.popped.to_string()));
        self.missed.set_text_content(Some(&scores.missed.to_string()));
    }

    fn set_running(&mut self, running: bool) {
        self.start_btn.set_disabled(running);
        self.start_btn.set_text_content(Some(if running {
            "Game Running..."
        } else {
            "Start Game"
        }));
    }
}
