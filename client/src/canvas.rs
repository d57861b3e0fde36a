use std::f64::consts::PI;

use player::visualizer::{Color, Point, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::NodeRef;

const FONT: &str = "10px monospace";

/// Draws onto the 2d context of a `<canvas>`.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn attach(canvas: &NodeRef) -> Result<Self, String> {
        let canvas = canvas
            .cast::<HtmlCanvasElement>()
            .ok_or_else(|| "canvas ref not attached".to_string())?;

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("failed to get a 2d context: {e:?}"))?
            .ok_or_else(|| "the canvas has no 2d context".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "not a 2d rendering context".to_string())?;

        Ok(Self { ctx })
    }

    fn path(&self, points: &[Point]) {
        self.ctx.begin_path();
        let mut points = points.iter();
        if let Some((x, y)) = points.next() {
            self.ctx.move_to(*x, *y);
        }
        for (x, y) in points {
            self.ctx.line_to(*x, *y);
        }
    }
}

fn check(res: Result<(), JsValue>, what: &str) {
    if let Err(e) = res {
        log::error!("Canvas {what} failed: {e:?}");
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x, y, width, height);
    }

    fn polyline(&mut self, points: &[Point], color: Color, line_width: f64) {
        self.path(points);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width);
        self.ctx.stroke();
    }

    fn polygon(&mut self, points: &[Point], color: Color) {
        self.path(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn circle(&mut self, (x, y): Point, radius: f64, color: Color) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        check(self.ctx.arc(x, y, radius.max(0.0), 0.0, PI * 2.0), "arc");
        self.ctx.fill();
    }

    fn rotated_square(&mut self, (x, y): Point, half_side: f64, angle: f64, color: Color) {
        self.ctx.save();
        check(self.ctx.translate(x, y), "translate");
        check(self.ctx.rotate(angle), "rotate");
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(-half_side, -half_side, half_side * 2.0, half_side * 2.0);
        self.ctx.restore();
    }

    fn text(&mut self, text: &str, (x, y): Point, color: Color) {
        self.ctx.set_font(FONT);
        self.ctx.set_fill_style_str(color);
        check(self.ctx.fill_text(text, x, y), "fill_text");
    }
}
