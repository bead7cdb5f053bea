//! Canvas 2D backend
//!
//! Replays draw commands onto a `CanvasRenderingContext2d`. Commands are in
//! CSS pixels; the context carries a `dpr` scale set by [`CanvasPainter::reset_transform`].

use anyhow::{Context, Result, anyhow};
use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::commands::{DrawCommand, GradientStop, Paint, Rgba};

fn js(e: JsValue) -> anyhow::Error {
    anyhow!("{e:?}")
}

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    /// Acquire the 2D context of `canvas`
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js)
            .context("getContext(\"2d\") threw")?
            .ok_or_else(|| anyhow!("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("2d context has unexpected type"))?;
        Ok(Self { ctx })
    }

    /// Drop any accumulated transform and scale to device pixels
    pub fn reset_transform(&self, dpr: f32) -> Result<()> {
        self.ctx
            .set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .map_err(js)?;
        self.ctx.scale(dpr as f64, dpr as f64).map_err(js)
    }

    /// Draw a full frame
    pub fn paint(&self, commands: &[DrawCommand]) -> Result<()> {
        for command in commands {
            self.draw(command)?;
        }
        Ok(())
    }

    fn draw(&self, command: &DrawCommand) -> Result<()> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::FillRect { rect, paint } => {
                self.set_fill(paint)?;
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCommand::StrokeRect { rect, color, width } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(*width as f64);
                ctx.stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                paint,
            } => {
                self.set_fill(paint)?;
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    *radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .map_err(js)?;
                ctx.fill();
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                ctx.set_stroke_style_str(&color.css());
                ctx.set_line_width(*width as f64);
                ctx.set_line_cap("round");
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Grid {
                size,
                step,
                color,
                width,
            } => self.grid(*size, *step, *color, *width),
            DrawCommand::Text {
                text,
                pos,
                font,
                align,
                color,
            } => {
                ctx.set_font(&font.css());
                ctx.set_text_align(align.as_str());
                ctx.set_fill_style_str(&color.css());
                ctx.fill_text(text, pos.x as f64, pos.y as f64).map_err(js)?;
            }
            DrawCommand::Save => ctx.save(),
            DrawCommand::Translate(offset) => {
                ctx.translate(offset.x as f64, offset.y as f64).map_err(js)?
            }
            DrawCommand::Rotate(angle) => ctx.rotate(*angle as f64).map_err(js)?,
            DrawCommand::Restore => ctx.restore(),
        }
        Ok(())
    }

    fn grid(&self, size: Vec2, step: f32, color: Rgba, width: f32) {
        if step <= 0.0 {
            return;
        }
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(&color.css());
        ctx.set_line_width(width as f64);
        ctx.begin_path();
        let mut x = 0.0;
        while x <= size.x {
            ctx.move_to(x as f64, 0.0);
            ctx.line_to(x as f64, size.y as f64);
            x += step;
        }
        let mut y = 0.0;
        while y <= size.y {
            ctx.move_to(0.0, y as f64);
            ctx.line_to(size.x as f64, y as f64);
            y += step;
        }
        ctx.stroke();
    }

    fn set_fill(&self, paint: &Paint) -> Result<()> {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.css()),
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                add_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                let gradient = self
                    .ctx
                    .create_radial_gradient(
                        center.x as f64,
                        center.y as f64,
                        *inner_radius as f64,
                        center.x as f64,
                        center.y as f64,
                        *outer_radius as f64,
                    )
                    .map_err(js)?;
                add_stops(&gradient, stops)?;
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
        }
        Ok(())
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[GradientStop]) -> Result<()> {
    for stop in stops {
        gradient
            .add_color_stop(stop.offset, &stop.color.css())
            .map_err(js)?;
    }
    Ok(())
}
