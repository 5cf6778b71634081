//! Canvas2D painter for the browser build

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlImageElement};

use super::{Scene, Sprite};
use crate::consts::{PLAYER_SHEET_CELL, PLAYER_SHEET_PATH, TILE};
use crate::sim::{CropKind, Facing, SpriteKind};

const GRASS: &str = "#dff0d5";
const GRID: &str = "#c7e0bd";
const STEM: &str = "#2f7d32";
const LABEL: &str = "#333";

/// Paints scenes onto `<canvas id="game">`.
///
/// When the canvas or its 2D context is missing the renderer stays alive
/// and every `render` call is skipped. The farmer is drawn as a plain
/// rectangle until the walk sheet has loaded.
pub struct CanvasRenderer {
    ctx: Option<CanvasRenderingContext2d>,
    sheet: Option<HtmlImageElement>,
}

impl CanvasRenderer {
    pub fn new(document: &Document, canvas_id: &str) -> Self {
        let ctx = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(|canvas| canvas.get_context("2d").ok().flatten())
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        if ctx.is_none() {
            log::error!("Canvas #{} not found or has no 2D context; rendering disabled", canvas_id);
        }
        let sheet = match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(PLAYER_SHEET_PATH);
                Some(img)
            }
            Err(e) => {
                log::warn!("Could not create walk sheet image: {:?}", e);
                None
            }
        };
        Self { ctx, sheet }
    }

    /// The walk sheet, once it has finished loading without error
    fn loaded_sheet(&self) -> Option<&HtmlImageElement> {
        self.sheet
            .as_ref()
            .filter(|img| img.complete() && img.natural_width() > 0)
    }

    pub fn render(&self, scene: &Scene) {
        let Some(ctx) = &self.ctx else {
            return;
        };
        let w = scene.field.x as f64;
        let h = scene.field.y as f64;

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.set_image_smoothing_enabled(false);

        // Field and grid
        ctx.set_fill_style_str(GRASS);
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_stroke_style_str(GRID);
        ctx.set_line_width(1.0);
        let tile = TILE as f64;
        let mut y = tile;
        while y < h {
            line(ctx, 0.0, y, w, y);
            y += tile;
        }
        let mut x = tile;
        while x < w {
            line(ctx, x, 0.0, x, h);
            x += tile;
        }

        for sprite in &scene.sprites {
            match sprite.kind {
                SpriteKind::Crop { kind, sway } => draw_crop(ctx, sprite, kind, sway),
                SpriteKind::Scarecrow => draw_scarecrow(ctx, sprite),
                SpriteKind::Crow => draw_crow(ctx, sprite),
                SpriteKind::Player { facing, .. } => match self.loaded_sheet() {
                    Some(sheet) => draw_player_sheet(ctx, sprite, sheet),
                    None => draw_player(ctx, sprite, facing),
                },
            }
        }

        ctx.set_fill_style_str(LABEL);
        ctx.set_font("16px system-ui, sans-serif");
        for (i, text) in scene.overlay.iter().enumerate() {
            let _ = ctx.fill_text(text, 20.0, 28.0 + 22.0 * i as f64);
        }
    }
}

fn line(ctx: &CanvasRenderingContext2d, x0: f64, y0: f64, x1: f64, y1: f64) {
    ctx.begin_path();
    ctx.move_to(x0, y0);
    ctx.line_to(x1, y1);
    ctx.stroke();
}

fn disc(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(x, y, r, 0.0, TAU);
    ctx.fill();
}

fn draw_crop(ctx: &CanvasRenderingContext2d, s: &Sprite, kind: CropKind, sway: f32) {
    let (x, y) = (s.pos.x as f64, s.pos.y as f64);
    let (w, h) = (s.size.x as f64, s.size.y as f64);
    let cx = x + w / 2.0;
    ctx.set_stroke_style_str(STEM);

    match kind {
        CropKind::Wheat => {
            ctx.set_line_width(3.0);
            ctx.begin_path();
            ctx.move_to(cx, y + h);
            ctx.quadratic_curve_to(cx + (sway as f64).sin() * 3.0, y + h / 2.0, cx, y);
            ctx.stroke();
            ctx.set_fill_style_str("#d9a441");
            ctx.begin_path();
            let _ = ctx.ellipse(cx, y, 8.0, 6.0, 0.0, 0.0, TAU);
            ctx.fill();
        }
        CropKind::Pumpkin => {
            ctx.set_line_width(2.0);
            line(ctx, cx, y + h, cx, y + h - 4.0);
            disc(ctx, cx, y + 2.0, 10.0, "#ff7518");
        }
        CropKind::GoldenApple => {
            ctx.set_line_width(2.0);
            line(ctx, cx, y + h, cx, y + h - 6.0);
            disc(ctx, cx, y + 3.0, 9.0, "#ffd700");
            disc(ctx, cx - 3.0, y, 4.0, "rgba(255,255,255,0.5)");
        }
    }
}

fn draw_scarecrow(ctx: &CanvasRenderingContext2d, s: &Sprite) {
    let (x, y) = (s.pos.x as f64, s.pos.y as f64);
    let (w, h) = (s.size.x as f64, s.size.y as f64);
    // Pole
    ctx.set_fill_style_str("#9b7653");
    ctx.fill_rect(x + w / 2.0 - 3.0, y, 6.0, h);
    // Head
    disc(ctx, x + w / 2.0, y + 10.0, 10.0, "#c28e0e");
    // Arms
    ctx.set_stroke_style_str("#6b4f2a");
    ctx.set_line_width(4.0);
    line(ctx, x, y + 18.0, x + w, y + 18.0);
}

fn draw_crow(ctx: &CanvasRenderingContext2d, s: &Sprite) {
    let (x, y) = (s.pos.x as f64, s.pos.y as f64);
    let (w, h) = (s.size.x as f64, s.size.y as f64);
    ctx.set_fill_style_str("#000");
    ctx.begin_path();
    ctx.move_to(x, y + h / 2.0);
    ctx.line_to(x + w / 2.0, y);
    ctx.line_to(x + w, y + h / 2.0);
    ctx.line_to(x + w / 2.0, y + h);
    ctx.close_path();
    ctx.fill();
    disc(ctx, x + w / 2.0 - 2.0, y + 4.0, 2.0, "#fff");
}

fn draw_player_sheet(ctx: &CanvasRenderingContext2d, s: &Sprite, sheet: &HtmlImageElement) {
    let Some(cell) = s.sheet_cell() else {
        return;
    };
    let cell_size = PLAYER_SHEET_CELL as f64;
    let _ = ctx.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
        sheet,
        cell.x as f64,
        cell.y as f64,
        cell_size,
        cell_size,
        s.pos.x as f64,
        s.pos.y as f64,
        s.size.x as f64,
        s.size.y as f64,
    );
}

/// Fallback while the sheet is loading or missing
fn draw_player(ctx: &CanvasRenderingContext2d, s: &Sprite, facing: Facing) {
    let (x, y) = (s.pos.x as f64, s.pos.y as f64);
    let (w, h) = (s.size.x as f64, s.size.y as f64);
    ctx.set_fill_style_str("#8b5a2b");
    ctx.fill_rect(x, y, w, h);

    // Hat brim marks the facing side
    ctx.set_fill_style_str("#e8c15a");
    match facing {
        Facing::Up => ctx.fill_rect(x, y, w, 6.0),
        Facing::Down => ctx.fill_rect(x, y + h - 6.0, w, 6.0),
        Facing::Left => ctx.fill_rect(x, y, 6.0, h),
        Facing::Right => ctx.fill_rect(x + w - 6.0, y, 6.0, h),
    }
}
