use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::fs;

const WHITE: [u8; 3] = [255, 255, 255];

/// Below this edge length the label would rasterize into unreadable noise,
/// so the stroked glyph is used even when a font is available.
const MIN_TEXT_SIZE: u32 = 8;

/// Common TrueType locations checked for a label font. The list is a best
/// effort; a miss on every path selects the stroked fallback glyph.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

/// Parameters for a single icon. Corner radius, stroke width and font scale
/// are derived from the edge length so every generated size looks consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParams {
    pub size: u32,
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
    pub label: String,
}

impl RenderParams {
    pub fn new(size: u32, primary: [u8; 3], secondary: [u8; 3]) -> Self {
        Self {
            size,
            primary,
            secondary,
            label: "CD".to_string(),
        }
    }

    pub fn corner_radius(&self) -> f32 {
        (self.size as f32 * 0.15).round()
    }

    pub fn stroke_width(&self) -> u32 {
        (self.size / 16).max(1)
    }

    pub fn font_scale(&self) -> f32 {
        self.size as f32 * 0.35
    }
}

/// Try to load a font for the icon label from well-known system locations.
/// Resolved once at startup; `None` means every icon takes the stroked
/// fallback glyph path instead of text layout.
pub fn load_label_font() -> Option<Font<'static>> {
    for path in FONT_CANDIDATES {
        if let Ok(data) = fs::read(path) {
            if let Some(font) = Font::try_from_vec(data) {
                return Some(font);
            }
        }
    }
    None
}

/// Render a single icon: rounded-rectangle background in the primary color,
/// a left-to-right gradient overlay in the secondary color, and a centered
/// white label on top.
///
/// Pure function of its inputs; identical parameters always produce a
/// pixel-identical canvas.
pub fn render(params: &RenderParams, font: Option<&Font>) -> RgbaImage {
    let mut canvas = RgbaImage::new(params.size, params.size);

    fill_rounded_rect(&mut canvas, params.primary, params.corner_radius());
    apply_gradient_overlay(&mut canvas, params.secondary);

    let mut labeled = false;
    if params.size >= MIN_TEXT_SIZE {
        if let Some(font) = font {
            labeled = draw_label(&mut canvas, font, &params.label, params.font_scale());
        }
    }
    if !labeled {
        draw_fallback_glyph(&mut canvas, params.stroke_width());
    }

    canvas
}

/// Fill a rounded rectangle spanning the whole canvas with an anti-aliased
/// corner edge. Pixels outside the shape stay fully transparent.
fn fill_rounded_rect(canvas: &mut RgbaImage, color: [u8; 3], radius: f32) {
    let size = canvas.width();
    for y in 0..size {
        for x in 0..size {
            let coverage = rounded_rect_coverage(x, y, size, radius);
            if coverage > 0.0 {
                let alpha = (coverage * 255.0).round() as u8;
                canvas.put_pixel(x, y, Rgba([color[0], color[1], color[2], alpha]));
            }
        }
    }
}

/// Coverage of a pixel by the full-canvas rounded rectangle, sampled at the
/// pixel center. Straight edges are fully covered; the corner arcs get a
/// one-pixel anti-aliasing band inside the radius, with everything at or
/// beyond the radius fully transparent.
fn rounded_rect_coverage(x: u32, y: u32, size: u32, radius: f32) -> f32 {
    let s = size as f32;
    let fx = x as f32 + 0.5;
    let fy = y as f32 + 0.5;

    // Positive only inside the horizontal/vertical corner bands.
    let dx = (radius - fx).max(fx - (s - radius));
    let dy = (radius - fy).max(fy - (s - radius));
    if dx <= 0.0 || dy <= 0.0 {
        return 1.0;
    }

    let dist = (dx * dx + dy * dy).sqrt();
    (radius - dist).clamp(0.0, 1.0)
}

/// Composite a left-to-right alpha ramp of the secondary color over the
/// background: column `i` gets overlay alpha `round(128 * i / size)`. The
/// overlay is clipped to the background coverage so the rounded corners stay
/// transparent.
fn apply_gradient_overlay(canvas: &mut RgbaImage, color: [u8; 3]) {
    let size = canvas.width();
    for x in 0..size {
        let alpha = (128.0 * x as f32 / size as f32).round() as u8;
        if alpha == 0 {
            continue;
        }
        for y in 0..size {
            let bg_alpha = canvas.get_pixel(x, y)[3];
            let clipped = (alpha as u32 * bg_alpha as u32 / 255) as u8;
            blend_pixel(canvas, x, y, color, clipped);
        }
    }
}

/// Standard "over" compositing of a straight-alpha color onto one pixel.
fn blend_pixel(canvas: &mut RgbaImage, x: u32, y: u32, rgb: [u8; 3], alpha: u8) {
    if alpha == 0 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x, y);
    let a = alpha as f32 / 255.0;
    for c in 0..3 {
        let blended = rgb[c] as f32 * a + pixel[c] as f32 * (1.0 - a);
        pixel[c] = blended.round() as u8;
    }
    let out_a = a + pixel[3] as f32 / 255.0 * (1.0 - a);
    pixel[3] = (out_a * 255.0).round() as u8;
}

/// Lay out the label with rusttype, center its pixel bounding box on the
/// canvas and rasterize it in white. Returns false when nothing was drawn
/// (e.g. the label has no visible glyphs at this scale), in which case the
/// caller falls back to the stroked glyph.
fn draw_label(canvas: &mut RgbaImage, font: &Font, label: &str, px: f32) -> bool {
    let size = canvas.width() as i32;
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(label, scale, point(0.0, v_metrics.ascent))
        .collect();

    let mut min_x = i32::MAX;
    let mut min_y = i32::MAX;
    let mut max_x = i32::MIN;
    let mut max_y = i32::MIN;
    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            min_x = min_x.min(bb.min.x);
            min_y = min_y.min(bb.min.y);
            max_x = max_x.max(bb.max.x);
            max_y = max_y.max(bb.max.y);
        }
    }
    if min_x > max_x {
        return false;
    }

    let offset_x = (size - (max_x - min_x)) / 2 - min_x;
    let offset_y = (size - (max_y - min_y)) / 2 - min_y;

    for glyph in &glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let x = bb.min.x + gx as i32 + offset_x;
                let y = bb.min.y + gy as i32 + offset_y;
                if x >= 0 && x < size && y >= 0 && y < size && v > 0.0 {
                    blend_pixel(
                        canvas,
                        x as u32,
                        y as u32,
                        WHITE,
                        (v * 255.0).round() as u8,
                    );
                }
            });
        }
    }

    true
}

/// Approximate the "CD" label with primitive strokes: an open arc for the
/// "C" in the left-center region, a vertical bar plus a right half-arc for
/// the "D" in the right-center region. Best-effort stand-in for real text,
/// not a pixel match for it.
fn draw_fallback_glyph(canvas: &mut RgbaImage, stroke: u32) {
    let s = canvas.width() as f32;

    // "C": open arc, gap facing right. Angles follow the screen convention
    // (0 at three o'clock, increasing clockwise with y pointing down).
    let c_edge = s / 4.0;
    draw_arc(canvas, s / 4.0, s / 3.0, c_edge, c_edge, 30.0, 330.0, stroke);

    // "D": vertical bar with a half-arc closing its right side.
    let d_x = s / 2.0;
    let d_y = s / 3.0;
    let d_h = s / 3.0;
    draw_line(canvas, d_x, d_y, d_x, d_y + d_h, stroke);
    draw_arc(canvas, d_x, d_y, s / 4.0, d_h, 270.0, 90.0, stroke);
}

/// Stroke an elliptical arc inscribed in the box at (x, y) with the given
/// width and height, from `start_deg` to `end_deg` (wrapping past 360 when
/// the end angle is not greater than the start).
#[allow(clippy::too_many_arguments)]
fn draw_arc(
    canvas: &mut RgbaImage,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    start_deg: f32,
    end_deg: f32,
    stroke: u32,
) {
    let cx = x + w / 2.0;
    let cy = y + h / 2.0;
    let rx = w / 2.0;
    let ry = h / 2.0;

    let end = if end_deg <= start_deg {
        end_deg + 360.0
    } else {
        end_deg
    };
    let span = end - start_deg;

    // Roughly one stamp per arc-length pixel.
    let steps = (span.to_radians() * rx.max(ry)).ceil().max(8.0) as u32;
    for i in 0..=steps {
        let t = (start_deg + span * i as f32 / steps as f32).to_radians();
        stamp(canvas, cx + rx * t.cos(), cy + ry * t.sin(), stroke);
    }
}

fn draw_line(canvas: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, stroke: u32) {
    let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    let steps = length.ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        stamp(canvas, x0 + (x1 - x0) * t, y0 + (y1 - y0) * t, stroke);
    }
}

/// Stamp an opaque white disc of the stroke diameter centered at (px, py).
/// The nearest pixel is always painted so a one-pixel stroke never leaves
/// gaps between samples.
fn stamp(canvas: &mut RgbaImage, px: f32, py: f32, stroke: u32) {
    let size = canvas.width() as i32;
    let radius = (stroke as f32 / 2.0).max(0.5);
    let reach = radius.ceil() as i32 + 1;

    let center_x = (px - 0.5).round() as i32;
    let center_y = (py - 0.5).round() as i32;
    if center_x >= 0 && center_x < size && center_y >= 0 && center_y < size {
        blend_pixel(canvas, center_x as u32, center_y as u32, WHITE, 255);
    }

    for y in (center_y - reach)..=(center_y + reach) {
        for x in (center_x - reach)..=(center_x + reach) {
            if x < 0 || x >= size || y < 0 || y >= size {
                continue;
            }
            let dx = x as f32 + 0.5 - px;
            let dy = y as f32 + 0.5 - py;
            if (dx * dx + dy * dy).sqrt() <= radius {
                blend_pixel(canvas, x as u32, y as u32, WHITE, 255);
            }
        }
    }
}
