//! Canvas2D renderer for the form canvas.
//!
//! Draws placed fields as design-time chrome approximating the eventual
//! control: boxes, labels, option rows. Fields render in collection
//! order; overlays (selection handles, drop tint, drag ghost) go on top.

use fb_core::model::{FieldKind, FormField};
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub grid: &'static str,
    pub field_bg: &'static str,
    pub field_border: &'static str,
    pub label: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub drop_tint: &'static str,
    pub ghost_bg: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#FFFFFF",
            grid: "rgba(0, 0, 0, 0.05)",
            field_bg: "#F9FAFB",
            field_border: "#D1D5DB",
            label: "#111827",
            muted: "#9CA3AF",
            accent: "#2563EB",
            drop_tint: "rgba(37, 99, 235, 0.08)",
            ghost_bg: "rgba(37, 99, 235, 0.15)",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            grid: "rgba(255, 255, 255, 0.04)",
            field_bg: "#2C2C2E",
            field_border: "#48484A",
            label: "#F2F2F7",
            muted: "#8E8E93",
            accent: "#4FC3F7",
            drop_tint: "rgba(79, 195, 247, 0.08)",
            ghost_bg: "rgba(79, 195, 247, 0.15)",
        }
    }
}

/// Floating preview that follows the pointer during a drag.
pub struct DragGhost {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub label: String,
    /// True for palette drags — also tints the canvas as a drop zone.
    pub placing_new: bool,
}

/// Render the whole canvas: background, grid, fields, overlays.
pub fn render_form(
    ctx: &CanvasRenderingContext2d,
    fields: &[FormField],
    selected: Option<&str>,
    ghost: Option<&DragGhost>,
    theme: &CanvasTheme,
    canvas_width: f64,
    canvas_height: f64,
) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    draw_grid(ctx, canvas_width, canvas_height, theme);

    if ghost.is_some_and(|g| g.placing_new) {
        ctx.set_fill_style_str(theme.drop_tint);
        ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);
    }

    for field in fields {
        draw_field(ctx, field, theme);
    }

    if let Some(sel) = selected
        && let Some(field) = fields.iter().find(|f| f.id.as_str() == sel)
    {
        draw_selection(ctx, field, theme);
    }

    if let Some(ghost) = ghost {
        draw_ghost(ctx, ghost, theme);
    }
}

fn draw_grid(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &CanvasTheme) {
    const PITCH: f64 = 20.0;
    ctx.set_fill_style_str(theme.grid);
    let mut y = PITCH;
    while y < height {
        let mut x = PITCH;
        while x < width {
            ctx.fill_rect(x - 1.0, y - 1.0, 2.0, 2.0);
            x += PITCH;
        }
        y += PITCH;
    }
}

fn draw_field(ctx: &CanvasRenderingContext2d, field: &FormField, theme: &CanvasTheme) {
    let (x, y, w, h) = (
        field.x as f64,
        field.y as f64,
        field.width as f64,
        field.height as f64,
    );

    match field.kind {
        FieldKind::TextField => {
            draw_box(ctx, x, y, w, h, theme);
            let hint = field.placeholder.as_deref().unwrap_or(&field.label);
            draw_text(ctx, hint, x + 8.0, y + h / 2.0 + 4.0, theme.muted);
        }
        FieldKind::Checkbox => {
            draw_box(ctx, x + 4.0, y + h / 2.0 - 7.0, 14.0, 14.0, theme);
            draw_text(ctx, &field.label, x + 26.0, y + h / 2.0 + 4.0, theme.label);
        }
        FieldKind::CheckboxGroup | FieldKind::Radio => {
            draw_box(ctx, x, y, w, h, theme);
            draw_text(ctx, &field.label, x + 8.0, y + 16.0, theme.label);
            for row in 0..2 {
                let ry = y + 30.0 + row as f64 * 20.0;
                if ry + 12.0 > y + h {
                    break;
                }
                if field.kind == FieldKind::Radio {
                    ctx.begin_path();
                    let _ = ctx.arc(x + 14.0, ry + 6.0, 6.0, 0.0, std::f64::consts::TAU);
                    ctx.set_stroke_style_str(theme.field_border);
                    ctx.stroke();
                } else {
                    draw_box(ctx, x + 8.0, ry, 12.0, 12.0, theme);
                }
                let option = field
                    .options
                    .get(row)
                    .map(String::as_str)
                    .unwrap_or("Option");
                draw_text(ctx, option, x + 28.0, ry + 10.0, theme.muted);
            }
        }
        FieldKind::Select => {
            draw_box(ctx, x, y, w, h, theme);
            draw_text(ctx, &field.label, x + 8.0, y + h / 2.0 + 4.0, theme.muted);
            // Caret
            ctx.begin_path();
            ctx.move_to(x + w - 18.0, y + h / 2.0 - 3.0);
            ctx.line_to(x + w - 10.0, y + h / 2.0 - 3.0);
            ctx.line_to(x + w - 14.0, y + h / 2.0 + 4.0);
            ctx.close_path();
            ctx.set_fill_style_str(theme.muted);
            ctx.fill();
        }
        FieldKind::TagList => {
            draw_box(ctx, x, y, w, h, theme);
            for i in 0..3 {
                let px = x + 8.0 + i as f64 * 52.0;
                if px + 44.0 > x + w {
                    break;
                }
                ctx.set_fill_style_str(theme.grid);
                ctx.fill_rect(px, y + 8.0, 44.0, 18.0);
            }
            draw_text(ctx, &field.label, x + 8.0, y + h - 8.0, theme.muted);
        }
        FieldKind::Button => {
            ctx.set_fill_style_str(theme.accent);
            ctx.fill_rect(x, y, w, h);
            ctx.set_fill_style_str("#FFFFFF");
            ctx.set_text_align("center");
            let _ = ctx.fill_text(&field.label, x + w / 2.0, y + h / 2.0 + 4.0);
            ctx.set_text_align("left");
        }
        FieldKind::TextView => {
            draw_text(ctx, &field.label, x, y + 16.0, theme.label);
        }
        FieldKind::ImageView => {
            draw_box(ctx, x, y, w, h, theme);
            ctx.set_stroke_style_str(theme.field_border);
            ctx.begin_path();
            ctx.move_to(x, y);
            ctx.line_to(x + w, y + h);
            ctx.move_to(x + w, y);
            ctx.line_to(x, y + h);
            ctx.stroke();
        }
        FieldKind::Table => {
            draw_box(ctx, x, y, w, h, theme);
            ctx.set_stroke_style_str(theme.field_border);
            ctx.begin_path();
            for i in 1..3 {
                let gy = y + h * i as f64 / 3.0;
                ctx.move_to(x, gy);
                ctx.line_to(x + w, gy);
                let gx = x + w * i as f64 / 3.0;
                ctx.move_to(gx, y);
                ctx.line_to(gx, y + h);
            }
            ctx.stroke();
        }
        FieldKind::HtmlView => {
            draw_box(ctx, x, y, w, h, theme);
            draw_text(ctx, "</>", x + 8.0, y + 20.0, theme.muted);
            draw_text(ctx, &field.label, x + 8.0, y + h - 8.0, theme.muted);
        }
        FieldKind::Spacer => {
            ctx.set_stroke_style_str(theme.field_border);
            let dash = js_sys::Array::of2(&4.0.into(), &4.0.into());
            let _ = ctx.set_line_dash(&dash);
            ctx.begin_path();
            ctx.move_to(x, y + h / 2.0);
            ctx.line_to(x + w, y + h / 2.0);
            ctx.stroke();
            let _ = ctx.set_line_dash(&js_sys::Array::new());
        }
        FieldKind::Group | FieldKind::DynamicList | FieldKind::IFrame => {
            ctx.set_stroke_style_str(theme.field_border);
            let dash = js_sys::Array::of2(&6.0.into(), &4.0.into());
            let _ = ctx.set_line_dash(&dash);
            ctx.stroke_rect(x, y, w, h);
            let _ = ctx.set_line_dash(&js_sys::Array::new());
            draw_text(ctx, &field.label, x + 8.0, y + 16.0, theme.muted);
        }
    }
}

fn draw_box(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    theme: &CanvasTheme,
) {
    ctx.set_fill_style_str(theme.field_bg);
    ctx.fill_rect(x, y, w, h);
    ctx.set_stroke_style_str(theme.field_border);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x, y, w, h);
}

fn draw_text(ctx: &CanvasRenderingContext2d, text: &str, x: f64, y: f64, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.set_font("13px system-ui, sans-serif");
    let _ = ctx.fill_text(text, x, y);
}

fn draw_selection(ctx: &CanvasRenderingContext2d, field: &FormField, theme: &CanvasTheme) {
    let (x, y, w, h) = (
        field.x as f64 - 2.0,
        field.y as f64 - 2.0,
        field.width as f64 + 4.0,
        field.height as f64 + 4.0,
    );
    ctx.set_stroke_style_str(theme.accent);
    ctx.set_line_width(2.0);
    ctx.stroke_rect(x, y, w, h);

    // Corner handles
    const HANDLE: f64 = 6.0;
    ctx.set_fill_style_str(theme.accent);
    for (hx, hy) in [(x, y), (x + w, y), (x, y + h), (x + w, y + h)] {
        ctx.fill_rect(hx - HANDLE / 2.0, hy - HANDLE / 2.0, HANDLE, HANDLE);
    }
}

fn draw_ghost(ctx: &CanvasRenderingContext2d, ghost: &DragGhost, theme: &CanvasTheme) {
    ctx.set_fill_style_str(theme.ghost_bg);
    ctx.fill_rect(ghost.x, ghost.y, ghost.width, ghost.height);
    ctx.set_stroke_style_str(theme.accent);
    ctx.set_line_width(1.0);
    let dash = js_sys::Array::of2(&4.0.into(), &3.0.into());
    let _ = ctx.set_line_dash(&dash);
    ctx.stroke_rect(ghost.x, ghost.y, ghost.width, ghost.height);
    let _ = ctx.set_line_dash(&js_sys::Array::new());
    draw_text(
        ctx,
        &ghost.label,
        ghost.x + 6.0,
        ghost.y + 16.0,
        theme.accent,
    );
}
