//! Legend, stats box and color-scale drawing.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_markup_width_px, to_unicode, truncate_to_width};
use super::types::{AXIS_LABELS, COLOR_SCALE_STEPS};
use super::util::{dash_lengths, dash_path, format_tick, ndc_to_px, tick_decimals};
use crate::canvas::{Canvas, Legend, LegendGlyph};
use crate::error::Result;
use crate::style::{AxisStyle, StyleProfile};
use crate::viz_plotters_adapter::{draw_marker, render_err, rgb_color, text_style};
use crate::viz_style::{Palette, Rgb8, SeriesStyle};

/// Title and text style of the color-scale axis.
pub struct ScaleAxis<'a> {
    pub title: &'a str,
    pub style: &'a AxisStyle,
}

/// Draw a legend box placed in normalised canvas coordinates.
///
/// Rows share the box height evenly; the glyph column takes a quarter of the
/// width. A border is drawn only when the style's legend border size is non-zero.
pub fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    canvas: &Canvas,
    legend: &Legend,
) -> Result<()> {
    let profile = canvas.profile();
    let cfg = profile.config();
    let size = root.dim_in_pixel();
    let (x1, y1) = ndc_to_px(size, legend.x1.min(legend.x2), legend.y1.max(legend.y2));
    let (x2, y2) = ndc_to_px(size, legend.x1.max(legend.x2), legend.y1.min(legend.y2));

    root.draw(&Rectangle::new([(x1, y1), (x2, y2)], rgb_color(cfg.legend.fill).filled()))
        .map_err(render_err)?;
    if cfg.legend.border_size > 0 {
        root.draw(&Rectangle::new(
            [(x1, y1), (x2, y2)],
            BLACK.stroke_width(cfg.legend.border_size),
        ))
        .map_err(render_err)?;
    }

    let n = legend.entries.len().max(1) as i32;
    let row_h = (y2 - y1) / n;
    let glyph_w = (x2 - x1) / 4;
    let font_px = ((row_h as f64) * 0.7)
        .min(cfg.text.size * size.1 as f64)
        .max(6.0);
    let label_style = text_style(cfg.legend.font, font_px, Rgb8::BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let text_x = x1 + glyph_w + glyph_w / 8;
    let max_text_w = (x2 - text_x - 2).max(10) as u32;

    for (i, entry) in legend.entries.iter().enumerate() {
        let Some(obj) = canvas.get(entry.target) else {
            continue;
        };
        let style = obj.styled().series_style();
        let cy = y1 + row_h * i as i32 + row_h / 2;
        let gx0 = x1 + glyph_w / 6;
        let gx1 = x1 + glyph_w - glyph_w / 6;

        match entry.glyph {
            LegendGlyph::Line => line_sample(root, gx0, gx1, cy, style, &cfg.dash_pattern)?,
            LegendGlyph::Point => draw_marker(root, ((gx0 + gx1) / 2, cy), style)?,
            LegendGlyph::PointLine => {
                line_sample(root, gx0, gx1, cy, style, &cfg.dash_pattern)?;
                draw_marker(root, ((gx0 + gx1) / 2, cy), style)?;
            }
            LegendGlyph::Fill => {
                let half = (row_h / 4).max(2);
                let fill = style.fill_color.unwrap_or(style.line_color);
                root.draw(&Rectangle::new(
                    [(gx0, cy - half), (gx1, cy + half)],
                    rgb_color(fill).filled(),
                ))
                .map_err(render_err)?;
            }
        }

        let px = font_px.round() as u32;
        let label = if estimate_markup_width_px(&entry.label, px) > max_text_w {
            truncate_to_width(&to_unicode(&entry.label), px, max_text_w)
        } else {
            entry.label.clone()
        };
        root.draw(&Text::new(label, (text_x, cy), label_style.clone()))
            .map_err(render_err)?;
    }
    Ok(())
}

/// Short horizontal stroke in the series' line style.
fn line_sample<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    start_x: i32,
    end_x: i32,
    y: i32,
    style: &SeriesStyle,
    pattern: &[u32],
) -> Result<()> {
    stroke(
        area,
        &[(start_x, y), (end_x, y)],
        style.line_color,
        style.line_width,
        &dash_lengths(style.line_dash, pattern, style.line_width),
    )
}

/// Draw a pixel polyline, splitting it into dashes when `dashes` is non-empty.
pub fn stroke<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[(i32, i32)],
    color: Rgb8,
    width: u32,
    dashes: &[u32],
) -> Result<()> {
    let shape = rgb_color(color).stroke_width(width);
    for seg in dash_path(points, dashes) {
        area.draw(&PathElement::new(seg, shape)).map_err(render_err)?;
    }
    Ok(())
}

/// Boxed lines of text in the top-right corner of the pad (stats or fit box).
pub fn draw_info_box<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    profile: &StyleProfile,
    top_right: (f64, f64),
    lines: &[String],
) -> Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let cfg = profile.config();
    let size = root.dim_in_pixel();
    let font_px = (0.03 * size.1 as f64).max(8.0);
    let line_h = (font_px * 1.3).round() as i32;
    let pad = (font_px * 0.4).round() as i32;
    let text_w = lines
        .iter()
        .map(|l| estimate_markup_width_px(l, font_px.round() as u32))
        .max()
        .unwrap_or(0) as i32;

    let (x2, y1) = ndc_to_px(size, top_right.0, top_right.1);
    let x1 = x2 - text_w - 2 * pad;
    let y2 = y1 + line_h * lines.len() as i32 + 2 * pad;
    root.draw(&Rectangle::new([(x1, y1), (x2, y2)], rgb_color(cfg.stat_fill).filled()))
        .map_err(render_err)?;
    root.draw(&Rectangle::new([(x1, y1), (x2, y2)], BLACK.stroke_width(1)))
        .map_err(render_err)?;

    let style =
        text_style(cfg.text.font, font_px, Rgb8::BLACK).pos(Pos::new(HPos::Left, VPos::Center));
    for (i, line) in lines.iter().enumerate() {
        let cy = y1 + pad + line_h * i as i32 + line_h / 2;
        root.draw(&Text::new(line.as_str(), (x1 + pad, cy), style.clone()))
            .map_err(render_err)?;
    }
    Ok(())
}

/// Vertical color scale for a 2-D histogram, with labels and an optional title.
///
/// `bar` is the pixel rectangle `(x0, y_top, x1, y_bottom)` of the scale.
pub fn draw_color_scale<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    bar: (i32, i32, i32, i32),
    z_max: f64,
    palette: Palette,
    axis: ScaleAxis<'_>,
) -> Result<()> {
    let (x0, top, x1, bottom) = bar;
    let h = (bottom - top).max(1) as f64;
    for i in 0..COLOR_SCALE_STEPS {
        let t0 = i as f64 / COLOR_SCALE_STEPS as f64;
        let t1 = (i + 1) as f64 / COLOR_SCALE_STEPS as f64;
        let ya = bottom - (t0 * h).round() as i32;
        let yb = bottom - (t1 * h).round() as i32;
        let c = palette.color_at((t0 + t1) / 2.0);
        root.draw(&Rectangle::new([(x0, yb), (x1, ya)], rgb_color(c).filled()))
            .map_err(render_err)?;
    }
    root.draw(&Rectangle::new([(x0, top), (x1, bottom)], BLACK.stroke_width(1)))
        .map_err(render_err)?;

    let height_px = root.dim_in_pixel().1 as f64;
    let z_hi = if z_max > 0.0 { z_max } else { 1.0 };
    let ticks = scale_ticks(z_hi, AXIS_LABELS);
    let decimals = tick_decimals(0.0, z_hi, AXIS_LABELS);
    let label_px = axis.style.label_size * height_px;
    let tick_len = (axis.style.tick_length * height_px).round() as i32;
    let gap = (axis.style.label_offset * height_px).round() as i32;
    let label_style = text_style(axis.style.label_font, label_px, Rgb8::BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    let mut widest = 0;
    for v in ticks {
        let y = bottom - (v / z_hi * h).round() as i32;
        root.draw(&PathElement::new(
            vec![(x1 - tick_len, y), (x1, y)],
            BLACK.stroke_width(1),
        ))
        .map_err(render_err)?;
        let s = format_tick(v, decimals);
        widest = widest.max(estimate_markup_width_px(&s, label_px.round() as u32) as i32);
        root.draw(&Text::new(s, (x1 + gap, y), label_style.clone()))
            .map_err(render_err)?;
    }

    if !axis.title.is_empty() {
        let title_px = axis.style.title_size * height_px;
        let w = root.dim_in_pixel().0 as i32;
        let tx = (x1 + gap + widest + (axis.style.title_offset * title_px).round() as i32)
            .min(w - title_px.round() as i32);
        let style = text_style(axis.style.title_font, title_px, axis.style.title_color)
            .pos(Pos::new(HPos::Right, VPos::Top))
            .transform(FontTransform::Rotate270);
        root.draw(&Text::new(axis.title.to_string(), (tx, top), style))
            .map_err(render_err)?;
    }
    Ok(())
}

/// Round tick values in `[0, hi]`.
fn scale_ticks(hi: f64, n: usize) -> Vec<f64> {
    let raw = hi / n.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * mag)
        .find(|s| *s >= raw)
        .unwrap_or(raw);
    (0..)
        .map(|i| i as f64 * step)
        .take_while(|v| *v <= hi * (1.0 + 1e-9))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_ticks_are_round() {
        assert_eq!(scale_ticks(10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let t = scale_ticks(37.0, 6);
        assert_eq!(t.last().copied(), Some(30.0));
        assert_eq!(t[1], 10.0);
    }
}
