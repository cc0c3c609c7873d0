//! Rendering of canvases to **PDF** or **SVG** through plotters.
//!
//! - The first object drawn on a canvas owns the axis frame; later objects overlay it
//! - Axis labels are laid out by plotters; the frame, inward major and minor ticks (mirrored on
//!   the opposite edges when enabled) and axis titles are drawn here so they follow
//!   the style's offsets and lengths
//! - 2-D histograms are drawn as colored cells with a palette scale on the right
//! - Label markup (`#beta`, `^{}`, `_{}`) is rendered by each backend
//!
//! Output is rendered to memory first and written to disk in one step.

pub mod legend;
pub mod measured;
pub mod pdf;
pub mod text;
pub mod types;
pub mod util;

pub use measured::MeasuredText;
pub use pdf::PdfBackend;
pub use types::OutputFormat;

use std::path::Path;

use log::{debug, info};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::ranged1d::Ranged;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_svg::SVGBackend;

use crate::canvas::{Canvas, TextLabel};
use crate::error::Result;
use crate::models::{ErrorGraph, Function1D, Histogram1D, Histogram2D, PlotObject};
use crate::stats;
use crate::storage;
use crate::style::StyleConfig;
use crate::viz_plotters_adapter::{draw_marker, render_err, rgb_color, text_style};
use crate::viz_style::{HAlign, Rgb8, SeriesRole, VAlign};

use legend::{ScaleAxis, draw_color_scale, draw_info_box, draw_legend, stroke};
use text::estimate_text_width_px;
use types::{AXIS_LABELS, COLOR_SCALE_WIDTH};
use util::{
    dash_lengths, format_tick, frame_ranges, max_label_width_px, minor_ticks, ndc_to_px,
    tick_decimals,
};

/// Render `canvas` and write it to `path`; the extension selects the format.
///
/// Returns [`crate::Error::UnsupportedFormat`] for extensions other than `.pdf`
/// and `.svg`, and [`crate::Error::Io`] when the file cannot be written.
pub fn render_canvas<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    let bytes = render_to_bytes(canvas, format)?;
    storage::write_output(path, &bytes)?;
    info!(
        "saved canvas `{}` to {} ({} bytes)",
        canvas.name(),
        path.display(),
        bytes.len()
    );
    Ok(())
}

/// Render `canvas` into an in-memory document.
pub fn render_to_bytes(canvas: &Canvas, format: OutputFormat) -> Result<Vec<u8>> {
    let size = canvas.size();
    match format {
        OutputFormat::Pdf => {
            let mut buf = Vec::new();
            {
                let root = PdfBackend::new(&mut buf, size)
                    .with_title(canvas.name())
                    .into_drawing_area();
                draw_canvas(&root, canvas)?;
                root.present().map_err(render_err)?;
            }
            Ok(buf)
        }
        OutputFormat::Svg => {
            let mut svg = String::new();
            {
                let root = MeasuredText::new(SVGBackend::with_string(&mut svg, size))
                    .into_drawing_area();
                draw_canvas(&root, canvas)?;
                root.present().map_err(render_err)?;
            }
            Ok(svg.into_bytes())
        }
    }
}

/// Pixel placement of the axis frame and the data ranges it shows.
struct Frame {
    x: (f64, f64),
    y: (f64, f64),
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
}

impl Frame {
    /// Data coordinates to backend pixels, clamped to the frame.
    fn map(&self, x: f64, y: f64) -> (i32, i32) {
        let fx = ((x - self.x.0) / (self.x.1 - self.x.0)).clamp(0.0, 1.0);
        let fy = ((y - self.y.0) / (self.y.1 - self.y.0)).clamp(0.0, 1.0);
        (
            self.left + (fx * (self.right - self.left) as f64).round() as i32,
            self.bottom - (fy * (self.bottom - self.top) as f64).round() as i32,
        )
    }
}

/// Draw everything on `canvas` onto `root`. Generic over the backend.
pub fn draw_canvas<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, canvas: &Canvas) -> Result<()> {
    let cfg = canvas.profile().config();
    debug!(
        "drawing canvas `{}` ({}x{}) with {} object(s), style `{}`",
        canvas.name(),
        canvas.size().0,
        canvas.size().1,
        canvas.objects().len(),
        canvas.profile().name()
    );

    // ---- 1) Background and borders
    root.fill(&rgb_color(cfg.canvas_color)).map_err(render_err)?;
    if cfg.pad_color != cfg.canvas_color {
        root.fill(&rgb_color(cfg.pad_color)).map_err(render_err)?;
    }
    draw_border(root, cfg.canvas_border_mode, cfg.pad_border_size.max(1))?;
    draw_border(root, cfg.pad_border_mode, cfg.pad_border_size)?;

    // ---- 2) Frame, axes and plot objects
    if !canvas.objects().is_empty() {
        draw_plot(root, canvas)?;
    }

    // ---- 3) Overlays: legend, stats/fit box, title, free text
    if let Some(legend) = canvas.legend() {
        draw_legend(root, canvas, legend)?;
    }
    let info = info_lines(canvas);
    if !info.is_empty() {
        let m = canvas.margins();
        draw_info_box(root, canvas.profile(), (1.0 - m.right, 1.0 - m.top), &info)?;
    }
    if cfg.show_title {
        if let Some(first) = canvas.objects().first() {
            draw_title(root, cfg, first.name())?;
        }
    }
    for label in canvas.labels() {
        draw_label(root, label)?;
    }
    Ok(())
}

fn draw_border<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, mode: i8, size: u32) -> Result<()> {
    if mode == 0 || size == 0 {
        return Ok(());
    }
    let shade = if mode > 0 { Rgb8::new(208, 208, 208) } else { Rgb8::new(128, 128, 128) };
    let (w, h) = root.dim_in_pixel();
    let inset = (size / 2) as i32;
    root.draw(&Rectangle::new(
        [(inset, inset), (w as i32 - 1 - inset, h as i32 - 1 - inset)],
        rgb_color(shade).stroke_width(size),
    ))
    .map_err(render_err)
}

fn draw_plot<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, canvas: &Canvas) -> Result<()> {
    let cfg = canvas.profile().config();
    let objects = canvas.objects();
    let Some(first) = objects.first() else {
        return Ok(());
    };
    let (w, h) = root.dim_in_pixel();
    let (wf, hf) = (w as f64, h as f64);
    let m = canvas.margins();
    let ((x0, x1), (y0, y1)) = frame_ranges(objects);
    let axes = first.styled().axes();
    let (xs, ys) = (&axes.x.style, &axes.y.style);

    let x_label_px = xs.label_size * hf;
    let y_label_px = ys.label_size * hf;
    let xdec = tick_decimals(x0, x1, AXIS_LABELS);
    let ydec = tick_decimals(y0, y1, AXIS_LABELS);
    let x_label_fmt = |v: &f64| format_tick(*v, xdec);
    let y_label_fmt = |v: &f64| format_tick(*v, ydec);
    let frac = |f: f64, total: f64| (f * total).round() as u32;

    let mut chart = ChartBuilder::on(root)
        .margin_top(frac(m.top, hf))
        .margin_right(frac(m.right, wf))
        .x_label_area_size(frac(m.bottom, hf))
        .y_label_area_size(frac(m.left, wf))
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;

    // Plotters places the tick labels; its own axis lines stay invisible.
    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(TRANSPARENT.stroke_width(1))
        .set_all_tick_mark_size(frac(xs.label_offset, hf))
        .x_labels(AXIS_LABELS)
        .y_labels(AXIS_LABELS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .x_label_style(text_style(xs.label_font, x_label_px, Rgb8::BLACK))
        .y_label_style(text_style(ys.label_font, y_label_px, Rgb8::BLACK))
        .draw()
        .map_err(render_err)?;

    let (xr, yr) = chart.plotting_area().get_pixel_range();
    let frame = Frame {
        x: (x0, x1),
        y: (y0, y1),
        left: xr.start,
        right: xr.end - 1,
        top: yr.start,
        bottom: yr.end - 1,
    };

    // ---- Plot objects, in drawing order
    for obj in objects {
        match obj {
            PlotObject::Function(f) => draw_function(root, &frame, f, cfg)?,
            PlotObject::Histogram(hist) => draw_histogram(root, &frame, hist, cfg)?,
            PlotObject::Graph(g) => draw_graph(root, &frame, g, cfg)?,
            PlotObject::Histogram2D(h2) => draw_histogram_2d(root, &frame, h2, cfg)?,
        }
    }

    // ---- Frame box and inward ticks
    let frame_width = if cfg.frame_border_mode != 0 { 2 } else { 1 };
    root.draw(&Rectangle::new(
        [(frame.left, frame.top), (frame.right, frame.bottom)],
        BLACK.stroke_width(frame_width),
    ))
    .map_err(render_err)?;

    let x_keys = RangedCoordf64::from(x0..x1).key_points(AXIS_LABELS);
    let y_keys = RangedCoordf64::from(y0..y1).key_points(AXIS_LABELS);
    let x_tick = (xs.tick_length * hf).round() as i32;
    let y_tick = (ys.tick_length * wf).round() as i32;
    let x_ticks = x_keys
        .iter()
        .map(|v| (*v, x_tick))
        .chain(
            minor_ticks(&x_keys, (x0, x1), xs.minor_divisions)
                .into_iter()
                .map(|v| (v, x_tick / 2)),
        );
    let y_ticks = y_keys
        .iter()
        .map(|v| (*v, y_tick))
        .chain(
            minor_ticks(&y_keys, (y0, y1), ys.minor_divisions)
                .into_iter()
                .map(|v| (v, y_tick / 2)),
        );
    let tick = BLACK.stroke_width(1);
    for (v, len) in x_ticks {
        let (px, _) = frame.map(v, y0);
        root.draw(&PathElement::new(vec![(px, frame.bottom), (px, frame.bottom - len)], tick))
            .map_err(render_err)?;
        if cfg.pad_tick_x {
            root.draw(&PathElement::new(vec![(px, frame.top), (px, frame.top + len)], tick))
                .map_err(render_err)?;
        }
    }
    for (v, len) in y_ticks {
        let (_, py) = frame.map(x0, v);
        root.draw(&PathElement::new(vec![(frame.left, py), (frame.left + len, py)], tick))
            .map_err(render_err)?;
        if cfg.pad_tick_y {
            root.draw(&PathElement::new(vec![(frame.right, py), (frame.right - len, py)], tick))
                .map_err(render_err)?;
        }
    }

    // ---- Axis titles, right-aligned at the axis end
    if !axes.x.title.is_empty() {
        let title_px = xs.title_size * hf;
        let ty = frame.bottom as f64
            + xs.label_offset * hf
            + x_label_px
            + xs.title_offset * title_px;
        let ty = ty.min(hf - title_px / 2.0).round() as i32;
        let style = text_style(xs.title_font, title_px, xs.title_color)
            .pos(Pos::new(HPos::Right, VPos::Center));
        root.draw(&Text::new(axes.x.title.clone(), (frame.right, ty), style))
            .map_err(render_err)?;
    }
    if !axes.y.title.is_empty() {
        let title_px = ys.title_size * hf;
        let widest = max_label_width_px(&y_keys, ydec, y_label_px.round() as u32) as f64;
        let tx = frame.left as f64 - ys.label_offset * hf - widest - ys.title_offset * title_px;
        let tx = tx.max(title_px / 2.0).round() as i32;
        let style = text_style(ys.title_font, title_px, ys.title_color)
            .pos(Pos::new(HPos::Right, VPos::Center))
            .transform(FontTransform::Rotate270);
        root.draw(&Text::new(axes.y.title.clone(), (tx, frame.top), style))
            .map_err(render_err)?;
    }

    // ---- Color scale for the first 2-D histogram
    if let Some(h2) = objects.iter().find_map(|o| match o {
        PlotObject::Histogram2D(h2) => Some(h2),
        _ => None,
    }) {
        let x_start = frame.right + (0.01 * wf).round() as i32;
        let x_end = x_start + (COLOR_SCALE_WIDTH * wf).round() as i32;
        draw_color_scale(
            root,
            (x_start, frame.top, x_end, frame.bottom),
            h2.max_content(),
            cfg.palette,
            ScaleAxis {
                title: &h2.axes.z.title,
                style: &h2.axes.z.style,
            },
        )?;
    }
    Ok(())
}

fn draw_function<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    f: &Function1D,
    cfg: &StyleConfig,
) -> Result<()> {
    let pts: Vec<(i32, i32)> = f
        .points()
        .into_iter()
        .filter(|(x, y)| x.is_finite() && y.is_finite() && *x >= frame.x.0 && *x <= frame.x.1)
        .map(|(x, y)| frame.map(x, y))
        .collect();
    if pts.len() < 2 {
        return Ok(());
    }
    let s = &f.style;
    stroke(
        root,
        &pts,
        s.line_color,
        s.line_width,
        &dash_lengths(s.line_dash, &cfg.dash_pattern, s.line_width),
    )
}

fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    hist: &Histogram1D,
    cfg: &StyleConfig,
) -> Result<()> {
    let base = 0f64.clamp(frame.y.0, frame.y.1);
    let (lo, _) = hist.range();
    let mut outline = vec![(lo, base)];
    for (i, c) in hist.contents().iter().enumerate() {
        let (a, b) = hist.bin_edges(i);
        outline.push((a, *c));
        outline.push((b, *c));
    }
    outline.push((hist.range().1, base));
    let pts: Vec<(i32, i32)> = outline.iter().map(|(x, y)| frame.map(*x, *y)).collect();

    let s = &hist.style;
    if let Some(fill) = s.fill_color {
        root.draw(&Polygon::new(pts.clone(), rgb_color(fill).filled()))
            .map_err(render_err)?;
    }
    stroke(
        root,
        &pts,
        s.line_color,
        s.line_width,
        &dash_lengths(s.line_dash, &cfg.dash_pattern, s.line_width),
    )
}

fn draw_graph<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    g: &ErrorGraph,
    cfg: &StyleConfig,
) -> Result<()> {
    let s = &g.style;
    let bars = rgb_color(s.line_color).stroke_width(s.line_width.min(2));
    if g.connect {
        let pts: Vec<(i32, i32)> = g.points().iter().map(|(x, y)| frame.map(*x, *y)).collect();
        stroke(
            root,
            &pts,
            s.line_color,
            s.line_width,
            &dash_lengths(s.line_dash, &cfg.dash_pattern, s.line_width),
        )?;
    }
    for (i, (x, y)) in g.points().iter().enumerate() {
        let (ex, ey) = (g.x_errors()[i], g.y_errors()[i]);
        if ey > 0.0 {
            root.draw(&PathElement::new(
                vec![frame.map(*x, y - ey), frame.map(*x, y + ey)],
                bars,
            ))
            .map_err(render_err)?;
        }
        if ex > 0.0 {
            root.draw(&PathElement::new(
                vec![frame.map(x - ex, *y), frame.map(x + ex, *y)],
                bars,
            ))
            .map_err(render_err)?;
        }
        draw_marker(root, frame.map(*x, *y), s)?;
    }
    Ok(())
}

fn draw_histogram_2d<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    frame: &Frame,
    h2: &Histogram2D,
    cfg: &StyleConfig,
) -> Result<()> {
    let z_max = h2.max_content();
    if z_max <= 0.0 {
        return Ok(());
    }
    let (nx, ny) = h2.bins();
    for ix in 0..nx {
        for iy in 0..ny {
            let c = h2.content(ix, iy).unwrap_or(0.0);
            if c <= 0.0 {
                continue;
            }
            let ((xa, xb), (ya, yb)) = h2.bin_edges(ix, iy);
            let color = cfg.palette.color_at(c / z_max);
            root.draw(&Rectangle::new(
                [frame.map(xa, yb), frame.map(xb, ya)],
                rgb_color(color).filled(),
            ))
            .map_err(render_err)?;
        }
    }
    Ok(())
}

/// Lines of the stats and fit boxes, when the style asks for them.
fn info_lines(canvas: &Canvas) -> Vec<String> {
    let cfg = canvas.profile().config();
    let mut lines = Vec::new();
    if cfg.show_stats {
        if let Some(PlotObject::Histogram(h)) = canvas
            .objects()
            .iter()
            .find(|o| matches!(o, PlotObject::Histogram(_)))
        {
            let s = stats::summarize(h);
            lines.push(s.name.clone());
            lines.push(format!("Entries {}", s.entries));
            if let Some(mean) = s.mean {
                lines.push(format!("Mean {:.4}", mean));
            }
            if let Some(sd) = s.std_dev {
                lines.push(format!("Std Dev {:.4}", sd));
            }
        }
    }
    if cfg.show_fit {
        for o in canvas.objects() {
            if let PlotObject::Function(f) = o {
                if f.style.role == SeriesRole::Fit {
                    for (name, value) in f.expr().parameters() {
                        lines.push(format!("{name} = {value:.4}"));
                    }
                }
            }
        }
    }
    lines
}

fn draw_title<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    cfg: &StyleConfig,
    title: &str,
) -> Result<()> {
    if title.trim().is_empty() {
        return Ok(());
    }
    let (w, h) = root.dim_in_pixel();
    let font_px = cfg.x_axis.title_size * h as f64;
    let text_w = estimate_text_width_px(title, font_px.round() as u32) as i32;
    let cx = w as i32 / 2;
    let cy = (font_px * 0.8).round() as i32;
    let pad = (font_px * 0.2).round() as i32;
    let half_h = (font_px / 2.0).round() as i32;
    root.draw(&Rectangle::new(
        [(cx - text_w / 2 - pad, cy - half_h - pad), (cx + text_w / 2 + pad, cy + half_h + pad)],
        rgb_color(cfg.title_fill).filled(),
    ))
    .map_err(render_err)?;
    let style = text_style(cfg.x_axis.title_font, font_px, Rgb8::BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(title.to_string(), (cx, cy), style))
        .map_err(render_err)
}

fn draw_label<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, label: &TextLabel) -> Result<()> {
    let size = root.dim_in_pixel();
    let h = match label.align.h {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    };
    let v = match label.align.v {
        VAlign::Bottom => VPos::Bottom,
        VAlign::Center => VPos::Center,
        VAlign::Top => VPos::Top,
    };
    let style = text_style(label.font, label.size * size.1 as f64, label.color).pos(Pos::new(h, v));
    root.draw(&Text::new(
        label.text.clone(),
        ndc_to_px(size, label.x, label.y),
        style,
    ))
    .map_err(render_err)
}
