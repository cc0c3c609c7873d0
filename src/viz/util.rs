//! Utility functions for visualization: coordinates, frame ranges, tick labels, dashes.

use crate::models::PlotObject;
use crate::viz_style::LineDash;

use super::text::estimate_text_width_px;

/// Normalised canvas coordinates (origin bottom-left) to backend pixels (origin top-left).
#[inline]
pub fn ndc_to_px(size: (u32, u32), x: f64, y: f64) -> (i32, i32) {
    let (w, h) = (size.0 as f64, size.1 as f64);
    ((x * w).round() as i32, ((1.0 - y) * h).round() as i32)
}

/// Axis ranges of the frame.
///
/// The first object fixes the x range (and, for a 2-D histogram, the y range).
/// Otherwise the y range is the union of all 1-D extents, padded by 5% and
/// anchored at zero when a histogram is present and everything is non-negative.
pub fn frame_ranges(objects: &[PlotObject]) -> ((f64, f64), (f64, f64)) {
    let Some(first) = objects.first() else {
        return ((0.0, 1.0), (0.0, 1.0));
    };
    let (mut xr, first_y) = first.extent();
    if !(xr.0.is_finite() && xr.1.is_finite()) {
        xr = (0.0, 1.0);
    } else if xr.1 - xr.0 < f64::EPSILON {
        xr = (xr.0 - 1.0, xr.1 + 1.0);
    }
    if first.is_2d() {
        return (xr, first_y);
    }

    let mut ymin = f64::INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    let mut has_hist = false;
    for o in objects.iter().filter(|o| !o.is_2d()) {
        let (_, (lo, hi)) = o.extent();
        if lo.is_finite() {
            ymin = ymin.min(lo);
        }
        if hi.is_finite() {
            ymax = ymax.max(hi);
        }
        has_hist |= matches!(o, PlotObject::Histogram(_));
    }
    if !(ymin.is_finite() && ymax.is_finite()) {
        return (xr, (0.0, 1.0));
    }
    if (ymax - ymin).abs() < f64::EPSILON {
        ymin -= 1.0;
        ymax += 1.0;
    }
    let pad = (ymax - ymin) * 0.05;
    let lo = if has_hist && ymin >= 0.0 { 0.0 } else { ymin - pad };
    (xr, (lo, ymax + pad))
}

/// Decimals needed to tell tick labels apart over `[lo, hi]` with about `n` ticks.
pub fn tick_decimals(lo: f64, hi: f64, n: usize) -> usize {
    let span = (hi - lo).abs();
    if span <= 0.0 || n == 0 {
        return 0;
    }
    let step = span / n as f64;
    let mag = step.log10().floor();
    if mag >= 0.0 { 0 } else { (-mag) as usize }
}

/// Format a tick value; negative zero prints as `0`.
pub fn format_tick(v: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, v);
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

/// Width in pixels of the widest formatted label among `values`.
pub fn max_label_width_px(values: &[f64], decimals: usize, font_px: u32) -> u32 {
    values
        .iter()
        .map(|v| estimate_text_width_px(&format_tick(*v, decimals), font_px))
        .max()
        .unwrap_or(0)
}

/// Minor tick positions inside `[lo, hi]` for evenly spaced `majors`,
/// `divisions` intervals per major step. Positions on a major tick are skipped.
pub fn minor_ticks(majors: &[f64], (lo, hi): (f64, f64), divisions: u32) -> Vec<f64> {
    if divisions < 2 || majors.len() < 2 {
        return Vec::new();
    }
    let step = (majors[1] - majors[0]) / divisions as f64;
    if !(step.is_finite() && step > 0.0) {
        return Vec::new();
    }
    let eps = step * 1e-6;
    // start one major step early so the partial interval below the first major is covered
    let first = majors[0] - divisions as f64 * step;
    let mut out = Vec::new();
    for i in 0u64.. {
        let v = first + i as f64 * step;
        if v > hi + eps {
            break;
        }
        if i % divisions as u64 != 0 && v >= lo - eps {
            out.push(v);
        }
    }
    out
}

/// On/off lengths in pixels for a dash style; empty means solid.
pub fn dash_lengths(dash: LineDash, pattern: &[u32], width: u32) -> Vec<u32> {
    let w = width.max(1);
    match dash {
        LineDash::Solid => Vec::new(),
        LineDash::Dash => pattern.to_vec(),
        LineDash::Dot => vec![w, 3 * w],
        LineDash::DashDot => vec![6 * w, 3 * w, w, 3 * w],
    }
}

/// Split a pixel polyline into the "on" segments of a dash pattern.
/// A solid (empty or all-zero) pattern returns the polyline unchanged.
pub fn dash_path(points: &[(i32, i32)], lengths: &[u32]) -> Vec<Vec<(i32, i32)>> {
    if points.len() < 2 || lengths.iter().all(|l| *l == 0) {
        return vec![points.to_vec()];
    }
    let mut out = Vec::new();
    let mut current: Vec<(i32, i32)> = Vec::new();
    let mut idx = 0usize;
    let mut left = lengths[0] as f64;
    let on = |i: usize| i % 2 == 0;

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (dx, dy) = ((b.0 - a.0) as f64, (b.1 - a.1) as f64);
        let len = dx.hypot(dy);
        let mut t = 0.0;
        if on(idx) && current.is_empty() {
            current.push(a);
        }
        while len - t > left {
            t += left;
            let p = (
                (a.0 as f64 + dx * t / len).round() as i32,
                (a.1 as f64 + dy * t / len).round() as i32,
            );
            if on(idx) {
                current.push(p);
                out.push(std::mem::take(&mut current));
            } else {
                current.push(p);
            }
            idx = (idx + 1) % lengths.len();
            left = lengths[idx] as f64;
        }
        left -= len - t;
        if on(idx) {
            current.push(b);
        }
    }
    if on(idx) && current.len() > 1 {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expr1D, Function1D, Histogram1D};

    #[test]
    fn minor_ticks_fill_between_and_below_majors() {
        let majors = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        let minors = minor_ticks(&majors, (0.0, 1.0), 5);
        assert_eq!(minors.len(), 20);
        assert!((minors[0] - 0.04).abs() < 1e-12);
        assert!((minors[19] - 0.96).abs() < 1e-12);

        let wider = minor_ticks(&majors, (-0.1, 1.0), 5);
        assert_eq!(wider.len(), 22);
        assert!((wider[0] + 0.08).abs() < 1e-12);

        assert!(minor_ticks(&majors, (0.0, 1.0), 1).is_empty());
        assert!(minor_ticks(&[0.5], (0.0, 1.0), 5).is_empty());
    }

    #[test]
    fn ndc_origin_is_bottom_left() {
        assert_eq!(ndc_to_px((800, 600), 0.0, 0.0), (0, 600));
        assert_eq!(ndc_to_px((800, 600), 1.0, 1.0), (800, 0));
        assert_eq!(ndc_to_px((800, 600), 0.5, 0.25), (400, 450));
    }

    #[test]
    fn first_object_owns_x_range() {
        let f = Function1D::new("f", Expr1D::Polynomial(vec![0.0, 2.0]), 0.0, 1.0).unwrap();
        let mut h = Histogram1D::new("h", 4, -5.0, 5.0).unwrap();
        h.fill(0.1);
        let objs = vec![PlotObject::from(f), PlotObject::from(h)];
        let ((x0, x1), (y0, y1)) = frame_ranges(&objs);
        assert_eq!((x0, x1), (0.0, 1.0));
        assert_eq!(y0, 0.0);
        assert!(y1 > 2.0);
    }

    #[test]
    fn tick_labels() {
        assert_eq!(tick_decimals(0.0, 1.0, 5), 1);
        assert_eq!(tick_decimals(-20.0, 20.0, 8), 0);
        assert_eq!(format_tick(-0.0001, 2), "0.00");
        assert_eq!(format_tick(0.25, 2), "0.25");
    }

    #[test]
    fn dashes_split_a_straight_line() {
        let segs = dash_path(&[(0, 0), (20, 0)], &[4, 4]);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], vec![(0, 0), (4, 0)]);
        assert_eq!(segs[1], vec![(8, 0), (12, 0)]);
        assert_eq!(segs[2], vec![(16, 0), (20, 0)]);
        assert_eq!(dash_path(&[(0, 0), (5, 5)], &[]).len(), 1);
    }
}
