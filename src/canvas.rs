//! Canvases, legends, and free text.
//!
//! A [`Canvas`] owns the plot objects drawn on it and hands back a [`PlotId`] for
//! each. Legends reference objects through those handles only, and
//! [`Canvas::add_legend`] rejects handles the canvas never issued.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};
use crate::models::PlotObject;
use crate::style::{self, StyleProfile};
use crate::viz_style::{FontFace, Rgb8, TextAlign};

static NEXT_CANVAS_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a plot object registered on a specific canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlotId {
    canvas: u64,
    index: usize,
}

impl std::fmt::Display for PlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}:{}", self.canvas, self.index)
    }
}

/// Pad margins as fractions of the canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

/// What a legend entry shows next to its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendGlyph {
    /// Line sample ("L").
    Line,
    /// Marker only ("P").
    Point,
    /// Marker on a line sample ("PL").
    PointLine,
    /// Filled box ("F").
    Fill,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub target: PlotId,
    pub label: String,
    pub glyph: LegendGlyph,
}

/// Legend box in normalised canvas coordinates (origin bottom-left).
#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Legend {
            x1,
            y1,
            x2,
            y2,
            entries: Vec::new(),
        }
    }

    pub fn entry(mut self, target: PlotId, label: &str, glyph: LegendGlyph) -> Self {
        self.entries.push(LegendEntry {
            target,
            label: label.to_string(),
            glyph,
        });
        self
    }
}

/// Text placed in normalised canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font: FontFace,
    /// Fraction of the canvas height.
    pub size: f64,
    pub align: TextAlign,
    pub color: Rgb8,
}

impl TextLabel {
    /// A label using the profile's text font, size and alignment.
    pub fn styled(profile: &StyleProfile, text: &str, x: f64, y: f64) -> Self {
        let t = &profile.config().text;
        TextLabel {
            text: text.to_string(),
            x,
            y,
            font: t.font,
            size: t.size,
            align: t.align,
            color: t.color,
        }
    }
}

/// A drawing surface holding plot objects, one optional legend and text labels.
#[derive(Debug)]
pub struct Canvas {
    id: u64,
    name: String,
    width: u32,
    height: u32,
    margins: Margins,
    objects: Vec<PlotObject>,
    legend: Option<Legend>,
    labels: Vec<TextLabel>,
    profile: Arc<StyleProfile>,
}

impl Canvas {
    /// New canvas using the active style's default margins.
    pub fn new(name: &str, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidData(format!(
                "canvas `{name}` must have a positive size, got {width}x{height}"
            )));
        }
        let profile = style::active();
        let [left, right, bottom, top] = profile.config().margins;
        Ok(Canvas {
            id: NEXT_CANVAS_ID.fetch_add(1, Ordering::Relaxed),
            name: name.to_string(),
            width,
            height,
            margins: Margins {
                left,
                right,
                bottom,
                top,
            },
            objects: Vec::new(),
            legend: None,
            labels: Vec::new(),
            profile,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Style captured when the canvas was created.
    pub fn profile(&self) -> &StyleProfile {
        &self.profile
    }

    fn check_margin(which: &str, value: f64, opposite: f64) -> Result<f64> {
        if !(0.0..1.0).contains(&value) {
            return Err(Error::config(which, format!("margin {value} is not in [0, 1)")));
        }
        if value + opposite >= 1.0 {
            return Err(Error::config(
                which,
                format!("margin {value} plus the opposite {opposite} leaves no room to draw"),
            ));
        }
        Ok(value)
    }

    pub fn set_left_margin(&mut self, v: f64) -> Result<()> {
        self.margins.left = Self::check_margin("left_margin", v, self.margins.right)?;
        Ok(())
    }

    pub fn set_right_margin(&mut self, v: f64) -> Result<()> {
        self.margins.right = Self::check_margin("right_margin", v, self.margins.left)?;
        Ok(())
    }

    pub fn set_bottom_margin(&mut self, v: f64) -> Result<()> {
        self.margins.bottom = Self::check_margin("bottom_margin", v, self.margins.top)?;
        Ok(())
    }

    pub fn set_top_margin(&mut self, v: f64) -> Result<()> {
        self.margins.top = Self::check_margin("top_margin", v, self.margins.bottom)?;
        Ok(())
    }

    /// Register a plot object. The first object drawn owns the axis frame;
    /// later ones are overlaid on it.
    pub fn draw(&mut self, object: impl Into<PlotObject>) -> PlotId {
        self.objects.push(object.into());
        PlotId {
            canvas: self.id,
            index: self.objects.len() - 1,
        }
    }

    pub fn get(&self, id: PlotId) -> Option<&PlotObject> {
        if id.canvas != self.id {
            return None;
        }
        self.objects.get(id.index)
    }

    pub fn objects(&self) -> &[PlotObject] {
        &self.objects
    }

    /// Attach a legend. Fails if any entry references an object not drawn on this canvas.
    pub fn add_legend(&mut self, legend: Legend) -> Result<()> {
        for e in &legend.entries {
            if self.get(e.target).is_none() {
                return Err(Error::UnknownPlotObject(
                    e.target.to_string(),
                    self.name.clone(),
                ));
            }
        }
        self.legend = Some(legend);
        Ok(())
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn add_text(&mut self, label: TextLabel) {
        self.labels.push(label);
    }

    /// Place the profile's watermark text at normalised `(x, y)`.
    pub fn add_watermark(&mut self, x: f64, y: f64) {
        let label = TextLabel::styled(&self.profile, self.profile.watermark(), x, y);
        self.labels.push(label);
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    /// Export to `path`; the extension selects the format (`.pdf` or `.svg`).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::viz::render_canvas(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorGraph, Expr1D, Function1D};

    #[test]
    fn foreign_handles_are_rejected() {
        let mut a = Canvas::new("a", 400, 300).unwrap();
        let mut b = Canvas::new("b", 400, 300).unwrap();
        let f = Function1D::new("f", Expr1D::Polynomial(vec![1.0]), 0.0, 1.0).unwrap();
        let id_a = a.draw(f.clone());
        let id_b = b.draw(f);

        let err = a
            .add_legend(Legend::new(0.7, 0.7, 0.9, 0.9).entry(id_b, "f", LegendGlyph::Line))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPlotObject(_, ref c) if c == "a"));
        assert!(a.legend().is_none());

        a.add_legend(Legend::new(0.7, 0.7, 0.9, 0.9).entry(id_a, "f", LegendGlyph::Line))
            .unwrap();
        assert_eq!(a.legend().unwrap().entries.len(), 1);
    }

    #[test]
    fn margins_are_validated() {
        let mut c = Canvas::new("c", 800, 600).unwrap();
        c.set_left_margin(0.2).unwrap();
        assert_eq!(c.margins().left, 0.2);
        assert!(c.set_bottom_margin(1.0).is_err());
        assert!(c.set_top_margin(-0.1).is_err());
        assert!(Canvas::new("zero", 0, 600).is_err());
    }

    #[test]
    fn opposite_margins_must_leave_a_frame() {
        let mut c = Canvas::new("c", 800, 600).unwrap();
        c.set_left_margin(0.6).unwrap();
        let err = c.set_right_margin(0.5).unwrap_err();
        assert!(matches!(err, Error::Config { ref option, .. } if option == "right_margin"));
        assert_eq!(c.margins().right, 0.1);
        c.set_top_margin(0.45).unwrap();
        assert!(c.set_bottom_margin(0.55).is_err());
        c.set_bottom_margin(0.5).unwrap();
    }

    #[test]
    fn handles_resolve_to_objects() {
        let mut c = Canvas::new("c", 800, 600).unwrap();
        let g = ErrorGraph::new("g", &[0.1], &[0.5], None, None).unwrap();
        let id = c.draw(g);
        assert_eq!(c.get(id).unwrap().name(), "g");
    }
}
