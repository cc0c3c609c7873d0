//! Plot objects: closed-form functions, histograms, and error-bar series.
//!
//! Every constructor snapshots the active style profile (see [`crate::style`]):
//! line width, role color, marker and per-axis fonts/sizes are copied at creation,
//! so later style changes never alter existing objects.

use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};
use crate::stats;
use crate::style::{self, Axis, AxisStyle, StyleProfile};
use crate::viz_style::{Rgb8, SeriesRole, SeriesStyle};

/// Points used to draw a function curve.
pub const DEFAULT_NPX: usize = 100;

/// Simpson panels per bin when integrating a function over histogram bins.
const BIN_INTEGRATION_STEPS: usize = 16;

// ------------------------ Axis metadata ------------------------

/// Title and attributes of one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisAttr {
    pub title: String,
    pub style: AxisStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    pub x: AxisAttr,
    pub y: AxisAttr,
    pub z: AxisAttr,
}

impl Axes {
    fn from_profile(profile: &StyleProfile) -> Self {
        let attr = |axis: Axis| AxisAttr {
            title: String::new(),
            style: profile.axis(axis).clone(),
        };
        Axes {
            x: attr(Axis::X),
            y: attr(Axis::Y),
            z: attr(Axis::Z),
        }
    }

    pub fn get(&self, axis: Axis) -> &AxisAttr {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn get_mut(&mut self, axis: Axis) -> &mut AxisAttr {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Shared accessors for anything that carries a series style and axes.
pub trait Styled {
    fn series_style(&self) -> &SeriesStyle;
    fn series_style_mut(&mut self) -> &mut SeriesStyle;
    fn axes(&self) -> &Axes;
    fn axes_mut(&mut self) -> &mut Axes;

    fn set_axis_title(&mut self, axis: Axis, title: &str) {
        self.axes_mut().get_mut(axis).title = title.to_string();
    }

    fn set_line_color(&mut self, color: Rgb8) {
        self.series_style_mut().line_color = color;
    }

    fn set_marker_color(&mut self, color: Rgb8) {
        self.series_style_mut().marker_color = color;
    }

    fn line_color(&self) -> Rgb8 {
        self.series_style().line_color
    }

    fn line_width(&self) -> u32 {
        self.series_style().line_width
    }
}

macro_rules! impl_styled {
    ($($t:ty),*) => {$(
        impl Styled for $t {
            fn series_style(&self) -> &SeriesStyle { &self.style }
            fn series_style_mut(&mut self) -> &mut SeriesStyle { &mut self.style }
            fn axes(&self) -> &Axes { &self.axes }
            fn axes_mut(&mut self) -> &mut Axes { &mut self.axes }
        }
    )*};
}

fn check_range(what: &str, lo: f64, hi: f64) -> Result<()> {
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(Error::InvalidData(format!(
            "{what} range [{lo}, {hi}] must be finite and increasing"
        )));
    }
    Ok(())
}

// ------------------------ Closed-form functions ------------------------

/// One-dimensional closed-form expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr1D {
    /// `amplitude * exp(-0.5 * ((x - mean) / sigma)^2)`
    Gaussian { amplitude: f64, mean: f64, sigma: f64 },
    /// `c0 + c1 x + c2 x^2 + ...`
    Polynomial(Vec<f64>),
}

impl Expr1D {
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr1D::Gaussian {
                amplitude,
                mean,
                sigma,
            } => {
                let z = (x - mean) / sigma;
                amplitude * (-0.5 * z * z).exp()
            }
            Expr1D::Polynomial(c) => c.iter().rev().fold(0.0, |acc, k| acc * x + k),
        }
    }

    /// Named parameters, in the order a fit box lists them.
    pub fn parameters(&self) -> Vec<(String, f64)> {
        match self {
            Expr1D::Gaussian {
                amplitude,
                mean,
                sigma,
            } => vec![
                ("Constant".into(), *amplitude),
                ("Mean".into(), *mean),
                ("Sigma".into(), *sigma),
            ],
            Expr1D::Polynomial(c) => c
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("p{i}"), *v))
                .collect(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Expr1D::Gaussian {
                amplitude,
                mean,
                sigma,
            } => {
                if !(amplitude.is_finite() && mean.is_finite() && sigma.is_finite()) {
                    return Err(Error::InvalidData("gaussian parameters must be finite".into()));
                }
                if *sigma <= 0.0 {
                    return Err(Error::InvalidData(format!("gaussian sigma {sigma} must be > 0")));
                }
            }
            Expr1D::Polynomial(c) => {
                if c.is_empty() || c.iter().any(|v| !v.is_finite()) {
                    return Err(Error::InvalidData(
                        "polynomial needs at least one finite coefficient".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A term `coef * x^px * y^py`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Term {
    pub coef: f64,
    pub px: u32,
    pub py: u32,
}

/// Two-dimensional polynomial `sum(coef * x^px * y^py)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr2D {
    terms: Vec<Term>,
}

impl Expr2D {
    pub fn polynomial(terms: &[(f64, u32, u32)]) -> Result<Self> {
        if terms.is_empty() || terms.iter().any(|(c, _, _)| !c.is_finite()) {
            return Err(Error::InvalidData(
                "2-D polynomial needs at least one finite term".into(),
            ));
        }
        Ok(Expr2D {
            terms: terms
                .iter()
                .map(|&(coef, px, py)| Term { coef, px, py })
                .collect(),
        })
    }

    pub fn eval(&self, x: f64, y: f64) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coef * x.powi(t.px as i32) * y.powi(t.py as i32))
            .sum()
    }
}

impl fmt::Display for Expr2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, t) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            let mut parts: Vec<String> = Vec::new();
            if t.coef != 1.0 || (t.px == 0 && t.py == 0) {
                parts.push(format!("{}", t.coef));
            }
            for (var, p) in [("x", t.px), ("y", t.py)] {
                match p {
                    0 => {}
                    1 => parts.push(var.to_string()),
                    p => parts.push(format!("{var}^{p}")),
                }
            }
            f.write_str(&parts.join("*"))?;
        }
        Ok(())
    }
}

/// A 1-D function curve over `[xmin, xmax]`.
#[derive(Clone, Debug)]
pub struct Function1D {
    name: String,
    expr: Expr1D,
    xmin: f64,
    xmax: f64,
    npx: usize,
    pub style: SeriesStyle,
    pub axes: Axes,
}

impl Function1D {
    /// Curves default to the fit role.
    pub fn new(name: &str, expr: Expr1D, xmin: f64, xmax: f64) -> Result<Self> {
        Self::with_role(name, expr, xmin, xmax, SeriesRole::Fit)
    }

    pub fn with_role(
        name: &str,
        expr: Expr1D,
        xmin: f64,
        xmax: f64,
        role: SeriesRole,
    ) -> Result<Self> {
        check_range("function", xmin, xmax)?;
        expr.validate()?;
        let profile = style::active();
        Ok(Function1D {
            name: name.to_string(),
            expr,
            xmin,
            xmax,
            npx: DEFAULT_NPX,
            style: profile.series_style(role),
            axes: Axes::from_profile(&profile),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &Expr1D {
        &self.expr
    }

    pub fn range(&self) -> (f64, f64) {
        (self.xmin, self.xmax)
    }

    pub fn set_npx(&mut self, npx: usize) {
        self.npx = npx.max(2);
    }

    /// Value at `x`; zero outside the function's range.
    pub fn eval(&self, x: f64) -> f64 {
        if x < self.xmin || x > self.xmax {
            0.0
        } else {
            self.expr.eval(x)
        }
    }

    /// `npx + 1` evenly spaced samples across the range.
    pub fn points(&self) -> Vec<(f64, f64)> {
        let step = (self.xmax - self.xmin) / self.npx as f64;
        (0..=self.npx)
            .map(|i| {
                let x = self.xmin + step * i as f64;
                (x, self.expr.eval(x))
            })
            .collect()
    }

    /// Integral over `[a, b]` clipped to the function range.
    pub fn integral(&self, a: f64, b: f64) -> f64 {
        let (lo, hi) = (a.max(self.xmin), b.min(self.xmax));
        stats::integrate(|x| self.expr.eval(x), lo, hi, BIN_INTEGRATION_STEPS)
    }
}

/// A 2-D function over a rectangle.
#[derive(Clone, Debug)]
pub struct Function2D {
    name: String,
    expr: Expr2D,
    x_range: (f64, f64),
    y_range: (f64, f64),
}

impl Function2D {
    pub fn new(name: &str, expr: Expr2D, x_range: (f64, f64), y_range: (f64, f64)) -> Result<Self> {
        check_range("function x", x_range.0, x_range.1)?;
        check_range("function y", y_range.0, y_range.1)?;
        Ok(Function2D {
            name: name.to_string(),
            expr,
            x_range,
            y_range,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expr(&self) -> &Expr2D {
        &self.expr
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.x_range.0..=self.x_range.1).contains(&x)
            && (self.y_range.0..=self.y_range.1).contains(&y)
    }

    /// Value at `(x, y)`; zero outside the function's domain.
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        if self.contains(x, y) {
            self.expr.eval(x, y)
        } else {
            0.0
        }
    }
}

// ------------------------ Histograms ------------------------

/// Fixed-width 1-D histogram with under/overflow bins.
#[derive(Clone, Debug)]
pub struct Histogram1D {
    name: String,
    xmin: f64,
    xmax: f64,
    contents: Vec<f64>,
    underflow: f64,
    overflow: f64,
    entries: u64,
    sumw: f64,
    sumwx: f64,
    sumwx2: f64,
    pub style: SeriesStyle,
    pub axes: Axes,
}

impl Histogram1D {
    /// Histograms default to the model role.
    pub fn new(name: &str, nbins: usize, xmin: f64, xmax: f64) -> Result<Self> {
        if nbins == 0 {
            return Err(Error::InvalidData("histogram needs at least one bin".into()));
        }
        check_range("histogram", xmin, xmax)?;
        let profile = style::active();
        Ok(Histogram1D {
            name: name.to_string(),
            xmin,
            xmax,
            contents: vec![0.0; nbins],
            underflow: 0.0,
            overflow: 0.0,
            entries: 0,
            sumw: 0.0,
            sumwx: 0.0,
            sumwx2: 0.0,
            style: profile.series_style(SeriesRole::Model),
            axes: Axes::from_profile(&profile),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nbins(&self) -> usize {
        self.contents.len()
    }

    pub fn range(&self) -> (f64, f64) {
        (self.xmin, self.xmax)
    }

    pub fn bin_width(&self) -> f64 {
        (self.xmax - self.xmin) / self.contents.len() as f64
    }

    /// Low and high edge of in-range bin `i` (0-based).
    pub fn bin_edges(&self, i: usize) -> (f64, f64) {
        let w = self.bin_width();
        (self.xmin + w * i as f64, self.xmin + w * (i + 1) as f64)
    }

    pub fn bin_center(&self, i: usize) -> f64 {
        let (lo, hi) = self.bin_edges(i);
        0.5 * (lo + hi)
    }

    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    pub fn underflow(&self) -> f64 {
        self.underflow
    }

    pub fn overflow(&self) -> f64 {
        self.overflow
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Sum of in-range bin contents.
    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }

    pub fn max_content(&self) -> f64 {
        self.contents.iter().cloned().fold(0.0, f64::max)
    }

    pub fn fill(&mut self, x: f64) {
        self.fill_weighted(x, 1.0);
    }

    /// Non-finite `x` or `w` is ignored and not counted as an entry.
    pub fn fill_weighted(&mut self, x: f64, w: f64) {
        if !x.is_finite() || !w.is_finite() {
            log::debug!("histogram `{}`: ignoring non-finite fill ({x}, {w})", self.name);
            return;
        }
        self.entries += 1;
        if x < self.xmin {
            self.underflow += w;
            return;
        }
        if x >= self.xmax {
            self.overflow += w;
            return;
        }
        let i = (((x - self.xmin) / self.bin_width()) as usize).min(self.contents.len() - 1);
        self.contents[i] += w;
        self.sumw += w;
        self.sumwx += w * x;
        self.sumwx2 += w * x * x;
    }

    /// Fill with `n` draws distributed like `f` integrated over each bin.
    /// Draws land on bin centers.
    pub fn fill_random<R: Rng + ?Sized>(
        &mut self,
        f: &Function1D,
        n: usize,
        rng: &mut R,
    ) -> Result<()> {
        let weights: Vec<f64> = (0..self.nbins())
            .map(|i| {
                let (lo, hi) = self.bin_edges(i);
                f.integral(lo, hi)
            })
            .collect();
        let cdf = stats::cumulative(&weights).ok_or_else(|| {
            Error::Sampling(
                f.name().to_string(),
                "integral over the histogram range is not positive".into(),
            )
        })?;
        for _ in 0..n {
            let i = stats::sample_index(&cdf, rng);
            self.fill(self.bin_center(i));
        }
        log::debug!("filled `{}` with {n} draws from `{}`", self.name, f.name());
        Ok(())
    }

    /// Multiply every bin (and the weight sums) by `c`. Entries are unchanged.
    pub fn scale(&mut self, c: f64) {
        for v in self.contents.iter_mut() {
            *v *= c;
        }
        self.underflow *= c;
        self.overflow *= c;
        self.sumw *= c;
        self.sumwx *= c;
        self.sumwx2 *= c;
    }

    pub fn mean(&self) -> Option<f64> {
        (self.sumw != 0.0).then(|| self.sumwx / self.sumw)
    }

    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let var = self.sumwx2 / self.sumw - mean * mean;
        Some(var.max(0.0).sqrt())
    }
}

/// Fixed-width 2-D histogram. Out-of-range fills are counted but not stored per bin.
#[derive(Clone, Debug)]
pub struct Histogram2D {
    name: String,
    nx: usize,
    x_range: (f64, f64),
    ny: usize,
    y_range: (f64, f64),
    contents: Vec<f64>,
    entries: u64,
    out_of_range: u64,
    pub style: SeriesStyle,
    pub axes: Axes,
}

impl Histogram2D {
    pub fn new(
        name: &str,
        nx: usize,
        x_range: (f64, f64),
        ny: usize,
        y_range: (f64, f64),
    ) -> Result<Self> {
        if nx == 0 || ny == 0 {
            return Err(Error::InvalidData("2-D histogram needs at least one bin per axis".into()));
        }
        check_range("histogram x", x_range.0, x_range.1)?;
        check_range("histogram y", y_range.0, y_range.1)?;
        let profile = style::active();
        Ok(Histogram2D {
            name: name.to_string(),
            nx,
            x_range,
            ny,
            y_range,
            contents: vec![0.0; nx * ny],
            entries: 0,
            out_of_range: 0,
            style: profile.series_style(SeriesRole::Model),
            axes: Axes::from_profile(&profile),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bins(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    pub fn entries(&self) -> u64 {
        self.entries
    }

    pub fn out_of_range(&self) -> u64 {
        self.out_of_range
    }

    fn widths(&self) -> (f64, f64) {
        (
            (self.x_range.1 - self.x_range.0) / self.nx as f64,
            (self.y_range.1 - self.y_range.0) / self.ny as f64,
        )
    }

    /// Edges `((x_lo, x_hi), (y_lo, y_hi))` of bin `(ix, iy)`.
    pub fn bin_edges(&self, ix: usize, iy: usize) -> ((f64, f64), (f64, f64)) {
        let (wx, wy) = self.widths();
        let x0 = self.x_range.0 + wx * ix as f64;
        let y0 = self.y_range.0 + wy * iy as f64;
        ((x0, x0 + wx), (y0, y0 + wy))
    }

    /// Content of bin `(ix, iy)`, or `None` outside the binning.
    pub fn content(&self, ix: usize, iy: usize) -> Option<f64> {
        if ix >= self.nx || iy >= self.ny {
            return None;
        }
        Some(self.contents[iy * self.nx + ix])
    }

    pub fn integral(&self) -> f64 {
        self.contents.iter().sum()
    }

    pub fn max_content(&self) -> f64 {
        self.contents.iter().cloned().fold(0.0, f64::max)
    }

    pub fn fill(&mut self, x: f64, y: f64) {
        self.entries += 1;
        let in_x = x >= self.x_range.0 && x < self.x_range.1;
        let in_y = y >= self.y_range.0 && y < self.y_range.1;
        if !(in_x && in_y) {
            self.out_of_range += 1;
            return;
        }
        let (wx, wy) = self.widths();
        let ix = (((x - self.x_range.0) / wx) as usize).min(self.nx - 1);
        let iy = (((y - self.y_range.0) / wy) as usize).min(self.ny - 1);
        self.contents[iy * self.nx + ix] += 1.0;
    }

    /// Fill with `n` draws distributed like `f` evaluated at bin centers.
    /// Bins outside the function's domain get no weight.
    pub fn fill_random<R: Rng + ?Sized>(
        &mut self,
        f: &Function2D,
        n: usize,
        rng: &mut R,
    ) -> Result<()> {
        let mut centers = Vec::with_capacity(self.nx * self.ny);
        for iy in 0..self.ny {
            for ix in 0..self.nx {
                let ((x0, x1), (y0, y1)) = self.bin_edges(ix, iy);
                centers.push((0.5 * (x0 + x1), 0.5 * (y0 + y1)));
            }
        }
        let weights: Vec<f64> = centers.iter().map(|&(x, y)| f.eval(x, y)).collect();
        let cdf = stats::cumulative(&weights).ok_or_else(|| {
            Error::Sampling(
                f.name().to_string(),
                "function is not positive anywhere inside the histogram".into(),
            )
        })?;
        for _ in 0..n {
            let (x, y) = centers[stats::sample_index(&cdf, rng)];
            self.fill(x, y);
        }
        log::debug!("filled `{}` with {n} draws from `{}`", self.name, f.name());
        Ok(())
    }
}

// ------------------------ Graphs ------------------------

/// Discrete points with optional symmetric errors.
#[derive(Clone, Debug)]
pub struct ErrorGraph {
    name: String,
    points: Vec<(f64, f64)>,
    ex: Vec<f64>,
    ey: Vec<f64>,
    /// Draw a line through the points in addition to markers.
    pub connect: bool,
    pub style: SeriesStyle,
    pub axes: Axes,
}

impl ErrorGraph {
    /// Graphs default to the data role. Missing error arrays mean zero errors.
    pub fn new(
        name: &str,
        x: &[f64],
        y: &[f64],
        ex: Option<&[f64]>,
        ey: Option<&[f64]>,
    ) -> Result<Self> {
        let n = x.len();
        if y.len() != n {
            return Err(Error::InvalidData(format!(
                "graph `{name}`: {n} x values but {} y values",
                y.len()
            )));
        }
        let errors = |label: &str, e: Option<&[f64]>| -> Result<Vec<f64>> {
            match e {
                None => Ok(vec![0.0; n]),
                Some(e) if e.len() != n => Err(Error::InvalidData(format!(
                    "graph `{name}`: {label} has {} values, expected {n}",
                    e.len()
                ))),
                Some(e) if e.iter().any(|v| !v.is_finite() || *v < 0.0) => Err(
                    Error::InvalidData(format!("graph `{name}`: {label} must be finite and >= 0")),
                ),
                Some(e) => Ok(e.to_vec()),
            }
        };
        let ex = errors("x errors", ex)?;
        let ey = errors("y errors", ey)?;
        if x.iter().chain(y).any(|v| !v.is_finite()) {
            return Err(Error::InvalidData(format!(
                "graph `{name}`: coordinates must be finite"
            )));
        }
        let profile = style::active();
        Ok(ErrorGraph {
            name: name.to_string(),
            points: x.iter().copied().zip(y.iter().copied()).collect(),
            ex,
            ey,
            connect: false,
            style: profile.series_style(SeriesRole::Data),
            axes: Axes::from_profile(&profile),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn x_errors(&self) -> &[f64] {
        &self.ex
    }

    pub fn y_errors(&self) -> &[f64] {
        &self.ey
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl_styled!(Function1D, Histogram1D, Histogram2D, ErrorGraph);

// ------------------------ Plot object enum ------------------------

/// Anything that can be drawn on a canvas.
#[derive(Clone, Debug)]
pub enum PlotObject {
    Function(Function1D),
    Histogram(Histogram1D),
    Graph(ErrorGraph),
    Histogram2D(Histogram2D),
}

impl PlotObject {
    pub fn name(&self) -> &str {
        match self {
            PlotObject::Function(f) => f.name(),
            PlotObject::Histogram(h) => h.name(),
            PlotObject::Graph(g) => g.name(),
            PlotObject::Histogram2D(h) => h.name(),
        }
    }

    pub fn styled(&self) -> &dyn Styled {
        match self {
            PlotObject::Function(f) => f,
            PlotObject::Histogram(h) => h,
            PlotObject::Graph(g) => g,
            PlotObject::Histogram2D(h) => h,
        }
    }

    pub fn role(&self) -> SeriesRole {
        self.styled().series_style().role
    }

    pub fn is_2d(&self) -> bool {
        matches!(self, PlotObject::Histogram2D(_))
    }

    /// Data extent `((xmin, xmax), (ymin, ymax))`, including error bars.
    pub fn extent(&self) -> ((f64, f64), (f64, f64)) {
        match self {
            PlotObject::Function(f) => {
                let (lo, hi) = f
                    .points()
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, y)| {
                        (lo.min(*y), hi.max(*y))
                    });
                (f.range(), (lo, hi))
            }
            PlotObject::Histogram(h) => {
                let lo = h.contents().iter().cloned().fold(0.0, f64::min);
                (h.range(), (lo, h.max_content()))
            }
            PlotObject::Graph(g) => {
                let mut xr = (f64::INFINITY, f64::NEG_INFINITY);
                let mut yr = (f64::INFINITY, f64::NEG_INFINITY);
                for (i, (x, y)) in g.points().iter().enumerate() {
                    xr = (xr.0.min(x - g.ex[i]), xr.1.max(x + g.ex[i]));
                    yr = (yr.0.min(y - g.ey[i]), yr.1.max(y + g.ey[i]));
                }
                (xr, yr)
            }
            PlotObject::Histogram2D(h) => (h.x_range(), h.y_range()),
        }
    }
}

impl From<Function1D> for PlotObject {
    fn from(v: Function1D) -> Self {
        PlotObject::Function(v)
    }
}

impl From<Histogram1D> for PlotObject {
    fn from(v: Histogram1D) -> Self {
        PlotObject::Histogram(v)
    }
}

impl From<ErrorGraph> for PlotObject {
    fn from(v: ErrorGraph) -> Self {
        PlotObject::Graph(v)
    }
}

impl From<Histogram2D> for PlotObject {
    fn from(v: Histogram2D) -> Self {
        PlotObject::Histogram2D(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_values() {
        let g = Expr1D::Gaussian {
            amplitude: 1.0,
            mean: 0.0,
            sigma: 0.5,
        };
        assert_eq!(g.eval(0.0), 1.0);
        assert!((g.eval(1.0) - (-2.0f64).exp()).abs() < 1e-12);
        assert_eq!(Expr1D::Polynomial(vec![1.0, 2.0, 3.0]).eval(2.0), 17.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        let bad = Expr1D::Gaussian {
            amplitude: 1.0,
            mean: 0.0,
            sigma: 0.0,
        };
        assert!(Function1D::new("f", bad, 0.0, 1.0).is_err());
        let ok = Expr1D::Polynomial(vec![1.0]);
        assert!(Function1D::new("f", ok, 1.0, 1.0).is_err());
        assert!(Histogram1D::new("h", 0, 0.0, 1.0).is_err());
        assert!(ErrorGraph::new("g", &[1.0], &[1.0, 2.0], None, None).is_err());
        assert!(ErrorGraph::new("g", &[1.0], &[1.0], None, Some(&[-0.1])).is_err());
    }

    #[test]
    fn histogram_fill_and_scale() {
        let mut h = Histogram1D::new("h", 10, 0.0, 1.0).unwrap();
        h.fill(0.05);
        h.fill(0.05);
        h.fill(0.95);
        h.fill(-1.0);
        h.fill(1.0);
        assert_eq!(h.entries(), 5);
        assert_eq!(h.contents()[0], 2.0);
        assert_eq!(h.contents()[9], 1.0);
        assert_eq!(h.underflow(), 1.0);
        assert_eq!(h.overflow(), 1.0);
        let mean = h.mean().unwrap();
        h.scale(0.5);
        assert_eq!(h.integral(), 1.5);
        assert_eq!(h.entries(), 5);
        assert!((h.mean().unwrap() - mean).abs() < 1e-12);
    }

    #[test]
    fn non_finite_fills_leave_the_histogram_untouched() {
        let mut h = Histogram1D::new("h", 10, 0.0, 1.0).unwrap();
        h.fill(f64::NAN);
        h.fill(f64::INFINITY);
        h.fill_weighted(0.5, f64::NAN);
        assert_eq!(h.entries(), 0);
        assert_eq!(h.integral(), 0.0);
        assert_eq!((h.underflow(), h.overflow()), (0.0, 0.0));
        assert_eq!(h.mean(), None);
        h.fill(0.25);
        assert_eq!(h.mean(), Some(0.25));
    }

    #[test]
    fn content_2d_is_bounded_per_axis() {
        let mut h2 = Histogram2D::new("h2", 3, (0.0, 3.0), 2, (0.0, 2.0)).unwrap();
        h2.fill(0.5, 1.5);
        assert_eq!(h2.content(0, 1), Some(1.0));
        assert_eq!(h2.content(3, 0), None);
        assert_eq!(h2.content(0, 2), None);
    }

    #[test]
    fn expr2d_display() {
        let e = Expr2D::polynomial(&[(1.0, 2, 0), (1.0, 0, 2)]).unwrap();
        assert_eq!(e.to_string(), "x^2+y^2");
        assert_eq!(e.eval(2.0, 3.0), 13.0);
    }

    #[test]
    fn graph_extent_includes_errors() {
        let g = ErrorGraph::new("g", &[0.1, 0.8], &[0.6, 0.3], None, Some(&[0.05, 0.05])).unwrap();
        let ((x0, x1), (y0, y1)) = PlotObject::from(g).extent();
        assert_eq!((x0, x1), (0.1, 0.8));
        assert!((y0 - 0.25).abs() < 1e-12);
        assert!((y1 - 0.65).abs() < 1e-12);
    }
}
