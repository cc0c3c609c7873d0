//! The two reference figures: a 1-D fit / simulation / data overlay and a 2-D heat map.
//!
//! [`run`] installs the style once, then builds and exports each figure on its
//! own so that a failed export of one does not stop the other.

use std::path::PathBuf;

use log::{error, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, Legend, LegendGlyph};
use crate::conventions::{self, ISOTROPY_TITLE, NORMALIZED_R3_TITLE};
use crate::error::Result;
use crate::models::{
    ErrorGraph, Expr1D, Expr2D, Function1D, Function2D, Histogram1D, Histogram2D, Styled,
};
use crate::storage;
use crate::style::{self, Axis, StyleConfig};
use crate::viz::OutputFormat;

/// Seed used when none is given, so repeated runs draw the same figures.
pub const DEFAULT_SEED: u64 = 4357;

/// Draws used to fill the 2-D histogram.
pub const DEFAULT_2D_DRAWS: usize = 5000;

/// Canvas aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aspect {
    /// 800x600.
    Standard,
    /// 1600x900.
    Wide,
}

impl Aspect {
    pub fn size(&self) -> (u32, u32) {
        match self {
            Aspect::Standard => (800, 600),
            Aspect::Wide => (1600, 900),
        }
    }
}

/// Inputs of a demo run.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub out_dir: PathBuf,
    pub format: OutputFormat,
    pub style: StyleConfig,
    pub aspect: Aspect,
    pub seed: u64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        DemoOptions {
            out_dir: PathBuf::from("."),
            format: OutputFormat::Pdf,
            style: StyleConfig::publication(),
            aspect: Aspect::Standard,
            seed: DEFAULT_SEED,
        }
    }
}

/// What happened to one figure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FigureReport {
    pub name: String,
    pub path: PathBuf,
    /// Export error, if the figure could not be built or written.
    pub error: Option<String>,
    /// Convention violations found before export.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DemoReport {
    pub style: String,
    pub figures: Vec<FigureReport>,
}

impl DemoReport {
    pub fn all_ok(&self) -> bool {
        self.figures.iter().all(|f| f.error.is_none())
    }
}

/// Figure A: Gaussian fit, MC histogram and data points with a legend and watermark.
pub fn figure_1d<R: rand::Rng + ?Sized>(size: (u32, u32), rng: &mut R) -> Result<Canvas> {
    let mut c1 = Canvas::new("c1", size.0, size.1)?;
    c1.set_left_margin(0.2)?;
    c1.set_bottom_margin(0.2)?;

    let mut f = Function1D::new(
        "f",
        Expr1D::Gaussian {
            amplitude: 1.0,
            mean: 0.0,
            sigma: 0.5,
        },
        0.0,
        1.0,
    )?;
    f.set_axis_title(Axis::X, ISOTROPY_TITLE);
    f.set_axis_title(Axis::Y, NORMALIZED_R3_TITLE);

    let mut h = Histogram1D::new("h", 10, 0.0, 1.0)?;
    h.fill_random(&f, 100, rng)?;
    h.scale(0.05);

    let g = ErrorGraph::new(
        "g",
        &[0.1, 0.4, 0.6, 0.8],
        &[0.6, 0.5, 0.4, 0.3],
        None,
        Some(&[0.05, 0.05, 0.05, 0.05]),
    )?;

    let fid = c1.draw(f);
    let hid = c1.draw(h);
    let gid = c1.draw(g);
    c1.add_legend(
        Legend::new(0.7, 0.7, 0.89, 0.89)
            .entry(fid, "Gaussian Fit", LegendGlyph::Line)
            .entry(hid, "MC histo", LegendGlyph::Line)
            .entry(gid, "Data points", LegendGlyph::PointLine),
    )?;
    c1.add_watermark(0.88, 0.65);
    Ok(c1)
}

/// Figure B: 2-D histogram filled from `x^2+y^2`, drawn as a color map.
pub fn figure_2d<R: rand::Rng + ?Sized>(size: (u32, u32), rng: &mut R) -> Result<Canvas> {
    let mut c2 = Canvas::new("c2", size.0, size.1)?;
    c2.set_right_margin(0.2)?;
    c2.set_left_margin(0.2)?;
    c2.set_bottom_margin(0.2)?;

    let mut h2 = Histogram2D::new("h2", 40, (-4.0, 4.0), 40, (-20.0, 20.0))?;
    let f2 = Function2D::new(
        "f2",
        Expr2D::polynomial(&[(1.0, 2, 0), (1.0, 0, 2)])?,
        (-4.0, 4.0),
        (-4.0, 4.0),
    )?;
    h2.fill_random(&f2, DEFAULT_2D_DRAWS, rng)?;
    h2.set_axis_title(Axis::X, "X^{2} (mm)");
    h2.set_axis_title(Axis::Y, "Y^{2} (mm)");
    h2.set_axis_title(Axis::Z, "Counts");

    c2.draw(h2);
    c2.add_watermark(0.78, 0.5);
    Ok(c2)
}

type Builder = fn((u32, u32), &mut ChaCha8Rng) -> Result<Canvas>;

/// Install the style, then build and export both figures.
///
/// Fails only when the style is rejected, in which case nothing is drawn.
/// Per-figure failures are recorded in the report.
pub fn run(opts: &DemoOptions) -> Result<DemoReport> {
    let profile = style::apply(&opts.style)?;
    info!(
        "style `{}` installed; rendering {:?} figures ({}x{}) into {}",
        profile.name(),
        opts.format,
        opts.aspect.size().0,
        opts.aspect.size().1,
        opts.out_dir.display()
    );

    let mut rng = ChaCha8Rng::seed_from_u64(opts.seed);
    let figures: [(&str, Builder); 2] = [("example1D", figure_1d), ("example2D", figure_2d)];
    let mut reports = Vec::with_capacity(figures.len());

    for (stem, build) in figures {
        let path = storage::output_path(&opts.out_dir, stem, opts.format);
        let mut report = FigureReport {
            name: stem.to_string(),
            path: path.clone(),
            error: None,
            warnings: Vec::new(),
        };
        let outcome = build(opts.aspect.size(), &mut rng).and_then(|canvas| {
            for v in conventions::check(&canvas) {
                warn!("{stem}: {v}");
                report.warnings.push(v.to_string());
            }
            canvas.save(&path)
        });
        if let Err(e) = outcome {
            error!("{stem}: {e}");
            report.error = Some(e.to_string());
        }
        reports.push(report);
    }

    Ok(DemoReport {
        style: profile.name().to_string(),
        figures: reports,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlotObject;
    use crate::viz_style::Rgb8;

    #[test]
    fn figure_1d_matches_the_reference_layout() {
        let mut rng = ChaCha8Rng::seed_from_u64(DEFAULT_SEED);
        let c = figure_1d((800, 600), &mut rng).unwrap();
        assert_eq!(c.objects().len(), 3);
        assert_eq!(c.margins().left, 0.2);
        assert_eq!(c.margins().bottom, 0.2);
        match &c.objects()[1] {
            PlotObject::Histogram(h) => {
                assert_eq!(h.entries(), 100);
                assert!((h.integral() - 5.0).abs() < 1e-9);
                assert_eq!(h.style.line_color, Rgb8::BLUE);
            }
            other => panic!("expected histogram, got {other:?}"),
        }
        let legend = c.legend().unwrap();
        let labels: Vec<_> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Gaussian Fit", "MC histo", "Data points"]);
        assert_eq!(c.labels()[0].text, "SNO+ Preliminary");
        assert_eq!((c.labels()[0].x, c.labels()[0].y), (0.88, 0.65));
    }

    #[test]
    fn figure_2d_keeps_draws_inside_the_function_domain() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let c = figure_2d((1600, 900), &mut rng).unwrap();
        let PlotObject::Histogram2D(h2) = &c.objects()[0] else {
            panic!("expected a 2-D histogram");
        };
        assert_eq!(h2.entries(), DEFAULT_2D_DRAWS as u64);
        assert_eq!(h2.axes.z.title, "Counts");
        // y bins outside [-4, 4] are empty.
        for ix in 0..40 {
            assert_eq!(h2.content(ix, 0), Some(0.0));
            assert_eq!(h2.content(ix, 39), Some(0.0));
        }
        assert_eq!(c.margins().right, 0.2);
    }

    #[test]
    fn aspect_sizes() {
        assert_eq!(Aspect::Standard.size(), (800, 600));
        assert_eq!(Aspect::Wide.size(), (1600, 900));
    }
}
