use std::fs;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snoplus_style::demo::{self, Aspect, DemoOptions, figure_1d, figure_2d};
use snoplus_style::models::PlotObject;
use snoplus_style::viz_style::{FontFace, HAlign, MarkerShape, Rgb8, VAlign};
use snoplus_style::{OutputFormat, StyleConfig, conventions};
use tempfile::tempdir;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(demo::DEFAULT_SEED)
}

#[test]
fn fits_are_red() {
    let c = figure_1d((800, 600), &mut rng()).unwrap();
    assert_eq!((c.margins().left, c.margins().bottom), (0.2, 0.2));
    let PlotObject::Function(f) = &c.objects()[0] else {
        panic!("first object should be the Gaussian");
    };
    assert_eq!(f.style.line_color, Rgb8::RED);
    assert_eq!(f.style.line_width, 2);
    assert!((f.eval(0.0) - 1.0).abs() < 1e-12);
}

#[test]
fn mc_is_blue() {
    let c = figure_1d((800, 600), &mut rng()).unwrap();
    let PlotObject::Histogram(h) = &c.objects()[1] else {
        panic!("second object should be the MC histogram");
    };
    assert_eq!(h.style.line_color, Rgb8::BLUE);
    assert_eq!(h.nbins(), 10);
    assert_eq!(h.entries(), 100);
    assert!((h.integral() - 100.0 * 0.05).abs() < 1e-9);
    // A Gaussian centred at 0 puts more draws in the first bin than in the last.
    assert!(h.contents()[0] > h.contents()[9]);
}

#[test]
fn data_are_black_points_with_error_bars() {
    let c = figure_1d((800, 600), &mut rng()).unwrap();
    let PlotObject::Graph(g) = &c.objects()[2] else {
        panic!("third object should be the data graph");
    };
    assert_eq!(g.len(), 4);
    assert_eq!(g.style.marker_color, Rgb8::BLACK);
    assert_eq!(g.style.marker, MarkerShape::Square);
    assert!(g.style.fill_color.is_none());
    assert!(!g.connect);
    assert_eq!(g.y_errors(), &[0.05; 4]);
    assert_eq!(g.x_errors(), &[0.0; 4]);
    assert!(conventions::check(&c).is_empty());
}

#[test]
fn watermark_in_both_figures() {
    let a = figure_1d((800, 600), &mut rng()).unwrap();
    let b = figure_2d((800, 600), &mut rng()).unwrap();
    let (la, lb) = (&a.labels()[0], &b.labels()[0]);
    assert_eq!(la.text, conventions::WATERMARK);
    assert_eq!(lb.text, conventions::WATERMARK);
    assert_eq!((la.x, la.y), (0.88, 0.65));
    assert_eq!((lb.x, lb.y), (0.78, 0.5));
    for l in [la, lb] {
        assert_eq!(l.font, FontFace::TimesRoman);
        assert_eq!(l.size, 0.06);
        assert_eq!((l.align.h, l.align.v), (HAlign::Right, VAlign::Center));
    }
}

#[test]
fn run_exports_two_pdfs() {
    let dir = tempdir().unwrap();
    let opts = DemoOptions {
        out_dir: dir.path().to_path_buf(),
        ..DemoOptions::default()
    };
    let report = demo::run(&opts).unwrap();
    assert!(report.all_ok(), "{report:?}");
    assert_eq!(report.style, "snoplus");

    for name in ["example1D.pdf", "example2D.pdf"] {
        let bytes = fs::read(dir.path().join(name)).expect("figure written");
        assert!(bytes.len() > 100);
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("SNO+ Preliminary"), "{name} lacks the watermark");
        assert!(text.trim_end().ends_with("%%EOF"));
    }
}

#[test]
fn run_exports_wide_svgs() {
    let dir = tempdir().unwrap();
    let opts = DemoOptions {
        out_dir: dir.path().to_path_buf(),
        format: OutputFormat::Svg,
        aspect: Aspect::Wide,
        ..DemoOptions::default()
    };
    let report = demo::run(&opts).unwrap();
    assert!(report.all_ok());
    let svg = fs::read_to_string(dir.path().join("example1D.svg")).unwrap();
    assert!(svg.contains("width=\"1600\""));
    assert!(svg.contains("β₁₄"));
}

#[test]
fn one_failed_figure_does_not_stop_the_other() {
    let dir = tempdir().unwrap();
    // A directory where the first figure should go makes that write fail.
    fs::create_dir(dir.path().join("example1D.pdf")).unwrap();
    let opts = DemoOptions {
        out_dir: dir.path().to_path_buf(),
        ..DemoOptions::default()
    };
    let report = demo::run(&opts).unwrap();
    assert!(!report.all_ok());
    assert!(report.figures[0].error.is_some());
    assert!(report.figures[1].error.is_none());
    assert!(dir.path().join("example2D.pdf").is_file());
}

#[test]
fn invalid_style_draws_nothing() {
    let dir = tempdir().unwrap();
    let mut style = StyleConfig::publication();
    style.line_width = 0;
    let opts = DemoOptions {
        out_dir: dir.path().to_path_buf(),
        style,
        ..DemoOptions::default()
    };
    assert!(demo::run(&opts).is_err());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
