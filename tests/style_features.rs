use std::sync::Mutex;

use snoplus_style::models::{Expr1D, Function1D, Histogram1D};
use snoplus_style::style::{self, StyleConfig};
use snoplus_style::viz::{self, OutputFormat};
use snoplus_style::Canvas;

// Canvases capture the installed style, so tests that install one take turns.
static STYLE_LOCK: Mutex<()> = Mutex::new(());

fn fit_and_histogram(name: &str) -> Canvas {
    let mut c = Canvas::new(name, 800, 600).unwrap();
    let f = Function1D::new(
        "fitcurve",
        Expr1D::Gaussian { amplitude: 1.0, mean: 0.0, sigma: 0.5 },
        0.0,
        1.0,
    )
    .unwrap();
    let mut h = Histogram1D::new("h", 10, 0.0, 1.0).unwrap();
    h.fill(0.35);
    c.draw(f);
    c.draw(h);
    c
}

fn render_svg(c: &Canvas) -> String {
    String::from_utf8(viz::render_to_bytes(c, OutputFormat::Svg).unwrap()).unwrap()
}

#[test]
fn stats_fit_and_title_boxes_follow_the_style() {
    let _guard = STYLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    style::apply(&StyleConfig::publication()).unwrap();
    let plain = render_svg(&fit_and_histogram("plain"));
    assert!(!plain.contains("Entries 1"));
    assert!(!plain.contains("Sigma = 0.5000"));
    assert!(!plain.contains("fitcurve"));

    let mut cfg = StyleConfig::publication();
    cfg.name = "boxes".into();
    cfg.show_stats = true;
    cfg.show_fit = true;
    cfg.show_title = true;
    style::apply(&cfg).unwrap();
    let boxed = render_svg(&fit_and_histogram("boxed"));
    assert!(boxed.contains("Entries 1"));
    assert!(boxed.contains("Mean 0.3500"));
    assert!(boxed.contains("Sigma = 0.5000"));
    assert!(boxed.contains("Constant = 1.0000"));
    assert!(boxed.contains("fitcurve"));

    style::apply(&StyleConfig::publication()).unwrap();
}

#[test]
fn mirrored_and_minor_ticks_add_tick_marks() {
    let _guard = STYLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let count = |cfg: &StyleConfig| {
        style::apply(cfg).unwrap();
        render_svg(&fit_and_histogram("ticks")).matches("<polyline").count()
    };

    let full = count(&StyleConfig::publication());

    let mut cfg = StyleConfig::publication();
    cfg.pad_tick_x = false;
    let bottom_only = count(&cfg);
    assert!(bottom_only < full, "{bottom_only} >= {full}");

    cfg.pad_tick_y = false;
    let unmirrored = count(&cfg);
    assert!(unmirrored < bottom_only);

    cfg.x_axis.minor_divisions = 0;
    cfg.y_axis.minor_divisions = 0;
    let majors_only = count(&cfg);
    assert!(majors_only < unmirrored);

    style::apply(&StyleConfig::publication()).unwrap();
}
