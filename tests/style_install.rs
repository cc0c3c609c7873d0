use std::sync::Mutex;

use snoplus_style::models::{ErrorGraph, Expr1D, Function1D, Histogram1D, Styled};
use snoplus_style::style::{self, Axis, StyleConfig};
use snoplus_style::viz_style::{FontFace, HAlign, MarkerShape, Rgb8, VAlign};
use snoplus_style::{Canvas, Error};

// The installed style is process-wide; tests that install one take turns.
static STYLE_LOCK: Mutex<()> = Mutex::new(());

fn reset() {
    style::apply(&StyleConfig::publication()).unwrap();
}

#[test]
fn objects_inherit_the_installed_style() {
    let _guard = STYLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut cfg = StyleConfig::publication();
    cfg.name = "custom".into();
    cfg.line_width = 3;
    cfg.hist_line_width = 4;
    cfg.x_axis.label_size = 0.04;
    cfg.x_axis.label_font = FontFace::Helvetica;
    cfg.y_axis.title_size = 0.07;
    style::apply(&cfg).unwrap();

    let f = Function1D::new("f", Expr1D::Polynomial(vec![1.0]), 0.0, 1.0).unwrap();
    let h = Histogram1D::new("h", 10, 0.0, 1.0).unwrap();
    let g = ErrorGraph::new("g", &[0.5], &[0.5], None, None).unwrap();
    assert_eq!(f.line_width(), 3);
    assert_eq!(h.line_width(), 4);
    assert_eq!(g.line_width(), 3);
    assert_eq!(f.axes().x.style.label_size, 0.04);
    assert_eq!(f.axes().x.style.label_font, FontFace::Helvetica);
    assert_eq!(h.axes().get(Axis::Y).style.title_size, 0.07);

    let c = Canvas::new("c", 800, 600).unwrap();
    assert_eq!(c.profile().name(), "custom");
    reset();
}

#[test]
fn objects_keep_the_style_they_were_created_with() {
    let _guard = STYLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset();
    let before = Function1D::new("f", Expr1D::Polynomial(vec![1.0]), 0.0, 1.0).unwrap();
    let mut cfg = StyleConfig::publication();
    cfg.roles.fit = Rgb8::new(0, 128, 0);
    style::apply(&cfg).unwrap();
    let after = Function1D::new("f", Expr1D::Polynomial(vec![1.0]), 0.0, 1.0).unwrap();
    assert_eq!(before.line_color(), Rgb8::RED);
    assert_eq!(after.line_color(), Rgb8::new(0, 128, 0));
    reset();
}

#[test]
fn applying_twice_is_idempotent() {
    let _guard = STYLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let cfg = StyleConfig::slides();
    let a = style::apply(&cfg).unwrap();
    let b = style::apply(&cfg).unwrap();
    assert_eq!(*a, *b);
    assert_eq!(*style::active(), *a);
    reset();
}

#[test]
fn rejected_config_installs_nothing() {
    let _guard = STYLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset();
    let mut cfg = StyleConfig::publication();
    cfg.name = "broken".into();
    cfg.dash_pattern.clear();
    let err = style::apply(&cfg).unwrap_err();
    assert!(matches!(err, Error::Config { ref option, .. } if option == "dash_pattern"));
    assert_eq!(style::active().name(), "snoplus");

    cfg.dash_pattern = vec![12, 12];
    cfg.watermark = "  ".into();
    assert!(style::apply(&cfg).is_err());
    assert_eq!(style::active().name(), "snoplus");
}

#[test]
fn config_round_trips_through_json() {
    let cfg = StyleConfig::slides();
    let json = serde_json::to_string(&cfg).unwrap();
    let back: StyleConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(cfg, back);
    assert!(json.contains("\"palette\":\"viridis\""));
}

fn publication_json_with(edit: impl FnOnce(&mut serde_json::Value)) -> String {
    let mut v = serde_json::to_value(StyleConfig::publication()).unwrap();
    edit(&mut v);
    v.to_string()
}

#[test]
fn root_codes_are_accepted_in_json() {
    let json = publication_json_with(|v| {
        v["name"] = "codes".into();
        v["marker"] = 20.into();
        v["x_axis"]["label_font"] = 42.into();
        v["text"]["align"] = 13.into();
    });
    let cfg = StyleConfig::from_json(&json).unwrap();
    assert_eq!(cfg.marker, MarkerShape::Circle);
    assert_eq!(cfg.x_axis.label_font, FontFace::Helvetica);
    assert_eq!((cfg.text.align.h, cfg.text.align.v), (HAlign::Left, VAlign::Top));
    // named forms still work
    assert_eq!(cfg.y_axis.label_font, FontFace::TimesRoman);
}

#[test]
fn unknown_root_code_installs_nothing() {
    let _guard = STYLE_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    reset();
    let json = publication_json_with(|v| {
        v["name"] = "bad-marker".into();
        v["marker"] = 99.into();
    });
    let err = style::apply_json(&json).unwrap_err();
    assert!(matches!(err, Error::Config { ref reason, .. } if reason.contains("marker code 99")));
    assert_eq!(style::active().name(), "snoplus");

    let json = publication_json_with(|v| v["legend"]["font"] = 992.into());
    assert!(style::apply_json(&json).is_err());
    assert_eq!(style::active().name(), "snoplus");
}
