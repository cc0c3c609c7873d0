//! Collaboration plotting conventions.
//!
//! Fits are red, simulation is blue, data are black points with error bars,
//! legends have no border, and every figure carries the watermark. [`check`]
//! reports departures from these rules; it never blocks a render.

use std::fmt;

use crate::canvas::Canvas;
use crate::models::PlotObject;
use crate::viz_style::{Rgb8, SeriesRole};

pub use crate::style::DEFAULT_WATERMARK as WATERMARK;

/// Axis title for the isotropy parameter.
pub const ISOTROPY_TITLE: &str = "#beta_{14}";

/// Axis title for the radius cubed, normalised to the AV radius.
pub const NORMALIZED_R3_TITLE: &str = "R^{3} / R_{AV}^{3}";

pub const FIT_COLOR: Rgb8 = Rgb8::RED;
pub const MODEL_COLOR: Rgb8 = Rgb8::BLUE;
pub const DATA_COLOR: Rgb8 = Rgb8::BLACK;

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    MissingWatermark,
    DataNotBlack { name: String, color: Rgb8 },
    ModelNotBlue { name: String, color: Rgb8 },
    FitNotRed { name: String, color: Rgb8 },
    LegendBorder { size: u32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MissingWatermark => write!(f, "figure has no watermark"),
            Violation::DataNotBlack { name, color } => {
                write!(f, "data series `{name}` is {} instead of black", color.hex())
            }
            Violation::ModelNotBlue { name, color } => {
                write!(f, "model `{name}` is {} instead of blue", color.hex())
            }
            Violation::FitNotRed { name, color } => {
                write!(f, "fit `{name}` is {} instead of red", color.hex())
            }
            Violation::LegendBorder { size } => {
                write!(f, "legend is drawn with a {size}px border")
            }
        }
    }
}

/// Check a canvas against the conventions.
///
/// Color rules apply only when exactly one object of a role is present;
/// figures that compare several fits or models pick their own colors.
pub fn check(canvas: &Canvas) -> Vec<Violation> {
    let mut out = Vec::new();
    let watermark = canvas.profile().watermark();
    if !canvas.labels().iter().any(|l| l.text == watermark) {
        out.push(Violation::MissingWatermark);
    }

    let one_of = |role: SeriesRole| {
        let mut it = canvas
            .objects()
            .iter()
            .filter(|o| !o.is_2d() && o.role() == role);
        match (it.next(), it.next()) {
            (Some(o), None) => Some(o),
            _ => None,
        }
    };

    if let Some(o) = one_of(SeriesRole::Data) {
        let color = data_color(o);
        if color != DATA_COLOR {
            out.push(Violation::DataNotBlack {
                name: o.name().to_string(),
                color,
            });
        }
    }
    if let Some(o) = one_of(SeriesRole::Model) {
        let color = o.styled().line_color();
        if color != MODEL_COLOR {
            out.push(Violation::ModelNotBlue {
                name: o.name().to_string(),
                color,
            });
        }
    }
    if let Some(o) = one_of(SeriesRole::Fit) {
        let color = o.styled().line_color();
        if color != FIT_COLOR {
            out.push(Violation::FitNotRed {
                name: o.name().to_string(),
                color,
            });
        }
    }

    let border = canvas.profile().config().legend.border_size;
    if canvas.legend().is_some() && border > 0 {
        out.push(Violation::LegendBorder { size: border });
    }
    out
}

// Data are judged by their markers.
fn data_color(o: &PlotObject) -> Rgb8 {
    match o {
        PlotObject::Graph(g) => g.style.marker_color,
        other => other.styled().line_color(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ErrorGraph, Expr1D, Function1D, Styled};

    #[test]
    fn reports_missing_watermark_and_wrong_fit_color() {
        let mut c = Canvas::new("c", 800, 600).unwrap();
        let mut f = Function1D::new("fit", Expr1D::Polynomial(vec![1.0]), 0.0, 1.0).unwrap();
        f.set_line_color(Rgb8::BLUE);
        c.draw(f);
        let v = check(&c);
        assert!(v.contains(&Violation::MissingWatermark));
        assert!(v.iter().any(|x| matches!(x, Violation::FitNotRed { .. })));
    }

    #[test]
    fn black_data_with_watermark_is_clean() {
        let mut c = Canvas::new("c", 800, 600).unwrap();
        let g = ErrorGraph::new("g", &[0.1, 0.2], &[1.0, 2.0], None, Some(&[0.1, 0.1])).unwrap();
        c.draw(g);
        c.add_watermark(0.88, 0.65);
        assert!(check(&c).is_empty());
        assert_eq!(
            Violation::LegendBorder { size: 1 }.to_string(),
            "legend is drawn with a 1px border"
        );
    }
}
