//! Adapter helpers to draw [`SeriesStyle`] and style fonts with the plotters crate.
//!
//! Series are drawn in backend pixels on the root area, after mapping data
//! coordinates through the axis frame:
//! ```ignore
//!     use crate::viz_plotters_adapter::{draw_marker, rgb_color};
//!
//!     let px = frame.map(x, y);
//!     root.draw(&PathElement::new(vec![frame.map(x, y - ey), frame.map(x, y + ey)],
//!         rgb_color(style.line_color).stroke_width(1)))
//!         .map_err(render_err)?;
//!     draw_marker(&root, px, &style)?;
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use crate::error::{Error, Result};
use crate::viz_style::{FontFace, MarkerShape, Rgb8, SeriesStyle};

pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Text style for a font face at `px` pixels.
pub fn text_style(face: FontFace, px: f64, color: Rgb8) -> TextStyle<'static> {
    FontDesc::new(FontFamily::Name(face.family_name()), px, face.font_style())
        .color(&rgb_color(color))
}

pub(crate) fn render_err<E: std::fmt::Debug>(e: E) -> Error {
    Error::Render(format!("{e:?}"))
}

/// Draw the series' marker centred on backend pixel `c`.
pub fn draw_marker<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    c: (i32, i32),
    style: &SeriesStyle,
) -> Result<()> {
    let s = style.marker_size as i32;
    let color = rgb_color(style.marker_color);
    let solid = color.filled();
    let outline = color.stroke_width(1);
    let bar = color.stroke_width(2);
    match style.marker {
        MarkerShape::Circle => area.draw(&Circle::new(c, s, solid)),
        MarkerShape::OpenCircle => area.draw(&Circle::new(c, s, outline)),
        MarkerShape::Square => area.draw(&Rectangle::new(
            [(c.0 - s, c.1 - s), (c.0 + s, c.1 + s)],
            solid,
        )),
        MarkerShape::OpenSquare => area.draw(&Rectangle::new(
            [(c.0 - s, c.1 - s), (c.0 + s, c.1 + s)],
            outline,
        )),
        MarkerShape::Triangle => area.draw(&Polygon::new(
            vec![(c.0, c.1 - s), (c.0 - s, c.1 + s), (c.0 + s, c.1 + s)],
            solid,
        )),
        MarkerShape::Diamond => area.draw(&Polygon::new(
            vec![(c.0, c.1 - s), (c.0 - s, c.1), (c.0, c.1 + s), (c.0 + s, c.1)],
            solid,
        )),
        MarkerShape::Cross => area
            .draw(&PathElement::new(vec![(c.0 - s, c.1), (c.0 + s, c.1)], bar))
            .and_then(|_| area.draw(&PathElement::new(vec![(c.0, c.1 - s), (c.0, c.1 + s)], bar))),
        MarkerShape::X => area
            .draw(&PathElement::new(
                vec![(c.0 - s, c.1 - s), (c.0 + s, c.1 + s)],
                bar,
            ))
            .and_then(|_| {
                area.draw(&PathElement::new(
                    vec![(c.0 - s, c.1 + s), (c.0 + s, c.1 - s)],
                    bar,
                ))
            }),
    }
    .map_err(render_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleProfile;
    use crate::viz::PdfBackend;
    use crate::viz_style::SeriesRole;

    #[test]
    fn colors_and_errors_convert() {
        let s = StyleProfile::default().series_style(SeriesRole::Fit);
        assert_eq!(rgb_color(s.line_color), RGBColor(255, 0, 0));
        let e = render_err("backend gone");
        assert_eq!(e.to_string(), "render error: \"backend gone\"");
    }

    #[test]
    fn every_marker_shape_draws() {
        let mut buf = Vec::new();
        let root = PdfBackend::new(&mut buf, (100, 100)).into_drawing_area();
        let mut s = StyleProfile::default().series_style(SeriesRole::Data);
        for shape in [
            MarkerShape::Circle,
            MarkerShape::Square,
            MarkerShape::Triangle,
            MarkerShape::Diamond,
            MarkerShape::Cross,
            MarkerShape::X,
            MarkerShape::OpenCircle,
            MarkerShape::OpenSquare,
        ] {
            s.marker = shape;
            draw_marker(&root, (50, 50), &s).unwrap();
        }
    }
}
