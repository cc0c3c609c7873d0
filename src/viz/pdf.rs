//! A plotters [`DrawingBackend`] that produces a single-page PDF.
//!
//! Pixels map one to one onto PDF points. Text uses the standard Type 1 fonts
//! (Times, Helvetica, Courier, Symbol), so nothing is embedded and no font files
//! are read. Greek letters switch to the Symbol font and scripts use text rise.

use std::convert::Infallible;

use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use plotters_backend::text_anchor::{HPos, VPos};
use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
    FontStyle, FontTransform,
};

use super::text::{SCRIPT_SCALE, Script, estimate_markup_width_px, parse_markup};

/// Ratio between plotters' nominal text size and the rendered font size
/// (the SVG backend uses the same factor).
const FONT_SCALE: f32 = 1.24;

/// Bezier control distance for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum StdFont {
    TimesRoman,
    TimesBold,
    TimesItalic,
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
    Symbol,
}

const ALL_FONTS: [StdFont; 8] = [
    StdFont::TimesRoman,
    StdFont::TimesBold,
    StdFont::TimesItalic,
    StdFont::Helvetica,
    StdFont::HelveticaBold,
    StdFont::HelveticaOblique,
    StdFont::Courier,
    StdFont::Symbol,
];

impl StdFont {
    fn resource_name(self) -> Name<'static> {
        match self {
            StdFont::TimesRoman => Name(b"F1"),
            StdFont::TimesBold => Name(b"F2"),
            StdFont::TimesItalic => Name(b"F3"),
            StdFont::Helvetica => Name(b"F4"),
            StdFont::HelveticaBold => Name(b"F5"),
            StdFont::HelveticaOblique => Name(b"F6"),
            StdFont::Courier => Name(b"F7"),
            StdFont::Symbol => Name(b"F8"),
        }
    }

    fn base_font(self) -> Name<'static> {
        match self {
            StdFont::TimesRoman => Name(b"Times-Roman"),
            StdFont::TimesBold => Name(b"Times-Bold"),
            StdFont::TimesItalic => Name(b"Times-Italic"),
            StdFont::Helvetica => Name(b"Helvetica"),
            StdFont::HelveticaBold => Name(b"Helvetica-Bold"),
            StdFont::HelveticaOblique => Name(b"Helvetica-Oblique"),
            StdFont::Courier => Name(b"Courier"),
            StdFont::Symbol => Name(b"Symbol"),
        }
    }

    /// Pick a standard font for a plotters family name and style.
    fn resolve(family: &str, style: FontStyle) -> StdFont {
        let f = family.to_ascii_lowercase();
        let bold = matches!(style, FontStyle::Bold);
        let italic = matches!(style, FontStyle::Italic | FontStyle::Oblique);
        if f.contains("courier") || f.contains("mono") {
            StdFont::Courier
        } else if f.contains("times") || f == "serif" {
            if bold {
                StdFont::TimesBold
            } else if italic {
                StdFont::TimesItalic
            } else {
                StdFont::TimesRoman
            }
        } else if bold {
            StdFont::HelveticaBold
        } else if italic {
            StdFont::HelveticaOblique
        } else {
            StdFont::Helvetica
        }
    }
}

/// Map a Greek letter to its position in the Symbol font encoding.
fn symbol_byte(c: char) -> Option<u8> {
    const LOWER: &[u8; 25] = b"abgdezhqiklmnxoprVstufcyw";
    const UPPER: &[u8; 25] = b"ABGDEZHQIKLMNXOPRVSTUFCYW";
    let code = c as u32;
    match code {
        0x03B1..=0x03C9 => LOWER.get((code - 0x03B1) as usize).copied(),
        0x0391..=0x03A9 => UPPER.get((code - 0x0391) as usize).copied(),
        _ => None,
    }
}

/// Split a run into (font, bytes) pieces; characters outside Latin-1 become `?`.
fn encode_segments(text: &str, base: StdFont) -> Vec<(StdFont, Vec<u8>)> {
    let mut out: Vec<(StdFont, Vec<u8>)> = Vec::new();
    for ch in text.chars() {
        let (font, byte) = match symbol_byte(ch) {
            Some(b) => (StdFont::Symbol, b),
            None => {
                let code = ch as u32;
                let byte = if code < 0x80 || (0xA0..=0xFF).contains(&code) {
                    code as u8
                } else {
                    b'?'
                };
                (base, byte)
            }
        };
        match out.last_mut() {
            Some((f, bytes)) if *f == font => bytes.push(byte),
            _ => out.push((font, vec![byte])),
        }
    }
    out
}

fn component(v: u8, alpha: f64) -> f32 {
    // Blend onto white; PDF transparency would need an ExtGState per alpha.
    let a = alpha.clamp(0.0, 1.0) as f32;
    (v as f32 / 255.0) * a + (1.0 - a)
}

fn rgb(color: &BackendColor) -> (f32, f32, f32) {
    (
        component(color.rgb.0, color.alpha),
        component(color.rgb.1, color.alpha),
        component(color.rgb.2, color.alpha),
    )
}

/// Drawing backend that serialises into `target` when presented.
pub struct PdfBackend<'a> {
    target: &'a mut Vec<u8>,
    size: (u32, u32),
    content: Content,
    title: Option<String>,
    saved: bool,
}

impl<'a> PdfBackend<'a> {
    pub fn new(target: &'a mut Vec<u8>, size: (u32, u32)) -> Self {
        PdfBackend {
            target,
            size,
            content: Content::new(),
            title: None,
            saved: false,
        }
    }

    /// Document title recorded in the PDF info dictionary.
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Flip plotters' top-left origin to PDF's bottom-left origin.
    fn pt(&self, (x, y): BackendCoord) -> (f32, f32) {
        (x as f32, self.size.1 as f32 - y as f32)
    }

    fn set_stroke(&mut self, color: &BackendColor, width: u32) {
        let (r, g, b) = rgb(color);
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(width.max(1) as f32);
    }

    fn set_fill(&mut self, color: &BackendColor) {
        let (r, g, b) = rgb(color);
        self.content.set_fill_rgb(r, g, b);
    }

    fn circle_path(&mut self, center: BackendCoord, radius: u32) {
        let (cx, cy) = self.pt(center);
        let r = radius as f32;
        let k = r * KAPPA;
        let c = &mut self.content;
        c.move_to(cx + r, cy);
        c.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
        c.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
        c.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
        c.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
        c.close_path();
    }

    fn write_document(&mut self) {
        let catalog_id = Ref::new(1);
        let page_tree_id = Ref::new(2);
        let page_id = Ref::new(3);
        let content_id = Ref::new(4);
        let info_id = Ref::new(5);
        let font_base = 6;

        let (w, h) = (self.size.0 as f32, self.size.1 as f32);
        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id).kids([page_id]).count(1);

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, w, h));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            let mut fonts = resources.fonts();
            for (i, font) in ALL_FONTS.iter().enumerate() {
                fonts.pair(font.resource_name(), Ref::new(font_base + i as i32));
            }
        }
        page.finish();

        for (i, font) in ALL_FONTS.iter().enumerate() {
            let id = Ref::new(font_base + i as i32);
            if *font == StdFont::Symbol {
                pdf.type1_font(id).base_font(font.base_font());
            } else {
                pdf.type1_font(id)
                    .base_font(font.base_font())
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
        }

        {
            let mut info = pdf.document_info(info_id);
            info.producer(TextStr(concat!("snoplus-style ", env!("CARGO_PKG_VERSION"))));
            if let Some(title) = self.title.as_deref() {
                info.title(TextStr(title));
            }
        }

        let content = std::mem::replace(&mut self.content, Content::new());
        let data = content.finish();
        pdf.stream(content_id, &data);

        *self.target = pdf.finish();
    }
}

impl DrawingBackend for PdfBackend<'_> {
    type ErrorType = Infallible;

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        Ok(())
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Infallible>> {
        if !self.saved {
            self.write_document();
            self.saved = true;
        }
        Ok(())
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        if color.alpha == 0.0 {
            return Ok(());
        }
        self.set_fill(&color);
        let (x, y) = self.pt(point);
        self.content.rect(x, y - 1.0, 1.0, 1.0);
        self.content.fill_nonzero();
        Ok(())
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 {
            return Ok(());
        }
        self.set_stroke(&color, style.stroke_width());
        let (x0, y0) = self.pt(from);
        let (x1, y1) = self.pt(to);
        self.content.move_to(x0, y0);
        self.content.line_to(x1, y1);
        self.content.stroke();
        Ok(())
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 {
            return Ok(());
        }
        let (x0, y0) = self.pt(upper_left);
        let (x1, y1) = self.pt(bottom_right);
        let (x, y) = (x0.min(x1), y0.min(y1));
        let (w, h) = ((x1 - x0).abs(), (y1 - y0).abs());
        if fill {
            self.set_fill(&color);
            // Filled rects cover the far edge pixel too, like the raster backends.
            self.content.rect(x, y - 1.0, w + 1.0, h + 1.0);
            self.content.fill_nonzero();
        } else {
            self.set_stroke(&color, style.stroke_width());
            self.content.rect(x, y, w, h);
            self.content.stroke();
        }
        Ok(())
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 {
            return Ok(());
        }
        let points: Vec<(f32, f32)> = path.into_iter().map(|p| self.pt(p)).collect();
        if points.len() < 2 {
            return Ok(());
        }
        self.set_stroke(&color, style.stroke_width());
        self.content.move_to(points[0].0, points[0].1);
        for (x, y) in &points[1..] {
            self.content.line_to(*x, *y);
        }
        self.content.stroke();
        Ok(())
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 {
            return Ok(());
        }
        if fill {
            self.set_fill(&color);
            self.circle_path(center, radius);
            self.content.fill_nonzero();
        } else {
            self.set_stroke(&color, style.stroke_width());
            self.circle_path(center, radius);
            self.content.stroke();
        }
        Ok(())
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 {
            return Ok(());
        }
        let points: Vec<(f32, f32)> = vert.into_iter().map(|p| self.pt(p)).collect();
        if points.len() < 3 {
            return Ok(());
        }
        self.set_fill(&color);
        self.content.move_to(points[0].0, points[0].1);
        for (x, y) in &points[1..] {
            self.content.line_to(*x, *y);
        }
        self.content.close_path();
        self.content.fill_nonzero();
        Ok(())
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Infallible>> {
        let color = style.color();
        if color.alpha == 0.0 || text.is_empty() {
            return Ok(());
        }
        let font_px = style.size();
        let font_size = font_px as f32 / FONT_SCALE;
        let width = estimate_markup_width_px(text, font_px.round() as u32) as f32;

        // Offsets in the text's own frame: along the baseline, then upwards.
        let dx = match style.anchor().h_pos {
            HPos::Left => 0.0,
            HPos::Center => -width / 2.0,
            HPos::Right => -width,
        };
        let dy = match style.anchor().v_pos {
            VPos::Top => -0.76 * font_size,
            VPos::Center => -0.33 * font_size,
            VPos::Bottom => 0.22 * font_size,
        };
        // (cos, sin) of the baseline direction in PDF space.
        let (cos, sin) = match style.transform() {
            FontTransform::None => (1.0, 0.0),
            FontTransform::Rotate90 => (0.0, -1.0),
            FontTransform::Rotate180 => (-1.0, 0.0),
            FontTransform::Rotate270 => (0.0, 1.0),
        };
        let (x, y) = self.pt(pos);
        let ox = x + dx * cos - dy * sin;
        let oy = y + dx * sin + dy * cos;

        let base = StdFont::resolve(style.family().as_str(), style.style());
        let (r, g, b) = rgb(&color);

        let c = &mut self.content;
        c.save_state();
        c.set_fill_rgb(r, g, b);
        c.begin_text();
        c.set_text_matrix([cos, sin, -sin, cos, ox, oy]);
        for run in parse_markup(text) {
            let (size, rise) = match run.script {
                Script::Normal => (font_size, 0.0),
                Script::Super => (font_size * SCRIPT_SCALE, 0.4 * font_size),
                Script::Sub => (font_size * SCRIPT_SCALE, -0.2 * font_size),
            };
            c.set_rise(rise);
            for (font, bytes) in encode_segments(&run.text, base) {
                c.set_font(font.resource_name(), size);
                c.show(Str(&bytes));
            }
        }
        c.end_text();
        c.restore_state();
        Ok(())
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Infallible>> {
        let font_px = style.size().round().max(1.0) as u32;
        Ok((estimate_markup_width_px(text, font_px), font_px))
    }
}

impl Drop for PdfBackend<'_> {
    fn drop(&mut self) {
        if !self.saved {
            // drop should not panic, so we ignore a failed present
            let _ = self.present();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::prelude::*;

    #[test]
    fn greek_maps_to_symbol_font() {
        assert_eq!(symbol_byte('β'), Some(b'b'));
        assert_eq!(symbol_byte('Ω'), Some(b'W'));
        assert_eq!(symbol_byte('b'), None);
        let segs = encode_segments("β14", StdFont::TimesRoman);
        assert_eq!(
            segs,
            vec![
                (StdFont::Symbol, b"b".to_vec()),
                (StdFont::TimesRoman, b"14".to_vec())
            ]
        );
    }

    #[test]
    fn font_resolution() {
        assert_eq!(
            StdFont::resolve("Times New Roman", FontStyle::Normal),
            StdFont::TimesRoman
        );
        assert_eq!(
            StdFont::resolve("sans-serif", FontStyle::Bold),
            StdFont::HelveticaBold
        );
        assert_eq!(
            StdFont::resolve("Courier New", FontStyle::Normal),
            StdFont::Courier
        );
    }

    #[test]
    fn renders_a_page() {
        let mut buf = Vec::new();
        {
            let root = PdfBackend::new(&mut buf, (200, 100))
                .with_title("unit")
                .into_drawing_area();
            root.fill(&WHITE).unwrap();
            root.draw(&Circle::new((50, 50), 10, RED.filled())).unwrap();
            root.draw(&Text::new(
                "hello #alpha",
                (10, 10),
                ("Times New Roman", 20).into_font(),
            ))
            .unwrap();
            root.present().unwrap();
        }
        assert!(buf.starts_with(b"%PDF-"));
        let body = String::from_utf8_lossy(&buf);
        assert!(body.contains("Times-Roman"));
        assert!(body.contains("(hello )"));
        assert!(body.contains("/MediaBox"));
    }
}
