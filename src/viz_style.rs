//! Visual encoding primitives: colors, markers, dashes, fonts, text alignment and palettes.
//!
//! Most types accept the legacy numeric codes used by ROOT macros (`132` for Times,
//! `21` for a filled square, `32` for right/center alignment) so existing style
//! recipes translate one to one.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    pub const RED: Rgb8 = Rgb8::new(255, 0, 0);
    pub const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb8 { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, `t` in 0..=1.
    pub fn lerp(self, other: Rgb8, t: f64) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// Marker shapes for point series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
    Diamond,
    Cross,
    X,
    OpenCircle,
    OpenSquare,
}

impl MarkerShape {
    /// Map a ROOT marker style code.
    pub fn from_root_code(code: u16) -> Result<Self> {
        Ok(match code {
            2 => MarkerShape::Cross,
            5 => MarkerShape::X,
            8 | 20 => MarkerShape::Circle,
            21 => MarkerShape::Square,
            22 => MarkerShape::Triangle,
            24 => MarkerShape::OpenCircle,
            25 => MarkerShape::OpenSquare,
            33 => MarkerShape::Diamond,
            other => {
                return Err(Error::config(
                    "marker",
                    format!("unsupported marker code {other}"),
                ));
            }
        })
    }
}

/// Stroke dash styles. `Dash` uses the profile's configured dash pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dash,
    Dot,
    DashDot,
}

/// Font faces available to every backend without embedding (PDF standard fonts).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFace {
    TimesRoman,
    TimesItalic,
    TimesBold,
    Helvetica,
    HelveticaItalic,
    HelveticaBold,
    Courier,
}

impl FontFace {
    /// Map a ROOT font code (`10 * font_number + precision`), e.g. 132 or 42.
    pub fn from_root_code(code: u16) -> Result<Self> {
        let precision = code % 10;
        if precision > 3 {
            return Err(Error::config(
                "font",
                format!("font code {code} has invalid precision {precision}"),
            ));
        }
        Ok(match code / 10 {
            1 => FontFace::TimesItalic,
            2 => FontFace::TimesBold,
            4 => FontFace::Helvetica,
            5 => FontFace::HelveticaItalic,
            6 => FontFace::HelveticaBold,
            8 => FontFace::Courier,
            13 => FontFace::TimesRoman,
            n => {
                return Err(Error::config(
                    "font",
                    format!("font number {n} (code {code}) is not supported"),
                ));
            }
        })
    }

    /// Family name handed to plotters and written into SVG output.
    pub fn family_name(&self) -> &'static str {
        match self {
            FontFace::TimesRoman | FontFace::TimesItalic | FontFace::TimesBold => "Times New Roman",
            FontFace::Helvetica | FontFace::HelveticaItalic | FontFace::HelveticaBold => {
                "Helvetica"
            }
            FontFace::Courier => "Courier New",
        }
    }

    pub fn font_style(&self) -> plotters::style::FontStyle {
        use plotters::style::FontStyle;
        match self {
            FontFace::TimesItalic | FontFace::HelveticaItalic => FontStyle::Italic,
            FontFace::TimesBold | FontFace::HelveticaBold => FontStyle::Bold,
            _ => FontStyle::Normal,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VAlign {
    Bottom,
    Center,
    Top,
}

/// Anchor of a text label relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAlign {
    pub h: HAlign,
    pub v: VAlign,
}

impl TextAlign {
    /// Decode a two-digit ROOT alignment code: tens = horizontal, units = vertical.
    pub fn from_root_code(code: u16) -> Result<Self> {
        let h = match code / 10 {
            1 => HAlign::Left,
            2 => HAlign::Center,
            3 => HAlign::Right,
            _ => return Err(Error::config("text_align", format!("invalid code {code}"))),
        };
        let v = match code % 10 {
            1 => VAlign::Bottom,
            2 => VAlign::Center,
            3 => VAlign::Top,
            _ => return Err(Error::config("text_align", format!("invalid code {code}"))),
        };
        Ok(TextAlign { h, v })
    }
}

/// Types that also have a legacy ROOT numeric code.
pub trait RootCode: Sized {
    fn from_root_code(code: u16) -> Result<Self>;
}

impl RootCode for FontFace {
    fn from_root_code(code: u16) -> Result<Self> {
        FontFace::from_root_code(code)
    }
}

impl RootCode for MarkerShape {
    fn from_root_code(code: u16) -> Result<Self> {
        MarkerShape::from_root_code(code)
    }
}

impl RootCode for TextAlign {
    fn from_root_code(code: u16) -> Result<Self> {
        TextAlign::from_root_code(code)
    }
}

/// Serde `deserialize_with` helper: accepts the named form or the ROOT code.
pub fn name_or_code<'de, D, T>(de: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: RootCode + Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Code(u16),
        Named(T),
    }
    match Raw::<T>::deserialize(de)? {
        Raw::Code(code) => T::from_root_code(code).map_err(serde::de::Error::custom),
        Raw::Named(v) => Ok(v),
    }
}

/// What a series represents; drives the default color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    /// Fit function not based on simulation.
    Fit,
    /// Simulation / model prediction.
    Model,
    /// Measured data.
    Data,
    Other,
}

/// Color palettes for 2-D color maps. All but `Rainbow` are colorblind friendly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    DarkBodyRadiator,
    InvertedDarkBodyRadiator,
    Viridis,
    Cividis,
    Rainbow,
}

const DARK_BODY_RADIATOR: [(u8, u8, u8); 9] = [
    (0, 0, 0),
    (45, 0, 1),
    (99, 0, 1),
    (156, 45, 3),
    (212, 101, 9),
    (230, 168, 8),
    (237, 238, 11),
    (234, 238, 95),
    (242, 243, 230),
];

const VIRIDIS: [(u8, u8, u8); 9] = [
    (26, 9, 30),
    (51, 24, 96),
    (43, 55, 112),
    (33, 87, 114),
    (28, 118, 112),
    (35, 150, 101),
    (74, 180, 72),
    (144, 200, 35),
    (246, 222, 0),
];

const CIVIDIS: [(u8, u8, u8); 9] = [
    (0, 32, 77),
    (5, 54, 110),
    (65, 77, 107),
    (97, 100, 111),
    (124, 123, 120),
    (156, 148, 119),
    (189, 175, 111),
    (224, 203, 94),
    (255, 234, 70),
];

const RAINBOW: [(u8, u8, u8); 5] = [
    (0, 0, 255),
    (0, 255, 255),
    (0, 255, 0),
    (255, 255, 0),
    (255, 0, 0),
];

impl Palette {
    /// Equally spaced color stops, low to high.
    pub fn stops(&self) -> Vec<Rgb8> {
        let raw: &[(u8, u8, u8)] = match self {
            Palette::DarkBodyRadiator | Palette::InvertedDarkBodyRadiator => &DARK_BODY_RADIATOR,
            Palette::Viridis => &VIRIDIS,
            Palette::Cividis => &CIVIDIS,
            Palette::Rainbow => &RAINBOW,
        };
        let mut out: Vec<Rgb8> = raw.iter().map(|&(r, g, b)| Rgb8::new(r, g, b)).collect();
        if matches!(self, Palette::InvertedDarkBodyRadiator) {
            out.reverse();
        }
        out
    }

    /// Color at fraction `t` (clamped to 0..=1) of the scale.
    pub fn color_at(&self, t: f64) -> Rgb8 {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let segments = (stops.len() - 1) as f64;
        let pos = t * segments;
        let i = (pos.floor() as usize).min(stops.len() - 2);
        stops[i].lerp(stops[i + 1], pos - i as f64)
    }
}

/// Resolved look of one series.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesStyle {
    pub role: SeriesRole,
    pub line_color: Rgb8,
    pub line_width: u32,
    pub line_dash: LineDash,
    pub marker: MarkerShape,
    pub marker_color: Rgb8,
    pub marker_size: u32,
    /// `None` means hollow (no fill under the series).
    pub fill_color: Option<Rgb8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_codes_decode() {
        assert_eq!(FontFace::from_root_code(132).unwrap(), FontFace::TimesRoman);
        assert_eq!(FontFace::from_root_code(42).unwrap(), FontFace::Helvetica);
        assert!(FontFace::from_root_code(137).is_err());
        assert!(FontFace::from_root_code(992).is_err());

        assert_eq!(MarkerShape::from_root_code(21).unwrap(), MarkerShape::Square);
        assert!(MarkerShape::from_root_code(99).is_err());

        let a = TextAlign::from_root_code(32).unwrap();
        assert_eq!((a.h, a.v), (HAlign::Right, VAlign::Center));
        assert!(TextAlign::from_root_code(40).is_err());
        assert!(TextAlign::from_root_code(10).is_err());
    }

    #[test]
    fn inverted_palette_runs_light_to_dark() {
        let p = Palette::InvertedDarkBodyRadiator;
        assert_eq!(p.color_at(0.0), Rgb8::new(242, 243, 230));
        assert_eq!(p.color_at(1.0), Rgb8::BLACK);
        // midpoint lands on the middle stop
        assert_eq!(p.color_at(0.5), Rgb8::new(212, 101, 9));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(Rgb8::RED.hex(), "#FF0000");
        assert_eq!(Rgb8::new(1, 2, 255).hex(), "#0102FF");
    }
}
