//! Style profiles and the process-wide active style.
//!
//! A [`StyleConfig`] is a plain, serialisable record of every option. Building it
//! into a [`StyleProfile`] validates the values and is free of side effects;
//! [`install`] is the single call that makes a profile the default for every plot
//! object created afterwards. [`apply`] does both.
//!
//! ```
//! use snoplus_style::style::{self, StyleConfig};
//!
//! let profile = style::apply(&StyleConfig::publication())?;
//! assert_eq!(profile.name(), "snoplus");
//! # Ok::<(), snoplus_style::Error>(())
//! ```

use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::viz_style::{
    FontFace, LineDash, MarkerShape, Palette, Rgb8, SeriesRole, SeriesStyle, TextAlign,
    name_or_code,
};

/// Text used by the mandatory preliminary-result label.
pub const DEFAULT_WATERMARK: &str = "SNO+ Preliminary";

/// Which axis an attribute applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Per-axis text and tick options. Sizes and offsets are fractions of the pad
/// height; the title offset is a multiplier of the title size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisStyle {
    pub label_offset: f64,
    pub tick_length: f64,
    /// Minor intervals per major tick interval, drawn at half the tick length.
    /// 0 or 1 turns minor ticks off.
    #[serde(default = "default_minor_divisions")]
    pub minor_divisions: u32,
    pub title_offset: f64,
    #[serde(deserialize_with = "name_or_code")]
    pub label_font: FontFace,
    #[serde(deserialize_with = "name_or_code")]
    pub title_font: FontFace,
    pub label_size: f64,
    pub title_size: f64,
    pub title_color: Rgb8,
}

impl AxisStyle {
    fn publication() -> Self {
        AxisStyle {
            label_offset: 0.01,
            tick_length: 0.015,
            minor_divisions: 5,
            title_offset: 0.8,
            label_font: FontFace::TimesRoman,
            title_font: FontFace::TimesRoman,
            label_size: 0.05,
            title_size: 0.06,
            title_color: Rgb8::BLACK,
        }
    }
}

fn default_minor_divisions() -> u32 {
    5
}

/// Legend box appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegendStyle {
    /// Border width in pixels; 0 draws no box.
    pub border_size: u32,
    #[serde(deserialize_with = "name_or_code")]
    pub font: FontFace,
    pub fill: Rgb8,
}

/// Free-text (watermark) appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextConfig {
    #[serde(deserialize_with = "name_or_code")]
    pub font: FontFace,
    /// Fraction of the pad height.
    pub size: f64,
    #[serde(deserialize_with = "name_or_code")]
    pub align: TextAlign,
    pub color: Rgb8,
}

/// Default line colors per series role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleColors {
    pub fit: Rgb8,
    pub model: Rgb8,
    pub data: Rgb8,
    pub other: Rgb8,
}

/// Every recognised style option.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub name: String,
    pub title: String,

    /// Border modes: -1 sunken, 0 none, 1 raised.
    pub frame_border_mode: i8,
    pub canvas_border_mode: i8,
    pub pad_border_mode: i8,
    pub pad_border_size: u32,

    pub canvas_color: Rgb8,
    pub pad_color: Rgb8,
    pub title_fill: Rgb8,
    pub stat_fill: Rgb8,

    pub line_width: u32,
    pub hist_line_width: u32,
    /// On/off lengths in pixels used for [`LineDash::Dash`].
    pub dash_pattern: Vec<u32>,

    pub show_title: bool,
    pub show_stats: bool,
    pub show_fit: bool,

    pub x_axis: AxisStyle,
    pub y_axis: AxisStyle,
    pub z_axis: AxisStyle,
    /// Mirror tick marks on the top / right frame edges.
    pub pad_tick_x: bool,
    pub pad_tick_y: bool,

    /// Default pad margins (fractions of the canvas): left, right, bottom, top.
    pub margins: [f64; 4],

    pub legend: LegendStyle,
    #[serde(deserialize_with = "name_or_code")]
    pub marker: MarkerShape,
    pub marker_size: u32,
    pub palette: Palette,
    pub text: TextConfig,
    pub roles: RoleColors,
    pub watermark: String,
}

impl StyleConfig {
    /// Times-based style for publications.
    pub fn publication() -> Self {
        StyleConfig {
            name: "snoplus".into(),
            title: "SNO+ plots style for publications".into(),
            frame_border_mode: 0,
            canvas_border_mode: 0,
            pad_border_mode: 0,
            pad_border_size: 0,
            canvas_color: Rgb8::WHITE,
            pad_color: Rgb8::WHITE,
            title_fill: Rgb8::WHITE,
            stat_fill: Rgb8::WHITE,
            line_width: 2,
            hist_line_width: 2,
            dash_pattern: vec![12, 12],
            show_title: false,
            show_stats: false,
            show_fit: false,
            x_axis: AxisStyle::publication(),
            y_axis: AxisStyle::publication(),
            z_axis: AxisStyle::publication(),
            pad_tick_x: true,
            pad_tick_y: true,
            margins: [0.1, 0.1, 0.1, 0.1],
            legend: LegendStyle {
                border_size: 0,
                font: FontFace::TimesRoman,
                fill: Rgb8::WHITE,
            },
            marker: MarkerShape::Square,
            marker_size: 5,
            palette: Palette::InvertedDarkBodyRadiator,
            text: TextConfig {
                font: FontFace::TimesRoman,
                size: 0.06,
                align: TextAlign {
                    h: crate::viz_style::HAlign::Right,
                    v: crate::viz_style::VAlign::Center,
                },
                color: Rgb8::BLACK,
            },
            roles: RoleColors {
                fit: Rgb8::RED,
                model: Rgb8::BLUE,
                data: Rgb8::BLACK,
                other: Rgb8::new(0, 128, 0),
            },
            watermark: DEFAULT_WATERMARK.into(),
        }
    }

    /// Sans-serif variant for slides. Not for publications.
    pub fn slides() -> Self {
        let mut cfg = StyleConfig::publication();
        cfg.name = "snoplus-sans".into();
        cfg.title = "SNO+ plots style for slides".into();
        for axis in [&mut cfg.x_axis, &mut cfg.y_axis, &mut cfg.z_axis] {
            axis.label_font = FontFace::Helvetica;
            axis.title_font = FontFace::Helvetica;
            axis.label_size = 0.045;
            axis.title_size = 0.05;
        }
        cfg.legend.font = FontFace::Helvetica;
        cfg.text.font = FontFace::Helvetica;
        cfg.text.size = 0.05;
        cfg.palette = Palette::Viridis;
        cfg
    }

    pub fn axis(&self, axis: Axis) -> &AxisStyle {
        match axis {
            Axis::X => &self.x_axis,
            Axis::Y => &self.y_axis,
            Axis::Z => &self.z_axis,
        }
    }
}

impl StyleConfig {
    /// Parse a JSON style record. Fonts, markers and text alignment may be
    /// given by name or by ROOT code (`132`, `21`, `32`).
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config("config", e.to_string()))
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        StyleConfig::publication()
    }
}

/// A validated, immutable style.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleProfile {
    config: StyleConfig,
}

impl StyleProfile {
    /// Validate a configuration record. Pure: nothing is installed.
    pub fn build(config: &StyleConfig) -> Result<Self> {
        validate(config)?;
        Ok(StyleProfile {
            config: config.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &StyleConfig {
        &self.config
    }

    pub fn axis(&self, axis: Axis) -> &AxisStyle {
        self.config.axis(axis)
    }

    pub fn role_color(&self, role: SeriesRole) -> Rgb8 {
        let r = &self.config.roles;
        match role {
            SeriesRole::Fit => r.fit,
            SeriesRole::Model => r.model,
            SeriesRole::Data => r.data,
            SeriesRole::Other => r.other,
        }
    }

    /// Default look for a new series of the given role.
    pub fn series_style(&self, role: SeriesRole) -> SeriesStyle {
        let color = self.role_color(role);
        let line_width = match role {
            SeriesRole::Model => self.config.hist_line_width,
            _ => self.config.line_width,
        };
        SeriesStyle {
            role,
            line_color: color,
            line_width,
            line_dash: LineDash::Solid,
            marker: self.config.marker,
            marker_color: color,
            marker_size: self.config.marker_size,
            fill_color: None,
        }
    }

    pub fn watermark(&self) -> &str {
        &self.config.watermark
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        StyleProfile {
            config: StyleConfig::publication(),
        }
    }
}

fn check_fraction(option: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v <= 0.0 || v > 1.0 {
        return Err(Error::config(option, format!("{v} is not in (0, 1]")));
    }
    Ok(())
}

fn check_non_negative(option: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(Error::config(option, format!("{v} must be finite and >= 0")));
    }
    Ok(())
}

fn check_border_mode(option: &str, v: i8) -> Result<()> {
    if !(-1..=1).contains(&v) {
        return Err(Error::config(option, format!("{v} is not one of -1, 0, 1")));
    }
    Ok(())
}

fn validate(cfg: &StyleConfig) -> Result<()> {
    if cfg.name.trim().is_empty() {
        return Err(Error::config("name", "must not be empty"));
    }
    check_border_mode("frame_border_mode", cfg.frame_border_mode)?;
    check_border_mode("canvas_border_mode", cfg.canvas_border_mode)?;
    check_border_mode("pad_border_mode", cfg.pad_border_mode)?;

    if cfg.line_width == 0 || cfg.line_width > 10 {
        return Err(Error::config("line_width", "must be within 1..=10"));
    }
    if cfg.hist_line_width == 0 || cfg.hist_line_width > 10 {
        return Err(Error::config("hist_line_width", "must be within 1..=10"));
    }
    if cfg.dash_pattern.is_empty() || cfg.dash_pattern.contains(&0) {
        return Err(Error::config(
            "dash_pattern",
            "needs at least one segment and no zero lengths",
        ));
    }

    for (name, axis) in [("x", &cfg.x_axis), ("y", &cfg.y_axis), ("z", &cfg.z_axis)] {
        check_fraction(&format!("{name}_axis.label_size"), axis.label_size)?;
        check_fraction(&format!("{name}_axis.title_size"), axis.title_size)?;
        check_non_negative(&format!("{name}_axis.label_offset"), axis.label_offset)?;
        check_non_negative(&format!("{name}_axis.tick_length"), axis.tick_length)?;
        check_non_negative(&format!("{name}_axis.title_offset"), axis.title_offset)?;
        if axis.minor_divisions > 20 {
            return Err(Error::config(
                &format!("{name}_axis.minor_divisions"),
                "must be at most 20",
            ));
        }
    }

    for (i, m) in cfg.margins.iter().enumerate() {
        check_non_negative(&format!("margins[{i}]"), *m)?;
    }
    if cfg.margins[0] + cfg.margins[1] >= 1.0 || cfg.margins[2] + cfg.margins[3] >= 1.0 {
        return Err(Error::config("margins", "opposite margins leave no room to draw"));
    }

    if cfg.marker_size == 0 {
        return Err(Error::config("marker_size", "must be positive"));
    }
    check_fraction("text.size", cfg.text.size)?;
    if cfg.watermark.trim().is_empty() {
        return Err(Error::config("watermark", "must not be empty"));
    }
    Ok(())
}

// ------------------------ Active style ------------------------

static ACTIVE: RwLock<Option<Arc<StyleProfile>>> = RwLock::new(None);

/// Make `profile` the default for every plot object and canvas created afterwards.
pub fn install(profile: StyleProfile) -> Arc<StyleProfile> {
    let profile = Arc::new(profile);
    let mut slot = ACTIVE.write().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(profile.clone());
    log::debug!("installed style profile `{}`", profile.name());
    profile
}

/// Build and install in one step. Nothing is installed when validation fails.
pub fn apply(config: &StyleConfig) -> Result<Arc<StyleProfile>> {
    let profile = StyleProfile::build(config)?;
    Ok(install(profile))
}

/// Parse, build and install a JSON style record. Nothing is installed on error.
pub fn apply_json(json: &str) -> Result<Arc<StyleProfile>> {
    apply(&StyleConfig::from_json(json)?)
}

/// The installed profile, or the publication profile when none was installed.
pub fn active() -> Arc<StyleProfile> {
    let slot = ACTIVE.read().unwrap_or_else(PoisonError::into_inner);
    match slot.as_ref() {
        Some(p) => p.clone(),
        None => Arc::new(StyleProfile::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        StyleProfile::build(&StyleConfig::publication()).unwrap();
        StyleProfile::build(&StyleConfig::slides()).unwrap();
    }

    #[test]
    fn series_defaults_follow_roles() {
        let p = StyleProfile::default();
        assert_eq!(p.series_style(SeriesRole::Fit).line_color, Rgb8::RED);
        assert_eq!(p.series_style(SeriesRole::Model).line_color, Rgb8::BLUE);
        let data = p.series_style(SeriesRole::Data);
        assert_eq!(data.marker_color, Rgb8::BLACK);
        assert_eq!(data.marker, MarkerShape::Square);
        assert!(data.fill_color.is_none());
    }

    #[test]
    fn bad_values_are_config_errors() {
        let mut cfg = StyleConfig::publication();
        cfg.y_axis.label_size = 0.0;
        let err = StyleProfile::build(&cfg).unwrap_err();
        assert!(matches!(err, Error::Config { ref option, .. } if option == "y_axis.label_size"));

        let mut cfg = StyleConfig::publication();
        cfg.margins = [0.6, 0.5, 0.1, 0.1];
        assert!(StyleProfile::build(&cfg).is_err());

        let mut cfg = StyleConfig::publication();
        cfg.pad_border_mode = 3;
        assert!(StyleProfile::build(&cfg).is_err());

        let mut cfg = StyleConfig::publication();
        cfg.x_axis.minor_divisions = 25;
        let err = StyleProfile::build(&cfg).unwrap_err();
        assert!(matches!(err, Error::Config { ref option, .. } if option == "x_axis.minor_divisions"));
    }

    #[test]
    fn json_accepts_names_or_root_codes() {
        let mut v = serde_json::to_value(StyleConfig::publication()).unwrap();
        v["marker"] = serde_json::json!(21);
        v["legend"]["font"] = serde_json::json!(132);
        v["text"]["align"] = serde_json::json!(32);
        v["x_axis"].as_object_mut().unwrap().remove("minor_divisions");
        let cfg = StyleConfig::from_json(&v.to_string()).unwrap();
        assert_eq!(cfg, StyleConfig::publication());

        v["text"]["align"] = serde_json::json!(40);
        let err = StyleConfig::from_json(&v.to_string()).unwrap_err();
        assert!(matches!(err, Error::Config { ref reason, .. } if reason.contains("invalid code 40")));
    }
}
