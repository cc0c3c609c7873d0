//! snoplus_style
//!
//! A plotting style for SNO+ figures, plus the two reference figures that show it.
//! Pairs with the `snoplus-style` CLI.
//!
//! ### Features
//! - Build a validated style profile from a serialisable config and install it once
//! - Plot objects (curves, histograms, graphs with errors, 2-D histograms) inherit it
//! - Legends reference objects through typed handles
//! - Render canvases to PDF or SVG, no system fonts required
//! - Optional convention check: fits red, simulation blue, data black, watermark present
//!
//! ### Example
//! ```no_run
//! use snoplus_style::{Canvas, Legend, LegendGlyph, StyleConfig};
//! use snoplus_style::models::{Expr1D, Function1D};
//!
//! snoplus_style::style::apply(&StyleConfig::publication())?;
//! let mut c = Canvas::new("c1", 800, 600)?;
//! let f = Function1D::new(
//!     "f",
//!     Expr1D::Gaussian { amplitude: 1.0, mean: 0.0, sigma: 0.5 },
//!     0.0,
//!     1.0,
//! )?;
//! let id = c.draw(f);
//! c.add_legend(Legend::new(0.7, 0.7, 0.89, 0.89).entry(id, "Gaussian Fit", LegendGlyph::Line))?;
//! c.add_watermark(0.88, 0.65);
//! c.save("fit.pdf")?;
//! # Ok::<(), snoplus_style::Error>(())
//! ```

pub mod canvas;
pub mod conventions;
pub mod demo;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
pub mod style;
pub mod viz;
pub mod viz_plotters_adapter;
pub mod viz_style;

pub use canvas::{Canvas, Legend, LegendGlyph, PlotId, TextLabel};
pub use demo::{DemoOptions, DemoReport};
pub use error::{Error, Result};
pub use style::{StyleConfig, StyleProfile};
pub use viz::OutputFormat;
