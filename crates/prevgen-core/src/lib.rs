//! # prevgen - Palette preview generator
//!
//! Colors in several spaces, laid out as a grid of labelled swatches,
//! rendered to PNG or SVG with enough metadata embedded to recover the
//! original palette from the file later.
//!
//! ## Pieces
//!
//! - [`Color`]: sRGB plus alpha, convertible to HSV, HLS, YIQ, OKLab and
//!   OKLCH; OKLCH input is gamut-mapped by chroma reduction
//! - [`Palette`]: grid layout and the visible-tile iterator
//! - [`render`]: reference PNG and SVG renderers
//! - [`recover`]: settings and colors back out of a rendered artifact
//! - [`Settings`]: cell geometry, label placement, fonts
//!
//! ## Quick Start
//!
//! ```no_run
//! use prevgen_core::{Color, Palette, Settings, Space};
//! use prevgen_core::render::{RasterRenderer, Renderer};
//!
//! let colors = vec![
//!     Color::from_hex("#52c7a7").unwrap().with_name("mint"),
//!     Color::from_space_values(Space::Oklch, &[0.7, 0.3, 0.1]).unwrap(),
//!     Color::parse("crimson").unwrap(),
//! ];
//! let palette = Palette::from_list(colors, Settings::default());
//! let png = RasterRenderer.render(&palette).unwrap();
//!
//! let recovered = prevgen_core::recover(&png).unwrap();
//! assert_eq!(recovered.rows[0][0].name(), Some("mint"));
//! ```

pub mod artifact;
pub mod color;
pub mod error;
pub mod filters;
pub mod image;
pub mod layout;
pub mod math;
pub mod recover;
pub mod render;
pub mod settings;

pub use artifact::ArtifactKind;
pub use color::{Color, Oklab, Oklch, Rgb, Space, TextMeta, bar_color, gamut_map, text_color};
pub use error::{Error, Result};
pub use image::RgbaImage;
pub use layout::{Distance, Palette, Tile, Tiles};
pub use recover::{Recovered, Recovery, recover, recover_file};
pub use render::Renderer;
pub use settings::Settings;

/// Version of prevgen
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
