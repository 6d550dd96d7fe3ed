//! Color model
//!
//! A [`Color`] always holds gamma-encoded sRGB plus alpha. Every other
//! space is derived from that on first access and memoized, so a color can
//! be shared between threads and queried in any space without locking.
//!
//! Submodules:
//! - [`space`]: the supported spaces and their conversions
//! - [`oklab`]: OKLab/OKLCH and the gamut-mapping search
//! - [`hex`]: hex and CSS keyword parsing
//! - [`text`]: name/description metadata and its embedding format
//! - [`derive`]: bar and text colors derived from a tile color

pub mod derive;
pub mod hex;
pub mod oklab;
pub mod rgb;
pub mod space;
pub mod text;

use std::fmt;
use std::sync::OnceLock;

pub use derive::{bar_color, text_color};
pub use oklab::{Oklab, Oklch, gamut_map};
pub use rgb::Rgb;
pub use space::Space;
pub use text::TextMeta;

use crate::error::{Error, Result};
use crate::settings::Settings;

/// OKLab lightness at or below which a color counts as dark
pub const DARK_LIGHTNESS_THRESHOLD: f64 = 0.483;

/// Relative tolerance for color equality, wide enough for 8-bit round trips
pub const EQUALITY_TOLERANCE: f64 = 1e-2;

/// Lazily filled per-space component cache
#[derive(Debug, Clone, Default)]
struct SpaceCache([OnceLock<[f64; 3]>; Space::COUNT]);

impl SpaceCache {
    fn get_or_init(&self, space: Space, f: impl FnOnce() -> [f64; 3]) -> [f64; 3] {
        *self.0[space.index()].get_or_init(f)
    }

    fn seed(&self, space: Space, value: [f64; 3]) {
        // A fresh cache has no entry yet, so this cannot lose a value
        let _ = self.0[space.index()].set(value);
    }
}

/// One swatch color with optional labels
#[derive(Debug, Clone)]
pub struct Color {
    rgb: Rgb,
    alpha: f64,
    origin: Space,
    cache: SpaceCache,
    text: TextMeta,
}

impl Color {
    fn from_parts(rgb: Rgb, alpha: f64, origin: Space) -> Self {
        Self {
            rgb,
            alpha: clamp_alpha(alpha),
            origin,
            cache: SpaceCache::default(),
            text: TextMeta::default(),
        }
    }

    /// Parse `#?` + 3/4/6/8 hex digits; a trailing digit or pair is alpha
    pub fn from_hex(text: &str) -> Result<Self> {
        let parsed = hex::parse_hex(text)?;
        let alpha = parsed.alpha.map_or(1.0, |a| a as f64 / 255.0);
        Ok(Self::from_parts(Rgb::from(parsed.rgb), alpha, Space::Rgb))
    }

    /// Look up a CSS color keyword such as `crimson`
    pub fn from_css_name(name: &str) -> Result<Self> {
        hex::css_keyword(name)
            .map(|rgb| Self::from_parts(Rgb::from(rgb), 1.0, Space::Rgb))
            .ok_or_else(|| Error::MalformedColor(name.to_string()))
    }

    /// CSS keyword if one matches, hex otherwise
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_css_name(text).or_else(|_| Self::from_hex(text))
    }

    /// Build from 3 components of `space`, or 4 with a trailing alpha
    ///
    /// The given components are remembered as the value of `space`;
    /// canonical sRGB is computed immediately.
    pub fn from_space_values(space: Space, components: &[f64]) -> Result<Self> {
        let (values, alpha) = match *components {
            [x, y, z] => ([x, y, z], 1.0),
            [x, y, z, a] => ([x, y, z], a),
            _ => return Err(Error::InvalidComponentCount(components.len())),
        };
        let color = Self::from_parts(space.to_rgb(values), alpha, space);
        color.cache.seed(space, values);
        Ok(color)
    }

    /// Copy of `other` whose text fields are replaced where `text` sets them
    pub fn from_existing(other: &Color, text: TextMeta) -> Self {
        let mut color = other.clone();
        color.text = color.text.overlay(text);
        color
    }

    /// Gamma-encoded sRGB from 8-bit channels and 8-bit alpha
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_parts(Rgb::from_u8(r, g, b), a as f64 / 255.0, Space::Rgb)
    }

    /// Fully transparent black, the placeholder for empty grid cells
    pub fn transparent() -> Self {
        Self::from_parts(Rgb::BLACK, 0.0, Space::Rgb)
    }

    /// Attach labels, replacing any previous ones
    pub fn with_text(mut self, text: TextMeta) -> Self {
        self.text = text;
        self
    }

    /// Attach a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.text.name = Some(name.into());
        self
    }

    /// Attach the two corner descriptions
    pub fn with_descriptions(
        mut self,
        left: Option<impl Into<String>>,
        right: Option<impl Into<String>>,
    ) -> Self {
        self.text.desc_left = left.map(Into::into);
        self.text.desc_right = right.map(Into::into);
        self
    }

    /// Same color with a different (clamped) alpha
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = clamp_alpha(alpha);
        self
    }

    /// Components in `space`, computed once and then cached
    pub fn to_space(&self, space: Space) -> [f64; 3] {
        if space == Space::Rgb {
            return self.rgb.to_array();
        }
        self.cache.get_or_init(space, || space.from_rgb(self.rgb))
    }

    /// Canonical gamma-encoded sRGB
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Space this color was constructed from
    #[inline]
    pub fn origin(&self) -> Space {
        self.origin
    }

    /// Fully transparent cells are skipped by layout and rendering
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha == 0.0
    }

    /// Perceptually dark, judged by OKLab lightness
    pub fn dark(&self) -> bool {
        self.to_space(Space::Oklab)[0] <= DARK_LIGHTNESS_THRESHOLD
    }

    pub fn name(&self) -> Option<&str> {
        self.text.name.as_deref()
    }

    pub fn desc_left(&self) -> Option<&str> {
        self.text.desc_left.as_deref()
    }

    pub fn desc_right(&self) -> Option<&str> {
        self.text.desc_right.as_deref()
    }

    pub fn text(&self) -> &TextMeta {
        &self.text
    }

    /// 8-bit sRGB
    pub fn rgb8(&self) -> [u8; 3] {
        self.rgb.to_u8()
    }

    /// 8-bit sRGB with 8-bit alpha
    pub fn rgba8(&self) -> [u8; 4] {
        let [r, g, b] = self.rgb8();
        [r, g, b, rgb::channel_to_u8(self.alpha)]
    }

    /// `#rrggbb`, lowercase
    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// `#rrggbbaa`, lowercase
    pub fn hex_with_alpha(&self) -> String {
        format!("{}{:02x}", self.hex(), rgb::channel_to_u8(self.alpha))
    }

    /// Hex as printed on a tile: alpha pair only when translucent,
    /// hash and case chosen by `settings`
    pub fn display_hex(&self, settings: &Settings) -> String {
        let hex = if self.alpha < 1.0 {
            self.hex_with_alpha()
        } else {
            self.hex()
        };
        let hex = if settings.show_hash {
            hex
        } else {
            hex.trim_start_matches('#').to_string()
        };
        if settings.hex_upper {
            hex.to_uppercase()
        } else {
            hex
        }
    }
}

impl PartialEq for Color {
    /// Canonical RGBA match within [`EQUALITY_TOLERANCE`]; labels are ignored
    fn eq(&self, other: &Self) -> bool {
        let [r, g, b] = self.rgb.to_array();
        let [or, og, ob] = other.rgb.to_array();
        [(r, or), (g, og), (b, ob), (self.alpha, other.alpha)]
            .into_iter()
            .all(|(x, y)| is_close(x, y, EQUALITY_TOLERANCE))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_with_alpha())?;
        if let Some(name) = self.name() {
            write!(f, " ({})", name)?;
        }
        Ok(())
    }
}

fn clamp_alpha(alpha: f64) -> f64 {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

/// Relative closeness, `|a - b| <= tol * max(|a|, |b|)`
fn is_close(a: f64, b: f64, rel_tol: f64) -> bool {
    a == b || (a - b).abs() <= rel_tol * a.abs().max(b.abs())
}
