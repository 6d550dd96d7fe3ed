//! Supported color spaces and their conversions to and from sRGB
//!
//! HSV, HLS and YIQ use the textbook formulas with every component
//! normalized to [0, 1] (hue in turns). OKLab and OKLCH are delegated to
//! [`oklab`](crate::color::oklab).

use std::fmt;
use std::str::FromStr;

use crate::color::Rgb;
use crate::color::oklab::{Oklab, Oklch};
use crate::error::{Error, Result};
use crate::math::matrix::{RGB_TO_YIQ, YIQ_TO_RGB};

/// A color space a [`Color`](crate::Color) can be built from or converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    /// Gamma-encoded sRGB
    Rgb,
    /// Hue, saturation, value
    Hsv,
    /// Hue, lightness, saturation
    Hls,
    /// NTSC luma and chrominance
    Yiq,
    /// Perceptual Lab
    Oklab,
    /// Perceptual lightness, normalized chroma, hue
    Oklch,
}

impl Space {
    /// Number of spaces, used to size per-space caches
    pub const COUNT: usize = 6;

    /// All spaces in declaration order
    pub const ALL: [Space; Self::COUNT] = [
        Space::Rgb,
        Space::Hsv,
        Space::Hls,
        Space::Yiq,
        Space::Oklab,
        Space::Oklch,
    ];

    /// Stable index into per-space tables
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Space::Rgb => 0,
            Space::Hsv => 1,
            Space::Hls => 2,
            Space::Yiq => 3,
            Space::Oklab => 4,
            Space::Oklch => 5,
        }
    }

    /// Lowercase name as accepted by [`FromStr`]
    pub const fn name(self) -> &'static str {
        match self {
            Space::Rgb => "rgb",
            Space::Hsv => "hsv",
            Space::Hls => "hls",
            Space::Yiq => "yiq",
            Space::Oklab => "oklab",
            Space::Oklch => "oklch",
        }
    }

    /// Convert canonical sRGB into this space
    pub fn from_rgb(self, rgb: Rgb) -> [f64; 3] {
        match self {
            Space::Rgb => rgb.to_array(),
            Space::Hsv => rgb_to_hsv(rgb),
            Space::Hls => rgb_to_hls(rgb),
            Space::Yiq => RGB_TO_YIQ.multiply_vec(rgb.to_array()),
            Space::Oklab => Oklab::from_rgb(rgb).to_array(),
            Space::Oklch => Oklab::from_rgb(rgb).to_lch().to_array(),
        }
    }

    /// Convert components of this space into displayable sRGB
    ///
    /// OKLab and OKLCH input is gamut-mapped, everything else is clamped.
    pub fn to_rgb(self, [x, y, z]: [f64; 3]) -> Rgb {
        match self {
            Space::Rgb => Rgb::new(x, y, z).clamp(),
            Space::Hsv => hsv_to_rgb(x, y, z).clamp(),
            Space::Hls => hls_to_rgb(x, y, z).clamp(),
            Space::Yiq => Rgb::from_array(YIQ_TO_RGB.multiply_vec([x, y, z])).clamp(),
            Space::Oklab => Oklab::new(x, y, z).to_lch().to_rgb(),
            Space::Oklch => Oklch::new(x, y, z).to_rgb(),
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Space {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Space::ALL
            .into_iter()
            .find(|space| space.name() == lower)
            .ok_or_else(|| Error::UnsupportedSpace(s.to_string()))
    }
}

fn rgb_to_hsv(rgb: Rgb) -> [f64; 3] {
    let Rgb { r, g, b } = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return [0.0, 0.0, max];
    }
    let range = max - min;
    [hue_of(r, g, b, max, range), range / max, max]
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    if s == 0.0 {
        return Rgb::new(v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => Rgb::new(v, t, p),
        1 => Rgb::new(q, v, p),
        2 => Rgb::new(p, v, t),
        3 => Rgb::new(p, q, v),
        4 => Rgb::new(t, p, v),
        _ => Rgb::new(v, p, q),
    }
}

fn rgb_to_hls(rgb: Rgb) -> [f64; 3] {
    let Rgb { r, g, b } = rgb;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let sum = max + min;
    let range = max - min;
    let l = sum / 2.0;
    if max == min {
        return [0.0, l, 0.0];
    }
    let s = if l <= 0.5 {
        range / sum
    } else {
        range / (2.0 - sum)
    };
    [hue_of(r, g, b, max, range), l, s]
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> Rgb {
    if s == 0.0 {
        return Rgb::new(l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Rgb::new(
        hls_channel(m1, m2, h + 1.0 / 3.0),
        hls_channel(m1, m2, h),
        hls_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hls_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.0);
    if hue < 1.0 / 6.0 {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
    } else {
        m1
    }
}

/// Shared hue computation for HSV and HLS, in turns
fn hue_of(r: f64, g: f64, b: f64, max: f64, range: f64) -> f64 {
    let rc = (max - r) / range;
    let gc = (max - g) / range;
    let bc = (max - b) / range;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    (h / 6.0).rem_euclid(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(a: [f64; 3], b: [f64; 3], eps: f64) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < eps, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("rgb".parse::<Space>().unwrap(), Space::Rgb);
        assert_eq!("OKLCH".parse::<Space>().unwrap(), Space::Oklch);
        assert_eq!(" hls ".parse::<Space>().unwrap(), Space::Hls);
        assert!(matches!(
            "cmyk".parse::<Space>(),
            Err(Error::UnsupportedSpace(name)) if name == "cmyk"
        ));
    }

    #[test]
    fn test_indices_are_distinct() {
        for (i, space) in Space::ALL.iter().enumerate() {
            assert_eq!(space.index(), i);
        }
    }

    #[test]
    fn test_red_in_each_cylinder() {
        let red = Rgb::new(1.0, 0.0, 0.0);
        assert_close(Space::Hsv.from_rgb(red), [0.0, 1.0, 1.0], EPSILON);
        assert_close(Space::Hls.from_rgb(red), [0.0, 0.5, 1.0], EPSILON);
    }

    #[test]
    fn test_yiq_of_white() {
        assert_close(Space::Yiq.from_rgb(Rgb::WHITE), [1.0, 0.0, 0.0], 1e-6);
    }

    #[test]
    fn test_roundtrip_through_every_space() {
        let samples = [
            Rgb::new(0.2, 0.5, 0.3),
            Rgb::new(0.9, 0.1, 0.4),
            Rgb::new(0.05, 0.05, 0.8),
            Rgb::new(0.5, 0.5, 0.5),
        ];
        for rgb in samples {
            for space in Space::ALL {
                let back = space.to_rgb(space.from_rgb(rgb));
                assert!(
                    back.approx_eq(&rgb, 1e-6),
                    "{} roundtrip of {:?} gave {:?}",
                    space,
                    rgb,
                    back
                );
            }
        }
    }

    #[test]
    fn test_hsv_sectors() {
        // One sample per hue sextant
        let cases = [
            (0.0, Rgb::new(1.0, 0.0, 0.0)),
            (1.0 / 6.0, Rgb::new(1.0, 1.0, 0.0)),
            (2.0 / 6.0, Rgb::new(0.0, 1.0, 0.0)),
            (3.0 / 6.0, Rgb::new(0.0, 1.0, 1.0)),
            (4.0 / 6.0, Rgb::new(0.0, 0.0, 1.0)),
            (5.0 / 6.0, Rgb::new(1.0, 0.0, 1.0)),
        ];
        for (h, expected) in cases {
            let rgb = Space::Hsv.to_rgb([h, 1.0, 1.0]);
            assert!(rgb.approx_eq(&expected, 1e-9), "h={} gave {:?}", h, rgb);
        }
    }
}
