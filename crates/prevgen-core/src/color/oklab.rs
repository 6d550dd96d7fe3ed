//! OKLab / OKLCH Color Space
//!
//! OKLab is a perceptually uniform Lab space built on LMS cone responses
//! with a cube-root nonlinearity. OKLCH is its cylindrical form.
//!
//! - L: Lightness (0 = black, 1 = white)
//! - C: Chroma, exposed on a normalized scale where 1.0 means a true
//!   OKLab chroma of [`CHROMA_SCALE`]⁻¹ (≈ 0.333, past every sRGB color)
//! - H: Hue in turns (0.0 to 1.0)
//!
//! Converting OKLCH into sRGB goes through [`gamut_map`], a monotone
//! chroma-reduction search. It is an approximation: hue and lightness are
//! held fixed while chroma shrinks, which is not the perceptually closest
//! in-gamut color. The step size and iteration cap are compatibility
//! constants and must not change without a format break.

use std::f64::consts::TAU;

use crate::color::Rgb;
use crate::math::matrix::{LINEAR_SRGB_TO_LMS, LMS_TO_LINEAR_SRGB, LMS_TO_OKLAB, OKLAB_TO_LMS};
use crate::math::{srgb_gamma_decode, srgb_gamma_encode};

/// Ratio between the user-facing chroma and the true OKLab chroma
pub const CHROMA_SCALE: f64 = 3.0;

/// True chroma removed per gamut-mapping iteration
pub const GAMUT_CHROMA_STEP: f64 = 0.005;

/// Upper bound on gamut-mapping iterations
pub const GAMUT_MAX_ITERATIONS: usize = 200;

/// Slack on the [0, 1] bounds
///
/// The OKLab matrix pair inverts to about 1e-6, so a channel that is exactly
/// 0 or 1 comes back a few 1e-7 outside the range.
const GAMUT_EPSILON: f64 = 1e-5;

/// OKLab color coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklab {
    /// Lightness (0 to 1)
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Oklab {
    /// Create a new OKLab color
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Convert from gamma-encoded sRGB
    pub fn from_rgb(rgb: Rgb) -> Self {
        let linear = rgb.to_array().map(srgb_gamma_decode);
        let lms = LINEAR_SRGB_TO_LMS.multiply_vec(linear).map(f64::cbrt);
        let [l, a, b] = LMS_TO_OKLAB.multiply_vec(lms);
        Self { l, a, b }
    }

    /// Convert to gamma-encoded sRGB without any gamut handling
    ///
    /// Components may fall outside [0, 1].
    pub fn to_rgb_unclamped(&self) -> Rgb {
        let lms = OKLAB_TO_LMS.multiply_vec(self.to_array()).map(|v| v.powi(3));
        let linear = LMS_TO_LINEAR_SRGB.multiply_vec(lms);
        Rgb::from_array(linear.map(srgb_gamma_encode))
    }

    /// Convert to OKLCH
    pub fn to_lch(&self) -> Oklch {
        let hue = self.b.atan2(self.a) / TAU;
        Oklch {
            l: self.l,
            c: self.a.hypot(self.b) * CHROMA_SCALE,
            h: hue.rem_euclid(1.0),
        }
    }
}

/// OKLCH color coordinates with normalized chroma and hue in turns
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklch {
    /// Lightness (0 to 1)
    pub l: f64,
    /// Normalized chroma (true chroma × [`CHROMA_SCALE`])
    pub c: f64,
    /// Hue in turns (0 to 1)
    pub h: f64,
}

impl Oklch {
    /// Create a new OKLCH color
    #[inline]
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Convert to array
    #[inline]
    pub const fn to_array(&self) -> [f64; 3] {
        [self.l, self.c, self.h]
    }

    /// Cartesian form, with the normalized chroma taken literally
    pub fn to_lab(&self) -> Oklab {
        let chroma = self.c / CHROMA_SCALE;
        let angle = TAU * self.h;
        Oklab::new(self.l, chroma * angle.cos(), chroma * angle.sin())
    }

    /// Convert into displayable sRGB, reducing chroma if needed
    pub fn to_rgb(&self) -> Rgb {
        gamut_map(self.l, self.c / CHROMA_SCALE, self.h)
    }
}

/// Map an OKLCH color into the sRGB gamut
///
/// `chroma` is the true OKLab chroma and `hue` is in turns. Chroma is
/// lowered by [`GAMUT_CHROMA_STEP`] until every channel is inside [0, 1],
/// for at most [`GAMUT_MAX_ITERATIONS`] attempts, and never below zero.
/// Whatever the outcome, the last candidate is clamped per channel, so this
/// never fails.
pub fn gamut_map(lightness: f64, chroma: f64, hue: f64) -> Rgb {
    let angle = TAU * hue;
    let (sin, cos) = angle.sin_cos();
    let mut chroma = chroma.max(0.0);
    let mut rgb = Rgb::BLACK;

    for iteration in 0..GAMUT_MAX_ITERATIONS {
        rgb = Oklab::new(lightness, chroma * cos, chroma * sin).to_rgb_unclamped();
        if rgb.is_within(GAMUT_EPSILON) {
            log::trace!("gamut mapping settled after {} iterations", iteration);
            return rgb.clamp();
        }
        if chroma == 0.0 {
            log::trace!("gamut mapping reached zero chroma after {} iterations", iteration);
            return rgb.clamp();
        }
        chroma = (chroma - GAMUT_CHROMA_STEP).max(0.0);
    }

    log::trace!(
        "gamut mapping exhausted {} iterations, clamping",
        GAMUT_MAX_ITERATIONS
    );
    rgb.clamp()
}
