//! Reference conversions through the `palette` crate
//!
//! Hues are returned in turns to match prevgen's convention. OKLCH chroma
//! is the true chroma; prevgen reports three times that.

use palette::encoding::Srgb as SrgbEncoding;
use palette::{Hsl, Hsv, IntoColor, LinSrgb, Oklab, Oklch, Srgb};

fn srgb([r, g, b]: [u8; 3]) -> Srgb<f64> {
    Srgb::new(r, g, b).into_format()
}

fn linear(rgb: [u8; 3]) -> LinSrgb<f64> {
    srgb(rgb).into_linear()
}

/// OKLab `[L, a, b]`
pub fn reference_oklab(rgb: [u8; 3]) -> [f64; 3] {
    let lab: Oklab<f64> = linear(rgb).into_color();
    [lab.l, lab.a, lab.b]
}

/// OKLCH `[L, C, H]` with H in turns
pub fn reference_oklch(rgb: [u8; 3]) -> [f64; 3] {
    let lch: Oklch<f64> = linear(rgb).into_color();
    [lch.l, lch.chroma, lch.hue.into_positive_degrees() / 360.0]
}

/// HSV `[H, S, V]` with H in turns
pub fn reference_hsv(rgb: [u8; 3]) -> [f64; 3] {
    let hsv: Hsv<SrgbEncoding, f64> = srgb(rgb).into_color();
    [hsv.hue.into_positive_degrees() / 360.0, hsv.saturation, hsv.value]
}

/// HLS `[H, L, S]` with H in turns
pub fn reference_hls(rgb: [u8; 3]) -> [f64; 3] {
    let hsl: Hsl<SrgbEncoding, f64> = srgb(rgb).into_color();
    [hsl.hue.into_positive_degrees() / 360.0, hsl.lightness, hsl.saturation]
}

/// Shortest distance between two hues in turns
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(1.0);
    d.min(1.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_oklab() {
        let [l, a, b] = reference_oklab([255, 255, 255]);
        assert!((l - 1.0).abs() < 1e-3);
        assert!(a.abs() < 1e-3 && b.abs() < 1e-3);
    }

    #[test]
    fn test_red_hsv() {
        let [h, s, v] = reference_hsv([255, 0, 0]);
        assert!(hue_distance(h, 0.0) < 1e-9);
        assert!((s - 1.0).abs() < 1e-9 && (v - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_hue_distance_wraps() {
        assert!((hue_distance(0.95, 0.05) - 0.1).abs() < 1e-12);
        assert!((hue_distance(0.2, 0.3) - 0.1).abs() < 1e-12);
    }
}
