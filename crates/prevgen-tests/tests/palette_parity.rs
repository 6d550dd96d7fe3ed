//! Color space parity against the `palette` crate
//!
//! Walks a coarse 8-bit RGB lattice and checks each of our conversions
//! against the reference. Hue is skipped where it is undefined.

use std::f64::consts::TAU;

use prevgen_core::{Color, Space};
use prevgen_tests::accuracy::compare_oklab_with_reference;
use prevgen_tests::reference::{
    hue_distance, reference_hls, reference_hsv, reference_oklab, reference_oklch,
};
use prevgen_tests::{PalettePattern, compare_colors, generate_colors, init_logging};

const TOLERANCE: f64 = 1e-6;

/// Allowed OKLab a/b disagreement with the reference
const AB_TOLERANCE: f64 = 3e-4;

fn lattice(step: usize) -> Vec<[u8; 3]> {
    let mut samples = Vec::new();
    for r in (0..=255).step_by(step) {
        for g in (0..=255).step_by(step) {
            for b in (0..=255).step_by(step) {
                samples.push([r as u8, g as u8, b as u8]);
            }
        }
    }
    samples
}

fn ours(rgb: [u8; 3], space: Space) -> [f64; 3] {
    let [r, g, b] = rgb;
    Color::from_rgba8([r, g, b, 255]).to_space(space)
}

#[test]
fn test_hsv_parity() {
    init_logging();
    for rgb in lattice(17) {
        let [h, s, v] = ours(rgb, Space::Hsv);
        let [rh, rs, rv] = reference_hsv(rgb);
        assert!((s - rs).abs() < TOLERANCE, "{:?}: s {} vs {}", rgb, s, rs);
        assert!((v - rv).abs() < TOLERANCE, "{:?}: v {} vs {}", rgb, v, rv);
        if rs > 1e-3 {
            assert!(hue_distance(h, rh) < TOLERANCE, "{:?}: h {} vs {}", rgb, h, rh);
        }
    }
}

#[test]
fn test_hls_parity() {
    init_logging();
    for rgb in lattice(17) {
        let [h, l, s] = ours(rgb, Space::Hls);
        let [rh, rl, rs] = reference_hls(rgb);
        assert!((l - rl).abs() < TOLERANCE, "{:?}: l {} vs {}", rgb, l, rl);
        assert!((s - rs).abs() < TOLERANCE, "{:?}: s {} vs {}", rgb, s, rs);
        if rs > 1e-3 {
            assert!(hue_distance(h, rh) < TOLERANCE, "{:?}: h {} vs {}", rgb, h, rh);
        }
    }
}

#[test]
fn test_oklab_parity() {
    init_logging();
    let samples = lattice(15);
    let stats = compare_oklab_with_reference(&samples);
    eprintln!(
        "OKLab vs palette: mean={:.5} p95={:.5} max={:.5} n={}",
        stats.mean, stats.max, stats.p95, stats.count
    );
    // Matrices differ in the last few digits between implementations
    assert!(stats.max < 0.1, "max deltaEOK {}", stats.max);

    for rgb in [[0, 0, 0], [255, 255, 255], [255, 0, 0], [0, 0, 255]] {
        let a = ours(rgb, Space::Oklab);
        let b = reference_oklab(rgb);
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-3, "{:?}: {:?} vs {:?}", rgb, a, b);
        }
    }
}

#[test]
fn test_oklch_parity() {
    init_logging();
    for rgb in lattice(17) {
        let [l, c, h] = ours(rgb, Space::Oklch);
        let [rl, rc, rh] = reference_oklch(rgb);
        assert!((l - rl).abs() < 1e-3, "{:?}: L {} vs {}", rgb, l, rl);
        // User-facing chroma is three times the true chroma
        assert!((c / 3.0 - rc).abs() < 1e-3, "{:?}: C {} vs {}", rgb, c, rc);
        if rc > 0.01 {
            // Matrix constants differ slightly from palette's; the same small
            // a/b offset turns into a larger hue angle as chroma shrinks
            let tolerance = (AB_TOLERANCE / (TAU * rc)).max(1e-3);
            assert!(
                hue_distance(h, rh) < tolerance,
                "{:?}: H {} vs {} (C {})",
                rgb,
                h,
                rh,
                rc
            );
        }
    }
}

#[test]
fn test_space_roundtrip_is_stable() {
    init_logging();
    let colors = generate_colors(PalettePattern::Random(7), 200);
    for space in Space::ALL {
        let back: Vec<Color> = colors
            .iter()
            .map(|c| Color::from_space_values(space, &c.to_space(space)).unwrap())
            .collect();
        let stats = compare_colors(&colors, &back);
        assert!(stats.is_excellent(), "{}: {:?}", space.name(), stats);
        for (a, b) in colors.iter().zip(&back) {
            let drift = a
                .rgb8()
                .iter()
                .zip(b.rgb8())
                .map(|(&x, y)| (x as i32 - y as i32).abs())
                .max()
                .unwrap_or(0);
            assert!(drift <= 1, "{} moved {} to {}", space.name(), a.hex(), b.hex());
        }
    }
}

#[test]
fn test_oklch_out_of_gamut_is_mapped() {
    init_logging();
    // Maximum chroma at every hue must land inside sRGB
    for i in 0..24 {
        let hue = i as f64 / 24.0;
        let color = Color::from_space_values(Space::Oklch, &[0.7, 1.0, hue]).unwrap();
        let rgb = color.rgb();
        for channel in [rgb.r, rgb.g, rgb.b] {
            assert!((-1e-9..=1.0 + 1e-9).contains(&channel), "hue {}: {:?}", hue, rgb);
        }
        let [l, c, _] = color.to_space(Space::Oklch);
        assert!(c <= 1.0);
        assert!((l - 0.7).abs() < 0.05, "lightness drifted to {}", l);
    }
}
