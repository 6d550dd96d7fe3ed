//! Palette generation
//!
//! Deterministic color lists for layout and round-trip tests.

use prevgen_core::{Color, Settings, Space, TextMeta};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Palette pattern types
#[derive(Debug, Clone, Copy)]
pub enum PalettePattern {
    /// Grayscale ramp from black to white
    Grayscale,
    /// OKLCH hue ramp at fixed lightness and chroma
    HueRamp,
    /// RGB color cube corners, repeated
    ColorCube,
    /// Random opaque colors with seed
    Random(u64),
    /// Random colors, some translucent, some labelled, some holes
    Mixed(u64),
}

/// Generate `count` colors following `pattern`
pub fn generate_colors(pattern: PalettePattern, count: usize) -> Vec<Color> {
    match pattern {
        PalettePattern::Grayscale => (0..count)
            .map(|i| {
                let v = if count > 1 { i as f64 / (count - 1) as f64 } else { 0.0 };
                from_values(Space::Rgb, &[v, v, v])
            })
            .collect(),
        PalettePattern::HueRamp => (0..count)
            .map(|i| from_values(Space::Oklch, &[0.7, 0.3, i as f64 / count.max(1) as f64]))
            .collect(),
        PalettePattern::ColorCube => {
            let corners: [[u8; 3]; 8] = [
                [0, 0, 0],
                [255, 0, 0],
                [0, 255, 0],
                [0, 0, 255],
                [255, 255, 0],
                [255, 0, 255],
                [0, 255, 255],
                [255, 255, 255],
            ];
            (0..count)
                .map(|i| {
                    let [r, g, b] = corners[i % 8];
                    Color::from_rgba8([r, g, b, 255])
                })
                .collect()
        }
        PalettePattern::Random(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..count)
                .map(|_| Color::from_rgba8([rng.r#gen(), rng.r#gen(), rng.r#gen(), 255]))
                .collect()
        }
        PalettePattern::Mixed(seed) => {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..count).map(|i| mixed_color(&mut rng, i)).collect()
        }
    }
}

fn from_values(space: Space, values: &[f64]) -> Color {
    Color::from_space_values(space, values).unwrap_or_else(|_| Color::transparent())
}

fn mixed_color(rng: &mut ChaCha8Rng, i: usize) -> Color {
    // Roughly one hole in eight, never the first cell
    if i > 0 && rng.gen_ratio(1, 8) {
        return Color::transparent();
    }
    let alpha = if rng.gen_bool(0.25) {
        rng.gen_range(1..=254)
    } else {
        255
    };
    let color = Color::from_rgba8([rng.r#gen(), rng.r#gen(), rng.r#gen(), alpha]);

    let label = |rng: &mut ChaCha8Rng, prefix: &str| {
        rng.gen_bool(0.5)
            .then(|| format!("{}{}", prefix, rng.gen_range(0..1000)))
    };
    let text = TextMeta {
        name: label(rng, "name "),
        desc_left: label(rng, "L"),
        desc_right: label(rng, "R"),
    };
    color.with_text(text)
}

/// Random non-default settings that keep tiles recoverable
pub fn random_settings(seed: u64) -> Settings {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut settings = Settings::default()
        .with_file_name(format!("palette-{}", seed))
        .with_cell_size(rng.gen_range(12..60), rng.gen_range(16..60));
    settings.bar_height = rng.gen_range(1..settings.cell_height / 3);
    settings.show_hash = rng.gen_bool(0.5);
    settings.hex_upper = rng.gen_bool(0.5);
    settings.name_offset = rng.gen_range(-20..20);
    if rng.gen_bool(0.5) {
        settings.font_opts.insert("wght".to_string(), 400);
    }
    settings
}

/// Standard palette sizes
pub mod sizes {
    pub const TINY: usize = 1;
    pub const SMALL: usize = 5;
    pub const MEDIUM: usize = 24;
    pub const LARGE: usize = 150;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_endpoints() {
        let colors = generate_colors(PalettePattern::Grayscale, 3);
        assert_eq!(colors[0].hex(), "#000000");
        assert_eq!(colors[2].hex(), "#ffffff");
    }

    #[test]
    fn test_random_deterministic() {
        let a = generate_colors(PalettePattern::Mixed(42), 30);
        let b = generate_colors(PalettePattern::Mixed(42), 30);
        assert_eq!(a, b);
        assert!(a.iter().zip(&b).all(|(x, y)| x.text() == y.text()));
    }

    #[test]
    fn test_mixed_first_is_visible() {
        for seed in 0..20 {
            let colors = generate_colors(PalettePattern::Mixed(seed), 10);
            assert!(!colors[0].is_transparent());
        }
    }

    #[test]
    fn test_settings_valid() {
        for seed in 0..20 {
            let s = random_settings(seed);
            assert!(s.size_valid());
            assert!(s.bar_height < s.cell_height);
        }
    }
}
