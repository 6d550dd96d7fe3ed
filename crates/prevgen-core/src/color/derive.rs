//! Colors derived from a tile's background
//!
//! Both keep hue and chroma and only move OKLab lightness, then go back
//! through the gamut mapping. Alpha is inherited.

use crate::color::{Color, Space};

/// Darker strip painted along the bottom of each tile
pub fn bar_color(color: &Color) -> Color {
    let [l, a, b] = color.to_space(Space::Oklab);
    from_oklab([l * 0.9, a, b], color.alpha())
}

/// Label color: lifted on dark tiles, pushed down on light ones
pub fn text_color(color: &Color) -> Color {
    let [l, a, b] = color.to_space(Space::Oklab);
    let l = if color.dark() {
        l * 0.9 + 0.3
    } else {
        l * 0.75 - 0.15
    };
    from_oklab([l, a, b], color.alpha())
}

fn from_oklab([l, a, b]: [f64; 3], alpha: f64) -> Color {
    Color::from_space_values(Space::Oklab, &[l, a, b, alpha]).unwrap_or_else(|_| Color::transparent())
}
