//! Pixel filters

use std::path::Path;

use rayon::prelude::*;

use crate::color::{Oklab, Rgb, Space};
use crate::error::{Error, Result};
use crate::image::RgbaImage;

/// Recolor RGBA8 pixels to one hue, keeping each pixel's lightness and alpha
///
/// `chroma` and `hue` are OKLCH components as accepted by
/// [`Space::Oklch`]: chroma in the user-facing range, hue in turns.
pub fn monochrome(pixels: &mut [u8], chroma: f64, hue: f64) -> Result<()> {
    if pixels.len() % 4 != 0 {
        return Err(Error::InvalidComponentCount(pixels.len() % 4));
    }
    recolor(bytemuck::cast_slice_mut(pixels), chroma, hue);
    Ok(())
}

/// Apply [`monochrome`] to an image in place
pub fn monochrome_image(image: &mut RgbaImage, chroma: f64, hue: f64) {
    recolor(image.pixels_mut(), chroma, hue);
}

fn recolor(pixels: &mut [[u8; 4]], chroma: f64, hue: f64) {
    pixels.par_iter_mut().for_each(|px| {
        let [r, g, b, a] = *px;
        let lightness = Oklab::from_rgb(Rgb::from_u8(r, g, b)).l;
        let [r, g, b] = Space::Oklch.to_rgb([lightness, chroma, hue]).to_u8();
        *px = [r, g, b, a];
    });
}

/// Read a PNG, recolor it and write the result; text chunks are kept
pub fn monochrome_png(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    chroma: f64,
    hue: f64,
) -> Result<()> {
    let mut image = RgbaImage::decode_png(&std::fs::read(input)?)?;
    monochrome_image(&mut image, chroma, hue);
    std::fs::write(output, image.encode_png()?)?;
    Ok(())
}
