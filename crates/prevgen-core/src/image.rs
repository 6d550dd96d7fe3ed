//! RGBA8 pixel buffer with PNG text chunks
//!
//! The only container the raster renderer, raster recovery and the pixel
//! filter need: 8-bit RGBA pixels plus Latin-1 key/value annotations.

use std::collections::BTreeMap;

use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::error::{Error, Result};

/// Row-major RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    text: BTreeMap<String, String>,
}

impl RgbaImage {
    /// Fully transparent image
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            text: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw bytes, four per pixel
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(self.pixels.as_slice())
    }

    pub fn pixels_mut(&mut self) -> &mut [[u8; 4]] {
        bytemuck::cast_slice_mut(self.pixels.as_mut_slice())
    }

    /// Pixel at `(x, y)`, transparent black outside the image
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        self.pixels()[(y * self.width + x) as usize]
    }

    /// Fill the inclusive rectangle `(x0, y0)..=(x1, y1)`, clipped to the image
    ///
    /// Pixels are replaced, not blended.
    pub fn fill_rect(&mut self, (x0, y0): (i64, i64), (x1, y1): (i64, i64), rgba: [u8; 4]) {
        let clip = |v: i64, len: u32| v.clamp(0, len as i64);
        let (xs, xe) = (clip(x0, self.width), clip(x1 + 1, self.width));
        let (ys, ye) = (clip(y0, self.height), clip(y1 + 1, self.height));
        if xs >= xe || ys >= ye {
            return;
        }
        let width = self.width as usize;
        let pixels = self.pixels_mut();
        for y in ys as usize..ye as usize {
            pixels[y * width + xs as usize..y * width + xe as usize].fill(rgba);
        }
    }

    pub fn text(&self) -> &BTreeMap<String, String> {
        &self.text
    }

    pub fn text_value(&self, key: &str) -> Option<&str> {
        self.text.get(key).map(String::as_str)
    }

    pub fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.text.insert(key.into(), value.into());
    }

    /// Decode any PNG into RGBA8, keeping its `tEXt` and `iTXt` chunks
    pub fn decode_png(bytes: &[u8]) -> Result<Self> {
        let mut decoder = Decoder::new(bytes);
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf)?;
        buf.truncate(frame.buffer_size());

        let pixels = match frame.color_type {
            ColorType::Rgba => buf,
            ColorType::Rgb => buf.chunks_exact(3).flat_map(|p| [p[0], p[1], p[2], 255]).collect(),
            ColorType::GrayscaleAlpha => {
                buf.chunks_exact(2).flat_map(|p| [p[0], p[0], p[0], p[1]]).collect()
            }
            ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            ColorType::Indexed => {
                return Err(Error::UnrecognizedArtifact(
                    "indexed PNG was not expanded".to_string(),
                ));
            }
        };

        let info = reader.info();
        let mut text = BTreeMap::new();
        for chunk in &info.uncompressed_latin1_text {
            text.insert(chunk.keyword.clone(), chunk.text.clone());
        }
        for chunk in &info.utf8_text {
            if let Ok(value) = chunk.get_text() {
                text.insert(chunk.keyword.clone(), value);
            }
        }

        Ok(Self {
            width: frame.width,
            height: frame.height,
            pixels,
            text,
        })
    }

    /// Encode as an 8-bit RGBA PNG with one `tEXt` chunk per annotation
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(ColorType::Rgba);
            encoder.set_depth(BitDepth::Eight);
            for (key, value) in &self.text {
                encoder.add_text_chunk(key.clone(), value.clone())?;
            }
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
            writer.finish()?;
        }
        Ok(out)
    }
}
