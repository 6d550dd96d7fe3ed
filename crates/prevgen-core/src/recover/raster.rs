use crate::artifact::{ArtifactKind, SETTINGS_KEY, tile_key};
use crate::color::Color;
use crate::error::{Error, Result};
use crate::image::RgbaImage;
use crate::recover::{Recovered, Recovery, decode_tile_text};
use crate::settings::Settings;

/// PNG recovery
///
/// The cell size is inferred from the pixels: walk the first row and the
/// first column from the origin, counting pixels until more color changes
/// than tolerated have been seen. The default tolerates none along x and
/// one along y, which steps over the bar at the bottom of the first tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterRecovery {
    /// Color changes ignored along x and along y
    pub tolerances: (u32, u32),
}

impl Default for RasterRecovery {
    fn default() -> Self {
        Self { tolerances: (0, 1) }
    }
}

impl RasterRecovery {
    pub fn with_tolerances(x: u32, y: u32) -> Self {
        Self { tolerances: (x, y) }
    }

    /// Recover from an already decoded image
    pub fn recover_image(&self, image: &RgbaImage) -> Result<Recovered> {
        if image.text().is_empty() {
            return Err(Error::UnrecognizedArtifact(
                "PNG has no text chunks".to_string(),
            ));
        }
        let encoded = image.text_value(SETTINGS_KEY).ok_or_else(|| {
            Error::MissingSettingsMetadata {
                artifact: "PNG image".to_string(),
            }
        })?;
        let settings = Settings::decode(encoded)?;

        if image.width() == 0 || image.height() == 0 {
            return Ok(Recovered {
                settings,
                rows: Vec::new(),
                issues: Vec::new(),
            });
        }

        let (cell_w, cell_h) = self.cell_size(image, &settings);
        let mut issues = Vec::new();
        let mut rows = Vec::new();
        let mut visible = 0;
        for y in (0..image.height()).step_by(cell_h as usize) {
            let mut row = Vec::new();
            for x in (0..image.width()).step_by(cell_w as usize) {
                let mut color = Color::from_rgba8(image.pixel(x, y));
                if !color.is_transparent() {
                    if let Some(text) = image
                        .text_value(&tile_key(visible))
                        .and_then(|blob| decode_tile_text(visible, blob, &mut issues))
                    {
                        color = color.with_text(text);
                    }
                    visible += 1;
                }
                row.push(color);
            }
            rows.push(row);
        }

        log::debug!(
            "recovered {}x{} grid from {}x{} image",
            rows.first().map_or(0, Vec::len),
            rows.len(),
            image.width(),
            image.height()
        );
        Ok(Recovered {
            settings,
            rows,
            issues,
        })
    }

    /// Inferred cell size, falling back to the embedded one when the
    /// inferred size does not tile the image
    fn cell_size(&self, image: &RgbaImage, settings: &Settings) -> (u32, u32) {
        let inferred = (
            run_length(image.width(), self.tolerances.0, |i| image.pixel(i, 0)),
            run_length(image.height(), self.tolerances.1, |i| image.pixel(0, i)),
        );
        let embedded = settings.cell_size();
        log::debug!("inferred cell size {:?}", inferred);

        if inferred == embedded {
            return inferred;
        }
        let tiles = |(w, h): (u32, u32)| image.width() % w == 0 && image.height() % h == 0;
        if !tiles(inferred) && tiles(embedded) {
            log::warn!(
                "inferred cell size {:?} does not tile the image, using embedded {:?}",
                inferred,
                embedded
            );
            embedded
        } else {
            log::warn!(
                "inferred cell size {:?} differs from embedded {:?}",
                inferred,
                embedded
            );
            inferred
        }
    }
}

impl Recovery for RasterRecovery {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Raster
    }

    fn recover(&self, bytes: &[u8]) -> Result<Recovered> {
        self.recover_image(&RgbaImage::decode_png(bytes)?)
    }
}

/// Pixels from the origin before the `tolerance + 1`th color change, at least 1
fn run_length(len: u32, tolerance: u32, pixel: impl Fn(u32) -> [u8; 4]) -> u32 {
    let mut remaining = tolerance;
    let mut previous = pixel(0);
    let mut run = 0;
    for i in 0..len {
        let current = pixel(i);
        if current != previous {
            if remaining == 0 {
                break;
            }
            remaining -= 1;
        }
        run += 1;
        previous = current;
    }
    run.max(1)
}
