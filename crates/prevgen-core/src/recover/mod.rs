//! Artifact recovery
//!
//! Rebuilds the settings and color rows of a previously rendered artifact.
//! [`RasterRecovery`] reads PNG text chunks and samples pixels;
//! [`VectorRecovery`] walks role-tagged SVG elements. Both hand back a
//! [`Recovered`] that [`Palette::from_rows`] accepts directly.
//!
//! Fatal problems (no settings, not an artifact at all) are errors. A
//! malformed per-tile label is not: the color is kept without labels and
//! the problem is listed in [`Recovered::issues`].

mod raster;
mod vector;

use std::path::Path;

pub use raster::RasterRecovery;
pub use vector::VectorRecovery;

use crate::artifact::ArtifactKind;
use crate::color::{Color, TextMeta};
use crate::error::{Error, Result};
use crate::layout::Palette;
use crate::settings::Settings;

/// Output of a recovery
#[derive(Debug)]
pub struct Recovered {
    pub settings: Settings,
    /// Color rows in grid order, placeholders included
    pub rows: Vec<Vec<Color>>,
    /// Recoverable problems, one [`Error::PartialMetadataDecode`] per tile
    pub issues: Vec<Error>,
}

impl Recovered {
    /// Lay the recovered rows out again
    pub fn into_palette(self) -> Palette {
        Palette::from_rows(self.rows, self.settings)
    }

    /// All cells, row-major
    pub fn colors(&self) -> impl Iterator<Item = &Color> {
        self.rows.iter().flatten()
    }
}

/// A recovery backend for one artifact kind
pub trait Recovery {
    fn kind(&self) -> ArtifactKind;

    fn recover(&self, bytes: &[u8]) -> Result<Recovered>;
}

impl ArtifactKind {
    /// Default backend for this kind
    pub fn recovery(self) -> Box<dyn Recovery> {
        match self {
            ArtifactKind::Raster => Box::new(RasterRecovery::default()),
            ArtifactKind::Vector => Box::new(VectorRecovery),
        }
    }
}

/// Recover an in-memory artifact, picking the backend from its signature
pub fn recover(bytes: &[u8]) -> Result<Recovered> {
    let kind = ArtifactKind::detect(bytes).ok_or_else(|| {
        Error::UnrecognizedArtifact("neither a PNG nor an SVG document".to_string())
    })?;
    kind.recovery().recover(bytes)
}

/// Recover an artifact file; the signature wins over the extension
pub fn recover_file(path: impl AsRef<Path>) -> Result<Recovered> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let kind = ArtifactKind::detect(&bytes)
        .or_else(|| ArtifactKind::from_path(path))
        .ok_or_else(|| Error::UnrecognizedArtifact(path.display().to_string()))?;
    log::debug!("recovering {} as {:?}", path.display(), kind);

    kind.recovery().recover(&bytes).map_err(|err| match err {
        Error::MissingSettingsMetadata { .. } => Error::MissingSettingsMetadata {
            artifact: path.display().to_string(),
        },
        Error::UnrecognizedArtifact(reason) => {
            Error::UnrecognizedArtifact(format!("{}: {}", path.display(), reason))
        }
        other => other,
    })
}

/// Decode one tile's label blob, recording a failure instead of returning it
pub(crate) fn decode_tile_text(
    index: usize,
    encoded: &str,
    issues: &mut Vec<Error>,
) -> Option<TextMeta> {
    match TextMeta::decode(encoded) {
        Ok(meta) => Some(meta),
        Err(err) => {
            log::warn!("dropping labels of tile {}: {}", index, err);
            issues.push(Error::PartialMetadataDecode {
                index,
                reason: err.to_string(),
            });
            None
        }
    }
}
