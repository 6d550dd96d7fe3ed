//! Reference renderers
//!
//! Both paint one background and one bar rectangle per visible tile and
//! embed the metadata recovery reads back. The raster renderer does not
//! draw glyphs; the vector renderer emits text elements and leaves font
//! resolution to the viewer.

mod raster;
mod vector;

use std::path::{Path, PathBuf};

pub use raster::RasterRenderer;
pub use vector::VectorRenderer;

use crate::artifact::ArtifactKind;
use crate::error::Result;
use crate::layout::Palette;

/// Turns a palette into artifact bytes
pub trait Renderer {
    /// Which artifact this renderer produces
    fn kind(&self) -> ArtifactKind;

    /// Render the whole artifact into memory
    fn render(&self, palette: &Palette) -> Result<Vec<u8>>;

    /// Render and write `<dir>/<file_name>.<ext>`, returning the path
    fn save(&self, palette: &Palette, dir: &Path) -> Result<PathBuf> {
        let bytes = self.render(palette)?;
        let file = format!("{}.{}", palette.settings().file_name, self.kind().extension());
        let path = dir.join(file);
        std::fs::write(&path, bytes)?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }
}

/// Renderer for `kind`
pub fn renderer_for(kind: ArtifactKind) -> Box<dyn Renderer> {
    match kind {
        ArtifactKind::Raster => Box::new(RasterRenderer),
        ArtifactKind::Vector => Box::new(VectorRenderer),
    }
}
