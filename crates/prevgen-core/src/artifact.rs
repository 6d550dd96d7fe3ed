//! Metadata contract shared by renderers and recovery
//!
//! Raster artifacts carry PNG text chunks: [`SETTINGS_KEY`] for the encoded
//! settings and [`tile_key`] per labelled visible tile. Vector artifacts tag
//! every meaningful element with a [`ROLE_ATTR`] attribute holding a
//! [`Role`].

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{Error, Result};

/// Text chunk key of the encoded settings
pub const SETTINGS_KEY: &str = "colorGen";

/// Attribute that marks an SVG element's purpose
pub const ROLE_ATTR: &str = "role";

/// First eight bytes of every PNG file
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Text chunk key of the `n`th visible tile's labels
pub fn tile_key(n: usize) -> String {
    format!("color{}", n)
}

/// 8-bit RGBA to paint for a visible tile
///
/// Alpha is at least 1 so a barely visible color is still counted when
/// raster recovery numbers the tiles it samples.
pub fn visible_rgba8(color: &Color) -> [u8; 4] {
    let [r, g, b, a] = color.rgba8();
    [r, g, b, a.max(1)]
}

/// Purpose of a role-tagged vector element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Background,
    Bar,
    Name,
    Hex,
    DescLeft,
    DescRight,
    Metadata,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Background => "background",
            Role::Bar => "bar",
            Role::Name => "name",
            Role::Hex => "hex",
            Role::DescLeft => "desc-left",
            Role::DescRight => "desc-right",
            Role::Metadata => "metadata",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "background" => Role::Background,
            "bar" => Role::Bar,
            "name" => Role::Name,
            "hex" => Role::Hex,
            "desc-left" => Role::DescLeft,
            "desc-right" => Role::DescRight,
            "metadata" => Role::Metadata,
            other => return Err(Error::UnrecognizedArtifact(format!("unknown role {:?}", other))),
        })
    }
}

/// The two artifact formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// PNG with text chunks
    Raster,
    /// SVG with role attributes
    Vector,
}

impl ArtifactKind {
    /// File extension without the dot
    pub const fn extension(self) -> &'static str {
        match self {
            ArtifactKind::Raster => "png",
            ArtifactKind::Vector => "svg",
        }
    }

    /// Sniff the kind from the leading bytes
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&PNG_SIGNATURE) {
            return Some(ArtifactKind::Raster);
        }
        let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
        let start = bytes.iter().position(|b| !b.is_ascii_whitespace())?;
        let head = &bytes[start..];
        (head.starts_with(b"<?xml") || head.starts_with(b"<svg")).then_some(ArtifactKind::Vector)
    }

    /// Guess the kind from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ArtifactKind::Raster),
            "svg" => Some(ArtifactKind::Vector),
            _ => None,
        }
    }
}
