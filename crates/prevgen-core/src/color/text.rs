//! Per-tile text metadata
//!
//! A tile carries up to three labels. For embedding they are joined with
//! NUL separators and base64-encoded, so the payload is plain ASCII and
//! survives PNG text chunks and XML text alike.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

const SEPARATOR: &str = "\0";

/// Name and corner descriptions of a color
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMeta {
    pub name: Option<String>,
    pub desc_left: Option<String>,
    pub desc_right: Option<String>,
}

impl TextMeta {
    pub fn new(
        name: Option<impl Into<String>>,
        desc_left: Option<impl Into<String>>,
        desc_right: Option<impl Into<String>>,
    ) -> Self {
        Self {
            name: name.map(Into::into),
            desc_left: desc_left.map(Into::into),
            desc_right: desc_right.map(Into::into),
        }
    }

    /// Only a name, no descriptions
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// True when no field carries visible text
    pub fn is_empty(&self) -> bool {
        [&self.name, &self.desc_left, &self.desc_right]
            .iter()
            .all(|f| f.as_deref().is_none_or(str::is_empty))
    }

    /// Fields of `other` that are set replace the fields of `self`
    pub fn overlay(mut self, other: TextMeta) -> Self {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.desc_left.is_some() {
            self.desc_left = other.desc_left;
        }
        if other.desc_right.is_some() {
            self.desc_right = other.desc_right;
        }
        self
    }

    /// Pack into the embeddable base64 form
    pub fn encode(&self) -> String {
        let joined = [&self.name, &self.desc_left, &self.desc_right]
            .map(|f| f.as_deref().unwrap_or_default())
            .join(SEPARATOR);
        STANDARD.encode(joined.as_bytes())
    }

    /// Inverse of [`encode`](Self::encode); empty fields decode as `None`
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::MetadataDecode(format!("invalid base64: {}", e)))?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::MetadataDecode(format!("invalid UTF-8: {}", e)))?;

        let fields: Vec<&str> = text.split(SEPARATOR).collect();
        let [name, desc_left, desc_right] = fields.as_slice() else {
            return Err(Error::MetadataDecode(format!(
                "expected 3 fields, found {}",
                fields.len()
            )));
        };

        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Ok(Self {
            name: field(*name),
            desc_left: field(*desc_left),
            desc_right: field(*desc_right),
        })
    }
}
