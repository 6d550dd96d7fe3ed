//! Rendering settings
//!
//! A flat record threaded through layout, rendering and recovery. Only the
//! fields that differ from [`Settings::default`] are embedded in an
//! artifact, as base64 of compact JSON.

use std::collections::BTreeMap;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Tile geometry, label placement and font selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Height of the darker bar at the bottom of each tile
    pub bar_height: u32,
    /// Horizontal inset of the corner descriptions
    pub desc_offset_x: i32,
    /// Vertical inset of the corner descriptions
    pub desc_offset_y: i32,
    pub desc_size: u32,
    /// Output file stem, without extension
    pub file_name: String,
    pub font_name: String,
    /// Font axis values such as `wght`, used by the vector renderer
    pub font_opts: BTreeMap<String, u32>,
    pub cell_height: u32,
    pub cell_width: u32,
    /// Vertical offset of the hex label below a name
    pub hex_offset: i32,
    /// Vertical offset of the hex label when the tile has no name
    pub hex_offset_nameless: i32,
    pub hex_size: u32,
    pub hex_size_nameless: u32,
    pub hex_upper: bool,
    /// Vertical offset of the name from the tile center
    pub name_offset: i32,
    pub name_size: u32,
    /// Prefix printed hex values with `#`
    pub show_hash: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bar_height: 10,
            desc_offset_x: 15,
            desc_offset_y: 20,
            desc_size: 26,
            file_name: "result".to_string(),
            font_name: "Nunito".to_string(),
            font_opts: BTreeMap::new(),
            cell_height: 168,
            cell_width: 224,
            hex_offset: 35,
            hex_offset_nameless: 0,
            hex_size: 26,
            hex_size_nameless: 34,
            hex_upper: true,
            name_offset: -10,
            name_size: 40,
            show_hash: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Set the cell size in pixels
    pub fn with_cell_size(mut self, width: u32, height: u32) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Set the output file stem
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Cell width and height as used for layout, never below one pixel
    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width.max(1), self.cell_height.max(1))
    }

    /// Both cell dimensions are nonzero
    pub fn size_valid(&self) -> bool {
        self.cell_width > 0 && self.cell_height > 0
    }

    /// Fields that differ from the defaults, keyed by field name
    pub fn changed(&self) -> Result<Map<String, Value>> {
        let defaults = as_object(&Settings::default())?;
        Ok(as_object(self)?
            .into_iter()
            .filter(|(key, value)| defaults.get(key) != Some(value))
            .collect())
    }

    /// Compact embeddable form: base64 of the JSON of [`changed`](Self::changed)
    pub fn encode(&self) -> Result<String> {
        let json = serde_json::to_string(&Value::Object(self.changed()?))?;
        Ok(STANDARD.encode(json))
    }

    /// Inverse of [`encode`](Self::encode), merged onto the defaults
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| Error::InvalidSettingsMetadata(format!("invalid base64: {}", e)))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::InvalidSettingsMetadata(format!("invalid JSON: {}", e)))
    }
}

fn as_object(settings: &Settings) -> Result<Map<String, Value>> {
    match serde_json::to_value(settings)? {
        Value::Object(map) => Ok(map),
        other => Err(Error::InvalidSettingsMetadata(format!(
            "settings serialized to {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_encode_empty() {
        let settings = Settings::default();
        assert!(settings.changed().unwrap().is_empty());
        // "{}"
        assert_eq!(settings.encode().unwrap(), "e30=");
    }

    #[test]
    fn test_changed_lists_only_differences() {
        let settings = Settings::default()
            .with_file_name("x")
            .with_cell_size(20, 20);
        let changed = settings.changed().unwrap();
        assert_eq!(changed.len(), 3);
        assert_eq!(changed["file_name"], "x");
        assert_eq!(changed["cell_width"], 20);
        assert_eq!(changed["cell_height"], 20);
    }

    #[test]
    fn test_encode_decode() {
        let mut settings = Settings::default().with_cell_size(20, 30);
        settings.show_hash = true;
        settings.name_offset = 4;
        settings.font_opts.insert("wght".to_string(), 500);
        let decoded = Settings::decode(&settings.encode().unwrap()).unwrap();
        assert_eq!(decoded, settings);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let encoded = STANDARD.encode(r#"{"bar_height":4,"legacy":true}"#);
        let decoded = Settings::decode(&encoded).unwrap();
        assert_eq!(decoded.bar_height, 4);
        assert_eq!(decoded.cell_width, 224);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            Settings::decode("***"),
            Err(Error::InvalidSettingsMetadata(_))
        ));
        let not_json = STANDARD.encode("not json");
        assert!(matches!(
            Settings::decode(&not_json),
            Err(Error::InvalidSettingsMetadata(_))
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let settings = Settings::from_json_str(r#"{"hex_upper": false}"#).unwrap();
        assert!(!settings.hex_upper);
        assert_eq!(settings.file_name, "result");
        assert!(matches!(Settings::from_json_str("[1"), Err(Error::Json(_))));
    }

    #[test]
    fn test_size_valid() {
        assert!(Settings::default().size_valid());
        let zero = Settings::default().with_cell_size(0, 10);
        assert!(!zero.size_valid());
        assert_eq!(zero.cell_size(), (1, 10));
    }
}
