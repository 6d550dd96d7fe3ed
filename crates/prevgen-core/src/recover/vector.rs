use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::artifact::{ArtifactKind, ROLE_ATTR, Role};
use crate::color::{Color, TextMeta};
use crate::error::{Error, Result};
use crate::recover::{Recovered, Recovery};
use crate::settings::Settings;

/// SVG recovery
///
/// Only elements with a `role` attribute are considered. Tile groups start
/// at each `background` element and run up to the next one; the group's
/// cell is its background's position divided by the cell size, so tiles
/// that were never drawn come back as transparent placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorRecovery;

/// One role-tagged element
#[derive(Debug, Default)]
struct Marked {
    role: Option<Role>,
    x: f64,
    y: f64,
    fill: Option<String>,
    opacity: Option<f64>,
    text: String,
}

#[derive(Debug, Default)]
struct Group {
    x: f64,
    y: f64,
    fill: Option<String>,
    opacity: Option<f64>,
    hex: Option<String>,
    text: TextMeta,
}

impl VectorRecovery {
    /// Recover from SVG text
    pub fn recover_str(&self, svg: &str) -> Result<Recovered> {
        let marked = scan(svg)?;
        if marked.is_empty() {
            return Err(Error::UnrecognizedArtifact(
                "SVG has no role-tagged elements".to_string(),
            ));
        }

        let metadata = marked
            .iter()
            .find(|m| m.role == Some(Role::Metadata))
            .ok_or_else(|| Error::MissingSettingsMetadata {
                artifact: "SVG document".to_string(),
            })?;
        let settings = Settings::decode(&metadata.text)?;

        let groups = group(marked);
        let (cell_w, cell_h) = settings.cell_size();
        let cell_of = |v: f64, size: u32| (v / size as f64).floor().max(0.0) as usize;

        let max_x = groups.iter().map(|g| g.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = groups.iter().map(|g| g.y).fold(f64::NEG_INFINITY, f64::max);
        let (columns, row_count) = if groups.is_empty() {
            (0, 0)
        } else {
            (cell_of(max_x, cell_w) + 1, cell_of(max_y, cell_h) + 1)
        };
        log::debug!("recovered {}x{} grid from {} tiles", columns, row_count, groups.len());

        let mut issues = Vec::new();
        let mut rows = vec![vec![Color::transparent(); columns]; row_count];
        for (index, group) in groups.into_iter().enumerate() {
            let (col, row) = (cell_of(group.x, cell_w), cell_of(group.y, cell_h));
            let color = match tile_color(&group) {
                Ok(color) => color.with_text(group.text),
                Err(err) => {
                    log::warn!("tile {} has no usable color: {}", index, err);
                    issues.push(Error::PartialMetadataDecode {
                        index,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };
            rows[row][col] = color;
        }

        Ok(Recovered {
            settings,
            rows,
            issues,
        })
    }
}

impl Recovery for VectorRecovery {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Vector
    }

    fn recover(&self, bytes: &[u8]) -> Result<Recovered> {
        let svg = std::str::from_utf8(bytes)
            .map_err(|e| Error::UnrecognizedArtifact(format!("SVG is not UTF-8: {}", e)))?;
        self.recover_str(svg)
    }
}

/// Hex label first, background fill and opacity otherwise
fn tile_color(group: &Group) -> Result<Color> {
    if let Some(hex) = &group.hex {
        match Color::from_hex(hex) {
            Ok(color) => return Ok(color),
            Err(err) => log::debug!("hex label {:?} unreadable: {}", hex, err),
        }
    }
    let fill = group
        .fill
        .as_deref()
        .ok_or_else(|| Error::MalformedColor("background has no fill".to_string()))?;
    let color = Color::from_hex(fill)?;
    Ok(match group.opacity {
        Some(alpha) => color.with_alpha(alpha),
        None => color,
    })
}

/// Fold role-tagged elements into tile groups
fn group(marked: Vec<Marked>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut orphans = 0;
    for m in marked {
        let Some(role) = m.role else { continue };
        if matches!(role, Role::Bar | Role::Metadata) {
            continue;
        }
        if role == Role::Background {
            groups.push(Group {
                x: m.x,
                y: m.y,
                fill: m.fill,
                opacity: m.opacity,
                ..Group::default()
            });
            continue;
        }
        let Some(current) = groups.last_mut() else {
            orphans += 1;
            continue;
        };
        let text = (!m.text.is_empty()).then_some(m.text);
        match role {
            Role::Hex => current.hex = text,
            Role::Name => current.text.name = text,
            Role::DescLeft => current.text.desc_left = text,
            Role::DescRight => current.text.desc_right = text,
            Role::Bar | Role::Metadata | Role::Background => {}
        }
    }
    if orphans > 0 {
        log::debug!("ignored {} labels before the first background", orphans);
    }
    groups
}

/// Collect every element carrying a role attribute, with its text content
fn scan(svg: &str) -> Result<Vec<Marked>> {
    let mut reader = Reader::from_str(svg);
    let mut marked = Vec::new();
    // Index of the element whose text is being collected, and its depth
    let mut open: Option<(usize, usize)> = None;
    let mut depth: usize = 0;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                depth += 1;
                if let Some(m) = marked_element(&e)? {
                    marked.push(m);
                    if open.is_none() {
                        open = Some((marked.len() - 1, depth));
                    }
                }
            }
            Event::Empty(e) => {
                if let Some(m) = marked_element(&e)? {
                    marked.push(m);
                }
            }
            Event::Text(t) => {
                if let Some((index, _)) = open {
                    marked[index].text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some((index, _)) = open {
                    marked[index].text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                if open.is_some_and(|(_, d)| d == depth) {
                    open = None;
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(marked)
}

fn marked_element(e: &BytesStart<'_>) -> Result<Option<Marked>> {
    let mut m = Marked::default();
    let mut tagged = false;
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            key if key == ROLE_ATTR.as_bytes() => {
                tagged = true;
                m.role = value.parse().ok();
            }
            b"x" => m.x = value.trim().parse().unwrap_or(0.0),
            b"y" => m.y = value.trim().parse().unwrap_or(0.0),
            b"fill" => m.fill = Some(value.into_owned()),
            b"fill-opacity" => m.opacity = value.trim().parse().ok(),
            _ => {}
        }
    }
    Ok(tagged.then_some(m))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Palette;
    use crate::render::VectorRenderer;

    fn settings() -> Settings {
        Settings::default().with_file_name("x").with_cell_size(20, 20)
    }

    fn roundtrip(palette: &Palette) -> Recovered {
        let svg = VectorRenderer.render_string(palette).unwrap();
        VectorRecovery.recover_str(&svg).unwrap()
    }

    #[test]
    fn test_single_tile() {
        let color = Color::from_hex("52c7a780")
            .unwrap()
            .with_name("name")
            .with_descriptions(Some("descLeft"), Some("descRight"));
        let recovered = roundtrip(&Palette::from_list(vec![color.clone()], settings()));

        assert_eq!(recovered.settings, settings());
        let got = &recovered.rows[0][0];
        assert_eq!(*got, color);
        assert_eq!(got.hex_with_alpha(), color.hex_with_alpha());
        assert_eq!(got.text(), color.text());
    }

    #[test]
    fn test_holes_keep_their_place() {
        let a = Color::from_hex("ff0000").unwrap();
        let b = Color::from_hex("00ff00").unwrap();
        let palette = Palette::from_rows(
            vec![vec![a.clone(), Color::transparent(), Color::transparent()], vec![Color::transparent(), b.clone()]],
            settings(),
        );
        let recovered = roundtrip(&palette);
        let rows = &recovered.rows;

        // The trailing column had nothing drawn, so it is not recovered
        assert_eq!((rows.len(), rows[0].len()), (2, 2));
        assert_eq!(rows[0][0], a);
        assert!(rows[0][1].is_transparent());
        assert!(rows[1][0].is_transparent());
        assert_eq!(rows[1][1], b);
    }

    #[test]
    fn test_missing_labels_are_none() {
        let recovered = roundtrip(&Palette::from_list(
            vec![Color::from_hex("123456").unwrap()],
            settings(),
        ));
        let got = &recovered.rows[0][0];
        assert_eq!(got.name(), None);
        assert_eq!(got.desc_left(), None);
        assert_eq!(got.desc_right(), None);
    }

    #[test]
    fn test_fill_used_without_hex() {
        let svg = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
<text role="metadata" display="none">{}</text>
<rect role="background" x="20" y="0" fill="#336699" fill-opacity="0.5"/>
<text role="name">only a name</text>
</svg>"##,
            settings().encode().unwrap()
        );
        let recovered = VectorRecovery.recover_str(&svg).unwrap();
        assert_eq!(recovered.rows[0].len(), 2);
        let got = &recovered.rows[0][1];
        assert_eq!(got.hex(), "#336699");
        assert!((got.alpha() - 0.5).abs() < 1e-9);
        assert_eq!(got.name(), Some("only a name"));
    }

    #[test]
    fn test_unmarked_documents() {
        assert!(matches!(
            VectorRecovery.recover_str(r#"<svg><rect x="0"/></svg>"#),
            Err(Error::UnrecognizedArtifact(_))
        ));
        assert!(matches!(
            VectorRecovery.recover_str(r##"<svg><rect role="background" x="0" y="0" fill="#fff"/></svg>"##),
            Err(Error::MissingSettingsMetadata { .. })
        ));
    }

    #[test]
    fn test_escaped_text() {
        let color = Color::from_hex("abcdef").unwrap().with_name("<a & b>");
        let recovered = roundtrip(&Palette::from_list(vec![color], settings()));
        assert_eq!(recovered.rows[0][0].name(), Some("<a & b>"));
    }
}
