use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::artifact::{ArtifactKind, ROLE_ATTR, Role};
use crate::color::{bar_color, text_color};
use crate::error::Result;
use crate::layout::{Palette, Tile};
use crate::render::Renderer;
use crate::settings::Settings;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Font weight used when `font_opts` names none
const DEFAULT_WEIGHT: u32 = 700;

/// SVG renderer
///
/// Emits a hidden `metadata` text element with the encoded settings, then
/// per visible tile a `background` and a `bar` rectangle followed by its
/// `name`, `hex`, `desc-left` and `desc-right` text elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorRenderer;

impl VectorRenderer {
    /// Render to an SVG string
    pub fn render_string(&self, palette: &Palette) -> Result<String> {
        let bytes = self.render(palette)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Renderer for VectorRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Vector
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        let settings = palette.settings();
        let size = palette.size();
        let (width, height) = (size.x.to_string(), size.y.to_string());
        let view_box = format!("0 0 {} {}", size.x, size.y);

        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut svg = BytesStart::new("svg");
        svg.push_attribute(("xmlns", SVG_NS));
        svg.push_attribute(("width", width.as_str()));
        svg.push_attribute(("height", height.as_str()));
        svg.push_attribute(("viewBox", view_box.as_str()));
        writer.write_event(Event::Start(svg))?;

        write_text(&mut writer, "style", &[], &font_rule(settings))?;
        write_text(
            &mut writer,
            "text",
            &[(ROLE_ATTR, Role::Metadata.as_str()), ("display", "none")],
            &settings.encode()?,
        )?;

        for tile in palette.tiles() {
            write_tile(&mut writer, settings, &tile)?;
        }

        writer.write_event(Event::End(BytesEnd::new("svg")))?;
        Ok(writer.into_inner())
    }
}

fn font_rule(settings: &Settings) -> String {
    let weight = settings.font_opts.get("wght").copied().unwrap_or(DEFAULT_WEIGHT);
    format!(
        "text{{font-family:{},Calibri,sans-serif;font-weight:{};}}",
        settings.font_name, weight
    )
}

fn write_tile(writer: &mut Writer<Vec<u8>>, settings: &Settings, tile: &Tile<'_>) -> Result<()> {
    let color = tile.color;
    let (l, t) = (tile.pos.x as f64, tile.pos.y as f64);
    let (w, h) = (tile.size.x as f64, tile.size.y as f64);
    // Same cap as the raster renderer: the background keeps at least one row
    let bar = (settings.bar_height as f64).min((h - 1.0).max(0.0));

    let fill = color.hex();
    let bar_fill = bar_color(color).hex();
    let text_fill = text_color(color).hex();
    let opacity = color.alpha().to_string();

    let rect = |role: Role, y: f64, height: f64, fill: &str| -> Vec<(String, String)> {
        vec![
            (ROLE_ATTR.to_string(), role.as_str().to_string()),
            ("x".to_string(), l.to_string()),
            ("y".to_string(), y.to_string()),
            ("width".to_string(), (w + 1.0).to_string()),
            ("height".to_string(), height.max(0.0).to_string()),
            ("fill".to_string(), fill.to_string()),
            ("fill-opacity".to_string(), opacity.clone()),
            ("stroke".to_string(), fill.to_string()),
        ]
    };
    write_empty(writer, "rect", &rect(Role::Background, t, h - bar + 1.0, &fill))?;
    write_empty(writer, "rect", &rect(Role::Bar, t + h - bar + 1.0, bar, &bar_fill))?;

    let label = |role: Role, x: f64, y: f64, size: u32, anchor: &str| -> Vec<(String, String)> {
        vec![
            (ROLE_ATTR.to_string(), role.as_str().to_string()),
            ("x".to_string(), x.to_string()),
            ("y".to_string(), y.to_string()),
            ("fill".to_string(), text_fill.clone()),
            ("fill-opacity".to_string(), opacity.clone()),
            ("font-size".to_string(), size.to_string()),
            ("text-anchor".to_string(), anchor.to_string()),
            ("dominant-baseline".to_string(), "middle".to_string()),
        ]
    };

    let hex = color.display_hex(settings);
    let (cx, cy) = (l + w / 2.0, t + h / 2.0);
    match color.name() {
        Some(name) => {
            let attrs = label(Role::Name, cx, cy + settings.name_offset as f64, settings.name_size, "middle");
            write_text_owned(writer, &attrs, name)?;
            let attrs = label(Role::Hex, cx, cy + settings.hex_offset as f64, settings.hex_size, "middle");
            write_text_owned(writer, &attrs, &hex)?;
        }
        None => {
            let attrs = label(
                Role::Hex,
                cx,
                cy + settings.hex_offset_nameless as f64,
                settings.hex_size_nameless,
                "middle",
            );
            write_text_owned(writer, &attrs, &hex)?;
        }
    }

    let desc_y = t + settings.desc_size as f64 / 2.0 + settings.desc_offset_y as f64;
    if let Some(left) = color.desc_left() {
        let x = l + settings.desc_offset_x as f64;
        let attrs = label(Role::DescLeft, x, desc_y, settings.desc_size, "start");
        write_text_owned(writer, &attrs, left)?;
    }
    if let Some(right) = color.desc_right() {
        let x = l + w - 1.0 - settings.desc_offset_x as f64;
        let attrs = label(Role::DescRight, x, desc_y, settings.desc_size, "end");
        write_text_owned(writer, &attrs, right)?;
    }
    Ok(())
}

fn start<'a>(name: &'a str, attrs: impl IntoIterator<Item = (&'a str, &'a str)>) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for attr in attrs {
        element.push_attribute(attr);
    }
    element
}

fn write_empty(writer: &mut Writer<Vec<u8>>, name: &str, attrs: &[(String, String)]) -> Result<()> {
    let element = start(name, attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn write_text(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    attrs: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    writer.write_event(Event::Start(start(name, attrs.iter().copied())))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn write_text_owned(writer: &mut Writer<Vec<u8>>, attrs: &[(String, String)], text: &str) -> Result<()> {
    let attrs: Vec<(&str, &str)> = attrs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    write_text(writer, "text", &attrs, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn render(colors: Vec<Color>, settings: Settings) -> String {
        VectorRenderer
            .render_string(&Palette::from_list(colors, settings))
            .unwrap()
    }

    #[test]
    fn test_document_shape() {
        let svg = render(
            vec![Color::from_hex("ff0000").unwrap()],
            Settings::default().with_cell_size(20, 20),
        );
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20""#));
        assert!(svg.contains(r#"<text role="metadata" display="none">"#));
        assert!(svg.contains(r#"role="background" x="0" y="0""#));
        assert!(svg.contains(r#"role="bar""#));
        assert!(svg.contains(">FF0000</text>"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_labels_follow_text() {
        let color = Color::from_hex("52c7a7")
            .unwrap()
            .with_name("a & b")
            .with_descriptions(Some("left"), None::<String>);
        let svg = render(vec![color], Settings::default());
        assert!(svg.contains(r#"role="name""#));
        assert!(svg.contains("a &amp; b"));
        assert!(svg.contains(r#"role="desc-left""#));
        assert!(!svg.contains(r#"role="desc-right""#));
    }

    #[test]
    fn test_font_rule() {
        let mut settings = Settings::default();
        assert!(font_rule(&settings).contains("font-family:Nunito,Calibri,sans-serif;font-weight:700;"));
        settings.font_opts.insert("wght".to_string(), 400);
        settings.font_name = "Inter".to_string();
        assert!(font_rule(&settings).contains("font-family:Inter,Calibri,sans-serif;font-weight:400;"));
    }

    #[test]
    fn test_transparent_tiles_not_drawn() {
        let svg = render(
            vec![Color::transparent(), Color::from_hex("00ff00").unwrap()],
            Settings::default(),
        );
        assert_eq!(svg.matches(r#"role="background""#).count(), 1);
    }
}
