use crate::artifact::{ArtifactKind, SETTINGS_KEY, tile_key, visible_rgba8};
use crate::color::bar_color;
use crate::error::Result;
use crate::image::RgbaImage;
use crate::layout::Palette;
use crate::render::Renderer;

/// PNG renderer
///
/// Each tile of size `(w, h)` at `(l, t)` gets its background over rows
/// `t..=t+h-bar-1` and the bar over `t+h-bar..=t+h`. The bar is capped at
/// `h - 1` rows so the background always covers the tile's origin pixel.
/// Pixels outside any tile stay transparent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterRenderer;

impl RasterRenderer {
    /// Paint the palette without encoding it
    pub fn paint(&self, palette: &Palette) -> Result<RgbaImage> {
        let settings = palette.settings();
        let size = palette.size();
        let mut image = RgbaImage::new(size.x, size.y);
        image.set_text(SETTINGS_KEY, settings.encode()?);

        let (_, cell_h) = settings.cell_size();
        let bar = (settings.bar_height as i64).min(cell_h as i64 - 2).max(0);
        if bar != settings.bar_height as i64 {
            log::warn!(
                "bar height {} does not fit a {}px cell, using {}",
                settings.bar_height,
                cell_h,
                bar
            );
        }
        for (n, tile) in palette.tiles().enumerate() {
            let (l, t) = (tile.pos.x as i64, tile.pos.y as i64);
            let (w, h) = (tile.size.x as i64, tile.size.y as i64);

            // Bar first: in a one-pixel-high cell the background wins
            image.fill_rect((l, t + h - bar), (l + w, t + h), visible_rgba8(&bar_color(tile.color)));
            image.fill_rect((l, t), (l + w, (t + h - bar - 1).max(t)), visible_rgba8(tile.color));

            if !tile.color.text().is_empty() {
                image.set_text(tile_key(n), tile.color.text().encode());
            }
        }
        Ok(image)
    }
}

impl Renderer for RasterRenderer {
    fn kind(&self) -> ArtifactKind {
        ArtifactKind::Raster
    }

    fn render(&self, palette: &Palette) -> Result<Vec<u8>> {
        self.paint(palette)?.encode_png()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Space, TextMeta};
    use crate::settings::Settings;

    fn palette(colors: Vec<Color>) -> Palette {
        Palette::from_list(colors, Settings::default().with_cell_size(20, 20))
    }

    #[test]
    fn test_background_and_bar() {
        let red = Color::from_hex("ff0000").unwrap();
        let image = RasterRenderer.paint(&palette(vec![red.clone()])).unwrap();
        assert_eq!((image.width(), image.height()), (20, 20));

        let bar = bar_color(&red).rgba8();
        assert_eq!(image.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(image.pixel(19, 7), [255, 0, 0, 255]);
        // h = 19, bar = 10: background ends at row 8, bar starts at row 9
        assert_eq!(image.pixel(0, 8), [255, 0, 0, 255]);
        assert_eq!(image.pixel(0, 9), bar);
        assert_eq!(image.pixel(19, 19), bar);
    }

    #[test]
    fn test_text_only_for_labelled_tiles() {
        let named = Color::from_hex("00ff00").unwrap().with_name("green");
        let plain = Color::from_hex("0000ff").unwrap();
        let image = RasterRenderer
            .paint(&palette(vec![plain, Color::transparent(), named]))
            .unwrap();

        assert!(image.text_value(SETTINGS_KEY).is_some());
        assert!(image.text_value("color0").is_none());
        // Transparent cells do not advance the key counter
        let meta = TextMeta::decode(image.text_value("color1").unwrap()).unwrap();
        assert_eq!(meta.name.as_deref(), Some("green"));
        assert_eq!(image.text().len(), 2);
    }

    #[test]
    fn test_transparent_cells_stay_empty() {
        let red = Color::from_hex("ff0000").unwrap();
        let image = RasterRenderer
            .paint(&palette(vec![Color::transparent(), red]))
            .unwrap();
        assert_eq!(image.pixel(5, 5), [0; 4]);
        assert_eq!(image.pixel(25, 5), [255, 0, 0, 255]);
    }

    #[test]
    fn test_faint_tile_is_still_painted() {
        let faint = Color::from_space_values(Space::Rgb, &[0.2, 0.4, 0.6, 0.001])
            .unwrap()
            .with_name("faint");
        let red = Color::from_hex("ff0000").unwrap().with_name("red");
        let image = RasterRenderer.paint(&palette(vec![faint, red])).unwrap();

        assert_eq!(image.pixel(0, 0), [51, 102, 153, 1]);
        let meta = TextMeta::decode(image.text_value("color1").unwrap()).unwrap();
        assert_eq!(meta.name.as_deref(), Some("red"));
    }

    #[test]
    fn test_oversized_bar_keeps_background_at_origin() {
        let red = Color::from_hex("ff0000").unwrap();
        let mut settings = Settings::default().with_cell_size(20, 20);
        settings.bar_height = 40;
        let image = RasterRenderer
            .paint(&Palette::from_list(vec![red.clone()], settings))
            .unwrap();
        assert_eq!(image.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(image.pixel(0, 1), bar_color(&red).rgba8());

        let tiny = Settings::default().with_cell_size(20, 1);
        let image = RasterRenderer
            .paint(&Palette::from_list(vec![red], tiny))
            .unwrap();
        assert_eq!(image.pixel(0, 0), [255, 0, 0, 255]);
    }

    #[test]
    fn test_render_is_png() {
        let bytes = RasterRenderer
            .render(&palette(vec![Color::from_hex("123456").unwrap()]))
            .unwrap();
        assert_eq!(ArtifactKind::detect(&bytes), Some(ArtifactKind::Raster));
    }
}
