//! Grid layout properties over many palette sizes

use prevgen_core::{Color, Distance, Palette, Settings};
use prevgen_tests::{PalettePattern, generate_colors, init_logging};

#[test]
fn test_grid_fits_every_color() {
    init_logging();
    for n in 1..=200usize {
        let palette = Palette::from_list(
            generate_colors(PalettePattern::Random(n as u64), n),
            Settings::default(),
        );
        let (w, h) = (palette.width() as usize, palette.height() as usize);

        assert!(w * h >= n, "{} colors in {}x{}", n, w, h);
        assert!(w >= h, "{}: wider than tall", n);
        assert_eq!(h, n.isqrt(), "{}: height", n);
        // One column fewer would not fit
        assert!((w - 1) * h < n, "{}: {}x{} is not minimal", n, w, h);
        assert_eq!(palette.cells().len(), w * h);
        assert_eq!(palette.visible_count(), n);
    }
}

#[test]
fn test_known_shapes() {
    init_logging();
    for (n, shape) in [(1, (1, 1)), (4, (2, 2)), (5, (3, 2)), (8, (4, 2)), (10, (4, 3)), (16, (4, 4))] {
        let palette = Palette::from_list(
            generate_colors(PalettePattern::Grayscale, n),
            Settings::default(),
        );
        assert_eq!((palette.width(), palette.height()), shape, "{} colors", n);
    }
}

#[test]
fn test_tiles_in_row_major_order() {
    init_logging();
    let settings = Settings::default().with_cell_size(50, 40);
    let colors = generate_colors(PalettePattern::Mixed(9), 30);
    let palette = Palette::from_list(colors.clone(), settings);

    let expected: Vec<&Color> = colors.iter().filter(|c| !c.is_transparent()).collect();
    let tiles: Vec<_> = palette.tiles().collect();
    assert_eq!(tiles.len(), expected.len());

    let mut last = None;
    for (tile, want) in tiles.iter().zip(expected) {
        assert_eq!(tile.color, want);
        assert_eq!(tile.size, Distance::new(49, 39));
        assert_eq!(tile.pos.x, tile.cell.x * 50);
        assert_eq!(tile.pos.y, tile.cell.y * 40);
        let key = (tile.cell.y, tile.cell.x);
        assert!(last.is_none_or(|prev| prev < key), "tiles out of order");
        last = Some(key);
    }
}

#[test]
fn test_image_size_matches_grid() {
    init_logging();
    let settings = Settings::default().with_cell_size(17, 23);
    let palette = Palette::from_list(generate_colors(PalettePattern::ColorCube, 11), settings);
    assert_eq!(palette.size(), Distance::new(17 * palette.width(), 23 * palette.height()));
}

#[test]
fn test_ragged_rows_are_padded() {
    init_logging();
    let rows = vec![
        generate_colors(PalettePattern::Random(1), 2),
        generate_colors(PalettePattern::Random(2), 5),
        Vec::new(),
    ];
    let palette = Palette::from_rows(rows, Settings::default());
    assert_eq!((palette.width(), palette.height()), (5, 3));
    assert_eq!(palette.visible_count(), 7);
    assert!(palette.get(4, 0).is_some_and(Color::is_transparent));
    assert!(palette.get(0, 2).is_some_and(Color::is_transparent));
    assert!(palette.get(5, 0).is_none());
}

#[test]
fn test_empty_palette() {
    init_logging();
    let palette = Palette::from_list(Vec::new(), Settings::default());
    assert_eq!(palette.visible_count(), 0);
    assert_eq!(palette.tiles().count(), 0);
    assert_eq!(palette.size(), Distance::new(0, 0));
}
