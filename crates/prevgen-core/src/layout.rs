//! Grid layout
//!
//! A [`Palette`] is a flattened, row-major grid of colors plus the settings
//! that size its cells. Iterating it yields one [`Tile`] per visible cell;
//! fully transparent cells are placeholders and produce nothing.

use crate::color::Color;
use crate::settings::Settings;

/// Pixel offset or extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Distance {
    pub x: u32,
    pub y: u32,
}

impl Distance {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl From<Distance> for (u32, u32) {
    fn from(d: Distance) -> Self {
        (d.x, d.y)
    }
}

/// One visible cell, produced during iteration
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    /// Top-left corner in pixels
    pub pos: Distance,
    /// Offset from the top-left to the bottom-right corner, inclusive
    pub size: Distance,
    /// Column and row in the grid
    pub cell: Distance,
    pub color: &'a Color,
}

/// Row-major grid of colors
#[derive(Debug, Clone)]
pub struct Palette {
    cells: Vec<Color>,
    settings: Settings,
    width: u32,
    height: u32,
}

impl Palette {
    /// Lay out a flat list as close to a square as possible
    ///
    /// The height is `floor(sqrt(n))` and stays fixed; the width grows until
    /// the grid holds every color. Leftover cells are transparent.
    pub fn from_list(colors: Vec<Color>, settings: Settings) -> Self {
        let n = colors.len();
        let height = n.isqrt();
        let mut width = height;
        while width * height < n {
            width += 1;
        }

        let mut cells = colors;
        cells.resize_with(width * height, Color::transparent);
        log::debug!("laid out {} colors as {}x{}", n, width, height);
        Self::from_parts(cells, settings, width, height)
    }

    /// Use the rows as given, right-padding short rows with transparent cells
    pub fn from_rows(rows: Vec<Vec<Color>>, settings: Settings) -> Self {
        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);

        let mut cells = Vec::with_capacity(width * height);
        for mut row in rows {
            row.resize_with(width, Color::transparent);
            cells.extend(row);
        }
        Self::from_parts(cells, settings, width, height)
    }

    fn from_parts(cells: Vec<Color>, settings: Settings, width: usize, height: usize) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        Self {
            cells,
            settings,
            width: width as u32,
            height: height as u32,
        }
    }

    /// Columns
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Rows
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All cells in row-major order, placeholders included
    #[inline]
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Cell at column `col`, row `row`
    pub fn get(&self, col: u32, row: u32) -> Option<&Color> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.cells.get((row * self.width + col) as usize)
    }

    /// Rows of cells, each `width` long
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Image size in pixels
    pub fn size(&self) -> Distance {
        let (cw, ch) = self.settings.cell_size();
        Distance::new(self.width * cw, self.height * ch)
    }

    /// Visible tiles in row-major order; each call starts from the first cell
    pub fn tiles(&self) -> Tiles<'_> {
        Tiles {
            palette: self,
            next: 0,
        }
    }

    /// Visible tiles
    pub fn visible_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_transparent()).count()
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = Tile<'a>;
    type IntoIter = Tiles<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

/// Iterator over the visible tiles of a [`Palette`]
#[derive(Debug, Clone)]
pub struct Tiles<'a> {
    palette: &'a Palette,
    next: usize,
}

impl<'a> Iterator for Tiles<'a> {
    type Item = Tile<'a>;

    fn next(&mut self) -> Option<Tile<'a>> {
        let palette = self.palette;
        let offset = palette.cells[self.next..]
            .iter()
            .position(|c| !c.is_transparent())?;
        let index = self.next + offset;
        self.next = index + 1;

        let (cw, ch) = palette.settings.cell_size();
        let col = index as u32 % palette.width;
        let row = index as u32 / palette.width;
        Some(Tile {
            pos: Distance::new(col * cw, row * ch),
            size: Distance::new(cw - 1, ch - 1),
            cell: Distance::new(col, row),
            color: &palette.cells[index],
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.palette.cells.len() - self.next))
    }
}
