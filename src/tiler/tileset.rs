use super::{
    dedup::{TileId, TileTable},
    layer::TileSize,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracy_full::zone;

/// How the atlas grid is sized for a given number of tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum AtlasLayout {
    /// Smallest column count whose square holds every tile.
    #[default]
    Square,
    Fixed { columns: u32 },
    /// Power of two columns (and rows). With `square` the row count matches
    /// the column count, otherwise it is the smallest power of two that fits.
    PowerOfTwo {
        #[serde(default)]
        square: bool,
    },
}

impl AtlasLayout {
    /// `(columns, rows)` for `tile_count` tiles. Never smaller than 1x1.
    pub fn grid(&self, tile_count: u32) -> Result<(u32, u32)> {
        let (columns, rows) = match *self {
            AtlasLayout::Square => {
                let columns = ceil_sqrt(tile_count).max(1);
                (columns, tile_count.div_ceil(columns))
            }
            AtlasLayout::Fixed { columns } => {
                if columns == 0 {
                    return Err(Error::InvalidColumns(columns));
                }
                (columns, tile_count.div_ceil(columns))
            }
            AtlasLayout::PowerOfTwo { square } => {
                let columns = ceil_sqrt(tile_count).max(1).next_power_of_two();
                let rows = if square {
                    columns
                } else {
                    tile_count.div_ceil(columns).max(1).next_power_of_two()
                };
                (columns, rows)
            }
        };
        Ok((columns, rows.max(1)))
    }
}

fn ceil_sqrt(value: u32) -> u32 {
    let mut root = (value as f64).sqrt() as u32;
    while (root as u64) * (root as u64) < value as u64 {
        root += 1;
    }
    while root > 0 && ((root - 1) as u64) * ((root - 1) as u64) >= value as u64 {
        root -= 1;
    }
    root
}

/// Everything a map consumer needs to find a tile inside the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TilesetGeometry {
    pub tile_width: u32,
    pub tile_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub tile_count: u32,
    pub image_width: u32,
    pub image_height: u32,
}

impl TilesetGeometry {
    pub fn cell_of(&self, id: TileId) -> (u32, u32) {
        (id % self.columns, id / self.columns)
    }

    pub fn pixel_offset(&self, id: TileId) -> (u32, u32) {
        let (col, row) = self.cell_of(id);
        (col * self.tile_width, row * self.tile_height)
    }
}

/// The deduplicated tiles packed row-major into one atlas image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tileset {
    geometry: TilesetGeometry,
    bytes_per_pixel: usize,
    pixels: Vec<u8>,
}

impl Tileset {
    pub fn assemble(
        table: &TileTable,
        tile: TileSize,
        bytes_per_pixel: usize,
        layout: AtlasLayout,
    ) -> Result<Tileset> {
        zone!("assemble_tileset");
        let tile_count = table.len() as u32;
        let (columns, rows) = layout.grid(tile_count)?;
        let geometry = TilesetGeometry {
            tile_width: tile.width,
            tile_height: tile.height,
            columns,
            rows,
            tile_count,
            image_width: columns * tile.width,
            image_height: rows * tile.height,
        };

        let stride = geometry.image_width as usize * bytes_per_pixel;
        let row_bytes = tile.width as usize * bytes_per_pixel;
        // Cells past the last tile stay zeroed, i.e. transparent.
        let mut pixels = vec![0; stride * geometry.image_height as usize];
        for (id, tile_pixels) in table.iter() {
            zone!("place_tile");
            let (x, y) = geometry.pixel_offset(id);
            for (line, source) in tile_pixels.chunks_exact(row_bytes).enumerate() {
                let start = (y as usize + line) * stride + x as usize * bytes_per_pixel;
                pixels[start..start + row_bytes].copy_from_slice(source);
            }
        }

        Ok(Tileset {
            geometry,
            bytes_per_pixel,
            pixels,
        })
    }

    pub fn geometry(&self) -> TilesetGeometry {
        self.geometry
    }

    pub fn width(&self) -> u32 {
        self.geometry.image_width
    }

    pub fn height(&self) -> u32 {
        self.geometry.image_height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    pub fn tile_count(&self) -> u32 {
        self.geometry.tile_count
    }

    pub fn cell_of(&self, id: TileId) -> (u32, u32) {
        self.geometry.cell_of(id)
    }

    pub fn pixel_offset(&self, id: TileId) -> (u32, u32) {
        self.geometry.pixel_offset(id)
    }

    /// Atlas pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Reads one tile back out of the atlas.
    pub fn tile_pixels(&self, id: TileId) -> Option<Vec<u8>> {
        if id >= self.geometry.tile_count {
            return None;
        }
        let (x, y) = self.pixel_offset(id);
        let stride = self.geometry.image_width as usize * self.bytes_per_pixel;
        let row_bytes = self.geometry.tile_width as usize * self.bytes_per_pixel;
        let mut output = Vec::with_capacity(row_bytes * self.geometry.tile_height as usize);
        for line in 0..self.geometry.tile_height as usize {
            let start = (y as usize + line) * stride + x as usize * self.bytes_per_pixel;
            output.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        Some(output)
    }
}
