use crate::error::{Dimension, Error, Result};
use serde::{Deserialize, Serialize};
use tracy_full::zone;

pub const RGBA_BYTES_PER_PIXEL: usize = 4;

/// One full-size painted stratum of the map (floor, walls, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    name: String,
    width: u32,
    height: u32,
    bytes_per_pixel: usize,
    pixels: Vec<u8>,
}

impl Layer {
    /// A layer of RGBA8 pixels.
    pub fn new(name: impl Into<String>, width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_format(name, width, height, RGBA_BYTES_PER_PIXEL, pixels)
    }

    pub fn with_format(
        name: impl Into<String>,
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
        pixels: Vec<u8>,
    ) -> Self {
        Layer {
            name: name.into(),
            width,
            height,
            bytes_per_pixel,
            pixels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bytes_per_pixel
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    pub fn new(width: u32, height: u32) -> Self {
        TileSize { width, height }
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Shared shape of a validated layer set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LayerGeometry {
    pub width: u32,
    pub height: u32,
    pub bytes_per_pixel: usize,
    /// Tiles per layer row.
    pub columns: u32,
    /// Tile rows per layer.
    pub rows: u32,
}

impl LayerGeometry {
    pub fn tiles_per_layer(&self) -> usize {
        self.columns as usize * self.rows as usize
    }
}

/// Checks that every layer can be cut into the same grid of `tile` sized blocks.
pub fn validate_layers(layers: &[Layer], tile: TileSize) -> Result<LayerGeometry> {
    zone!("validate_layers");
    if tile.width == 0 || tile.height == 0 {
        return Err(Error::InvalidTileSize {
            width: tile.width,
            height: tile.height,
        });
    }
    let reference = layers.first().ok_or(Error::EmptyInput)?;

    for layer in layers {
        if layer.bytes_per_pixel == 0 {
            return Err(Error::UnsupportedPixelFormat(0));
        }
        let expected = layer.expected_len();
        if layer.pixels.len() != expected {
            return Err(Error::BufferSize {
                layer: layer.name.clone(),
                width: layer.width,
                height: layer.height,
                bytes_per_pixel: layer.bytes_per_pixel,
                expected,
                actual: layer.pixels.len(),
            });
        }
        if layer.width == 0 || layer.height == 0 {
            return Err(Error::EmptyLayer {
                layer: layer.name.clone(),
            });
        }
        if layer.width != reference.width || layer.height != reference.height {
            return Err(Error::DimensionMismatch {
                layer: layer.name.clone(),
                width: layer.width,
                height: layer.height,
                reference: reference.name.clone(),
                expected_width: reference.width,
                expected_height: reference.height,
            });
        }
        if layer.bytes_per_pixel != reference.bytes_per_pixel {
            return Err(Error::PixelFormatMismatch {
                layer: layer.name.clone(),
                expected: reference.bytes_per_pixel,
                actual: layer.bytes_per_pixel,
            });
        }
    }

    for (dimension, size, tile_size) in [
        (Dimension::Width, reference.width, tile.width),
        (Dimension::Height, reference.height, tile.height),
    ] {
        let remainder = size % tile_size;
        if remainder != 0 {
            return Err(Error::Alignment {
                layer: reference.name.clone(),
                dimension,
                size,
                tile: tile_size,
                remainder,
            });
        }
    }

    Ok(LayerGeometry {
        width: reference.width,
        height: reference.height,
        bytes_per_pixel: reference.bytes_per_pixel,
        columns: reference.width / tile.width,
        rows: reference.height / tile.height,
    })
}
