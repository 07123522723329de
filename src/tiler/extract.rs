use super::layer::{Layer, LayerGeometry, TileSize};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracy_full::zone;

/// A tile sized block cut from a layer, before deduplication.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawTile {
    pub layer: usize,
    pub col: u32,
    pub row: u32,
    pub pixels: Vec<u8>,
}

/// Cuts a validated layer into row-major tiles.
pub fn extract_tiles(
    layer_index: usize,
    layer: &Layer,
    geometry: &LayerGeometry,
    tile: TileSize,
) -> Vec<RawTile> {
    zone!("extract_tiles");
    let bpp = geometry.bytes_per_pixel;
    let row_bytes = tile.width as usize * bpp;
    let layer_stride = geometry.width as usize * bpp;
    let source = layer.pixels();

    let mut tiles = Vec::with_capacity(geometry.tiles_per_layer());
    for row in 0..geometry.rows {
        for col in 0..geometry.columns {
            let mut pixels = Vec::with_capacity(tile.pixel_count() * bpp);
            let left = col as usize * row_bytes;
            for y in 0..tile.height as usize {
                let start = (row as usize * tile.height as usize + y) * layer_stride + left;
                pixels.extend_from_slice(&source[start..start + row_bytes]);
            }
            tiles.push(RawTile {
                layer: layer_index,
                col,
                row,
                pixels,
            });
        }
    }
    tiles
}

/// Cuts every layer, keeping layers in input order even when run in parallel.
pub fn extract_all(
    layers: &[Layer],
    geometry: &LayerGeometry,
    tile: TileSize,
    parallel: bool,
) -> Vec<Vec<RawTile>> {
    zone!("extract_all");
    if parallel {
        layers
            .par_iter()
            .enumerate()
            .map(|(index, layer)| extract_tiles(index, layer, geometry, tile))
            .collect()
    } else {
        layers
            .iter()
            .enumerate()
            .map(|(index, layer)| extract_tiles(index, layer, geometry, tile))
            .collect()
    }
}
