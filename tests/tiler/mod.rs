use map_tiler::tiler::{orientation::Orientation, Layer};

mod extract;
mod orientation;
mod pipeline;
mod tilemap;

pub const BPP: usize = 4;

/// Deterministic noise, distinct per seed. Practically never symmetric.
pub fn noise_tile(seed: u64, width: u32, height: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9e37_79b9_7f4a_7c15).wrapping_add(0x2545_f491_4f6c_dd1d);
    (0..width as usize * height as usize * BPP)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            (state >> 56) as u8
        })
        .collect()
}

pub fn orient(orientation: Orientation, pixels: &[u8], width: u32, height: u32) -> Vec<u8> {
    orientation.apply(pixels, width, height, BPP)
}

/// Lays `tiles` out row-major on a `columns` wide grid.
pub fn compose_layer(
    name: &str,
    tiles: &[Vec<u8>],
    columns: u32,
    tile_width: u32,
    tile_height: u32,
) -> Layer {
    let rows = tiles.len() as u32 / columns;
    let width = columns * tile_width;
    let height = rows * tile_height;
    let stride = width as usize * BPP;
    let row_bytes = tile_width as usize * BPP;
    let mut pixels = vec![0; stride * height as usize];
    for (index, tile) in tiles.iter().enumerate() {
        let col = index as u32 % columns;
        let row = index as u32 / columns;
        for (line, source) in tile.chunks_exact(row_bytes).enumerate() {
            let start = (row as usize * tile_height as usize + line) * stride
                + col as usize * row_bytes;
            pixels[start..start + row_bytes].copy_from_slice(source);
        }
    }
    Layer::new(name, width, height, pixels)
}

/// Reads the tile at grid position `(col, row)` back out of a layer.
pub fn tile_at(layer: &Layer, col: u32, row: u32, tile_width: u32, tile_height: u32) -> Vec<u8> {
    let stride = layer.width() as usize * BPP;
    let row_bytes = tile_width as usize * BPP;
    let mut pixels = Vec::with_capacity(row_bytes * tile_height as usize);
    for line in 0..tile_height as usize {
        let start = (row as usize * tile_height as usize + line) * stride + col as usize * row_bytes;
        pixels.extend_from_slice(&layer.pixels()[start..start + row_bytes]);
    }
    pixels
}

/// Two 64x32 layers of 16x16 tiles, the second one mirrored tile by tile.
pub fn mirrored_pair() -> Vec<Layer> {
    let tiles: Vec<Vec<u8>> = (0..8).map(|seed| noise_tile(seed, 16, 16)).collect();
    let mirrored: Vec<Vec<u8>> = tiles
        .iter()
        .map(|tile| orient(Orientation::FLIP_H, tile, 16, 16))
        .collect();
    vec![
        compose_layer("floor", &tiles, 4, 16, 16),
        compose_layer("walls", &mirrored, 4, 16, 16),
    ]
}
