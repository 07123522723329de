use super::{noise_tile, tile_at};
use map_tiler::tiler::{extract_all, extract_tiles, validate_layers, Layer, TileSize};

fn noise_layer(name: &str, seed: u64, width: u32, height: u32) -> Layer {
    Layer::new(name, width, height, noise_tile(seed, width, height))
}

#[test]
fn tiles_are_row_major() {
    let layer = noise_layer("floor", 1, 48, 32);
    let tile = TileSize::new(16, 16);
    let geometry = validate_layers(std::slice::from_ref(&layer), tile).unwrap();
    let tiles = extract_tiles(0, &layer, &geometry, tile);
    assert_eq!(tiles.len(), 6);
    let positions: Vec<(u32, u32)> = tiles.iter().map(|t| (t.col, t.row)).collect();
    assert_eq!(
        positions,
        vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
    );
    for raw in &tiles {
        assert_eq!(raw.pixels, tile_at(&layer, raw.col, raw.row, 16, 16));
    }
}

#[test]
fn every_pixel_covered_exactly_once() {
    let layer = noise_layer("floor", 2, 40, 24);
    let tile = TileSize::new(8, 12);
    let geometry = validate_layers(std::slice::from_ref(&layer), tile).unwrap();
    let tiles = extract_tiles(0, &layer, &geometry, tile);
    assert_eq!(tiles.len(), 5 * 2);

    let mut rebuilt = vec![None; layer.pixels().len()];
    let stride = 40 * 4;
    for raw in &tiles {
        for (line, bytes) in raw.pixels.chunks_exact(8 * 4).enumerate() {
            let start = (raw.row as usize * 12 + line) * stride + raw.col as usize * 8 * 4;
            for (offset, &byte) in bytes.iter().enumerate() {
                assert!(rebuilt[start + offset].is_none(), "pixel covered twice");
                rebuilt[start + offset] = Some(byte);
            }
        }
    }
    let rebuilt: Vec<u8> = rebuilt.into_iter().map(|b| b.expect("gap")).collect();
    assert_eq!(rebuilt, layer.pixels());
}

#[test]
fn parallel_extraction_keeps_layer_order() {
    let layers: Vec<Layer> = (0..6)
        .map(|seed| noise_layer(&format!("layer{seed}"), seed, 32, 32))
        .collect();
    let tile = TileSize::new(16, 16);
    let geometry = validate_layers(&layers, tile).unwrap();
    let serial = extract_all(&layers, &geometry, tile, false);
    let parallel = extract_all(&layers, &geometry, tile, true);
    assert_eq!(serial, parallel);
    for (index, grid) in parallel.iter().enumerate() {
        assert!(grid.iter().all(|raw| raw.layer == index));
    }
}
