use super::{mirrored_pair, noise_tile, orient, compose_layer};
use map_tiler::{
    error::Error,
    tiler::{
        build, decode_cell, encode_cell,
        tilemap::{FLIPPED_DIAGONALLY_FLAG, FLIPPED_HORIZONTALLY_FLAG, FLIPPED_VERTICALLY_FLAG, GID_MASK},
        Cell, Orientation, TilerOptions,
    },
};

#[test]
fn cell_code_layout() {
    let tile = |orientation| Cell::Tile { id: 0, orientation };
    assert_eq!(encode_cell(Cell::Empty, 1).unwrap(), 0);
    assert_eq!(encode_cell(tile(Orientation::IDENTITY), 1).unwrap(), 1);
    assert_eq!(
        encode_cell(tile(Orientation::FLIP_H), 1).unwrap(),
        FLIPPED_HORIZONTALLY_FLAG | 1
    );
    assert_eq!(
        encode_cell(tile(Orientation::FLIP_V), 1).unwrap(),
        FLIPPED_VERTICALLY_FLAG | 1
    );
    assert_eq!(
        encode_cell(tile(Orientation::FLIP_D), 1).unwrap(),
        FLIPPED_DIAGONALLY_FLAG | 1
    );
    assert_eq!(
        encode_cell(tile(Orientation::new(true, true, true)), 1).unwrap(),
        0xE000_0001
    );
    assert_eq!(
        encode_cell(Cell::Tile { id: 41, orientation: Orientation::IDENTITY }, 100).unwrap(),
        141
    );
}

#[test]
fn cell_codes_decode() {
    for orientation in Orientation::ALL {
        let cell = Cell::Tile { id: 12, orientation };
        let code = encode_cell(cell, 1).unwrap();
        assert_eq!(code & GID_MASK, 13);
        assert_eq!(decode_cell(code, 1), Some(cell));
    }
    assert_eq!(decode_cell(0, 1), Some(Cell::Empty));
    assert_eq!(decode_cell(5, 10), None);
}

#[test]
fn gid_range_is_enforced() {
    let last = Cell::Tile { id: GID_MASK - 1, orientation: Orientation::FLIP_H };
    assert_eq!(encode_cell(last, 1).unwrap(), GID_MASK | FLIPPED_HORIZONTALLY_FLAG);
    let over = Cell::Tile { id: GID_MASK, orientation: Orientation::IDENTITY };
    assert!(matches!(
        encode_cell(over, 1),
        Err(Error::GidOverflow { first_gid: 1, .. })
    ));
    assert!(matches!(
        encode_cell(Cell::Tile { id: 0, orientation: Orientation::IDENTITY }, u32::MAX),
        Err(Error::GidOverflow { .. })
    ));
}

#[test]
fn first_gid_zero_is_rejected() {
    let options = TilerOptions {
        tile_width: 16,
        tile_height: 16,
        first_gid: 0,
        ..Default::default()
    };
    let error = build(&mirrored_pair(), &options).unwrap_err();
    assert!(matches!(error, Error::InvalidFirstGid));
}

#[test]
fn custom_first_gid_offsets_every_cell() {
    let options = TilerOptions {
        tile_width: 16,
        tile_height: 16,
        first_gid: 100,
        ..Default::default()
    };
    let output = build(&mirrored_pair(), &options).unwrap();
    assert_eq!(output.tilemap.first_gid, 100);
    assert_eq!(output.tilemap.layers[0].cells[0], 100);
    assert_eq!(output.tilemap.layers[1].cells[7], 107 | FLIPPED_HORIZONTALLY_FLAG);
}

#[test]
fn map_keeps_layer_names_and_grid() {
    let output = build(
        &mirrored_pair(),
        &TilerOptions {
            tile_width: 16,
            tile_height: 16,
            ..Default::default()
        },
    )
    .unwrap();
    let map = &output.tilemap;
    assert_eq!((map.width, map.height), (4, 2));
    assert_eq!((map.tile_width, map.tile_height), (16, 16));
    let names: Vec<&str> = map.layers.iter().map(|layer| layer.name.as_str()).collect();
    assert_eq!(names, ["floor", "walls"]);
    assert!(map.layers.iter().all(|layer| layer.cells.len() == 8));
    assert_eq!(map.cell(1, 3, 1), Some(map.layers[1].cells[7]));
    assert_eq!(map.cell(0, 4, 0), None);
    assert_eq!(map.cell(2, 0, 0), None);
}

#[test]
fn codes_resolve_to_atlas_pixels() {
    let base: Vec<Vec<u8>> = (0..5).map(|seed| noise_tile(seed, 8, 8)).collect();
    let tiles: Vec<Vec<u8>> = (0..10)
        .map(|i| orient(Orientation::ALL[(i * 3) % 8], &base[i % 5], 8, 8))
        .collect();
    let layers = [compose_layer("floor", &tiles, 5, 8, 8)];
    let output = build(
        &layers,
        &TilerOptions {
            tile_width: 8,
            tile_height: 8,
            ..Default::default()
        },
    )
    .unwrap();
    let map = &output.tilemap;
    assert_eq!(map.resolve(0), None);
    for (position, &code) in map.layers[0].cells.iter().enumerate() {
        let resolved = map.resolve(code).unwrap();
        assert_eq!(resolved.pixel_offset, output.tileset.pixel_offset(resolved.id));
        let stored = output.tileset.tile_pixels(resolved.id).unwrap();
        assert_eq!(orient(resolved.orientation, &stored, 8, 8), tiles[position]);
    }
    let outside = map.tileset.tile_count + map.first_gid;
    assert_eq!(map.resolve(outside), None);
}
