use super::mirrored_pair;
use map_tiler::{
    json,
    tiler::{build, AtlasLayout, StoredOrientation, TilerOptions, TilerOutput},
};
use serde_json::Value;

fn mirrored_output() -> TilerOutput {
    build(
        &mirrored_pair(),
        &TilerOptions {
            tile_width: 16,
            tile_height: 16,
            ..Default::default()
        },
    )
    .unwrap()
}

#[test]
fn options_fill_in_defaults() {
    let options: TilerOptions = serde_json::from_str(r#"{ "tile_width": 32 }"#).unwrap();
    assert_eq!(options.tile_width, 32);
    assert_eq!(options.tile_height, 64);
    assert_eq!(options.first_gid, 1);
    assert_eq!(options.atlas, AtlasLayout::Square);
    assert_eq!(options.stored_orientation, StoredOrientation::FirstSeen);
    assert!(options.parallel);
    assert!(!options.skip_blank_tiles);

    let options: TilerOptions = serde_json::from_str(
        r#"{ "atlas": { "layout": "power_of_two", "square": true }, "stored_orientation": "canonical" }"#,
    )
    .unwrap();
    assert_eq!(options.atlas, AtlasLayout::PowerOfTwo { square: true });
    assert_eq!(options.stored_orientation, StoredOrientation::Canonical);
}

#[test]
fn json_document_mirrors_the_tilemap() {
    let output = mirrored_output();
    let document = json::to_json(&output.tilemap, "tileset", "tileset.png").unwrap();
    let value: Value = serde_json::from_str(&document).unwrap();

    assert_eq!(value["width"], 4);
    assert_eq!(value["height"], 2);
    assert_eq!(value["tilewidth"], 16);
    assert_eq!(value["renderorder"], "left-up");
    let tileset = &value["tilesets"][0];
    assert_eq!(tileset["firstgid"], 1);
    assert_eq!(tileset["image"], "tileset.png");
    assert_eq!(tileset["tilecount"], 8);
    assert_eq!(tileset["columns"], output.tileset.geometry().columns);
    assert_eq!(tileset["imagewidth"], output.tileset.width());

    let layers = value["layers"].as_array().unwrap();
    assert_eq!(layers.len(), 2);
    for (layer, expected) in layers.iter().zip(&output.tilemap.layers) {
        assert_eq!(layer["name"], expected.name.as_str());
        let data: Vec<u32> = serde_json::from_value(layer["data"].clone()).unwrap();
        assert_eq!(data, expected.cells);
    }
    assert_eq!(layers[1]["data"][0], 0x8000_0001u32);
}

#[cfg(feature = "tmx")]
#[test]
fn tmx_document_has_csv_layers() {
    use map_tiler::tmx;

    let output = mirrored_output();
    let document = tmx::to_tmx(&output.tilemap, "a \"quoted\" set", "art/tileset.png").unwrap();
    assert!(document.starts_with("<?xml"));
    assert!(document.contains(r#"renderorder="left-up""#));
    assert!(document.contains(r#"name="a &quot;quoted&quot; set""#));
    assert!(document.contains(r#"<image source="art/tileset.png" width="48" height="48"/>"#));
    assert!(document.contains(r#"<layer id="1" name="floor" width="4" height="2">"#));
    assert!(document.contains("1,2,3,4,\n5,6,7,8\n</data>"));
    assert!(document.contains("2147483649,2147483650,2147483651,2147483652,\n"));
    assert!(document.trim_end().ends_with("</map>"));
}
