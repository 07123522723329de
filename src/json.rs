//! Tiled-style JSON map documents.
use crate::{error::Result, tiler::TileMap};
use serde::Serialize;

#[derive(Serialize)]
struct JsonMap<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    version: &'static str,
    orientation: &'static str,
    renderorder: &'static str,
    infinite: bool,
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    nextlayerid: usize,
    nextobjectid: usize,
    tilesets: [JsonTileset<'a>; 1],
    layers: Vec<JsonLayer<'a>>,
}

#[derive(Serialize)]
struct JsonTileset<'a> {
    firstgid: u32,
    name: &'a str,
    image: &'a str,
    imagewidth: u32,
    imageheight: u32,
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    columns: u32,
    margin: u32,
    spacing: u32,
}

#[derive(Serialize)]
struct JsonLayer<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    id: usize,
    name: &'a str,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    opacity: f32,
    visible: bool,
    data: &'a [u32],
}

/// Serializes `tilemap` with an embedded tileset pointing at `tileset_image`.
pub fn to_json(tilemap: &TileMap, tileset_name: &str, tileset_image: &str) -> Result<String> {
    let geometry = &tilemap.tileset;
    let document = JsonMap {
        kind: "map",
        version: "1.10",
        orientation: "orthogonal",
        renderorder: "left-up",
        infinite: false,
        width: tilemap.width,
        height: tilemap.height,
        tilewidth: tilemap.tile_width,
        tileheight: tilemap.tile_height,
        nextlayerid: tilemap.layers.len() + 1,
        nextobjectid: 1,
        tilesets: [JsonTileset {
            firstgid: tilemap.first_gid,
            name: tileset_name,
            image: tileset_image,
            imagewidth: geometry.image_width,
            imageheight: geometry.image_height,
            tilewidth: geometry.tile_width,
            tileheight: geometry.tile_height,
            tilecount: geometry.tile_count,
            columns: geometry.columns,
            margin: 0,
            spacing: 0,
        }],
        layers: tilemap
            .layers
            .iter()
            .enumerate()
            .map(|(index, layer)| JsonLayer {
                kind: "tilelayer",
                id: index + 1,
                name: &layer.name,
                x: 0,
                y: 0,
                width: tilemap.width,
                height: tilemap.height,
                opacity: 1.0,
                visible: true,
                data: &layer.cells,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
