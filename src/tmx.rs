//! TMX (XML) map documents, loadable by Tiled and the `tiled` crate.
use crate::{error::Result, tiler::TileMap};
use std::fmt::Write;

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serializes `tilemap` with an embedded tileset pointing at `tileset_image`.
/// Layer data is CSV encoded, one map row per line.
pub fn to_tmx(tilemap: &TileMap, tileset_name: &str, tileset_image: &str) -> Result<String> {
    let geometry = &tilemap.tileset;
    let mut out = String::new();
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<map version="1.10" orientation="orthogonal" renderorder="left-up" width="{}" height="{}" tilewidth="{}" tileheight="{}" infinite="0" nextlayerid="{}" nextobjectid="1">"#,
        tilemap.width,
        tilemap.height,
        tilemap.tile_width,
        tilemap.tile_height,
        tilemap.layers.len() + 1
    )?;
    writeln!(
        out,
        r#" <tileset firstgid="{}" name="{}" tilewidth="{}" tileheight="{}" tilecount="{}" columns="{}">"#,
        tilemap.first_gid,
        escape_attr(tileset_name),
        geometry.tile_width,
        geometry.tile_height,
        geometry.tile_count,
        geometry.columns
    )?;
    writeln!(
        out,
        r#"  <image source="{}" width="{}" height="{}"/>"#,
        escape_attr(tileset_image),
        geometry.image_width,
        geometry.image_height
    )?;
    writeln!(out, " </tileset>")?;

    for (index, layer) in tilemap.layers.iter().enumerate() {
        writeln!(
            out,
            r#" <layer id="{}" name="{}" width="{}" height="{}">"#,
            index + 1,
            escape_attr(&layer.name),
            tilemap.width,
            tilemap.height
        )?;
        writeln!(out, r#"  <data encoding="csv">"#)?;
        let rows = layer.cells.chunks(tilemap.width as usize);
        let last_row = rows.len().saturating_sub(1);
        for (row_index, row) in rows.enumerate() {
            let line = row
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            if row_index == last_row {
                writeln!(out, "{line}")?;
            } else {
                writeln!(out, "{line},")?;
            }
        }
        writeln!(out, "</data>")?;
        writeln!(out, " </layer>")?;
    }
    writeln!(out, "</map>")?;
    Ok(out)
}
