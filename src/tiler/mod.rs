// Flip-aware tile deduplication: layers in, one atlas plus one cell grid per layer out.
pub mod canonical;
pub mod dedup;
pub mod extract;
pub mod layer;
pub mod orientation;
pub mod tilemap;
pub mod tileset;

pub use canonical::{canonicalize, Canonical, CanonicalSignature};
pub use dedup::{
    Cell, DedupStats, Deduplication, Deduplicator, StoredOrientation, TileId, TileOccurrence,
    TileTable,
};
pub use extract::{extract_all, extract_tiles, RawTile};
pub use layer::{validate_layers, Layer, LayerGeometry, TileSize};
pub use orientation::Orientation;
pub use tilemap::{decode_cell, encode_cell, MapLayer, ResolvedCell, TileMap};
pub use tileset::{AtlasLayout, Tileset, TilesetGeometry};

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracy_full::zone;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilerOptions {
    pub tile_width: u32,
    pub tile_height: u32,
    /// Added to every tile identity in the map. 0 is reserved for empty cells.
    pub first_gid: u32,
    pub atlas: AtlasLayout,
    pub skip_blank_tiles: bool,
    pub stored_orientation: StoredOrientation,
    pub parallel: bool,
}

impl Default for TilerOptions {
    fn default() -> Self {
        TilerOptions {
            tile_width: 64,
            tile_height: 64,
            first_gid: 1,
            atlas: AtlasLayout::default(),
            skip_blank_tiles: false,
            stored_orientation: StoredOrientation::default(),
            parallel: true,
        }
    }
}

impl TilerOptions {
    pub fn tile_size(&self) -> TileSize {
        TileSize::new(self.tile_width, self.tile_height)
    }

    pub fn validate(&self) -> Result<()> {
        if self.first_gid == 0 {
            return Err(Error::InvalidFirstGid);
        }
        if let AtlasLayout::Fixed { columns: 0 } = self.atlas {
            return Err(Error::InvalidColumns(0));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct TilerOutput {
    pub geometry: LayerGeometry,
    pub table: TileTable,
    pub occurrences: Vec<Vec<TileOccurrence>>,
    pub tileset: Tileset,
    pub tilemap: TileMap,
    pub stats: DedupStats,
}

/// Runs the whole engine over a fully loaded layer set.
///
/// Identities depend on every tile that came before them, so the table is
/// completed first and both outputs are projected from it afterwards. Either
/// everything is returned or the first error is.
pub fn build(layers: &[Layer], options: &TilerOptions) -> Result<TilerOutput> {
    zone!("tiler_build");
    options.validate()?;
    let tile = options.tile_size();
    let geometry = validate_layers(layers, tile)?;

    let grids = extract_all(layers, &geometry, tile, options.parallel);
    let Deduplication {
        table,
        layers: occurrences,
        stats,
    } = Deduplicator::new(TileTable::new(), tile, geometry.bytes_per_pixel)
        .skip_blank(options.skip_blank_tiles)
        .parallel(options.parallel)
        .stored_orientation(options.stored_orientation)
        .run(grids);

    let tileset = Tileset::assemble(&table, tile, geometry.bytes_per_pixel, options.atlas)?;
    let tilemap = TileMap::build(
        layers,
        &occurrences,
        &geometry,
        tileset.geometry(),
        options.first_gid,
    )?;

    Ok(TilerOutput {
        geometry,
        table,
        occurrences,
        tileset,
        tilemap,
        stats,
    })
}
