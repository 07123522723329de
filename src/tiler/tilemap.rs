use super::{
    dedup::{Cell, TileId, TileOccurrence},
    layer::{Layer, LayerGeometry},
    orientation::Orientation,
    tileset::TilesetGeometry,
};
use crate::error::{Error, Result};
use serde::Serialize;
use tracy_full::zone;

// Cell code layout shared with grid-map editors: the top three bits carry the
// flips, the rest is the global tile id. 0 is an empty cell.
pub const FLIPPED_HORIZONTALLY_FLAG: u32 = 0x8000_0000;
pub const FLIPPED_VERTICALLY_FLAG: u32 = 0x4000_0000;
pub const FLIPPED_DIAGONALLY_FLAG: u32 = 0x2000_0000;
pub const FLIP_FLAGS: u32 =
    FLIPPED_HORIZONTALLY_FLAG | FLIPPED_VERTICALLY_FLAG | FLIPPED_DIAGONALLY_FLAG;
pub const GID_MASK: u32 = !FLIP_FLAGS;
pub const EMPTY_CELL: u32 = 0;

const FLAG_SHIFT: u32 = 29;

pub fn encode_cell(cell: Cell, first_gid: u32) -> Result<u32> {
    match cell {
        Cell::Empty => Ok(EMPTY_CELL),
        Cell::Tile { id, orientation } => {
            let gid = id
                .checked_add(first_gid)
                .filter(|gid| *gid <= GID_MASK)
                .ok_or(Error::GidOverflow {
                    tile: id,
                    first_gid,
                })?;
            Ok(gid | ((orientation.bits() as u32) << FLAG_SHIFT))
        }
    }
}

/// Inverse of [`encode_cell`]. `None` when the gid belongs below `first_gid`,
/// i.e. to some other tileset.
pub fn decode_cell(code: u32, first_gid: u32) -> Option<Cell> {
    let gid = code & GID_MASK;
    if gid == EMPTY_CELL {
        return Some(Cell::Empty);
    }
    let id = gid.checked_sub(first_gid)?;
    Some(Cell::Tile {
        id,
        orientation: Orientation::from_bits((code >> FLAG_SHIFT) as u8),
    })
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MapLayer {
    pub name: String,
    /// Row-major cell codes, `width * height` of them.
    pub cells: Vec<u32>,
}

/// Where a cell's pixels live in the atlas and how to orient them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedCell {
    pub id: TileId,
    pub pixel_offset: (u32, u32),
    pub orientation: Orientation,
}

/// Every layer re-expressed as cell codes into one tileset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TileMap {
    /// Layer width in tiles.
    pub width: u32,
    /// Layer height in tiles.
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub first_gid: u32,
    pub tileset: TilesetGeometry,
    pub layers: Vec<MapLayer>,
}

impl TileMap {
    pub fn build(
        layers: &[Layer],
        occurrences: &[Vec<TileOccurrence>],
        geometry: &LayerGeometry,
        tileset: TilesetGeometry,
        first_gid: u32,
    ) -> Result<TileMap> {
        zone!("build_tilemap");
        let map_layers = layers
            .iter()
            .zip(occurrences)
            .map(|(layer, grid)| {
                zone!("encode_layer");
                let mut cells = vec![EMPTY_CELL; geometry.tiles_per_layer()];
                for occurrence in grid {
                    let index = (occurrence.row * geometry.columns + occurrence.col) as usize;
                    cells[index] = encode_cell(occurrence.cell, first_gid)?;
                }
                Ok(MapLayer {
                    name: layer.name().to_owned(),
                    cells,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(TileMap {
            width: geometry.columns,
            height: geometry.rows,
            tile_width: tileset.tile_width,
            tile_height: tileset.tile_height,
            first_gid,
            tileset,
            layers: map_layers,
        })
    }

    pub fn cell(&self, layer: usize, col: u32, row: u32) -> Option<u32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.layers
            .get(layer)?
            .cells
            .get((row * self.width + col) as usize)
            .copied()
    }

    /// Turns a cell code back into an atlas position without consulting the
    /// tile table. `None` for empty cells and gids outside this tileset.
    pub fn resolve(&self, code: u32) -> Option<ResolvedCell> {
        match decode_cell(code, self.first_gid)? {
            Cell::Empty => None,
            Cell::Tile { id, orientation } if id < self.tileset.tile_count => Some(ResolvedCell {
                id,
                pixel_offset: self.tileset.pixel_offset(id),
                orientation,
            }),
            Cell::Tile { .. } => None,
        }
    }
}
