use super::{
    canonical::{canonicalize, is_blank, Canonical, CanonicalSignature},
    extract::RawTile,
    layer::TileSize,
    orientation::Orientation,
};
use crate::hash::XxBuildHasher;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Arc};
use tracy_full::zone;

pub type TileId = u32;

/// Which pixels an identity keeps when several orientations of it occur.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoredOrientation {
    /// The tile as painted at its first occurrence.
    #[default]
    FirstSeen,
    /// The lexicographically smallest orientation.
    Canonical,
}

#[derive(Clone, Debug)]
struct StoredTile {
    signature: CanonicalSignature,
    pixels: Arc<[u8]>,
    /// Maps the stored pixels onto the signature's canonical pixels.
    to_canonical: Orientation,
}

/// Signature to identity table for a single run. Identities are dense and
/// handed out in the order signatures are first interned.
#[derive(Clone, Debug, Default)]
pub struct TileTable {
    lookup: HashMap<CanonicalSignature, TileId, XxBuildHasher>,
    tiles: Vec<StoredTile>,
}

impl TileTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn lookup(&self, signature: &CanonicalSignature) -> Option<TileId> {
        self.lookup.get(signature).copied()
    }

    /// Stored pixels of an identity.
    pub fn pixels(&self, id: TileId) -> Option<&[u8]> {
        self.tiles.get(id as usize).map(|tile| &*tile.pixels)
    }

    pub fn signature(&self, id: TileId) -> Option<&CanonicalSignature> {
        self.tiles.get(id as usize).map(|tile| &tile.signature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, &[u8])> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(id, tile)| (id as TileId, &*tile.pixels))
    }

    /// Resolves a canonicalized tile to its identity and the orientation that
    /// turns the stored pixels back into `original`. Unseen signatures get the
    /// next identity, storing pixels according to `stored`.
    fn intern(
        &mut self,
        canonical: Canonical,
        original: &[u8],
        stored: StoredOrientation,
    ) -> (TileId, Orientation) {
        if let Some(&id) = self.lookup.get(&canonical.signature) {
            let to_canonical = self.tiles[id as usize].to_canonical;
            return (id, to_canonical.then(canonical.restore()));
        }
        let id = self.tiles.len() as TileId;
        let (pixels, to_canonical) = match stored {
            StoredOrientation::FirstSeen => (Arc::from(original), canonical.to_canonical),
            StoredOrientation::Canonical => {
                (canonical.signature.shared_pixels(), Orientation::IDENTITY)
            }
        };
        let restore = to_canonical.then(canonical.restore());
        self.lookup.insert(canonical.signature.clone(), id);
        self.tiles.push(StoredTile {
            signature: canonical.signature,
            pixels,
            to_canonical,
        });
        (id, restore)
    }
}

/// What a grid position resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    Tile { id: TileId, orientation: Orientation },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TileOccurrence {
    pub layer: usize,
    pub col: u32,
    pub row: u32,
    pub cell: Cell,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DedupStats {
    pub raw_tiles: usize,
    pub blank_tiles: usize,
    pub unique_tiles: usize,
    /// Occurrences that reuse a stored tile under a non-identity orientation.
    pub flipped_tiles: usize,
}

#[derive(Clone, Debug)]
pub struct Deduplication {
    pub table: TileTable,
    /// One row-major occurrence grid per input layer.
    pub layers: Vec<Vec<TileOccurrence>>,
    pub stats: DedupStats,
}

pub struct Deduplicator {
    table: TileTable,
    tile: TileSize,
    bytes_per_pixel: usize,
    skip_blank: bool,
    parallel: bool,
    stored: StoredOrientation,
}

impl Deduplicator {
    pub fn new(table: TileTable, tile: TileSize, bytes_per_pixel: usize) -> Self {
        Deduplicator {
            table,
            tile,
            bytes_per_pixel,
            skip_blank: false,
            parallel: false,
            stored: StoredOrientation::default(),
        }
    }

    /// Resolve all-zero tiles to [`Cell::Empty`] instead of giving them an identity.
    pub fn skip_blank(mut self, skip_blank: bool) -> Self {
        self.skip_blank = skip_blank;
        self
    }

    /// Compute signatures on the rayon pool. Identities are still committed in
    /// traversal order.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn stored_orientation(mut self, stored: StoredOrientation) -> Self {
        self.stored = stored;
        self
    }

    fn signature_of(&self, tile: &RawTile) -> Option<Canonical> {
        if self.skip_blank && is_blank(&tile.pixels) {
            return None;
        }
        Some(canonicalize(&tile.pixels, self.tile, self.bytes_per_pixel))
    }

    /// Walks the grids in layer order, then row-major within each layer.
    pub fn run(mut self, grids: Vec<Vec<RawTile>>) -> Deduplication {
        zone!("deduplicate");
        let mut stats = DedupStats::default();
        let mut layers = Vec::with_capacity(grids.len());

        for grid in grids {
            let signatures: Vec<Option<Canonical>> = if self.parallel {
                grid.par_iter().map(|tile| self.signature_of(tile)).collect()
            } else {
                grid.iter().map(|tile| self.signature_of(tile)).collect()
            };

            zone!("commit_identities");
            let mut occurrences = Vec::with_capacity(grid.len());
            for (tile, signature) in grid.iter().zip(signatures) {
                stats.raw_tiles += 1;
                let cell = match signature {
                    None => {
                        stats.blank_tiles += 1;
                        Cell::Empty
                    }
                    Some(canonical) => {
                        let (id, orientation) =
                            self.table.intern(canonical, &tile.pixels, self.stored);
                        if !orientation.is_identity() {
                            stats.flipped_tiles += 1;
                        }
                        Cell::Tile { id, orientation }
                    }
                };
                occurrences.push(TileOccurrence {
                    layer: tile.layer,
                    col: tile.col,
                    row: tile.row,
                    cell,
                });
            }
            layers.push(occurrences);
        }

        stats.unique_tiles = self.table.len();
        Deduplication {
            table: self.table,
            layers,
            stats,
        }
    }
}
