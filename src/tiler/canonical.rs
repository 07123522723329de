use super::{layer::TileSize, orientation::Orientation};
use crate::hash::{xxh64, xxh64_hex};
use std::{
    hash::{Hash, Hasher},
    sync::Arc,
};
use tracy_full::zone;

/// Orientation independent key for a tile's content.
///
/// Holds the canonical bytes themselves, so two signatures are only equal when
/// the pixels are. The digest is only used to spread keys across hash buckets.
#[derive(Clone, Debug)]
pub struct CanonicalSignature {
    digest: u64,
    pixels: Arc<[u8]>,
}

impl CanonicalSignature {
    pub fn from_pixels(pixels: Vec<u8>) -> Self {
        CanonicalSignature {
            digest: xxh64(&pixels),
            pixels: pixels.into(),
        }
    }

    pub fn digest(&self) -> u64 {
        self.digest
    }

    pub fn hex(&self) -> String {
        xxh64_hex(&self.pixels)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub(crate) fn shared_pixels(&self) -> Arc<[u8]> {
        Arc::clone(&self.pixels)
    }
}

impl PartialEq for CanonicalSignature {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.pixels == other.pixels
    }
}

impl Eq for CanonicalSignature {}

impl Hash for CanonicalSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest);
    }
}

#[derive(Clone, Debug)]
pub struct Canonical {
    pub signature: CanonicalSignature,
    /// Maps the input tile onto the canonical pixels.
    pub to_canonical: Orientation,
}

impl Canonical {
    /// Maps the canonical pixels back onto the input tile.
    pub fn restore(&self) -> Orientation {
        self.to_canonical.inverse()
    }
}

/// Picks the lexicographically smallest orientation of a tile as its canonical
/// form. Symmetric tiles reach the same bytes from several orientations; the
/// earliest one in [`Orientation::ALL`] is kept.
pub fn canonicalize(pixels: &[u8], tile: TileSize, bytes_per_pixel: usize) -> Canonical {
    zone!("canonicalize");
    let mut best = pixels.to_vec();
    let mut best_orientation = Orientation::IDENTITY;
    for &orientation in &Orientation::orbit(tile.is_square())[1..] {
        let candidate = orientation.apply(pixels, tile.width, tile.height, bytes_per_pixel);
        if candidate < best {
            best = candidate;
            best_orientation = orientation;
        }
    }
    Canonical {
        signature: CanonicalSignature::from_pixels(best),
        to_canonical: best_orientation,
    }
}

/// A tile whose bytes are all zero, i.e. fully transparent black in RGBA.
pub fn is_blank(pixels: &[u8]) -> bool {
    pixels.iter().all(|&byte| byte == 0)
}
