use std::hash::{BuildHasherDefault, Hasher};
use twox_hash::XxHash64;

/// Digests must be identical between runs and machines, so the seed is fixed
/// rather than randomized per build.
pub const XXHASH_SEED: u64 = 0x5f3c_7a1d_9e42_b816;

/// Hasher for maps keyed by values that already carry an xxh64 digest.
pub type XxBuildHasher = BuildHasherDefault<XxHash64>;

pub fn xxh64(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(XXHASH_SEED);
    hasher.write(bytes);
    hasher.finish()
}

pub fn xxh64_hex<B: AsRef<[u8]>>(bytes: B) -> String {
    format!("{:016x}", xxh64(bytes.as_ref()))
}
