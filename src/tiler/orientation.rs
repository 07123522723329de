//! The eight flip/rotate orientations a square tile can take.
//!
//! An orientation is stored the way grid-map formats store it: three flags that
//! are applied diagonal first, then horizontal, then vertical. Every rotation
//! and mirror of a tile is one of these combinations, so the group is closed
//! under [`Orientation::then`] and [`Orientation::inverse`].

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Orientation {
    pub flip_h: bool,
    pub flip_v: bool,
    pub flip_d: bool,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation::new(false, false, false);
    pub const FLIP_H: Orientation = Orientation::new(true, false, false);
    pub const FLIP_V: Orientation = Orientation::new(false, true, false);
    pub const FLIP_D: Orientation = Orientation::new(false, false, true);

    /// Every orientation, identity first. The axis-preserving four come before
    /// the ones that transpose, so `ALL[..4]` is the orbit of a non-square tile.
    pub const ALL: [Orientation; 8] = [
        Orientation::new(false, false, false),
        Orientation::new(true, false, false),
        Orientation::new(false, true, false),
        Orientation::new(true, true, false),
        Orientation::new(false, false, true),
        Orientation::new(true, false, true),
        Orientation::new(false, true, true),
        Orientation::new(true, true, true),
    ];

    pub const fn new(flip_h: bool, flip_v: bool, flip_d: bool) -> Self {
        Orientation {
            flip_h,
            flip_v,
            flip_d,
        }
    }

    /// Orientations that keep a tile's shape. Transposing a non-square tile
    /// would change its size, so only the square case gets all eight.
    pub fn orbit(square: bool) -> &'static [Orientation] {
        if square {
            &Self::ALL
        } else {
            &Self::ALL[..4]
        }
    }

    /// Packs the flags as `H V D` from most to least significant bit.
    pub const fn bits(self) -> u8 {
        ((self.flip_h as u8) << 2) | ((self.flip_v as u8) << 1) | self.flip_d as u8
    }

    pub const fn from_bits(bits: u8) -> Self {
        Orientation::new(bits & 0b100 != 0, bits & 0b010 != 0, bits & 0b001 != 0)
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// The orientation equivalent to applying `self` and then `next`.
    ///
    /// A transpose moves horizontal flips onto the vertical axis and back, so
    /// when `next` transposes, the flips already applied by `self` swap axes.
    pub fn then(self, next: Orientation) -> Orientation {
        if next.flip_d {
            Orientation::new(
                next.flip_h ^ self.flip_v,
                next.flip_v ^ self.flip_h,
                !self.flip_d,
            )
        } else {
            Orientation::new(
                next.flip_h ^ self.flip_h,
                next.flip_v ^ self.flip_v,
                self.flip_d,
            )
        }
    }

    pub fn inverse(self) -> Orientation {
        if self.flip_d {
            Orientation::new(self.flip_v, self.flip_h, true)
        } else {
            self
        }
    }

    /// Size of a `width` x `height` block after this orientation is applied.
    pub fn dimensions(self, width: u32, height: u32) -> (u32, u32) {
        if self.flip_d {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Applies this orientation to a row-major pixel block.
    pub fn apply(self, pixels: &[u8], width: u32, height: u32, bytes_per_pixel: usize) -> Vec<u8> {
        if self.is_identity() {
            return pixels.to_vec();
        }
        let (out_width, out_height) = self.dimensions(width, height);
        let mut output = Vec::with_capacity(pixels.len());
        for y in 0..out_height {
            let flipped_y = if self.flip_v { out_height - 1 - y } else { y };
            for x in 0..out_width {
                let flipped_x = if self.flip_h { out_width - 1 - x } else { x };
                let (src_x, src_y) = if self.flip_d {
                    (flipped_y, flipped_x)
                } else {
                    (flipped_x, flipped_y)
                };
                let index = (src_y as usize * width as usize + src_x as usize) * bytes_per_pixel;
                output.extend_from_slice(&pixels[index..index + bytes_per_pixel]);
            }
        }
        output
    }
}
