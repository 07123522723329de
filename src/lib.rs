// #![forbid(unsafe_op_in_unsafe_fn)] - see github.com/rust-lang/rust/issues/121483

#[cfg(feature = "ffi")]
#[macro_use]
pub mod ffi;
pub mod error;

#[cfg(feature = "jobs")]
pub mod jobs;

pub mod hash;
pub mod json;
pub mod tiler;

#[cfg(feature = "config")]
pub mod config;
#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "image_io")]
pub mod image_io;
#[cfg(feature = "log")]
pub mod log;
#[cfg(feature = "project")]
pub mod project;
#[cfg(feature = "tmx")]
pub mod tmx;

pub use error::{Error, Result};
pub use tiler::{build, Layer, TileMap, TilerOptions, TilerOutput, Tileset};
