use std::{fmt, io, path::PathBuf, result};
use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

/// Which side of a layer an alignment problem was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Dimension::Width => f.write_str("width"),
            Dimension::Height => f.write_str("height"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("No layers were supplied.")]
    EmptyInput,
    #[error("Invalid tile size {width}x{height}: both dimensions must be non-zero.")]
    InvalidTileSize { width: u32, height: u32 },
    #[error("Invalid first gid 0: gid 0 is reserved for empty cells.")]
    InvalidFirstGid,
    #[error("Invalid atlas column count {0}.")]
    InvalidColumns(u32),
    #[error(
        "Layer '{layer}' has {actual} bytes of pixel data, expected {expected} ({width}x{height}x{bytes_per_pixel})."
    )]
    BufferSize {
        layer: String,
        width: u32,
        height: u32,
        bytes_per_pixel: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Layer '{layer}' has no pixels.")]
    EmptyLayer { layer: String },
    #[error(
        "Layer '{layer}' size ({width} x {height}) does not match base size ({expected_width} x {expected_height}) of layer '{reference}'."
    )]
    DimensionMismatch {
        layer: String,
        width: u32,
        height: u32,
        reference: String,
        expected_width: u32,
        expected_height: u32,
    },
    #[error("Layer '{layer}' uses {actual} bytes per pixel, expected {expected}.")]
    PixelFormatMismatch {
        layer: String,
        expected: usize,
        actual: usize,
    },
    #[error(
        "Layer '{layer}' {dimension} {size} cannot be divided evenly by tile {dimension} {tile} (remainder {remainder})."
    )]
    Alignment {
        layer: String,
        dimension: Dimension,
        size: u32,
        tile: u32,
        remainder: u32,
    },
    #[error("Tile {tile} with first gid {first_gid} does not fit in the 29 bit gid range.")]
    GidOverflow { tile: u32, first_gid: u32 },
    #[error("Unsupported pixel format: {0} bytes per pixel.")]
    UnsupportedPixelFormat(usize),
    #[error("Invalid or empty filename specified.")]
    InvalidFilename,
    #[error("Layer file {0} does not exist.")]
    MissingLayer(PathBuf),
    #[error("Unknown map format for {0}, expected a .tmx or .json extension.")]
    UnknownMapFormat(PathBuf),
    #[error("Invalid project configuration: {0}")]
    Config(#[source] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Formatting(#[from] fmt::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[cfg(feature = "image_io")]
    #[error(transparent)]
    ImageDecoding(#[from] image::ImageError),
    #[cfg(feature = "image_io")]
    #[error(transparent)]
    ImageEncoding(#[from] png::EncodingError),
    #[cfg(feature = "config")]
    #[error(transparent)]
    Toml(#[from] toml_dep::de::Error),
}

impl Error {
    /// Names the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::EmptyInput
            | Error::InvalidTileSize { .. }
            | Error::BufferSize { .. }
            | Error::EmptyLayer { .. }
            | Error::DimensionMismatch { .. }
            | Error::PixelFormatMismatch { .. }
            | Error::Alignment { .. } => "validate",
            Error::InvalidColumns(_) => "assemble",
            Error::GidOverflow { .. }
            | Error::UnsupportedPixelFormat(_)
            | Error::Formatting(_)
            | Error::Serialization(_) => "encode",
            Error::InvalidFirstGid | Error::UnknownMapFormat(_) | Error::Config(_) => "config",
            #[cfg(feature = "config")]
            Error::Toml(_) => "config",
            #[cfg(feature = "image_io")]
            Error::ImageDecoding(_) | Error::ImageEncoding(_) => "io",
            Error::InvalidFilename | Error::MissingLayer(_) | Error::Io(_) => "io",
        }
    }
}

impl From<Error> for String {
    fn from(error: Error) -> String {
        error.to_string()
    }
}

impl From<Error> for Vec<u8> {
    fn from(error: Error) -> Vec<u8> {
        error.to_string().into_bytes()
    }
}
