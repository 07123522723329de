use crate::{
    error::{Error, Result},
    tiler::{layer::RGBA_BYTES_PER_PIXEL, Layer, Tileset},
};
use image::RgbaImage;
use png::{BitDepth, ColorType, Encoder};
use rayon::prelude::*;
use std::{io::Write, path::Path};
use tracy_full::zone;

/// Decodes an image file into an RGBA layer named after the file stem.
pub fn load_layer(path: &Path) -> Result<Layer> {
    zone!("load_layer");
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or(Error::InvalidFilename)?;
    if !path.is_file() {
        return Err(Error::MissingLayer(path.to_owned()));
    }
    let image = image::open(path)?.into_rgba8();
    let (width, height) = image.dimensions();
    Ok(Layer::new(name, width, height, image.into_raw()))
}

/// Loads every path, keeping input order.
pub fn load_layers<P: AsRef<Path> + Sync>(paths: &[P]) -> Result<Vec<Layer>> {
    zone!("load_layers");
    paths
        .par_iter()
        .map(|path| load_layer(path.as_ref()))
        .collect()
}

pub fn to_rgba_image(tileset: &Tileset) -> Result<RgbaImage> {
    if tileset.bytes_per_pixel() != RGBA_BYTES_PER_PIXEL {
        return Err(Error::UnsupportedPixelFormat(tileset.bytes_per_pixel()));
    }
    RgbaImage::from_raw(tileset.width(), tileset.height(), tileset.pixels().to_vec())
        .ok_or(Error::UnsupportedPixelFormat(tileset.bytes_per_pixel()))
}

/// PNG-encodes the atlas into `writer`.
pub fn encode_tileset<W: Write>(tileset: &Tileset, writer: W) -> Result<()> {
    zone!("encode_tileset");
    if tileset.bytes_per_pixel() != RGBA_BYTES_PER_PIXEL {
        return Err(Error::UnsupportedPixelFormat(tileset.bytes_per_pixel()));
    }
    let mut encoder = Encoder::new(writer, tileset.width(), tileset.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(tileset.pixels())?;
    writer.finish()?;
    Ok(())
}
