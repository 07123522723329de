//! map-tiler CLI
//!
//! Slices layer images into one flip-deduplicated tileset and writes a map
//! that references it.

use clap::{Parser, ValueEnum};
use map_tiler::{
    config::ProjectConfig,
    log,
    project,
    tiler::{AtlasLayout, StoredOrientation},
};
use std::{path::PathBuf, process};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AtlasArg {
    /// Smallest near-square grid
    Square,
    /// Fixed column count (see --columns)
    Fixed,
    /// Power-of-two grid (see --square)
    PowerOfTwo,
}

#[derive(Parser)]
#[command(name = "map-tiler")]
#[command(about = "Build a deduplicated tileset and tile map from layer images", long_about = None)]
struct Args {
    /// Layer images, in map layer order
    layers: Vec<PathBuf>,

    /// TOML or JSON project file; flags given here override it
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Tile width in pixels
    #[arg(long)]
    tile_width: Option<u32>,

    /// Tile height in pixels
    #[arg(long)]
    tile_height: Option<u32>,

    /// Directory scanned for layer images (default: current directory when no layers are given)
    #[arg(long)]
    layer_dir: Option<PathBuf>,

    /// Extension of layer images found in --layer-dir
    #[arg(long)]
    extension: Option<String>,

    /// Tileset image to write
    #[arg(long)]
    out_tileset: Option<PathBuf>,

    /// Map document to write (.tmx or .json)
    #[arg(long)]
    out_map: Option<PathBuf>,

    /// Atlas layout
    #[arg(long, value_enum)]
    atlas: Option<AtlasArg>,

    /// Column count for the fixed atlas layout
    #[arg(long, required_if_eq("atlas", "fixed"))]
    columns: Option<u32>,

    /// Make power-of-two atlases square
    #[arg(long)]
    square: bool,

    /// Gid of the first tile
    #[arg(long)]
    first_gid: Option<u32>,

    /// Write fully transparent tiles as empty cells
    #[arg(long)]
    skip_blank: bool,

    /// Store canonical pixels instead of the first occurrence
    #[arg(long)]
    store_canonical: bool,

    /// Process tiles on one thread
    #[arg(long)]
    serial: bool,

    /// Append a build log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> map_tiler::Result<ProjectConfig> {
        let mut config = match &self.config {
            Some(path) => ProjectConfig::from_file(path)?,
            None => ProjectConfig::default(),
        };

        if !self.layers.is_empty() {
            config.layers = self.layers;
        }
        if let Some(dir) = self.layer_dir {
            config.layer_dir = Some(dir);
        }
        if config.layers.is_empty() && config.layer_dir.is_none() {
            config.layer_dir = Some(PathBuf::from("."));
        }
        if let Some(extension) = self.extension {
            config.layer_extension = extension;
        }
        if let Some(tileset) = self.out_tileset {
            config.tileset = tileset;
        }
        if let Some(map) = self.out_map {
            config.map = map;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file;
        }

        let tiler = &mut config.tiler;
        if let Some(width) = self.tile_width {
            tiler.tile_width = width;
        }
        if let Some(height) = self.tile_height {
            tiler.tile_height = height;
        }
        if let Some(first_gid) = self.first_gid {
            tiler.first_gid = first_gid;
        }
        match self.atlas {
            Some(AtlasArg::Square) => tiler.atlas = AtlasLayout::Square,
            Some(AtlasArg::Fixed) => {
                tiler.atlas = AtlasLayout::Fixed {
                    columns: self.columns.unwrap_or_default(),
                }
            }
            Some(AtlasArg::PowerOfTwo) => {
                tiler.atlas = AtlasLayout::PowerOfTwo {
                    square: self.square,
                }
            }
            None => {}
        }
        if self.skip_blank {
            tiler.skip_blank_tiles = true;
        }
        if self.store_canonical {
            tiler.stored_orientation = StoredOrientation::Canonical;
        }
        if self.serial {
            tiler.parallel = false;
        }
        Ok(config)
    }
}

fn main() {
    let args = Args::parse();

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            process::exit(1);
        }
    };

    let result = project::run(&config);
    log::close_all();

    match result {
        Ok(report) => {
            println!("Layers: {}", report.layers.join(", "));
            println!(
                "  Tiles: {} total, {} unique, {} flipped, {} blank",
                report.raw_tiles, report.unique_tiles, report.flipped_tiles, report.blank_tiles
            );
            println!(
                "  Tileset: {} ({}x{} tiles)",
                report.tileset.display(),
                report.atlas_columns,
                report.atlas_rows
            );
            println!(
                "  Map: {} ({}x{} cells)",
                report.map.display(),
                report.map_width,
                report.map_height
            );
        }
        Err(e) => {
            eprintln!("Error during {}: {}", e.stage(), e);
            process::exit(1);
        }
    }
}
