//! File-to-file builds: layer images in, tileset image and map document out.
use crate::{
    config::ProjectConfig,
    error::{Error, Result},
    file,
    hash::xxh64_hex,
    image_io, json,
    log::RunLog,
    tiler::{self, TilerOutput},
    tmx,
};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracy_full::zone;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapFormat {
    Tmx,
    Json,
}

impl MapFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("tmx") => Ok(MapFormat::Tmx),
            Some("json") => Ok(MapFormat::Json),
            _ => Err(Error::UnknownMapFormat(path.to_owned())),
        }
    }
}

/// What a finished build produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub layers: Vec<String>,
    pub tileset: PathBuf,
    pub map: PathBuf,
    pub map_format: MapFormat,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Map size in tiles.
    pub map_width: u32,
    pub map_height: u32,
    pub raw_tiles: usize,
    pub blank_tiles: usize,
    pub unique_tiles: usize,
    pub flipped_tiles: usize,
    pub atlas_columns: u32,
    pub atlas_rows: u32,
    pub tileset_digest: String,
}

/// Explicit layers first, then whatever `layer_dir` holds.
pub fn resolve_layers(config: &ProjectConfig) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(config.layers.len());
    for path in &config.layers {
        if file::same_file(path, &config.tileset) {
            continue;
        }
        if !path.is_file() {
            return Err(Error::MissingLayer(path.clone()));
        }
        paths.push(path.clone());
    }
    if let Some(dir) = &config.layer_dir {
        let found = file::discover_layers(
            dir,
            &config.layer_extension,
            Some(config.tileset.as_path()),
        )?;
        for path in found {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    if paths.is_empty() {
        return Err(Error::EmptyInput);
    }
    Ok(paths)
}

/// Path of the tileset as written into the map, relative to the map's directory.
fn image_source(tileset: &Path, map: &Path) -> String {
    let map_dir = map.parent().unwrap_or_else(|| Path::new(""));
    let source = file::relative_path(tileset, map_dir);
    if source.is_absolute() {
        return source.to_string_lossy().into_owned();
    }
    source
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn tileset_name(tileset: &Path) -> String {
    tileset
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tileset".to_owned())
}

/// Renders the map document for an already built tilemap.
pub fn render_map(
    output: &TilerOutput,
    format: MapFormat,
    tileset: &Path,
    map: &Path,
) -> Result<String> {
    let name = tileset_name(tileset);
    let source = image_source(tileset, map);
    match format {
        MapFormat::Tmx => tmx::to_tmx(&output.tilemap, &name, &source),
        MapFormat::Json => json::to_json(&output.tilemap, &name, &source),
    }
}

/// Runs one build. Nothing is written unless every stage before writing succeeded.
pub fn run(config: &ProjectConfig) -> Result<ProjectReport> {
    zone!("project_run");
    let log = RunLog::new(config.log_file.clone());
    let result = run_logged(config, &log);
    if let Err(error) = &result {
        log.line(&format!("build failed during {}: {error}", error.stage()));
    }
    result
}

fn run_logged(config: &ProjectConfig, log: &RunLog) -> Result<ProjectReport> {
    let map_format = MapFormat::from_path(&config.map)?;
    config.tiler.validate()?;

    let paths = resolve_layers(config)?;
    log.line(&format!("loading {} layers", paths.len()));
    let layers = image_io::load_layers(&paths)?;

    let output = tiler::build(&layers, &config.tiler)?;
    let stats = output.stats;
    log.line(&format!(
        "{} tiles, {} blank, {} unique, {} flipped",
        stats.raw_tiles, stats.blank_tiles, stats.unique_tiles, stats.flipped_tiles
    ));

    let document = render_map(&output, map_format, &config.tileset, &config.map)?;
    let mut atlas = Vec::new();
    image_io::encode_tileset(&output.tileset, &mut atlas)?;
    file::write_all_or_nothing(&[
        (config.tileset.as_path(), atlas.as_slice()),
        (config.map.as_path(), document.as_bytes()),
    ])?;

    let geometry = output.tileset.geometry();
    log.line(&format!(
        "wrote {} ({}x{} tiles) and {}",
        config.tileset.display(),
        geometry.columns,
        geometry.rows,
        config.map.display()
    ));

    Ok(ProjectReport {
        layers: layers.iter().map(|layer| layer.name().to_owned()).collect(),
        tileset: config.tileset.clone(),
        map: config.map.clone(),
        map_format,
        tile_width: config.tiler.tile_width,
        tile_height: config.tiler.tile_height,
        map_width: output.tilemap.width,
        map_height: output.tilemap.height,
        raw_tiles: stats.raw_tiles,
        blank_tiles: stats.blank_tiles,
        unique_tiles: stats.unique_tiles,
        flipped_tiles: stats.flipped_tiles,
        atlas_columns: geometry.columns,
        atlas_rows: geometry.rows,
        tileset_digest: xxh64_hex(output.tileset.pixels()),
    })
}

#[cfg(feature = "ffi")]
fn build_response(result: Result<ProjectReport>) -> String {
    match result {
        Ok(report) => serde_json::json!({ "ok": true, "report": report }).to_string(),
        Err(error) => crate::ffi::failure(error.stage(), error),
    }
}

#[cfg(feature = "ffi")]
fn build_from_file(config_path: &str) -> Result<ProjectReport> {
    ProjectConfig::from_file(config_path).and_then(|config| run(&config))
}

#[cfg(feature = "ffi")]
export_fn!(fn map_tiler_build(config_path) {
    build_response(build_from_file(config_path))
});

#[cfg(feature = "ffi")]
export_fn!(fn map_tiler_build_json(config_json) {
    build_response(ProjectConfig::from_json_str(config_json).and_then(|config| run(&config)))
});

#[cfg(feature = "ffi")]
export_fn!(fn map_tiler_build_async(config_path) {
    let config_path = config_path.to_owned();
    let id = crate::jobs::start(move || build_from_file(&config_path));
    serde_json::json!({ "ok": true, "job": id }).to_string()
});

#[cfg(feature = "ffi")]
export_fn!(fn map_tiler_check_job(id) {
    serde_json::to_string(&crate::jobs::check(id))
        .unwrap_or_else(|error| crate::ffi::failure("encode", error))
});
