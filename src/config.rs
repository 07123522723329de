use crate::{
    error::{Error, Result},
    tiler::TilerOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything one build needs: where the layers come from, where the outputs
/// go and how the layers get tiled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Layer images in the order they become map layers.
    pub layers: Vec<PathBuf>,
    /// Scanned for more layers after `layers`.
    pub layer_dir: Option<PathBuf>,
    pub layer_extension: String,
    pub tileset: PathBuf,
    /// `.tmx` or `.json`.
    pub map: PathBuf,
    pub log_file: Option<PathBuf>,
    pub tiler: TilerOptions,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            layers: Vec::new(),
            layer_dir: None,
            layer_extension: "png".to_owned(),
            tileset: PathBuf::from("tileset.png"),
            map: PathBuf::from("tiled.tmx"),
            log_file: None,
            tiler: TilerOptions::default(),
        }
    }
}

impl ProjectConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml_dep::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(Error::Config)
    }

    /// Loads a `.json` or TOML project file. Relative paths inside it are
    /// taken relative to the file's own directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&source)?
        } else {
            Self::from_toml_str(&source)?
        };
        Ok(match path.parent() {
            Some(base) if !base.as_os_str().is_empty() => config.relative_to(base),
            _ => config,
        })
    }

    /// Rebases every relative path onto `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let rebase = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        self.layers.iter_mut().for_each(rebase);
        self.layer_dir.iter_mut().for_each(rebase);
        rebase(&mut self.tileset);
        rebase(&mut self.map);
        self.log_file.iter_mut().for_each(rebase);
        self
    }
}
