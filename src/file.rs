use crate::error::{Error, Result};
use std::{
    env,
    ffi::OsString,
    fs::{self, File},
    io::Write,
    path::{Component, Path, PathBuf},
};

/// Writes `data` to `path`, creating parent directories as needed.
pub fn write<P: AsRef<Path>>(data: &[u8], path: P) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    file.write_all(data)?;

    Ok(data.len())
}

/// Writes every `(path, data)` pair, or none of them.
///
/// Each file is first written to a hidden sibling of its destination. Only
/// once all of them were written are they renamed into place; a failure before
/// that removes whatever was staged.
pub fn write_all_or_nothing(files: &[(&Path, &[u8])]) -> Result<()> {
    let mut staged: Vec<(PathBuf, &Path)> = Vec::with_capacity(files.len());
    for &(path, data) in files {
        let result = staging_path(path).and_then(|staging| {
            write(data, &staging).map_err(|error| {
                let _ = fs::remove_file(&staging);
                error
            })?;
            Ok(staging)
        });
        match result {
            Ok(staging) => staged.push((staging, path)),
            Err(error) => {
                discard(&staged);
                return Err(error);
            }
        }
    }

    for (index, (staging, path)) in staged.iter().enumerate() {
        if let Err(error) = fs::rename(staging, path) {
            discard(&staged[index..]);
            return Err(error.into());
        }
    }
    Ok(())
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path.file_name().ok_or(Error::InvalidFilename)?;
    let mut staged = OsString::from(".");
    staged.push(name);
    staged.push(".partial");
    Ok(path.with_file_name(staged))
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (staging, _) in staged {
        let _ = fs::remove_file(staging);
    }
}

/// Whether both paths name the same file. Paths that do not exist yet only
/// match when they are spelled the same.
pub fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Absolute form of `path` with `.` and `..` resolved lexically.
fn absolute(path: &Path) -> Option<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_owned()
    } else {
        env::current_dir().ok()?.join(path)
    };
    let mut normal = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other.as_os_str()),
        }
    }
    Some(normal)
}

/// `target` as reached from the directory `base`, stepping up with `..` where
/// the two diverge. When they share no root (another drive, say) the absolute
/// target is returned instead.
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let (Some(target_abs), Some(base_abs)) = (absolute(target), absolute(base)) else {
        return target.to_owned();
    };
    let target_parts: Vec<Component> = target_abs.components().collect();
    let base_parts: Vec<Component> = base_abs.components().collect();
    let shared = target_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if shared == 0 {
        return target_abs;
    }

    let mut relative = PathBuf::new();
    for _ in shared..base_parts.len() {
        relative.push("..");
    }
    for part in &target_parts[shared..] {
        relative.push(part.as_os_str());
    }
    relative
}

/// Lists the files in `dir` with the given extension, sorted by file name.
/// A file that is `exclude` gets skipped, so a previous tileset written next
/// to the layers never gets treated as a layer.
pub fn discover_layers(
    dir: &Path,
    extension: &str,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }
        if exclude.is_some_and(|excluded| same_file(&path, excluded)) {
            continue;
        }
        paths.push(path);
    }
    paths.sort();
    Ok(paths)
}
