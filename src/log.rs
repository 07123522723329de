use crate::error::{Error, Result};
use chrono::Utc;
use std::{
    cell::RefCell,
    collections::hash_map::{
        Entry::{Occupied, Vacant},
        HashMap,
    },
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

thread_local! {
    static FILE_MAP: RefCell<HashMap<PathBuf, File>> = RefCell::new(HashMap::new());
}

fn timestamped(data: &str) -> String {
    format!("[{}] {}\n", Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"), data)
}

/// Appends one timestamped line per line of `data` to `filename`.
pub fn write<P: AsRef<Path>>(filename: P, data: &str) -> Result<usize> {
    let path = filename.as_ref();
    if path.file_name().is_none() {
        return Err(Error::InvalidFilename);
    }

    FILE_MAP.with(|cell| -> Result<usize> {
        let mut map = cell.borrow_mut();
        let file = match map.entry(path.to_owned()) {
            Occupied(elem) => elem.into_mut(),
            Vacant(elem) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let file = OpenOptions::new().append(true).create(true).open(path)?;
                elem.insert(file)
            }
        };

        let mut written = 0;
        for line in data.split('\n') {
            let line = timestamped(line);
            file.write_all(line.as_bytes())?;
            written += line.len();
        }
        Ok(written)
    })
}

/// Drops every log file handle opened on this thread.
pub fn close_all() {
    FILE_MAP.with(|cell| {
        let mut map = cell.borrow_mut();
        map.clear();
    });
}

/// Log sink for one build. Writes are best effort: a log that cannot be
/// written to never fails the build.
#[derive(Clone, Debug, Default)]
pub struct RunLog {
    path: Option<PathBuf>,
}

impl RunLog {
    pub fn new(path: Option<PathBuf>) -> Self {
        RunLog { path }
    }

    pub fn line(&self, message: &str) {
        if let Some(path) = &self.path {
            let _ = write(path, message);
        }
    }
}
