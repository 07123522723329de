//! Buildscript which will save a `map_tiler.h` with the library's C API.

use std::{env, fs::File, io::Write, path::PathBuf};

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    if env::var_os("CARGO_FEATURE_FFI").is_none() {
        return Ok(());
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").unwrap_or_else(|| "target".into()));
    let mut f = File::create(out_dir.join("map_tiler.h"))?;

    // header
    write!(
        f,
        r#"/* map_tiler.h - C API for the map-tiler library */
#ifndef MAP_TILER_H
#define MAP_TILER_H

#ifdef __cplusplus
extern "C" {{
#endif

/*
 * Every export takes its arguments as NUL-terminated strings and returns a
 * NUL-terminated JSON document owned by the library. The returned pointer is
 * valid until the next call on the same thread. A failed call returns
 * {{"ok":false,"stage":...,"error":...}}; too few arguments fail with stage
 * "config".
 */
"#
    )?;

    // module: ffi
    write!(
        f,
        r#"
/* Returns {{"ok":true,"version":...}}. */
const char *map_tiler_version(int argc, const char *const *argv);
"#
    )?;

    // module: project
    write!(
        f,
        r#"
/* argv[0]: path to a TOML or JSON project file. Returns a JSON result. */
const char *map_tiler_build(int argc, const char *const *argv);
/* argv[0]: project configuration as JSON. Returns a JSON result. */
const char *map_tiler_build_json(int argc, const char *const *argv);
/* argv[0]: path to a project file. Returns {{"ok":true,"job":id}}. */
const char *map_tiler_build_async(int argc, const char *const *argv);
/* argv[0]: job id. Returns {{"status":"pending"|"finished"|"failed"|"panicked"|"unknown",...}}. */
const char *map_tiler_check_job(int argc, const char *const *argv);
"#
    )?;

    write!(
        f,
        r#"
#ifdef __cplusplus
}}
#endif

#endif /* MAP_TILER_H */
"#
    )?;
    Ok(())
}
