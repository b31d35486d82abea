//! Capability-based filesystem helpers for the Sipwise tooling.
//!
//! Every helper resolves an ambient directory handle for the nearest
//! anchor (the filesystem root, a Windows prefix, or the current
//! directory) and performs the actual IO relative to it through
//! `cap-std`. Paths are UTF-8 throughout.
#![forbid(unsafe_code)]

use std::io::{self, Read};

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};

/// What a path points at, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Nothing exists at the path.
    Missing,
    /// A regular file.
    File,
    /// A directory.
    Directory,
    /// Something else, such as a socket or device.
    Other,
}

/// Open a file for reading.
pub fn open_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read a whole file into a string.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut contents = String::new();
    open_file(path)?.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Inspect `path` without following it past its parent directory.
///
/// A missing path (or a missing parent) is reported as
/// [`PathKind::Missing`] rather than an error.
pub fn path_kind(path: &Utf8Path) -> io::Result<PathKind> {
    let Some(name) = path.file_name() else {
        return Ok(PathKind::Directory);
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let dir = match fs_utf8::Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(PathKind::Missing),
        Err(err) => return Err(err),
    };
    match dir.metadata(name) {
        Ok(meta) if meta.is_file() => Ok(PathKind::File),
        Ok(meta) if meta.is_dir() => Ok(PathKind::Directory),
        Ok(_) => Ok(PathKind::Other),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(PathKind::Missing),
        Err(err) => Err(err),
    }
}

/// Whether `path` exists and is a regular file.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    path_kind(path).map(|kind| kind == PathKind::File)
}

/// Create every missing ancestor directory of `path`.
pub fn ensure_parent_dir(path: &Utf8Path) -> io::Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_str().is_empty() {
        return Ok(());
    }
    let (anchor, relative) = split_anchor(parent)?;
    if relative.as_str().is_empty() {
        return Ok(());
    }
    anchor.create_dir_all(&relative)
}

/// Split `path` into a handle on its anchor directory and the remainder.
fn split_anchor(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, Utf8PathBuf)> {
    let mut anchor = Utf8PathBuf::new();
    let mut relative = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::Prefix(prefix) => anchor.push(prefix.as_str()),
            Utf8Component::RootDir => anchor.push(std::path::MAIN_SEPARATOR_STR),
            other => relative.push(other.as_str()),
        }
    }
    if anchor.as_str().is_empty() {
        anchor.push(".");
    }
    let dir = fs_utf8::Dir::open_ambient_dir(&anchor, ambient_authority())?;
    Ok((dir, relative))
}
