//! Filesystem helpers shared across `buildergen` modules.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use crate::error::BuildergenError;

/// Splits `path` into its parent directory and final component.
///
/// A bare file name resolves against the current directory.
pub fn split_parent(path: &Utf8Path) -> Result<(Utf8PathBuf, &str), BuildergenError> {
    let file_name = path.file_name().ok_or_else(|| BuildergenError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    Ok((parent, file_name))
}

/// Reads a UTF-8 source file.
pub fn read_source(path: &Utf8Path) -> Result<String, BuildergenError> {
    let (parent, file_name) = split_parent(path)?;
    let io_error = |source| BuildergenError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = Dir::open_ambient_dir(&parent, ambient_authority()).map_err(io_error)?;
    dir.read_to_string(file_name).map_err(io_error)
}

/// Opens `path`, creating it and any missing ancestors first.
pub fn ensure_dir(path: &Utf8Path) -> Result<Dir, BuildergenError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == std::io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|io_err| {
                BuildergenError::Io {
                    path: path.to_path_buf(),
                    source: io_err,
                }
            })?;
            tracing::debug!(%path, "created output directory");
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|io_err| BuildergenError::Io {
                path: path.to_path_buf(),
                source: io_err,
            })
        }
        Err(open_err) => Err(BuildergenError::Io {
            path: path.to_path_buf(),
            source: open_err,
        }),
    }
}
