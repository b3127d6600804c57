//! Temporary Go source trees for generator tests.
//!
//! # Examples
//!
//! ```
//! use buildergen_test_helpers::go::{GoWorkspace, USER_SOURCE};
//!
//! let workspace = GoWorkspace::new()?;
//! let source = workspace.write("core/user/user.go", USER_SOURCE)?;
//! assert!(source.ends_with("core/user/user.go"));
//! assert!(workspace.exists("core/user/user.go"));
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use tempfile::TempDir;

/// A struct with plain, pointer and qualified fields.
pub const USER_SOURCE: &str = r#"package user

import (
	"fmt"
	"time"
)

// User is a registered account.
type User struct {
	name      string
	age       int
	birthday  *time.Time
	createdAt time.Time
}

func (u User) String() string {
	return fmt.Sprintf("%s (%d)", u.name, u.age)
}
"#;

/// Declarations that cannot produce a builder.
pub const UNBUILDABLE_SOURCE: &str = r"package model

type ID int64

type Alias = ID

type Empty struct{}

type Orphan struct {
	at time.Time
}

type Clash struct {
	name string
	Name string
}
";

/// A temporary directory holding Go sources.
///
/// The directory and everything in it is removed on drop.
#[derive(Debug)]
pub struct GoWorkspace {
    root: Utf8PathBuf,
    dir: Dir,
    _guard: TempDir,
}

impl GoWorkspace {
    /// Creates an empty workspace.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or
    /// its path is not valid UTF-8.
    pub fn new() -> io::Result<Self> {
        let guard = tempfile::tempdir()?;
        let root = Utf8PathBuf::from_path_buf(guard.path().to_path_buf()).map_err(|path| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non-UTF-8 temp dir: {}", path.display()),
            )
        })?;
        let dir = Dir::open_ambient_dir(&root, ambient_authority())?;
        Ok(Self {
            root,
            dir,
            _guard: guard,
        })
    }

    /// Absolute path of the workspace root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Absolute path of `relative` inside the workspace.
    #[must_use]
    pub fn path(&self, relative: &str) -> Utf8PathBuf {
        self.root.join(relative)
    }

    /// Writes `text` to `relative`, creating parent directories first.
    ///
    /// # Errors
    ///
    /// Returns an error when a directory or the file cannot be written.
    pub fn write(&self, relative: &str, text: &str) -> io::Result<Utf8PathBuf> {
        if let Some(parent) = Utf8Path::new(relative)
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
        {
            self.dir.create_dir_all(parent)?;
        }
        self.dir.write(relative, text)?;
        Ok(self.path(relative))
    }

    /// Reads `relative` as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing or unreadable.
    pub fn read(&self, relative: &str) -> io::Result<String> {
        self.dir.read_to_string(relative)
    }

    /// Whether `relative` names an existing file.
    #[must_use]
    pub fn exists(&self, relative: &str) -> bool {
        self.dir.is_file(relative)
    }

    /// Sorted names of the entries directly inside `relative`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be listed.
    pub fn list(&self, relative: &str) -> io::Result<Vec<String>> {
        let mut names = self
            .dir
            .read_dir(relative)?
            .map(|entry| entry.and_then(|found| found.file_name()))
            .collect::<io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }
}
