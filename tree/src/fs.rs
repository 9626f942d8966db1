//! Local filesystem source.

use std::io;
use std::path::{Path, PathBuf};

use crate::source::{DirectorySource, SourceFile};

/// A directory on the local filesystem.
///
/// Entries are listed in file-name byte order so that builds are
/// reproducible whatever order the platform returns them in.
///
/// # Examples
///
/// ```no_run
/// use docschema_tree::{DirectorySource, FsDir};
///
/// let dir = FsDir::new("docs/git");
/// assert_eq!(dir.name(), "git");
/// for child in dir.list_dirs().unwrap() {
///     println!("{}", child.name());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FsDir {
    path: PathBuf,
}

impl FsDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads the directory and splits its entries into subdirectories and
    /// files, each sorted by name.
    fn entries(&self) -> io::Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&self.path)? {
            let entry = entry?;
            entries.push((entry.file_name(), entry.file_type()?.is_dir(), entry.path()));
        }
        entries.sort_by(|a, b| a.0.as_encoded_bytes().cmp(b.0.as_encoded_bytes()));

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for (_, is_dir, path) in entries {
            if is_dir {
                dirs.push(path);
            } else {
                files.push(path);
            }
        }
        Ok((dirs, files))
    }
}

impl DirectorySource for FsDir {
    fn name(&self) -> String {
        if let Some(name) = self.path.file_name() {
            return name.to_string_lossy().into_owned();
        }
        // "." or "/": fall back to the resolved directory name
        std::fs::canonicalize(&self.path)
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn path(&self) -> String {
        self.path.display().to_string()
    }

    fn list_dirs(&self) -> io::Result<Vec<Box<dyn DirectorySource>>> {
        let (dirs, _) = self.entries()?;
        Ok(dirs
            .into_iter()
            .map(|path| Box::new(FsDir { path }) as Box<dyn DirectorySource>)
            .collect())
    }

    fn list_files(&self) -> io::Result<Vec<Box<dyn SourceFile>>> {
        let (_, files) = self.entries()?;
        Ok(files
            .into_iter()
            .map(|path| Box::new(FsFile { path }) as Box<dyn SourceFile>)
            .collect())
    }
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsFile {
    path: PathBuf,
}

impl FsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

impl SourceFile for FsFile {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn path(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}
