//! The directory-source capability consumed by the tree builder.
//!
//! A source exposes one directory: its base name, its child directories and
//! its files. Three implementations ship with this crate:
//!
//! - [`FsDir`](crate::FsDir): a directory on the local filesystem.
//! - [`EmbeddedDir`](crate::EmbeddedDir): a table of documents compiled
//!   into the binary.
//! - [`VfsDir`](crate::VfsDir): any [`FileSystem`](crate::FileSystem)
//!   implementation, such as the in-memory [`MemoryFs`](crate::MemoryFs).
//!
//! Children are boxed trait objects, so one tree may mix sources.

use std::io;

/// A readable file within a [`DirectorySource`].
pub trait SourceFile {
    /// Base name of the file, including its extension.
    fn name(&self) -> String;

    /// Full path used in error messages.
    fn path(&self) -> String;

    fn read(&self) -> io::Result<Vec<u8>>;
}

/// One directory of command documents.
pub trait DirectorySource {
    /// Base name of the directory.
    fn name(&self) -> String;

    /// Full path used in error messages.
    fn path(&self) -> String;

    /// Child directories, in the order the builder must visit them.
    fn list_dirs(&self) -> io::Result<Vec<Box<dyn DirectorySource>>>;

    /// Files directly inside this directory.
    fn list_files(&self) -> io::Result<Vec<Box<dyn SourceFile>>>;
}

/// Normalizes a slash-separated virtual path: `""`, `"."` and `"./"` all
/// denote the root, and redundant separators are dropped.
pub(crate) fn clean_path(path: &str) -> String {
    path.split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

pub(crate) fn join_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Base name of a cleaned virtual path; the root is called `root`.
pub(crate) fn base_name(path: &str) -> String {
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "root".to_string(),
    }
}

pub(crate) fn not_found(path: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such directory: {path}"),
    )
}
