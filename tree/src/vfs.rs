//! Generic virtual filesystem source.
//!
//! [`VfsDir`] adapts any [`FileSystem`] to the [`DirectorySource`] contract.
//! Paths are slash-separated and relative to the filesystem root; `""` and
//! `"."` both denote the root, which is named `root`.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::source::{
    DirectorySource, SourceFile, base_name, clean_path, join_path, not_found,
};

/// One entry returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Minimal read-only filesystem interface.
pub trait FileSystem {
    /// Lists the entries of a directory, sorted by name.
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>>;

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Immediate children of `dir` among a set of cleaned file paths.
///
/// Directories are implied by the files below them. Returns `None` when
/// nothing lives under `dir`, except for the root which always exists.
pub(crate) fn list_children<'a>(
    paths: impl IntoIterator<Item = &'a str>,
    dir: &str,
) -> Option<Vec<DirEntry>> {
    let mut children: BTreeMap<&str, bool> = BTreeMap::new();
    for path in paths {
        let rest = if dir.is_empty() {
            path
        } else {
            match path.strip_prefix(dir).and_then(|r| r.strip_prefix('/')) {
                Some(rest) => rest,
                None => continue,
            }
        };
        match rest.split_once('/') {
            Some((child, _)) => {
                children.insert(child, true);
            }
            None if !rest.is_empty() => {
                children.entry(rest).or_insert(false);
            }
            None => {}
        }
    }

    if children.is_empty() && !dir.is_empty() {
        return None;
    }
    Some(
        children
            .into_iter()
            .map(|(name, is_dir)| DirEntry {
                name: name.to_string(),
                is_dir,
            })
            .collect(),
    )
}

/// An in-memory filesystem keyed by slash-separated path.
///
/// # Examples
///
/// ```
/// use docschema_tree::{FileSystem, MemoryFs};
///
/// let mut fs = MemoryFs::new();
/// fs.insert("tool/tool.md", "# Description\nA tool");
/// fs.insert("tool/run/run.md", "# Description\nRun it");
///
/// let entries = fs.read_dir("tool").unwrap();
/// assert_eq!(entries.len(), 2);
/// assert_eq!(fs.read_file("tool/tool.md").unwrap(), b"# Description\nA tool");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file. Parent directories are implied.
    pub fn insert(&mut self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files.insert(clean_path(path), contents.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(path, contents);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Loads a gzip-compressed JSON object mapping paths to file contents.
    ///
    /// Only available with the `gzip-bundle` feature.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Bundle`](crate::SchemaError::Bundle) when the
    /// data is not valid gzip or does not hold a JSON object of strings.
    #[cfg(feature = "gzip-bundle")]
    pub fn from_gzip_json(data: &[u8]) -> crate::Result<Self> {
        use std::io::Read;

        let mut json = String::new();
        flate2::read::GzDecoder::new(data)
            .read_to_string(&mut json)
            .map_err(|e| crate::SchemaError::Bundle(format!("decompression failed: {e}")))?;
        let entries: BTreeMap<String, String> = serde_json::from_str(&json)
            .map_err(|e| crate::SchemaError::Bundle(format!("bad bundle JSON: {e}")))?;

        let mut fs = Self::new();
        for (path, contents) in entries {
            fs.insert(&path, contents);
        }
        Ok(fs)
    }
}

impl FileSystem for MemoryFs {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let dir = clean_path(path);
        list_children(self.files.keys().map(String::as_str), &dir).ok_or_else(|| not_found(path))
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files.get(&clean_path(path)).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such file: {path}"))
        })
    }
}

/// A [`FileSystem`] rooted at a directory of the local filesystem.
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let mut full = self.root.clone();
        for part in clean_path(path).split('/').filter(|p| !p.is_empty()) {
            full.push(part);
        }
        full
    }
}

impl FileSystem for DirFs {
    fn read_dir(&self, path: &str) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(self.resolve(path))? {
            let entry = entry?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.file_type()?.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(path))
    }
}

/// A directory of any [`FileSystem`].
///
/// # Examples
///
/// ```
/// use docschema_tree::{DirectorySource, MemoryFs, VfsDir};
///
/// let fs = MemoryFs::new().with_file("docs/git/git.md", "# Description\ngit");
/// let dir = VfsDir::new(fs, "docs");
/// assert_eq!(dir.name(), "docs");
/// assert_eq!(dir.list_dirs().unwrap()[0].name(), "git");
///
/// let root = VfsDir::new(MemoryFs::new(), ".");
/// assert_eq!(root.name(), "root");
/// ```
pub struct VfsDir<F> {
    fs: Arc<F>,
    path: String,
}

impl<F: FileSystem> VfsDir<F> {
    pub fn new(fs: F, path: &str) -> Self {
        Self::shared(Arc::new(fs), path)
    }

    /// Creates a directory over a filesystem that is already shared.
    pub fn shared(fs: Arc<F>, path: &str) -> Self {
        Self {
            fs,
            path: clean_path(path),
        }
    }
}

impl<F: FileSystem + 'static> DirectorySource for VfsDir<F> {
    fn name(&self) -> String {
        base_name(&self.path)
    }

    fn path(&self) -> String {
        if self.path.is_empty() {
            ".".to_string()
        } else {
            self.path.clone()
        }
    }

    fn list_dirs(&self) -> io::Result<Vec<Box<dyn DirectorySource>>> {
        let entries = self.fs.read_dir(&self.path)?;
        Ok(entries
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| {
                Box::new(VfsDir {
                    fs: Arc::clone(&self.fs),
                    path: join_path(&self.path, &e.name),
                }) as Box<dyn DirectorySource>
            })
            .collect())
    }

    fn list_files(&self) -> io::Result<Vec<Box<dyn SourceFile>>> {
        let entries = self.fs.read_dir(&self.path)?;
        Ok(entries
            .into_iter()
            .filter(|e| !e.is_dir)
            .map(|e| {
                Box::new(VfsFile {
                    fs: Arc::clone(&self.fs),
                    path: join_path(&self.path, &e.name),
                }) as Box<dyn SourceFile>
            })
            .collect())
    }
}

/// A file of any [`FileSystem`].
pub struct VfsFile<F> {
    fs: Arc<F>,
    path: String,
}

impl<F: FileSystem> SourceFile for VfsFile<F> {
    fn name(&self) -> String {
        base_name(&self.path)
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        self.fs.read_file(&self.path)
    }
}
