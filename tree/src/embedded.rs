//! Documents compiled into the binary.

use std::io;

use crate::source::{
    DirectorySource, SourceFile, base_name, clean_path, join_path, not_found,
};
use crate::vfs::list_children;

/// One embedded document.
///
/// # Examples
///
/// ```
/// use docschema_tree::EmbeddedFile;
///
/// static DOCS: &[EmbeddedFile] = &[
///     EmbeddedFile::new("tool/tool.md", b"# Description\nA tool"),
///     EmbeddedFile::new("tool/run/run.md", b"# Description\nRun"),
/// ];
/// assert_eq!(DOCS.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedFile {
    pub path: &'static str,
    pub contents: &'static [u8],
}

impl EmbeddedFile {
    pub const fn new(path: &'static str, contents: &'static [u8]) -> Self {
        Self { path, contents }
    }
}

/// A directory within a static table of [`EmbeddedFile`]s.
///
/// Directories are implied by the file paths. The root (`""` or `"."`) is
/// named `root`.
#[derive(Debug, Clone)]
pub struct EmbeddedDir {
    files: &'static [EmbeddedFile],
    path: String,
}

impl EmbeddedDir {
    pub fn new(files: &'static [EmbeddedFile], path: &str) -> Self {
        Self {
            files,
            path: clean_path(path),
        }
    }

    fn children(&self) -> io::Result<Vec<crate::DirEntry>> {
        let cleaned: Vec<String> = self.files.iter().map(|f| clean_path(f.path)).collect();
        list_children(cleaned.iter().map(String::as_str), &self.path)
            .ok_or_else(|| not_found(&self.path))
    }
}

impl DirectorySource for EmbeddedDir {
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
        Ok(self
            .children()?
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| {
                Box::new(EmbeddedDir {
                    files: self.files,
                    path: join_path(&self.path, &e.name),
                }) as Box<dyn DirectorySource>
            })
            .collect())
    }

    fn list_files(&self) -> io::Result<Vec<Box<dyn SourceFile>>> {
        let mut out: Vec<Box<dyn SourceFile>> = Vec::new();
        for entry in self.children()?.into_iter().filter(|e| !e.is_dir) {
            let path = join_path(&self.path, &entry.name);
            if let Some(file) = self.files.iter().find(|f| clean_path(f.path) == path) {
                out.push(Box::new(EmbeddedSourceFile { path, file: *file }));
            }
        }
        Ok(out)
    }
}

struct EmbeddedSourceFile {
    path: String,
    file: EmbeddedFile,
}

impl SourceFile for EmbeddedSourceFile {
    fn name(&self) -> String {
        base_name(&self.path)
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn read(&self) -> io::Result<Vec<u8>> {
        Ok(self.file.contents.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DOCS: &[EmbeddedFile] = &[
        EmbeddedFile::new("cli/cli.md", b"# Description\ncli"),
        EmbeddedFile::new("cli/serve/serve.md", b"# Description\nserve"),
        EmbeddedFile::new("./cli/build/build.md", b"# Description\nbuild"),
        EmbeddedFile::new("cli/README.txt", b"readme"),
    ];

    #[test]
    fn test_root_lists_top_directory() {
        let root = EmbeddedDir::new(DOCS, ".");
        assert_eq!(root.name(), "root");
        assert_eq!(root.path(), ".");
        let dirs: Vec<String> = root.list_dirs().unwrap().iter().map(|d| d.name()).collect();
        assert_eq!(dirs, vec!["cli"]);
        assert!(root.list_files().unwrap().is_empty());
    }

    #[test]
    fn test_nested_listing_is_sorted() {
        let dir = EmbeddedDir::new(DOCS, "cli");
        let dirs: Vec<String> = dir.list_dirs().unwrap().iter().map(|d| d.name()).collect();
        assert_eq!(dirs, vec!["build", "serve"]);

        let files = dir.list_files().unwrap();
        let names: Vec<String> = files.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["README.txt", "cli.md"]);
        assert_eq!(files[1].read().unwrap(), b"# Description\ncli");
        assert_eq!(files[1].path(), "cli/cli.md");
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = EmbeddedDir::new(DOCS, "nope");
        let err = dir.list_files().err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
