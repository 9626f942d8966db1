//! Depth-first assembly of the command tree.
//!
//! Every directory becomes one [`Command`]. Its metadata comes from at most
//! one `.md` document in that directory:
//!
//! - no document: the command is named after the directory and is otherwise
//!   empty;
//! - one document: it is used, with its file stem as the fallback name;
//! - several documents: the one whose stem equals the directory name wins,
//!   else the lexicographically smallest file name.
//!
//! Child commands follow the order returned by
//! [`DirectorySource::list_dirs`]. The first listing, read or decode failure
//! aborts the build.

use std::path::Path;
use std::sync::Arc;

use docschema_core::{Command, Schema};
use docschema_markdown::parse_command;
use tracing::debug;

use crate::embedded::{EmbeddedDir, EmbeddedFile};
use crate::error::{Result, SchemaError};
use crate::fs::FsDir;
use crate::source::{DirectorySource, SourceFile};
use crate::vfs::{FileSystem, VfsDir};

const DOC_EXTENSION: &str = ".md";

/// Builds the complete schema rooted at `root`.
///
/// The root's own document supplies the schema's name, description and
/// other metadata; its subdirectories become the top-level commands.
///
/// # Errors
///
/// Returns [`SchemaError::List`] or [`SchemaError::Read`] when the source
/// fails, and [`SchemaError::Decode`] when a selected document holds
/// malformed JSON. No partial schema is returned.
///
/// # Examples
///
/// ```
/// use docschema_tree::{MemoryFs, VfsDir, build_schema};
///
/// let fs = MemoryFs::new()
///     .with_file("git/git.md", "# Description\nThe stupid content tracker")
///     .with_file("git/commit/commit.md", "# Description\nRecord changes")
///     .with_file("git/status/notes.md", "# Settings\n```json\n{}\n```\n");
///
/// let schema = build_schema(&VfsDir::new(fs, "git")).unwrap();
/// assert_eq!(schema.name, "git");
/// assert_eq!(schema.command_names(), vec!["commit", "notes"]);
/// ```
pub fn build_schema(root: &dyn DirectorySource) -> Result<Schema> {
    let schema = build_command(root)?;
    debug!(
        name = %schema.name,
        commands = schema.command_paths().len(),
        "built schema"
    );
    Ok(schema)
}

/// Builds a schema from a directory on the local filesystem.
///
/// # Errors
///
/// See [`build_schema`].
pub fn build_schema_from_dir(path: impl AsRef<Path>) -> Result<Schema> {
    build_schema(&FsDir::new(path.as_ref()))
}

/// Builds a schema from embedded documents, rooted at `path` within them.
///
/// # Errors
///
/// See [`build_schema`].
pub fn build_schema_from_embedded(files: &'static [EmbeddedFile], path: &str) -> Result<Schema> {
    build_schema(&EmbeddedDir::new(files, path))
}

/// Builds a schema from any [`FileSystem`], rooted at `path` within it.
///
/// # Errors
///
/// See [`build_schema`].
pub fn build_schema_from_fs<F: FileSystem + 'static>(fs: F, path: &str) -> Result<Schema> {
    build_schema(&VfsDir::shared(Arc::new(fs), path))
}

fn build_command(dir: &dyn DirectorySource) -> Result<Command> {
    let mut cmd = resolve_command(dir)?;

    let children = dir.list_dirs().map_err(|source| SchemaError::List {
        path: dir.path(),
        source,
    })?;
    for child in &children {
        cmd.commands.push(build_command(child.as_ref())?);
    }

    Ok(cmd)
}

/// Resolves the name and metadata of one directory, without its children.
///
/// # Errors
///
/// See [`build_schema`].
pub fn resolve_command(dir: &dyn DirectorySource) -> Result<Command> {
    let files = dir.list_files().map_err(|source| SchemaError::List {
        path: dir.path(),
        source,
    })?;
    let dir_name = dir.name();

    let Some(doc) = select_document(&dir_name, &files) else {
        debug!(path = %dir.path(), name = %dir_name, "no command document");
        return Ok(Command::new(&dir_name));
    };

    let doc_name = doc.name();
    let stem = doc_name.strip_suffix(DOC_EXTENSION).unwrap_or(&doc_name);
    let fallback = if stem.is_empty() { dir_name.as_str() } else { stem };

    let path = doc.path();
    let content = doc.read().map_err(|source| SchemaError::Read {
        path: path.clone(),
        source,
    })?;
    let cmd = parse_command(&path, &content, fallback)?;

    debug!(path = %path, name = %cmd.name, "resolved command document");
    Ok(cmd)
}

/// Picks the document that describes a directory.
fn select_document<'a>(
    dir_name: &str,
    files: &'a [Box<dyn SourceFile>],
) -> Option<&'a dyn SourceFile> {
    let mut docs: Vec<(String, &'a dyn SourceFile)> = files
        .iter()
        .map(|f| (f.name(), f.as_ref()))
        .filter(|(name, _)| name.ends_with(DOC_EXTENSION))
        .collect();

    if docs.len() > 1 {
        debug!(dir = dir_name, candidates = docs.len(), "several command documents");
        if let Some(pos) = docs
            .iter()
            .position(|(name, _)| name.strip_suffix(DOC_EXTENSION) == Some(dir_name))
        {
            return Some(docs.swap_remove(pos).1);
        }
        docs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    }

    docs.into_iter().next().map(|(_, file)| file)
}
