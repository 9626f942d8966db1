//! Builds command schemas from directory trees of markdown documents.
//!
//! Each directory of the tree is one command; the `.md` document inside it
//! describes the command and its subdirectories hold the subcommands. The
//! builder reads directories through the [`DirectorySource`] trait, so the
//! same tree can come from several places:
//!
//! - [`FsDir`]: the local filesystem ([`build_schema_from_dir`]).
//! - [`EmbeddedDir`]: a static table of [`EmbeddedFile`]s compiled into the
//!   binary ([`build_schema_from_embedded`]).
//! - [`VfsDir`]: any [`FileSystem`], such as [`MemoryFs`] or [`DirFs`]
//!   ([`build_schema_from_fs`]).
//!
//! # Quick start
//!
//! ```no_run
//! use docschema_tree::build_schema_from_dir;
//!
//! let schema = build_schema_from_dir("docs/mycli").unwrap();
//! for name in schema.command_names() {
//!     println!("{name}");
//! }
//! println!("{}", schema.to_json_pretty().unwrap());
//! ```
//!
//! # Feature flags
//!
//! - **`gzip-bundle`**: enables `MemoryFs::from_gzip_json` for loading a
//!   gzip-compressed JSON bundle of documents. Requires the `flate2`
//!   dependency.

mod embedded;
mod error;
mod fs;
mod source;
mod vfs;
mod walker;

pub use embedded::{EmbeddedDir, EmbeddedFile};
pub use error::{Result, SchemaError};
pub use fs::{FsDir, FsFile};
pub use source::{DirectorySource, SourceFile};
pub use vfs::{DirEntry, DirFs, FileSystem, MemoryFs, VfsDir, VfsFile};
pub use walker::{
    build_schema, build_schema_from_dir, build_schema_from_embedded, build_schema_from_fs,
    resolve_command,
};
