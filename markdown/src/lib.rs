//! Markdown command documents.
//!
//! A command document is a lightweight markdown file whose `#` sections
//! describe one command:
//!
//! - [`parse_sections`]: split raw text into ordered [`Section`]s of text
//!   and code [`Snippet`]s. Never fails.
//! - [`parse_command`]: map a document's sections onto a
//!   [`Command`](docschema_core::Command): description, options, arguments,
//!   examples and settings overrides.
//!
//! # Example
//!
//! ```
//! use docschema_markdown::{parse_command, parse_sections};
//!
//! let doc = "# Description\nSay hello.\n\n# Examples\nGreet:\n```sh\nhello --name bob\n```\n";
//!
//! let sections = parse_sections(doc);
//! assert_eq!(sections.len(), 2);
//!
//! let cmd = parse_command("hello.md", doc.as_bytes(), "hello").unwrap();
//! assert_eq!(cmd.description, "Say hello.");
//! assert_eq!(cmd.examples[0].usage, "hello --name bob");
//! assert_eq!(cmd.examples[0].description, "Greet:");
//! ```

mod error;
mod mapper;
mod section;

pub use error::{DecodeError, Result};
pub use mapper::{command_from_sections, parse_command};
pub use section::{Section, Sections, Snippet, SnippetKind, Snippets, parse_sections};
