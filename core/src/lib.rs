//! Core types for command trees derived from markdown documents.
//!
//! This crate defines the value types shared by the schema builder and its
//! consumers:
//!
//! - [`Command`]: one node of the command tree (name, description, options,
//!   arguments, examples, optional output, nested commands).
//! - [`Schema`]: the root [`Command`]; its JSON serialization is the
//!   interchange format handed to renderers and command runners.
//! - [`CommandOption`], [`Argument`], [`Example`], [`Output`]: per-command
//!   metadata, kept in declaration order.
//!
//! Validation ([`validate_schema`]) reports structural problems such as
//! duplicate sibling commands or options without flags.
//!
//! # Example
//!
//! ```
//! use docschema_core::*;
//!
//! let schema = Command::new("mycli")
//!     .with_option(CommandOption::new("--verbose").with_type("boolean"))
//!     .with_command(Command::new("run").with_argument(Argument::new("script")));
//!
//! assert_eq!(schema.find_command(&["run"]).unwrap().name, "run");
//! assert!(validate_schema(&schema).is_empty());
//!
//! let json = schema.to_json().unwrap();
//! assert_eq!(Schema::from_json(&json).unwrap(), schema);
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{ValidationError, validate_schema};
