//! Structural validation of command trees.
//!
//! The builder never rejects a tree on these grounds; validation is a
//! separate pass for authors and tooling. It reports problems that make a
//! schema ambiguous for renderers, such as two sibling commands sharing a
//! name or an option without a flag spelling.
//!
//! # Examples
//!
//! ```
//! use docschema_core::*;
//!
//! let schema = Command::new("git").with_command(Command::new("commit"));
//! assert!(validate_schema(&schema).is_empty());
//!
//! // Invalid: option without flags
//! let bad = Command::new("git").with_option(CommandOption::new(""));
//! assert!(!validate_schema(&bad).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Argument, Command, CommandOption, Schema};

/// Schema validation errors.
///
/// Paths are the space-joined command names from the root down to the
/// command that holds the problem (e.g. `git remote add`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty (under: {0})")]
    EmptyCommandName(String),
    /// Two sibling commands share a name.
    #[error("duplicate command '{name}' in: {path}")]
    DuplicateCommand { path: String, name: String },
    /// An option has no flag spelling.
    #[error("option without flags in: {0}")]
    EmptyOptionFlags(String),
    /// Two options of the same command share a flag spelling.
    #[error("duplicate option '{flags}' in: {path}")]
    DuplicateOption { path: String, flags: String },
    /// An argument has no name.
    #[error("argument without name in: {0}")]
    EmptyArgumentName(String),
    /// Two arguments of the same command share a name.
    #[error("duplicate argument '{name}' in: {path}")]
    DuplicateArgument { path: String, name: String },
}

/// Validates a whole command tree and returns every problem found.
///
/// # Examples
///
/// ```
/// use docschema_core::*;
///
/// let schema = Command::new("git")
///     .with_command(Command::new("push"))
///     .with_command(Command::new("push"));
/// let errors = validate_schema(&schema);
/// assert_eq!(errors, vec![ValidationError::DuplicateCommand {
///     path: "git".into(),
///     name: "push".into(),
/// }]);
/// ```
pub fn validate_schema(schema: &Schema) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    validate_command(schema, &mut path, &mut errors);
    errors
}

fn validate_command(cmd: &Command, path: &mut Vec<String>, errors: &mut Vec<ValidationError>) {
    if cmd.name.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandName(path.join(" ")));
    }
    path.push(cmd.name.clone());
    let here = path.join(" ");

    validate_options(&cmd.options, &here, errors);
    validate_arguments(&cmd.arguments, &here, errors);

    let mut seen: HashSet<&str> = HashSet::new();
    for child in &cmd.commands {
        let name = child.name.trim();
        if !name.is_empty() && !seen.insert(name) {
            errors.push(ValidationError::DuplicateCommand {
                path: here.clone(),
                name: name.to_string(),
            });
        }
        validate_command(child, path, errors);
    }

    path.pop();
}

fn validate_options(options: &[CommandOption], path: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for opt in options {
        let flags = opt.flags.trim();
        if flags.is_empty() {
            errors.push(ValidationError::EmptyOptionFlags(path.to_string()));
            continue;
        }
        if !seen.insert(flags) {
            errors.push(ValidationError::DuplicateOption {
                path: path.to_string(),
                flags: flags.to_string(),
            });
        }
    }
}

fn validate_arguments(arguments: &[Argument], path: &str, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    for arg in arguments {
        let name = arg.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyArgumentName(path.to_string()));
            continue;
        }
        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateArgument {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
    }
}
