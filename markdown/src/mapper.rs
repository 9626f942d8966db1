//! Maps the sections of one document onto a [`Command`].
//!
//! Recognized sections (looked up with [`Sections::find`]):
//!
//! | Section       | Content                                  | Field(s)               |
//! |---------------|------------------------------------------|------------------------|
//! | `description` | prose                                    | `description`          |
//! | `options`     | `json` block, array of options           | `options`              |
//! | `arguments`   | `json` block, array of arguments         | `arguments`            |
//! | `examples`    | prose followed by code blocks            | `examples`             |
//! | `settings`    | `json` object with `name`, `description` | `name`, `description`  |
//!
//! Missing sections leave the corresponding fields empty.

use docschema_core::{Argument, Command, CommandOption, Example};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DecodeError, Result};
use crate::section::{Section, Sections, Snippets, parse_sections};

/// Parses one document into a command.
///
/// `document` names the source in error messages; `fallback_name` becomes the
/// command name unless the settings block overrides it. Invalid UTF-8 is
/// replaced rather than rejected.
///
/// # Errors
///
/// Returns [`DecodeError`] when the `json` block of the options, arguments
/// or settings section is malformed.
///
/// # Examples
///
/// ```
/// use docschema_markdown::parse_command;
///
/// let doc = "# Description\nShow the working tree\nstatus.\n\n# Options\n```json\n[{\"flags\": \"--short\", \"type\": \"boolean\"}]\n```\n";
///
/// let cmd = parse_command("status.md", doc.as_bytes(), "status").unwrap();
/// assert_eq!(cmd.name, "status");
/// assert_eq!(cmd.description, "Show the working tree status.");
/// assert_eq!(cmd.options[0].flags, "--short");
/// ```
pub fn parse_command(document: &str, content: &[u8], fallback_name: &str) -> Result<Command> {
    let content = String::from_utf8_lossy(content);
    let sections = parse_sections(&content);
    command_from_sections(document, &sections, fallback_name)
}

/// Builds a command from already parsed sections.
///
/// # Errors
///
/// See [`parse_command`].
pub fn command_from_sections(
    document: &str,
    sections: &Sections,
    fallback_name: &str,
) -> Result<Command> {
    let mut cmd = Command::new(fallback_name);

    if let Some(section) = sections.find("description") {
        cmd.description = normalize_whitespace(&section.snippets.combine_texts());
    }

    if let Some(section) = sections.find("options") {
        cmd.options = decode_json::<Option<Vec<CommandOption>>>(document, section)?
            .flatten()
            .unwrap_or_default();
    }

    if let Some(section) = sections.find("arguments") {
        cmd.arguments = decode_json::<Option<Vec<Argument>>>(document, section)?
            .flatten()
            .unwrap_or_default();
    }

    if let Some(section) = sections.find("examples") {
        cmd.examples = collect_examples(&section.snippets);
    }

    if let Some(section) = sections.find("settings") {
        let settings = decode_json::<Option<Map<String, Value>>>(document, section)?
            .flatten()
            .unwrap_or_default();
        apply_settings(&mut cmd, &settings);
    }

    debug!(
        document,
        name = %cmd.name,
        options = cmd.options.len(),
        arguments = cmd.arguments.len(),
        examples = cmd.examples.len(),
        "mapped document"
    );

    Ok(cmd)
}

/// Decodes the first `json` block of a section, if there is one.
fn decode_json<T: DeserializeOwned>(document: &str, section: &Section) -> Result<Option<T>> {
    let Some(snippet) = section.snippets.find_json() else {
        return Ok(None);
    };
    serde_json::from_str(&snippet.content)
        .map(Some)
        .map_err(|source| DecodeError {
            section: section.title.clone(),
            document: document.to_string(),
            source,
        })
}

/// Pairs each code block with the prose collected since the previous one.
///
/// Prose after the last code block becomes an example with empty usage.
fn collect_examples(snippets: &Snippets) -> Vec<Example> {
    let mut examples = Vec::new();
    let mut descriptions: Vec<&str> = Vec::new();

    for snippet in snippets {
        if !snippet.is_code() {
            descriptions.push(&snippet.content);
            continue;
        }
        examples.push(Example {
            usage: snippet.content.clone(),
            description: descriptions.join("\n"),
        });
        descriptions.clear();
    }

    if !descriptions.is_empty() {
        examples.push(Example {
            usage: String::new(),
            description: descriptions.join("\n"),
        });
    }

    examples
}

/// Settings override the name when non-empty and only fill an empty
/// description.
fn apply_settings(cmd: &mut Command, settings: &Map<String, Value>) {
    if let Some(Value::String(name)) = settings.get("name") {
        if !name.is_empty() {
            cmd.name = name.clone();
        }
    }

    if cmd.description.is_empty() {
        if let Some(Value::String(desc)) = settings.get("description") {
            cmd.description = desc.clone();
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
