//! Command tree definitions.
//!
//! This module defines the data model produced by the schema builder and
//! handed to renderers and command runners. The types serialize with
//! [`serde`] and their JSON form is the interchange format, so field names
//! and nesting are part of the public contract.

use serde::{Deserialize, Deserializer, Serialize};

/// Decodes `null` the same way as a missing key.
///
/// Tools that serialize empty lists as `null` still produce valid schemas.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An option (flag) accepted by a command.
///
/// `flags` holds the flag spelling as written by the document author
/// (e.g. `"--verbose"` or `"-o, --output"`); it is passed through verbatim.
///
/// # Examples
///
/// ```
/// use docschema_core::CommandOption;
///
/// let opt: CommandOption = serde_json::from_str(r#"{"flags": "--verbose", "type": "boolean"}"#).unwrap();
/// assert_eq!(opt.flags, "--verbose");
/// assert_eq!(opt.value_type, "boolean");
/// assert!(!opt.multiline);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandOption {
    /// Flag spelling (e.g. "--name")
    #[serde(deserialize_with = "null_as_default")]
    pub flags: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Value type hint for renderers (e.g. "string", "boolean")
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub value_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub default: String,
    /// Render the value input as a multi-line field
    pub multiline: bool,
}

impl CommandOption {
    /// Creates an option with the given flag spelling.
    pub fn new(flags: &str) -> Self {
        Self {
            flags: flags.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Sets the value type hint.
    pub fn with_type(mut self, value_type: &str) -> Self {
        self.value_type = value_type.to_string();
        self
    }
}

/// A positional argument accepted by a command.
///
/// # Examples
///
/// ```
/// use docschema_core::Argument;
///
/// let arg = Argument::new("file").with_description("Input file");
/// assert_eq!(arg.name, "file");
/// assert_eq!(arg.description, "Input file");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argument {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Value type hint for renderers
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub value_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub default: String,
    /// Render the value input as a multi-line field
    pub multiline: bool,
}

impl Argument {
    /// Creates an argument with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }
}

/// A usage example. `usage` is empty for trailing prose with no code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    #[serde(deserialize_with = "null_as_default")]
    pub usage: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

impl Example {
    pub fn new(usage: &str, description: &str) -> Self {
        Self {
            usage: usage.to_string(),
            description: description.to_string(),
        }
    }
}

/// Description of what a command prints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub output_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
}

/// One node of the command tree.
///
/// Each node exclusively owns its children. Lists keep the order in which
/// they were declared in the source documents; nothing re-sorts them.
///
/// # Examples
///
/// ```
/// use docschema_core::{Argument, Command, CommandOption};
///
/// let cmd = Command::new("git")
///     .with_description("The stupid content tracker")
///     .with_command(
///         Command::new("commit")
///             .with_option(CommandOption::new("--message").with_type("string")),
///     )
///     .with_command(Command::new("add").with_argument(Argument::new("pathspec")));
///
/// assert_eq!(cmd.command_names(), vec!["commit", "add"]);
/// assert_eq!(cmd.find_command(&["add"]).unwrap().arguments.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Command {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    /// Child commands, in directory listing order
    #[serde(deserialize_with = "null_as_default")]
    pub commands: Vec<Command>,
    #[serde(deserialize_with = "null_as_default")]
    pub examples: Vec<Example>,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Vec<CommandOption>,
    #[serde(deserialize_with = "null_as_default")]
    pub arguments: Vec<Argument>,
    pub output: Option<Output>,
}

/// The root of a command tree.
///
/// Structurally identical to [`Command`]: its name and children describe the
/// root node and its top-level commands.
pub type Schema = Command;

impl Command {
    /// Creates an otherwise empty command with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Adds a child command.
    pub fn with_command(mut self, cmd: Command) -> Self {
        self.commands.push(cmd);
        self
    }

    /// Adds an option.
    pub fn with_option(mut self, opt: CommandOption) -> Self {
        self.options.push(opt);
        self
    }

    /// Adds a positional argument.
    pub fn with_argument(mut self, arg: Argument) -> Self {
        self.arguments.push(arg);
        self
    }

    /// Adds an example.
    pub fn with_example(mut self, example: Example) -> Self {
        self.examples.push(example);
        self
    }

    /// Resolves a path of child names, one level per element.
    ///
    /// The first child whose name matches wins at each level. An empty path
    /// resolves to nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use docschema_core::Command;
    ///
    /// let root = Command::new("tool")
    ///     .with_command(Command::new("remote").with_command(Command::new("add")));
    ///
    /// assert!(root.find_command(&["remote", "add"]).is_some());
    /// assert!(root.find_command(&["add"]).is_none());
    /// assert!(root.find_command::<&str>(&[]).is_none());
    /// ```
    pub fn find_command<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        let (first, rest) = path.split_first()?;
        let child = self
            .commands
            .iter()
            .find(|c| c.name == first.as_ref())?;
        if rest.is_empty() {
            Some(child)
        } else {
            child.find_command(rest)
        }
    }

    /// Gets the names of the immediate child commands.
    pub fn command_names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    /// Lists every descendant as a path of names, depth-first, parents
    /// before children.
    ///
    /// # Examples
    ///
    /// ```
    /// use docschema_core::Command;
    ///
    /// let root = Command::new("tool")
    ///     .with_command(Command::new("remote").with_command(Command::new("add")))
    ///     .with_command(Command::new("status"));
    ///
    /// let paths = root.command_paths();
    /// assert_eq!(paths, vec![
    ///     vec!["remote".to_string()],
    ///     vec!["remote".to_string(), "add".to_string()],
    ///     vec!["status".to_string()],
    /// ]);
    /// ```
    pub fn command_paths(&self) -> Vec<Vec<String>> {
        let mut out = Vec::new();
        let mut prefix = Vec::new();
        collect_paths(self, &mut prefix, &mut out);
        out
    }

    /// Returns `true` when the node carries no content besides its name.
    pub fn is_bare(&self) -> bool {
        self.description.is_empty()
            && self.commands.is_empty()
            && self.examples.is_empty()
            && self.options.is_empty()
            && self.arguments.is_empty()
            && self.output.is_none()
    }

    /// Serializes to the compact interchange JSON form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes to indented interchange JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decodes the interchange JSON form.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn collect_paths(cmd: &Command, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    for child in &cmd.commands {
        prefix.push(child.name.clone());
        out.push(prefix.clone());
        collect_paths(child, prefix, out);
        prefix.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> Schema {
        Command::new("tool")
            .with_description("A sample tool")
            .with_command(
                Command::new("run")
                    .with_description("Run a script")
                    .with_option(
                        CommandOption::new("--verbose")
                            .with_type("boolean")
                            .with_description("Verbose output"),
                    )
                    .with_argument(Argument::new("script").with_description("Script path"))
                    .with_example(Example::new("tool run a.sh", "Run a script")),
            )
            .with_command(Command::new("status"))
    }

    #[test]
    fn test_json_round_trip() {
        let schema = sample_schema();
        let json = schema.to_json().unwrap();
        let decoded = Schema::from_json(&json).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_json_field_names() {
        let schema = sample_schema();
        let value: serde_json::Value = serde_json::from_str(&schema.to_json().unwrap()).unwrap();

        assert_eq!(value["name"], "tool");
        assert!(value["output"].is_null());
        let run = &value["commands"][0];
        assert_eq!(run["options"][0]["flags"], "--verbose");
        assert_eq!(run["options"][0]["type"], "boolean");
        assert_eq!(run["options"][0]["multiline"], false);
        assert_eq!(run["arguments"][0]["name"], "script");
        assert_eq!(run["examples"][0]["usage"], "tool run a.sh");
        assert_eq!(value["commands"][1]["commands"], serde_json::json!([]));
    }

    #[test]
    fn test_null_collections_decode_as_empty() {
        let json = r#"{
            "name": "tool",
            "description": "",
            "commands": null,
            "examples": null,
            "options": null,
            "arguments": null,
            "output": null
        }"#;
        let schema = Schema::from_json(json).unwrap();
        assert_eq!(schema, Command::new("tool"));
    }

    #[test]
    fn test_missing_fields_default() {
        let opt: CommandOption = serde_json::from_str(r#"{"flags": "-v"}"#).unwrap();
        assert_eq!(opt, CommandOption::new("-v"));

        let schema = Schema::from_json(r#"{"name": "x"}"#).unwrap();
        assert!(schema.is_bare());
    }

    #[test]
    fn test_output_round_trip() {
        let mut schema = Command::new("tool");
        schema.output = Some(Output {
            output_type: "text".into(),
            description: "plain text".into(),
        });
        let json = schema.to_json_pretty().unwrap();
        assert!(json.contains(r#""type": "text""#));
        assert_eq!(Schema::from_json(&json).unwrap(), schema);
    }

    #[test]
    fn test_find_command_first_match_wins() {
        let root = Command::new("tool")
            .with_command(Command::new("dup").with_description("first"))
            .with_command(Command::new("dup").with_description("second"));

        assert_eq!(root.find_command(&["dup"]).unwrap().description, "first");
        assert!(root.find_command(&["dup", "missing"]).is_none());
    }

    #[test]
    fn test_wrong_typed_field_is_rejected() {
        let result: Result<CommandOption, _> = serde_json::from_str(r#"{"default": 3}"#);
        assert!(result.is_err());
    }
}
