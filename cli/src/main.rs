mod config;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use docschema_core::{Schema, ValidationError, validate_schema};
use docschema_markdown::parse_sections;
use docschema_tree::build_schema_from_dir;

use config::{Config, DEFAULT_CONFIG_FILE, OutputFormat};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "docschema")]
#[command(about = "Build command schemas from directories of markdown documents")]
struct Cli {
    /// Path to a YAML config file (default: ./.docschema.yml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a schema from a directory, or check a schema JSON file.
    Parse(ParseArgs),
    /// Validate one or more schema JSON files.
    Validate(ValidateArgs),
    /// Print the parsed sections of one markdown document.
    Sections(SectionsArgs),
    /// Write a default config file.
    Init(InitArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Schema directory, or a schema JSON file to check.
    path: PathBuf,
    /// Output format (overrides the config file).
    #[arg(long)]
    format: Option<CliOutputFormat>,
    /// Print compact JSON.
    #[arg(long)]
    compact: bool,
    /// Fail when the built schema has validation errors.
    #[arg(long)]
    strict: bool,
    /// Write the schema to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Schema JSON files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct SectionsArgs {
    /// Markdown document to inspect.
    input: PathBuf,
}

#[derive(Debug, Args)]
struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(long)]
    force: bool,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Command::Parse(args) => Config::load_or_default(config_path)
            .map_err(|err| format!("Failed to load config: {err}"))
            .and_then(|config| run_parse(args, config)),
        Command::Validate(args) => run_validate(args),
        Command::Sections(args) => run_sections(args),
        Command::Init(args) => run_init(args, config_path),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_parse(args: ParseArgs, mut config: Config) -> Result<(), String> {
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if args.compact {
        config.pretty = false;
    }
    if args.strict {
        config.strict = true;
    }

    if !args.path.is_dir() {
        let schema = load_schema_file(&args.path)?;
        check_schema(&schema, &config)?;
        println!("validated");
        return Ok(());
    }

    let schema = build_schema_from_dir(&args.path)
        .map_err(|err| format!("Failed to build schema from '{}': {err}", args.path.display()))?;
    check_schema(&schema, &config)?;

    let raw = format_schema(&schema, &config)?;
    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).map_err(|err| {
                        format!(
                            "Failed to create output directory '{}': {err}",
                            parent.display()
                        )
                    })?;
                }
            }
            fs::write(path, raw)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            eprintln!(
                "Wrote schema '{}' with {} command(s) to '{}'.",
                schema.name,
                schema.command_paths().len(),
                path.display()
            );
        }
        None => println!("{raw}"),
    }

    Ok(())
}

fn run_init(args: InitArgs, path: Option<&Path>) -> Result<(), String> {
    let path = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    if path.exists() && !args.force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        ));
    }
    Config::default()
        .save(path)
        .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
    eprintln!("Wrote default config to '{}'.", path.display());
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failed = 0usize;
    for path in &args.inputs {
        let schema = load_schema_file(path)?;
        let errors = validate_schema(&schema);
        if errors.is_empty() {
            continue;
        }
        failed += 1;
        eprintln!("{}:", path.display());
        report_validation_errors(&errors);
    }

    if failed > 0 {
        return Err(format!("{failed} schema file(s) failed validation"));
    }
    println!("Validated {} schema file(s).", args.inputs.len());
    Ok(())
}

fn run_sections(args: SectionsArgs) -> Result<(), String> {
    let raw = fs::read(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let sections = parse_sections(&String::from_utf8_lossy(&raw));
    let out = serde_json::to_string_pretty(&sections)
        .map_err(|err| format!("JSON serialization failed: {err}"))?;
    println!("{out}");
    Ok(())
}

fn load_schema_file(path: &Path) -> Result<Schema, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
    Schema::from_json(&raw).map_err(|err| format!("Failed to parse '{}': {err}", path.display()))
}

fn format_schema(schema: &Schema, config: &Config) -> Result<String, String> {
    match config.format {
        OutputFormat::Json if config.pretty => {
            schema.to_json_pretty().map_err(|e| format!("JSON serialization failed: {e}"))
        }
        OutputFormat::Json => {
            schema.to_json().map_err(|e| format!("JSON serialization failed: {e}"))
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(schema).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

/// Reports validation errors; in strict mode any error fails the command.
fn check_schema(schema: &Schema, config: &Config) -> Result<(), String> {
    let errors = validate_schema(schema);
    if errors.is_empty() {
        return Ok(());
    }
    report_validation_errors(&errors);
    if config.strict {
        return Err(format!("{} validation error(s)", errors.len()));
    }
    Ok(())
}

fn report_validation_errors(errors: &[ValidationError]) {
    for err in errors {
        eprintln!("  warning: {err}");
    }
}
