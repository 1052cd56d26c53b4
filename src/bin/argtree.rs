//! Argtree CLI Binary
//!
//! Drives a sample `shop` command tree against an object file, so parsing and
//! completion can be tried from a shell.

use anyhow::{Context, Result};
use argtree::argument::{
    FallbackArgument, HexId, HexIdFormat, LiteralArgument, ObjectByIdArgument, OptionalArgument,
    StringArgument, TargetedObjectArgument, UuidFormat,
};
use argtree::config::{ArgtreeConfig, CompletionConfig, ConfigLoader};
use argtree::logging::{init_logging, LoggingConfig};
use argtree::source::{InMemorySource, SourceRecord};
use argtree::{Actor, Command, CommandContext, CommandInput, ParseError};
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Argtree CLI - try command parsing and tab completion
#[derive(Parser)]
#[command(name = "argtree")]
#[command(about = "Parse and complete invocations of a sample command tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML file with [[objects]] entries (id, name, targeted_by)
    #[arg(long)]
    objects: Option<PathBuf>,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Invoke as this player
    #[arg(long)]
    actor: Option<String>,

    /// Invoke from the console (default when no actor is given)
    #[arg(long, conflicts_with = "actor")]
    console: bool,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Enable verbose logging (default: off)
    #[arg(long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an invocation of the `shop` command
    Parse {
        /// Raw input line, split with the configured separator
        #[arg(long)]
        line: Option<String>,
        /// Argument tokens after `--`
        #[arg(last = true)]
        tokens: Vec<String>,
    },
    /// Complete the last token of an invocation
    Complete {
        #[arg(long)]
        line: Option<String>,
        #[arg(last = true)]
        tokens: Vec<String>,
    },
    /// List the commands of the sample tree
    Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => ConfigLoader::load(Some(path))
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load(None).unwrap_or_default(),
    };
    init_logging(Some(&logging_config(&cli, &config)))
        .context("Failed to initialize logging")?;
    info!("Argtree CLI starting");

    let source = match cli.objects.as_deref() {
        Some(path) => InMemorySource::load(path)
            .with_context(|| format!("Failed to load objects from {}", path.display()))?,
        None => sample_source(),
    };
    debug!(objects = source.len(), "Loaded objects");
    let root = build_tree(Arc::new(source), &config.completion)?;

    let actor = match (&cli.actor, cli.console) {
        (Some(name), false) => Actor::player(name),
        _ => Actor::Console,
    };
    let json_output = cli.format == "json";

    match &cli.command {
        Commands::Parse { line, tokens } => {
            let input = command_input(&root, actor, &config.completion, line, tokens);
            match root.parse(&input) {
                Ok(parsed) => {
                    let values = context_values(&parsed.context);
                    if json_output {
                        let output = json!({
                            "command": parsed.command.name(),
                            "alias": parsed.input.command_alias(),
                            "values": values,
                        });
                        println!("{}", serde_json::to_string_pretty(&output)?);
                    } else {
                        println!("{} {}", "command:".bold(), parsed.command.usage());
                        for (name, value) in values {
                            println!("  {} = {}", name, display_value(&value));
                        }
                    }
                }
                Err(err) => {
                    report_parse_error(&err, json_output)?;
                    process::exit(2);
                }
            }
        }
        Commands::Complete { line, tokens } => {
            let input = command_input(&root, actor, &config.completion, line, tokens);
            let suggestions = root.complete(&input);
            if json_output {
                println!("{}", serde_json::to_string_pretty(&json!({ "suggestions": suggestions }))?);
            } else {
                for suggestion in suggestions {
                    println!("{}", suggestion);
                }
            }
        }
        Commands::Commands => print_commands(&root, json_output)?,
    }
    Ok(())
}

/// Logging stays off unless --verbose is given.
fn logging_config(cli: &Cli, config: &ArgtreeConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if !cli.verbose {
        logging.level = "off".to_string();
    } else if let Some(level) = &cli.log_level {
        logging.level = level.clone();
    }
    logging
}

fn command_input(
    root: &Command,
    actor: Actor,
    completion: &CompletionConfig,
    line: &Option<String>,
    tokens: &[String],
) -> CommandInput {
    match line {
        Some(line) => completion.input(actor, root.name(), line),
        None => CommandInput::new(actor, root.name(), tokens.iter().cloned())
            .with_separator(&completion.separator),
    }
}

fn sample_source() -> InMemorySource {
    let shop = |id: u128, name: &str| SourceRecord::new(Uuid::from_u128(id), name);
    InMemorySource::new(vec![
        shop(0x8f14e45f_ceea_467a_9a36_dedd4bea2543, "Weaponsmith").targeted_by("alice"),
        shop(0x8f14e45f_0b1e_4c6a_8d2e_3f0c9a1b2c3d, "Armorer"),
        shop(0xc9f0f895_fb98_4b91_8f1d_0c2ad1e1a5b2, "Baker"),
    ])
}

/// `shop remote|info|delete` over the given objects.
fn build_tree(source: Arc<InMemorySource>, completion: &CompletionConfig) -> Result<Arc<Command>> {
    let hex_source = Arc::new(InMemorySource::new(
        source
            .records()
            .iter()
            .map(|r| SourceRecord {
                id: HexId::new(*r.id.as_bytes()),
                name: r.name.clone(),
                targeted_by: r.targeted_by.clone(),
            })
            .collect(),
    ));
    let hex_format = HexIdFormat::grouped(4).context("Invalid identifier grouping")?;

    let remote = Command::new("remote")
        .with_alias("open")
        .with_description("Open a shop's remote editor, defaulting to the targeted shop")
        .with_argument(OptionalArgument::new(FallbackArgument::new(
            ObjectByIdArgument::new("shop", UuidFormat, Arc::clone(&source))
                .with_min_completion_input(completion.min_completion_input)
                .with_max_suggestions(completion.max_suggestions),
            TargetedObjectArgument::new("shop", Arc::clone(&source)),
        )))
        .with_argument(OptionalArgument::new(StringArgument::new("player")));

    let info = Command::new("info")
        .with_alias("i")
        .with_description("Show a shop by its grouped hex id")
        .with_argument(
            ObjectByIdArgument::new("shop", hex_format, hex_source)
                .with_min_completion_input(completion.min_completion_input)
                .with_max_suggestions(completion.max_suggestions),
        );

    let delete = Command::new("delete")
        .with_alias("remove")
        .with_description("Delete a shop")
        .with_argument(
            ObjectByIdArgument::new("shop", UuidFormat, source)
                .with_min_completion_input(completion.min_completion_input)
                .with_max_suggestions(completion.max_suggestions),
        )
        .with_argument(OptionalArgument::new(LiteralArgument::new("confirm", "confirm")));

    let root = Arc::new(
        Command::new("shop")
            .with_alias("shops")
            .with_description("Shop management"),
    );
    for child in [remote, info, delete] {
        root.register_child(Arc::new(child))?;
    }
    Ok(root)
}

fn context_values(ctx: &CommandContext) -> Map<String, Value> {
    let mut values = Map::new();
    for name in ctx.names() {
        let value = if let Some(shop) = ctx.get::<SourceRecord>(name) {
            json!({ "id": shop.id.to_string(), "name": shop.name })
        } else if let Some(shop) = ctx.get::<SourceRecord<HexId>>(name) {
            json!({ "id": shop.id.to_string(), "name": shop.name })
        } else if let Some(text) = ctx.get::<String>(name) {
            json!(text)
        } else {
            Value::Null
        };
        values.insert(name.to_string(), value);
    }
    values
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(fields) => format!(
            "{} ({})",
            fields.get("name").and_then(Value::as_str).unwrap_or_default(),
            fields.get("id").and_then(Value::as_str).unwrap_or_default()
        ),
        other => other.to_string(),
    }
}

fn report_parse_error(err: &ParseError, json_output: bool) -> Result<()> {
    if json_output {
        let output = json!({
            "error": err.to_string(),
            "argument": err.argument(),
            "input": err.input(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        eprintln!("{} {}", "error:".red().bold(), err);
    }
    Ok(())
}

fn print_commands(root: &Arc<Command>, json_output: bool) -> Result<()> {
    let children = root.children();
    if json_output {
        let commands: Vec<Value> = children
            .commands()
            .iter()
            .map(|command| {
                json!({
                    "name": command.name(),
                    "aliases": children.aliases_of(command),
                    "usage": format!("{} {}", root.name(), command.usage()),
                    "description": command.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&commands)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Command", "Aliases", "Usage", "Description"]);
    for command in children.commands() {
        table.add_row(vec![
            command.name().to_string(),
            children.aliases_of(command).join(", "),
            format!("{} {}", root.name(), command.usage()),
            command.description().unwrap_or_default().to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}
