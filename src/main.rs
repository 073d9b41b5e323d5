use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::{Args, Parser, Subcommand};
use log::info;
use serde_json::Value;
use thiserror::Error;

use modalpad::config::AppConfig;
use modalpad::error::{ConfigError, DialogError};
use modalpad::host::TerminalHost;
use modalpad::logging;
use modalpad::store::{FileStorage, KeyValueStore, StorageBackend, UnavailableStorage};
use modalpad::widgets::KeypadRequest;

#[derive(Parser, Debug)]
#[command(author, version, about = "Modal numeric keypad and dialog prompts for the terminal")]
struct Cli {
    /// YAML config file. Falls back to $MODALPAD_CONFIG, then built-in defaults.
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask for a number on a decimal or hexadecimal keypad.
    Keypad(KeypadArgs),
    /// Ask for a line of free text.
    Prompt(PromptArgs),
    /// Ask the user to pick one of several options.
    Select(SelectArgs),
    /// Ask a yes/no question, or show an informational alert with --info.
    Confirm(ConfirmArgs),
    /// Read or write the key-value store directly.
    #[command(subcommand)]
    Store(StoreCommand),
}

#[derive(Args, Debug, Clone)]
struct SaveArgs {
    /// Store a produced value under chapter and exercise numbers.
    #[arg(long, num_args = 2, value_names = ["CHAPTER", "EXERCISE"])]
    save: Option<Vec<u32>>,
}

#[derive(Args, Debug, Clone)]
struct KeypadArgs {
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,
    /// 10 or 16.
    #[arg(long, default_value_t = 10)]
    base: u32,
    /// Enable the decimal point key.
    #[arg(long)]
    decimal: bool,
    #[arg(long, default_value = "Enter a number")]
    title: String,
    #[arg(long)]
    instruction: Option<String>,
    #[command(flatten)]
    save: SaveArgs,
}

#[derive(Args, Debug, Clone)]
struct PromptArgs {
    #[arg(long, default_value = "Enter text")]
    title: String,
    #[arg(long)]
    instruction: Option<String>,
    #[command(flatten)]
    save: SaveArgs,
}

#[derive(Args, Debug, Clone)]
struct SelectArgs {
    #[arg(long, default_value = "Select")]
    title: String,
    /// Options in display order.
    #[arg(required = true)]
    options: Vec<String>,
    #[command(flatten)]
    save: SaveArgs,
}

#[derive(Args, Debug, Clone)]
struct ConfirmArgs {
    #[arg(long, default_value = "Confirm")]
    title: String,
    /// Message shown above the buttons.
    message: String,
    /// Show a single "ok" button; the result is always null.
    #[arg(long)]
    info: bool,
}

#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Print the value stored under the key parts, or null.
    Get {
        #[arg(required = true)]
        parts: Vec<String>,
    },
    /// Store VALUE under the key parts.
    Set {
        value: String,
        #[arg(required = true)]
        parts: Vec<String>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialog(#[from] DialogError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode result: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Config(_) | CliError::Dialog(_) => ExitCode::from(2),
            CliError::Io(_) | CliError::Json(_) => ExitCode::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init("info") {
        eprintln!("Logging disabled: {err}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            err.exit_code()
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Keypad(args) => execute_keypad(&config, args),
        Command::Prompt(args) => execute_prompt(&config, args),
        Command::Select(args) => execute_select(&config, args),
        Command::Confirm(args) => execute_confirm(&config, args),
        Command::Store(command) => execute_store(&config, command),
    }
}

fn execute_keypad(config: &AppConfig, args: KeypadArgs) -> Result<(), CliError> {
    let mut request = KeypadRequest::new(args.title, args.base)
        .with_bounds(args.min, args.max)
        .allow_decimal(args.decimal);
    if let Some(instruction) = args.instruction {
        request = request.with_instruction(instruction);
    }

    let mut host = TerminalHost::new()?;
    let (tx, rx) = mpsc::channel();
    config.dialogs.keypad().open(&mut host, request, move |value| {
        let _ = tx.send(value);
    })?;
    host.run_until_closed()?;

    finish_text(config, rx.try_recv().ok().flatten(), &args.save)
}

fn execute_prompt(config: &AppConfig, args: PromptArgs) -> Result<(), CliError> {
    let mut host = TerminalHost::new()?;
    let (tx, rx) = mpsc::channel();
    config.dialogs.prompt().open(
        &mut host,
        &args.title,
        args.instruction.as_deref(),
        move |value| {
            let _ = tx.send(value);
        },
    );
    host.run_until_closed()?;

    finish_text(config, rx.try_recv().ok().flatten(), &args.save)
}

fn execute_select(config: &AppConfig, args: SelectArgs) -> Result<(), CliError> {
    let mut host = TerminalHost::new()?;
    let (tx, rx) = mpsc::channel();
    config
        .dialogs
        .selector()
        .open(&mut host, &args.title, args.options, move |value| {
            let _ = tx.send(value);
        })?;
    host.run_until_closed()?;

    finish_text(config, rx.try_recv().ok().flatten(), &args.save)
}

fn execute_confirm(config: &AppConfig, args: ConfirmArgs) -> Result<(), CliError> {
    let mut host = TerminalHost::new()?;
    let (tx, rx) = mpsc::channel();
    config.dialogs.confirm().open(
        &mut host,
        &args.title,
        &args.message,
        args.info,
        move |value| {
            let _ = tx.send(value);
        },
    );
    host.run_until_closed()?;

    let answer = rx.try_recv().ok().flatten();
    print_json(&answer.map_or(Value::Null, Value::Bool))
}

fn execute_store(config: &AppConfig, command: StoreCommand) -> Result<(), CliError> {
    let mut store = open_store(config);
    match command {
        StoreCommand::Get { parts } => {
            let value = store.get(&as_strs(&parts));
            print_json(&value.map_or(Value::Null, Value::String))
        }
        StoreCommand::Set { value, parts } => {
            store.set(&as_strs(&parts), &value);
            Ok(())
        }
    }
}

fn finish_text(
    config: &AppConfig,
    value: Option<String>,
    save: &SaveArgs,
) -> Result<(), CliError> {
    if let (Some(value), Some([chapter, exercise])) = (&value, save.save.as_deref()) {
        let mut store = open_store(config);
        store.save_exercise(*chapter, *exercise, value);
        info!("saved result for chapter {chapter} exercise {exercise}");
    }
    print_json(&value.map_or(Value::Null, Value::String))
}

fn open_store(config: &AppConfig) -> KeyValueStore<Box<dyn StorageBackend>> {
    let backend: Box<dyn StorageBackend> = match config.store.resolved_path() {
        Some(path) => Box::new(FileStorage::new(path)),
        None => Box::new(UnavailableStorage),
    };
    KeyValueStore::new(backend, config.store.namespace.clone())
}

fn as_strs(parts: &[String]) -> Vec<&str> {
    parts.iter().map(String::as_str).collect()
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}
