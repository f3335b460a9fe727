use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use prompt_bridge_translator::{Attention, Translator};
use serde::Serialize;
use std::io;
use std::path::PathBuf;

use crate::flags::OutputFormat;

mod flags;
mod input;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "prompt-bridge")]
#[command(about = "Translate Stable Diffusion web UI prompts into InvokeAI syntax", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Translator config file (TOML, overrides PROMPT_BRIDGE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a prompt into InvokeAI syntax
    Translate(TranslateArgs),

    /// Show the weighted segments a prompt resolves to
    Parse(ParseArgs),
}

#[derive(Args)]
struct PromptInput {
    /// Prompt text (reads stdin when neither this nor --file is given)
    prompt: Option<String>,

    /// Read the prompt from a file
    #[arg(long, conflicts_with = "prompt")]
    file: Option<PathBuf>,
}

impl PromptInput {
    fn read(&self) -> Result<String> {
        input::read_prompt(self.prompt.as_deref(), self.file.as_deref())
    }
}

#[derive(Args)]
struct TranslateArgs {
    #[command(flatten)]
    input: PromptInput,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct ParseArgs {
    #[command(flatten)]
    input: PromptInput,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct TranslateOutput<'a> {
    input: &'a str,
    output: String,
}

#[derive(Serialize)]
struct ParseOutput<'a> {
    input: &'a str,
    segments: Attention,
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output")
}

fn run_translate(args: TranslateArgs, translator: &Translator) -> Result<()> {
    let prompt = args.input.read()?;
    log::debug!(
        "Translating {} byte prompt (format: {})",
        prompt.len(),
        args.format.as_str()
    );
    let output = translator.translate(&prompt);

    match args.format {
        OutputFormat::Text => print_stdout(&output),
        OutputFormat::Json => print_stdout(&to_json(
            &TranslateOutput {
                input: &prompt,
                output,
            },
            args.pretty,
        )?),
    }
}

fn run_parse(args: ParseArgs, translator: &Translator) -> Result<()> {
    let prompt = args.input.read()?;
    let segments = translator.parse(&prompt);
    print_stdout(&to_json(
        &ParseOutput {
            input: &prompt,
            segments,
        },
        args.pretty,
    )?)
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = input::load_config(cli.config.as_deref())?;
    let translator = Translator::new(config)?;

    match cli.command {
        Commands::Translate(args) => run_translate(args, &translator)?,
        Commands::Parse(args) => run_parse(args, &translator)?,
    }

    Ok(())
}
