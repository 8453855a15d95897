use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::Level;

use remaster::{Settings, TodoFile};

#[derive(Parser)]
#[command(name = "remaster", version)]
#[command(about = "Rewrite a rebase todo file from per-commit directives")]
#[command(after_help = remaster::usage())]
struct Cli {
    /// Path to the rebase todo file
    #[arg(required_unless_present = "dump_settings")]
    todo: Option<PathBuf>,

    /// Read directives from this file instead of standard input
    /// (a `.toml` file is read as a reaction table)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Replace the todo file instead of printing to standard output
    #[arg(short, long)]
    in_place: bool,

    /// Print the parsed reaction table as TOML and exit
    #[arg(long)]
    dump_settings: bool,

    /// Log to standard error (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();

    let settings = load_settings(cli.settings.as_deref())?;

    if cli.dump_settings {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let Some(path) = cli.todo else {
        anyhow::bail!("no todo file given");
    };
    let todo = TodoFile::new(path);
    let text = todo.read()?;
    let remastered = remaster::parse_input(&settings, text.lines())
        .with_context(|| format!("failed to rewrite '{}'", todo.path().display()))?;
    let output = remastered.to_string();

    if cli.in_place {
        todo.replace(&output)?;
    } else {
        io::stdout()
            .lock()
            .write_all(output.as_bytes())
            .context("failed to write to standard output")?;
    }

    Ok(())
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    let Some(path) = path else {
        let text = io::read_to_string(io::stdin())
            .context("failed to read settings from standard input")?;
        return Ok(Settings::parse(&text)?);
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    let settings = if path.extension().is_some_and(|ext| ext == "toml") {
        Settings::from_toml(&text)
    } else {
        Settings::parse(&text)
    };
    settings.with_context(|| format!("invalid settings in '{}'", path.display()))
}
