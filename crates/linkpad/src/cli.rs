//! Command-line front end over the text operations.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app::cut::{cut, cut_or_original};
use crate::app::difference::difference;
use crate::app::range::parse_num_range;
use crate::app::transform::{SortOptions, capitalize_words, sort_lines_with};
use crate::infra::config::Config;
use crate::infra::fs::{read_text, write_text};

static RANGE_SPEC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9,-]+$").expect("range spec pattern compiles"));

#[derive(Debug, Parser)]
#[command(
    name = "linkpad",
    author,
    version,
    about = "Sort, capitalize, cut, and compare plain-text files",
    long_about = None
)]
pub struct Cli {
    /// Raise log verbosity; repeat for more detail
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Read settings from this file instead of the user and workspace configs
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand a range specification such as 1-3,5 into field positions
    Range {
        #[arg(value_parser = range_spec)]
        spec: String,
    },
    /// Keep only the selected fields of every line
    Cut {
        /// Fields to keep, e.g. 1-2,4
        #[arg(short, long, value_name = "SPEC", value_parser = range_spec)]
        fields: String,
        /// Field separator (defaults to the configured separator)
        #[arg(short, long, value_name = "SEP")]
        delimiter: Option<String>,
        /// Print the input unchanged instead of failing when the fields do not fit
        #[arg(long)]
        lenient: bool,
        #[command(flatten)]
        io: TextIo,
    },
    /// Sort lines by code point order
    Sort {
        /// Drop empty lines from the sorted output
        #[arg(long)]
        drop_empty: bool,
        #[command(flatten)]
        io: TextIo,
    },
    /// Capitalize every word
    Capitalize {
        #[command(flatten)]
        io: TextIo,
    },
    /// List lines of LEFT that appear nowhere in RIGHT
    Diff {
        left: PathBuf,
        right: PathBuf,
        /// Write the result here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct TextIo {
    /// Input file; stdin when omitted
    pub input: Option<PathBuf>,
    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Mirrors the check the notebook's cut dialog applies before calling the core.
fn range_spec(value: &str) -> Result<String, String> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if RANGE_SPEC.is_match(&compact) {
        Ok(value.to_owned())
    } else {
        Err("expected digits, commas and dashes, e.g. 1-3,5".to_owned())
    }
}

/// Execute the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    crate::init(&config, cli.verbose);

    match cli.command {
        Command::Range { spec } => {
            let indices = parse_num_range(&spec)?;
            emit(None, &indices.to_string())
        }
        Command::Cut {
            fields,
            delimiter,
            lenient,
            io,
        } => {
            let text = read_input(io.input.as_deref())?;
            let separator = delimiter.unwrap_or_else(|| config.defaults.separator().to_string());
            let selected = if lenient || config.cut.lenient() {
                cut_or_original(&text, &fields, &separator)
            } else {
                cut(&text, &fields, &separator)?
            };
            emit(io.output.as_deref(), &selected)
        }
        Command::Sort { drop_empty, io } => {
            let text = read_input(io.input.as_deref())?;
            let mut options = SortOptions::from_config(&config);
            options.drop_empty_lines |= drop_empty;
            emit(io.output.as_deref(), &sort_lines_with(&text, options))
        }
        Command::Capitalize { io } => {
            let text = read_input(io.input.as_deref())?;
            emit(io.output.as_deref(), &capitalize_words(&text))
        }
        Command::Diff {
            left,
            right,
            output,
        } => {
            let missing = difference(&left, &right)?;
            emit(output.as_deref(), &missing.join("\n"))
        }
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "linkpad", &mut io::stdout());
            Ok(())
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            read_text(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

/// Write to `output` verbatim, or to stdout with a trailing newline.
fn emit(output: Option<&Path>, text: &str) -> Result<()> {
    if let Some(path) = output {
        return write_text(path, text);
    }

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() && !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
