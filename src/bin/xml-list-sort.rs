//! Command-line host for xml-list-sort.
//!
//! Reads the selected list from a file or stdin, sorts it and writes the result to
//! stdout, or back into the file with `--in-place`. Nothing is written when the
//! selection cannot be parsed or is not a list.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{debug, info};

use xml_list_sort::config::{FormatterMode, SortConfig};
use xml_list_sort::core::step::{SortStep, StepStatus};
use xml_list_sort::SortError;

#[derive(Parser)]
#[command(name = "xml-list-sort")]
#[command(version, about = "Sort the Item elements of an XML List by numeric Id", long_about = None)]
struct Cli {
    /// File holding the selection (stdin when omitted)
    input: Option<PathBuf>,

    /// Replace the file contents with the sorted list
    #[arg(short = 'i', long, requires = "input")]
    in_place: bool,

    /// JSON configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output formatter: tree, or line (keeps text of the inline tag only)
    #[arg(short = 'f', long)]
    formatter: Option<FormatterMode>,

    /// Name of the list element
    #[arg(long)]
    root_tag: Option<String>,

    /// Name of the item elements
    #[arg(long)]
    item_tag: Option<String>,

    /// Attribute holding the numeric sort key
    #[arg(short = 'k', long)]
    key: Option<String>,

    /// Element whose text stays on one line (line formatter)
    #[arg(long)]
    inline_tag: Option<String>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn load_config(&self) -> Result<SortConfig, SortError> {
        let mut config = match &self.config {
            Some(path) => SortConfig::from_path(path)?,
            None => SortConfig::default(),
        };

        if let Some(formatter) = self.formatter {
            config.formatter = formatter;
        }
        if let Some(root_tag) = &self.root_tag {
            config.shape.root_tag = root_tag.clone();
        }
        if let Some(item_tag) = &self.item_tag {
            config.shape.item_tag = item_tag.clone();
        }
        if let Some(key) = &self.key {
            config.shape.key_attribute = key.clone();
        }
        if let Some(inline_tag) = &self.inline_tag {
            config.inline_tag = inline_tag.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn read_selection(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read selection from {}", path.display())),
        None => {
            let mut selection = String::new();
            io::stdin()
                .read_to_string(&mut selection)
                .context("Failed to read selection from stdin")?;
            Ok(selection)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    debug!("Using configuration: {:?}", config);

    let selection = read_selection(cli.input.as_deref())?;
    let execution = SortStep::from_config(&config)?.execute(&selection)?;
    let sorted = execution.output;

    match (&cli.input, cli.in_place) {
        (Some(path), true) if execution.status == StepStatus::Unchanged => {
            info!("{} is already sorted", path.display());
        }
        (Some(path), true) => {
            fs::write(path, &sorted)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Replaced selection in {}", path.display());
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(sorted.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<SortError>() {
                Some(sort_error) => {
                    eprintln!("{}", sort_error.user_message());
                    eprintln!("{}", sort_error);
                }
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}
