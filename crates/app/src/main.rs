mod config;

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use services::{Clock, CommandResult, Logic, View};
use storage::{InMemoryRepository, JsonSnapshot};

use crate::config::Config;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPath { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPath { flag, raw } => write!(f, "invalid {flag} value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = require_value(args, flag)?;
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidPath { flag, raw: value });
    }
    Ok(PathBuf::from(value))
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  flashdeck [--config <file.toml>] [--data <decks.json>] [--no-autosave]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {}, {}, RUST_LOG", config::CONFIG_ENV, config::DATA_ENV);
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    no_autosave: bool,
    help: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(require_path(args, "--config")?),
                "--data" => parsed.data = Some(require_path(args, "--data")?),
                "--no-autosave" => parsed.no_autosave = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }

    fn apply(&self, mut config: Config) -> Config {
        if let Some(data) = &self.data {
            config.data_file.clone_from(data);
        }
        if self.no_autosave {
            config.autosave = false;
        }
        config
    }
}

fn render(result: &CommandResult) {
    if !result.feedback.is_empty() {
        println!("{}", result.feedback);
    }
    match &result.view {
        View::Unchanged => {}
        View::Decks(rows) | View::Cards(rows) => {
            if rows.is_empty() {
                println!("  (nothing to show)");
            }
            for row in rows {
                println!("  {}. {}", row.index, row.label);
            }
        }
        View::Question {
            text,
            position,
            total,
        } => println!("[{position}/{total}] {text}"),
    }
}

fn save(snapshot: &JsonSnapshot, logic: &Logic) {
    if let Err(err) = snapshot.save(logic.decks()) {
        log::error!("could not save decks: {err}");
        eprintln!("{err}");
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(&mut std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let config = Config::resolve(args.config.as_deref(), |key| std::env::var(key).ok())?;
    let config = args.apply(config);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();
    log::debug!("using {config:?}");

    let snapshot = JsonSnapshot::new(&config.data_file);
    let decks = snapshot.load()?;
    log::info!("loaded {} decks from {}", decks.len(), snapshot.path().display());

    let mut logic = Logic::new(
        Box::new(InMemoryRepository::from_decks(decks)),
        Clock::default_clock(),
    );

    println!("Welcome to flashdeck! Type `help` to see the commands.");
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        stdout.flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match logic.run(&line) {
            Ok(result) => {
                render(&result);
                if result.modified && config.autosave {
                    save(&snapshot, &logic);
                }
                if result.exit {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }

    save(&snapshot, &logic);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
