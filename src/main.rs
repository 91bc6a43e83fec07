// pseudoparse: bilingual pseudocode to AST

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use crossterm::style::Stylize;
use log::{Level, LevelFilter, Log, Metadata, Record};

use pseudoparse::{parse, tokenize, AstPrinter, ParseError, ParseErrorKind};

#[derive(ClapParser)]
#[command(name = "pseudoparse")]
#[command(about = "Parse Spanish/English pseudocode into an abstract syntax tree", long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize the input file and print tokens
    Lex {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Parse the input file and print the AST
    Parse {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the tree as JSON instead of an indented dump
        #[arg(long)]
        json: bool,
    },
    /// Parse the input file and report only success or the first error
    Check {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "ERROR".red(),
            Level::Warn => "WARN".yellow(),
            Level::Info => "INFO".green(),
            Level::Debug => "DEBUG".blue(),
            Level::Trace => "TRACE".dark_grey(),
        };
        eprintln!("[{}] {}", level, record.args());
    }

    fn flush(&self) {}
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lex { file } => lex_file(&file),
        Commands::Parse { file, json } => parse_file(&file, json),
        Commands::Check { file } => check_file(&file),
    }
}

fn read_source(path: &Path) -> Result<String> {
    log::info!("reading {}", path.display());
    fs::read_to_string(path).with_context(|| format!("failed to read file '{}'", path.display()))
}

fn lex_file(path: &Path) -> Result<()> {
    let source = read_source(path)?;

    let tokens = match tokenize(&source) {
        Ok(tokens) => tokens,
        Err(err) => fail(path, &source, &ParseError::from(err)),
    };

    for token in &tokens {
        println!(
            "{}:{}:{} {:?} {}",
            path.display(),
            token.location.line,
            token.location.column,
            token.kind,
            token.lexeme
        );
    }
    eprintln!("{} tokens", tokens.len());

    Ok(())
}

fn parse_file(path: &Path, json: bool) -> Result<()> {
    let source = read_source(path)?;

    let program = match parse(&source) {
        Ok(program) => program,
        Err(err) => fail(path, &source, &err),
    };

    if json {
        let text = serde_json::to_string_pretty(&program).context("failed to serialize AST")?;
        println!("{}", text);
    } else {
        print!("{}", AstPrinter::print(&program));
    }

    Ok(())
}

fn check_file(path: &Path) -> Result<()> {
    let source = read_source(path)?;

    match parse(&source) {
        Ok(program) => {
            let functions = program.functions().count();
            println!(
                "{} {}: {} statements, {} functions",
                "ok".green().bold(),
                path.display(),
                program.statements.len(),
                functions
            );
            Ok(())
        }
        Err(err) => fail(path, &source, &err),
    }
}

/// Print a diagnostic pointing at the error location and exit with status 1.
fn fail(path: &Path, source: &str, err: &ParseError) -> ! {
    let label = match err.kind {
        ParseErrorKind::Lexical => "lexical error",
        ParseErrorKind::Syntax => "syntax error",
    };
    eprintln!("{}: {}", label.red().bold(), err.message);
    eprintln!(
        "  {} {}:{}:{}",
        "-->".blue(),
        path.display(),
        err.line(),
        err.column()
    );

    if let Some(text) = source.lines().nth(err.line().saturating_sub(1)) {
        let gutter = err.line().to_string();
        let pad = " ".repeat(gutter.len());
        let caret_pad = " ".repeat(err.column().saturating_sub(1));
        eprintln!("{} {}", pad, "|".blue());
        eprintln!("{} {} {}", gutter.as_str().blue(), "|".blue(), text);
        eprintln!("{} {} {}{}", pad, "|".blue(), caret_pad, "^".red().bold());
    }

    process::exit(1);
}
