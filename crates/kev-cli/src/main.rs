use std::fs;
use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kev_eval::{eval_program, Environment};
use kev_parse::{Lexer, Parser as KevParser};

mod repl;

const USAGE: &str = "Usage: kev run <file>";

#[derive(Parser, Debug)]
#[command(name = "kev")]
#[command(about = "The Kev programming language")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Execute a Kev source file
    Run { file: String },
}

fn main() -> Result<()> {
    // The CLI contract is closed: anything that is not `kev` or
    // `kev run <file>` counts as misuse, help and version flags included.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(_) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Run { file }) => cmd_run(&file),
        None => cmd_repl(),
    }
}

fn cmd_run(file: &str) -> Result<()> {
    // raw bytes, deliberately not read_to_string: a source that is not valid
    // UTF-8 must still lex, run, and exit 0
    let source = fs::read(file).with_context(|| format!("failed to read {file}"))?;

    let mut parser = KevParser::new(Lexer::new(&source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        // Parse errors are program-level output, not CLI misuse: print the
        // block and exit 0, the same as the REPL would.
        repl::print_parser_errors(&mut io::stdout().lock(), parser.errors())?;
        return Ok(());
    }

    let env = Environment::new();
    if let Some(value) = eval_program(&program, &env) {
        println!("{value}");
    }
    Ok(())
}

fn cmd_repl() -> Result<()> {
    print_banner();
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::start(stdin.lock(), stdout.lock())
}

/// Prints the contents of a `banner.txt` next to the executable, when one
/// exists; silently skips otherwise. The bytes go out as-is.
fn print_banner() {
    let Ok(exe) = std::env::current_exe() else {
        return;
    };
    if let Ok(bytes) = fs::read(exe.with_file_name("banner.txt")) {
        let _ = io::Write::write_all(&mut io::stdout().lock(), &bytes);
    }
}
