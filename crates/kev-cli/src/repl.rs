//! Interactive read-eval-print loop.

use std::io::{BufRead, Write};

use anyhow::Result;
use kev_eval::{eval_program, Environment};
use kev_parse::{Lexer, Parser};

pub const PROMPT: &str = ">> ";

/// Runs the REPL until EOF on `input`. One environment lives for the whole
/// session, so bindings persist across lines. Lines that fail to parse print
/// the error block and are not evaluated.
///
/// Lines are read as raw bytes (`read_until`, not `read_line`) so input that
/// is not valid UTF-8 reaches the lexer instead of erroring out.
pub fn start(mut input: impl BufRead, mut output: impl Write) -> Result<()> {
    let env = Environment::new();
    let mut line = Vec::new();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }

        let mut parser = Parser::new(Lexer::new(&line));
        let program = parser.parse_program();
        if !parser.errors().is_empty() {
            print_parser_errors(&mut output, parser.errors())?;
            continue;
        }

        if let Some(value) = eval_program(&program, &env) {
            writeln!(output, "{value}")?;
        }
    }
}

/// Labelled error block shared by the REPL and the file runner: a header
/// line, then each message on its own numbered line.
pub fn print_parser_errors(output: &mut impl Write, errors: &[String]) -> Result<()> {
    writeln!(output, "parser errors:")?;
    for (idx, message) in errors.iter().enumerate() {
        writeln!(output, "  {}: {}", idx + 1, message)?;
    }
    Ok(())
}
