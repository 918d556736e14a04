//! Interactive prompt loop
//!
//! Reads one command per line, splits it shell-style, parses it with clap,
//! and dispatches to the command handlers. Domain errors are printed and
//! the loop keeps going; only `exit` or end of input stops it.

use std::io::{BufRead, Write};

use clap::Parser;

use crate::cli::commands::{handle_command, Outcome, PromptLine};
use crate::error::{TellerError, TellerResult};
use crate::storage::Storage;

/// Run the prompt loop until `exit` or end of input
pub fn run<R: BufRead, W: Write>(
    storage: &mut Storage,
    mut input: R,
    mut output: W,
) -> TellerResult<()> {
    writeln!(output, "Service has been started!")?;

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let tokens = match split_line(&line) {
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };
        if tokens.is_empty() {
            continue;
        }

        let parsed = match PromptLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            // clap renders help and usage errors alike as a printable message
            Err(err) => {
                writeln!(output, "{err}")?;
                continue;
            }
        };

        match handle_command(storage, &mut output, parsed.command) {
            Ok(Outcome::Exit) => break,
            Ok(Outcome::Continue) => {}
            Err(err) => writeln!(output, "{err}")?,
        }
    }
    Ok(())
}

/// Split a prompt line into argv-style tokens
///
/// Double- and single-quoted segments keep their whitespace, so descriptions
/// can contain spaces. An unterminated quote is an error.
fn split_line(line: &str) -> TellerResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            Some(open) => {
                if ch == open {
                    quote = None;
                } else {
                    current.push(ch);
                }
            }
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    in_token = true;
                }
                ch if ch.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                ch => {
                    current.push(ch);
                    in_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(TellerError::Validation(format!(
            "unterminated quote in '{}'",
            line.trim_end()
        )));
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
