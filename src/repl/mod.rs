//! Line-oriented REPL front end.
//!
//! Parses commands of the form `<operation> <num1> <num2>` plus a handful
//! of history commands, dispatches them against the calculator, and keeps
//! the loop alive through runtime errors.

mod parse;

pub use parse::{Command, parse_command};

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::warn;

use crate::calculator::{CalcError, Calculator};
use crate::operations::operation_for;

const WELCOME: &str = "Welcome to the reckon REPL! Type 'help' for commands, 'exit' to quit.";

const HELP: &str = "\
Commands:
  add|subtract|multiply|divide <num1> <num2>   perform a calculation
  history                                      show recorded calculations
  undo / redo                                  step through history snapshots
  clear                                        drop history and snapshots
  save / load                                  persist or restore the history file
  help                                         show this message
  exit                                         quit";

/// Run the interactive loop until `exit` or end of input.
pub fn run(calculator: &mut Calculator) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("{WELCOME}");
    loop {
        print!("> ");
        stdout.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            break; // EOF
        }

        match dispatch(calculator, &line) {
            Outcome::Continue => {}
            Outcome::Exit => break,
        }
    }

    println!("Exiting calculator...");
    Ok(())
}

enum Outcome {
    Continue,
    Exit,
}

/// Handle one input line, printing results and errors. Runtime calculator
/// errors are reported as text; the loop continues.
fn dispatch(calculator: &mut Calculator, line: &str) -> Outcome {
    let Some(command) = parse_command(line) else {
        if !line.trim().is_empty() {
            println!("Invalid input. Please follow the format: <operation> <num1> <num2>");
        }
        return Outcome::Continue;
    };

    match command {
        Command::Operation { name, a, b } => {
            // The label comes from the parser's operation alternation, so
            // lookup cannot fail here.
            if let Some(operation) = operation_for(&name) {
                calculator.set_operation(operation);
                match calculator.perform_operation(a, b) {
                    Ok(calculation) => {
                        let precision = calculator.precision();
                        println!("Result: {}", calculation.result.display_with(precision));
                    }
                    Err(err) => report(&err),
                }
            } else {
                println!("Unknown operation '{name}'.");
            }
        }
        Command::History => {
            if calculator.history().is_empty() {
                println!("No calculations recorded.");
            } else {
                for (index, calculation) in calculator.history().iter().enumerate() {
                    println!("{}: {}", index + 1, calculation);
                }
            }
        }
        Command::Undo => {
            if calculator.undo() {
                println!("Undone.");
            } else {
                println!("Nothing to undo.");
            }
        }
        Command::Redo => {
            if calculator.redo() {
                println!("Redone.");
            } else {
                println!("Nothing to redo.");
            }
        }
        Command::Clear => {
            calculator.clear_history();
            println!("History cleared.");
        }
        Command::Save => match calculator.save_history() {
            Ok(()) => println!("History saved."),
            Err(err) => report(&err),
        },
        Command::Load => match calculator.load_history() {
            Ok(()) => println!("History loaded."),
            Err(err) => report(&err),
        },
        Command::Help => println!("{HELP}"),
        Command::Exit => return Outcome::Exit,
    }

    Outcome::Continue
}

fn report(err: &CalcError) {
    warn!(error = %err, "command failed");
    println!("Error: {err}");
}
