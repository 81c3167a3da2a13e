//! Command recognition for the REPL.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches `<operation> <num1> <num2>` with case-insensitive operation
    /// names and optionally signed decimal operands.
    static ref OPERATION_LINE: Regex = Regex::new(
        r"(?i)^(add|subtract|multiply|divide)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)$"
    )
    .unwrap();
}

/// A recognized REPL command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// An arithmetic operation with its two operands.
    Operation { name: String, a: f64, b: f64 },
    History,
    Undo,
    Redo,
    Clear,
    Save,
    Load,
    Help,
    Exit,
}

/// Parse one input line. Returns `None` for anything unrecognized,
/// including operation lines with malformed operands.
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();

    match trimmed.to_lowercase().as_str() {
        "history" => return Some(Command::History),
        "undo" => return Some(Command::Undo),
        "redo" => return Some(Command::Redo),
        "clear" => return Some(Command::Clear),
        "save" => return Some(Command::Save),
        "load" => return Some(Command::Load),
        "help" => return Some(Command::Help),
        "exit" | "quit" => return Some(Command::Exit),
        _ => {}
    }

    let captures = OPERATION_LINE.captures(trimmed)?;
    let name = captures[1].to_lowercase();
    // The operand groups only admit decimal literals, so parsing is
    // infallible once the pattern matches.
    let a = captures[2].parse().ok()?;
    let b = captures[3].parse().ok()?;

    Some(Command::Operation { name, a, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_lines() {
        assert_eq!(
            parse_command("add 2 3"),
            Some(Command::Operation {
                name: "add".to_string(),
                a: 2.0,
                b: 3.0
            })
        );
        assert_eq!(
            parse_command("  divide -4.5 0.5  "),
            Some(Command::Operation {
                name: "divide".to_string(),
                a: -4.5,
                b: 0.5
            })
        );
        assert_eq!(
            parse_command("MULTIPLY 4 5"),
            Some(Command::Operation {
                name: "multiply".to_string(),
                a: 4.0,
                b: 5.0
            })
        );
    }

    #[test]
    fn test_keyword_commands() {
        assert_eq!(parse_command("undo"), Some(Command::Undo));
        assert_eq!(parse_command("REDO"), Some(Command::Redo));
        assert_eq!(parse_command(" history "), Some(Command::History));
        assert_eq!(parse_command("exit"), Some(Command::Exit));
        assert_eq!(parse_command("quit"), Some(Command::Exit));
    }

    #[test]
    fn test_malformed_input_rejected() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("add two three"), None);
        assert_eq!(parse_command("add 2"), None);
        assert_eq!(parse_command("modulo 4 2"), None);
        assert_eq!(parse_command("add 2 3 4"), None);
    }
}
