use anyhow::*;

use crate::llm::{Difficulty, Mode};

#[cfg(test)]
mod tests;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Topic(String),
    Mode(Mode),
    Difficulty(Difficulty),
    Language(String),
    Generate,
    Reveal(usize),
    Answer(usize, String),
    Submit,
    Again,
    Status,
    Help,
    Quit,
}

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let mut parts = line.splitn(2, char::is_whitespace);
    let keyword = parts.next().unwrap_or("").to_lowercase();
    let rest = parts.next().unwrap_or("").trim();

    match keyword.as_str() {
        "topic" => {
            ensure!(!rest.is_empty(), "Usage: topic <your topic or pasted text>");
            Ok(Command::Topic(rest.to_owned()))
        }
        "mode" => Mode::parse(rest)
            .map(Command::Mode)
            .with_context(|| format!("Unknown mode '{}'. Modes: list, qa, choice, open", rest)),
        "difficulty" => Difficulty::parse(rest)
            .map(Command::Difficulty)
            .with_context(|| {
                format!(
                    "Unknown difficulty '{}'. Difficulties: beginner, intermediate, hard",
                    rest
                )
            }),
        "language" => {
            ensure!(!rest.is_empty(), "Usage: language <name>");
            Ok(Command::Language(rest.to_owned()))
        }
        "generate" | "go" => Ok(Command::Generate),
        "reveal" => Ok(Command::Reveal(parse_number(rest)?)),
        "answer" => {
            let mut parts = rest.splitn(2, char::is_whitespace);
            let number = parse_number(parts.next().unwrap_or(""))?;
            let value = parts.next().unwrap_or("").trim();
            ensure!(!value.is_empty(), "Usage: answer <number> <your answer>");
            Ok(Command::Answer(number, value.to_owned()))
        }
        "submit" => Ok(Command::Submit),
        "again" | "retry" => Ok(Command::Again),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "" => Err(anyhow!("Type a command, or `help` to list them")),
        other => Err(anyhow!("Unknown command '{}'. Try `help`", other)),
    }
}

fn parse_number(text: &str) -> Result<usize> {
    text.parse()
        .with_context(|| format!("'{}' is not a question number", text))
}
