use anyhow::*;
use std::env;
use std::result::Result::Ok;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

mod commands;
mod llm;
mod output;
mod session;

use crate::commands::Command;
use crate::llm::openai::OpenAiClient;
use crate::output::terminal::TerminalOutput;
use crate::output::SessionOutput;
use crate::session::Session;

const HELP: &str = "Commands:
  topic <text>         Set the topic or paste the text to study
  mode <name>          list, qa, choice (multiple choice quiz) or open (free-text quiz)
  difficulty <name>    beginner, intermediate or hard
  language <name>      Language the questions are written in
  generate             Generate questions with the current settings
  reveal <number>      Show or hide the answer to a qa question
  answer <number> <x>  Answer a quiz question (option letter, or free text)
  submit               Submit your quiz answers for grading
  again                Retake the quiz
  status               Show the current settings
  quit                 Exit";

fn main() -> Result<()> {
    pretty_env_logger::init();

    let api_key =
        env::var("OPENAI_API_KEY").context("Expected OPENAI_API_KEY in the environment")?;
    let client = Arc::new(OpenAiClient::new(api_key));
    let mut session = Session::new(client.clone(), client, TerminalOutput::new());

    println!("QGen: AI-powered question generator");
    println!("Type `help` to list commands.");
    prompt()?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match commands::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(e) = dispatch(&mut session, command) {
                    eprintln!("{:#}", e);
                }
            }
            Err(e) => eprintln!("{:#}", e),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush()?;
    Ok(())
}

fn dispatch<O: SessionOutput>(session: &mut Session<O>, command: Command) -> Result<()> {
    match command {
        Command::Topic(topic) => session.set_topic(topic),
        Command::Mode(mode) => session.set_mode(mode),
        Command::Difficulty(difficulty) => session.set_difficulty(difficulty),
        Command::Language(language) => session.set_language(language),
        Command::Generate => session.generate()?,
        Command::Reveal(number) => session.reveal(number)?,
        Command::Answer(number, value) => session.answer(number, &value)?,
        Command::Submit => session.submit()?,
        Command::Again => session.again()?,
        Command::Status => session.status(),
        Command::Help => println!("{}", HELP),
        Command::Quit => (),
    }
    Ok(())
}
