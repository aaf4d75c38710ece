use super::*;

#[test]
fn parses_topic_with_spaces() {
    assert_eq!(
        parse("topic the french revolution").unwrap(),
        Command::Topic("the french revolution".to_owned())
    );
    assert!(parse("topic").is_err());
}

#[test]
fn parses_mode_and_difficulty() {
    assert_eq!(parse("mode qa").unwrap(), Command::Mode(Mode::Qa));
    assert_eq!(parse("mode quiz").unwrap(), Command::Mode(Mode::Choice));
    assert_eq!(
        parse("difficulty hard").unwrap(),
        Command::Difficulty(Difficulty::Hard)
    );
    assert!(parse("mode essay").is_err());
    assert!(parse("difficulty impossible").is_err());
}

#[test]
fn parses_answer_with_free_text() {
    assert_eq!(
        parse("answer 2 a force of attraction").unwrap(),
        Command::Answer(2, "a force of attraction".to_owned())
    );
    assert_eq!(parse("answer 1 b").unwrap(), Command::Answer(1, "b".to_owned()));
    assert!(parse("answer 2").is_err());
    assert!(parse("answer two b").is_err());
}

#[test]
fn parses_reveal() {
    assert_eq!(parse("reveal 3").unwrap(), Command::Reveal(3));
    assert!(parse("reveal three").is_err());
}

#[test]
fn parses_bare_commands() {
    assert_eq!(parse("generate").unwrap(), Command::Generate);
    assert_eq!(parse("go").unwrap(), Command::Generate);
    assert_eq!(parse("submit").unwrap(), Command::Submit);
    assert_eq!(parse("again").unwrap(), Command::Again);
    assert_eq!(parse("status").unwrap(), Command::Status);
    assert_eq!(parse("quit").unwrap(), Command::Quit);
    assert!(parse("").is_err());
    assert!(parse("frobnicate").is_err());
}

#[test]
fn commands_are_case_insensitive_on_the_keyword() {
    assert_eq!(parse("GENERATE").unwrap(), Command::Generate);
    assert_eq!(
        parse("Topic Rust").unwrap(),
        Command::Topic("Rust".to_owned())
    );
}
