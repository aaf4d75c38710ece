use anyhow::*;
use serde::Deserialize;

#[cfg(test)]
pub mod mock;
pub mod openai;
pub mod prompt;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Mode {
    List,
    Qa,
    Choice,
    Open,
}

impl Mode {
    pub fn parse(name: &str) -> Option<Mode> {
        match name.trim().to_lowercase().as_str() {
            "list" => Some(Mode::List),
            "qa" => Some(Mode::Qa),
            "choice" | "quiz" => Some(Mode::Choice),
            "open" => Some(Mode::Open),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mode::List => "list",
            Mode::Qa => "qa",
            Mode::Choice => "choice",
            Mode::Open => "open",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Hard,
}

impl Difficulty {
    pub fn parse(name: &str) -> Option<Difficulty> {
        match name.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GenerationParams {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub language: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        GenerationParams {
            mode: Mode::Qa,
            difficulty: Difficulty::Intermediate,
            language: "English".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmittedAnswer {
    pub question: String,
    pub user_answer: String,
}

/// One graded free-text answer, in the shape the grading model is asked to
/// return (camelCase keys on the wire).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub question_index: usize,
    pub user_answer: String,
    pub feedback: String,
    pub is_correct: bool,
    pub score: u32,
}

pub trait Generator {
    fn generate(&self, topic: &str, params: &GenerationParams) -> Result<String>;
}

pub trait Grader {
    fn evaluate(&self, source: &str, answers: &[SubmittedAnswer]) -> Result<Vec<EvaluationResult>>;
}
