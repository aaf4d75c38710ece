use crate::llm::GenerationParams;
use crate::session::quiz::definition::{ChoiceQuestion, OpenQuestion, QuestionRecord};
use crate::session::quiz::{ChoiceVerdict, OpenVerdict, ScoreTier};

#[cfg(test)]
pub mod mock;
pub mod terminal;

#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    SettingsRecap {
        topic: String,
        params: GenerationParams,
    },
    QuestionList(Vec<QuestionRecord>),
    AnswerReveal(usize, String),
    AnswerHidden(usize),
    NoAnswerAvailable(usize),
    QuizBegins(usize),
    ChoiceQuestions(Vec<ChoiceQuestion>),
    OpenQuestions(Vec<OpenQuestion>),
    AnswerRecorded {
        ordinal: usize,
        answered: usize,
        total: usize,
    },
    IncompleteSubmission(usize),
    GradingBegins,
    ChoiceResults {
        correct: usize,
        total: usize,
        tier: ScoreTier,
    },
    ChoiceVerdicts(Vec<ChoiceVerdict>),
    OpenResults {
        score: u32,
        tier: ScoreTier,
    },
    OpenVerdicts(Vec<OpenVerdict>),
}

pub trait SessionOutput: Clone {
    fn say(&self, message: &Message);
}
