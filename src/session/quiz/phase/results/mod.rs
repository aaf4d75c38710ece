use crate::llm::EvaluationResult;
use crate::output::{Message, SessionOutput};
use crate::session::quiz::definition::ChoiceQuestion;
use crate::session::quiz::State;


#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    NeedsPractice,
}

impl ScoreTier {
    pub fn from_ratio(ratio: f64) -> ScoreTier {
        if ratio >= 0.8 {
            ScoreTier::Excellent
        } else if ratio >= 0.6 {
            ScoreTier::Good
        } else if ratio >= 0.4 {
            ScoreTier::Fair
        } else {
            ScoreTier::NeedsPractice
        }
    }

    pub fn from_percentage(score: u32) -> ScoreTier {
        Self::from_ratio(f64::from(score) / 100.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceVerdict {
    pub question: ChoiceQuestion,
    pub selected_index: usize,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OpenVerdict {
    pub question: String,
    pub user_answer: String,
    pub grade: Option<EvaluationResult>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizOutcome {
    Choice {
        verdicts: Vec<ChoiceVerdict>,
        correct: usize,
        total: usize,
    },
    Open {
        verdicts: Vec<OpenVerdict>,
        score: u32,
    },
}

pub struct ResultsState<O> {
    outcome: QuizOutcome,
    output: O,
}

impl<O> ResultsState<O> {
    pub fn new(outcome: QuizOutcome, output: O) -> Self {
        ResultsState { outcome, output }
    }
}

impl<O: SessionOutput> State for ResultsState<O> {
    fn on_begin(&mut self) {
        match &self.outcome {
            QuizOutcome::Choice {
                verdicts,
                correct,
                total,
            } => {
                let tier = ScoreTier::from_ratio(*correct as f64 / *total as f64);
                self.output.say(&Message::ChoiceResults {
                    correct: *correct,
                    total: *total,
                    tier,
                });
                self.output.say(&Message::ChoiceVerdicts(verdicts.clone()));
            }
            QuizOutcome::Open { verdicts, score } => {
                self.output.say(&Message::OpenResults {
                    score: *score,
                    tier: ScoreTier::from_percentage(*score),
                });
                self.output.say(&Message::OpenVerdicts(verdicts.clone()));
            }
        }
    }

    fn on_end(&mut self) {}
}
