use anyhow::*;
use std::sync::Arc;

use crate::llm::Grader;
use crate::output::{Message, SessionOutput};

pub mod definition;
mod phase;
pub mod settings;


use self::definition::{ChoiceDefinition, OpenQuestion};
use self::phase::{AnsweringState, ResultsState};

pub use self::phase::{Answer, ChoiceVerdict, OpenVerdict, QuizOutcome, ScoreTier};

trait State {
    fn on_begin(&mut self);
    fn on_end(&mut self);
}

enum Phase<O: SessionOutput> {
    Answering(AnsweringState<O>),
    Results(ResultsState<O>),
}

impl<O: SessionOutput> Phase<O> {
    fn get_state(&mut self) -> &mut dyn State {
        match self {
            Phase::Answering(s) => s,
            Phase::Results(s) => s,
        }
    }
}

pub enum QuestionSet {
    Choice(Arc<ChoiceDefinition>),
    Open(Vec<OpenQuestion>),
}

impl QuestionSet {
    pub fn len(&self) -> usize {
        match self {
            QuestionSet::Choice(definition) => definition.len(),
            QuestionSet::Open(questions) => questions.len(),
        }
    }

    pub fn is_open(&self) -> bool {
        match self {
            QuestionSet::Open(_) => true,
            QuestionSet::Choice(_) => false,
        }
    }
}

pub struct Quiz<O: SessionOutput> {
    questions: Arc<QuestionSet>,
    source: String,
    current_phase: Phase<O>,
    grader: Arc<dyn Grader>,
    output: O,
}

impl<O: SessionOutput> Quiz<O> {
    /// `source` is the raw completion the questions came from; the grading
    /// collaborator uses it as reference material for open-ended answers.
    pub fn new(questions: QuestionSet, source: String, grader: Arc<dyn Grader>, output: O) -> Quiz<O> {
        let questions = Arc::new(questions);
        let answering = AnsweringState::new(questions.clone(), output.clone());
        let mut quiz = Quiz {
            questions,
            source,
            current_phase: Phase::Answering(answering),
            grader,
            output,
        };
        quiz.current_phase.get_state().on_begin();
        quiz
    }

    pub fn is_over(&self) -> bool {
        match self.current_phase {
            Phase::Results(_) => true,
            _ => false,
        }
    }

    pub fn is_open_mode(&self) -> bool {
        self.questions.is_open()
    }

    fn set_current_phase(&mut self, phase: Phase<O>) {
        self.current_phase.get_state().on_end();
        self.current_phase = phase;
        self.current_phase.get_state().on_begin();
    }

    pub fn answer(&mut self, ordinal: usize, input: &str) -> Result<()> {
        match &mut self.current_phase {
            Phase::Answering(state) => state.answer_from_input(ordinal, input),
            Phase::Results(_) => Err(anyhow!(
                "The quiz was already submitted. Use `again` to retake it"
            )),
        }
    }

    /// No-op (with a validation message) while any question lacks a
    /// substantive answer; no grading call is made in that case.
    pub fn submit(&mut self) -> Result<()> {
        let outcome = match &mut self.current_phase {
            Phase::Answering(state) => {
                if !state.all_answered() {
                    self.output
                        .say(&Message::IncompleteSubmission(state.unanswered_count()));
                    return Ok(());
                }
                // A grading failure propagates here and leaves the quiz in the
                // answering phase, so the user can retry the submission.
                state.grade(&self.source, self.grader.as_ref())?
            }
            Phase::Results(_) => return Err(anyhow!("The quiz was already submitted")),
        };
        self.set_current_phase(Phase::Results(ResultsState::new(
            outcome,
            self.output.clone(),
        )));
        Ok(())
    }

    pub fn reset(&mut self) {
        let answering = AnsweringState::new(self.questions.clone(), self.output.clone());
        self.set_current_phase(Phase::Answering(answering));
    }
}
