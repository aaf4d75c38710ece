use anyhow::*;
use itertools::Itertools;
use std::result::Result::Ok;
use std::collections::HashMap;
use std::sync::Arc;

use super::results::{ChoiceVerdict, OpenVerdict, QuizOutcome};
use crate::llm::{EvaluationResult, Grader, SubmittedAnswer};
use crate::output::{Message, SessionOutput};
use crate::session::quiz::definition::{ChoiceDefinition, OpenQuestion};
use crate::session::quiz::{QuestionSet, State};


#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Answer {
    Selected(usize),
    FreeText(String),
}

impl Answer {
    /// An empty free-text entry is a valid transient value but does not count
    /// toward completion. A selection always counts.
    fn is_substantive(&self) -> bool {
        match self {
            Answer::Selected(_) => true,
            Answer::FreeText(text) => !text.trim().is_empty(),
        }
    }
}

pub struct AnsweringState<O> {
    questions: Arc<QuestionSet>,
    answers: HashMap<usize, Answer>,
    output: O,
}

impl<O: SessionOutput> AnsweringState<O> {
    pub fn new(questions: Arc<QuestionSet>, output: O) -> Self {
        AnsweringState {
            questions,
            answers: HashMap::new(),
            output,
        }
    }

    pub fn answer_from_input(&mut self, ordinal: usize, input: &str) -> Result<()> {
        let answer = match &*self.questions {
            QuestionSet::Choice(definition) => {
                let question = definition
                    .get_questions()
                    .get(ordinal)
                    .with_context(|| format!("There is no question {}", ordinal + 1))?;
                Answer::Selected(parse_choice_input(input, question.options.len())?)
            }
            QuestionSet::Open(_) => Answer::FreeText(input.to_owned()),
        };
        self.set_answer(ordinal, answer)
    }

    pub fn set_answer(&mut self, ordinal: usize, answer: Answer) -> Result<()> {
        ensure!(
            ordinal < self.questions.len(),
            "There is no question {}",
            ordinal + 1
        );
        match (&answer, &*self.questions) {
            (Answer::Selected(index), QuestionSet::Choice(definition)) => {
                let option_count = definition.get_questions()[ordinal].options.len();
                ensure!(*index < option_count, "There is no such option");
            }
            (Answer::FreeText(_), QuestionSet::Open(_)) => (),
            _ => bail!("That answer does not fit this kind of quiz"),
        }
        self.answers.insert(ordinal, answer);
        self.output.say(&Message::AnswerRecorded {
            ordinal,
            answered: self.answered_count(),
            total: self.questions.len(),
        });
        Ok(())
    }

    pub fn all_answered(&self) -> bool {
        (0..self.questions.len()).all(|ordinal| {
            self.answers
                .get(&ordinal)
                .map_or(false, Answer::is_substantive)
        })
    }

    pub fn answered_count(&self) -> usize {
        self.answers
            .values()
            .filter(|answer| answer.is_substantive())
            .count()
    }

    pub fn unanswered_count(&self) -> usize {
        self.questions.len() - self.answered_count()
    }

    pub fn grade(&self, source: &str, grader: &dyn Grader) -> Result<QuizOutcome> {
        match &*self.questions {
            QuestionSet::Choice(definition) => Ok(self.grade_choices(definition)),
            QuestionSet::Open(questions) => {
                self.output.say(&Message::GradingBegins);
                let submitted = self.submitted_answers(questions);
                let results = grader.evaluate(source, &submitted)?;
                Ok(self.merge_evaluation(questions, results))
            }
        }
    }

    fn grade_choices(&self, definition: &ChoiceDefinition) -> QuizOutcome {
        let verdicts = definition
            .get_questions()
            .iter()
            .enumerate()
            .map(|(ordinal, question)| {
                let selected_index = match self.answers.get(&ordinal) {
                    Some(Answer::Selected(index)) => *index,
                    _ => unreachable!("Choice quiz submitted with a missing selection"),
                };
                ChoiceVerdict {
                    question: question.clone(),
                    selected_index,
                    is_correct: question.is_answer_correct(selected_index),
                }
            })
            .collect_vec();
        let correct = verdicts.iter().filter(|verdict| verdict.is_correct).count();
        QuizOutcome::Choice {
            correct,
            total: verdicts.len(),
            verdicts,
        }
    }

    fn submitted_answers(&self, questions: &[OpenQuestion]) -> Vec<SubmittedAnswer> {
        questions
            .iter()
            .map(|question| SubmittedAnswer {
                question: question.text.clone(),
                user_answer: self.free_text_answer(question.ordinal),
            })
            .collect_vec()
    }

    /// Grader results are matched back to questions by index. Questions the
    /// grader skipped stay ungraded and are excluded from the mean score.
    fn merge_evaluation(
        &self,
        questions: &[OpenQuestion],
        results: Vec<EvaluationResult>,
    ) -> QuizOutcome {
        let mut by_index: HashMap<usize, EvaluationResult> = results
            .into_iter()
            .map(|result| (result.question_index, result))
            .collect();
        let verdicts = questions
            .iter()
            .map(|question| OpenVerdict {
                question: question.text.clone(),
                user_answer: self.free_text_answer(question.ordinal),
                grade: by_index.remove(&question.ordinal),
            })
            .collect_vec();

        let graded_scores = verdicts
            .iter()
            .filter_map(|verdict| verdict.grade.as_ref().map(|grade| grade.score))
            .collect_vec();
        let score = if graded_scores.is_empty() {
            0
        } else {
            let sum: u32 = graded_scores.iter().sum();
            (f64::from(sum) / graded_scores.len() as f64).round() as u32
        };

        QuizOutcome::Open { verdicts, score }
    }

    fn free_text_answer(&self, ordinal: usize) -> String {
        match self.answers.get(&ordinal) {
            Some(Answer::FreeText(text)) => text.trim().to_owned(),
            _ => String::new(),
        }
    }
}

fn parse_choice_input(input: &str, option_count: usize) -> Result<usize> {
    let input = input.trim().to_lowercase();
    let last_letter = (b'a' + (option_count as u8) - 1) as char;

    let mut characters = input.chars();
    if let (Some(letter), None) = (characters.next(), characters.next()) {
        if letter.is_ascii_lowercase() {
            let index = (letter as usize) - ('a' as usize);
            ensure!(index < option_count, "Pick an option from a to {}", last_letter);
            return Ok(index);
        }
    }
    if let Ok(number) = input.parse::<usize>() {
        ensure!(
            number >= 1 && number <= option_count,
            "Pick an option from 1 to {}",
            option_count
        );
        return Ok(number - 1);
    }
    Err(anyhow!("Pick an option using its letter (a to {})", last_letter))
}

impl<O: SessionOutput> State for AnsweringState<O> {
    fn on_begin(&mut self) {
        self.output.say(&Message::QuizBegins(self.questions.len()));
        match &*self.questions {
            QuestionSet::Choice(definition) => self
                .output
                .say(&Message::ChoiceQuestions(definition.get_questions().to_vec())),
            QuestionSet::Open(questions) => {
                self.output.say(&Message::OpenQuestions(questions.clone()))
            }
        }
    }

    fn on_end(&mut self) {}
}
