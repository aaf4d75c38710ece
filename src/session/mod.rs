use anyhow::*;
use log::info;
use std::collections::HashSet;
use std::sync::Arc;

pub mod quiz;


use crate::llm::{Difficulty, GenerationParams, Generator, Grader, Mode};
use crate::output::{Message, SessionOutput};
use self::quiz::definition::{self, DefinitionCache, QuestionRecord};
use self::quiz::settings::Settings;
use self::quiz::{QuestionSet, Quiz};

enum Phase<O: SessionOutput> {
    Idle,
    Review(ReviewState),
    Quiz(Quiz<O>),
}

/// List/qa view of one generation: the records plus which answers are
/// currently revealed.
struct ReviewState {
    records: Vec<QuestionRecord>,
    revealed: HashSet<usize>,
}

pub struct Session<O: SessionOutput> {
    topic: String,
    params: GenerationParams,
    settings: Settings,
    generator: Arc<dyn Generator>,
    grader: Arc<dyn Grader>,
    definitions: DefinitionCache,
    current_phase: Phase<O>,
    output: O,
}

impl<O: SessionOutput> Session<O> {
    pub fn new(generator: Arc<dyn Generator>, grader: Arc<dyn Grader>, output: O) -> Session<O> {
        Session {
            topic: String::new(),
            params: Default::default(),
            settings: Default::default(),
            generator,
            grader,
            definitions: Default::default(),
            current_phase: Phase::Idle,
            output,
        }
    }

    pub fn set_topic(&mut self, topic: String) {
        self.topic = topic;
        self.status();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.params.mode = mode;
        self.status();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.params.difficulty = difficulty;
        self.status();
    }

    pub fn set_language(&mut self, language: String) {
        self.params.language = language;
        self.status();
    }

    pub fn status(&self) {
        self.output.say(&Message::SettingsRecap {
            topic: self.topic.clone(),
            params: self.params.clone(),
        });
    }

    /// Runs one generation cycle: prompt the generator with the current
    /// settings, parse its completion for the current mode, and replace
    /// whatever view or quiz was active before.
    pub fn generate(&mut self) -> Result<()> {
        let topic = self.topic.trim().to_owned();
        if topic.is_empty() {
            bail!("Set a topic before generating questions");
        }
        info!("Generating questions for topic: {}", topic);
        let raw = self.generator.generate(&topic, &self.params)?;

        match self.params.mode {
            Mode::List | Mode::Qa => {
                let records = definition::parse_qa(&raw, self.settings.answer_scan_window);
                ensure!(
                    !records.is_empty(),
                    "The generated text contained no questions. Try generating again"
                );
                self.output.say(&Message::QuestionList(records.clone()));
                self.current_phase = Phase::Review(ReviewState {
                    records,
                    revealed: HashSet::new(),
                });
            }
            Mode::Choice => {
                let definition = self
                    .definitions
                    .get_or_parse(&raw, self.settings.options_per_question);
                ensure!(
                    !definition.is_empty(),
                    "The generated text contained no complete questions. Try generating again"
                );
                self.begin_quiz(QuestionSet::Choice(definition), raw);
            }
            Mode::Open => {
                let questions = definition::parse_open(&raw);
                ensure!(
                    !questions.is_empty(),
                    "The generated text contained no questions. Try generating again"
                );
                self.begin_quiz(QuestionSet::Open(questions), raw);
            }
        }
        Ok(())
    }

    fn begin_quiz(&mut self, questions: QuestionSet, raw: String) {
        let quiz = Quiz::new(questions, raw, self.grader.clone(), self.output.clone());
        self.current_phase = Phase::Quiz(quiz);
    }

    /// Toggles answer visibility for one qa-mode question.
    pub fn reveal(&mut self, number: usize) -> Result<()> {
        let ordinal = ordinal_from_number(number)?;
        match &mut self.current_phase {
            Phase::Review(state) => {
                let record = state
                    .records
                    .get(ordinal)
                    .with_context(|| format!("There is no question {}", number))?;
                match &record.answer {
                    None => self.output.say(&Message::NoAnswerAvailable(ordinal)),
                    Some(answer) => {
                        if state.revealed.remove(&ordinal) {
                            self.output.say(&Message::AnswerHidden(ordinal));
                        } else {
                            state.revealed.insert(ordinal);
                            self.output
                                .say(&Message::AnswerReveal(ordinal, answer.clone()));
                        }
                    }
                }
                Ok(())
            }
            _ => Err(anyhow!("There are no revealable answers right now")),
        }
    }

    pub fn answer(&mut self, number: usize, input: &str) -> Result<()> {
        let ordinal = ordinal_from_number(number)?;
        match &mut self.current_phase {
            Phase::Quiz(quiz) => quiz.answer(ordinal, input),
            _ => Err(anyhow!("There is no active quiz")),
        }
    }

    pub fn submit(&mut self) -> Result<()> {
        match &mut self.current_phase {
            Phase::Quiz(quiz) => quiz.submit(),
            _ => Err(anyhow!("There is no active quiz")),
        }
    }

    /// Retakes the current quiz. Multiple choice reuses the same questions
    /// with cleared answers; open-ended quizzes get a freshly generated
    /// question set, since the previous one was already graded.
    pub fn again(&mut self) -> Result<()> {
        let regenerate = match &mut self.current_phase {
            Phase::Quiz(quiz) => {
                if quiz.is_open_mode() {
                    true
                } else {
                    quiz.reset();
                    false
                }
            }
            _ => bail!("There is no quiz to retake"),
        };
        if regenerate {
            self.generate()?;
        }
        Ok(())
    }
}

fn ordinal_from_number(number: usize) -> Result<usize> {
    number.checked_sub(1).context("Question numbers start at 1")
}
