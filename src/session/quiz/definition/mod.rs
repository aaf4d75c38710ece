use lazy_static::lazy_static;
use log::warn;
use parking_lot::RwLock;
use regex::Regex;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub mod question;

pub use question::{ChoiceQuestion, OpenQuestion, QuestionRecord};

#[cfg(test)]
mod tests;

lazy_static! {
    static ref NUMBERED_LINE: Regex = Regex::new(r"^\d+\.").unwrap();
    static ref ANSWER_LABEL: Regex = Regex::new(r"^(Answer|A):\s*").unwrap();
    static ref OPTION_LINE: Regex = Regex::new(r"^[a-dA-D]\)").unwrap();
}

fn content_lines(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Parses numbered questions, each optionally followed by an `Answer:`/`A:`
/// line within the next `scan_window` non-blank lines. A question without a
/// labeled answer in range is still emitted, with no answer.
pub fn parse_qa(raw: &str, scan_window: usize) -> Vec<QuestionRecord> {
    let lines = content_lines(raw);
    let mut records = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if !NUMBERED_LINE.is_match(line) {
            continue;
        }
        let answer = lines[index + 1..]
            .iter()
            .take(scan_window)
            .find_map(|candidate| {
                ANSWER_LABEL
                    .find(candidate)
                    .map(|label| candidate[label.end()..].to_owned())
            });
        records.push(QuestionRecord {
            text: (*line).to_owned(),
            answer,
            ordinal: records.len(),
        });
    }
    records
}

/// One record per numbered line, no structure beyond the question text.
pub fn parse_open(raw: &str) -> Vec<OpenQuestion> {
    content_lines(raw)
        .into_iter()
        .filter(|line| NUMBERED_LINE.is_match(line))
        .enumerate()
        .map(|(ordinal, line)| OpenQuestion {
            text: line.to_owned(),
            ordinal,
        })
        .collect()
}

#[derive(Debug)]
pub struct ChoiceDefinition {
    questions: Vec<ChoiceQuestion>,
}

impl ChoiceDefinition {
    /// Parses numbered questions with lettered option lines. A numbered line
    /// flushes the block accumulated so far; a block is only emitted when it
    /// collected exactly `options_per_question` options, otherwise it is
    /// dropped. The first option of each block is the correct one.
    pub fn parse(raw: &str, options_per_question: usize) -> ChoiceDefinition {
        let mut questions = Vec::new();
        let mut current_question: Option<String> = None;
        let mut collected_options: Vec<String> = Vec::new();

        for line in content_lines(raw) {
            if NUMBERED_LINE.is_match(line) {
                Self::flush(
                    &mut questions,
                    current_question.take(),
                    std::mem::replace(&mut collected_options, Vec::new()),
                    options_per_question,
                );
                current_question = Some(line.to_owned());
            } else if OPTION_LINE.is_match(line) {
                collected_options.push(line[2..].trim().to_owned());
            }
        }
        Self::flush(
            &mut questions,
            current_question.take(),
            collected_options,
            options_per_question,
        );

        ChoiceDefinition { questions }
    }

    fn flush(
        questions: &mut Vec<ChoiceQuestion>,
        question_text: Option<String>,
        options: Vec<String>,
        options_per_question: usize,
    ) {
        let question_text = match question_text {
            Some(text) => text,
            None => return,
        };
        if options.len() != options_per_question {
            warn!(
                "Dropping question with {} option(s): {}",
                options.len(),
                question_text
            );
            return;
        }
        questions.push(ChoiceQuestion::from_source_order(question_text, options));
    }

    pub fn get_questions(&self) -> &[ChoiceQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Caches parsed choice definitions per raw completion text so that parsing
/// the same text again never reshuffles options mid-quiz.
#[derive(Default)]
pub struct DefinitionCache {
    definitions: RwLock<HashMap<u64, Arc<ChoiceDefinition>>>,
}

impl DefinitionCache {
    pub fn get_or_parse(&self, raw: &str, options_per_question: usize) -> Arc<ChoiceDefinition> {
        let key = {
            let mut hasher = DefaultHasher::new();
            raw.hash(&mut hasher);
            hasher.finish()
        };
        let definition_exists = {
            let map = self.definitions.read();
            map.contains_key(&key)
        };
        if !definition_exists {
            let definition = Arc::new(ChoiceDefinition::parse(raw, options_per_question));
            let mut map = self.definitions.write();
            map.insert(key, definition);
        }
        let map = self.definitions.read();
        Arc::clone(map.get(&key).expect("Definition was just inserted"))
    }
}
